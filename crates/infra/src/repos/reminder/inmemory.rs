use super::IReminderRepo;
use crate::repos::shared::{inmemory_repo::*, repo::UpdateResult};
use nudge_domain::{RelatedType, Reminder};

pub struct InMemoryReminderRepo {
    reminders: std::sync::Mutex<Vec<Reminder>>,
}

impl InMemoryReminderRepo {
    pub fn new() -> Self {
        Self {
            reminders: std::sync::Mutex::new(vec![]),
        }
    }
}

#[async_trait::async_trait]
impl IReminderRepo for InMemoryReminderRepo {
    async fn insert(&self, reminder: &Reminder) -> anyhow::Result<()> {
        if !reminder.is_active() {
            insert(reminder, &self.reminders);
            return Ok(());
        }
        let inserted = insert_unless(reminder, &self.reminders, |r| {
            r.is_active()
                && r.related_type == reminder.related_type
                && r.related_id == reminder.related_id
        });
        if !inserted {
            anyhow::bail!(
                "An active reminder for {} {} already exists",
                reminder.related_type,
                reminder.related_id
            );
        }
        Ok(())
    }

    async fn find_active_by(
        &self,
        related_type: RelatedType,
        related_id: &str,
    ) -> anyhow::Result<Option<Reminder>> {
        let mut reminders = find_by(&self.reminders, |r| {
            r.is_active() && r.related_type == related_type && r.related_id == related_id
        });
        if reminders.is_empty() {
            return Ok(None);
        }
        Ok(Some(reminders.remove(0)))
    }

    async fn find_by_related(
        &self,
        related_type: RelatedType,
        related_id: &str,
    ) -> anyhow::Result<Vec<Reminder>> {
        let mut reminders = find_by(&self.reminders, |r| {
            r.related_type == related_type && r.related_id == related_id
        });
        reminders.sort_by_key(|r| r.created);
        Ok(reminders)
    }

    async fn list_due_active(&self, now: i64) -> anyhow::Result<Vec<Reminder>> {
        Ok(find_by(&self.reminders, |r| r.is_due(now)))
    }

    async fn update_by_id(
        &self,
        reminder: &Reminder,
        expected_count: i64,
    ) -> anyhow::Result<UpdateResult> {
        let matched = save_if(reminder, &self.reminders, |stored| {
            stored.is_active() && stored.reminder_count == expected_count
        });
        Ok(UpdateResult { matched })
    }
}


#[cfg(test)]
mod tests {
    use super::*;
    use nudge_domain::ID;
    use std::sync::{Arc, Barrier};

    #[test]
    fn concurrent_inserts_keep_one_active_reminder() {
        const WRITERS: usize = 4;

        for round in 0..200 {
            let repo = Arc::new(InMemoryReminderRepo::new());
            let barrier = Arc::new(Barrier::new(WRITERS));
            let related_id = format!("d{}", round);

            let writers = (0..WRITERS)
                .map(|_| {
                    let repo = repo.clone();
                    let barrier = barrier.clone();
                    let reminder =
                        Reminder::new(ID::new(), RelatedType::Delivery, related_id.clone(), 0);
                    std::thread::spawn(move || {
                        let rt = tokio::runtime::Builder::new_current_thread()
                            .build()
                            .unwrap();
                        barrier.wait();
                        rt.block_on(repo.insert(&reminder)).is_ok()
                    })
                })
                .collect::<Vec<_>>();

            let inserted = writers
                .into_iter()
                .map(|writer| writer.join().unwrap())
                .filter(|ok| *ok)
                .count();
            assert_eq!(inserted, 1);
            assert_eq!(repo.reminders.lock().unwrap().len(), 1);
        }
    }
}
