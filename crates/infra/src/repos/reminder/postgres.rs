use super::IReminderRepo;
use crate::repos::shared::repo::UpdateResult;
use nudge_domain::{RelatedType, Reminder};
use sqlx::{types::Uuid, FromRow, PgPool};
use std::convert::TryFrom;

pub struct PostgresReminderRepo {
    pool: PgPool,
}

impl PostgresReminderRepo {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, FromRow)]
struct ReminderRaw {
    reminder_uid: Uuid,
    user_uid: Uuid,
    related_type: String,
    related_id: String,
    reminder_count: i64,
    last_sent_at: Option<i64>,
    next_send_at: Option<i64>,
    status: String,
    created: i64,
    updated: i64,
}

impl TryFrom<ReminderRaw> for Reminder {
    type Error = anyhow::Error;

    fn try_from(raw: ReminderRaw) -> anyhow::Result<Self> {
        Ok(Reminder {
            id: raw.reminder_uid.into(),
            user_id: raw.user_uid.into(),
            related_type: raw.related_type.parse()?,
            related_id: raw.related_id,
            reminder_count: raw.reminder_count,
            last_sent_at: raw.last_sent_at,
            next_send_at: raw.next_send_at,
            status: raw.status.parse()?,
            created: raw.created,
            updated: raw.updated,
        })
    }
}

fn to_domain(raws: Vec<ReminderRaw>) -> anyhow::Result<Vec<Reminder>> {
    raws.into_iter().map(Reminder::try_from).collect()
}

#[async_trait::async_trait]
impl IReminderRepo for PostgresReminderRepo {
    async fn insert(&self, reminder: &Reminder) -> anyhow::Result<()> {
        sqlx::query(
            r#"
            INSERT INTO reminders
            (reminder_uid, user_uid, related_type, related_id, reminder_count, last_sent_at, next_send_at, status, created, updated)
            VALUES($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
            "#,
        )
        .bind(reminder.id.inner_ref())
        .bind(reminder.user_id.inner_ref())
        .bind(reminder.related_type.as_str())
        .bind(&reminder.related_id)
        .bind(reminder.reminder_count)
        .bind(reminder.last_sent_at)
        .bind(reminder.next_send_at)
        .bind(reminder.status.as_str())
        .bind(reminder.created)
        .bind(reminder.updated)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn find_active_by(
        &self,
        related_type: RelatedType,
        related_id: &str,
    ) -> anyhow::Result<Option<Reminder>> {
        let raw = sqlx::query_as::<_, ReminderRaw>(
            r#"
            SELECT * FROM reminders AS r
            WHERE r.related_type = $1 AND
            r.related_id = $2 AND
            r.status = 'active'
            "#,
        )
        .bind(related_type.as_str())
        .bind(related_id)
        .fetch_optional(&self.pool)
        .await?;

        raw.map(Reminder::try_from).transpose()
    }

    async fn find_by_related(
        &self,
        related_type: RelatedType,
        related_id: &str,
    ) -> anyhow::Result<Vec<Reminder>> {
        let raws = sqlx::query_as::<_, ReminderRaw>(
            r#"
            SELECT * FROM reminders AS r
            WHERE r.related_type = $1 AND
            r.related_id = $2
            ORDER BY r.created
            "#,
        )
        .bind(related_type.as_str())
        .bind(related_id)
        .fetch_all(&self.pool)
        .await?;

        to_domain(raws)
    }

    async fn list_due_active(&self, now: i64) -> anyhow::Result<Vec<Reminder>> {
        let raws = sqlx::query_as::<_, ReminderRaw>(
            r#"
            SELECT * FROM reminders AS r
            WHERE r.status = 'active' AND
            r.next_send_at <= $1
            "#,
        )
        .bind(now)
        .fetch_all(&self.pool)
        .await?;

        to_domain(raws)
    }

    async fn update_by_id(
        &self,
        reminder: &Reminder,
        expected_count: i64,
    ) -> anyhow::Result<UpdateResult> {
        let res = sqlx::query(
            r#"
            UPDATE reminders
            SET reminder_count = $2,
            last_sent_at = $3,
            next_send_at = $4,
            status = $5,
            updated = $6
            WHERE reminder_uid = $1 AND
            status = 'active' AND
            reminder_count = $7
            "#,
        )
        .bind(reminder.id.inner_ref())
        .bind(reminder.reminder_count)
        .bind(reminder.last_sent_at)
        .bind(reminder.next_send_at)
        .bind(reminder.status.as_str())
        .bind(reminder.updated)
        .bind(expected_count)
        .execute(&self.pool)
        .await?;

        Ok(UpdateResult {
            matched: res.rows_affected() == 1,
        })
    }
}
