mod inmemory;
mod postgres;

pub use inmemory::InMemoryReminderRepo;
use nudge_domain::{RelatedType, Reminder};
pub use postgres::PostgresReminderRepo;

use crate::repos::shared::repo::UpdateResult;

#[async_trait::async_trait]
pub trait IReminderRepo: Send + Sync {
    async fn insert(&self, reminder: &Reminder) -> anyhow::Result<()>;
    /// The active `Reminder` watching the given entity, if any
    async fn find_active_by(
        &self,
        related_type: RelatedType,
        related_id: &str,
    ) -> anyhow::Result<Option<Reminder>>;
    /// Every `Reminder` that has ever watched the given entity, oldest first
    async fn find_by_related(
        &self,
        related_type: RelatedType,
        related_id: &str,
    ) -> anyhow::Result<Vec<Reminder>>;
    /// Active `Reminder`s with `next_send_at <= now`
    async fn list_due_active(&self, now: i64) -> anyhow::Result<Vec<Reminder>>;
    /// Stores the new state of `reminder`, but only if the stored row is still
    /// active and has `expected_count` as its reminder count.
    async fn update_by_id(
        &self,
        reminder: &Reminder,
        expected_count: i64,
    ) -> anyhow::Result<UpdateResult>;
}
