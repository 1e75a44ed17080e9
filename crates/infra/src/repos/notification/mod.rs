mod inmemory;
mod postgres;

pub use inmemory::InMemoryNotificationRepo;
use nudge_domain::{Notification, ID};
pub use postgres::PostgresNotificationRepo;

/// Outbox of in-app messages shown to users
#[async_trait::async_trait]
pub trait INotificationRepo: Send + Sync {
    async fn insert(&self, notification: &Notification) -> anyhow::Result<()>;
    /// Notifications of a `User`, oldest first
    async fn find_by_user(&self, user_id: &ID) -> anyhow::Result<Vec<Notification>>;
}

#[cfg(test)]
mod tests {
    use crate::{run_migration, setup_context};
    use nudge_domain::{Notification, NotificationSeverity, User, UserRole};

    #[tokio::test]
    async fn stores_notifications_per_user() {
        run_migration().await.expect("To run migrations");
        let ctx = setup_context().await;
        let ana = User::new("Ana".into(), UserRole::Admin);
        let acme = User::new("Acme".into(), UserRole::Client);
        ctx.repos.users.insert(&ana).await.unwrap();
        ctx.repos.users.insert(&acme).await.unwrap();

        let first = Notification::new(
            acme.id.clone(),
            "Recordatorio".into(),
            "Tu entrega está esperando tu confirmación.".into(),
            NotificationSeverity::Info,
            10,
        );
        let second = Notification::new(
            acme.id.clone(),
            "Urgente".into(),
            "Tu entrega sigue esperando tu confirmación.".into(),
            NotificationSeverity::Warning,
            20,
        );
        let other = Notification::new(
            ana.id.clone(),
            "Cliente sin respuesta".into(),
            "Acme no ha respondido.".into(),
            NotificationSeverity::Error,
            15,
        );
        for n in &[second.clone(), other.clone(), first.clone()] {
            ctx.repos.notifications.insert(n).await.unwrap();
        }

        let found = ctx.repos.notifications.find_by_user(&acme.id).await.unwrap();
        assert_eq!(found, vec![first, second]);
        assert_eq!(
            ctx.repos.notifications.find_by_user(&ana.id).await.unwrap(),
            vec![other]
        );
    }
}
