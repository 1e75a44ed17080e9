mod inmemory;
mod postgres;

pub use inmemory::InMemoryUserRepo;
use nudge_domain::{User, ID};
pub use postgres::PostgresUserRepo;

/// Read access to the platform users
#[async_trait::async_trait]
pub trait IUserRepo: Send + Sync {
    async fn insert(&self, user: &User) -> anyhow::Result<()>;
    async fn find(&self, user_id: &ID) -> anyhow::Result<Option<User>>;
    async fn find_active_admins(&self) -> anyhow::Result<Vec<User>>;
}

#[cfg(test)]
mod tests {
    use crate::{run_migration, setup_context};
    use nudge_domain::{User, UserRole, ID};

    #[tokio::test]
    async fn finds_only_active_admins() {
        run_migration().await.expect("To run migrations");
        let ctx = setup_context().await;
        let repo = &ctx.repos.users;

        let admin = User::new("Ana".into(), UserRole::Admin);
        let mut inactive_admin = User::new("Luis".into(), UserRole::Admin);
        inactive_admin.active = false;
        let client = User::new("Acme".into(), UserRole::Client);
        for user in &[admin.clone(), inactive_admin.clone(), client.clone()] {
            repo.insert(user).await.expect("To insert user");
        }

        // Other tests may have stored admins in the same database
        let admins = repo.find_active_admins().await.unwrap();
        assert!(admins.contains(&admin));
        assert!(!admins.iter().any(|u| u.id == inactive_admin.id));
        assert!(!admins.iter().any(|u| u.id == client.id));
        assert!(admins.iter().all(|u| u.is_active_admin()));

        assert_eq!(repo.find(&client.id).await.unwrap(), Some(client));
        assert_eq!(repo.find(&inactive_admin.id).await.unwrap(), Some(inactive_admin));
        assert_eq!(repo.find(&ID::new()).await.unwrap(), None);
    }
}
