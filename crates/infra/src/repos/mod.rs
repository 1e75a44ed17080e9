mod entity_title;
mod notification;
mod reminder;
mod shared;
mod user;

pub use entity_title::{
    EntityTitleRepos, IEntityTitleRepo, InMemoryEntityTitleRepo, PostgresEntityTitleRepo,
};
pub use notification::{INotificationRepo, InMemoryNotificationRepo, PostgresNotificationRepo};
pub use reminder::{IReminderRepo, InMemoryReminderRepo, PostgresReminderRepo};
pub use shared::repo::UpdateResult;
use sqlx::postgres::PgPoolOptions;
use std::sync::Arc;
use tracing::info;
pub use user::{IUserRepo, InMemoryUserRepo, PostgresUserRepo};

#[derive(Clone)]
pub struct Repos {
    pub reminders: Arc<dyn IReminderRepo>,
    pub notifications: Arc<dyn INotificationRepo>,
    pub users: Arc<dyn IUserRepo>,
    pub entity_titles: EntityTitleRepos,
}

impl Repos {
    pub async fn create_postgres(connection_string: &str) -> anyhow::Result<Self> {
        info!("DB CHECKING CONNECTION ...");
        let pool = PgPoolOptions::new()
            .max_connections(5)
            .connect(connection_string)
            .await?;
        info!("DB CHECKING CONNECTION ... [done]");
        Ok(Self {
            reminders: Arc::new(PostgresReminderRepo::new(pool.clone())),
            notifications: Arc::new(PostgresNotificationRepo::new(pool.clone())),
            users: Arc::new(PostgresUserRepo::new(pool.clone())),
            entity_titles: EntityTitleRepos {
                grids: Arc::new(PostgresEntityTitleRepo::grids(pool.clone())),
                projects: Arc::new(PostgresEntityTitleRepo::projects(pool.clone())),
                deliveries: Arc::new(PostgresEntityTitleRepo::deliveries(pool)),
            },
        })
    }

    pub fn create_inmemory() -> Self {
        Self {
            reminders: Arc::new(InMemoryReminderRepo::new()),
            notifications: Arc::new(InMemoryNotificationRepo::new()),
            users: Arc::new(InMemoryUserRepo::new()),
            entity_titles: EntityTitleRepos {
                grids: Arc::new(InMemoryEntityTitleRepo::new()),
                projects: Arc::new(InMemoryEntityTitleRepo::new()),
                deliveries: Arc::new(InMemoryEntityTitleRepo::new()),
            },
        }
    }
}
