mod config;
mod repos;
mod system;

pub use config::Config;
pub use repos::{
    EntityTitleRepos, IEntityTitleRepo, INotificationRepo, IReminderRepo, IUserRepo,
    InMemoryEntityTitleRepo, InMemoryNotificationRepo, InMemoryReminderRepo, InMemoryUserRepo,
    Repos, UpdateResult,
};
use sqlx::migrate::MigrateError;
use sqlx::postgres::PgPoolOptions;
use std::sync::Arc;
pub use system::ISys;
use system::RealSys;
use tokio::sync::Mutex;
use tracing::info;

#[derive(Clone)]
pub struct NudgeContext {
    pub repos: Repos,
    pub config: Config,
    pub sys: Arc<dyn ISys>,
    /// Held while a sweep is running so that two sweeps in this process
    /// never process the same reminders at the same time
    pub sweep_lock: Arc<Mutex<()>>,
}

struct ContextParams {
    pub postgres_connection_string: String,
}

impl NudgeContext {
    pub fn create_inmemory() -> Self {
        Self {
            repos: Repos::create_inmemory(),
            config: Config::new(),
            sys: Arc::new(RealSys {}),
            sweep_lock: Default::default(),
        }
    }

    async fn create(params: ContextParams) -> Self {
        let repos = Repos::create_postgres(&params.postgres_connection_string)
            .await
            .expect("Postgres credentials must be set and valid");
        Self {
            repos,
            config: Config::new(),
            sys: Arc::new(RealSys {}),
            sweep_lock: Default::default(),
        }
    }
}

/// Will setup the infrastructure context given the environment
pub async fn setup_context() -> NudgeContext {
    match get_psql_connection_string() {
        Some(postgres_connection_string) => {
            info!("DATABASE_URL env var was provided. Going to use postgres.");
            NudgeContext::create(ContextParams {
                postgres_connection_string,
            })
            .await
        }
        None => {
            info!("DATABASE_URL env var was not provided. Going to use inmemory infra.");
            NudgeContext::create_inmemory()
        }
    }
}

fn get_psql_connection_string() -> Option<String> {
    const PSQL_CONNECTION_STRING: &str = "DATABASE_URL";

    std::env::var(PSQL_CONNECTION_STRING).ok()
}

/// Runs the migrations if a postgres database is configured
pub async fn run_migration() -> Result<(), MigrateError> {
    let connection_string = match get_psql_connection_string() {
        Some(s) => s,
        None => return Ok(()),
    };
    let pool = PgPoolOptions::new()
        .max_connections(5)
        .connect(&connection_string)
        .await?;

    sqlx::migrate!().run(&pool).await
}
