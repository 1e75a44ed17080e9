use super::IEntityTitleRepo;
use sqlx::PgPool;

/// Reads titles from one of the tables owned by the platform
pub struct PostgresEntityTitleRepo {
    pool: PgPool,
    query: &'static str,
}

impl PostgresEntityTitleRepo {
    pub fn grids(pool: PgPool) -> Self {
        Self {
            pool,
            query: "SELECT g.name FROM grids AS g WHERE g.grid_id = $1",
        }
    }

    pub fn projects(pool: PgPool) -> Self {
        Self {
            pool,
            query: "SELECT p.name FROM projects AS p WHERE p.project_id = $1",
        }
    }

    pub fn deliveries(pool: PgPool) -> Self {
        Self {
            pool,
            query: "SELECT d.title FROM deliveries AS d WHERE d.delivery_id = $1",
        }
    }
}

#[async_trait::async_trait]
impl IEntityTitleRepo for PostgresEntityTitleRepo {
    async fn find_title(&self, related_id: &str) -> anyhow::Result<Option<String>> {
        let title = sqlx::query_scalar::<_, String>(self.query)
            .bind(related_id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(title)
    }
}
