use super::IUserRepo;
use nudge_domain::{User, ID};
use sqlx::{types::Uuid, FromRow, PgPool};
use std::convert::TryFrom;

pub struct PostgresUserRepo {
    pool: PgPool,
}

impl PostgresUserRepo {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, FromRow)]
struct UserRaw {
    user_uid: Uuid,
    name: String,
    role: String,
    active: bool,
}

impl TryFrom<UserRaw> for User {
    type Error = anyhow::Error;

    fn try_from(raw: UserRaw) -> anyhow::Result<Self> {
        Ok(User {
            id: raw.user_uid.into(),
            name: raw.name,
            role: raw.role.parse()?,
            active: raw.active,
        })
    }
}

#[async_trait::async_trait]
impl IUserRepo for PostgresUserRepo {
    async fn insert(&self, user: &User) -> anyhow::Result<()> {
        sqlx::query(
            r#"
            INSERT INTO users(user_uid, name, role, active)
            VALUES($1, $2, $3, $4)
            "#,
        )
        .bind(user.id.inner_ref())
        .bind(&user.name)
        .bind(user.role.as_str())
        .bind(user.active)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn find(&self, user_id: &ID) -> anyhow::Result<Option<User>> {
        sqlx::query_as::<_, UserRaw>(
            r#"
            SELECT u.user_uid, u.name, u.role, u.active FROM users AS u
            WHERE u.user_uid = $1
            "#,
        )
        .bind(user_id.inner_ref())
        .fetch_optional(&self.pool)
        .await?
        .map(User::try_from)
        .transpose()
    }

    async fn find_active_admins(&self) -> anyhow::Result<Vec<User>> {
        sqlx::query_as::<_, UserRaw>(
            r#"
            SELECT u.user_uid, u.name, u.role, u.active FROM users AS u
            WHERE u.role = 'admin' AND
            u.active
            "#,
        )
        .fetch_all(&self.pool)
        .await?
        .into_iter()
        .map(User::try_from)
        .collect()
    }
}
