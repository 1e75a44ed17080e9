use super::INotificationRepo;
use nudge_domain::{Notification, ID};
use sqlx::{types::Uuid, FromRow, PgPool};
use std::convert::TryFrom;

pub struct PostgresNotificationRepo {
    pool: PgPool,
}

impl PostgresNotificationRepo {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, FromRow)]
struct NotificationRaw {
    notification_uid: Uuid,
    user_uid: Uuid,
    title: String,
    message: String,
    severity: String,
    read: bool,
    created: i64,
}

impl TryFrom<NotificationRaw> for Notification {
    type Error = anyhow::Error;

    fn try_from(raw: NotificationRaw) -> anyhow::Result<Self> {
        Ok(Notification {
            id: raw.notification_uid.into(),
            user_id: raw.user_uid.into(),
            title: raw.title,
            message: raw.message,
            severity: raw.severity.parse()?,
            read: raw.read,
            created: raw.created,
        })
    }
}

#[async_trait::async_trait]
impl INotificationRepo for PostgresNotificationRepo {
    async fn insert(&self, notification: &Notification) -> anyhow::Result<()> {
        sqlx::query(
            r#"
            INSERT INTO notifications
            (notification_uid, user_uid, title, message, severity, read, created)
            VALUES($1, $2, $3, $4, $5, $6, $7)
            "#,
        )
        .bind(notification.id.inner_ref())
        .bind(notification.user_id.inner_ref())
        .bind(&notification.title)
        .bind(&notification.message)
        .bind(notification.severity.as_str())
        .bind(notification.read)
        .bind(notification.created)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn find_by_user(&self, user_id: &ID) -> anyhow::Result<Vec<Notification>> {
        sqlx::query_as::<_, NotificationRaw>(
            r#"
            SELECT * FROM notifications AS n
            WHERE n.user_uid = $1
            ORDER BY n.created
            "#,
        )
        .bind(user_id.inner_ref())
        .fetch_all(&self.pool)
        .await?
        .into_iter()
        .map(Notification::try_from)
        .collect()
    }
}
