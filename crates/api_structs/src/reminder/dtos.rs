use nudge_domain::{RelatedType, Reminder, ReminderStatus, ID};
use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize, Serialize, Clone)]
#[serde(rename_all = "camelCase")]
pub struct ReminderDTO {
    pub id: ID,
    pub user_id: ID,
    pub related_type: RelatedType,
    pub related_id: String,
    pub reminder_count: i64,
    pub last_sent_at: Option<i64>,
    pub next_send_at: Option<i64>,
    pub status: ReminderStatus,
    pub created: i64,
    pub updated: i64,
}

impl ReminderDTO {
    pub fn new(reminder: Reminder) -> Self {
        Self {
            id: reminder.id,
            user_id: reminder.user_id,
            related_type: reminder.related_type,
            related_id: reminder.related_id,
            reminder_count: reminder.reminder_count,
            last_sent_at: reminder.last_sent_at,
            next_send_at: reminder.next_send_at,
            status: reminder.status,
            created: reminder.created,
            updated: reminder.updated,
        }
    }
}
