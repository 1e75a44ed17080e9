use crate::dtos::ReminderDTO;
use nudge_domain::{Reminder, ID};
use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReminderResponse {
    pub reminder: Option<ReminderDTO>,
}

impl ReminderResponse {
    pub fn new(reminder: Option<Reminder>) -> Self {
        Self {
            reminder: reminder.map(ReminderDTO::new),
        }
    }
}

/// Path of the routes acting on the reminders of one entity. The related type
/// is kept as a string so that unknown types can be rejected with a proper
/// error message.
#[derive(Debug, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RelatedEntityPathParams {
    pub related_type: String,
    pub related_id: String,
}

pub mod start_tracking {
    use super::*;

    #[derive(Debug, Deserialize, Serialize)]
    #[serde(rename_all = "camelCase")]
    pub struct RequestBody {
        pub user_id: ID,
        pub related_type: String,
        pub related_id: String,
    }

    #[derive(Debug, Deserialize, Serialize)]
    #[serde(rename_all = "camelCase")]
    pub struct APIResponse {
        /// `true` if a new reminder was created by this request
        pub created: bool,
        pub reminder: Option<ReminderDTO>,
    }

    impl APIResponse {
        pub fn new(created: bool, reminder: Option<Reminder>) -> Self {
            Self {
                created,
                reminder: reminder.map(ReminderDTO::new),
            }
        }
    }
}

pub mod resolve_reminder {
    use super::*;

    pub type PathParams = RelatedEntityPathParams;

    pub type APIResponse = ReminderResponse;
}

pub mod get_reminders {
    use super::*;

    pub type PathParams = RelatedEntityPathParams;

    #[derive(Debug, Deserialize, Serialize)]
    #[serde(rename_all = "camelCase")]
    pub struct APIResponse {
        pub reminders: Vec<ReminderDTO>,
    }

    impl APIResponse {
        pub fn new(reminders: Vec<Reminder>) -> Self {
            Self {
                reminders: reminders.into_iter().map(ReminderDTO::new).collect(),
            }
        }
    }
}

pub mod run_sweep {
    use super::*;

    #[derive(Debug, Deserialize, Serialize)]
    #[serde(rename_all = "camelCase")]
    pub struct APIResponse {
        /// Reminders whose new state was stored
        pub processed: usize,
        /// Of the processed reminders, those that were escalated
        pub escalated: usize,
        /// Due reminders left untouched because of an error or a lost race
        pub skipped: usize,
        pub message: String,
    }
}
