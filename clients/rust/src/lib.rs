mod base;
mod reminder;
mod status;

pub(crate) use base::BaseClient;
pub use base::{APIError, APIErrorVariant, APIResponse};
pub use nudge_api_structs::dtos::*;
pub use nudge_domain::{RelatedType, ReminderStatus, ID};
use reminder::ReminderClient;
pub use reminder::{RelatedEntityInput, StartTrackingInput};
pub use reqwest::StatusCode;
use status::StatusClient;
use std::sync::Arc;

// Domain
pub use nudge_api_structs::dtos::ReminderDTO as Reminder;

/// Nudge Server SDK
///
/// The SDK contains methods for interacting with the Nudge server API.
#[derive(Clone)]
pub struct NudgeSDK {
    pub reminder: ReminderClient,
    pub status: StatusClient,
}

impl NudgeSDK {
    /// An empty `cron_secret` sends no secret at all
    pub fn new<T: Into<String>>(address: String, cron_secret: T) -> Self {
        let mut base = BaseClient::new(address);
        base.set_cron_secret(cron_secret.into());
        let base = Arc::new(base);
        let reminder = ReminderClient::new(base.clone());
        let status = StatusClient::new(base);

        Self { reminder, status }
    }
}
