mod notification;
mod reminder;
mod reminder_message;
mod shared;
mod user;

pub use notification::{InvalidSeverityError, Notification, NotificationSeverity};
pub use reminder::{
    InvalidRelatedTypeError, InvalidReminderStatusError, RelatedType, Reminder, ReminderError,
    ReminderStatus, ReminderStep,
};
pub use reminder_message::ReminderMessage;
pub use shared::entity::{Entity, InvalidIDError, ID};
pub use user::{InvalidUserRoleError, User, UserRole};
