use crate::{
    notification::NotificationSeverity,
    shared::entity::{Entity, ID},
};
use serde::{Deserialize, Serialize};
use std::{fmt::Display, str::FromStr};
use thiserror::Error;

/// Kind of entity a `Reminder` is watching
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RelatedType {
    Grid,
    Project,
    Delivery,
}

impl RelatedType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Grid => "grid",
            Self::Project => "project",
            Self::Delivery => "delivery",
        }
    }

    /// Generic noun used in messages when the title of the entity is not known
    pub fn noun(&self) -> &'static str {
        match self {
            Self::Grid => "grilla",
            Self::Project => "proyecto",
            Self::Delivery => "entrega",
        }
    }

    pub fn noun_with_article(&self) -> &'static str {
        match self {
            Self::Grid => "la grilla",
            Self::Project => "el proyecto",
            Self::Delivery => "la entrega",
        }
    }
}

impl Display for RelatedType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Error, Debug, PartialEq)]
#[error("Related type: {0} is not one of grid, project or delivery")]
pub struct InvalidRelatedTypeError(pub String);

impl FromStr for RelatedType {
    type Err = InvalidRelatedTypeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "grid" => Ok(Self::Grid),
            "project" => Ok(Self::Project),
            "delivery" => Ok(Self::Delivery),
            _ => Err(InvalidRelatedTypeError(s.to_string())),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReminderStatus {
    Active,
    Escalated,
    Resolved,
}

impl ReminderStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Active => "active",
            Self::Escalated => "escalated",
            Self::Resolved => "resolved",
        }
    }
}

impl Display for ReminderStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Error, Debug, PartialEq)]
#[error("Reminder status: {0} is not valid")]
pub struct InvalidReminderStatusError(pub String);

impl FromStr for ReminderStatus {
    type Err = InvalidReminderStatusError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "active" => Ok(Self::Active),
            "escalated" => Ok(Self::Escalated),
            "resolved" => Ok(Self::Resolved),
            _ => Err(InvalidReminderStatusError(s.to_string())),
        }
    }
}

/// A `Reminder` tracks one client action that is still pending, e.g. a
/// delivery that is waiting for the approval of the client.
///
/// Every time a sweep finds the `Reminder` due it sends a notification to
/// `user_id` and pushes `next_send_at` one interval ahead. On the third
/// strike the `Reminder` is escalated to the admins and stops being active.
#[derive(Debug, Clone, PartialEq)]
pub struct Reminder {
    pub id: ID,
    /// The `User` that has to act
    pub user_id: ID,
    pub related_type: RelatedType,
    /// Identifier of the watched entity. Only used for lookups.
    pub related_id: String,
    /// Number of reminder notifications already sent
    pub reminder_count: i64,
    pub last_sent_at: Option<i64>,
    /// When the next sweep should act on this `Reminder`. Always set
    /// while the `Reminder` is active.
    pub next_send_at: Option<i64>,
    pub status: ReminderStatus,
    pub created: i64,
    pub updated: i64,
}

/// What a sweep does with a due `Reminder`
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ReminderStep {
    /// Send reminder number `count` to the user and reschedule
    Remind {
        count: i64,
        severity: NotificationSeverity,
    },
    /// Notify the admins and the user one last time and stop
    Escalate { count: i64 },
}

impl ReminderStep {
    pub fn count(&self) -> i64 {
        match self {
            Self::Remind { count, .. } => *count,
            Self::Escalate { count } => *count,
        }
    }

    pub fn is_escalation(&self) -> bool {
        matches!(self, Self::Escalate { .. })
    }
}

#[derive(Error, Debug, PartialEq)]
pub enum ReminderError {
    #[error("Reminder is {0} and can no longer change")]
    NotActive(ReminderStatus),
}

impl Reminder {
    /// Spacing between two reminders of the same entity
    pub const INTERVAL_MILLIS: i64 = 1000 * 60 * 60 * 24;
    /// The reminder number that escalates to the admins
    pub const ESCALATION_COUNT: i64 = 3;

    pub fn new(user_id: ID, related_type: RelatedType, related_id: String, now: i64) -> Self {
        Self {
            id: Default::default(),
            user_id,
            related_type,
            related_id,
            reminder_count: 0,
            last_sent_at: None,
            next_send_at: Some(now + Self::INTERVAL_MILLIS),
            status: ReminderStatus::Active,
            created: now,
            updated: now,
        }
    }

    pub fn is_active(&self) -> bool {
        self.status == ReminderStatus::Active
    }

    pub fn is_due(&self, now: i64) -> bool {
        match self.next_send_at {
            Some(next_send_at) => self.is_active() && next_send_at <= now,
            None => false,
        }
    }

    /// The step the next sweep will take, without changing anything
    pub fn next_step(&self) -> Result<ReminderStep, ReminderError> {
        if !self.is_active() {
            return Err(ReminderError::NotActive(self.status));
        }
        let count = self.reminder_count + 1;
        if count >= Self::ESCALATION_COUNT {
            return Ok(ReminderStep::Escalate { count });
        }
        let severity = if count == 1 {
            NotificationSeverity::Info
        } else {
            NotificationSeverity::Warning
        };
        Ok(ReminderStep::Remind { count, severity })
    }

    /// Applies the next step to this `Reminder` as if it was sent at `now`
    pub fn advance(&mut self, now: i64) -> Result<ReminderStep, ReminderError> {
        let step = self.next_step()?;
        self.reminder_count = step.count();
        self.last_sent_at = Some(now);
        self.updated = now;
        match step {
            ReminderStep::Remind { .. } => {
                self.next_send_at = Some(now + Self::INTERVAL_MILLIS);
            }
            ReminderStep::Escalate { .. } => {
                self.status = ReminderStatus::Escalated;
                self.next_send_at = None;
            }
        }
        Ok(step)
    }

    /// The client acted, so nothing more should be sent for this `Reminder`
    pub fn resolve(&mut self, now: i64) -> Result<(), ReminderError> {
        if !self.is_active() {
            return Err(ReminderError::NotActive(self.status));
        }
        self.status = ReminderStatus::Resolved;
        self.next_send_at = None;
        self.updated = now;
        Ok(())
    }
}

impl Entity for Reminder {
    fn id(&self) -> &ID {
        &self.id
    }
}
