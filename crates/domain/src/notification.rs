use crate::shared::entity::{Entity, ID};
use serde::{Deserialize, Serialize};
use std::{fmt::Display, str::FromStr};
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NotificationSeverity {
    Info,
    Warning,
    Error,
}

impl NotificationSeverity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Info => "info",
            Self::Warning => "warning",
            Self::Error => "error",
        }
    }
}

impl Display for NotificationSeverity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Error, Debug, PartialEq)]
#[error("Notification severity: {0} is not valid")]
pub struct InvalidSeverityError(pub String);

impl FromStr for NotificationSeverity {
    type Err = InvalidSeverityError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "info" => Ok(Self::Info),
            "warning" => Ok(Self::Warning),
            "error" => Ok(Self::Error),
            _ => Err(InvalidSeverityError(s.to_string())),
        }
    }
}

/// An in-app message for a `User`
#[derive(Debug, Clone, PartialEq)]
pub struct Notification {
    pub id: ID,
    pub user_id: ID,
    pub title: String,
    pub message: String,
    pub severity: NotificationSeverity,
    pub read: bool,
    pub created: i64,
}

impl Notification {
    pub fn new(
        user_id: ID,
        title: String,
        message: String,
        severity: NotificationSeverity,
        now: i64,
    ) -> Self {
        Self {
            id: Default::default(),
            user_id,
            title,
            message,
            severity,
            read: false,
            created: now,
        }
    }
}

impl Entity for Notification {
    fn id(&self) -> &ID {
        &self.id
    }
}
