use crate::shared::entity::{Entity, ID};
use serde::{Deserialize, Serialize};
use std::{fmt::Display, str::FromStr};
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UserRole {
    Admin,
    Designer,
    Client,
}

impl UserRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Admin => "admin",
            Self::Designer => "designer",
            Self::Client => "client",
        }
    }
}

impl Display for UserRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Error, Debug, PartialEq)]
#[error("User role: {0} is not valid")]
pub struct InvalidUserRoleError(pub String);

impl FromStr for UserRole {
    type Err = InvalidUserRoleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "admin" => Ok(Self::Admin),
            "designer" => Ok(Self::Designer),
            "client" => Ok(Self::Client),
            _ => Err(InvalidUserRoleError(s.to_string())),
        }
    }
}

/// The part of a platform `User` the reminder engine cares about
#[derive(Debug, Clone, PartialEq)]
pub struct User {
    pub id: ID,
    pub name: String,
    pub role: UserRole,
    pub active: bool,
}

impl User {
    pub fn new(name: String, role: UserRole) -> Self {
        Self {
            id: Default::default(),
            name,
            role,
            active: true,
        }
    }

    pub fn is_active_admin(&self) -> bool {
        self.active && self.role == UserRole::Admin
    }
}

impl Entity for User {
    fn id(&self) -> &ID {
        &self.id
    }
}
