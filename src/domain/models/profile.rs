use serde::{Deserialize, Serialize};
use chrono::{DateTime, Utc};
use sqlx::FromRow;
use std::fmt;
use std::str::FromStr;

use crate::error::AppError;

/// Used both for the role a profile was registered with and for the view
/// mode it is currently browsing in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Maker,
    Goer,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Maker => "maker",
            Role::Goer => "goer",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "maker" => Ok(Role::Maker),
            "goer" => Ok(Role::Goer),
            other => Err(AppError::Validation(format!("Unknown role '{}'", other))),
        }
    }
}

#[derive(Debug, Clone, FromRow)]
pub struct ProfileRow {
    pub id: String,
    pub display_name: String,
    pub role: String,
    pub current_mode: String,
    pub bio: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Profile {
    pub id: String,
    pub display_name: String,
    pub role: Role,
    pub current_mode: Role,
    pub bio: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Profile {
    pub fn new(id: String, display_name: String, role: Role, bio: Option<String>) -> Self {
        let now = Utc::now();
        Self {
            id,
            display_name,
            role,
            current_mode: role,
            bio,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn is_maker(&self) -> bool {
        self.role == Role::Maker
    }

    pub fn is_goer(&self) -> bool {
        self.role == Role::Goer
    }

    /// Makers may browse as goers; goers have no maker view.
    pub fn can_use_mode(&self, mode: Role) -> bool {
        mode == Role::Goer || self.is_maker()
    }
}

impl TryFrom<ProfileRow> for Profile {
    type Error = AppError;

    fn try_from(row: ProfileRow) -> Result<Self, Self::Error> {
        let role = row.role.parse::<Role>()
            .map_err(|_| AppError::InvalidRecord(format!("profile {}: invalid role '{}'", row.id, row.role)))?;
        let current_mode = row.current_mode.parse::<Role>()
            .map_err(|_| AppError::InvalidRecord(format!("profile {}: invalid mode '{}'", row.id, row.current_mode)))?;

        Ok(Self {
            id: row.id,
            display_name: row.display_name,
            role,
            current_mode,
            bio: row.bio,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}
