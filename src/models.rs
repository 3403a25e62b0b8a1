use chrono::NaiveDateTime;
use serde::Serialize;
use std::fmt;

use crate::error::AppError;

pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Whether a student is currently on site.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum PresenceStatus {
    CheckedIn,
    #[default]
    CheckedOut,
}

impl PresenceStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            PresenceStatus::CheckedIn => "checked_in",
            PresenceStatus::CheckedOut => "checked_out",
        }
    }

    /// Strict parse for values supplied by callers.
    pub fn parse(s: &str) -> Result<Self, AppError> {
        match s {
            "checked_in" => Ok(PresenceStatus::CheckedIn),
            "checked_out" => Ok(PresenceStatus::CheckedOut),
            _ => Err(AppError::Validation(format!(
                "Invalid status: {} (expected checked_in or checked_out)",
                s
            ))),
        }
    }

    /// Lenient parse for persisted values: anything other than exactly
    /// `checked_in` counts as checked out.
    pub fn from_db(s: &str) -> Self {
        if s == "checked_in" {
            PresenceStatus::CheckedIn
        } else {
            PresenceStatus::CheckedOut
        }
    }

    pub fn toggled(self) -> Self {
        match self {
            PresenceStatus::CheckedIn => PresenceStatus::CheckedOut,
            PresenceStatus::CheckedOut => PresenceStatus::CheckedIn,
        }
    }

    /// Human readable form, e.g. "Checked In".
    pub fn display_label(&self) -> &'static str {
        match self {
            PresenceStatus::CheckedIn => "Checked In",
            PresenceStatus::CheckedOut => "Checked Out",
        }
    }
}

impl fmt::Display for PresenceStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct Student {
    pub id: i64,
    pub qr_id: String,
    pub name: String,
    pub photo: String,
    pub status: PresenceStatus,
    pub timestamp: Option<String>,
}

#[derive(sqlx::FromRow, Clone, Default)]
pub struct DbStudent {
    pub id: Option<i64>,
    pub qr_id: Option<String>,
    pub name: Option<String>,
    pub photo: Option<String>,
    pub status: Option<String>,
    pub timestamp: Option<String>,
}

impl From<DbStudent> for Student {
    fn from(db: DbStudent) -> Self {
        Self {
            id: db.id.unwrap_or_default(),
            qr_id: db.qr_id.unwrap_or_default(),
            name: db.name.unwrap_or_default(),
            photo: db.photo.unwrap_or_default(),
            status: db
                .status
                .as_deref()
                .map(PresenceStatus::from_db)
                .unwrap_or_default(),
            timestamp: db.timestamp,
        }
    }
}

pub fn format_timestamp(at: NaiveDateTime) -> String {
    at.format(TIMESTAMP_FORMAT).to_string()
}
