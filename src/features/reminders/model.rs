//! Reminder data model
//!
//! - **Version**: 1.0.0
//! - **Since**: 1.0.0

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

/// Chat platform user identity
pub type UserId = u64;

/// Stable identity of a reminder, assigned when it is created
///
/// Positions shift on delete; ids never do. Button payloads and the
/// scheduling registry key off this, never a list slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ReminderId(Uuid);

impl ReminderId {
    pub fn new() -> Self {
        ReminderId(Uuid::new_v4())
    }
}

impl Default for ReminderId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for ReminderId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.simple())
    }
}

impl FromStr for ReminderId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Uuid::parse_str(s).map(ReminderId)
    }
}

/// A single collected value for one reminder field
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReminderField {
    Name(String),
    Description(String),
    Date(NaiveDate),
    Time(NaiveTime),
}

/// A user-created reminder
///
/// Built field by field during a conversation; only `name` is guaranteed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reminder {
    pub id: ReminderId,
    pub name: String,
    pub description: Option<String>,
    pub date: Option<NaiveDate>,
    pub time: Option<NaiveTime>,
}

impl Reminder {
    /// Create a partial reminder from its name
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: ReminderId::new(),
            name: name.into(),
            description: None,
            date: None,
            time: None,
        }
    }

    /// Overwrite one field in place
    pub fn apply(&mut self, field: ReminderField) {
        match field {
            ReminderField::Name(name) => self.name = name,
            ReminderField::Description(description) => self.description = Some(description),
            ReminderField::Date(date) => self.date = Some(date),
            ReminderField::Time(time) => self.time = Some(time),
        }
    }

    /// Instant the reminder fires at, once both date and time are known
    pub fn fire_at(&self) -> Option<NaiveDateTime> {
        match (self.date, self.time) {
            (Some(date), Some(time)) => Some(date.and_time(time)),
            _ => None,
        }
    }
}
