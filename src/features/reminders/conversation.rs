//! Per-user conversation cursor for collecting reminder fields
//!
//! A conversation is either creating a new reminder or editing an existing
//! one through a draft copy. Idle is the absence of a conversation.
//! Interpreting input is pure; the store applies the resulting field.
//!
//! - **Version**: 1.0.0
//! - **Since**: 1.0.0

use chrono::{NaiveDate, NaiveTime};

use super::model::{Reminder, ReminderField, ReminderId};
use crate::core::error::{ParseTarget, ReminderError, Result};

/// Accepted date input format
pub const DATE_FORMAT: &str = "%Y-%m-%d";
/// Accepted time input format (24h)
pub const TIME_FORMAT: &str = "%H:%M";

/// Which field the next text message fills in
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    AwaitingName,
    AwaitingDescription,
    AwaitingDate,
    AwaitingTime,
}

impl Step {
    /// Step after this one; `None` once the time has been collected
    pub fn next(self) -> Option<Step> {
        match self {
            Step::AwaitingName => Some(Step::AwaitingDescription),
            Step::AwaitingDescription => Some(Step::AwaitingDate),
            Step::AwaitingDate => Some(Step::AwaitingTime),
            Step::AwaitingTime => None,
        }
    }
}

/// What the collected fields are written to
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Target {
    /// New reminder; the id exists once the name has been received
    Create(Option<ReminderId>),
    /// Draft copy of an existing reminder, committed when the time arrives
    Edit(Reminder),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Conversation {
    pub step: Step,
    pub target: Target,
}

impl Conversation {
    /// Start collecting a brand new reminder
    pub fn create() -> Self {
        Self {
            step: Step::AwaitingName,
            target: Target::Create(None),
        }
    }

    /// Start re-collecting every field of an existing reminder
    pub fn edit(existing: &Reminder) -> Self {
        Self {
            step: Step::AwaitingName,
            target: Target::Edit(existing.clone()),
        }
    }

    pub fn is_editing(&self) -> bool {
        matches!(self.target, Target::Edit(_))
    }

    /// Id of the stored reminder this conversation writes to, if any yet
    pub fn target_id(&self) -> Option<ReminderId> {
        match &self.target {
            Target::Create(id) => *id,
            Target::Edit(draft) => Some(draft.id),
        }
    }

    /// Interpret a text message for the current step
    ///
    /// Never mutates anything: a parse failure leaves the conversation
    /// exactly where it was. Blank text (attachment-only messages) is
    /// rejected for every step.
    pub fn interpret(&self, text: &str) -> Result<ReminderField> {
        let text = text.trim();
        match self.step {
            Step::AwaitingName => non_blank(text, ParseTarget::Name).map(ReminderField::Name),
            Step::AwaitingDescription => {
                non_blank(text, ParseTarget::Description).map(ReminderField::Description)
            }
            Step::AwaitingDate => parse_date(text).map(ReminderField::Date),
            Step::AwaitingTime => parse_time(text).map(ReminderField::Time),
        }
    }

    /// Move to the next step, or `None` when the conversation is finished
    pub fn advance(self) -> Option<Conversation> {
        let Conversation { step, target } = self;
        step.next().map(|step| Conversation { step, target })
    }
}

fn non_blank(text: &str, target: ParseTarget) -> Result<String> {
    if text.is_empty() {
        Err(ReminderError::blank(target))
    } else {
        Ok(text.to_string())
    }
}

/// Parse a `YYYY-MM-DD` calendar date
pub fn parse_date(text: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(text.trim(), DATE_FORMAT)
        .map_err(|_| ReminderError::invalid_date(text))
}

/// Parse an `HH:MM` clock time
pub fn parse_time(text: &str) -> Result<NaiveTime> {
    NaiveTime::parse_from_str(text.trim(), TIME_FORMAT)
        .map_err(|_| ReminderError::invalid_time(text))
}
