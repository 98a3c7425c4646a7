//! User-facing texts for the reminder conversation
//!
//! Pure formatting only; delivery lives in `delivery`.

use chrono::NaiveDateTime;

use super::events::{ButtonAction, Choice};
use super::model::Reminder;
use crate::core::error::{ParseTarget, ReminderError};
use crate::core::response::truncate_label;

const NOT_SET: &str = "not set";

pub const WELCOME: &str = "Welcome to the Reminder Bot! Use /add_reminder to schedule a reminder, \
/view_reminders to view all your reminders, /view_expired to view expired reminders, \
/edit_reminders to edit a reminder, and /delete_reminder to delete a reminder. \
While entering a reminder, /cancel stops without saving.";

pub const ASK_NAME: &str = "Please send me the reminder name.";
pub const NO_REMINDERS: &str = "You don't have any reminders set.";
pub const NO_EXPIRED: &str = "You don't have any expired reminders.";
pub const NOTHING_TO_EDIT: &str = "You don't have any reminders to edit.";
pub const NOTHING_TO_DELETE: &str = "You don't have any reminders to delete.";
pub const SELECT_TO_EDIT: &str = "Please select a reminder to edit:";
pub const SELECT_TO_DELETE: &str = "Please select a reminder to delete:";
pub const NO_LONGER_AVAILABLE: &str = "That reminder is no longer available.";
pub const NOTHING_TO_CANCEL: &str = "There is nothing to cancel.";
pub const CREATE_CANCELLED: &str = "Cancelled. The unfinished reminder was discarded.";
pub const EDIT_CANCELLED: &str = "Editing cancelled. Your reminder was left unchanged.";
pub const UNKNOWN_BUTTON: &str = "Unknown button. Please open the menu again.";

pub fn format_date_time(at: NaiveDateTime) -> String {
    at.format("%Y-%m-%d %H:%M").to_string()
}

pub fn name_set(name: &str) -> String {
    format!("Reminder name set as: {name}. Now, please send me the reminder description.")
}

pub fn description_set(description: &str) -> String {
    format!(
        "Reminder description set as: {description}. Now, please send me the date (YYYY-MM-DD)."
    )
}

pub fn date_set(reminder_date: &chrono::NaiveDate) -> String {
    format!(
        "Reminder date set as: {}. Now, please send me the time (HH:MM).",
        reminder_date.format("%Y-%m-%d")
    )
}

pub fn scheduled(reminder: &Reminder, at: NaiveDateTime) -> String {
    format!(
        "Reminder '{}' set for {}. The reminder will be sent at this time.",
        reminder.name,
        format_date_time(at)
    )
}

pub fn rescheduled(reminder: &Reminder, at: NaiveDateTime) -> String {
    format!(
        "Reminder '{}' updated. It will now be sent at {}.",
        reminder.name,
        format_date_time(at)
    )
}

pub fn editing(reminder: &Reminder) -> String {
    format!(
        "Editing reminder: {}. Please send me the new reminder name or /cancel to cancel editing.",
        reminder.name
    )
}

pub fn deleted(reminder: &Reminder) -> String {
    format!("Reminder '{}' has been deleted.", reminder.name)
}

/// Message for a domain error the user can act on
pub fn error_message(err: &ReminderError) -> String {
    match err {
        ReminderError::Parse {
            target: ParseTarget::Name,
            ..
        } => "The name can't be empty. Please send the reminder name as text.".to_string(),
        ReminderError::Parse {
            target: ParseTarget::Description,
            ..
        } => "The description can't be empty. Please send the reminder description as text."
            .to_string(),
        ReminderError::Parse {
            target: ParseTarget::Date,
            ..
        } => "Invalid format. Please send the date in this format: YYYY-MM-DD.".to_string(),
        ReminderError::Parse {
            target: ParseTarget::Time,
            ..
        } => "Invalid format. Please send the time in this format: HH:MM.".to_string(),
        ReminderError::NotFound(_) => NO_LONGER_AVAILABLE.to_string(),
        ReminderError::Scheduling(reason) => format!(
            "Could not schedule the reminder ({reason}). Please send a later time (HH:MM) or /cancel."
        ),
        ReminderError::Config(_) => "Sorry, the bot is misconfigured.".to_string(),
    }
}

/// Full snapshot of a reminder whose time has come
pub fn due(reminder: &Reminder) -> String {
    format!(
        "Reminder: Your reminder '{}' is due now!\nDescription: {}\nScheduled Date: {}\nScheduled Time: {}",
        reminder.name,
        reminder.description.as_deref().unwrap_or(NOT_SET),
        reminder
            .date
            .map(|d| d.format("%Y-%m-%d").to_string())
            .unwrap_or_else(|| NOT_SET.to_string()),
        reminder
            .time
            .map(|t| t.format("%H:%M").to_string())
            .unwrap_or_else(|| NOT_SET.to_string()),
    )
}

fn scheduled_at(reminder: &Reminder) -> String {
    match (reminder.date, reminder.time) {
        (Some(date), Some(time)) => format_date_time(date.and_time(time)),
        (Some(date), None) => format!("{} {NOT_SET}", date.format("%Y-%m-%d")),
        _ => NOT_SET.to_string(),
    }
}

/// Numbered listing; slots are 1-based for display only
pub fn listing(title: &str, reminders: &[Reminder]) -> String {
    let mut response = format!("{title}\n");
    for (i, reminder) in reminders.iter().enumerate() {
        response.push_str(&format!(
            "\n{}. {} - {} (Scheduled at: {})",
            i + 1,
            reminder.name,
            reminder.description.as_deref().unwrap_or(NOT_SET),
            scheduled_at(reminder)
        ));
    }
    response
}

pub fn active_listing(reminders: &[Reminder]) -> String {
    if reminders.is_empty() {
        NO_REMINDERS.to_string()
    } else {
        listing("Your reminders:", reminders)
    }
}

pub fn expired_listing(reminders: &[Reminder]) -> String {
    if reminders.is_empty() {
        NO_EXPIRED.to_string()
    } else {
        listing("Your expired reminders:", reminders)
    }
}

/// One button per reminder, payload keyed by id
pub fn choices(reminders: &[Reminder], action: fn(&Reminder) -> ButtonAction) -> Vec<Choice> {
    reminders
        .iter()
        .enumerate()
        .map(|(i, reminder)| Choice {
            label: truncate_label(&format!("{}. {}", i + 1, reminder.name)),
            payload: action(reminder).payload(),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::reminders::model::ReminderField;
    use chrono::{NaiveDate, NaiveTime};

    fn complete(name: &str) -> Reminder {
        let mut reminder = Reminder::new(name);
        reminder.apply(ReminderField::Description("Bring card".to_string()));
        reminder.apply(ReminderField::Date(NaiveDate::from_ymd_opt(2025, 1, 1).unwrap()));
        reminder.apply(ReminderField::Time(NaiveTime::from_hms_opt(9, 0, 0).unwrap()));
        reminder
    }

    #[test]
    fn test_due_contains_every_field() {
        let text = due(&complete("Dentist"));
        assert!(text.contains("'Dentist' is due now!"));
        assert!(text.contains("Description: Bring card"));
        assert!(text.contains("Scheduled Date: 2025-01-01"));
        assert!(text.contains("Scheduled Time: 09:00"));
    }

    #[test]
    fn test_listing_numbers_from_one_and_marks_unset_fields() {
        let text = active_listing(&[complete("Dentist"), Reminder::new("Half done")]);
        assert!(text.starts_with("Your reminders:"));
        assert!(text.contains("1. Dentist - Bring card (Scheduled at: 2025-01-01 09:00)"));
        assert!(text.contains("2. Half done - not set (Scheduled at: not set)"));
    }

    #[test]
    fn test_empty_listings() {
        assert_eq!(active_listing(&[]), NO_REMINDERS);
        assert_eq!(expired_listing(&[]), NO_EXPIRED);
    }

    #[test]
    fn test_choices_use_stable_ids() {
        let reminders = vec![complete("A"), complete("B")];
        let menu = choices(&reminders, |r| ButtonAction::Delete(r.id));
        assert_eq!(menu.len(), 2);
        assert_eq!(menu[1].label, "2. B");
        assert_eq!(menu[1].payload, format!("delete_{}", reminders[1].id));
    }

    #[test]
    fn test_error_messages() {
        assert!(error_message(&ReminderError::invalid_date("x")).contains("YYYY-MM-DD"));
        assert!(error_message(&ReminderError::invalid_time("x")).contains("HH:MM"));
        assert!(error_message(&ReminderError::blank(ParseTarget::Name)).contains("name"));
        assert!(error_message(&ReminderError::blank(ParseTarget::Description))
            .contains("description"));
        assert_eq!(
            error_message(&ReminderError::NotFound("gone".to_string())),
            NO_LONGER_AVAILABLE
        );
        assert!(error_message(&ReminderError::Scheduling("past".to_string()))
            .starts_with("Could not schedule"));
    }
}
