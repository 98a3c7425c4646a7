//! Reminder slash commands: /start, /help, /add_reminder, /view_reminders,
//! /view_expired, /edit_reminders, /delete_reminder, /cancel

use serenity::builder::CreateApplicationCommand;

/// Name and description of every reminder command, in menu order
const DEFINITIONS: &[(&str, &str)] = &[
    ("start", "Show the welcome message"),
    ("help", "List the reminder commands"),
    ("add_reminder", "Create a new reminder step by step"),
    ("view_reminders", "List your active reminders"),
    ("view_expired", "List reminders that have already fired"),
    ("edit_reminders", "Pick an active reminder to edit"),
    ("delete_reminder", "Pick an active reminder to delete"),
    ("cancel", "Abandon the reminder you are creating or editing"),
];

/// Creates reminder commands
pub fn create_commands() -> Vec<CreateApplicationCommand> {
    DEFINITIONS
        .iter()
        .map(|(name, description)| create_command(name, description))
        .collect()
}

fn create_command(name: &str, description: &str) -> CreateApplicationCommand {
    CreateApplicationCommand::default()
        .name(name)
        .description(description)
        .dm_permission(true)
        .to_owned()
}
