//! # Slash Commands (/)
//!
//! Discord native slash command definitions and registration.
//!
//! - **Version**: 1.0.0
//! - **Since**: 1.0.0
//! - **Toggleable**: false

mod reminders;

use anyhow::Result;
use log::info;
use serenity::builder::CreateApplicationCommand;
use serenity::model::application::command::Command;
use serenity::model::id::GuildId;
use serenity::prelude::Context;

/// Creates all slash command definitions
pub fn create_slash_commands() -> Vec<CreateApplicationCommand> {
    reminders::create_commands()
}

/// Registers all slash commands globally
pub async fn register_global_commands(ctx: &Context) -> Result<()> {
    let slash_commands = create_slash_commands();
    let count = slash_commands.len();

    Command::set_global_application_commands(&ctx.http, |commands| {
        for command in slash_commands {
            commands.add_application_command(command);
        }
        commands
    })
    .await?;

    info!("Global slash commands registered successfully ({count} commands)");
    Ok(())
}

/// Registers all slash commands for a specific guild (faster for testing)
pub async fn register_guild_commands(ctx: &Context, guild_id: GuildId) -> Result<()> {
    let slash_commands = create_slash_commands();
    let count = slash_commands.len();

    guild_id
        .set_application_commands(&ctx.http, |commands| {
            for command in slash_commands {
                commands.add_application_command(command);
            }
            commands
        })
        .await?;

    info!("Guild slash commands registered for guild {guild_id} ({count} commands)");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::reminders::COMMANDS;

    fn names() -> Vec<String> {
        create_slash_commands()
            .iter()
            .map(|cmd| cmd.0.get("name").unwrap().as_str().unwrap().to_string())
            .collect()
    }

    #[test]
    fn test_create_slash_commands() {
        let command_names = names();
        assert_eq!(command_names.len(), COMMANDS.len());

        for expected in COMMANDS {
            assert!(
                command_names.iter().any(|name| name == expected),
                "Missing command: {expected}"
            );
        }
    }

    #[test]
    fn test_command_names_are_unique() {
        let mut command_names = names();
        command_names.sort();
        command_names.dedup();
        assert_eq!(command_names.len(), COMMANDS.len());
    }

    #[test]
    fn test_every_command_has_description() {
        for cmd in create_slash_commands() {
            let description = cmd.0.get("description").and_then(|d| d.as_str()).unwrap();
            assert!(!description.is_empty());
            assert!(description.len() <= 100);
        }
    }
}
