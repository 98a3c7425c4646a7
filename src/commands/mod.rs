//! # Command System
//!
//! Slash command (/) dispatch plus routing of direct-message text into the
//! reminder conversation.
//!
//! - **Version**: 1.0.0
//! - **Since**: 1.0.0
//! - **Toggleable**: false

pub mod reply;
pub mod slash;

use anyhow::Result;
use log::{debug, info, warn};
use serenity::model::application::interaction::application_command::ApplicationCommandInteraction;
use serenity::model::application::interaction::InteractionResponseType;
use serenity::model::channel::Message;
use serenity::prelude::Context;
use uuid::Uuid;

use crate::features::reminders::{InboundEvent, ReminderService, COMMANDS};

pub use reply::with_dm_hint;
pub use slash::{create_slash_commands, register_global_commands, register_guild_commands};

/// Entry point for slash commands and text messages
#[derive(Clone)]
pub struct CommandHandler {
    reminders: ReminderService,
    start_time: std::time::Instant,
}

impl CommandHandler {
    pub fn new(reminders: ReminderService) -> Self {
        Self {
            reminders,
            start_time: std::time::Instant::now(),
        }
    }

    /// Turn a text message into an inbound event
    ///
    /// Typed `/commands` (with or without `@BotName`) become commands so they
    /// behave like their slash counterparts; everything else is free text.
    pub fn classify_message(user: u64, content: &str) -> InboundEvent {
        match ReminderService::parse_text_command(content) {
            Some(name) => InboundEvent::Command {
                user,
                name: name.to_string(),
            },
            None => InboundEvent::Text {
                user,
                body: content.to_string(),
            },
        }
    }

    /// Handle a text message; only direct messages reach the conversation
    pub async fn handle_message(&self, ctx: &Context, msg: &Message) -> Result<()> {
        if msg.author.bot {
            return Ok(());
        }
        if let Some(guild_id) = msg.guild_id {
            debug!("Ignoring guild {guild_id} message from user {}", msg.author.id);
            return Ok(());
        }

        let request_id = Uuid::new_v4();
        let user_id = msg.author.id.0;

        debug!(
            "[{request_id}] DM received | User: {user_id} | Channel: {}",
            msg.channel_id
        );

        let event = Self::classify_message(user_id, msg.content.trim());
        let Some(reply) = self.reminders.handle_event(event) else {
            debug!("[{request_id}] No conversation in progress, ignoring message");
            return Ok(());
        };

        reply::send_to_channel(ctx, msg.channel_id, reply.body(), reply.choices()).await?;

        info!("[{request_id}] Reply sent to user {user_id}");
        Ok(())
    }

    pub async fn handle_slash_command(
        &self,
        ctx: &Context,
        command: &ApplicationCommandInteraction,
    ) -> Result<()> {
        let request_id = Uuid::new_v4();
        let user_id = command.user.id.0;
        let name = command.data.name.as_str();
        let guild_id = command
            .guild_id
            .map(|id| id.to_string())
            .unwrap_or_else(|| "DM".to_string());

        info!(
            "[{request_id}] Slash command received | Command: {name} | User: {user_id} | Channel: {} | Guild: {guild_id}",
            command.channel_id
        );

        if !COMMANDS.contains(&name) {
            warn!("[{request_id}] Unknown slash command: {name}");
            command
                .create_interaction_response(&ctx.http, |response| {
                    response
                        .kind(InteractionResponseType::ChannelMessageWithSource)
                        .interaction_response_data(|message| {
                            message.content("Unknown command.").ephemeral(true)
                        })
                })
                .await?;
            return Ok(());
        }

        let event = InboundEvent::Command {
            user: user_id,
            name: name.to_string(),
        };
        if let Some(reply) = self.reminders.handle_event(event) {
            let conversing = self.reminders.store().conversation(user_id).is_some();
            let body = with_dm_hint(reply.body(), command.guild_id.is_some(), conversing);
            reply::respond_to_command(ctx, command, &body, reply.choices()).await?;
        }

        debug!(
            "[{request_id}] Handled /{name} (uptime {}s)",
            self.start_time.elapsed().as_secs()
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify_typed_command() {
        assert_eq!(
            CommandHandler::classify_message(7, "/cancel"),
            InboundEvent::Command {
                user: 7,
                name: "cancel".to_string()
            }
        );
        assert_eq!(
            CommandHandler::classify_message(7, "/add_reminder@ReminderBot"),
            InboundEvent::Command {
                user: 7,
                name: "add_reminder".to_string()
            }
        );
    }

    #[test]
    fn test_classify_free_text() {
        assert_eq!(
            CommandHandler::classify_message(7, "Dentist"),
            InboundEvent::Text {
                user: 7,
                body: "Dentist".to_string()
            }
        );
    }

    #[test]
    fn test_unknown_slash_word_is_text() {
        assert!(matches!(
            CommandHandler::classify_message(7, "/unknown"),
            InboundEvent::Text { .. }
        ));
    }

    #[test]
    fn test_every_slash_command_reaches_the_service() {
        let names: Vec<String> = create_slash_commands()
            .iter()
            .map(|cmd| cmd.0.get("name").unwrap().as_str().unwrap().to_string())
            .collect();
        for name in &names {
            assert!(COMMANDS.contains(&name.as_str()), "Unrouted command: /{name}");
        }
    }
}
