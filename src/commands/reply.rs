//! Rendering service replies onto Discord surfaces
//!
//! - **Version**: 1.0.0
//! - **Since**: 1.0.0

use anyhow::Result;
use serenity::model::application::interaction::application_command::ApplicationCommandInteraction;
use serenity::model::application::interaction::InteractionResponseType;
use serenity::model::id::ChannelId;
use serenity::prelude::Context;

use crate::core::response::chunk_for_message;
use crate::features::reminders::Choice;
use crate::message_components::build_choice_components;

/// Appended when a conversation starts from a guild; answers are only read in DMs
pub const CONTINUE_IN_DM: &str = "Send your answers to me in a direct message.";

/// Add the DM hint to a reply when the conversation continues outside the guild
pub fn with_dm_hint(body: &str, in_guild: bool, conversing: bool) -> String {
    if in_guild && conversing {
        format!("{body}\n{CONTINUE_IN_DM}")
    } else {
        body.to_string()
    }
}

/// Answer a slash command; ephemeral inside guilds
///
/// Long bodies continue in follow-up messages; buttons ride on the last one.
pub async fn respond_to_command(
    ctx: &Context,
    command: &ApplicationCommandInteraction,
    body: &str,
    choices: &[Choice],
) -> Result<()> {
    let private = command.guild_id.is_some();
    let chunks = chunk_for_message(body);
    let last = chunks.len().saturating_sub(1);

    for (i, chunk) in chunks.into_iter().enumerate() {
        let components =
            (i == last && !choices.is_empty()).then(|| build_choice_components(choices));

        if i == 0 {
            command
                .create_interaction_response(&ctx.http, |response| {
                    response
                        .kind(InteractionResponseType::ChannelMessageWithSource)
                        .interaction_response_data(|message| {
                            message.content(chunk).ephemeral(private);
                            if let Some(components) = components {
                                message.set_components(components);
                            }
                            message
                        })
                })
                .await?;
        } else {
            command
                .create_followup_message(&ctx.http, |message| {
                    message.content(chunk).ephemeral(private);
                    if let Some(components) = components {
                        message.set_components(components);
                    }
                    message
                })
                .await?;
        }
    }

    Ok(())
}

/// Post a reply into a channel, chunked, with buttons on the last chunk
pub async fn send_to_channel(
    ctx: &Context,
    channel_id: ChannelId,
    body: &str,
    choices: &[Choice],
) -> Result<()> {
    let chunks = chunk_for_message(body);
    let last = chunks.len().saturating_sub(1);

    for (i, chunk) in chunks.into_iter().enumerate() {
        let components =
            (i == last && !choices.is_empty()).then(|| build_choice_components(choices));

        channel_id
            .send_message(&ctx.http, |m| {
                m.content(chunk);
                if let Some(components) = components {
                    m.set_components(components);
                }
                m
            })
            .await?;
    }

    Ok(())
}
