//! Button rendering and component interaction routing
//!
//! - **Version**: 1.0.0
//! - **Since**: 1.0.0

use anyhow::Result;
use log::{info, warn};
use serenity::builder::CreateComponents;
use serenity::model::application::component::ButtonStyle;
use serenity::model::application::interaction::message_component::MessageComponentInteraction;
use serenity::model::application::interaction::InteractionResponseType;
use serenity::prelude::Context;

use crate::commands::reply::with_dm_hint;
use crate::core::response::{chunk_for_message, BUTTONS_PER_ROW, MAX_ROWS};
use crate::features::reminders::events::{DELETE_PREFIX, EDIT_PREFIX};
use crate::features::reminders::{Choice, InboundEvent, ReminderService};

/// Lay out choices as button rows (5 per row, at most 5 rows)
pub fn build_choice_components(choices: &[Choice]) -> CreateComponents {
    let mut components = CreateComponents::default();

    for row_choices in choices.chunks(BUTTONS_PER_ROW).take(MAX_ROWS) {
        components.create_action_row(|row| {
            for choice in row_choices {
                let style = if choice.payload.starts_with(DELETE_PREFIX) {
                    ButtonStyle::Danger
                } else {
                    ButtonStyle::Secondary
                };
                row.create_button(|button| {
                    button
                        .custom_id(&choice.payload)
                        .label(&choice.label)
                        .style(style)
                });
            }
            row
        });
    }

    components
}

/// Whether a component custom id belongs to the reminder menus
pub fn is_reminder_button(custom_id: &str) -> bool {
    custom_id.starts_with(EDIT_PREFIX) || custom_id.starts_with(DELETE_PREFIX)
}

/// Handler for all message component interactions
#[derive(Clone)]
pub struct MessageComponentHandler {
    service: ReminderService,
}

impl MessageComponentHandler {
    pub fn new(service: ReminderService) -> Self {
        Self { service }
    }

    /// Route a button press to the reminder service and update the menu message
    pub async fn handle_component_interaction(
        &self,
        ctx: &Context,
        interaction: &MessageComponentInteraction,
    ) -> Result<()> {
        let custom_id = &interaction.data.custom_id;
        let user_id = interaction.user.id.0;

        info!("Processing component interaction: {custom_id} from user: {user_id}");

        if !is_reminder_button(custom_id) {
            warn!("Unknown component interaction: {custom_id}");
            interaction
                .create_interaction_response(&ctx.http, |response| {
                    response
                        .kind(InteractionResponseType::ChannelMessageWithSource)
                        .interaction_response_data(|message| {
                            message.content("Unknown component interaction.")
                        })
                })
                .await?;
            return Ok(());
        }

        let event = InboundEvent::ButtonPress {
            user: user_id,
            payload: custom_id.clone(),
        };
        let Some(reply) = self.service.handle_event(event) else {
            return Ok(());
        };
        let conversing = self.service.store().conversation(user_id).is_some();
        let body = with_dm_hint(reply.body(), interaction.guild_id.is_some(), conversing);

        let mut chunks = chunk_for_message(&body).into_iter();
        let first = chunks.next().unwrap_or_default();

        // Replace the menu so its buttons can't be pressed twice
        interaction
            .create_interaction_response(&ctx.http, |response| {
                response
                    .kind(InteractionResponseType::UpdateMessage)
                    .interaction_response_data(|message| {
                        message.content(first).components(|c| c)
                    })
            })
            .await?;

        for chunk in chunks {
            interaction
                .create_followup_message(&ctx.http, |m| m.content(chunk))
                .await?;
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn choice(i: usize, prefix: &str) -> Choice {
        Choice {
            label: format!("{}. Reminder", i + 1),
            payload: format!("{prefix}{i}"),
        }
    }

    #[test]
    fn test_choices_split_into_rows_of_five() {
        let choices: Vec<Choice> = (0..7).map(|i| choice(i, EDIT_PREFIX)).collect();
        let components = build_choice_components(&choices);
        assert_eq!(components.0.len(), 2);
    }

    #[test]
    fn test_choices_capped_at_five_rows() {
        let choices: Vec<Choice> = (0..40).map(|i| choice(i, DELETE_PREFIX)).collect();
        let components = build_choice_components(&choices);
        assert_eq!(components.0.len(), MAX_ROWS);
    }

    #[test]
    fn test_no_choices_no_rows() {
        assert!(build_choice_components(&[]).0.is_empty());
    }

    #[test]
    fn test_is_reminder_button() {
        assert!(is_reminder_button("edit_abc"));
        assert!(is_reminder_button("delete_abc"));
        assert!(!is_reminder_button("help_menu"));
    }
}
