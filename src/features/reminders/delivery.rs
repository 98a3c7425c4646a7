//! Outbound delivery for messages that are not replies
//!
//! Firing notifications arrive long after the conversation that created
//! them, so they go through a [`Notifier`] rather than an interaction reply.
//!
//! - **Version**: 1.0.0
//! - **Since**: 1.0.0

use anyhow::Result;
use async_trait::async_trait;
use log::debug;
use serenity::http::Http;
use serenity::model::id::UserId as DiscordUserId;
use std::sync::Arc;

use super::events::Outbound;
use crate::core::response::chunk_for_message;
use crate::message_components::build_choice_components;

/// Hands an outbound message to the chat transport
#[async_trait]
pub trait Notifier: Send + Sync {
    async fn deliver(&self, message: Outbound) -> Result<()>;
}

/// Delivers messages as Discord direct messages
#[derive(Clone)]
pub struct DiscordNotifier {
    http: Arc<Http>,
}

impl DiscordNotifier {
    pub fn new(http: Arc<Http>) -> Self {
        Self { http }
    }
}

#[async_trait]
impl Notifier for DiscordNotifier {
    async fn deliver(&self, message: Outbound) -> Result<()> {
        let user = message.user();
        let http: &Http = &self.http;
        let dm = DiscordUserId(user).create_dm_channel(http).await?;

        let chunks = chunk_for_message(message.body());
        let last = chunks.len().saturating_sub(1);
        for (i, chunk) in chunks.iter().enumerate() {
            let components = if i == last && !message.choices().is_empty() {
                Some(build_choice_components(message.choices()))
            } else {
                None
            };
            dm.send_message(http, |m| {
                m.content(chunk);
                if let Some(components) = components {
                    m.set_components(components);
                }
                m
            })
            .await?;
        }

        debug!("Delivered {} message chunk(s) to user {user}", chunks.len());
        Ok(())
    }
}


#[cfg(test)]
mod tests {
    use super::testing::RecordingNotifier;
    use super::*;

    // Notifier must stay object-safe for Arc<dyn Notifier>
    fn _assert_object_safe(_: &dyn Notifier) {}

    #[tokio::test]
    async fn test_recording_notifier_keeps_order() {
        let notifier = RecordingNotifier::default();
        notifier.deliver(Outbound::text(1, "first")).await.unwrap();
        notifier.deliver(Outbound::text(2, "second")).await.unwrap();

        let sent = notifier.sent();
        assert_eq!(sent.len(), 2);
        assert_eq!(sent[0].body(), "first");
        assert_eq!(sent[1].user(), 2);
    }
}
