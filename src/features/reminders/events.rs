//! Transport-neutral inbound events and outbound messages
//!
//! - **Version**: 1.0.0
//! - **Since**: 1.0.0

use super::model::{ReminderId, UserId};

/// Button payload prefix for choosing a reminder to edit
pub const EDIT_PREFIX: &str = "edit_";
/// Button payload prefix for choosing a reminder to delete
pub const DELETE_PREFIX: &str = "delete_";

/// Something the chat transport received from a user
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InboundEvent {
    Command { user: UserId, name: String },
    Text { user: UserId, body: String },
    ButtonPress { user: UserId, payload: String },
}

/// One selectable option rendered as a button
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Choice {
    pub label: String,
    pub payload: String,
}

/// Something the core wants the transport to send to a user
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outbound {
    SendText {
        user: UserId,
        body: String,
    },
    SendTextWithChoices {
        user: UserId,
        body: String,
        choices: Vec<Choice>,
    },
}

impl Outbound {
    pub fn text(user: UserId, body: impl Into<String>) -> Self {
        Outbound::SendText {
            user,
            body: body.into(),
        }
    }

    pub fn user(&self) -> UserId {
        match self {
            Outbound::SendText { user, .. } | Outbound::SendTextWithChoices { user, .. } => *user,
        }
    }

    pub fn body(&self) -> &str {
        match self {
            Outbound::SendText { body, .. } | Outbound::SendTextWithChoices { body, .. } => body,
        }
    }

    pub fn choices(&self) -> &[Choice] {
        match self {
            Outbound::SendText { .. } => &[],
            Outbound::SendTextWithChoices { choices, .. } => choices,
        }
    }
}

/// What a button asks for
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ButtonAction {
    Edit(ReminderId),
    Delete(ReminderId),
}

impl ButtonAction {
    pub fn payload(&self) -> String {
        match self {
            ButtonAction::Edit(id) => format!("{EDIT_PREFIX}{id}"),
            ButtonAction::Delete(id) => format!("{DELETE_PREFIX}{id}"),
        }
    }

    /// Decode a button payload; `None` for anything malformed
    pub fn parse(payload: &str) -> Option<Self> {
        if let Some(rest) = payload.strip_prefix(EDIT_PREFIX) {
            rest.parse().ok().map(ButtonAction::Edit)
        } else if let Some(rest) = payload.strip_prefix(DELETE_PREFIX) {
            rest.parse().ok().map(ButtonAction::Delete)
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_button_payload_format() {
        let id = ReminderId::new();
        assert_eq!(ButtonAction::Edit(id).payload(), format!("edit_{id}"));
        assert_eq!(ButtonAction::Delete(id).payload(), format!("delete_{id}"));
    }

    #[test]
    fn test_button_parse() {
        let id = ReminderId::new();
        assert_eq!(
            ButtonAction::parse(&format!("edit_{id}")),
            Some(ButtonAction::Edit(id))
        );
        assert_eq!(
            ButtonAction::parse(&format!("delete_{id}")),
            Some(ButtonAction::Delete(id))
        );
        assert_eq!(ButtonAction::parse("edit_0"), None);
        assert_eq!(ButtonAction::parse("persona_chef"), None);
    }

    #[test]
    fn test_outbound_accessors() {
        let plain = Outbound::text(1, "hi");
        assert_eq!(plain.user(), 1);
        assert_eq!(plain.body(), "hi");
        assert!(plain.choices().is_empty());

        let menu = Outbound::SendTextWithChoices {
            user: 2,
            body: "pick".to_string(),
            choices: vec![Choice {
                label: "1. A".to_string(),
                payload: "edit_x".to_string(),
            }],
        };
        assert_eq!(menu.choices().len(), 1);
    }
}
