//! # Reminders Feature
//!
//! Conversational reminder manager: a per-user conversation collects name,
//! description, date and time; a one-shot timer delivers the reminder and
//! moves it to the expired list.
//!
//! - **Version**: 1.0.0
//! - **Since**: 1.0.0
//! - **Toggleable**: false

pub mod conversation;
pub mod delivery;
pub mod events;
pub mod model;
pub mod notify;
pub mod registry;
pub mod scheduler;
pub mod service;
pub mod store;

pub use conversation::{Conversation, Step, Target};
pub use delivery::{DiscordNotifier, Notifier};
pub use events::{ButtonAction, Choice, InboundEvent, Outbound};
pub use model::{Reminder, ReminderField, ReminderId, UserId};
pub use registry::{ScheduleRegistry, ScheduleToken, ScheduledJob};
pub use scheduler::{CancelHandle, FireCallback, FireFuture, Scheduler, TokioScheduler};
pub use service::{ReminderService, COMMANDS};
pub use store::{ReminderStore, UserBook};
