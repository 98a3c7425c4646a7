// Core layer - configuration, errors, message utilities
pub mod core;

// Features layer - reminder domain
pub mod features;

// UI components - buttons and component interactions
pub mod message_components;

// Application layer - slash commands and text routing
pub mod commands;

pub use core::{Config, ReminderError};

pub use features::reminders::{
    DiscordNotifier, InboundEvent, Notifier, Outbound, Reminder, ReminderId, ReminderService,
    ReminderStore, Scheduler, TokioScheduler,
};
