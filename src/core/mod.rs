//! # Core Module
//!
//! Configuration, error taxonomy, and Discord message utilities.
//!
//! - **Version**: 1.0.0
//! - **Since**: 1.0.0
//! - **Toggleable**: false

pub mod config;
pub mod error;
pub mod response;

pub use config::Config;
pub use error::{ParseTarget, ReminderError, Result};
pub use response::{chunk_for_message, chunk_text, truncate_label, MAX_CHOICES, MESSAGE_LIMIT};
