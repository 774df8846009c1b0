//! Marquee Core - Configuration and input plumbing
//!
//! This crate provides the building blocks shared by every Marquee front end:
//! configuration management, tracing setup, the search input controller and
//! the debouncer that turns keystrokes into settled queries.

pub mod config;
pub mod debounce;
pub mod input;
pub mod tracing_setup;

// Re-export main types for convenient access
pub use config::{CatalogConfig, MarqueeConfig, SearchConfig};
pub use debounce::{Debounced, spawn_debouncer};
pub use input::SearchInput;

/// Core errors that can bubble up from any Marquee subsystem.
#[derive(Debug, thiserror::Error)]
pub enum MarqueeError {
    #[error("Configuration error: {reason}")]
    Configuration { reason: String },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Search session is closed")]
    SessionClosed,
}

impl MarqueeError {
    /// Returns a user-friendly error message suitable for display.
    pub fn user_message(&self) -> String {
        match self {
            MarqueeError::Configuration { reason } => format!("Invalid configuration: {reason}"),
            MarqueeError::Io(_) => "File system error occurred".to_string(),
            MarqueeError::SessionClosed => "Search session has ended".to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, MarqueeError>;
