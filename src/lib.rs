// pc-emo Library - Public API

// Re-export error types
pub mod error;
pub use error::{EmoError, Result};

// Module declarations
pub mod commands;
pub mod core;
pub mod ui;

// Re-export commonly used types
pub use core::config::Config;

// Initialize logging
pub fn init_logging() {
    // stderr shares the terminal with the overlay, so stay quiet unless asked.
    env_logger::Builder::new()
        .filter_level(log::LevelFilter::Warn)
        .parse_default_env()
        .init();
}
