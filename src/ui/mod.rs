// UI and formatting module

pub mod formatters;
pub mod overlay;

// Re-export commonly used items for cleaner imports
pub use formatters::{format_expression, format_sample_line};
