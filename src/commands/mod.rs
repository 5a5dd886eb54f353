// Command handlers module
pub mod config;
pub mod overlay;
pub mod sample;

// Re-exports for cleaner imports
pub use overlay::execute as overlay;
pub use sample::execute as sample;
