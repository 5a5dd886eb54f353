// Core engine module

pub mod animation;
pub mod config;
pub mod engine;
pub mod expression;
pub mod metrics;
pub mod render;

// Re-export commonly used items
pub use animation::{AnimationClock, AnimationState};
pub use config::Config;
pub use engine::Engine;
pub use expression::{classify, Expression, ExpressionPolicy};
pub use metrics::{MetricSample, MetricSampler, MetricsSource, SysinfoSource};
