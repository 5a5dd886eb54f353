//! System load sampling.
//!
//! This module turns raw, cumulative OS counters into [`MetricSample`]s:
//! clamped cpu/memory percentages and network throughput computed from
//! successive [`NetCounterSnapshot`]s.

mod sample;
mod sampler;
mod source;

pub use sample::{clamp_percent, MetricSample, NetCounterSnapshot};
pub use sampler::{transfer_rate_kbs, MetricSampler, MIN_ELAPSED_SECS};
pub use source::{MetricsSource, NetCounters, SysinfoSource};
