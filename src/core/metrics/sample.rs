use std::time::Instant;

use serde::{Deserialize, Serialize};

/// Cumulative network byte counters captured at a moment in time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NetCounterSnapshot {
    pub bytes_sent: u64,
    pub bytes_recv: u64,
    pub taken_at: Instant,
}

/// One tick's worth of system load.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct MetricSample {
    /// Global cpu utilization, always in `[0, 100]`.
    pub cpu_percent: f32,
    /// Physical memory utilization, always in `[0, 100]`.
    pub mem_percent: f32,
    /// Upload throughput in KB/s, never negative.
    pub upload_rate_kbs: f32,
    /// Download throughput in KB/s, never negative.
    pub download_rate_kbs: f32,
}

impl MetricSample {
    /// Build a sample, clamping percentages into range and rates to `>= 0`.
    pub fn new(cpu_percent: f32, mem_percent: f32, upload_rate_kbs: f32, download_rate_kbs: f32) -> Self {
        Self {
            cpu_percent: clamp_percent(cpu_percent),
            mem_percent: clamp_percent(mem_percent),
            upload_rate_kbs: non_negative(upload_rate_kbs),
            download_rate_kbs: non_negative(download_rate_kbs),
        }
    }
}

/// Clamp a sensor percentage into `[0, 100]`. NaN maps to 0.
pub fn clamp_percent(value: f32) -> f32 {
    if value.is_nan() {
        return 0.0;
    }
    value.clamp(0.0, 100.0)
}

fn non_negative(value: f32) -> f32 {
    if value.is_finite() && value > 0.0 {
        value
    } else {
        0.0
    }
}
