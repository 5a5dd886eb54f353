//! OS metrics capability.
//!
//! [`MetricsSource`] is the seam between the sampler and the operating system.
//! The default implementation is backed by `sysinfo`.

use sysinfo::{CpuRefreshKind, MemoryRefreshKind, Networks, RefreshKind, System};

use crate::error::{EmoError, Result};

/// Cumulative byte counters summed across all network interfaces.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct NetCounters {
    pub bytes_sent: u64,
    pub bytes_recv: u64,
}

/// Trait for providers of raw system load readings.
///
/// All reads are synchronous and expected to be cheap. Any of them may fail;
/// the sampler treats a failure as "keep the previous value".
pub trait MetricsSource {
    /// Global cpu utilization in percent.
    fn cpu_percent(&mut self) -> Result<f32>;

    /// Physical memory utilization in percent.
    fn memory_percent(&mut self) -> Result<f32>;

    /// Cumulative network counters since boot.
    fn net_counters(&mut self) -> Result<NetCounters>;
}

/// Reads load from the host through `sysinfo`.
pub struct SysinfoSource {
    system: System,
    networks: Networks,
}

impl SysinfoSource {
    pub fn new() -> Self {
        let refresh_kind = RefreshKind::nothing()
            .with_cpu(CpuRefreshKind::nothing().with_cpu_usage())
            .with_memory(MemoryRefreshKind::nothing().with_ram());

        Self {
            system: System::new_with_specifics(refresh_kind),
            networks: Networks::new_with_refreshed_list(),
        }
    }
}

impl Default for SysinfoSource {
    fn default() -> Self {
        Self::new()
    }
}

impl MetricsSource for SysinfoSource {
    fn cpu_percent(&mut self) -> Result<f32> {
        // Usage is computed against the previous refresh, so the very first
        // reading after construction is 0.
        self.system.refresh_cpu_usage();
        Ok(self.system.global_cpu_usage())
    }

    fn memory_percent(&mut self) -> Result<f32> {
        self.system.refresh_memory();
        let total = self.system.total_memory();
        if total == 0 {
            return Err(EmoError::metric_read("total memory reported as zero"));
        }

        Ok((self.system.used_memory() as f64 / total as f64 * 100.0) as f32)
    }

    fn net_counters(&mut self) -> Result<NetCounters> {
        self.networks.refresh(true);

        let counters = self
            .networks
            .values()
            .fold(NetCounters::default(), |acc, data| NetCounters {
                bytes_sent: acc.bytes_sent.saturating_add(data.total_transmitted()),
                bytes_recv: acc.bytes_recv.saturating_add(data.total_received()),
            });

        Ok(counters)
    }
}
