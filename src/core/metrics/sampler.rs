use std::time::Instant;

use super::sample::{MetricSample, NetCounterSnapshot};
use super::source::{MetricsSource, NetCounters};
use crate::error::{EmoError, Result};

/// Smallest interval, in seconds, a rate is ever divided by.
pub const MIN_ELAPSED_SECS: f64 = 0.001;

const BYTES_PER_KB: f64 = 1024.0;

/// Turns successive OS readings into [`MetricSample`]s.
///
/// The sampler owns exactly one previous network snapshot, replaced wholesale
/// on every successful read. Read failures never propagate: the last good
/// sample is returned again and [`MetricSampler::is_stale`] reports it.
pub struct MetricSampler<S> {
    source: S,
    previous: Option<NetCounterSnapshot>,
    last: MetricSample,
    stale: bool,
}

impl<S: MetricsSource> MetricSampler<S> {
    pub fn new(source: S) -> Self {
        Self {
            source,
            previous: None,
            last: MetricSample::default(),
            stale: false,
        }
    }

    /// Take a sample now.
    pub fn sample(&mut self) -> MetricSample {
        self.sample_at(Instant::now())
    }

    /// Take a sample, stamping the network snapshot with `now`.
    ///
    /// Rates are computed against the measured interval since the previous
    /// snapshot, not the nominal tick period.
    pub fn sample_at(&mut self, now: Instant) -> MetricSample {
        match self.read(now) {
            Ok((sample, current)) => {
                self.previous = Some(current);
                self.last = sample;
                self.stale = false;
            }
            Err(e) => {
                if !self.stale {
                    log::warn!("Metric read failed, keeping previous sample: {}", e);
                }
                self.stale = true;
            }
        }

        self.last
    }

    /// Whether the most recent sample is a repeat of an older one.
    pub fn is_stale(&self) -> bool {
        self.stale
    }

    fn read(&mut self, now: Instant) -> Result<(MetricSample, NetCounterSnapshot)> {
        let cpu = finite(self.source.cpu_percent()?, "cpu")?;
        let mem = finite(self.source.memory_percent()?, "memory")?;
        let NetCounters {
            bytes_sent,
            bytes_recv,
        } = self.source.net_counters()?;

        let current = NetCounterSnapshot {
            bytes_sent,
            bytes_recv,
            taken_at: now,
        };
        // First sample compares against itself and yields zero rates.
        let previous = self.previous.unwrap_or(current);

        let (upload, download) = transfer_rate_kbs(&previous, &current);
        Ok((MetricSample::new(cpu, mem, upload, download), current))
    }
}

fn finite(value: f32, metric: &str) -> Result<f32> {
    if !value.is_finite() {
        return Err(EmoError::metric_read(format!("{} usage is not a finite number", metric)));
    }
    Ok(value)
}

/// Upload and download rates in KB/s between two snapshots.
///
/// A counter that went backwards counts as no traffic, and the elapsed time
/// is clamped to [`MIN_ELAPSED_SECS`].
pub fn transfer_rate_kbs(previous: &NetCounterSnapshot, current: &NetCounterSnapshot) -> (f32, f32) {
    let elapsed = current
        .taken_at
        .saturating_duration_since(previous.taken_at)
        .as_secs_f64()
        .max(MIN_ELAPSED_SECS);

    let rate = |before: u64, after: u64| {
        let delta = after.saturating_sub(before) as f64;
        (delta / BYTES_PER_KB / elapsed) as f32
    };

    (
        rate(previous.bytes_sent, current.bytes_sent),
        rate(previous.bytes_recv, current.bytes_recv),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::VecDeque;
    use std::time::Duration;

    /// Scripted readings, one entry per sample call.
    #[derive(Default)]
    struct ScriptedSource {
        readings: VecDeque<Option<(f32, f32, u64, u64)>>,
        current: Option<(f32, f32, u64, u64)>,
    }

    impl ScriptedSource {
        fn with(readings: Vec<Option<(f32, f32, u64, u64)>>) -> Self {
            Self {
                readings: readings.into(),
                current: None,
            }
        }

        fn reading(&mut self) -> Result<(f32, f32, u64, u64)> {
            self.current
                .ok_or_else(|| EmoError::metric_read("scripted failure"))
        }
    }

    impl MetricsSource for ScriptedSource {
        fn cpu_percent(&mut self) -> Result<f32> {
            self.current = self.readings.pop_front().flatten();
            self.reading().map(|r| r.0)
        }

        fn memory_percent(&mut self) -> Result<f32> {
            self.reading().map(|r| r.1)
        }

        fn net_counters(&mut self) -> Result<NetCounters> {
            self.reading().map(|r| NetCounters {
                bytes_sent: r.2,
                bytes_recv: r.3,
            })
        }
    }

    fn snapshot(bytes_sent: u64, bytes_recv: u64, taken_at: Instant) -> NetCounterSnapshot {
        NetCounterSnapshot {
            bytes_sent,
            bytes_recv,
            taken_at,
        }
    }

    #[test]
    fn test_rate_over_one_second() {
        let t0 = Instant::now();
        let previous = snapshot(1000, 0, t0);
        let current = snapshot(3048, 0, t0 + Duration::from_secs(1));

        let (upload, download) = transfer_rate_kbs(&previous, &current);
        assert_eq!(upload, 2.0);
        assert_eq!(download, 0.0);
    }

    #[test]
    fn test_rate_uses_measured_interval() {
        let t0 = Instant::now();
        let previous = snapshot(0, 0, t0);
        let current = snapshot(0, 4096, t0 + Duration::from_millis(2000));

        let (_, download) = transfer_rate_kbs(&previous, &current);
        assert_eq!(download, 2.0);
    }

    #[test]
    fn test_counter_rollback_is_zero() {
        let t0 = Instant::now();
        let previous = snapshot(5000, 9000, t0);
        let current = snapshot(100, 10, t0 + Duration::from_secs(1));

        assert_eq!(transfer_rate_kbs(&previous, &current), (0.0, 0.0));
    }

    #[test]
    fn test_zero_elapsed_is_finite() {
        let t0 = Instant::now();
        let previous = snapshot(0, 0, t0);
        let current = snapshot(1024, 1024, t0);

        let (upload, download) = transfer_rate_kbs(&previous, &current);
        assert!(upload.is_finite());
        assert!(download.is_finite());
        assert_eq!(upload, 1000.0);
    }

    #[test]
    fn test_first_sample_has_zero_rates() {
        let source = ScriptedSource::with(vec![Some((12.0, 34.0, 1_000_000, 2_000_000))]);
        let mut sampler = MetricSampler::new(source);

        let sample = sampler.sample_at(Instant::now());
        assert_eq!(sample.cpu_percent, 12.0);
        assert_eq!(sample.mem_percent, 34.0);
        assert_eq!(sample.upload_rate_kbs, 0.0);
        assert_eq!(sample.download_rate_kbs, 0.0);
        assert!(!sampler.is_stale());
    }

    #[test]
    fn test_successive_samples_compute_rates() {
        let source = ScriptedSource::with(vec![
            Some((10.0, 10.0, 1000, 0)),
            Some((10.0, 10.0, 3048, 10240)),
        ]);
        let mut sampler = MetricSampler::new(source);
        let t0 = Instant::now();

        sampler.sample_at(t0);
        let sample = sampler.sample_at(t0 + Duration::from_secs(1));
        assert_eq!(sample.upload_rate_kbs, 2.0);
        assert_eq!(sample.download_rate_kbs, 10.0);
    }

    #[test]
    fn test_failure_returns_previous_sample_and_marks_stale() {
        let source = ScriptedSource::with(vec![Some((40.0, 50.0, 0, 0)), None]);
        let mut sampler = MetricSampler::new(source);
        let t0 = Instant::now();

        let good = sampler.sample_at(t0);
        let stale = sampler.sample_at(t0 + Duration::from_secs(1));
        assert_eq!(good, stale);
        assert!(sampler.is_stale());
    }

    #[test]
    fn test_recovers_after_failure() {
        let source = ScriptedSource::with(vec![
            Some((40.0, 50.0, 0, 0)),
            None,
            Some((60.0, 70.0, 2048, 0)),
        ]);
        let mut sampler = MetricSampler::new(source);
        let t0 = Instant::now();

        sampler.sample_at(t0);
        sampler.sample_at(t0 + Duration::from_secs(1));
        let sample = sampler.sample_at(t0 + Duration::from_secs(2));

        assert!(!sampler.is_stale());
        assert_eq!(sample.cpu_percent, 60.0);
        // Failed read does not replace the previous snapshot.
        assert_eq!(sample.upload_rate_kbs, 1.0);
    }

    #[test]
    fn test_out_of_range_percentages_are_clamped() {
        let source = ScriptedSource::with(vec![Some((104.0, -1.0, 0, 0))]);
        let mut sampler = MetricSampler::new(source);

        let sample = sampler.sample_at(Instant::now());
        assert_eq!(sample.cpu_percent, 100.0);
        assert_eq!(sample.mem_percent, 0.0);
    }

    #[test]
    fn test_nan_reading_keeps_previous_sample() {
        let source = ScriptedSource::with(vec![
            Some((40.0, 50.0, 0, 0)),
            Some((40.0, f32::NAN, 0, 0)),
            Some((f32::NAN, 50.0, 0, 0)),
            Some((f32::INFINITY, 50.0, 0, 0)),
        ]);
        let mut sampler = MetricSampler::new(source);
        let t0 = Instant::now();

        let good = sampler.sample_at(t0);
        let after_nan_mem = sampler.sample_at(t0 + Duration::from_secs(1));
        assert!(sampler.is_stale());
        assert_eq!(after_nan_mem, good);
        assert_eq!(after_nan_mem.mem_percent, 50.0);

        let after_nan_cpu = sampler.sample_at(t0 + Duration::from_secs(2));
        assert!(sampler.is_stale());
        assert_eq!(after_nan_cpu, good);

        let after_infinite_cpu = sampler.sample_at(t0 + Duration::from_secs(3));
        assert!(sampler.is_stale());
        assert_eq!(after_infinite_cpu, good);
    }
}
