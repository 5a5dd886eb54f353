use pc_emo::core::config::Config;
use pc_emo::core::engine::Engine;
use pc_emo::core::expression::{Expression, ExpressionPolicy};
use pc_emo::core::metrics::{MetricsSource, NetCounters};
use pc_emo::core::render::{Primitive, ViewMode};
use pc_emo::{EmoError, Result};
use std::cell::Cell;
use std::rc::Rc;
use std::time::{Duration, Instant};

/// Counts reads and reports whatever load the test sets.
#[derive(Clone)]
struct SharedSource {
    cpu: Rc<Cell<f32>>,
    mem: Rc<Cell<f32>>,
    sent: Rc<Cell<u64>>,
    reads: Rc<Cell<u32>>,
    failing: Rc<Cell<bool>>,
}

impl SharedSource {
    fn new() -> Self {
        Self {
            cpu: Rc::new(Cell::new(0.0)),
            mem: Rc::new(Cell::new(0.0)),
            sent: Rc::new(Cell::new(0)),
            reads: Rc::new(Cell::new(0)),
            failing: Rc::new(Cell::new(false)),
        }
    }
}

impl MetricsSource for SharedSource {
    fn cpu_percent(&mut self) -> Result<f32> {
        self.reads.set(self.reads.get() + 1);
        if self.failing.get() {
            return Err(EmoError::metric_read("sensor offline"));
        }
        Ok(self.cpu.get())
    }

    fn memory_percent(&mut self) -> Result<f32> {
        Ok(self.mem.get())
    }

    fn net_counters(&mut self) -> Result<NetCounters> {
        Ok(NetCounters {
            bytes_sent: self.sent.get(),
            bytes_recv: 0,
        })
    }
}

fn ms(millis: u64) -> Duration {
    Duration::from_millis(millis)
}

#[test]
fn test_metrics_sampled_only_on_their_interval() {
    let source = SharedSource::new();
    let t0 = Instant::now();
    let mut engine = Engine::new(source.clone(), &Config::default(), t0);

    // 50 ms frames for just under two metric intervals
    for i in 0..40 {
        engine.tick(t0 + ms(i * 50));
    }

    // t=0 and t=1000
    assert_eq!(source.reads.get(), 2);
}

#[test]
fn test_expression_follows_load() {
    let source = SharedSource::new();
    let t0 = Instant::now();
    let mut engine = Engine::new(source.clone(), &Config::default(), t0);

    engine.tick(t0);
    assert_eq!(engine.expression(), Expression::Happy);

    source.mem.set(95.0);
    engine.tick(t0 + ms(1000));
    assert_eq!(engine.expression(), Expression::RamExhausted);

    source.cpu.set(75.0);
    engine.tick(t0 + ms(2000));
    assert_eq!(engine.expression(), Expression::CpuWorried);
}

#[test]
fn test_network_rate_uses_measured_time() {
    let source = SharedSource::new();
    let t0 = Instant::now();
    let mut engine = Engine::new(source.clone(), &Config::default(), t0);

    source.sent.set(1000);
    engine.tick(t0);

    // The tick arrives late: 2 s instead of 1 s.
    source.sent.set(1000 + 4096);
    engine.tick(t0 + ms(2000));

    assert_eq!(engine.sample().upload_rate_kbs, 2.0);
}

#[test]
fn test_failed_read_freezes_sample() {
    let source = SharedSource::new();
    let t0 = Instant::now();
    let mut engine = Engine::new(source.clone(), &Config::default(), t0);

    source.cpu.set(42.0);
    engine.tick(t0);
    let before = engine.sample();

    source.failing.set(true);
    source.cpu.set(99.0);
    engine.tick(t0 + ms(1000));

    assert!(engine.is_stale());
    assert_eq!(engine.sample(), before);
    assert_eq!(engine.expression(), Expression::Happy);
}

#[test]
fn test_policy_switch_reclassifies_immediately() {
    let source = SharedSource::new();
    source.cpu.set(60.0);
    let t0 = Instant::now();
    let config = Config {
        policy: ExpressionPolicy::CombinedSeverity,
        ..Default::default()
    };
    let mut engine = Engine::new(source, &config, t0);

    engine.tick(t0);
    assert_eq!(engine.expression(), Expression::Neutral);

    engine.set_policy(ExpressionPolicy::AxisPriority);
    assert_eq!(engine.expression(), Expression::Happy);
}

#[test]
fn test_stop_is_idempotent_and_freezes_frame() {
    let source = SharedSource::new();
    let t0 = Instant::now();
    let mut engine = Engine::new(source.clone(), &Config::default(), t0);

    let running = engine.tick(t0);
    engine.stop();
    engine.stop();

    let frozen = engine.tick(t0 + ms(5000));
    assert!(!engine.is_running());
    assert_eq!(running, frozen);
    assert_eq!(source.reads.get(), 1);
}

#[test]
fn test_gauges_view_frame() {
    let source = SharedSource::new();
    source.cpu.set(30.0);
    source.mem.set(80.0);
    let t0 = Instant::now();
    let config = Config {
        view: ViewMode::Gauges,
        show_network: true,
        ..Default::default()
    };
    let mut engine = Engine::new(source, &config, t0);

    let frame = engine.tick(t0);
    let texts: Vec<_> = frame
        .iter()
        .filter_map(|p| match p {
            Primitive::DrawText { text, .. } => Some(text.clone()),
            _ => None,
        })
        .collect();

    assert_eq!(&texts[..4], &["30%", "CPU", "80%", "RAM"]);
    assert_eq!(texts.len(), 5);
}

#[test]
fn test_blink_closes_eyes_in_face_frame() {
    let source = SharedSource::new();
    let t0 = Instant::now();
    let mut engine = Engine::new(source, &Config::default(), t0);

    let open = engine.tick(t0);
    assert!(engine.trigger_blink(t0 + ms(50)));
    let closed = engine.tick(t0 + ms(100));

    let lines = |frame: &[Primitive]| {
        frame
            .iter()
            .filter(|p| matches!(p, Primitive::DrawLine { .. }))
            .count()
    };
    assert_eq!(lines(&open), 0);
    assert_eq!(lines(&closed), 2);
    assert!(engine.animation().blinking);

    engine.tick(t0 + ms(250));
    assert!(!engine.animation().blinking);
}
