//! Per-tick entry point.
//!
//! The engine runs on the fast animation tick. Metric sampling happens on
//! the same loop but only once its own, slower interval has elapsed.

use std::time::{Duration, Instant};

use super::animation::{AnimationClock, AnimationState};
use super::config::Config;
use super::expression::{classify, Expression, ExpressionPolicy};
use super::metrics::{MetricSample, MetricSampler, MetricsSource};
use super::render::{Primitive, Scene, ViewMode};

/// Sampler, classifier, clock and scene wired together.
pub struct Engine<S> {
    sampler: MetricSampler<S>,
    clock: AnimationClock,
    scene: Scene,
    policy: ExpressionPolicy,
    metric_interval: Duration,
    last_metric_at: Option<Instant>,
    sample: MetricSample,
    expression: Expression,
    animation: AnimationState,
}

impl<S: MetricsSource> Engine<S> {
    pub fn new(source: S, config: &Config, now: Instant) -> Self {
        Self {
            sampler: MetricSampler::new(source),
            clock: AnimationClock::new(now),
            scene: Scene::new(config.view, config.show_network),
            policy: config.policy,
            metric_interval: config.metric_interval(),
            last_metric_at: None,
            sample: MetricSample::default(),
            expression: Expression::Happy,
            animation: AnimationState::default(),
        }
    }

    /// Advance one tick and return the frame to draw.
    ///
    /// A stopped engine neither samples nor animates; it keeps returning
    /// the last frame.
    pub fn tick(&mut self, now: Instant) -> Vec<Primitive> {
        if self.clock.is_running() {
            if self.metric_due(now) {
                self.refresh_metrics(now);
            }
            self.animation = self.clock.advance(now);
        }

        self.frame()
    }

    /// The frame for the current state, without advancing anything.
    pub fn frame(&self) -> Vec<Primitive> {
        self.scene
            .render(self.expression, &self.sample, &self.animation)
    }

    pub fn stop(&mut self) {
        if self.clock.is_running() {
            log::debug!("Engine stopped");
        }
        self.clock.stop();
    }

    pub fn start(&mut self, now: Instant) {
        self.clock.start(now);
    }

    pub fn is_running(&self) -> bool {
        self.clock.is_running()
    }

    pub fn sample(&self) -> MetricSample {
        self.sample
    }

    pub fn expression(&self) -> Expression {
        self.expression
    }

    pub fn animation(&self) -> AnimationState {
        self.animation
    }

    pub fn is_stale(&self) -> bool {
        self.sampler.is_stale()
    }

    pub fn policy(&self) -> ExpressionPolicy {
        self.policy
    }

    /// Switch classification policy; takes effect immediately.
    pub fn set_policy(&mut self, policy: ExpressionPolicy) {
        self.policy = policy;
        self.reclassify();
    }

    pub fn view(&self) -> ViewMode {
        self.scene.view()
    }

    pub fn toggle_view(&mut self) {
        let next = match self.scene.view() {
            ViewMode::Face => ViewMode::Gauges,
            ViewMode::Gauges => ViewMode::Face,
        };
        self.scene.set_view(next);
    }

    pub fn toggle_network(&mut self) {
        let show = !self.scene.show_network();
        self.scene.set_show_network(show);
    }

    pub fn show_network(&self) -> bool {
        self.scene.show_network()
    }

    pub fn trigger_blink(&mut self, now: Instant) -> bool {
        self.clock.trigger_blink(now)
    }

    fn metric_due(&self, now: Instant) -> bool {
        match self.last_metric_at {
            None => true,
            Some(last) => now.saturating_duration_since(last) >= self.metric_interval,
        }
    }

    fn refresh_metrics(&mut self, now: Instant) {
        self.sample = self.sampler.sample_at(now);
        self.last_metric_at = Some(now);
        self.reclassify();
    }

    fn reclassify(&mut self) {
        let expression = classify(self.policy, &self.sample);
        if expression != self.expression {
            log::debug!(
                "Expression {} -> {} (cpu {:.1}%, mem {:.1}%)",
                self.expression.label(),
                expression.label(),
                self.sample.cpu_percent,
                self.sample.mem_percent
            );
            self.expression = expression;
        }
    }
}
