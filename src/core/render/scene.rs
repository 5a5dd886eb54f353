//! Composition of the face, gauges and network readout into one frame.

use humansize::{format_size, DECIMAL};
use serde::{Deserialize, Serialize};

use super::face::FaceRenderer;
use super::gauge::{gauge_color, LiquidWaveRenderer};
use super::primitives::{Point, Primitive, Rect, Rgb};
use crate::core::animation::AnimationState;
use crate::core::expression::Expression;
use crate::core::metrics::MetricSample;

/// Width of the scene's local coordinate space.
pub const SCENE_WIDTH: f64 = 200.0;
/// Height of the scene's local coordinate space.
pub const SCENE_HEIGHT: f64 = 200.0;

const GAUGE_RADIUS: f64 = 40.0;
const TEXT: Rgb = Rgb(220, 220, 220);

/// Which visualization the overlay shows.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ViewMode {
    /// Animated emoji face.
    #[default]
    Face,
    /// Cpu and memory liquid gauges side by side.
    Gauges,
}

impl ViewMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            ViewMode::Face => "face",
            ViewMode::Gauges => "gauges",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "face" => Some(ViewMode::Face),
            "gauges" | "gauge" => Some(ViewMode::Gauges),
            _ => None,
        }
    }
}

/// Builds the full frame for the current view.
#[derive(Debug, Clone)]
pub struct Scene {
    view: ViewMode,
    show_network: bool,
    face: FaceRenderer,
    cpu_gauge: LiquidWaveRenderer,
    mem_gauge: LiquidWaveRenderer,
}

impl Scene {
    pub fn new(view: ViewMode, show_network: bool) -> Self {
        Self {
            view,
            show_network,
            face: FaceRenderer::new(Rect::new(50.0, 30.0, 100.0, 100.0)),
            cpu_gauge: LiquidWaveRenderer::new(Point::new(50.0, 80.0), GAUGE_RADIUS),
            mem_gauge: LiquidWaveRenderer::new(Point::new(150.0, 80.0), GAUGE_RADIUS),
        }
    }

    pub fn view(&self) -> ViewMode {
        self.view
    }

    pub fn set_view(&mut self, view: ViewMode) {
        self.view = view;
    }

    pub fn show_network(&self) -> bool {
        self.show_network
    }

    pub fn set_show_network(&mut self, show: bool) {
        self.show_network = show;
    }

    pub fn render(
        &self,
        expression: Expression,
        sample: &MetricSample,
        animation: &AnimationState,
    ) -> Vec<Primitive> {
        let mut primitives = match self.view {
            ViewMode::Face => {
                let mut face =
                    self.face
                        .render(expression, animation.blinking, animation.scale_factor);
                face.push(Primitive::DrawText {
                    anchor: Point::new(SCENE_WIDTH / 2.0, 152.0),
                    text: expression.label().to_string(),
                    color: TEXT,
                });
                face
            }
            ViewMode::Gauges => {
                let cpu = sample.cpu_percent as f64;
                let mem = sample.mem_percent as f64;

                let mut gauges =
                    self.cpu_gauge
                        .render(cpu, animation.wave_phase, gauge_color(cpu), "CPU");
                gauges.extend(
                    self.mem_gauge
                        .render(mem, animation.wave_phase, gauge_color(mem), "RAM"),
                );
                gauges
            }
        };

        if self.show_network {
            primitives.push(Primitive::DrawText {
                anchor: Point::new(SCENE_WIDTH / 2.0, 180.0),
                text: network_readout(sample),
                color: TEXT,
            });
        }

        primitives
    }
}

/// Human readable rate for a KB/s value.
pub fn format_rate(rate_kbs: f32) -> String {
    let bytes = (rate_kbs.max(0.0) as f64 * 1024.0) as u64;
    format!("{}/s", format_size(bytes, DECIMAL))
}

fn network_readout(sample: &MetricSample) -> String {
    format!(
        "↑ {}  ↓ {}",
        format_rate(sample.upload_rate_kbs),
        format_rate(sample.download_rate_kbs)
    )
}
