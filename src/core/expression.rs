//! Mapping of load percentages to a discrete facial expression.

use serde::{Deserialize, Serialize};

use super::metrics::MetricSample;
use super::render::Rgb;

/// Threshold above which a metric is critical.
pub const STRUGGLING_THRESHOLD: f32 = 90.0;
/// Threshold above which a metric is elevated.
pub const WORRIED_THRESHOLD: f32 = 70.0;
/// Threshold above which combined load is noticeable.
pub const NEUTRAL_THRESHOLD: f32 = 50.0;

/// Lower bound of the moderate display band.
pub const MODERATE_BAND: f32 = 50.0;
/// Lower bound of the high display band.
pub const HIGH_BAND: f32 = 75.0;
/// Lower bound of the critical display band.
pub const CRITICAL_BAND: f32 = 90.0;

/// Severity of a single load percentage, as shown by gauges and text output.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadBand {
    Low,
    Moderate,
    High,
    Critical,
}

impl LoadBand {
    pub fn of(percent: f32) -> Self {
        match percent {
            v if v < MODERATE_BAND => LoadBand::Low,
            v if v < HIGH_BAND => LoadBand::Moderate,
            v if v < CRITICAL_BAND => LoadBand::High,
            _ => LoadBand::Critical,
        }
    }
}

/// How load percentages are turned into an [`Expression`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ExpressionPolicy {
    /// Cpu thresholds are checked before memory thresholds; the first match wins.
    #[default]
    AxisPriority,
    /// The larger of cpu and memory drives a single severity scale.
    CombinedSeverity,
}

/// The face currently shown.
///
/// `AxisPriority` yields `Happy`, `CpuWorried`, `CpuStruggling`, `RamTired`
/// and `RamExhausted`; `CombinedSeverity` yields `Happy`, `Neutral`,
/// `Worried` and `Struggling`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Expression {
    Happy,
    Neutral,
    Worried,
    Struggling,
    CpuWorried,
    CpuStruggling,
    RamTired,
    RamExhausted,
}

/// Eye style for an open (not blinking) face.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EyeStyle {
    /// Plain round eyes.
    Round,
    /// Flattened, half-closed eyes.
    Narrow,
    /// Enlarged eyes with a visible pupil.
    Wide,
}

/// Mouth shape for an expression.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MouthStyle {
    Smile,
    Flat,
    Frown,
    DeepFrown,
}

impl ExpressionPolicy {
    pub fn as_str(&self) -> &'static str {
        match self {
            ExpressionPolicy::AxisPriority => "axis",
            ExpressionPolicy::CombinedSeverity => "combined",
        }
    }

    /// Parse a policy from its CLI name.
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "axis" | "axis-priority" => Some(ExpressionPolicy::AxisPriority),
            "combined" | "combined-severity" => Some(ExpressionPolicy::CombinedSeverity),
            _ => None,
        }
    }
}

impl Expression {
    pub fn label(&self) -> &'static str {
        match self {
            Expression::Happy => "happy",
            Expression::Neutral => "neutral",
            Expression::Worried => "worried",
            Expression::Struggling => "struggling",
            Expression::CpuWorried => "cpu worried",
            Expression::CpuStruggling => "cpu struggling",
            Expression::RamTired => "ram tired",
            Expression::RamExhausted => "ram exhausted",
        }
    }

    /// Face fill color.
    pub fn face_color(&self) -> Rgb {
        match self {
            Expression::Happy => Rgb(0, 255, 0),
            Expression::Neutral => Rgb(255, 255, 0),
            Expression::Worried | Expression::CpuWorried => Rgb(255, 165, 0),
            Expression::Struggling | Expression::CpuStruggling => Rgb(255, 0, 0),
            Expression::RamTired => Rgb(100, 180, 255),
            Expression::RamExhausted => Rgb(160, 60, 220),
        }
    }

    pub fn eye_style(&self) -> EyeStyle {
        match self {
            Expression::Struggling | Expression::CpuStruggling | Expression::RamExhausted => {
                EyeStyle::Wide
            }
            Expression::Neutral | Expression::RamTired => EyeStyle::Narrow,
            Expression::Happy | Expression::Worried | Expression::CpuWorried => EyeStyle::Round,
        }
    }

    pub fn mouth_style(&self) -> MouthStyle {
        match self {
            Expression::Happy => MouthStyle::Smile,
            Expression::Neutral | Expression::RamTired => MouthStyle::Flat,
            Expression::Worried | Expression::CpuWorried => MouthStyle::Frown,
            Expression::Struggling | Expression::CpuStruggling | Expression::RamExhausted => {
                MouthStyle::DeepFrown
            }
        }
    }

    /// Whether worried brows are drawn above the eyes.
    pub fn has_brows(&self) -> bool {
        match self {
            Expression::Worried | Expression::CpuWorried => true,
            Expression::Happy
            | Expression::Neutral
            | Expression::Struggling
            | Expression::CpuStruggling
            | Expression::RamTired
            | Expression::RamExhausted => false,
        }
    }
}

/// Classify a sample under `policy`.
pub fn classify(policy: ExpressionPolicy, sample: &MetricSample) -> Expression {
    classify_percentages(policy, sample.cpu_percent, sample.mem_percent)
}

/// Classify raw percentages under `policy`.
pub fn classify_percentages(policy: ExpressionPolicy, cpu: f32, mem: f32) -> Expression {
    match policy {
        ExpressionPolicy::AxisPriority => classify_axis_priority(cpu, mem),
        ExpressionPolicy::CombinedSeverity => classify_combined(cpu, mem),
    }
}

/// Cpu first, then memory; first matching threshold wins.
pub fn classify_axis_priority(cpu: f32, mem: f32) -> Expression {
    if cpu > STRUGGLING_THRESHOLD {
        Expression::CpuStruggling
    } else if cpu > WORRIED_THRESHOLD {
        Expression::CpuWorried
    } else if mem > STRUGGLING_THRESHOLD {
        Expression::RamExhausted
    } else if mem > WORRIED_THRESHOLD {
        Expression::RamTired
    } else {
        Expression::Happy
    }
}

/// The larger of the two metrics selects one of four buckets.
pub fn classify_combined(cpu: f32, mem: f32) -> Expression {
    let peak = cpu.max(mem);

    if peak > STRUGGLING_THRESHOLD {
        Expression::Struggling
    } else if peak > WORRIED_THRESHOLD {
        Expression::Worried
    } else if peak > NEUTRAL_THRESHOLD {
        Expression::Neutral
    } else {
        Expression::Happy
    }
}
