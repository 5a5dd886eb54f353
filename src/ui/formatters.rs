use colored::{ColoredString, Colorize};

use crate::core::expression::{Expression, LoadBand};
use crate::core::metrics::MetricSample;
use crate::core::render::format_rate;

/// Expression label colored like the face it describes
pub fn format_expression(expression: Expression) -> ColoredString {
    let label = expression.label();
    match expression {
        Expression::Happy => label.green(),
        Expression::Neutral => label.yellow(),
        Expression::Worried | Expression::CpuWorried => label.truecolor(255, 165, 0),
        Expression::Struggling | Expression::CpuStruggling => label.red().bold(),
        Expression::RamTired => label.bright_blue(),
        Expression::RamExhausted => label.magenta().bold(),
    }
}

fn format_percent(value: f32) -> ColoredString {
    let text = format!("{:>5.1}%", value);
    match LoadBand::of(value) {
        LoadBand::Low => text.cyan(),
        LoadBand::Moderate => text.bright_yellow(),
        LoadBand::High => text.bright_red(),
        LoadBand::Critical => text.red(),
    }
}

/// One human readable line per sample for `pc-emo sample`
pub fn format_sample_line(sample: &MetricSample, expression: Expression, stale: bool) -> String {
    let mut line = format!(
        "cpu {}  mem {}  up {:>12}  down {:>12}  {}",
        format_percent(sample.cpu_percent),
        format_percent(sample.mem_percent),
        format_rate(sample.upload_rate_kbs),
        format_rate(sample.download_rate_kbs),
        format_expression(expression)
    );

    if stale {
        line.push_str(&format!("  {}", "(stale)".dimmed()));
    }

    line
}
