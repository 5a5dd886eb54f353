//! Headless sampling: print load and expression without the overlay.

use std::time::{Duration, Instant};

use anyhow::Result;
use clap::ArgMatches;
use serde::Serialize;

use crate::core::config::Config;
use crate::core::expression::{classify, Expression, ExpressionPolicy};
use crate::core::metrics::{MetricSample, MetricSampler, SysinfoSource};
use crate::ui::format_sample_line;

/// One JSON line of `pc-emo sample --json`
#[derive(Debug, Clone, Serialize)]
pub struct SampleRecord {
    pub elapsed_ms: u64,
    #[serde(flatten)]
    pub sample: MetricSample,
    pub expression: Expression,
    pub stale: bool,
}

/// Execute the sample command
pub fn execute(matches: &ArgMatches) -> Result<()> {
    let config = Config::load().unwrap_or_default();

    let interval = matches
        .get_one::<u64>("interval")
        .copied()
        .map(Duration::from_millis)
        .unwrap_or_else(|| config.metric_interval());
    let count = matches.get_one::<u64>("count").copied().unwrap_or(0);
    let json_output = matches.get_flag("json");
    let policy = match matches.get_one::<String>("policy") {
        Some(name) => ExpressionPolicy::from_name(name)
            .ok_or_else(|| anyhow::anyhow!("Unknown policy '{}'", name))?,
        None => config.policy,
    };

    let mut sampler = MetricSampler::new(SysinfoSource::new());
    let start = Instant::now();

    // Prime cpu usage and the network baseline.
    sampler.sample();
    std::thread::sleep(sysinfo::MINIMUM_CPU_UPDATE_INTERVAL.max(interval));

    let mut taken = 0u64;
    loop {
        let sample = sampler.sample();
        let expression = classify(policy, &sample);

        if json_output {
            let record = SampleRecord {
                elapsed_ms: start.elapsed().as_millis() as u64,
                sample,
                expression,
                stale: sampler.is_stale(),
            };
            println!("{}", serde_json::to_string(&record)?);
        } else {
            println!("{}", format_sample_line(&sample, expression, sampler.is_stale()));
        }

        taken += 1;
        if count != 0 && taken >= count {
            break;
        }

        std::thread::sleep(interval);
    }

    Ok(())
}
