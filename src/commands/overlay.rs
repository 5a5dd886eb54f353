//! Overlay command handler.
//!
//! Loads the saved settings, applies one-off CLI overrides and runs the
//! terminal overlay.

use anyhow::{bail, Context, Result};
use clap::ArgMatches;

use crate::core::config::Config;
use crate::core::expression::ExpressionPolicy;
use crate::core::render::ViewMode;
use crate::ui::overlay::run_overlay_app;

/// Settings given on the command line for a single run
#[derive(Debug, Clone, Default, PartialEq)]
pub struct OverlayOverrides {
    pub view: Option<ViewMode>,
    pub policy: Option<ExpressionPolicy>,
    pub show_network: bool,
    pub metric_interval_ms: Option<u64>,
    pub frame_interval_ms: Option<u64>,
}

impl OverlayOverrides {
    pub fn from_matches(matches: &ArgMatches) -> Result<Self> {
        let view = match matches.get_one::<String>("view") {
            Some(name) => match ViewMode::from_name(name) {
                Some(view) => Some(view),
                None => bail!("Unknown view '{}': expected 'face' or 'gauges'", name),
            },
            None => None,
        };

        let policy = match matches.get_one::<String>("policy") {
            Some(name) => match ExpressionPolicy::from_name(name) {
                Some(policy) => Some(policy),
                None => bail!("Unknown policy '{}': expected 'axis' or 'combined'", name),
            },
            None => None,
        };

        Ok(Self {
            view,
            policy,
            show_network: matches.get_flag("network"),
            metric_interval_ms: matches.get_one::<u64>("interval").copied(),
            frame_interval_ms: matches.get_one::<u64>("frame").copied(),
        })
    }

    /// Layer these overrides on top of `config`.
    pub fn apply(&self, mut config: Config) -> Config {
        if let Some(view) = self.view {
            config.view = view;
        }
        if let Some(policy) = self.policy {
            config.policy = policy;
        }
        if self.show_network {
            config.show_network = true;
        }
        if let Some(ms) = self.metric_interval_ms {
            config.metric_interval_ms = ms;
        }
        if let Some(ms) = self.frame_interval_ms {
            config.frame_interval_ms = ms;
        }
        config.normalized()
    }
}

/// Execute the overlay command
pub fn execute(matches: Option<&ArgMatches>) -> Result<()> {
    let overrides = match matches {
        Some(matches) => OverlayOverrides::from_matches(matches)?,
        None => OverlayOverrides::default(),
    };

    let config = Config::load().unwrap_or_else(|e| {
        log::warn!("Using default settings: {:#}", e);
        Config::default()
    });

    run_overlay_app(overrides.apply(config)).context("Failed to run overlay")
}
