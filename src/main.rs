use anyhow::Result;
use clap::{value_parser, Arg, ArgAction, Command};

use pc_emo::commands;

fn build_cli() -> Command {
    Command::new("pc-emo")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Shows system load as an animated face or liquid gauge")
        .subcommand(
            Command::new("overlay")
                .about("Run the overlay (default when no subcommand is given)")
                .arg(
                    Arg::new("view")
                        .long("view")
                        .value_name("VIEW")
                        .help("What to show: face or gauges")
                        .value_parser(["face", "gauges"]),
                )
                .arg(
                    Arg::new("policy")
                        .long("policy")
                        .value_name("POLICY")
                        .help("Expression policy: axis (cpu before memory) or combined (worst of both)")
                        .value_parser(["axis", "combined"]),
                )
                .arg(
                    Arg::new("network")
                        .short('n')
                        .long("network")
                        .help("Show upload/download rates")
                        .action(ArgAction::SetTrue),
                )
                .arg(
                    Arg::new("interval")
                        .short('i')
                        .long("interval")
                        .value_name("MS")
                        .help("Metric sampling interval in milliseconds")
                        .value_parser(value_parser!(u64)),
                )
                .arg(
                    Arg::new("frame")
                        .long("frame")
                        .value_name("MS")
                        .help("Animation frame interval in milliseconds")
                        .value_parser(value_parser!(u64)),
                ),
        )
        .subcommand(
            Command::new("sample")
                .about("Print samples to stdout without the overlay")
                .arg(
                    Arg::new("count")
                        .short('c')
                        .long("count")
                        .value_name("N")
                        .help("Stop after N samples (0 = run until interrupted)")
                        .value_parser(value_parser!(u64)),
                )
                .arg(
                    Arg::new("interval")
                        .short('i')
                        .long("interval")
                        .value_name("MS")
                        .help("Sampling interval in milliseconds")
                        .value_parser(value_parser!(u64)),
                )
                .arg(
                    Arg::new("policy")
                        .long("policy")
                        .value_name("POLICY")
                        .help("Expression policy: axis or combined")
                        .value_parser(["axis", "combined"]),
                )
                .arg(
                    Arg::new("json")
                        .long("json")
                        .help("Emit one JSON object per line")
                        .action(ArgAction::SetTrue),
                ),
        )
        .subcommand(
            Command::new("config")
                .about("Inspect or reset saved settings")
                .subcommand_required(true)
                .arg_required_else_help(true)
                .subcommand(Command::new("show").about("Print the saved settings"))
                .subcommand(Command::new("reset").about("Reset settings, keeping the position"))
                .subcommand(Command::new("path").about("Print the settings file location")),
        )
}

fn main() -> Result<()> {
    pc_emo::init_logging();

    let matches = build_cli().get_matches();

    match matches.subcommand() {
        Some(("overlay", sub_matches)) => commands::overlay(Some(sub_matches)),
        Some(("sample", sub_matches)) => commands::sample(sub_matches),
        Some(("config", sub_matches)) => commands::config::execute(sub_matches),
        _ => commands::overlay(None),
    }
}
