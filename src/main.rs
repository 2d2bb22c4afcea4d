use std::process;

use clap::{Arg, Command};

use prload::commands::{handle_config, handle_run, handle_setup};
use prload::logging::init_logging;

#[tokio::main]
async fn main() {
    let _ = init_logging();

    let app = Command::new("prload")
        .about("Load-testing CLI for the pull-request service")
        .version("1.0.0")
        .subcommand_required(true)
        .arg_required_else_help(true)
        .subcommand(
            Command::new("run")
                .about("Run the full load scenario: team setup, VU ramp, threshold verdict")
                .arg(
                    Arg::new("base-url")
                        .long("base-url")
                        .value_name("URL")
                        .help("Service base URL (host:port)"),
                )
                .arg(
                    Arg::new("stage")
                        .long("stage")
                        .value_name("DURATION:TARGET")
                        .help("Ramp stage, e.g. 10s:50 (repeatable, replaces the default profile)")
                        .action(clap::ArgAction::Append),
                )
                .arg(
                    Arg::new("think-time-ms")
                        .long("think-time-ms")
                        .value_name("MS")
                        .help("Pause between iterations of one VU")
                        .default_value("100"),
                )
                .arg(
                    Arg::new("team-size")
                        .long("team-size")
                        .value_name("N")
                        .help("Number of synthetic team members created in setup")
                        .default_value("100"),
                )
                .arg(
                    Arg::new("p95-ms")
                        .long("p95-ms")
                        .value_name("MS")
                        .help("p95 latency threshold in milliseconds")
                        .default_value("300"),
                )
                .arg(
                    Arg::new("max-failure-rate")
                        .long("max-failure-rate")
                        .value_name("RATE")
                        .help("Failure-rate threshold (0.001 = 0.1%)")
                        .default_value("0.001"),
                )
                .arg(
                    Arg::new("summary-json")
                        .long("summary-json")
                        .value_name("PATH")
                        .help("Write the run summary as JSON to this file"),
                ),
        )
        .subcommand(
            Command::new("setup")
                .about("Run only the setup phase: create the synthetic team")
                .arg(
                    Arg::new("base-url")
                        .long("base-url")
                        .value_name("URL")
                        .help("Service base URL (host:port)"),
                )
                .arg(
                    Arg::new("team-size")
                        .long("team-size")
                        .value_name("N")
                        .help("Number of synthetic team members")
                        .default_value("100"),
                ),
        )
        .subcommand(
            Command::new("config")
                .about("Configure prload defaults")
                .arg(
                    Arg::new("base-url")
                        .long("base-url")
                        .value_name("URL")
                        .help("Save the default service base URL"),
                )
                .arg(
                    Arg::new("show")
                        .long("show")
                        .help("Show the configured base URL")
                        .action(clap::ArgAction::SetTrue),
                ),
        );

    let matches = app.get_matches();

    let result = match matches.subcommand() {
        Some(("run", sub_matches)) => handle_run(sub_matches).await,
        Some(("setup", sub_matches)) => handle_setup(sub_matches).await,
        Some(("config", sub_matches)) => handle_config(sub_matches).await,
        _ => {
            eprintln!("Unknown command. Use 'prload --help' for available commands.");
            process::exit(1);
        }
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}
