use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use log::{debug, error, info, warn};
use procprio::common::{Config, logging};
use procprio::runner::Launcher;
use procprio::{NICE_MAX, NICE_MIN, ProcessPriority};
use serde::Serialize;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(version, about = "Query and adjust process scheduling priority")]
struct Cli {
    /// Enable debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Configuration file (defaults to <config dir>/procprio.toml)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Print the current scheduling priority
    Get {
        /// Print as JSON
        #[arg(long)]
        json: bool,
    },

    /// Run a command with an adjusted niceness
    Run {
        /// Niceness adjustment, overrides the configuration
        #[arg(
            short = 'n',
            long,
            allow_negative_numbers = true,
            value_parser = clap::value_parser!(i32).range(NICE_MIN as i64..=NICE_MAX as i64)
        )]
        adjustment: Option<i32>,

        /// Command and its arguments
        #[arg(required = true, trailing_var_arg = true, allow_hyphen_values = true)]
        command: Vec<String>,
    },
}

#[derive(Serialize)]
struct PriorityReport {
    platform: &'static str,
    priority: i32,
    #[serde(skip_serializing_if = "Option::is_none")]
    lowest_permitted: Option<i32>,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    logging::init(cli.verbose).context("Failed to initialize logging")?;
    debug!("Command line: {:?}", cli);

    let config = match &cli.config {
        Some(path) => Config::load_from(path),
        None => Config::load(),
    }
    .context("Failed to load configuration")?;

    match cli.command {
        Commands::Get { json } => report(json),
        Commands::Run {
            adjustment,
            command,
        } => {
            let exit_code = run(&config, adjustment, command)?;
            std::process::exit(exit_code);
        }
    }
}

fn report(json: bool) -> Result<()> {
    let accessor = ProcessPriority::native();
    let report = PriorityReport {
        platform: accessor.platform(),
        priority: accessor
            .current_priority()
            .context("Failed to read the current priority")?,
        lowest_permitted: lowest_permitted(),
    };

    if json {
        println!("{}", serde_json::to_string(&report)?);
    } else {
        print!("{}", render_text(&report));
    }
    Ok(())
}

/// Priority on the first line, then the niceness floor when known.
fn render_text(report: &PriorityReport) -> String {
    match report.lowest_permitted {
        Some(floor) => format!("{}\nlowest permitted: {}\n", report.priority, floor),
        None => format!("{}\n", report.priority),
    }
}

#[cfg(unix)]
fn lowest_permitted() -> Option<i32> {
    procprio::lowest_permitted_niceness()
        .map_err(|e| debug!("Could not determine the niceness floor: {}", e))
        .ok()
}

#[cfg(not(unix))]
fn lowest_permitted() -> Option<i32> {
    None
}

fn run(config: &Config, adjustment: Option<i32>, command: Vec<String>) -> Result<i32> {
    let mut launcher = Launcher::new(command)?;
    let exe_name = launcher.exe_name();
    debug!("Detected executable name: '{}'", exe_name);

    let delta = adjustment.unwrap_or_else(|| config.adjustment_for(&exe_name));
    let accessor = ProcessPriority::native();

    match accessor.nice(Some(delta)) {
        Ok(priority) => info!("Launching '{}' at priority {}", exe_name, priority),
        Err(e) if e.is_permission_denied() && !config.priority.strict => {
            warn!("Cannot adjust niceness by {}: {}", delta, e);
        }
        Err(e) => {
            error!("Failed to adjust niceness by {}: {}", delta, e);
            return Err(e).context("Refusing to launch with the requested priority");
        }
    }

    launcher.execute()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_text_includes_floor() {
        let report = PriorityReport {
            platform: "linux",
            priority: 5,
            lowest_permitted: Some(0),
        };
        assert_eq!(render_text(&report), "5\nlowest permitted: 0\n");
    }

    #[test]
    fn test_render_text_without_floor() {
        let report = PriorityReport {
            platform: "windows",
            priority: -5,
            lowest_permitted: None,
        };
        assert_eq!(render_text(&report), "-5\n");
    }

    #[test]
    fn test_report_json_fields() {
        let report = PriorityReport {
            platform: "linux",
            priority: 3,
            lowest_permitted: Some(-2),
        };
        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["priority"], 3);
        assert_eq!(json["lowest_permitted"], -2);
        assert_eq!(json["platform"], "linux");
    }
}
