//! Platform logging initialization for callsheet_app.
//!
//! The destination is selected with the `CALLSHEET_LOG` environment
//! variable; file output goes to `./callsheet.log` in the current working
//! directory.

use std::fs::File;

use log::LevelFilter;
use simplelog::{
    ColorChoice, CombinedLogger, ConfigBuilder, SharedLogger, TermLogger, TerminalMode,
    WriteLogger,
};

const LOG_FILE: &str = "./callsheet.log";

/// Destination for log output.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogDestination {
    /// Write to ./callsheet.log in current directory.
    File,
    /// Write to terminal (stdout).
    Terminal,
    /// Write to both file and terminal.
    Both,
}

/// Reads `CALLSHEET_LOG` (`file` | `terminal` | `both`).
pub fn destination_from_env() -> LogDestination {
    parse_destination(std::env::var("CALLSHEET_LOG").ok().as_deref())
}

/// Unset or unrecognized values fall back to `Both`; this runs before the
/// logger exists, so there is nowhere to warn.
fn parse_destination(raw: Option<&str>) -> LogDestination {
    match raw.map(str::trim) {
        Some("file") => LogDestination::File,
        Some("terminal") => LogDestination::Terminal,
        _ => LogDestination::Both,
    }
}

/// Initialize the logger with the specified destination.
pub fn initialize(destination: LogDestination) {
    let level = LevelFilter::Info;
    let config = ConfigBuilder::new()
        .set_time_format_rfc3339()
        .set_target_level(LevelFilter::Error)
        .build();

    let mut loggers: Vec<Box<dyn SharedLogger>> = Vec::new();
    if destination != LogDestination::File {
        loggers.push(TermLogger::new(
            level,
            config.clone(),
            TerminalMode::Mixed,
            ColorChoice::Auto,
        ));
    }
    if destination != LogDestination::Terminal {
        match File::create(LOG_FILE) {
            Ok(file) => loggers.push(WriteLogger::new(level, config, file)),
            Err(err) => {
                eprintln!("Warning: could not create log file at {LOG_FILE}: {err}");
            }
        }
    }

    if !loggers.is_empty() {
        let _ = CombinedLogger::init(loggers);
    }
}
