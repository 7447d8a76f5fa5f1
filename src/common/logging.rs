use anyhow::Result;
use env_logger::Builder;
use log::LevelFilter;
use std::io::Write;

/// Initialize logging for the launcher. `RUST_LOG` still overrides the level.
pub fn init(verbose: bool) -> Result<()> {
    Builder::new()
        .filter_level(level_for(verbose))
        .parse_default_env()
        .format(format_log)
        .try_init()?;

    Ok(())
}

fn level_for(verbose: bool) -> LevelFilter {
    if verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    }
}

fn level_label(level: log::Level) -> &'static str {
    match level {
        log::Level::Error => "\x1b[31mERROR\x1b[0m", // Red
        log::Level::Warn => "\x1b[33mWARN \x1b[0m",  // Yellow
        log::Level::Info => "\x1b[32mINFO \x1b[0m",  // Green
        log::Level::Debug => "\x1b[36mDEBUG\x1b[0m", // Cyan
        log::Level::Trace => "\x1b[35mTRACE\x1b[0m", // Magenta
    }
}

/// Last path component of a log target, e.g. `procprio::priority::unix` -> `unix`
fn module_of(target: &str) -> &str {
    target.rsplit("::").next().unwrap_or(target)
}

fn format_log(buf: &mut env_logger::fmt::Formatter, record: &log::Record) -> std::io::Result<()> {
    let time = chrono::Local::now().format("%H:%M:%S");

    // Module name right-aligned to 8 columns
    writeln!(
        buf,
        "{} {} [{:>8}] {}",
        time,
        level_label(record.level()),
        module_of(record.target()),
        record.args()
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_level_for() {
        assert_eq!(level_for(true), LevelFilter::Debug);
        assert_eq!(level_for(false), LevelFilter::Info);
    }

    #[test]
    fn test_module_of() {
        assert_eq!(module_of("procprio::priority::unix"), "unix");
        assert_eq!(module_of("procprio"), "procprio");
    }

    #[test]
    fn test_level_label_is_padded() {
        assert!(level_label(log::Level::Warn).contains("WARN "));
        assert!(level_label(log::Level::Info).contains("INFO "));
    }
}
