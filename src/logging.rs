//! Stderr logger. Stdout carries the boards, so diagnostics stay off it.

use std::env;
use std::io::Write;

use log::{LevelFilter, Log, Metadata, Record};

/// Environment variable holding the log level.
pub const LOG_ENV: &str = "BATTLESHIP_LOG";

const OWN_TARGET: &str = "battleship_solo";

struct StderrLogger;

impl Log for StderrLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        // other crates only get through with warnings and errors
        let floor = if metadata.target().starts_with(OWN_TARGET) {
            log::max_level()
        } else {
            log::max_level().min(LevelFilter::Warn)
        };
        metadata.level() <= floor
    }

    fn log(&self, record: &Record) {
        if !self.enabled(record.metadata()) {
            return;
        }
        let target = record
            .target()
            .strip_prefix(OWN_TARGET)
            .map(|t| t.trim_start_matches("::"))
            .unwrap_or(record.target());
        let _ = writeln!(
            std::io::stderr().lock(),
            "{:<5} [{}] {}",
            record.level(),
            if target.is_empty() { "main" } else { target },
            record.args()
        );
    }

    fn flush(&self) {
        let _ = std::io::stderr().flush();
    }
}

static LOGGER: StderrLogger = StderrLogger;

/// Level named by `value`, falling back to `info` when absent or unparsable.
pub fn level_from(value: Option<&str>) -> LevelFilter {
    value
        .and_then(|v| v.trim().parse().ok())
        .unwrap_or(LevelFilter::Info)
}

/// Install the stderr logger with the level from `BATTLESHIP_LOG`. A second
/// call leaves the first logger in place. Returns the level in effect.
pub fn init_logging() -> LevelFilter {
    let level = level_from(env::var(LOG_ENV).ok().as_deref());
    if log::set_logger(&LOGGER).is_ok() {
        log::set_max_level(level);
    }
    log::max_level()
}
