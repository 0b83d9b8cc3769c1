//! Logging bridge for typeprint.
//!
//! Routes `log::info!()` and friends to stderr as timestamped lines, keeping
//! them apart from command output on stdout.
//!
//! Level precedence:
//! - the `--log-level` CLI flag;
//! - `RUST_LOG` (`info`, or `typeprint=debug,...`);
//! - `DEBUG_LEVEL` (0 off, 1 errors, 2 info, 3 debug, 4 trace);
//! - otherwise warnings and errors only.

use std::io::{self, Write};
use std::sync::OnceLock;
use std::time::{SystemTime, UNIX_EPOCH};

use log::{Level, LevelFilter, Log, Metadata, Record};
use parking_lot::Mutex;

const DEFAULT_LEVEL: LevelFilter = LevelFilter::Warn;

struct LogBridge {
    level: LevelFilter,
    out: Mutex<Box<dyn Write + Send>>,
}

impl Log for LogBridge {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= self.level
    }

    fn log(&self, record: &Record) {
        if !self.enabled(record.metadata()) {
            return;
        }
        let line = format_line(record.level(), record.target(), &record.args().to_string());
        let mut out = self.out.lock();
        // Nowhere left to report a failed log write.
        let _ = out.write_all(line.as_bytes());
    }

    fn flush(&self) {
        let _ = self.out.lock().flush();
    }
}

static BRIDGE: OnceLock<LogBridge> = OnceLock::new();

/// Install the stderr logger. Later calls keep the first level.
///
/// Returns the level in effect.
pub fn init_log_bridge(cli_level: Option<LevelFilter>) -> LevelFilter {
    let level = resolve_level(
        cli_level,
        std::env::var("RUST_LOG").ok().as_deref(),
        std::env::var("DEBUG_LEVEL").ok().as_deref(),
    );
    let bridge = BRIDGE.get_or_init(|| LogBridge {
        level,
        out: Mutex::new(Box::new(io::stderr())),
    });
    if log::set_logger(bridge).is_ok() {
        log::set_max_level(bridge.level);
    }
    bridge.level
}

fn resolve_level(
    cli_level: Option<LevelFilter>,
    rust_log: Option<&str>,
    debug_level: Option<&str>,
) -> LevelFilter {
    cli_level
        .or_else(|| rust_log.and_then(parse_rust_log))
        .or_else(|| debug_level.and_then(parse_debug_level))
        .unwrap_or(DEFAULT_LEVEL)
}

/// Accepts a bare level or `target=level` directives; only this crate's
/// directive (or a bare level) is honored.
fn parse_rust_log(value: &str) -> Option<LevelFilter> {
    value.split(',').map(str::trim).find_map(|directive| match directive.split_once('=') {
        Some((target, level)) if target.starts_with("typeprint") => level.parse().ok(),
        Some(_) => None,
        None => directive.parse().ok(),
    })
}

fn parse_debug_level(value: &str) -> Option<LevelFilter> {
    match value.trim().parse::<u8>().ok()? {
        0 => Some(LevelFilter::Off),
        1 => Some(LevelFilter::Error),
        2 => Some(LevelFilter::Info),
        3 => Some(LevelFilter::Debug),
        4 => Some(LevelFilter::Trace),
        _ => None,
    }
}

fn format_line(level: Level, target: &str, message: &str) -> String {
    format!("[{}] [{:<5}] [{}] {}\n", get_timestamp(), level, target, message)
}

fn get_timestamp() -> String {
    let now = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default();
    format!("{}.{:06}", now.as_secs(), now.subsec_micros())
}
