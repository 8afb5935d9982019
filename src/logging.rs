//! Browser console logger.
//!
//! Forwards `log` records to `console.*`, appending structured key-values
//! as `key=value` pairs after the message.

use std::fmt::Write as _;
use std::str::FromStr;

use log::kv::{self, Key, Source, Value, VisitSource};
use log::{Level, LevelFilter, Log, Metadata, Record};
use wasm_bindgen::JsValue;
use web_sys::console;

static LOGGER: ConsoleLogger = ConsoleLogger;

/// `log::Log` implementation backed by `web_sys::console`.
struct ConsoleLogger;

impl Log for ConsoleLogger {
    fn enabled(&self, metadata: &Metadata<'_>) -> bool {
        metadata.level() <= log::max_level()
    }

    fn log(&self, record: &Record<'_>) {
        if !self.enabled(record.metadata()) {
            return;
        }

        let mut line = format!("[{}] {}", record.target(), record.args());
        let mut pairs = PairWriter(&mut line);
        // a failing visitor only truncates the appended pairs
        let _ = record.key_values().visit(&mut pairs);

        let line = JsValue::from_str(&line);
        match record.level() {
            Level::Error => console::error_1(&line),
            Level::Warn => console::warn_1(&line),
            Level::Info => console::info_1(&line),
            Level::Debug => console::log_1(&line),
            Level::Trace => console::debug_1(&line),
        }
    }

    fn flush(&self) {}
}

/// Appends ` key=value` for every visited pair.
struct PairWriter<'a>(&'a mut String);

impl<'kvs> VisitSource<'kvs> for PairWriter<'_> {
    fn visit_pair(&mut self, key: Key<'kvs>, value: Value<'kvs>) -> Result<(), kv::Error> {
        write!(self.0, " {key}={value}").map_err(|_| kv::Error::msg("formatting failed"))
    }
}

/// Install the console logger. Later calls keep the first logger and only
/// update the level.
pub(crate) fn init(level: LevelFilter) {
    let _ = log::set_logger(&LOGGER);
    log::set_max_level(level);
}

/// Change the maximum level from its name (`"off"`, `"error"`, ... `"trace"`,
/// case-insensitive).
pub(crate) fn set_level(name: &str) -> Result<LevelFilter, String> {
    let level = LevelFilter::from_str(name).map_err(|_| format!("unknown log level `{name}`"))?;
    log::set_max_level(level);
    Ok(level)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_set_level_parses_names() {
        assert_eq!(set_level("Debug"), Ok(LevelFilter::Debug));
        assert_eq!(set_level("off"), Ok(LevelFilter::Off));
        assert!(set_level("loud").is_err());
        log::set_max_level(LevelFilter::Info);
    }

    #[test]
    fn test_pairs_appended() {
        let kvs: [(&str, i64); 2] = [("nodes", 3), ("links", 2)];
        let mut line = String::from("msg");
        kvs[..].visit(&mut PairWriter(&mut line)).unwrap();
        assert_eq!(line, "msg nodes=3 links=2");
    }
}
