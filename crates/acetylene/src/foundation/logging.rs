//! Logging setup on top of `env_logger`
//!
//! Everything in the crate logs through the `log` facade; this module only
//! decides where the records go.

pub use log::{debug, error, info, trace, warn};

use crate::config::LogConfig;
use std::fs::File;
use std::io::{self, Write};

/// Writer that duplicates log output to stderr and every configured file
struct Tee {
    files: Vec<File>,
}

impl Write for Tee {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        io::stderr().write_all(buf)?;
        for file in &mut self.files {
            file.write_all(buf)?;
        }
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        io::stderr().flush()?;
        for file in &mut self.files {
            file.flush()?;
        }
        Ok(())
    }
}

/// Install the global logger described by `config`.
///
/// `RUST_LOG` still overrides the configured level. Log files that cannot be
/// created are reported and skipped. Returns `false` if logging is disabled
/// or a logger was already installed.
pub fn init(config: &LogConfig) -> bool {
    if !config.enabled {
        return false;
    }

    let level = config
        .level
        .parse::<log::LevelFilter>()
        .unwrap_or(log::LevelFilter::Info);

    let mut files = Vec::with_capacity(config.file_names.len());
    let mut failed = Vec::new();
    for name in &config.file_names {
        match File::create(name) {
            Ok(file) => files.push(file),
            Err(e) => failed.push(format!("{name}: {e}")),
        }
    }

    let mut builder = env_logger::Builder::new();
    builder.filter_level(level).parse_default_env();
    if !config.timestamps {
        builder.format_timestamp(None);
    }
    if !files.is_empty() {
        builder.target(env_logger::Target::Pipe(Box::new(Tee { files })));
    }

    if builder.try_init().is_err() {
        return false;
    }

    for failure in failed {
        log::warn!("Could not open log file {}", failure);
    }
    log::info!("Logging initialized at level {}", level);
    true
}
