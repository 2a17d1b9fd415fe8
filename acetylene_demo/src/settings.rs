//! Persisted user options shared by the scenes

use acetylene::config::ConfigError;
use acetylene::prelude::*;
use std::cell::RefCell;
use std::path::{Path, PathBuf};
use std::rc::Rc;

/// Options file next to the executable's working directory
pub const OPTIONS_FILE: &str = "options.txt";

/// The options plus the file they persist to
#[derive(Debug, Clone)]
pub struct Settings {
    /// Current values
    pub options: Options,
    path: PathBuf,
}

/// Handle the scenes share
pub type SharedSettings = Rc<RefCell<Settings>>;

impl Settings {
    /// Read `path`, writing the defaults there first if it cannot be read
    pub fn load_or_create(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref().to_path_buf();
        let options = match Options::load(&path) {
            Ok(options) => options,
            Err(e) => {
                log::warn!("Failed to read options file {:?}: {}", path, e);
                let options = Options::default();
                options.save(&path)?;
                options
            }
        };
        Ok(Self { options, path })
    }

    /// Settings that are never written anywhere the caller did not pick
    #[cfg(test)]
    pub fn in_memory(options: Options, path: impl Into<PathBuf>) -> Self {
        Self {
            options,
            path: path.into(),
        }
    }

    /// Write the current values. `false` if the file could not be written.
    pub fn save(&self) -> bool {
        match self.options.save(&self.path) {
            Ok(()) => true,
            Err(e) => {
                log::error!("Failed to write options file {:?}: {}", self.path, e);
                false
            }
        }
    }

    /// Wrap for sharing between scenes
    pub fn shared(self) -> SharedSettings {
        Rc::new(RefCell::new(self))
    }
}
