//! Persisted user options
//!
//! A plain `Key: value` text file:
//!
//! ```text
//! Resolution: 800x600
//! Fullscreen: 0
//! Volume: 1
//! Username: VirtuteVerbis
//! ```
//!
//! Reading is permissive: unknown lines are ignored and missing or malformed
//! values keep their current setting. Writing always emits all four keys in
//! the order above.

use super::ConfigError;
use crate::foundation::math::IVec2;
use std::fmt::Write as _;
use std::path::Path;

const RESOLUTION: &str = "Resolution: ";
const FULLSCREEN: &str = "Fullscreen: ";
const VOLUME: &str = "Volume: ";
const USERNAME: &str = "Username: ";

/// User-facing options
#[derive(Debug, Clone, PartialEq)]
pub struct Options {
    /// Window size in pixels
    pub resolution: IVec2,
    /// Fullscreen mode
    pub fullscreen: bool,
    /// Master volume in `[0, 1]`
    pub volume: f32,
    /// Player name
    pub username: String,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            resolution: IVec2::new(800, 600),
            fullscreen: false,
            volume: 1.0,
            username: String::new(),
        }
    }
}

impl Options {
    /// Parse options text on top of the defaults
    pub fn parse(text: &str) -> Self {
        let mut options = Self::default();
        options.apply(text);
        options
    }

    /// Overwrite every setting present in `text`
    pub fn apply(&mut self, text: &str) {
        for line in text.lines() {
            let line = line.trim_end_matches('\r');
            if let Some(value) = line.strip_prefix(RESOLUTION) {
                match parse_resolution(value) {
                    Some(resolution) => self.resolution = resolution,
                    None => log::warn!("Ignoring malformed resolution \"{}\"", value),
                }
            } else if let Some(value) = line.strip_prefix(FULLSCREEN) {
                match value.trim().parse::<i32>() {
                    Ok(flag) => self.fullscreen = flag != 0,
                    Err(_) => log::warn!("Ignoring malformed fullscreen flag \"{}\"", value),
                }
            } else if let Some(value) = line.strip_prefix(VOLUME) {
                match value.trim().parse::<f32>() {
                    Ok(volume) if volume.is_finite() => self.volume = volume.clamp(0.0, 1.0),
                    _ => log::warn!("Ignoring malformed volume \"{}\"", value),
                }
            } else if let Some(value) = line.strip_prefix(USERNAME) {
                self.username = value.to_string();
            }
        }
        log::debug!("Options now {:?}", self);
    }

    /// Render the options file text
    pub fn to_text(&self) -> String {
        let mut text = String::new();
        let _ = writeln!(text, "{RESOLUTION}{}x{}", self.resolution.x, self.resolution.y);
        let _ = writeln!(text, "{FULLSCREEN}{}", u8::from(self.fullscreen));
        let _ = writeln!(text, "{VOLUME}{}", self.volume);
        let _ = writeln!(text, "{USERNAME}{}", self.username);
        text
    }

    /// Read an options file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path.as_ref())?;
        log::info!("Read options file {:?}", path.as_ref());
        Ok(Self::parse(&text))
    }

    /// Write an options file
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<(), ConfigError> {
        std::fs::write(path.as_ref(), self.to_text())?;
        log::info!("Wrote options file {:?}", path.as_ref());
        Ok(())
    }

    /// Resolution formatted the way the options file stores it
    pub fn resolution_text(&self) -> String {
        format!("{}x{}", self.resolution.x, self.resolution.y)
    }
}

/// Parse a `WxH` string
pub fn parse_resolution(text: &str) -> Option<IVec2> {
    let (w, h) = text.trim().split_once('x')?;
    Some(IVec2::new(w.trim().parse().ok()?, h.trim().parse().ok()?))
}
