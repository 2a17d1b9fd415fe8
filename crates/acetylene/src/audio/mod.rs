//! Sound effects and background music
//!
//! [`AudioManager`] is a fire-and-forget front end over an [`AudioBackend`].
//! Effect files are read once and kept in memory; at most one music track
//! plays at a time and loops until stopped.

#[cfg(feature = "audio")]
pub mod rodio_backend;

#[cfg(feature = "audio")]
pub use rodio_backend::RodioBackend;

use std::collections::HashMap;
use thiserror::Error;

/// Audio errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AudioError {
    /// The output device could not be opened
    #[error("Audio backend initialization failed: {0}")]
    BackendInitFailed(String),

    /// Playback requested before `initialize`
    #[error("Audio backend not initialized")]
    BackendNotInitialized,

    /// Decoding or sink creation failed
    #[error("Playback failed: {0}")]
    PlaybackFailed(String),

    /// The handle does not name a live sound
    #[error("Invalid sound handle")]
    InvalidHandle,

    /// Reading an audio file failed
    #[error("Failed to load audio file {0}")]
    LoadFailed(String),
}

/// Sound handle for tracking active sounds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SoundHandle(pub u32);

/// Audio backend trait for platform abstraction
///
/// Single-threaded: the manager drives the backend from the loop thread.
pub trait AudioBackend {
    /// Open the output device
    fn initialize(&mut self) -> Result<(), AudioError>;

    /// Stop everything and close the device
    fn shutdown(&mut self);

    /// Check if backend is initialized
    fn is_initialized(&self) -> bool;

    /// Drop finished sounds
    fn update(&mut self);

    /// Stop all playing sounds
    fn stop_all(&mut self);

    /// Play an encoded sound (WAV, OGG, ...) from memory
    ///
    /// # Arguments
    /// * `data` - Encoded file bytes
    /// * `looping` - Restart from the beginning when the sound ends
    fn play(&mut self, data: &[u8], looping: bool) -> Result<SoundHandle, AudioError>;

    /// Pause a playing sound
    fn pause(&mut self, handle: SoundHandle) -> Result<(), AudioError>;

    /// Resume a paused sound
    fn resume(&mut self, handle: SoundHandle) -> Result<(), AudioError>;

    /// Stop a sound; stopping an unknown handle is not an error
    fn stop(&mut self, handle: SoundHandle);

    /// Check if a sound is paused
    fn is_paused(&self, handle: SoundHandle) -> bool;

    /// Volume applied to every current and future sound, in [0, 1]
    fn set_master_volume(&mut self, volume: f32);
}

/// Backend that accepts every request and produces no sound.
///
/// Used when no output device is wanted (tests, headless runs) and as the
/// fallback when the real device cannot be opened.
#[derive(Debug, Default)]
pub struct SilentBackend {
    initialized: bool,
    sounds: HashMap<SoundHandle, bool>,
    next_id: u32,
    plays: usize,
    master_volume: f32,
}

impl SilentBackend {
    /// Create a new silent backend
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of `play` calls accepted so far
    pub fn plays(&self) -> usize {
        self.plays
    }

    /// Sounds not yet stopped
    pub fn live_sounds(&self) -> usize {
        self.sounds.len()
    }

    /// Last master volume set
    pub fn master_volume(&self) -> f32 {
        self.master_volume
    }
}

impl AudioBackend for SilentBackend {
    fn initialize(&mut self) -> Result<(), AudioError> {
        self.initialized = true;
        log::info!("Silent audio backend initialized");
        Ok(())
    }

    fn shutdown(&mut self) {
        self.stop_all();
        self.initialized = false;
    }

    fn is_initialized(&self) -> bool {
        self.initialized
    }

    fn update(&mut self) {}

    fn stop_all(&mut self) {
        self.sounds.clear();
    }

    fn play(&mut self, _data: &[u8], _looping: bool) -> Result<SoundHandle, AudioError> {
        if !self.initialized {
            return Err(AudioError::BackendNotInitialized);
        }
        self.next_id += 1;
        let handle = SoundHandle(self.next_id);
        self.sounds.insert(handle, false);
        self.plays += 1;
        Ok(handle)
    }

    fn pause(&mut self, handle: SoundHandle) -> Result<(), AudioError> {
        let paused = self.sounds.get_mut(&handle).ok_or(AudioError::InvalidHandle)?;
        *paused = true;
        Ok(())
    }

    fn resume(&mut self, handle: SoundHandle) -> Result<(), AudioError> {
        let paused = self.sounds.get_mut(&handle).ok_or(AudioError::InvalidHandle)?;
        *paused = false;
        Ok(())
    }

    fn stop(&mut self, handle: SoundHandle) {
        self.sounds.remove(&handle);
    }

    fn is_paused(&self, handle: SoundHandle) -> bool {
        self.sounds.get(&handle).copied().unwrap_or(false)
    }

    fn set_master_volume(&mut self, volume: f32) {
        self.master_volume = volume;
    }
}

/// Effect and music playback
pub struct AudioManager {
    backend: Box<dyn AudioBackend>,
    effects: HashMap<String, Vec<u8>>,
    music: Option<SoundHandle>,
    music_paused: bool,
    volume: f32,
}

impl AudioManager {
    /// Open the backend and apply the initial volume
    pub fn new(mut backend: Box<dyn AudioBackend>, volume: f32) -> Result<Self, AudioError> {
        backend.initialize()?;
        let mut manager = Self {
            backend,
            effects: HashMap::new(),
            music: None,
            music_paused: false,
            volume: 1.0,
        };
        manager.set_volume(volume);
        Ok(manager)
    }

    /// Play a sound effect once. `false` if the file cannot be loaded or played.
    pub fn play_effect(&mut self, file_name: &str) -> bool {
        if !self.load(file_name) {
            return false;
        }
        let Some(data) = self.effects.get(file_name) else {
            return false;
        };
        match self.backend.play(data, false) {
            Ok(_) => true,
            Err(e) => {
                log::warn!("Failed to play audio file \"{}\": {}", file_name, e);
                false
            }
        }
    }

    /// Start a looping music track, replacing the current one.
    ///
    /// An empty `file_name` resumes the paused track instead and returns
    /// `false` if there is no paused track.
    pub fn play_music(&mut self, file_name: &str) -> bool {
        if file_name.is_empty() {
            let Some(music) = self.music else {
                return false;
            };
            if !self.music_paused {
                return false;
            }
            if let Err(e) = self.backend.resume(music) {
                log::warn!("Failed to resume music: {}", e);
                return false;
            }
            log::info!("Resumed music track");
        } else {
            if !self.load(file_name) {
                return false;
            }
            self.stop_music();
            let Some(data) = self.effects.get(file_name) else {
                return false;
            };
            match self.backend.play(data, true) {
                Ok(handle) => self.music = Some(handle),
                Err(e) => {
                    log::warn!("Failed to play music \"{}\": {}", file_name, e);
                    return false;
                }
            }
            log::info!("Playing music track \"{}\"", file_name);
        }
        self.music_paused = false;
        true
    }

    /// Pause the music track. `false` if nothing is playing.
    pub fn pause_music(&mut self) -> bool {
        let Some(music) = self.music else {
            return false;
        };
        if self.music_paused || self.backend.pause(music).is_err() {
            return false;
        }
        self.music_paused = true;
        log::info!("Paused music track");
        true
    }

    /// Music is paused
    pub fn is_music_paused(&self) -> bool {
        self.music_paused
    }

    /// A music track is loaded, paused or not
    pub fn has_music(&self) -> bool {
        self.music.is_some()
    }

    /// Stop the music track
    pub fn stop_music(&mut self) {
        if let Some(music) = self.music.take() {
            self.backend.stop(music);
            log::info!("Stopped music track");
        }
        self.music_paused = false;
    }

    /// Master volume in [0, 1]
    pub fn volume(&self) -> f32 {
        self.volume
    }

    /// Set the master volume, clamped to [0, 1]
    pub fn set_volume(&mut self, volume: f32) {
        self.volume = volume.clamp(0.0, 1.0);
        self.backend.set_master_volume(self.volume);
    }

    /// Drop finished effects
    pub fn update(&mut self) {
        self.backend.update();
    }

    /// Stop everything and close the device
    pub fn destroy(&mut self) {
        self.backend.stop_all();
        self.effects.clear();
        self.music = None;
        self.music_paused = false;
        self.backend.shutdown();
        log::info!("Destroyed audio manager");
    }

    fn load(&mut self, file_name: &str) -> bool {
        if self.effects.contains_key(file_name) {
            return true;
        }
        log::info!("Loading sound effect \"{}\"", file_name);
        match std::fs::read(file_name) {
            Ok(data) => {
                self.effects.insert(file_name.to_string(), data);
                true
            }
            Err(e) => {
                log::warn!("Failed to load audio file \"{}\": {}", file_name, e);
                false
            }
        }
    }
}
