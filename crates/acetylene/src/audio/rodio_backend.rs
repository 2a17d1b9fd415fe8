//! Rodio audio backend implementation
//!
//! Every sound gets its own [`Sink`]; finished sinks are dropped in `update`.
//! Rodio decodes WAV, OGG Vorbis, MP3 and FLAC.

use super::{AudioBackend, AudioError, SoundHandle};
use rodio::{Decoder, OutputStream, OutputStreamHandle, Sink};
use std::collections::HashMap;
use std::io::Cursor;

/// Rodio-based audio backend
pub struct RodioBackend {
    /// Audio output stream (must be kept alive)
    _output_stream: Option<OutputStream>,
    /// Output stream handle for creating sinks
    stream_handle: Option<OutputStreamHandle>,
    active_sounds: HashMap<SoundHandle, Sink>,
    next_id: u32,
    master_volume: f32,
}

impl RodioBackend {
    /// Create a new Rodio backend; the device opens in `initialize`
    pub fn new() -> Self {
        Self {
            _output_stream: None,
            stream_handle: None,
            active_sounds: HashMap::new(),
            next_id: 0,
            master_volume: 1.0,
        }
    }

    fn next_handle(&mut self) -> SoundHandle {
        self.next_id = self.next_id.wrapping_add(1);
        SoundHandle(self.next_id)
    }
}

impl Default for RodioBackend {
    fn default() -> Self {
        Self::new()
    }
}

impl AudioBackend for RodioBackend {
    fn initialize(&mut self) -> Result<(), AudioError> {
        let (stream, handle) = OutputStream::try_default()
            .map_err(|e| AudioError::BackendInitFailed(format!("Failed to open output stream: {}", e)))?;
        self._output_stream = Some(stream);
        self.stream_handle = Some(handle);
        log::info!("Rodio audio backend initialized");
        Ok(())
    }

    fn shutdown(&mut self) {
        self.stop_all();
        self.stream_handle = None;
        self._output_stream = None;
        log::info!("Rodio audio backend shut down");
    }

    fn is_initialized(&self) -> bool {
        self.stream_handle.is_some()
    }

    fn update(&mut self) {
        self.active_sounds.retain(|_, sink| !sink.empty());
    }

    fn stop_all(&mut self) {
        for (_, sink) in self.active_sounds.drain() {
            sink.stop();
        }
    }

    fn play(&mut self, data: &[u8], looping: bool) -> Result<SoundHandle, AudioError> {
        let stream_handle = self.stream_handle.as_ref().ok_or(AudioError::BackendNotInitialized)?;

        let sink = Sink::try_new(stream_handle)
            .map_err(|e| AudioError::PlaybackFailed(format!("Failed to create sink: {}", e)))?;

        let cursor = Cursor::new(data.to_vec());
        if looping {
            let source = Decoder::new_looped(cursor)
                .map_err(|e| AudioError::PlaybackFailed(format!("Failed to decode audio: {}", e)))?;
            sink.append(source);
        } else {
            let source = Decoder::new(cursor)
                .map_err(|e| AudioError::PlaybackFailed(format!("Failed to decode audio: {}", e)))?;
            sink.append(source);
        }
        sink.set_volume(self.master_volume);

        let handle = self.next_handle();
        self.active_sounds.insert(handle, sink);
        Ok(handle)
    }

    fn pause(&mut self, handle: SoundHandle) -> Result<(), AudioError> {
        let sink = self.active_sounds.get(&handle).ok_or(AudioError::InvalidHandle)?;
        sink.pause();
        Ok(())
    }

    fn resume(&mut self, handle: SoundHandle) -> Result<(), AudioError> {
        let sink = self.active_sounds.get(&handle).ok_or(AudioError::InvalidHandle)?;
        sink.play();
        Ok(())
    }

    fn stop(&mut self, handle: SoundHandle) {
        if let Some(sink) = self.active_sounds.remove(&handle) {
            sink.stop();
        }
    }

    fn is_paused(&self, handle: SoundHandle) -> bool {
        self.active_sounds.get(&handle).is_some_and(|sink| sink.is_paused())
    }

    fn set_master_volume(&mut self, volume: f32) {
        self.master_volume = volume;
        for sink in self.active_sounds.values() {
            sink.set_volume(volume);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_play_before_initialize_fails() {
        let mut backend = RodioBackend::new();
        assert!(!backend.is_initialized());
        assert_eq!(backend.play(&[], false), Err(AudioError::BackendNotInitialized));
    }

    #[test]
    fn test_unknown_handle() {
        let mut backend = RodioBackend::new();
        assert_eq!(backend.pause(SoundHandle(7)), Err(AudioError::InvalidHandle));
        assert!(!backend.is_paused(SoundHandle(7)));
        backend.stop(SoundHandle(7));
    }
}
