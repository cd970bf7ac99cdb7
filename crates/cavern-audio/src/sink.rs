//! Audio output collaborators.

use tracing::debug;

/// Fire-and-forget audio output.
///
/// Implementations must treat unknown keys as no-ops; a missing asset never
/// fails the session.
pub trait AudioSink {
    /// Start playing `key` at `volume` (0.0 - 1.0), optionally looping.
    fn play(&mut self, key: &str, volume: f32, looped: bool);
    /// Stop `key` and rewind it.
    fn stop(&mut self, key: &str);
    /// Pause `key`, keeping its position.
    fn pause(&mut self, key: &str);
    /// Resume a paused `key`.
    fn resume(&mut self, key: &str);
}

/// Discards every command.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullSink;

impl AudioSink for NullSink {
    fn play(&mut self, _key: &str, _volume: f32, _looped: bool) {}
    fn stop(&mut self, _key: &str) {}
    fn pause(&mut self, _key: &str) {}
    fn resume(&mut self, _key: &str) {}
}

/// Reports every command as a `debug!` event. Used by headless runs.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingSink;

impl AudioSink for TracingSink {
    fn play(&mut self, key: &str, volume: f32, looped: bool) {
        debug!(key, volume, looped, "audio play");
    }

    fn stop(&mut self, key: &str) {
        debug!(key, "audio stop");
    }

    fn pause(&mut self, key: &str) {
        debug!(key, "audio pause");
    }

    fn resume(&mut self, key: &str) {
        debug!(key, "audio resume");
    }
}
