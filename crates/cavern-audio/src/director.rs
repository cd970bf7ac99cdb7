//! Music/ambient arbitration with a persisted music preference.

use cavern_config::AudioConfig;
use cavern_storage::Storage;
use tracing::{info, warn};

use crate::AudioSink;

/// Storage key of the persisted "music enabled" flag.
pub const MUSIC_ENABLED_KEY: &str = "music_enabled";

#[derive(Debug, Clone)]
struct AmbientTrack {
    key: String,
    volume: f32,
    playing: bool,
    started: bool,
}

/// Owns the audio sink and enforces that exactly one of level music or biome
/// ambience is active.
pub struct AudioDirector {
    sink: Box<dyn AudioSink>,
    storage: Box<dyn Storage>,
    volumes: AudioConfig,
    music_enabled: bool,
    music: Option<String>,
    music_playing: bool,
    ambient: Option<AmbientTrack>,
}

impl AudioDirector {
    /// Creates a director, reading the music preference from `storage`.
    ///
    /// A missing or unreadable preference defaults to music enabled.
    pub fn new(sink: Box<dyn AudioSink>, storage: Box<dyn Storage>, volumes: AudioConfig) -> Self {
        let music_enabled = match storage.read(MUSIC_ENABLED_KEY) {
            Ok(Some(value)) => value.trim() != "false",
            Ok(None) => true,
            Err(e) => {
                warn!("Could not read music preference: {e}; defaulting to enabled");
                true
            }
        };
        Self {
            sink,
            storage,
            volumes,
            music_enabled,
            music: None,
            music_playing: false,
            ambient: None,
        }
    }

    /// Whether level music is the active audio mode.
    pub fn music_enabled(&self) -> bool {
        self.music_enabled
    }

    /// Ambient sound plays only while music is disabled.
    pub fn should_play_ambient(&self) -> bool {
        !self.music_enabled
    }

    /// Currently selected music track, audible or not.
    pub fn music_track(&self) -> Option<&str> {
        self.music.as_deref()
    }

    /// Whether the music track is audible right now.
    pub fn is_music_playing(&self) -> bool {
        self.music_playing
    }

    /// Currently loaded ambient sound key.
    pub fn ambient_key(&self) -> Option<&str> {
        self.ambient.as_ref().map(|a| a.key.as_str())
    }

    /// Whether the ambient sound is audible right now.
    pub fn is_ambient_playing(&self) -> bool {
        self.ambient.as_ref().is_some_and(|a| a.playing)
    }

    /// Play a one-shot effect scaled by the sfx and master volumes.
    pub fn play_effect(&mut self, key: &str, volume: f32) {
        let volume = (volume * self.volumes.sfx_volume * self.volumes.master_volume).clamp(0.0, 1.0);
        self.sink.play(key, volume, false);
    }

    /// Select `key` as the level music and start it if music is enabled.
    pub fn start_music(&mut self, key: &str) {
        self.stop_music();
        self.music = Some(key.to_string());
        if self.music_enabled {
            let volume = self.volumes.music_volume * self.volumes.master_volume;
            self.sink.play(key, volume, true);
            self.music_playing = true;
        }
    }

    /// Stop the level music if it is playing.
    pub fn stop_music(&mut self) {
        if let Some(key) = &self.music
            && self.music_playing
        {
            self.sink.stop(key);
        }
        self.music_playing = false;
    }

    /// Load `key` as the ambient loop, replacing any previous one. It starts
    /// immediately only when music is disabled.
    pub fn start_ambient(&mut self, key: &str, volume: f32) {
        self.stop_ambient();
        let mut track = AmbientTrack {
            key: key.to_string(),
            volume,
            playing: false,
            started: false,
        };
        if self.should_play_ambient() {
            self.sink
                .play(key, volume * self.volumes.master_volume, true);
            track.playing = true;
            track.started = true;
            info!("Playing ambient sound: {key}");
        } else {
            info!("Ambient sound '{key}' loaded but music is playing");
        }
        self.ambient = Some(track);
    }

    /// Stop and forget the ambient loop.
    pub fn stop_ambient(&mut self) {
        if let Some(track) = self.ambient.take()
            && track.started
        {
            self.sink.stop(&track.key);
        }
    }

    /// Switch audio mode and persist the choice. Storage failures are logged
    /// and the in-memory mode still changes.
    pub fn set_music_enabled(&mut self, enabled: bool) {
        self.music_enabled = enabled;
        if let Err(e) = self
            .storage
            .write(MUSIC_ENABLED_KEY, if enabled { "true" } else { "false" })
        {
            warn!("Failed to persist music preference: {e}");
        }

        if enabled {
            if let Some(track) = self.ambient.as_mut()
                && track.playing
            {
                self.sink.pause(&track.key);
                track.playing = false;
            }
            if let Some(key) = self.music.clone()
                && !self.music_playing
            {
                let volume = self.volumes.music_volume * self.volumes.master_volume;
                self.sink.play(&key, volume, true);
                self.music_playing = true;
            }
        } else {
            self.stop_music();
            let master = self.volumes.master_volume;
            if let Some(track) = self.ambient.as_mut()
                && !track.playing
            {
                if track.started {
                    self.sink.resume(&track.key);
                } else {
                    self.sink.play(&track.key, track.volume * master, true);
                    track.started = true;
                }
                track.playing = true;
            }
        }
    }

    /// Flip the audio mode. Returns the new music-enabled state.
    pub fn toggle_music(&mut self) -> bool {
        let enabled = !self.music_enabled;
        self.set_music_enabled(enabled);
        enabled
    }
}
