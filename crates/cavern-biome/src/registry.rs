//! Biome registry: lookup of [`BiomeProfile`]s by [`BiomeId`] with a neutral
//! fallback.

use std::collections::HashMap;
use std::path::Path;

use serde::Deserialize;
use thiserror::Error;
use tracing::{info, warn};

use crate::particles::ParticleKind;
use crate::profile::{AudioHints, BiomeId, BiomeProfile, Color, Fog, PhysicsModifiers, VisualHints};
use crate::surface::{self, SurfaceKind};

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

/// Errors returned when loading a biome manifest.
#[derive(Debug, Error)]
pub enum BiomeError {
    /// I/O error reading the manifest file.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// RON deserialization error.
    #[error("ron parse error: {0}")]
    Ron(#[from] ron::error::SpannedError),
}

/// RON manifest of additional or replacement biomes.
#[derive(Debug, Deserialize)]
pub struct BiomeManifest {
    /// Profiles to register, in order.
    pub biomes: Vec<BiomeProfile>,
}

// ---------------------------------------------------------------------------
// BiomeRegistry
// ---------------------------------------------------------------------------

/// Biome lookup table. Unknown ids resolve to [`BiomeProfile::neutral`].
#[derive(Debug, Clone)]
pub struct BiomeRegistry {
    profiles: HashMap<BiomeId, BiomeProfile>,
    /// Registration order for enumeration.
    order: Vec<BiomeId>,
    neutral: BiomeProfile,
}

impl Default for BiomeRegistry {
    fn default() -> Self {
        Self::builtin()
    }
}

impl BiomeRegistry {
    /// Registry with no biomes. Every lookup returns the neutral profile.
    pub fn empty() -> Self {
        Self {
            profiles: HashMap::new(),
            order: Vec::new(),
            neutral: BiomeProfile::neutral(),
        }
    }

    /// Registry holding the eight builtin biomes.
    pub fn builtin() -> Self {
        let mut registry = Self::empty();
        for profile in builtin_profiles() {
            registry.register(profile);
        }
        registry
    }

    /// Registered profile for `id`, or the neutral profile with a warning.
    pub fn resolve(&self, id: &BiomeId) -> &BiomeProfile {
        match self.profiles.get(id) {
            Some(profile) => profile,
            None => {
                warn!("Biome '{id}' not found, using neutral profile");
                &self.neutral
            }
        }
    }

    /// Registered profile for `id`, without fallback.
    pub fn get(&self, id: &BiomeId) -> Option<&BiomeProfile> {
        self.profiles.get(id)
    }

    /// Whether `id` is registered.
    pub fn contains(&self, id: &BiomeId) -> bool {
        self.profiles.contains_key(id)
    }

    /// Insert `profile`, replacing any record with the same id. Values are
    /// not range-checked.
    pub fn register(&mut self, profile: BiomeProfile) {
        if !self.profiles.contains_key(&profile.id) {
            self.order.push(profile.id.clone());
        }
        self.profiles.insert(profile.id.clone(), profile);
    }

    /// Register every profile in a RON manifest. Returns the number registered.
    ///
    /// # Errors
    ///
    /// Returns [`BiomeError::Ron`] if the manifest does not parse. Nothing is
    /// registered in that case.
    pub fn register_from_ron_str(&mut self, ron_str: &str) -> Result<usize, BiomeError> {
        let manifest: BiomeManifest = ron::from_str(ron_str)?;
        let count = manifest.biomes.len();
        for profile in manifest.biomes {
            info!("Registering biome '{}'", profile.id);
            self.register(profile);
        }
        Ok(count)
    }

    /// Register every profile in a RON manifest file.
    ///
    /// # Errors
    ///
    /// Returns [`BiomeError`] on I/O or parse failures.
    pub fn register_from_ron(&mut self, path: &Path) -> Result<usize, BiomeError> {
        let contents = std::fs::read_to_string(path)?;
        self.register_from_ron_str(&contents)
    }

    /// Registered ids in registration order.
    pub fn all_ids(&self) -> Vec<BiomeId> {
        self.order.clone()
    }

    /// Registered profiles in registration order.
    pub fn all_profiles(&self) -> Vec<&BiomeProfile> {
        self.order
            .iter()
            .filter_map(|id| self.profiles.get(id))
            .collect()
    }

    /// Number of registered biomes.
    pub fn len(&self) -> usize {
        self.profiles.len()
    }

    /// Returns `true` if nothing is registered.
    pub fn is_empty(&self) -> bool {
        self.profiles.is_empty()
    }

    /// Friction for a brick texture key. Unknown keys yield 1.0.
    pub fn friction_for_surface_key(key: &str) -> f32 {
        surface::friction_for_surface_key(key)
    }

    /// Whether a brick texture key names a slippery surface.
    pub fn is_slippery_surface(key: &str) -> bool {
        SurfaceKind::from_texture_key(key).is_some_and(SurfaceKind::is_slippery)
    }
}

// ---------------------------------------------------------------------------
// Builtin biomes
// ---------------------------------------------------------------------------

fn ambient(key: &str, volume: f32) -> AudioHints {
    AudioHints {
        ambient_sound: Some(key.to_string()),
        ambient_volume: volume,
        music_track: None,
    }
}

fn physics(friction: f32, gravity: f32, air: f32, speed: f32) -> PhysicsModifiers {
    PhysicsModifiers {
        friction,
        gravity,
        air_depletion_rate: air,
        player_speed_multiplier: speed,
    }
}

fn fog(color: u32, opacity: f32) -> Option<Fog> {
    Some(Fog {
        color: Color(color),
        opacity,
    })
}

fn builtin_profiles() -> Vec<BiomeProfile> {
    vec![
        BiomeProfile::neutral(),
        BiomeProfile {
            id: BiomeId::Underground,
            name: "Underground".to_string(),
            description: "Deep underground chambers with dim lighting".to_string(),
            visuals: VisualHints {
                background: Color(0x0a0a1a),
                brick_surface: SurfaceKind::Brick,
                platform_tint: Some(Color(0x888899)),
                particles: Some(ParticleKind::Drips),
                particle_color: Color(0x4444ff),
                fog: None,
                ui_accent: Color(0xaaaaff),
            },
            physics: PhysicsModifiers::default(),
            audio: ambient("drip-ambient", 0.3),
        },
        BiomeProfile {
            id: BiomeId::Arctic,
            name: "Arctic".to_string(),
            description: "Frozen caves with slippery ice platforms".to_string(),
            visuals: VisualHints {
                background: Color(0x001a4d),
                brick_surface: SurfaceKind::Ice,
                platform_tint: None,
                particles: Some(ParticleKind::Snow),
                particle_color: Color::WHITE,
                fog: fog(0xaaddff, 0.1),
                ui_accent: Color(0x00ffff),
            },
            physics: physics(0.3, 1.0, 1.2, 1.0),
            audio: ambient("wind-ambient", 0.2),
        },
        BiomeProfile {
            id: BiomeId::Lava,
            name: "Lava".to_string(),
            description: "Volcanic caves with intense heat".to_string(),
            visuals: VisualHints {
                background: Color(0x1a0500),
                brick_surface: SurfaceKind::Lava,
                platform_tint: None,
                particles: Some(ParticleKind::Embers),
                particle_color: Color(0xff4400),
                fog: fog(0xff2200, 0.15),
                ui_accent: Color(0xff6600),
            },
            physics: physics(1.2, 1.0, 1.5, 0.9),
            audio: ambient("lava-ambient", 0.4),
        },
        BiomeProfile {
            id: BiomeId::Forest,
            name: "Forest".to_string(),
            description: "Underground mushroom forest with spores".to_string(),
            visuals: VisualHints {
                background: Color(0x0a1a0a),
                brick_surface: SurfaceKind::Moss,
                platform_tint: Some(Color(0x44aa44)),
                particles: Some(ParticleKind::Spores),
                particle_color: Color(0x88ff88),
                fog: None,
                ui_accent: Color(0x44ff44),
            },
            physics: physics(0.8, 0.9, 0.8, 1.0),
            audio: ambient("forest-ambient", 0.3),
        },
        BiomeProfile {
            id: BiomeId::Crystal,
            name: "Crystal".to_string(),
            description: "Crystalline caves with magical properties".to_string(),
            visuals: VisualHints {
                background: Color(0x100020),
                brick_surface: SurfaceKind::Crystal,
                platform_tint: None,
                particles: Some(ParticleKind::Sparkles),
                particle_color: Color(0xff88ff),
                fog: fog(0x8800ff, 0.08),
                ui_accent: Color(0xff88ff),
            },
            physics: physics(1.0, 0.85, 1.0, 1.1),
            audio: ambient("crystal-ambient", 0.25),
        },
        BiomeProfile {
            id: BiomeId::Toxic,
            name: "Toxic".to_string(),
            description: "Polluted caves filled with hazardous waste".to_string(),
            visuals: VisualHints {
                background: Color(0x0a1a00),
                brick_surface: SurfaceKind::Toxic,
                platform_tint: Some(Color(0x88ff00)),
                particles: Some(ParticleKind::Bubbles),
                particle_color: Color(0x00ff00),
                fog: fog(0x44ff00, 0.12),
                ui_accent: Color(0x88ff00),
            },
            physics: physics(0.7, 1.0, 2.0, 0.85),
            audio: ambient("toxic-ambient", 0.35),
        },
        BiomeProfile {
            id: BiomeId::Slime,
            name: "Slime".to_string(),
            description: "Gooey caverns covered in sticky slime".to_string(),
            visuals: VisualHints {
                background: Color(0x0a1a10),
                brick_surface: SurfaceKind::Slime,
                platform_tint: Some(Color(0x44dd66)),
                particles: Some(ParticleKind::Blobs),
                particle_color: Color(0x66ff88),
                fog: fog(0x22aa44, 0.1),
                ui_accent: Color(0x66ff88),
            },
            physics: physics(0.5, 0.9, 1.1, 0.95),
            audio: ambient("slime-ambient", 0.3),
        },
    ]
}
