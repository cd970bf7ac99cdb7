//! Biome identifiers and the immutable profile records they resolve to.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::particles::ParticleKind;
use crate::surface::SurfaceKind;

// ---------------------------------------------------------------------------
// BiomeId
// ---------------------------------------------------------------------------

/// Biome identifier. The eight builtin themes plus runtime-registered ones.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BiomeId {
    /// Dark caves, standard conditions.
    Cavern,
    /// Dim underground chambers.
    Underground,
    /// Frozen caves with ice platforms.
    Arctic,
    /// Volcanic caves.
    Lava,
    /// Mushroom forest.
    Forest,
    /// Crystalline caves.
    Crystal,
    /// Polluted caves.
    Toxic,
    /// Slime-covered caverns.
    Slime,
    /// A biome registered at runtime.
    Custom(String),
}

impl BiomeId {
    /// The builtin biomes in registration order.
    pub const BUILTIN: [BiomeId; 8] = [
        BiomeId::Cavern,
        BiomeId::Underground,
        BiomeId::Arctic,
        BiomeId::Lava,
        BiomeId::Forest,
        BiomeId::Crystal,
        BiomeId::Toxic,
        BiomeId::Slime,
    ];

    /// Lowercase name, e.g. `"arctic"`.
    pub fn as_str(&self) -> &str {
        match self {
            Self::Cavern => "cavern",
            Self::Underground => "underground",
            Self::Arctic => "arctic",
            Self::Lava => "lava",
            Self::Forest => "forest",
            Self::Crystal => "crystal",
            Self::Toxic => "toxic",
            Self::Slime => "slime",
            Self::Custom(name) => name,
        }
    }

    /// Parses a lowercase name. Names that are not builtin become [`BiomeId::Custom`].
    pub fn from_name(name: &str) -> Self {
        Self::BUILTIN
            .into_iter()
            .find(|id| id.as_str() == name)
            .unwrap_or_else(|| Self::Custom(name.to_string()))
    }
}

impl fmt::Display for BiomeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// Color
// ---------------------------------------------------------------------------

/// 24-bit RGB color, `0xRRGGBB`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Color(pub u32);

impl Color {
    /// `#000000`.
    pub const BLACK: Color = Color(0x000000);
    /// `#ffffff`.
    pub const WHITE: Color = Color(0xffffff);

    /// Red, green and blue channels.
    pub fn rgb(self) -> (u8, u8, u8) {
        (
            ((self.0 >> 16) & 0xff) as u8,
            ((self.0 >> 8) & 0xff) as u8,
            (self.0 & 0xff) as u8,
        )
    }

    /// Parses `#rrggbb` or `rrggbb`.
    pub fn from_hex(s: &str) -> Option<Self> {
        let digits = s.strip_prefix('#').unwrap_or(s);
        if digits.len() != 6 {
            return None;
        }
        u32::from_str_radix(digits, 16).ok().map(Color)
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:06x}", self.0 & 0xffffff)
    }
}

// ---------------------------------------------------------------------------
// Profile parts
// ---------------------------------------------------------------------------

/// Multipliers applied to the base movement rules. 1.0 is normal.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PhysicsModifiers {
    /// Surface friction multiplier.
    pub friction: f32,
    /// Gravity multiplier.
    pub gravity: f32,
    /// Air drain multiplier.
    pub air_depletion_rate: f32,
    /// Player speed multiplier.
    pub player_speed_multiplier: f32,
}

impl Default for PhysicsModifiers {
    fn default() -> Self {
        Self {
            friction: 1.0,
            gravity: 1.0,
            air_depletion_rate: 1.0,
            player_speed_multiplier: 1.0,
        }
    }
}

impl PhysicsModifiers {
    /// World gravity for this biome.
    pub fn scaled_gravity(&self, base: f32) -> f32 {
        base * self.gravity
    }

    /// Player speed for this biome.
    pub fn scaled_speed(&self, base: f32) -> f32 {
        base * self.player_speed_multiplier
    }

    /// Air drained per step for this biome.
    pub fn scaled_air_drain(&self, base: f32) -> f32 {
        base * self.air_depletion_rate
    }
}

/// Full-screen translucent overlay.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Fog {
    /// Overlay color.
    pub color: Color,
    /// Overlay opacity, 0-1.
    pub opacity: f32,
}

/// Presentation hints for the renderer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct VisualHints {
    /// Camera clear color.
    pub background: Color,
    /// Surface of the level's platform bricks.
    pub brick_surface: SurfaceKind,
    /// Tint multiplied into platform bricks.
    pub platform_tint: Option<Color>,
    /// Ambient particle emitter.
    pub particles: Option<ParticleKind>,
    /// Particle sprite color.
    pub particle_color: Color,
    /// Fog overlay.
    pub fog: Option<Fog>,
    /// Accent color for the level title and HUD highlights.
    pub ui_accent: Color,
}

impl Default for VisualHints {
    fn default() -> Self {
        Self {
            background: Color::BLACK,
            brick_surface: SurfaceKind::Brick,
            platform_tint: None,
            particles: None,
            particle_color: Color::WHITE,
            fog: None,
            ui_accent: Color::WHITE,
        }
    }
}

/// Ambient audio hints.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AudioHints {
    /// Looping ambient sound key.
    pub ambient_sound: Option<String>,
    /// Ambient volume, 0-1.
    pub ambient_volume: f32,
    /// Biome-specific music track.
    pub music_track: Option<String>,
}

impl Default for AudioHints {
    fn default() -> Self {
        Self {
            ambient_sound: None,
            ambient_volume: 0.3,
            music_track: None,
        }
    }
}

// ---------------------------------------------------------------------------
// BiomeProfile
// ---------------------------------------------------------------------------

/// Everything a biome contributes to a level.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BiomeProfile {
    /// Registry key.
    pub id: BiomeId,
    /// Display name.
    pub name: String,
    /// One-line description.
    #[serde(default)]
    pub description: String,
    /// Renderer hints.
    #[serde(default)]
    pub visuals: VisualHints,
    /// Movement and air multipliers.
    #[serde(default)]
    pub physics: PhysicsModifiers,
    /// Ambient audio.
    #[serde(default)]
    pub audio: AudioHints,
}

impl BiomeProfile {
    /// Profile used for unknown ids: standard cavern conditions, no fog, no
    /// particles.
    pub fn neutral() -> Self {
        Self {
            id: BiomeId::Cavern,
            name: "Cavern".to_string(),
            description: "Dark underground caves with standard conditions".to_string(),
            visuals: VisualHints {
                ui_accent: Color(0xffff00),
                ..VisualHints::default()
            },
            physics: PhysicsModifiers::default(),
            audio: AudioHints {
                ambient_sound: Some("cavern-ambient".to_string()),
                ambient_volume: 0.25,
                music_track: None,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_biome_names_roundtrip() {
        for id in BiomeId::BUILTIN {
            assert_eq!(BiomeId::from_name(id.as_str()), id);
        }
        assert_eq!(
            BiomeId::from_name("swamp"),
            BiomeId::Custom("swamp".to_string())
        );
    }

    #[test]
    fn test_color_hex() {
        assert_eq!(Color::from_hex("#00ffff"), Some(Color(0x00ffff)));
        assert_eq!(Color::from_hex("ff6600"), Some(Color(0xff6600)));
        assert_eq!(Color::from_hex("#fff"), None);
        assert_eq!(Color(0x1a0500).to_string(), "#1a0500");
        assert_eq!(Color(0x88ff00).rgb(), (0x88, 0xff, 0x00));
    }

    #[test]
    fn test_scaled_physics() {
        let physics = PhysicsModifiers {
            gravity: 0.85,
            player_speed_multiplier: 1.1,
            air_depletion_rate: 2.0,
            ..PhysicsModifiers::default()
        };
        assert!((physics.scaled_gravity(600.0) - 510.0).abs() < 1e-3);
        assert!((physics.scaled_speed(200.0) - 220.0).abs() < 1e-3);
        assert_eq!(physics.scaled_air_drain(2.0), 4.0);
    }

    #[test]
    fn test_neutral_profile_has_no_effects() {
        let neutral = BiomeProfile::neutral();
        assert_eq!(neutral.physics, PhysicsModifiers::default());
        assert!(neutral.visuals.fog.is_none());
        assert!(neutral.visuals.particles.is_none());
    }

    #[test]
    fn test_partial_profile_from_ron() {
        let profile: BiomeProfile =
            ron::from_str(r#"(id: Custom("swamp"), name: "Swamp", physics: (friction: 0.6))"#)
                .unwrap();
        assert_eq!(profile.physics.friction, 0.6);
        assert_eq!(profile.physics.gravity, 1.0);
        assert_eq!(profile.visuals.background, Color::BLACK);
    }
}
