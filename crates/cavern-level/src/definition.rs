//! Level definitions.

use cavern_biome::{BiomeId, Color, SurfaceKind};
use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::catalog::LevelError;

/// Horizontal run of platform bricks starting at `(x, y)`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PlatformSegment {
    /// Left edge.
    pub x: f32,
    /// Vertical position of the brick row.
    pub y: f32,
    /// Length of the run in pixels.
    pub width: f32,
}

/// Enemy behavior and sprite.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EnemyKind {
    /// Animated patroller.
    EnemyOne,
    /// Animated patroller.
    EnemyTwo,
    /// Animated patroller.
    EnemyThree,
    /// Animated patroller.
    EnemyFour,
    /// Static sprite, optionally tinted.
    Basic,
}

impl EnemyKind {
    /// Sprite key.
    pub fn texture_key(self) -> &'static str {
        match self {
            Self::EnemyOne => "enemy-one",
            Self::EnemyTwo => "enemy-two",
            Self::EnemyThree => "enemy-three",
            Self::EnemyFour => "enemy-four",
            Self::Basic => "enemy",
        }
    }

    /// Animated kinds flip to face their direction of travel.
    pub fn is_animated(self) -> bool {
        !matches!(self, Self::Basic)
    }
}

/// One enemy in a level.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EnemyPlacement {
    /// Spawn position.
    pub position: Vec2,
    /// Behavior kind.
    pub kind: EnemyKind,
    /// Initial horizontal velocity, px/s. The sign is the starting direction.
    pub velocity: f32,
    /// Sprite tint.
    #[serde(default)]
    pub tint: Option<Color>,
}

/// Per-level presentation overrides that predate biomes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LegacyOverrides {
    /// Camera clear color. `Some(Color(0))` is an explicit black.
    pub background: Option<Color>,
    /// Platform brick tint.
    pub platform_tint: Option<Color>,
    /// Platform brick surface.
    pub brick_surface: Option<SurfaceKind>,
}

/// Static description of one level's geometry and entity placement.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LevelDefinition {
    /// Display name.
    pub name: String,
    /// Environmental theme.
    #[serde(default)]
    pub biome: Option<BiomeId>,
    /// Platform runs.
    pub platforms: Vec<PlatformSegment>,
    /// Collectible positions.
    pub collectibles: Vec<Vec2>,
    /// Air capsule positions.
    #[serde(default)]
    pub air_capsules: Vec<Vec2>,
    /// Enemy placements.
    pub enemies: Vec<EnemyPlacement>,
    /// Player spawn.
    pub player_start: Vec2,
    /// Exit position, revealed once every collectible is taken.
    pub exit: Vec2,
    /// Presentation overrides.
    #[serde(default)]
    pub legacy: LegacyOverrides,
}

impl LevelDefinition {
    /// Check the structural rules every playable level satisfies.
    ///
    /// # Errors
    ///
    /// Returns the first violated rule as a [`LevelError`].
    pub fn validate(&self) -> Result<(), LevelError> {
        let level = || self.name.clone();

        if self.platforms.is_empty() {
            return Err(LevelError::NoPlatforms(level()));
        }
        if self.collectibles.is_empty() {
            return Err(LevelError::NoCollectibles(level()));
        }
        if self.enemies.is_empty() {
            return Err(LevelError::NoEnemies(level()));
        }
        if let Some(index) = self
            .platforms
            .iter()
            .position(|p| p.width.is_nan() || p.width <= 0.0)
        {
            return Err(LevelError::NonPositiveWidth {
                level: level(),
                index,
            });
        }

        let negative = |p: &Vec2| p.x < 0.0 || p.y < 0.0;
        let checks: [(&'static str, bool); 3] = [
            ("collectible", self.collectibles.iter().any(negative)),
            ("air capsule", self.air_capsules.iter().any(negative)),
            ("enemy", self.enemies.iter().any(|e| negative(&e.position))),
        ];
        if let Some((what, _)) = checks.into_iter().find(|(_, bad)| *bad) {
            return Err(LevelError::NegativeCoordinate {
                level: level(),
                what,
            });
        }
        Ok(())
    }
}
