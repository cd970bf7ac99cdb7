//! Platform surface kinds and their friction coefficients.

use serde::{Deserialize, Serialize};

/// Surfaces with friction strictly below this value are slippery.
pub const SLIPPERY_THRESHOLD: f32 = 0.5;

/// Closed set of platform brick surfaces.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum SurfaceKind {
    /// Plain cavern brick.
    #[default]
    Brick,
    /// Frozen brick.
    Ice,
    /// Volcanic brick, slightly sticky.
    Lava,
    /// Mossy brick.
    Moss,
    /// Crystal brick.
    Crystal,
    /// Sludge-covered brick.
    Toxic,
    /// Slime-covered brick.
    Slime,
}

impl SurfaceKind {
    /// Every surface kind.
    pub const ALL: [SurfaceKind; 7] = [
        Self::Brick,
        Self::Ice,
        Self::Lava,
        Self::Moss,
        Self::Crystal,
        Self::Toxic,
        Self::Slime,
    ];

    /// Texture key the renderer draws this surface with.
    pub fn texture_key(self) -> &'static str {
        match self {
            Self::Brick => "brick",
            Self::Ice => "brick-ice",
            Self::Lava => "brick-lava",
            Self::Moss => "brick-moss",
            Self::Crystal => "brick-crystal",
            Self::Toxic => "brick-toxic",
            Self::Slime => "brick-slime",
        }
    }

    /// Surface drawn with `key`, if any.
    pub fn from_texture_key(key: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.texture_key() == key)
    }

    /// Friction coefficient. 1.0 is normal, lower is slipperier.
    pub fn friction(self) -> f32 {
        match self {
            Self::Brick | Self::Crystal => 1.0,
            Self::Ice => 0.3,
            Self::Lava => 1.2,
            Self::Moss => 0.8,
            Self::Toxic => 0.7,
            Self::Slime => 0.5,
        }
    }

    /// Whether movement on this surface uses the sliding regime.
    pub fn is_slippery(self) -> bool {
        self.friction() < SLIPPERY_THRESHOLD
    }
}

/// Friction for a texture key. Unknown keys are treated as plain brick.
pub fn friction_for_surface_key(key: &str) -> f32 {
    SurfaceKind::from_texture_key(key).map_or(1.0, SurfaceKind::friction)
}
