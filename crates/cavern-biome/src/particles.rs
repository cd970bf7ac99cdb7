//! Ambient particle kinds and their emitter tuning.
//!
//! Coordinates are in an 800x600 play field. Negative vertical speeds move
//! upward.

use serde::{Deserialize, Serialize};

/// Inclusive range sampled per particle.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Span {
    /// Lower bound.
    pub min: f32,
    /// Upper bound.
    pub max: f32,
}

impl Span {
    /// Range from `min` to `max`.
    pub const fn new(min: f32, max: f32) -> Self {
        Self { min, max }
    }

    /// Degenerate range that always yields `value`.
    pub const fn fixed(value: f32) -> Self {
        Self {
            min: value,
            max: value,
        }
    }

    /// Linear interpolation, `t` in `[0, 1]`.
    pub fn lerp(self, t: f32) -> f32 {
        self.min + (self.max - self.min) * t.clamp(0.0, 1.0)
    }
}

/// Emitter settings handed to the effects backend.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EmitterTuning {
    /// Horizontal spawn band.
    pub x: Span,
    /// Vertical spawn band.
    pub y: Span,
    /// Horizontal speed, px/s.
    pub speed_x: Span,
    /// Vertical speed, px/s.
    pub speed_y: Span,
    /// Sprite scale.
    pub scale: Span,
    /// Particle lifetime in milliseconds.
    pub lifespan_ms: u32,
    /// Particles emitted per burst.
    pub quantity: u32,
    /// Milliseconds between bursts.
    pub frequency_ms: u32,
    /// Alpha at spawn.
    pub alpha_start: f32,
    /// Alpha at end of life.
    pub alpha_end: f32,
}

const BASE: EmitterTuning = EmitterTuning {
    x: Span::new(0.0, 800.0),
    y: Span::fixed(0.0),
    speed_x: Span::fixed(0.0),
    speed_y: Span::fixed(0.0),
    scale: Span::fixed(1.0),
    lifespan_ms: 4000,
    quantity: 1,
    frequency_ms: 100,
    alpha_start: 0.8,
    alpha_end: 0.0,
};

/// Kind of ambient particle a biome emits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ParticleKind {
    /// Falling snowflakes.
    Snow,
    /// Rising embers.
    Embers,
    /// Drifting spores.
    Spores,
    /// Rising bubbles.
    Bubbles,
    /// Twinkling sparkles.
    Sparkles,
    /// Falling water drips.
    Drips,
    /// Falling slime blobs.
    Blobs,
}

impl ParticleKind {
    /// Texture key of the particle sprite.
    pub fn texture_key(self) -> &'static str {
        match self {
            Self::Snow => "particle-snow",
            Self::Embers => "particle-embers",
            Self::Spores => "particle-spores",
            Self::Bubbles => "particle-bubbles",
            Self::Sparkles => "particle-sparkles",
            Self::Drips => "particle-drips",
            Self::Blobs => "particle-blobs",
        }
    }

    /// Emitter settings for this kind.
    pub fn tuning(self) -> EmitterTuning {
        match self {
            Self::Snow => EmitterTuning {
                y: Span::fixed(-10.0),
                speed_y: Span::new(20.0, 50.0),
                speed_x: Span::new(-10.0, 10.0),
                scale: Span::new(0.5, 1.5),
                quantity: 2,
                frequency_ms: 80,
                ..BASE
            },
            Self::Embers => EmitterTuning {
                y: Span::fixed(610.0),
                speed_y: Span::new(-80.0, -40.0),
                speed_x: Span::new(-20.0, 20.0),
                scale: Span::new(0.3, 1.0),
                lifespan_ms: 3000,
                frequency_ms: 150,
                ..BASE
            },
            Self::Spores => EmitterTuning {
                y: Span::new(0.0, 600.0),
                speed_y: Span::new(-10.0, 10.0),
                speed_x: Span::new(-15.0, 15.0),
                scale: Span::new(0.5, 2.0),
                lifespan_ms: 6000,
                frequency_ms: 200,
                ..BASE
            },
            Self::Bubbles => EmitterTuning {
                y: Span::fixed(610.0),
                speed_y: Span::new(-60.0, -30.0),
                speed_x: Span::new(-5.0, 5.0),
                scale: Span::new(0.5, 1.5),
                frequency_ms: 200,
                ..BASE
            },
            Self::Sparkles => EmitterTuning {
                y: Span::new(0.0, 600.0),
                speed_y: Span::new(-5.0, 5.0),
                speed_x: Span::new(-5.0, 5.0),
                scale: Span::new(0.3, 1.0),
                lifespan_ms: 1500,
                frequency_ms: 120,
                alpha_start: 1.0,
                ..BASE
            },
            Self::Drips => EmitterTuning {
                y: Span::fixed(-10.0),
                speed_y: Span::new(100.0, 150.0),
                scale: Span::new(0.8, 1.2),
                lifespan_ms: 5000,
                frequency_ms: 300,
                ..BASE
            },
            Self::Blobs => EmitterTuning {
                y: Span::fixed(-10.0),
                speed_y: Span::new(40.0, 80.0),
                speed_x: Span::new(-5.0, 5.0),
                scale: Span::new(0.4, 1.2),
                lifespan_ms: 6000,
                frequency_ms: 250,
                alpha_start: 0.7,
                alpha_end: 0.2,
                ..BASE
            },
        }
    }
}
