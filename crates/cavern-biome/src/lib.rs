//! Biome rule engine: environmental themes, their physics modifiers and the
//! presentation effects they spawn.
//!
//! [`BiomeRegistry`] is the lookup table. [`BiomeStage`] owns a registry and
//! the [`EffectsBackend`] collaborator and tracks which biome is active.

mod particles;
mod profile;
mod registry;
mod stage;
mod surface;

pub use particles::{EmitterTuning, ParticleKind, Span};
pub use profile::{AudioHints, BiomeId, BiomeProfile, Color, Fog, PhysicsModifiers, VisualHints};
pub use registry::{BiomeError, BiomeManifest, BiomeRegistry};
pub use stage::{BiomeStage, EffectHandle, EffectsBackend, HeadlessEffects};
pub use surface::{SLIPPERY_THRESHOLD, SurfaceKind, friction_for_surface_key};
