//! Level data model: immutable level definitions, the ordered catalog, and
//! resolvers that combine a level with its biome.

mod builtin;
mod catalog;
mod definition;
mod resolve;

pub use catalog::{LevelCatalog, LevelError, LevelManifest};
pub use definition::{
    EnemyKind, EnemyPlacement, LegacyOverrides, LevelDefinition, PlatformSegment,
};
pub use resolve::{
    BrickPlacement, MAX_BRICKS_PER_SEGMENT, MIN_BRICK_SPAN, biome_for_level,
    effective_background_color, effective_brick_surface, effective_brick_texture,
    effective_platform_tint, materialize_platforms,
};
