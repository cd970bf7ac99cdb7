//! Level/biome precedence resolution and platform expansion.
//!
//! Each resolver checks three tiers in order: the level's legacy override,
//! then the level's biome, then a fixed default.

use cavern_biome::{BiomeId, BiomeProfile, BiomeRegistry, Color, SurfaceKind};
use glam::Vec2;
use tracing::warn;

use crate::definition::LevelDefinition;

/// One brick produced by [`materialize_platforms`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BrickPlacement {
    /// Brick center.
    pub position: Vec2,
    /// Surface the brick is drawn and collided as.
    pub surface: SurfaceKind,
    /// Tint, if any.
    pub tint: Option<Color>,
}

fn declared_biome<'a>(
    level: &LevelDefinition,
    registry: &'a BiomeRegistry,
) -> Option<&'a BiomeProfile> {
    level.biome.as_ref().map(|id| registry.resolve(id))
}

/// Brick surface: legacy override, then biome, then plain brick.
pub fn effective_brick_surface(level: &LevelDefinition, registry: &BiomeRegistry) -> SurfaceKind {
    level
        .legacy
        .brick_surface
        .or_else(|| declared_biome(level, registry).map(|b| b.visuals.brick_surface))
        .unwrap_or(SurfaceKind::Brick)
}

/// Brick texture key; `"brick"` when nothing is declared.
pub fn effective_brick_texture(level: &LevelDefinition, registry: &BiomeRegistry) -> &'static str {
    effective_brick_surface(level, registry).texture_key()
}

/// Background: legacy override (an explicit `0` counts), then biome, then black.
pub fn effective_background_color(level: &LevelDefinition, registry: &BiomeRegistry) -> Color {
    level
        .legacy
        .background
        .or_else(|| declared_biome(level, registry).map(|b| b.visuals.background))
        .unwrap_or(Color::BLACK)
}

/// Platform tint: legacy tint, then biome tint, else untinted.
pub fn effective_platform_tint(level: &LevelDefinition, registry: &BiomeRegistry) -> Option<Color> {
    level
        .legacy
        .platform_tint
        .or_else(|| declared_biome(level, registry).and_then(|b| b.visuals.platform_tint))
}

/// Biome profile the level plays under. Levels without a biome play as Cavern.
pub fn biome_for_level<'a>(level: &LevelDefinition, registry: &'a BiomeRegistry) -> &'a BiomeProfile {
    registry.resolve(level.biome.as_ref().unwrap_or(&BiomeId::Cavern))
}

/// Narrowest brick span accepted by [`materialize_platforms`].
pub const MIN_BRICK_SPAN: f32 = 1.0;

/// Bricks placed for a single segment at most.
pub const MAX_BRICKS_PER_SEGMENT: usize = 4096;

/// Expand every platform segment into bricks spaced `brick_span` apart,
/// centered at `x + brick_span / 2`. Spans below [`MIN_BRICK_SPAN`] place
/// nothing.
pub fn materialize_platforms(
    level: &LevelDefinition,
    registry: &BiomeRegistry,
    brick_span: f32,
) -> Vec<BrickPlacement> {
    if !brick_span.is_finite() || brick_span < MIN_BRICK_SPAN {
        warn!("Invalid brick span {brick_span}, no bricks placed");
        return Vec::new();
    }
    let surface = effective_brick_surface(level, registry);
    let tint = effective_platform_tint(level, registry);
    let half = brick_span / 2.0;

    let mut bricks = Vec::new();
    for segment in &level.platforms {
        let width = if segment.width.is_finite() { segment.width } else { 0.0 };
        // saturating cast, negative widths place nothing
        let mut count = (width / brick_span).ceil() as usize;
        if count > MAX_BRICKS_PER_SEGMENT {
            warn!("Platform at x={} needs {count} bricks, capped", segment.x);
            count = MAX_BRICKS_PER_SEGMENT;
        }
        bricks.extend((0..count).map(|i| BrickPlacement {
            position: Vec2::new(segment.x + i as f32 * brick_span + half, segment.y),
            surface,
            tint,
        }));
    }
    bricks
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::definition::{EnemyKind, EnemyPlacement, LegacyOverrides, PlatformSegment};
    use crate::LevelCatalog;

    fn level(biome: Option<BiomeId>, legacy: LegacyOverrides) -> LevelDefinition {
        LevelDefinition {
            name: "Sample".to_string(),
            biome,
            platforms: vec![
                PlatformSegment {
                    x: 0.0,
                    y: 584.0,
                    width: 96.0,
                },
                PlatformSegment {
                    x: 200.0,
                    y: 400.0,
                    width: 40.0,
                },
            ],
            collectibles: vec![Vec2::new(10.0, 10.0)],
            air_capsules: vec![],
            enemies: vec![EnemyPlacement {
                position: Vec2::new(20.0, 20.0),
                kind: EnemyKind::EnemyOne,
                velocity: 50.0,
                tint: None,
            }],
            player_start: Vec2::ZERO,
            exit: Vec2::new(90.0, 550.0),
            legacy,
        }
    }

    #[test]
    fn test_brick_texture_precedence() {
        let registry = BiomeRegistry::builtin();
        let plain = level(None, LegacyOverrides::default());
        assert_eq!(effective_brick_texture(&plain, &registry), "brick");

        let arctic = level(Some(BiomeId::Arctic), LegacyOverrides::default());
        assert_eq!(effective_brick_texture(&arctic, &registry), "brick-ice");

        let overridden = level(
            Some(BiomeId::Arctic),
            LegacyOverrides {
                brick_surface: Some(SurfaceKind::Lava),
                ..Default::default()
            },
        );
        assert_eq!(effective_brick_texture(&overridden, &registry), "brick-lava");
    }

    #[test]
    fn test_zero_background_is_a_set_value() {
        let registry = BiomeRegistry::builtin();
        let lava = level(
            Some(BiomeId::Lava),
            LegacyOverrides {
                background: Some(Color(0)),
                ..Default::default()
            },
        );
        assert_eq!(effective_background_color(&lava, &registry), Color(0));
        assert_ne!(
            registry.resolve(&BiomeId::Lava).visuals.background,
            Color(0)
        );
    }

    #[test]
    fn test_background_falls_through_tiers() {
        let registry = BiomeRegistry::builtin();
        let lava = level(Some(BiomeId::Lava), LegacyOverrides::default());
        assert_eq!(effective_background_color(&lava, &registry), Color(0x1a0500));
        let plain = level(None, LegacyOverrides::default());
        assert_eq!(effective_background_color(&plain, &registry), Color::BLACK);
    }

    #[test]
    fn test_tint_precedence() {
        let registry = BiomeRegistry::builtin();
        let toxic = level(Some(BiomeId::Toxic), LegacyOverrides::default());
        assert_eq!(effective_platform_tint(&toxic, &registry), Some(Color(0x88ff00)));

        let legacy = level(
            Some(BiomeId::Toxic),
            LegacyOverrides {
                platform_tint: Some(Color(0x4db8ff)),
                ..Default::default()
            },
        );
        assert_eq!(effective_platform_tint(&legacy, &registry), Some(Color(0x4db8ff)));

        let arctic = level(Some(BiomeId::Arctic), LegacyOverrides::default());
        assert_eq!(effective_platform_tint(&arctic, &registry), None);
    }

    #[test]
    fn test_materialize_spacing_and_centers() {
        let registry = BiomeRegistry::builtin();
        let sample = level(Some(BiomeId::Slime), LegacyOverrides::default());
        let bricks = materialize_platforms(&sample, &registry, 32.0);
        // 96px -> 3 bricks, 40px -> 2 bricks
        assert_eq!(bricks.len(), 5);
        assert_eq!(bricks[0].position, Vec2::new(16.0, 584.0));
        assert_eq!(bricks[2].position, Vec2::new(80.0, 584.0));
        assert_eq!(bricks[3].position, Vec2::new(216.0, 400.0));
        assert_eq!(bricks[4].position, Vec2::new(248.0, 400.0));
        assert!(bricks.iter().all(|b| b.surface == SurfaceKind::Slime));
        assert!(bricks.iter().all(|b| b.tint == Some(Color(0x44dd66))));
    }

    #[test]
    fn test_materialize_is_idempotent() {
        let registry = BiomeRegistry::builtin();
        let catalog = LevelCatalog::builtin();
        for level in catalog.all() {
            let first = materialize_platforms(level, &registry, 32.0);
            assert!(!first.is_empty());
            assert_eq!(first, materialize_platforms(level, &registry, 32.0));
        }
    }

    #[test]
    fn test_materialize_rejects_bad_span() {
        let registry = BiomeRegistry::builtin();
        let sample = level(None, LegacyOverrides::default());
        assert!(materialize_platforms(&sample, &registry, 0.0).is_empty());
        assert!(materialize_platforms(&sample, &registry, 1.0e-6).is_empty());
        assert!(materialize_platforms(&sample, &registry, f32::INFINITY).is_empty());
        assert!(materialize_platforms(&sample, &registry, f32::NAN).is_empty());
    }

    #[test]
    fn test_materialize_narrowest_span() {
        let registry = BiomeRegistry::builtin();
        let sample = level(None, LegacyOverrides::default());
        let bricks = materialize_platforms(&sample, &registry, MIN_BRICK_SPAN);
        assert_eq!(bricks.len(), 136);
        assert_eq!(bricks[95].position, Vec2::new(95.5, 584.0));
        assert_eq!(bricks[96].position, Vec2::new(200.5, 400.0));
    }

    #[test]
    fn test_materialize_caps_wide_segment() {
        let registry = BiomeRegistry::builtin();
        let mut wide = level(None, LegacyOverrides::default());
        wide.platforms.truncate(1);
        wide.platforms[0].width = 1.0e30;
        let bricks = materialize_platforms(&wide, &registry, 32.0);
        assert_eq!(bricks.len(), MAX_BRICKS_PER_SEGMENT);
    }

    #[test]
    fn test_missing_biome_plays_as_cavern() {
        let registry = BiomeRegistry::builtin();
        let plain = level(None, LegacyOverrides::default());
        assert_eq!(biome_for_level(&plain, &registry).id, BiomeId::Cavern);
        let forest = level(Some(BiomeId::Forest), LegacyOverrides::default());
        assert_eq!(biome_for_level(&forest, &registry).physics.gravity, 0.9);
    }
}
