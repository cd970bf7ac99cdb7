//! Transient per-level entities, rebuilt from the definition on every load.

use cavern_biome::{BiomeRegistry, Color};
use cavern_level::{BrickPlacement, EnemyKind, LevelDefinition, materialize_platforms};
use glam::Vec2;

/// Direction a sprite faces.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Facing {
    /// Flipped.
    Left,
    /// Unflipped.
    #[default]
    Right,
}

/// Player animation clip.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Animation {
    /// Standing still on the ground.
    #[default]
    Idle,
    /// Moving on the ground.
    Walk,
    /// In the air.
    Jump,
}

/// The player avatar.
#[derive(Debug, Clone, PartialEq)]
pub struct Player {
    /// Last position reported by the physics collaborator.
    pub position: Vec2,
    /// Velocity requested for the next physics step. Negative y is up.
    pub velocity: Vec2,
    /// Ground contact reported by the physics collaborator.
    pub grounded: bool,
    /// Sprite facing.
    pub facing: Facing,
    /// Current clip.
    pub animation: Animation,
}

impl Player {
    /// Player at rest at `position`.
    pub fn spawn(position: Vec2) -> Self {
        Self {
            position,
            velocity: Vec2::ZERO,
            grounded: false,
            facing: Facing::Right,
            animation: Animation::Idle,
        }
    }
}

/// Score pickup.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Collectible {
    /// Spawn position.
    pub position: Vec2,
    /// Taken this load.
    pub collected: bool,
}

/// Air refill pickup.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AirCapsule {
    /// Spawn position.
    pub position: Vec2,
    /// Taken this load.
    pub collected: bool,
}

/// A patrolling enemy.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Enemy {
    /// Behavior kind.
    pub kind: EnemyKind,
    /// Current position.
    pub position: Vec2,
    /// Current horizontal velocity.
    pub velocity: f32,
    /// Sprite tint.
    pub tint: Option<Color>,
}

impl Enemy {
    /// Animated enemies face their direction of travel; static ones never flip.
    pub fn facing(&self) -> Facing {
        if self.kind.is_animated() && self.velocity < 0.0 {
            Facing::Left
        } else {
            Facing::Right
        }
    }
}

/// Level exit. Hidden until every collectible is taken.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Exit {
    /// Position.
    pub position: Vec2,
    /// Whether it has been revealed.
    pub visible: bool,
}

/// Everything spawned for one load of one level.
#[derive(Debug, Clone)]
pub struct LevelEntities {
    generation: u64,
    /// Materialized platform bricks.
    pub bricks: Vec<BrickPlacement>,
    /// Collectibles in definition order.
    pub collectibles: Vec<Collectible>,
    /// Air capsules in definition order.
    pub capsules: Vec<AirCapsule>,
    /// Enemies in definition order.
    pub enemies: Vec<Enemy>,
    /// The exit.
    pub exit: Exit,
    /// The player.
    pub player: Player,
}

impl LevelEntities {
    /// Build a fresh entity set from `level`. `generation` identifies the load.
    pub fn spawn(
        generation: u64,
        level: &LevelDefinition,
        registry: &BiomeRegistry,
        brick_span: f32,
    ) -> Self {
        Self {
            generation,
            bricks: materialize_platforms(level, registry, brick_span),
            collectibles: level
                .collectibles
                .iter()
                .map(|&position| Collectible {
                    position,
                    collected: false,
                })
                .collect(),
            capsules: level
                .air_capsules
                .iter()
                .map(|&position| AirCapsule {
                    position,
                    collected: false,
                })
                .collect(),
            enemies: level
                .enemies
                .iter()
                .map(|e| Enemy {
                    kind: e.kind,
                    position: e.position,
                    velocity: e.velocity,
                    tint: e.tint,
                })
                .collect(),
            exit: Exit {
                position: level.exit,
                visible: false,
            },
            player: Player::spawn(level.player_start),
        }
    }

    /// Nothing spawned yet.
    pub fn empty() -> Self {
        Self {
            generation: 0,
            bricks: Vec::new(),
            collectibles: Vec::new(),
            capsules: Vec::new(),
            enemies: Vec::new(),
            exit: Exit {
                position: Vec2::ZERO,
                visible: false,
            },
            player: Player::spawn(Vec2::ZERO),
        }
    }

    /// Load identifier. Strictly increases across reloads.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Take collectible `index`. Returns `false` if it does not exist or was
    /// already taken.
    pub fn collect(&mut self, index: usize) -> bool {
        match self.collectibles.get_mut(index) {
            Some(item) if !item.collected => {
                item.collected = true;
                true
            }
            _ => false,
        }
    }

    /// Take air capsule `index`. Same contract as [`collect`](Self::collect).
    pub fn collect_capsule(&mut self, index: usize) -> bool {
        match self.capsules.get_mut(index) {
            Some(capsule) if !capsule.collected => {
                capsule.collected = true;
                true
            }
            _ => false,
        }
    }

    /// Collectibles not yet taken.
    pub fn remaining_collectibles(&self) -> usize {
        self.collectibles.iter().filter(|c| !c.collected).count()
    }

    /// Whether every collectible has been taken.
    pub fn are_all_collected(&self) -> bool {
        self.remaining_collectibles() == 0
    }

    /// Reveal the exit. Returns `true` only on the call that reveals it.
    pub fn reveal_exit(&mut self) -> bool {
        let newly = !self.exit.visible;
        self.exit.visible = true;
        newly
    }

    /// Whether `position` is strictly within `radius` of a visible exit.
    pub fn exit_reached(&self, position: Vec2, radius: f32) -> bool {
        self.exit.visible && position.distance(self.exit.position) < radius
    }
}
