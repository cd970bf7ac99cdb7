//! Player movement: surface-dependent horizontal velocity and jumping.
//!
//! Two regimes, chosen by the friction of the surface under the player:
//!
//! - **normal**: input sets velocity to the walk speed directly and releasing
//!   input stops the player at once.
//! - **slippery**: input accelerates toward a higher top speed in bounded
//!   steps, and releasing input decays velocity every tick until it drops
//!   below a stop threshold.
//!
//! Airborne ticks always use the normal regime.

use cavern_biome::{PhysicsModifiers, SurfaceKind};
use cavern_config::MovementConfig;
use cavern_input::{Horizontal, Signal, SignalState};

use crate::entities::{Animation, Facing, Player};

/// Friction used while airborne or on an unknown surface.
pub const NEUTRAL_FRICTION: f32 = 1.0;

/// Computes horizontal velocity from surface friction and input.
#[derive(Debug, Clone, PartialEq)]
pub struct SurfaceFrictionResolver {
    walk_speed: f32,
    jump_velocity: f32,
    slide_max_speed: f32,
    slide_acceleration: f32,
    slide_decay: f32,
    stop_epsilon: f32,
    slippery_threshold: f32,
}

impl Default for SurfaceFrictionResolver {
    fn default() -> Self {
        Self::new(&MovementConfig::default())
    }
}

impl SurfaceFrictionResolver {
    /// Resolver tuned by `config`.
    pub fn new(config: &MovementConfig) -> Self {
        Self {
            walk_speed: config.walk_speed,
            jump_velocity: config.jump_velocity,
            slide_max_speed: config.slide_max_speed,
            slide_acceleration: config.slide_acceleration,
            slide_decay: config.slide_decay,
            stop_epsilon: config.stop_epsilon,
            slippery_threshold: config.slippery_threshold,
        }
    }

    /// Friction of the contact this tick.
    pub fn contact_friction(grounded: bool, surface: Option<SurfaceKind>) -> f32 {
        match (grounded, surface) {
            (true, Some(kind)) => kind.friction(),
            _ => NEUTRAL_FRICTION,
        }
    }

    /// Whether `friction` selects the sliding regime.
    pub fn is_slippery(&self, friction: f32) -> bool {
        friction < self.slippery_threshold
    }

    /// New horizontal velocity for one tick.
    pub fn horizontal_velocity(
        &self,
        current: f32,
        friction: f32,
        input: Horizontal,
        speed_multiplier: f32,
    ) -> f32 {
        if !self.is_slippery(friction) {
            return input.sign() * self.walk_speed * speed_multiplier;
        }

        match input {
            Horizontal::Idle => {
                let decayed = current * self.slide_decay;
                if decayed.abs() < self.stop_epsilon {
                    0.0
                } else {
                    decayed
                }
            }
            Horizontal::Left | Horizontal::Right => {
                let max = self.slide_max_speed * speed_multiplier;
                (current + input.sign() * self.slide_acceleration).clamp(-max, max)
            }
        }
    }

    /// Vertical launch velocity if a jump starts this tick. Negative is up.
    pub fn jump(&self, grounded: bool, jump_held: bool) -> Option<f32> {
        (grounded && jump_held).then_some(-self.jump_velocity)
    }
}

/// Apply one tick of input to `player`. Position integration and gravity
/// belong to the physics collaborator, which reads the velocity back along
/// with [`PhysicsModifiers::scaled_gravity`].
pub fn movement_step(
    player: &mut Player,
    resolver: &SurfaceFrictionResolver,
    signals: &SignalState,
    surface: Option<SurfaceKind>,
    physics: &PhysicsModifiers,
) {
    let input = signals.horizontal();
    let friction = SurfaceFrictionResolver::contact_friction(player.grounded, surface);
    player.velocity.x = resolver.horizontal_velocity(
        player.velocity.x,
        friction,
        input,
        physics.player_speed_multiplier,
    );

    match input {
        Horizontal::Left => player.facing = Facing::Left,
        Horizontal::Right => player.facing = Facing::Right,
        Horizontal::Idle => {}
    }

    if let Some(vy) = resolver.jump(player.grounded, signals.is_held(Signal::Jump)) {
        player.velocity.y = vy;
        player.animation = Animation::Jump;
    } else if !player.grounded {
        player.animation = Animation::Jump;
    } else if input == Horizontal::Idle {
        player.animation = Animation::Idle;
    } else {
        player.animation = Animation::Walk;
    }
}
