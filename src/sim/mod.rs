//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed tick only
//! - Seeded RNG only
//! - Time comes in as an explicit timestamp
//! - Stable iteration order (spawn order)
//! - No rendering, audio or platform dependencies

pub mod collision;
pub mod spawn;
pub mod state;
pub mod tick;

pub use collision::{Aabb, CollisionReport, resolve};
pub use spawn::{enemy_speed, maybe_spawn, should_fire};
pub use state::{
    Enemy, EnemyKind, EnemyProfile, EnemyProjectile, EnemyState, GameEvent, GamePhase, GameState,
    HitOutcome, Player, Projectile,
};
pub use tick::{TickInput, advance, tick};
