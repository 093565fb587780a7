//! Read-only view handed to a front end after each pump

use serde::Serialize;

use crate::sim::{Enemy, EnemyProjectile, GamePhase, GameState, Player, Projectile};

/// Borrowed snapshot of everything drawable
#[derive(Debug, Clone, Copy, Serialize)]
pub struct Frame<'a> {
    pub player: &'a Player,
    pub enemies: &'a [Enemy],
    pub projectiles: &'a [Projectile],
    pub enemy_projectiles: &'a [EnemyProjectile],
    pub score: u64,
    pub phase: GamePhase,
}

impl<'a> Frame<'a> {
    pub fn from_state(state: &'a GameState) -> Self {
        Self {
            player: &state.player,
            enemies: &state.enemies,
            projectiles: &state.projectiles,
            enemy_projectiles: &state.enemy_projectiles,
            score: state.score,
            phase: state.phase,
        }
    }
}

/// Produces a visual frame; cannot touch the simulation
pub trait RenderSink {
    fn present(&mut self, frame: &Frame<'_>);
}
