//! Collision detection and resolution
//!
//! Everything is an axis-aligned box. Three independent passes run once per
//! tick, in a fixed order, against the positions the tick engine just
//! committed:
//! 1. player shots vs enemies (damage, explosions, score)
//! 2. enemy bodies vs player (game over)
//! 3. enemy shots vs player (game over)

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::state::{GameEvent, GamePhase, GameState, HitOutcome};
use crate::consts::KILL_SCORE;

/// Axis-aligned bounding box
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Aabb {
    /// Top-left corner
    pub min: Vec2,
    pub size: Vec2,
}

impl Aabb {
    pub const fn new(min: Vec2, size: Vec2) -> Self {
        Self { min, size }
    }

    pub fn max(&self) -> Vec2 {
        self.min + self.size
    }

    /// Strict overlap; boxes that only share an edge do not collide
    #[inline]
    pub fn overlaps(&self, other: &Aabb) -> bool {
        let (max, other_max) = (self.max(), other.max());
        self.min.x < other_max.x
            && max.x > other.min.x
            && self.min.y < other_max.y
            && max.y > other.min.y
    }
}

/// What one resolution step changed
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CollisionReport {
    /// Projectiles consumed by hits
    pub shots_landed: u32,
    /// Enemies switched to exploding
    pub enemies_destroyed: u32,
    pub score_gained: u64,
    /// A pass ended the session
    pub player_hit: bool,
}

/// Run all three passes in order.
///
/// Every pass runs even when an earlier one already ended the session, so a
/// kill and a player death in the same tick are both recorded.
pub fn resolve(state: &mut GameState) -> CollisionReport {
    let mut report = shots_vs_enemies(state);
    report.player_hit |= enemies_vs_player(state);
    report.player_hit |= enemy_shots_vs_player(state);
    report
}

/// Player projectiles against active enemies.
///
/// Each projectile hits at most the first overlapping enemy in stored order.
/// Damage persists even when nothing dies.
pub fn shots_vs_enemies(state: &mut GameState) -> CollisionReport {
    let mut report = CollisionReport::default();
    let mut consumed: Vec<u32> = Vec::new();

    for shot in &state.projectiles {
        let shot_box = shot.aabb();
        let Some(enemy) = state
            .enemies
            .iter_mut()
            .find(|e| e.is_active() && e.aabb().overlaps(&shot_box))
        else {
            continue;
        };

        consumed.push(shot.id);
        report.shots_landed += 1;

        match enemy.take_hit() {
            HitOutcome::Damaged { health_left } => {
                state.events.push(GameEvent::EnemyHit {
                    enemy_id: enemy.id,
                    health_left,
                });
            }
            HitOutcome::Destroyed => {
                report.enemies_destroyed += 1;
                report.score_gained += KILL_SCORE;
                state.events.push(GameEvent::EnemyDestroyed {
                    enemy_id: enemy.id,
                    kind: enemy.kind,
                });
            }
            HitOutcome::Ignored => {}
        }
    }

    if !consumed.is_empty() {
        state.projectiles.retain(|p| !consumed.contains(&p.id));
    }
    state.score += report.score_gained;

    report
}

/// Active enemy bodies against the player. The enemy is left in place.
pub fn enemies_vs_player(state: &mut GameState) -> bool {
    let player_box = state.player.aabb();
    let Some(enemy) = state
        .enemies
        .iter()
        .find(|e| e.is_active() && e.aabb().overlaps(&player_box))
    else {
        return false;
    };

    state.events.push(GameEvent::PlayerRammed { enemy_id: enemy.id });
    state.phase = GamePhase::GameOver;
    true
}

/// Enemy projectiles against the player. The projectile is left in place.
pub fn enemy_shots_vs_player(state: &mut GameState) -> bool {
    let player_box = state.player.aabb();
    let Some(shot) = state
        .enemy_projectiles
        .iter()
        .find(|p| p.aabb().overlaps(&player_box))
    else {
        return false;
    };

    state.events.push(GameEvent::PlayerShot {
        projectile_id: shot.id,
    });
    state.phase = GamePhase::GameOver;
    true
}
