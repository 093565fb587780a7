//! Fixed interval simulation tick
//!
//! Core game loop that advances the simulation deterministically.

use glam::Vec2;

use super::collision::{self, CollisionReport};
use super::spawn::{enemy_speed, maybe_spawn, try_fire};
use super::state::{EnemyState, GameEvent, GamePhase, GameState};
use crate::consts::*;

/// Input snapshot for a single tick (deterministic)
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TickInput {
    pub left: bool,
    pub right: bool,
    pub up: bool,
    pub down: bool,
    /// One projectile should be fired this tick
    pub fire: bool,
}

impl TickInput {
    /// Unit steps per held axis; opposite keys cancel out
    pub fn direction(&self) -> Vec2 {
        let axis = |neg: bool, pos: bool| (pos as i8 - neg as i8) as f32;
        Vec2::new(axis(self.left, self.right), axis(self.up, self.down))
    }
}

/// Advance the game state by one tick, then resolve collisions.
///
/// Does nothing once the session is over. `now_ms` is only used for enemy
/// shot cooldowns and newly spawned enemies.
pub fn tick(state: &mut GameState, input: &TickInput, now_ms: u64) -> CollisionReport {
    if state.phase == GamePhase::GameOver {
        return CollisionReport::default();
    }
    advance(state, input, now_ms);
    collision::resolve(state)
}

/// Movement, culling, enemy fire and spawning (no collisions)
pub fn advance(state: &mut GameState, input: &TickInput, now_ms: u64) {
    state.time_ticks += 1;

    // Player
    state.player.steer(input.direction());
    if input.fire {
        state.spawn_projectile();
    }

    // Player projectiles travel up
    for shot in &mut state.projectiles {
        shot.pos.y -= PROJECTILE_SPEED;
    }
    state.projectiles.retain(|p| !p.is_off_field());

    // Enemy projectiles travel down
    for shot in &mut state.enemy_projectiles {
        shot.pos.y += ENEMY_PROJECTILE_SPEED;
    }
    state.enemy_projectiles.retain(|p| !p.is_off_field());

    // Global speed always follows the current score
    let speed = enemy_speed(state.score);

    let player = state.player;
    let mut enemies = Vec::with_capacity(state.enemies.len());
    let mut new_shots = Vec::new();

    for mut enemy in std::mem::take(&mut state.enemies) {
        match enemy.state {
            EnemyState::Exploding { ticks_remaining } => {
                let ticks_remaining = ticks_remaining.saturating_sub(1);
                if ticks_remaining > 0 {
                    enemy.state = EnemyState::Exploding { ticks_remaining };
                    enemies.push(enemy);
                }
            }
            EnemyState::Active { .. } => {
                enemy.pos.y += speed * enemy.kind.profile().speed_multiplier;
                if enemy.pos.y >= FIELD_HEIGHT {
                    state.events.push(GameEvent::EnemyEscaped { enemy_id: enemy.id });
                    continue;
                }

                let fired = try_fire(&mut enemy, &player, now_ms, || state.next_entity_id());
                if let Some(shot) = fired {
                    state.events.push(GameEvent::EnemyFired { enemy_id: enemy.id });
                    new_shots.push(shot);
                }
                enemies.push(enemy);
            }
        }
    }

    // Commit enemies and their shots together
    state.enemies = enemies;
    state.enemy_projectiles.extend(new_shots);

    maybe_spawn(state, now_ms);
}
