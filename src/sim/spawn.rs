//! Enemy spawning and return-fire policy

use rand::Rng;

use super::state::{Enemy, EnemyKind, EnemyProjectile, EnemyState, GameState, Player};
use crate::consts::*;

/// Global enemy descent speed for a score (pixels per tick, before the kind multiplier)
#[inline]
pub fn enemy_speed(score: u64) -> f32 {
    let steps = score / SPEED_SCORE_THRESHOLD;
    BASE_ENEMY_SPEED + steps as f32 * ENEMY_SPEED_INCREMENT
}

/// Roll for a new enemy.
///
/// Exploding enemies do not count toward the cap. Returns the new enemy's id.
pub fn maybe_spawn(state: &mut GameState, now_ms: u64) -> Option<u32> {
    if !state.rng.random_bool(SPAWN_PROBABILITY) {
        return None;
    }
    if state.active_enemy_count() >= MAX_ACTIVE_ENEMIES {
        return None;
    }

    let x = state.rng.random_range(0.0..FIELD_WIDTH - ENEMY_WIDTH);
    let kind = EnemyKind::ALL[state.rng.random_range(0..EnemyKind::ALL.len())];
    let id = state.next_entity_id();
    state.enemies.push(Enemy::new(id, kind, x, now_ms));

    log::debug!("Spawned {} enemy #{} at x={:.0}", kind.as_str(), id, x);
    Some(id)
}

/// Whether an enemy may shoot at the player right now.
///
/// Needs a shooting kind, an active enemy, an expired cooldown and rough
/// horizontal alignment with the player.
pub fn should_fire(enemy: &Enemy, player: &Player, now_ms: u64) -> bool {
    let Some(cooldown) = enemy.kind.profile().shot_cooldown_ms else {
        return false;
    };
    let EnemyState::Active { last_shot_ms, .. } = enemy.state else {
        return false;
    };

    let cooled_down = now_ms.saturating_sub(last_shot_ms) > cooldown;
    let aligned = (enemy.center_x() - player.center_x()).abs() <= FIRE_ALIGNMENT_TOLERANCE;
    cooled_down && aligned
}

/// Fire if the policy allows it, restarting the enemy's cooldown.
///
/// `next_id` is only called when a projectile is created.
pub fn try_fire(
    enemy: &mut Enemy,
    player: &Player,
    now_ms: u64,
    next_id: impl FnOnce() -> u32,
) -> Option<EnemyProjectile> {
    if !should_fire(enemy, player, now_ms) {
        return None;
    }
    if let EnemyState::Active { health, .. } = enemy.state {
        enemy.state = EnemyState::Active {
            health,
            last_shot_ms: now_ms,
        };
    }
    Some(EnemyProjectile::from_enemy(next_id(), enemy))
}
