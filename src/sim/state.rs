//! Game state and core simulation types
//!
//! Everything the tick engine and collision resolver mutate lives here.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::collision::Aabb;
use crate::consts::*;

/// Current phase of the session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Active gameplay, tick timer running
    Playing,
    /// Run ended, waiting for restart
    GameOver,
}

/// Things that happened during a tick, drained by the session after each tick
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameEvent {
    /// Player projectile damaged an enemy without destroying it
    EnemyHit { enemy_id: u32, health_left: u8 },
    /// Enemy health reached zero and it started exploding
    EnemyDestroyed { enemy_id: u32, kind: EnemyKind },
    /// Enemy left the field through the bottom edge
    EnemyEscaped { enemy_id: u32 },
    /// Enemy fired a projectile
    EnemyFired { enemy_id: u32 },
    /// Enemy body touched the player
    PlayerRammed { enemy_id: u32 },
    /// Enemy projectile touched the player
    PlayerShot { projectile_id: u32 },
}

/// The player's ship
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Player {
    /// Top-left corner
    pub pos: Vec2,
}

impl Default for Player {
    fn default() -> Self {
        Self {
            pos: Vec2::new(PLAYER_START_X, PLAYER_START_Y),
        }
    }
}

impl Player {
    pub const SIZE: Vec2 = Vec2::new(PLAYER_WIDTH, PLAYER_HEIGHT);

    /// Lowest legal x/y for the top-left corner
    pub const MIN: Vec2 = Vec2::new(0.0, FIELD_HEIGHT / 2.0);
    /// Highest legal x/y for the top-left corner
    pub const MAX: Vec2 = Vec2::new(
        FIELD_WIDTH - PLAYER_WIDTH,
        FIELD_HEIGHT - PLAYER_HEIGHT - PLAYER_BOTTOM_MARGIN,
    );

    pub fn aabb(&self) -> Aabb {
        Aabb::new(self.pos, Self::SIZE)
    }

    pub fn center_x(&self) -> f32 {
        self.pos.x + PLAYER_WIDTH / 2.0
    }

    /// Move by `PLAYER_SPEED` along each held axis, then clamp to the lower half
    pub fn steer(&mut self, dir: Vec2) {
        self.pos = (self.pos + dir * PLAYER_SPEED).clamp(Self::MIN, Self::MAX);
    }
}

/// A projectile fired by the player (travels up)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Projectile {
    pub id: u32,
    pub pos: Vec2,
}

impl Projectile {
    pub const SIZE: Vec2 = Vec2::new(PROJECTILE_WIDTH, PROJECTILE_HEIGHT);

    /// Spawn centered on the ship's nose
    pub fn from_player(id: u32, player: &Player) -> Self {
        Self {
            id,
            pos: Vec2::new(player.center_x() - PROJECTILE_WIDTH / 2.0, player.pos.y),
        }
    }

    pub fn aabb(&self) -> Aabb {
        Aabb::new(self.pos, Self::SIZE)
    }

    /// Fully above the top edge
    pub fn is_off_field(&self) -> bool {
        self.pos.y <= -PROJECTILE_HEIGHT
    }
}

/// A projectile fired by an enemy (travels down)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EnemyProjectile {
    pub id: u32,
    pub pos: Vec2,
}

impl EnemyProjectile {
    pub const SIZE: Vec2 = Vec2::new(ENEMY_PROJECTILE_WIDTH, ENEMY_PROJECTILE_HEIGHT);

    /// Spawn centered under the firing enemy
    pub fn from_enemy(id: u32, enemy: &Enemy) -> Self {
        Self {
            id,
            pos: Vec2::new(
                enemy.center_x() - ENEMY_PROJECTILE_WIDTH / 2.0,
                enemy.pos.y + ENEMY_HEIGHT,
            ),
        }
    }

    pub fn aabb(&self) -> Aabb {
        Aabb::new(self.pos, Self::SIZE)
    }

    /// Fully below the bottom edge
    pub fn is_off_field(&self) -> bool {
        self.pos.y >= FIELD_HEIGHT
    }
}

/// Enemy types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EnemyKind {
    Normal,
    Fast,
    Tank,
}

/// Static per-kind tuning
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EnemyProfile {
    /// Applied to the global enemy speed
    pub speed_multiplier: f32,
    pub max_health: u8,
    /// `None` for kinds that never shoot
    pub shot_cooldown_ms: Option<u64>,
}

impl EnemyKind {
    /// Every kind, in spawn-roll order
    pub const ALL: [EnemyKind; 3] = [EnemyKind::Normal, EnemyKind::Fast, EnemyKind::Tank];

    pub fn profile(self) -> EnemyProfile {
        match self {
            EnemyKind::Normal => EnemyProfile {
                speed_multiplier: 1.0,
                max_health: 1,
                shot_cooldown_ms: None,
            },
            EnemyKind::Fast => EnemyProfile {
                speed_multiplier: 1.5,
                max_health: 1,
                shot_cooldown_ms: None,
            },
            EnemyKind::Tank => EnemyProfile {
                speed_multiplier: 0.7,
                max_health: 3,
                shot_cooldown_ms: Some(TANK_SHOT_COOLDOWN_MS),
            },
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            EnemyKind::Normal => "normal",
            EnemyKind::Fast => "fast",
            EnemyKind::Tank => "tank",
        }
    }
}

/// Enemy lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EnemyState {
    /// Moving, shootable, dangerous to the player. `health` is never 0 here.
    Active { health: u8, last_shot_ms: u64 },
    /// Frozen in place until the timer runs out, then removed
    Exploding { ticks_remaining: u32 },
}

/// Result of a projectile landing on an enemy
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HitOutcome {
    Damaged { health_left: u8 },
    Destroyed,
    /// Exploding enemies absorb nothing
    Ignored,
}

/// An enemy entity
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Enemy {
    pub id: u32,
    pub kind: EnemyKind,
    /// Top-left corner
    pub pos: Vec2,
    pub state: EnemyState,
}

impl Enemy {
    pub const SIZE: Vec2 = Vec2::new(ENEMY_WIDTH, ENEMY_HEIGHT);

    /// Fresh enemy just above the top edge. `now_ms` starts the shot cooldown.
    pub fn new(id: u32, kind: EnemyKind, x: f32, now_ms: u64) -> Self {
        Self {
            id,
            kind,
            pos: Vec2::new(x, -ENEMY_HEIGHT),
            state: EnemyState::Active {
                health: kind.profile().max_health,
                last_shot_ms: now_ms,
            },
        }
    }

    pub fn is_active(&self) -> bool {
        matches!(self.state, EnemyState::Active { .. })
    }

    pub fn is_exploding(&self) -> bool {
        matches!(self.state, EnemyState::Exploding { .. })
    }

    /// Remaining health, `None` once exploding
    pub fn health(&self) -> Option<u8> {
        match self.state {
            EnemyState::Active { health, .. } => Some(health),
            EnemyState::Exploding { .. } => None,
        }
    }

    pub fn aabb(&self) -> Aabb {
        Aabb::new(self.pos, Self::SIZE)
    }

    pub fn center_x(&self) -> f32 {
        self.pos.x + ENEMY_WIDTH / 2.0
    }

    /// Apply one point of damage. Zero health switches straight to exploding.
    pub fn take_hit(&mut self) -> HitOutcome {
        match self.state {
            EnemyState::Active { health, last_shot_ms } => {
                let health_left = health.saturating_sub(1);
                if health_left == 0 {
                    self.explode();
                    HitOutcome::Destroyed
                } else {
                    self.state = EnemyState::Active {
                        health: health_left,
                        last_shot_ms,
                    };
                    HitOutcome::Damaged { health_left }
                }
            }
            EnemyState::Exploding { .. } => HitOutcome::Ignored,
        }
    }

    /// Start the explosion with a full timer
    pub fn explode(&mut self) {
        self.state = EnemyState::Exploding {
            ticks_remaining: ENEMY_EXPLOSION_TICKS,
        };
    }
}

/// Complete game state (deterministic, serializable)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameState {
    /// Run seed for reproducibility
    pub seed: u64,
    /// Spawn position/kind rolls
    pub rng: Pcg32,
    /// Score
    pub score: u64,
    /// Current phase
    pub phase: GamePhase,
    /// Ticks simulated since the last reset
    pub time_ticks: u64,
    /// Player ship
    pub player: Player,
    /// Player projectiles (spawn order)
    pub projectiles: Vec<Projectile>,
    /// Enemy projectiles (spawn order)
    pub enemy_projectiles: Vec<EnemyProjectile>,
    /// Enemies (spawn order; collision scans follow this order)
    pub enemies: Vec<Enemy>,
    /// Events produced since the last drain
    #[serde(skip)]
    pub events: Vec<GameEvent>,
    /// Next entity ID
    next_id: u32,
}

impl GameState {
    /// Create a new game state with the given seed
    pub fn new(seed: u64) -> Self {
        Self {
            seed,
            rng: Pcg32::seed_from_u64(seed),
            score: 0,
            phase: GamePhase::Playing,
            time_ticks: 0,
            player: Player::default(),
            projectiles: Vec::new(),
            enemy_projectiles: Vec::new(),
            enemies: Vec::new(),
            events: Vec::new(),
            next_id: 1,
        }
    }

    /// Allocate a new entity ID
    pub fn next_entity_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    /// Back to the initial layout. The RNG keeps its stream so runs differ.
    pub fn reset(&mut self) {
        self.score = 0;
        self.phase = GamePhase::Playing;
        self.time_ticks = 0;
        self.player = Player::default();
        self.projectiles.clear();
        self.enemy_projectiles.clear();
        self.enemies.clear();
        self.events.clear();
        self.next_id = 1;
    }

    /// Fire one projectile from the player's current position
    pub fn spawn_projectile(&mut self) -> u32 {
        let id = self.next_entity_id();
        self.projectiles.push(Projectile::from_player(id, &self.player));
        id
    }

    /// Enemies still able to move, shoot and collide
    pub fn active_enemy_count(&self) -> usize {
        self.enemies.iter().filter(|e| e.is_active()).count()
    }

    pub fn is_game_over(&self) -> bool {
        self.phase == GamePhase::GameOver
    }

    /// Take everything recorded since the last call
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }
}
