//! Sky Raid - A vertical arcade shooter
//!
//! Core modules:
//! - `sim`: Deterministic simulation (movement, spawning, collisions, game state)
//! - `input`: Key events to movement/fire intent
//! - `session`: Playing/GameOver state machine and the fixed-interval scheduler
//! - `clock`: Injectable millisecond clock
//! - `audio`: Cue sink (Web Audio on wasm32)
//! - `render`: Read-only frame snapshot handed to a front end
//! - `settings`: Runtime preferences

pub mod audio;
pub mod clock;
pub mod input;
pub mod render;
pub mod session;
pub mod settings;
pub mod sim;

pub use session::{GameOverPanel, Session};
pub use settings::Settings;

/// Game configuration constants
pub mod consts {
    /// Fixed simulation interval (20 Hz)
    pub const TICK_INTERVAL_MS: u64 = 50;
    /// Maximum ticks run by one pump to prevent spiral of death
    pub const MAX_CATCHUP_TICKS: u32 = 8;

    /// Playfield dimensions
    pub const FIELD_WIDTH: f32 = 800.0;
    pub const FIELD_HEIGHT: f32 = 600.0;

    /// Player ship
    pub const PLAYER_WIDTH: f32 = 50.0;
    pub const PLAYER_HEIGHT: f32 = 30.0;
    /// Pixels per tick on each held axis
    pub const PLAYER_SPEED: f32 = 10.0;
    /// Gap kept between the ship and the bottom edge
    pub const PLAYER_BOTTOM_MARGIN: f32 = 10.0;
    pub const PLAYER_START_X: f32 = FIELD_WIDTH / 2.0 - PLAYER_WIDTH / 2.0;
    pub const PLAYER_START_Y: f32 = FIELD_HEIGHT - PLAYER_HEIGHT - 20.0;
    /// Minimum time between two player shots
    pub const FIRE_COOLDOWN_MS: u64 = 300;

    /// Player projectile
    pub const PROJECTILE_WIDTH: f32 = 5.0;
    pub const PROJECTILE_HEIGHT: f32 = 15.0;
    pub const PROJECTILE_SPEED: f32 = 15.0;

    /// Enemy projectile
    pub const ENEMY_PROJECTILE_WIDTH: f32 = 6.0;
    pub const ENEMY_PROJECTILE_HEIGHT: f32 = 12.0;
    pub const ENEMY_PROJECTILE_SPEED: f32 = 7.0;

    /// Enemy body (all kinds share one size)
    pub const ENEMY_WIDTH: f32 = 40.0;
    pub const ENEMY_HEIGHT: f32 = 40.0;
    /// Ticks an enemy spends exploding before removal
    pub const ENEMY_EXPLOSION_TICKS: u32 = 5;

    /// Enemy speed step function: base + floor(score / threshold) * increment
    pub const BASE_ENEMY_SPEED: f32 = 1.5;
    pub const SPEED_SCORE_THRESHOLD: u64 = 100;
    pub const ENEMY_SPEED_INCREMENT: f32 = 0.5;

    /// Chance per tick of a spawn attempt
    pub const SPAWN_PROBABILITY: f64 = 0.02;
    /// No spawn while this many enemies are still active
    pub const MAX_ACTIVE_ENEMIES: usize = 7;

    /// Points per destroyed enemy
    pub const KILL_SCORE: u64 = 10;

    /// Tank return fire
    pub const TANK_SHOT_COOLDOWN_MS: u64 = 2000;
    /// Max distance between enemy and player horizontal centers for an enemy to shoot
    pub const FIRE_ALIGNMENT_TOLERANCE: f32 = 30.0;
}

/// Install the logger for the current platform.
///
/// Safe to call more than once; later calls are ignored.
pub fn init_logging() {
    #[cfg(not(target_arch = "wasm32"))]
    {
        let _ = env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
            .try_init();
    }

    #[cfg(target_arch = "wasm32")]
    {
        console_error_panic_hook::set_once();
        let _ = console_log::init_with_level(log::Level::Info);
    }
}
