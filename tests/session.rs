use glam::Vec2;

use sky_raid::audio::{AudioCue, AudioError, AudioSink};
use sky_raid::clock::{Clock, ManualClock};
use sky_raid::consts::*;
use sky_raid::input::Key;
use sky_raid::render::{Frame, RenderSink};
use sky_raid::session::{GameOverPanel, Session};
use sky_raid::sim::{Enemy, EnemyKind, EnemyProjectile, GamePhase, GameState, Player};

#[derive(Default)]
struct RecordingAudio {
    cues: Vec<AudioCue>,
}

impl AudioSink for RecordingAudio {
    fn play(&mut self, cue: AudioCue) -> Result<(), AudioError> {
        self.cues.push(cue);
        Ok(())
    }
}

#[derive(Default)]
struct RecordingPanel {
    shown: Vec<u64>,
    hidden: u32,
}

impl GameOverPanel for RecordingPanel {
    fn show(&mut self, final_score: u64) {
        self.shown.push(final_score);
    }

    fn hide(&mut self) {
        self.hidden += 1;
    }
}

#[derive(Default)]
struct CountingRenderer {
    frames: u32,
    last_score: u64,
}

impl RenderSink for CountingRenderer {
    fn present(&mut self, frame: &Frame<'_>) {
        self.frames += 1;
        self.last_score = frame.score;
    }
}

type TestSession = Session<ManualClock, RecordingAudio, RecordingPanel>;

fn session(seed: u64) -> (TestSession, ManualClock) {
    let clock = ManualClock::new(0);
    let session = Session::new(
        seed,
        clock.clone(),
        RecordingAudio::default(),
        RecordingPanel::default(),
    );
    (session, clock)
}

/// Run exactly one tick
fn step(session: &mut TestSession, clock: &ManualClock) {
    clock.advance(TICK_INTERVAL_MS);
    assert_eq!(session.pump(), 1);
}

fn place_enemy(state: &mut GameState, kind: EnemyKind, pos: Vec2) -> u32 {
    let id = state.next_entity_id();
    let mut enemy = Enemy::new(id, kind, pos.x, 0);
    enemy.pos = pos;
    state.enemies.push(enemy);
    id
}

/// State with an enemy projectile about to land on the player
fn doomed_state(seed: u64) -> GameState {
    let mut state = GameState::new(seed);
    state.score = 30;
    let id = state.next_entity_id();
    state.enemy_projectiles.push(EnemyProjectile {
        id,
        pos: state.player.pos + Vec2::new(10.0, -ENEMY_PROJECTILE_SPEED),
    });
    state
}

#[test]
fn fire_key_spawns_one_projectile_and_cue() {
    let (mut session, clock) = session(1);

    session.key_down(&Key::Fire);
    // Held key repeat inside the cooldown
    session.key_down(&Key::Fire);
    session.key_down(&Key::Fire);
    step(&mut session, &clock);

    assert_eq!(session.state().projectiles.len(), 1);
    assert_eq!(session.audio().cues, vec![AudioCue::ShotFired]);

    clock.advance(FIRE_COOLDOWN_MS);
    session.pump();
    session.key_down(&Key::Fire);
    step(&mut session, &clock);
    assert_eq!(session.state().projectiles.len(), 2);
}

#[test]
fn held_keys_move_player_until_released() {
    let (mut session, clock) = session(1);
    let start = session.state().player.pos;

    session.key_down(&Key::Left);
    step(&mut session, &clock);
    step(&mut session, &clock);
    session.key_up(&Key::Left);
    step(&mut session, &clock);

    assert_eq!(session.state().player.pos, start - Vec2::new(2.0 * PLAYER_SPEED, 0.0));
}

#[test]
fn unknown_keys_are_ignored() {
    let (mut session, clock) = session(1);
    session.key_down(&Key::from_name("Enter"));
    session.key_down(&Key::from_name("x"));
    step(&mut session, &clock);

    assert_eq!(session.state().player, Player::default());
    assert!(session.audio().cues.is_empty());
}

#[test]
fn enemy_shot_ends_session_and_stops_timer() {
    let (mut session, clock) = session(1);
    session.load_state(doomed_state(1));

    step(&mut session, &clock);

    assert_eq!(session.phase(), GamePhase::GameOver);
    assert!(!session.timer().is_running());
    assert_eq!(session.panel().shown, vec![30]);
    assert_eq!(session.audio().cues, vec![AudioCue::GameOver]);

    // No more ticks, no repeated notification
    let ticks = session.state().time_ticks;
    clock.advance(TICK_INTERVAL_MS * 20);
    assert_eq!(session.pump(), 0);
    assert_eq!(session.state().time_ticks, ticks);
    assert_eq!(session.panel().shown.len(), 1);
}

#[test]
fn input_ignored_during_game_over() {
    let (mut session, clock) = session(1);
    session.load_state(doomed_state(1));
    step(&mut session, &clock);

    session.key_down(&Key::Right);
    session.key_down(&Key::Fire);
    assert!(!session.input().peek_intent().right);
    assert!(!session.audio().cues.contains(&AudioCue::ShotFired));
}

#[test]
fn restart_resets_everything() {
    let (mut session, clock) = session(1);
    session.key_down(&Key::Right);
    session.load_state(doomed_state(1));
    step(&mut session, &clock);
    assert_eq!(session.phase(), GamePhase::GameOver);

    session.restart();

    let state = session.state();
    assert_eq!(session.phase(), GamePhase::Playing);
    assert_eq!(state.score, 0);
    assert_eq!(state.player, Player::default());
    assert_eq!(state.player.pos, Vec2::new(375.0, 550.0));
    assert!(state.enemies.is_empty());
    assert!(state.projectiles.is_empty());
    assert!(state.enemy_projectiles.is_empty());
    assert!(session.timer().is_running());
    assert_eq!(session.panel().hidden, 1);
    assert!(session.input().can_fire(clock.now_ms()));

    step(&mut session, &clock);
    assert_eq!(session.state().time_ticks, 1);
}

#[test]
fn repeated_restart_matches_single_restart() {
    let (mut once, once_clock) = session(5);
    let (mut many, many_clock) = session(5);
    for (s, clock) in [(&mut once, &once_clock), (&mut many, &many_clock)] {
        s.load_state(doomed_state(5));
        step(s, clock);
    }

    once.restart();
    many.restart();
    many.restart();
    many.restart();

    assert_eq!(once.phase(), many.phase());
    assert_eq!(once.state().player, many.state().player);
    assert_eq!(once.score(), many.score());
    assert_eq!(once.state().enemies, many.state().enemies);
    // Single timer, not stacked
    assert_eq!(once.timer(), many.timer());
    many_clock.advance(TICK_INTERVAL_MS);
    assert_eq!(many.pump(), 1);
}

#[test]
fn tank_needs_three_hits() {
    let (mut session, clock) = session(1);
    let mut state = GameState::new(1);
    // Far from the player's column so it never returns fire
    let tank = place_enemy(&mut state, EnemyKind::Tank, Vec2::new(0.0, 200.0));
    session.load_state(state);

    let mut state = session.state().clone();
    for n in 1..=3u8 {
        let id = state.next_entity_id();
        let enemy = state.enemies.iter().find(|e| e.id == tank).copied().unwrap();
        // Lands on the tank after this tick's projectile advance
        state.projectiles.push(sky_raid::sim::Projectile {
            id,
            pos: Vec2::new(enemy.pos.x + 10.0, enemy.pos.y + 20.0 + PROJECTILE_SPEED),
        });
        session.load_state(state);
        step(&mut session, &clock);

        state = session.state().clone();
        let enemy = state.enemies.iter().find(|e| e.id == tank).unwrap();
        if n < 3 {
            assert_eq!(enemy.health(), Some(3 - n));
            assert_eq!(state.score, 0);
        } else {
            assert!(enemy.is_exploding());
            assert_eq!(state.score, KILL_SCORE);
        }
    }
    assert_eq!(
        session
            .audio()
            .cues
            .iter()
            .filter(|c| **c == AudioCue::EnemyDestroyed)
            .count(),
        1
    );
}

#[test]
fn render_sees_post_tick_state() {
    let (mut session, clock) = session(1);
    let mut renderer = CountingRenderer::default();
    let mut state = GameState::new(1);
    state.score = 120;
    session.load_state(state);

    step(&mut session, &clock);
    session.render(&mut renderer);

    assert_eq!(renderer.frames, 1);
    assert_eq!(renderer.last_score, 120);
    assert_eq!(session.frame().phase, GamePhase::Playing);
}

#[test]
fn long_seeded_runs_are_reproducible() {
    let (mut a, clock_a) = session(2024);
    let (mut b, clock_b) = session(2024);

    for n in 0..400 {
        for (s, clock) in [(&mut a, &clock_a), (&mut b, &clock_b)] {
            if n % 7 == 0 {
                s.key_down(&Key::Fire);
            }
            if n % 40 == 0 {
                s.key_down(&Key::Left);
            } else if n % 40 == 20 {
                s.key_up(&Key::Left);
            }
            clock.advance(TICK_INTERVAL_MS);
            s.pump();
        }
    }

    assert_eq!(a.score(), b.score());
    assert_eq!(a.phase(), b.phase());
    assert_eq!(a.state().enemies, b.state().enemies);
    assert_eq!(a.state().enemy_projectiles, b.state().enemy_projectiles);
}
