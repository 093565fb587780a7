//! Sky Raid headless runner
//!
//! Plays the game in real time with a simple autopilot, logging cues and
//! printing a JSON summary of every run. Front ends embed `Session` directly.

#[cfg(not(target_arch = "wasm32"))]
mod headless {
    use std::thread;
    use std::time::Duration;

    use serde::Serialize;

    use sky_raid::audio::LogAudio;
    use sky_raid::clock::{Clock, SystemClock};
    use sky_raid::input::Key;
    use sky_raid::render::{Frame, RenderSink};
    use sky_raid::sim::{GameEvent, GamePhase};
    use sky_raid::{GameOverPanel, Session, Settings};

    /// Remembers final scores shown on the game-over panel
    #[derive(Default)]
    struct ScoreBoard {
        finals: Vec<u64>,
        visible: bool,
    }

    impl GameOverPanel for ScoreBoard {
        fn show(&mut self, final_score: u64) {
            log::info!("GAME OVER - final score {}", final_score);
            self.finals.push(final_score);
            self.visible = true;
        }

        fn hide(&mut self) {
            self.visible = false;
        }
    }

    /// Logs a one-line status every second of play
    struct StatusLine {
        frames: u64,
    }

    impl RenderSink for StatusLine {
        fn present(&mut self, frame: &Frame<'_>) {
            self.frames += 1;
            if self.frames % 20 == 0 {
                log::info!(
                    "score={} enemies={} shots={} incoming={} player=({:.0},{:.0})",
                    frame.score,
                    frame.enemies.len(),
                    frame.projectiles.len(),
                    frame.enemy_projectiles.len(),
                    frame.player.pos.x,
                    frame.player.pos.y
                );
            }
        }
    }

    /// Chases the lowest active enemy and fires when lined up
    #[derive(Default)]
    struct Autopilot {
        held: Option<Key>,
    }

    impl Autopilot {
        fn drive<C: Clock, P: GameOverPanel>(&mut self, session: &mut Session<C, LogAudio, P>) {
            let state = session.state();
            let player_x = state.player.center_x();
            let target = state
                .enemies
                .iter()
                .filter(|e| e.is_active())
                .max_by(|a, b| a.pos.y.total_cmp(&b.pos.y))
                .map(|e| e.center_x());

            let want = match target {
                Some(x) if x < player_x - 5.0 => Some(Key::Left),
                Some(x) if x > player_x + 5.0 => Some(Key::Right),
                _ => None,
            };
            let lined_up = target.is_some_and(|x| (x - player_x).abs() < 20.0);

            if want != self.held {
                if let Some(key) = self.held.take() {
                    session.key_up(&key);
                }
                if let Some(key) = &want {
                    session.key_down(key);
                }
                self.held = want;
            }
            if lined_up {
                session.key_down(&Key::Fire);
            }
        }

        fn release(&mut self) {
            self.held = None;
        }
    }

    #[derive(Serialize)]
    struct RunSummary {
        seed: u64,
        ticks: u64,
        final_scores: Vec<u64>,
        score_in_progress: Option<u64>,
        enemies_destroyed: u32,
        enemies_escaped: u32,
    }

    pub fn run() {
        sky_raid::init_logging();
        log::info!("Sky Raid (headless) starting...");

        let settings = Settings::load();
        let seed = settings.seed.unwrap_or_else(rand::random);
        let audio = LogAudio {
            muted: settings.volume().effective() <= 0.0,
        };
        let mut session = Session::new(seed, SystemClock::new(), audio, ScoreBoard::default());
        let mut autopilot = Autopilot::default();
        let mut screen = StatusLine { frames: 0 };

        let mut ticks = 0u64;
        let mut destroyed = 0u32;
        let mut escaped = 0u32;

        while ticks < settings.max_ticks {
            autopilot.drive(&mut session);
            let ran = session.pump();
            ticks += u64::from(ran);

            for event in session.drain_events() {
                match event {
                    GameEvent::EnemyDestroyed { .. } => destroyed += 1,
                    GameEvent::EnemyEscaped { .. } => escaped += 1,
                    _ => {}
                }
            }
            if ran > 0 {
                session.render(&mut screen);
            }

            if session.panel().visible {
                if !settings.auto_restart {
                    break;
                }
                // Same path as the panel's restart button
                session.restart();
                autopilot.release();
            }

            let wait = session
                .timer()
                .next_due_ms()
                .map(|due| due.saturating_sub(session.clock().now_ms()))
                .unwrap_or(0);
            thread::sleep(Duration::from_millis(wait.max(1)));
        }

        let summary = RunSummary {
            seed,
            ticks,
            final_scores: session.panel().finals.clone(),
            score_in_progress: (session.phase() == GamePhase::Playing).then(|| session.score()),
            enemies_destroyed: destroyed,
            enemies_escaped: escaped,
        };
        match serde_json::to_string_pretty(&summary) {
            Ok(json) => println!("{json}"),
            Err(e) => log::error!("Could not encode summary: {}", e),
        }
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    headless::run();
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // Browser hosts drive `Session` from their own event loop
}
