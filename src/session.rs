//! Session state machine and fixed-interval scheduler
//!
//! `Playing` runs one tick per `TICK_INTERVAL_MS` whenever the host calls
//! [`Session::pump`]. A player collision moves the session to `GameOver`,
//! which stops the timer and notifies the game-over panel once.
//! [`Session::restart`] resets everything and starts a single fresh timer.

use crate::audio::{AudioCue, AudioSink, SilentAudio};
use crate::clock::{Clock, SystemClock};
use crate::consts::{MAX_CATCHUP_TICKS, TICK_INTERVAL_MS};
use crate::input::{InputTracker, Key};
use crate::render::{Frame, RenderSink};
use crate::sim::{GameEvent, GamePhase, GameState, tick};

/// Receives the final score; its restart button calls [`Session::restart`]
pub trait GameOverPanel {
    fn show(&mut self, final_score: u64);

    /// Called when a new run starts
    fn hide(&mut self) {}
}

/// Panel that shows nothing
#[derive(Debug, Default)]
pub struct NoPanel;

impl GameOverPanel for NoPanel {
    fn show(&mut self, _final_score: u64) {}
}

/// The one tick interval. Starting always replaces the previous schedule.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TickTimer {
    next_due_ms: Option<u64>,
}

impl TickTimer {
    pub fn start(&mut self, now_ms: u64) {
        self.next_due_ms = Some(now_ms + TICK_INTERVAL_MS);
    }

    /// Idempotent
    pub fn stop(&mut self) {
        self.next_due_ms = None;
    }

    pub fn is_running(&self) -> bool {
        self.next_due_ms.is_some()
    }

    pub fn next_due_ms(&self) -> Option<u64> {
        self.next_due_ms
    }

    /// Claim the next due tick, returning its scheduled time
    fn poll(&mut self, now_ms: u64) -> Option<u64> {
        let due = self.next_due_ms?;
        if now_ms < due {
            return None;
        }
        self.next_due_ms = Some(due + TICK_INTERVAL_MS);
        Some(due)
    }
}

/// One game session: state, intent, timer and collaborators
pub struct Session<C = SystemClock, A = SilentAudio, P = NoPanel> {
    state: GameState,
    input: InputTracker,
    timer: TickTimer,
    clock: C,
    audio: A,
    panel: P,
    /// Events from the ticks of the latest pump
    events: Vec<GameEvent>,
    game_over_notified: bool,
}

impl<C: Clock, A: AudioSink, P: GameOverPanel> Session<C, A, P> {
    /// Start playing immediately; the first tick is due one interval from now
    pub fn new(seed: u64, clock: C, audio: A, panel: P) -> Self {
        let mut timer = TickTimer::default();
        timer.start(clock.now_ms());
        log::info!("Session started with seed: {}", seed);
        Self {
            state: GameState::new(seed),
            input: InputTracker::new(),
            timer,
            clock,
            audio,
            panel,
            events: Vec::new(),
            game_over_notified: false,
        }
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn phase(&self) -> GamePhase {
        self.state.phase
    }

    pub fn score(&self) -> u64 {
        self.state.score
    }

    pub fn timer(&self) -> &TickTimer {
        &self.timer
    }

    pub fn input(&self) -> &InputTracker {
        &self.input
    }

    pub fn clock(&self) -> &C {
        &self.clock
    }

    pub fn audio(&self) -> &A {
        &self.audio
    }

    pub fn panel(&self) -> &P {
        &self.panel
    }

    /// Snapshot for rendering
    pub fn frame(&self) -> Frame<'_> {
        Frame::from_state(&self.state)
    }

    pub fn render(&self, sink: &mut impl RenderSink) {
        sink.present(&self.frame());
    }

    /// Key press from the input source. Ignored after game over.
    pub fn key_down(&mut self, key: &Key) {
        if self.state.is_game_over() {
            return;
        }
        let now = self.clock.now_ms();
        if self.input.key_down(key, now) {
            self.cue(AudioCue::ShotFired);
        }
    }

    /// Key release from the input source. Ignored after game over.
    pub fn key_up(&mut self, key: &Key) {
        if self.state.is_game_over() {
            return;
        }
        self.input.key_up(key);
    }

    /// Run every tick that has come due. Returns how many ran.
    ///
    /// At most `MAX_CATCHUP_TICKS` run per call; a host that stalled longer
    /// than that skips the backlog instead of fast-forwarding through it.
    /// Events left undrained from the previous pump are dropped.
    pub fn pump(&mut self) -> u32 {
        let now = self.clock.now_ms();
        let mut ran = 0;
        self.events.clear();

        while ran < MAX_CATCHUP_TICKS {
            let Some(due) = self.timer.poll(now) else {
                break;
            };
            self.step(due);
            ran += 1;
        }

        if self.timer.next_due_ms().is_some_and(|due| due <= now) {
            log::warn!("Tick backlog after {} ticks, resyncing timer", ran);
            self.timer.start(now);
        }

        ran
    }

    /// One tick plus its consequences
    fn step(&mut self, now_ms: u64) {
        let intent = self.input.take_intent();
        tick(&mut self.state, &intent, now_ms);

        for event in self.state.drain_events() {
            if let GameEvent::EnemyDestroyed { enemy_id, kind } = event {
                log::debug!("Enemy #{} ({}) destroyed", enemy_id, kind.as_str());
                self.cue(AudioCue::EnemyDestroyed);
            }
            self.events.push(event);
        }

        if self.state.is_game_over() {
            self.enter_game_over();
        }
    }

    fn enter_game_over(&mut self) {
        self.timer.stop();
        if self.game_over_notified {
            return;
        }
        self.game_over_notified = true;
        log::info!(
            "Game over after {} ticks - final score {}",
            self.state.time_ticks,
            self.state.score
        );
        self.cue(AudioCue::GameOver);
        self.panel.show(self.state.score);
    }

    /// Back to a fresh run. Safe to call any number of times in a row.
    pub fn restart(&mut self) {
        self.state.reset();
        self.input.reset();
        self.events.clear();
        self.game_over_notified = false;
        self.timer.start(self.clock.now_ms());
        self.panel.hide();
        log::info!("Session restarted");
    }

    /// Replace the whole game state (snapshot replay, scripted scenarios)
    pub fn load_state(&mut self, state: GameState) {
        self.state = state;
        self.input.reset();
        self.events.clear();
        self.game_over_notified = self.state.is_game_over();
        if self.state.is_game_over() {
            self.timer.stop();
        } else {
            self.timer.start(self.clock.now_ms());
        }
    }

    /// Events from the ticks of the latest pump
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    /// Play a cue; failures are logged and otherwise ignored
    fn cue(&mut self, cue: AudioCue) {
        if let Err(e) = self.audio.play(cue) {
            log::warn!("Audio cue {} failed: {}", cue.as_str(), e);
        }
    }
}
