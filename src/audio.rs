//! Audio cues
//!
//! The simulation never waits on audio. Sinks report failures through
//! `AudioError`; the session logs them and carries on.

use thiserror::Error;

/// Sound cue types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AudioCue {
    /// Player fired
    ShotFired,
    /// Enemy health reached zero
    EnemyDestroyed,
    /// Session ended
    GameOver,
}

impl AudioCue {
    pub fn as_str(&self) -> &'static str {
        match self {
            AudioCue::ShotFired => "shot-fired",
            AudioCue::EnemyDestroyed => "enemy-destroyed",
            AudioCue::GameOver => "game-over",
        }
    }
}

#[derive(Debug, Error)]
pub enum AudioError {
    #[error("audio output unavailable")]
    Unavailable,

    #[error("playback failed: {0}")]
    Playback(String),
}

/// Fire-and-forget cue output
pub trait AudioSink {
    fn play(&mut self, cue: AudioCue) -> Result<(), AudioError>;
}

/// Discards every cue
#[derive(Debug, Default)]
pub struct SilentAudio;

impl AudioSink for SilentAudio {
    fn play(&mut self, _cue: AudioCue) -> Result<(), AudioError> {
        Ok(())
    }
}

/// Writes cues to the log (headless runs)
#[derive(Debug, Default)]
pub struct LogAudio {
    pub muted: bool,
}

impl AudioSink for LogAudio {
    fn play(&mut self, cue: AudioCue) -> Result<(), AudioError> {
        if !self.muted {
            log::debug!("♪ {}", cue.as_str());
        }
        Ok(())
    }
}

/// Master/sfx volume pair shared by real sinks
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Volume {
    pub master: f32,
    pub sfx: f32,
    pub muted: bool,
}

impl Default for Volume {
    fn default() -> Self {
        Self {
            master: 0.8,
            sfx: 1.0,
            muted: false,
        }
    }
}

impl Volume {
    /// Effective gain, 0 when muted
    pub fn effective(&self) -> f32 {
        if self.muted {
            0.0
        } else {
            self.master.clamp(0.0, 1.0) * self.sfx.clamp(0.0, 1.0)
        }
    }
}

#[cfg(target_arch = "wasm32")]
pub use web::WebAudio;

#[cfg(target_arch = "wasm32")]
mod web {
    //! Procedurally generated cues using the Web Audio API - no asset files

    use wasm_bindgen::JsValue;
    use web_sys::{AudioContext, AudioContextState, GainNode, OscillatorNode, OscillatorType};

    use super::{AudioCue, AudioError, AudioSink, Volume};

    fn js_err(err: JsValue) -> AudioError {
        AudioError::Playback(format!("{err:?}"))
    }

    /// Web Audio cue player
    pub struct WebAudio {
        ctx: Option<AudioContext>,
        pub volume: Volume,
    }

    impl Default for WebAudio {
        fn default() -> Self {
            Self::new(Volume::default())
        }
    }

    impl WebAudio {
        pub fn new(volume: Volume) -> Self {
            // May fail outside a secure context
            let ctx = AudioContext::new().ok();
            if ctx.is_none() {
                log::warn!("Failed to create AudioContext - audio disabled");
            }
            Self { ctx, volume }
        }

        /// Oscillator routed through a gain node to the speakers
        fn create_osc(
            ctx: &AudioContext,
            freq: f32,
            osc_type: OscillatorType,
        ) -> Result<(OscillatorNode, GainNode), AudioError> {
            let osc = ctx.create_oscillator().map_err(js_err)?;
            let gain = ctx.create_gain().map_err(js_err)?;

            osc.set_type(osc_type);
            osc.frequency().set_value(freq);
            osc.connect_with_audio_node(&gain).map_err(js_err)?;
            gain.connect_with_audio_node(&ctx.destination())
                .map_err(js_err)?;

            Ok((osc, gain))
        }

        /// Shot - short rising chirp
        fn play_shot(ctx: &AudioContext, vol: f32) -> Result<(), AudioError> {
            let (osc, gain) = Self::create_osc(ctx, 900.0, OscillatorType::Square)?;
            let t = ctx.current_time();

            gain.gain().set_value_at_time(vol * 0.15, t).map_err(js_err)?;
            gain.gain()
                .exponential_ramp_to_value_at_time(0.01, t + 0.08)
                .map_err(js_err)?;
            osc.frequency()
                .exponential_ramp_to_value_at_time(1400.0, t + 0.06)
                .map_err(js_err)?;

            osc.start().map_err(js_err)?;
            osc.stop_with_when(t + 0.1).map_err(js_err)
        }

        /// Enemy destroyed - boom with a crack on top
        fn play_explosion(ctx: &AudioContext, vol: f32) -> Result<(), AudioError> {
            let (osc, gain) = Self::create_osc(ctx, 100.0, OscillatorType::Sawtooth)?;
            let t = ctx.current_time();

            gain.gain().set_value_at_time(vol * 0.5, t).map_err(js_err)?;
            gain.gain()
                .exponential_ramp_to_value_at_time(0.01, t + 0.4)
                .map_err(js_err)?;
            osc.frequency()
                .exponential_ramp_to_value_at_time(30.0, t + 0.4)
                .map_err(js_err)?;
            osc.start().map_err(js_err)?;
            osc.stop_with_when(t + 0.5).map_err(js_err)?;

            let (crack, crack_gain) = Self::create_osc(ctx, 1500.0, OscillatorType::Square)?;
            crack_gain.gain().set_value_at_time(vol * 0.2, t).map_err(js_err)?;
            crack_gain
                .gain()
                .exponential_ramp_to_value_at_time(0.01, t + 0.1)
                .map_err(js_err)?;
            crack.start().map_err(js_err)?;
            crack.stop_with_when(t + 0.15).map_err(js_err)
        }

        /// Game over - sad descending
        fn play_game_over(ctx: &AudioContext, vol: f32) -> Result<(), AudioError> {
            for (i, freq) in [400.0, 350.0, 300.0, 200.0].iter().enumerate() {
                let (osc, gain) = Self::create_osc(ctx, *freq, OscillatorType::Sine)?;
                let t = ctx.current_time() + i as f64 * 0.2;
                gain.gain().set_value_at_time(vol * 0.3, t).map_err(js_err)?;
                gain.gain()
                    .exponential_ramp_to_value_at_time(0.01, t + 0.3)
                    .map_err(js_err)?;
                osc.start_with_when(t).map_err(js_err)?;
                osc.stop_with_when(t + 0.4).map_err(js_err)?;
            }
            Ok(())
        }
    }

    impl AudioSink for WebAudio {
        fn play(&mut self, cue: AudioCue) -> Result<(), AudioError> {
            let vol = self.volume.effective();
            if vol <= 0.0 {
                return Ok(());
            }
            let ctx = self.ctx.as_ref().ok_or(AudioError::Unavailable)?;

            // Browsers suspend the context until a user gesture
            if ctx.state() == AudioContextState::Suspended {
                let _ = ctx.resume();
            }

            match cue {
                AudioCue::ShotFired => Self::play_shot(ctx, vol),
                AudioCue::EnemyDestroyed => Self::play_explosion(ctx, vol),
                AudioCue::GameOver => Self::play_game_over(ctx, vol),
            }
        }
    }
}
