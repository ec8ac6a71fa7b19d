//! Sound and haptic feedback
//!
//! The core asks for cues by name; the platform decides how they sound. All
//! calls are fire-and-forget and any platform failure just means silence.

/// Sound cues the game requests
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SoundCue {
    /// Bubble popped
    Pop,
    /// Paint splash landed
    Splash,
}

impl SoundCue {
    pub fn as_str(&self) -> &'static str {
        match self {
            SoundCue::Pop => "pop",
            SoundCue::Splash => "splash",
        }
    }
}

/// Platform feedback port
pub trait Feedback {
    /// Play a cue without waiting for it
    fn play(&mut self, cue: SoundCue);
    /// Short tactile pulse
    fn haptic_pulse(&mut self);
    /// Release audio resources; later requests are ignored
    fn release(&mut self) {}
}

/// Feedback that only logs (native builds, headless sessions)
#[derive(Debug, Default)]
pub struct LogFeedback {
    released: bool,
}

impl Feedback for LogFeedback {
    fn play(&mut self, cue: SoundCue) {
        if !self.released {
            log::debug!("Sound cue: {}", cue.as_str());
        }
    }

    fn haptic_pulse(&mut self) {
        if !self.released {
            log::debug!("Haptic pulse");
        }
    }

    fn release(&mut self) {
        self.released = true;
    }
}

#[cfg(target_arch = "wasm32")]
pub use web::WebFeedback;

#[cfg(target_arch = "wasm32")]
mod web {
    use web_sys::{AudioContext, GainNode, OscillatorNode, OscillatorType};

    use super::{Feedback, SoundCue};

    /// Haptic pulse length in milliseconds
    const PULSE_MS: u32 = 20;
    /// Master cue volume (0.0 - 1.0)
    const VOLUME: f32 = 0.8;

    /// Procedural Web Audio cues plus `navigator.vibrate`
    pub struct WebFeedback {
        ctx: Option<AudioContext>,
        released: bool,
    }

    impl Default for WebFeedback {
        fn default() -> Self {
            Self::new()
        }
    }

    impl WebFeedback {
        pub fn new() -> Self {
            // Try to create audio context (may fail if not in secure context)
            let ctx = AudioContext::new().ok();
            if ctx.is_none() {
                log::warn!("Failed to create AudioContext - audio disabled");
            }
            Self {
                ctx,
                released: false,
            }
        }

        /// Create an oscillator with gain envelope
        fn create_osc(
            &self,
            ctx: &AudioContext,
            freq: f32,
            osc_type: OscillatorType,
        ) -> Option<(OscillatorNode, GainNode)> {
            let osc = ctx.create_oscillator().ok()?;
            let gain = ctx.create_gain().ok()?;

            osc.set_type(osc_type);
            osc.frequency().set_value(freq);
            osc.connect_with_audio_node(&gain).ok()?;
            gain.connect_with_audio_node(&ctx.destination()).ok()?;

            Some((osc, gain))
        }

        /// Pop - short bright blip dropping in pitch
        fn play_pop(&self, ctx: &AudioContext, vol: f32) {
            let Some((osc, gain)) = self.create_osc(ctx, 900.0, OscillatorType::Sine) else {
                return;
            };
            let t = ctx.current_time();

            gain.gain().set_value_at_time(vol * 0.5, t).ok();
            gain.gain()
                .exponential_ramp_to_value_at_time(0.01, t + 0.06)
                .ok();
            osc.frequency().set_value_at_time(900.0, t).ok();
            osc.frequency()
                .exponential_ramp_to_value_at_time(250.0, t + 0.06)
                .ok();

            osc.start().ok();
            osc.stop_with_when(t + 0.08).ok();
        }

        /// Splash - wet low thud with a noisy top
        fn play_splash(&self, ctx: &AudioContext, vol: f32) {
            let t = ctx.current_time();

            if let Some((osc, gain)) = self.create_osc(ctx, 180.0, OscillatorType::Triangle) {
                gain.gain().set_value_at_time(vol * 0.45, t).ok();
                gain.gain()
                    .exponential_ramp_to_value_at_time(0.01, t + 0.2)
                    .ok();
                osc.frequency().set_value_at_time(180.0, t).ok();
                osc.frequency()
                    .exponential_ramp_to_value_at_time(70.0, t + 0.2)
                    .ok();
                osc.start().ok();
                osc.stop_with_when(t + 0.22).ok();
            }

            if let Some((osc, gain)) = self.create_osc(ctx, 2400.0, OscillatorType::Sawtooth) {
                gain.gain().set_value_at_time(vol * 0.08, t).ok();
                gain.gain()
                    .exponential_ramp_to_value_at_time(0.01, t + 0.12)
                    .ok();
                osc.frequency().set_value_at_time(2400.0, t).ok();
                osc.frequency().set_value_at_time(1300.0, t + 0.03).ok();
                osc.frequency().set_value_at_time(2900.0, t + 0.06).ok();
                osc.frequency().set_value_at_time(900.0, t + 0.09).ok();
                osc.start().ok();
                osc.stop_with_when(t + 0.14).ok();
            }
        }
    }

    impl Feedback for WebFeedback {
        fn play(&mut self, cue: SoundCue) {
            let Some(ctx) = &self.ctx else { return };

            // Resume context if suspended (browsers require user gesture)
            if ctx.state() == web_sys::AudioContextState::Suspended {
                let _ = ctx.resume();
            }

            match cue {
                SoundCue::Pop => self.play_pop(ctx, VOLUME),
                SoundCue::Splash => self.play_splash(ctx, VOLUME),
            }
        }

        fn haptic_pulse(&mut self) {
            if self.released {
                return;
            }
            if let Some(window) = web_sys::window() {
                // Returns false where vibration is unsupported; nothing to do then
                let _ = window.navigator().vibrate_with_duration(PULSE_MS);
            }
        }

        fn release(&mut self) {
            self.released = true;
            if let Some(ctx) = self.ctx.take() {
                let _ = ctx.close();
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cue_names() {
        assert_eq!(SoundCue::Pop.as_str(), "pop");
        assert_eq!(SoundCue::Splash.as_str(), "splash");
    }

    #[test]
    fn test_log_feedback_release_is_idempotent() {
        let mut fb = LogFeedback::default();
        fb.play(SoundCue::Pop);
        fb.release();
        fb.release();
        fb.haptic_pulse();
        assert!(fb.released);
    }
}
