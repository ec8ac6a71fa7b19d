//! Host-facing game controller
//!
//! `Game` owns the simulation state and everything a tap can affect: the
//! satisfaction meter, the daily challenge in the preference store, and
//! sound/haptic feedback. The host drives it with `press` on every
//! press-down and `frame` on every animation frame, scheduling the next
//! frame unconditionally.

use glam::Vec2;

use crate::audio::{Feedback, SoundCue};
use crate::consts::*;
use crate::draw::DrawCommand;
use crate::persistence::{PrefKey, PrefStore, PrefValue, write_or_warn};
use crate::progress::{DailyChallenge, SatisfactionMeter, Unlock};
use crate::settings::Settings;
use crate::sim::{self, GameState, Mode, SplashBehavior, TapOutcome};

/// Listener invoked once per unlock
pub type UnlockListener = Box<dyn FnMut(Unlock)>;

pub struct Game<S: PrefStore, F: Feedback> {
    state: GameState,
    settings: Settings,
    meter: SatisfactionMeter,
    store: S,
    feedback: F,
    unlock_listener: Option<UnlockListener>,
    /// Set by `detach`; feedback requests stop from then on
    detached: bool,
}

impl<S: PrefStore, F: Feedback> Game<S, F> {
    /// Create a game with settings read from the store
    pub fn new(store: S, feedback: F, seed: u64) -> Self {
        let settings = Settings::load(&store);
        Self::with_settings(store, feedback, seed, settings)
    }

    pub fn with_settings(store: S, feedback: F, seed: u64, settings: Settings) -> Self {
        Self {
            state: GameState::new(seed, settings.burst_size(), settings.mode_toggle),
            settings,
            meter: SatisfactionMeter::default(),
            store,
            feedback,
            unlock_listener: None,
            detached: false,
        }
    }

    /// Attach to the host view: roll the daily challenge over and enter the
    /// requested mode (unknown names fall back to bubble mode)
    pub fn attach(&mut self, mode_name: Option<&str>, today: &str) -> Mode {
        DailyChallenge::begin_day(&mut self.store, today);
        let mode = Mode::from_name_or_default(mode_name);
        if !mode.is_supported() {
            log::info!("{} has no interaction yet, presses will be ignored", mode.as_str());
        }
        self.set_mode(mode);
        mode
    }

    /// Release platform resources when the view goes away
    pub fn detach(&mut self) {
        self.detached = true;
        self.feedback.release();
        log::info!("Game detached");
    }

    /// Viewport size changed; rebuilds the grid, sand tray and toggle button
    pub fn resize(&mut self, width: f32, height: f32) {
        log::debug!("Resize to {width}x{height}");
        self.state.resize(width, height);
    }

    pub fn mode(&self) -> Mode {
        self.state.mode()
    }

    pub fn set_mode(&mut self, mode: Mode) {
        self.state.set_mode(mode);
    }

    /// Handle a press-down at pixel coordinates
    pub fn press(&mut self, x: f32, y: f32) -> TapOutcome {
        let outcome = sim::handle_press(&mut self.state, Vec2::new(x, y));
        match outcome {
            TapOutcome::Popped { .. } => {
                self.haptic();
                self.sound(SoundCue::Pop);
                self.reward(SATISFACTION_POP);
            }
            TapOutcome::Splashed { .. } => {
                self.sound(SoundCue::Splash);
                self.haptic();
                self.reward(SATISFACTION_SPLASH);
            }
            TapOutcome::SandCut => self.reward(SATISFACTION_SAND),
            TapOutcome::ModeToggled(_)
            | TapOutcome::GridReset
            | TapOutcome::Miss
            | TapOutcome::Unsupported(_) => {}
        }
        outcome
    }

    /// Advance animations by `dt` frames
    pub fn advance(&mut self, dt: f32) {
        sim::advance(&mut self.state, dt);
    }

    /// Draw commands for the current state
    pub fn render(&self) -> Vec<DrawCommand> {
        sim::render(&self.state)
    }

    /// One render-loop iteration: advance, then render
    pub fn frame(&mut self, dt: f32) -> Vec<DrawCommand> {
        self.advance(dt);
        self.render()
    }

    /// Takes effect on the next advance
    pub fn set_splash_behavior(&mut self, behavior: SplashBehavior) {
        self.state.field.set_behavior(behavior);
        log::info!("Splash behavior set to {}", behavior.as_str());
    }

    pub fn splash_behavior(&self) -> SplashBehavior {
        self.state.field.behavior()
    }

    pub fn clear_splashes(&mut self) {
        self.state.field.clear();
        log::info!("Splashes cleared");
    }

    pub fn set_satisfaction_listener(&mut self, listener: impl FnMut(u8) + 'static) {
        self.meter.set_listener(listener);
    }

    pub fn set_unlock_listener(&mut self, listener: impl FnMut(Unlock) + 'static) {
        self.unlock_listener = Some(Box::new(listener));
    }

    pub fn set_sound_enabled(&mut self, enabled: bool) {
        self.settings.sound_enabled = enabled;
        write_or_warn(&mut self.store, PrefKey::SoundOn, PrefValue::Bool(enabled));
    }

    pub fn set_vibration_enabled(&mut self, enabled: bool) {
        self.settings.vibration_enabled = enabled;
        write_or_warn(&mut self.store, PrefKey::VibrationOn, PrefValue::Bool(enabled));
    }

    pub fn satisfaction(&self) -> u8 {
        self.meter.value()
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn feedback(&self) -> &F {
        &self.feedback
    }

    fn sound(&mut self, cue: SoundCue) {
        if self.settings.sound_enabled && !self.detached {
            self.feedback.play(cue);
        }
    }

    fn haptic(&mut self) {
        if self.settings.vibration_enabled && !self.detached {
            self.feedback.haptic_pulse();
        }
    }

    /// Credit one qualifying action
    fn reward(&mut self, satisfaction: u8) {
        self.meter.add(satisfaction);
        if let Some(unlock) = DailyChallenge::record_action(&mut self.store) {
            if let Some(listener) = self.unlock_listener.as_mut() {
                listener(unlock);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::persistence::{MemoryStore, read_bool, read_int};
    use std::cell::RefCell;
    use std::rc::Rc;

    /// Feedback that remembers what it was asked to do
    #[derive(Debug, Default)]
    struct RecordingFeedback {
        cues: Vec<SoundCue>,
        pulses: usize,
        released: bool,
    }

    impl Feedback for RecordingFeedback {
        fn play(&mut self, cue: SoundCue) {
            self.cues.push(cue);
        }

        fn haptic_pulse(&mut self) {
            self.pulses += 1;
        }

        fn release(&mut self) {
            self.released = true;
        }
    }

    const TODAY: &str = "2026-10-18";

    fn game(mode: &str) -> Game<MemoryStore, RecordingFeedback> {
        let mut game = Game::new(MemoryStore::new(), RecordingFeedback::default(), 12345);
        game.attach(Some(mode), TODAY);
        game.resize(1080.0, 1920.0);
        game
    }

    #[test]
    fn test_first_pop_scenario() {
        let mut game = game("BUBBLE");
        assert_eq!(game.state().board.total(), 96);

        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = seen.clone();
        game.set_satisfaction_listener(move |v| sink.borrow_mut().push(v));

        let c = game.state().board.bubbles()[0].center;
        let outcome = game.press(c.x, c.y);
        assert_eq!(
            outcome,
            TapOutcome::Popped {
                index: 0,
                all_popped: false
            }
        );
        assert_eq!(game.satisfaction(), 2);
        assert_eq!(*seen.borrow(), vec![2]);
        assert_eq!(DailyChallenge::progress(game.store()), 1);
        assert_eq!(game.feedback().cues, vec![SoundCue::Pop]);
        assert_eq!(game.feedback().pulses, 1);
    }

    #[test]
    fn test_repeat_pop_has_no_side_effects() {
        let mut game = game("BUBBLE");
        let c = game.state().board.bubbles()[5].center;
        game.press(c.x, c.y);
        assert_eq!(game.press(c.x, c.y), TapOutcome::Miss);
        assert_eq!(game.satisfaction(), 2);
        assert_eq!(DailyChallenge::progress(game.store()), 1);
        assert_eq!(game.feedback().cues.len(), 1);
    }

    #[test]
    fn test_splash_scenario() {
        let mut game = game("PAINT_SPLASH");
        let outcome = game.press(500.0, 800.0);
        assert_eq!(outcome, TapOutcome::Splashed { count: 14 });
        assert_eq!(game.state().field.len(), 14);
        // One increment per burst, not per drop
        assert_eq!(game.satisfaction(), 1);
        assert_eq!(DailyChallenge::progress(game.store()), 1);
        assert_eq!(game.feedback().cues, vec![SoundCue::Splash]);
        assert_eq!(game.feedback().pulses, 1);

        for _ in 0..60 {
            game.frame(FRAME);
        }
        assert!(game.state().field.is_empty());
    }

    #[test]
    fn test_small_burst_variant() {
        let settings = Settings::default().with_burst_size(BURST_SMALL);
        let mut game =
            Game::with_settings(MemoryStore::new(), RecordingFeedback::default(), 1, settings);
        game.attach(Some("PAINT_SPLASH"), TODAY);
        game.resize(1080.0, 1920.0);
        assert_eq!(game.press(500.0, 800.0), TapOutcome::Splashed { count: 8 });
        assert_eq!(game.state().field.len(), 8);
    }

    #[test]
    fn test_permanent_splashes_persist_until_cleared() {
        let mut game = game("PAINT_SPLASH");
        game.set_splash_behavior(SplashBehavior::Permanent);
        game.press(500.0, 800.0);
        for _ in 0..200 {
            game.frame(FRAME);
        }
        assert_eq!(game.state().field.len(), 14);
        game.clear_splashes();
        assert!(game.state().field.is_empty());
    }

    #[test]
    fn test_sand_cut_counts_without_feedback() {
        let mut game = game("SAND_CUT");
        assert_eq!(game.press(540.0, 960.0), TapOutcome::SandCut);
        assert_eq!(game.satisfaction(), 1);
        assert_eq!(DailyChallenge::progress(game.store()), 1);
        assert!(game.feedback().cues.is_empty());

        assert_eq!(game.press(10.0, 1900.0), TapOutcome::Miss);
        assert_eq!(game.satisfaction(), 1);
    }

    #[test]
    fn test_unknown_mode_falls_back() {
        let game = game("FIDGET_SPINNER");
        assert_eq!(game.mode(), Mode::Bubble);
    }

    #[test]
    fn test_planned_mode_press_is_inert() {
        let mut game = game("LEAF_CRUSH");
        assert!(matches!(game.press(540.0, 960.0), TapOutcome::Unsupported(_)));
        assert_eq!(game.satisfaction(), 0);
        assert_eq!(DailyChallenge::progress(game.store()), 0);
    }

    #[test]
    fn test_muted_and_still() {
        let store = MemoryStore::new()
            .with(PrefKey::SoundOn, PrefValue::Bool(false))
            .with(PrefKey::VibrationOn, PrefValue::Bool(false));
        let mut game = Game::new(store, RecordingFeedback::default(), 7);
        game.attach(Some("PAINT_SPLASH"), TODAY);
        game.resize(1080.0, 1920.0);
        game.press(500.0, 800.0);
        assert!(game.feedback().cues.is_empty());
        assert_eq!(game.feedback().pulses, 0);
        // Progress still counts
        assert_eq!(game.satisfaction(), 1);
    }

    #[test]
    fn test_settings_write_through() {
        let mut game = game("BUBBLE");
        game.set_sound_enabled(false);
        game.set_vibration_enabled(false);
        assert!(!read_bool(game.store(), PrefKey::SoundOn, true));
        assert!(!read_bool(game.store(), PrefKey::VibrationOn, true));
        assert!(!game.settings().sound_enabled);
    }

    #[test]
    fn test_unlock_notified_once() {
        let store = MemoryStore::new()
            .with(PrefKey::LastPlayDate, PrefValue::Str(TODAY.into()))
            .with(PrefKey::DailyProgress, PrefValue::Int(48))
            .with(PrefKey::DailyGoal, PrefValue::Int(50));
        let mut game = Game::new(store, RecordingFeedback::default(), 3);
        game.attach(Some("PAINT_SPLASH"), TODAY);
        game.resize(1080.0, 1920.0);

        let unlocks = Rc::new(RefCell::new(Vec::new()));
        let sink = unlocks.clone();
        game.set_unlock_listener(move |u| sink.borrow_mut().push(u));

        for _ in 0..4 {
            game.press(500.0, 800.0);
        }
        assert_eq!(*unlocks.borrow(), vec![Unlock::SuperSplash]);
        assert_eq!(read_int(game.store(), PrefKey::DailyProgress, 0), 52);
        assert!(read_bool(game.store(), PrefKey::UnlockSuperSplash, false));
    }

    #[test]
    fn test_new_day_resets_progress_on_attach() {
        let store = MemoryStore::new()
            .with(PrefKey::LastPlayDate, PrefValue::Str("2026-10-01".into()))
            .with(PrefKey::DailyProgress, PrefValue::Int(17));
        let mut game = Game::new(store, RecordingFeedback::default(), 3);
        game.attach(None, TODAY);
        assert_eq!(DailyChallenge::progress(game.store()), 0);
        assert_eq!(DailyChallenge::goal(game.store()), DEFAULT_DAILY_GOAL);
    }

    #[test]
    fn test_satisfaction_caps_over_full_sheet() {
        let mut game = game("BUBBLE");
        let centers: Vec<Vec2> = game.state().board.bubbles().iter().map(|b| b.center).collect();
        for c in &centers {
            game.press(c.x, c.y);
        }
        assert_eq!(game.satisfaction(), 100);
        assert!(game.state().board.all_popped());
        assert_eq!(DailyChallenge::progress(game.store()), 96);

        // Reset tap is not a qualifying action
        assert_eq!(game.press(1.0, 1900.0), TapOutcome::GridReset);
        assert_eq!(DailyChallenge::progress(game.store()), 96);
        assert_eq!(game.state().board.popped_count(), 0);
    }

    #[test]
    fn test_toggle_button_cycles_modes() {
        let mut game = game("BUBBLE");
        let toggle = game.state().toggle.unwrap().center;
        for expected in [Mode::PaintSplash, Mode::SandCut, Mode::Bubble] {
            assert_eq!(game.press(toggle.x, toggle.y), TapOutcome::ModeToggled(expected));
            assert_eq!(game.mode(), expected);
        }
        assert_eq!(game.satisfaction(), 0);
    }

    #[test]
    fn test_frame_before_resize_is_safe() {
        let mut game = Game::new(MemoryStore::new(), RecordingFeedback::default(), 1);
        game.attach(Some("BUBBLE"), TODAY);
        let frame = game.frame(FRAME);
        assert!(!frame.is_empty());
        assert_eq!(game.press(10.0, 10.0), TapOutcome::Miss);
    }

    #[test]
    fn test_detach_releases_feedback() {
        let mut game = game("BUBBLE");
        game.detach();
        assert!(game.feedback().released);
    }

    #[test]
    fn test_no_feedback_after_detach() {
        let mut game = game("PAINT_SPLASH");
        game.detach();
        assert_eq!(game.press(500.0, 800.0), TapOutcome::Splashed { count: 14 });
        assert!(game.feedback().cues.is_empty());
        assert_eq!(game.feedback().pulses, 0);
    }

    #[test]
    fn test_unsupported_burst_size_in_settings_falls_back() {
        let settings: Settings = serde_json::from_str(
            r#"{"sound_enabled":true,"vibration_enabled":true,"burst_size":3,"mode_toggle":true}"#,
        )
        .unwrap();
        let mut game =
            Game::with_settings(MemoryStore::new(), RecordingFeedback::default(), 1, settings);
        game.attach(Some("PAINT_SPLASH"), TODAY);
        game.resize(1080.0, 1920.0);
        assert_eq!(
            game.press(500.0, 800.0),
            TapOutcome::Splashed { count: BURST_LARGE }
        );
        assert_eq!(game.state().field.len(), BURST_LARGE);
    }

    #[test]
    fn test_toggle_button_can_be_disabled() {
        let settings = Settings::default().with_mode_toggle(false);
        let mut game =
            Game::with_settings(MemoryStore::new(), RecordingFeedback::default(), 1, settings);
        game.attach(Some("BUBBLE"), TODAY);
        game.resize(1080.0, 1920.0);
        assert!(game.state().toggle.is_none());
        // Where the button would be is just an empty corner
        assert_eq!(game.press(1032.0, 48.0), TapOutcome::Miss);
        assert_eq!(game.mode(), Mode::Bubble);
    }

    #[test]
    fn test_resize_discards_pops() {
        let mut game = game("BUBBLE");
        let c = game.state().board.bubbles()[0].center;
        game.press(c.x, c.y);
        assert_eq!(game.state().board.popped_count(), 1);

        game.resize(720.0, 1280.0);
        let board = &game.state().board;
        assert_eq!(board.total(), 96);
        assert_eq!(board.popped_count(), 0);
        assert!(!board.all_popped());
        assert!(board.bubbles().iter().all(|b| !b.is_popped()));
    }
}
