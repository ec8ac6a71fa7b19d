//! Game state and core simulation types
//!
//! Everything the input and render passes touch lives here, owned by one
//! `GameState` on the UI thread.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;

use super::geom::circle_contains;
use super::grid::BubbleBoard;
use super::mode::Mode;
use super::sand::SandTray;
use super::splash::SplashField;
use crate::consts::*;

/// On-screen mode toggle, a circle anchored to the top-right corner
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ToggleButton {
    pub center: Vec2,
    pub radius: f32,
}

impl ToggleButton {
    pub fn for_viewport(width: f32) -> Self {
        let inset = TOGGLE_MARGIN + TOGGLE_RADIUS;
        Self {
            center: Vec2::new(width - inset, inset),
            radius: TOGGLE_RADIUS,
        }
    }

    pub fn hit_test(&self, point: Vec2) -> bool {
        circle_contains(self.center, self.radius, point)
    }
}

/// Complete interactive state
#[derive(Debug, Clone)]
pub struct GameState {
    /// Viewport size in pixels (0 until the host reports a size)
    pub width: f32,
    pub height: f32,
    mode: Mode,
    pub board: BubbleBoard,
    pub field: SplashField,
    pub tray: SandTray,
    /// Present when the toggle button is enabled
    pub toggle: Option<ToggleButton>,
    toggle_enabled: bool,
    /// Randomness for splash sampling
    pub rng: Pcg32,
}

impl GameState {
    /// Create an unsized state in bubble mode
    pub fn new(seed: u64, burst_size: usize, toggle_enabled: bool) -> Self {
        Self {
            width: 0.0,
            height: 0.0,
            mode: Mode::default(),
            board: BubbleBoard::default(),
            field: SplashField::new(burst_size),
            tray: SandTray::default(),
            toggle: None,
            toggle_enabled,
            rng: Pcg32::seed_from_u64(seed),
        }
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    /// Switch modes, resetting the entered mode's state
    pub fn set_mode(&mut self, mode: Mode) {
        self.mode = mode;
        match mode {
            Mode::Bubble => self.board.rebuild(self.width, self.height),
            Mode::PaintSplash => self.field.clear(),
            Mode::SandCut => self.tray.clear(),
            Mode::Planned(planned) => {
                log::debug!("Entered planned mode {planned:?}, no interaction available");
            }
        }
        log::info!("Mode set to {}", mode.as_str());
    }

    /// Apply a new viewport size. The bubble grid is rebuilt from scratch.
    pub fn resize(&mut self, width: f32, height: f32) {
        self.width = width;
        self.height = height;
        self.tray.resize(width, height);
        self.toggle = self
            .toggle_enabled
            .then(|| ToggleButton::for_viewport(width));
        self.board.rebuild(width, height);
    }
}
