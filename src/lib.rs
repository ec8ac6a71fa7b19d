//! Stress Buster - tap-driven stress relief toys
//!
//! Core modules:
//! - `sim`: Interactive simulation (bubble grid, splash particles, sand tray, input dispatch)
//! - `game`: Host-facing controller wiring the sim to feedback, progress and preferences
//! - `draw`: Pure draw-command descriptions produced by the sim
//! - `renderer`: WebGPU rendering of draw commands
//! - `progress`: Satisfaction meter and daily challenge
//! - `persistence`: Preference store port and its backends
//! - `audio`: Sound and haptic feedback port

pub mod audio;
pub mod draw;
pub mod game;
pub mod persistence;
pub mod progress;
pub mod renderer;
pub mod settings;
pub mod sim;

pub use game::Game;
pub use settings::Settings;

use glam::Vec2;

/// Game configuration constants
pub mod consts {
    /// One animation frame, the unit `dt` is measured in
    pub const FRAME: f32 = 1.0;

    /// Bubble grid dimensions
    pub const GRID_COLS: usize = 8;
    pub const GRID_ROWS: usize = 12;
    /// Outer padding in pixels (top offset is twice this)
    pub const GRID_PADDING: f32 = 40.0;
    /// Bubble radius as a fraction of half the cell size
    pub const BUBBLE_RADIUS_FACTOR: f32 = 0.8;
    /// Pop ripple progress per frame
    pub const POP_RIPPLE_STEP: f32 = 0.07;
    /// Reset prompt fade-in per frame
    pub const RESET_PROMPT_STEP: f32 = 0.05;

    /// Splash burst sizes
    pub const BURST_LARGE: usize = 14;
    pub const BURST_SMALL: usize = 8;
    /// Maximum scatter distance from the tap point
    pub const SPLASH_MAX_DIST: f32 = 100.0;
    pub const SPLASH_RADIUS_MIN: u32 = 10;
    pub const SPLASH_RADIUS_MAX: u32 = 45;
    pub const SPLASH_SATURATION: f32 = 0.85;
    pub const SPLASH_VALUE: f32 = 1.0;
    pub const SPLASH_DRIFT_Y_MIN: i32 = 1;
    pub const SPLASH_DRIFT_Y_MAX: i32 = 4;
    pub const SPLASH_DRIFT_X_MAX: i32 = 2;
    pub const SPLASH_SHRINK_MIN: f32 = 0.15;
    pub const SPLASH_SHRINK_MAX: f32 = 0.4;
    pub const SPLASH_FADE_MIN: u32 = 5;
    pub const SPLASH_FADE_MAX: u32 = 11;
    /// Culling thresholds (vanish behavior)
    pub const SPLASH_MIN_RADIUS: f32 = 1.0;
    pub const SPLASH_MIN_ALPHA: f32 = 5.0;

    /// Sand tray inset, as fractions of the viewport
    pub const SAND_LEFT: f32 = 0.15;
    pub const SAND_RIGHT: f32 = 0.85;
    pub const SAND_TOP: f32 = 0.25;
    pub const SAND_BOTTOM: f32 = 0.8;
    /// Half length of a cut mark
    pub const SAND_CUT_HALF_LEN: f32 = 200.0;
    pub const SAND_CUT_WIDTH: f32 = 8.0;

    /// Mode toggle button (top-right corner)
    pub const TOGGLE_RADIUS: f32 = 36.0;
    pub const TOGGLE_MARGIN: f32 = 12.0;

    /// Satisfaction gained per action
    pub const SATISFACTION_POP: u8 = 2;
    pub const SATISFACTION_SPLASH: u8 = 1;
    pub const SATISFACTION_SAND: u8 = 1;
    pub const SATISFACTION_MAX: u8 = 100;

    /// Daily challenge goal when none is stored
    pub const DEFAULT_DAILY_GOAL: i64 = 50;
}

/// Convert polar (r, theta) to cartesian (x, y)
#[inline]
pub fn polar_to_cartesian(r: f32, theta: f32) -> Vec2 {
    Vec2::new(r * theta.cos(), r * theta.sin())
}

/// Convert HSV (hue in degrees, saturation and value in 0-1) to 8-bit RGB
pub fn hsv_to_rgb(hue: f32, saturation: f32, value: f32) -> [u8; 3] {
    let h = hue.rem_euclid(360.0) / 60.0;
    let c = value * saturation;
    let x = c * (1.0 - (h % 2.0 - 1.0).abs());
    let m = value - c;

    let (r, g, b) = match h as u32 {
        0 => (c, x, 0.0),
        1 => (x, c, 0.0),
        2 => (0.0, c, x),
        3 => (0.0, x, c),
        4 => (x, 0.0, c),
        _ => (c, 0.0, x),
    };

    let to_byte = |v: f32| ((v + m) * 255.0).round().clamp(0.0, 255.0) as u8;
    [to_byte(r), to_byte(g), to_byte(b)]
}
