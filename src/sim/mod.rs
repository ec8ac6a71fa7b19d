//! Interactive simulation module
//!
//! All gameplay logic lives here. This module must stay pure:
//! - Animation advances only through `advance(dt)`, never while rendering
//! - Randomness only from the state's seeded RNG
//! - Stable iteration order (creation order)
//! - No rendering backend, audio or storage dependencies

pub mod bubble;
pub mod geom;
pub mod grid;
pub mod mode;
pub mod sand;
pub mod splash;
pub mod state;
pub mod tick;

pub use bubble::Bubble;
pub use geom::{Rect, circle_contains};
pub use grid::{BoardTap, BubbleBoard, GridLayout, layout_bubbles};
pub use mode::{Mode, PlannedMode};
pub use sand::SandTray;
pub use splash::{Splash, SplashBehavior, SplashField, supported_burst_size};
pub use state::{GameState, ToggleButton};
pub use tick::{TapOutcome, advance, handle_press, render};
