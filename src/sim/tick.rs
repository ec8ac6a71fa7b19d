//! Input dispatch, frame advance and scene rendering
//!
//! A frame is two explicit phases: `advance(state, dt)` mutates animation
//! state, `render(state)` reads it and produces draw commands. `dt` is in
//! frames, so `advance(state, FRAME)` is one display frame.

use glam::Vec2;

use super::grid::BoardTap;
use super::mode::{Mode, PlannedMode};
use super::state::GameState;
use crate::consts::*;
use crate::draw::{DrawCommand, palette};

/// Overlay text sizes
const TITLE_SIZE: f32 = 32.0;
const PROMPT_SIZE: f32 = 44.0;
const RESET_PROMPT: &str = "All popped! Tap anywhere to reset";
const UNSUPPORTED_PROMPT: &str = "Coming soon";

/// What a press-down did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TapOutcome {
    /// The toggle button switched to this mode
    ModeToggled(Mode),
    /// A bubble popped
    Popped { index: usize, all_popped: bool },
    /// Tap after the sheet was cleared rebuilt it
    GridReset,
    /// A splash burst of `count` drops landed
    Splashed { count: usize },
    /// A cut was made in the sand
    SandCut,
    /// Nothing was hit
    Miss,
    /// The current mode has no interaction yet
    Unsupported(PlannedMode),
}

/// Route a press-down at `point` to the toggle button or the current mode
pub fn handle_press(state: &mut GameState, point: Vec2) -> TapOutcome {
    if state.toggle.is_some_and(|t| t.hit_test(point)) {
        let next = state.mode().next();
        state.set_mode(next);
        return TapOutcome::ModeToggled(next);
    }

    match state.mode() {
        Mode::Bubble => match state.board.tap(point, state.width, state.height) {
            BoardTap::Popped { index, all_popped } => TapOutcome::Popped { index, all_popped },
            BoardTap::Reset => TapOutcome::GridReset,
            BoardTap::Miss => TapOutcome::Miss,
        },
        Mode::PaintSplash => {
            let GameState { field, rng, .. } = state;
            field.spawn_burst(point, rng);
            TapOutcome::Splashed {
                count: field.burst_size(),
            }
        }
        Mode::SandCut => {
            if state.tray.cut(point) {
                TapOutcome::SandCut
            } else {
                TapOutcome::Miss
            }
        }
        Mode::Planned(planned) => {
            log::debug!("Press ignored: {} is not supported yet", state.mode().as_str());
            TapOutcome::Unsupported(planned)
        }
    }
}

/// Advance the current mode's animations by `dt` frames
pub fn advance(state: &mut GameState, dt: f32) {
    match state.mode() {
        Mode::Bubble => state.board.advance(dt),
        Mode::PaintSplash => state.field.advance(dt),
        Mode::SandCut | Mode::Planned(_) => {}
    }
}

/// Build the frame: background, mode visuals, overlay, toggle button
pub fn render(state: &GameState) -> Vec<DrawCommand> {
    let mut out = vec![DrawCommand::Clear(palette::BACKGROUND)];
    let center_x = state.width / 2.0;

    match state.mode() {
        Mode::Bubble => {
            for bubble in state.board.bubbles() {
                bubble.draw(&mut out);
            }
            let reveal = state.board.prompt_reveal();
            if state.board.all_popped() && reveal > 0.0 {
                out.push(DrawCommand::Text {
                    anchor: Vec2::new(center_x, state.height / 2.0),
                    text: RESET_PROMPT.to_string(),
                    size: PROMPT_SIZE,
                    color: palette::OVERLAY_TEXT.with_alpha((reveal * 255.0) as u8),
                });
            }
        }
        Mode::PaintSplash => state.field.draw(&mut out),
        Mode::SandCut => state.tray.draw(&mut out),
        Mode::Planned(_) => out.push(DrawCommand::Text {
            anchor: Vec2::new(center_x, state.height / 2.0),
            text: UNSUPPORTED_PROMPT.to_string(),
            size: PROMPT_SIZE,
            color: palette::OVERLAY_TEXT,
        }),
    }

    out.push(DrawCommand::Text {
        anchor: Vec2::new(center_x, GRID_PADDING * 0.5),
        text: state.mode().label().to_string(),
        size: TITLE_SIZE,
        color: palette::OVERLAY_TEXT,
    });

    if let Some(toggle) = state.toggle {
        out.push(DrawCommand::Circle {
            center: toggle.center,
            radius: toggle.radius,
            color: palette::TOGGLE_FILL,
        });
        out.push(DrawCommand::Ring {
            center: toggle.center,
            radius: toggle.radius,
            width: 3.0,
            color: palette::TOGGLE_RING,
        });
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn state_in(mode: Mode) -> GameState {
        let mut state = GameState::new(12345, BURST_LARGE, true);
        state.resize(1080.0, 1920.0);
        state.set_mode(mode);
        state
    }

    fn texts(frame: &[DrawCommand]) -> Vec<String> {
        frame
            .iter()
            .filter_map(|c| match c {
                DrawCommand::Text { text, .. } => Some(text.clone()),
                _ => None,
            })
            .collect()
    }

    #[test]
    fn test_toggle_button_takes_priority() {
        let mut state = state_in(Mode::Bubble);
        let toggle = state.toggle.unwrap().center;
        assert_eq!(handle_press(&mut state, toggle), TapOutcome::ModeToggled(Mode::PaintSplash));
        assert_eq!(state.mode(), Mode::PaintSplash);
        // No burst was spawned by the toggle tap
        assert!(state.field.is_empty());
    }

    #[test]
    fn test_bubble_press_pops_first_bubble() {
        let mut state = state_in(Mode::Bubble);
        let c = state.board.bubbles()[0].center;
        assert_eq!(
            handle_press(&mut state, c),
            TapOutcome::Popped {
                index: 0,
                all_popped: false
            }
        );
        assert_eq!(handle_press(&mut state, c), TapOutcome::Miss);
    }

    #[test]
    fn test_full_sheet_cycle() {
        let mut state = state_in(Mode::Bubble);
        let centers: Vec<Vec2> = state.board.bubbles().iter().map(|b| b.center).collect();
        let last = centers.len() - 1;
        for (i, c) in centers.iter().enumerate() {
            let outcome = handle_press(&mut state, *c);
            assert_eq!(
                outcome,
                TapOutcome::Popped {
                    index: i,
                    all_popped: i == last
                }
            );
        }

        // Prompt fades in over frames
        advance(&mut state, FRAME);
        let frame = render(&state);
        assert!(texts(&frame).contains(&RESET_PROMPT.to_string()));

        assert_eq!(handle_press(&mut state, Vec2::new(540.0, 960.0)), TapOutcome::GridReset);
        assert_eq!(state.board.popped_count(), 0);
        assert_eq!(state.board.total(), 96);
    }

    #[test]
    fn test_paint_press_spawns_burst() {
        let mut state = state_in(Mode::PaintSplash);
        assert_eq!(
            handle_press(&mut state, Vec2::new(500.0, 800.0)),
            TapOutcome::Splashed { count: 14 }
        );
        assert_eq!(state.field.len(), 14);

        for _ in 0..60 {
            advance(&mut state, FRAME);
        }
        assert!(state.field.is_empty());
    }

    #[test]
    fn test_advance_only_touches_current_mode() {
        let mut state = state_in(Mode::PaintSplash);
        handle_press(&mut state, Vec2::new(500.0, 800.0));
        state.set_mode(Mode::SandCut);
        // Splashes were not cleared by leaving paint mode, and do not decay while away
        let before = state.field.splashes().to_vec();
        advance(&mut state, FRAME);
        assert_eq!(state.field.splashes(), before.as_slice());
    }

    #[test]
    fn test_sand_press_inside_and_outside() {
        let mut state = state_in(Mode::SandCut);
        assert_eq!(handle_press(&mut state, Vec2::new(540.0, 960.0)), TapOutcome::SandCut);
        assert_eq!(handle_press(&mut state, Vec2::new(540.0, 200.0)), TapOutcome::Miss);
        assert_eq!(state.tray.cuts().len(), 1);
    }

    #[test]
    fn test_planned_mode_rejects_press() {
        let mut state = state_in(Mode::Planned(PlannedMode::Shredder));
        assert_eq!(
            handle_press(&mut state, Vec2::new(540.0, 960.0)),
            TapOutcome::Unsupported(PlannedMode::Shredder)
        );
        let frame = render(&state);
        assert!(texts(&frame).contains(&UNSUPPORTED_PROMPT.to_string()));
    }

    #[test]
    fn test_render_starts_with_background_and_has_title() {
        for mode in Mode::PLAYABLE {
            let state = state_in(mode);
            let frame = render(&state);
            assert_eq!(frame[0], DrawCommand::Clear(palette::BACKGROUND));
            assert!(texts(&frame).contains(&mode.label().to_string()));
        }
    }

    #[test]
    fn test_render_bubble_mode_draws_every_bubble() {
        let state = state_in(Mode::Bubble);
        let frame = render(&state);
        let bodies = frame
            .iter()
            .filter(|c| c.color() == palette::BUBBLE_BODY)
            .count();
        assert_eq!(bodies, 96);
    }

    #[test]
    fn test_render_does_not_mutate() {
        let mut state = state_in(Mode::PaintSplash);
        handle_press(&mut state, Vec2::new(500.0, 800.0));
        let first = render(&state);
        let second = render(&state);
        assert_eq!(first, second);
    }
}
