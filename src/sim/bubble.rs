//! Bubble entity
//!
//! A fixed disk that can be popped once. Popped bubbles play a short ripple
//! (expanding, fading ring) and then draw nothing.

use glam::Vec2;

use super::geom::circle_contains;
use crate::consts::POP_RIPPLE_STEP;
use crate::draw::{DrawCommand, palette};

/// Ripple stroke width
const RIPPLE_WIDTH: f32 = 3.0;
/// Outline stroke width of an intact bubble
const OUTLINE_WIDTH: f32 = 4.0;

#[derive(Debug, Clone, PartialEq)]
pub struct Bubble {
    pub center: Vec2,
    pub radius: f32,
    popped: bool,
    /// Ripple cursor in [0, 1]; 1 means the ripple has finished
    pop_progress: f32,
}

impl Bubble {
    pub fn new(center: Vec2, radius: f32) -> Self {
        debug_assert!(radius > 0.0);
        Self {
            center,
            radius,
            popped: false,
            pop_progress: 0.0,
        }
    }

    pub fn is_popped(&self) -> bool {
        self.popped
    }

    pub fn pop_progress(&self) -> f32 {
        self.pop_progress
    }

    /// Whether the point is on the disk, regardless of pop state
    pub fn hit_test(&self, point: Vec2) -> bool {
        circle_contains(self.center, self.radius, point)
    }

    /// Pop the bubble. Returns true only on the unpopped -> popped transition.
    pub fn pop(&mut self) -> bool {
        if self.popped {
            return false;
        }
        self.popped = true;
        self.pop_progress = 0.0;
        true
    }

    /// Advance the pop ripple by `dt` frames
    pub fn advance(&mut self, dt: f32) {
        if self.popped && self.pop_progress < 1.0 {
            self.pop_progress = (self.pop_progress + POP_RIPPLE_STEP * dt).min(1.0);
        }
    }

    /// Append this bubble's draw commands
    pub fn draw(&self, out: &mut Vec<DrawCommand>) {
        if !self.popped {
            let r = self.radius;
            out.push(DrawCommand::Circle {
                center: self.center,
                radius: r * 1.15,
                color: palette::BUBBLE_GLOW,
            });
            out.push(DrawCommand::Circle {
                center: self.center,
                radius: r,
                color: palette::BUBBLE_BODY,
            });
            out.push(DrawCommand::Circle {
                center: self.center - Vec2::splat(r * 0.3),
                radius: r * 0.25,
                color: palette::BUBBLE_HIGHLIGHT,
            });
            out.push(DrawCommand::Ring {
                center: self.center,
                radius: r,
                width: OUTLINE_WIDTH,
                color: palette::BUBBLE_OUTLINE,
            });
        } else if self.pop_progress < 1.0 {
            let p = self.pop_progress;
            let alpha = (255.0 * (1.0 - p)) as u8;
            out.push(DrawCommand::Ring {
                center: self.center,
                radius: self.radius * (0.7 + p * 1.2),
                width: RIPPLE_WIDTH,
                color: palette::POP_RIPPLE.with_alpha(alpha),
            });
        }
    }
}
