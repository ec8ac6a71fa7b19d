//! Sand tray: a rectangle of sand that keeps every cut made in it

use glam::Vec2;

use super::geom::Rect;
use crate::consts::*;
use crate::draw::{DrawCommand, palette};

#[derive(Debug, Clone, Default)]
pub struct SandTray {
    rect: Rect,
    cuts: Vec<Vec2>,
}

impl SandTray {
    /// Recompute the tray for a new viewport; existing cuts are kept
    pub fn resize(&mut self, width: f32, height: f32) {
        self.rect = Rect::inset(width, height, SAND_LEFT, SAND_TOP, SAND_RIGHT, SAND_BOTTOM);
    }

    pub fn cuts(&self) -> &[Vec2] {
        &self.cuts
    }

    /// Record a cut if the tap lands in the sand
    pub fn cut(&mut self, point: Vec2) -> bool {
        if !self.rect.contains(point) {
            return false;
        }
        self.cuts.push(point);
        true
    }

    pub fn clear(&mut self) {
        self.cuts.clear();
    }

    pub fn draw(&self, out: &mut Vec<DrawCommand>) {
        out.push(DrawCommand::Rect {
            min: self.rect.min,
            max: self.rect.max,
            color: palette::SAND,
        });
        let half = Vec2::new(SAND_CUT_HALF_LEN, 0.0);
        out.extend(self.cuts.iter().map(|&c| DrawCommand::Line {
            from: c - half,
            to: c + half,
            width: SAND_CUT_WIDTH,
            color: palette::SAND_CUT,
        }));
    }
}
