//! Draw commands
//!
//! Entities describe what they look like as plain data; the renderer (or a
//! test) consumes the list. Nothing here touches the GPU.

use glam::Vec2;

/// 8-bit RGBA color
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    pub const fn from_rgb_alpha(rgb: [u8; 3], a: u8) -> Self {
        Self {
            r: rgb[0],
            g: rgb[1],
            b: rgb[2],
            a,
        }
    }

    pub const fn with_alpha(self, a: u8) -> Self {
        Self { a, ..self }
    }

    /// Normalized [r, g, b, a] for vertex colors
    pub fn to_array(self) -> [f32; 4] {
        [
            self.r as f32 / 255.0,
            self.g as f32 / 255.0,
            self.b as f32 / 255.0,
            self.a as f32 / 255.0,
        ]
    }
}

/// Colors for game elements
pub mod palette {
    use super::Color;

    pub const BACKGROUND: Color = Color::rgb(0x10, 0x10, 0x10);
    pub const BUBBLE_GLOW: Color = Color::rgba(180, 220, 255, 60);
    pub const BUBBLE_BODY: Color = Color::rgb(116, 192, 252);
    pub const BUBBLE_HIGHLIGHT: Color = Color::rgb(255, 255, 255);
    pub const BUBBLE_OUTLINE: Color = Color::rgb(255, 255, 255);
    pub const POP_RIPPLE: Color = Color::rgb(255, 255, 255);
    pub const SAND: Color = Color::rgb(0xD2, 0xB4, 0x8C);
    pub const SAND_CUT: Color = Color::rgb(0x44, 0x44, 0x44);
    pub const TOGGLE_FILL: Color = Color::rgba(255, 255, 255, 40);
    pub const TOGGLE_RING: Color = Color::rgb(255, 255, 255);
    pub const OVERLAY_TEXT: Color = Color::rgb(255, 255, 255);
}

/// A single primitive to draw, in pixel coordinates (origin top-left)
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    /// Fill the whole viewport
    Clear(Color),
    /// Filled disk
    Circle {
        center: Vec2,
        radius: f32,
        color: Color,
    },
    /// Stroked circle outline, `width` centered on `radius`
    Ring {
        center: Vec2,
        radius: f32,
        width: f32,
        color: Color,
    },
    /// Filled axis-aligned rectangle
    Rect { min: Vec2, max: Vec2, color: Color },
    /// Thick line segment
    Line {
        from: Vec2,
        to: Vec2,
        width: f32,
        color: Color,
    },
    /// Overlay text anchored at its top-center
    Text {
        anchor: Vec2,
        text: String,
        size: f32,
        color: Color,
    },
}

impl DrawCommand {
    pub fn color(&self) -> Color {
        match self {
            DrawCommand::Clear(color)
            | DrawCommand::Circle { color, .. }
            | DrawCommand::Ring { color, .. }
            | DrawCommand::Rect { color, .. }
            | DrawCommand::Line { color, .. }
            | DrawCommand::Text { color, .. } => *color,
        }
    }
}
