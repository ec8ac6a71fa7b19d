//! Paint splash particle system
//!
//! Each tap scatters a burst of colored disks around the tap point. In the
//! vanish behavior they drift, shrink and fade until culled; in the permanent
//! behavior they stay exactly where they landed.

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::draw::{Color, DrawCommand};
use crate::{hsv_to_rgb, polar_to_cartesian};

/// How splashes behave after they land
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum SplashBehavior {
    /// Drift, shrink, fade, then disappear
    #[default]
    Vanish,
    /// Stay forever
    Permanent,
}

impl SplashBehavior {
    pub fn as_str(&self) -> &'static str {
        match self {
            SplashBehavior::Vanish => "VANISH",
            SplashBehavior::Permanent => "PERMANENT",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_uppercase().as_str() {
            "VANISH" => Some(SplashBehavior::Vanish),
            "PERMANENT" => Some(SplashBehavior::Permanent),
            _ => None,
        }
    }
}

/// A single paint drop
#[derive(Debug, Clone, PartialEq)]
pub struct Splash {
    pub pos: Vec2,
    pub radius: f32,
    /// Opaque fill color
    pub rgb: [u8; 3],
    /// 0-255
    pub alpha: f32,
    /// Per-frame drift
    pub drift: Vec2,
    /// Radius lost per frame
    pub shrink_rate: f32,
    /// Alpha lost per frame
    pub fade_rate: f32,
}

impl Splash {
    /// Sample a drop scattered around `origin`
    pub fn scatter(origin: Vec2, rng: &mut impl Rng) -> Self {
        let angle = rng.random::<f32>() * 360.0;
        let dist = rng.random::<f32>() * SPLASH_MAX_DIST;
        let pos = origin + polar_to_cartesian(dist, angle.to_radians());

        let hue = rng.random::<f32>() * 360.0;

        Self {
            pos,
            radius: rng.random_range(SPLASH_RADIUS_MIN..=SPLASH_RADIUS_MAX) as f32,
            rgb: hsv_to_rgb(hue, SPLASH_SATURATION, SPLASH_VALUE),
            alpha: 255.0,
            drift: Vec2::new(
                rng.random_range(-SPLASH_DRIFT_X_MAX..=SPLASH_DRIFT_X_MAX) as f32,
                rng.random_range(SPLASH_DRIFT_Y_MIN..=SPLASH_DRIFT_Y_MAX) as f32,
            ),
            shrink_rate: rng.random_range(SPLASH_SHRINK_MIN..SPLASH_SHRINK_MAX),
            fade_rate: rng.random_range(SPLASH_FADE_MIN..=SPLASH_FADE_MAX) as f32,
        }
    }

    /// Drift, shrink and fade by `dt` frames
    pub fn decay(&mut self, dt: f32) {
        self.pos += self.drift * dt;
        self.radius -= self.shrink_rate * dt;
        self.alpha = (self.alpha - self.fade_rate * dt).max(0.0);
    }

    pub fn is_spent(&self) -> bool {
        self.radius <= SPLASH_MIN_RADIUS || self.alpha <= SPLASH_MIN_ALPHA
    }

    pub fn color(&self) -> Color {
        Color::from_rgb_alpha(self.rgb, self.alpha.round().clamp(0.0, 255.0) as u8)
    }
}

/// Live splash particles
#[derive(Debug, Clone)]
pub struct SplashField {
    splashes: Vec<Splash>,
    behavior: SplashBehavior,
    burst_size: usize,
    /// Bursts spawned since the last clear
    bursts: u32,
}

impl Default for SplashField {
    fn default() -> Self {
        Self::new(BURST_LARGE)
    }
}

/// Drops per burst: 8 or 14, anything else becomes 14
pub fn supported_burst_size(burst_size: usize) -> usize {
    match burst_size {
        BURST_SMALL | BURST_LARGE => burst_size,
        other => {
            log::warn!("Unsupported burst size {other}, using {BURST_LARGE}");
            BURST_LARGE
        }
    }
}

impl SplashField {
    pub fn new(burst_size: usize) -> Self {
        Self {
            splashes: Vec::new(),
            behavior: SplashBehavior::default(),
            burst_size: supported_burst_size(burst_size),
            bursts: 0,
        }
    }

    pub fn splashes(&self) -> &[Splash] {
        &self.splashes
    }

    pub fn len(&self) -> usize {
        self.splashes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.splashes.is_empty()
    }

    pub fn bursts(&self) -> u32 {
        self.bursts
    }

    pub fn burst_size(&self) -> usize {
        self.burst_size
    }

    pub fn behavior(&self) -> SplashBehavior {
        self.behavior
    }

    /// Takes effect on the next `advance`
    pub fn set_behavior(&mut self, behavior: SplashBehavior) {
        self.behavior = behavior;
    }

    /// Scatter one burst around the tap point
    pub fn spawn_burst(&mut self, tap: Vec2, rng: &mut impl Rng) {
        self.splashes.reserve(self.burst_size);
        for _ in 0..self.burst_size {
            self.splashes.push(Splash::scatter(tap, rng));
        }
        self.bursts += 1;
    }

    /// Decay and cull by `dt` frames. Permanent splashes are left untouched.
    pub fn advance(&mut self, dt: f32) {
        if self.behavior == SplashBehavior::Permanent {
            return;
        }
        for splash in &mut self.splashes {
            splash.decay(dt);
        }
        self.splashes.retain(|s| !s.is_spent());
    }

    pub fn clear(&mut self) {
        self.splashes.clear();
        self.bursts = 0;
    }

    pub fn draw(&self, out: &mut Vec<DrawCommand>) {
        out.extend(self.splashes.iter().map(|s| DrawCommand::Circle {
            center: s.pos,
            radius: s.radius,
            color: s.color(),
        }));
    }
}
