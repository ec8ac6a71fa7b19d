//! Game settings and preferences
//!
//! Sound and vibration are read from the preference store (the host's
//! settings screen writes them); the rest are build-time choices of the host.

use serde::{Deserialize, Serialize};

use crate::consts::BURST_LARGE;
use crate::persistence::{PrefKey, PrefStore, read_bool};
use crate::sim::supported_burst_size;

/// Game settings/preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    // === Feedback ===
    /// Play sound cues
    pub sound_enabled: bool,
    /// Haptic pulse on qualifying actions
    pub vibration_enabled: bool,

    // === Variants ===
    /// Drops per paint splash burst (8 or 14)
    burst_size: usize,
    /// Show the top-right mode toggle button
    pub mode_toggle: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            sound_enabled: true,
            vibration_enabled: true,
            burst_size: BURST_LARGE,
            mode_toggle: true,
        }
    }
}

impl Settings {
    /// Read the persisted toggles, defaulting each to on
    pub fn load(store: &impl PrefStore) -> Self {
        let settings = Self {
            sound_enabled: read_bool(store, PrefKey::SoundOn, true),
            vibration_enabled: read_bool(store, PrefKey::VibrationOn, true),
            ..Self::default()
        };
        log::info!(
            "Settings loaded (sound: {}, vibration: {})",
            settings.sound_enabled,
            settings.vibration_enabled
        );
        settings
    }

    /// Choose the burst variant; anything but the two supported sizes becomes 14
    pub fn with_burst_size(mut self, burst_size: usize) -> Self {
        self.burst_size = supported_burst_size(burst_size);
        self
    }

    pub fn burst_size(&self) -> usize {
        self.burst_size
    }

    pub fn with_mode_toggle(mut self, mode_toggle: bool) -> Self {
        self.mode_toggle = mode_toggle;
        self
    }
}
