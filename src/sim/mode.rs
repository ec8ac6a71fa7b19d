//! Interaction modes

use serde::{Deserialize, Serialize};

/// Modes that are named but have no interaction yet
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PlannedMode {
    SoapSlice,
    LeafCrush,
    ZipperOpen,
    StickerPeel,
    Shredder,
}

impl PlannedMode {
    pub const ALL: [PlannedMode; 5] = [
        PlannedMode::SoapSlice,
        PlannedMode::LeafCrush,
        PlannedMode::ZipperOpen,
        PlannedMode::StickerPeel,
        PlannedMode::Shredder,
    ];
}

/// The active micro-interaction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Mode {
    #[default]
    Bubble,
    PaintSplash,
    SandCut,
    /// Declared but not yet supported: taps are rejected
    Planned(PlannedMode),
}

impl Mode {
    /// Order the toggle button cycles through
    pub const PLAYABLE: [Mode; 3] = [Mode::Bubble, Mode::PaintSplash, Mode::SandCut];

    /// Host-facing name
    pub fn as_str(&self) -> &'static str {
        match self {
            Mode::Bubble => "BUBBLE",
            Mode::PaintSplash => "PAINT_SPLASH",
            Mode::SandCut => "SAND_CUT",
            Mode::Planned(PlannedMode::SoapSlice) => "SOAP_SLICE",
            Mode::Planned(PlannedMode::LeafCrush) => "LEAF_CRUSH",
            Mode::Planned(PlannedMode::ZipperOpen) => "ZIPPER_OPEN",
            Mode::Planned(PlannedMode::StickerPeel) => "STICKER_PEEL",
            Mode::Planned(PlannedMode::Shredder) => "SHREDDER",
        }
    }

    /// Title shown in the overlay
    pub fn label(&self) -> &'static str {
        match self {
            Mode::Bubble => "Bubble Wrap",
            Mode::PaintSplash => "Paint Splash",
            Mode::SandCut => "Sand Cut",
            Mode::Planned(PlannedMode::SoapSlice) => "Soap Slice",
            Mode::Planned(PlannedMode::LeafCrush) => "Leaf Crush",
            Mode::Planned(PlannedMode::ZipperOpen) => "Zipper Open",
            Mode::Planned(PlannedMode::StickerPeel) => "Sticker Peel",
            Mode::Planned(PlannedMode::Shredder) => "Shredder",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        let name = s.trim().to_uppercase();
        Self::PLAYABLE
            .into_iter()
            .chain(PlannedMode::ALL.map(Mode::Planned))
            .find(|m| m.as_str() == name)
    }

    /// Parse a host-supplied name, falling back to `Bubble`
    pub fn from_name_or_default(name: Option<&str>) -> Self {
        match name {
            None => Mode::default(),
            Some(s) => Self::from_str(s).unwrap_or_else(|| {
                log::warn!("Unknown mode name {s:?}, falling back to {}", Mode::default().as_str());
                Mode::default()
            }),
        }
    }

    pub fn is_supported(&self) -> bool {
        !matches!(self, Mode::Planned(_))
    }

    /// Next mode for the on-screen toggle
    pub fn next(&self) -> Mode {
        match self {
            Mode::Bubble => Mode::PaintSplash,
            Mode::PaintSplash => Mode::SandCut,
            Mode::SandCut | Mode::Planned(_) => Mode::Bubble,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_names_round_trip_all_modes() {
        for mode in Mode::PLAYABLE.into_iter().chain(PlannedMode::ALL.map(Mode::Planned)) {
            assert_eq!(Mode::from_str(mode.as_str()), Some(mode));
        }
    }

    #[test]
    fn test_parse_is_case_insensitive() {
        assert_eq!(Mode::from_str("paint_splash"), Some(Mode::PaintSplash));
        assert_eq!(Mode::from_str(" Sand_Cut "), Some(Mode::SandCut));
    }

    #[test]
    fn test_unknown_name_falls_back_to_bubble() {
        assert_eq!(Mode::from_name_or_default(Some("LAVA_LAMP")), Mode::Bubble);
        assert_eq!(Mode::from_name_or_default(Some("")), Mode::Bubble);
        assert_eq!(Mode::from_name_or_default(None), Mode::Bubble);
        assert_eq!(Mode::from_name_or_default(Some("SHREDDER")), Mode::Planned(PlannedMode::Shredder));
    }

    #[test]
    fn test_toggle_cycles_playable_modes() {
        assert_eq!(Mode::Bubble.next(), Mode::PaintSplash);
        assert_eq!(Mode::PaintSplash.next(), Mode::SandCut);
        assert_eq!(Mode::SandCut.next(), Mode::Bubble);
        assert_eq!(Mode::Planned(PlannedMode::LeafCrush).next(), Mode::Bubble);
    }

    #[test]
    fn test_planned_modes_unsupported() {
        assert!(Mode::Bubble.is_supported());
        assert!(PlannedMode::ALL.iter().all(|p| !Mode::Planned(*p).is_supported()));
    }
}
