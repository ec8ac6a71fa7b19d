//! Bubble grid layout and board state
//!
//! The layout is a pure function of the viewport size. The board owns the
//! resulting bubbles plus the popped counter and the sticky "all popped" flag.

use glam::Vec2;

use super::bubble::Bubble;
use crate::consts::*;

/// Derived grid geometry for one viewport size
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GridLayout {
    pub cols: usize,
    pub rows: usize,
    /// Top-left corner of the first cell
    pub origin: Vec2,
    /// Cell size (center-to-center pitch)
    pub pitch: Vec2,
    pub radius: f32,
}

impl GridLayout {
    /// Compute the layout, or `None` if the viewport leaves no room for cells
    pub fn compute(width: f32, height: f32) -> Option<Self> {
        let available_w = width - GRID_PADDING * 2.0;
        let available_h = height - GRID_PADDING * 3.0;
        if !(available_w > 0.0 && available_h > 0.0) {
            return None;
        }

        let cols = GRID_COLS;
        let rows = GRID_ROWS;
        let pitch = Vec2::new(available_w / cols as f32, available_h / rows as f32);
        let radius = (pitch.x / 2.0).min(pitch.y / 2.0) * BUBBLE_RADIUS_FACTOR;

        Some(Self {
            cols,
            rows,
            origin: Vec2::new(GRID_PADDING, GRID_PADDING * 2.0),
            pitch,
            radius,
        })
    }

    /// Center of the cell at (row, col)
    pub fn cell_center(&self, row: usize, col: usize) -> Vec2 {
        self.origin + self.pitch * Vec2::new(col as f32 + 0.5, row as f32 + 0.5)
    }

    /// Bubbles in creation order (row-major)
    pub fn bubbles(&self) -> Vec<Bubble> {
        let mut bubbles = Vec::with_capacity(self.rows * self.cols);
        for row in 0..self.rows {
            for col in 0..self.cols {
                bubbles.push(Bubble::new(self.cell_center(row, col), self.radius));
            }
        }
        bubbles
    }
}

/// Lay out a fresh, fully unpopped grid for the viewport.
///
/// An unsized viewport yields no bubbles; layout is retried on the next resize.
pub fn layout_bubbles(width: f32, height: f32) -> Vec<Bubble> {
    match GridLayout::compute(width, height) {
        Some(layout) => layout.bubbles(),
        None => {
            log::warn!("Viewport {width}x{height} too small for bubble grid, deferring layout");
            Vec::new()
        }
    }
}

/// Result of a tap on the board
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BoardTap {
    /// Bubble at this index popped
    Popped { index: usize, all_popped: bool },
    /// Tap hit no unpopped bubble
    Miss,
    /// Tap after everything was popped rebuilt the grid
    Reset,
}

/// The bubble-wrap sheet
#[derive(Debug, Clone, Default)]
pub struct BubbleBoard {
    bubbles: Vec<Bubble>,
    popped_count: usize,
    all_popped: bool,
    /// Reset prompt opacity, 0-1, fades in once everything is popped
    prompt_reveal: f32,
}

impl BubbleBoard {
    /// Rebuild the grid for the viewport, discarding all pop state
    pub fn rebuild(&mut self, width: f32, height: f32) {
        self.bubbles = layout_bubbles(width, height);
        self.popped_count = 0;
        self.all_popped = false;
        self.prompt_reveal = 0.0;
        log::debug!("Bubble grid rebuilt with {} bubbles", self.bubbles.len());
    }

    pub fn bubbles(&self) -> &[Bubble] {
        &self.bubbles
    }

    pub fn total(&self) -> usize {
        self.bubbles.len()
    }

    pub fn popped_count(&self) -> usize {
        self.popped_count
    }

    pub fn all_popped(&self) -> bool {
        self.all_popped
    }

    pub fn prompt_reveal(&self) -> f32 {
        self.prompt_reveal
    }

    /// Handle a tap. At most one bubble pops: the first unpopped hit in creation order.
    pub fn tap(&mut self, point: Vec2, width: f32, height: f32) -> BoardTap {
        if self.all_popped {
            self.rebuild(width, height);
            return BoardTap::Reset;
        }

        let hit = self
            .bubbles
            .iter_mut()
            .enumerate()
            .find(|(_, b)| !b.is_popped() && b.hit_test(point));

        let outcome = match hit {
            Some((index, bubble)) => {
                bubble.pop();
                self.popped_count += 1;
                Some(index)
            }
            None => None,
        };

        let newly_all_popped = self.total() > 0 && self.popped_count == self.total();
        if newly_all_popped {
            self.all_popped = true;
            log::info!("All {} bubbles popped", self.total());
        }

        match outcome {
            Some(index) => BoardTap::Popped {
                index,
                all_popped: newly_all_popped,
            },
            None => BoardTap::Miss,
        }
    }

    /// Advance pop ripples and the reset prompt by `dt` frames
    pub fn advance(&mut self, dt: f32) {
        for bubble in &mut self.bubbles {
            bubble.advance(dt);
        }
        if self.all_popped {
            self.prompt_reveal = (self.prompt_reveal + RESET_PROMPT_STEP * dt).min(1.0);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_reference_phone_viewport() {
        let layout = GridLayout::compute(1080.0, 1920.0).unwrap();
        assert_eq!(layout.pitch, Vec2::new(125.0, 150.0));
        assert!((layout.radius - 50.0).abs() < 1e-4);

        let bubbles = layout.bubbles();
        assert_eq!(bubbles.len(), 96);
        assert_eq!(bubbles[0].center, Vec2::new(102.5, 155.0));
        assert_eq!(bubbles[95].center, Vec2::new(977.5, 1805.0));
    }

    #[test]
    fn test_unsized_viewport_is_noop() {
        assert!(layout_bubbles(0.0, 0.0).is_empty());
        assert!(layout_bubbles(1080.0, 0.0).is_empty());
        assert!(layout_bubbles(80.0, 500.0).is_empty());

        let mut board = BubbleBoard::default();
        board.rebuild(0.0, 0.0);
        assert_eq!(board.total(), 0);
        // Nothing to pop means never "all popped"
        assert_eq!(board.tap(Vec2::ZERO, 0.0, 0.0), BoardTap::Miss);
        assert!(!board.all_popped());
    }

    #[test]
    fn test_tap_pops_single_bubble() {
        let mut board = BubbleBoard::default();
        board.rebuild(1080.0, 1920.0);
        let target = board.bubbles()[9].center;

        assert_eq!(
            board.tap(target, 1080.0, 1920.0),
            BoardTap::Popped {
                index: 9,
                all_popped: false
            }
        );
        assert_eq!(board.popped_count(), 1);
        assert_eq!(board.bubbles().iter().filter(|b| b.is_popped()).count(), 1);
    }

    #[test]
    fn test_tap_in_gutter_misses() {
        let mut board = BubbleBoard::default();
        board.rebuild(1080.0, 1920.0);
        // Corner of the first cell lies outside its disk
        let corner = Vec2::new(GRID_PADDING + 1.0, GRID_PADDING * 2.0 + 1.0);
        assert_eq!(board.tap(corner, 1080.0, 1920.0), BoardTap::Miss);
        assert_eq!(board.popped_count(), 0);
    }

    #[test]
    fn test_second_tap_on_popped_bubble_misses() {
        let mut board = BubbleBoard::default();
        board.rebuild(1080.0, 1920.0);
        let target = board.bubbles()[0].center;
        board.tap(target, 1080.0, 1920.0);
        assert_eq!(board.tap(target, 1080.0, 1920.0), BoardTap::Miss);
        assert_eq!(board.popped_count(), 1);
    }

    #[test]
    fn test_overlapping_bubbles_first_wins() {
        let mut board = BubbleBoard {
            bubbles: vec![
                Bubble::new(Vec2::new(0.0, 0.0), 10.0),
                Bubble::new(Vec2::new(5.0, 0.0), 10.0),
            ],
            ..Default::default()
        };
        let overlap = Vec2::new(2.5, 0.0);
        assert_eq!(
            board.tap(overlap, 100.0, 100.0),
            BoardTap::Popped {
                index: 0,
                all_popped: false
            }
        );
        assert!(!board.bubbles()[1].is_popped());

        // The next tap at the same point falls through to the second bubble
        assert_eq!(
            board.tap(overlap, 100.0, 100.0),
            BoardTap::Popped {
                index: 1,
                all_popped: true
            }
        );
    }

    #[test]
    fn test_all_popped_then_reset() {
        let mut board = BubbleBoard::default();
        board.rebuild(1080.0, 1920.0);
        let centers: Vec<Vec2> = board.bubbles().iter().map(|b| b.center).collect();

        let mut all_popped_events = 0;
        for c in &centers {
            if let BoardTap::Popped { all_popped: true, .. } = board.tap(*c, 1080.0, 1920.0) {
                all_popped_events += 1;
            }
        }
        assert_eq!(all_popped_events, 1);
        assert!(board.all_popped());
        assert_eq!(board.popped_count(), 96);

        board.advance(1.0);
        assert!(board.prompt_reveal() > 0.0);

        // Any tap resets, even off-grid
        assert_eq!(board.tap(Vec2::new(-50.0, -50.0), 1080.0, 1920.0), BoardTap::Reset);
        assert!(!board.all_popped());
        assert_eq!(board.popped_count(), 0);
        assert_eq!(board.total(), 96);
        assert_eq!(board.prompt_reveal(), 0.0);
    }

    #[test]
    fn test_prompt_reveal_only_after_all_popped() {
        let mut board = BubbleBoard::default();
        board.rebuild(1080.0, 1920.0);
        for _ in 0..100 {
            board.advance(1.0);
        }
        assert_eq!(board.prompt_reveal(), 0.0);
    }

    proptest! {
        #[test]
        fn prop_layout_fills_grid(w in 200.0f32..4000.0, h in 200.0f32..4000.0) {
            let layout = GridLayout::compute(w, h).unwrap();
            let bubbles = layout.bubbles();
            prop_assert_eq!(bubbles.len(), GRID_ROWS * GRID_COLS);

            for b in &bubbles {
                prop_assert!(b.radius > 0.0);
                prop_assert_eq!(b.radius, layout.radius);
                // Disk stays inside the padded area
                prop_assert!(b.center.x - b.radius >= GRID_PADDING - 1e-3);
                prop_assert!(b.center.x + b.radius <= w - GRID_PADDING + 1e-3);
                prop_assert!(b.center.y - b.radius >= GRID_PADDING * 2.0 - 1e-3);
                prop_assert!(b.center.y + b.radius <= h - GRID_PADDING + 1e-3);
            }

            // Neighbours are exactly one pitch apart
            let dx = bubbles[1].center.x - bubbles[0].center.x;
            let dy = bubbles[GRID_COLS].center.y - bubbles[0].center.y;
            prop_assert!((dx - layout.pitch.x).abs() < 1e-2);
            prop_assert!((dy - layout.pitch.y).abs() < 1e-2);
        }
    }
}
