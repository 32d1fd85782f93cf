// Auto-scroll for the horizontal picks bar.
//
// Cards are laid out left to right at a fixed pitch of `card_width + card_gap`.
// When the current pick changes and its card is not fully visible, the
// viewport is scrolled so the card sits in the middle.

/// How a viewport should move to a new offset.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScrollBehavior {
    Instant,
    Smooth,
}

/// A horizontally scrollable container.
pub trait ScrollViewport {
    /// Current left edge of the visible window.
    fn offset(&self) -> u32;
    /// Width of the visible window.
    fn width(&self) -> u32;
    /// Move the visible window so it starts at `offset`.
    fn scroll_to(&mut self, offset: u32, behavior: ScrollBehavior);
}

/// Keeps the current pick's card inside the visible window.
#[derive(Debug, Clone)]
pub struct AutoScrollController {
    card_width: u32,
    card_gap: u32,
    last_pick: Option<u32>,
}

impl AutoScrollController {
    pub fn new(card_width: u32, card_gap: u32) -> Self {
        AutoScrollController {
            card_width,
            card_gap,
            last_pick: None,
        }
    }

    pub fn card_width(&self) -> u32 {
        self.card_width
    }

    pub fn card_gap(&self) -> u32 {
        self.card_gap
    }

    /// Distance between the left edges of neighbouring cards.
    pub fn pitch(&self) -> u32 {
        self.card_width + self.card_gap
    }

    /// Left edge of the card for `pick_number` (1-indexed).
    pub fn card_left(&self, pick_number: u32) -> u32 {
        pick_number.saturating_sub(1) * self.pitch()
    }

    /// Whether the whole card lies inside `[offset, offset + width)`.
    pub fn is_fully_visible(&self, pick_number: u32, offset: u32, width: u32) -> bool {
        let left = self.card_left(pick_number);
        let right = left + self.card_width;
        left >= offset && right <= offset.saturating_add(width)
    }

    /// Offset that centres the card in a window of `width`, never below 0.
    pub fn centered_offset(&self, pick_number: u32, width: u32) -> u32 {
        let card_center = self.card_left(pick_number) + self.card_width / 2;
        card_center.saturating_sub(width / 2)
    }

    /// Where the viewport should move, or `None` if the card is already visible.
    pub fn target_offset(&self, pick_number: u32, offset: u32, width: u32) -> Option<u32> {
        if pick_number == 0 || self.is_fully_visible(pick_number, offset, width) {
            None
        } else {
            Some(self.centered_offset(pick_number, width))
        }
    }

    /// React to a (possibly unchanged) current pick number.
    ///
    /// Only acts when the pick number differs from the last one seen.
    /// Returns the offset scrolled to, if any.
    pub fn on_pick_changed<V: ScrollViewport>(
        &mut self,
        pick_number: u32,
        viewport: &mut V,
    ) -> Option<u32> {
        if self.last_pick == Some(pick_number) {
            return None;
        }
        self.last_pick = Some(pick_number);

        let target = self.target_offset(pick_number, viewport.offset(), viewport.width())?;
        viewport.scroll_to(target, ScrollBehavior::Smooth);
        Some(target)
    }

    /// Centre the current card regardless of visibility (user request).
    pub fn recenter<V: ScrollViewport>(&mut self, pick_number: u32, viewport: &mut V) -> u32 {
        self.last_pick = Some(pick_number);
        let target = self.centered_offset(pick_number.max(1), viewport.width());
        viewport.scroll_to(target, ScrollBehavior::Smooth);
        target
    }

    /// Forget the last pick seen, so the next update is treated as a change.
    pub fn reset(&mut self) {
        self.last_pick = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct RecordingViewport {
        offset: u32,
        width: u32,
        calls: Vec<(u32, ScrollBehavior)>,
    }

    impl ScrollViewport for RecordingViewport {
        fn offset(&self) -> u32 {
            self.offset
        }
        fn width(&self) -> u32 {
            self.width
        }
        fn scroll_to(&mut self, offset: u32, behavior: ScrollBehavior) {
            self.offset = offset;
            self.calls.push((offset, behavior));
        }
    }

    fn viewport(offset: u32, width: u32) -> RecordingViewport {
        RecordingViewport {
            offset,
            width,
            calls: Vec::new(),
        }
    }

    #[test]
    fn card_positions() {
        let ctl = AutoScrollController::new(120, 8);
        assert_eq!(ctl.card_left(1), 0);
        assert_eq!(ctl.card_left(2), 128);
        assert_eq!(ctl.card_left(11), 1280);
    }

    #[test]
    fn visible_card_does_not_scroll() {
        let mut ctl = AutoScrollController::new(10, 2);
        let mut vp = viewport(0, 100);
        // pick 5: left 48, right 58
        assert_eq!(ctl.on_pick_changed(5, &mut vp), None);
        assert!(vp.calls.is_empty());
    }

    #[test]
    fn offscreen_card_is_centered_smoothly() {
        let mut ctl = AutoScrollController::new(10, 2);
        let mut vp = viewport(0, 100);
        // pick 20: left 228, center 233, target 233 - 50 = 183
        assert_eq!(ctl.on_pick_changed(20, &mut vp), Some(183));
        assert_eq!(vp.calls, vec![(183, ScrollBehavior::Smooth)]);
        assert!(ctl.is_fully_visible(20, vp.offset, vp.width));
    }

    #[test]
    fn partially_visible_card_scrolls() {
        let ctl = AutoScrollController::new(10, 2);
        // pick 9: left 96, right 106 -> crosses the right edge of [0, 100)
        assert!(!ctl.is_fully_visible(9, 0, 100));
        assert_eq!(ctl.target_offset(9, 0, 100), Some(51));
        // card left of the window
        assert!(!ctl.is_fully_visible(1, 5, 100));
    }

    #[test]
    fn target_clamps_at_zero() {
        let ctl = AutoScrollController::new(10, 2);
        // pick 1 with a scrolled-away window: center 5, 5 - 50 < 0
        assert_eq!(ctl.target_offset(1, 300, 100), Some(0));
    }

    #[test]
    fn unchanged_pick_is_ignored() {
        let mut ctl = AutoScrollController::new(10, 2);
        let mut vp = viewport(0, 50);
        assert!(ctl.on_pick_changed(30, &mut vp).is_some());
        // User scrolls away manually; same pick must not yank the view back.
        vp.offset = 0;
        assert_eq!(ctl.on_pick_changed(30, &mut vp), None);
        assert_eq!(vp.calls.len(), 1);
    }

    #[test]
    fn recenter_forces_scroll() {
        let mut ctl = AutoScrollController::new(10, 2);
        let mut vp = viewport(0, 100);
        // pick 5 is visible but recenter still moves: center 53 - 50 = 3
        assert_eq!(ctl.recenter(5, &mut vp), 3);
        assert_eq!(vp.offset, 3);
    }

    #[test]
    fn reset_allows_rescroll_of_same_pick() {
        let mut ctl = AutoScrollController::new(10, 2);
        let mut vp = viewport(0, 50);
        ctl.on_pick_changed(30, &mut vp);
        vp.offset = 0;
        ctl.reset();
        assert!(ctl.on_pick_changed(30, &mut vp).is_some());
    }
}
