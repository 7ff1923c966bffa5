// Pointer hover tracking for scramble labels
//
// Terminals only report where the mouse is, not what it entered or left.
// The draw pass records the area of every hoverable label; mouse motion is
// hit-tested against those areas and turned into leave/enter transitions.

use ratatui::layout::{Position, Rect};

/// Index of a label in the app's label registry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct LabelId(pub usize);

/// Label areas recorded during the last draw, topmost last
#[derive(Debug, Clone, Default)]
pub struct HitAreas {
    areas: Vec<(LabelId, Rect)>,
}

impl HitAreas {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&mut self, id: LabelId, area: Rect) {
        if area.width > 0 && area.height > 0 {
            self.areas.push((id, area));
        }
    }

    /// Label under `(column, row)`, preferring the one drawn last
    pub fn hit_test(&self, column: u16, row: u16) -> Option<LabelId> {
        let position = Position::new(column, row);
        self.areas
            .iter()
            .rev()
            .find(|(_, area)| area.contains(position))
            .map(|(id, _)| *id)
    }

    pub fn contains(&self, id: LabelId) -> bool {
        self.areas.iter().any(|(candidate, _)| *candidate == id)
    }
}

/// A pointer transition to deliver to a label
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HoverChange {
    Leave(LabelId),
    Enter(LabelId),
}

/// Remembers which label the pointer is over
#[derive(Debug, Default)]
pub struct HoverTracker {
    current: Option<LabelId>,
}

impl HoverTracker {
    pub fn current(&self) -> Option<LabelId> {
        self.current
    }

    /// Move the pointer over `hit`; leave is always delivered before enter
    pub fn update(&mut self, hit: Option<LabelId>) -> Vec<HoverChange> {
        if hit == self.current {
            return Vec::new();
        }
        let mut changes = Vec::with_capacity(2);
        if let Some(previous) = self.current {
            changes.push(HoverChange::Leave(previous));
        }
        if let Some(next) = hit {
            changes.push(HoverChange::Enter(next));
        }
        self.current = hit;
        changes
    }

    /// Forget the hovered label (pointer left the window, content moved)
    pub fn clear(&mut self) -> Option<HoverChange> {
        self.current.take().map(HoverChange::Leave)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hit_test_finds_topmost_area() {
        let mut hits = HitAreas::new();
        hits.register(LabelId(0), Rect::new(0, 0, 10, 1));
        hits.register(LabelId(1), Rect::new(5, 0, 10, 1));
        hits.register(LabelId(2), Rect::new(0, 0, 0, 1));

        assert_eq!(hits.hit_test(2, 0), Some(LabelId(0)));
        assert_eq!(hits.hit_test(7, 0), Some(LabelId(1)));
        assert_eq!(hits.hit_test(7, 1), None);
        assert!(!hits.contains(LabelId(2)), "empty areas are not registered");
    }

    #[test]
    fn moving_between_labels_leaves_then_enters() {
        let mut tracker = HoverTracker::default();
        assert_eq!(
            tracker.update(Some(LabelId(1))),
            vec![HoverChange::Enter(LabelId(1))]
        );
        assert!(tracker.update(Some(LabelId(1))).is_empty());
        assert_eq!(
            tracker.update(Some(LabelId(2))),
            vec![HoverChange::Leave(LabelId(1)), HoverChange::Enter(LabelId(2))]
        );
        assert_eq!(
            tracker.update(None),
            vec![HoverChange::Leave(LabelId(2))]
        );
        assert_eq!(tracker.current(), None);
    }

    #[test]
    fn clear_reports_leave_once() {
        let mut tracker = HoverTracker::default();
        tracker.update(Some(LabelId(4)));
        assert_eq!(tracker.clear(), Some(HoverChange::Leave(LabelId(4))));
        assert_eq!(tracker.clear(), None);
    }
}
