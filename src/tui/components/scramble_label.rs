//! Scramble label component
//!
//! Renders a [`ScrambleText`]'s current frame inline, followed by optional
//! trailing content (an arrow, an icon) that never scrambles. The area the
//! label actually covers is registered for hover hit-testing.

use crate::effect::ScrambleText;
use crate::tui::hover::{HitAreas, LabelId};
use ratatui::{
    layout::Rect,
    style::Style,
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};
use unicode_width::UnicodeWidthStr;

/// Space between the text and its trailing content
const TRAILING_GAP: &str = "  ";

/// A scramble effect plus the decoration rendered after it
pub struct ScrambleLabel {
    pub id: LabelId,
    pub text: ScrambleText,
    pub trailing: Option<Line<'static>>,
}

impl ScrambleLabel {
    pub fn new(id: LabelId, text: ScrambleText) -> Self {
        Self {
            id,
            text,
            trailing: None,
        }
    }

    pub fn with_trailing(mut self, trailing: impl Into<Line<'static>>) -> Self {
        self.trailing = Some(trailing.into());
        self
    }

    /// Columns the label occupies (target text, gap, trailing content)
    ///
    /// Scrambled frames can differ in width from the target only for wide
    /// characters, so the target's width is the stable measure.
    pub fn width(&self) -> u16 {
        let text = self.text.text().width();
        let trailing = self
            .trailing
            .as_ref()
            .map(|line| TRAILING_GAP.width() + line.width())
            .unwrap_or(0);
        (text + trailing).min(u16::MAX as usize) as u16
    }

    /// The line to draw this frame
    pub fn line(&self, style: Style) -> Line<'static> {
        let mut spans = vec![Span::styled(self.text.display(), style)];
        if let Some(trailing) = &self.trailing {
            spans.push(Span::raw(TRAILING_GAP));
            spans.extend(
                trailing
                    .spans
                    .iter()
                    .map(|span| Span::styled(span.content.clone(), style.patch(span.style))),
            );
        }
        Line::from(spans)
    }

    /// Draw at the left edge of `area` and register the covered cells
    pub fn render(&self, f: &mut Frame, area: Rect, style: Style, hits: &mut HitAreas) {
        let covered = Rect {
            width: self.width().min(area.width),
            height: area.height.min(1),
            ..area
        };
        f.render_widget(Paragraph::new(self.line(style)), covered);
        if self.text.hover_enabled() {
            hits.register(self.id, covered);
        }
    }
}

/// Every label of the app, addressed by [`LabelId`]
#[derive(Default)]
pub struct Labels {
    items: Vec<ScrambleLabel>,
}

impl Labels {
    pub fn next_id(&self) -> LabelId {
        LabelId(self.items.len())
    }

    /// Register a label built for [`Labels::next_id`]
    pub fn push(&mut self, label: ScrambleLabel) -> LabelId {
        let id = label.id;
        debug_assert_eq!(id, self.next_id());
        self.items.push(label);
        id
    }

    pub fn get(&self, id: LabelId) -> Option<&ScrambleLabel> {
        self.items.get(id.0)
    }

    pub fn get_mut(&mut self, id: LabelId) -> Option<&mut ScrambleLabel> {
        self.items.get_mut(id.0)
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut ScrambleLabel> {
        self.items.iter_mut()
    }

    /// Labels with a session in flight
    pub fn running(&self) -> usize {
        self.items.iter().filter(|l| l.text.is_running()).count()
    }
}
