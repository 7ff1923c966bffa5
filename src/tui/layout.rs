/// Responsive breakpoint system for TUI layout decisions.
///
/// Single source of truth for width thresholds - no magic numbers scattered in render code.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Breakpoint {
    /// < 60 cols: Split pane, minimal terminal
    Compact,
    /// 60-99 cols: Half-screen, slides stack image above copy
    Normal,
    /// 100-139 cols: Full terminal, image and copy side by side
    Wide,
    /// 140+ cols: Ultrawide monitor
    UltraWide,
}

impl Breakpoint {
    pub fn from_width(width: u16) -> Self {
        match width {
            0..=59 => Breakpoint::Compact,
            60..=99 => Breakpoint::Normal,
            100..=139 => Breakpoint::Wide,
            _ => Breakpoint::UltraWide,
        }
    }

    /// Check if at least this breakpoint (inclusive)
    pub fn at_least(&self, min: Breakpoint) -> bool {
        self.ordinal() >= min.ordinal()
    }

    /// Whether a project slide puts its image above the copy
    pub fn stacks_slides(&self) -> bool {
        !self.at_least(Breakpoint::Wide)
    }

    /// Columns of horizontal padding around slide content
    pub fn slide_padding(&self) -> u16 {
        match self {
            Breakpoint::Compact => 1,
            Breakpoint::Normal => 2,
            Breakpoint::Wide => 4,
            Breakpoint::UltraWide => 8,
        }
    }

    fn ordinal(&self) -> u8 {
        match self {
            Breakpoint::Compact => 0,
            Breakpoint::Normal => 1,
            Breakpoint::Wide => 2,
            Breakpoint::UltraWide => 3,
        }
    }
}
