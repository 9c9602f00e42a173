//! Screen layout
//!
//! Fixed single-column layout for a portrait e-paper panel. All geometry
//! is compile-time and the cursor only ever moves down; adding one item
//! shifts everything below it by exactly [`item_block_height`] pixels.

pub mod agenda;
pub mod status;

pub use agenda::{render_agenda, visible_count, EMPTY_LABEL, TITLE_LABEL};
pub use status::render_status_bar;

/// Top margin for the status bar text
pub const MARGIN_TOP: i32 = 5;
/// Left margin for all text
pub const MARGIN_LEFT: i32 = 10;
/// Status bar region height, closing rule included
pub const STATUS_BAR_HEIGHT: i32 = 40;
/// Thickness of the rule closing the status bar
pub const STATUS_RULE_WEIGHT: u32 = 5;
/// Width reserved at the right edge for the battery label
pub const BATTERY_SLOT_WIDTH: i32 = 115;
/// Gap between the status bar and the agenda heading
pub const MARGIN_STATUS_BAR_BOTTOM: i32 = 30;
/// Vertical space taken by the agenda heading, margin included
pub const TITLE_BLOCK_HEIGHT: i32 = 75;
/// Thickness of item separators
pub const RULE_WEIGHT: u32 = 1;
/// Gap below every separator
pub const MARGIN_RULE_BOTTOM: i32 = 15;
/// Row advance for one body line
pub const BODY_ROW_HEIGHT: i32 = 30;
/// Extra gap after an item's title line
pub const MARGIN_ITEM_BOTTOM: i32 = 10;
/// Most items ever rendered in one cycle
pub const MAX_DISPLAY_EVENTS: usize = 6;

/// Vertical space one rendered item occupies: time row, title row, the
/// gap after the title, the separator margin
pub const fn item_block_height() -> i32 {
    BODY_ROW_HEIGHT + BODY_ROW_HEIGHT + MARGIN_ITEM_BOTTOM + MARGIN_RULE_BOTTOM
}

/// Downward-only layout cursor
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LayoutCursor {
    y: i32,
}

impl LayoutCursor {
    /// Cursor at the first agenda line, just below the status bar
    pub const fn below_status_bar() -> Self {
        Self {
            y: STATUS_BAR_HEIGHT + MARGIN_STATUS_BAR_BOTTOM,
        }
    }

    /// Current vertical position
    pub const fn y(&self) -> i32 {
        self.y
    }

    /// Move down by `dy` pixels
    pub fn advance(&mut self, dy: i32) {
        self.y += dy;
    }
}
