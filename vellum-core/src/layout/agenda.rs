//! Agenda list: heading, item rows, separators

use crate::feed::model::PlanFeed;
use crate::layout::{
    LayoutCursor, BODY_ROW_HEIGHT, MARGIN_ITEM_BOTTOM, MARGIN_LEFT, MARGIN_RULE_BOTTOM,
    MAX_DISPLAY_EVENTS, RULE_WEIGHT, TITLE_BLOCK_HEIGHT,
};
use crate::traits::surface::{DrawSurface, FontSize, SurfaceError};

/// Agenda heading
pub const TITLE_LABEL: &str = "Plans";
/// Shown instead of rows when the feed has nothing to display
pub const EMPTY_LABEL: &str = "NO schedules";

/// Number of items from `feed` that one cycle actually renders
///
/// The endpoint's count is advisory: it never extends past the items
/// actually present, and the screen caps it at [`MAX_DISPLAY_EVENTS`].
pub fn visible_count(feed: &PlanFeed) -> usize {
    (feed.num_items as usize)
        .min(feed.items.len())
        .min(MAX_DISPLAY_EVENTS)
}

/// Draw the agenda below the status bar, returning the rendered item count
///
/// Every item draws its time row, its title row and a full-width
/// separator; an empty agenda draws [`EMPTY_LABEL`] with exactly one
/// separator using the same row arithmetic. Rows past the bottom edge are
/// emitted anyway and clipped by the surface.
pub fn render_agenda<S: DrawSurface>(
    surface: &mut S,
    feed: &PlanFeed,
) -> Result<usize, SurfaceError> {
    let width = surface.width();
    let mut cursor = LayoutCursor::below_status_bar();

    surface.text(MARGIN_LEFT, cursor.y(), FontSize::Title, TITLE_LABEL)?;
    cursor.advance(TITLE_BLOCK_HEIGHT);
    surface.hline(0, cursor.y(), width, RULE_WEIGHT)?;
    cursor.advance(MARGIN_RULE_BOTTOM);

    let count = visible_count(feed);
    for item in feed.items.iter().take(count) {
        surface.text(MARGIN_LEFT, cursor.y(), FontSize::Body, &item.display_time)?;
        cursor.advance(BODY_ROW_HEIGHT);
        surface.text(MARGIN_LEFT, cursor.y(), FontSize::Body, &item.title)?;
        cursor.advance(BODY_ROW_HEIGHT + MARGIN_ITEM_BOTTOM);
        surface.hline(0, cursor.y(), width, RULE_WEIGHT)?;
        cursor.advance(MARGIN_RULE_BOTTOM);
    }

    if count == 0 {
        surface.text(MARGIN_LEFT, cursor.y(), FontSize::Body, EMPTY_LABEL)?;
        cursor.advance(BODY_ROW_HEIGHT + MARGIN_ITEM_BOTTOM);
        surface.hline(0, cursor.y(), width, RULE_WEIGHT)?;
        cursor.advance(MARGIN_RULE_BOTTOM);
    }

    Ok(count)
}
