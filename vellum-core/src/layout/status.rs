//! Status bar: clock on the left, battery on the right, closing rule

use crate::layout::{
    BATTERY_SLOT_WIDTH, MARGIN_LEFT, MARGIN_TOP, STATUS_BAR_HEIGHT, STATUS_RULE_WEIGHT,
};
use crate::traits::surface::{DrawSurface, FontSize, SurfaceError};

/// Draw the status bar into the top [`STATUS_BAR_HEIGHT`] pixels
///
/// Both strings arrive preformatted; this function only places them.
/// Rendering the same strings twice produces the identical call sequence.
pub fn render_status_bar<S: DrawSurface>(
    surface: &mut S,
    time_text: &str,
    battery_text: &str,
) -> Result<(), SurfaceError> {
    let width = surface.width();

    surface.hline(
        0,
        STATUS_BAR_HEIGHT - STATUS_RULE_WEIGHT as i32,
        width,
        STATUS_RULE_WEIGHT,
    )?;
    surface.text(
        width as i32 - BATTERY_SLOT_WIDTH,
        MARGIN_TOP,
        FontSize::Body,
        battery_text,
    )?;
    surface.text(MARGIN_LEFT, MARGIN_TOP, FontSize::Body, time_text)?;

    Ok(())
}
