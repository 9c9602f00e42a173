//! Drawing surface trait for the e-paper panel

/// Errors that can occur when talking to the panel
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SurfaceError {
    /// Bus or panel communication failure
    Bus,
    /// Panel stayed busy past the driver's deadline
    Busy,
}

/// Nominal text sizes the layout can ask for
///
/// The variants carry the glyph heights the layout arithmetic assumes
/// (24 px body, 40 px title); an implementation maps them to whatever
/// fonts it actually ships.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum FontSize {
    /// Item rows and the status bar
    Body,
    /// The agenda heading
    Title,
}

/// Flush strategies for an e-paper panel
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum RefreshMode {
    /// Whiteout plus redraw. Slow and flashy, clears all residue.
    Full,
    /// Ghost-reducing incremental update used for the periodic cycle
    GhostReduced,
}

/// Trait for the monochrome drawing surface
///
/// Coordinates are in pixels with the origin at the top left. Text and
/// rules anchor at the top-left corner of their bounding box. Nothing is
/// visible on the physical panel until [`flush`](DrawSurface::flush).
///
/// Draws that fall partly or fully outside the canvas must be clipped by
/// the implementation, never reflowed or rejected; callers emit them
/// freely.
pub trait DrawSurface {
    /// Canvas width in pixels
    fn width(&self) -> u32;

    /// Canvas height in pixels
    fn height(&self) -> u32;

    /// Reset the whole canvas to white
    fn clear(&mut self) -> Result<(), SurfaceError>;

    /// Draw a single line of text
    ///
    /// - `x`, `y`: top-left corner of the first glyph box
    /// - `font`: nominal size, see [`FontSize`]
    /// - `text`: the line to draw (no wrapping is performed)
    fn text(&mut self, x: i32, y: i32, font: FontSize, text: &str) -> Result<(), SurfaceError>;

    /// Draw a filled horizontal rule
    ///
    /// - `x`, `y`: top-left corner
    /// - `width`: length in pixels
    /// - `weight`: thickness in pixels
    fn hline(&mut self, x: i32, y: i32, width: u32, weight: u32) -> Result<(), SurfaceError>;

    /// Push the canvas to the physical panel
    fn flush(&mut self, mode: RefreshMode) -> Result<(), SurfaceError>;
}
