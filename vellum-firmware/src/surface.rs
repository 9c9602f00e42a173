//! Waveshare 7.5" v2 panel behind the drawing surface trait
//!
//! The framebuffer renders in portrait (Rotate90, 480x800 logical) and
//! every flush pushes the whole frame over SPI. `Full` runs the panel's
//! clear waveform before the update; `GhostReduced` is the controller's
//! normal update, which keeps ghosting down between frames.

use embassy_time::Delay;
use embedded_graphics::mono_font::MonoTextStyle;
use embedded_graphics::prelude::*;
use embedded_graphics::primitives::{PrimitiveStyle, Rectangle};
use embedded_graphics::text::{Baseline, Text, TextStyle, TextStyleBuilder};
use embedded_hal::delay::DelayNs;
use embedded_hal::digital::{InputPin, OutputPin};
use embedded_hal::spi::SpiDevice;
use embedded_hal_bus::spi::{ExclusiveDevice, NoDelay};
use epd_waveshare::epd7in5_v2::{Display7in5, Epd7in5};
use epd_waveshare::prelude::{Color, DisplayRotation, WaveshareDisplay};
use esp_hal::gpio::{Input, Output};
use esp_hal::spi::master::Spi;
use esp_hal::Blocking;
use profont::{PROFONT_18_POINT, PROFONT_24_POINT};

use vellum_core::traits::{DrawSurface, FontSize, RefreshMode, SurfaceError};

const BODY_STYLE: MonoTextStyle<'static, Color> =
    MonoTextStyle::new(&PROFONT_18_POINT, Color::Black);
const TITLE_STYLE: MonoTextStyle<'static, Color> =
    MonoTextStyle::new(&PROFONT_24_POINT, Color::Black);

/// All layout coordinates are top-left anchored
const TOP_LEFT: TextStyle = TextStyleBuilder::new().baseline(Baseline::Top).build();

/// The concrete panel type spawned by the firmware
pub type BoardPanel = PanelSurface<
    ExclusiveDevice<Spi<'static, Blocking>, Output<'static>, NoDelay>,
    Input<'static>,
    Output<'static>,
    Output<'static>,
    Delay,
>;

pub struct PanelSurface<SPI, BUSY, DC, RST, DELAY>
where
    SPI: SpiDevice,
    BUSY: InputPin,
    DC: OutputPin,
    RST: OutputPin,
    DELAY: DelayNs,
{
    spi: SPI,
    epd: Epd7in5<SPI, BUSY, DC, RST, DELAY>,
    delay: DELAY,
    fb: &'static mut Display7in5,
}

impl<SPI, BUSY, DC, RST, DELAY> PanelSurface<SPI, BUSY, DC, RST, DELAY>
where
    SPI: SpiDevice,
    BUSY: InputPin,
    DC: OutputPin,
    RST: OutputPin,
    DELAY: DelayNs,
{
    /// Wakes the panel and rotates the framebuffer to portrait.
    ///
    /// The framebuffer lives in a static cell because the full frame is
    /// 48 KiB, too large for a task stack.
    pub fn new(
        mut spi: SPI,
        busy: BUSY,
        dc: DC,
        rst: RST,
        mut delay: DELAY,
        fb: &'static mut Display7in5,
    ) -> Result<Self, SurfaceError> {
        let epd = Epd7in5::new(&mut spi, busy, dc, rst, &mut delay, None)
            .map_err(|_| SurfaceError::Bus)?;
        fb.set_rotation(DisplayRotation::Rotate90);
        Ok(Self { spi, epd, delay, fb })
    }
}

impl<SPI, BUSY, DC, RST, DELAY> DrawSurface for PanelSurface<SPI, BUSY, DC, RST, DELAY>
where
    SPI: SpiDevice,
    BUSY: InputPin,
    DC: OutputPin,
    RST: OutputPin,
    DELAY: DelayNs,
{
    fn width(&self) -> u32 {
        self.fb.size().width
    }

    fn height(&self) -> u32 {
        self.fb.size().height
    }

    fn clear(&mut self) -> Result<(), SurfaceError> {
        // Framebuffer draws are infallible; only flushes touch the bus
        let _ = self.fb.clear(Color::White);
        Ok(())
    }

    fn text(&mut self, x: i32, y: i32, font: FontSize, text: &str) -> Result<(), SurfaceError> {
        let style = match font {
            FontSize::Body => BODY_STYLE,
            FontSize::Title => TITLE_STYLE,
        };
        let _ = Text::with_text_style(text, Point::new(x, y), style, TOP_LEFT).draw(self.fb);
        Ok(())
    }

    fn hline(&mut self, x: i32, y: i32, width: u32, weight: u32) -> Result<(), SurfaceError> {
        let rule = Rectangle::new(Point::new(x, y), Size::new(width, weight));
        let _ = rule
            .into_styled(PrimitiveStyle::with_fill(Color::Black))
            .draw(self.fb);
        Ok(())
    }

    fn flush(&mut self, mode: RefreshMode) -> Result<(), SurfaceError> {
        if matches!(mode, RefreshMode::Full) {
            self.epd
                .clear_frame(&mut self.spi, &mut self.delay)
                .map_err(|_| SurfaceError::Bus)?;
        }
        self.epd
            .update_and_display_frame(&mut self.spi, self.fb.buffer(), &mut self.delay)
            .map_err(|_| SurfaceError::Bus)?;
        Ok(())
    }
}
