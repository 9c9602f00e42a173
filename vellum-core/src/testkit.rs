//! Test doubles for the capability traits
//!
//! Host-side fakes: a surface that records calls instead of drawing, a
//! clock and battery pinned to fixed readings, and a plan source that
//! replays a script.

use heapless::{String, Vec};

use crate::feed::model::{PlanFeed, PlanItem};
use crate::traits::battery::BatteryProbe;
use crate::traits::clock::{ClockError, LocalTime, WallClock};
use crate::traits::source::{FetchError, PlanSource};
use crate::traits::surface::{DrawSurface, FontSize, RefreshMode, SurfaceError};

/// Capacity of one recorded text payload
const OP_TEXT_LEN: usize = 64;
/// Recorded operation bound per surface
const MAX_OPS: usize = 128;

/// One recorded drawing call
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DrawOp {
    Clear,
    Text {
        x: i32,
        y: i32,
        font: FontSize,
        text: String<OP_TEXT_LEN>,
    },
    HLine {
        x: i32,
        y: i32,
        width: u32,
        weight: u32,
    },
    Flush(RefreshMode),
}

impl DrawOp {
    /// Shorthand for an expected text op
    pub fn text(x: i32, y: i32, font: FontSize, text: &str) -> Self {
        let mut s = String::new();
        let _ = s.push_str(text);
        DrawOp::Text { x, y, font, text: s }
    }
}

/// Surface that records every call instead of drawing
pub struct RecordingSurface {
    width: u32,
    height: u32,
    pub ops: Vec<DrawOp, MAX_OPS>,
    /// When set, the next flush fails with this error
    pub fail_flush: Option<SurfaceError>,
}

impl RecordingSurface {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            ops: Vec::new(),
            fail_flush: None,
        }
    }

    /// All recorded text payloads in draw order
    pub fn texts(&self) -> Vec<String<OP_TEXT_LEN>, MAX_OPS> {
        let mut out = Vec::new();
        for op in &self.ops {
            if let DrawOp::Text { text, .. } = op {
                let _ = out.push(text.clone());
            }
        }
        out
    }

    /// Y positions of every rule of the given weight, in draw order
    pub fn rule_ys(&self, weight: u32) -> Vec<i32, MAX_OPS> {
        let mut out = Vec::new();
        for op in &self.ops {
            if let DrawOp::HLine { y, weight: w, .. } = op {
                if *w == weight {
                    let _ = out.push(*y);
                }
            }
        }
        out
    }
}

impl DrawSurface for RecordingSurface {
    fn width(&self) -> u32 {
        self.width
    }

    fn height(&self) -> u32 {
        self.height
    }

    fn clear(&mut self) -> Result<(), SurfaceError> {
        let _ = self.ops.push(DrawOp::Clear);
        Ok(())
    }

    fn text(&mut self, x: i32, y: i32, font: FontSize, text: &str) -> Result<(), SurfaceError> {
        let _ = self.ops.push(DrawOp::text(x, y, font, text));
        Ok(())
    }

    fn hline(&mut self, x: i32, y: i32, width: u32, weight: u32) -> Result<(), SurfaceError> {
        let _ = self.ops.push(DrawOp::HLine {
            x,
            y,
            width,
            weight,
        });
        Ok(())
    }

    fn flush(&mut self, mode: RefreshMode) -> Result<(), SurfaceError> {
        if let Some(err) = self.fail_flush.take() {
            return Err(err);
        }
        let _ = self.ops.push(DrawOp::Flush(mode));
        Ok(())
    }
}

/// Clock pinned to one reading
pub struct FixedClock(pub Result<LocalTime, ClockError>);

impl WallClock for FixedClock {
    fn now(&mut self) -> Result<LocalTime, ClockError> {
        self.0
    }
}

/// Battery pinned to one voltage
pub struct FixedBattery(pub u32);

impl BatteryProbe for FixedBattery {
    fn millivolts(&mut self) -> u32 {
        self.0
    }
}

/// Plan source replaying a scripted sequence of fetch results
///
/// Fetches past the end of the script fail with `Transport`.
pub struct ScriptedSource {
    script: Vec<Result<PlanFeed, FetchError>, 8>,
    next: usize,
}

impl ScriptedSource {
    pub fn new(script: &[Result<PlanFeed, FetchError>]) -> Self {
        let mut s = Vec::new();
        for step in script {
            let _ = s.push(step.clone());
        }
        Self { script: s, next: 0 }
    }
}

impl PlanSource for ScriptedSource {
    async fn fetch(&mut self) -> Result<PlanFeed, FetchError> {
        let result = self
            .script
            .get(self.next)
            .cloned()
            .unwrap_or(Err(FetchError::Transport));
        self.next += 1;
        result
    }
}

/// Feed whose advisory count matches its items
pub fn feed_with(entries: &[(&str, &str)]) -> PlanFeed {
    let mut feed = PlanFeed::empty();
    for (title, time) in entries {
        let mut item = PlanItem::default();
        let _ = item.title.push_str(title);
        let _ = item.display_time.push_str(time);
        let _ = feed.items.push(item);
    }
    feed.num_items = feed.items.len() as u16;
    feed
}
