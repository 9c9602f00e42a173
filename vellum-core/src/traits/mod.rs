//! Hardware abstraction traits
//!
//! These traits define the interface between the application logic
//! and hardware-specific implementations.

pub mod battery;
pub mod clock;
pub mod source;
pub mod surface;

pub use battery::BatteryProbe;
pub use clock::{ClockError, LocalTime, WallClock, TIME_PLACEHOLDER};
pub use source::{FetchError, PlanSource};
pub use surface::{DrawSurface, FontSize, RefreshMode, SurfaceError};
