//! Board-agnostic core logic for the e-paper calendar
//!
//! This crate contains all application logic that does not depend on
//! specific hardware implementations:
//!
//! - Hardware abstraction traits (drawing surface, clock, battery, feed source)
//! - Battery gauge (voltage to charge fraction)
//! - Plan feed model, bounded JSON parsing and the last-good cache
//! - Screen layout (status bar and agenda list)
//! - The refresh engine driving one display cycle

#![no_std]
#![deny(unsafe_code)]

pub mod engine;
pub mod feed;
pub mod gauge;
pub mod layout;
pub mod traits;

#[cfg(test)]
pub(crate) mod testkit;
