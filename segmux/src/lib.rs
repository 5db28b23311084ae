//! Platform agnostic driver for a single 7-segment digit hanging off a
//! 74HC595 style shift register.
//!
//! Only one segment is ever lit at a time. [`SegmentDisplay::show`] walks the
//! lit segments of a digit and clocks each one out on its own, so the register
//! never sources more than one segment's worth of current. Persistence of
//! vision does the rest.
//!
//! [`Runner`] is the control loop: it reads a potentiometer to pick the pause
//! between segments and steps through the digits 0-9 once per
//! [`Config::digit_period_ms`].

#![deny(unsafe_code)]
#![no_std]

#[macro_use]
mod fmt;

pub mod clock;
pub mod config;
pub mod display;
pub mod runner;
pub mod segments;
pub mod shift;

pub use clock::{ClockDelay, Monotonic};
pub use config::{Config, Polarity};
pub use display::SegmentDisplay;
pub use runner::{Knob, Runner, Sampler};
pub use segments::{Segment, Segments, DIGITS};
pub use shift::ShiftRegister;

/// Errors raised by the hardware underneath the display.
#[derive(Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Error<PinError, AdcError> {
    /// One of the latch, clock or data lines could not be driven.
    Pin(PinError),
    /// The potentiometer could not be sampled.
    Adc(AdcError),
}
