//! Segment multiplexing.

use embedded_hal::blocking::delay::DelayMs;
use embedded_hal::digital::v2::OutputPin;

use crate::segments::Segments;
use crate::shift::ShiftRegister;

/// A 7-segment digit scanned one segment at a time.
pub struct SegmentDisplay<Pin, D> {
    register: ShiftRegister<Pin>,
    delay: D,
    pause_ms: u16,
}

impl<Pin, D> SegmentDisplay<Pin, D>
where
    Pin: OutputPin,
    D: DelayMs<u16>,
{
    pub fn new(register: ShiftRegister<Pin>, delay: D) -> Self {
        Self {
            register,
            delay,
            pause_ms: 0,
        }
    }

    /// Pause after every latched segment. Longer pauses flicker, shorter ones
    /// look dimmer and smoother.
    pub fn set_pause_ms(&mut self, pause_ms: u16) {
        self.pause_ms = pause_ms;
    }

    pub fn pause_ms(&self) -> u16 {
        self.pause_ms
    }

    /// Latches `byte` and holds it for the current pause.
    pub fn shift_it(&mut self, byte: u8) -> Result<(), Pin::Error> {
        self.register.shift_out(byte)?;
        self.delay.delay_ms(self.pause_ms);
        Ok(())
    }

    /// Scans `mask` from segment A down to the decimal point, latching each lit
    /// segment on its own. Unlit segments are skipped without touching the
    /// register.
    pub fn show(&mut self, mask: u8) -> Result<(), Pin::Error> {
        for segment in Segments(mask).iter() {
            self.shift_it(segment.mask())?;
        }
        Ok(())
    }

    /// Turns all segments off.
    pub fn blank(&mut self) -> Result<(), Pin::Error> {
        self.register.clear()
    }

    pub fn release(self) -> (ShiftRegister<Pin>, D) {
        (self.register, self.delay)
    }
}
