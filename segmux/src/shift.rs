//! Bit-banged 74HC595.
//!
//! Three lines drive the register: data carries the bit value, a rising edge
//! on clock shifts it in, and a rising edge on latch copies the shift stage to
//! the outputs.

use embedded_hal::digital::v2::OutputPin;

use crate::config::Polarity;

pub struct ShiftRegister<Pin> {
    latch: Pin,
    clock: Pin,
    data: Pin,
    polarity: Polarity,
}

impl<Pin: OutputPin> ShiftRegister<Pin> {
    /// Takes the three control lines and parks them idle: latch high, clock
    /// low, data at the "off" level.
    pub fn new(
        latch: Pin,
        clock: Pin,
        data: Pin,
        polarity: Polarity,
    ) -> Result<Self, Pin::Error> {
        let mut reg = Self { latch, clock, data, polarity };
        reg.latch.set_high()?;
        reg.clock.set_low()?;
        reg.data.set_state(polarity.level(false))?;
        Ok(reg)
    }

    /// Shifts `byte` in least significant bit first, then latches it.
    ///
    /// Leaves clock low and latch high whatever the byte was.
    pub fn shift_out(&mut self, byte: u8) -> Result<(), Pin::Error> {
        self.latch.set_low()?;
        for bit in 0..8 {
            self.clock.set_low()?;
            let lit = byte & (1 << bit) != 0;
            self.data.set_state(self.polarity.level(lit))?;
            self.clock.set_high()?;
        }
        self.clock.set_low()?;
        self.latch.set_high()
    }

    /// Turns every output off.
    pub fn clear(&mut self) -> Result<(), Pin::Error> {
        self.shift_out(0)
    }

    pub fn polarity(&self) -> Polarity {
        self.polarity
    }

    /// Gives back the (latch, clock, data) pins.
    pub fn release(self) -> (Pin, Pin, Pin) {
        (self.latch, self.clock, self.data)
    }
}
