//! The control loop.

use core::convert::Infallible;
use core::marker::PhantomData;

use embedded_hal::adc::{Channel, OneShot};
use embedded_hal::blocking::delay::DelayMs;
use embedded_hal::digital::v2::OutputPin;

use crate::clock::Monotonic;
use crate::config::Config;
use crate::display::SegmentDisplay;
use crate::segments;
use crate::Error;

/// Something that yields a raw potentiometer reading.
pub trait Sampler {
    type Error;

    fn sample(&mut self) -> Result<u16, Self::Error>;
}

/// A potentiometer wiper on an ADC channel.
///
/// `ADC` is the HAL's ADC marker type that ties `pin` to `adc`.
pub struct Knob<ADC, A, P> {
    adc: A,
    pin: P,
    _adc: PhantomData<ADC>,
}

impl<ADC, A, P> Knob<ADC, A, P>
where
    A: OneShot<ADC, u16, P>,
    P: Channel<ADC>,
{
    pub fn new(adc: A, pin: P) -> Self {
        Self {
            adc,
            pin,
            _adc: PhantomData,
        }
    }

    pub fn release(self) -> (A, P) {
        (self.adc, self.pin)
    }
}

impl<ADC, A, P> Sampler for Knob<ADC, A, P>
where
    A: OneShot<ADC, u16, P>,
    P: Channel<ADC>,
{
    type Error = A::Error;

    fn sample(&mut self) -> Result<u16, Self::Error> {
        nb::block!(self.adc.read(&mut self.pin))
    }
}

/// Steps through the digits 0-9, rendering the current one continuously.
pub struct Runner<Pin, D, K, C> {
    display: SegmentDisplay<Pin, D>,
    knob: K,
    clock: C,
    config: Config,
    digit: u8,
    last_change: u32,
}

impl<Pin, D, K, C> Runner<Pin, D, K, C>
where
    Pin: OutputPin,
    D: DelayMs<u16>,
    K: Sampler,
    C: Monotonic,
{
    /// The first digit period starts now.
    pub fn new(display: SegmentDisplay<Pin, D>, knob: K, clock: C, config: Config) -> Self {
        let last_change = clock.millis();
        Self {
            display,
            knob,
            clock,
            config,
            digit: config.start_digit % 10,
            last_change,
        }
    }

    /// Digit currently on display.
    pub fn digit(&self) -> u8 {
        self.digit
    }

    /// Segment mask of the digit currently on display.
    pub fn mask(&self) -> u8 {
        segments::digit(self.digit)
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// One pass of the loop: read the knob, move to the next digit if its
    /// period is up, then scan the digit once.
    pub fn step(&mut self) -> Result<(), Error<Pin::Error, K::Error>> {
        let sample = self.knob.sample().map_err(Error::Adc)?;
        let pause = self.config.pause_for(sample);
        if pause != self.display.pause_ms() {
            debug!("pause {=u16} ms (sample {=u16})", pause, sample);
            self.display.set_pause_ms(pause);
        }

        let now = self.clock.millis();
        if now.wrapping_sub(self.last_change) >= self.config.digit_period_ms {
            self.digit = (self.digit + 1) % 10;
            self.last_change = now;
            trace!("digit {=u8}", self.digit);
        }

        self.display.show(self.mask()).map_err(Error::Pin)
    }

    /// Runs [`step`](Self::step) until the hardware fails.
    pub fn run(&mut self) -> Result<Infallible, Error<Pin::Error, K::Error>> {
        loop {
            self.step()?;
        }
    }

    pub fn release(self) -> (SegmentDisplay<Pin, D>, K, C) {
        (self.display, self.knob, self.clock)
    }
}
