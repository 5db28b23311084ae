//! Runtime knobs for the driver.

use embedded_hal::digital::v2::PinState;

/// Which data line level turns a segment on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Polarity {
    /// Segments share the supply; a low output sinks current and lights it.
    #[default]
    CommonAnode,
    /// Segments share ground; a high output lights it.
    CommonCathode,
}

impl Polarity {
    /// Level to put on the data line for a segment that should be `lit`.
    pub fn level(self, lit: bool) -> PinState {
        match (self, lit) {
            (Polarity::CommonAnode, true) | (Polarity::CommonCathode, false) => PinState::Low,
            (Polarity::CommonAnode, false) | (Polarity::CommonCathode, true) => PinState::High,
        }
    }
}

/// Driver configuration.
///
/// ```
/// use segmux::{Config, Polarity};
///
/// let config = Config::default()
///     .with_pot_divisor(50)
///     .with_polarity(Polarity::CommonCathode);
/// assert_eq!(config.pause_for(1000), 20);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Config {
    /// How long each digit stays up, in milliseconds.
    pub digit_period_ms: u32,
    /// Potentiometer counts per millisecond of pause between segments.
    pub pot_divisor: u16,
    pub polarity: Polarity,
    /// First digit shown after start-up.
    pub start_digit: u8,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            digit_period_ms: 1000,
            pot_divisor: 100,
            polarity: Polarity::CommonAnode,
            start_digit: 0,
        }
    }
}

impl Config {
    pub fn with_digit_period_ms(mut self, period: u32) -> Self {
        self.digit_period_ms = period;
        self
    }

    /// A divisor of 0 is treated as 1.
    pub fn with_pot_divisor(mut self, divisor: u16) -> Self {
        self.pot_divisor = divisor.max(1);
        self
    }

    pub fn with_polarity(mut self, polarity: Polarity) -> Self {
        self.polarity = polarity;
        self
    }

    /// Digits past 9 wrap around.
    pub fn with_start_digit(mut self, digit: u8) -> Self {
        self.start_digit = digit % 10;
        self
    }

    /// Pause in milliseconds for a potentiometer reading.
    pub fn pause_for(&self, sample: u16) -> u16 {
        sample / self.pot_divisor.max(1)
    }
}
