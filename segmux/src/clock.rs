//! Time sources.

use embedded_hal::blocking::delay::DelayMs;

/// A free-running millisecond counter.
///
/// The counter is allowed to wrap; callers compare readings with
/// `wrapping_sub`.
pub trait Monotonic {
    fn millis(&self) -> u32;
}

impl<C: Monotonic + ?Sized> Monotonic for &C {
    fn millis(&self) -> u32 {
        (**self).millis()
    }
}

/// Busy-wait delay driven by a [`Monotonic`] counter.
///
/// Lets the millisecond tick be the only timer in the system, so the SysTick
/// peripheral does not have to be handed to a HAL delay as well.
pub struct ClockDelay<C> {
    clock: C,
}

impl<C: Monotonic> ClockDelay<C> {
    pub fn new(clock: C) -> Self {
        Self { clock }
    }

    pub fn release(self) -> C {
        self.clock
    }
}

impl<C: Monotonic> DelayMs<u32> for ClockDelay<C> {
    fn delay_ms(&mut self, ms: u32) {
        let start = self.clock.millis();
        while self.clock.millis().wrapping_sub(start) < ms {
            core::hint::spin_loop();
        }
    }
}

impl<C: Monotonic> DelayMs<u16> for ClockDelay<C> {
    fn delay_ms(&mut self, ms: u16) {
        DelayMs::<u32>::delay_ms(self, u32::from(ms));
    }
}

impl<C: Monotonic> DelayMs<u8> for ClockDelay<C> {
    fn delay_ms(&mut self, ms: u8) {
        DelayMs::<u32>::delay_ms(self, u32::from(ms));
    }
}
