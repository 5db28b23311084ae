#![no_main]
#![no_std]

use core::cell::Cell;

use cortex_m::interrupt::Mutex;
use cortex_m::peripheral::syst::SystClkSource;
use cortex_m_rt::{entry, exception};
use defmt_rtt as _;
use panic_halt as _;
use segmux::{ClockDelay, Config, Knob, Monotonic, Runner, SegmentDisplay, ShiftRegister};
use stm32f0xx_hal as hal;

use crate::hal::{
    adc::{Adc, AdcPrecision},
    pac,
    prelude::*,
};

// Wiring:
//  PA4 -> 74HC595 ST_CP (latch)
//  PA5 -> 74HC595 SH_CP (clock)
//  PA7 -> 74HC595 DS (data)
//  PA0 <- potentiometer wiper
//
//  Q0..Q7 drive A, B, C, D, E, F, G, DP of a common-anode digit.

const SYSCLK_MHZ: u32 = 8;
const TICK_HZ: u32 = 1_000;

static MILLIS: Mutex<Cell<u32>> = Mutex::new(Cell::new(0));

#[exception]
fn SysTick() {
    cortex_m::interrupt::free(|cs| {
        let millis = MILLIS.borrow(cs);
        millis.set(millis.get().wrapping_add(1));
    });
}

/// Milliseconds since SysTick was started.
#[derive(Clone, Copy)]
struct SysTickClock;

impl Monotonic for SysTickClock {
    fn millis(&self) -> u32 {
        cortex_m::interrupt::free(|cs| MILLIS.borrow(cs).get())
    }
}

#[entry]
fn main() -> ! {
    let mut p = pac::Peripherals::take().unwrap();
    let mut cp = cortex_m::Peripherals::take().unwrap();

    let mut rcc = p
        .RCC
        .configure()
        .sysclk(SYSCLK_MHZ.mhz())
        .freeze(&mut p.FLASH);

    cp.SYST.set_clock_source(SystClkSource::Core);
    cp.SYST.set_reload(rcc.clocks.sysclk().0 / TICK_HZ - 1);
    cp.SYST.clear_current();
    cp.SYST.enable_interrupt();
    cp.SYST.enable_counter();

    let gpioa = p.GPIOA.split(&mut rcc);

    let (latch, clock, data, pot) = cortex_m::interrupt::free(|cs| {
        (
            gpioa.pa4.into_push_pull_output(cs).downgrade(),
            gpioa.pa5.into_push_pull_output(cs).downgrade(),
            gpioa.pa7.into_push_pull_output(cs).downgrade(),
            gpioa.pa0.into_analog(cs),
        )
    });

    let mut adc = Adc::new(p.ADC, &mut rcc);
    // 10 bits keeps the default divisor at 0..=10 ms of pause.
    adc.set_precision(AdcPrecision::B_10);

    let config = Config::default();
    defmt::info!(
        "segmux: period {=u32} ms, divisor {=u16}",
        config.digit_period_ms,
        config.pot_divisor
    );

    let register = match ShiftRegister::new(latch, clock, data, config.polarity) {
        Ok(register) => register,
        Err(never) => match never {},
    };
    let mut display = SegmentDisplay::new(register, ClockDelay::new(SysTickClock));
    if let Err(never) = display.blank() {
        match never {}
    }

    let knob = Knob::<Adc, _, _>::new(adc, pot);
    let mut runner = Runner::new(display, knob, SysTickClock, config);

    match runner.run() {
        Ok(never) => match never {},
        Err(e) => {
            defmt::error!("display stopped: {}", defmt::Debug2Format(&e));
            panic!();
        }
    }
}
