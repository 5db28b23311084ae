//! Host-side stand-ins for the board: pins that record every edge onto a
//! shared bus, a 74HC595 model that decodes those edges, and a clock that only
//! moves when a delay asks it to.

#![allow(dead_code)]

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use embedded_hal::adc::{Channel, OneShot};
use embedded_hal::blocking::delay::DelayMs;
use embedded_hal::digital::v2::{OutputPin, PinState};
use segmux::{Monotonic, Polarity, ShiftRegister};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Line {
    Latch,
    Clock,
    Data,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Event {
    Set(Line, PinState),
    /// A delay of this many milliseconds.
    Pause(u16),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PinFault;

#[derive(Default)]
pub struct BusState {
    pub events: Vec<Event>,
    pub fail: bool,
}

#[derive(Clone, Default)]
pub struct Bus(pub Rc<RefCell<BusState>>);

impl Bus {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn pin(&self, line: Line) -> FakePin {
        FakePin {
            line,
            bus: self.clone(),
        }
    }

    pub fn register(&self, polarity: Polarity) -> ShiftRegister<FakePin> {
        ShiftRegister::new(
            self.pin(Line::Latch),
            self.pin(Line::Clock),
            self.pin(Line::Data),
            polarity,
        )
        .unwrap()
    }

    pub fn events(&self) -> Vec<Event> {
        self.0.borrow().events.clone()
    }

    pub fn reset(&self) {
        self.0.borrow_mut().events.clear();
    }

    pub fn fail_pins(&self) {
        self.0.borrow_mut().fail = true;
    }

    pub fn record(&self, event: Event) {
        self.0.borrow_mut().events.push(event);
    }

    /// Level of `line` after the last recorded event, if it was ever driven.
    pub fn level(&self, line: Line) -> Option<PinState> {
        self.0.borrow().events.iter().rev().find_map(|e| match *e {
            Event::Set(l, state) if l == line => Some(state),
            _ => None,
        })
    }

    /// Bytes the register committed to its outputs, in order, as seen by a
    /// display with the given polarity (bit set = segment lit).
    pub fn latched(&self, polarity: Polarity) -> Vec<u8> {
        Hc595::replay(&self.events(), polarity).latched
    }

    pub fn pauses(&self) -> Vec<u16> {
        self.events()
            .iter()
            .filter_map(|e| match *e {
                Event::Pause(ms) => Some(ms),
                _ => None,
            })
            .collect()
    }
}

pub struct FakePin {
    line: Line,
    bus: Bus,
}

impl OutputPin for FakePin {
    type Error = PinFault;

    fn set_low(&mut self) -> Result<(), PinFault> {
        self.set_state(PinState::Low)
    }

    fn set_high(&mut self) -> Result<(), PinFault> {
        self.set_state(PinState::High)
    }

    fn set_state(&mut self, state: PinState) -> Result<(), PinFault> {
        if self.bus.0.borrow().fail {
            return Err(PinFault);
        }
        self.bus.record(Event::Set(self.line, state));
        Ok(())
    }
}

/// Edge-accurate model of the shift and storage stages.
pub struct Hc595 {
    clock: PinState,
    latch: PinState,
    data: PinState,
    shifted: Vec<bool>,
    pub latched: Vec<u8>,
}

impl Hc595 {
    pub fn replay(events: &[Event], polarity: Polarity) -> Self {
        let mut chip = Hc595 {
            clock: PinState::Low,
            // Parked high by `ShiftRegister::new`, so start-up is not a commit.
            latch: PinState::High,
            data: PinState::Low,
            shifted: Vec::new(),
            latched: Vec::new(),
        };
        for event in events {
            if let Event::Set(line, state) = *event {
                chip.drive(line, state, polarity);
            }
        }
        chip
    }

    fn drive(&mut self, line: Line, state: PinState, polarity: Polarity) {
        let rising = state == PinState::High;
        match line {
            Line::Data => self.data = state,
            Line::Clock => {
                if rising && self.clock == PinState::Low {
                    self.shifted.push(self.data == polarity.level(true));
                }
                self.clock = state;
            }
            Line::Latch => {
                if rising && self.latch == PinState::Low {
                    let first = self.shifted.len().saturating_sub(8);
                    let byte = self.shifted[first..]
                        .iter()
                        .enumerate()
                        .fold(0u8, |acc, (i, lit)| acc | (u8::from(*lit) << i));
                    self.latched.push(byte);
                }
                self.latch = state;
            }
        }
    }
}

/// Millisecond counter under test control.
#[derive(Clone, Default)]
pub struct SimClock(pub Rc<Cell<u32>>);

impl SimClock {
    pub fn at(ms: u32) -> Self {
        Self(Rc::new(Cell::new(ms)))
    }

    pub fn advance(&self, ms: u32) {
        self.0.set(self.0.get().wrapping_add(ms));
    }

    pub fn set(&self, ms: u32) {
        self.0.set(ms);
    }
}

impl Monotonic for SimClock {
    fn millis(&self) -> u32 {
        self.0.get()
    }
}

/// Records each pause on the bus and moves the clock forward by it.
pub struct SimDelay {
    pub bus: Bus,
    pub clock: SimClock,
}

impl DelayMs<u16> for SimDelay {
    fn delay_ms(&mut self, ms: u16) {
        self.bus.record(Event::Pause(ms));
        self.clock.advance(u32::from(ms));
    }
}

/// Marker standing in for a HAL's ADC type.
pub struct FakeAdcKind;

pub struct PotPin;

impl Channel<FakeAdcKind> for PotPin {
    type ID = u8;

    fn channel() -> u8 {
        0
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AdcFault;

/// ADC whose reading is set from the test. Each conversion reports
/// `WouldBlock` `busy_polls` times before completing.
#[derive(Clone)]
pub struct FakeAdc {
    pub value: Rc<Cell<u16>>,
    pub busy_polls: u8,
    pub fail: Rc<Cell<bool>>,
    pending: u8,
}

impl FakeAdc {
    pub fn new(value: u16) -> Self {
        Self {
            value: Rc::new(Cell::new(value)),
            busy_polls: 0,
            fail: Rc::new(Cell::new(false)),
            pending: 0,
        }
    }
}

impl OneShot<FakeAdcKind, u16, PotPin> for FakeAdc {
    type Error = AdcFault;

    fn read(&mut self, _pin: &mut PotPin) -> nb::Result<u16, AdcFault> {
        if self.fail.get() {
            return Err(nb::Error::Other(AdcFault));
        }
        if self.pending < self.busy_polls {
            self.pending += 1;
            return Err(nb::Error::WouldBlock);
        }
        self.pending = 0;
        Ok(self.value.get())
    }
}
