//! Shift-register digit display
//!
//! Each digit panel hangs off a 10-bit slice of a chain of serial-in,
//! parallel-out shift registers. Three lines drive the chain:
//!
//! - DATA: bit value sampled on the rising clock edge
//! - CLOCK: shifts the chain by one bit
//! - LATCH: outputs follow the register contents while high
//!
//! A push holds the latch low, clocks the ten bits in (bit 9 first) and
//! raises the latch again, so the panels never show a half-shifted state.

use edgelit_core::display::BitPattern;
use edgelit_core::traits::DigitDisplay;
use embedded_hal::digital::{OutputPin, PinState};

/// Shift-register chain behind three output pins
///
/// All three pins must share one error type; on the RP2040 it is
/// [`core::convert::Infallible`].
pub struct ShiftRegisterDisplay<DATA, CLOCK, LATCH> {
    data: DATA,
    clock: CLOCK,
    latch: LATCH,
}

impl<DATA, CLOCK, LATCH> ShiftRegisterDisplay<DATA, CLOCK, LATCH>
where
    DATA: OutputPin,
    CLOCK: OutputPin<Error = DATA::Error>,
    LATCH: OutputPin<Error = DATA::Error>,
{
    /// Take ownership of the three bus lines
    ///
    /// Pin levels are left as configured until the first push.
    pub fn new(data: DATA, clock: CLOCK, latch: LATCH) -> Self {
        Self { data, clock, latch }
    }

    /// Give the pins back
    pub fn release(self) -> (DATA, CLOCK, LATCH) {
        (self.data, self.clock, self.latch)
    }

    fn shift_bit(&mut self, bit: bool) -> Result<(), DATA::Error> {
        self.data.set_state(PinState::from(bit))?;
        self.clock.set_high()?;
        self.clock.set_low()
    }
}

impl<DATA, CLOCK, LATCH> DigitDisplay for ShiftRegisterDisplay<DATA, CLOCK, LATCH>
where
    DATA: OutputPin,
    CLOCK: OutputPin<Error = DATA::Error>,
    LATCH: OutputPin<Error = DATA::Error>,
{
    type Error = DATA::Error;

    fn push_digit(&mut self, pattern: BitPattern) -> Result<(), Self::Error> {
        self.latch.set_low()?;
        for bit in pattern.bits() {
            self.shift_bit(bit)?;
        }
        self.latch.set_high()
    }
}
