//! Digit display trait

use crate::display::{encode, BitPattern, DisplayFrame};

/// A chain of ten-segment digit drivers fed one pattern at a time
///
/// Patterns shift through the chain, so the push order decides where
/// each digit lands. [`DigitDisplay::show`] pushes a frame in the order
/// the wiring expects.
pub trait DigitDisplay {
    type Error;

    /// Shift one 10-bit pattern into the chain and latch it
    fn push_digit(&mut self, pattern: BitPattern) -> Result<(), Self::Error>;

    /// Push all four digits of a frame
    fn show(&mut self, frame: &DisplayFrame) -> Result<(), Self::Error> {
        for digit in frame.push_order() {
            self.push_digit(encode(digit))?;
        }
        Ok(())
    }
}
