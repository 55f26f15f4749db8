//! Four-position display frame
//!
//! The register chain is cascaded across the four positions and every
//! push shifts the earlier ones along, so the push order decides where a
//! digit lands. A frame names each slot explicitly and hands the digits
//! back in the one order the hardware accepts.

use super::encoder::Digit;

/// Digits for one full display refresh
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct DisplayFrame {
    hour_tens: Digit,
    hour_ones: Digit,
    minute_tens: Digit,
    minute_ones: Digit,
}

impl DisplayFrame {
    /// Create a frame from its four positional digits
    pub const fn new(
        hour_tens: Digit,
        hour_ones: Digit,
        minute_tens: Digit,
        minute_ones: Digit,
    ) -> Self {
        Self {
            hour_tens,
            hour_ones,
            minute_tens,
            minute_ones,
        }
    }

    /// Frame showing `hour:minute` (both taken modulo 100)
    pub const fn from_hour_minute(hour: u8, minute: u8) -> Self {
        Self::new(
            Digit::tens(hour),
            Digit::ones(hour),
            Digit::tens(minute),
            Digit::ones(minute),
        )
    }

    /// "99:99", shown from power-on until the first successful sync
    pub const fn placeholder() -> Self {
        Self::new(Digit::NINE, Digit::NINE, Digit::NINE, Digit::NINE)
    }

    /// Digits in push order: hour tens, hour ones, minute tens, minute ones
    pub const fn push_order(&self) -> [Digit; 4] {
        [
            self.hour_tens,
            self.hour_ones,
            self.minute_tens,
            self.minute_ones,
        ]
    }

    pub const fn hour_tens(&self) -> Digit {
        self.hour_tens
    }

    pub const fn hour_ones(&self) -> Digit {
        self.hour_ones
    }

    pub const fn minute_tens(&self) -> Digit {
        self.minute_tens
    }

    pub const fn minute_ones(&self) -> Digit {
        self.minute_ones
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn values(frame: &DisplayFrame) -> [u8; 4] {
        frame.push_order().map(Digit::value)
    }

    #[test]
    fn test_push_order() {
        let frame = DisplayFrame::from_hour_minute(23, 13);
        assert_eq!(values(&frame), [2, 3, 1, 3]);
    }

    #[test]
    fn test_leading_zeros() {
        let frame = DisplayFrame::from_hour_minute(7, 5);
        assert_eq!(values(&frame), [0, 7, 0, 5]);
    }

    #[test]
    fn test_placeholder() {
        assert_eq!(values(&DisplayFrame::placeholder()), [9, 9, 9, 9]);
    }

    #[test]
    fn test_slots() {
        let frame = DisplayFrame::from_hour_minute(12, 34);
        assert_eq!(frame.hour_tens().value(), 1);
        assert_eq!(frame.hour_ones().value(), 2);
        assert_eq!(frame.minute_tens().value(), 3);
        assert_eq!(frame.minute_ones().value(), 4);
    }
}
