//! Digit to wire encoding
//!
//! Each display position is a stack of ten edge-lit plates, one per
//! decimal digit. The plates hang off a 10-bit shift-register chain in
//! whatever order the harness was soldered, so the digit value says
//! nothing about which output lights it. The table below is that
//! harness, copied from the build notes.

/// Number of shift-register outputs per display position
pub const BITS_PER_DIGIT: usize = 10;

/// A decimal digit in `0..=9`
///
/// There is no way to build a `Digit` outside that range, so encoding
/// never has to deal with an invalid value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Digit(u8);

impl Digit {
    pub const ZERO: Digit = Digit(0);
    pub const NINE: Digit = Digit(9);

    /// Create a digit, or `None` if `value > 9`
    pub const fn new(value: u8) -> Option<Self> {
        if value <= 9 {
            Some(Self(value))
        } else {
            None
        }
    }

    /// Ones place of `value`
    pub const fn ones(value: u8) -> Self {
        Self(value % 10)
    }

    /// Tens place of `value`
    pub const fn tens(value: u8) -> Self {
        Self((value / 10) % 10)
    }

    /// Numeric value
    pub const fn value(self) -> u8 {
        self.0
    }
}

impl TryFrom<u8> for Digit {
    type Error = u8;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::new(value).ok_or(value)
    }
}

impl From<Digit> for u8 {
    fn from(digit: Digit) -> u8 {
        digit.0
    }
}

/// Ten-bit output pattern for one display position
///
/// Bit 9 is shifted out first and ends up furthest down the chain.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct BitPattern(u16);

impl BitPattern {
    /// Pattern with every output off
    pub const BLANK: BitPattern = BitPattern(0);

    const MASK: u16 = (1 << BITS_PER_DIGIT) - 1;

    /// Create a pattern from the low ten bits of `raw`
    pub const fn from_raw(raw: u16) -> Self {
        Self(raw & Self::MASK)
    }

    /// Raw ten-bit value
    pub const fn raw(self) -> u16 {
        self.0
    }

    /// Whether output `bit` (0-9) is asserted
    pub const fn is_set(self, bit: u8) -> bool {
        bit < BITS_PER_DIGIT as u8 && self.0 & (1 << bit) != 0
    }

    /// Number of asserted outputs
    pub const fn count_ones(self) -> u32 {
        self.0.count_ones()
    }

    /// Bits in transmission order, most significant first
    pub fn bits(self) -> impl Iterator<Item = bool> {
        (0..BITS_PER_DIGIT as u8)
            .rev()
            .map(move |bit| self.is_set(bit))
    }
}

/// Wiring table, indexed by digit value
const WIRING: [BitPattern; 10] = [
    BitPattern(0b00_0000_0001), // 0 - black  - bit 0
    BitPattern(0b00_0010_0000), // 1 - green  - bit 5
    BitPattern(0b00_0001_0000), // 2 - blue   - bit 4
    BitPattern(0b00_0100_0000), // 3 - yellow - bit 6
    BitPattern(0b00_0000_1000), // 4 - violet - bit 3
    BitPattern(0b00_1000_0000), // 5 - orange - bit 7
    BitPattern(0b00_0000_0100), // 6 - grey   - bit 2
    BitPattern(0b01_0000_0000), // 7 - red    - bit 8
    BitPattern(0b00_0000_0010), // 8 - white  - bit 1
    BitPattern(0b10_0000_0000), // 9 - brown  - bit 9
];

/// Pattern that lights `digit`
pub const fn encode(digit: Digit) -> BitPattern {
    WIRING[digit.0 as usize]
}

/// Digit lit by `pattern`, if it is one of the wired patterns
pub fn decode(pattern: BitPattern) -> Option<Digit> {
    WIRING
        .iter()
        .position(|p| *p == pattern)
        .map(|i| Digit(i as u8))
}
