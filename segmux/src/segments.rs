//! Digit to segment mapping.
//!
//! Segment layout:
//! ```text
//!    AAAAA
//!   F     B
//!   F     B
//!    GGGGG
//!   E     C
//!   E     C
//!    DDDDD  DP
//! ```
//!
//! Bit 7 of a mask is segment A, bit 0 is the decimal point.

/// Segment masks for the digits 0-9.
pub const DIGITS: [u8; 10] = [
    0b1111_1100, // 0
    0b0110_0000, // 1
    0b1101_1010, // 2
    0b1111_0010, // 3
    0b0110_0110, // 4
    0b1011_0110, // 5
    0b1011_1110, // 6
    0b1110_0000, // 7
    0b1111_1110, // 8
    0b1111_0110, // 9
];

/// Mask for digit `n`.
///
/// # Panics
///
/// If `n` is not in `0..=9`.
pub fn digit(n: u8) -> u8 {
    DIGITS[usize::from(n)]
}

/// One physical segment of the display.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Segment {
    A,
    B,
    C,
    D,
    E,
    F,
    G,
    Dp,
}

impl Segment {
    /// All segments in scan order, A first.
    pub const ALL: [Segment; 8] = [
        Segment::A,
        Segment::B,
        Segment::C,
        Segment::D,
        Segment::E,
        Segment::F,
        Segment::G,
        Segment::Dp,
    ];

    /// The single-bit mask that drives this segment.
    pub const fn mask(self) -> u8 {
        0x80 >> (self as u8)
    }
}

/// A set of lit segments.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Segments(pub u8);

impl Segments {
    pub const fn empty() -> Self {
        Self(0)
    }

    /// Segments for `digit`, or `None` past 9.
    pub fn from_digit(digit: u8) -> Option<Self> {
        DIGITS.get(usize::from(digit)).copied().map(Self)
    }

    pub fn contains(&self, segment: Segment) -> bool {
        (self.0 & segment.mask()) != 0
    }

    /// Lit segments, most significant bit first.
    pub fn iter(&self) -> impl Iterator<Item = Segment> + '_ {
        Segment::ALL.into_iter().filter(move |s| self.contains(*s))
    }
}

impl From<u8> for Segments {
    fn from(mask: u8) -> Self {
        Self(mask)
    }
}

impl core::ops::BitOr<Segment> for Segments {
    type Output = Segments;
    fn bitor(self, rhs: Segment) -> Self::Output {
        Segments(self.0 | rhs.mask())
    }
}
