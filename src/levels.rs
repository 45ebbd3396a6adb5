//! Physical electrode stacking order.
//!
//! Inside a nixie tube the digit cathodes are stacked in depth, and the
//! stacking order has nothing to do with numeric order. [`LevelOrder`]
//! records that order as data — innermost electrode first — so the `Level`
//! animation mode can travel through physically adjacent electrodes instead
//! of jumping numerically.

/// Number of representable digit values: 0-9 plus the blank sentinel.
pub const DIGIT_SPAN: usize = 11;

/// Errors rejected while validating a level table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum LevelOrderError {
    /// A table entry is outside the digit domain 0-10.
    OutOfRange(u8),

    /// A digit value appears more than once in the table.
    Duplicate(u8),
}

impl core::fmt::Display for LevelOrderError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            LevelOrderError::OutOfRange(value) => {
                write!(f, "level table entry {} is outside 0-10", value)
            }
            LevelOrderError::Duplicate(value) => {
                write!(f, "digit value {} appears twice in level table", value)
            }
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for LevelOrderError {}

/// A validated permutation of the digit domain, indexed by stacking depth.
///
/// Every value 0-10 appears exactly once, so every representable digit has
/// a depth and `Level` animation paths are total over the domain. Wire
/// values above 10 have no depth; callers decide what to do with them (the
/// engine snaps, see [`DigitState::advance`](crate::types::DigitState)).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct LevelOrder {
    values: [u8; DIGIT_SPAN],
}

impl LevelOrder {
    /// Stacking order of the tube the original hardware shipped with.
    pub const DEFAULT: LevelOrder = match LevelOrder::new([10, 1, 2, 6, 7, 5, 0, 4, 9, 8, 3]) {
        Ok(order) => order,
        Err(_) => panic!("default level table is not a permutation"),
    };

    /// Validates and wraps a level table.
    ///
    /// `values[0]` is the innermost electrode.
    ///
    /// # Errors
    /// * `OutOfRange` - an entry exceeds the digit domain
    /// * `Duplicate` - a digit value occurs twice (the table must be a
    ///   permutation of 0-10)
    pub const fn new(values: [u8; DIGIT_SPAN]) -> Result<Self, LevelOrderError> {
        let mut seen: u16 = 0;
        let mut i = 0;
        while i < DIGIT_SPAN {
            let value = values[i];
            if value as usize >= DIGIT_SPAN {
                return Err(LevelOrderError::OutOfRange(value));
            }
            if seen & (1 << value) != 0 {
                return Err(LevelOrderError::Duplicate(value));
            }
            seen |= 1 << value;
            i += 1;
        }
        Ok(Self { values })
    }

    /// Returns the stacking depth of a digit value, or `None` for values
    /// outside the domain.
    pub fn depth_of(&self, value: u8) -> Option<usize> {
        self.values.iter().position(|&v| v == value)
    }

    /// Returns the digit value at a stacking depth.
    ///
    /// # Panics
    /// Panics if `depth >= DIGIT_SPAN`.
    pub fn value_at(&self, depth: usize) -> u8 {
        self.values[depth]
    }
}

impl Default for LevelOrder {
    fn default() -> Self {
        Self::DEFAULT
    }
}
