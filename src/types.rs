//! Core types shared by the device engine and the host client.

use palette::Srgb;

/// Per-digit RGB backlight color.
///
/// Each channel is an 8-bit PWM threshold: the channel is lit while the
/// free-running PWM counter is below it, giving a duty cycle of
/// `threshold / 256`. A threshold of 0 keeps the channel off entirely.
pub type LedColor = Srgb<u8>;

/// Digit value that blanks the tube.
///
/// The cathode decoder only drives electrodes for 0-9; latching 10 (or any
/// larger 4-bit pattern) leaves every cathode unpowered.
pub const BLANK: u8 = 10;

/// Backlight color the device powers up with.
pub const DEFAULT_BACKLIGHT: LedColor = LedColor::new(0, 255, 128);

/// Animation speed (tick divisor) the device powers up with.
pub const DEFAULT_ANIMATION_SPEED: u8 = 10;

/// Policy governing how a digit's displayed value converges to its target.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum AnimationMode {
    /// Snap to the target immediately.
    #[default]
    None,

    /// Move by one numeric value per animation tick.
    Step,

    /// Move by one physical electrode per animation tick, following the
    /// tube's [`LevelOrder`](crate::levels::LevelOrder).
    Level,
}

impl AnimationMode {
    /// Decodes a wire byte. Unrecognized values behave as `None`.
    pub fn from_wire(value: u8) -> Self {
        match value {
            1 => AnimationMode::Step,
            2 => AnimationMode::Level,
            _ => AnimationMode::None,
        }
    }

    /// Encodes the mode as its wire byte.
    pub fn to_wire(self) -> u8 {
        match self {
            AnimationMode::None => 0,
            AnimationMode::Step => 1,
            AnimationMode::Level => 2,
        }
    }
}

/// The displayed and commanded value of a single digit position.
///
/// `current` is what the tube shows right now; `target` is what the host
/// asked for. The animation engine moves `current` toward `target` one step
/// per animation tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct DigitState {
    /// Value currently latched onto the tube.
    pub current: u8,

    /// Value the digit is converging toward.
    pub target: u8,
}

impl DigitState {
    /// Creates a digit already converged on `value`.
    pub const fn new(value: u8) -> Self {
        Self {
            current: value,
            target: value,
        }
    }

    /// Returns true once `current` has reached `target`.
    pub fn converged(&self) -> bool {
        self.current == self.target
    }
}

impl Default for DigitState {
    fn default() -> Self {
        Self::new(0)
    }
}
