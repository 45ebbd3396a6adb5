//! Interrupt-to-main-loop tick flags.
//!
//! The periodic tick source (a hardware timer interrupt on real targets)
//! shares nothing with the main loop except the single-byte atomics in
//! [`TickClock`]. The interrupt side only calls [`TickClock::tick`]; the
//! main loop consumes flags with the `take_*` methods and does all
//! multi-byte work itself, so no critical sections are needed anywhere.

use core::sync::atomic::{AtomicBool, AtomicU8, Ordering};

/// Tick flags shared between the tick source and the display main loop.
///
/// Every multiplex tick rotates the displayed digit position; every
/// `divisor` ticks the animation engine advances one step. The two rates
/// are independent: changing the animation divisor never changes the
/// refresh rate, so animation speed never causes flicker.
#[derive(Debug)]
pub struct TickClock {
    multiplex_due: AtomicBool,
    animation_due: AtomicBool,
    divisor: AtomicU8,
    count: AtomicU8,
}

impl TickClock {
    /// Creates a clock with the given animation divisor.
    ///
    /// A zero divisor is treated as 1.
    pub const fn new(divisor: u8) -> Self {
        Self {
            multiplex_due: AtomicBool::new(false),
            animation_due: AtomicBool::new(false),
            divisor: AtomicU8::new(if divisor == 0 { 1 } else { divisor }),
            count: AtomicU8::new(0),
        }
    }

    /// Registers one period of the fixed-rate tick source.
    ///
    /// Call this from the timer interrupt (or the simulation's tick
    /// thread). It is the only method intended for the interrupt side and
    /// touches nothing but single-byte atomics.
    pub fn tick(&self) {
        self.multiplex_due.store(true, Ordering::Relaxed);

        // Single writer: only the tick source touches `count`.
        let count = self.count.load(Ordering::Relaxed).wrapping_add(1);
        if count >= self.divisor.load(Ordering::Relaxed) {
            self.animation_due.store(true, Ordering::Relaxed);
            self.count.store(0, Ordering::Relaxed);
        } else {
            self.count.store(count, Ordering::Relaxed);
        }
    }

    /// Consumes the multiplex flag, returning whether it was set.
    pub fn take_multiplex(&self) -> bool {
        self.multiplex_due.swap(false, Ordering::Relaxed)
    }

    /// Consumes the animation flag, returning whether it was set.
    pub fn take_animation(&self) -> bool {
        self.animation_due.swap(false, Ordering::Relaxed)
    }

    /// Changes the animation divisor. Zero is ignored, keeping the
    /// previous divisor (a zero divisor would make every tick an
    /// animation tick at best and divide by zero at worst).
    pub fn set_divisor(&self, divisor: u8) {
        if divisor > 0 {
            self.divisor.store(divisor, Ordering::Relaxed);
        }
    }

    /// Returns the current animation divisor.
    pub fn divisor(&self) -> u8 {
        self.divisor.load(Ordering::Relaxed)
    }
}

impl Default for TickClock {
    fn default() -> Self {
        Self::new(crate::types::DEFAULT_ANIMATION_SPEED)
    }
}
