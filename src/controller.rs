//! Display controller: multiplexing, brightness and command application.
//!
//! [`DisplayController`] owns all per-digit state and is mutated only from
//! the single main-loop thread of control. Each [`service`] pass drives
//! exactly one digit position on the shared bus lines (time-division
//! multiplexing) while pulse-width-modulating that position's backlight,
//! and advances the animation engine when the coarse tick is due.
//!
//! [`service`]: DisplayController::service

use crate::levels::LevelOrder;
use crate::protocol::Command;
use crate::tick::TickClock;
use crate::types::{AnimationMode, DEFAULT_BACKLIGHT, DigitState, LedColor};

/// Trait for abstracting the display driving hardware.
///
/// Implement this for your board (GPIO banks, shift registers, ...). The
/// controller calls it once per service pass, always in the same order:
/// `select`, then `backlight`, then `latch`. Selection is asserted before
/// any new pattern is latched so a pattern never bleeds into the
/// previously selected position (inter-digit ghosting).
pub trait DigitDriver {
    /// Asserts the drive lines and selection enable for exactly one digit
    /// position. Called every pass, not only when the position changes.
    fn select(&mut self, position: usize);

    /// Latches a 4-bit digit value onto the selected position's cathode
    /// decoder. Values above 9 blank the tube.
    fn latch(&mut self, value: u8);

    /// Gates the selected position's backlight channels on or off for the
    /// current PWM slot.
    fn backlight(&mut self, red: bool, green: bool, blue: bool);
}

/// Device-side display state and scheduler for `N` digit positions.
///
/// All mutation happens on the main loop; the tick interrupt only talks to
/// the [`TickClock`]. A controller cannot fail at runtime — malformed or
/// out-of-range commands are dropped silently by construction.
///
/// # Type Parameters
/// * `N` - Number of digit positions on the physical display
#[derive(Debug)]
pub struct DisplayController<const N: usize> {
    digits: [DigitState; N],
    colors: [LedColor; N],
    mode: AnimationMode,
    order: LevelOrder,
    cursor: usize,
    pwm_count: u8,
}

impl<const N: usize> DisplayController<N> {
    /// Creates a controller with power-on defaults: all digits at 0, the
    /// default backlight color, animation off.
    pub fn new() -> Self {
        Self::with_level_order(LevelOrder::DEFAULT)
    }

    /// Creates a controller for a tube with a different electrode
    /// stacking order.
    pub fn with_level_order(order: LevelOrder) -> Self {
        Self {
            digits: [DigitState::new(0); N],
            colors: [DEFAULT_BACKLIGHT; N],
            mode: AnimationMode::None,
            order,
            cursor: 0,
            pwm_count: 0,
        }
    }

    /// Applies one decoded command.
    ///
    /// Out-of-range digit indices make the whole command a silent no-op;
    /// a zero animation speed keeps the clock's previous divisor.
    pub fn apply(&mut self, command: Command, clock: &TickClock) {
        match command {
            Command::SetDigit { index, value } => {
                if let Some(digit) = self.digits.get_mut(index as usize) {
                    digit.target = value;
                }
            }
            Command::SetColor { index, color } => {
                if let Some(slot) = self.colors.get_mut(index as usize) {
                    *slot = color;
                }
            }
            Command::SetAnimation { mode, speed } => {
                self.mode = mode;
                clock.set_divisor(speed);
            }
        }
    }

    /// Decodes and applies a raw wire frame, dropping undecodable frames
    /// silently.
    pub fn handle_frame(&mut self, data: &[u8], clock: &TickClock) {
        if let Some(command) = Command::decode(data) {
            self.apply(command, clock);
        }
    }

    /// Runs one scheduler pass.
    ///
    /// The PWM counter free-runs on every pass; the multiplex cursor only
    /// rotates when the clock's multiplex flag was due, so the refresh
    /// rate is pinned to the tick source. The backlight is lit per channel
    /// while `pwm_count < threshold` (duty `threshold / 256`; a zero
    /// threshold is always off). When the animation flag was due, every
    /// digit advances one engine step.
    pub fn service<D: DigitDriver>(&mut self, clock: &TickClock, driver: &mut D) {
        self.pwm_count = self.pwm_count.wrapping_add(1);

        if clock.take_multiplex() {
            self.cursor = (self.cursor + 1) % N;
        }

        driver.select(self.cursor);

        let color = self.colors[self.cursor];
        driver.backlight(
            self.pwm_count < color.red,
            self.pwm_count < color.green,
            self.pwm_count < color.blue,
        );
        driver.latch(self.digits[self.cursor].current);

        if clock.take_animation() {
            self.animate();
        }
    }

    /// Advances every digit one animation step.
    pub fn animate(&mut self) {
        for digit in &mut self.digits {
            digit.advance(self.mode, &self.order);
        }
    }

    /// Returns one digit position's state.
    ///
    /// # Panics
    /// Panics if `index >= N`.
    pub fn digit(&self, index: usize) -> DigitState {
        self.digits[index]
    }

    /// Returns one digit position's backlight thresholds.
    ///
    /// # Panics
    /// Panics if `index >= N`.
    pub fn color(&self, index: usize) -> LedColor {
        self.colors[index]
    }

    /// Returns the active animation mode.
    pub fn mode(&self) -> AnimationMode {
        self.mode
    }

    /// Returns the digit position currently driven on the bus.
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Returns true once every digit shows its target.
    pub fn converged(&self) -> bool {
        self.digits.iter().all(DigitState::converged)
    }
}

impl<const N: usize> Default for DisplayController<N> {
    fn default() -> Self {
        Self::new()
    }
}
