//! Tube animation engine.
//!
//! One call to [`DigitState::advance`] moves a digit's displayed value one
//! step closer to its target, according to the active [`AnimationMode`].
//! The engine is a pure in-place mutation: no allocation, no side effects
//! beyond the digit itself.

use crate::levels::LevelOrder;
use crate::types::{AnimationMode, DigitState};

impl DigitState {
    /// Advances `current` one animation step toward `target`.
    ///
    /// * `None` snaps immediately.
    /// * `Step` moves by one numeric value, converging in
    ///   `|target - current|` ticks without overshoot.
    /// * `Level` moves to the electrode one stacking depth closer to the
    ///   target's depth, converging in depth-distance ticks. Values with no
    ///   depth in `order` (wire values above the digit domain) have no
    ///   electrode path, so the digit snaps to its target instead.
    ///
    /// A converged digit is left untouched.
    pub fn advance(&mut self, mode: AnimationMode, order: &LevelOrder) {
        if self.converged() {
            return;
        }

        match mode {
            AnimationMode::None => self.current = self.target,
            AnimationMode::Step => {
                if self.current > self.target {
                    self.current -= 1;
                } else {
                    self.current += 1;
                }
            }
            AnimationMode::Level => {
                match (order.depth_of(self.current), order.depth_of(self.target)) {
                    (Some(depth), Some(goal)) if depth > goal => {
                        self.current = order.value_at(depth - 1);
                    }
                    (Some(depth), Some(goal)) if depth < goal => {
                        self.current = order.value_at(depth + 1);
                    }
                    // Equal depths cannot happen for distinct values of a
                    // permutation; out-of-domain values snap.
                    _ => self.current = self.target,
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::levels::DIGIT_SPAN;

    fn ticks_to_converge(digit: &mut DigitState, mode: AnimationMode, order: &LevelOrder) -> u32 {
        let mut ticks = 0;
        while !digit.converged() {
            digit.advance(mode, order);
            ticks += 1;
            assert!(ticks <= DIGIT_SPAN as u32, "digit failed to converge");
        }
        ticks
    }

    #[test]
    fn none_mode_snaps_in_one_tick() {
        let order = LevelOrder::DEFAULT;
        let mut digit = DigitState { current: 2, target: 9 };
        digit.advance(AnimationMode::None, &order);
        assert_eq!(digit.current, 9);
    }

    #[test]
    fn step_mode_converges_in_numeric_distance_without_overshoot() {
        let order = LevelOrder::DEFAULT;
        for current in 0..=10u8 {
            for target in 0..=10u8 {
                let mut digit = DigitState { current, target };
                let distance = current.abs_diff(target) as u32;
                let mut previous = digit.current;
                let ticks = {
                    let mut ticks = 0;
                    while !digit.converged() {
                        digit.advance(AnimationMode::Step, &order);
                        // Monotonic: every tick moves exactly one closer.
                        assert_eq!(digit.current.abs_diff(previous), 1);
                        assert!(digit.current.abs_diff(target) < previous.abs_diff(target));
                        previous = digit.current;
                        ticks += 1;
                    }
                    ticks
                };
                assert_eq!(ticks, distance);
            }
        }
    }

    #[test]
    fn converged_digit_is_a_no_op_in_every_mode() {
        let order = LevelOrder::DEFAULT;
        for mode in [
            AnimationMode::None,
            AnimationMode::Step,
            AnimationMode::Level,
        ] {
            let mut digit = DigitState::new(5);
            digit.advance(mode, &order);
            assert_eq!(digit, DigitState::new(5));
        }
    }

    #[test]
    fn level_mode_travels_one_electrode_per_tick() {
        // Default table: value 0 sits at depth 6, value 6 at depth 3. The
        // path runs through depths 5, 4, 3, i.e. values 5, 7, 6 — not the
        // numeric sequence 1..=6.
        let order = LevelOrder::DEFAULT;
        let mut digit = DigitState { current: 0, target: 6 };

        let mut path = [0u8; 4];
        let mut steps = 0;
        while !digit.converged() {
            digit.advance(AnimationMode::Level, &order);
            path[steps] = digit.current;
            steps += 1;
        }
        assert_eq!(&path[..steps], &[5, 7, 6]);
    }

    #[test]
    fn level_mode_converges_in_depth_distance() {
        let order = LevelOrder::DEFAULT;
        for current in 0..=10u8 {
            for target in 0..=10u8 {
                let depth = order.depth_of(current).unwrap();
                let goal = order.depth_of(target).unwrap();
                let mut digit = DigitState { current, target };
                let ticks = ticks_to_converge(&mut digit, AnimationMode::Level, &order);
                assert_eq!(ticks as usize, depth.abs_diff(goal));
            }
        }
    }

    #[test]
    fn level_mode_snaps_for_values_outside_the_table() {
        let order = LevelOrder::DEFAULT;

        let mut digit = DigitState { current: 15, target: 3 };
        digit.advance(AnimationMode::Level, &order);
        assert_eq!(digit.current, 3);

        let mut digit = DigitState { current: 3, target: 15 };
        digit.advance(AnimationMode::Level, &order);
        assert_eq!(digit.current, 15);
    }
}
