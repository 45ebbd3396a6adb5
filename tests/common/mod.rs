//! Shared test infrastructure for nixie-tube integration tests

#![allow(dead_code)] // Items used across multiple test files; Rust analyzes per-file

use nixie_tube::client::{Transport, TransportError};
use nixie_tube::controller::DigitDriver;
use nixie_tube::protocol::FRAME_LEN;

// ============================================================================
// Mock Digit Driver
// ============================================================================

/// Driver that records what the scheduler puts on the bus.
pub struct RecordingDriver {
    pub selected: usize,
    /// `(position, value)` per latch, newest last.
    pub latches: heapless::Vec<(usize, u8), 64>,
    pub backlight: (bool, bool, bool),
}

impl RecordingDriver {
    pub fn new() -> Self {
        Self {
            selected: usize::MAX,
            latches: heapless::Vec::new(),
            backlight: (false, false, false),
        }
    }

    /// Latest value latched for a position, if any pass selected it.
    pub fn last_value_at(&self, position: usize) -> Option<u8> {
        self.latches
            .iter()
            .rev()
            .find(|(at, _)| *at == position)
            .map(|(_, value)| *value)
    }
}

impl DigitDriver for RecordingDriver {
    fn select(&mut self, position: usize) {
        self.selected = position;
    }

    fn latch(&mut self, value: u8) {
        if self.latches.push((self.selected, value)).is_err() {
            // Keep only the most recent window.
            self.latches.remove(0);
            let _ = self.latches.push((self.selected, value));
        }
    }

    fn backlight(&mut self, red: bool, green: bool, blue: bool) {
        self.backlight = (red, green, blue);
    }
}

// ============================================================================
// Scripted Transport
// ============================================================================

/// Transport that fails the first `failures` sends, then records frames.
pub struct ScriptedTransport {
    pub failures: u32,
    pub attempts: u32,
    pub sent: Vec<[u8; FRAME_LEN]>,
}

impl ScriptedTransport {
    pub fn reliable() -> Self {
        Self::flaky(0)
    }

    pub fn flaky(failures: u32) -> Self {
        Self {
            failures,
            attempts: 0,
            sent: Vec::new(),
        }
    }
}

impl Transport for ScriptedTransport {
    fn send(&mut self, frame: &[u8; FRAME_LEN]) -> Result<(), TransportError> {
        self.attempts += 1;
        if self.attempts <= self.failures {
            return Err(TransportError::ShortWrite {
                written: 0,
                expected: FRAME_LEN,
            });
        }
        self.sent.push(*frame);
        Ok(())
    }
}
