//! Wire command protocol shared by device and host.
//!
//! Every command travels as one fixed-size frame inside a single
//! vendor-defined control transfer (request code [`REQUEST_SET_DISPLAY`]);
//! the opcode in byte 0 — not the request code — selects the behavior.
//! The protocol is fire-and-forget: there is no acknowledgement, no
//! response payload and no sequence numbers. Reliability is entirely the
//! host's retry loop.

use crate::types::{AnimationMode, LedColor};

/// Size of a command frame on the wire.
pub const FRAME_LEN: usize = 8;

/// The one control request code shared by all commands.
pub const REQUEST_SET_DISPLAY: u8 = 3;

/// Opcode: set one digit's target value. Layout `[0, index, value]`.
pub const OP_SET_DIGIT: u8 = 0;

/// Opcode: set one digit's backlight color. Layout `[1, index, r, g, b]`.
pub const OP_SET_COLOR: u8 = 1;

/// Opcode: set animation mode and speed. Layout `[4, _, mode, speed]`.
pub const OP_SET_ANIMATION: u8 = 4;

/// A decoded display command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// Point one digit position at a new target value.
    SetDigit { index: u8, value: u8 },

    /// Change one digit position's backlight thresholds.
    SetColor { index: u8, color: LedColor },

    /// Change the animation mode and, if `speed > 0`, the tick divisor.
    SetAnimation { mode: AnimationMode, speed: u8 },
}

impl Command {
    /// Encodes the command into a zero-padded wire frame.
    pub fn encode(&self) -> [u8; FRAME_LEN] {
        let mut frame = [0u8; FRAME_LEN];
        match *self {
            Command::SetDigit { index, value } => {
                frame[0] = OP_SET_DIGIT;
                frame[1] = index;
                frame[2] = value;
            }
            Command::SetColor { index, color } => {
                frame[0] = OP_SET_COLOR;
                frame[1] = index;
                frame[2] = color.red;
                frame[3] = color.green;
                frame[4] = color.blue;
            }
            Command::SetAnimation { mode, speed } => {
                frame[0] = OP_SET_ANIMATION;
                frame[2] = mode.to_wire();
                frame[3] = speed;
            }
        }
        frame
    }

    /// Decodes a wire frame.
    ///
    /// Returns `None` for unknown opcodes and for frames shorter than the
    /// opcode's layout; the device drops both silently. Index bounds are
    /// not checked here — the device applies them against its own digit
    /// count (see
    /// [`DisplayController::apply`](crate::controller::DisplayController::apply)).
    pub fn decode(data: &[u8]) -> Option<Command> {
        if data.len() < 3 {
            return None;
        }
        match data[0] {
            OP_SET_DIGIT => Some(Command::SetDigit {
                index: data[1],
                value: data[2],
            }),
            OP_SET_COLOR if data.len() >= 5 => Some(Command::SetColor {
                index: data[1],
                color: LedColor::new(data[2], data[3], data[4]),
            }),
            OP_SET_ANIMATION if data.len() >= 4 => Some(Command::SetAnimation {
                mode: AnimationMode::from_wire(data[2]),
                speed: data[3],
            }),
            _ => None,
        }
    }
}
