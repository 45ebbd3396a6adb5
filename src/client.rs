//! Host-side display client.
//!
//! [`NixieClient`] turns display intents into wire frames and pushes them
//! through a [`Transport`]. The protocol has no acknowledgements, so the
//! client owns all reliability: every frame is retried with a fixed
//! backoff before the operation is reported as failed.

use std::thread;
use std::time::Duration;

use crate::protocol::{Command, FRAME_LEN};
use crate::types::{AnimationMode, BLANK, LedColor};

/// Attempts made per frame before giving up.
pub const RETRY_ATTEMPTS: u32 = 10;

/// Pause between attempts.
pub const RETRY_DELAY: Duration = Duration::from_millis(100);

/// Errors raised by a single transport send.
#[derive(Debug, thiserror::Error)]
pub enum TransportError {
    /// The transport accepted the frame but wrote fewer bytes than asked.
    #[error("short write: {written} of {expected} bytes")]
    ShortWrite { written: usize, expected: usize },

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[cfg(feature = "usb")]
    #[error(transparent)]
    Usb(#[from] rusb::Error),
}

/// Errors raised by client operations.
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    /// No display device matched the requested identity.
    #[error("display device not found")]
    DeviceNotFound,

    /// A frame still failed after the full retry schedule.
    #[error("transfer failed after {attempts} attempts")]
    Transfer {
        attempts: u32,
        source: TransportError,
    },

    /// A transport error outside the retried send path, e.g. while
    /// opening the device.
    #[error(transparent)]
    Transport(#[from] TransportError),
}

/// A one-way channel that delivers a single wire frame to the device.
///
/// The real implementation is [`UsbTransport`](crate::usb::UsbTransport);
/// tests substitute scripted fakes.
pub trait Transport {
    /// Delivers one frame. A successful return means the device received
    /// the full frame.
    fn send(&mut self, frame: &[u8; FRAME_LEN]) -> Result<(), TransportError>;
}

/// High-level client for a display with a known digit count.
#[derive(Debug)]
pub struct NixieClient<T> {
    transport: T,
    digit_count: u8,
}

impl<T: Transport> NixieClient<T> {
    /// Wraps a transport for a display with `digit_count` positions.
    pub fn new(transport: T, digit_count: u8) -> Self {
        Self {
            transport,
            digit_count,
        }
    }

    /// Returns the configured digit count.
    pub fn digit_count(&self) -> u8 {
        self.digit_count
    }

    /// Returns the underlying transport.
    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Sets one digit position's target value.
    pub fn set_digit(&mut self, index: u8, value: u8) -> Result<(), ClientError> {
        self.send(Command::SetDigit { index, value })
    }

    /// Sets one digit position's backlight color.
    pub fn set_color(&mut self, index: u8, color: LedColor) -> Result<(), ClientError> {
        self.send(Command::SetColor { index, color })
    }

    /// Sets every position's backlight to the same color.
    pub fn set_color_all(&mut self, color: LedColor) -> Result<(), ClientError> {
        for index in 0..self.digit_count {
            self.set_color(index, color)?;
        }
        Ok(())
    }

    /// Sets the animation mode and speed.
    pub fn set_animation(&mut self, mode: AnimationMode, speed: u8) -> Result<(), ClientError> {
        self.send(Command::SetAnimation { mode, speed })
    }

    /// Displays a decimal number across all positions, least significant
    /// digit at position 0.
    ///
    /// Positions above the most significant digit are blanked unless
    /// `keep_leading_zeros` is set; numbers wider than the display are
    /// truncated to the low digits.
    pub fn set_number(&mut self, value: u64, keep_leading_zeros: bool) -> Result<(), ClientError> {
        let mut remaining = value;
        for index in 0..self.digit_count {
            let shown = if remaining > 0 || index == 0 || keep_leading_zeros {
                (remaining % 10) as u8
            } else {
                BLANK
            };
            self.set_digit(index, shown)?;
            remaining /= 10;
        }
        Ok(())
    }

    /// Blanks every digit position.
    pub fn blank_all(&mut self) -> Result<(), ClientError> {
        for index in 0..self.digit_count {
            self.set_digit(index, BLANK)?;
        }
        Ok(())
    }

    fn send(&mut self, command: Command) -> Result<(), ClientError> {
        let frame = command.encode();
        let mut attempt = 1;
        loop {
            match self.transport.send(&frame) {
                Ok(()) => {
                    log::debug!("sent {:?} on attempt {}", command, attempt);
                    return Ok(());
                }
                Err(source) if attempt >= RETRY_ATTEMPTS => {
                    return Err(ClientError::Transfer {
                        attempts: attempt,
                        source,
                    });
                }
                Err(source) => {
                    log::warn!("attempt {} failed: {}, retrying", attempt, source);
                    thread::sleep(RETRY_DELAY);
                    attempt += 1;
                }
            }
        }
    }
}
