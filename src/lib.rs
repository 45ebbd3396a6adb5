#![cfg_attr(not(feature = "std"), no_std)]
#![doc = include_str!("../README.md")]

//! # Core Concepts
//!
//! - **`DisplayController`**: Per-digit state plus the multiplex/PWM scheduler; drives one digit per pass
//! - **`DigitDriver`**: Trait to implement for your display hardware (selection, cathode latch, backlight gates)
//! - **`TickClock`**: Interrupt-safe tick flags decoupling refresh rate from animation rate
//! - **`DigitState`** / **`AnimationMode`**: A digit's current/target values and how they converge
//! - **`LevelOrder`**: Physical electrode stacking order used by the `Level` animation mode
//! - **`Command`**: The fixed 8-byte wire frame shared by device and host
//! - **`NixieClient`** / **`Transport`**: Host-side operations with a bounded retry loop (`std`)
//! - **`UsbTransport`**: Control-transfer transport over `rusb` (`usb` feature)
//!
//! Digit values run 0-9 with [`BLANK`] (10) as the off sentinel; backlight
//! colors are 8-bit `Srgb<u8>` thresholds interpreted as PWM duty.

// Re-export Srgb from palette for user convenience
pub use palette::Srgb;

pub mod controller;
pub mod engine;
pub mod levels;
pub mod protocol;
pub mod tick;
pub mod types;

#[cfg(feature = "std")]
pub mod client;
#[cfg(feature = "std")]
pub mod grammar;
#[cfg(feature = "usb")]
pub mod usb;

pub use controller::{DigitDriver, DisplayController};
pub use levels::{DIGIT_SPAN, LevelOrder, LevelOrderError};
pub use protocol::{Command, FRAME_LEN, REQUEST_SET_DISPLAY};
pub use tick::TickClock;
pub use types::{
    AnimationMode, BLANK, DEFAULT_ANIMATION_SPEED, DEFAULT_BACKLIGHT, DigitState, LedColor,
};

#[cfg(feature = "std")]
pub use client::{ClientError, NixieClient, Transport, TransportError};
#[cfg(feature = "std")]
pub use grammar::{HostCommand, ParseError, parse_line};
#[cfg(feature = "usb")]
pub use usb::{PRODUCT_ID, UsbTransport, VENDOR_ID};
