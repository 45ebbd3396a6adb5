//! Text command grammar.
//!
//! Each input line maps to one [`HostCommand`]; the runner turns a host
//! command into one or more wire frames via [`NixieClient`]. The grammar
//! is deliberately terse — it is typed at a prompt or piped from scripts:
//!
//! ```text
//! t<index>:<value>        set one digit
//! l<index>:<r>/<g>/<b>    set one backlight
//! color:<r>/<g>/<b>       set every backlight
//! anim:<mode>:<speed>     animation mode (none/step/level or a number)
//! num:<n>                 show a decimal number, blank leading zeros
//! lnum:<n>                show a decimal number, keep leading zeros
//! off                     blank every digit
//! read / readf            consume further lines from the input stream
//! ```
//!
//! [`NixieClient`]: crate::client::NixieClient

use core::num::ParseIntError;

use crate::types::{AnimationMode, LedColor};

/// A parsed command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HostCommand {
    /// `t<index>:<value>`
    SetDigit { index: u8, value: u8 },

    /// `l<index>:<r>/<g>/<b>`
    SetColor { index: u8, color: LedColor },

    /// `color:<r>/<g>/<b>`
    SetColorAll { color: LedColor },

    /// `anim:<mode>:<speed>`
    SetAnimation { mode: AnimationMode, speed: u8 },

    /// `num:<n>` or `lnum:<n>`
    SetNumber { value: u64, keep_leading_zeros: bool },

    /// `off`
    BlankAll,

    /// `read` (keeps going past bad lines) or `readf` (stops at the
    /// first failure).
    Read { abort_on_error: bool },
}

/// Errors raised while parsing a command line.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParseError {
    #[error("empty command line")]
    Empty,

    #[error("unknown command {0:?}")]
    UnknownCommand(String),

    #[error("unknown animation mode {0:?}")]
    UnknownMode(String),

    #[error("malformed argument {argument:?}: {source}")]
    BadNumber {
        argument: String,
        source: ParseIntError,
    },

    #[error("expected {expected} in {line:?}")]
    BadShape {
        line: String,
        expected: &'static str,
    },
}

/// Parses one command line. Surrounding whitespace is ignored.
pub fn parse_line(line: &str) -> Result<HostCommand, ParseError> {
    let line = line.trim();
    if line.is_empty() {
        return Err(ParseError::Empty);
    }

    match line {
        "off" => return Ok(HostCommand::BlankAll),
        "read" => return Ok(HostCommand::Read { abort_on_error: false }),
        "readf" => return Ok(HostCommand::Read { abort_on_error: true }),
        _ => {}
    }

    if let Some(rest) = line.strip_prefix("anim:") {
        let (mode, speed) = rest.split_once(':').ok_or_else(|| ParseError::BadShape {
            line: line.to_owned(),
            expected: "anim:<mode>:<speed>",
        })?;
        return Ok(HostCommand::SetAnimation {
            mode: parse_mode(mode)?,
            speed: parse_number(speed)?,
        });
    }
    if let Some(rest) = line.strip_prefix("num:") {
        return Ok(HostCommand::SetNumber {
            value: parse_number(rest)?,
            keep_leading_zeros: false,
        });
    }
    if let Some(rest) = line.strip_prefix("lnum:") {
        return Ok(HostCommand::SetNumber {
            value: parse_number(rest)?,
            keep_leading_zeros: true,
        });
    }
    if let Some(rest) = line.strip_prefix("color:") {
        return Ok(HostCommand::SetColorAll {
            color: parse_color(line, rest)?,
        });
    }

    if let Some(rest) = line.strip_prefix('t') {
        let (index, value) = rest.split_once(':').ok_or_else(|| ParseError::BadShape {
            line: line.to_owned(),
            expected: "t<index>:<value>",
        })?;
        return Ok(HostCommand::SetDigit {
            index: parse_number(index)?,
            value: parse_number(value)?,
        });
    }
    if let Some(rest) = line.strip_prefix('l') {
        let (index, color) = rest.split_once(':').ok_or_else(|| ParseError::BadShape {
            line: line.to_owned(),
            expected: "l<index>:<r>/<g>/<b>",
        })?;
        return Ok(HostCommand::SetColor {
            index: parse_number(index)?,
            color: parse_color(line, color)?,
        });
    }

    Err(ParseError::UnknownCommand(line.to_owned()))
}

/// Accepts the mode by name or as its raw wire value.
fn parse_mode(text: &str) -> Result<AnimationMode, ParseError> {
    match text {
        "none" => Ok(AnimationMode::None),
        "step" => Ok(AnimationMode::Step),
        "level" => Ok(AnimationMode::Level),
        _ => match text.parse::<u8>() {
            Ok(wire) => Ok(AnimationMode::from_wire(wire)),
            Err(_) => Err(ParseError::UnknownMode(text.to_owned())),
        },
    }
}

fn parse_color(line: &str, text: &str) -> Result<LedColor, ParseError> {
    let mut parts = text.split('/');
    match (parts.next(), parts.next(), parts.next(), parts.next()) {
        (Some(red), Some(green), Some(blue), None) => Ok(LedColor::new(
            parse_number(red)?,
            parse_number(green)?,
            parse_number(blue)?,
        )),
        _ => Err(ParseError::BadShape {
            line: line.to_owned(),
            expected: "<r>/<g>/<b>",
        }),
    }
}

fn parse_number<N: core::str::FromStr<Err = ParseIntError>>(text: &str) -> Result<N, ParseError> {
    text.parse().map_err(|source| ParseError::BadNumber {
        argument: text.to_owned(),
        source,
    })
}
