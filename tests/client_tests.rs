//! Integration tests for the host side: grammar lines down to wire frames.

mod common;
use common::*;

use nixie_tube::client::{ClientError, NixieClient};
use nixie_tube::grammar::{self, HostCommand};
use nixie_tube::protocol::{Command, FRAME_LEN};
use nixie_tube::types::{AnimationMode, BLANK, LedColor};

/// Runs one grammar line against a client, the way the CLI does.
fn run(client: &mut NixieClient<ScriptedTransport>, line: &str) -> Result<(), ClientError> {
    match grammar::parse_line(line).expect("test line must parse") {
        HostCommand::SetDigit { index, value } => client.set_digit(index, value),
        HostCommand::SetColor { index, color } => client.set_color(index, color),
        HostCommand::SetColorAll { color } => client.set_color_all(color),
        HostCommand::SetAnimation { mode, speed } => client.set_animation(mode, speed),
        HostCommand::SetNumber {
            value,
            keep_leading_zeros,
        } => client.set_number(value, keep_leading_zeros),
        HostCommand::BlankAll => client.blank_all(),
        HostCommand::Read { .. } => Ok(()),
    }
}

fn decoded(frames: &[[u8; FRAME_LEN]]) -> Vec<Command> {
    frames
        .iter()
        .map(|frame| Command::decode(frame).expect("client must emit decodable frames"))
        .collect()
}

#[test]
fn number_lines_decompose_least_significant_first() {
    let mut client = NixieClient::new(ScriptedTransport::reliable(), 3);
    run(&mut client, "num:42").unwrap();

    assert_eq!(
        decoded(&client.transport().sent),
        vec![
            Command::SetDigit { index: 0, value: 2 },
            Command::SetDigit { index: 1, value: 4 },
            Command::SetDigit {
                index: 2,
                value: BLANK,
            },
        ]
    );
}

#[test]
fn lnum_keeps_leading_zeros() {
    let mut client = NixieClient::new(ScriptedTransport::reliable(), 3);
    run(&mut client, "lnum:7").unwrap();

    assert_eq!(
        decoded(&client.transport().sent),
        vec![
            Command::SetDigit { index: 0, value: 7 },
            Command::SetDigit { index: 1, value: 0 },
            Command::SetDigit { index: 2, value: 0 },
        ]
    );
}

#[test]
fn digit_and_animation_lines_map_to_single_frames() {
    let mut client = NixieClient::new(ScriptedTransport::reliable(), 3);
    run(&mut client, "t0:5").unwrap();
    run(&mut client, "anim:level:10").unwrap();

    assert_eq!(
        decoded(&client.transport().sent),
        vec![
            Command::SetDigit { index: 0, value: 5 },
            Command::SetAnimation {
                mode: AnimationMode::Level,
                speed: 10,
            },
        ]
    );
}

#[test]
fn color_broadcast_reaches_every_position() {
    let mut client = NixieClient::new(ScriptedTransport::reliable(), 2);
    run(&mut client, "color:0/255/128").unwrap();

    let color = LedColor::new(0, 255, 128);
    assert_eq!(
        decoded(&client.transport().sent),
        vec![
            Command::SetColor { index: 0, color },
            Command::SetColor { index: 1, color },
        ]
    );
}

#[test]
fn off_blanks_every_position() {
    let mut client = NixieClient::new(ScriptedTransport::reliable(), 2);
    run(&mut client, "off").unwrap();

    assert_eq!(
        decoded(&client.transport().sent),
        vec![
            Command::SetDigit {
                index: 0,
                value: BLANK,
            },
            Command::SetDigit {
                index: 1,
                value: BLANK,
            },
        ]
    );
}

#[test]
fn transient_transport_failures_are_invisible_to_the_caller() {
    let mut client = NixieClient::new(ScriptedTransport::flaky(3), 1);
    run(&mut client, "t0:9").unwrap();

    assert_eq!(client.transport().attempts, 4);
    assert_eq!(
        decoded(&client.transport().sent),
        vec![Command::SetDigit { index: 0, value: 9 }]
    );
}

#[test]
fn a_dead_transport_fails_the_whole_operation() {
    let mut client = NixieClient::new(ScriptedTransport::flaky(u32::MAX), 1);
    let error = run(&mut client, "t0:9").unwrap_err();

    assert!(matches!(error, ClientError::Transfer { .. }));
    assert!(client.transport().sent.is_empty());
}
