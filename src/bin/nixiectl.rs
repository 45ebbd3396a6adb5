//! Command-line client for the display.
//!
//! Each positional argument is one grammar line, executed in order.
//! `read` / `readf` switch to consuming lines from stdin. Exit codes:
//! 0 on success, 1 on transport or discovery failure (aborts the rest of
//! the batch), 2 when at least one line failed to parse (remaining lines
//! still run).

use std::io::{self, BufRead};
use std::process::ExitCode;

use clap::Parser;

use nixie_tube::client::{ClientError, NixieClient, Transport, TransportError};
use nixie_tube::grammar::{self, HostCommand, ParseError};
use nixie_tube::usb::UsbTransport;

#[derive(Parser)]
#[command(name = "nixiectl", version, about = "Control a nixie tube display over USB")]
struct Cli {
    /// Number of digit positions on the display
    #[arg(long, default_value_t = 3)]
    digits: u8,

    /// Only open a device whose manufacturer string descriptor matches
    #[arg(long)]
    manufacturer: Option<String>,

    /// Only open a device whose product string descriptor matches
    #[arg(long)]
    product: Option<String>,

    /// Command lines, e.g. "t0:5" "anim:level:10" "num:42"
    #[arg(required = true)]
    commands: Vec<String>,
}

enum LineError {
    Parse(ParseError),
    Client(ClientError),
}

fn main() -> ExitCode {
    env_logger::init();
    let cli = Cli::parse();

    let transport =
        match UsbTransport::open_matching(cli.manufacturer.as_deref(), cli.product.as_deref()) {
            Ok(transport) => transport,
            Err(error) => {
                eprintln!("nixiectl: {}", error);
                return ExitCode::from(1);
            }
        };
    let mut client = NixieClient::new(transport, cli.digits);

    let mut saw_parse_error = false;
    for line in &cli.commands {
        match run_line(&mut client, line) {
            Ok(parse_errors_seen) => saw_parse_error |= parse_errors_seen,
            Err(LineError::Parse(error)) => {
                eprintln!("nixiectl: {}", error);
                saw_parse_error = true;
            }
            Err(LineError::Client(error)) => {
                eprintln!("nixiectl: {}", error);
                return ExitCode::from(1);
            }
        }
    }

    if saw_parse_error {
        ExitCode::from(2)
    } else {
        ExitCode::SUCCESS
    }
}

/// Executes one line. `Ok(true)` means non-fatal parse errors were
/// reported along the way (only possible inside `read`).
fn run_line<T: Transport>(client: &mut NixieClient<T>, line: &str) -> Result<bool, LineError> {
    match grammar::parse_line(line).map_err(LineError::Parse)? {
        HostCommand::Read { abort_on_error } => run_read(client, abort_on_error),
        command => {
            dispatch(client, command).map_err(LineError::Client)?;
            Ok(false)
        }
    }
}

/// Consumes grammar lines from stdin until end of input.
fn run_read<T: Transport>(
    client: &mut NixieClient<T>,
    abort_on_error: bool,
) -> Result<bool, LineError> {
    let mut saw_parse_error = false;
    for line in io::stdin().lock().lines() {
        let line =
            line.map_err(|error| LineError::Client(TransportError::from(error).into()))?;
        if line.trim().is_empty() {
            continue;
        }
        match grammar::parse_line(&line) {
            // Already consuming the stream; a nested read is meaningless.
            Ok(HostCommand::Read { .. }) => continue,
            Ok(command) => dispatch(client, command).map_err(LineError::Client)?,
            Err(error) if abort_on_error => return Err(LineError::Parse(error)),
            Err(error) => {
                eprintln!("nixiectl: {}", error);
                saw_parse_error = true;
            }
        }
    }
    Ok(saw_parse_error)
}

fn dispatch<T: Transport>(
    client: &mut NixieClient<T>,
    command: HostCommand,
) -> Result<(), ClientError> {
    match command {
        HostCommand::SetDigit { index, value } => client.set_digit(index, value),
        HostCommand::SetColor { index, color } => client.set_color(index, color),
        HostCommand::SetColorAll { color } => client.set_color_all(color),
        HostCommand::SetAnimation { mode, speed } => client.set_animation(mode, speed),
        HostCommand::SetNumber {
            value,
            keep_leading_zeros,
        } => client.set_number(value, keep_leading_zeros),
        HostCommand::BlankAll => client.blank_all(),
        HostCommand::Read { .. } => unreachable!("handled by the caller"),
    }
}
