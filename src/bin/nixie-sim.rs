//! Terminal simulation of a display.
//!
//! Runs the real device loop (controller, tick clock, animation engine)
//! against a console driver, fed by the real host client over an
//! in-process channel instead of USB. Type grammar lines on stdin and
//! watch the digits converge:
//!
//! ```text
//! anim:level:10
//! num:42
//! off
//! ```

use std::io::{self, BufRead};
use std::sync::Arc;
use std::sync::mpsc;
use std::thread;
use std::time::Duration;

use nixie_tube::client::{NixieClient, Transport, TransportError};
use nixie_tube::controller::{DigitDriver, DisplayController};
use nixie_tube::grammar::{self, HostCommand};
use nixie_tube::protocol::FRAME_LEN;
use nixie_tube::tick::TickClock;
use nixie_tube::types::BLANK;

const DIGITS: usize = 4;
const TICK_PERIOD: Duration = Duration::from_millis(10);

/// Transport that hands frames to the simulated device.
struct ChannelTransport {
    frames: mpsc::Sender<[u8; FRAME_LEN]>,
}

impl Transport for ChannelTransport {
    fn send(&mut self, frame: &[u8; FRAME_LEN]) -> Result<(), TransportError> {
        self.frames
            .send(*frame)
            .map_err(|_| TransportError::Io(io::Error::from(io::ErrorKind::BrokenPipe)))
    }
}

/// Driver that prints the display whenever a digit changes.
struct ConsoleDriver {
    shown: [u8; DIGITS],
    selected: usize,
}

impl ConsoleDriver {
    fn new() -> Self {
        Self {
            shown: [0; DIGITS],
            selected: 0,
        }
    }

    fn render(&self) {
        // Most significant digit on the left.
        let line: String = self
            .shown
            .iter()
            .rev()
            .map(|&value| match value {
                0..=9 => char::from(b'0' + value),
                BLANK => '_',
                _ => '?',
            })
            .collect();
        println!("[{}]", line);
    }
}

impl DigitDriver for ConsoleDriver {
    fn select(&mut self, position: usize) {
        self.selected = position;
    }

    fn latch(&mut self, value: u8) {
        if self.shown[self.selected] != value {
            self.shown[self.selected] = value;
            self.render();
        }
    }

    fn backlight(&mut self, _red: bool, _green: bool, _blue: bool) {
        // PWM slots are far too fast to visualize on a terminal.
    }
}

fn main() {
    let clock = Arc::new(TickClock::default());
    let (frames_in, frames_out) = mpsc::channel();

    let tick_clock = Arc::clone(&clock);
    thread::spawn(move || {
        loop {
            thread::sleep(TICK_PERIOD);
            tick_clock.tick();
        }
    });

    thread::spawn(move || {
        let mut client = NixieClient::new(ChannelTransport { frames: frames_in }, DIGITS as u8);
        for line in io::stdin().lock().lines() {
            let Ok(line) = line else { break };
            if line.trim().is_empty() {
                continue;
            }
            let result = match grammar::parse_line(&line) {
                Ok(HostCommand::SetDigit { index, value }) => client.set_digit(index, value),
                Ok(HostCommand::SetColor { index, color }) => client.set_color(index, color),
                Ok(HostCommand::SetColorAll { color }) => client.set_color_all(color),
                Ok(HostCommand::SetAnimation { mode, speed }) => client.set_animation(mode, speed),
                Ok(HostCommand::SetNumber {
                    value,
                    keep_leading_zeros,
                }) => client.set_number(value, keep_leading_zeros),
                Ok(HostCommand::BlankAll) => client.blank_all(),
                // stdin is already the command stream here.
                Ok(HostCommand::Read { .. }) => Ok(()),
                Err(error) => {
                    eprintln!("nixie-sim: {}", error);
                    continue;
                }
            };
            if let Err(error) = result {
                eprintln!("nixie-sim: {}", error);
                break;
            }
        }
    });

    let mut display = DisplayController::<DIGITS>::new();
    let mut driver = ConsoleDriver::new();
    driver.render();

    loop {
        while let Ok(frame) = frames_out.try_recv() {
            display.handle_frame(&frame, &clock);
        }
        display.service(&clock, &mut driver);
        thread::sleep(Duration::from_millis(1));
    }
}
