//! The action vocabulary shared by the command device and the per-pin
//! attribute files, and the text handling built on it.

use std::str::FromStr;

use log::debug;

use crate::consts;
use crate::controller::GpioController;
use crate::error::{self, Error, Result};
use crate::gpio::{Edge, Level, Pin, PinFunction};
use crate::registers::RegisterBus;

/// One action from the control vocabulary.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PinCommand {
    /// Drive the pin as an output at high level.
    High,
    /// Drive the pin as an output at low level.
    Low,
    /// Configure the pin as an input.
    Input,
    /// Enable rising-edge event detection (forces input mode).
    Rising,
    /// Enable falling-edge event detection (forces input mode).
    Falling,
    /// Disable both edge detectors.
    None,
}

impl FromStr for PinCommand {
    type Err = Error;

    /// Parses one action token. Anything outside the vocabulary is
    /// rejected with [`Error::UnknownCommand`], never silently accepted.
    fn from_str(s: &str) -> Result<Self> {
        match s {
            "high" => Ok(Self::High),
            "low" => Ok(Self::Low),
            "in" => Ok(Self::Input),
            "rising" => Ok(Self::Rising),
            "falling" => Ok(Self::Falling),
            "none" => Ok(Self::None),
            other => Err(Error::UnknownCommand(other.to_string())),
        }
    }
}

/// Parses one line of command text: `"<pin> <action>"`.
///
/// Tokens are whitespace-separated and a trailing newline is tolerated.
/// The pin index is validated before any register offset is derived from
/// it; a missing or non-numeric pin token rejects the whole line. The
/// intermediate buffer is obtained fallibly, surfacing
/// [`Error::Allocation`] instead of aborting when memory is tight.
pub fn parse_command_line(line: &str) -> Result<(Pin, PinCommand)> {
    let mut input = String::new();
    input.try_reserve(line.len())?;
    input.push_str(line.trim_end_matches(['\n', '\r']));

    let mut tokens = input.split_whitespace();
    let pin_token = tokens
        .next()
        .ok_or_else(|| Error::UnknownCommand(String::from("<empty>")))?;
    let command_token = tokens
        .next()
        .ok_or_else(|| Error::UnknownCommand(input.trim().to_string()))?;

    let pin_index: u32 = pin_token
        .parse()
        .map_err(|_| Error::UnknownCommand(input.trim().to_string()))?;
    if pin_index >= consts::NUM_PINS as u32 {
        return Err(error::invalid_pin(pin_index));
    }
    let pin = Pin::new(pin_index as u8)?;
    let command = command_token.parse()?;
    Ok((pin, command))
}

impl<B: RegisterBus> GpioController<B> {
    /// Applies one action to `pin`.
    pub fn apply_command(&self, pin: Pin, command: PinCommand) -> Result<()> {
        debug!("pin {}: command {:?}", pin, command);
        match command {
            PinCommand::High => self.configure_output(pin, Level::High),
            PinCommand::Low => self.configure_output(pin, Level::Low),
            PinCommand::Input => self.configure_input(pin),
            PinCommand::Rising => self.enable_edge(pin, Edge::Rising),
            PinCommand::Falling => self.enable_edge(pin, Edge::Falling),
            PinCommand::None => self.disable_edges(pin),
        }
    }

    /// Parses and applies one line from the command device.
    pub fn run_command_line(&self, line: &str) -> Result<()> {
        let (pin, command) = parse_command_line(line)?;
        self.apply_command(pin, command)
    }

    /// Renders the attribute-file answer for `pin`: `"input: <0|1>"`,
    /// `"output: <0|1>"`, or `"not input/output pin"` for pins on an
    /// alternate function.
    pub fn query_pin(&self, pin: Pin) -> Result<String> {
        let answer = match self.pin_function(pin)? {
            PinFunction::Input => format!("input: {}", self.read_level(pin)?),
            PinFunction::Output => format!("output: {}", self.read_level(pin)?),
            _ => String::from("not input/output pin"),
        };
        Ok(answer)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn action_vocabulary() {
        assert_eq!("high".parse::<PinCommand>().unwrap(), PinCommand::High);
        assert_eq!("low".parse::<PinCommand>().unwrap(), PinCommand::Low);
        assert_eq!("in".parse::<PinCommand>().unwrap(), PinCommand::Input);
        assert_eq!("rising".parse::<PinCommand>().unwrap(), PinCommand::Rising);
        assert_eq!(
            "falling".parse::<PinCommand>().unwrap(),
            PinCommand::Falling
        );
        assert_eq!("none".parse::<PinCommand>().unwrap(), PinCommand::None);
        assert!(matches!(
            "blink".parse::<PinCommand>(),
            Err(Error::UnknownCommand(s)) if s == "blink"
        ));
    }

    #[test]
    fn command_line_parsing() {
        let (pin, command) = parse_command_line("17 high\n").unwrap();
        assert_eq!(pin.number(), 17);
        assert_eq!(command, PinCommand::High);

        let (pin, command) = parse_command_line("  3   none  ").unwrap();
        assert_eq!(pin.number(), 3);
        assert_eq!(command, PinCommand::None);
    }

    #[test]
    fn command_line_rejections() {
        assert!(matches!(
            parse_command_line(""),
            Err(Error::UnknownCommand(_))
        ));
        assert!(matches!(
            parse_command_line("17"),
            Err(Error::UnknownCommand(_))
        ));
        assert!(matches!(
            parse_command_line("seventeen high"),
            Err(Error::UnknownCommand(_))
        ));
        assert!(matches!(
            parse_command_line("54 high"),
            Err(Error::InvalidPin { pin: 54, .. })
        ));
        assert!(matches!(
            parse_command_line("999 high"),
            Err(Error::InvalidPin { pin: 999, .. })
        ));
        assert!(matches!(
            parse_command_line("17 blink"),
            Err(Error::UnknownCommand(s)) if s == "blink"
        ));
    }
}
