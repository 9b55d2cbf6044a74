//! Pin, function, level and edge types.

use std::fmt;

use crate::consts;
use crate::error::{self, Error, Result};

/// A validated GPIO pin index (0-53).
/// Use `Pin::new(num)` to create; out-of-range indices are rejected here,
/// before any register offset is ever derived from them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Pin(u8);

impl Pin {
    /// Creates a new `Pin`, returning [`Error::InvalidPin`] if the index is
    /// not below the controller's pin count.
    pub fn new(pin: u8) -> Result<Self> {
        if pin < consts::NUM_PINS {
            Ok(Pin(pin))
        } else {
            Err(error::invalid_pin(pin.into()))
        }
    }

    /// Returns the underlying pin index (0-53).
    #[inline]
    pub fn number(self) -> u8 {
        self.0
    }
}

impl fmt::Display for Pin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Function-select field codes.
///
/// The 3-bit alternate-function encoding is fixed by the hardware and is
/// not monotonic: Alt4 and Alt5 sit below the Alt0-Alt3 block.
#[repr(u32)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PinFunction {
    /// Pin is an input.
    Input = 0b000,
    /// Pin is a push-pull output.
    Output = 0b001,
    /// Alternate function 0.
    Alt0 = 0b100,
    /// Alternate function 1.
    Alt1 = 0b101,
    /// Alternate function 2.
    Alt2 = 0b110,
    /// Alternate function 3.
    Alt3 = 0b111,
    /// Alternate function 4.
    Alt4 = 0b011,
    /// Alternate function 5.
    Alt5 = 0b010,
}

impl PinFunction {
    /// Decodes a 3-bit function-select field. Every 3-bit value names a
    /// function, so decoding is total.
    pub fn from_bits(bits: u32) -> Self {
        match bits & 0b111 {
            0b000 => Self::Input,
            0b001 => Self::Output,
            0b100 => Self::Alt0,
            0b101 => Self::Alt1,
            0b110 => Self::Alt2,
            0b111 => Self::Alt3,
            0b011 => Self::Alt4,
            _ => Self::Alt5,
        }
    }

    /// Returns the 3-bit field encoding.
    #[inline]
    pub fn bits(self) -> u32 {
        self as u32
    }

    /// True for `Input` and `Output`, false for the alternate functions.
    #[inline]
    pub fn is_io(self) -> bool {
        matches!(self, Self::Input | Self::Output)
    }
}

/// Output level of a pin.
#[repr(u32)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Level {
    Low = 0,
    High = 1,
}

impl Level {
    /// The level as a single register bit value.
    #[inline]
    pub fn bit(self) -> u32 {
        self as u32
    }
}

impl TryFrom<u32> for Level {
    type Error = Error;

    /// Converts a raw level value, rejecting anything but 0 and 1 with
    /// [`Error::InvalidLevel`] before any register is touched.
    fn try_from(value: u32) -> Result<Self> {
        match value {
            0 => Ok(Self::Low),
            1 => Ok(Self::High),
            other => Err(Error::InvalidLevel(other)),
        }
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.bit())
    }
}

/// Edge selector for event detection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Edge {
    Rising,
    Falling,
}

impl TryFrom<u32> for Edge {
    type Error = Error;

    /// Converts a raw edge selector, rejecting anything but rising (0) and
    /// falling (1) with [`Error::InvalidEdge`].
    fn try_from(value: u32) -> Result<Self> {
        match value {
            0 => Ok(Self::Rising),
            1 => Ok(Self::Falling),
            other => Err(Error::InvalidEdge(other)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pin_bounds() {
        assert!(Pin::new(0).is_ok());
        assert!(Pin::new(53).is_ok());
        assert!(matches!(
            Pin::new(54),
            Err(Error::InvalidPin { pin: 54, max: 53 })
        ));
        assert!(matches!(Pin::new(255), Err(Error::InvalidPin { .. })));
    }

    #[test]
    fn function_encoding_is_the_hardware_mapping() {
        // The alternate codes must not be "corrected" into ascending order.
        assert_eq!(PinFunction::Input.bits(), 0b000);
        assert_eq!(PinFunction::Output.bits(), 0b001);
        assert_eq!(PinFunction::Alt0.bits(), 0b100);
        assert_eq!(PinFunction::Alt1.bits(), 0b101);
        assert_eq!(PinFunction::Alt2.bits(), 0b110);
        assert_eq!(PinFunction::Alt3.bits(), 0b111);
        assert_eq!(PinFunction::Alt4.bits(), 0b011);
        assert_eq!(PinFunction::Alt5.bits(), 0b010);
    }

    #[test]
    fn function_decoding_round_trips() {
        for bits in 0..8u32 {
            assert_eq!(PinFunction::from_bits(bits).bits(), bits);
        }
        // Decoding masks to the field width.
        assert_eq!(PinFunction::from_bits(0b1001), PinFunction::Output);
    }

    #[test]
    fn level_and_edge_conversions() {
        assert_eq!(Level::try_from(0).unwrap(), Level::Low);
        assert_eq!(Level::try_from(1).unwrap(), Level::High);
        assert!(matches!(Level::try_from(7), Err(Error::InvalidLevel(7))));

        assert_eq!(Edge::try_from(0).unwrap(), Edge::Rising);
        assert_eq!(Edge::try_from(1).unwrap(), Edge::Falling);
        assert!(matches!(Edge::try_from(2), Err(Error::InvalidEdge(2))));
    }
}
