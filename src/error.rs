use std::collections::TryReserveError;
use thiserror::Error;

/// Errors that can occur when driving the GPIO controller.
///
/// Addressing and configuration errors are returned to the immediate caller
/// and never leave a partial register write behind; a [`RegisterAccess`]
/// failure is fatal for the controller instance, which refuses all further
/// operations once one has been observed.
///
/// [`RegisterAccess`]: Error::RegisterAccess
#[derive(Error, Debug)]
pub enum Error {
    /// Pin index is outside the controller's pin range.
    #[error("GPIO pin {pin} out of range (0-{max})")]
    InvalidPin {
        /// The rejected pin index.
        pin: u32,
        /// Highest valid pin index.
        max: u8,
    },
    /// Raw output level value is neither low (0) nor high (1).
    #[error("invalid output level {0} (expected 0 or 1)")]
    InvalidLevel(u32),
    /// Raw edge selector is neither rising (0) nor falling (1).
    #[error("invalid edge selector {0} (expected rising=0 or falling=1)")]
    InvalidEdge(u32),
    /// Command text does not match the accepted action vocabulary.
    #[error("unknown command '{0}'")]
    UnknownCommand(String),
    /// The memory-mapped register window rejected an access.
    #[error("register access failed at offset 0x{offset:02X}: {reason}")]
    RegisterAccess {
        /// Byte offset of the access within the register window.
        offset: usize,
        /// What went wrong with the access.
        reason: &'static str,
    },
    /// A bounded intermediate buffer could not be allocated.
    #[error("allocation failure: {0}")]
    Allocation(#[from] TryReserveError),
}

/// Result type alias for GPIO controller operations.
pub type Result<T> = std::result::Result<T, Error>;

// Helpers for errors constructed from more than one place.
pub(crate) fn invalid_pin(pin: u32) -> Error {
    Error::InvalidPin {
        pin,
        max: crate::consts::NUM_PINS - 1,
    }
}

pub(crate) fn controller_disabled() -> Error {
    Error::RegisterAccess {
        offset: 0,
        reason: "controller disabled by an earlier register access failure",
    }
}
