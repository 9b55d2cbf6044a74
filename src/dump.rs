//! Paginated textual dump of every pin's direction and level.

use crate::consts;
use crate::controller::GpioController;
use crate::error::Result;
use crate::gpio::{Pin, PinFunction};
use crate::registers::RegisterBus;

/// Header emitted before the first pin row.
pub const DUMP_HEADER: &str = "  #   dir   value";

/// Restartable, one-row-per-call dump over a controller's pins.
///
/// Every open session owns its own cursor, so concurrent readers do not
/// interfere. Rows cover pins configured as input or output
/// (`"<pin>. <input|output>  <level>"`); pins on an alternate function are
/// passed over silently. After the last pin the cursor resets to the
/// not-started state, so the same session can drive a fresh dump.
pub struct PinDump<'a, B> {
    gpio: &'a GpioController<B>,
    cursor: Option<u8>,
}

impl<B: RegisterBus> GpioController<B> {
    /// Opens a dump session with its own cursor.
    pub fn dump(&self) -> PinDump<'_, B> {
        PinDump {
            gpio: self,
            cursor: None,
        }
    }
}

impl<B: RegisterBus> PinDump<'_, B> {
    /// Produces the next row, or `None` at end-of-sequence.
    ///
    /// The first call yields the header. Each later call advances the
    /// cursor to the next input- or output-configured pin, in increasing
    /// pin order, and renders its row. When the cursor passes the last pin
    /// the call returns `None` once and the session is ready to restart.
    pub fn next_row(&mut self) -> Result<Option<String>> {
        let mut pin_index = match self.cursor {
            None => {
                self.cursor = Some(0);
                return Ok(Some(DUMP_HEADER.to_string()));
            }
            Some(index) => index,
        };

        while pin_index < consts::NUM_PINS {
            let pin = Pin::new(pin_index)?;
            pin_index += 1;
            self.cursor = Some(pin_index);

            let dir = match self.gpio.pin_function(pin)? {
                PinFunction::Input => "input",
                PinFunction::Output => "output",
                _ => continue,
            };
            let level = self.gpio.read_level(pin)?;
            return Ok(Some(format!("{}. {}  {}", pin, dir, level)));
        }

        self.cursor = None;
        Ok(None)
    }
}
