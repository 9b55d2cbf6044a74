//! Edge-event acknowledgment, invoked from the interrupt service path.

use std::sync::PoisonError;

use log::{debug, trace};

use crate::addressing::RegisterFamily;
use crate::consts;
use crate::controller::GpioController;
use crate::registers::RegisterBus;

/// Returned by [`GpioController::acknowledge_event`] when neither
/// event-status register has a pending bit. A legitimate outcome on a
/// shared interrupt line (the interrupt was for another device), not an
/// error.
pub const NO_PENDING_EVENT: u8 = consts::EVENT_SCAN_SPAN;

impl<B: RegisterBus> GpioController<B> {
    /// Identifies and clears one pending edge event.
    ///
    /// Scans the two event-status registers and acknowledges the pending
    /// event with the lowest pin index: a word with exactly that bit set is
    /// written back, so write-1-to-clear leaves every other pin's pending
    /// state untouched. Returns the absolute pin index, or
    /// [`NO_PENDING_EVENT`] when no bit is set in either register. Callers
    /// draining simultaneous events re-invoke until the sentinel comes
    /// back.
    ///
    /// This routine runs in response to the asynchronous interrupt line, so
    /// it never returns an error and never waits on a lock another path
    /// holds: the event-status mutex is acquired only here, for two reads
    /// and at most one write. A register access failure disables the
    /// controller and is reported as [`NO_PENDING_EVENT`].
    pub fn acknowledge_event(&self) -> u8 {
        if self.is_inoperative() {
            return NO_PENDING_EVENT;
        }
        let _guard = self
            .event_lock
            .lock()
            .unwrap_or_else(PoisonError::into_inner);

        let first = RegisterFamily::EventStatus.base_offset();
        let (offset, pin_base, status) = match self.reg_read(first) {
            Ok(0) => {
                let second = first + consts::REG_STRIDE;
                match self.reg_read(second) {
                    Ok(value) => (second, 32u8, value),
                    Err(_) => return NO_PENDING_EVENT,
                }
            }
            Ok(value) => (first, 0u8, value),
            Err(_) => return NO_PENDING_EVENT,
        };

        if status == 0 {
            trace!("interrupt with no pending event");
            return NO_PENDING_EVENT;
        }

        // Lowest pending pin is serviced first.
        let bit = status.trailing_zeros() as u8;
        if self.reg_write(offset, 1u32 << bit).is_err() {
            return NO_PENDING_EVENT;
        }
        let pin = pin_base + bit;
        debug!("acknowledged edge event on pin {}", pin);
        pin
    }
}
