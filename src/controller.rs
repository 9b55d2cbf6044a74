//! The controller handle: pin configuration over a register window.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Mutex, PoisonError};

use log::{debug, warn};

use crate::addressing::{locate, FieldSlot, RegisterFamily};
use crate::consts;
use crate::error::{self, Error, Result};
use crate::gpio::{Edge, Level, Pin, PinFunction};
use crate::registers::RegisterBus;

/// Handle to one GPIO controller instance.
///
/// Created once when the embedding driver has mapped the register block and
/// dropped when the mapping is released. No per-pin state is held here: pin
/// state lives entirely in the hardware registers, addressed on demand.
///
/// The register window is shared between the foreground command path and
/// the asynchronous interrupt path. Each register family touched by a
/// read-modify-write sequence has a dedicated mutex held only for the
/// duration of one sequence: `FunctionSelect` under one lock, the two
/// edge-enable families under a second, `EventStatus` under a third that
/// only the acknowledgment path acquires. `SetLevel` and `ClearLevel` use
/// write-1-to-act semantics, so a single write never disturbs other pins
/// and needs no lock.
pub struct GpioController<B> {
    regs: B,
    fsel_lock: Mutex<()>,
    edge_lock: Mutex<()>,
    pub(crate) event_lock: Mutex<()>,
    inoperative: AtomicBool,
}

impl<B: RegisterBus> GpioController<B> {
    /// Wraps a mapped register window.
    pub fn new(regs: B) -> Self {
        Self {
            regs,
            fsel_lock: Mutex::new(()),
            edge_lock: Mutex::new(()),
            event_lock: Mutex::new(()),
            inoperative: AtomicBool::new(false),
        }
    }

    /// Number of pins this controller addresses.
    pub const fn pin_count(&self) -> u8 {
        consts::NUM_PINS
    }

    /// True once a register access failure has disabled this instance.
    pub fn is_inoperative(&self) -> bool {
        self.inoperative.load(Ordering::Acquire)
    }

    fn check_operative(&self) -> Result<()> {
        if self.is_inoperative() {
            Err(error::controller_disabled())
        } else {
            Ok(())
        }
    }

    // A register access failure is unrecoverable for this instance: latch
    // the flag so every later operation fails fast without touching
    // hardware again.
    pub(crate) fn reg_read(&self, offset: usize) -> Result<u32> {
        self.regs.read(offset).map_err(|e| self.latch_failure(e))
    }

    pub(crate) fn reg_write(&self, offset: usize, value: u32) -> Result<()> {
        self.regs
            .write(offset, value)
            .map_err(|e| self.latch_failure(e))
    }

    fn latch_failure(&self, err: Error) -> Error {
        warn!("register access failed, disabling controller: {}", err);
        self.inoperative.store(true, Ordering::Release);
        err
    }

    // One read-modify-write of the register holding `slot`, under `lock`.
    // The guard spans exactly the read and the write-back, never longer.
    fn update_field(&self, lock: &Mutex<()>, slot: FieldSlot, value: u32) -> Result<()> {
        let _guard = lock.lock().unwrap_or_else(PoisonError::into_inner);
        let word = self.reg_read(slot.byte_offset)?;
        let updated = (word & !slot.mask()) | slot.place(value);
        self.reg_write(slot.byte_offset, updated)
    }

    /// Reads the decoded function-select field of `pin`.
    pub fn pin_function(&self, pin: Pin) -> Result<PinFunction> {
        self.check_operative()?;
        let slot = locate(pin, RegisterFamily::FunctionSelect);
        let word = self.reg_read(slot.byte_offset)?;
        Ok(PinFunction::from_bits(slot.extract(word)))
    }

    /// Reads the instantaneous level of `pin`.
    pub fn read_level(&self, pin: Pin) -> Result<Level> {
        self.check_operative()?;
        let slot = locate(pin, RegisterFamily::ReadLevel);
        let word = self.reg_read(slot.byte_offset)?;
        Ok(if slot.extract(word) != 0 {
            Level::High
        } else {
            Level::Low
        })
    }

    /// Configures `pin` as an output driving `level`.
    ///
    /// The function-select update is a read-modify-write under the
    /// FunctionSelect lock. The level itself is a single write-1 into
    /// SetLevel or ClearLevel; no read is needed and no other pin's
    /// requested state is disturbed.
    pub fn configure_output(&self, pin: Pin, level: Level) -> Result<()> {
        self.check_operative()?;
        debug!("pin {}: configure output, level {:?}", pin, level);
        let fsel = locate(pin, RegisterFamily::FunctionSelect);
        self.update_field(&self.fsel_lock, fsel, PinFunction::Output.bits())?;

        let family = match level {
            Level::High => RegisterFamily::SetLevel,
            Level::Low => RegisterFamily::ClearLevel,
        };
        let slot = locate(pin, family);
        self.reg_write(slot.byte_offset, slot.mask())
    }

    /// Configures `pin` as an input. Level registers are not touched.
    pub fn configure_input(&self, pin: Pin) -> Result<()> {
        self.check_operative()?;
        debug!("pin {}: configure input", pin);
        let fsel = locate(pin, RegisterFamily::FunctionSelect);
        self.update_field(&self.fsel_lock, fsel, PinFunction::Input.bits())
    }

    /// Enables detection of `edge` on `pin`.
    ///
    /// Both edge-enable bits are cleared first and the pin is forced into
    /// input mode; the hardware only defines edge detection for inputs.
    pub fn enable_edge(&self, pin: Pin, edge: Edge) -> Result<()> {
        self.check_operative()?;
        debug!("pin {}: enable {:?} edge", pin, edge);
        self.disable_edges(pin)?;
        self.configure_input(pin)?;

        let family = match edge {
            Edge::Rising => RegisterFamily::RisingEdgeEnable,
            Edge::Falling => RegisterFamily::FallingEdgeEnable,
        };
        let slot = locate(pin, family);
        self.update_field(&self.edge_lock, slot, 1)
    }

    /// Clears both edge-enable bits of `pin`.
    ///
    /// Safe to call on a pin with no edges enabled; the writes are
    /// idempotent.
    pub fn disable_edges(&self, pin: Pin) -> Result<()> {
        self.check_operative()?;
        debug!("pin {}: disable edges", pin);
        for family in [
            RegisterFamily::RisingEdgeEnable,
            RegisterFamily::FallingEdgeEnable,
        ] {
            let slot = locate(pin, family);
            self.update_field(&self.edge_lock, slot, 0)?;
        }
        Ok(())
    }
}
