//! # bcm2835-gpio
//!
//! Register-level control of the BCM2835 GPIO block found on Raspberry Pi
//! SoCs: 54 pins behind seven families of 32-bit memory-mapped registers,
//! with edge-detect event acknowledgment for interrupt service.
//!
//! The crate models exactly the hardware-facing core. Discovering the
//! physical register range, mapping it, registering control files, and
//! wiring up the interrupt line are the embedding driver's job; it hands a
//! mapped [`RegisterWindow`] to [`GpioController`] and calls back in from
//! its file handlers and interrupt handler.
//!
//! ## Features
//!
//! *   Pin-to-register addressing for all seven register families
//!     ([`locate`], [`RegisterFamily`], [`FieldSlot`]).
//! *   Pin configuration ([`GpioController`]): function select, output
//!     levels through the write-1-to-act set/clear registers, rising and
//!     falling edge-detect enables.
//! *   Edge-event acknowledgment ([`GpioController::acknowledge_event`]):
//!     lowest pending pin first, write-1-to-clear, safe to invoke from the
//!     asynchronous interrupt path.
//! *   The control-file vocabulary (`high`, `low`, `in`, `rising`,
//!     `falling`, `none`): command-line parsing ([`parse_command_line`]),
//!     per-pin query text ([`GpioController::query_pin`]) and a paginated
//!     pin dump ([`PinDump`]).
//!
//! ## Register map
//!
//! | Family | Base offset | Pins/register | Field width |
//! |---|---|---|---|
//! | FunctionSelect | 0x00 | 10 | 3 |
//! | SetLevel | 0x1C | 32 | 1 |
//! | ClearLevel | 0x28 | 32 | 1 |
//! | ReadLevel | 0x34 | 32 | 1 |
//! | EventStatus | 0x40 | 32 | 1 |
//! | RisingEdgeEnable | 0x4C | 32 | 1 |
//! | FallingEdgeEnable | 0x58 | 32 | 1 |
//!
//! ## Usage
//!
//! ```no_run
//! use bcm2835_gpio::{GpioController, Level, Pin, RegisterWindow, NO_PENDING_EVENT};
//!
//! fn main() -> bcm2835_gpio::Result<()> {
//!     // The device binding maps the GPIO block (0xB4 bytes) and owns the
//!     // mapping's lifetime; 0x2020_0000 is the BCM2835 physical base.
//!     let window = unsafe { RegisterWindow::new(0x2020_0000 as *mut u32, 0xB4)? };
//!     let gpio = GpioController::new(window);
//!
//!     let pin = Pin::new(17)?;
//!     gpio.configure_output(pin, Level::High)?;
//!
//!     // Interrupt handler: drain pending edge events.
//!     loop {
//!         match gpio.acknowledge_event() {
//!             NO_PENDING_EVENT => break,
//!             pin => println!("edge event on pin {}", pin),
//!         }
//!     }
//!     Ok(())
//! }
//! ```
//!
//! ## Concurrency
//!
//! Read-modify-write sequences on the function-select and edge-enable
//! registers are serialized by per-family mutexes held only for the
//! duration of one sequence. The event-status lock is acquired exclusively
//! by the acknowledgment path, so the interrupt context never waits on the
//! foreground command path.

mod addressing;
mod commands;
mod consts;
mod controller;
mod dump;
mod error;
mod events;
pub mod gpio;
mod registers;

pub use addressing::{locate, FieldSlot, RegisterFamily};
pub use commands::{parse_command_line, PinCommand};
pub use controller::GpioController;
pub use dump::{PinDump, DUMP_HEADER};
pub use error::{Error, Result};
pub use events::NO_PENDING_EVENT;
pub use gpio::{Edge, Level, Pin, PinFunction};
pub use registers::{RegisterBus, RegisterWindow};

/// Number of pins addressed by the controller.
pub const PIN_COUNT: u8 = consts::NUM_PINS;

/// Length in bytes of the GPIO register block the embedding driver maps.
pub const BLOCK_LEN: usize = consts::BLOCK_LEN;
