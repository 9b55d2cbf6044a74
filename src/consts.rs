//! Internal constants: the register map of the BCM2835 GPIO block.
//!
//! Byte offsets are relative to the start of the controller's register
//! window (bus address 0x7E20_0000; physical 0x2020_0000 on the BCM2835).
//! The embedding driver maps the block and hands the window to this crate,
//! so nothing here is an absolute address.

/// Number of GPIO pins exposed by the controller.
pub const NUM_PINS: u8 = 54;

/// Pin span covered by the event-status scan: two 32-bit registers.
/// Doubles as the "no pending event" sentinel of the acknowledgment path.
pub const EVENT_SCAN_SPAN: u8 = 64;

/// Length of the full GPIO register block in bytes.
pub const BLOCK_LEN: usize = 0xB4;

/// Byte stride between consecutive registers of one family.
pub const REG_STRIDE: usize = 4;

// --- Family base offsets ---

/// GPFSEL0-5: function select, 3 bits per pin, 10 pins per register.
pub const GPFSEL: usize = 0x00;
/// GPSET0-1: write-1 drives an output pin high, writing 0 has no effect.
pub const GPSET: usize = 0x1C;
/// GPCLR0-1: write-1 drives an output pin low, writing 0 has no effect.
pub const GPCLR: usize = 0x28;
/// GPLEV0-1: instantaneous pin level, read-only.
pub const GPLEV: usize = 0x34;
/// GPEDS0-1: pending edge events, write-1-to-clear.
pub const GPEDS: usize = 0x40;
/// GPREN0-1: rising edge detect enable.
pub const GPREN: usize = 0x4C;
/// GPFEN0-1: falling edge detect enable.
pub const GPFEN: usize = 0x58;
