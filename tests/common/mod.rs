//! Shared in-memory register block emulating the GPIO hardware semantics:
//! set/clear writes drive the level bits of output-configured pins, the
//! event-status registers are write-1-to-clear, and the level registers
//! ignore writes.

#![allow(dead_code)]

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Mutex;

use bcm2835_gpio::{Error, RegisterBus, Result};

pub const GPFSEL: usize = 0x00;
pub const GPSET: usize = 0x1C;
pub const GPCLR: usize = 0x28;
pub const GPLEV: usize = 0x34;
pub const GPEDS: usize = 0x40;
pub const GPREN: usize = 0x4C;
pub const GPFEN: usize = 0x58;

pub const WORDS: usize = 0xB4 / 4;

pub struct FakeGpioBlock {
    words: Mutex<[u32; WORDS]>,
    fail: AtomicBool,
}

impl FakeGpioBlock {
    pub fn new() -> Self {
        Self {
            words: Mutex::new([0u32; WORDS]),
            fail: AtomicBool::new(false),
        }
    }

    /// Makes every subsequent access fail, as a dead mapping would.
    pub fn fail_access(&self) {
        self.fail.store(true, Ordering::SeqCst);
    }

    pub fn read_word(&self, offset: usize) -> u32 {
        self.words.lock().unwrap()[offset / 4]
    }

    pub fn write_word(&self, offset: usize, value: u32) {
        self.words.lock().unwrap()[offset / 4] = value;
    }

    /// Latches a pending event bit, as the edge detector would.
    pub fn raise_event(&self, pin: u8) {
        let mut words = self.words.lock().unwrap();
        words[GPEDS / 4 + pin as usize / 32] |= 1u32 << (pin % 32);
    }

    /// Forces a pin's level bit, as an external signal on an input would.
    pub fn drive_level(&self, pin: u8, high: bool) {
        let mut words = self.words.lock().unwrap();
        let word = &mut words[GPLEV / 4 + pin as usize / 32];
        if high {
            *word |= 1u32 << (pin % 32);
        } else {
            *word &= !(1u32 << (pin % 32));
        }
    }

    /// Writes a pin's 3-bit function-select field directly.
    pub fn set_function_bits(&self, pin: u8, bits: u32) {
        let mut words = self.words.lock().unwrap();
        let word = &mut words[GPFSEL / 4 + pin as usize / 10];
        let shift = (pin % 10) * 3;
        *word = (*word & !(0b111 << shift)) | ((bits & 0b111) << shift);
    }

    pub fn snapshot(&self) -> [u32; WORDS] {
        *self.words.lock().unwrap()
    }

    fn is_output(words: &[u32; WORDS], pin: usize) -> bool {
        let word = words[GPFSEL / 4 + pin / 10];
        (word >> ((pin % 10) * 3)) & 0b111 == 0b001
    }

    fn apply_level(words: &mut [u32; WORDS], reg: usize, mask: u32, high: bool) {
        for bit in 0..32u32 {
            if mask & (1u32 << bit) == 0 {
                continue;
            }
            let pin = reg * 32 + bit as usize;
            // Set/clear writes only take effect on output-configured pins.
            if pin >= 54 || !Self::is_output(words, pin) {
                continue;
            }
            let word = &mut words[GPLEV / 4 + reg];
            if high {
                *word |= 1u32 << bit;
            } else {
                *word &= !(1u32 << bit);
            }
        }
    }
}

impl RegisterBus for FakeGpioBlock {
    fn read(&self, offset: usize) -> Result<u32> {
        if self.fail.load(Ordering::SeqCst) {
            return Err(Error::RegisterAccess {
                offset,
                reason: "simulated mapping fault",
            });
        }
        Ok(self.words.lock().unwrap()[offset / 4])
    }

    fn write(&self, offset: usize, value: u32) -> Result<()> {
        if self.fail.load(Ordering::SeqCst) {
            return Err(Error::RegisterAccess {
                offset,
                reason: "simulated mapping fault",
            });
        }
        let mut words = self.words.lock().unwrap();
        match offset {
            o if o == GPSET || o == GPSET + 4 => {
                Self::apply_level(&mut words, (o - GPSET) / 4, value, true);
            }
            o if o == GPCLR || o == GPCLR + 4 => {
                Self::apply_level(&mut words, (o - GPCLR) / 4, value, false);
            }
            o if o == GPLEV || o == GPLEV + 4 => {
                // Read-only in hardware.
            }
            o if o == GPEDS || o == GPEDS + 4 => {
                words[o / 4] &= !value;
            }
            o => words[o / 4] = value,
        }
        Ok(())
    }
}

pub fn init_logs() {
    let _ = env_logger::builder().is_test(true).try_init();
}
