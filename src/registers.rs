//! Access to the memory-mapped register block.

use std::fmt;
use std::ptr;

use log::trace;

use crate::error::{Error, Result};

/// Word-granular access to a contiguous block of 32-bit hardware registers,
/// addressed by byte offset from the block base.
///
/// [`RegisterWindow`] is the production implementation over mapped device
/// memory. Tests substitute an in-memory fake that emulates the hardware's
/// register semantics, which is why every controller operation is generic
/// over this trait rather than tied to a concrete mapping.
pub trait RegisterBus: Send + Sync {
    /// Reads the 32-bit register at `offset` bytes from the block base.
    fn read(&self, offset: usize) -> Result<u32>;

    /// Writes the 32-bit register at `offset` bytes from the block base.
    fn write(&self, offset: usize, value: u32) -> Result<()>;
}

// A shared window is still a window. Lets the embedding driver keep its
// own handle on the block while the controller owns another.
impl<T: RegisterBus + ?Sized> RegisterBus for std::sync::Arc<T> {
    fn read(&self, offset: usize) -> Result<u32> {
        (**self).read(offset)
    }

    fn write(&self, offset: usize, value: u32) -> Result<()> {
        (**self).write(offset, value)
    }
}

/// Volatile accessor over an already-mapped, contiguous block of device
/// registers.
///
/// The window does not map anything itself: the embedding driver performs
/// the platform mapping (ioremap, /dev/gpiomem, ...) and owns its lifetime.
/// Offsets are bounds- and alignment-checked on every access; a violation
/// yields [`Error::RegisterAccess`] without touching memory.
#[derive(Debug)]
pub struct RegisterWindow {
    base: *mut u32,
    len: usize,
}

// All access goes through volatile word reads/writes; interleaving between
// threads is constrained by the controller's per-family lock discipline.
unsafe impl Send for RegisterWindow {}
unsafe impl Sync for RegisterWindow {}

impl RegisterWindow {
    /// Wraps a mapped register block of `len` bytes starting at `base`.
    ///
    /// Fails with [`Error::RegisterAccess`] if the mapping is null or not
    /// word-aligned.
    ///
    /// # Safety
    ///
    /// `base` must point to a live mapping of at least `len` bytes of
    /// device memory that remains valid for the lifetime of the window.
    pub unsafe fn new(base: *mut u32, len: usize) -> Result<Self> {
        if base.is_null() {
            return Err(Error::RegisterAccess {
                offset: 0,
                reason: "null register mapping",
            });
        }
        if base as usize % 4 != 0 {
            return Err(Error::RegisterAccess {
                offset: 0,
                reason: "register mapping not word-aligned",
            });
        }
        Ok(Self { base, len })
    }

    /// Length of the window in bytes.
    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    /// True for a zero-length window.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    fn word_ptr(&self, offset: usize) -> Result<*mut u32> {
        if offset % 4 != 0 {
            return Err(Error::RegisterAccess {
                offset,
                reason: "unaligned register offset",
            });
        }
        if offset + 4 > self.len {
            return Err(Error::RegisterAccess {
                offset,
                reason: "offset beyond register window",
            });
        }
        // In bounds by the check above.
        Ok(unsafe { self.base.cast::<u8>().add(offset).cast::<u32>() })
    }
}

impl RegisterBus for RegisterWindow {
    fn read(&self, offset: usize) -> Result<u32> {
        let ptr = self.word_ptr(offset)?;
        let value = unsafe { ptr::read_volatile(ptr) };
        trace!("reg read  [0x{:02X}] -> 0x{:08X}", offset, value);
        Ok(value)
    }

    fn write(&self, offset: usize, value: u32) -> Result<()> {
        let ptr = self.word_ptr(offset)?;
        trace!("reg write [0x{:02X}] <- 0x{:08X}", offset, value);
        unsafe { ptr::write_volatile(ptr, value) };
        Ok(())
    }
}

impl fmt::Display for RegisterWindow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "register window ({} bytes)", self.len)
    }
}
