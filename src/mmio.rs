//! Register access

use core::ptr;

/// 32-bit register bus.
///
/// Addresses are physical addresses inside the controller window.
pub trait RegisterBus {
    /// Read the register at `addr`.
    fn read32(&mut self, addr: u32) -> u32;

    /// Write `value` to the register at `addr`.
    fn write32(&mut self, addr: u32, value: u32);
}

/// Direct memory-mapped access, identity mapped.
pub struct Mmio {
    _private: (),
}

impl Mmio {
    /// Create a bus over identity-mapped physical memory.
    ///
    /// # Safety
    ///
    /// Every address passed to this bus must be a mapped, 4-byte aligned
    /// device register that nothing else accesses concurrently.
    pub const unsafe fn new() -> Self {
        Self { _private: () }
    }
}

impl RegisterBus for Mmio {
    #[inline]
    fn read32(&mut self, addr: u32) -> u32 {
        // SAFETY: upheld by the caller of `Mmio::new`
        unsafe { ptr::read_volatile(addr as usize as *const u32) }
    }

    #[inline]
    fn write32(&mut self, addr: u32, value: u32) {
        // SAFETY: upheld by the caller of `Mmio::new`
        unsafe { ptr::write_volatile(addr as usize as *mut u32, value) }
    }
}

impl<B: RegisterBus> RegisterBus for &mut B {
    fn read32(&mut self, addr: u32) -> u32 {
        (**self).read32(addr)
    }

    fn write32(&mut self, addr: u32, value: u32) {
        (**self).write32(addr, value)
    }
}
