// Two-channel PWM core living in the FPGA fabric.
//
// Each core is a block of six 32-bit registers. The enable register selects
// which of the two outputs drives the H-bridge, the remaining registers shape
// the waveform. The core latches new values at the next period boundary, so a
// sequence of writes never produces a half-updated pulse.

use core::ptr;

// Enable register codes
pub const CH_BACKWARDS: u32 = 0x1;
pub const CH_FORWARDS: u32 = 0x2;

// Phase offset used for both channels
pub const PHASE: u32 = 0x0;

#[repr(usize)]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Register {
    Enable = 0,
    Period = 1,
    Duty1 = 2,
    Duty2 = 3,
    Phase1 = 4,
    Phase2 = 5,
}

impl Register {
    // word offset from the block base
    pub fn offset(self) -> usize {
        self as usize
    }
}

/// Write access to one PWM register block.
pub trait PwmRegisters {
    fn write(&mut self, register: Register, value: u32);
}

/// Register block mapped into the processor's address space.
pub struct MmioPwm {
    base: *mut u32,
}

// The block is only ever reached through the owning controller, which is in
// turn only reached through a task resource lock.
unsafe impl Send for MmioPwm {}

impl MmioPwm {
    /// # Safety
    ///
    /// `base_address` must be the word-aligned base of a PWM core, and no other
    /// `MmioPwm` may be created for the same address.
    pub const unsafe fn new(base_address: usize) -> Self {
        Self {
            base: base_address as *mut u32,
        }
    }

    pub fn base_address(&self) -> usize {
        self.base as usize
    }
}

impl PwmRegisters for MmioPwm {
    fn write(&mut self, register: Register, value: u32) {
        unsafe { ptr::write_volatile(self.base.add(register.offset()), value) }
    }
}

impl<P: PwmRegisters + ?Sized> PwmRegisters for &mut P {
    fn write(&mut self, register: Register, value: u32) {
        (**self).write(register, value)
    }
}

#[cfg(test)]
mod tests {
    extern crate std;

    use super::*;

    #[test]
    fn test_register_offsets() {
        assert_eq!(Register::Enable.offset(), 0);
        assert_eq!(Register::Period.offset(), 1);
        assert_eq!(Register::Duty1.offset(), 2);
        assert_eq!(Register::Duty2.offset(), 3);
        assert_eq!(Register::Phase1.offset(), 4);
        assert_eq!(Register::Phase2.offset(), 5);
    }

    #[test]
    fn test_mmio_writes_land_at_word_offsets() {
        let mut block = [0u32; 6];
        let base = block.as_mut_ptr() as usize;
        let mut pwm = unsafe { MmioPwm::new(base) };
        assert_eq!(pwm.base_address(), base);

        pwm.write(Register::Enable, CH_FORWARDS);
        pwm.write(Register::Period, 100_000);
        pwm.write(Register::Duty2, 42);
        pwm.write(Register::Phase2, 7);

        assert_eq!(block, [CH_FORWARDS, 100_000, 0, 42, 0, 7]);
    }
}
