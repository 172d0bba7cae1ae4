// Hardware doubles shared by the unit tests.

extern crate std;

use core::cell::RefCell;
use std::collections::VecDeque;
use std::rc::Rc;
use std::vec::Vec;

use embedded_hal::blocking::delay::DelayMs;

use crate::drivers::accel::accelerometer::Accelerometer;
use crate::drivers::pwm::pwm_core::{PwmRegisters, Register};

/// (block id, register, value) in write order, across every block sharing the log
pub type RegisterLog = Rc<RefCell<Vec<(usize, Register, u32)>>>;

pub struct FakePwm {
    pub id: usize,
    pub log: RegisterLog,
}

impl FakePwm {
    pub fn new(id: usize, log: &RegisterLog) -> Self {
        Self {
            id,
            log: log.clone(),
        }
    }
}

impl PwmRegisters for FakePwm {
    fn write(&mut self, register: Register, value: u32) {
        self.log.borrow_mut().push((self.id, register, value));
    }
}

pub fn new_log() -> RegisterLog {
    Rc::new(RefCell::new(Vec::new()))
}

// eight blocks numbered 0..8 writing into one log
pub fn fake_blocks(log: &RegisterLog) -> [FakePwm; 8] {
    core::array::from_fn(|id| FakePwm::new(id, log))
}

#[derive(Default)]
pub struct FakeDelay {
    pub calls: Vec<u32>,
}

impl FakeDelay {
    pub fn total_ms(&self) -> u32 {
        self.calls.iter().sum()
    }
}

impl DelayMs<u32> for FakeDelay {
    fn delay_ms(&mut self, ms: u32) {
        self.calls.push(ms);
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BusFault;

/// Scripted accelerometer.
///
/// `ready` is consumed one poll at a time and repeats its last entry once
/// exhausted; `samples` is consumed one read at a time and faults once empty.
pub struct FakeAccel {
    pub ready: VecDeque<Result<bool, BusFault>>,
    pub samples: VecDeque<Result<[i16; 3], BusFault>>,
    pub polls: usize,
    pub reads: usize,
}

impl FakeAccel {
    pub fn always_ready(samples: &[[i16; 3]]) -> Self {
        Self {
            ready: VecDeque::from([Ok(true)]),
            samples: samples.iter().copied().map(Ok).collect(),
            polls: 0,
            reads: 0,
        }
    }

    pub fn never_ready() -> Self {
        Self {
            ready: VecDeque::from([Ok(false)]),
            samples: VecDeque::new(),
            polls: 0,
            reads: 0,
        }
    }
}

impl Accelerometer for FakeAccel {
    type Error = BusFault;

    fn is_data_ready(&mut self) -> Result<bool, BusFault> {
        self.polls += 1;
        if self.ready.len() > 1 {
            self.ready.pop_front().unwrap_or(Ok(false))
        } else {
            self.ready.front().copied().unwrap_or(Ok(false))
        }
    }

    fn read_xyz(&mut self) -> Result<[i16; 3], BusFault> {
        self.reads += 1;
        self.samples.pop_front().unwrap_or(Err(BusFault))
    }
}
