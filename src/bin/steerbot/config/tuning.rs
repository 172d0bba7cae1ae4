use steerbot::controller::vehicle::Maneuver;
use steerbot::tasks::maneuver::{ProgramStep, DEFAULT_PROGRAM, DEFAULT_SETUP};

pub const MANEUVER_SETUP: Maneuver = DEFAULT_SETUP;
pub static MANEUVER_PROGRAM: [ProgramStep; 4] = DEFAULT_PROGRAM;

// how long a wheel is pushed off its heading during a realign
pub const REALIGN_DWELL_MS: u32 = 1;
