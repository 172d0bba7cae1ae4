use rtic_core::Mutex;

use crate::controller::error::ControlError;
use crate::controller::vehicle::{Maneuver, Pattern, VehicleController};
use crate::drivers::pwm::pwm_core::PwmRegisters;
use crate::tasks::schedule::MANEUVER_HOLD_MS;

/// One entry of a maneuver program.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ProgramStep {
    pub label: &'static str,
    pub maneuver: Maneuver,
    pub hold_ms: u32,
}

impl ProgramStep {
    pub const fn new(label: &'static str, maneuver: Maneuver, hold_ms: u32) -> Self {
        Self {
            label,
            maneuver,
            hold_ms,
        }
    }
}

// wheels turned fully, half power
pub const DEFAULT_SETUP: Maneuver = Maneuver::new(Pattern::Diagonal, 1.0, Some(0.5));

pub const DEFAULT_PROGRAM: [ProgramStep; 4] = [
    ProgramStep::new(
        "straight",
        Maneuver::new(Pattern::Diagonal, 0.0, Some(0.5)),
        MANEUVER_HOLD_MS,
    ),
    ProgramStep::new(
        "parallel",
        Maneuver::new(Pattern::Diagonal, 0.8, None),
        MANEUVER_HOLD_MS,
    ),
    ProgramStep::new(
        "circle",
        Maneuver::new(Pattern::Rotate, 0.0, Some(0.5)),
        MANEUVER_HOLD_MS,
    ),
    ProgramStep::new(
        "curve",
        Maneuver::new(Pattern::Curve, 0.8, Some(0.5)),
        MANEUVER_HOLD_MS,
    ),
];

/// Plays a fixed maneuver program over and over.
pub struct ManeuverSequencer<'a> {
    setup: Maneuver,
    program: &'a [ProgramStep],
    next: usize,
}

impl<'a> ManeuverSequencer<'a> {
    pub fn new(setup: Maneuver, program: &'a [ProgramStep]) -> Result<Self, ControlError> {
        if program.is_empty() {
            return Err(ControlError::InvalidConfiguration);
        }
        setup.validate()?;
        for step in program {
            step.maneuver.validate()?;
        }
        Ok(Self {
            setup,
            program,
            next: 0,
        })
    }

    /// Bring the car into its setup pose and turn the stabilizer on.
    pub fn start<M, P>(&mut self, vehicle: &mut M) -> Result<(), ControlError>
    where
        M: Mutex<T = VehicleController<P>>,
        P: PwmRegisters,
    {
        let setup = self.setup;
        vehicle.lock(|vehicle| -> Result<(), ControlError> {
            vehicle.execute(&setup)?;
            vehicle.enable_stabilizer();
            Ok(())
        })?;
        self.next = 0;
        log::info!("maneuver program started with {} steps", self.program.len());
        Ok(())
    }

    /// Execute the next program step and return how long to hold it.
    pub fn step<M, P>(&mut self, vehicle: &mut M) -> Result<u32, ControlError>
    where
        M: Mutex<T = VehicleController<P>>,
        P: PwmRegisters,
    {
        let step = self.program[self.next];
        log::info!("{}", step.label);
        vehicle.lock(|vehicle| vehicle.execute(&step.maneuver))?;
        self.next = (self.next + 1) % self.program.len();
        Ok(step.hold_ms)
    }

    // index of the step the next call to `step` runs
    pub fn position(&self) -> usize {
        self.next
    }

    pub fn program(&self) -> &'a [ProgramStep] {
        self.program
    }
}
