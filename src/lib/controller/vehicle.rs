use embedded_hal::blocking::delay::DelayMs;

use crate::controller::direction::DirectionController;
use crate::controller::error::{check_unit_range, ControlError};
use crate::drivers::motor::pwm_motor::MotorActuator;
use crate::drivers::pwm::pwm_core::PwmRegisters;

pub const NUM_WHEELS: usize = 4;

// indices match the labels on the chassis: label - 1 = index
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Wheel {
    FrontLeft = 0,
    FrontRight = 1,
    BackLeft = 2,
    BackRight = 3,
}

impl Wheel {
    pub const ALL: [Wheel; NUM_WHEELS] = [
        Wheel::FrontLeft,
        Wheel::FrontRight,
        Wheel::BackLeft,
        Wheel::BackRight,
    ];

    pub fn index(self) -> usize {
        self as usize
    }
}

/// Driving patterns the chassis knows how to steer.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Pattern {
    /// all wheels point the same way; the car moves straight or sideways
    Diagonal = 0,
    /// wheels pivot around the center; the car turns on the spot
    Rotate = 1,
    /// front and back wheels steer in opposite directions
    Curve = 2,
}

impl TryFrom<u8> for Pattern {
    type Error = ControlError;

    fn try_from(code: u8) -> Result<Self, Self::Error> {
        match code {
            0 => Ok(Pattern::Diagonal),
            1 => Ok(Pattern::Rotate),
            2 => Ok(Pattern::Curve),
            _ => Err(ControlError::InvalidConfiguration),
        }
    }
}

/// One driving command: how to align the wheels and, optionally, how hard to drive.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Maneuver {
    pub pattern: Pattern,
    // ignored for Pattern::Rotate
    pub direction: f32,
    // None keeps the current driving power
    pub power: Option<f32>,
}

impl Maneuver {
    pub const fn new(pattern: Pattern, direction: f32, power: Option<f32>) -> Self {
        Self {
            pattern,
            direction,
            power,
        }
    }

    pub fn validate(&self) -> Result<(), ControlError> {
        if self.pattern != Pattern::Rotate {
            check_unit_range(self.direction)?;
        }
        if let Some(power) = self.power {
            check_unit_range(power)?;
        }
        Ok(())
    }
}

/// The whole car: four driving motors and four steered wheels.
///
/// Write ownership: the maneuver task owns the driving motors and the
/// stabilizer flag; the steering is written by the maneuver task (alignment)
/// and by the stabilizer task (realignment). Whoever shares it across tasks
/// does so through a resource lock.
pub struct VehicleController<P> {
    speed: [MotorActuator<P>; NUM_WHEELS],
    direction: [DirectionController<P>; NUM_WHEELS],
    hold_direction_mode: bool,
}

impl<P> VehicleController<P>
where
    P: PwmRegisters,
{
    /// `registers` lists the four driving motors, then the four steering
    /// motors, each in front-left, front-right, back-left, back-right order.
    pub fn new(registers: [P; 2 * NUM_WHEELS], pwm_period: u32) -> Self {
        let [s0, s1, s2, s3, d0, d1, d2, d3] = registers;
        let steer = |p| DirectionController::new(MotorActuator::new(p, pwm_period));
        Self {
            speed: [
                MotorActuator::new(s0, pwm_period),
                MotorActuator::new(s1, pwm_period),
                MotorActuator::new(s2, pwm_period),
                MotorActuator::new(s3, pwm_period),
            ],
            direction: [steer(d0), steer(d1), steer(d2), steer(d3)],
            hold_direction_mode: false,
        }
    }

    /// Point every wheel the way `pattern` needs it.
    pub fn align_wheels(&mut self, pattern: Pattern, direction: f32) -> Result<(), ControlError> {
        if pattern != Pattern::Rotate {
            check_unit_range(direction)?;
        }

        for wheel in Wheel::ALL {
            let target = match pattern {
                Pattern::Diagonal => direction,
                Pattern::Rotate => match wheel {
                    Wheel::FrontLeft | Wheel::BackRight => -1.0,
                    Wheel::FrontRight | Wheel::BackLeft => 1.0,
                },
                Pattern::Curve => match wheel {
                    Wheel::FrontLeft | Wheel::FrontRight => direction,
                    Wheel::BackLeft | Wheel::BackRight => -direction,
                },
            };
            let controller = &mut self.direction[wheel.index()];
            controller.set_direction(target)?;

            log::debug!("wheel {}: direction {}", wheel.index() + 1, controller.direction());
        }
        Ok(())
    }

    /// Drive all wheels at `power`; for Pattern::Rotate the even wheels run inverted.
    pub fn set_driving_power(&mut self, pattern: Pattern, power: f32) -> Result<(), ControlError> {
        check_unit_range(power)?;

        for wheel in Wheel::ALL {
            let power = match pattern {
                Pattern::Diagonal | Pattern::Curve => power,
                Pattern::Rotate if wheel.index() % 2 == 0 => -power,
                Pattern::Rotate => power,
            };
            self.speed[wheel.index()].set_power(power)?;
        }
        Ok(())
    }

    pub fn execute(&mut self, maneuver: &Maneuver) -> Result<(), ControlError> {
        maneuver.validate()?;
        self.align_wheels(maneuver.pattern, maneuver.direction)?;
        if let Some(power) = maneuver.power {
            self.set_driving_power(maneuver.pattern, power)?;
        }
        Ok(())
    }

    pub fn stop(&mut self) {
        for motor in self.speed.iter_mut() {
            motor.stop();
        }
    }

    // takes effect on the next stabilizer tick
    pub fn enable_stabilizer(&mut self) {
        self.hold_direction_mode = true;
    }

    pub fn disable_stabilizer(&mut self) {
        self.hold_direction_mode = false;
    }

    pub fn stabilizer_enabled(&self) -> bool {
        self.hold_direction_mode
    }

    /// One stabilizer tick: realign every wheel if stabilization is on.
    ///
    /// Stops at the first wheel whose shake is refused.
    pub fn stabilize<D>(&mut self, delay: &mut D) -> Result<(), ControlError>
    where
        D: DelayMs<u32>,
    {
        if !self.hold_direction_mode {
            return Ok(());
        }
        for wheel in Wheel::ALL {
            self.direction[wheel.index()].realign(delay)?;
        }
        Ok(())
    }

    pub fn direction(&self, wheel: Wheel) -> f32 {
        self.direction[wheel.index()].direction()
    }

    pub fn power(&self, wheel: Wheel) -> f32 {
        self.speed[wheel.index()].power()
    }

    pub fn directions(&self) -> [f32; NUM_WHEELS] {
        Wheel::ALL.map(|wheel| self.direction(wheel))
    }

    pub fn powers(&self) -> [f32; NUM_WHEELS] {
        Wheel::ALL.map(|wheel| self.power(wheel))
    }

    pub fn steering_mut(&mut self, wheel: Wheel) -> &mut DirectionController<P> {
        &mut self.direction[wheel.index()]
    }
}
