use embedded_hal::blocking::delay::DelayMs;
use rtic_core::Mutex;

use crate::controller::error::ControlError;
use crate::controller::vehicle::VehicleController;
use crate::drivers::accel::accelerometer::Accelerometer;
use crate::drivers::pwm::pwm_core::PwmRegisters;
use crate::navigation::ins::Ins;
use crate::tasks::maneuver::ManeuverSequencer;
use crate::tasks::sensor::SensorTask;
use crate::tasks::stabilizer;

// Task priorities, higher number preempts lower
pub const STABILIZER_PRIORITY: u8 = 3;
pub const MANEUVER_PRIORITY: u8 = 2;
pub const SENSOR_PRIORITY: u8 = 1;

// Task timing
pub const STABILIZER_PERIOD_MS: u32 = 10;
pub const SENSOR_PERIOD_MS: u32 = 1;
pub const SENSOR_TIMESTEP_S: f64 = 0.001;
pub const MANEUVER_HOLD_MS: u32 = 5000;

// Sensor task
pub const CALIBRATION_SAMPLES: u32 = 1000;
pub const SENSOR_LOG_INTERVAL: u32 = 100;

// The run_* loops below are for schedulers that give each task its own
// thread of execution. Under RTIC the tasks call the same step functions and
// re-spawn themselves instead.

/// Stabilizer loop, never returns.
pub fn run_stabilizer<M, P, D>(vehicle: &mut M, delay: &mut D) -> !
where
    M: Mutex<T = VehicleController<P>>,
    P: PwmRegisters,
    D: DelayMs<u32>,
{
    loop {
        let period = stabilizer::tick(vehicle, delay);
        delay.delay_ms(period);
    }
}

/// Maneuver loop. Runs the program forever unless the vehicle refuses a
/// maneuver, in which case that error is returned.
pub fn run_maneuvers<M, P, D>(
    sequencer: &mut ManeuverSequencer<'_>,
    vehicle: &mut M,
    delay: &mut D,
) -> ControlError
where
    M: Mutex<T = VehicleController<P>>,
    P: PwmRegisters,
    D: DelayMs<u32>,
{
    if let Err(e) = sequencer.start(vehicle) {
        log::error!("maneuver setup refused: {:?}", e);
        return e;
    }
    loop {
        match sequencer.step(vehicle) {
            Ok(hold_ms) => delay.delay_ms(hold_ms),
            Err(e) => {
                log::error!("maneuver refused: {:?}", e);
                return e;
            }
        }
    }
}

/// Sensor loop. Returns once the sensor task has stopped.
pub fn run_sensor<M, A, D>(task: &mut SensorTask, ins: &mut M, delay: &mut D)
where
    M: Mutex<T = Ins<A>>,
    A: Accelerometer,
    A::Error: core::fmt::Debug,
    D: DelayMs<u32>,
{
    while let Some(period) = task.step(ins, delay) {
        if period > 0 {
            delay.delay_ms(period);
        }
    }
}
