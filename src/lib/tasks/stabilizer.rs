use embedded_hal::blocking::delay::DelayMs;
use rtic_core::Mutex;

use crate::controller::vehicle::VehicleController;
use crate::drivers::pwm::pwm_core::PwmRegisters;
use crate::tasks::schedule::STABILIZER_PERIOD_MS;

/// One stabilizer pass, returns the ms until the next one.
///
/// The vehicle stays locked through all four realignments, so a maneuver
/// can't re-point a wheel halfway through its shake.
pub fn tick<M, P, D>(vehicle: &mut M, delay: &mut D) -> u32
where
    M: Mutex<T = VehicleController<P>>,
    P: PwmRegisters,
    D: DelayMs<u32>,
{
    if let Err(e) = vehicle.lock(|vehicle| vehicle.stabilize(delay)) {
        log::error!("realign refused: {:?}", e);
    }
    STABILIZER_PERIOD_MS
}
