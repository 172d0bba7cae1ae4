use embedded_hal::blocking::delay::DelayMs;

use crate::controller::error::{check_unit_range, ControlError};
use crate::drivers::motor::pwm_motor::MotorActuator;
use crate::drivers::pwm::pwm_core::PwmRegisters;

// Fraction of the step motor's range used for steering.
// 1.0: full range of the step motor, 0.25: a quarter of it
pub const TURNING_INTERVAL: f32 = 0.4;

// How long the wheel is pushed away from its position during a realign
pub const REALIGN_DWELL_MS: u32 = 1;

/// Steering for one wheel, driven by a step motor on a PWM core.
///
/// Direction is in [-1, 1]: 1 is a full turn anti-clockwise, -1 a full turn
/// clockwise. The reported direction is what the wheel *should* point at;
/// nothing here can tell if the wheel was forced elsewhere.
pub struct DirectionController<P> {
    motor: MotorActuator<P>,
    turning_interval: f32,
    realign_dwell_ms: u32,
    direction: f32,
}

impl<P> DirectionController<P>
where
    P: PwmRegisters,
{
    /// Takes over the motor and points the wheel straight ahead.
    pub fn new(motor: MotorActuator<P>) -> Self {
        Self::build(motor, TURNING_INTERVAL)
    }

    /// Like `new`, with a custom steering range in (0, 1].
    ///
    /// Any other interval would turn some legal directions into powers the
    /// motor refuses, so it is rejected with `InvalidConfiguration`.
    pub fn with_turning_interval(
        motor: MotorActuator<P>,
        turning_interval: f32,
    ) -> Result<Self, ControlError> {
        if !(turning_interval > 0.0 && turning_interval <= 1.0) {
            return Err(ControlError::InvalidConfiguration);
        }
        Ok(Self::build(motor, turning_interval))
    }

    fn build(motor: MotorActuator<P>, turning_interval: f32) -> Self {
        let mut controller = Self {
            motor,
            turning_interval,
            realign_dwell_ms: REALIGN_DWELL_MS,
            direction: 0.0,
        };
        controller.center();
        controller
    }

    pub fn set_realign_dwell_ms(&mut self, dwell_ms: u32) {
        self.realign_dwell_ms = dwell_ms;
    }

    pub fn set_direction(&mut self, direction: f32) -> Result<(), ControlError> {
        let direction = check_unit_range(direction)?;
        self.motor.set_power(direction * self.turning_interval)?;
        self.direction = direction;
        Ok(())
    }

    pub fn direction(&self) -> f32 {
        self.direction
    }

    pub fn power(&self) -> f32 {
        self.motor.power()
    }

    pub fn turning_interval(&self) -> f32 {
        self.turning_interval
    }

    /// Shake the wheel so the step motor pulls it back into position.
    ///
    /// The wheel is commanded a full unit away from where it should be for a
    /// time far too short to actually get there, then commanded back. This
    /// recovers a wheel that was pushed out of place, but not one whose gears
    /// have slipped.
    ///
    /// If the shake is refused the wheel is left untouched and the error is
    /// returned without waiting out the dwell.
    pub fn realign<D>(&mut self, delay: &mut D) -> Result<(), ControlError>
    where
        D: DelayMs<u32>,
    {
        let hold_direction = self.direction;
        let shake = if hold_direction <= 0.0 {
            hold_direction + 1.0
        } else {
            hold_direction - 1.0
        };

        self.set_direction(shake)?;
        delay.delay_ms(self.realign_dwell_ms);
        self.set_direction(hold_direction)
    }

    fn center(&mut self) {
        self.motor.stop();
        self.direction = 0.0;
    }
}

#[cfg(test)]
mod tests {
    extern crate std;

    use super::*;
    use crate::drivers::pwm::pwm_core::Register;
    use crate::test_util::{new_log, FakeDelay, FakePwm, RegisterLog};
    use approx::assert_abs_diff_eq;
    use std::vec;
    use std::vec::Vec;

    const PERIOD: u32 = 100_000;

    fn controller(log: &RegisterLog) -> DirectionController<FakePwm> {
        DirectionController::new(MotorActuator::new(FakePwm::new(0, log), PERIOD))
    }

    fn duties(log: &RegisterLog) -> Vec<u32> {
        log.borrow()
            .iter()
            .filter(|(_, reg, _)| *reg == Register::Duty1)
            .map(|(_, _, value)| *value)
            .collect()
    }

    #[test]
    fn test_new_centers_wheel() {
        let log = new_log();
        let wheel = controller(&log);
        assert_eq!(wheel.direction(), 0.0);
        assert_eq!(wheel.power(), 0.0);
        assert_eq!(duties(&log), vec![0]);
    }

    #[test]
    fn test_direction_scales_to_turning_interval() {
        let log = new_log();
        let mut wheel = controller(&log);
        wheel.set_direction(1.0).unwrap();
        assert_abs_diff_eq!(wheel.power(), TURNING_INTERVAL);
        wheel.set_direction(-0.5).unwrap();
        assert_abs_diff_eq!(wheel.power(), -0.2, epsilon = 1e-6);
        assert_eq!(duties(&log), vec![0, 40_000, 20_000]);
    }

    #[test]
    fn test_set_then_get_direction() {
        let log = new_log();
        let mut wheel = controller(&log);
        for d in [-1.0, -0.8, -0.3, 0.0, 0.1, 0.75, 1.0] {
            wheel.set_direction(d).unwrap();
            assert_abs_diff_eq!(wheel.direction(), d);
            assert_abs_diff_eq!(wheel.power() / wheel.turning_interval(), d, epsilon = 1e-6);
        }
    }

    #[test]
    fn test_out_of_range_direction_is_rejected() {
        let log = new_log();
        let mut wheel = controller(&log);
        wheel.set_direction(0.2).unwrap();

        // 2.0 * 0.4 would still be a legal power
        assert_eq!(wheel.set_direction(2.0), Err(ControlError::InvalidArgument));
        assert_eq!(wheel.set_direction(-1.5), Err(ControlError::InvalidArgument));
        assert_eq!(wheel.direction(), 0.2);
    }

    #[test]
    fn test_realign_shakes_toward_center_then_returns() {
        let log = new_log();
        let mut wheel = controller(&log);
        let mut delay = FakeDelay::default();

        wheel.set_direction(-0.5).unwrap();
        wheel.realign(&mut delay).unwrap();
        // -0.5 -> +0.5 -> -0.5
        assert_eq!(duties(&log), vec![0, 20_000, 20_000, 20_000]);
        assert_eq!(log.borrow()[6 * 2].2, crate::drivers::pwm::pwm_core::CH_FORWARDS);

        wheel.set_direction(0.8).unwrap();
        wheel.realign(&mut delay).unwrap();
        // 0.8 -> -0.2 -> 0.8
        assert_eq!(&duties(&log)[4..], &[32_000, 8_000, 32_000]);

        assert_eq!(delay.calls, vec![REALIGN_DWELL_MS, REALIGN_DWELL_MS]);
    }

    #[test]
    fn test_realign_restores_exact_direction() {
        let log = new_log();
        let mut wheel = controller(&log);
        let mut delay = FakeDelay::default();

        for d in [-1.0, -0.77, -0.3, 0.0, 0.3, 0.6, 0.999, 1.0] {
            wheel.set_direction(d).unwrap();
            let power = wheel.power();
            wheel.realign(&mut delay).unwrap();
            assert_eq!(wheel.direction(), d);
            assert_eq!(wheel.power(), power);
        }
    }

    #[test]
    fn test_realign_uses_configured_dwell() {
        let log = new_log();
        let mut wheel = controller(&log);
        let mut delay = FakeDelay::default();
        wheel.set_realign_dwell_ms(3);
        wheel.realign(&mut delay).unwrap();
        assert_eq!(delay.calls, vec![3]);
    }

    #[test]
    fn test_turning_interval_outside_unit_is_rejected() {
        let log = new_log();
        for interval in [2.5, 1.000_1, 0.0, -0.4, f32::NAN, f32::INFINITY] {
            let motor = MotorActuator::new(FakePwm::new(0, &log), PERIOD);
            assert_eq!(
                DirectionController::with_turning_interval(motor, interval).err(),
                Some(ControlError::InvalidConfiguration),
                "interval {}",
                interval
            );
        }
        // nothing was centered
        assert!(log.borrow().is_empty());
    }

    #[test]
    fn test_full_turning_interval_realigns_every_direction() {
        let log = new_log();
        let motor = MotorActuator::new(FakePwm::new(0, &log), PERIOD);
        let mut wheel = DirectionController::with_turning_interval(motor, 1.0).unwrap();
        let mut delay = FakeDelay::default();

        for d in [-1.0, -0.5, 0.0, 0.5, 1.0] {
            wheel.set_direction(d).unwrap();
            log.borrow_mut().clear();
            wheel.realign(&mut delay).unwrap();
            // shake and return, six registers each
            assert_eq!(log.borrow().len(), 12);
            assert_eq!(wheel.direction(), d);
        }
        assert_eq!(delay.calls.len(), 5);
    }
}
