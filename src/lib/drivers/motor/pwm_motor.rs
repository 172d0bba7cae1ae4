use libm::fabsf;

use crate::controller::error::{check_unit_range, ControlError};
use crate::drivers::pwm::pwm_core::{PwmRegisters, Register, CH_BACKWARDS, CH_FORWARDS, PHASE};

// Largest period whose every count is exact in an f32, so the duty never
// skips values
pub const MAX_PERIOD: u32 = 1 << 24;

/// A motor driven by one two-channel PWM core.
///
/// Power is a value in [-1, 1]: the sign picks the channel, the magnitude is
/// the duty cycle as a fraction of the configured period. The period must not
/// exceed `MAX_PERIOD`.
pub struct MotorActuator<P> {
    registers: P,
    period: u32,
    current_power: f32,
}

impl<P> MotorActuator<P>
where
    P: PwmRegisters,
{
    pub fn new(registers: P, period: u32) -> Self {
        Self {
            registers,
            period,
            current_power: 0.0,
        }
    }

    pub fn set_power(&mut self, power: f32) -> Result<(), ControlError> {
        let power = check_unit_range(power)?;
        let duty = (fabsf(power) * self.period as f32) as u32;

        // zero power goes out on the backward channel with zero duty
        let enable = if power > 0.0 { CH_FORWARDS } else { CH_BACKWARDS };
        self.apply(PHASE, duty, PHASE, duty, enable);

        self.current_power = power;
        Ok(())
    }

    // last commanded power, not a readback from the hardware
    pub fn power(&self) -> f32 {
        self.current_power
    }

    pub fn period(&self) -> u32 {
        self.period
    }

    pub fn stop(&mut self) {
        self.apply(PHASE, 0, PHASE, 0, CH_BACKWARDS);
        self.current_power = 0.0;
    }

    fn apply(&mut self, phase1: u32, duty1: u32, phase2: u32, duty2: u32, enable: u32) {
        self.registers.write(Register::Enable, enable);
        self.registers.write(Register::Period, self.period);
        self.registers.write(Register::Phase1, phase1);
        self.registers.write(Register::Phase2, phase2);
        self.registers.write(Register::Duty1, duty1);
        self.registers.write(Register::Duty2, duty2);
    }
}
