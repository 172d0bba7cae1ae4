// Dead reckoning over many samples: exact integration of a known profile, and
// the drift left behind by a calibration error.

use approx::assert_relative_eq;
use embedded_hal::blocking::delay::DelayMs;
use steerbot::drivers::accel::accelerometer::Accelerometer;
use steerbot::navigation::ins::{Ins, InsError, SCALE_FACTOR};

const TIMESTEP: f64 = 0.001;

// Plays back a fixed sample, with an optional dropout every `drop_every` reads
struct ScriptedAccel {
    sample: [i16; 3],
    drop_every: Option<usize>,
    reads: usize,
}

impl ScriptedAccel {
    fn steady(sample: [i16; 3]) -> Self {
        ScriptedAccel {
            sample,
            drop_every: None,
            reads: 0,
        }
    }
}

impl Accelerometer for ScriptedAccel {
    type Error = &'static str;

    fn is_data_ready(&mut self) -> Result<bool, Self::Error> {
        Ok(true)
    }

    fn read_xyz(&mut self) -> Result<[i16; 3], Self::Error> {
        self.reads += 1;
        match self.drop_every {
            Some(n) if self.reads % n == 0 => Err("dropout"),
            _ => Ok(self.sample),
        }
    }
}

struct NoDelay;

impl DelayMs<u32> for NoDelay {
    fn delay_ms(&mut self, _ms: u32) {}
}

#[test]
fn test_constant_acceleration_profile() {
    // 25 counts is 1 m/s^2 on x, nothing on the other axes
    let mut ins = Ins::new(ScriptedAccel::steady([25, 0, 250]));
    ins.calibrate(0.0, 0.0, 250.0 * SCALE_FACTOR);

    let steps = 2000;
    for _ in 0..steps {
        ins.update(TIMESTEP, &mut NoDelay).unwrap();
    }

    // explicit Euler: v_n = n a dt, d_n = a dt^2 n (n + 1) / 2
    let n = steps as f64;
    let a = 25.0 * SCALE_FACTOR;
    assert_relative_eq!(ins.velocity().x, n * a * TIMESTEP, max_relative = 1e-9);
    assert_relative_eq!(
        ins.distance().x,
        a * TIMESTEP * TIMESTEP * n * (n + 1.0) / 2.0,
        max_relative = 1e-9
    );
    assert_eq!(ins.velocity().y, 0.0);
    assert!(ins.distance().z.abs() < 1e-9);
}

#[test]
fn test_calibrated_car_at_rest_does_not_drift() {
    let mut ins = Ins::new(ScriptedAccel::steady([3, -7, 251]));
    ins.auto_calibrate(1000, &mut NoDelay).unwrap();

    for _ in 0..5000 {
        ins.update(TIMESTEP, &mut NoDelay).unwrap();
    }

    for axis in ins.distance().to_array() {
        assert!(axis.abs() < 1e-9, "drifted {}", axis);
    }
}

#[test]
fn test_calibration_error_drifts_quadratically() {
    // off by one count on x
    let mut ins = Ins::new(ScriptedAccel::steady([1, 0, 250]));
    ins.calibrate(0.0, 0.0, 250.0 * SCALE_FACTOR);

    let mut distance_at = Vec::new();
    for step in 1..=4000 {
        ins.update(TIMESTEP, &mut NoDelay).unwrap();
        if step % 1000 == 0 {
            distance_at.push(ins.distance().x);
        }
    }

    // doubling the time roughly quadruples the error
    let ratio = distance_at[3] / distance_at[1];
    assert_relative_eq!(ratio, 4.0, max_relative = 1e-3);
    assert!(distance_at.windows(2).all(|w| w[1] > w[0]));
}

#[test]
fn test_dropouts_are_skipped_not_integrated() {
    let mut accel = ScriptedAccel::steady([25, 0, 250]);
    accel.drop_every = Some(4);
    let mut ins = Ins::new(accel);
    ins.calibrate(0.0, 0.0, 250.0 * SCALE_FACTOR);

    let mut good = 0;
    for _ in 0..400 {
        match ins.update(TIMESTEP, &mut NoDelay) {
            Ok(()) => good += 1,
            Err(e) => assert_eq!(e, InsError::Sensor("dropout")),
        }
    }

    assert_eq!(good, 300);
    assert_relative_eq!(ins.velocity().x, good as f64 * TIMESTEP, max_relative = 1e-9);
}
