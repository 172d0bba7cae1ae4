use embedded_hal::blocking::delay::DelayMs;

use crate::drivers::accel::accelerometer::Accelerometer;
use crate::navigation::vector::{
    AccelerationVector, CalibrationVector, DistanceVector, VelocityVector,
};

// m/s^2 per sensor count
pub const SCALE_FACTOR: f64 = 0.04;
// data-ready polls before a read is given up
pub const READ_TRIES: u32 = 1000;
// ms between data-ready polls, and between calibration samples
pub const DATA_WAIT_MS: u32 = 1;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct InsConfig {
    pub scale_factor: f64,
    pub read_tries: u32,
    pub data_wait_ms: u32,
}

impl Default for InsConfig {
    fn default() -> Self {
        Self {
            scale_factor: SCALE_FACTOR,
            read_tries: READ_TRIES,
            data_wait_ms: DATA_WAIT_MS,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum InsError<E> {
    // no sample became ready within the configured number of tries
    Timeout,
    Sensor(E),
    // auto-calibration asked for zero samples
    NoSamples,
}

/// Inertial navigation by dead reckoning.
///
/// Integrates acceleration into velocity and distance with explicit Euler
/// steps. Nothing corrects the estimate, so drift grows without bound.
pub struct Ins<A> {
    sensor: A,
    config: InsConfig,
    calibration: CalibrationVector,
    acceleration: AccelerationVector,
    velocity: VelocityVector,
    distance: DistanceVector,
}

impl<A> Ins<A>
where
    A: Accelerometer,
{
    /// Binds an already initialized sensor, all vectors start at zero.
    pub fn new(sensor: A) -> Self {
        Self::with_config(sensor, InsConfig::default())
    }

    pub fn with_config(sensor: A, config: InsConfig) -> Self {
        Self {
            sensor,
            config,
            calibration: CalibrationVector::zero(),
            acceleration: AccelerationVector::zero(),
            velocity: VelocityVector::zero(),
            distance: DistanceVector::zero(),
        }
    }

    pub fn calibrate(&mut self, x: f64, y: f64, z: f64) {
        self.calibration = CalibrationVector::new(x, y, z);
    }

    /// Average `samples` readings into the calibration offset.
    ///
    /// The vehicle has to stand still while this runs, velocity is reset to
    /// zero on success. Any failed sample aborts the whole run and leaves the
    /// previous calibration in place.
    pub fn auto_calibrate<D>(&mut self, samples: u32, delay: &mut D) -> Result<(), InsError<A::Error>>
    where
        D: DelayMs<u32>,
    {
        if samples == 0 {
            return Err(InsError::NoSamples);
        }

        let mut sum = [0.0f64; 3];
        for _ in 0..samples {
            self.wait_for_data(delay)?;
            let raw = self.sensor.read_xyz().map_err(InsError::Sensor)?;
            for (acc, value) in sum.iter_mut().zip(raw) {
                *acc += f64::from(value);
            }
            delay.delay_ms(self.config.data_wait_ms);
        }

        let n = f64::from(samples);
        let scale = self.config.scale_factor;
        self.calibration =
            CalibrationVector::new(sum[0] / n * scale, sum[1] / n * scale, sum[2] / n * scale);
        self.velocity = VelocityVector::zero();
        Ok(())
    }

    /// Poll until the sensor has a sample, sleeping between polls.
    pub fn wait_for_data<D>(&mut self, delay: &mut D) -> Result<(), InsError<A::Error>>
    where
        D: DelayMs<u32>,
    {
        let mut tries = 0;
        while !self.sensor.is_data_ready().map_err(InsError::Sensor)? {
            if tries >= self.config.read_tries {
                return Err(InsError::Timeout);
            }
            tries += 1;
            delay.delay_ms(self.config.data_wait_ms);
        }
        Ok(())
    }

    /// One integration step of `timestep` seconds.
    ///
    /// State is only touched once a sample was read.
    pub fn update<D>(&mut self, timestep: f64, delay: &mut D) -> Result<(), InsError<A::Error>>
    where
        D: DelayMs<u32>,
    {
        if !self.is_calibrated() {
            log::warn!("accelerometer has probably not been calibrated");
        }

        self.wait_for_data(delay)?;
        let raw = self.sensor.read_xyz().map_err(InsError::Sensor)?;

        let acceleration =
            AccelerationVector::from_raw(raw, self.config.scale_factor) - self.calibration;
        let velocity = self.velocity + acceleration * timestep;
        let distance = self.distance + velocity * timestep;

        self.acceleration = acceleration;
        self.velocity = velocity;
        self.distance = distance;
        Ok(())
    }

    // a zero z offset is taken to mean "never calibrated"; gravity keeps it
    // non-zero on a level vehicle
    pub fn is_calibrated(&self) -> bool {
        self.calibration.z != 0.0
    }

    pub fn calibration(&self) -> CalibrationVector {
        self.calibration
    }

    pub fn acceleration(&self) -> AccelerationVector {
        self.acceleration
    }

    pub fn velocity(&self) -> VelocityVector {
        self.velocity
    }

    pub fn distance(&self) -> DistanceVector {
        self.distance
    }

    pub fn config(&self) -> InsConfig {
        self.config
    }

    pub fn sensor_mut(&mut self) -> &mut A {
        &mut self.sensor
    }
}
