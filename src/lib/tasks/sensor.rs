use core::fmt::Debug;

use embedded_hal::blocking::delay::DelayMs;
use rtic_core::Mutex;

use crate::drivers::accel::accelerometer::Accelerometer;
use crate::navigation::ins::Ins;
use crate::tasks::schedule::{
    CALIBRATION_SAMPLES, SENSOR_LOG_INTERVAL, SENSOR_PERIOD_MS, SENSOR_TIMESTEP_S,
};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Phase {
    Calibrating,
    Integrating,
    Stopped,
}

/// Calibrates the INS once, then integrates one sample per step.
pub struct SensorTask {
    phase: Phase,
    calibration_samples: u32,
    timestep: f64,
    updates: u32,
}

impl Default for SensorTask {
    fn default() -> Self {
        Self::new()
    }
}

impl SensorTask {
    pub fn new() -> Self {
        Self::with_settings(CALIBRATION_SAMPLES, SENSOR_TIMESTEP_S)
    }

    pub fn with_settings(calibration_samples: u32, timestep: f64) -> Self {
        Self {
            phase: Phase::Calibrating,
            calibration_samples,
            timestep,
            updates: 0,
        }
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    // successful integration steps so far
    pub fn updates(&self) -> u32 {
        self.updates
    }

    /// Run one step. Returns the ms to wait before the next step, or None once
    /// the task has stopped for good.
    pub fn step<M, A, D>(&mut self, ins: &mut M, delay: &mut D) -> Option<u32>
    where
        M: Mutex<T = Ins<A>>,
        A: Accelerometer,
        A::Error: Debug,
        D: DelayMs<u32>,
    {
        match self.phase {
            Phase::Calibrating => {
                let samples = self.calibration_samples;
                let result = ins.lock(|ins| {
                    ins.auto_calibrate(samples, delay)
                        .map(|_| ins.calibration())
                });
                match result {
                    Ok(calibration) => {
                        log::info!(
                            "calibrated: x = {}, y = {}, z = {}",
                            calibration.x,
                            calibration.y,
                            calibration.z
                        );
                        self.phase = Phase::Integrating;
                        Some(SENSOR_PERIOD_MS)
                    }
                    Err(e) => {
                        log::error!("auto-calibration failed ({:?}), stopping sensor task", e);
                        self.phase = Phase::Stopped;
                        None
                    }
                }
            }
            Phase::Integrating => {
                let timestep = self.timestep;
                let result = ins.lock(|ins| {
                    ins.update(timestep, delay)
                        .map(|_| ins.acceleration())
                });
                match result {
                    Ok(acceleration) => {
                        self.updates = self.updates.wrapping_add(1);
                        if self.updates % SENSOR_LOG_INTERVAL == 0 {
                            log::info!(
                                "acceleration: x = {}, y = {}, z = {}",
                                acceleration.x,
                                acceleration.y,
                                acceleration.z
                            );
                        }
                        Some(SENSOR_PERIOD_MS)
                    }
                    Err(e) => {
                        // try again right away
                        log::warn!("skipped sensor read: {:?}", e);
                        Some(0)
                    }
                }
            }
            Phase::Stopped => None,
        }
    }
}
