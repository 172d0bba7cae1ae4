#![no_std]

pub mod drivers {
    pub mod pwm {
        pub mod pwm_core;
    }
    pub mod motor {
        pub mod pwm_motor;
    }
    pub mod accel {
        pub mod accelerometer;
        pub mod adxl345;
        pub mod adxl345_constants;
    }
}

pub mod controller {
    pub mod direction;
    pub mod error;
    pub mod vehicle;
}

pub mod navigation {
    pub mod ins;
    pub mod vector;
}

pub mod tasks {
    pub mod maneuver;
    pub mod schedule;
    pub mod sensor;
    pub mod stabilizer;
}

#[cfg(test)]
pub(crate) mod test_util;
