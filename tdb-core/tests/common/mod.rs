//! Simulated drive devices shared by the integration tests.
#![allow(dead_code)]

// std-backed critical section for the static channels
use critical_section as _;

use tdb_core::utils::controllers::{
    DeviceError, HeadingSensor, PositionSensor, PowerChannel, RangeSensor,
};

/// Power channel that records every value it is sent.
#[derive(Debug, Default)]
pub struct RecordingMotor {
    pub powers: Vec<f32>,
}

impl RecordingMotor {
    pub fn last(&self) -> Option<f32> {
        self.powers.last().copied()
    }
}

impl PowerChannel for RecordingMotor {
    fn set(
        &mut self,
        power: f32,
    ) -> Result<(), DeviceError> {
        self.powers.push(power);
        Ok(())
    }
}

/// Power channel whose bus always fails.
#[derive(Debug, Default)]
pub struct FailingMotor {
    pub attempts: u32,
}

impl PowerChannel for FailingMotor {
    fn set(
        &mut self,
        _power: f32,
    ) -> Result<(), DeviceError> {
        self.attempts += 1;
        Err(DeviceError::Pwm)
    }
}

#[derive(Debug, Default)]
pub struct MockEncoder {
    pub count: i32,
    pub resets: u32,
}

impl MockEncoder {
    pub fn at(count: i32) -> Self {
        MockEncoder { count, resets: 0 }
    }
}

impl PositionSensor for MockEncoder {
    fn count(&mut self) -> i32 {
        self.count
    }

    fn reset(&mut self) {
        self.count = 0;
        self.resets += 1;
    }
}

#[derive(Debug, Default)]
pub struct MockGyro {
    pub angle: f32,
    pub resets: u32,
}

impl MockGyro {
    pub fn at(angle: f32) -> Self {
        MockGyro { angle, resets: 0 }
    }
}

impl HeadingSensor for MockGyro {
    fn angle(&mut self) -> f32 {
        self.angle
    }

    fn reset(&mut self) {
        self.angle = 0.0;
        self.resets += 1;
    }
}

#[derive(Debug)]
pub struct MockSonar(pub f32);

impl RangeSensor for MockSonar {
    fn range(&mut self) -> f32 {
        self.0
    }
}

pub fn close(
    a: f32,
    b: f32,
) -> bool {
    (a - b).abs() < 1e-4
}
