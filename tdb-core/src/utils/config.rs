//! Build-time calibration for the drivetrain.
//!
//! The constants describe the physical robot: wheel size, encoder resolution
//! and where the range sensor sits behind the leading edge. They are fixed at
//! build time through [`Calibration::DEFAULT`]; an owning process with its own
//! configuration may construct a different set with [`Calibration::new`].

use core::fmt;

use serde::{Deserialize, Serialize};

/// Drive wheel diameter (inches).
pub const WHEEL_DIAMETER_INCHES: f32 = 6.0;
/// Encoder pulses per full wheel revolution.
pub const PULSES_PER_REVOLUTION: u32 = 360;
/// Distance from the range sensor to the front of the robot (inches).
pub const RANGE_OFFSET_INCHES: f32 = 13.0;

/// Errors raised when building a non-default calibration.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum CalibrationError {
    /// Pulses per revolution must be greater than zero.
    NonPositivePulses,
    /// Wheel diameter must be finite and greater than zero.
    InvalidWheelDiameter(f32),
}

impl fmt::Display for CalibrationError {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        match self {
            CalibrationError::NonPositivePulses => {
                write!(f, "encoder pulses per revolution must be > 0")
            }
            CalibrationError::InvalidWheelDiameter(d) => {
                write!(f, "wheel diameter {} is not a positive length", d)
            }
        }
    }
}

/// Physical constants used by the drivetrain conversions.
///
/// Deserialization goes through [`Calibration::new`], so a loaded calibration
/// upholds the same invariants as a constructed one.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "CalibrationFields")]
pub struct Calibration {
    /// Wheel diameter (inches)
    wheel_diameter: f32,
    /// Encoder resolution (pulses per revolution), always > 0
    pulses_per_revolution: u32,
    /// Range sensor mounting offset (inches)
    range_offset: f32,
}

impl Calibration {
    /// Constants of the stock robot.
    pub const DEFAULT: Calibration = Calibration {
        wheel_diameter: WHEEL_DIAMETER_INCHES,
        pulses_per_revolution: PULSES_PER_REVOLUTION,
        range_offset: RANGE_OFFSET_INCHES,
    };

    /// Build a calibration, rejecting constants the conversions cannot divide by.
    pub fn new(
        wheel_diameter: f32,
        pulses_per_revolution: u32,
        range_offset: f32,
    ) -> Result<Self, CalibrationError> {
        if pulses_per_revolution == 0 {
            return Err(CalibrationError::NonPositivePulses);
        }
        if !wheel_diameter.is_finite() || wheel_diameter <= 0.0 {
            return Err(CalibrationError::InvalidWheelDiameter(wheel_diameter));
        }
        Ok(Self {
            wheel_diameter,
            pulses_per_revolution,
            range_offset,
        })
    }

    pub fn wheel_diameter(&self) -> f32 {
        self.wheel_diameter
    }

    pub fn pulses_per_revolution(&self) -> u32 {
        self.pulses_per_revolution
    }

    pub fn range_offset(&self) -> f32 {
        self.range_offset
    }
}

#[derive(Deserialize)]
struct CalibrationFields {
    wheel_diameter: f32,
    pulses_per_revolution: u32,
    range_offset: f32,
}

impl TryFrom<CalibrationFields> for Calibration {
    type Error = CalibrationError;

    fn try_from(raw: CalibrationFields) -> Result<Self, Self::Error> {
        Calibration::new(raw.wheel_diameter, raw.pulses_per_revolution, raw.range_offset)
    }
}

impl Default for Calibration {
    fn default() -> Self {
        Self::DEFAULT
    }
}
