//! Drivetrain facade for the Tank-Drive Bot.
//!
//! [`DriveTrain`] composes up to six borrowed devices (two power channels, two
//! wheel encoders, a heading sensor and a range sensor) behind one API that
//! never faults on missing hardware:
//!
//! - sensor reads of a missing device return [`UNAVAILABLE`](crate::UNAVAILABLE) (`-1.0`),
//! - resets of a missing device are skipped,
//! - drive commands are dropped unless *both* power channels are present.
//!
//! Every drive input is shaped by [`curve_input`] before it reaches the
//! actuation unit.
//!
//! # Example
//! ```rust
//! use core::cell::RefCell;
//! use tdb_core::utils::controllers::{DriveTrain, HeadingSensor};
//!
//! struct Gyro(f32);
//! impl HeadingSensor for Gyro {
//!     fn angle(&mut self) -> f32 { self.0 }
//!     fn reset(&mut self) { self.0 = 0.0 }
//! }
//!
//! let gyro = RefCell::new(Gyro(45.0));
//! let drivetrain = DriveTrain::builder().heading(&gyro).build();
//! assert_eq!(drivetrain.rotation(), 45.0);
//! assert_eq!(drivetrain.left_encoder(), -1.0);
//! drivetrain.drive(0.5, 0.5); // no motors: silently ignored
//! ```

use serde::Serialize;

use super::{
    devices::{
        read_or_unavailable, with_device, Handle, HeadingSensor, PositionSensor, PowerChannel,
        RangeSensor,
    },
    differential::DifferentialDrive,
};
use crate::utils::{
    config::Calibration,
    math::{kinematics, shaping::curve_input},
};

type Channel<'a> = Option<Handle<'a, dyn PowerChannel + 'a>>;
type Encoder<'a> = Option<Handle<'a, dyn PositionSensor + 'a>>;
type Heading<'a> = Option<Handle<'a, dyn HeadingSensor + 'a>>;
type Range<'a> = Option<Handle<'a, dyn RangeSensor + 'a>>;

/// Which devices a drivetrain was constructed with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DeviceAvailability {
    pub actuation: bool,
    pub left_encoder: bool,
    pub right_encoder: bool,
    pub heading: bool,
    pub range: bool,
}

/// Drive-related devices behind a single, degradation-tolerant API.
///
/// Devices are borrowed, never owned: dropping the drivetrain leaves them
/// exactly as they were.
pub struct DriveTrain<'a> {
    drive: Option<DifferentialDrive<'a>>,
    left_encoder: Encoder<'a>,
    right_encoder: Encoder<'a>,
    range: Range<'a>,
    heading: Heading<'a>,
    calibration: Calibration,
}

impl<'a> DriveTrain<'a> {
    /// Create a drivetrain from optional device handles.
    ///
    /// Actuation is only enabled when both `left_motor` and `right_motor` are
    /// present; with either missing, all drive commands become no-ops.
    pub fn new(
        left_motor: Channel<'a>,
        right_motor: Channel<'a>,
        left_encoder: Encoder<'a>,
        right_encoder: Encoder<'a>,
        range: Range<'a>,
        heading: Heading<'a>,
    ) -> Self {
        let drive = match (left_motor, right_motor) {
            (Some(left), Some(right)) => Some(DifferentialDrive::new(left, right)),
            (left, right) => {
                tracing::debug!(
                    left_present = left.is_some(),
                    right_present = right.is_some(),
                    "actuation disabled"
                );
                None
            }
        };

        let drivetrain = DriveTrain {
            drive,
            left_encoder,
            right_encoder,
            range,
            heading,
            calibration: Calibration::DEFAULT,
        };
        tracing::debug!(availability = ?drivetrain.availability(), "drivetrain constructed");
        drivetrain
    }

    /// Start a builder with every device absent.
    pub fn builder() -> DriveTrainBuilder<'a> {
        DriveTrainBuilder::default()
    }

    /// Replace the build-time calibration constants.
    pub fn with_calibration(
        mut self,
        calibration: Calibration,
    ) -> Self {
        self.calibration = calibration;
        self
    }

    pub fn calibration(&self) -> &Calibration {
        &self.calibration
    }

    /// `true` when both power channels were supplied.
    pub fn has_actuation(&self) -> bool {
        self.drive.is_some()
    }

    pub fn availability(&self) -> DeviceAvailability {
        DeviceAvailability {
            actuation: self.drive.is_some(),
            left_encoder: self.left_encoder.is_some(),
            right_encoder: self.right_encoder.is_some(),
            heading: self.heading.is_some(),
            range: self.range.is_some(),
        }
    }

    /// Cumulative heading in degrees, or [`crate::UNAVAILABLE`].
    pub fn rotation(&self) -> f32 {
        read_or_unavailable(self.heading, "heading", |imu| imu.angle())
    }

    /// Raw left encoder count, or [`crate::UNAVAILABLE`].
    pub fn left_encoder(&self) -> f32 {
        read_or_unavailable(self.left_encoder, "left_encoder", |enc| enc.count() as f32)
    }

    /// Raw right encoder count, or [`crate::UNAVAILABLE`].
    pub fn right_encoder(&self) -> f32 {
        read_or_unavailable(self.right_encoder, "right_encoder", |enc| {
            enc.count() as f32
        })
    }

    /// Left wheel travel in inches.
    ///
    /// Negative (non-physical) when the left encoder is missing.
    pub fn left_encoder_inches(&self) -> f32 {
        kinematics::pulses_to_distance(self.left_encoder(), &self.calibration)
    }

    /// Right wheel travel in inches.
    ///
    /// Negative (non-physical) when the right encoder is missing.
    pub fn right_encoder_inches(&self) -> f32 {
        kinematics::pulses_to_distance(self.right_encoder(), &self.calibration)
    }

    /// Zero whichever encoders are present.
    pub fn reset_encoders(&self) {
        with_device(self.left_encoder, "left_encoder", |enc| enc.reset());
        with_device(self.right_encoder, "right_encoder", |enc| enc.reset());
    }

    /// Tank drive: shape each side independently and send the pair.
    pub fn drive(
        &self,
        left_power: f32,
        right_power: f32,
    ) {
        if let Some(drive) = &self.drive {
            drive.tank_drive(curve_input(left_power), curve_input(right_power));
        }
    }

    /// Arcade drive: shape speed and rotation independently, then mix.
    pub fn arcade_drive(
        &self,
        speed: f32,
        rotation: f32,
    ) {
        if let Some(drive) = &self.drive {
            drive.arcade_drive(curve_input(speed), curve_input(rotation));
        }
    }

    /// Command zero power on both sides.
    pub fn stop(&self) {
        if let Some(drive) = &self.drive {
            drive.stop_motor();
        }
    }

    /// Make the current heading the zero reference, if a heading sensor is present.
    pub fn reset_compass(&self) {
        with_device(self.heading, "heading", |imu| imu.reset());
    }

    /// Obstacle distance from the front of the robot, in inches.
    ///
    /// The mounting offset is subtracted from the raw reading without clamping,
    /// so obstacles closer than the offset come back negative. With no range
    /// sensor this is [`crate::UNAVAILABLE`], offset not applied.
    pub fn sonic_distance(&self) -> f32 {
        let offset = self.calibration.range_offset();
        read_or_unavailable(self.range, "range", |sonic| sonic.range() - offset)
    }
}

/// Step-by-step construction of a [`DriveTrain`].
///
/// Setters take any concrete device type and erase it to its capability.
#[derive(Default)]
pub struct DriveTrainBuilder<'a> {
    left_motor: Channel<'a>,
    right_motor: Channel<'a>,
    left_encoder: Encoder<'a>,
    right_encoder: Encoder<'a>,
    range: Range<'a>,
    heading: Heading<'a>,
    calibration: Option<Calibration>,
}

impl<'a> DriveTrainBuilder<'a> {
    pub fn left_motor<M: PowerChannel + 'a>(
        mut self,
        motor: Handle<'a, M>,
    ) -> Self {
        let motor: Handle<'a, dyn PowerChannel + 'a> = motor;
        self.left_motor = Some(motor);
        self
    }

    pub fn right_motor<M: PowerChannel + 'a>(
        mut self,
        motor: Handle<'a, M>,
    ) -> Self {
        let motor: Handle<'a, dyn PowerChannel + 'a> = motor;
        self.right_motor = Some(motor);
        self
    }

    pub fn left_encoder<E: PositionSensor + 'a>(
        mut self,
        encoder: Handle<'a, E>,
    ) -> Self {
        let encoder: Handle<'a, dyn PositionSensor + 'a> = encoder;
        self.left_encoder = Some(encoder);
        self
    }

    pub fn right_encoder<E: PositionSensor + 'a>(
        mut self,
        encoder: Handle<'a, E>,
    ) -> Self {
        let encoder: Handle<'a, dyn PositionSensor + 'a> = encoder;
        self.right_encoder = Some(encoder);
        self
    }

    pub fn heading<H: HeadingSensor + 'a>(
        mut self,
        imu: Handle<'a, H>,
    ) -> Self {
        let imu: Handle<'a, dyn HeadingSensor + 'a> = imu;
        self.heading = Some(imu);
        self
    }

    pub fn range<S: RangeSensor + 'a>(
        mut self,
        sonic: Handle<'a, S>,
    ) -> Self {
        let sonic: Handle<'a, dyn RangeSensor + 'a> = sonic;
        self.range = Some(sonic);
        self
    }

    pub fn calibration(
        mut self,
        calibration: Calibration,
    ) -> Self {
        self.calibration = Some(calibration);
        self
    }

    pub fn build(self) -> DriveTrain<'a> {
        let drivetrain = DriveTrain::new(
            self.left_motor,
            self.right_motor,
            self.left_encoder,
            self.right_encoder,
            self.range,
            self.heading,
        );
        match self.calibration {
            Some(calibration) => drivetrain.with_calibration(calibration),
            None => drivetrain,
        }
    }
}
