//! Drive command dispatch for the Tank-Drive Bot.
//!
//! Commands arrive over `DRIVE_CHANNEL` as [`DriveCommand`]s and are executed
//! against a [`DriveTrain`]. A `read` command produces a [`Telemetry`]
//! snapshot, which the dispatch loop forwards on `TELEMETRY_CHANNEL`.

use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use serde::{Deserialize, Serialize};

use super::drivetrain::DriveTrain;

/// Channel used to receive drive commands (`DriveCommand` messages).
pub static DRIVE_CHANNEL: embassy_sync::channel::Channel<
    CriticalSectionRawMutex,
    DriveCommand,
    16,
> = embassy_sync::channel::Channel::new();

/// Channel carrying the telemetry produced by `read` commands.
pub static TELEMETRY_CHANNEL: embassy_sync::channel::Channel<
    CriticalSectionRawMutex,
    Telemetry,
    4,
> = embassy_sync::channel::Channel::new();

/// Drive command variants.
///
/// Serialized as JSON with tag `"dc"`.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq)]
#[serde(tag = "dc", rename_all = "snake_case")]
pub enum DriveCommand {
    /// Tank drive with independent left/right powers.
    T { l: f32, r: f32 },
    /// Arcade drive with forward speed and rotation.
    A { s: f32, r: f32 },
    /// Zero power on both sides.
    Stop,
    /// Zero both wheel encoders.
    ResetEncoders,
    /// Zero the heading reference.
    ResetCompass,
    /// Snapshot every sensor.
    Read,
}

/// One reading of every drive sensor.
///
/// Missing devices show up as their sentinel-derived values (`-1.0` for raw
/// reads, a negative distance for the converted encoder values).
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq)]
pub struct Telemetry {
    pub rotation: f32,
    pub left_encoder: f32,
    pub right_encoder: f32,
    pub left_inches: f32,
    pub right_inches: f32,
    pub sonic_distance: f32,
}

impl DriveTrain<'_> {
    /// Execute a [`DriveCommand`].
    ///
    /// Returns sensor data for `Read` or `None` for every other command.
    pub fn execute(
        &self,
        command: DriveCommand,
    ) -> Option<Telemetry> {
        match command {
            DriveCommand::T { l, r } => self.drive(l, r),
            DriveCommand::A { s, r } => self.arcade_drive(s, r),
            DriveCommand::Stop => self.stop(),
            DriveCommand::ResetEncoders => self.reset_encoders(),
            DriveCommand::ResetCompass => self.reset_compass(),
            DriveCommand::Read => return Some(self.telemetry()),
        }
        None
    }

    /// Read every sensor once.
    pub fn telemetry(&self) -> Telemetry {
        Telemetry {
            rotation: self.rotation(),
            left_encoder: self.left_encoder(),
            right_encoder: self.right_encoder(),
            left_inches: self.left_encoder_inches(),
            right_inches: self.right_encoder_inches(),
            sonic_distance: self.sonic_distance(),
        }
    }
}
