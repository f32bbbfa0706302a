//! Module Exports
//!
//! This file exports the drive controllers of the Tank-Drive Bot.
//!
//! - `devices`: capability traits for motors, encoders, heading and range sensors.
//! - `drivetrain`: the degradation-tolerant drivetrain facade.
//! - `differential`: the two-channel actuation unit behind the facade.
//! - `commands`: serializable drive commands and their dispatch channels.
//! - `pwm`: PCA9685 H-bridge power channel.

pub mod commands;
pub mod devices;
pub mod differential;
pub mod drivetrain;
pub mod pwm;

pub use commands::{DriveCommand, Telemetry, DRIVE_CHANNEL, TELEMETRY_CHANNEL};
pub use devices::{
    DeviceError, Handle, HeadingSensor, PositionSensor, PowerChannel, RangeSensor, UNAVAILABLE,
};
pub use differential::DifferentialDrive;
pub use drivetrain::{DeviceAvailability, DriveTrain, DriveTrainBuilder};
pub use pwm::PwmChannel;

/// Owns a drivetrain and feeds it from `DRIVE_CHANNEL`.
pub struct DriveController<'a> {
    pub drivetrain: DriveTrain<'a>,
}

impl<'a> DriveController<'a> {
    pub fn new(drivetrain: DriveTrain<'a>) -> Self {
        tracing::info!(availability = ?drivetrain.availability(), "drive controller ready");
        DriveController { drivetrain }
    }

    /// Receive and execute drive commands forever.
    ///
    /// Telemetry from `read` commands is forwarded on `TELEMETRY_CHANNEL`.
    /// A full telemetry channel drops the snapshot so later commands still run.
    pub async fn drive_ch(&mut self) -> ! {
        loop {
            let command = DRIVE_CHANNEL.receiver().receive().await;
            tracing::info!("Received Drive Command: {:?}", command);
            if let Some(telemetry) = self.drivetrain.execute(command) {
                tracing::info!(?telemetry, "Telemetry Read");
                if TELEMETRY_CHANNEL.try_send(telemetry).is_err() {
                    tracing::warn!("telemetry channel full, dropping snapshot");
                }
            }
        }
    }
}
