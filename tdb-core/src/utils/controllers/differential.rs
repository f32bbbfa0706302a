//! Differential (tank-style) actuation unit.
//!
//! Pairs a left and a right [`PowerChannel`] and exposes tank and arcade
//! inputs. Writes are fire-and-forget: a failing channel is logged and the
//! other side is still driven.

use super::devices::{DeviceError, Handle, PowerChannel};
use crate::utils::math::kinematics;

/// Two power channels driving the sides of a tank-style mechanism.
pub struct DifferentialDrive<'a> {
    left: Handle<'a, dyn PowerChannel + 'a>,
    right: Handle<'a, dyn PowerChannel + 'a>,
}

impl<'a> DifferentialDrive<'a> {
    /// Compose a drive from both channels. A one-sided drive cannot be built.
    pub fn new(
        left: Handle<'a, dyn PowerChannel + 'a>,
        right: Handle<'a, dyn PowerChannel + 'a>,
    ) -> Self {
        Self { left, right }
    }

    /// Send each side its own power, unmodified.
    pub fn tank_drive(
        &self,
        left_power: f32,
        right_power: f32,
    ) {
        self.apply(left_power, right_power);
    }

    /// Mix a forward speed and a rotation into side powers and send them.
    pub fn arcade_drive(
        &self,
        speed: f32,
        rotation: f32,
    ) {
        let (left, right) = kinematics::arcade_mix(speed, rotation);
        self.apply(left, right);
    }

    /// Command zero power on both sides.
    pub fn stop_motor(&self) {
        self.apply(0.0, 0.0);
    }

    fn apply(
        &self,
        left_power: f32,
        right_power: f32,
    ) {
        if let Err(e) = set_channel(self.left, left_power) {
            tracing::warn!(side = "left", power = left_power, "drive write failed: {}", e);
        }
        if let Err(e) = set_channel(self.right, right_power) {
            tracing::warn!(side = "right", power = right_power, "drive write failed: {}", e);
        }
    }
}

fn set_channel(
    channel: Handle<'_, dyn PowerChannel + '_>,
    power: f32,
) -> Result<(), DeviceError> {
    channel
        .try_borrow_mut()
        .map_err(|_| DeviceError::Busy)?
        .set(power)
}
