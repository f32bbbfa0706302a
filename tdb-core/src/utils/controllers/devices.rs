//! Device capabilities consumed by the drivetrain.
//!
//! Each physical device (motor controller channel, wheel encoder, heading
//! sensor, range sensor) is reached through one small trait. The drivetrain
//! only borrows devices: they are handed in as [`Handle`]s to `RefCell`s owned
//! by the caller, and any of them may be missing.

use core::{cell::RefCell, fmt};

/// Reading returned by every accessor whose device is missing.
///
/// Physical readings for these quantities are non-negative in normal
/// operation, so any negative value means "no data". The value still flows
/// through arithmetic (see `left_encoder_inches`); nothing downstream turns it
/// back into a valid measurement.
pub const UNAVAILABLE: f32 = -1.0;

/// Non-owning handle to a caller-owned device.
pub type Handle<'a, T> = &'a RefCell<T>;

/// Errors a device adapter can report while being driven.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeviceError {
    /// The PWM expander rejected the write or the bus failed.
    Pwm,
    /// The device handle is already borrowed elsewhere.
    Busy,
}

impl fmt::Display for DeviceError {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        match self {
            DeviceError::Pwm => write!(f, "PWM write failed"),
            DeviceError::Busy => write!(f, "device handle busy"),
        }
    }
}

/// One side of the drive: accepts a normalized power, nominally in `[-1.0, 1.0]`.
pub trait PowerChannel {
    fn set(
        &mut self,
        power: f32,
    ) -> Result<(), DeviceError>;
}

/// Wheel encoder reporting a cumulative pulse count.
pub trait PositionSensor {
    fn count(&mut self) -> i32;
    fn reset(&mut self);
}

/// Inertial sensor reporting cumulative rotation about the vertical axis (degrees).
pub trait HeadingSensor {
    fn angle(&mut self) -> f32;
    /// Make the current orientation the zero reference.
    fn reset(&mut self);
}

/// Forward-facing ranging sensor reporting raw distance from its housing (inches).
pub trait RangeSensor {
    fn range(&mut self) -> f32;
}

/// Read from an optional device, falling back to [`UNAVAILABLE`].
///
/// A device whose `RefCell` is already borrowed is treated like a missing one.
pub(crate) fn read_or_unavailable<T: ?Sized>(
    device: Option<Handle<'_, T>>,
    name: &str,
    read: impl FnOnce(&mut T) -> f32,
) -> f32 {
    let Some(cell) = device else {
        return UNAVAILABLE;
    };
    match cell.try_borrow_mut() {
        Ok(mut dev) => read(&mut *dev),
        Err(_) => {
            tracing::warn!(device = name, "device busy, reporting unavailable");
            UNAVAILABLE
        }
    }
}

/// Run a side effect on an optional device; missing or busy devices are skipped.
pub(crate) fn with_device<T: ?Sized>(
    device: Option<Handle<'_, T>>,
    name: &str,
    op: impl FnOnce(&mut T),
) {
    if let Some(cell) = device {
        match cell.try_borrow_mut() {
            Ok(mut dev) => op(&mut *dev),
            Err(_) => tracing::warn!(device = name, "device busy, skipping"),
        }
    }
}
