//! Drivetrain conversions for a differential (tank-style) robot.
//!
//! Encoder pulses are turned into inches traveled:
//!
//! ```text
//!                  1 revolution     pi * wheel diameter
//! encoder pulses * ------------ * -------------------- = inches traveled
//!                   # pulses          1 revolution
//! ```
//!
//! and arcade commands (speed + rotation) are mixed into left/right powers.
//!
//! # Example
//! ```rust
//! use tdb_core::utils::{math::kinematics, Calibration};
//! let inches = kinematics::pulses_to_distance(360.0, &Calibration::DEFAULT);
//! assert!((inches - core::f32::consts::PI * 6.0).abs() < 1e-4);
//! ```
use core::f32::consts::PI;

use crate::utils::config::Calibration;

/// Convert a raw encoder count into distance traveled, in wheel-diameter units.
///
/// The count is used as-is. An unavailable encoder's `-1.0` therefore comes
/// out as a small negative distance, not as zero and not as the sentinel.
pub fn pulses_to_distance(
    count: f32,
    calibration: &Calibration,
) -> f32 {
    count
        * (1.0 / calibration.pulses_per_revolution() as f32)
        * (PI * calibration.wheel_diameter())
}

/// Mix a forward speed and a rotation into `(left, right)` channel powers.
///
/// The larger of the two magnitudes drives the outer side and the other side
/// receives the difference, so a full-speed turn never exceeds the larger
/// input. Nothing is clamped.
pub fn arcade_mix(
    speed: f32,
    rotation: f32,
) -> (f32, f32) {
    let max_input = libm::copysignf(
        libm::fmaxf(libm::fabsf(speed), libm::fabsf(rotation)),
        speed,
    );

    if speed >= 0.0 {
        if rotation >= 0.0 {
            (max_input, speed - rotation)
        } else {
            (speed + rotation, max_input)
        }
    } else if rotation >= 0.0 {
        (speed + rotation, max_input)
    } else {
        (max_input, speed - rotation)
    }
}
