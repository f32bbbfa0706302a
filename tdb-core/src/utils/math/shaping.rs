//! Input shaping for drive commands.
//!
//! Every raw command component is passed through a sign-preserving cube-root
//! curve before it reaches the actuators. The curve is steep near zero, which
//! expands the low-speed range of a joystick, and maps `±1.0` back onto `±1.0`
//! so full power stays reachable.
//!
//! # Example
//! ```rust
//! use tdb_core::utils::math::shaping::curve_input;
//! assert_eq!(curve_input(1.0), 1.0);
//! assert!((curve_input(-0.125) + 0.5).abs() < 1e-6);
//! ```

/// Apply the cube-root curve `sign(x) * |x|^(1/3)` to a single channel.
///
/// The input is neither clamped nor validated: `8.0` shapes to `2.0`, and
/// non-finite values come out as the curve produces them. A negative zero stays
/// negative zero.
#[inline]
pub fn curve_input(input: f32) -> f32 {
    libm::copysignf(libm::cbrtf(libm::fabsf(input)), input)
}
