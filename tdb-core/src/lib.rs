//! Drivetrain hardware-abstraction core for the Tank-Drive Bot on no-std embedded platforms.
//!
//! Every drive device is optional: missing sensors read as [`UNAVAILABLE`] and
//! missing actuators turn drive commands into silent no-ops.
#![no_std]

pub mod utils;

pub use utils::controllers::devices::UNAVAILABLE;

// std-backed critical section for the static channels under test
#[cfg(test)]
use critical_section as _;
