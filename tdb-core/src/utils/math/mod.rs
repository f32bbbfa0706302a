//! Math utilities for the Tank-Drive Bot.
//!
//! - `shaping`: the cube-root input curve applied to every drive command
//! - `kinematics`: encoder distance conversion and arcade mixing

pub mod kinematics;
pub mod shaping;
