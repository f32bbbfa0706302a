//! Utility re-exports and helper macros for the Tank-Drive Bot.
//!
//! - `config`: build-time calibration constants
//! - `controllers`: device capabilities, the drivetrain facade and command dispatch
//! - `math`: input shaping and drivetrain unit conversions
//!
//! The `mk_static!` macro simplifies static initialization in no-std contexts.

pub mod config;
pub mod controllers;
pub mod math;

pub use config::Calibration;
pub use controllers::{DriveController, DriveTrain};
pub use math::shaping::curve_input;

#[macro_export]
/// Initialize a no-std static cell and write the given value into it.
///
/// This macro creates a `static_cell::StaticCell` for type `$t` and initializes
/// it with `$val`, returning a mutable reference to the stored value.
macro_rules! mk_static {
    ($t:ty, $val:expr) => {{
        static STATIC_CELL: static_cell::StaticCell<$t> = static_cell::StaticCell::new();
        STATIC_CELL.uninit().write($val)
    }};
}
