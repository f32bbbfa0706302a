//! PCA9685-backed power channel for the Tank-Drive Bot.
//!
//! Each drive side is an H-bridge in phase/enable mode wired to two PCA9685
//! outputs: the phase output selects direction, the enable output carries the
//! duty cycle. Both sides can share one expander through `RefCellDevice`.

use embedded_hal::i2c::I2c;
use embedded_hal_bus::i2c::RefCellDevice;
use pwm_pca9685::{Address as PwmAddress, Channel, Pca9685};

use super::devices::{DeviceError, PowerChannel};

/// Full-scale value of the 12-bit PCA9685 duty register.
pub const MAX_DUTY: u16 = 4095;

/// Default I2C address of the motor PWM expander.
pub const PWM_ADDRESS: u8 = 0x55;

/// One drive side on a PCA9685 phase/enable pair.
pub struct PwmChannel<'a, I2C: 'static> {
    pwm: Pca9685<RefCellDevice<'a, I2C>>,
    phase: Channel,
    enable: Channel,
}

impl<'a, I2C, E> PwmChannel<'a, I2C>
where
    I2C: I2c<Error = E> + 'static,
    E: core::fmt::Debug,
{
    /// Wrap a driver that is already initialized.
    pub fn new(
        pwm: Pca9685<RefCellDevice<'a, I2C>>,
        phase: Channel,
        enable: Channel,
    ) -> Self {
        PwmChannel { pwm, phase, enable }
    }

    /// Create a driver for the expander at `address` on a shared bus.
    pub fn on_bus(
        i2c_bus: &'a core::cell::RefCell<I2C>,
        address: u8,
        phase: Channel,
        enable: Channel,
    ) -> Result<Self, DeviceError> {
        let pwm = Pca9685::new(RefCellDevice::new(i2c_bus), PwmAddress::from(address))
            .map_err(|e| {
                tracing::error!("PCA9685 init failed: {:?}", e);
                DeviceError::Pwm
            })?;
        Ok(Self::new(pwm, phase, enable))
    }

    /// Enable the expander and set its prescale.
    pub fn configure(
        &mut self,
        prescale: u8,
    ) -> Result<(), DeviceError> {
        self.pwm.enable().map_err(pwm_error)?;
        self.pwm.set_prescale(prescale).map_err(pwm_error)?;
        tracing::info!(prescale, "PWM enabled");
        Ok(())
    }
}

impl<I2C, E> PowerChannel for PwmChannel<'_, I2C>
where
    I2C: I2c<Error = E> + 'static,
    E: core::fmt::Debug,
{
    /// Phase is full-off for forward and full duty for reverse. The enable duty
    /// is `|power|` scaled onto the 12-bit register, which saturates at 1.0.
    fn set(
        &mut self,
        power: f32,
    ) -> Result<(), DeviceError> {
        // NaN drives nothing.
        let magnitude = if power.is_nan() {
            0.0
        } else {
            libm::fminf(libm::fabsf(power), 1.0)
        };
        let duty = (magnitude * MAX_DUTY as f32) as u16;
        let reverse = power < 0.0;

        self.pwm
            .set_channel_on_off(self.phase, 0, if reverse { MAX_DUTY } else { 0 })
            .map_err(pwm_error)?;
        self.pwm
            .set_channel_on_off(self.enable, 0, duty)
            .map_err(pwm_error)
    }
}

fn pwm_error<E>(_: pwm_pca9685::Error<E>) -> DeviceError {
    DeviceError::Pwm
}
