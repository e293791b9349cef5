//! Opening and addressing the I2C channel a driver handle talks through.

use core::fmt::Debug;
use embedded_hal::blocking::i2c::{Read, Write};

/// Hands out I2C channels for [`Ina219`](crate::Ina219).
///
/// The handle calls [`open`](Connect::open) then [`bind`](Connect::bind)
/// when initialized, and closes the channel by dropping it.
pub trait Connect {
    type Error: Debug;
    type Bus: Read<Error = Self::Error> + Write<Error = Self::Error>;

    /// Open the channel named by `target`, e.g. `/dev/i2c-1`
    fn open(&mut self, target: &str) -> Result<Self::Bus, Self::Error>;

    /// Select the slave address subsequent transfers go to
    fn bind(&mut self, bus: &mut Self::Bus, address: u8) -> Result<(), Self::Error>;
}

#[cfg(feature = "linux")]
pub use self::linux::{LinuxBus, LinuxConnector};

#[cfg(feature = "linux")]
mod linux {
    use embedded_hal::blocking::i2c::{Read, Write};
    use i2cdev::core::I2CDevice;
    use i2cdev::linux::LinuxI2CError;
    use linux_embedded_hal::I2cdev;

    use super::Connect;

    /// Linux `/dev/i2c-N` character devices
    #[derive(Debug, Default, Clone, Copy)]
    pub struct LinuxConnector;

    /// An open `/dev/i2c-N` device whose slave address was selected by
    /// [`LinuxConnector::bind`].
    ///
    /// Transfers go straight to the file descriptor and ignore the address
    /// argument. `I2cdev`'s own transfers would reopen the device to select
    /// the address again on first use.
    pub struct LinuxBus(I2cdev);

    impl Connect for LinuxConnector {
        type Error = LinuxI2CError;
        type Bus = LinuxBus;

        fn open(&mut self, target: &str) -> Result<LinuxBus, LinuxI2CError> {
            I2cdev::new(target).map(LinuxBus)
        }

        fn bind(&mut self, bus: &mut LinuxBus, address: u8) -> Result<(), LinuxI2CError> {
            // I2C_SLAVE ioctl on the descriptor the transfers use
            bus.0.set_slave_address(u16::from(address))
        }
    }

    impl Write for LinuxBus {
        type Error = LinuxI2CError;

        fn write(&mut self, _address: u8, bytes: &[u8]) -> Result<(), LinuxI2CError> {
            I2CDevice::write(&mut *self.0, bytes)
        }
    }

    impl Read for LinuxBus {
        type Error = LinuxI2CError;

        fn read(&mut self, _address: u8, buffer: &mut [u8]) -> Result<(), LinuxI2CError> {
            I2CDevice::read(&mut *self.0, buffer)
        }
    }
}
