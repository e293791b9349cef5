use core::fmt;

/// Errors returned by the driver, generic over the transport's error type `E`.
#[derive(Debug)]
pub enum Error<E> {
    /// A register was accessed while the transport is closed
    NotInitialized,
    /// The transport target could not be opened
    TransportOpen(E),
    /// The slave address was rejected by the transport
    AddressBind(E),
    /// Writing the register pointer failed
    TransportWrite(E),
    /// Reading the two register bytes failed
    TransportRead(E),
}

impl<E: fmt::Debug> fmt::Display for Error<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::NotInitialized => write!(f, "INA219 used before initialization"),
            Error::TransportOpen(e) => write!(f, "Can't open I2C device: {:?}", e),
            Error::AddressBind(e) => write!(f, "Can't initialize I2C device: {:?}", e),
            Error::TransportWrite(e) => write!(f, "Failed to write I2C device: {:?}", e),
            Error::TransportRead(e) => write!(f, "Failed to read I2C device: {:?}", e),
        }
    }
}

#[cfg(feature = "std")]
impl<E: fmt::Debug> std::error::Error for Error<E> {}

/// Rejected device or battery configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigError {
    /// Shunt resistance must be positive (milliohms)
    ShuntResistance(i32),
    /// Full-charge voltage must be above the empty voltage (millivolts)
    VoltageRange { empty_mv: i32, full_mv: i32 },
    /// Battery capacity must be positive (mA-hours)
    Capacity(i32),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::ShuntResistance(r) => {
                write!(f, "shunt resistance must be positive, got {} mOhm", r)
            }
            ConfigError::VoltageRange { empty_mv, full_mv } => write!(
                f,
                "full-charge voltage {} mV must exceed empty voltage {} mV",
                full_mv, empty_mv
            ),
            ConfigError::Capacity(c) => {
                write!(f, "battery capacity must be positive, got {} mAh", c)
            }
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for ConfigError {}
