//! An embedded-hal driver for the TI INA219 current/voltage monitor, as used
//! in battery charging circuits.
//!
//! <https://www.ti.com/product/INA219>
//!
//! The driver reads the bus and shunt voltage registers and turns them into
//! a charge state for a battery whose empty and full voltages, capacity and
//! minimum charging current are supplied by the caller. All voltages are in
//! millivolts, currents in milliamps and capacities in mA-hours.
//!
//! The estimated time to full charge or discharge assumes a constant
//! current. Chargers usually taper the current near the end, so the
//! estimate can grow while the battery fills. A dependable figure needs a
//! measured voltage/time curve for the specific battery and charger.
//!
//! Usage
//! -----
//!
//! ```ignore
//! use ina219_charge::{BatteryConfig, DeviceConfig, Ina219, LinuxConnector};
//! fn main() {
//!     let battery = BatteryConfig::new(6000, 8260, 2400, 10).unwrap();
//!     let config = DeviceConfig::new("/dev/i2c-1", 0x42, 100, battery).unwrap();
//!     let mut ina219 = Ina219::new(config, LinuxConnector);
//!     ina219.initialize().unwrap();
//!     let status = ina219.status().unwrap();
//!     println!("{}, {} minutes", status.status, status.minutes);
//!     println!("Charge: {}%", status.percent_charged);
//! }
//! ```

#![no_std]

extern crate alloc;
#[cfg(feature = "std")]
extern crate std;

pub mod charge;
pub mod config;
pub mod connect;
pub mod error;
pub mod registers;

use log::{debug, trace};

pub use charge::{ChargeStatus, StatusSnapshot, FULL_PERCENT};
pub use config::{BatteryConfig, DeviceConfig};
pub use connect::Connect;
#[cfg(feature = "linux")]
pub use connect::LinuxConnector;
pub use error::{ConfigError, Error};

use registers::Register;

/// An INA219 on an I2C channel opened through `C`.
///
/// A new handle holds only its configuration. [`initialize`](Self::initialize)
/// opens the channel and [`finalize`](Self::finalize) closes it; the pair
/// can be repeated. Dropping the handle finalizes it.
///
/// Each register read is a pointer write followed by a read, which is not
/// atomic on the bus. Only one transaction may be in flight per device.
pub struct Ina219<C: Connect> {
    config: DeviceConfig,
    connector: C,
    bus: Option<C::Bus>,
}

impl<C: Connect> Ina219<C> {
    /// Make a new INA219 driver. No I/O happens until `initialize`.
    pub fn new(config: DeviceConfig, connector: C) -> Self {
        Self {
            config,
            connector,
            bus: None,
        }
    }

    /// Get the configuration this driver was made with
    pub fn config(&self) -> &DeviceConfig {
        &self.config
    }

    /// Whether the I2C channel is currently open
    pub fn is_initialized(&self) -> bool {
        self.bus.is_some()
    }

    /// Open the configured channel and select the slave address.
    ///
    /// On failure the handle stays closed. An already open channel is
    /// closed and reopened.
    pub fn initialize(&mut self) -> Result<(), Error<C::Error>> {
        self.finalize();
        let target = self.config.target();
        let mut bus = self.connector.open(target).map_err(Error::TransportOpen)?;
        self.connector
            .bind(&mut bus, self.config.address())
            .map_err(Error::AddressBind)?;
        debug!(
            "INA219 opened on {} at {:#04x}",
            target,
            self.config.address()
        );
        self.bus = Some(bus);
        Ok(())
    }

    /// Close the channel if it is open.
    pub fn finalize(&mut self) {
        if self.bus.take().is_some() {
            debug!("INA219 on {} closed", self.config.target());
        }
    }

    /// Get the bus voltage (pin IN-) in millivolts, 0-32000 mV
    pub fn bus_voltage(&mut self) -> Result<i32, Error<C::Error>> {
        let raw = self.read(Register::BusVoltage)?;
        Ok(registers::bus_voltage_mv(raw))
    }

    /// Get the voltage between IN+ and IN- in millivolts, +/-320 mV.
    ///
    /// With the usual wiring a positive value means the battery is charging.
    pub fn shunt_voltage(&mut self) -> Result<i32, Error<C::Error>> {
        let raw = self.read(Register::ShuntVoltage)?;
        Ok(registers::shunt_voltage_mv(raw))
    }

    /// Read both voltages and work out the charge state.
    ///
    /// Nothing is cached: every call reads the device again, and a failed
    /// read fails the whole call.
    pub fn status(&mut self) -> Result<StatusSnapshot, Error<C::Error>> {
        let bus_mv = self.bus_voltage()?;
        let shunt_mv = self.shunt_voltage()?;
        let snapshot = charge::classify(
            self.config.battery(),
            self.config.shunt_milliohms(),
            bus_mv,
            shunt_mv,
        );
        trace!("{:?}", snapshot);
        Ok(snapshot)
    }

    fn read(&mut self, reg: Register) -> Result<i16, Error<C::Error>> {
        let bus = self.bus.as_mut().ok_or(Error::NotInitialized)?;
        registers::read_register(bus, self.config.address(), reg)
    }
}

impl<C: Connect> Drop for Ina219<C> {
    fn drop(&mut self) {
        self.finalize();
    }
}
