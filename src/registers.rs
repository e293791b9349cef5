//! INA219 register map and raw-value conversions.
//!
//! Datasheet: <https://www.ti.com/lit/ds/symlink/ina219.pdf>

use byteorder::{BigEndian, ByteOrder};
use core::fmt::Debug;
use embedded_hal::blocking::i2c::{Read, Write};
use log::{trace, warn};

use crate::error::Error;

/// Registers read by this driver. See datasheet page 18 for the rest.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum Register {
    ShuntVoltage = 0x01, // LSB = 10 uV, signed
    BusVoltage = 0x02,   // LSB = 4 mV, shifted left by 3 status bits
}

/// Read a 16-bit register: write the register pointer, then read two bytes.
///
/// The result is big-endian and kept signed. The sign only means something
/// for the shunt register, but signed storage keeps both conversions free
/// of casts.
pub(crate) fn read_register<I2C, E>(
    bus: &mut I2C,
    address: u8,
    reg: Register,
) -> Result<i16, Error<E>>
where
    I2C: Read<Error = E> + Write<Error = E>,
    E: Debug,
{
    let mut raw = [0u8; 2];
    bus.write(address, &[reg as u8]).map_err(|e| {
        warn!("register {:?} pointer write failed: {:?}", reg, e);
        Error::TransportWrite(e)
    })?;
    bus.read(address, &mut raw).map_err(|e| {
        warn!("register {:?} read failed: {:?}", reg, e);
        Error::TransportRead(e)
    })?;
    let value = BigEndian::read_i16(&raw);
    trace!("register {:?} = {:#06x}", reg, value);
    Ok(value)
}

/// Bus voltage in millivolts, 0-32000 mV nominal.
///
/// The voltage sits above three status bits in 4 mV units. Masking the
/// status bits leaves 8 mV per count of the shifted field; one right shift
/// turns that into millivolts. Datasheet page 23.
pub fn bus_voltage_mv(raw: i16) -> i32 {
    (i32::from(raw) & 0xFFF8) >> 1
}

/// Shunt voltage in millivolts, roughly +/-320 mV.
///
/// The register counts 10 uV steps. Division truncates toward zero in both
/// directions. Datasheet page 20.
pub fn shunt_voltage_mv(raw: i16) -> i32 {
    i32::from(raw) / 100
}
