use alloc::string::String;

use crate::error::ConfigError;

/// Properties of the battery pack being monitored.
///
/// Voltages are in millivolts, capacity in mA-hours and currents in
/// milliamps. The constructor guarantees `full_mv > empty_mv` and a
/// positive capacity, so the charge arithmetic never divides by zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BatteryConfig {
    empty_mv: i32,
    full_mv: i32,
    capacity_mah: i32,
    min_charging_ma: i32,
}

impl BatteryConfig {
    /// `min_charging_ma` is the current below which the battery is
    /// reported as fully charged. It may be negative.
    pub fn new(
        empty_mv: i32,
        full_mv: i32,
        capacity_mah: i32,
        min_charging_ma: i32,
    ) -> Result<Self, ConfigError> {
        if full_mv <= empty_mv {
            return Err(ConfigError::VoltageRange { empty_mv, full_mv });
        }
        if capacity_mah <= 0 {
            return Err(ConfigError::Capacity(capacity_mah));
        }
        Ok(Self {
            empty_mv,
            full_mv,
            capacity_mah,
            min_charging_ma,
        })
    }

    /// Voltage at 0% charge
    pub fn empty_mv(&self) -> i32 {
        self.empty_mv
    }

    /// Voltage at 100% charge
    pub fn full_mv(&self) -> i32 {
        self.full_mv
    }

    /// Battery capacity in mA-hours
    pub fn capacity_mah(&self) -> i32 {
        self.capacity_mah
    }

    /// Current in milliamps below which the battery counts as full
    pub fn min_charging_ma(&self) -> i32 {
        self.min_charging_ma
    }
}

/// Everything needed to reach an INA219 and interpret its readings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeviceConfig {
    target: String,
    address: u8,
    shunt_milliohms: i32,
    battery: BatteryConfig,
}

impl DeviceConfig {
    /// `target` names the transport endpoint, e.g. `/dev/i2c-1`. The INA219
    /// answers on 0x40-0x4F depending on its A0/A1 strapping.
    pub fn new(
        target: impl Into<String>,
        address: u8,
        shunt_milliohms: i32,
        battery: BatteryConfig,
    ) -> Result<Self, ConfigError> {
        if shunt_milliohms <= 0 {
            return Err(ConfigError::ShuntResistance(shunt_milliohms));
        }
        Ok(Self {
            target: target.into(),
            address,
            shunt_milliohms,
            battery,
        })
    }

    /// Transport endpoint, e.g. `/dev/i2c-1`
    pub fn target(&self) -> &str {
        &self.target
    }

    /// 7-bit slave address
    pub fn address(&self) -> u8 {
        self.address
    }

    /// Shunt resistance in milliohms
    pub fn shunt_milliohms(&self) -> i32 {
        self.shunt_milliohms
    }

    /// Properties of the monitored battery
    pub fn battery(&self) -> &BatteryConfig {
        &self.battery
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_two_cell_pack() {
        let battery = BatteryConfig::new(6000, 8260, 2400, 10).unwrap();
        let config = DeviceConfig::new("/dev/i2c-1", 0x42, 100, battery).unwrap();
        assert_eq!(config.target(), "/dev/i2c-1");
        assert_eq!(config.address(), 0x42);
        assert_eq!(config.battery().full_mv(), 8260);
    }

    #[test]
    fn rejects_inverted_voltage_range() {
        assert_eq!(
            BatteryConfig::new(8260, 8260, 2400, 10),
            Err(ConfigError::VoltageRange {
                empty_mv: 8260,
                full_mv: 8260
            })
        );
    }

    #[test]
    fn rejects_empty_capacity() {
        assert_eq!(
            BatteryConfig::new(6000, 8260, 0, 10),
            Err(ConfigError::Capacity(0))
        );
    }

    #[test]
    fn rejects_non_positive_shunt() {
        let battery = BatteryConfig::new(6000, 8260, 2400, 10).unwrap();
        assert_eq!(
            DeviceConfig::new("/dev/i2c-1", 0x42, 0, battery),
            Err(ConfigError::ShuntResistance(0))
        );
    }
}
