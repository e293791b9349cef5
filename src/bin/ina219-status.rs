//! Print the charge state of a battery pack monitored by an INA219.
//!
//! Set up for two 18650 cells in series with a 0.1 ohm shunt. The cells
//! read about 4.2 V each when full and stop supporting a 5 V regulator
//! below about 3 V each.

use std::process::ExitCode;

use ina219_charge::{BatteryConfig, ChargeStatus, DeviceConfig, Ina219, LinuxConnector};

// The GPIO header I2C on a Raspberry Pi is bus 1
const I2C_DEV: &str = "/dev/i2c-1";
// 0x40-0x4F depending on the A0/A1 pins
const I2C_ADDR: u8 = 0x42;

const SHUNT_MILLIOHMS: i32 = 100;
const BATTERY_VOLTAGE_0_PERCENT: i32 = 6000;
const BATTERY_VOLTAGE_100_PERCENT: i32 = 8260;
const BATTERY_CAPACITY: i32 = 2400; // mAh, does not add up in series
const MIN_CHARGING_CURRENT: i32 = 10;

fn main() -> ExitCode {
    let program = std::env::args()
        .next()
        .unwrap_or_else(|| String::from("ina219-status"));

    let config = BatteryConfig::new(
        BATTERY_VOLTAGE_0_PERCENT,
        BATTERY_VOLTAGE_100_PERCENT,
        BATTERY_CAPACITY,
        MIN_CHARGING_CURRENT,
    )
    .and_then(|battery| DeviceConfig::new(I2C_DEV, I2C_ADDR, SHUNT_MILLIOHMS, battery));
    let config = match config {
        Ok(config) => config,
        Err(e) => {
            eprintln!("{}: {}", program, e);
            return ExitCode::FAILURE;
        }
    };

    let mut ina219 = Ina219::new(config, LinuxConnector);
    if let Err(e) = ina219.initialize() {
        eprintln!("Can't set up INA219: {}", e);
        return ExitCode::FAILURE;
    }

    let snapshot = match ina219.status() {
        Ok(snapshot) => snapshot,
        Err(e) => {
            eprintln!("{}: {}", program, e);
            return ExitCode::FAILURE;
        }
    };

    match snapshot.status {
        ChargeStatus::FullyCharged => println!("Fully charged"),
        ChargeStatus::Charging => {
            println!("Charging, {} minutes until fully charged", snapshot.minutes)
        }
        ChargeStatus::Discharging => println!("Discharging, {} minutes left", snapshot.minutes),
    }
    println!(
        "Battery voltage: {:.2} V",
        f64::from(snapshot.voltage_mv) / 1000.0
    );
    // negative while discharging
    println!("Battery current: {} mA", snapshot.current_ma);
    println!("Battery charge: {} %", snapshot.percent_charged);
    ExitCode::SUCCESS
}
