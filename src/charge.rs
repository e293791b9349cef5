//! Charge-state inference from one bus and one shunt reading.

use core::fmt;

use crate::config::BatteryConfig;

/// Percentage at or above which the battery counts as fully charged.
pub const FULL_PERCENT: i32 = 99;

/// Direction of charge as seen at the shunt
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChargeStatus {
    FullyCharged,
    Charging,
    Discharging,
}

impl fmt::Display for ChargeStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ChargeStatus::FullyCharged => write!(f, "Fully charged"),
            ChargeStatus::Charging => write!(f, "Charging"),
            ChargeStatus::Discharging => write!(f, "Discharging"),
        }
    }
}

/// One battery reading. Built fresh on every status query.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StatusSnapshot {
    /// Bus voltage in millivolts
    pub voltage_mv: i32,
    /// 0-100, linear between the configured empty and full voltages
    pub percent_charged: u8,
    /// Positive when the battery is being charged, given the usual wiring
    pub current_ma: i32,
    /// Minutes to full charge or full discharge, 0 when fully charged
    pub minutes: u32,
    pub status: ChargeStatus,
}

/// Work out the overall charge state from bus and shunt voltages.
///
/// The charge level is a linear interpolation of the bus voltage, and the
/// time estimate assumes the present current holds until the end. Neither
/// chargers nor batteries behave that way, so treat `minutes` as a rough
/// indication only.
pub fn classify(
    battery: &BatteryConfig,
    shunt_milliohms: i32,
    bus_mv: i32,
    shunt_mv: i32,
) -> StatusSnapshot {
    let percent = percent_charged(battery, bus_mv);
    let current_ma = current_ma(shunt_milliohms, shunt_mv);

    // Near full charge the current hovers around zero and flips sign, so
    // charging versus discharging is noise there.
    let status = if percent >= FULL_PERCENT || current_ma < battery.min_charging_ma() {
        ChargeStatus::FullyCharged
    } else if current_ma > 0 {
        ChargeStatus::Charging
    } else {
        ChargeStatus::Discharging
    };

    let minutes = match status {
        ChargeStatus::FullyCharged => 0,
        _ => minutes_remaining(battery, percent, current_ma),
    };

    StatusSnapshot {
        voltage_mv: bus_mv,
        // clamped to 0..=100 above
        percent_charged: percent as u8,
        current_ma,
        minutes,
        status,
    }
}

// Widened so any range BatteryConfig accepts stays in bounds.
fn percent_charged(battery: &BatteryConfig, bus_mv: i32) -> i32 {
    let empty_mv = i64::from(battery.empty_mv());
    let span = i64::from(battery.full_mv()) - empty_mv;
    (100 * (i64::from(bus_mv) - empty_mv) / span).clamp(0, 100) as i32
}

fn current_ma(shunt_milliohms: i32, shunt_mv: i32) -> i32 {
    let ma = i64::from(shunt_mv) * 1000 / i64::from(shunt_milliohms);
    ma.clamp(i64::from(i32::MIN), i64::from(i32::MAX)) as i32
}

fn minutes_remaining(battery: &BatteryConfig, percent: i32, current_ma: i32) -> u32 {
    let capacity = i64::from(battery.capacity_mah());
    let remaining = if current_ma >= 0 {
        (100 - i64::from(percent)) * capacity / 100
    } else {
        i64::from(percent) * capacity / 100
    };
    let seconds = (3600 * remaining) as f64 / f64::from(current_ma.unsigned_abs());
    // Float-to-int `as` saturates, so a zero current reads as u32::MAX.
    ((seconds as u64) / 60).min(u64::from(u32::MAX)) as u32
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pack(min_charging_ma: i32) -> BatteryConfig {
        BatteryConfig::new(6000, 8260, 2400, min_charging_ma).unwrap()
    }

    #[test]
    fn percent_is_truncated() {
        assert_eq!(percent_charged(&pack(10), 7130), 50);
        assert_eq!(percent_charged(&pack(10), 6000), 0);
        assert_eq!(percent_charged(&pack(10), 8260), 100);
    }

    #[test]
    fn percent_is_clamped() {
        assert_eq!(percent_charged(&pack(10), 5000), 0);
        assert_eq!(percent_charged(&pack(10), 9000), 100);
        assert_eq!(percent_charged(&pack(10), 0), 0);
    }

    #[test]
    fn percent_survives_extreme_voltage_ranges() {
        let widest = BatteryConfig::new(i32::MIN, i32::MAX, 2400, 10).unwrap();
        assert_eq!(percent_charged(&widest, 7130), 50);
        assert_eq!(percent_charged(&widest, i32::MIN), 0);
        assert_eq!(percent_charged(&widest, i32::MAX), 100);

        let deep = BatteryConfig::new(-30_000_000, 8260, 2400, 10).unwrap();
        let snapshot = classify(&deep, 100, 7130, 5);
        assert_eq!(snapshot.percent_charged, 99);
        assert_eq!(snapshot.status, ChargeStatus::FullyCharged);
    }

    #[test]
    fn current_saturates_on_tiny_shunt() {
        assert_eq!(current_ma(1, i32::MAX), i32::MAX);
        assert_eq!(current_ma(1, i32::MIN), i32::MIN);
        assert_eq!(current_ma(100, -5), -50);
    }

    #[test]
    fn charging_at_half_charge() {
        let snapshot = classify(&pack(10), 100, 7130, 5);
        assert_eq!(
            snapshot,
            StatusSnapshot {
                voltage_mv: 7130,
                percent_charged: 50,
                current_ma: 50,
                // 50% of 2400 mAh at 50 mA is 24 hours
                minutes: 1440,
                status: ChargeStatus::Charging,
            }
        );
    }

    #[test]
    fn charging_minutes_truncate() {
        // 33% -> 1608 mAh remaining at 70 mA: 82697.14 s -> 1378 min
        let bus_mv = 6000 + 2260 * 33 / 100 + 1;
        let snapshot = classify(&pack(10), 100, bus_mv, 7);
        assert_eq!(snapshot.percent_charged, 33);
        assert_eq!(snapshot.current_ma, 70);
        assert_eq!(snapshot.minutes, 1378);
    }

    #[test]
    fn near_full_is_fully_charged() {
        let bus_mv = 6000 + 2260 * 99 / 100 + 1;
        let snapshot = classify(&pack(10), 100, bus_mv, 20);
        assert_eq!(snapshot.percent_charged, 99);
        assert_eq!(snapshot.status, ChargeStatus::FullyCharged);
        assert_eq!(snapshot.minutes, 0);
    }

    #[test]
    fn full_overrides_discharge_current() {
        let snapshot = classify(&pack(-1000), 100, 8300, -30);
        assert_eq!(snapshot.current_ma, -300);
        assert_eq!(snapshot.status, ChargeStatus::FullyCharged);
        assert_eq!(snapshot.minutes, 0);
    }

    #[test]
    fn low_current_is_fully_charged() {
        // 0 mV across 100 mOhm is below the 10 mA floor
        let snapshot = classify(&pack(10), 100, 7130, 0);
        assert_eq!(snapshot.current_ma, 0);
        assert_eq!(snapshot.status, ChargeStatus::FullyCharged);
        assert_eq!(snapshot.minutes, 0);
    }

    #[test]
    fn discharge_below_floor_is_fully_charged() {
        let snapshot = classify(&pack(10), 100, 7130, -5);
        assert_eq!(snapshot.current_ma, -50);
        assert_eq!(snapshot.status, ChargeStatus::FullyCharged);
    }

    #[test]
    fn discharging_uses_charge_left() {
        let snapshot = classify(&pack(-1000), 100, 7130, -12);
        assert_eq!(snapshot.current_ma, -120);
        assert_eq!(snapshot.status, ChargeStatus::Discharging);
        // 50% of 2400 mAh at 120 mA is 10 hours
        assert_eq!(snapshot.minutes, 600);
    }

    #[test]
    fn zero_current_above_floor_saturates() {
        let snapshot = classify(&pack(-1000), 100, 7130, 0);
        assert_eq!(snapshot.status, ChargeStatus::Discharging);
        assert_eq!(snapshot.minutes, u32::MAX);
    }

    #[test]
    fn status_text() {
        extern crate std;
        use std::string::ToString;
        assert_eq!(ChargeStatus::FullyCharged.to_string(), "Fully charged");
        assert_eq!(ChargeStatus::Discharging.to_string(), "Discharging");
    }
}
