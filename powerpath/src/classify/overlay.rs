//! Indicators drawn on top of the power path diagram

use strum::{Display, IntoStaticStr};

use super::conditions::{any_input_present, charge_complete, ship_fet_idle, SAFETY_TIMERS};
use crate::{Field::*, StatusSnapshot};

/// Battery temperature band as shown by the temperature indicator
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Display, IntoStaticStr)]
#[strum(serialize_all = "lowercase")]
pub enum Temperature {
    #[default]
    Normal,
    /// TS_COOL or TS_COLD
    Cold,
    Hot,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Display, IntoStaticStr)]
#[strum(serialize_all = "lowercase")]
pub enum AdapterIndicator {
    /// Nothing on VBUS and not sourcing it
    Idle,
    Error,
    Normal,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Display, IntoStaticStr)]
#[strum(serialize_all = "lowercase")]
pub enum BatteryIndicator {
    /// Battery missing or isolated by the ship FET
    Absent,
    Error,
    Full,
    Normal,
}

/// Snapshot-level indicators, independent of the path classification
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Overlay {
    /// A protection that shuts the converter down is active
    pub fault: bool,
    pub temperature: Temperature,
    pub adapter: AdapterIndicator,
    pub battery: BatteryIndicator,
}

impl Overlay {
    pub(crate) fn from_snapshot(s: &StatusSnapshot) -> Self {
        Self {
            fault: s.any_set(&[VbusOvp, VsysOvp, VbatOvp, Tshut]),
            temperature: temperature(s),
            adapter: adapter(s),
            battery: battery(s),
        }
    }

    /// Temperature is outside the normal band
    #[must_use]
    pub fn temperature_alert(&self) -> bool {
        self.temperature != Temperature::Normal
    }
}

fn temperature(s: &StatusSnapshot) -> Temperature {
    if s.is_set(TsCool) || s.is_set(TsCold) {
        Temperature::Cold
    } else if s.is_set(TsHot) {
        Temperature::Hot
    } else {
        Temperature::Normal
    }
}

fn adapter(s: &StatusSnapshot) -> AdapterIndicator {
    let fets_idle = (s.is_clear(Acrb1) && s.is_clear(Acrb2))
        || (s.is_clear(EnAcDrv1) && s.is_clear(EnAcDrv2));
    let input_fault = s.any_set(&[VbusOvp, IbusOcp, VacOvp]) && any_input_present(s);
    let otg_fault = s.is_set(EnOtg)
        && s.any_set(&[VbatOvp, IbatOcp, TsHot, TsCold, OtgOvp, OtgUvp, Tshut, VbatOtgLow])
        && ship_fet_idle(s);

    if s.is_clear(VbusPresent) && s.is_clear(EnOtg) && fets_idle {
        AdapterIndicator::Idle
    } else if input_fault || otg_fault {
        AdapterIndicator::Error
    } else {
        AdapterIndicator::Normal
    }
}

fn battery(s: &StatusSnapshot) -> BatteryIndicator {
    let cell_fault = s.any_set(&[TsCold, TsHot, VbatOvp, IbatOcp, Tshut])
        || (s.is_set(EnOtg) && s.any_set(&[OtgOvp, OtgUvp, VbatOtgLow]))
        || s.any_set(SAFETY_TIMERS);

    if s.is_clear(VbatPresent) || !ship_fet_idle(s) {
        BatteryIndicator::Absent
    } else if cell_fault && s.is_set(VbatPresent) {
        BatteryIndicator::Error
    } else if charge_complete(s) {
        BatteryIndicator::Full
    } else {
        BatteryIndicator::Normal
    }
}
