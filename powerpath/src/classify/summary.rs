//! One-line summary of what the charger is doing

use std::fmt;

use strum::{Display, IntoStaticStr};

use super::conditions::{charge_done, charge_stat, phase_label};
use crate::{
    catalog::VBUS_STAT_LABELS, model::option_label, Field::*, Severity, StatusSnapshot,
};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Display, IntoStaticStr)]
#[strum(serialize_all = "kebab-case")]
pub enum ChargerActivity {
    Fault,
    Otg,
    Charging,
    ChargeComplete,
    InputDisabled,
    AdapterOnly,
    OnBattery,
    Unpowered,
}

/// Charger activity with its display text and severity
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ChargerMode {
    pub activity: ChargerActivity,
    pub text: String,
    pub severity: Severity,
}

impl ChargerMode {
    fn new(activity: ChargerActivity, text: impl Into<String>, severity: Severity) -> Self {
        Self {
            activity,
            text: text.into(),
            severity,
        }
    }

    pub(crate) fn from_snapshot(s: &StatusSnapshot) -> Self {
        if s.any_set(&[Tshut, VbusOvp, VsysOvp, VbatOvp, IbusOcp]) {
            Self::new(ChargerActivity::Fault, "System fault", Severity::Error)
        } else if s.is_set(EnOtg) {
            Self::new(ChargerActivity::Otg, "Power bank (OTG) active", Severity::Info)
        } else if (1. ..=6.).contains(&charge_stat(s)) {
            let text = match phase_label(s) {
                Some(phase) => format!("Charging: {phase}"),
                None => "Charging".to_owned(),
            };
            Self::new(ChargerActivity::Charging, text, Severity::Ok)
        } else if charge_done(s) {
            Self::new(ChargerActivity::ChargeComplete, "Charge complete", Severity::Info)
        } else if s.is_set(EnHiz) {
            Self::new(ChargerActivity::InputDisabled, "Input disabled (HIZ)", Severity::Idle)
        } else if s.is_set(VbusPresent) {
            let text = match option_label(VBUS_STAT_LABELS, s.value(VbusStat)) {
                Some(source) => format!("Adapter connected: {source}"),
                None => "Adapter connected".to_owned(),
            };
            Self::new(ChargerActivity::AdapterOnly, text, Severity::Idle)
        } else if s.is_set(VbatPresent) {
            Self::new(ChargerActivity::OnBattery, "Running on battery", Severity::Info)
        } else {
            Self::new(ChargerActivity::Unpowered, "Off / unpowered", Severity::Idle)
        }
    }
}

impl fmt::Display for ChargerMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} [{}]", self.text, self.severity)
    }
}
