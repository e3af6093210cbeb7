//! Power path classification
//!
//! Each path is classified on its own from the same snapshot. The input and battery paths use
//! ordered rule tables where the first matching rule wins; the system path is a three-way split on
//! the rail voltages. The results are then folded into an [`OverallStatus`].
mod battery;
mod conditions;
mod input;
mod overlay;
mod rules;
mod summary;
mod system;

use std::fmt;

use log::debug;

use crate::{
    BatteryState, ClassifyConfig, InputState, OverallStatus, PathClassification, StatusSnapshot,
    SystemState,
};

pub use overlay::{AdapterIndicator, BatteryIndicator, Overlay, Temperature};
pub use rules::UNCLASSIFIED_TEXT;
pub use summary::{ChargerActivity, ChargerMode};

/// Everything derived from one status snapshot
#[derive(Clone, Debug, PartialEq)]
pub struct Classification {
    pub input: PathClassification<InputState>,
    pub system: PathClassification<SystemState>,
    pub battery: PathClassification<BatteryState>,
    /// Aggregated input and battery status, escalated by the overlay
    pub overall: OverallStatus,
    pub overlay: Overlay,
    pub mode: ChargerMode,
}

impl Classification {
    pub(crate) fn from_snapshot(snapshot: &StatusSnapshot, config: &ClassifyConfig) -> Self {
        let input = input::classify(snapshot);
        let system = system::classify(snapshot, config);
        let battery = battery::classify(snapshot);
        let overlay = Overlay::from_snapshot(snapshot);
        let overall =
            OverallStatus::from_paths(&input, &battery, config).with_overlay(&overlay, config);
        let mode = ChargerMode::from_snapshot(snapshot);
        debug!("classified snapshot of {} fields: {overall}", snapshot.len());
        Self {
            input,
            system,
            battery,
            overall,
            overlay,
            mode,
        }
    }

    /// Any path fell through to its unclassified state
    #[must_use]
    pub fn has_unclassified(&self) -> bool {
        self.input.is_unclassified()
            || self.system.is_unclassified()
            || self.battery.is_unclassified()
    }
}

impl fmt::Display for Classification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", self.input)?;
        writeln!(f, "{}", self.system)?;
        writeln!(f, "{}", self.battery)?;
        writeln!(f, "mode: {}", self.mode)?;
        write!(f, "overall: {}", self.overall)
    }
}


#[cfg(test)]
mod tests {
    use strum::IntoEnumIterator;

    use super::*;
    use crate::{Field, PathId, PathState, Severity};

    fn classify(s: &StatusSnapshot) -> Classification {
        Classification::from_snapshot(s, &ClassifyConfig::default())
    }

    /// Deterministic pseudo-random snapshots assigning a plausible value to every rule field
    fn sweep(count: usize) -> impl Iterator<Item = StatusSnapshot> {
        let mut seed: u64 = 0x2545_f491_4f6c_dd1d;
        (0..count).map(move |_| {
            Field::iter()
                .map(|field| {
                    seed = seed
                        .wrapping_mul(6_364_136_223_846_793_005)
                        .wrapping_add(1_442_695_040_888_963_407);
                    let r = seed >> 33;
                    let value = match field {
                        Field::ChgStat => (r % 8) as f64,
                        Field::VbusStat => (r % 9) as f64,
                        Field::SdrvCtrl
                        | Field::JeitaVset
                        | Field::JeitaIsetH
                        | Field::JeitaIsetC => (r % 4) as f64,
                        Field::VbusAdc
                        | Field::IbusAdc
                        | Field::VbatAdc
                        | Field::IbatAdc
                        | Field::VsysAdc
                        | Field::TdieAdc => [0., 50., 3700., 4200.][(r % 4) as usize],
                        _ => (r % 2) as f64,
                    };
                    (field.key(), value)
                })
                .collect::<StatusSnapshot>()
        })
    }

    #[test]
    fn every_snapshot_gets_one_consistent_result() {
        for s in sweep(5000) {
            let c = classify(&s);
            assert_eq!(c, classify(&s), "{s:?}");
            assert_eq!(c.input.severity, c.input.state.severity());
            assert_eq!(c.system.severity, c.system.state.severity());
            assert_eq!(c.battery.severity, c.battery.state.severity());
            assert_ne!(c.system.state, SystemState::Unclassified);
            assert!(c.overall.dominant_severity >= c.input.severity.max(c.battery.severity));
            assert!(!c.overall.combined_text.is_empty());
        }
    }

    #[test]
    fn registers_outside_the_rules_do_not_change_paths() {
        let unrelated = [
            ("EN_ICO", 1.),
            ("ADC_EN", 1.),
            ("TS_IGNORE", 1.),
            ("VREG_10_0", 4200.),
        ];
        for s in sweep(2000) {
            let c = classify(&s);
            for (name, value) in unrelated {
                let flipped = classify(&s.clone().with(name, value));
                assert_eq!(flipped.input.state, c.input.state, "{name} in {s:?}");
                assert_eq!(flipped.system.state, c.system.state, "{name} in {s:?}");
                assert_eq!(flipped.battery.state, c.battery.state, "{name} in {s:?}");
                assert_eq!(flipped.overall, c.overall, "{name} in {s:?}");
            }
        }
    }

    #[test]
    fn firmware_jeita_names_permit_warm_charging() {
        let s = fixtures::charging()
            .with("TS_WARM_STAT", 1.)
            .with("JEITA_VSET_2_0", 3.)
            .with("JEITA_ISETH_1_0", 2.)
            .with("JEITA_ISETC_1_0", 3.);
        let c = classify(&s);
        assert_eq!(c.input.state, InputState::NormalForward);
        assert_eq!(c.battery.state, BatteryState::NormalForward);
        assert!(!c.has_unclassified());
    }

    #[test]
    fn empty_snapshot_is_unpowered() {
        let c = classify(&StatusSnapshot::new());
        assert_eq!(c.input.state, InputState::Disconnected);
        assert_eq!(c.system.state, SystemState::Unpowered);
        assert_eq!(c.battery.state, BatteryState::Disconnected);
        assert_eq!(c.overall.combined_text, "Unpowered");
        assert_eq!(c.overall.dominant_severity, Severity::Ok);
        assert!(!c.has_unclassified());
    }

    #[test]
    fn charging_snapshot() {
        let c = classify(&fixtures::charging());
        assert_eq!(c.input.state, InputState::NormalForward);
        assert_eq!(c.system.state, SystemState::AdapterFeed);
        assert_eq!(c.battery.state, BatteryState::NormalForward);
        assert_eq!(
            c.overall.combined_text,
            "Charging from adapter (Fast Charge) | Battery charging (Fast Charge)"
        );
        assert_eq!(c.overall.dominant_severity, Severity::Ok);
    }

    #[test]
    fn battery_only_snapshot() {
        let c = classify(&fixtures::battery_only());
        assert_eq!(c.input.state, InputState::Disconnected);
        assert_eq!(c.system.state, SystemState::BatteryFeed);
        assert_eq!(c.battery.state, BatteryState::ReverseAssistFault);
        assert_eq!(c.overall.combined_text, "Battery supplying system, no input");
        assert_eq!(c.overall.dominant_path, PathId::Battery);
        assert_eq!(c.overall.dominant_severity, Severity::Info);
    }

    #[test]
    fn thermal_shutdown_escalates_to_error() {
        let s = fixtures::charging()
            .with("CHG_STAT_2_0", 0.)
            .with("TSHUT_STAT", 1.);
        let c = classify(&s);
        assert_eq!(c.input.state, InputState::GatedByProtection);
        assert!(c.overlay.fault);
        assert!(c.overall.is_error());
        assert!(c.overall.combined_text.starts_with("Protection fault | "));
    }

    #[test]
    fn unclassified_path_is_error() {
        let c = classify(&fixtures::charging().with("VBUS_OVP_STAT", 1.));
        assert!(c.has_unclassified());
        assert_eq!(c.battery.state, BatteryState::Unclassified);
        assert_eq!(c.overall.dominant_severity, Severity::Error);
        assert!(c.overall.combined_text.contains(UNCLASSIFIED_TEXT));
    }

    #[test]
    fn otg_snapshot() {
        let c = classify(&fixtures::otg());
        assert_eq!(c.input.state, InputState::NormalReverse);
        assert_eq!(c.battery.state, BatteryState::ReverseClean);
        assert_eq!(c.mode.activity, ChargerActivity::Otg);
        assert_eq!(c.overall.dominant_severity, Severity::Info);
    }

    #[test]
    fn display_lists_every_path() {
        let text = classify(&fixtures::charging()).to_string();
        assert!(text.starts_with("input: normal-forward [ok]"));
        assert!(text.contains("system: adapter-feed [ok]"));
        assert!(text.contains("battery: normal-forward [ok]"));
        assert!(text.ends_with(
            "overall: [ok] Charging from adapter (Fast Charge) | Battery charging (Fast Charge)"
        ));
    }
}
