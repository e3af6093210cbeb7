//! Input path: adapter (VBUS / VAC) to chip

use lazy_static::lazy_static;

use super::{
    conditions::*,
    rules::{Rule, RuleTable},
};
use crate::{Field::*, InputState, PathClassification, StatusSnapshot};

lazy_static! {
    static ref TABLE: RuleTable<InputState> = RuleTable::new(rules())
        .unwrap_or_else(|err| panic!("input path table is malformed: {err}"));
}

pub(crate) fn classify(snapshot: &StatusSnapshot) -> PathClassification<InputState> {
    TABLE.evaluate(snapshot)
}

fn rules() -> Vec<Rule<InputState>> {
    vec![
        Rule::new(InputState::Disconnected, disconnected, |_| String::new()),
        Rule::new(InputState::FaultForward, fault_forward, fault_forward_cause),
        Rule::new(InputState::FaultReverse, fault_reverse, fault_reverse_cause),
        Rule::new(InputState::GatedByProtection, gated, gated_cause),
        Rule::new(InputState::MosfetsOpen, mosfets_open, |_| {
            "Input MOSFET pair open (ACDRV off)".to_owned()
        }),
        Rule::new(
            InputState::RegulationForward,
            regulation_forward,
            regulation_forward_cause,
        ),
        Rule::new(
            InputState::RegulationReverse,
            regulation_reverse,
            regulation_reverse_cause,
        ),
        Rule::new(InputState::IdleChargePaused, idle_charge_paused, idle_cause),
        Rule::new(InputState::NormalForward, normal_forward, charging_phase),
        Rule::new(InputState::NormalReverse, normal_reverse, |_| {
            "Supplying VBUS (OTG)".to_owned()
        }),
    ]
}

fn disconnected(s: &StatusSnapshot) -> bool {
    s.all_clear(&[VbusPresent, Ac1Present, Ac2Present]) && s.is_clear(EnOtg)
}

fn fault_forward(s: &StatusSnapshot) -> bool {
    (s.any_set(&[VbusOvp, IbusOcp, VacOvp]) || s.is_clear(PowerGood))
        && any_input_present(s)
        && s.is_clear(EnOtg)
}

fn fault_forward_cause(s: &StatusSnapshot) -> String {
    first_cause(
        s,
        &[
            (VbusOvp, "Input fault: VBUS over-voltage"),
            (IbusOcp, "Input fault: input over-current"),
            (VacOvp, "Input fault: VAC over-voltage"),
        ],
        "Input fault: power not good",
    )
}

fn fault_reverse(s: &StatusSnapshot) -> bool {
    (s.any_set(OTG_FAULTS) || s.any_set(&[VbusOvp, IbusOcp, VacOvp]))
        && s.is_set(EnOtg)
        && not_charging(s)
}

fn fault_reverse_cause(s: &StatusSnapshot) -> String {
    first_cause(
        s,
        &[
            (OtgOvp, "OTG fault: output over-voltage"),
            (OtgUvp, "OTG fault: output under-voltage"),
            (VbatOtgLow, "OTG fault: battery too low for OTG"),
            (TsHot, "OTG fault: battery too hot"),
            (TsCold, "OTG fault: battery too cold"),
            (VbusOvp, "OTG fault: VBUS over-voltage"),
            (IbusOcp, "OTG fault: over-current"),
            (VacOvp, "OTG fault: VAC over-voltage"),
        ],
        "OTG fault",
    )
}

/// Input FETs would conduct but a protection or HIZ holds the path off
fn gated(s: &StatusSnapshot) -> bool {
    input_fets_driven(s)
        && ship_fet_idle(s)
        && (s.is_set(VbusPresent) || s.is_set(EnOtg))
        && s.any_set(&[VsysOvp, VbatOvp, Tshut, EnHiz, VsysShort])
}

fn gated_cause(s: &StatusSnapshot) -> String {
    first_cause(
        s,
        &[
            (Tshut, "Input gated: thermal shutdown"),
            (VsysOvp, "Input gated: system over-voltage"),
            (VbatOvp, "Input gated: battery over-voltage"),
            (VsysShort, "Input gated: system short"),
            (EnHiz, "Input gated: HIZ mode"),
        ],
        "Input gated",
    )
}

fn mosfets_open(s: &StatusSnapshot) -> bool {
    !reverse_blocked(s) && s.all_clear(OTG_FAULTS) && input_fets_open(s) && not_charging(s)
}

fn regulation_forward(s: &StatusSnapshot) -> bool {
    !forward_blocked(s)
        && s.is_set(VbusPresent)
        && s.is_clear(EnOtg)
        && input_fets_driven(s)
        && s.any_set(FORWARD_REGULATION)
}

fn regulation_forward_cause(s: &StatusSnapshot) -> String {
    first_cause(
        s,
        &[
            (Vindpm, "Input voltage limit (VINDPM)"),
            (Iindpm, "Input current limit (IINDPM)"),
            (IbatReg, "Battery current regulation"),
            (Treg, "Thermal regulation"),
        ],
        "Input regulation",
    )
}

fn regulation_reverse(s: &StatusSnapshot) -> bool {
    !reverse_blocked(s)
        && s.all_clear(OTG_FAULTS)
        && s.is_set(EnOtg)
        && input_fets_driven(s)
        && not_charging(s)
        && s.any_set(REVERSE_REGULATION)
        && otg_vbus(s)
}

fn regulation_reverse_cause(s: &StatusSnapshot) -> String {
    first_cause(
        s,
        &[
            (Iindpm, "OTG current limit"),
            (IbatReg, "OTG limited by battery discharge current"),
            (Treg, "OTG thermal regulation"),
        ],
        "OTG regulation",
    )
}

fn idle_charge_paused(s: &StatusSnapshot) -> bool {
    !forward_blocked(s)
        && s.is_set(VbusPresent)
        && s.is_clear(EnOtg)
        && input_fets_driven(s)
        && (!charging(s)
            || s.any_set(SAFETY_TIMERS)
            || s.any_set(&[TsHot, TsCold])
            || watchdog_suspended(s))
        && ship_fet_idle(s)
        && s.all_clear(FORWARD_REGULATION)
}

fn idle_cause(s: &StatusSnapshot) -> String {
    if s.any_set(SAFETY_TIMERS) {
        return first_cause(
            s,
            &[
                (ChgTmr, "Charge paused: fast charge timer expired"),
                (PrechgTmr, "Charge paused: pre-charge timer expired"),
                (TrichgTmr, "Charge paused: trickle charge timer expired"),
            ],
            "Charge paused",
        );
    }
    if s.any_set(&[TsHot, TsCold]) {
        "Charge paused: battery temperature out of range".to_owned()
    } else if watchdog_suspended(s) {
        "Charge paused: watchdog expired".to_owned()
    } else if charge_done(s) {
        "Adapter idle, charge complete".to_owned()
    } else {
        "Adapter connected, not charging".to_owned()
    }
}

fn normal_forward(s: &StatusSnapshot) -> bool {
    forward_charge_ready(s) && s.all_clear(FORWARD_REGULATION)
}

fn charging_phase(s: &StatusSnapshot) -> String {
    match phase_label(s) {
        Some(phase) => format!("Charging from adapter ({phase})"),
        None => "Charging from adapter".to_owned(),
    }
}

fn normal_reverse(s: &StatusSnapshot) -> bool {
    !reverse_blocked(s)
        && s.all_clear(OTG_FAULTS)
        && s.is_set(EnOtg)
        && input_fets_driven(s)
        && not_charging(s)
        && s.all_clear(REVERSE_REGULATION)
        && otg_vbus(s)
}

#[cfg(test)]
mod tests {
    use strum::IntoEnumIterator;

    use super::*;
    use crate::{classify::fixtures, Severity};

    fn state(s: &StatusSnapshot) -> InputState {
        classify(s).state
    }

    #[test]
    fn table_lists_states_in_order() {
        let table = RuleTable::new(rules()).unwrap();
        let expected = InputState::iter().filter(|s| *s != InputState::Unclassified);
        assert!(table.states().eq(expected));
    }

    #[test]
    fn empty_snapshot_is_disconnected() {
        let c = classify(&StatusSnapshot::new());
        assert_eq!(c.state, InputState::Disconnected);
        assert_eq!(c.narrative, "");
        assert_eq!(c.severity, Severity::Ok);
    }

    #[test]
    fn charging_is_normal_forward() {
        let c = classify(&fixtures::charging());
        assert_eq!(c.state, InputState::NormalForward);
        assert_eq!(c.narrative, "Charging from adapter (Fast Charge)");
    }

    #[test]
    fn input_current_limit_is_regulation() {
        let c = classify(&fixtures::charging().with("IINDPM_STAT", 1.));
        assert_eq!(c.state, InputState::RegulationForward);
        assert_eq!(c.severity, Severity::Warning);
        assert_eq!(c.narrative, "Input current limit (IINDPM)");
    }

    #[test]
    fn charge_done_pauses_input() {
        let c = classify(&fixtures::charging().with("CHG_STAT_2_0", 7.));
        assert_eq!(c.state, InputState::IdleChargePaused);
        assert_eq!(c.narrative, "Adapter idle, charge complete");
    }

    #[test]
    fn hot_battery_pauses_input() {
        let s = fixtures::charging()
            .with("CHG_STAT_2_0", 0.)
            .with("TS_HOT_STAT", 1.);
        let c = classify(&s);
        assert_eq!(c.state, InputState::IdleChargePaused);
        assert_eq!(c.narrative, "Charge paused: battery temperature out of range");
    }

    #[test]
    fn vbus_over_voltage_is_forward_fault() {
        let c = classify(&fixtures::charging().with("VBUS_OVP_STAT", 1.));
        assert_eq!(c.state, InputState::FaultForward);
        assert_eq!(c.severity, Severity::Error);
        assert_eq!(c.narrative, "Input fault: VBUS over-voltage");
    }

    #[test]
    fn missing_power_good_is_forward_fault() {
        let c = classify(&fixtures::charging().with("PG_STAT", 0.));
        assert_eq!(c.state, InputState::FaultForward);
        assert_eq!(c.narrative, "Input fault: power not good");
    }

    #[test]
    fn otg_states() {
        assert_eq!(state(&fixtures::otg()), InputState::NormalReverse);
        assert_eq!(
            state(&fixtures::otg().with("IBAT_REG_STAT", 1.)),
            InputState::RegulationReverse
        );
        let c = classify(&fixtures::otg().with("OTG_UVP_STAT", 1.));
        assert_eq!(c.state, InputState::FaultReverse);
        assert_eq!(c.narrative, "OTG fault: output under-voltage");
    }

    #[test]
    fn thermal_shutdown_gates_input() {
        let s = fixtures::charging()
            .with("CHG_STAT_2_0", 0.)
            .with("TSHUT_STAT", 1.);
        let c = classify(&s);
        assert_eq!(c.state, InputState::GatedByProtection);
        assert_eq!(c.severity, Severity::Idle);
        assert_eq!(c.narrative, "Input gated: thermal shutdown");
    }

    #[test]
    fn hiz_gates_input() {
        let s = fixtures::charging()
            .with("CHG_STAT_2_0", 0.)
            .with("EN_HIZ", 1.);
        assert_eq!(state(&s), InputState::GatedByProtection);
    }

    #[test]
    fn undriven_fet_pair_is_open() {
        let s = fixtures::charging()
            .with("CHG_STAT_2_0", 0.)
            .with("ACRB1_STAT", 1.)
            .with("EN_ACDRV1", 0.);
        assert_eq!(state(&s), InputState::MosfetsOpen);
    }

    #[test]
    fn sentinel_flags_are_not_treated_as_set() {
        let s = fixtures::charging().with("VBUS_OVP_STAT", -1.);
        assert_eq!(state(&s), InputState::NormalForward);
    }
}
