//! Battery path: chip to and from the battery

use lazy_static::lazy_static;

use super::{
    conditions::*,
    rules::{Rule, RuleTable},
};
use crate::{BatteryState, Field, Field::*, PathClassification, StatusSnapshot};

lazy_static! {
    static ref TABLE: RuleTable<BatteryState> = RuleTable::new(rules())
        .unwrap_or_else(|err| panic!("battery path table is malformed: {err}"));
}

pub(crate) fn classify(snapshot: &StatusSnapshot) -> PathClassification<BatteryState> {
    TABLE.evaluate(snapshot)
}

fn rules() -> Vec<Rule<BatteryState>> {
    vec![
        Rule::new(BatteryState::Disconnected, disconnected, disconnected_cause),
        Rule::new(BatteryState::ProtectedShutdown, protected_shutdown, |_| {
            "Battery over-current, ship FET opened".to_owned()
        }),
        Rule::new(BatteryState::Fault, fault, fault_cause),
        Rule::new(
            BatteryState::ReverseAssistFault,
            reverse_assist_fault,
            reverse_assist_cause,
        ),
        Rule::new(BatteryState::MosfetsOpen, mosfets_open, |_| {
            "OTG from battery blocked, input MOSFET pair open".to_owned()
        }),
        Rule::new(
            BatteryState::RegulationForward,
            regulation_forward,
            regulation_forward_cause,
        ),
        Rule::new(
            BatteryState::RegulationReverse,
            regulation_reverse,
            regulation_reverse_cause,
        ),
        Rule::new(BatteryState::ReverseClean, reverse_clean, |_| {
            "Battery supplying OTG".to_owned()
        }),
        Rule::new(
            BatteryState::ChargeDisabledByUser,
            charge_disabled,
            charge_disabled_cause,
        ),
        Rule::new(BatteryState::NormalForward, normal_forward, charging_phase),
    ]
}

/// Battery absent, isolated by the ship FET, or fully charged with nothing flowing
fn disconnected(s: &StatusSnapshot) -> bool {
    s.is_clear(VbatPresent) || !ship_fet_idle(s) || charge_complete(s)
}

fn disconnected_cause(s: &StatusSnapshot) -> String {
    if s.is_clear(VbatPresent) {
        String::new()
    } else if !ship_fet_idle(s) {
        format!("Battery isolated by ship FET ({})", ship_fet_mode(s))
    } else {
        "Charge complete".to_owned()
    }
}

fn protected_shutdown(s: &StatusSnapshot) -> bool {
    s.is_set(IbatOcp) && s.is_set(SfetPresent) && s.is_set(EnBatOcp)
}

fn fault(s: &StatusSnapshot) -> bool {
    s.any_set(&[TsCold, TsHot, VbatOvp, IbatOcp])
        && s.is_set(VbatPresent)
        && not_charging(s)
        && ship_fet_idle(s)
}

fn fault_cause(s: &StatusSnapshot) -> String {
    first_cause(
        s,
        &[
            (VbatOvp, "Battery fault: over-voltage"),
            (IbatOcp, "Battery fault: discharge over-current"),
            (TsHot, "Battery fault: too hot"),
            (TsCold, "Battery fault: too cold"),
        ],
        "Battery fault",
    )
}

/// Conditions that keep the adapter from feeding the system
const INPUT_BLOCKERS: &[(Field, &str)] = &[
    (VbusOvp, "VBUS over-voltage"),
    (VacOvp, "VAC over-voltage"),
    (IbusOcp, "input over-current"),
    (VsysOvp, "system over-voltage"),
    (VsysShort, "system short"),
    (Tshut, "thermal shutdown"),
    (OtgOvp, "OTG over-voltage"),
    (OtgUvp, "OTG under-voltage"),
    (VbatOtgLow, "battery too low for OTG"),
    (EnHiz, "HIZ mode"),
];

/// The battery carries the system because the input can't
fn reverse_assist_fault(s: &StatusSnapshot) -> bool {
    let input_unavailable = s.is_clear(VbusPresent)
        || s.is_clear(PowerGood)
        || INPUT_BLOCKERS.iter().any(|(f, _)| s.is_set(*f));
    input_unavailable
        && not_charging(s)
        && ship_fet_idle(s)
        && s.all_clear(BATTERY_FAULTS)
        && (s.is_clear(EnOtg) || input_fets_driven(s))
        && s.is_set(VbatPresent)
}

fn reverse_assist_cause(s: &StatusSnapshot) -> String {
    if s.is_clear(VbusPresent) {
        return "Battery supplying system, no input".to_owned();
    }
    let cause = first_cause(s, INPUT_BLOCKERS, "power not good");
    format!("Battery supplying system, input blocked by {cause}")
}

fn mosfets_open(s: &StatusSnapshot) -> bool {
    !reverse_blocked(s)
        && s.is_set(EnOtg)
        && s.is_set(VbatPresent)
        && s.all_clear(CELL_OR_OTG_FAULTS)
        && input_fets_open(s)
        && not_charging(s)
        && ship_fet_idle(s)
}

fn system_above_battery(s: &StatusSnapshot) -> bool {
    s.value(VsysAdc) > s.value(VbatAdc)
}

fn regulation_forward(s: &StatusSnapshot) -> bool {
    forward_charge_ready(s) && s.any_set(FORWARD_REGULATION) && system_above_battery(s)
}

fn regulation_forward_cause(s: &StatusSnapshot) -> String {
    first_cause(
        s,
        &[
            (IbatReg, "Charge current limited by battery regulation"),
            (Treg, "Charge current limited by thermal regulation"),
            (Iindpm, "Charge current limited by input current limit"),
            (Vindpm, "Charge current limited by input voltage limit"),
        ],
        "Charge current limited",
    )
}

/// Battery discharges under a regulation loop, either into OTG or topping up the system
///
/// With the adapter present the VSYS/VBAT comparison decides whether the battery is the throttled
/// source: at or below VBAT the system is pulling from the battery.
fn regulation_reverse(s: &StatusSnapshot) -> bool {
    let otg = s.is_set(EnOtg)
        && s.all_clear(&[TsCold, Tshut, OtgOvp, OtgUvp])
        && s.any_set(REVERSE_REGULATION)
        && not_charging(s);
    let supplement = s.is_set(VbusPresent)
        && s.is_set(PowerGood)
        && s.is_clear(EnOtg)
        && s.is_clear(TsCold)
        && s.any_set(FORWARD_REGULATION)
        && !system_above_battery(s);
    !reverse_blocked(s)
        && s.is_set(VbatPresent)
        && (otg || supplement)
        && s.all_clear(&[TsHot, VbatOtgLow, VbatOvp, IbatOcp])
        && input_fets_driven(s)
        && ship_fet_idle(s)
}

fn regulation_reverse_cause(s: &StatusSnapshot) -> String {
    if s.is_set(EnOtg) {
        "Battery supplying OTG under regulation".to_owned()
    } else {
        "Battery supplementing system, input at limit".to_owned()
    }
}

fn reverse_clean(s: &StatusSnapshot) -> bool {
    !reverse_blocked(s)
        && s.is_set(EnOtg)
        && s.is_set(VbatPresent)
        && s.is_set(VbusPresent)
        && s.all_clear(CELL_OR_OTG_FAULTS)
        && otg_vbus(s)
        && input_fets_driven(s)
        && s.all_clear(REVERSE_REGULATION)
        && not_charging(s)
        && ship_fet_idle(s)
}

fn charge_disabled(s: &StatusSnapshot) -> bool {
    !forward_blocked(s)
        && s.is_clear(EnOtg)
        && s.is_set(VbatPresent)
        && s.is_set(VbusPresent)
        && s.all_clear(CELL_OR_OTG_FAULTS)
        && s.value(VbusStat) != 0.
        && input_fets_driven(s)
        && not_charging(s)
        && s.all_clear(FORWARD_REGULATION)
        && ship_fet_idle(s)
}

fn charge_disabled_cause(s: &StatusSnapshot) -> String {
    if s.is_clear(EnChg) {
        "Charging disabled by user (EN_CHG=0)".to_owned()
    } else {
        "Charger idle, battery not charging".to_owned()
    }
}

fn normal_forward(s: &StatusSnapshot) -> bool {
    forward_charge_ready(s) && s.all_clear(FORWARD_REGULATION)
}

fn charging_phase(s: &StatusSnapshot) -> String {
    match phase_label(s) {
        Some(phase) => format!("Battery charging ({phase})"),
        None => "Battery charging".to_owned(),
    }
}
