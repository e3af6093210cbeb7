//! Composite conditions shared by the input and battery path tables
//!
//! All predicates compare with `== 1` / `== 0`, so a sentinel value satisfies neither polarity.

use crate::{catalog::CHG_STAT_LABELS, model::option_label, Catalog, Field, StatusSnapshot};

use Field::*;

/// Faults that stop power flowing in either direction
const PROTECTION: &[Field] = &[
    VbusOvp, VsysOvp, VbatOvp, IbusOcp, Tshut, OtgOvp, OtgUvp, EnHiz, VacOvp, VsysShort,
];

/// Faults that end an OTG session
pub(crate) const OTG_FAULTS: &[Field] = &[TsCold, TsHot, OtgOvp, OtgUvp, VbatOtgLow];

/// Battery-side faults that stop charging and discharging
pub(crate) const BATTERY_FAULTS: &[Field] = &[VbatOtgLow, TsCold, TsHot, VbatOvp, IbatOcp];

/// Battery faults plus the chip-level faults that also end OTG
pub(crate) const CELL_OR_OTG_FAULTS: &[Field] = &[
    VbatOtgLow, TsCold, TsHot, VbatOvp, IbatOcp, Tshut, OtgOvp, OtgUvp,
];

pub(crate) const FORWARD_REGULATION: &[Field] = &[Vindpm, Iindpm, IbatReg, Treg];
pub(crate) const REVERSE_REGULATION: &[Field] = &[Iindpm, IbatReg, Treg];
pub(crate) const SAFETY_TIMERS: &[Field] = &[ChgTmr, TrichgTmr, PrechgTmr];

/// Protection blocks the reverse (OTG) direction
pub(crate) fn reverse_blocked(s: &StatusSnapshot) -> bool {
    s.any_set(PROTECTION)
        || (s.is_set(EnOtg) && (s.is_set(TsCold) || s.is_set(TsHot)))
        || s.value(SdrvCtrl) != 0.
}

/// Protection blocks the forward (charging) direction, which also requires power good
pub(crate) fn forward_blocked(s: &StatusSnapshot) -> bool {
    reverse_blocked(s) || s.is_clear(PowerGood)
}

/// Both input FET pairs absent, or at least one driver turned on
pub(crate) fn input_fets_driven(s: &StatusSnapshot) -> bool {
    (s.is_clear(Acrb1) && s.is_clear(Acrb2)) || s.is_set(EnAcDrv1) || s.is_set(EnAcDrv2)
}

/// A FET pair is fitted but neither driver is on
pub(crate) fn input_fets_open(s: &StatusSnapshot) -> bool {
    (s.is_set(Acrb1) || s.is_set(Acrb2)) && s.is_clear(EnAcDrv1) && s.is_clear(EnAcDrv2)
}

pub(crate) fn any_input_present(s: &StatusSnapshot) -> bool {
    s.any_set(&[VbusPresent, Ac1Present, Ac2Present])
}

/// JEITA settings allow charging in the current temperature band
pub(crate) fn jeita_permits(s: &StatusSnapshot) -> bool {
    (s.is_clear(TsWarm) || (s.value(JeitaVset) != 0. && s.value(JeitaIsetH) != 0.))
        && (s.is_clear(TsCool) || s.value(JeitaIsetC) != 0.)
}

pub(crate) fn charge_stat(s: &StatusSnapshot) -> f64 {
    s.value(ChgStat)
}

/// Charge phase name from CHG_STAT
pub(crate) fn phase_label(s: &StatusSnapshot) -> Option<&'static str> {
    option_label(CHG_STAT_LABELS, charge_stat(s))
}

/// Charger is in one of the active phases, trickle through top-off
pub(crate) fn charging(s: &StatusSnapshot) -> bool {
    let stat = charge_stat(s);
    stat != 0. && stat != 7.
}

pub(crate) fn not_charging(s: &StatusSnapshot) -> bool {
    charge_stat(s) == 0.
}

pub(crate) fn charge_done(s: &StatusSnapshot) -> bool {
    charge_stat(s) == 7.
}

/// Watchdog expiry is not holding off charging
pub(crate) fn watchdog_permits(s: &StatusSnapshot) -> bool {
    s.is_clear(StopWdChg) || s.is_clear(WdStat)
}

pub(crate) fn watchdog_suspended(s: &StatusSnapshot) -> bool {
    s.is_set(StopWdChg) && s.is_set(WdStat)
}

pub(crate) fn ship_fet_idle(s: &StatusSnapshot) -> bool {
    s.value(SdrvCtrl) == 0.
}

/// Display label of the ship FET mode
pub(crate) fn ship_fet_mode(s: &StatusSnapshot) -> String {
    Catalog::builtin()
        .decode(SdrvCtrl.key(), s.value(SdrvCtrl))
        .to_string()
}

pub(crate) fn otg_vbus(s: &StatusSnapshot) -> bool {
    s.value(VbusStat) == 7.
}

/// Charging conditions shared by the forward-normal and forward-regulation rules
///
/// Everything but the regulation loops and the VSYS/VBAT comparison.
pub(crate) fn forward_charge_ready(s: &StatusSnapshot) -> bool {
    !forward_blocked(s)
        && s.is_set(VbusPresent)
        && s.is_set(VbatPresent)
        && s.is_clear(EnOtg)
        && input_fets_driven(s)
        && charging(s)
        && s.all_clear(SAFETY_TIMERS)
        && s.all_clear(&[TsCold, TsHot, VbatOtgLow, VbatOvp, IbatOcp])
        && watchdog_permits(s)
        && ship_fet_idle(s)
        && jeita_permits(s)
}

/// Charge terminated cleanly with the adapter still connected
pub(crate) fn charge_complete(s: &StatusSnapshot) -> bool {
    !forward_blocked(s)
        && s.is_set(VbusPresent)
        && s.is_set(VbatPresent)
        && charge_done(s)
        && s.is_clear(EnOtg)
        && s.all_clear(CELL_OR_OTG_FAULTS)
        && s.all_clear(FORWARD_REGULATION)
        && input_fets_driven(s)
        && jeita_permits(s)
}

/// Describe the first set field from `causes`, or `fallback` when none is set
pub(crate) fn first_cause(
    s: &StatusSnapshot,
    causes: &[(Field, &'static str)],
    fallback: &'static str,
) -> String {
    causes
        .iter()
        .find(|(f, _)| s.is_set(*f))
        .map_or(fallback, |(_, text)| *text)
        .to_owned()
}
