//! Built-in register and dependency tables for the BQ25672

use crate::{Access, DependencyRule, RegisterDescriptor, RegisterKind, ValueRange};

const ENABLED: &[(i64, &str)] = &[(0, "Disabled"), (1, "Enabled")];
/// Polarity of the `*_DIS` bits
const DISABLED: &[(i64, &str)] = &[(0, "Enabled"), (1, "Disabled")];
const YES_NO: &[(i64, &str)] = &[(0, "No"), (1, "Yes")];
const ON_OFF: &[(i64, &str)] = &[(0, "Off"), (1, "On")];
const FLAG: &[(i64, &str)] = &[(0, "Clear"), (1, "Set")];
const MASK: &[(i64, &str)] = &[(0, "Interrupt"), (1, "Masked")];

pub(crate) const CHG_STAT_LABELS: &[(i64, &str)] = &[
    (0, "Not Charging"),
    (1, "Trickle"),
    (2, "Pre-charge"),
    (3, "Fast Charge"),
    (4, "Taper"),
    (5, "Reserved"),
    (6, "Top-off"),
    (7, "Done"),
];

pub(crate) const VBUS_STAT_LABELS: &[(i64, &str)] = &[
    (0, "No Input"),
    (1, "SDP"),
    (2, "CDP"),
    (3, "DCP"),
    (4, "HVDCP"),
    (5, "Unknown"),
    (6, "Non-Standard"),
    (7, "OTG"),
    (8, "Not Qualified"),
];

const ICO_STAT_LABELS: &[(i64, &str)] = &[
    (0, "Disabled"),
    (1, "In Progress"),
    (2, "Done"),
    (3, "Reserved"),
];

const fn descriptor(
    name: &'static str,
    kind: RegisterKind,
    access: Access,
    options: &'static [(i64, &'static str)],
    explanation: &'static str,
) -> RegisterDescriptor {
    RegisterDescriptor {
        name,
        aliases: &[],
        kind,
        access,
        unit: None,
        range: None,
        options,
        explanation,
    }
}

const fn toggle(
    name: &'static str,
    options: &'static [(i64, &'static str)],
    explanation: &'static str,
) -> RegisterDescriptor {
    descriptor(name, RegisterKind::Boolean, Access::ReadWrite, options, explanation)
}

const fn select(
    name: &'static str,
    options: &'static [(i64, &'static str)],
    explanation: &'static str,
) -> RegisterDescriptor {
    descriptor(name, RegisterKind::Enum, Access::ReadWrite, options, explanation)
}

const fn number(
    name: &'static str,
    unit: &'static str,
    (min, max, step): (f64, f64, f64),
    explanation: &'static str,
) -> RegisterDescriptor {
    RegisterDescriptor {
        unit: Some(unit),
        range: Some(ValueRange::new(min, max, step)),
        ..descriptor(name, RegisterKind::Numeric, Access::ReadWrite, &[], explanation)
    }
}

const fn command(name: &'static str, explanation: &'static str) -> RegisterDescriptor {
    descriptor(name, RegisterKind::Command, Access::ReadWrite, &[], explanation)
}

const fn flag(name: &'static str, explanation: &'static str) -> RegisterDescriptor {
    descriptor(name, RegisterKind::Boolean, Access::ReadOnly, FLAG, explanation)
}

const fn status(
    name: &'static str,
    options: &'static [(i64, &'static str)],
    explanation: &'static str,
) -> RegisterDescriptor {
    descriptor(name, RegisterKind::Enum, Access::ReadOnly, options, explanation)
}

const fn reading(
    name: &'static str,
    unit: Option<&'static str>,
    explanation: &'static str,
) -> RegisterDescriptor {
    RegisterDescriptor {
        unit,
        ..descriptor(name, RegisterKind::Numeric, Access::ReadOnly, &[], explanation)
    }
}

const fn aliased(
    aliases: &'static [&'static str],
    descriptor: RegisterDescriptor,
) -> RegisterDescriptor {
    RegisterDescriptor {
        aliases,
        ..descriptor
    }
}

macro_rules! mask {
    ($name:literal, $source:literal) => {
        toggle(
            $name,
            MASK,
            concat!(
                "Masks the ",
                $source,
                " interrupt. When set, the event still updates its flag but does not pulse INT."
            ),
        )
    };
}

/// Every register the dashboard knows about, in device register order
#[rustfmt::skip]
pub(crate) fn registers() -> Vec<RegisterDescriptor> {
    vec![
        // Charge and system configuration
        number("VSYSMIN_5_0", "mV", (2500., 16000., 250.),
            "Minimum system voltage. The chip keeps SYS above this level even with a flat or \
             missing battery so the host does not brown out."),
        number("VREG_10_0", "mV", (3000., 18800., 10.),
            "Charge voltage limit for the constant-voltage phase. Must match the battery \
             chemistry, e.g. 4.2 V per Li-ion cell; setting it too high is hazardous."),
        number("ICHG_8_0", "mA", (50., 3000., 10.),
            "Fast charge current for the constant-current phase. Choose it from the battery \
             capacity and its maximum C-rate."),
        number("VINDPM_7_0", "mV", (3600., 22000., 100.),
            "Input voltage limit. When VBUS sags to this threshold the chip reduces charge \
             current so the adapter does not collapse."),
        number("IINDPM_8_0", "mA", (100., 3300., 10.),
            "Input current limit. Normally set by adapter detection, can be lowered manually \
             for weak adapters."),
        number("VOTG_10_0", "mV", (2800., 22000., 10.),
            "Output voltage regulated on VBUS in OTG (power bank) mode."),
        number("IOTG_6_0", "mA", (160., 3360., 40.),
            "Output current limit in OTG mode. Protects the battery from excessive discharge."),
        number("IPRECHG_5_0", "mA", (40., 2000., 40.),
            "Pre-charge current for deeply discharged batteries."),
        number("ITERM_4_0", "mA", (40., 1000., 40.),
            "Termination current. Charging completes when the constant-voltage current falls \
             to this level."),
        number("VRECHG_3_0", "mV", (50., 800., 50.),
            "Recharge threshold below VREG. A new charge cycle starts when the battery drops \
             this far below the charge voltage."),
        select("CELL_1_0", &[(1, "1s"), (2, "2s"), (3, "3s"), (4, "4s")],
            "Number of battery cells in series. Determines the default VREG and VSYSMIN; \
             changing it resets those registers."),
        select("VBAT_LOWV_1_0",
            &[(0, "15% VREG"), (1, "62.2% VREG"), (2, "66.7% VREG"), (3, "71.4% VREG")],
            "Battery voltage, as a fraction of VREG, at which pre-charge hands over to fast \
             charge."),
        select("TRECHG_1_0", &[(0, "64ms"), (1, "256ms"), (2, "1024ms"), (3, "2048ms")],
            "Deglitch time for the recharge threshold."),
        select("VAC_OVP_1_0", &[(0, "26V"), (1, "18V"), (2, "12V"), (3, "7V")],
            "Over-voltage threshold on VAC1 and VAC2, ahead of the input FETs."),
        select("IBAT_REG_1_0", &[(0, "3A"), (1, "4A"), (2, "5A"), (3, "Disabled")],
            "Battery discharge current limit in OTG mode. The chip lowers the OTG output \
             voltage when the limit is reached."),
        // Input control
        toggle("EN_CHG", ENABLED,
            "Master charge enable. When 0 the battery is never charged, even with an adapter \
             connected."),
        toggle("EN_ICO", ENABLED,
            "Input current optimizer. Searches for the highest current an unknown adapter \
             can deliver and sets IINDPM from it."),
        command("FORCE_ICO", "Runs the input current optimizer now."),
        toggle("EN_HIZ", ENABLED,
            "High-impedance mode. Disconnects the converter from VBUS so the system runs from \
             the battery while the adapter stays plugged in."),
        toggle("EN_TERM", ENABLED,
            "Automatic charge termination. When disabled, charging continues until stopped \
             by software."),
        toggle("EN_IBAT", ENABLED,
            "Enables battery discharge current sensing so IBAT reads discharge current."),
        toggle("EN_IINDPM", ENABLED, "Applies the IINDPM register as input current limit."),
        toggle("EN_EXTILIM", ENABLED,
            "Applies the analog ILIM_HIZ pin voltage as input current limit."),
        toggle("EN_OTG", ENABLED, "Enables OTG (power bank) mode."),
        toggle("EN_ACDRV1", ON_OFF, "Turns on the input 1 FET pair in dual-input setups."),
        toggle("EN_ACDRV2", ON_OFF, "Turns on the input 2 FET pair in dual-input setups."),
        toggle("DIS_ACDRV", DISABLED, "Input FET drivers. Disabling turns off both pairs at once."),
        command("FORCE_VINDPM_DET",
            "Measures VBUS without load and updates the VINDPM threshold."),
        toggle("EN_MPPT", ENABLED,
            "Maximum power point tracking for solar panel inputs."),
        // Ship FET
        aliased(&["SDRV_CTRL"], select("SDRV_CTRL_1_0",
            &[(0, "IDLE"), (1, "Shutdown"), (2, "Ship Mode"), (3, "Reset")],
            "External ship FET control. IDLE for normal use, Shutdown, Ship Mode for lowest \
             storage current, or Reset for a system power-on reset.")),
        toggle("SFET_PRESENT", YES_NO,
            "Hardware configuration: whether a ship FET is fitted. Ship FET features depend \
             on it."),
        select("SDRV_DLY", &[(0, "10s Delay"), (1, "No Delay")],
            "Delay before an SDRV_CTRL action takes effect."),
        select("WKUP_DLY", &[(0, "1s"), (1, "15ms")],
            "How long QON must be held low to leave ship mode."),
        // Timers
        toggle("STOP_WD_CHG", YES_NO, "Whether watchdog expiry stops charging."),
        select("PRECHG_TMR", &[(0, "2h"), (1, "0.5h")], "Pre-charge safety timer length."),
        select("TOPOFF_TMR_1_0", &[(0, "Disabled"), (1, "15min"), (2, "30min"), (3, "45min")],
            "Top-off timer. Keeps charging at constant voltage for a short time after \
             termination."),
        toggle("EN_TRICHG_TMR", ENABLED, "Trickle charge safety timer."),
        toggle("EN_PRECHG_TMR", ENABLED, "Pre-charge safety timer."),
        toggle("EN_CHG_TMR", ENABLED, "Fast charge safety timer."),
        select("CHG_TMR_1_0", &[(0, "5h"), (1, "8h"), (2, "12h"), (3, "24h")],
            "Fast charge safety timer length."),
        toggle("TMR2X_EN", ENABLED,
            "Runs the safety timers at half speed while charge current is reduced by \
             regulation."),
        toggle("EN_AUTO_IBATDIS", ENABLED,
            "Applies a discharge current automatically on battery over-voltage."),
        command("FORCE_IBATDIS", "Applies the battery discharge current now."),
        select("WATCHDOG_2_0",
            &[(0, "Disabled"), (1, "0.5s"), (2, "1s"), (3, "2s"), (4, "20s"), (5, "40s"),
              (6, "80s"), (7, "160s")],
            "Watchdog period. The host must reset the watchdog periodically or the registers \
             return to their defaults."),
        command("WD_RST", "Resets the watchdog timer."),
        command("REG_RST", "Resets all registers to their default values."),
        // Adapter detection
        command("FORCE_INDET", "Reruns D+/D- adapter detection."),
        toggle("AUTO_INDET_EN", ENABLED, "Runs adapter detection automatically on plug-in."),
        toggle("EN_12V", ENABLED, "Allows requesting 12 V from an HVDCP adapter."),
        toggle("EN_9V", ENABLED, "Allows requesting 9 V from an HVDCP adapter."),
        toggle("HVDCP_EN", ENABLED, "Enables the high-voltage dedicated charging port handshake."),
        // Converter
        toggle("PFM_OTG_DIS", DISABLED,
            "Pulse frequency modulation in OTG mode. Disabling lowers light-load efficiency."),
        toggle("PFM_FWD_DIS", DISABLED, "Pulse frequency modulation in charge mode."),
        toggle("DIS_LDO", DISABLED, "Battery FET LDO mode during pre-charge."),
        toggle("DIS_OTG_OOA", DISABLED, "Out-of-audio mode in OTG, avoids audible noise."),
        toggle("DIS_FWD_OOA", DISABLED, "Out-of-audio mode in charge mode."),
        select("PWM_FREQ", &[(0, "1.5MHz"), (1, "750kHz")],
            "Converter switching frequency. 1.5 MHz allows smaller parts, 750 kHz is more \
             efficient."),
        toggle("DIS_STAT", DISABLED, "STAT pin output."),
        toggle("DIS_VSYS_SHORT", DISABLED, "System short-circuit protection."),
        toggle("DIS_VOTG_UVP", DISABLED, "OTG output under-voltage protection."),
        toggle("EN_IBUS_OCP", ENABLED, "Input over-current protection."),
        aliased(&["EN_BATOCP"], toggle("EN_BATOC", ENABLED,
            "Battery discharge over-current protection.")),
        // MPPT
        select("VOC_PCT_2_0",
            &[(0, "56.25%"), (1, "62.5%"), (2, "68.75%"), (3, "75%"), (4, "81.25%"),
              (5, "87.5%"), (6, "93.75%"), (7, "100%")],
            "MPPT operating point as a fraction of the panel open-circuit voltage."),
        select("VOC_DLY_1_0", &[(0, "50ms"), (1, "300ms"), (2, "2s"), (3, "5s")],
            "Settling delay before the panel open-circuit voltage is measured."),
        select("VOC_RATE_1_0", &[(0, "30s"), (1, "2min"), (2, "10min"), (3, "30min")],
            "Interval between panel open-circuit voltage measurements."),
        // Thermal
        select("TREG_1_0", &[(0, "60°C"), (1, "80°C"), (2, "100°C"), (3, "120°C")],
            "Die temperature at which thermal regulation starts reducing charge current."),
        select("TSHUT_1_0", &[(0, "150°C"), (1, "130°C"), (2, "120°C"), (3, "85°C")],
            "Die temperature at which the chip shuts down."),
        toggle("VBUS_PD_EN", ENABLED, "Internal pull-down on VBUS."),
        toggle("VAC1_PD_EN", ENABLED, "Internal pull-down on VAC1."),
        toggle("VAC2_PD_EN", ENABLED, "Internal pull-down on VAC2."),
        // JEITA
        aliased(&["JEITA_VSET_2"], select("JEITA_VSET_2_0",
            &[(0, "Suspend"), (1, "-800mV"), (2, "-600mV"), (3, "-400mV"), (4, "-300mV"),
              (5, "-200mV"), (6, "-100mV"), (7, "Unchanged")],
            "Charge voltage reduction in the warm JEITA range.")),
        aliased(&["JEITA_ISETH_1"], select("JEITA_ISETH_1_0",
            &[(0, "Suspend"), (1, "20% ICHG"), (2, "40% ICHG"), (3, "Unchanged")],
            "Charge current in the warm JEITA range.")),
        aliased(&["JEITA_ISETC_1"], select("JEITA_ISETC_1_0",
            &[(0, "Suspend"), (1, "20% ICHG"), (2, "40% ICHG"), (3, "Unchanged")],
            "Charge current in the cool JEITA range.")),
        select("TS_COOL_1_0", &[(0, "5°C"), (1, "10°C"), (2, "15°C"), (3, "20°C")],
            "Boundary between the cold and cool JEITA ranges."),
        select("TS_WARM_1_0", &[(0, "40°C"), (1, "45°C"), (2, "50°C"), (3, "55°C")],
            "Boundary between the normal and warm JEITA ranges."),
        select("BHOT_1_0", &[(0, "55°C"), (1, "60°C"), (2, "65°C"), (3, "Disabled")],
            "Battery hot limit for OTG operation."),
        select("BCOLD", &[(0, "-10°C"), (1, "-20°C")], "Battery cold limit for OTG operation."),
        toggle("TS_IGNORE", YES_NO,
            "Ignores the TS pin battery temperature monitoring entirely. Not recommended."),
        // ADC control
        toggle("ADC_EN", ENABLED, "Master ADC enable. Can be turned off to save power."),
        select("ADC_RATE", &[(0, "Continuous"), (1, "One Shot")], "ADC conversion mode."),
        select("ADC_SAMPLE_1_0",
            &[(0, "15-bit"), (1, "14-bit"), (2, "13-bit"), (3, "12-bit")],
            "ADC resolution. Higher resolution converts more slowly."),
        toggle("ADC_AVG", ENABLED, "Running average of ADC results."),
        select("ADC_AVG_INIT", &[(0, "Use Existing"), (1, "Use New")],
            "Whether averaging starts from the existing value or a fresh conversion."),
        toggle("IBUS_ADC_DIS", DISABLED, "IBUS ADC channel."),
        toggle("IBAT_ADC_DIS", DISABLED, "IBAT ADC channel."),
        toggle("VBUS_ADC_DIS", DISABLED, "VBUS ADC channel."),
        toggle("VBAT_ADC_DIS", DISABLED, "VBAT ADC channel."),
        toggle("VSYS_ADC_DIS", DISABLED, "VSYS ADC channel."),
        toggle("TS_ADC_DIS", DISABLED, "TS ADC channel."),
        toggle("TDIE_ADC_DIS", DISABLED, "Die temperature ADC channel."),
        toggle("DP_ADC_DIS", DISABLED, "D+ ADC channel."),
        toggle("DM_ADC_DIS", DISABLED, "D- ADC channel."),
        toggle("VAC1_ADC_DIS", DISABLED, "VAC1 ADC channel."),
        toggle("VAC2_ADC_DIS", DISABLED, "VAC2 ADC channel."),
        select("DPLUS_DAC_2_0",
            &[(0, "HIZ"), (1, "0V"), (2, "0.6V"), (3, "1.2V"), (4, "2.0V"), (5, "2.7V"),
              (6, "3.3V"), (7, "D+/D- Short")],
            "Drives D+ to a fixed level, used to emulate adapter types."),
        select("DMINUS_DAC_2_0",
            &[(0, "HIZ"), (1, "0V"), (2, "0.6V"), (3, "1.2V"), (4, "2.0V"), (5, "2.7V"),
              (6, "3.3V"), (7, "Reserved")],
            "Drives D- to a fixed level."),
        // Status
        status("CHG_STAT_2_0", CHG_STAT_LABELS, "Current charge phase."),
        status("VBUS_STAT_3_0", VBUS_STAT_LABELS,
            "Adapter type reported by D+/D- detection."),
        status("ICO_STAT_1_0", ICO_STAT_LABELS, "Input current optimizer state."),
        flag("VBUS_PRESENT_STAT", "A valid voltage is present on VBUS."),
        flag("AC1_PRESENT_STAT", "A source is present on VAC1."),
        flag("AC2_PRESENT_STAT", "A source is present on VAC2."),
        flag("PG_STAT", "The input source is good and stable."),
        flag("VBAT_PRESENT_STAT", "A battery is connected and its voltage is acceptable."),
        flag("VSYS_STAT",
            "The system is in minimum system voltage regulation, the battery is below \
             VSYSMIN."),
        flag("IINDPM_STAT", "The input current limit is active."),
        flag("VINDPM_STAT", "The input voltage limit is active."),
        flag("WD_STAT", "The watchdog expired and registers returned to defaults."),
        flag("BC1_2_DONE_STAT", "BC1.2 adapter detection finished."),
        flag("TREG_STAT", "Charge current is reduced by thermal regulation."),
        flag("DPDM_STAT", "D+/D- detection is running."),
        flag("ACRB1_STAT", "Input 1 FET pair was detected at power-up."),
        flag("ACRB2_STAT", "Input 2 FET pair was detected at power-up."),
        flag("ADC_DONE_STAT", "One-shot ADC conversion finished."),
        flag("CHG_TMR_STAT", "The fast charge safety timer expired."),
        flag("TRICHG_TMR_STAT", "The trickle charge safety timer expired."),
        flag("PRECHG_TMR_STAT", "The pre-charge safety timer expired."),
        flag("VBATOTG_LOW_STAT", "The battery is too low to enable OTG mode."),
        flag("TS_COLD_STAT", "Battery temperature is in the cold range."),
        flag("TS_COOL_STAT", "Battery temperature is in the cool range."),
        flag("TS_WARM_STAT", "Battery temperature is in the warm range."),
        flag("TS_HOT_STAT", "Battery temperature is in the hot range."),
        flag("IBAT_REG_STAT", "Battery discharge current is limited in OTG mode."),
        flag("VBUS_OVP_STAT", "VBUS over-voltage fault."),
        flag("VBAT_OVP_STAT", "Battery over-voltage fault."),
        flag("IBUS_OCP_STAT", "Input over-current fault."),
        flag("IBAT_OCP_STAT", "Battery discharge over-current fault."),
        flag("CONV_OCP_STAT", "Converter over-current fault."),
        flag("VAC1_OVP_STAT", "VAC1 over-voltage fault."),
        flag("VAC2_OVP_STAT", "VAC2 over-voltage fault."),
        flag("VAC_OVP_STAT", "Over-voltage fault on either VAC input."),
        flag("VSYS_SHORT_STAT", "System short-circuit fault."),
        flag("VSYS_OVP_STAT", "System over-voltage fault."),
        flag("OTG_OVP_STAT", "OTG output over-voltage fault."),
        flag("OTG_UVP_STAT", "OTG output under-voltage fault."),
        flag("TSHUT_STAT", "Thermal shutdown: the die reached its critical temperature."),
        // Readings
        reading("IBUS_ADC_15_0", Some("mA"), "Input current measured by the ADC."),
        reading("IBAT_ADC_15_0", Some("mA"),
            "Battery current measured by the ADC, positive when charging."),
        reading("VBUS_ADC_15_0", Some("mV"), "VBUS voltage measured by the ADC."),
        reading("VAC1_ADC_15_0", Some("mV"), "VAC1 voltage ahead of the input FETs."),
        reading("VAC2_ADC_15_0", Some("mV"), "VAC2 voltage ahead of the input FETs."),
        reading("VBAT_ADC_15_0", Some("mV"), "Battery voltage measured by the ADC."),
        reading("VSYS_ADC_15_0", Some("mV"), "System rail voltage measured by the ADC."),
        reading("TS_ADC_15_0", Some("%"), "TS pin voltage as a percentage of REGN."),
        reading("TDIE_ADC_15_0", Some("°C"), "Die temperature."),
        reading("D_PLUS_ADC_15_0", Some("mV"), "D+ pin voltage, for debugging."),
        reading("D_MINUS_ADC_15_0", Some("mV"), "D- pin voltage, for debugging."),
        reading("ICO_ILIM_8_0", Some("mA"),
            "Input current limit found by the last optimizer run."),
        reading("PN_2_0", None, "Part number."),
        reading("DEV_REV_2_0", None, "Device revision."),
        // Interrupt masks
        mask!("IINDPM_MASK", "IINDPM"),
        mask!("VINDPM_MASK", "VINDPM"),
        mask!("WD_MASK", "watchdog"),
        mask!("POORSRC_MASK", "poor source"),
        mask!("PG_MASK", "power good"),
        mask!("AC2_PRESENT_MASK", "VAC2 presence"),
        mask!("AC1_PRESENT_MASK", "VAC1 presence"),
        mask!("VBUS_PRESENT_MASK", "VBUS presence"),
        mask!("CHG_MASK", "charge status"),
        mask!("ICO_MASK", "ICO status"),
        mask!("VBUS_MASK", "VBUS type"),
        mask!("TREG_MASK", "thermal regulation"),
        mask!("VBAT_PRESENT_MASK", "battery presence"),
        mask!("BC1_2_DONE_MASK", "BC1.2 done"),
        mask!("DPDM_DONE_MASK", "D+/D- done"),
        mask!("ADC_DONE_MASK", "ADC done"),
        mask!("VSYS_MASK", "VSYSMIN regulation"),
        mask!("CHG_TMR_MASK", "fast charge timer"),
        mask!("TRICHG_TMR_MASK", "trickle charge timer"),
        mask!("PRECHG_TMR_MASK", "pre-charge timer"),
        mask!("TOPOFF_TMR_MASK", "top-off timer"),
        mask!("VBATOTG_LOW_MASK", "battery too low for OTG"),
        mask!("TS_COLD_MASK", "TS cold"),
        mask!("TS_COOL_MASK", "TS cool"),
        mask!("TS_WARM_MASK", "TS warm"),
        mask!("TS_HOT_MASK", "TS hot"),
        mask!("IBAT_REG_MASK", "battery discharge regulation"),
        mask!("VBUS_OVP_MASK", "VBUS over-voltage"),
        mask!("VBAT_OVP_MASK", "battery over-voltage"),
        mask!("IBUS_OCP_MASK", "input over-current"),
        mask!("IBAT_OCP_MASK", "battery over-current"),
        mask!("CONV_OCP_MASK", "converter over-current"),
        mask!("VAC2_OVP_MASK", "VAC2 over-voltage"),
        mask!("VAC1_OVP_MASK", "VAC1 over-voltage"),
        mask!("VSYS_SHORT_MASK", "system short"),
        mask!("VSYS_OVP_MASK", "system over-voltage"),
        mask!("OTG_OVP_MASK", "OTG over-voltage"),
        mask!("OTG_UVP_MASK", "OTG under-voltage"),
        mask!("TSHUT_MASK", "thermal shutdown"),
    ]
}

const ADC_SETTINGS: &str = "ADC_EN must be enabled before changing ADC settings.";
const ADC_CHANNEL: &str = "ADC_EN must be enabled before switching ADC channels.";
const JEITA: &str = "TS_IGNORE must be off before changing JEITA settings.";
const OTG_TEMPERATURE: &str = "TS_IGNORE must be off before changing OTG temperature limits.";

const fn rule(
    target: &'static str,
    controller: &'static str,
    required: &'static str,
    message: &'static str,
) -> DependencyRule {
    DependencyRule {
        target,
        controller,
        required,
        message,
    }
}

/// Writes that are gated on another register's current value
#[rustfmt::skip]
pub(crate) fn dependencies() -> Vec<DependencyRule> {
    vec![
        rule("FORCE_ICO", "EN_ICO", "1", "EN_ICO must be enabled before running this command."),
        rule("SDRV_CTRL_1_0", "SFET_PRESENT", "1",
            "SFET_PRESENT must be set before controlling the ship FET."),
        rule("EN_BATOC", "SFET_PRESENT", "1",
            "SFET_PRESENT must be set before enabling battery over-current protection."),
        rule("EN_9V", "HVDCP_EN", "1", "HVDCP_EN must be enabled before requesting 9 V."),
        rule("EN_12V", "HVDCP_EN", "1", "HVDCP_EN must be enabled before requesting 12 V."),
        rule("ADC_RATE", "ADC_EN", "1", ADC_SETTINGS),
        rule("ADC_SAMPLE_1_0", "ADC_EN", "1", ADC_SETTINGS),
        rule("ADC_AVG", "ADC_EN", "1", ADC_SETTINGS),
        rule("ADC_AVG_INIT", "ADC_EN", "1", ADC_SETTINGS),
        rule("IBUS_ADC_DIS", "ADC_EN", "1", ADC_CHANNEL),
        rule("IBAT_ADC_DIS", "ADC_EN", "1", ADC_CHANNEL),
        rule("VBUS_ADC_DIS", "ADC_EN", "1", ADC_CHANNEL),
        rule("VBAT_ADC_DIS", "ADC_EN", "1", ADC_CHANNEL),
        rule("VSYS_ADC_DIS", "ADC_EN", "1", ADC_CHANNEL),
        rule("TS_ADC_DIS", "ADC_EN", "1", ADC_CHANNEL),
        rule("TDIE_ADC_DIS", "ADC_EN", "1", ADC_CHANNEL),
        rule("DP_ADC_DIS", "ADC_EN", "1", ADC_CHANNEL),
        rule("DM_ADC_DIS", "ADC_EN", "1", ADC_CHANNEL),
        rule("VAC1_ADC_DIS", "ADC_EN", "1", ADC_CHANNEL),
        rule("VAC2_ADC_DIS", "ADC_EN", "1", ADC_CHANNEL),
        rule("JEITA_VSET_2_0", "TS_IGNORE", "0", JEITA),
        rule("JEITA_ISETH_1_0", "TS_IGNORE", "0", JEITA),
        rule("JEITA_ISETC_1_0", "TS_IGNORE", "0", JEITA),
        rule("TS_COOL_1_0", "TS_IGNORE", "0", JEITA),
        rule("TS_WARM_1_0", "TS_IGNORE", "0", JEITA),
        rule("BHOT_1_0", "TS_IGNORE", "0", OTG_TEMPERATURE),
        rule("BCOLD", "TS_IGNORE", "0", OTG_TEMPERATURE),
        rule("FORCE_VINDPM_DET", "VSYS_STAT", "0",
            "Only allowed while the battery is above VSYSMIN (VSYS_STAT = 0)."),
        rule("EN_MPPT", "VSYS_STAT", "0",
            "MPPT can only be enabled while the battery is above VSYSMIN (VSYS_STAT = 0)."),
    ]
}
