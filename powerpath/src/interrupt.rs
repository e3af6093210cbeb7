//! Interrupt event codes, their explanations, and decoding of the flag registers

use std::str::FromStr;

use log::warn;
use strum::{Display, EnumIter, EnumString, IntoStaticStr};

/// Event reported by the charger's interrupt line
///
/// Codes render as their wire names, e.g. `IINDPM_EVENT`.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, Hash, Display, EnumIter, EnumString, IntoStaticStr,
)]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum InterruptCode {
    IindpmEvent,
    VindpmEvent,
    WdExpired,
    PoorSource,
    PgStatusChange,
    Ac2PresenceChange,
    Ac1PresenceChange,
    VbusPresenceChange,
    ChargeStatusChange,
    IcoStatusChange,
    VbusTypeChange,
    TregEvent,
    VbatPresenceChange,
    Bc12Done,
    DpdmDone,
    AdcDone,
    VsysRegChange,
    FastChargeTimeout,
    TrickleChargeTimeout,
    PrechargeTimeout,
    TopoffTimeout,
    VbatLowForOtg,
    TsColdEvent,
    TsCoolEvent,
    TsWarmEvent,
    TsHotEvent,
    IbatRegEvent,
    VbusOvpFault,
    VbatOvpFault,
    IbusOcpFault,
    IbatOcpFault,
    ConvOcpFault,
    Vac2OvpFault,
    Vac1OvpFault,
    VsysShortFault,
    VsysOvpFault,
    OtgOvpFault,
    OtgUvpFault,
    ThermalShutdown,
    /// The flag registers could not be read
    FlagReadError,
    /// An interrupt fired but no flag explains it
    UnknownInterrupt,
}

/// Human-readable title and description of an event
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Explanation {
    pub title: &'static str,
    pub description: &'static str,
}

impl Explanation {
    const fn new(title: &'static str, description: &'static str) -> Self {
        Self { title, description }
    }
}

/// Flag register 0x22 + byte index, bit mask and the event it reports
const FLAG_BITS: &[(usize, u8, InterruptCode)] = &[
    (0, 0x80, InterruptCode::IindpmEvent),
    (0, 0x40, InterruptCode::VindpmEvent),
    (0, 0x20, InterruptCode::WdExpired),
    (0, 0x10, InterruptCode::PoorSource),
    (0, 0x08, InterruptCode::PgStatusChange),
    (0, 0x04, InterruptCode::Ac2PresenceChange),
    (0, 0x02, InterruptCode::Ac1PresenceChange),
    (0, 0x01, InterruptCode::VbusPresenceChange),
    (1, 0x80, InterruptCode::ChargeStatusChange),
    (1, 0x40, InterruptCode::IcoStatusChange),
    (1, 0x10, InterruptCode::VbusTypeChange),
    (1, 0x04, InterruptCode::TregEvent),
    (1, 0x02, InterruptCode::VbatPresenceChange),
    (1, 0x01, InterruptCode::Bc12Done),
    (2, 0x40, InterruptCode::DpdmDone),
    (2, 0x20, InterruptCode::AdcDone),
    (2, 0x10, InterruptCode::VsysRegChange),
    (2, 0x08, InterruptCode::FastChargeTimeout),
    (2, 0x04, InterruptCode::TrickleChargeTimeout),
    (2, 0x02, InterruptCode::PrechargeTimeout),
    (2, 0x01, InterruptCode::TopoffTimeout),
    (3, 0x10, InterruptCode::VbatLowForOtg),
    (3, 0x08, InterruptCode::TsColdEvent),
    (3, 0x04, InterruptCode::TsCoolEvent),
    (3, 0x02, InterruptCode::TsWarmEvent),
    (3, 0x01, InterruptCode::TsHotEvent),
    (4, 0x80, InterruptCode::IbatRegEvent),
    (4, 0x40, InterruptCode::VbusOvpFault),
    (4, 0x20, InterruptCode::VbatOvpFault),
    (4, 0x10, InterruptCode::IbusOcpFault),
    (4, 0x08, InterruptCode::IbatOcpFault),
    (4, 0x04, InterruptCode::ConvOcpFault),
    (4, 0x02, InterruptCode::Vac2OvpFault),
    (4, 0x01, InterruptCode::Vac1OvpFault),
    (5, 0x80, InterruptCode::VsysShortFault),
    (5, 0x40, InterruptCode::VsysOvpFault),
    (5, 0x20, InterruptCode::OtgOvpFault),
    (5, 0x10, InterruptCode::OtgUvpFault),
    (5, 0x04, InterruptCode::ThermalShutdown),
];

impl InterruptCode {
    /// Parse a wire code, mapping anything unrecognized to [`InterruptCode::UnknownInterrupt`]
    pub fn lookup(code: &str) -> Self {
        Self::from_str(code).unwrap_or_else(|_| {
            warn!("unknown interrupt code {code:?}");
            Self::UnknownInterrupt
        })
    }

    /// Events reported by the six flag registers starting at 0x22
    ///
    /// `None` stands for a failed register read. Events are listed in register and bit order,
    /// most significant bit first.
    pub(crate) fn from_flags(flags: Option<[u8; 6]>) -> Vec<Self> {
        let Some(flags) = flags else {
            return vec![Self::FlagReadError];
        };
        let events: Vec<_> = FLAG_BITS
            .iter()
            .filter(|(byte, mask, _)| flags[*byte] & mask != 0)
            .map(|(_, _, code)| *code)
            .collect();
        if events.is_empty() {
            vec![Self::UnknownInterrupt]
        } else {
            events
        }
    }

    pub fn is_fault(self) -> bool {
        Into::<&'static str>::into(self).ends_with("_FAULT") || self == Self::ThermalShutdown
    }

    #[must_use]
    pub fn explanation(self) -> Explanation {
        use InterruptCode::*;
        match self {
            IindpmEvent => Explanation::new(
                "Input current limit (IINDPM_STAT)",
                "Current drawn from the input reached the IINDPM setting. Charge current was \
                 reduced to protect the adapter.",
            ),
            VindpmEvent => Explanation::new(
                "Input voltage limit (VINDPM_STAT)",
                "The input voltage sagged to the VINDPM setting under load. Charge current was \
                 reduced to hold the voltage.",
            ),
            WdExpired => Explanation::new(
                "Watchdog timer expired (WD_STAT)",
                "The host stopped servicing the watchdog and the settings returned to their \
                 defaults.",
            ),
            PoorSource => Explanation::new(
                "Poor input source (POORSRC_FLAG)",
                "The attached adapter cannot supply enough current and was disqualified.",
            ),
            PgStatusChange => Explanation::new(
                "Power good changed (PG_STAT)",
                "The input source became good or stopped being good, it may have been plugged \
                 in or removed.",
            ),
            Ac2PresenceChange => Explanation::new(
                "Input 2 presence changed (AC2_PRESENT_STAT)",
                "An adapter was connected to or removed from input 2.",
            ),
            Ac1PresenceChange => Explanation::new(
                "Input 1 presence changed (AC1_PRESENT_STAT)",
                "An adapter was connected to or removed from input 1.",
            ),
            VbusPresenceChange => Explanation::new(
                "VBUS presence changed (VBUS_PRESENT_STAT)",
                "Voltage on the main VBUS line appeared or went away.",
            ),
            ChargeStatusChange => Explanation::new(
                "Charge status changed (CHG_STAT)",
                "The charge cycle moved to another phase, for example from fast charge to \
                 termination.",
            ),
            IcoStatusChange => Explanation::new(
                "Input current optimizer changed (ICO_STAT)",
                "The input current optimizer started or finished.",
            ),
            VbusTypeChange => Explanation::new(
                "Adapter type changed (VBUS_STAT)",
                "The detected adapter type changed, for example from SDP to DCP.",
            ),
            TregEvent => Explanation::new(
                "Thermal regulation (TREG_STAT)",
                "The die temperature rose and charge current was reduced to protect the chip.",
            ),
            VbatPresenceChange => Explanation::new(
                "Battery presence changed (VBAT_PRESENT_STAT)",
                "A battery was connected or removed.",
            ),
            Bc12Done => Explanation::new(
                "BC1.2 detection done (BC1.2_DONE_STAT)",
                "Standard BC1.2 adapter detection finished.",
            ),
            DpdmDone => Explanation::new(
                "D+/D- detection done (DPDM_STAT)",
                "Adapter detection through the D+/D- pins finished.",
            ),
            AdcDone => Explanation::new(
                "ADC conversion done (ADC_DONE_STAT)",
                "A one-shot ADC conversion finished.",
            ),
            VsysRegChange => Explanation::new(
                "System regulation changed (VSYS_STAT)",
                "The system rail entered or left minimum system voltage (VSYSMIN) regulation.",
            ),
            FastChargeTimeout => Explanation::new(
                "Fast charge timer expired (CHG_TMR_STAT)",
                "The fast charge phase ran past its time limit and charging stopped.",
            ),
            TrickleChargeTimeout => Explanation::new(
                "Trickle charge timer expired (TRICHG_TMR_STAT)",
                "The trickle charge phase for a deeply discharged battery ran past its time \
                 limit.",
            ),
            PrechargeTimeout => Explanation::new(
                "Pre-charge timer expired (PRECHG_TMR_STAT)",
                "The pre-charge phase ran past its time limit and charging stopped.",
            ),
            TopoffTimeout => Explanation::new(
                "Top-off timer expired (TOPOFF_TMR_FLAG)",
                "The top-off period after termination finished.",
            ),
            VbatLowForOtg => Explanation::new(
                "Battery too low for OTG (VBATOTG_LOW_STAT)",
                "The battery voltage is too low to run the power bank (OTG) mode.",
            ),
            TsColdEvent => Explanation::new(
                "Battery temperature cold (TS_COLD_STAT)",
                "The battery entered the cold range and charging was stopped or limited by the \
                 JEITA profile.",
            ),
            TsCoolEvent => Explanation::new(
                "Battery temperature cool (TS_COOL_STAT)",
                "The battery entered the cool range and charge current was reduced by the JEITA \
                 profile.",
            ),
            TsWarmEvent => Explanation::new(
                "Battery temperature warm (TS_WARM_STAT)",
                "The battery entered the warm range and charge voltage was reduced by the JEITA \
                 profile.",
            ),
            TsHotEvent => Explanation::new(
                "Battery temperature hot (TS_HOT_STAT)",
                "The battery entered the hot range and charging was stopped.",
            ),
            IbatRegEvent => Explanation::new(
                "Discharge current limit (IBAT_REG_STAT)",
                "Battery discharge current in OTG mode reached its limit, or left it.",
            ),
            VbusOvpFault => Explanation::new(
                "Input over-voltage (VBUS_OVP_STAT)",
                "The adapter voltage exceeded the allowed limit. Charging stopped.",
            ),
            VbatOvpFault => Explanation::new(
                "Battery over-voltage (VBAT_OVP_STAT)",
                "The battery voltage exceeded the configured limit. Charging stopped.",
            ),
            IbusOcpFault => Explanation::new(
                "Input over-current (IBUS_OCP_STAT)",
                "Current drawn from the adapter exceeded the critical limit. The converter was \
                 turned off.",
            ),
            IbatOcpFault => Explanation::new(
                "Battery over-current (IBAT_OCP_STAT)",
                "Discharge current from the battery exceeded the critical limit.",
            ),
            ConvOcpFault => Explanation::new(
                "Converter over-current (CONV_OCP_STAT)",
                "Current inside the DC-DC converter exceeded its limit.",
            ),
            Vac2OvpFault => Explanation::new(
                "Input 2 over-voltage (VAC2_OVP_STAT)",
                "The voltage on input 2 exceeded the allowed limit.",
            ),
            Vac1OvpFault => Explanation::new(
                "Input 1 over-voltage (VAC1_OVP_STAT)",
                "The voltage on input 1 exceeded the allowed limit.",
            ),
            VsysShortFault => Explanation::new(
                "System short circuit (VSYS_SHORT_STAT)",
                "A short on the system output was detected and current was limited.",
            ),
            VsysOvpFault => Explanation::new(
                "System over-voltage (VSYS_OVP_STAT)",
                "The system output voltage exceeded the allowed limit. The converter stopped.",
            ),
            OtgOvpFault => Explanation::new(
                "OTG over-voltage (OTG_OVP_STAT)",
                "The output voltage in power bank (OTG) mode exceeded the allowed limit.",
            ),
            OtgUvpFault => Explanation::new(
                "OTG under-voltage (OTG_UVP_STAT)",
                "The output voltage in power bank (OTG) mode collapsed.",
            ),
            ThermalShutdown => Explanation::new(
                "Thermal shutdown (TSHUT_STAT)",
                "The die reached its critical temperature and the device shut down completely.",
            ),
            FlagReadError => Explanation::new(
                "Interrupt read failed",
                "Reading the interrupt cause from the charger failed.",
            ),
            UnknownInterrupt => Explanation::new(
                "Unknown interrupt",
                "An interrupt occurred but its cause could not be identified.",
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use strum::IntoEnumIterator;

    use super::*;

    #[test]
    fn wire_names() {
        assert_eq!(InterruptCode::IindpmEvent.to_string(), "IINDPM_EVENT");
        assert_eq!(InterruptCode::Bc12Done.to_string(), "BC12_DONE");
        assert_eq!(InterruptCode::Ac2PresenceChange.to_string(), "AC2_PRESENCE_CHANGE");
        assert_eq!(InterruptCode::Vac1OvpFault.to_string(), "VAC1_OVP_FAULT");
        assert_eq!(InterruptCode::VbatLowForOtg.to_string(), "VBAT_LOW_FOR_OTG");
        assert_eq!(InterruptCode::iter().count(), 41);
    }

    #[test]
    fn lookup_known_and_unknown() {
        assert_eq!(
            InterruptCode::lookup("THERMAL_SHUTDOWN"),
            InterruptCode::ThermalShutdown
        );
        assert_eq!(
            InterruptCode::lookup("NOT_A_CODE"),
            InterruptCode::UnknownInterrupt
        );
        assert_eq!(
            InterruptCode::lookup("NOT_A_CODE").explanation().title,
            "Unknown interrupt"
        );
    }

    #[test]
    fn every_code_round_trips_and_is_explained() {
        for code in InterruptCode::iter() {
            assert_eq!(InterruptCode::lookup(&code.to_string()), code);
            let explanation = code.explanation();
            assert!(!explanation.title.is_empty(), "{code}");
            assert!(!explanation.description.is_empty(), "{code}");
        }
    }

    #[test]
    fn flag_bits_cover_every_hardware_event_once() {
        let mut seen = std::collections::HashSet::new();
        for (_, _, code) in FLAG_BITS {
            assert!(seen.insert(*code), "{code}");
        }
        assert_eq!(seen.len(), InterruptCode::iter().count() - 2);
    }

    #[test]
    fn decode_flags() {
        assert_eq!(
            InterruptCode::from_flags(None),
            vec![InterruptCode::FlagReadError]
        );
        assert_eq!(
            InterruptCode::from_flags(Some([0; 6])),
            vec![InterruptCode::UnknownInterrupt]
        );
        assert_eq!(
            InterruptCode::from_flags(Some([0x81, 0x80, 0, 0x01, 0, 0x04])),
            vec![
                InterruptCode::IindpmEvent,
                InterruptCode::VbusPresenceChange,
                InterruptCode::ChargeStatusChange,
                InterruptCode::TsHotEvent,
                InterruptCode::ThermalShutdown,
            ]
        );
    }

    #[test]
    fn reserved_bits_are_ignored() {
        // 0x23 bit 5, 0x23 bit 3, 0x24 bit 7, 0x25 bits 7..5 and 0x27 bits 3, 1, 0 are unused
        let reserved = [0, 0x28, 0x80, 0xe0, 0, 0x0b];
        assert_eq!(
            InterruptCode::from_flags(Some(reserved)),
            vec![InterruptCode::UnknownInterrupt]
        );
    }

    #[test]
    fn faults() {
        assert!(InterruptCode::VbusOvpFault.is_fault());
        assert!(InterruptCode::ThermalShutdown.is_fault());
        assert!(!InterruptCode::ChargeStatusChange.is_fault());
    }
}
