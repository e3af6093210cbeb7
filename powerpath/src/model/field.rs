//! Snapshot keys referenced by the classification rules

use std::iter;

use strum::{EnumIter, IntoStaticStr};

use crate::Catalog;

/// A status field read by the path classifiers
///
/// Each variant maps to the wire name the telemetry endpoint uses for the decoded value. The
/// mapping is checked against the register catalog when the catalog is built, so a rule can't
/// reference a field the catalog knows nothing about.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, EnumIter, IntoStaticStr)]
pub enum Field {
    // Source presence
    #[strum(to_string = "VBUS_PRESENT_STAT")]
    VbusPresent,
    #[strum(to_string = "AC1_PRESENT_STAT")]
    Ac1Present,
    #[strum(to_string = "AC2_PRESENT_STAT")]
    Ac2Present,
    #[strum(to_string = "PG_STAT")]
    PowerGood,
    #[strum(to_string = "VBAT_PRESENT_STAT")]
    VbatPresent,

    // Control bits
    #[strum(to_string = "EN_OTG")]
    EnOtg,
    #[strum(to_string = "EN_HIZ")]
    EnHiz,
    #[strum(to_string = "EN_CHG")]
    EnChg,
    #[strum(to_string = "SDRV_CTRL")]
    SdrvCtrl,
    #[strum(to_string = "SFET_PRESENT")]
    SfetPresent,
    #[strum(to_string = "EN_BATOCP")]
    EnBatOcp,
    #[strum(to_string = "STOP_WD_CHG")]
    StopWdChg,
    #[strum(to_string = "EN_ACDRV1")]
    EnAcDrv1,
    #[strum(to_string = "EN_ACDRV2")]
    EnAcDrv2,
    #[strum(to_string = "JEITA_VSET_2")]
    JeitaVset,
    #[strum(to_string = "JEITA_ISETH_1")]
    JeitaIsetH,
    #[strum(to_string = "JEITA_ISETC_1")]
    JeitaIsetC,

    // Multi-bit status codes
    #[strum(to_string = "CHG_STAT_2_0")]
    ChgStat,
    #[strum(to_string = "VBUS_STAT_3_0")]
    VbusStat,

    // Input FET pair state
    #[strum(to_string = "ACRB1_STAT")]
    Acrb1,
    #[strum(to_string = "ACRB2_STAT")]
    Acrb2,

    // Protection
    #[strum(to_string = "VBUS_OVP_STAT")]
    VbusOvp,
    #[strum(to_string = "VSYS_OVP_STAT")]
    VsysOvp,
    #[strum(to_string = "VBAT_OVP_STAT")]
    VbatOvp,
    #[strum(to_string = "IBUS_OCP_STAT")]
    IbusOcp,
    #[strum(to_string = "IBAT_OCP_STAT")]
    IbatOcp,
    #[strum(to_string = "VAC_OVP_STAT")]
    VacOvp,
    #[strum(to_string = "VSYS_SHORT_STAT")]
    VsysShort,
    #[strum(to_string = "TSHUT_STAT")]
    Tshut,
    #[strum(to_string = "OTG_OVP_STAT")]
    OtgOvp,
    #[strum(to_string = "OTG_UVP_STAT")]
    OtgUvp,
    #[strum(to_string = "VBATOTG_LOW_STAT")]
    VbatOtgLow,

    // Battery temperature
    #[strum(to_string = "TS_COLD_STAT")]
    TsCold,
    #[strum(to_string = "TS_COOL_STAT")]
    TsCool,
    #[strum(to_string = "TS_WARM_STAT")]
    TsWarm,
    #[strum(to_string = "TS_HOT_STAT")]
    TsHot,

    // Regulation loops
    #[strum(to_string = "VINDPM_STAT")]
    Vindpm,
    #[strum(to_string = "IINDPM_STAT")]
    Iindpm,
    #[strum(to_string = "IBAT_REG_STAT")]
    IbatReg,
    #[strum(to_string = "TREG_STAT")]
    Treg,

    // Timers and watchdog
    #[strum(to_string = "CHG_TMR_STAT")]
    ChgTmr,
    #[strum(to_string = "TRICHG_TMR_STAT")]
    TrichgTmr,
    #[strum(to_string = "PRECHG_TMR_STAT")]
    PrechgTmr,
    #[strum(to_string = "WD_STAT")]
    WdStat,

    // ADC readings
    #[strum(to_string = "VBUS_ADC_15_0")]
    VbusAdc,
    #[strum(to_string = "IBUS_ADC_15_0")]
    IbusAdc,
    #[strum(to_string = "VBAT_ADC_15_0")]
    VbatAdc,
    #[strum(to_string = "IBAT_ADC_15_0")]
    IbatAdc,
    #[strum(to_string = "VSYS_ADC_15_0")]
    VsysAdc,
    #[strum(to_string = "TDIE_ADC_15_0")]
    TdieAdc,
}

impl Field {
    /// Name of the field as it appears in a snapshot
    #[must_use]
    pub fn key(self) -> &'static str {
        self.into()
    }

    /// Every snapshot key this field may be reported under, [`Field::key`] first
    ///
    /// The rest come from the catalog: the register's canonical name and its aliases.
    pub fn keys(self) -> impl Iterator<Item = &'static str> {
        let register = Catalog::builtin().get(self.key());
        iter::once(self.key()).chain(
            register
                .into_iter()
                .flat_map(|r| iter::once(r.name).chain(r.aliases.iter().copied()))
                .filter(move |key| *key != self.key()),
        )
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use strum::IntoEnumIterator;

    use super::Field;

    #[test]
    fn keys_are_unique() {
        let keys = Field::iter().map(Field::key).collect::<HashSet<_>>();
        assert_eq!(keys.len(), Field::iter().count());
    }

    #[test]
    fn key_uses_wire_name() {
        assert_eq!(Field::VbusPresent.key(), "VBUS_PRESENT_STAT");
        assert_eq!(Field::SdrvCtrl.key(), "SDRV_CTRL");
        assert_eq!(Field::ChgStat.key(), "CHG_STAT_2_0");
    }

    #[test]
    fn keys_include_register_name() {
        assert_eq!(
            Field::JeitaVset.keys().collect::<Vec<_>>(),
            ["JEITA_VSET_2", "JEITA_VSET_2_0"]
        );
        assert_eq!(
            Field::SdrvCtrl.keys().collect::<Vec<_>>(),
            ["SDRV_CTRL", "SDRV_CTRL_1_0"]
        );
        assert_eq!(Field::PowerGood.keys().collect::<Vec<_>>(), ["PG_STAT"]);
    }
}
