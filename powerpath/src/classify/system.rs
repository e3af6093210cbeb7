//! System path: chip to the system rail
//!
//! Unlike the other two paths the system rail only has three outcomes, decided from the ADC
//! readings alone.

use log::debug;

use crate::{
    model::format_number, ClassifyConfig, Field, PathClassification, PathState, StatusSnapshot,
    SystemState,
};

pub(crate) fn classify(
    snapshot: &StatusSnapshot,
    config: &ClassifyConfig,
) -> PathClassification<SystemState> {
    let vbat = snapshot.value(Field::VbatAdc);
    let vsys = snapshot.value(Field::VsysAdc);
    let floor = config.noise_floor_mv;

    let classification = if vbat < floor && vsys < floor {
        PathClassification::new(SystemState::Unpowered, "")
    } else if vbat > vsys {
        PathClassification::new(
            SystemState::BatteryFeed,
            format!(
                "System fed from battery (VBAT {}mV > VSYS {}mV)",
                format_number(vbat),
                format_number(vsys)
            ),
        )
    } else {
        PathClassification::new(SystemState::AdapterFeed, "System fed from adapter")
    };
    debug!(
        "system path: {} (vbat {vbat}, vsys {vsys}, floor {floor})",
        classification.state.name()
    );
    classification
}
