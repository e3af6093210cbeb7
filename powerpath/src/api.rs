//! Exposes functionality supported by this crate
mod error;

use std::path;

use log::info;

pub use crate::{
    aggregate::{OverallStatus, PROTECTION_FAULT_TEXT},
    catalog::Catalog,
    classify::{
        AdapterIndicator, BatteryIndicator, ChargerActivity, ChargerMode, Classification, Overlay,
        Temperature, UNCLASSIFIED_TEXT,
    },
    config::{ClassifyConfig, DEFAULT_NOISE_FLOOR_MV, DEFAULT_SEPARATOR, DEFAULT_UNPOWERED_TEXT},
    dependency::{WritePermission, WriteRequest, CONTROLLER_NOT_LOADED},
    interrupt::{Explanation, InterruptCode},
    model::*,
    toggle::{ChargeToggleMonitor, ToggleVerdict, TOGGLE_SPAN_MS, TOGGLE_WINDOW},
};
pub use error::*;

/// Classify all three paths of `snapshot` with the default configuration
pub fn classify(snapshot: &StatusSnapshot) -> Classification {
    classify_with(snapshot, &ClassifyConfig::default())
}

pub fn classify_with(snapshot: &StatusSnapshot, config: &ClassifyConfig) -> Classification {
    Classification::from_snapshot(snapshot, config)
}

/// Fold an input and a battery classification into one status line
///
/// On equal severity the input path is reported as dominant.
pub fn aggregate(
    input: &PathClassification<InputState>,
    battery: &PathClassification<BatteryState>,
) -> OverallStatus {
    aggregate_with(input, battery, &ClassifyConfig::default())
}

pub fn aggregate_with(
    input: &PathClassification<InputState>,
    battery: &PathClassification<BatteryState>,
    config: &ClassifyConfig,
) -> OverallStatus {
    OverallStatus::from_paths(input, battery, config)
}

/// Decode a raw register value for display
///
/// Never fails: read errors become [`DisplayValue::Error`], unknown registers and values without
/// a label fall back to [`DisplayValue::Raw`].
pub fn decode(register: &str, raw: f64) -> DisplayValue {
    Catalog::builtin().decode(register, raw)
}

/// Look up the descriptor of a register by name or alias
pub fn describe(register: &str) -> Result<&'static RegisterDescriptor, ApiError> {
    Ok(Catalog::builtin().describe(register)?)
}

/// Check the write dependency of `register` against the latest `snapshot`
pub fn can_write(register: &str, snapshot: &StatusSnapshot) -> WritePermission {
    Catalog::builtin().can_write(register, snapshot)
}

/// Validate a write end to end, producing the request to send to the device
pub fn prepare_write(
    register: &str,
    value: Option<f64>,
    snapshot: &StatusSnapshot,
) -> Result<WriteRequest, ApiError> {
    Ok(Catalog::builtin().prepare_write(register, value, snapshot)?)
}

/// Explain an interrupt event code; unknown codes get the unknown-interrupt explanation
pub fn explain(code: &str) -> Explanation {
    InterruptCode::lookup(code).explanation()
}

/// Events reported by the six flag registers, `None` for a failed read
pub fn decode_interrupt_flags(flags: Option<[u8; 6]>) -> Vec<InterruptCode> {
    InterruptCode::from_flags(flags)
}

pub fn charger_mode(snapshot: &StatusSnapshot) -> ChargerMode {
    ChargerMode::from_snapshot(snapshot)
}

pub fn overlay(snapshot: &StatusSnapshot) -> Overlay {
    Overlay::from_snapshot(snapshot)
}

/// Read a snapshot from a JSON file
///
/// When `global` is given, its values are merged over the page snapshot.
pub fn read_snapshot_file(
    path: &path::Path,
    global: Option<&path::Path>,
) -> Result<StatusSnapshot, ApiError> {
    let snapshot = crate::util::read_snapshot(path)?;
    let snapshot = match global {
        Some(global) => snapshot.merged(&crate::util::read_snapshot(global)?),
        None => snapshot,
    };
    info!("Read {} fields from {}.", snapshot.len(), path.display());
    Ok(snapshot)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decode_never_fails() {
        assert_eq!(decode("EN_CHG", -1.), DisplayValue::Error);
        assert_eq!(decode("NO_SUCH_REGISTER", 3.), DisplayValue::Raw(3.));
        assert_eq!(decode("IBAT_ADC_15_0", -500.).to_string(), "-500mA");
    }

    #[test]
    fn describe_unknown_is_error() {
        assert!(matches!(
            describe("NO_SUCH_REGISTER"),
            Err(ApiError::Catalog(CatalogError::UnknownRegister(_)))
        ));
        assert_eq!(describe("EN_CHG").unwrap().kind, RegisterKind::Boolean);
    }

    #[test]
    fn explain_codes() {
        assert_eq!(explain("TS_HOT_EVENT").title, "Battery temperature hot (TS_HOT_STAT)");
        assert_eq!(explain("whatever"), InterruptCode::UnknownInterrupt.explanation());
    }

    #[test]
    fn aggregate_matches_classify_without_overlay() {
        let snapshot = StatusSnapshot::new()
            .with("VBAT_PRESENT_STAT", 1.)
            .with("VBAT_ADC_15_0", 3700.);
        let c = classify(&snapshot);
        assert_eq!(aggregate(&c.input, &c.battery), c.overall);
    }

    #[test]
    fn write_pipeline_errors_wrap() {
        let snapshot = StatusSnapshot::new();
        assert!(matches!(
            prepare_write("VBUS_PRESENT_STAT", Some(1.), &snapshot),
            Err(ApiError::Write(WriteError::ReadOnly(_)))
        ));
        assert_eq!(
            can_write("FORCE_ICO", &snapshot),
            WritePermission::Denied(CONTROLLER_NOT_LOADED.to_owned())
        );
    }
}
