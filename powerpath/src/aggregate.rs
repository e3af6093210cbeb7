//! Folding the input and battery results into one status line

use std::fmt;

use itertools::Itertools;
use log::debug;

use crate::{
    BatteryState, ClassifyConfig, InputState, Overlay, PathClassification, PathId, Severity,
};

/// Prefix added to the combined text while the fault indicator is lit
pub const PROTECTION_FAULT_TEXT: &str = "Protection fault";

/// Overall charger status shown above the diagram
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct OverallStatus {
    /// Non-empty path narratives, input first
    pub combined_text: String,
    pub dominant_severity: Severity,
    /// Path whose severity won; the input path on a tie
    pub dominant_path: PathId,
    pub dominant_narrative: String,
}

impl OverallStatus {
    pub(crate) fn from_paths(
        input: &PathClassification<InputState>,
        battery: &PathClassification<BatteryState>,
        config: &ClassifyConfig,
    ) -> Self {
        let combined_text = [input.narrative.as_str(), battery.narrative.as_str()]
            .into_iter()
            .filter(|n| !n.is_empty())
            .join(&config.separator);
        let combined_text = if combined_text.is_empty() {
            config.unpowered_text.clone()
        } else {
            combined_text
        };

        let (dominant_path, dominant_severity, dominant_narrative) =
            if battery.severity > input.severity {
                (PathId::Battery, battery.severity, &battery.narrative)
            } else {
                (PathId::Input, input.severity, &input.narrative)
            };
        debug!("overall status: {dominant_severity} from {dominant_path} path");

        Self {
            combined_text,
            dominant_severity,
            dominant_path,
            dominant_narrative: dominant_narrative.clone(),
        }
    }

    /// Escalate by the snapshot-level indicators
    ///
    /// The fault indicator forces error and prefixes the text, a temperature alert raises the
    /// severity to at least warning.
    pub(crate) fn with_overlay(mut self, overlay: &Overlay, config: &ClassifyConfig) -> Self {
        if overlay.fault {
            self.dominant_severity = Severity::Error;
            self.combined_text = format!(
                "{PROTECTION_FAULT_TEXT}{}{}",
                config.separator, self.combined_text
            );
        } else if overlay.temperature_alert() {
            self.dominant_severity = self.dominant_severity.max(Severity::Warning);
        }
        self
    }

    #[must_use]
    pub fn is_error(&self) -> bool {
        self.dominant_severity == Severity::Error
    }
}

impl fmt::Display for OverallStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.dominant_severity, self.combined_text)
    }
}
