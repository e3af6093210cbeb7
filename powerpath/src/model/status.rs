//! Classification results for the three current paths

use std::fmt;

use strum::{Display, EnumIter, EnumString, IntoStaticStr};

/// How urgently a state should be surfaced
///
/// Variants are declared in ascending precedence, so the derived ordering can be used directly to
/// find the dominant severity: `Error > Idle > Warning > Info > Ok`.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Display, EnumIter, EnumString,
)]
#[strum(serialize_all = "lowercase")]
pub enum Severity {
    Ok,
    Info,
    Warning,
    /// Path is held off or cannot be put in a more specific bucket
    Idle,
    Error,
}

/// One of the physical current paths through the charger
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Display, EnumIter)]
pub enum PathId {
    /// Adapter (VBUS / VAC) to chip
    #[strum(to_string = "input")]
    Input,
    /// Chip to system rail
    #[strum(to_string = "system")]
    System,
    /// Chip to and from the battery
    #[strum(to_string = "battery")]
    Battery,
}

/// A fixed set of states for one path
pub trait PathState: Copy + fmt::Debug + PartialEq + Eq + Into<&'static str> {
    const PATH: PathId;

    /// The catch-all state used when no rule matches
    fn unclassified() -> Self;

    fn severity(self) -> Severity;

    fn name(self) -> &'static str {
        self.into()
    }
}

/// Input path states in evaluation order
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, EnumIter, IntoStaticStr)]
#[strum(serialize_all = "kebab-case")]
pub enum InputState {
    Disconnected,
    FaultForward,
    FaultReverse,
    GatedByProtection,
    MosfetsOpen,
    RegulationForward,
    RegulationReverse,
    IdleChargePaused,
    NormalForward,
    NormalReverse,
    Unclassified,
}

impl PathState for InputState {
    const PATH: PathId = PathId::Input;

    fn unclassified() -> Self {
        Self::Unclassified
    }

    fn severity(self) -> Severity {
        match self {
            Self::Disconnected | Self::NormalForward => Severity::Ok,
            Self::MosfetsOpen | Self::NormalReverse => Severity::Info,
            Self::RegulationForward | Self::RegulationReverse => Severity::Warning,
            Self::GatedByProtection | Self::IdleChargePaused => Severity::Idle,
            Self::FaultForward | Self::FaultReverse | Self::Unclassified => Severity::Error,
        }
    }
}

/// System path states
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, EnumIter, IntoStaticStr)]
#[strum(serialize_all = "kebab-case")]
pub enum SystemState {
    Unpowered,
    BatteryFeed,
    AdapterFeed,
    /// Never produced by the three-way split, kept so the path shares the common contract
    Unclassified,
}

impl PathState for SystemState {
    const PATH: PathId = PathId::System;

    fn unclassified() -> Self {
        Self::Unclassified
    }

    fn severity(self) -> Severity {
        match self {
            Self::Unpowered | Self::AdapterFeed => Severity::Ok,
            Self::BatteryFeed => Severity::Info,
            Self::Unclassified => Severity::Error,
        }
    }
}

/// Battery path states in evaluation order
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, EnumIter, IntoStaticStr)]
#[strum(serialize_all = "kebab-case")]
pub enum BatteryState {
    Disconnected,
    ProtectedShutdown,
    Fault,
    ReverseAssistFault,
    MosfetsOpen,
    RegulationForward,
    RegulationReverse,
    ReverseClean,
    ChargeDisabledByUser,
    NormalForward,
    Unclassified,
}

impl PathState for BatteryState {
    const PATH: PathId = PathId::Battery;

    fn unclassified() -> Self {
        Self::Unclassified
    }

    fn severity(self) -> Severity {
        match self {
            Self::Disconnected | Self::NormalForward => Severity::Ok,
            Self::ReverseAssistFault | Self::MosfetsOpen | Self::ReverseClean => Severity::Info,
            Self::RegulationForward | Self::RegulationReverse => Severity::Warning,
            Self::ProtectedShutdown | Self::ChargeDisabledByUser => Severity::Idle,
            Self::Fault | Self::Unclassified => Severity::Error,
        }
    }
}

/// Outcome of classifying one path
#[derive(Clone, Debug, PartialEq)]
pub struct PathClassification<S: PathState> {
    pub state: S,
    /// Finer-grained explanation within the state, may be empty
    pub narrative: String,
    pub severity: Severity,
}

impl<S: PathState> PathClassification<S> {
    pub(crate) fn new(state: S, narrative: impl Into<String>) -> Self {
        Self {
            state,
            narrative: narrative.into(),
            severity: state.severity(),
        }
    }

    #[must_use]
    pub fn path(&self) -> PathId {
        S::PATH
    }

    #[must_use]
    pub fn is_unclassified(&self) -> bool {
        self.state == S::unclassified()
    }
}

impl<S: PathState> fmt::Display for PathClassification<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {} [{}]", S::PATH, self.state.name(), self.severity)?;
        if !self.narrative.is_empty() {
            write!(f, " {}", self.narrative)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use strum::IntoEnumIterator;

    use super::*;

    #[test]
    fn severity_precedence() {
        assert!(Severity::Error > Severity::Idle);
        assert!(Severity::Idle > Severity::Warning);
        assert!(Severity::Warning > Severity::Info);
        assert!(Severity::Info > Severity::Ok);
        assert_eq!(Severity::iter().max(), Some(Severity::Error));
    }

    #[test]
    fn unclassified_is_error() {
        assert_eq!(InputState::unclassified().severity(), Severity::Error);
        assert_eq!(BatteryState::unclassified().severity(), Severity::Error);
        assert_eq!(SystemState::unclassified().severity(), Severity::Error);
    }

    #[test]
    fn state_names_are_kebab_case() {
        assert_eq!(InputState::GatedByProtection.name(), "gated-by-protection");
        assert_eq!(BatteryState::MosfetsOpen.name(), "mosfets-open");
        assert_eq!(SystemState::BatteryFeed.name(), "battery-feed");
    }

    #[test]
    fn display_includes_narrative() {
        let c = PathClassification::new(InputState::FaultForward, "Input over-voltage");
        assert_eq!(
            c.to_string(),
            "input: fault-forward [error] Input over-voltage"
        );
    }
}
