//! Gating of register writes on the current device state

use std::fmt;

use log::debug;

use crate::{
    error::WriteError, model::value_to_string, Catalog, RegisterKind, StatusSnapshot,
};

/// Reason given when the controlling register has not been read yet
pub const CONTROLLER_NOT_LOADED: &str = "controller state not loaded yet";

/// Outcome of a dependency check
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum WritePermission {
    Allowed,
    Denied(String),
}

impl WritePermission {
    #[must_use]
    pub fn is_allowed(&self) -> bool {
        matches!(self, Self::Allowed)
    }
}

impl fmt::Display for WritePermission {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Allowed => f.write_str("allowed"),
            Self::Denied(reason) => write!(f, "denied: {reason}"),
        }
    }
}

/// A validated write, ready to be handed to the transport
#[derive(Clone, Debug, PartialEq)]
pub struct WriteRequest {
    pub register: &'static str,
    pub value: f64,
}

impl Catalog {
    /// Whether `target` may be written given the latest `snapshot`
    ///
    /// Registers without a dependency rule are always allowed, including registers the catalog
    /// doesn't know. A controller that is absent from the snapshot denies the write; it is not
    /// treated as `0`.
    pub fn can_write(&self, target: &str, snapshot: &StatusSnapshot) -> WritePermission {
        let Some(rule) = self.dependency(target) else {
            return WritePermission::Allowed;
        };
        match snapshot.get(rule.controller) {
            None => {
                debug!("write to {target} denied, {} not loaded", rule.controller);
                WritePermission::Denied(CONTROLLER_NOT_LOADED.to_owned())
            }
            Some(value) if value_to_string(value) == rule.required => WritePermission::Allowed,
            Some(value) => {
                debug!(
                    "write to {target} denied, {} = {} but {} is required",
                    rule.controller,
                    value_to_string(value),
                    rule.required
                );
                WritePermission::Denied(rule.message.to_owned())
            }
        }
    }

    /// Run every pre-write check for `target`
    ///
    /// Commands always write `1` and ignore `value`.
    ///
    /// # Errors
    ///
    /// - The register is unknown or read-only
    /// - The dependency check denies the write
    /// - A non-command register was given no value, or the value fails range validation
    pub fn prepare_write(
        &self,
        target: &str,
        value: Option<f64>,
        snapshot: &StatusSnapshot,
    ) -> Result<WriteRequest, WriteError> {
        let reg = self
            .get(target)
            .ok_or_else(|| WriteError::UnknownRegister(target.to_owned()))?;
        if !reg.access.is_write() {
            return Err(WriteError::ReadOnly(reg.name));
        }
        if let WritePermission::Denied(reason) = self.can_write(reg.name, snapshot) {
            return Err(WriteError::Denied {
                register: reg.name,
                reason,
            });
        }
        let value = match (reg.kind, value) {
            (RegisterKind::Command, _) => 1.,
            (_, Some(value)) => value,
            (_, None) => return Err(WriteError::MissingValue(reg.name)),
        };
        self.validate_value(reg.name, value)?;
        Ok(WriteRequest {
            register: reg.name,
            value,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_rule_is_allowed() {
        let catalog = Catalog::builtin();
        let snapshot = StatusSnapshot::new();
        assert_eq!(catalog.can_write("EN_CHG", &snapshot), WritePermission::Allowed);
        assert_eq!(
            catalog.can_write("NOT_A_REGISTER", &snapshot),
            WritePermission::Allowed
        );
    }

    #[test]
    fn controller_not_loaded_is_denied() {
        let catalog = Catalog::builtin();
        assert_eq!(
            catalog.can_write("FORCE_ICO", &StatusSnapshot::new()),
            WritePermission::Denied(CONTROLLER_NOT_LOADED.to_owned())
        );
    }

    #[test]
    fn force_ico_follows_en_ico() {
        let catalog = Catalog::builtin();
        let off = StatusSnapshot::new().with("EN_ICO", 0.);
        let on = StatusSnapshot::new().with("EN_ICO", 1.);
        assert_eq!(
            catalog.can_write("FORCE_ICO", &off),
            WritePermission::Denied("EN_ICO must be enabled before running this command.".into())
        );
        assert!(catalog.can_write("FORCE_ICO", &on).is_allowed());
    }

    #[test]
    fn jeita_requires_ts_ignore_clear() {
        let catalog = Catalog::builtin();
        let ignoring = StatusSnapshot::new().with("TS_IGNORE", 1.);
        assert!(!catalog.can_write("JEITA_VSET_2_0", &ignoring).is_allowed());
        let monitoring = StatusSnapshot::new().with("TS_IGNORE", 0.);
        assert!(catalog.can_write("JEITA_VSET_2_0", &monitoring).is_allowed());
    }

    #[test]
    fn sentinel_controller_is_denied() {
        let catalog = Catalog::builtin();
        let snapshot = StatusSnapshot::new().with("ADC_EN", -1.);
        assert!(!catalog.can_write("ADC_RATE", &snapshot).is_allowed());
    }

    #[test]
    fn alias_target_uses_rule() {
        let catalog = Catalog::builtin();
        let snapshot = StatusSnapshot::new().with("SFET_PRESENT", 0.);
        assert!(!catalog.can_write("SDRV_CTRL", &snapshot).is_allowed());
    }

    #[test]
    fn prepare_write_pipeline() {
        let catalog = Catalog::builtin();
        let snapshot = StatusSnapshot::new().with("EN_ICO", 1.);
        assert_eq!(
            catalog.prepare_write("FORCE_ICO", None, &snapshot),
            Ok(WriteRequest {
                register: "FORCE_ICO",
                value: 1.
            })
        );
        assert_eq!(
            catalog.prepare_write("ICHG_8_0", None, &snapshot),
            Err(WriteError::MissingValue("ICHG_8_0"))
        );
        assert!(matches!(
            catalog.prepare_write("ICHG_8_0", Some(5000.), &snapshot),
            Err(WriteError::OutOfRange { .. })
        ));
        assert_eq!(
            catalog.prepare_write("CHG_STAT_2_0", Some(1.), &snapshot),
            Err(WriteError::ReadOnly("CHG_STAT_2_0"))
        );
        assert!(matches!(
            catalog.prepare_write("EN_MPPT", Some(1.), &snapshot),
            Err(WriteError::Denied { .. })
        ));
    }
}
