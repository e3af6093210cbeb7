//! Register metadata catalog
//!
//! The catalog is the single source of truth for how a raw register value is displayed and which
//! values may be written. It is validated once when first used.

mod table;

use std::collections::{HashMap, HashSet};

use lazy_static::lazy_static;
use log::info;
use regex::Regex;
use strum::IntoEnumIterator;

use crate::{
    error::{CatalogError, WriteError},
    DependencyRule, DisplayValue, Field, RegisterDescriptor, RegisterKind,
};

pub(crate) use table::{CHG_STAT_LABELS, VBUS_STAT_LABELS};

lazy_static! {
    static ref REGISTER_NAME_RE: Regex = Regex::new(r"^[A-Z][A-Z0-9_]*$").unwrap();
    static ref BUILTIN: Catalog = {
        let catalog = Catalog::new(table::registers(), table::dependencies())
            .unwrap_or_else(|err| panic!("built-in register catalog is malformed: {err}"));
        info!(
            "loaded register catalog: {} registers, {} write dependencies",
            catalog.len(),
            catalog.dependencies.len()
        );
        catalog
    };
}

/// Validated register descriptors and write dependencies
#[derive(Debug)]
pub struct Catalog {
    registers: Vec<RegisterDescriptor>,
    /// Register name or alias to index in `registers`
    index: HashMap<&'static str, usize>,
    dependencies: HashMap<&'static str, DependencyRule>,
}

impl Catalog {
    /// Build a catalog, rejecting malformed tables
    ///
    /// # Errors
    ///
    /// - A register name or alias is repeated or isn't upper snake case
    /// - A boolean or enum register has no labels, or a boolean doesn't label exactly `0` and `1`
    /// - A numeric range is empty or has a non-positive step
    /// - A classifier [`Field`] has no descriptor
    /// - A dependency names an unknown register, targets a read-only register, or repeats a target
    pub fn new(
        registers: Vec<RegisterDescriptor>,
        dependencies: Vec<DependencyRule>,
    ) -> Result<Self, CatalogError> {
        let mut index = HashMap::new();
        for (idx, reg) in registers.iter().enumerate() {
            validate_descriptor(reg)?;
            for name in std::iter::once(reg.name).chain(reg.aliases.iter().copied()) {
                if !REGISTER_NAME_RE.is_match(name) {
                    return Err(CatalogError::InvalidName(name.to_owned()));
                }
                if index.insert(name, idx).is_some() {
                    return Err(CatalogError::DuplicateRegister(name.to_owned()));
                }
            }
        }

        if let Some(field) = Field::iter().find(|f| !index.contains_key(f.key())) {
            return Err(CatalogError::UnmappedField(field.key()));
        }

        let mut rules = HashMap::new();
        for dep in dependencies {
            for name in [dep.target, dep.controller] {
                if !index.contains_key(name) {
                    return Err(CatalogError::UnknownDependencyRegister {
                        target: dep.target,
                        name,
                    });
                }
            }
            if !registers[index[dep.target]].access.is_write() {
                return Err(CatalogError::ReadOnlyDependencyTarget(dep.target));
            }
            if rules.insert(dep.target, dep).is_some() {
                return Err(CatalogError::DuplicateDependency(dep.target));
            }
        }

        Ok(Self {
            registers,
            index,
            dependencies: rules,
        })
    }

    /// The validated BQ25672 catalog
    ///
    /// # Panics
    ///
    /// Panics on first use if the built-in tables are malformed.
    pub fn builtin() -> &'static Catalog {
        &BUILTIN
    }

    /// Look up a register by name or alias
    pub fn get(&self, name: &str) -> Option<&RegisterDescriptor> {
        self.index.get(name).map(|idx| &self.registers[*idx])
    }

    /// Look up a register by name or alias
    ///
    /// # Errors
    ///
    /// - The register is not in the catalog
    pub fn describe(&self, name: &str) -> Result<&RegisterDescriptor, CatalogError> {
        self.get(name)
            .ok_or_else(|| CatalogError::UnknownRegister(name.to_owned()))
    }

    /// Decode a raw value for display
    ///
    /// Unknown registers fall back to the raw value instead of failing.
    pub fn decode(&self, name: &str, raw: f64) -> DisplayValue {
        match self.get(name) {
            Some(reg) => reg.decode(raw),
            None if crate::is_sentinel(raw) => DisplayValue::Error,
            None => DisplayValue::Raw(raw),
        }
    }

    /// Check that `value` may be written to `name`
    ///
    /// # Errors
    ///
    /// - The register is unknown or read-only
    /// - A numeric value is out of range, an option value is not in the option set, or a command
    ///   is given anything but `1`
    pub fn validate_value(&self, name: &str, value: f64) -> Result<(), WriteError> {
        let reg = self
            .get(name)
            .ok_or_else(|| WriteError::UnknownRegister(name.to_owned()))?;
        if !reg.access.is_write() {
            return Err(WriteError::ReadOnly(reg.name));
        }
        match reg.kind {
            RegisterKind::Numeric => match reg.range {
                Some(range) if !range.contains(value) => Err(WriteError::OutOfRange {
                    register: reg.name,
                    value,
                    min: range.min,
                    max: range.max,
                }),
                _ => Ok(()),
            },
            RegisterKind::Boolean | RegisterKind::Enum => match reg.label(value) {
                Some(_) => Ok(()),
                None => Err(WriteError::InvalidOption {
                    register: reg.name,
                    value,
                }),
            },
            RegisterKind::Command if value == 1. => Ok(()),
            RegisterKind::Command => Err(WriteError::InvalidOption {
                register: reg.name,
                value,
            }),
        }
    }

    /// The dependency gating writes to `target`, if any
    pub fn dependency(&self, target: &str) -> Option<&DependencyRule> {
        let reg = self.get(target)?;
        self.dependencies.get(reg.name)
    }

    /// Registers in table order
    pub fn iter(&self) -> impl Iterator<Item = &RegisterDescriptor> {
        self.registers.iter()
    }

    pub fn len(&self) -> usize {
        self.registers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.registers.is_empty()
    }
}

fn validate_descriptor(reg: &RegisterDescriptor) -> Result<(), CatalogError> {
    match reg.kind {
        RegisterKind::Boolean => {
            let values = reg.options.iter().map(|(v, _)| *v).collect::<HashSet<_>>();
            if values != HashSet::from([0, 1]) || reg.options.len() != 2 {
                return Err(CatalogError::InvalidBooleanOptions(reg.name));
            }
        }
        RegisterKind::Enum if reg.options.is_empty() => {
            return Err(CatalogError::MissingOptions(reg.kind, reg.name));
        }
        RegisterKind::Numeric => {
            if let Some(range) = reg.range {
                if !(range.min <= range.max && range.step > 0.) {
                    return Err(CatalogError::InvalidRange {
                        name: reg.name,
                        range,
                    });
                }
            }
        }
        RegisterKind::Enum | RegisterKind::Command => {}
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Access, ValueRange};

    fn reg(name: &'static str, kind: RegisterKind) -> RegisterDescriptor {
        RegisterDescriptor {
            name,
            aliases: &[],
            kind,
            access: Access::ReadWrite,
            unit: None,
            range: None,
            options: &[(0, "Off"), (1, "On")],
            explanation: "",
        }
    }

    #[test]
    fn builtin_catalog_is_valid() {
        let catalog = Catalog::new(table::registers(), table::dependencies()).unwrap();
        assert!(catalog.len() > 150);
    }

    #[test]
    fn every_field_is_described() {
        let catalog = Catalog::builtin();
        for field in Field::iter() {
            assert!(catalog.get(field.key()).is_some(), "{}", field.key());
        }
    }

    #[test]
    fn aliases_resolve() {
        let catalog = Catalog::builtin();
        assert_eq!(catalog.describe("SDRV_CTRL").unwrap().name, "SDRV_CTRL_1_0");
        assert_eq!(catalog.describe("EN_BATOCP").unwrap().name, "EN_BATOC");
    }

    #[test]
    fn duplicate_names_are_rejected() {
        let err = Catalog::new(
            vec![
                reg("EN_CHG", RegisterKind::Boolean),
                reg("EN_CHG", RegisterKind::Boolean),
            ],
            vec![],
        )
        .unwrap_err();
        assert_eq!(err, CatalogError::DuplicateRegister("EN_CHG".to_owned()));
    }

    #[test]
    fn lowercase_name_is_rejected() {
        let mut registers = table::registers();
        registers.push(reg("en_chg", RegisterKind::Boolean));
        assert_eq!(
            Catalog::new(registers, vec![]).unwrap_err(),
            CatalogError::InvalidName("en_chg".to_owned())
        );
    }

    #[test]
    fn unmapped_field_is_rejected() {
        let registers = table::registers()
            .into_iter()
            .filter(|r| r.name != "PG_STAT")
            .collect();
        assert_eq!(
            Catalog::new(registers, vec![]).unwrap_err(),
            CatalogError::UnmappedField("PG_STAT")
        );
    }

    #[test]
    fn empty_range_is_rejected() {
        let mut bad = reg("VREG_10_0", RegisterKind::Numeric);
        bad.range = Some(ValueRange::new(10., 5., 1.));
        assert!(matches!(
            validate_descriptor(&bad),
            Err(CatalogError::InvalidRange { .. })
        ));
    }

    #[test]
    fn dependency_on_unknown_register_is_rejected() {
        let deps = vec![DependencyRule {
            target: "FORCE_ICO",
            controller: "NOT_A_REGISTER",
            required: "1",
            message: "",
        }];
        assert!(matches!(
            Catalog::new(table::registers(), deps),
            Err(CatalogError::UnknownDependencyRegister { .. })
        ));
    }

    #[test]
    fn decode_by_kind() {
        let catalog = Catalog::builtin();
        assert_eq!(catalog.decode("EN_CHG", 1.).to_string(), "Enabled");
        assert_eq!(catalog.decode("CHG_STAT_2_0", 3.).to_string(), "Fast Charge");
        assert_eq!(catalog.decode("VBUS_STAT_3_0", 12.).to_string(), "raw:12");
        assert_eq!(catalog.decode("VBAT_ADC_15_0", 3800.).to_string(), "3800mV");
        assert_eq!(catalog.decode("FORCE_ICO", 0.).to_string(), "Execute");
        assert_eq!(catalog.decode("NOT_A_REGISTER", 5.).to_string(), "raw:5");
    }

    #[test]
    fn sentinels_decode_to_error() {
        let catalog = Catalog::builtin();
        assert_eq!(catalog.decode("VBAT_ADC_15_0", -999.), DisplayValue::Error);
        assert_eq!(catalog.decode("EN_CHG", -1.), DisplayValue::Error);
        assert_eq!(catalog.decode("FORCE_ICO", -1.), DisplayValue::Error);
        assert_eq!(catalog.decode("NOT_A_REGISTER", -1.), DisplayValue::Error);
    }

    #[test]
    fn validate_value_ranges() {
        let catalog = Catalog::builtin();
        assert!(catalog.validate_value("VSYSMIN_5_0", 3500.).is_ok());
        assert!(matches!(
            catalog.validate_value("VSYSMIN_5_0", 2000.),
            Err(WriteError::OutOfRange { .. })
        ));
        assert!(catalog.validate_value("CELL_1_0", 4.).is_ok());
        assert!(matches!(
            catalog.validate_value("CELL_1_0", 0.),
            Err(WriteError::InvalidOption { .. })
        ));
        assert_eq!(
            catalog.validate_value("VBUS_PRESENT_STAT", 1.),
            Err(WriteError::ReadOnly("VBUS_PRESENT_STAT"))
        );
        assert!(catalog.validate_value("FORCE_ICO", 1.).is_ok());
        assert!(catalog.validate_value("FORCE_ICO", 0.).is_err());
    }
}
