//! Point-in-time register values

use std::collections::HashMap;

use crate::Field;

/// An immutable mapping from register name to its decoded value
///
/// Booleans are `0`/`1`, enumerations small integers and ADC readings signed numbers. Reads
/// through [`StatusSnapshot::value`] treat an absent field as `0`, so every rule sees a
/// concrete number.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct StatusSnapshot {
    values: HashMap<String, f64>,
}

impl StatusSnapshot {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns a copy of this snapshot with `name` set to `value`
    #[must_use]
    pub fn with(mut self, name: impl Into<String>, value: f64) -> Self {
        self.values.insert(name.into(), value);
        self
    }

    pub fn insert(&mut self, name: impl Into<String>, value: f64) {
        self.values.insert(name.into(), value);
    }

    /// Raw lookup that distinguishes "absent" from `0`
    #[must_use]
    pub fn get(&self, name: &str) -> Option<f64> {
        self.values.get(name).copied()
    }

    /// Value of a rule field under the first of its [keys](Field::keys) present, `0` when absent
    #[must_use]
    pub fn value(&self, field: Field) -> f64 {
        field.keys().find_map(|key| self.get(key)).unwrap_or(0.)
    }

    /// Whether `field` reads exactly `1`
    #[must_use]
    pub fn is_set(&self, field: Field) -> bool {
        self.value(field) == 1.
    }

    /// Whether `field` reads exactly `0`
    ///
    /// This is not the negation of [`StatusSnapshot::is_set`]: a read-error sentinel such as `-1`
    /// is neither set nor clear.
    #[must_use]
    pub fn is_clear(&self, field: Field) -> bool {
        self.value(field) == 0.
    }

    /// Whether any of `fields` reads exactly `1`
    #[must_use]
    pub fn any_set(&self, fields: &[Field]) -> bool {
        fields.iter().any(|f| self.is_set(*f))
    }

    /// Whether all of `fields` read exactly `0`
    #[must_use]
    pub fn all_clear(&self, fields: &[Field]) -> bool {
        fields.iter().all(|f| self.is_clear(*f))
    }

    /// Overlays `other` on top of `self`, values in `other` winning
    ///
    /// Page data is typically combined with the global status block this way.
    #[must_use]
    pub fn merged(&self, other: &StatusSnapshot) -> StatusSnapshot {
        let mut values = self.values.clone();
        values.extend(other.values.iter().map(|(k, v)| (k.clone(), *v)));
        StatusSnapshot { values }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> {
        self.values.iter().map(|(k, v)| (k.as_str(), *v))
    }
}

impl<S: Into<String>> FromIterator<(S, f64)> for StatusSnapshot {
    fn from_iter<T: IntoIterator<Item = (S, f64)>>(iter: T) -> Self {
        Self {
            values: iter.into_iter().map(|(k, v)| (k.into(), v)).collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::StatusSnapshot;
    use crate::Field;

    #[test]
    fn absent_field_reads_zero() {
        let snapshot = StatusSnapshot::new();
        assert_eq!(snapshot.value(Field::VbusPresent), 0.);
        assert!(snapshot.is_clear(Field::VbusPresent));
        assert!(!snapshot.is_set(Field::VbusPresent));
        assert_eq!(snapshot.get("VBUS_PRESENT_STAT"), None);
    }

    #[test]
    fn sentinel_is_neither_set_nor_clear() {
        let snapshot = StatusSnapshot::new().with("PG_STAT", -1.);
        assert!(!snapshot.is_set(Field::PowerGood));
        assert!(!snapshot.is_clear(Field::PowerGood));
    }

    #[test]
    fn field_reads_register_name() {
        let snapshot = StatusSnapshot::new()
            .with("JEITA_VSET_2_0", 3.)
            .with("JEITA_ISETH_1_0", 2.)
            .with("SDRV_CTRL_1_0", 1.);
        assert_eq!(snapshot.value(Field::JeitaVset), 3.);
        assert_eq!(snapshot.value(Field::JeitaIsetH), 2.);
        assert!(snapshot.is_set(Field::SdrvCtrl));
        assert!(snapshot.is_clear(Field::JeitaIsetC));
    }

    #[test]
    fn field_key_wins_over_register_name() {
        let snapshot = StatusSnapshot::new()
            .with("EN_BATOCP", 1.)
            .with("EN_BATOC", 0.);
        assert!(snapshot.is_set(Field::EnBatOcp));
    }

    #[test]
    fn merged_prefers_other() {
        let page = StatusSnapshot::from_iter([("EN_OTG", 0.), ("EN_CHG", 1.)]);
        let global = StatusSnapshot::from_iter([("EN_OTG", 1.)]);
        let merged = page.merged(&global);
        assert!(merged.is_set(Field::EnOtg));
        assert!(merged.is_set(Field::EnChg));
        assert_eq!(merged.len(), 2);
    }
}
