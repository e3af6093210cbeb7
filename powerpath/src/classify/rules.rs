//! Ordered, first-match-wins rule tables

use std::collections::HashSet;

use log::{debug, warn};
use strum::IntoEnumIterator;

use crate::{error::RuleTableError, PathClassification, PathState, StatusSnapshot};

/// Literal narrative for snapshots no rule accepts
pub const UNCLASSIFIED_TEXT: &str = "UNCLASSIFIED";

pub(crate) type Guard = fn(&StatusSnapshot) -> bool;
pub(crate) type Narrate = fn(&StatusSnapshot) -> String;

/// One table entry: when `guard` holds, the path is in `state`
pub(crate) struct Rule<S> {
    pub(crate) state: S,
    pub(crate) guard: Guard,
    /// Finer explanation within the state, evaluated only for the matching rule
    pub(crate) narrate: Narrate,
}

impl<S> Rule<S> {
    pub(crate) const fn new(state: S, guard: Guard, narrate: Narrate) -> Self {
        Self {
            state,
            guard,
            narrate,
        }
    }
}

pub(crate) struct RuleTable<S: PathState> {
    rules: Vec<Rule<S>>,
}

impl<S> RuleTable<S>
where
    S: PathState + IntoEnumIterator + std::hash::Hash,
{
    /// Build a table, checking that every state but the fallback has exactly one rule
    pub(crate) fn new(rules: Vec<Rule<S>>) -> Result<Self, RuleTableError> {
        let mut seen = HashSet::new();
        for rule in &rules {
            if rule.state == S::unclassified() {
                return Err(RuleTableError::FallbackRule { path: S::PATH });
            }
            if !seen.insert(rule.state) {
                return Err(RuleTableError::DuplicateState {
                    path: S::PATH,
                    state: rule.state.name(),
                });
            }
        }
        if let Some(missing) = S::iter().find(|s| *s != S::unclassified() && !seen.contains(s)) {
            return Err(RuleTableError::MissingState {
                path: S::PATH,
                state: missing.name(),
            });
        }
        Ok(Self { rules })
    }

    /// Classify `snapshot`, falling back to the unclassified state
    pub(crate) fn evaluate(&self, snapshot: &StatusSnapshot) -> PathClassification<S> {
        match self.rules.iter().find(|rule| (rule.guard)(snapshot)) {
            Some(rule) => {
                debug!("{} path: rule {} matched", S::PATH, rule.state.name());
                PathClassification::new(rule.state, (rule.narrate)(snapshot))
            }
            None => {
                warn!("{} path: no rule matched, snapshot is unclassified", S::PATH);
                PathClassification::new(S::unclassified(), UNCLASSIFIED_TEXT)
            }
        }
    }

    #[cfg(test)]
    pub(crate) fn states(&self) -> impl Iterator<Item = S> + '_ {
        self.rules.iter().map(|r| r.state)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Field, InputState, Severity};

    fn never(_: &StatusSnapshot) -> bool {
        false
    }

    fn quiet(_: &StatusSnapshot) -> String {
        String::new()
    }

    fn full_table() -> Vec<Rule<InputState>> {
        InputState::iter()
            .filter(|s| *s != InputState::Unclassified)
            .map(|s| Rule::new(s, never, quiet))
            .collect()
    }

    #[test]
    fn no_match_falls_back() {
        let table = RuleTable::new(full_table()).unwrap();
        let c = table.evaluate(&StatusSnapshot::new());
        assert_eq!(c.state, InputState::Unclassified);
        assert_eq!(c.severity, Severity::Error);
        assert_eq!(c.narrative, UNCLASSIFIED_TEXT);
    }

    #[test]
    fn first_match_wins() {
        let mut rules = full_table();
        rules[3].guard = |s| s.is_set(Field::EnHiz);
        rules[5].guard = |s| s.is_set(Field::EnHiz);
        let table = RuleTable::new(rules).unwrap();
        let c = table.evaluate(&StatusSnapshot::new().with("EN_HIZ", 1.));
        assert_eq!(c.state, InputState::GatedByProtection);
    }

    #[test]
    fn duplicate_state_is_rejected() {
        let mut rules = full_table();
        rules.push(Rule::new(InputState::Disconnected, never, quiet));
        assert!(matches!(
            RuleTable::new(rules),
            Err(RuleTableError::DuplicateState { .. })
        ));
    }

    #[test]
    fn missing_state_is_rejected() {
        let mut rules = full_table();
        rules.pop();
        assert!(matches!(
            RuleTable::new(rules),
            Err(RuleTableError::MissingState { .. })
        ));
    }

    #[test]
    fn fallback_rule_is_rejected() {
        let mut rules = full_table();
        rules.push(Rule::new(InputState::Unclassified, never, quiet));
        assert!(matches!(
            RuleTable::new(rules),
            Err(RuleTableError::FallbackRule { .. })
        ));
    }
}
