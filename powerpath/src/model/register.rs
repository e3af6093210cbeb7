//! Static description of a charger register and the values it can hold

use std::fmt;

use itertools::Itertools;

/// Raw value that the firmware reports when a register read failed
pub const READ_ERROR_SENTINEL: f64 = -1.;
/// Raw value that the firmware reports when an ADC conversion failed
pub const ADC_ERROR_SENTINEL: f64 = -999.;

/// Returns whether `raw` is one of the firmware's read-error sentinels
#[must_use]
pub fn is_sentinel(raw: f64) -> bool {
    raw == READ_ERROR_SENTINEL || raw == ADC_ERROR_SENTINEL
}

/// Kind of value a register holds
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RegisterKind {
    /// Single bit with a label for `0` and `1`
    Boolean,
    /// Small integer from a fixed option set
    Enum,
    /// Signed number, optionally with a unit and a writable range
    Numeric,
    /// Write-only trigger; writing `1` executes it
    Command,
}

impl fmt::Display for RegisterKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Boolean => "boolean",
            Self::Enum => "enum",
            Self::Numeric => "numeric",
            Self::Command => "command",
        })
    }
}

/// Software access to a register
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Access {
    /// read-only
    ReadOnly,
    /// read-write
    ReadWrite,
}

impl Access {
    /// Whether this register is software writable or not
    #[must_use]
    pub const fn is_write(&self) -> bool {
        match self {
            Self::ReadOnly => false,
            Self::ReadWrite => true,
        }
    }
}

impl fmt::Display for Access {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::ReadOnly => "read-only",
            Self::ReadWrite => "read-write",
        })
    }
}

/// Inclusive range of values accepted by a numeric register
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ValueRange {
    pub min: f64,
    pub max: f64,
    pub step: f64,
}

impl ValueRange {
    #[must_use]
    pub const fn new(min: f64, max: f64, step: f64) -> Self {
        Self { min, max, step }
    }

    #[must_use]
    pub fn contains(&self, value: f64) -> bool {
        (self.min..=self.max).contains(&value)
    }
}

impl fmt::Display for ValueRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}..={} step {}",
            format_number(self.min),
            format_number(self.max),
            format_number(self.step)
        )
    }
}

/// Everything the dashboard knows about one register
#[derive(Clone, Debug, PartialEq)]
pub struct RegisterDescriptor {
    pub name: &'static str,
    /// Alternative names the telemetry uses for the same value
    pub aliases: &'static [&'static str],
    pub kind: RegisterKind,
    pub access: Access,
    pub unit: Option<&'static str>,
    pub range: Option<ValueRange>,
    /// Value to label mapping for boolean and enum registers
    pub options: &'static [(i64, &'static str)],
    pub explanation: &'static str,
}

impl RegisterDescriptor {
    /// Label for an integral option value
    #[must_use]
    pub fn label(&self, value: f64) -> Option<&'static str> {
        option_label(self.options, value)
    }

    /// Decodes `raw` for display
    ///
    /// Read-error sentinels take precedence over the kind-specific decoding.
    #[must_use]
    pub fn decode(&self, raw: f64) -> DisplayValue {
        if is_sentinel(raw) {
            return DisplayValue::Error;
        }
        match self.kind {
            RegisterKind::Boolean | RegisterKind::Enum => self
                .label(raw)
                .map_or(DisplayValue::Raw(raw), |l| DisplayValue::Label(l.to_owned())),
            RegisterKind::Numeric => DisplayValue::Number {
                value: raw,
                unit: self.unit,
            },
            RegisterKind::Command => DisplayValue::Execute,
        }
    }

    pub fn matches(&self, name: &str) -> bool {
        self.name == name || self.aliases.contains(&name)
    }
}

impl fmt::Display for RegisterDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{} ({}, {})", self.name, self.kind, self.access)?;
        if !self.aliases.is_empty() {
            writeln!(f, "  aliases: {}", self.aliases.iter().join(", "))?;
        }
        if let Some(range) = &self.range {
            writeln!(f, "  range: {range}{}", self.unit.unwrap_or_default())?;
        } else if let Some(unit) = self.unit {
            writeln!(f, "  unit: {unit}")?;
        }
        if !self.options.is_empty() {
            writeln!(
                f,
                "  options: {}",
                self.options
                    .iter()
                    .map(|(v, l)| format!("{v} = {l}"))
                    .join(", ")
            )?;
        }
        write!(f, "  {}", self.explanation)
    }
}

/// A register value ready for display
#[derive(Clone, Debug, PartialEq)]
pub enum DisplayValue {
    /// Option label of a boolean or enum register
    Label(String),
    Number {
        value: f64,
        unit: Option<&'static str>,
    },
    /// Label shown for command registers
    Execute,
    /// The firmware reported a read error
    Error,
    /// The value could not be mapped to a label
    Raw(f64),
}

impl fmt::Display for DisplayValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Label(label) => f.write_str(label),
            Self::Number { value, unit } => {
                write!(f, "{}{}", format_number(*value), unit.unwrap_or_default())
            }
            Self::Execute => f.write_str("Execute"),
            Self::Error => f.write_str("Error"),
            Self::Raw(value) => write!(f, "raw:{}", format_number(*value)),
        }
    }
}

/// A write to `target` is only permitted while `controller` reads `required`
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DependencyRule {
    pub target: &'static str,
    pub controller: &'static str,
    /// Compared against the controller's value rendered as a string
    pub required: &'static str,
    pub message: &'static str,
}

/// Label of an integral `value` in an option list
pub(crate) fn option_label(
    options: &[(i64, &'static str)],
    value: f64,
) -> Option<&'static str> {
    as_integer(value).and_then(|v| {
        options
            .iter()
            .find(|(opt, _)| *opt == v)
            .map(|(_, label)| *label)
    })
}

pub(crate) fn as_integer(value: f64) -> Option<i64> {
    (value.fract() == 0. && value.is_finite()).then_some(value as i64)
}

/// Renders integral values without a fractional part and everything else with two decimals
pub(crate) fn format_number(value: f64) -> String {
    match as_integer(value) {
        Some(v) => v.to_string(),
        None => format!("{value:.2}"),
    }
}

/// Renders a value the way the controller comparison expects, `1` rather than `1.0`
pub(crate) fn value_to_string(value: f64) -> String {
    match as_integer(value) {
        Some(v) => v.to_string(),
        None => value.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EN_CHG: RegisterDescriptor = RegisterDescriptor {
        name: "EN_CHG",
        aliases: &[],
        kind: RegisterKind::Boolean,
        access: Access::ReadWrite,
        unit: None,
        range: None,
        options: &[(0, "Disabled"), (1, "Enabled")],
        explanation: "Charge enable",
    };

    #[test]
    fn boolean_decodes_to_label() {
        assert_eq!(EN_CHG.decode(1.), DisplayValue::Label("Enabled".to_owned()));
        assert_eq!(EN_CHG.decode(3.), DisplayValue::Raw(3.));
        assert_eq!(EN_CHG.decode(0.5), DisplayValue::Raw(0.5));
    }

    #[test]
    fn sentinel_wins_over_kind() {
        assert_eq!(EN_CHG.decode(-1.), DisplayValue::Error);
        assert_eq!(EN_CHG.decode(-999.), DisplayValue::Error);
    }

    #[test]
    fn display_values() {
        let mv = DisplayValue::Number {
            value: 4200.,
            unit: Some("mV"),
        };
        assert_eq!(mv.to_string(), "4200mV");
        let temp = DisplayValue::Number {
            value: 35.5,
            unit: Some("°C"),
        };
        assert_eq!(temp.to_string(), "35.50°C");
        assert_eq!(DisplayValue::Raw(12.).to_string(), "raw:12");
    }

    #[test]
    fn access_display() {
        assert_eq!(Access::ReadOnly.to_string(), "read-only");
        assert_eq!(Access::ReadWrite.to_string(), "read-write");
        assert!(Access::ReadWrite.is_write());
    }

    #[test]
    fn controller_values_render_like_integers() {
        assert_eq!(value_to_string(1.), "1");
        assert_eq!(value_to_string(-1.), "-1");
        assert_eq!(value_to_string(0.5), "0.5");
    }
}
