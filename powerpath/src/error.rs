use thiserror::Error;

use crate::ClassifyConfig;

/// The register catalog or its dependency table is malformed
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CatalogError {
    #[error("register {0} is defined more than once")]
    DuplicateRegister(String),
    #[error("invalid register name: {0:?}")]
    InvalidName(String),
    #[error("{0} register {1} has no option labels")]
    MissingOptions(crate::RegisterKind, &'static str),
    #[error("boolean register {0} must label exactly the values 0 and 1")]
    InvalidBooleanOptions(&'static str),
    #[error("numeric register {name} has an invalid range {range}")]
    InvalidRange {
        name: &'static str,
        range: crate::ValueRange,
    },
    #[error("snapshot field {0} has no register descriptor")]
    UnmappedField(&'static str),
    #[error("dependency on {target} names unknown register {name}")]
    UnknownDependencyRegister {
        target: &'static str,
        name: &'static str,
    },
    #[error("dependency target {0} is not writable")]
    ReadOnlyDependencyTarget(&'static str),
    #[error("register {0} has more than one dependency rule")]
    DuplicateDependency(&'static str),
    #[error("unknown register: {0}")]
    UnknownRegister(String),
}

/// A write request was rejected before reaching the device
#[derive(Error, Debug, Clone, PartialEq)]
pub enum WriteError {
    #[error("unknown register: {0}")]
    UnknownRegister(String),
    #[error("register {0} is read-only")]
    ReadOnly(&'static str),
    #[error("write to {register} denied: {reason}")]
    Denied {
        register: &'static str,
        reason: String,
    },
    #[error("register {0} requires a value")]
    MissingValue(&'static str),
    #[error("value {value} for {register} is outside {min}..={max}")]
    OutOfRange {
        register: &'static str,
        value: f64,
        min: f64,
        max: f64,
    },
    #[error("value {value} is not a valid option for {register}")]
    InvalidOption { register: &'static str, value: f64 },
}

/// A snapshot document could not be loaded
#[derive(Error, Debug)]
pub enum SnapshotParseError {
    #[error("could not parse JSON")]
    Json(#[from] json::Error),
    #[error("expected a JSON object, found {0}")]
    ExpectedObject(String),
    #[error("expected a number or boolean for {key}, found {found}")]
    ExpectedNumber { key: String, found: String },
}

/// A rule table does not cover its path's states exactly once
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RuleTableError {
    #[error("{path} table lists state {state} more than once")]
    DuplicateState {
        path: crate::PathId,
        state: &'static str,
    },
    #[error("{path} table has no rule for state {state}")]
    MissingState {
        path: crate::PathId,
        state: &'static str,
    },
    #[error("{path} table has a rule for the fallback state")]
    FallbackRule { path: crate::PathId },
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("invalid configuration: {cause}, {c:#?}")]
    InvalidConfig { c: ClassifyConfig, cause: String },
}
