//! Tunables for the classifiers and the aggregator

use crate::error::ConfigError;

/// Voltage below which a rail is considered unpowered
pub const DEFAULT_NOISE_FLOOR_MV: f64 = 100.;
/// Text used between path narratives in the combined status
pub const DEFAULT_SEPARATOR: &str = " | ";
/// Combined status text when no path has anything to say
pub const DEFAULT_UNPOWERED_TEXT: &str = "Unpowered";

#[derive(Clone, Debug, PartialEq)]
pub struct ClassifyConfig {
    pub(crate) noise_floor_mv: f64,
    pub(crate) separator: String,
    pub(crate) unpowered_text: String,
}

impl Default for ClassifyConfig {
    fn default() -> Self {
        Self {
            noise_floor_mv: DEFAULT_NOISE_FLOOR_MV,
            separator: DEFAULT_SEPARATOR.to_owned(),
            unpowered_text: DEFAULT_UNPOWERED_TEXT.to_owned(),
        }
    }
}

impl ClassifyConfig {
    /// Set the system path noise floor in millivolts
    ///
    /// # Errors
    ///
    /// - `mv` is negative or not a finite number
    pub fn noise_floor_mv(mut self, mv: f64) -> Result<Self, ConfigError> {
        if !mv.is_finite() || mv < 0. {
            return Err(ConfigError::InvalidConfig {
                c: self,
                cause: format!("noise floor must be a non-negative number of millivolts, got {mv}"),
            });
        }
        self.noise_floor_mv = mv;
        Ok(self)
    }

    /// Set the text placed between path narratives
    ///
    /// # Errors
    ///
    /// - `separator` is empty
    pub fn separator(mut self, separator: impl Into<String>) -> Result<Self, ConfigError> {
        let separator = separator.into();
        if separator.is_empty() {
            return Err(ConfigError::InvalidConfig {
                c: self,
                cause: "narrative separator cannot be empty".to_owned(),
            });
        }
        self.separator = separator;
        Ok(self)
    }

    #[must_use]
    pub fn unpowered_text(mut self, text: impl Into<String>) -> Self {
        self.unpowered_text = text.into();
        self
    }

    #[must_use]
    pub fn get_noise_floor_mv(&self) -> f64 {
        self.noise_floor_mv
    }
}
