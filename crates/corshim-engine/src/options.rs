//! Shim options (corshim.toml)
//!
//! ```toml
//! [enumeration]
//! hide_root_fields = true
//!
//! [format]
//! negative_sign = "-"
//! decimal_separator = "."
//! ```

use std::path::Path;

use corshim_sdk::{
    install_number_formatter, HostIntrospection, NumberFormatInfo, StandardFormatter,
};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::reflect::{EnumerationOptions, MemberEnumerator};

/// Errors that can occur while loading options
#[derive(Debug, Error)]
pub enum OptionsError {
    /// Failed to read options file
    #[error("Failed to read options file: {0}")]
    IoError(#[from] std::io::Error),

    /// Failed to parse TOML
    #[error("Failed to parse options: {0}")]
    ParseError(#[from] toml::de::Error),

    /// Failed to serialize TOML
    #[error("Failed to serialize options: {0}")]
    SerializeError(#[from] toml::ser::Error),

    /// Validation error
    #[error("Invalid options: {0}")]
    ValidationError(String),

    /// A process-wide number formatter was already in place
    #[error("A number formatter is already installed")]
    FormatterAlreadyInstalled,
}

/// Process-wide shim configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ShimOptions {
    /// Member enumeration settings
    pub enumeration: EnumerationOptions,

    /// Number formatting symbols used when a call passes no provider;
    /// effective once [`ShimOptions::install_formatter`] has run
    pub format: NumberFormatInfo,
}

impl ShimOptions {
    /// Load options from a file
    pub fn from_file(path: &Path) -> Result<Self, OptionsError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_str(&content)
    }

    /// Parse options from a string
    #[allow(clippy::should_implement_trait)]
    pub fn from_str(content: &str) -> Result<Self, OptionsError> {
        let options: ShimOptions = toml::from_str(content)?;
        options.validate()?;
        Ok(options)
    }

    /// Enumeration engine over `host` configured by these options
    pub fn enumerator<H: HostIntrospection>(&self, host: H) -> MemberEnumerator<H> {
        MemberEnumerator::with_options(host, self.enumeration)
    }

    /// Standard formatter whose default provider is `[format]`
    pub fn formatter(&self) -> StandardFormatter {
        StandardFormatter::with_info(self.format.clone())
    }

    /// Install [`ShimOptions::formatter`] as the process-wide number formatter
    ///
    /// Fails if a formatter was installed before or one was already used.
    pub fn install_formatter(&self) -> Result<(), OptionsError> {
        install_number_formatter(Box::new(self.formatter()))
            .map_err(|_| OptionsError::FormatterAlreadyInstalled)
    }

    /// Render as TOML
    pub fn to_toml(&self) -> Result<String, OptionsError> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Validate the options
    pub fn validate(&self) -> Result<(), OptionsError> {
        let format = &self.format;
        let required = [
            ("negative_sign", &format.negative_sign),
            ("decimal_separator", &format.decimal_separator),
            ("nan_symbol", &format.nan_symbol),
            ("positive_infinity_symbol", &format.positive_infinity_symbol),
            ("negative_infinity_symbol", &format.negative_infinity_symbol),
        ];
        for (name, value) in required {
            if value.is_empty() {
                return Err(OptionsError::ValidationError(format!(
                    "format.{} cannot be empty",
                    name
                )));
            }
        }

        if format.decimal_separator == format.group_separator {
            return Err(OptionsError::ValidationError(format!(
                "format.decimal_separator and format.group_separator are both '{}'",
                format.decimal_separator
            )));
        }

        if format.group_size == 0 {
            return Err(OptionsError::ValidationError(
                "format.group_size must be at least 1".to_string(),
            ));
        }

        Ok(())
    }
}
