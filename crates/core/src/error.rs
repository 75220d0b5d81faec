//! Error types for the simulation's outer surfaces
//!
//! The wake core itself is infallible. Errors arise only where external input
//! enters the crate: configuration files, wake-model selection, farm layouts
//! and turbine performance queries.

use std::fmt;

/// Crate result alias
pub type Result<T> = std::result::Result<T, WakeError>;

/// Error codes describing the class of failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WakeErrorCode {
    /// A configuration value failed validation.
    InvalidConfig,

    /// The input text could not be parsed.
    Parse,

    /// The input file could not be read.
    Io,

    /// The requested wake model name is not recognised.
    UnknownWakeModel,

    /// The wake model is recognised but has no implementation here.
    UnsupportedWakeModel,

    /// Layout coordinate lists have different lengths.
    LayoutMismatch,

    /// A power or thrust query needs a performance table the turbine lacks.
    MissingPerformanceTable,
}

impl fmt::Display for WakeErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::InvalidConfig => "invalid configuration",
            Self::Parse => "parse error",
            Self::Io => "I/O error",
            Self::UnknownWakeModel => "unknown wake model",
            Self::UnsupportedWakeModel => "unsupported wake model",
            Self::LayoutMismatch => "layout mismatch",
            Self::MissingPerformanceTable => "missing performance table",
        };
        f.write_str(s)
    }
}

/// Error carrying a code and a human-readable message.
///
/// # Example
/// ```rust
/// use wake_sim_core::error::{WakeError, WakeErrorCode};
///
/// let err = WakeError::unknown_wake_model("park");
/// assert_eq!(err.code(), WakeErrorCode::UnknownWakeModel);
/// assert!(err.msg().contains("park"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WakeError {
    code: WakeErrorCode,
    msg: String,
}

impl WakeError {
    /// Create error for a configuration value that failed validation.
    ///
    /// # Arguments
    /// * `param_name` - Dotted path of the offending key (e.g., `"turbine.rotor_diameter"`)
    /// * `message` - A description of the constraint that was violated
    pub fn invalid_config(param_name: &str, message: &str) -> Self {
        Self {
            code: WakeErrorCode::InvalidConfig,
            msg: format!("Config parameter {param_name}: {message}"),
        }
    }

    /// Create error for a configuration value that must be finite and positive.
    pub fn non_positive(param_name: &str, value: f64) -> Self {
        Self::invalid_config(
            param_name,
            &format!("must be finite and positive, got {value}"),
        )
    }

    /// Create error for input text that could not be parsed.
    pub fn parse(message: impl fmt::Display) -> Self {
        Self {
            code: WakeErrorCode::Parse,
            msg: format!("Failed to parse input: {message}"),
        }
    }

    /// Create error for an input file that could not be read.
    pub fn io(path: &str, message: impl fmt::Display) -> Self {
        Self {
            code: WakeErrorCode::Io,
            msg: format!("Failed to read '{path}': {message}"),
        }
    }

    /// Create error for a wake model name outside the known set.
    pub fn unknown_wake_model(name: &str) -> Self {
        Self {
            code: WakeErrorCode::UnknownWakeModel,
            msg: format!(
                "Invalid wake model '{name}'. Valid options include: {}",
                crate::wake_velocity::WakeModel::NAMES.join(", ")
            ),
        }
    }

    /// Create error for a known wake model that this crate does not implement.
    pub fn unsupported_wake_model(name: &str) -> Self {
        Self {
            code: WakeErrorCode::UnsupportedWakeModel,
            msg: format!("Wake model '{name}' is not implemented"),
        }
    }

    /// Create error for `layout_x`/`layout_y` of different lengths.
    pub fn layout_mismatch(n_x: usize, n_y: usize) -> Self {
        Self {
            code: WakeErrorCode::LayoutMismatch,
            msg: format!("layout_x has {n_x} entries but layout_y has {n_y}"),
        }
    }

    /// Create error for a performance query without a power/thrust table.
    pub fn missing_performance_table(query: &str) -> Self {
        Self {
            code: WakeErrorCode::MissingPerformanceTable,
            msg: format!("Cannot compute {query}: turbine has no power_thrust_table"),
        }
    }

    /// Returns the error code.
    pub fn code(&self) -> WakeErrorCode {
        self.code
    }

    /// Returns the human-readable error message.
    pub fn msg(&self) -> &str {
        &self.msg
    }
}

impl fmt::Display for WakeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.code, self.msg)
    }
}

impl std::error::Error for WakeError {}

impl From<toml::de::Error> for WakeError {
    fn from(e: toml::de::Error) -> Self {
        Self::parse(e)
    }
}

impl From<WakeError> for WakeErrorCode {
    fn from(error: WakeError) -> Self {
        error.code
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_config_message() {
        let err = WakeError::non_positive("turbine.rotor_diameter", -1.0);
        assert_eq!(err.code(), WakeErrorCode::InvalidConfig);
        assert_eq!(
            err.msg(),
            "Config parameter turbine.rotor_diameter: must be finite and positive, got -1"
        );
    }

    #[test]
    fn test_display_includes_code() {
        let err = WakeError::layout_mismatch(3, 2);
        assert_eq!(
            err.to_string(),
            "layout mismatch: layout_x has 3 entries but layout_y has 2"
        );
    }

    #[test]
    fn test_unknown_model_lists_valid_names() {
        let err = WakeError::unknown_wake_model("park");
        assert!(err.msg().contains("jensen"));
        assert!(err.msg().contains("ishihara_qian"));
    }

    #[test]
    fn test_code_from_error() {
        let code: WakeErrorCode = WakeError::unsupported_wake_model("curl").into();
        assert_eq!(code, WakeErrorCode::UnsupportedWakeModel);
    }
}
