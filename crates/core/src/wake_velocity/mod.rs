//! Wake velocity deficit models
//!
//! A deficit model turns the geometry of one upstream turbine into a
//! fractional speed reduction at every grid point of the next turbine. Models
//! are stateless strategies behind [`VelocityDeficit`]; [`create_velocity_model`]
//! picks one by [`WakeModel`] with its parameters from the input file.
//!
//! # Example
//!
//! ```rust
//! use wake_sim_core::config::WakeParameters;
//! use wake_sim_core::wake_velocity::{create_velocity_model, WakeModel};
//!
//! let model: WakeModel = "jensen".parse().unwrap();
//! let deficit = create_velocity_model(model, &WakeParameters::default()).unwrap();
//! assert_eq!(deficit.name(), "jensen");
//! ```

mod jensen;

pub use jensen::{JensenParameters, JensenVelocityDeficit};

use crate::config::WakeParameters;
use crate::error::{Result, WakeError};
use crate::flow_field::FlowField;
use crate::grid::TurbineGrid;
use std::fmt;
use std::str::FromStr;
use tracing::info;

/// Capability shared by all wake deficit models
pub trait VelocityDeficit: Send + Sync {
    /// Model name as used in input files
    fn name(&self) -> &'static str;

    /// Fractional velocity deficit at turbine `i_turbine`'s grid points
    /// caused by turbine `i_turbine - 1`
    ///
    /// Returns one value in [0, 1] per grid point. Inputs are not modified.
    ///
    /// # Panics
    ///
    /// Implementations may panic if `i_turbine` is 0 or out of range.
    fn velocity_deficit(
        &self,
        grid: &TurbineGrid,
        flow_field: &FlowField,
        i_turbine: usize,
    ) -> Vec<f64>;
}

/// Wake velocity models known to input files
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WakeModel {
    /// Jensen/Park top-hat cone
    Jensen,
    /// `TurbOPark` model
    TurboPark,
    /// Multi-zone FLORIS model
    MultiZone,
    /// Gaussian self-similar wake
    Gauss,
    /// Original Gaussian implementation
    GaussLegacy,
    /// Blondel super-Gaussian
    Blondel,
    /// Ishihara-Qian Gaussian with near-wake correction
    IshiharaQian,
    /// Curled wake
    Curl,
}

impl WakeModel {
    /// All accepted names, in declaration order
    pub const NAMES: [&'static str; 8] = [
        "jensen",
        "turbopark",
        "multizone",
        "gauss",
        "gauss_legacy",
        "blondel",
        "ishihara_qian",
        "curl",
    ];

    /// Name as used in input files
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Jensen => "jensen",
            Self::TurboPark => "turbopark",
            Self::MultiZone => "multizone",
            Self::Gauss => "gauss",
            Self::GaussLegacy => "gauss_legacy",
            Self::Blondel => "blondel",
            Self::IshiharaQian => "ishihara_qian",
            Self::Curl => "curl",
        }
    }
}

impl FromStr for WakeModel {
    type Err = WakeError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "jensen" => Ok(Self::Jensen),
            "turbopark" => Ok(Self::TurboPark),
            "multizone" => Ok(Self::MultiZone),
            "gauss" => Ok(Self::Gauss),
            "gauss_legacy" => Ok(Self::GaussLegacy),
            "blondel" => Ok(Self::Blondel),
            "ishihara_qian" => Ok(Self::IshiharaQian),
            "curl" => Ok(Self::Curl),
            other => Err(WakeError::unknown_wake_model(other)),
        }
    }
}

impl fmt::Display for WakeModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Create the deficit model for `model`
///
/// # Errors
///
/// Returns `UnsupportedWakeModel` for models without an implementation and
/// `InvalidConfig` if the model's parameters fail validation.
pub fn create_velocity_model(
    model: WakeModel,
    parameters: &WakeParameters,
) -> Result<Box<dyn VelocityDeficit>> {
    match model {
        WakeModel::Jensen => {
            parameters.jensen.validate()?;
            info!(
                "Using Jensen velocity deficit model (we = {})",
                parameters.jensen.we
            );
            Ok(Box::new(JensenVelocityDeficit::new(parameters.jensen)))
        }
        other => Err(WakeError::unsupported_wake_model(other.as_str())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::WakeErrorCode;

    #[test]
    fn test_names_round_trip() {
        for name in WakeModel::NAMES {
            let model: WakeModel = name.parse().unwrap();
            assert_eq!(model.as_str(), name);
            assert_eq!(model.to_string(), name);
        }
    }

    #[test]
    fn test_unknown_name() {
        let err = "park".parse::<WakeModel>().unwrap_err();
        assert_eq!(err.code(), WakeErrorCode::UnknownWakeModel);
    }

    #[test]
    fn test_create_jensen_with_parameters() {
        let parameters = WakeParameters {
            jensen: JensenParameters { we: 0.075 },
        };
        let model = create_velocity_model(WakeModel::Jensen, &parameters).unwrap();
        assert_eq!(model.name(), "jensen");
    }

    #[test]
    fn test_unimplemented_models_rejected() {
        for model in [WakeModel::Gauss, WakeModel::Curl, WakeModel::IshiharaQian] {
            let err = create_velocity_model(model, &WakeParameters::default())
                .err()
                .unwrap();
            assert_eq!(err.code(), WakeErrorCode::UnsupportedWakeModel);
        }
    }

    #[test]
    fn test_invalid_parameters_rejected() {
        let parameters = WakeParameters {
            jensen: JensenParameters { we: -0.05 },
        };
        let err = create_velocity_model(WakeModel::Jensen, &parameters)
            .err()
            .unwrap();
        assert_eq!(err.code(), WakeErrorCode::InvalidConfig);
    }
}
