use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::path::PathBuf;

use super::{
    BuildingConfig, ConfigError, CorrectionConfig, DomainConfig, PathConfig, ToleranceConfig,
};
use crate::profile::{BulkTarget, PowerLawProfile};

/// Collects optional overrides; anything left unset falls back to the
/// reference test case. An unset domain is derived from the building height.
#[derive(Default, Debug, Clone, Serialize, Deserialize)]
pub struct CorrectionConfigBuilder {
    pub geometry_path: Option<PathBuf>,
    pub input_path: Option<PathBuf>,
    pub output_path: Option<PathBuf>,
    pub report_path: Option<PathBuf>,
    pub building_height: Option<f64>,
    pub building_width: Option<f64>,
    pub domain_height: Option<f64>,
    pub domain_width: Option<f64>,
    pub reference_height: Option<f64>,
    pub reference_velocity: Option<f64>,
    pub power_law_exponent: Option<f64>,
    pub bulk_target: Option<BulkTarget>,
    pub zero_tolerance: Option<f64>,
    pub verify_tolerance: Option<f64>,
}

impl CorrectionConfigBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts from an existing configuration so that individual values can be
    /// overridden.
    pub fn from_config(config: &CorrectionConfig) -> Self {
        Self {
            geometry_path: Some(config.paths.geometry.clone()),
            input_path: Some(config.paths.input.clone()),
            output_path: Some(config.paths.output.clone()),
            report_path: config.paths.report.clone(),
            building_height: Some(config.building.height),
            building_width: Some(config.building.width),
            domain_height: Some(config.domain.height),
            domain_width: Some(config.domain.width),
            reference_height: Some(config.profile.reference_height),
            reference_velocity: Some(config.profile.reference_velocity),
            power_law_exponent: Some(config.profile.exponent),
            bulk_target: Some(config.bulk_target),
            zero_tolerance: Some(config.tolerances.zero_bulk_velocity),
            verify_tolerance: Some(config.tolerances.verification),
        }
    }

    pub fn geometry_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.geometry_path = Some(path.into());
        self
    }

    pub fn input_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.input_path = Some(path.into());
        self
    }

    pub fn output_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.output_path = Some(path.into());
        self
    }

    pub fn report_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.report_path = Some(path.into());
        self
    }

    pub fn building_height(mut self, height: f64) -> Self {
        self.building_height = Some(height);
        self
    }

    pub fn building_width(mut self, width: f64) -> Self {
        self.building_width = Some(width);
        self
    }

    pub fn domain_height(mut self, height: f64) -> Self {
        self.domain_height = Some(height);
        self
    }

    pub fn domain_width(mut self, width: f64) -> Self {
        self.domain_width = Some(width);
        self
    }

    pub fn reference_height(mut self, height: f64) -> Self {
        self.reference_height = Some(height);
        self
    }

    pub fn reference_velocity(mut self, velocity: f64) -> Self {
        self.reference_velocity = Some(velocity);
        self
    }

    pub fn power_law_exponent(mut self, alpha: f64) -> Self {
        self.power_law_exponent = Some(alpha);
        self
    }

    pub fn bulk_target(mut self, target: BulkTarget) -> Self {
        self.bulk_target = Some(target);
        self
    }

    pub fn zero_tolerance(mut self, tol: f64) -> Self {
        self.zero_tolerance = Some(tol);
        self
    }

    pub fn verify_tolerance(mut self, tol: f64) -> Self {
        self.verify_tolerance = Some(tol);
        self
    }

    pub fn from_json(value: &Value) -> Result<Self, ConfigError> {
        if !value.is_object() {
            return Err(ConfigError::JsonError(format!(
                "expected an object, got {}",
                value
            )));
        }

        let mut builder = Self::new();

        let path = |key: &str| -> Result<Option<PathBuf>, ConfigError> {
            match value.get(key) {
                None | Some(Value::Null) => Ok(None),
                Some(v) => v
                    .as_str()
                    .map(|s| Some(PathBuf::from(s)))
                    .ok_or_else(|| ConfigError::invalid(key, v)),
            }
        };
        builder.geometry_path = path("geometry_path")?;
        builder.input_path = path("input_path")?;
        builder.output_path = path("output_path")?;
        builder.report_path = path("report_path")?;

        let number = |key: &str| -> Result<Option<f64>, ConfigError> {
            match value.get(key) {
                None | Some(Value::Null) => Ok(None),
                Some(v) => v
                    .as_f64()
                    .map(Some)
                    .ok_or_else(|| ConfigError::invalid(key, v)),
            }
        };
        builder.building_height = number("building_height")?;
        builder.building_width = number("building_width")?;
        builder.domain_height = number("domain_height")?;
        builder.domain_width = number("domain_width")?;
        builder.reference_height = number("reference_height")?;
        builder.reference_velocity = number("reference_velocity")?;
        builder.power_law_exponent = number("power_law_exponent")?;
        builder.zero_tolerance = number("zero_tolerance")?;
        builder.verify_tolerance = number("verify_tolerance")?;

        if let Some(target) = value.get("bulk_target").filter(|v| !v.is_null()) {
            let target = serde_json::from_value(target.clone())
                .map_err(|e| ConfigError::JsonError(e.to_string()))?;
            builder.bulk_target = Some(target);
        }

        Ok(builder)
    }

    pub fn build(self) -> Result<CorrectionConfig, ConfigError> {
        let mut paths = PathConfig::default();
        if let Some(geometry) = self.geometry_path {
            paths.geometry = geometry;
        }
        if let Some(input) = self.input_path {
            paths.input = input;
        }
        if let Some(output) = self.output_path {
            paths.output = output;
        }
        paths.report = self.report_path;

        let mut building = BuildingConfig::default();
        if let Some(height) = self.building_height {
            building.height = height;
        }
        if let Some(width) = self.building_width {
            building.width = width;
        }

        let mut domain = DomainConfig::for_building(&building);
        if let Some(height) = self.domain_height {
            domain.height = height;
        }
        if let Some(width) = self.domain_width {
            domain.width = width;
        }

        let mut profile = PowerLawProfile::default();
        if let Some(height) = self.reference_height {
            profile.reference_height = height;
        }
        if let Some(velocity) = self.reference_velocity {
            profile.reference_velocity = velocity;
        }
        if let Some(alpha) = self.power_law_exponent {
            profile.exponent = alpha;
        }

        let mut tolerances = ToleranceConfig::default();
        if let Some(tol) = self.zero_tolerance {
            tolerances.zero_bulk_velocity = tol;
        }
        if let Some(tol) = self.verify_tolerance {
            tolerances.verification = tol;
        }

        let config = CorrectionConfig {
            paths,
            building,
            domain,
            profile,
            bulk_target: self.bulk_target.unwrap_or_default(),
            tolerances,
        };
        config.validate()?;
        Ok(config)
    }
}
