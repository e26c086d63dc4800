use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::{
    profile::{BulkTarget, PowerLawProfile},
    utils::{
        Result, BUILDING_HEIGHT, BUILDING_WIDTH, DOMAIN_HEIGHT_RATIO, DOMAIN_WIDTH_RATIO,
        GEOMETRY_PATH, INPUT_PATH, OUTPUT_PATH, VERIFY_TOLERANCE, ZERO_BULK_TOLERANCE,
    },
};

mod builder;
mod errors;

pub use builder::CorrectionConfigBuilder;
pub use errors::ConfigError;

/// Everything a single correction run needs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CorrectionConfig {
    pub paths: PathConfig,
    pub building: BuildingConfig,
    pub domain: DomainConfig,
    pub profile: PowerLawProfile,
    pub bulk_target: BulkTarget,
    pub tolerances: ToleranceConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PathConfig {
    /// Comma-delimited inlet face area vectors exported from the mesh.
    pub geometry: PathBuf,
    /// HDF5 file holding `U`, `V`, `W` and `UMEAN`.
    pub input: PathBuf,
    /// HDF5 file the corrected field is written to (truncated).
    pub output: PathBuf,
    /// Optional JSON report of the run.
    #[serde(default)]
    pub report: Option<PathBuf>,
}

/// Building dimensions `H` and `B`. Only used to derive the default domain.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BuildingConfig {
    pub height: f64,
    pub width: f64,
}

/// Computational domain cross-section, height `Z` and width `Y`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DomainConfig {
    pub height: f64,
    pub width: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ToleranceConfig {
    /// Instantaneous bulk velocities at or below this magnitude abort the run.
    pub zero_bulk_velocity: f64,
    /// Allowed relative deviation of the corrected bulk velocity from the target.
    pub verification: f64,
}

impl Default for PathConfig {
    fn default() -> Self {
        Self {
            geometry: PathBuf::from(GEOMETRY_PATH),
            input: PathBuf::from(INPUT_PATH),
            output: PathBuf::from(OUTPUT_PATH),
            report: None,
        }
    }
}

impl Default for BuildingConfig {
    fn default() -> Self {
        Self {
            height: BUILDING_HEIGHT,
            width: BUILDING_WIDTH,
        }
    }
}

impl DomainConfig {
    pub fn for_building(building: &BuildingConfig) -> Self {
        Self {
            height: DOMAIN_HEIGHT_RATIO * building.height,
            width: DOMAIN_WIDTH_RATIO * building.height,
        }
    }

    /// Nominal inlet cross-section `Y * Z`.
    pub fn inlet_area(&self) -> f64 {
        self.height * self.width
    }
}

impl Default for DomainConfig {
    fn default() -> Self {
        Self::for_building(&BuildingConfig::default())
    }
}

impl Default for ToleranceConfig {
    fn default() -> Self {
        Self {
            zero_bulk_velocity: ZERO_BULK_TOLERANCE,
            verification: VERIFY_TOLERANCE,
        }
    }
}

impl Default for CorrectionConfig {
    fn default() -> Self {
        CorrectionConfigBuilder::new()
            .build()
            .expect("Default configuration should always be valid")
    }
}

impl CorrectionConfig {
    /// Target bulk velocity prescribed by the mean profile.
    pub fn prescribed_bulk_velocity(&self) -> f64 {
        self.profile.bulk_velocity(self.domain.height)
    }

    pub fn validate(&self) -> std::result::Result<(), ConfigError> {
        if !(self.profile.reference_height > 0.0) {
            return Err(ConfigError::invalid(
                "reference_height",
                self.profile.reference_height,
            ));
        }
        if !self.profile.reference_velocity.is_finite() {
            return Err(ConfigError::invalid(
                "reference_velocity",
                self.profile.reference_velocity,
            ));
        }
        if !(self.profile.exponent > -1.0) || !self.profile.exponent.is_finite() {
            return Err(ConfigError::invalid("exponent", self.profile.exponent));
        }
        if !(self.domain.height > 0.0) {
            return Err(ConfigError::invalid("domain.height", self.domain.height));
        }
        if !(self.domain.width > 0.0) {
            return Err(ConfigError::invalid("domain.width", self.domain.width));
        }
        if !(self.tolerances.zero_bulk_velocity >= 0.0) {
            return Err(ConfigError::invalid(
                "tolerances.zero_bulk_velocity",
                self.tolerances.zero_bulk_velocity,
            ));
        }
        if !(self.tolerances.verification > 0.0) {
            return Err(ConfigError::invalid(
                "tolerances.verification",
                self.tolerances.verification,
            ));
        }
        for (name, path) in [
            ("paths.geometry", &self.paths.geometry),
            ("paths.input", &self.paths.input),
            ("paths.output", &self.paths.output),
        ] {
            if path.as_os_str().is_empty() {
                return Err(ConfigError::MissingRequired(name.to_string()));
            }
        }
        if self.paths.input == self.paths.output {
            return Err(ConfigError::ValidationError(format!(
                "output path {} would overwrite the input field",
                self.paths.output.display()
            )));
        }
        Ok(())
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let file = std::fs::File::open(path)?;
        let config: Self = serde_yaml::from_reader(file)?;
        config.validate()?;
        Ok(config)
    }

    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let file = std::fs::File::create(path)?;
        serde_yaml::to_writer(file, self)?;
        Ok(())
    }
}
