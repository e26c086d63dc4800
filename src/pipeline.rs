//! One correction run: load, rescale, verify, write.

use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::{debug, info, warn};

use crate::{
    config::CorrectionConfig,
    correction::{self, Correction},
    field::InflowField,
    geometry::InletPatch,
    profile::BulkTarget,
    storage::{FieldSink, FieldSource},
    utils::{Result, AREA_WARN_FRACTION},
};

/// Summary of a finished run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CorrectionReport {
    pub n_points: usize,
    pub n_times: usize,
    /// Sum of the streamwise face areas.
    pub inlet_area: f64,
    /// `Y * Z` of the configured domain.
    pub nominal_area: f64,
    pub prescribed_bulk_velocity: f64,
    pub target_bulk_velocity: f64,
    pub bulk_velocity: Vec<f64>,
    pub corrected_bulk_velocity: Vec<f64>,
    pub max_relative_error: f64,
}

impl CorrectionReport {
    fn new(
        patch: &InletPatch,
        config: &CorrectionConfig,
        field: &InflowField,
        result: &Correction,
    ) -> Self {
        let target = result.target_bulk_velocity;
        Self {
            n_points: field.n_points(),
            n_times: field.n_times(),
            inlet_area: patch.total_area(),
            nominal_area: config.domain.inlet_area(),
            prescribed_bulk_velocity: config.prescribed_bulk_velocity(),
            target_bulk_velocity: target,
            bulk_velocity: result.bulk_velocity.to_vec(),
            corrected_bulk_velocity: result.corrected_bulk_velocity.to_vec(),
            max_relative_error: correction::max_relative_error(
                result.corrected_bulk_velocity.view(),
                target,
            )
            .map(|(_, err)| err)
            .unwrap_or(0.0),
        }
    }

    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let file = std::fs::File::create(path)?;
        serde_json::to_writer_pretty(file, self)?;
        Ok(())
    }
}

pub struct InflowCorrector {
    config: CorrectionConfig,
}

impl InflowCorrector {
    pub fn new(config: CorrectionConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &CorrectionConfig {
        &self.config
    }

    /// Runs against the files named in the configuration.
    #[cfg(feature = "hdf5")]
    pub fn run(&self) -> Result<CorrectionReport> {
        use crate::storage::Hdf5Store;

        let patch = InletPatch::from_file(&self.config.paths.geometry)?;
        let source = Hdf5Store::new(&self.config.paths.input);
        let mut sink = Hdf5Store::new(&self.config.paths.output);
        info!(
            "Correcting {} -> {}",
            source.path().display(),
            sink.path().display()
        );

        let report = self.run_with(&patch, &source, &mut sink)?;
        if let Some(report_path) = &self.config.paths.report {
            report.save(report_path)?;
            info!("Report written to {}", report_path.display());
        }
        Ok(report)
    }

    /// Runs with explicit geometry and storage. Nothing is written to `sink`
    /// unless the correction succeeds and verifies.
    pub fn run_with<S, K>(
        &self,
        patch: &InletPatch,
        source: &S,
        sink: &mut K,
    ) -> Result<CorrectionReport>
    where
        S: FieldSource,
        K: FieldSink,
    {
        let prescribed = self.config.prescribed_bulk_velocity();
        info!(
            "Prescribed bulk velocity by mean velocity profile is {:.3} m/s",
            prescribed
        );

        let nominal_area = self.config.domain.inlet_area();
        let inlet_area = patch.total_area();
        info!(
            "Area of inlet patch is {:.5}({:.5}) m^2",
            inlet_area, nominal_area
        );
        if ((inlet_area - nominal_area) / nominal_area).abs() > AREA_WARN_FRACTION {
            warn!(
                "Inlet patch area {:.5} m^2 differs from the domain cross-section {:.5} m^2",
                inlet_area, nominal_area
            );
        }

        let field = source.load()?;
        let (n_points, n_times) = field.shape();
        info!(
            "Shape of input velocities, nPt = {}, nTime = {}",
            n_points, n_times
        );

        let correction = self.correct(patch, &field)?;
        info!("Instantaneous bulk velocity: {}", correction.bulk_velocity);
        info!(
            "Target bulk velocity is {:.6} m/s",
            correction.target_bulk_velocity
        );
        info!(
            "Corrected instantaneous bulk velocity: {}",
            correction.corrected_bulk_velocity
        );

        sink.store(&correction.field)?;
        debug!("Corrected field stored");

        Ok(CorrectionReport::new(
            patch,
            &self.config,
            &field,
            &correction,
        ))
    }

    /// Computes the corrected field without touching any storage.
    pub fn correct(&self, patch: &InletPatch, field: &InflowField) -> Result<Correction> {
        let prescribed = self.config.prescribed_bulk_velocity();
        let bulk_target = self.config.bulk_target;
        let tolerances = self.config.tolerances;

        correction::correct(
            patch,
            field,
            |bulk| match bulk_target {
                BulkTarget::PowerLaw => prescribed,
                BulkTarget::MeanInstantaneous => bulk.mean().unwrap_or(prescribed),
            },
            tolerances.zero_bulk_velocity,
            tolerances.verification,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{config::CorrectionConfigBuilder, storage::MemoryStore};
    use approx::assert_relative_eq;
    use nalgebra::Vector3;
    use ndarray::{array, Array2};

    fn two_point_patch() -> InletPatch {
        InletPatch::new(vec![
            Vector3::new(-1.0, 0.0, 0.0),
            Vector3::new(-3.0, 0.0, 0.0),
        ])
        .unwrap()
    }

    fn two_point_field() -> InflowField {
        InflowField::new(
            array![[0.5, -0.5, 1.0, 0.0], [0.2, 0.1, -0.3, 0.4]],
            array![[0.1, 0.2, 0.3, 0.4], [-0.1, -0.2, -0.3, -0.4]],
            Array2::from_elem((2, 4), 0.25),
            array![8.0, 12.0],
        )
        .unwrap()
    }

    #[test]
    fn test_run_with_memory_store() {
        let config = CorrectionConfig::default();
        let prescribed = config.prescribed_bulk_velocity();
        let corrector = InflowCorrector::new(config).unwrap();

        let source = MemoryStore::with_field(two_point_field());
        let mut sink = MemoryStore::new();
        let report = corrector
            .run_with(&two_point_patch(), &source, &mut sink)
            .unwrap();

        assert_eq!(report.n_points, 2);
        assert_eq!(report.n_times, 4);
        assert_relative_eq!(report.inlet_area, 4.0);
        assert_relative_eq!(report.target_bulk_velocity, prescribed);
        assert!(report.max_relative_error < 1e-10);

        let written = sink.field().unwrap();
        assert_eq!(written.shape(), (2, 4));
        assert_eq!(written.u_mean(), two_point_field().u_mean());
    }

    #[test]
    fn test_mean_instantaneous_target() {
        let config = CorrectionConfigBuilder::new()
            .bulk_target(BulkTarget::MeanInstantaneous)
            .build()
            .unwrap();
        let corrector = InflowCorrector::new(config).unwrap();
        let correction = corrector
            .correct(&two_point_patch(), &two_point_field())
            .unwrap();

        let mean_before = correction.bulk_velocity.mean().unwrap();
        assert_relative_eq!(correction.target_bulk_velocity, mean_before);
        assert_relative_eq!(
            correction.corrected_bulk_velocity.mean().unwrap(),
            mean_before,
            max_relative = 1e-12
        );
    }

    #[test]
    fn test_failed_correction_writes_nothing() {
        let corrector = InflowCorrector::new(CorrectionConfig::default()).unwrap();
        let field = InflowField::new(
            array![[1.0, 1.0], [-1.0, -1.0]],
            Array2::zeros((2, 2)),
            Array2::zeros((2, 2)),
            array![0.0, 0.0],
        )
        .unwrap();
        let patch = InletPatch::new(vec![Vector3::x(), Vector3::x()]).unwrap();

        let mut sink = MemoryStore::new();
        let result = corrector.run_with(&patch, &MemoryStore::with_field(field), &mut sink);
        assert!(result.is_err());
        assert!(sink.field().is_none());
    }

    #[test]
    fn test_report_save() {
        let corrector = InflowCorrector::new(CorrectionConfig::default()).unwrap();
        let mut sink = MemoryStore::new();
        let report = corrector
            .run_with(
                &two_point_patch(),
                &MemoryStore::with_field(two_point_field()),
                &mut sink,
            )
            .unwrap();

        let file = tempfile::NamedTempFile::new().unwrap();
        report.save(file.path()).unwrap();
        let loaded: CorrectionReport =
            serde_json::from_reader(std::fs::File::open(file.path()).unwrap()).unwrap();
        assert_eq!(loaded, report);
    }
}
