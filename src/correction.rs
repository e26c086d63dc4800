//! Bulk velocity and the per-sample mass flux rescaling.

use ndarray::{Array1, ArrayView1};
use tracing::debug;

use crate::{
    field::{broadcast_points, InflowField},
    geometry::InletPatch,
    utils::{CorrectionError, Result},
};

/// Area-weighted mean of the total streamwise velocity at each time sample,
/// `UbT[t] = sum_i A[i] * (UMEAN[i] + U[i, t]) / S`.
pub fn bulk_velocity(patch: &InletPatch, field: &InflowField) -> Result<Array1<f64>> {
    check_point_count(patch, field)?;
    let weights = patch.streamwise_areas();
    let total = field.total_streamwise();
    Ok(total.t().dot(&weights) / patch.total_area())
}

/// Fails on the first sample whose bulk velocity cannot be divided by.
pub fn check_bulk_velocity(bulk: ArrayView1<'_, f64>, tolerance: f64) -> Result<()> {
    match bulk
        .iter()
        .position(|ub| !ub.is_finite() || ub.abs() <= tolerance)
    {
        Some(time_index) => Err(CorrectionError::ZeroBulkVelocity {
            time_index,
            value: bulk[time_index],
        }),
        None => Ok(()),
    }
}

/// Rescales every time sample by `target / bulk[t]`.
///
/// The total streamwise velocity and both cross-stream fluctuations are
/// scaled; `U` stays a fluctuation about the unchanged `UMEAN`.
pub fn rescale(field: &InflowField, bulk: ArrayView1<'_, f64>, target: f64) -> Result<InflowField> {
    let (n_points, n_times) = field.shape();
    if bulk.len() != n_times {
        return Err(CorrectionError::ShapeMismatch(format!(
            "{} bulk velocity samples for {} time samples",
            bulk.len(),
            n_times
        )));
    }

    // Broadcasts along the time axis
    let scale = bulk.mapv(|ub| target / ub);
    let mean = broadcast_points(field.u_mean(), n_points, n_times)?;

    let u = field.total_streamwise() * &scale - &mean;
    let v = &field.v() * &scale;
    let w = &field.w() * &scale;

    InflowField::new(u, v, w, field.u_mean().to_owned())
}

/// Largest relative deviation of `bulk` from `target`, with its time index.
pub fn max_relative_error(bulk: ArrayView1<'_, f64>, target: f64) -> Option<(usize, f64)> {
    bulk.iter()
        .map(|ub| ((ub - target) / target).abs())
        .enumerate()
        .fold(None, |worst, (t, err)| match worst {
            Some((_, e)) if e >= err => worst,
            _ => Some((t, err)),
        })
}

/// Result of a correction, before anything is written.
#[derive(Debug, Clone)]
pub struct Correction {
    pub target_bulk_velocity: f64,
    pub bulk_velocity: Array1<f64>,
    pub corrected_bulk_velocity: Array1<f64>,
    pub field: InflowField,
}

/// Rescales `field` so that every sample's bulk velocity equals `target`, and
/// checks the result to within `verify_tolerance` (relative).
pub fn correct(
    patch: &InletPatch,
    field: &InflowField,
    target: impl FnOnce(ArrayView1<'_, f64>) -> f64,
    zero_tolerance: f64,
    verify_tolerance: f64,
) -> Result<Correction> {
    let bulk = bulk_velocity(patch, field)?;
    let target = target(bulk.view());
    check_bulk_velocity(bulk.view(), zero_tolerance)?;

    let corrected = rescale(field, bulk.view(), target)?;
    let corrected_bulk = bulk_velocity(patch, &corrected)?;

    if let Some((time_index, err)) = max_relative_error(corrected_bulk.view(), target) {
        debug!("Largest relative bulk velocity error after correction: {:e}", err);
        if !(err <= verify_tolerance) {
            return Err(CorrectionError::Verification {
                time_index,
                expected: target,
                actual: corrected_bulk[time_index],
            });
        }
    }

    Ok(Correction {
        target_bulk_velocity: target,
        bulk_velocity: bulk,
        corrected_bulk_velocity: corrected_bulk,
        field: corrected,
    })
}

fn check_point_count(patch: &InletPatch, field: &InflowField) -> Result<()> {
    if patch.n_faces() != field.n_points() {
        return Err(CorrectionError::ShapeMismatch(format!(
            "inlet patch has {} faces but the inflow field has {} points",
            patch.n_faces(),
            field.n_points()
        )));
    }
    Ok(())
}
