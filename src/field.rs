//! Inflow velocity data held on the inlet patch points.

use ndarray::{Array1, Array2, ArrayView1, ArrayView2, Axis};

use crate::utils::{CorrectionError, Result};

/// Fluctuating velocity components `U`, `V`, `W` of shape `(n_points, n_times)`
/// and the time-mean streamwise profile `UMEAN` of length `n_points`.
///
/// The shapes are checked on construction and the arrays are only exposed as
/// views, so a field is always internally consistent.
#[derive(Debug, Clone, PartialEq)]
pub struct InflowField {
    u: Array2<f64>,
    v: Array2<f64>,
    w: Array2<f64>,
    u_mean: Array1<f64>,
}

impl InflowField {
    pub fn new(
        u: Array2<f64>,
        v: Array2<f64>,
        w: Array2<f64>,
        u_mean: Array1<f64>,
    ) -> Result<Self> {
        if v.dim() != u.dim() || w.dim() != u.dim() {
            return Err(CorrectionError::ShapeMismatch(format!(
                "velocity components differ in shape: U {:?}, V {:?}, W {:?}",
                u.dim(),
                v.dim(),
                w.dim()
            )));
        }
        if u_mean.len() != u.nrows() {
            return Err(CorrectionError::ShapeMismatch(format!(
                "UMEAN has {} points but U has {}",
                u_mean.len(),
                u.nrows()
            )));
        }

        Ok(Self { u, v, w, u_mean })
    }

    pub fn u(&self) -> ArrayView2<'_, f64> {
        self.u.view()
    }

    pub fn v(&self) -> ArrayView2<'_, f64> {
        self.v.view()
    }

    pub fn w(&self) -> ArrayView2<'_, f64> {
        self.w.view()
    }

    pub fn u_mean(&self) -> ArrayView1<'_, f64> {
        self.u_mean.view()
    }

    pub fn n_points(&self) -> usize {
        self.u.nrows()
    }

    pub fn n_times(&self) -> usize {
        self.u.ncols()
    }

    /// `(n_points, n_times)`
    pub fn shape(&self) -> (usize, usize) {
        self.u.dim()
    }

    /// Total streamwise velocity `UMEAN[i] + U[i, t]`.
    pub fn total_streamwise(&self) -> Array2<f64> {
        let mut total = self.u.clone();
        for (mut row, &mean) in total.rows_mut().into_iter().zip(self.u_mean.iter()) {
            row += mean;
        }
        total
    }
}

/// Replicates a per-point vector across `n_times` columns.
///
/// Fails instead of silently broadcasting along the wrong axis.
pub fn broadcast_points(
    per_point: ArrayView1<'_, f64>,
    n_points: usize,
    n_times: usize,
) -> Result<Array2<f64>> {
    if per_point.len() != n_points {
        return Err(CorrectionError::ShapeMismatch(format!(
            "per-point vector has length {}, expected {}",
            per_point.len(),
            n_points
        )));
    }
    let column = per_point.insert_axis(Axis(1));
    match column.broadcast((n_points, n_times)) {
        Some(wide) => Ok(wide.to_owned()),
        None => Err(CorrectionError::ShapeMismatch(format!(
            "cannot broadcast {} points over {} time samples",
            n_points, n_times
        ))),
    }
}
