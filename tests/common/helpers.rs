use inflow_mfc::{InflowField, InletPatch};
use nalgebra::Vector3;
use ndarray::{Array1, Array2};

/// Deterministic turbulence-like field on `n_points` x `n_times`.
///
/// The mean follows a power law in the point index, fluctuations are a sum of
/// incommensurate sinusoids of roughly 10 % intensity.
pub fn create_synthetic_field(n_points: usize, n_times: usize) -> InflowField {
    let u_mean = Array1::from_shape_fn(n_points, |i| {
        let z = (i as f64 + 0.5) / n_points as f64 * 1.8;
        11.11 * (z / 0.5).powf(0.25)
    });
    let fluctuation = |i: usize, t: usize, phase: f64| {
        let (i, t) = (i as f64, t as f64);
        (0.37 * t + 1.3 * i + phase).sin() + 0.5 * (0.11 * t - 0.7 * i + 2.0 * phase).cos()
    };
    let u = Array2::from_shape_fn((n_points, n_times), |(i, t)| 1.2 * fluctuation(i, t, 0.0));
    let v = Array2::from_shape_fn((n_points, n_times), |(i, t)| 0.8 * fluctuation(i, t, 1.0));
    let w = Array2::from_shape_fn((n_points, n_times), |(i, t)| 0.6 * fluctuation(i, t, 2.0));

    InflowField::new(u, v, w, u_mean).unwrap()
}

/// Non-uniform face areas, alternating sign on the streamwise component
pub fn create_synthetic_patch(n_faces: usize) -> InletPatch {
    InletPatch::new(
        (0..n_faces)
            .map(|i| {
                let area = 0.01 * (1.0 + 0.5 * (i as f64 * 0.9).sin());
                let sign = if i % 2 == 0 { -1.0 } else { 1.0 };
                Vector3::new(sign * area, 1e-4 * i as f64, -1e-4)
            })
            .collect(),
    )
    .unwrap()
}

/// Renders a patch in the comma separated mesh export format
pub fn format_geometry(patch: &InletPatch) -> String {
    patch
        .face_areas()
        .iter()
        .map(|sf| format!("{:e},{:e},{:e}\n", sf.x, sf.y, sf.z))
        .collect()
}
