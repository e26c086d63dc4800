use inflow_mfc::{InflowField, InletPatch};
use nalgebra::Vector3;
use ndarray::{array, Array1, Array2};

/// Builds a patch whose faces point against the streamwise axis
pub fn create_patch(areas: &[f64]) -> InletPatch {
    InletPatch::new(
        areas
            .iter()
            .map(|&area| Vector3::new(-area, 0.0, 0.0))
            .collect(),
    )
    .unwrap()
}

/// One point, three samples: `UbT = [6, 7, 8]` on a face of area 2
pub fn create_single_point_case() -> (InletPatch, InflowField) {
    let field = InflowField::new(
        array![[1.0, 2.0, 3.0]],
        array![[0.3, -0.2, 0.1]],
        array![[-0.4, 0.0, 0.6]],
        array![5.0],
    )
    .unwrap();
    (create_patch(&[2.0]), field)
}

/// Two points whose fluctuations cancel the zero mean: `UbT = [0, 0]`
pub fn create_zero_bulk_case() -> (InletPatch, InflowField) {
    let field = InflowField::new(
        array![[1.0, 1.0], [-1.0, -1.0]],
        Array2::zeros((2, 2)),
        Array2::zeros((2, 2)),
        Array1::zeros(2),
    )
    .unwrap();
    (create_patch(&[1.0, 1.0]), field)
}
