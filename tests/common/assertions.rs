use approx::assert_relative_eq;
use inflow_mfc::InflowField;
use ndarray::Array1;

/// Assert that every bulk velocity sample matches `expected`
#[track_caller]
pub fn assert_bulk_velocity_eq(bulk: &Array1<f64>, expected: f64, max_relative: f64) {
    for ub in bulk.iter() {
        assert_relative_eq!(*ub, expected, max_relative = max_relative);
    }
}

/// Assert that two fields have identical component and mean shapes
#[track_caller]
pub fn assert_same_shape(actual: &InflowField, expected: &InflowField) {
    assert_eq!(actual.u().dim(), expected.u().dim(), "U shape differs");
    assert_eq!(actual.v().dim(), expected.v().dim(), "V shape differs");
    assert_eq!(actual.w().dim(), expected.w().dim(), "W shape differs");
    assert_eq!(
        actual.u_mean().dim(),
        expected.u_mean().dim(),
        "UMEAN shape differs"
    );
}

/// Assert that no component contains NaN or infinity
#[track_caller]
pub fn assert_field_finite(field: &InflowField) {
    assert!(field.u().iter().all(|x| x.is_finite()), "U is not finite");
    assert!(field.v().iter().all(|x| x.is_finite()), "V is not finite");
    assert!(field.w().iter().all(|x| x.is_finite()), "W is not finite");
    assert!(
        field.u_mean().iter().all(|x| x.is_finite()),
        "UMEAN is not finite"
    );
}
