#![allow(dead_code)]

mod assertions;
mod fixtures;
mod helpers;

// Re-export
pub use assertions::{assert_bulk_velocity_eq, assert_field_finite, assert_same_shape};
pub use fixtures::*;
pub use helpers::*;
