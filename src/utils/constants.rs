// Reference test case: isolated building in an empty domain
pub const BUILDING_HEIGHT: f64 = 0.5; // m
pub const BUILDING_WIDTH: f64 = 0.2; // m
pub const DOMAIN_HEIGHT_RATIO: f64 = 3.6; // Z / H
pub const DOMAIN_WIDTH_RATIO: f64 = 4.4; // Y / H

// Power-law mean velocity profile
pub const REFERENCE_HEIGHT: f64 = 0.5; // m
pub const REFERENCE_VELOCITY: f64 = 11.11; // m/s
pub const POWER_LAW_EXPONENT: f64 = 0.25;

// Numerical limits
pub const ZERO_BULK_TOLERANCE: f64 = 1e-12; // m/s
pub const VERIFY_TOLERANCE: f64 = 1e-10; // relative
pub const AREA_WARN_FRACTION: f64 = 0.01; // computed vs nominal inlet area

// Default file locations, relative to the working directory
pub const GEOMETRY_PATH: &str = "../testCase/constant/polyMesh/writeMesh/inletPatchFaceAreaVectors";
pub const INPUT_PATH: &str = "../turbGen/inflowTurb.h5";
pub const OUTPUT_PATH: &str = "../inflowTurbMFC.h5";

// Dataset names shared by the input and output files
pub const DATASET_U: &str = "U";
pub const DATASET_V: &str = "V";
pub const DATASET_W: &str = "W";
pub const DATASET_UMEAN: &str = "UMEAN";
