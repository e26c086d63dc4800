//! Mass flux correction for synthetic turbulent inflow data.
//!
//! A synthetic inflow generator produces velocity fluctuations `U`, `V`, `W`
//! on the inlet patch points together with a mean profile `UMEAN`. The
//! instantaneous area-weighted bulk velocity of such data drifts from sample
//! to sample, so the mass flow through the inlet drifts with it. This crate
//! rescales every time sample so that its bulk velocity matches a single
//! target, taken from a power-law mean wind profile.

pub mod config;
pub mod correction;
pub mod field;
pub mod geometry;
pub mod pipeline;
pub mod profile;
pub mod storage;
pub mod utils;

pub use config::{ConfigError, CorrectionConfig, CorrectionConfigBuilder};
pub use correction::Correction;
pub use field::InflowField;
pub use geometry::InletPatch;
pub use pipeline::{CorrectionReport, InflowCorrector};
pub use profile::{BulkTarget, PowerLawProfile};
pub use utils::{CorrectionError, Result};
