use serde::{Deserialize, Serialize};

use crate::utils::{POWER_LAW_EXPONENT, REFERENCE_HEIGHT, REFERENCE_VELOCITY};

/// Power-law mean wind profile, `U(z) = u_ref * (z / z_ref)^alpha`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PowerLawProfile {
    /// Reference height `h0u` in m.
    pub reference_height: f64,
    /// Mean velocity at the reference height `Uh` in m/s.
    pub reference_velocity: f64,
    /// Exponent `alphau`.
    pub exponent: f64,
}

impl Default for PowerLawProfile {
    fn default() -> Self {
        Self {
            reference_height: REFERENCE_HEIGHT,
            reference_velocity: REFERENCE_VELOCITY,
            exponent: POWER_LAW_EXPONENT,
        }
    }
}

impl PowerLawProfile {
    pub fn new(reference_height: f64, reference_velocity: f64, exponent: f64) -> Self {
        Self {
            reference_height,
            reference_velocity,
            exponent,
        }
    }

    /// Mean streamwise velocity at height `z`.
    pub fn velocity_at(&self, z: f64) -> f64 {
        self.reference_velocity * (z / self.reference_height).powf(self.exponent)
    }

    /// Height-averaged velocity of the profile over `[0, domain_height]`.
    ///
    /// `Ub = Uh / (alpha + 1) * (Z / h0u)^alpha`. Heights and `alpha + 1` are
    /// assumed positive; no guard is applied here.
    pub fn bulk_velocity(&self, domain_height: f64) -> f64 {
        self.reference_velocity / (self.exponent + 1.0)
            * (domain_height / self.reference_height).powf(self.exponent)
    }
}

/// How the target bulk velocity `Ub` is chosen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BulkTarget {
    /// Height average of the power-law mean profile.
    #[default]
    PowerLaw,
    /// Time average of the instantaneous bulk velocity of the input field.
    MeanInstantaneous,
}
