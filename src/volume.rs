//! Layered disk integration of the enclosed volume
//!
//! Each layer at height `z` is a disk of area `A(z) = π r(z)²`; the volume is
//! the trapezoidal integral of `A` over `[0, H]`:
//!
//! ```text
//! V ≈ Σ (A(z_i) + A(z_{i+1})) / 2 · Δz
//! ```

use crate::config::{DEFAULT_INTEGRATION_SAMPLES, check_samples};
use crate::errors::{CupResult, DegenerateError};
use crate::expression::RadialFunction;
use crate::float_types::{PI, Real};
use crate::profile::ProfileSample;

/// Trapezoidal rule over paired samples `(xs[i], ys[i])`.
///
/// The abscissae need not be uniform.
pub fn trapezoid(xs: &[Real], ys: &[Real]) -> CupResult<Real> {
    if xs.len() != ys.len() {
        return Err(DegenerateError::LengthMismatch {
            expected: xs.len(),
            found: ys.len(),
        }
        .into());
    }
    check_samples("trapezoid samples", xs.len(), 2)?;

    Ok(xs
        .windows(2)
        .zip(ys.windows(2))
        .map(|(x, y)| (y[0] + y[1]) * 0.5 * (x[1] - x[0]))
        .sum())
}

/// Computes the volume of the solid of revolution of `baseRadius + f(z)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VolumeIntegrator {
    samples: usize,
}

impl Default for VolumeIntegrator {
    fn default() -> Self {
        VolumeIntegrator {
            samples: DEFAULT_INTEGRATION_SAMPLES,
        }
    }
}

impl VolumeIntegrator {
    /// An integrator using `samples` layers (`n_z >= 2`).
    pub fn new(samples: usize) -> CupResult<Self> {
        check_samples("integration_samples", samples, 2)?;
        Ok(VolumeIntegrator { samples })
    }

    pub const fn samples(&self) -> usize {
        self.samples
    }

    /// Integrate over `[0, height]`.
    ///
    /// Returns exactly `0` for `height == 0`. A negative sampled radius is a
    /// [`GeometryError::NegativeRadius`](crate::errors::GeometryError::NegativeRadius).
    pub fn integrate(
        &self,
        base_radius: Real,
        height: Real,
        function: &RadialFunction,
    ) -> CupResult<Real> {
        let profile = ProfileSample::sample(base_radius, height, function, self.samples)?;
        if height == 0.0 {
            return Ok(0.0);
        }
        self.integrate_profile(&profile)
    }

    /// Integrate an already validated profile.
    pub fn integrate_profile(&self, profile: &ProfileSample) -> CupResult<Real> {
        let areas: Vec<Real> = profile.radii().iter().map(|r| PI * r * r).collect();
        trapezoid(profile.zs(), &areas)
    }
}

/// Closed-form volume of a cylinder, `π r² H`.
pub fn cylinder_volume(radius: Real, height: Real) -> Real {
    PI * radius * radius * height
}
