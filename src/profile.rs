//! Sampled radius profile `r(z) = baseRadius + f(z)` on `[0, H]`

use crate::config::check_samples;
use crate::errors::{CupResult, DegenerateError, GeometryError};
use crate::expression::RadialFunction;
use crate::float_types::Real;

/// `n` evenly spaced values from `start` to `end`, both included.
///
/// The last value is `end` exactly, so angular samples close on `2π` without
/// rounding drift. `n == 1` yields `[start]`.
pub fn linspace(start: Real, end: Real, n: usize) -> Vec<Real> {
    match n {
        0 => Vec::new(),
        1 => vec![start],
        _ => {
            let step = (end - start) / (n - 1) as Real;
            let mut values: Vec<Real> = (0..n).map(|i| start + step * i as Real).collect();
            values[n - 1] = end;
            values
        },
    }
}

/// Reject non-finite or negative scalar parameters.
pub fn check_base_radius(base_radius: Real) -> CupResult<()> {
    if !base_radius.is_finite() {
        return Err(GeometryError::NonFiniteParameter {
            name: "base_radius",
            value: base_radius,
        }
        .into());
    }
    if base_radius < 0.0 {
        return Err(GeometryError::NegativeBaseRadius(base_radius).into());
    }
    Ok(())
}

fn check_height(height: Real) -> CupResult<()> {
    if !height.is_finite() {
        return Err(GeometryError::NonFiniteParameter {
            name: "height",
            value: height,
        }
        .into());
    }
    if height < 0.0 {
        return Err(GeometryError::NegativeHeight(height).into());
    }
    Ok(())
}

/// Ordered `(z_i, r_i)` samples with every radius finite and `>= 0`.
///
/// Negative radii are rejected, never clamped: a profile that dips below the
/// axis is reported as [`GeometryError::NegativeRadius`] with the first
/// offending height.
#[derive(Debug, Clone, PartialEq)]
pub struct ProfileSample {
    zs: Vec<Real>,
    radii: Vec<Real>,
}

impl ProfileSample {
    /// Sample `baseRadius + f(z)` at `samples` evenly spaced heights in `[0, height]`.
    pub fn sample(
        base_radius: Real,
        height: Real,
        function: &RadialFunction,
        samples: usize,
    ) -> CupResult<Self> {
        check_samples("profile samples", samples, 2)?;
        check_base_radius(base_radius)?;
        check_height(height)?;

        let zs = linspace(0.0, height, samples);
        let radii = function
            .eval_all(&zs)
            .into_iter()
            .map(|offset| base_radius + offset)
            .collect();
        Self::from_parts(zs, radii)
    }

    /// Wrap precomputed samples, validating lengths and radii.
    pub fn from_parts(zs: Vec<Real>, radii: Vec<Real>) -> CupResult<Self> {
        if zs.len() != radii.len() {
            return Err(DegenerateError::LengthMismatch {
                expected: zs.len(),
                found: radii.len(),
            }
            .into());
        }
        check_samples("profile samples", zs.len(), 2)?;

        for (&z, &radius) in zs.iter().zip(&radii) {
            if !radius.is_finite() {
                return Err(GeometryError::NonFiniteRadius { z, radius }.into());
            }
            if radius < 0.0 {
                return Err(GeometryError::NegativeRadius { z, radius }.into());
            }
        }

        Ok(ProfileSample { zs, radii })
    }

    pub fn zs(&self) -> &[Real] {
        &self.zs
    }

    pub fn radii(&self) -> &[Real] {
        &self.radii
    }

    pub fn len(&self) -> usize {
        self.zs.len()
    }

    /// Always `false`: a profile holds at least two samples.
    pub fn is_empty(&self) -> bool {
        self.zs.is_empty()
    }

    /// The wall's true radius at `z = 0`.
    pub fn base_radius(&self) -> Real {
        self.radii[0]
    }

    /// The wall's true radius at `z = H`.
    pub fn rim_radius(&self) -> Real {
        self.radii[self.radii.len() - 1]
    }

    pub fn height(&self) -> Real {
        self.zs[self.zs.len() - 1]
    }

    pub fn min_radius(&self) -> Real {
        self.radii.iter().copied().fold(Real::INFINITY, Real::min)
    }

    pub fn max_radius(&self) -> Real {
        self.radii.iter().copied().fold(0.0, Real::max)
    }

    pub fn iter(&self) -> impl Iterator<Item = (Real, Real)> + '_ {
        self.zs.iter().copied().zip(self.radii.iter().copied())
    }
}
