//! Per-request resolution and tolerance settings

use crate::errors::{CupResult, DegenerateError};
use crate::float_types::Real;

/// Default number of height samples of the wall lattice.
pub const DEFAULT_HEIGHT_SAMPLES: usize = 150;
/// Default number of angular samples, counting both `θ = 0` and `θ = 2π`.
pub const DEFAULT_ANGULAR_SAMPLES: usize = 100;
/// Default number of layers used by the volume integrator.
pub const DEFAULT_INTEGRATION_SAMPLES: usize = 1000;
/// Default distance under which seam vertices are merged.
pub const DEFAULT_WELD_TOLERANCE: Real = 0.01;

/// Three distinct angles plus the duplicated seam angle.
pub const MIN_ANGULAR_SAMPLES: usize = 4;
/// Both ends of the height interval.
pub const MIN_HEIGHT_SAMPLES: usize = 2;

/// Resolution and tolerance settings for one pipeline run.
///
/// ```rust
/// # use cupform::config::CupConfig;
/// let config = CupConfig::default()
///     .with_resolution(60, 48)
///     .with_weld_tolerance(0.005);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CupConfig {
    /// `n_z` of the wall lattice
    pub height_samples: usize,
    /// `nθ` of the wall lattice, inclusive of both `0` and `2π`
    pub angular_samples: usize,
    /// Number of layers for trapezoidal volume integration
    pub integration_samples: usize,
    /// Largest gap allowed between two vertices the closer stitches
    /// together; also the distance of [`WatertightCloser::union`](crate::closer::WatertightCloser::union)
    pub weld_tolerance: Real,
    /// Run the triangle/triangle intersection pass on the closed surface
    pub check_self_intersection: bool,
}

impl Default for CupConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl CupConfig {
    pub const fn new() -> Self {
        CupConfig {
            height_samples: DEFAULT_HEIGHT_SAMPLES,
            angular_samples: DEFAULT_ANGULAR_SAMPLES,
            integration_samples: DEFAULT_INTEGRATION_SAMPLES,
            weld_tolerance: DEFAULT_WELD_TOLERANCE,
            check_self_intersection: true,
        }
    }

    /// Set the wall lattice resolution (`n_z`, `nθ`).
    pub const fn with_resolution(mut self, height_samples: usize, angular_samples: usize) -> Self {
        self.height_samples = height_samples;
        self.angular_samples = angular_samples;
        self
    }

    pub const fn with_integration_samples(mut self, samples: usize) -> Self {
        self.integration_samples = samples;
        self
    }

    pub const fn with_weld_tolerance(mut self, tolerance: Real) -> Self {
        self.weld_tolerance = tolerance;
        self
    }

    pub const fn with_self_intersection_check(mut self, enabled: bool) -> Self {
        self.check_self_intersection = enabled;
        self
    }

    /// Reject settings that cannot produce a lattice, an integral or a weld.
    pub fn validate(&self) -> CupResult<()> {
        check_samples("height_samples", self.height_samples, MIN_HEIGHT_SAMPLES)?;
        check_samples("angular_samples", self.angular_samples, MIN_ANGULAR_SAMPLES)?;
        check_samples("integration_samples", self.integration_samples, 2)?;
        check_weld_tolerance(self.weld_tolerance)
    }
}

pub(crate) fn check_samples(what: &'static str, count: usize, minimum: usize) -> CupResult<()> {
    if count < minimum {
        return Err(DegenerateError::TooFewSamples {
            what,
            count,
            minimum,
        }
        .into());
    }
    Ok(())
}

pub(crate) fn check_weld_tolerance(tolerance: Real) -> CupResult<()> {
    if !(tolerance.is_finite() && tolerance > 0.0) {
        return Err(DegenerateError::InvalidTolerance(tolerance).into());
    }
    Ok(())
}
