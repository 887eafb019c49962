//! Scalar type and process-wide geometric epsilon
//!
//! `Real` follows the `f64` (default) or `f32` feature. The epsilon decides
//! when a triangle counts as zero-area; it has nothing to do with the
//! per-request weld tolerance in [`CupConfig`](crate::config::CupConfig).

use std::sync::OnceLock;

#[cfg(feature = "f32")]
pub type Real = f32;
#[cfg(feature = "f64")]
pub type Real = f64;

#[cfg(feature = "f32")]
use core::f32::consts as real_consts;
#[cfg(feature = "f64")]
use core::f64::consts as real_consts;

/// π
pub const PI: Real = real_consts::PI;
/// One full turn, 2π
pub const TAU: Real = real_consts::TAU;

#[cfg(feature = "f32")]
const DEFAULT_TOLERANCE: Real = 1e-4;
#[cfg(feature = "f64")]
const DEFAULT_TOLERANCE: Real = 1e-6;

static TOLERANCE: OnceLock<Real> = OnceLock::new();

/// Accept a positive finite epsilon, raised to at least machine epsilon.
fn sanitize(value: Real) -> Option<Real> {
    (value.is_finite() && value > 0.0).then(|| value.max(Real::EPSILON))
}

/// The geometric epsilon.
///
/// Fixed on first use: a value passed to [`set_tolerance`] earlier wins,
/// then `CUPFORM_TOLERANCE` as seen at build time, then the default for the
/// active precision. Unparsable or non-positive settings are ignored.
pub fn tolerance() -> Real {
    *TOLERANCE.get_or_init(|| {
        option_env!("CUPFORM_TOLERANCE")
            .and_then(|text| text.trim().parse::<Real>().ok())
            .and_then(sanitize)
            .unwrap_or(DEFAULT_TOLERANCE)
    })
}

/// Fix the epsilon before first use. Returns `false` if it was already
/// fixed or `value` is not a positive finite number.
pub fn set_tolerance(value: Real) -> bool {
    sanitize(value).is_some_and(|value| TOLERANCE.set(value).is_ok())
}

/// Triangles with area at or below this are zero-area.
#[inline]
pub fn area_tolerance() -> Real {
    let eps = tolerance();
    eps * eps
}
