//! `RadialFunction`: a user expression over `z`, compiled once and evaluated
//! elementwise over samples or grids.
//!
//! The vocabulary is fixed: the variable `z`, the constant `pi`, the
//! functions `sin`, `cos`, `exp`, `sqrt`, `log` (natural), the operators
//! `+ - * /` and `**` (or `^`) for powers, plus parentheses.
//!
//! ```rust
//! # use cupform::expression::RadialFunction;
//! let f = RadialFunction::new("sin(z) + 0.5")?;
//! assert_eq!(f.eval(0.0), 0.5);
//! assert_eq!(f.eval_all(&[0.0, 0.0]), vec![0.5, 0.5]);
//! # Ok::<(), cupform::errors::CupError>(())
//! ```

pub mod ast;
pub mod parser;

use crate::errors::{CupResult, ExpressionError};
use crate::float_types::Real;
use ast::{Expr, Kernel};
use nalgebra::DMatrix;
use std::fmt;

/// An immutable, validated `ℝ → ℝ` perturbation of the base radius.
///
/// Construction fails fast: syntax errors, names outside the symbol table and
/// a non-finite value at `z = 0` are all reported as
/// [`CupError::ExpressionInvalid`](crate::errors::CupError::ExpressionInvalid).
/// Once built, evaluation never fails; non-finite values at other heights are
/// left for the profile validation to report.
#[derive(Clone)]
pub struct RadialFunction {
    source: String,
    expr: Expr,
    kernel: Kernel,
}

impl RadialFunction {
    /// Parse, bind, compile and probe `source`.
    pub fn new(source: &str) -> CupResult<Self> {
        let expr = parser::parse(source)?.bind()?;
        let kernel = expr.compile();

        let probe = kernel(0.0);
        if !probe.is_finite() {
            return Err(ExpressionError::ProbeFailed { value: probe }.into());
        }

        Ok(RadialFunction {
            source: source.trim().to_string(),
            expr,
            kernel,
        })
    }

    /// The constant-zero perturbation: a plain cylinder.
    pub fn zero() -> Self {
        let expr = Expr::Constant(0.0);
        RadialFunction {
            source: "0".to_string(),
            kernel: expr.compile(),
            expr,
        }
    }

    /// The expression text this function was built from (trimmed).
    pub fn source(&self) -> &str {
        &self.source
    }

    /// The bound syntax tree.
    pub const fn expr(&self) -> &Expr {
        &self.expr
    }

    /// `true` if the function does not depend on `z`.
    pub fn is_constant(&self) -> bool {
        self.expr.is_constant()
    }

    #[inline]
    pub fn eval(&self, z: Real) -> Real {
        (self.kernel)(z)
    }

    /// Evaluate over an ordered sequence of heights, preserving order and length.
    pub fn eval_all(&self, zs: &[Real]) -> Vec<Real> {
        zs.iter().map(|&z| self.eval(z)).collect()
    }

    /// Evaluate elementwise over a 2-D grid of heights.
    pub fn eval_grid(&self, zs: &DMatrix<Real>) -> DMatrix<Real> {
        zs.map(|z| self.eval(z))
    }
}

impl fmt::Debug for RadialFunction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RadialFunction")
            .field("source", &self.source)
            .finish_non_exhaustive()
    }
}

impl fmt::Display for RadialFunction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "f(z) = {}", self.source)
    }
}

impl std::str::FromStr for RadialFunction {
    type Err = crate::errors::CupError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        RadialFunction::new(s)
    }
}
