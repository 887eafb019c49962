//! End-to-end pipeline: `(baseRadius, H, f)` to `(volume, ClosedSolid)`
//!
//! ```rust
//! use cupform::{config::CupConfig, cup::CupParameters};
//!
//! let config = CupConfig::default().with_resolution(30, 40);
//! let model = CupParameters::new(3.0, 5.0, "0").build(&config)?;
//! assert!((model.volume() - 141.3716694).abs() < 1e-6);
//! assert_eq!(model.solid().analysis().boundary_edges, 0);
//! # Ok::<(), cupform::errors::CupError>(())
//! ```

use crate::closer::WatertightCloser;
use crate::config::CupConfig;
use crate::errors::{CupResult, GeometryError};
use crate::expression::RadialFunction;
use crate::float_types::Real;
use crate::mesh::RevolutionMeshBuilder;
use crate::profile::check_base_radius;
use crate::solid::ClosedSolid;
use crate::volume::VolumeIntegrator;
use tracing::{debug, info, instrument};

/// One request: a base radius, a height and the perturbation expression.
#[derive(Debug, Clone, PartialEq)]
pub struct CupParameters {
    pub base_radius: Real,
    pub height: Real,
    pub expression: String,
}

impl CupParameters {
    pub fn new(base_radius: Real, height: Real, expression: impl Into<String>) -> Self {
        CupParameters {
            base_radius,
            height,
            expression: expression.into(),
        }
    }

    /// `baseRadius >= 0` and `height > 0`, both finite.
    pub fn validate(&self) -> CupResult<()> {
        check_base_radius(self.base_radius)?;
        if !self.height.is_finite() {
            return Err(GeometryError::NonFiniteParameter {
                name: "height",
                value: self.height,
            }
            .into());
        }
        if self.height <= 0.0 {
            return Err(GeometryError::NonPositiveHeight(self.height).into());
        }
        Ok(())
    }

    /// Run the whole pipeline. Nothing partial is returned on failure.
    ///
    /// Order: configuration, expression, parameters, volume, wall, closure.
    #[instrument(skip(self, config), fields(base_radius = self.base_radius, height = self.height, expression = %self.expression))]
    pub fn build(&self, config: &CupConfig) -> CupResult<CupModel> {
        config.validate()?;
        let function = RadialFunction::new(&self.expression)?;
        self.validate()?;

        let volume = VolumeIntegrator::new(config.integration_samples)?.integrate(
            self.base_radius,
            self.height,
            &function,
        )?;
        debug!(volume, samples = config.integration_samples, "integrated volume");

        let wall = RevolutionMeshBuilder::from_config(config)?.build(
            self.base_radius,
            self.height,
            &function,
        )?;
        let solid = WatertightCloser::from_config(config)?.close(&wall)?;

        info!(
            volume,
            vertices = solid.vertex_count(),
            triangles = solid.triangle_count(),
            "cup generated"
        );

        Ok(CupModel {
            function,
            volume,
            solid,
        })
    }
}

/// The successful result of one request.
#[derive(Debug, Clone)]
pub struct CupModel {
    function: RadialFunction,
    volume: Real,
    solid: ClosedSolid,
}

impl CupModel {
    pub const fn function(&self) -> &RadialFunction {
        &self.function
    }

    /// Volume from trapezoidal disk integration of the smooth profile.
    pub const fn volume(&self) -> Real {
        self.volume
    }

    pub const fn solid(&self) -> &ClosedSolid {
        &self.solid
    }

    pub fn into_solid(self) -> ClosedSolid {
        self.solid
    }
}

/// Shorthand for [`CupParameters::build`].
pub fn generate(
    base_radius: Real,
    height: Real,
    expression: &str,
    config: &CupConfig,
) -> CupResult<CupModel> {
    CupParameters::new(base_radius, height, expression).build(config)
}
