//! Printable **solids of revolution** from a radial perturbation function.
//!
//! A cup-like body is described by a base radius `r0`, a height `H` and an
//! expression `f(z)`; its wall radius is `r(z) = r0 + f(z)` for `z ∈ [0, H]`.
//! The crate computes the enclosed volume by layered disk integration and
//! builds a closed, 2-manifold, outward-wound triangle surface ready for STL
//! export:
//!
//! - [`expression`]: parse and compile `f(z)` over a fixed symbol table
//! - [`volume`]: trapezoidal integration of `π r(z)²`
//! - [`mesh`]: the revolved wall lattice, caps, welding and topology checks
//! - [`closer`]: weld the wall and its caps into one [`ClosedSolid`]
//! - [`cup`]: the whole pipeline in one call
//!
//! ```rust
//! use cupform::{config::CupConfig, cup::generate};
//!
//! let model = generate(3.0, 2.0, "z**3", &CupConfig::default().with_resolution(40, 48))?;
//! assert!(model.volume() > 0.0);
//! assert!(model.solid().analysis().is_watertight());
//! # Ok::<(), cupform::errors::CupError>(())
//! ```
//!
//! # Features
//! #### Default
//! - **f64**: use f64 as Real
//! - [**stl-io**](https://en.wikipedia.org/wiki/STL_(file_format)): `.stl` export, ASCII and binary
//! - **cli**: the `cupform` command-line tool
//!
//! #### Optional
//! - **f32**: use f32 as Real, this conflicts with f64

#![forbid(unsafe_code)]
#![warn(clippy::missing_const_for_fn, clippy::approx_constant, clippy::all)]

pub mod closer;
pub mod config;
pub mod cup;
pub mod errors;
pub mod expression;
pub mod float_types;
pub mod io;
pub mod mesh;
pub mod profile;
pub mod solid;
pub mod triangulated;
pub mod volume;

#[cfg(any(all(feature = "f64", feature = "f32"), not(any(feature = "f64", feature = "f32"))))]
compile_error!("Either 'f64' or 'f32' feature must be specified, but not both");

pub use closer::WatertightCloser;
pub use config::CupConfig;
pub use cup::{CupModel, CupParameters, generate};
pub use errors::{CupError, CupResult, ErrorKind};
pub use expression::RadialFunction;
pub use mesh::{RevolutionMesh, RevolutionMeshBuilder};
pub use solid::ClosedSolid;
pub use volume::VolumeIntegrator;
