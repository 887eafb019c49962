//! `cupform`: compute the volume of a cup and optionally export it as STL
//!
//! ```text
//! cupform --r0 3 --height 2 --func "z**3" --save-mesh cup.stl
//! ```

use anyhow::{Context, Result};
use clap::Parser;
use cupform::config::{CupConfig, DEFAULT_ANGULAR_SAMPLES, DEFAULT_HEIGHT_SAMPLES, DEFAULT_WELD_TOLERANCE};
use cupform::cup::CupParameters;
use cupform::float_types::Real;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// Volume and printable mesh of the solid of revolution of `r0 + f(z)`
#[derive(Parser, Debug)]
#[command(name = "cupform", version, about, long_about = None)]
struct Cli {
    /// Base radius of the cup
    #[arg(long, default_value_t = 3.0)]
    r0: Real,

    /// Height of the cup
    #[arg(long, default_value_t = 2.0)]
    height: Real,

    /// Radial perturbation f(z) (variables: z; functions: sin, cos, exp, sqrt, log; constant: pi)
    #[arg(long, default_value = "z**3")]
    func: String,

    /// Number of integration layers
    #[arg(long = "n-z", alias = "n_z", default_value_t = 1000)]
    n_z: usize,

    /// Height samples of the mesh
    #[arg(long, default_value_t = DEFAULT_HEIGHT_SAMPLES)]
    height_samples: usize,

    /// Angular samples of the mesh, counting both 0 and 2π
    #[arg(long, default_value_t = DEFAULT_ANGULAR_SAMPLES)]
    angular_samples: usize,

    /// Vertices closer than this are merged
    #[arg(long, default_value_t = DEFAULT_WELD_TOLERANCE)]
    weld_tolerance: Real,

    /// Skip the triangle/triangle intersection check
    #[arg(long)]
    no_intersection_check: bool,

    /// Write the closed mesh to this STL file
    #[arg(long, alias = "save_mesh", value_name = "PATH")]
    save_mesh: Option<PathBuf>,

    /// Write ASCII STL instead of binary
    #[arg(long)]
    ascii: bool,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let config = CupConfig::default()
        .with_resolution(cli.height_samples, cli.angular_samples)
        .with_integration_samples(cli.n_z)
        .with_weld_tolerance(cli.weld_tolerance)
        .with_self_intersection_check(!cli.no_intersection_check);

    let model = CupParameters::new(cli.r0, cli.height, cli.func.as_str())
        .build(&config)
        .context("could not generate the cup")?;

    println!("{:.8}", model.volume());

    if let Some(path) = &cli.save_mesh {
        let bytes = if cli.ascii {
            model.solid().to_stl_ascii("cup").into_bytes()
        } else {
            model.solid().to_stl_binary("cup").context("could not encode the STL")?
        };
        std::fs::write(path, bytes).with_context(|| format!("could not write {}", path.display()))?;
        tracing::info!(path = %path.display(), "saved mesh");
    }

    Ok(())
}
