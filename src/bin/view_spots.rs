//! View Spots - find the local maxima of a scalar field over a triangle mesh
//!
//! # Usage
//!
//! ```bash
//! view_spots mesh.json 10 --svg mesh.svg
//! ```

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use log::LevelFilter;

use view_spots::prelude::*;

/// View Spots CLI.
#[derive(Parser, Debug)]
#[command(name = "view_spots")]
#[command(about = "Report the highest local maxima (view spots) of a mesh's element values")]
#[command(version)]
struct Args {
    /// JSON mesh file with "nodes", "elements" and "values" arrays
    mesh_file: PathBuf,

    /// Maximum number of view spots to report
    #[arg(allow_negative_numbers = true)]
    view_spots: i64,

    /// Write the view spots to this file instead of stdout
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Render the mesh to this SVG file, with view spots highlighted
    #[arg(long)]
    svg: Option<PathBuf>,

    /// Size of the SVG drawing area
    #[arg(long, default_value_t = 500.0)]
    extent: f64,

    /// Print each element's value in the SVG
    #[arg(long)]
    labels: bool,

    /// Fail on repeated node or element ids instead of keeping the last one
    #[arg(long)]
    strict_ids: bool,

    /// Increase logging verbosity (-v info, -vv debug)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

impl Args {
    fn into_config(self) -> Result<Config, ViewSpotError> {
        let mut config = Config::new(self.mesh_file, Config::view_spot_count(self.view_spots)?)
            .with_svg_options(
                SvgOptions::default()
                    .with_extent(self.extent)
                    .with_labels(self.labels),
            );

        if let Some(output) = self.output {
            config = config.with_output(OutputTarget::File(output));
        }
        if let Some(svg) = self.svg {
            config = config.with_svg(svg);
        }
        if self.strict_ids {
            config = config.with_duplicates(DuplicatePolicy::Reject);
        }

        Ok(config)
    }
}

fn main() -> ExitCode {
    let args = Args::parse();

    let level = match args.verbose {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Info,
        _ => LevelFilter::Debug,
    };
    env_logger::Builder::new()
        .filter_level(level)
        .parse_default_env()
        .init();

    match args
        .into_config()
        .and_then(|config| view_spots::pipeline::run(&config))
    {
        Ok(_) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("ERROR: {}", err);
            ExitCode::FAILURE
        }
    }
}
