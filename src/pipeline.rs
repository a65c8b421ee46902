use crate::error::ViewSpotError;
use crate::mesh::{DuplicatePolicy, Mesh};
#[cfg(feature = "svg_export")]
use crate::render::{export_svg, SvgOptions};
use crate::view_spots::{ViewSpot, ViewSpots};

use log::info;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::PathBuf;
use std::time::Instant;

/// Where the ranked view spots are written
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum OutputTarget {
    #[default]
    Stdout,
    File(PathBuf),
}

/// Everything needed for one run: which mesh to read, how many view spots to report, and where to put them
#[derive(Debug, Clone)]
pub struct Config {
    /// JSON mesh file
    pub input: PathBuf,
    /// Maximum number of view spots to report
    pub view_spots: usize,
    pub output: OutputTarget,
    /// Also render the mesh to this SVG file
    pub svg: Option<PathBuf>,
    #[cfg(feature = "svg_export")]
    pub svg_options: SvgOptions,
    pub duplicates: DuplicatePolicy,
}

impl Config {
    pub fn new(input: impl Into<PathBuf>, view_spots: usize) -> Self {
        Self {
            input: input.into(),
            view_spots,
            output: OutputTarget::default(),
            svg: None,
            #[cfg(feature = "svg_export")]
            svg_options: SvgOptions::default(),
            duplicates: DuplicatePolicy::default(),
        }
    }

    /// Validate a signed view spot count (as typed by a user)
    pub fn view_spot_count(n: i64) -> Result<usize, ViewSpotError> {
        usize::try_from(n).map_err(|_| {
            ViewSpotError::InvalidParameter(format!(
                "Number of view spots must be positive (got {})",
                n
            ))
        })
    }

    pub fn with_output(mut self, output: OutputTarget) -> Self {
        self.output = output;
        self
    }

    pub fn with_svg(mut self, path: impl Into<PathBuf>) -> Self {
        self.svg = Some(path.into());
        self
    }

    #[cfg(feature = "svg_export")]
    pub fn with_svg_options(mut self, options: SvgOptions) -> Self {
        self.svg_options = options;
        self
    }

    pub fn with_duplicates(mut self, duplicates: DuplicatePolicy) -> Self {
        self.duplicates = duplicates;
        self
    }
}

/// Load the mesh described by `config` and rank all of its view spots
///
/// Nothing is written; see [run] for the full pipeline.
pub fn find_view_spots(config: &Config) -> Result<(Mesh, ViewSpots), ViewSpotError> {
    let start = Instant::now();
    let mesh = Mesh::from_file(&config.input, config.duplicates)?;
    if mesh.elements.is_empty() {
        return Err(ViewSpotError::EmptyInput("elements"));
    }
    info!(
        "loaded {} nodes and {} elements from {} in {:?}",
        mesh.nodes.len(),
        mesh.elements.len(),
        config.input.display(),
        start.elapsed()
    );

    let start = Instant::now();
    let view_spots = ViewSpots::find(&mesh);
    info!(
        "found {} local maxima in {:?}",
        view_spots.len(),
        start.elapsed()
    );

    Ok((mesh, view_spots))
}

#[cfg(feature = "svg_export")]
fn render_if_requested(
    config: &Config,
    mesh: &Mesh,
    view_spots: &ViewSpots,
) -> Result<(), ViewSpotError> {
    if let Some(svg_path) = &config.svg {
        export_svg(svg_path, mesh, &view_spots.element_ids(), &config.svg_options)?;
        info!("rendered mesh to {}", svg_path.display());
    }
    Ok(())
}

#[cfg(not(feature = "svg_export"))]
fn render_if_requested(
    config: &Config,
    _: &Mesh,
    _: &ViewSpots,
) -> Result<(), ViewSpotError> {
    if config.svg.is_some() {
        log::warn!("built without the \"svg_export\" feature; skipping SVG output");
    }
    Ok(())
}

/// Run the whole pipeline: load, evaluate, render (if requested) and emit the view spots
///
/// The reported view spots are returned as well as written to `config.output`.
/// The mesh is loaded and evaluated before anything is written, so an invalid mesh leaves no partial output.
pub fn run(config: &Config) -> Result<Vec<ViewSpot>, ViewSpotError> {
    let (mesh, view_spots) = find_view_spots(config)?;
    let reported = view_spots.take(config.view_spots).to_vec();
    let document = view_spots.to_json(config.view_spots).pretty(4);

    render_if_requested(config, &mesh, &view_spots)?;

    match &config.output {
        OutputTarget::Stdout => println!("{}", document),
        OutputTarget::File(path) => {
            let f = File::create(path)?;
            let mut w = BufWriter::new(&f);
            writeln!(w, "{}", document)?;
            w.flush()?;
        }
    }

    Ok(reported)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn run_to_file() {
        let config = Config::new("./test_input/grid_mesh.json", 2)
            .with_output(OutputTarget::File("./test_output/grid_view_spots.json".into()))
            .with_svg("./test_output/grid_view_spots.svg");

        let reported = run(&config).unwrap();
        let ids: Vec<usize> = reported.iter().map(|vs| vs.element_id).collect();
        assert_eq!(ids, vec![10, 7]);
        assert!((reported[0].value - 0.9).abs() < 1e-12);
        assert!((reported[1].value - 0.8).abs() < 1e-12);

        let written =
            json::parse(&std::fs::read_to_string("./test_output/grid_view_spots.json").unwrap())
                .unwrap();
        assert_eq!(written.len(), 2);
        assert_eq!(written[0]["element_id"].as_usize(), Some(10));
        #[cfg(feature = "svg_export")]
        assert!(std::path::Path::new("./test_output/grid_view_spots.svg").exists());
    }

    #[test]
    fn zero_view_spots() {
        let config = Config::new("./test_input/two_triangles.json", 0)
            .with_output(OutputTarget::File("./test_output/no_view_spots.json".into()));
        assert!(run(&config).unwrap().is_empty());
    }

    #[test]
    fn negative_view_spots() {
        assert_eq!(Config::view_spot_count(3).unwrap(), 3);
        assert!(matches!(
            Config::view_spot_count(-1),
            Err(ViewSpotError::InvalidParameter(_))
        ));
    }

    #[test]
    fn dangling_value_produces_no_output() {
        let config = Config::new("./test_input/dangling_value.json", 5).with_output(
            OutputTarget::File("./test_output/dangling_value_view_spots.json".into()),
        );

        assert!(matches!(
            run(&config),
            Err(ViewSpotError::DanglingElement { element_id: 7 })
        ));
        assert!(!std::path::Path::new("./test_output/dangling_value_view_spots.json").exists());
    }

    #[test]
    fn missing_input_file() {
        let config = Config::new("./test_input/does_not_exist.json", 1);
        assert!(matches!(
            find_view_spots(&config),
            Err(ViewSpotError::Io(_))
        ));
    }

    #[test]
    fn mesh_without_elements() {
        let config = Config::new("./test_input/no_elements.json", 1);
        assert!(matches!(
            find_view_spots(&config),
            Err(ViewSpotError::EmptyInput("elements"))
        ));
    }
}
