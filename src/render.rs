use crate::error::ViewSpotError;
use crate::mesh::{
    space::{Bounds, Point, Range, DISPLAY_EXTENT},
    Mesh,
};

use std::collections::BTreeSet;
use std::fmt::Write as _;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

/// Fill color of Elements that are local maxima
pub const MAXIMUM_FILL: &str = "#dc143c";

/// Settings for SVG exports
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SvgOptions {
    /// Node coordinates are scaled (per axis) into `[0, extent]`
    pub extent: f64,
    /// Width of the outline drawn around each Element
    pub stroke_width: f64,
    /// Print each Element's value at its centroid
    pub label_values: bool,
}

impl Default for SvgOptions {
    fn default() -> Self {
        Self {
            extent: DISPLAY_EXTENT,
            stroke_width: 0.1,
            label_values: false,
        }
    }
}

impl SvgOptions {
    pub fn with_extent(mut self, extent: f64) -> Self {
        self.extent = extent;
        self
    }

    pub fn with_labels(mut self, label_values: bool) -> Self {
        self.label_values = label_values;
        self
    }
}

/// Draw every Element of the `mesh` as a filled triangle
///
/// Elements listed in `maxima` (by id) are filled with [MAXIMUM_FILL]; every other Element is filled black with
/// an opacity equal to its normalized value.
///
/// Returns an `EmptyInput` error if the mesh has no Nodes or no Elements.
pub fn to_svg(
    mesh: &Mesh,
    maxima: &BTreeSet<usize>,
    options: &SvgOptions,
) -> Result<String, ViewSpotError> {
    let bounds = Bounds::of_nodes(mesh)?;
    let values = Range::from_samples(mesh.elements.iter().map(|e| e.value), "elements")?;

    let mut svg = String::with_capacity(mesh.elements.len() * 128);
    let _ = write!(
        svg,
        r#"<svg xmlns="http://www.w3.org/2000/svg" viewBox="0 0 {0} {0}">"#,
        options.extent
    );

    for (elem_idx, element) in mesh.elements.iter().enumerate() {
        let corners = mesh
            .element_points(elem_idx)
            .map(|p| bounds.to_display(p, options.extent));

        let fill = if maxima.contains(&element.id) {
            MAXIMUM_FILL.to_string()
        } else {
            format!("rgba(0,0,0,{})", values.normalize(element.value))
        };

        let _ = write!(
            svg,
            r##"<polygon points="{},{} {},{} {},{}" stroke="#000" stroke-width="{}" fill="{}"/>"##,
            corners[0].x,
            corners[0].y,
            corners[1].x,
            corners[1].y,
            corners[2].x,
            corners[2].y,
            options.stroke_width,
            fill,
        );

        if options.label_values {
            let center = Point::centroid([&corners[0], &corners[1], &corners[2]]);
            let _ = write!(
                svg,
                r##"<text style="font-size: 2px; fill: #fff;" x="{}" y="{}">{:.4}</text>"##,
                center.x, center.y, element.value
            );
        }
    }

    svg.push_str("</svg>");
    Ok(svg)
}

/// Render the `mesh` (see [to_svg]) and write it to `path`
pub fn export_svg(
    path: impl AsRef<Path>,
    mesh: &Mesh,
    maxima: &BTreeSet<usize>,
    options: &SvgOptions,
) -> Result<(), ViewSpotError> {
    let svg = to_svg(mesh, maxima, options)?;

    let f = File::create(path.as_ref())?;
    let mut w = BufWriter::new(&f);
    w.write_all(svg.as_bytes())?;
    w.flush()?;

    Ok(())
}
