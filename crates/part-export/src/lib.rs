//! Artifact export for finished part solids: STL mesh, PNG snapshot, SVG
//! and DXF outlines, and the saved part document.

pub mod document;
pub mod dxf;
pub mod error;
pub mod outline;
pub mod png;
pub mod stl;
pub mod svg;
pub mod view;

use std::path::{Path, PathBuf};
use std::str::FromStr;

use geom_kernel::{GeometryKernel, SolidHandle};
use part_types::PartDefinition;

pub use error::ExportError;
pub use view::View;

/// Tessellation tolerance used for all mesh-based exports.
const EXPORT_TOLERANCE: f64 = 0.01;

/// The artifact formats a job can request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Png,
    Svg,
    Dxf,
    Stl,
}

impl OutputFormat {
    /// Default view per format: raster snapshots use the axonometric
    /// overview, flat vector outlines use the top view.
    pub fn default_view(&self) -> Option<View> {
        match self {
            OutputFormat::Png => Some(View::All),
            OutputFormat::Svg | OutputFormat::Dxf => Some(View::Top),
            OutputFormat::Stl => None,
        }
    }
}

impl FromStr for OutputFormat {
    type Err = ExportError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "PNG" => Ok(OutputFormat::Png),
            "SVG" => Ok(OutputFormat::Svg),
            "DXF" => Ok(OutputFormat::Dxf),
            "STL" => Ok(OutputFormat::Stl),
            _ => Err(ExportError::UnsupportedFormat {
                format: s.to_string(),
            }),
        }
    }
}

/// Parse a comma-separated format list such as `"PNG,STL,DXF"`.
pub fn parse_formats(raw: &str) -> Result<Vec<OutputFormat>, ExportError> {
    raw.split(',')
        .filter(|s| !s.trim().is_empty())
        .map(str::parse)
        .collect()
}

/// Export all requested artifacts for a finished solid.
///
/// The saved document is always written first; the solid is tessellated
/// once and shared by every mesh-based codec. Returns the produced files.
pub fn export_artifacts(
    kernel: &mut dyn GeometryKernel,
    solid: &SolidHandle,
    definition: &PartDefinition,
    dir: &Path,
    formats: &[OutputFormat],
) -> Result<Vec<PathBuf>, ExportError> {
    let mut files = Vec::with_capacity(formats.len() + 1);

    let document_path = dir.join(format!("{}.json", definition.id));
    document::save_document(definition, &document_path)?;
    files.push(document_path);

    let mesh = kernel.tessellate(solid, EXPORT_TOLERANCE)?;

    for format in formats {
        let path = match format {
            OutputFormat::Png => {
                let view = View::All;
                let path = dir.join(format!("{}-{}.png", definition.id, view.file_tag()));
                png::render_png(&mesh, view, &path)?;
                path
            }
            OutputFormat::Svg => {
                let view = View::Top;
                let path = dir.join(format!("{}-{}.svg", definition.id, view.file_tag()));
                svg::render_svg(&mesh, view, &path)?;
                path
            }
            OutputFormat::Dxf => {
                let view = View::Top;
                let path = dir.join(format!("{}-{}.dxf", definition.id, view.file_tag()));
                dxf::render_dxf(&mesh, view, &path)?;
                path
            }
            OutputFormat::Stl => {
                let path = dir.join(format!("{}.stl", definition.id));
                stl::write_stl(&mesh, &path)?;
                path
            }
        };
        files.push(path);
    }

    Ok(files)
}
