//! DXF outline export: the same projected outline as the SVG path, written
//! as LINE entities.

use std::path::Path;

// `::dxf` is the codec crate; this module shares its name.
use ::dxf::entities::{Entity, EntityType, Line};
use ::dxf::{Drawing, Point};
use geom_kernel::TriangleMesh;

use crate::error::ExportError;
use crate::outline::outline_segments;
use crate::view::View;

/// Build a DXF drawing from the outline of `mesh` seen from `view`.
pub fn dxf_drawing(mesh: &TriangleMesh, view: View) -> Result<Drawing, ExportError> {
    let segments = outline_segments(mesh, view);
    if segments.is_empty() {
        return Err(ExportError::EmptyMesh);
    }

    let mut drawing = Drawing::new();
    for ((u1, v1), (u2, v2)) in segments {
        let line = Line::new(
            Point::new(u1 as f64, v1 as f64, 0.0),
            Point::new(u2 as f64, v2 as f64, 0.0),
        );
        drawing.add_entity(Entity::new(EntityType::Line(line)));
    }
    Ok(drawing)
}

/// Write the outline of `mesh` from `view` to a DXF file.
pub fn render_dxf(mesh: &TriangleMesh, view: View, path: &Path) -> Result<(), ExportError> {
    let drawing = dxf_drawing(mesh, view)?;
    let file_name = path.to_str().ok_or_else(|| ExportError::Encode {
        format: "DXF",
        reason: format!("non-UTF-8 path: {}", path.display()),
    })?;
    drawing.save_file(file_name).map_err(|e| ExportError::Encode {
        format: "DXF",
        reason: e.to_string(),
    })
}
