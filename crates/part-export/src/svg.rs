//! SVG outline export: projected silhouette and boundary edges as line
//! elements on a white background.

use std::fmt::Write as _;
use std::fs;
use std::path::Path;

use geom_kernel::TriangleMesh;

use crate::error::ExportError;
use crate::outline::{outline_segments, segment_bounds};
use crate::view::View;

/// Margin around the drawing, as a fraction of its larger span.
const MARGIN: f32 = 0.05;

/// Serialize the outline of `mesh` from `view` as an SVG document.
pub fn svg_document(mesh: &TriangleMesh, view: View) -> Result<String, ExportError> {
    let segments = outline_segments(mesh, view);
    let (min_u, min_v, max_u, max_v) =
        segment_bounds(&segments).ok_or(ExportError::EmptyMesh)?;

    let span_u = (max_u - min_u).max(1e-6);
    let span_v = (max_v - min_v).max(1e-6);
    let margin = span_u.max(span_v) * MARGIN;
    let stroke = span_u.max(span_v) / 400.0;

    let mut out = String::new();
    let _ = writeln!(
        out,
        r#"<svg xmlns="http://www.w3.org/2000/svg" viewBox="{} {} {} {}">"#,
        min_u - margin,
        -(max_v + margin),
        span_u + 2.0 * margin,
        span_v + 2.0 * margin,
    );
    let _ = writeln!(
        out,
        r#"  <g stroke="black" stroke-width="{stroke}" stroke-linecap="round" fill="none">"#
    );
    // SVG's y axis points down; negate v.
    for ((u1, v1), (u2, v2)) in &segments {
        let _ = writeln!(
            out,
            r#"    <line x1="{u1}" y1="{}" x2="{u2}" y2="{}"/>"#,
            -v1, -v2
        );
    }
    out.push_str("  </g>\n</svg>\n");
    Ok(out)
}

/// Write the outline of `mesh` from `view` to an SVG file.
pub fn render_svg(mesh: &TriangleMesh, view: View, path: &Path) -> Result<(), ExportError> {
    let document = svg_document(mesh, view)?;
    fs::write(path, document)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use geom_kernel::{GeometryKernel, MockKernel};

    #[test]
    fn box_outline_svg_has_four_lines() {
        let mut kernel = MockKernel::new();
        let solid = kernel.make_box([4.0, 2.0, 1.0], [0.0; 3]).unwrap();
        let mesh = kernel.tessellate(&solid, 0.1).unwrap();

        let document = svg_document(&mesh, View::Top).unwrap();
        assert!(document.starts_with("<svg"));
        assert_eq!(document.matches("<line").count(), 4);
        assert!(document.contains("viewBox"));
    }

    #[test]
    fn empty_mesh_yields_no_document() {
        let mesh = TriangleMesh {
            vertices: vec![],
            normals: vec![],
            indices: vec![],
        };
        assert!(matches!(
            svg_document(&mesh, View::Top),
            Err(ExportError::EmptyMesh)
        ));
    }
}
