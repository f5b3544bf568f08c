//! Raster snapshots: flat-shaded painter's-algorithm rendering onto a
//! white canvas.

use std::path::Path;

use geom_kernel::TriangleMesh;
use tiny_skia::{Color, FillRule, Paint, PathBuilder, Pixmap, Transform};

use crate::error::ExportError;
use crate::view::View;

/// Snapshot canvas size.
pub const SNAPSHOT_WIDTH: u32 = 2000;
pub const SNAPSHOT_HEIGHT: u32 = 1800;

/// Margin kept around the part, as a fraction of the canvas.
const MARGIN: f32 = 0.05;

struct ScreenMap {
    scale: f32,
    offset_u: f32,
    offset_v: f32,
    height: f32,
}

impl ScreenMap {
    /// Fit projected bounds into the canvas, v axis flipped to screen space.
    fn fit(bounds: (f32, f32, f32, f32), width: u32, height: u32) -> Self {
        let (min_u, min_v, max_u, max_v) = bounds;
        let span_u = (max_u - min_u).max(1e-6);
        let span_v = (max_v - min_v).max(1e-6);
        let usable_w = width as f32 * (1.0 - 2.0 * MARGIN);
        let usable_h = height as f32 * (1.0 - 2.0 * MARGIN);
        let scale = (usable_w / span_u).min(usable_h / span_v);
        let offset_u = (width as f32 - span_u * scale) / 2.0 - min_u * scale;
        let offset_v = (height as f32 - span_v * scale) / 2.0 - min_v * scale;
        Self {
            scale,
            offset_u,
            offset_v,
            height: height as f32,
        }
    }

    fn to_screen(&self, (u, v): (f32, f32)) -> (f32, f32) {
        let su = u * self.scale + self.offset_u;
        let sv = v * self.scale + self.offset_v;
        (su, self.height - sv)
    }
}

/// Render the mesh into a pixmap. Triangles are sorted far-to-near and
/// flat-shaded by how squarely they face the viewer.
pub fn rasterize(
    mesh: &TriangleMesh,
    view: View,
    width: u32,
    height: u32,
) -> Result<Pixmap, ExportError> {
    if mesh.triangle_count() == 0 {
        return Err(ExportError::EmptyMesh);
    }
    let mut pixmap = Pixmap::new(width, height).ok_or(ExportError::Encode {
        format: "PNG",
        reason: format!("cannot allocate {width}x{height} canvas"),
    })?;
    pixmap.fill(Color::WHITE);

    // Projected bounds over all vertices.
    let mut bounds = (f32::MAX, f32::MAX, f32::MIN, f32::MIN);
    for i in 0..mesh.vertex_count() as u32 {
        let (u, v) = view.project(mesh.position(i));
        bounds.0 = bounds.0.min(u);
        bounds.1 = bounds.1.min(v);
        bounds.2 = bounds.2.max(u);
        bounds.3 = bounds.3.max(v);
    }
    let map = ScreenMap::fit(bounds, width, height);

    // Painter's order: far triangles first.
    let mut order: Vec<(usize, f32)> = (0..mesh.triangle_count())
        .map(|t| {
            let depth = mesh.indices[t * 3..t * 3 + 3]
                .iter()
                .map(|&i| view.depth(mesh.position(i)))
                .sum::<f32>()
                / 3.0;
            (t, depth)
        })
        .collect();
    order.sort_by(|a, b| a.1.total_cmp(&b.1));

    for (t, _) in order {
        let idx = &mesh.indices[t * 3..t * 3 + 3];
        let [p0, p1, p2] = [
            mesh.position(idx[0]),
            mesh.position(idx[1]),
            mesh.position(idx[2]),
        ];

        // Facet normal alignment with the view direction drives the shade.
        let a = [p1[0] - p0[0], p1[1] - p0[1], p1[2] - p0[2]];
        let b = [p2[0] - p0[0], p2[1] - p0[1], p2[2] - p0[2]];
        let n = [
            a[1] * b[2] - a[2] * b[1],
            a[2] * b[0] - a[0] * b[2],
            a[0] * b[1] - a[1] * b[0],
        ];
        let len = (n[0] * n[0] + n[1] * n[1] + n[2] * n[2]).sqrt();
        if len < 1e-12 {
            continue;
        }
        let facing = view.depth([n[0] / len, n[1] / len, n[2] / len]);
        if facing <= 0.0 {
            continue;
        }
        let shade = 120.0 + 110.0 * facing.min(1.0);

        let s0 = map.to_screen(view.project(p0));
        let s1 = map.to_screen(view.project(p1));
        let s2 = map.to_screen(view.project(p2));

        let mut pb = PathBuilder::new();
        pb.move_to(s0.0, s0.1);
        pb.line_to(s1.0, s1.1);
        pb.line_to(s2.0, s2.1);
        pb.close();
        let Some(path) = pb.finish() else {
            continue;
        };

        let mut paint = Paint::default();
        let level = shade as u8;
        paint.set_color_rgba8(level, level, level, 255);
        paint.anti_alias = true;
        pixmap.fill_path(&path, &paint, FillRule::Winding, Transform::identity(), None);
    }

    Ok(pixmap)
}

/// Render the mesh from `view` and save it as PNG.
pub fn render_png(mesh: &TriangleMesh, view: View, path: &Path) -> Result<(), ExportError> {
    let pixmap = rasterize(mesh, view, SNAPSHOT_WIDTH, SNAPSHOT_HEIGHT)?;
    pixmap.save_png(path).map_err(|e| ExportError::Encode {
        format: "PNG",
        reason: e.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use geom_kernel::{GeometryKernel, MockKernel};

    fn box_mesh() -> TriangleMesh {
        let mut kernel = MockKernel::new();
        let solid = kernel.make_box([10.0, 10.0, 10.0], [0.0; 3]).unwrap();
        kernel.tessellate(&solid, 0.1).unwrap()
    }

    #[test]
    fn rasterized_snapshot_is_not_blank() {
        let pixmap = rasterize(&box_mesh(), View::All, 200, 180).unwrap();
        assert_eq!(pixmap.width(), 200);
        assert_eq!(pixmap.height(), 180);
        let non_white = pixmap
            .pixels()
            .iter()
            .filter(|p| p.red() != 255 || p.green() != 255 || p.blue() != 255)
            .count();
        assert!(non_white > 0, "the part should be visible on the canvas");
    }

    #[test]
    fn empty_mesh_cannot_be_rendered() {
        let mesh = TriangleMesh {
            vertices: vec![],
            normals: vec![],
            indices: vec![],
        };
        assert!(matches!(
            rasterize(&mesh, View::Top, 100, 100),
            Err(ExportError::EmptyMesh)
        ));
    }
}
