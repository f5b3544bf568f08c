//! MockKernel — deterministic recording double implementing GeometryKernel.
//!
//! Stores what was built for each handle and an ordered log of every call,
//! so engine tests can assert call cardinality and exact placements without
//! real geometry.

use std::collections::HashMap;

use part_types::PlacementTransform;

use crate::traits::GeometryKernel;
use crate::types::{FaceHandle, KernelError, SolidHandle, TriangleMesh};

/// What a handle refers to, pre-placement.
#[derive(Debug, Clone, PartialEq)]
pub enum ShapeRecord {
    Box {
        extents: [f64; 3],
        origin: [f64; 3],
    },
    Cylinder {
        radius: f64,
        depth: f64,
        origin: [f64; 3],
    },
    Sphere {
        radius: f64,
        center: [f64; 3],
    },
    Prism {
        vertices: Vec<[f64; 3]>,
        vector: [f64; 3],
    },
    Cut {
        base: u64,
        tool: u64,
    },
    Fused {
        sources: Vec<u64>,
    },
    Intersection {
        a: u64,
        b: u64,
    },
}

/// One kernel call, in invocation order.
#[derive(Debug, Clone, PartialEq)]
pub enum KernelOp {
    MakeBox { extents: [f64; 3], origin: [f64; 3] },
    MakeCylinder { radius: f64, depth: f64, origin: [f64; 3] },
    MakeSphere { radius: f64, center: [f64; 3] },
    MakePolygonFace { vertices: Vec<[f64; 3]> },
    Extrude { vector: [f64; 3] },
    SetPlacement { solid: u64, placement: PlacementTransform },
    Cut { base: u64, tool: u64 },
    MultiFuse { count: usize },
    Intersect { a: u64, b: u64 },
}

/// Deterministic test double for the geometry kernel.
#[derive(Debug, Default)]
pub struct MockKernel {
    next_handle: u64,
    next_face: u64,
    shapes: HashMap<u64, ShapeRecord>,
    faces: HashMap<u64, Vec<[f64; 3]>>,
    placements: HashMap<u64, PlacementTransform>,
    ops: Vec<KernelOp>,
}

impl MockKernel {
    pub fn new() -> Self {
        Self::default()
    }

    fn alloc(&mut self, shape: ShapeRecord) -> SolidHandle {
        self.next_handle += 1;
        self.shapes.insert(self.next_handle, shape);
        SolidHandle(self.next_handle)
    }

    /// The full ordered call log.
    pub fn ops(&self) -> &[KernelOp] {
        &self.ops
    }

    /// What was built for the given handle.
    pub fn shape(&self, handle: &SolidHandle) -> Option<&ShapeRecord> {
        self.shapes.get(&handle.id())
    }

    /// Shape lookup by the raw id recorded in the op log.
    pub fn shape_by_id(&self, id: u64) -> Option<&ShapeRecord> {
        self.shapes.get(&id)
    }

    /// Placement applied to the given handle, if any.
    pub fn placement(&self, handle: &SolidHandle) -> Option<&PlacementTransform> {
        self.placements.get(&handle.id())
    }

    pub fn cut_count(&self) -> usize {
        self.ops
            .iter()
            .filter(|op| matches!(op, KernelOp::Cut { .. }))
            .count()
    }

    pub fn fuse_count(&self) -> usize {
        self.ops
            .iter()
            .filter(|op| matches!(op, KernelOp::MultiFuse { .. }))
            .count()
    }

    fn require(&self, handle: &SolidHandle) -> Result<(), KernelError> {
        if self.shapes.contains_key(&handle.id()) {
            Ok(())
        } else {
            Err(KernelError::UnknownSolid {
                handle: handle.id(),
            })
        }
    }
}

impl GeometryKernel for MockKernel {
    fn make_box(
        &mut self,
        extents: [f64; 3],
        origin: [f64; 3],
    ) -> Result<SolidHandle, KernelError> {
        self.ops.push(KernelOp::MakeBox { extents, origin });
        Ok(self.alloc(ShapeRecord::Box { extents, origin }))
    }

    fn make_cylinder(
        &mut self,
        radius: f64,
        depth: f64,
        origin: [f64; 3],
    ) -> Result<SolidHandle, KernelError> {
        self.ops.push(KernelOp::MakeCylinder {
            radius,
            depth,
            origin,
        });
        Ok(self.alloc(ShapeRecord::Cylinder {
            radius,
            depth,
            origin,
        }))
    }

    fn make_sphere(
        &mut self,
        radius: f64,
        center: [f64; 3],
    ) -> Result<SolidHandle, KernelError> {
        self.ops.push(KernelOp::MakeSphere { radius, center });
        Ok(self.alloc(ShapeRecord::Sphere { radius, center }))
    }

    fn make_polygon_face(&mut self, vertices: &[[f64; 3]]) -> Result<FaceHandle, KernelError> {
        if vertices.len() < 4 {
            return Err(KernelError::InvalidGeometry {
                reason: format!(
                    "polygon loop needs at least 3 distinct vertices plus closure, got {}",
                    vertices.len()
                ),
            });
        }
        if vertices.first() != vertices.last() {
            return Err(KernelError::InvalidGeometry {
                reason: "polygon loop is not closed".to_string(),
            });
        }
        self.ops.push(KernelOp::MakePolygonFace {
            vertices: vertices.to_vec(),
        });
        self.next_face += 1;
        self.faces.insert(self.next_face, vertices.to_vec());
        Ok(FaceHandle(self.next_face))
    }

    fn extrude(
        &mut self,
        face: FaceHandle,
        vector: [f64; 3],
    ) -> Result<SolidHandle, KernelError> {
        let vertices = self
            .faces
            .remove(&face.0)
            .ok_or(KernelError::UnknownFace { handle: face.0 })?;
        self.ops.push(KernelOp::Extrude { vector });
        Ok(self.alloc(ShapeRecord::Prism { vertices, vector }))
    }

    fn set_placement(
        &mut self,
        solid: &SolidHandle,
        placement: &PlacementTransform,
    ) -> Result<(), KernelError> {
        self.require(solid)?;
        self.ops.push(KernelOp::SetPlacement {
            solid: solid.id(),
            placement: placement.clone(),
        });
        self.placements.insert(solid.id(), placement.clone());
        Ok(())
    }

    fn cut(&mut self, base: &SolidHandle, tool: &SolidHandle) -> Result<SolidHandle, KernelError> {
        self.require(base)?;
        self.require(tool)?;
        self.ops.push(KernelOp::Cut {
            base: base.id(),
            tool: tool.id(),
        });
        Ok(self.alloc(ShapeRecord::Cut {
            base: base.id(),
            tool: tool.id(),
        }))
    }

    fn multi_fuse(&mut self, solids: &[SolidHandle]) -> Result<SolidHandle, KernelError> {
        if solids.is_empty() {
            return Err(KernelError::InvalidGeometry {
                reason: "cannot fuse an empty solid list".to_string(),
            });
        }
        for solid in solids {
            self.require(solid)?;
        }
        self.ops.push(KernelOp::MultiFuse {
            count: solids.len(),
        });
        Ok(self.alloc(ShapeRecord::Fused {
            sources: solids.iter().map(|s| s.id()).collect(),
        }))
    }

    fn intersect(
        &mut self,
        a: &SolidHandle,
        b: &SolidHandle,
    ) -> Result<SolidHandle, KernelError> {
        self.require(a)?;
        self.require(b)?;
        self.ops.push(KernelOp::Intersect {
            a: a.id(),
            b: b.id(),
        });
        Ok(self.alloc(ShapeRecord::Intersection {
            a: a.id(),
            b: b.id(),
        }))
    }

    fn tessellate(
        &mut self,
        solid: &SolidHandle,
        _tolerance: f64,
    ) -> Result<TriangleMesh, KernelError> {
        // Synthetic box mesh: real box dimensions when the handle is a box,
        // a unit box for everything else. Enough for export tests.
        let (extents, origin) = match self.shapes.get(&solid.id()) {
            Some(ShapeRecord::Box { extents, origin }) => (*extents, *origin),
            Some(_) => ([1.0, 1.0, 1.0], [0.0, 0.0, 0.0]),
            None => {
                return Err(KernelError::UnknownSolid {
                    handle: solid.id(),
                })
            }
        };
        Ok(box_mesh(extents, origin))
    }
}

/// Triangulated axis-aligned box: 6 faces, 2 triangles each.
fn box_mesh(extents: [f64; 3], origin: [f64; 3]) -> TriangleMesh {
    let [w, h, d] = extents;
    let [x, y, z] = origin;
    // face: (normal, 4 corners counter-clockwise seen from outside)
    let faces: [([f32; 3], [[f64; 3]; 4]); 6] = [
        (
            [0.0, 0.0, -1.0],
            [[x, y, z], [x, y + h, z], [x + w, y + h, z], [x + w, y, z]],
        ),
        (
            [0.0, 0.0, 1.0],
            [
                [x, y, z + d],
                [x + w, y, z + d],
                [x + w, y + h, z + d],
                [x, y + h, z + d],
            ],
        ),
        (
            [0.0, -1.0, 0.0],
            [[x, y, z], [x + w, y, z], [x + w, y, z + d], [x, y, z + d]],
        ),
        (
            [0.0, 1.0, 0.0],
            [
                [x, y + h, z],
                [x, y + h, z + d],
                [x + w, y + h, z + d],
                [x + w, y + h, z],
            ],
        ),
        (
            [-1.0, 0.0, 0.0],
            [[x, y, z], [x, y, z + d], [x, y + h, z + d], [x, y + h, z]],
        ),
        (
            [1.0, 0.0, 0.0],
            [
                [x + w, y, z],
                [x + w, y + h, z],
                [x + w, y + h, z + d],
                [x + w, y, z + d],
            ],
        ),
    ];

    let mut vertices = Vec::with_capacity(6 * 4 * 3);
    let mut normals = Vec::with_capacity(6 * 4 * 3);
    let mut indices = Vec::with_capacity(6 * 6);
    for (normal, corners) in &faces {
        let base = (vertices.len() / 3) as u32;
        for corner in corners {
            vertices.extend(corner.iter().map(|&c| c as f32));
            normals.extend_from_slice(normal);
        }
        indices.extend_from_slice(&[base, base + 1, base + 2, base, base + 2, base + 3]);
    }

    TriangleMesh {
        vertices,
        normals,
        indices,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use part_types::{Axis, Rotation};

    #[test]
    fn handles_are_deterministic() {
        let mut k1 = MockKernel::new();
        let mut k2 = MockKernel::new();
        let a = k1.make_box([1.0, 1.0, 1.0], [0.0; 3]).unwrap();
        let b = k2.make_box([1.0, 1.0, 1.0], [0.0; 3]).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn op_log_preserves_order() {
        let mut kernel = MockKernel::new();
        let base = kernel.make_box([10.0, 10.0, 10.0], [0.0; 3]).unwrap();
        let tool = kernel.make_sphere(2.0, [5.0, 5.0, 5.0]).unwrap();
        kernel.cut(&base, &tool).unwrap();

        assert!(matches!(kernel.ops()[0], KernelOp::MakeBox { .. }));
        assert!(matches!(kernel.ops()[1], KernelOp::MakeSphere { .. }));
        assert!(matches!(kernel.ops()[2], KernelOp::Cut { .. }));
        assert_eq!(kernel.cut_count(), 1);
    }

    #[test]
    fn placement_is_recorded_per_handle() {
        let mut kernel = MockKernel::new();
        let cyl = kernel.make_cylinder(2.0, 8.0, [0.0; 3]).unwrap();
        let placement =
            PlacementTransform::aligned([1.0, 2.0, 3.0], Rotation::new(Axis::Y, 270.0));
        kernel.set_placement(&cyl, &placement).unwrap();
        assert_eq!(kernel.placement(&cyl), Some(&placement));
    }

    #[test]
    fn open_polygon_loop_is_rejected() {
        let mut kernel = MockKernel::new();
        let result = kernel.make_polygon_face(&[
            [1.0, 0.0, 0.0],
            [0.0, 1.0, 0.0],
            [-1.0, 0.0, 0.0],
            [0.0, -1.0, 0.0],
        ]);
        assert!(matches!(
            result,
            Err(KernelError::InvalidGeometry { .. })
        ));
    }

    #[test]
    fn extrude_consumes_the_face() {
        let mut kernel = MockKernel::new();
        let loop_ = [
            [1.0, 0.0, 0.0],
            [0.0, 1.0, 0.0],
            [-1.0, 0.0, 0.0],
            [1.0, 0.0, 0.0],
        ];
        let face = kernel.make_polygon_face(&loop_).unwrap();
        kernel.extrude(face, [0.0, 0.0, 2.0]).unwrap();
        let again = kernel.extrude(face, [0.0, 0.0, 2.0]);
        assert!(matches!(again, Err(KernelError::UnknownFace { .. })));
    }

    #[test]
    fn multi_fuse_requires_solids() {
        let mut kernel = MockKernel::new();
        assert!(kernel.multi_fuse(&[]).is_err());
    }

    #[test]
    fn box_tessellation_has_twelve_triangles() {
        let mut kernel = MockKernel::new();
        let solid = kernel.make_box([2.0, 3.0, 4.0], [0.0; 3]).unwrap();
        let mesh = kernel.tessellate(&solid, 0.1).unwrap();
        assert_eq!(mesh.triangle_count(), 12);
        assert_eq!(mesh.vertex_count(), 24);
        assert_eq!(mesh.normals.len(), mesh.vertices.len());
    }
}
