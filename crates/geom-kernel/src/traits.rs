use part_types::PlacementTransform;

use crate::types::{FaceHandle, KernelError, SolidHandle, TriangleMesh};

/// Capability set of the boolean-geometry kernel.
///
/// Implemented by `TruckKernel` (real geometry via truck) and `MockKernel`
/// (deterministic recording double). The construction engine depends only on
/// this trait and never inspects a solid's internals.
pub trait GeometryKernel {
    /// Axis-aligned box with the given extents, minimum corner at `origin`.
    fn make_box(&mut self, extents: [f64; 3], origin: [f64; 3])
        -> Result<SolidHandle, KernelError>;

    /// Cylinder along +Z, base circle centered at `origin`.
    fn make_cylinder(
        &mut self,
        radius: f64,
        depth: f64,
        origin: [f64; 3],
    ) -> Result<SolidHandle, KernelError>;

    /// Sphere centered at `center`.
    fn make_sphere(&mut self, radius: f64, center: [f64; 3])
        -> Result<SolidHandle, KernelError>;

    /// Planar face from a closed polygon loop (last vertex repeats the first).
    fn make_polygon_face(&mut self, vertices: &[[f64; 3]]) -> Result<FaceHandle, KernelError>;

    /// Sweep a standalone face along `vector`, consuming the face.
    fn extrude(&mut self, face: FaceHandle, vector: [f64; 3])
        -> Result<SolidHandle, KernelError>;

    /// Replace a solid's placement: rotations about the origin (orient, then
    /// align), then the translation.
    fn set_placement(
        &mut self,
        solid: &SolidHandle,
        placement: &PlacementTransform,
    ) -> Result<(), KernelError>;

    /// Boolean difference: `base` minus `tool`.
    fn cut(&mut self, base: &SolidHandle, tool: &SolidHandle) -> Result<SolidHandle, KernelError>;

    /// Boolean union of one or more solids.
    fn multi_fuse(&mut self, solids: &[SolidHandle]) -> Result<SolidHandle, KernelError>;

    /// Boolean intersection of two solids.
    fn intersect(&mut self, a: &SolidHandle, b: &SolidHandle)
        -> Result<SolidHandle, KernelError>;

    /// Tessellate a solid to a triangle mesh at the given tolerance.
    fn tessellate(
        &mut self,
        solid: &SolidHandle,
        tolerance: f64,
    ) -> Result<TriangleMesh, KernelError>;
}
