//! Beveled-edge resolution: a single corner region rounded or chamfered by
//! a confined cutter.
//!
//! The cutter (cylinder for `round`, 45°-turned square prism for `chamfer`)
//! is positioned with per-axis mirroring, subtracted from a small bounding
//! cube so only the local corner material remains, and that remainder is
//! carved out of the running solid immediately. Bevels are never batched.

use geom_kernel::{GeometryKernel, SolidHandle};
use part_types::{Axis, BevelParams, EdgeType, PlacementTransform, Rotation, Side};

use crate::error::EngineError;
use crate::primitives::build_hole;

/// Cutter-center offset along one in-plane axis. A zero bound keeps the cut
/// at the near corner; a nonzero bound mirrors it toward the far edge.
fn corner_offset(bound: f64, size: f64) -> f64 {
    if bound == 0.0 {
        size
    } else {
        bound - size
    }
}

/// Center of the round/chamfer cutter in the cut plane.
fn cutter_center(bevel: &BevelParams) -> [f64; 3] {
    let mut at = [0.0; 3];
    at[bevel.axis1.index()] = corner_offset(bevel.bound1, bevel.size);
    at[bevel.axis2.index()] = corner_offset(bevel.bound2, bevel.size);
    at
}

/// Corner the bounding cube is built at: flush with the cut-plane origin for
/// a zero bound, pulled back by `size` from a nonzero bound.
fn bounding_corner(bevel: &BevelParams) -> [f64; 3] {
    let mut at = [0.0; 3];
    if bevel.bound1 != 0.0 {
        at[bevel.axis1.index()] = bevel.bound1 - bevel.size;
    }
    if bevel.bound2 != 0.0 {
        at[bevel.axis2.index()] = bevel.bound2 - bevel.size;
    }
    at
}

/// Extents of the bounding cube: edge `size` in the cut plane, `depth`
/// along the cut normal.
fn bounding_extents(side: Side, size: f64, depth: f64) -> [f64; 3] {
    match side {
        Side::Top | Side::Bottom => [size, size, depth],
        Side::Front | Side::Back => [size, depth, size],
        Side::Left | Side::Right => [depth, size, size],
    }
}

/// Rhombus cutter orientation per face pair.
fn rhombus_rotation(side: Side) -> Rotation {
    match side {
        Side::Front | Side::Back => Rotation::new(Axis::X, 270.0),
        Side::Top | Side::Bottom => Rotation::new(Axis::Z, 0.0),
        Side::Left | Side::Right => Rotation::new(Axis::Y, 90.0),
    }
}

/// Square turned 45° (a rhombus with 90° corners), extruded by `depth`.
/// Half-diagonal: hypot = sqrt((2·size)² + (2·size)²) / 2 = size·√2.
fn build_rhombus(
    kernel: &mut dyn GeometryKernel,
    size: f64,
    depth: f64,
    side: Side,
    at: [f64; 3],
) -> Result<SolidHandle, EngineError> {
    let hypot = ((2.0 * size).powi(2) + (2.0 * size).powi(2)).sqrt() / 2.0;
    let face = kernel.make_polygon_face(&[
        [hypot, 0.0, 0.0],
        [0.0, hypot, 0.0],
        [-hypot, 0.0, 0.0],
        [0.0, -hypot, 0.0],
        [hypot, 0.0, 0.0],
    ])?;
    let prism = kernel.extrude(face, [0.0, 0.0, depth])?;
    kernel.set_placement(&prism, &PlacementTransform::aligned(at, rhombus_rotation(side)))?;
    Ok(prism)
}

/// Carve one rounded or chamfered corner out of `solid`, returning the
/// replacement solid.
pub fn apply_beveled_edge(
    kernel: &mut dyn GeometryKernel,
    bevel: &BevelParams,
    solid: &SolidHandle,
) -> Result<SolidHandle, EngineError> {
    let center = cutter_center(bevel);
    let cutter = match bevel.edge_type {
        EdgeType::Round => build_hole(kernel, bevel.size, bevel.depth, bevel.side, center)?,
        EdgeType::Chamfer => build_rhombus(kernel, bevel.size, bevel.depth, bevel.side, center)?,
    };

    let bounds = kernel.make_box(
        bounding_extents(bevel.side, bevel.size, bevel.depth),
        bounding_corner(bevel),
    )?;

    // The material to remove is the corner region outside the cutter;
    // subtracting the cutter from the bounding cube leaves exactly that.
    let confined = kernel.cut(&bounds, &cutter)?;
    Ok(kernel.cut(solid, &confined)?)
}
