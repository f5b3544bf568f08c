//! Base geometry builders for the closed feature set.
//!
//! Each builder constructs the untransformed primitive through the kernel
//! and applies its placement; none of them mutate the running solid.

use geom_kernel::{GeometryKernel, SolidHandle};
use part_types::{
    Axis, CubeParams, HoleParams, NutParams, PlacementTransform, Rotation, Side, SphereParams,
};

use crate::error::EngineError;
use crate::placement::{cube_anchor, side_rotation};

/// Axis-aligned box at its resolved anchor. No rotation.
pub fn build_cube(
    kernel: &mut dyn GeometryKernel,
    cube: &CubeParams,
) -> Result<SolidHandle, EngineError> {
    let origin = cube_anchor(cube);
    Ok(kernel.make_box([cube.x_size, cube.y_size, cube.z_size], origin)?)
}

/// Sphere of radius diameter/2 at its center point. No rotation, no side.
pub fn build_sphere(
    kernel: &mut dyn GeometryKernel,
    sphere: &SphereParams,
) -> Result<SolidHandle, EngineError> {
    Ok(kernel.make_sphere(sphere.diameter / 2.0, [sphere.x, sphere.y, sphere.z])?)
}

/// Cylindrical cutter built at the origin, rotated into the given face and
/// translated to `at`.
///
/// This is the discrete-parameter entry; `build_hole_feature` routes a hole
/// feature through the same path so both produce identical kernel calls.
pub fn build_hole(
    kernel: &mut dyn GeometryKernel,
    radius: f64,
    depth: f64,
    side: Side,
    at: [f64; 3],
) -> Result<SolidHandle, EngineError> {
    let cylinder = kernel.make_cylinder(radius, depth, [0.0, 0.0, 0.0])?;
    kernel.set_placement(&cylinder, &PlacementTransform::aligned(at, side_rotation(side)))?;
    Ok(cylinder)
}

pub fn build_hole_feature(
    kernel: &mut dyn GeometryKernel,
    hole: &HoleParams,
) -> Result<SolidHandle, EngineError> {
    build_hole(
        kernel,
        hole.diameter / 2.0,
        hole.depth,
        hole.side,
        [hole.x, hole.y, hole.z],
    )
}

/// Vertices of a regular hexagon of the given diameter in the z=0 plane,
/// at angles 0°, 60°, …, 300°; the closing vertex repeats the first.
pub fn hex_vertices(diameter: f64) -> Vec<[f64; 3]> {
    let radius = diameter / 2.0;
    let half = radius / 2.0;
    let rise = radius * 3.0_f64.sqrt() / 2.0;
    vec![
        [radius, 0.0, 0.0],
        [half, rise, 0.0],
        [-half, rise, 0.0],
        [-radius, 0.0, 0.0],
        [-half, -rise, 0.0],
        [half, -rise, 0.0],
        [radius, 0.0, 0.0],
    ]
}

/// Hexagonal nut pocket: hex face extruded by depth, oriented in-plane
/// (0° when vertical, else 30° about Z), aligned to the face, translated.
pub fn build_nut(
    kernel: &mut dyn GeometryKernel,
    nut: &NutParams,
) -> Result<SolidHandle, EngineError> {
    let face = kernel.make_polygon_face(&hex_vertices(nut.diameter))?;
    let prism = kernel.extrude(face, [0.0, 0.0, nut.depth])?;

    let orient = if nut.vertical {
        Rotation::new(Axis::Z, 0.0)
    } else {
        Rotation::new(Axis::Z, 30.0)
    };
    kernel.set_placement(
        &prism,
        &PlacementTransform::oriented([nut.x, nut.y, nut.z], orient, side_rotation(nut.side)),
    )?;
    Ok(prism)
}
