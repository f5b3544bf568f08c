//! Placement resolution: side-alignment rotations and surface-relative
//! cube anchors.

use part_types::{Axis, CubeParams, Rotation, Side};

/// Rotation that aligns a feature authored pointing along +Z with the
/// given face.
///
/// | side   | rotation     |
/// |--------|--------------|
/// | FRONT  | 270° about X |
/// | BACK   |  90° about X |
/// | TOP    | 180° about Y |
/// | BOTTOM |   0° about Y |
/// | LEFT   |  90° about Y |
/// | RIGHT  | 270° about Y |
pub fn side_rotation(side: Side) -> Rotation {
    match side {
        Side::Front => Rotation::new(Axis::X, 270.0),
        Side::Back => Rotation::new(Axis::X, 90.0),
        Side::Top => Rotation::new(Axis::Y, 180.0),
        Side::Bottom => Rotation::new(Axis::Y, 0.0),
        Side::Left => Rotation::new(Axis::Y, 90.0),
        Side::Right => Rotation::new(Axis::Y, 270.0),
    }
}

/// Corner the kernel box is built at for a cube feature.
///
/// Centered cubes shift the raw anchor by half the extents so the box
/// center lands on (x, y, z), independent of `side`. Non-centered cubes
/// with a side are pulled back by one extent on TOP/BACK/RIGHT so the box
/// sits flush with (instead of straddling) that face; BOTTOM/FRONT/LEFT
/// already anchor at the correct corner.
pub fn cube_anchor(cube: &CubeParams) -> [f64; 3] {
    if cube.center {
        return [
            cube.x - cube.x_size / 2.0,
            cube.y - cube.y_size / 2.0,
            cube.z - cube.z_size / 2.0,
        ];
    }
    let mut anchor = [cube.x, cube.y, cube.z];
    match cube.side {
        Some(Side::Top) => anchor[2] -= cube.z_size,
        Some(Side::Back) => anchor[1] -= cube.y_size,
        Some(Side::Right) => anchor[0] -= cube.x_size,
        Some(Side::Bottom) | Some(Side::Front) | Some(Side::Left) | None => {}
    }
    anchor
}
