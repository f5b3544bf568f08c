use serde::{Deserialize, Serialize};

/// A principal coordinate axis.
///
/// Wire spelling is lowercase (`"x"`, `"y"`, `"z"`), as used by the
/// `axis1`/`axis2` fields of beveled-edge features.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Axis {
    X,
    Y,
    Z,
}

impl Axis {
    /// Index of this axis in an `[x, y, z]` triple.
    pub fn index(&self) -> usize {
        match self {
            Axis::X => 0,
            Axis::Y => 1,
            Axis::Z => 2,
        }
    }

    /// Unit vector along this axis.
    pub fn unit(&self) -> [f64; 3] {
        match self {
            Axis::X => [1.0, 0.0, 0.0],
            Axis::Y => [0.0, 1.0, 0.0],
            Axis::Z => [0.0, 0.0, 1.0],
        }
    }
}

/// A single rotation about a principal axis, in degrees.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rotation {
    pub axis: Axis,
    pub angle_deg: f64,
}

impl Rotation {
    pub fn new(axis: Axis, angle_deg: f64) -> Self {
        Self { axis, angle_deg }
    }
}

/// Where a feature's base geometry ends up: a translation plus up to two
/// axis-angle rotations.
///
/// Rotation order is fixed: `orient` is applied first (in-plane profile
/// orientation, e.g. turning a hexagon flat-to-edge), then `align` (the
/// rotation that points a +Z-authored feature at its target face). Both
/// rotate about the global origin; the translation is applied last.
#[derive(Debug, Clone, PartialEq)]
pub struct PlacementTransform {
    pub translation: [f64; 3],
    pub orient: Option<Rotation>,
    pub align: Option<Rotation>,
}

impl PlacementTransform {
    /// Pure translation, no rotation.
    pub fn at(translation: [f64; 3]) -> Self {
        Self {
            translation,
            orient: None,
            align: None,
        }
    }

    /// Translation plus a face-alignment rotation.
    pub fn aligned(translation: [f64; 3], align: Rotation) -> Self {
        Self {
            translation,
            orient: None,
            align: Some(align),
        }
    }

    /// Translation plus both rotations (orient first, then align).
    pub fn oriented(translation: [f64; 3], orient: Rotation, align: Rotation) -> Self {
        Self {
            translation,
            orient: Some(orient),
            align: Some(align),
        }
    }
}
