use serde::{Deserialize, Serialize};

use crate::placement::Axis;
use crate::side::{EdgeType, Side};

/// Whether a feature adds material or carves it away.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FeatureOp {
    Add,
    Cut,
}

/// The closed set of feature geometries, keyed by the wire field `name`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "name", rename_all = "snake_case")]
pub enum Shape {
    Cube(CubeParams),
    Sphere(SphereParams),
    Hole(HoleParams),
    Nut(NutParams),
    BeveledEdge(BevelParams),
}

impl Shape {
    /// Wire name of this shape.
    pub fn name(&self) -> &'static str {
        match self {
            Shape::Cube(_) => "cube",
            Shape::Sphere(_) => "sphere",
            Shape::Hole(_) => "hole",
            Shape::Nut(_) => "nut",
            Shape::BeveledEdge(_) => "beveled_edge",
        }
    }
}

/// An axis-aligned box.
///
/// The anchor point is the box corner unless `center` is set, in which case
/// (x, y, z) is the box center. A non-centered box with a `side` is offset so
/// it sits flush with that face instead of straddling it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CubeParams {
    pub x: f64,
    pub y: f64,
    pub z: f64,
    pub x_size: f64,
    pub y_size: f64,
    pub z_size: f64,
    pub center: bool,
    #[serde(default)]
    pub side: Option<Side>,
}

/// A sphere given by center point and diameter. No side semantics.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SphereParams {
    pub x: f64,
    pub y: f64,
    pub z: f64,
    pub diameter: f64,
}

/// A cylindrical hole drilled into the given face at (x, y, z).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HoleParams {
    pub x: f64,
    pub y: f64,
    pub z: f64,
    pub diameter: f64,
    pub depth: f64,
    pub side: Side,
}

/// A hexagonal nut pocket sunk into the given face.
///
/// `vertical` selects flat-to-edge orientation (no in-plane rotation);
/// otherwise the hexagon is turned 30° point-to-edge.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NutParams {
    pub x: f64,
    pub y: f64,
    pub z: f64,
    pub diameter: f64,
    pub depth: f64,
    pub side: Side,
    pub vertical: bool,
}

/// A rounded or chamfered corner cut, bounded by two in-plane axes.
///
/// `bound1`/`bound2` are the distances of the corner from the cut-plane
/// origin along `axis1`/`axis2`; a bound of exactly 0 means the corner at
/// the origin, a nonzero bound mirrors the cut toward the far edge.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BevelParams {
    pub edge_type: EdgeType,
    pub axis1: Axis,
    pub axis2: Axis,
    pub bound1: f64,
    pub bound2: f64,
    pub size: f64,
    pub depth: f64,
    pub side: Side,
}

/// One declarative step of a part's construction list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Feature {
    #[serde(rename = "type")]
    pub op: FeatureOp,
    #[serde(flatten)]
    pub shape: Shape,
}

/// A complete part definition as fetched from the job server.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PartDefinition {
    pub id: String,
    #[serde(default)]
    pub name: Option<String>,
    pub features: Vec<Feature>,
}

impl PartDefinition {
    /// Display name, falling back to the id when no name was given.
    pub fn display_name(&self) -> &str {
        self.name.as_deref().unwrap_or(&self.id)
    }

    pub fn from_json(raw: &str) -> Result<Self, DefinitionError> {
        Ok(serde_json::from_str(raw)?)
    }
}

/// A part definition that cannot be interpreted. Fatal for the build;
/// covers unknown sides/edge types/feature names and missing fields.
#[derive(Debug, thiserror::Error)]
pub enum DefinitionError {
    #[error("invalid part definition: {0}")]
    Parse(#[from] serde_json::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hole_feature_parses_from_wire_json() {
        let feature: Feature = serde_json::from_str(
            r#"{"type":"cut","name":"hole","x":10.0,"y":5.0,"z":0.0,"diameter":3.0,"depth":8.0,"side":"TOP"}"#,
        )
        .unwrap();
        assert_eq!(feature.op, FeatureOp::Cut);
        let Shape::Hole(hole) = &feature.shape else {
            panic!("expected a hole, got {:?}", feature.shape);
        };
        assert_eq!(hole.diameter, 3.0);
        assert_eq!(hole.side, Side::Top);
    }

    #[test]
    fn feature_json_round_trips_tags() {
        let feature = Feature {
            op: FeatureOp::Cut,
            shape: Shape::Nut(NutParams {
                x: 1.0,
                y: 2.0,
                z: 3.0,
                diameter: 5.5,
                depth: 2.4,
                side: Side::Left,
                vertical: true,
            }),
        };
        let json = serde_json::to_value(&feature).unwrap();
        assert_eq!(json["type"], "cut");
        assert_eq!(json["name"], "nut");
        assert_eq!(json["side"], "LEFT");
        let back: Feature = serde_json::from_value(json).unwrap();
        assert_eq!(back, feature);
    }

    #[test]
    fn unknown_feature_name_is_rejected() {
        let result = serde_json::from_str::<Feature>(
            r#"{"type":"cut","name":"torus","x":0.0,"y":0.0,"z":0.0}"#,
        );
        assert!(result.is_err());
    }

    #[test]
    fn missing_numeric_field_is_rejected() {
        // depth omitted
        let result = serde_json::from_str::<Feature>(
            r#"{"type":"cut","name":"hole","x":0.0,"y":0.0,"z":0.0,"diameter":3.0,"side":"TOP"}"#,
        );
        assert!(result.is_err());
    }

    #[test]
    fn unknown_side_fails_definition_parse() {
        let result = PartDefinition::from_json(
            r#"{"id":"p1","features":[
                {"type":"cut","name":"hole","x":0.0,"y":0.0,"z":0.0,"diameter":3.0,"depth":1.0,"side":"DIAGONAL"}
            ]}"#,
        );
        let err = result.unwrap_err();
        assert!(err.to_string().contains("DIAGONAL"));
    }

    #[test]
    fn definition_display_name_falls_back_to_id() {
        let def = PartDefinition::from_json(r#"{"id":"part-7","features":[]}"#).unwrap();
        assert_eq!(def.display_name(), "part-7");

        let named =
            PartDefinition::from_json(r#"{"id":"part-7","name":"bracket","features":[]}"#).unwrap();
        assert_eq!(named.display_name(), "bracket");
    }

    #[test]
    fn bevel_feature_parses_axes_and_edge_type() {
        let feature: Feature = serde_json::from_str(
            r#"{"type":"cut","name":"beveled_edge","edge_type":"chamfer",
                "axis1":"x","axis2":"y","bound1":0.0,"bound2":50.0,
                "size":5.0,"depth":2.0,"side":"TOP"}"#,
        )
        .unwrap();
        let Shape::BeveledEdge(bevel) = &feature.shape else {
            panic!("expected a beveled edge");
        };
        assert_eq!(bevel.edge_type, EdgeType::Chamfer);
        assert_eq!(bevel.axis1, Axis::X);
        assert_eq!(bevel.bound2, 50.0);
    }
}
