use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// One of the six face orientations of a part.
///
/// Side-relative features (holes, nuts, surface cubes, bevels) are authored
/// pointing along +Z and aligned to one of these faces at placement time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Side {
    Top,
    Bottom,
    Left,
    Right,
    Front,
    Back,
}

impl Side {
    pub const ALL: [Side; 6] = [
        Side::Top,
        Side::Bottom,
        Side::Left,
        Side::Right,
        Side::Front,
        Side::Back,
    ];

    /// Canonical wire spelling.
    pub fn as_str(&self) -> &'static str {
        match self {
            Side::Top => "TOP",
            Side::Bottom => "BOTTOM",
            Side::Left => "LEFT",
            Side::Right => "RIGHT",
            Side::Front => "FRONT",
            Side::Back => "BACK",
        }
    }
}

/// A side spelling outside the closed six-face set.
///
/// This is a hard modeling error: there is no identity-rotation fallback
/// for an unrecognized side anywhere in the engine.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("side '{0}' is not one of TOP, BOTTOM, LEFT, RIGHT, FRONT, BACK")]
pub struct InvalidSideError(pub String);

impl FromStr for Side {
    type Err = InvalidSideError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "TOP" => Ok(Side::Top),
            "BOTTOM" => Ok(Side::Bottom),
            "LEFT" => Ok(Side::Left),
            "RIGHT" => Ok(Side::Right),
            "FRONT" => Ok(Side::Front),
            // REAR is the one accepted alternate spelling.
            "BACK" | "REAR" => Ok(Side::Back),
            _ => Err(InvalidSideError(s.to_string())),
        }
    }
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for Side {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for Side {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}

/// Edge treatment of a beveled-edge feature.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EdgeType {
    Round,
    Chamfer,
}

impl EdgeType {
    pub fn as_str(&self) -> &'static str {
        match self {
            EdgeType::Round => "round",
            EdgeType::Chamfer => "chamfer",
        }
    }
}

/// An edge-type spelling other than `round` or `chamfer`.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("edge type '{0}' is not one of round, chamfer")]
pub struct InvalidEdgeTypeError(pub String);

impl FromStr for EdgeType {
    type Err = InvalidEdgeTypeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "round" => Ok(EdgeType::Round),
            "chamfer" => Ok(EdgeType::Chamfer),
            _ => Err(InvalidEdgeTypeError(s.to_string())),
        }
    }
}

impl fmt::Display for EdgeType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for EdgeType {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for EdgeType {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}
