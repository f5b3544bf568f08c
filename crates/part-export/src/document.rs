//! Saved part document: the construction record written next to the
//! geometry artifacts.

use std::fs;
use std::path::Path;

use chrono::{DateTime, Utc};
use part_types::PartDefinition;
use serde::{Deserialize, Serialize};

use crate::error::ExportError;

/// Current document format version.
pub const FORMAT_VERSION: u32 = 1;

/// Metadata stored alongside the definition.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PartMetadata {
    /// Human-readable part name.
    pub name: String,
    /// When the document was produced.
    pub created: DateTime<Utc>,
}

/// The top-level document structure.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PartDocument {
    /// Format identifier.
    pub format: String,
    /// Format version number.
    pub version: u32,
    /// Document metadata.
    pub part: PartMetadata,
    /// The declarative feature list the solid was built from.
    pub definition: PartDefinition,
}

impl PartDocument {
    pub fn new(definition: &PartDefinition) -> Self {
        Self {
            format: "partwright".to_string(),
            version: FORMAT_VERSION,
            part: PartMetadata {
                name: definition.display_name().to_string(),
                created: Utc::now(),
            },
            definition: definition.clone(),
        }
    }
}

/// Serialize the document to pretty-printed JSON.
pub fn document_json(definition: &PartDefinition) -> String {
    serde_json::to_string_pretty(&PartDocument::new(definition))
        .expect("part definition serialization should never fail")
}

/// Write the saved document for a definition.
pub fn save_document(definition: &PartDefinition, path: &Path) -> Result<(), ExportError> {
    fs::write(path, document_json(definition))?;
    Ok(())
}
