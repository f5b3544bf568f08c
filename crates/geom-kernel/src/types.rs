use serde::{Deserialize, Serialize};

/// Opaque handle to a solid owned by the geometry kernel.
/// Valid only for the kernel instance that issued it; never persisted.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SolidHandle(pub(crate) u64);

impl SolidHandle {
    /// Raw kernel id, for correlating with a mock kernel's op log.
    pub fn id(&self) -> u64 {
        self.0
    }
}

/// Opaque handle to a standalone planar face awaiting extrusion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FaceHandle(pub(crate) u64);

/// Errors from kernel operations.
#[derive(Debug, Clone, thiserror::Error)]
pub enum KernelError {
    #[error("boolean operation failed: {reason}")]
    BooleanFailed { reason: String },

    #[error("unknown solid handle: {handle}")]
    UnknownSolid { handle: u64 },

    #[error("unknown face handle: {handle}")]
    UnknownFace { handle: u64 },

    #[error("invalid geometry: {reason}")]
    InvalidGeometry { reason: String },

    #[error("tessellation failed: {reason}")]
    TessellationFailed { reason: String },
}

/// Tessellated triangle soup of a solid, used by the export codecs.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TriangleMesh {
    /// Flat array of vertex positions [x0, y0, z0, x1, y1, z1, ...].
    pub vertices: Vec<f32>,
    /// Flat array of per-vertex normals, same layout as `vertices`.
    pub normals: Vec<f32>,
    /// Triangle indices into the vertex array.
    pub indices: Vec<u32>,
}

impl TriangleMesh {
    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    pub fn vertex_count(&self) -> usize {
        self.vertices.len() / 3
    }

    /// Position of vertex `i` as an [x, y, z] triple.
    pub fn position(&self, i: u32) -> [f32; 3] {
        let base = i as usize * 3;
        [
            self.vertices[base],
            self.vertices[base + 1],
            self.vertices[base + 2],
        ]
    }
}
