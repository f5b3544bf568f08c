/// Errors during artifact export. Fatal for the current part build.
#[derive(Debug, thiserror::Error)]
pub enum ExportError {
    #[error("output format '{format}' is not one of PNG, SVG, DXF or STL")]
    UnsupportedFormat { format: String },

    #[error("view '{view}' is not one of TOP, BOTTOM, LEFT, RIGHT, FRONT, BACK or ALL")]
    UnknownView { view: String },

    #[error("mesh has no triangles to export")]
    EmptyMesh,

    #[error("failed to encode {format} output: {reason}")]
    Encode {
        format: &'static str,
        reason: String,
    },

    #[error("kernel error: {0}")]
    Kernel(#[from] geom_kernel::KernelError),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}
