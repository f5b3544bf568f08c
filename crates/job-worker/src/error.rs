/// Worker-side failures.
///
/// Transport errors are the recoverable class: polling continues and
/// uploads retry with bounded backoff. Build and export errors are fatal
/// for the job, which transitions to FAILED instead of being retried.
#[derive(Debug, thiserror::Error)]
pub enum WorkerError {
    #[error("transport error: {0}")]
    Transport(#[from] Box<ureq::Error>),

    #[error("configuration error: {reason}")]
    Config { reason: String },

    #[error("malformed server reply: {reason}")]
    Protocol { reason: String },

    #[error(transparent)]
    Definition(#[from] part_types::DefinitionError),

    #[error("build failed: {0}")]
    Build(#[from] construction_engine::EngineError),

    #[error("export failed: {0}")]
    Export(#[from] part_export::ExportError),

    #[error("artifact upload failed after {attempts} attempts: {reason}")]
    UploadExhausted { attempts: u32, reason: String },

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl From<ureq::Error> for WorkerError {
    fn from(e: ureq::Error) -> Self {
        WorkerError::Transport(Box::new(e))
    }
}
