use geom_kernel::KernelError;

/// Fatal modeling errors. Any of these aborts the current part build;
/// no partial output is produced and nothing is retried.
#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    #[error("part definition has no features")]
    EmptyDefinition,

    #[error("the first feature must add the base solid before any cuts")]
    MissingBaseSolid,

    #[error("additive feature '{name}' is not supported; only cubes add material")]
    UnsupportedAdditive { name: &'static str },

    #[error("kernel error: {0}")]
    Kernel(#[from] KernelError),
}
