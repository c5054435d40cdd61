use thiserror::Error;

/// Failure of one of the two inputs of a load cycle.
/// The inner error keeps the loader's full context chain.
#[derive(Error, Debug)]
pub enum LoadError {
    #[error("failed to load boundary features: {0:#}")]
    Geometry(anyhow::Error),

    #[error("failed to load election results: {0:#}")]
    Records(anyhow::Error),
}
