#[derive(thiserror::Error, Debug)]
pub enum ReadError {
    #[error("not found")]
    NotFound,
    #[error(transparent)]
    Storage(#[from] StorageError),
    #[error(transparent)]
    Other(#[from] Box<dyn std::error::Error>),
}

#[derive(thiserror::Error, Debug)]
pub enum UpdateError {
    #[error("conflict")]
    Conflict,
    #[error(transparent)]
    Storage(#[from] StorageError),
    #[error(transparent)]
    Other(#[from] Box<dyn std::error::Error>),
}

#[derive(thiserror::Error, Debug)]
pub enum StorageError {
    #[error("no connection")]
    NoConnection,
    #[error("no session")]
    NoSession,
    #[error(transparent)]
    Other(#[from] Box<dyn std::error::Error>),
}

/// Errors that abort a whole generation run.
///
/// Failures of individual plan days are not represented here. They are logged and counted in the
/// [`GenerationReport`](crate::GenerationReport) instead.
#[derive(thiserror::Error, Debug)]
pub enum GenerationError {
    #[error("failed to fetch catalog: {0}")]
    Catalog(#[from] ReadError),
    #[error("no workout template or exercise available")]
    NoCandidateAvailable,
}
