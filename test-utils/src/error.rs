use thiserror::Error;

/// Errors that can occur while preparing a test environment.
#[derive(Error, Debug)]
pub enum TestError {
    /// Failed to create the temporary directory or read/write a collection file.
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// A collection file did not contain the JSON shape the factory expected.
    #[error(transparent)]
    Json(#[from] serde_json::Error),

    /// A collection file had valid JSON but the wrong top-level shape.
    #[error("Collection {0} has an unexpected shape")]
    UnexpectedShape(String),
}
