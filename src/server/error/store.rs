use thiserror::Error;

/// Failures reading or writing a JSON collection file.
#[derive(Error, Debug)]
pub enum StoreError {
    /// The collection file or its directory could not be read or written.
    #[error("Failed to access collection {collection}: {source}")]
    Io {
        /// File name of the collection
        collection: &'static str,
        #[source]
        source: std::io::Error,
    },

    /// The collection file does not contain the expected JSON shape.
    #[error("Failed to (de)serialize collection {collection}: {source}")]
    Serde {
        /// File name of the collection
        collection: &'static str,
        #[source]
        source: serde_json::Error,
    },
}
