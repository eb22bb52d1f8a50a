//! Error types for the session layer.

use std::path::PathBuf;

/// Errors that can occur while reading or writing the session store.
#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    /// The store file could not be read, written, or created.
    #[error("session store I/O failed at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The store file exists but is not a JSON object of strings.
    /// Usually means it was edited by hand or truncated mid-write.
    #[error("session store at {path} is corrupt: {source}")]
    Corrupt {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}
