//! STL encoding, part export and read-back summaries

mod stl;

pub use stl::{StlFormat, StlSummary, export_parts, to_stl_ascii, to_stl_binary, write_stl};

use std::path::PathBuf;

/// Generic I/O and format‑conversion errors.
#[derive(Debug, thiserror::Error)]
pub enum IoError {
    #[error("std::io::Error: {0}")]
    StdIo(#[from] std::io::Error),

    /// An I/O failure tied to a specific file
    #[error("{action} {}: {source}", path.display())]
    File {
        action: &'static str,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("could not parse parameters: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Input is malformed: {0}")]
    MalformedInput(String),
}
