use std::path::PathBuf;

use thiserror::Error;

/// Failure to obtain one of the two datasets. Fatal to the dashboard.
#[derive(Error, Debug)]
pub enum LoadError {
    #[error("failed to read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to fetch {url}: {message}")]
    Http { url: String, message: String },

    #[error("usage and pricing data can't both be read from stdin")]
    SharedStdin,
}
