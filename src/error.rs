use std::io;
use std::path::PathBuf;

use thiserror::Error;

pub type Result<T, E = Error> = std::result::Result<T, E>;

#[derive(Debug, Error)]
pub enum Error {
    #[error("failed to write rendered value")]
    Write(#[from] io::Error),

    #[error("failed to read config file {}", path.display())]
    ConfigRead {
        path: PathBuf,
        #[source]
        error: io::Error,
    },

    #[error("invalid config file {}", path.display())]
    ConfigParse {
        path: PathBuf,
        #[source]
        error: serde_json::Error,
    },

    #[error("failed to read input {name}")]
    InputRead {
        name: String,
        #[source]
        error: io::Error,
    },

    #[error("failed to fetch {url}")]
    InputFetch {
        url: String,
        #[source]
        error: reqwest::Error,
    },

    #[error("failed to decompress zstd input")]
    Decompress(#[source] io::Error),

    #[error("input is not valid JSON")]
    Json(#[from] serde_json::Error),
}
