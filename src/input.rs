use std::fs;
use std::io::{self, Read};
use std::path::PathBuf;

use serde_json::Value;
use tracing::debug;

use crate::error::{Error, Result};

const ZSTD_MAGIC: [u8; 4] = [0x28, 0xB5, 0x2F, 0xFD];

/// Where a document to render comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Source {
    Stdin,
    File(PathBuf),
    Url(String),
}

impl Source {
    /// `-` or nothing is stdin, `http(s)://` is a URL, anything else a path.
    pub fn parse(arg: Option<&str>) -> Self {
        match arg {
            None | Some("-") => Source::Stdin,
            Some(url) if url.starts_with("http://") || url.starts_with("https://") => {
                Source::Url(url.to_string())
            }
            Some(path) => Source::File(PathBuf::from(path)),
        }
    }

    pub fn read(&self) -> Result<Vec<u8>> {
        match self {
            Source::Stdin => {
                let mut bytes = Vec::new();
                io::stdin()
                    .read_to_end(&mut bytes)
                    .map_err(|error| Error::InputRead {
                        name: "<stdin>".to_string(),
                        error,
                    })?;
                Ok(bytes)
            }
            Source::File(path) => fs::read(path).map_err(|error| Error::InputRead {
                name: path.display().to_string(),
                error,
            }),
            Source::Url(url) => fetch(url),
        }
    }
}

fn fetch(url: &str) -> Result<Vec<u8>> {
    let fetch_error = |error| Error::InputFetch {
        url: url.to_string(),
        error,
    };

    debug!(url, "fetching document");
    let response = reqwest::blocking::get(url)
        .and_then(|response| response.error_for_status())
        .map_err(fetch_error)?;
    let bytes = response.bytes().map_err(fetch_error)?;
    Ok(bytes.to_vec())
}

/// Decompresses zstd frames, passing anything else through untouched.
pub fn decompress(bytes: Vec<u8>) -> Result<Vec<u8>> {
    if !bytes.starts_with(&ZSTD_MAGIC) {
        return Ok(bytes);
    }
    debug!(compressed = bytes.len(), "decompressing zstd input");
    zstd::stream::decode_all(bytes.as_slice()).map_err(Error::Decompress)
}

/// Reads, decompresses and parses a JSON document.
pub fn load(source: &Source) -> Result<Value> {
    let bytes = decompress(source.read()?)?;
    Ok(serde_json::from_slice(&bytes)?)
}
