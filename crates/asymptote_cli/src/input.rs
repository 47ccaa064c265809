use std::fs;
use std::io::{self, Read};
use std::path::{Path, PathBuf};

use asymptote_logging::asy_debug;
use serde::Deserialize;
use thiserror::Error;

use crate::decode::{decode_page, DecodeError};

/// Title given to a page read from stdin without `--jsonl`.
pub const STDIN_TITLE: &str = "-";

#[derive(Debug, Error)]
pub enum InputError {
    #[error("failed to read {source_name}: {source}")]
    Read {
        source_name: String,
        #[source]
        source: io::Error,
    },
    #[error("failed to decode {source_name}: {source}")]
    Decode {
        source_name: String,
        #[source]
        source: DecodeError,
    },
    #[error("{source_name} line {line}: {source}")]
    Json {
        source_name: String,
        line: usize,
        #[source]
        source: serde_json::Error,
    },
}

/// One page of raw markup awaiting extraction.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct RawPage {
    pub title: String,
    pub text: String,
}

/// How input bytes are split into pages.
#[derive(Debug, Clone, Default)]
pub struct InputOptions {
    /// Each line is a `{"title": ..., "text": ...}` object.
    pub jsonl: bool,
    /// Encoding label used when the bytes carry no byte order mark.
    pub encoding: Option<String>,
}

/// Reads every path in order, or stdin when `paths` is empty.
pub fn read_inputs(paths: &[PathBuf], options: &InputOptions) -> Result<Vec<RawPage>, InputError> {
    if paths.is_empty() {
        let mut bytes = Vec::new();
        io::stdin()
            .read_to_end(&mut bytes)
            .map_err(|source| InputError::Read {
                source_name: "stdin".to_string(),
                source,
            })?;
        return pages_from_bytes("stdin", STDIN_TITLE, &bytes, options);
    }

    let mut pages = Vec::new();
    for path in paths {
        pages.extend(read_path(path, options)?);
    }
    Ok(pages)
}

fn read_path(path: &Path, options: &InputOptions) -> Result<Vec<RawPage>, InputError> {
    let source_name = path.display().to_string();
    let bytes = fs::read(path).map_err(|source| InputError::Read {
        source_name: source_name.clone(),
        source,
    })?;
    let title = path
        .file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
        .unwrap_or_else(|| source_name.clone());
    pages_from_bytes(&source_name, &title, &bytes, options)
}

/// Decodes `bytes` and splits them into pages.
pub fn pages_from_bytes(
    source_name: &str,
    title: &str,
    bytes: &[u8],
    options: &InputOptions,
) -> Result<Vec<RawPage>, InputError> {
    let decoded =
        decode_page(bytes, options.encoding.as_deref()).map_err(|source| InputError::Decode {
            source_name: source_name.to_string(),
            source,
        })?;
    asy_debug!(
        "Read {} bytes from {} as {}",
        bytes.len(),
        source_name,
        decoded.encoding_label
    );

    if !options.jsonl {
        return Ok(vec![RawPage {
            title: title.to_string(),
            text: decoded.text,
        }]);
    }

    decoded
        .text
        .lines()
        .enumerate()
        .filter(|(_, line)| !line.trim().is_empty())
        .map(|(index, line)| {
            serde_json::from_str(line).map_err(|source| InputError::Json {
                source_name: source_name.to_string(),
                line: index + 1,
                source,
            })
        })
        .collect()
}
