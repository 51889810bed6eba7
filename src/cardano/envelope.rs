//! Signed transaction text envelopes.
//!
//! `transaction sign` writes a JSON envelope whose `cborHex` field holds the
//! signed transaction. Submission needs the raw bytes.

use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;

/// Errors reading a signed envelope.
#[derive(Debug, Error)]
pub enum EnvelopeError {
    #[error("Failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Malformed envelope {path}: {source}")]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Invalid cborHex in {path}: {source}")]
    Hex {
        path: PathBuf,
        #[source]
        source: hex::FromHexError,
    },
}

#[derive(Debug, Deserialize)]
struct TextEnvelope {
    #[serde(rename = "cborHex")]
    cbor_hex: String,
}

/// Read the envelope at `path` and decode its `cborHex` payload.
pub async fn read_signed_cbor(path: &Path) -> Result<Vec<u8>, EnvelopeError> {
    let content = tokio::fs::read(path).await.map_err(|source| EnvelopeError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    decode_envelope(path, &content)
}

fn decode_envelope(path: &Path, content: &[u8]) -> Result<Vec<u8>, EnvelopeError> {
    let envelope: TextEnvelope =
        serde_json::from_slice(content).map_err(|source| EnvelopeError::Json {
            path: path.to_path_buf(),
            source,
        })?;

    hex::decode(envelope.cbor_hex.trim()).map_err(|source| EnvelopeError::Hex {
        path: path.to_path_buf(),
        source,
    })
}

/// Write the decoded bytes next to the envelope as `<file>.bin`.
pub async fn write_raw_file(signed_file: &Path, cbor: &[u8]) -> Result<PathBuf, EnvelopeError> {
    let mut raw = signed_file.as_os_str().to_owned();
    raw.push(".bin");
    let raw = PathBuf::from(raw);

    tokio::fs::write(&raw, cbor)
        .await
        .map_err(|source| EnvelopeError::Io {
            path: raw.clone(),
            source,
        })?;
    Ok(raw)
}
