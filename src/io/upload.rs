// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Upload validation.
//!
//! Files picked by the user are checked here before anything reaches the
//! project store. Accepted files are turned into `data:` URIs so the store
//! never holds a reference to the local filesystem.

use super::media::encode_data_uri;
use std::path::Path;
use thiserror::Error;

/// Default upper bound for uploads (10 MiB).
pub const DEFAULT_MAX_UPLOAD_BYTES: u64 = 10 * 1024 * 1024;

/// Reasons an upload is refused. The messages are shown to the user as-is.
#[derive(Error, Debug)]
pub enum UploadError {
    #[error("Please upload an image file")]
    NotAnImage,

    #[error("File size must be less than {}", size_label(.limit))]
    TooLarge { size: u64, limit: u64 },

    #[error("Could not read file: {0}")]
    Io(#[from] std::io::Error),
}

/// Human-readable byte count: whole or one-decimal MB, then KB, then bytes.
fn size_label(bytes: &u64) -> String {
    const KB: u64 = 1024;
    const MB: u64 = 1024 * KB;
    let bytes = *bytes;
    if bytes >= MB {
        if bytes % MB == 0 {
            format!("{}MB", bytes / MB)
        } else {
            format!("{:.1}MB", bytes as f64 / MB as f64)
        }
    } else if bytes >= KB {
        if bytes % KB == 0 {
            format!("{}KB", bytes / KB)
        } else {
            format!("{:.1}KB", bytes as f64 / KB as f64)
        }
    } else {
        format!("{} bytes", bytes)
    }
}

/// Check that `bytes` hold an image no larger than `limit`, returning its
/// MIME type.
pub fn validate(bytes: &[u8], limit: u64) -> Result<&'static str, UploadError> {
    let size = bytes.len() as u64;
    if size > limit {
        return Err(UploadError::TooLarge { size, limit });
    }
    let format = image::guess_format(bytes).map_err(|_| UploadError::NotAnImage)?;
    Ok(format.to_mime_type())
}

/// Validate uploaded bytes and encode them as a data URI.
pub fn encode_upload(bytes: &[u8], limit: u64) -> Result<String, UploadError> {
    let mime = validate(bytes, limit)?;
    Ok(encode_data_uri(mime, bytes))
}

/// Read, validate and encode a file from disk.
///
/// The size is checked from metadata first so oversize files are rejected
/// without being read.
pub fn prepare_file(path: &Path, limit: u64) -> Result<String, UploadError> {
    let size = std::fs::metadata(path)?.len();
    if size > limit {
        return Err(UploadError::TooLarge { size, limit });
    }
    let bytes = std::fs::read(path)?;
    encode_upload(&bytes, limit)
}
