// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Panorama media loading.
//!
//! This module reads panorama sources (data URIs and local files), decodes
//! them to RGBA pixels suitable for display in egui, and builds data URIs
//! from uploaded bytes.

use base64::{engine::general_purpose::STANDARD, Engine as _};
use std::path::Path;
use thiserror::Error;

/// Errors that can occur while reading or decoding a panorama.
#[derive(Error, Debug)]
pub enum MediaError {
    /// I/O error while reading a local file
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// The data URI is not of the form `data:<mime>;base64,<payload>`
    #[error("malformed data URI")]
    MalformedDataUri,

    /// The base64 payload could not be decoded
    #[error("invalid base64 payload: {0}")]
    Base64(#[from] base64::DecodeError),

    /// The bytes are not a supported image
    #[error("image decode error: {0}")]
    Decode(#[from] image::ImageError),

    /// The source scheme cannot be loaded by this build
    #[error("unsupported panorama source: {scheme}")]
    UnsupportedSource {
        /// Scheme of the rejected URL
        scheme: String,
    },
}

/// A decoded panorama ready to become a texture.
pub struct LoadedImage {
    pub width: u32,
    pub height: u32,
    /// RGBA8, row-major
    pub pixels: Vec<u8>,
}

/// Build a `data:` URI carrying `bytes` as base64.
pub fn encode_data_uri(mime: &str, bytes: &[u8]) -> String {
    format!("data:{};base64,{}", mime, STANDARD.encode(bytes))
}

/// Extract the raw bytes from a base64 `data:` URI.
pub fn decode_data_uri(uri: &str) -> Result<Vec<u8>, MediaError> {
    let rest = uri.strip_prefix("data:").ok_or(MediaError::MalformedDataUri)?;
    let (header, payload) = rest.split_once(',').ok_or(MediaError::MalformedDataUri)?;
    if !header.ends_with(";base64") {
        return Err(MediaError::MalformedDataUri);
    }
    Ok(STANDARD.decode(payload.trim())?)
}

/// Read the bytes behind a panorama URL.
///
/// Supports `data:` URIs, `file://` URLs and plain filesystem paths.
/// Network URLs are rejected: there is no HTTP client in this build.
pub fn read_source(url: &str) -> Result<Vec<u8>, MediaError> {
    if url.starts_with("data:") {
        return decode_data_uri(url);
    }
    if let Some(path) = url.strip_prefix("file://") {
        return Ok(std::fs::read(path)?);
    }
    if let Some((scheme, _)) = url.split_once("://") {
        return Err(MediaError::UnsupportedSource {
            scheme: scheme.to_string(),
        });
    }
    Ok(std::fs::read(Path::new(url))?)
}

/// Decode image bytes to RGBA8.
pub fn decode_image(bytes: &[u8]) -> Result<LoadedImage, MediaError> {
    let rgba = image::load_from_memory(bytes)?.to_rgba8();
    let (width, height) = rgba.dimensions();
    Ok(LoadedImage {
        width,
        height,
        pixels: rgba.into_raw(),
    })
}

/// Read and decode the panorama behind `url`.
pub fn load_panorama(url: &str) -> Result<LoadedImage, MediaError> {
    let bytes = read_source(url)?;
    decode_image(&bytes)
}

#[cfg(test)]
pub(crate) fn tiny_png() -> Vec<u8> {
    let img = image::RgbaImage::from_pixel(4, 2, image::Rgba([10, 20, 30, 255]));
    let mut out = std::io::Cursor::new(Vec::new());
    img.write_to(&mut out, image::ImageFormat::Png)
        .expect("encode png");
    out.into_inner()
}
