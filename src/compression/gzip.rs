//! Handler for gzip compressed data

use std::io::Read;
use flate2::read::GzDecoder;
use crate::raster::{GridError, GridResult};
use super::handler::CompressionHandler;

/// Gzip handler for `.gz` product files
pub struct GzipHandler;

impl CompressionHandler for GzipHandler {
    fn decompress(&self, data: &[u8]) -> GridResult<Vec<u8>> {
        let mut decoder = GzDecoder::new(data);
        let mut decompressed_data = Vec::new();
        match decoder.read_to_end(&mut decompressed_data) {
            Ok(_) => Ok(decompressed_data),
            Err(e) => Err(GridError::IoError(e))
        }
    }

    fn name(&self) -> &'static str {
        "gzip"
    }

    fn extension(&self) -> Option<&'static str> {
        Some("gz")
    }
}
