//! Handler for zstd compressed product files

use log::debug;
use crate::raster::{GridError, GridResult};
use super::handler::CompressionHandler;

/// Zstandard handler for `.zst` product files
pub struct ZstdHandler;

impl CompressionHandler for ZstdHandler {
    fn decompress(&self, data: &[u8]) -> GridResult<Vec<u8>> {
        // A zero-length file is an empty payload, not a truncated frame
        if data.is_empty() {
            return Ok(Vec::new());
        }
        let payload = zstd::decode_all(data)
            .map_err(|e| GridError::GenericError(format!("Corrupt zstd payload: {}", e)))?;
        debug!("zstd: {} -> {} bytes", data.len(), payload.len());
        Ok(payload)
    }

    fn name(&self) -> &'static str {
        "zstd"
    }

    fn extension(&self) -> Option<&'static str> {
        Some("zst")
    }
}
