//! Handler for uncompressed data

use crate::raster::GridResult;
use super::handler::CompressionHandler;

/// Pass-through handler for raw payloads
pub struct UncompressedHandler;

impl CompressionHandler for UncompressedHandler {
    fn decompress(&self, data: &[u8]) -> GridResult<Vec<u8>> {
        Ok(data.to_vec())
    }

    fn name(&self) -> &'static str {
        "none"
    }

    fn extension(&self) -> Option<&'static str> {
        None
    }
}
