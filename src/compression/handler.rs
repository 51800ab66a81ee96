//! Compression handler trait definition

use crate::raster::GridResult;

/// Strategy trait for handling different payload compressions
pub trait CompressionHandler: Send + Sync {
    /// Decompress the data
    fn decompress(&self, data: &[u8]) -> GridResult<Vec<u8>>;

    /// Get the name of this compression method
    fn name(&self) -> &'static str;

    /// File extension that marks payloads in this format, if any
    fn extension(&self) -> Option<&'static str>;
}
