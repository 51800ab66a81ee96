//! Factory for creating compression handlers

use std::path::Path;
use crate::raster::{GridError, GridResult};
use super::handler::CompressionHandler;
use super::uncompressed::UncompressedHandler;
use super::gzip::GzipHandler;
use super::zstd::ZstdHandler;

/// Factory for creating compression handlers
pub struct CompressionFactory;

impl CompressionFactory {
    /// Get a handler by name ("none", "gzip", "zstd")
    pub fn get_handler_by_name(name: &str) -> GridResult<Box<dyn CompressionHandler>> {
        match name.to_lowercase().as_str() {
            "uncompressed" | "none" | "raw" => Ok(Box::new(UncompressedHandler)),
            "gzip" | "gz" => Ok(Box::new(GzipHandler)),
            "zstd" | "zst" => Ok(Box::new(ZstdHandler)),
            _ => Err(GridError::UnsupportedCompression(name.to_string()))
        }
    }

    /// Pick a handler from the file extension, falling back to uncompressed
    pub fn handler_for_path(path: &str) -> Box<dyn CompressionHandler> {
        let extension = Path::new(path)
            .extension()
            .map(|ext| ext.to_string_lossy().to_lowercase())
            .unwrap_or_default();

        Self::get_available_handlers()
            .into_iter()
            .find(|h| h.extension() == Some(extension.as_str()))
            .unwrap_or_else(|| Box::new(UncompressedHandler))
    }

    /// Get all available compression handlers
    pub fn get_available_handlers() -> Vec<Box<dyn CompressionHandler>> {
        vec![
            Box::new(UncompressedHandler),
            Box::new(GzipHandler),
            Box::new(ZstdHandler)
        ]
    }
}
