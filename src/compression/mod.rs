//! Compression handling for product payloads
//!
//! This module implements strategies for handling different compression methods.

mod handler;
mod uncompressed;
mod gzip;
mod factory;
mod zstd;
mod tests;

pub use handler::CompressionHandler;
pub use uncompressed::UncompressedHandler;
pub use gzip::GzipHandler;
pub use factory::CompressionFactory;
pub use zstd::ZstdHandler;
