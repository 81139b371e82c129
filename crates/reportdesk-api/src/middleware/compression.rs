//! Response compression layer.

use tower_http::compression::CompressionLayer;

/// Builds a gzip compression layer. Image bodies are already compressed and
/// are left alone.
pub fn build_compression_layer() -> CompressionLayer {
    CompressionLayer::new().gzip(true)
}
