//! Response compression layer.

use tower_http::compression::CompressionLayer;

/// Gzip response bodies when the client accepts it.
pub fn build_compression_layer() -> CompressionLayer {
    CompressionLayer::new().gzip(true)
}
