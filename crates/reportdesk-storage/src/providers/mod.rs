//! Blob store provider implementations.

pub mod firebase;
pub mod local;
pub mod memory;

pub use firebase::FirebaseBlobStore;
pub use local::LocalBlobStore;
pub use memory::MemoryBlobStore;

/// Guess an image MIME type from a key's extension.
pub(crate) fn mime_from_key(key: &str) -> Option<String> {
    let (_, ext) = key.rsplit_once('.')?;
    let mime = match ext.to_ascii_lowercase().as_str() {
        "png" => "image/png",
        "jpg" | "jpeg" => "image/jpeg",
        "gif" => "image/gif",
        "svg" => "image/svg+xml",
        "webp" => "image/webp",
        "bmp" => "image/bmp",
        "ico" => "image/x-icon",
        "tif" | "tiff" => "image/tiff",
        _ => return None,
    };
    Some(mime.to_string())
}

/// Join a public base URL and a blob key.
pub(crate) fn public_url(base: &str, key: &str) -> String {
    format!("{}/{}", base.trim_end_matches('/'), key.trim_start_matches('/'))
}
