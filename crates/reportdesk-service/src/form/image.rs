//! Uploaded avatar images.

use bytes::Bytes;

use reportdesk_core::error::AppError;
use reportdesk_core::result::AppResult;

/// An image file picked by the user.
#[derive(Debug, Clone)]
pub struct ImageUpload {
    /// Original file name, used to build the blob key.
    pub file_name: String,
    /// File contents.
    pub data: Bytes,
}

impl ImageUpload {
    /// Create an upload from a file name and its bytes.
    pub fn new(file_name: impl Into<String>, data: impl Into<Bytes>) -> Self {
        Self {
            file_name: file_name.into(),
            data: data.into(),
        }
    }

    /// Check size and format, returning the MIME type to store it under.
    pub fn inspect(&self, max_size_bytes: u64) -> AppResult<&'static str> {
        if self.data.is_empty() {
            return Err(AppError::validation("Uploaded image is empty"));
        }
        if self.data.len() as u64 > max_size_bytes {
            return Err(AppError::validation(format!(
                "Image exceeds maximum upload size of {max_size_bytes} bytes"
            )));
        }

        let format = image::guess_format(&self.data).map_err(|_| {
            AppError::validation(format!("'{}' is not a recognised image", self.file_name))
        })?;
        Ok(format.to_mime_type())
    }
}
