//! Blob key construction and validation.
//!
//! Avatars uploaded with a new record are stored under
//! `avatars/<file name>`; replacements during an edit go to
//! `avatars/<record id>-<file name>`. Two new records whose images share a
//! file name therefore share a blob, and the later upload wins.

use reportdesk_core::error::AppError;
use reportdesk_core::result::AppResult;

/// Key prefix for avatar images.
pub const AVATAR_PREFIX: &str = "avatars";

const FALLBACK_FILE_NAME: &str = "image";

/// Key for an avatar uploaded together with a new record.
pub fn new_avatar_key(file_name: &str) -> String {
    format!("{AVATAR_PREFIX}/{}", sanitize_file_name(file_name))
}

/// Key for a replacement avatar uploaded while editing record `record_id`.
pub fn edit_avatar_key(record_id: &str, file_name: &str) -> String {
    format!(
        "{AVATAR_PREFIX}/{}-{}",
        sanitize_file_name(record_id),
        sanitize_file_name(file_name)
    )
}

/// Reduce a client-supplied file name to a single safe path segment.
///
/// Directory components are dropped and anything other than letters,
/// digits, `.`, `-` and `_` becomes `_`.
pub fn sanitize_file_name(name: &str) -> String {
    let base = name.rsplit(['/', '\\']).next().unwrap_or(name).trim();
    let cleaned: String = base
        .chars()
        .map(|c| {
            if c.is_alphanumeric() || matches!(c, '.' | '-' | '_') {
                c
            } else {
                '_'
            }
        })
        .collect();
    let cleaned = cleaned.trim_start_matches('.');

    if cleaned.is_empty() {
        FALLBACK_FILE_NAME.to_string()
    } else {
        cleaned.to_string()
    }
}

/// Reject keys that could escape a store's namespace.
pub fn validate_key(key: &str) -> AppResult<()> {
    if key.is_empty() {
        return Err(AppError::validation("Blob key must not be empty"));
    }
    if key.starts_with('/') || key.contains('\\') || key.chars().any(char::is_control) {
        return Err(AppError::validation(format!("Invalid blob key '{key}'")));
    }
    if key
        .split('/')
        .any(|segment| segment.is_empty() || segment == "." || segment == "..")
    {
        return Err(AppError::validation(format!("Invalid blob key '{key}'")));
    }
    Ok(())
}
