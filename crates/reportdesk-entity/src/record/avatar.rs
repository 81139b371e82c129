//! Placeholder avatar used when a record is submitted without an image.

use base64::Engine;
use base64::engine::general_purpose::STANDARD;

/// A filled user-circle icon (512x512 view box).
pub const PLACEHOLDER_AVATAR_SVG: &str = concat!(
    r#"<svg stroke="currentColor" fill="currentColor" stroke-width="0" viewBox="0 0 512 512" "#,
    r#"height="1em" width="1em" xmlns="http://www.w3.org/2000/svg">"#,
    r#"<path d="M399 384.2C376.9 345.8 335.4 320 288 320H224c-47.4 0-88.9 25.8-111 64.2c35.2 "#,
    r#"39.2 86.2 63.8 143 63.8s107.8-24.7 143-63.8zM0 256a256 256 0 1 1 512 0A256 256 0 1 1 "#,
    r#"0 256zm256 16a72 72 0 1 0 0-144 72 72 0 1 0 0 144z"></path></svg>"#
);

const DATA_URL_PREFIX: &str = "data:image/svg+xml;base64,";

/// The placeholder as a self-contained `data:` URL. Always the same value.
pub fn placeholder_avatar_url() -> String {
    format!("{DATA_URL_PREFIX}{}", STANDARD.encode(PLACEHOLDER_AVATAR_SVG))
}

/// Whether an avatar URL is the inline placeholder rather than a blob.
pub fn is_placeholder(avatar_url: &str) -> bool {
    avatar_url == placeholder_avatar_url()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_placeholder_is_deterministic_svg_data_url() {
        let a = placeholder_avatar_url();
        assert_eq!(a, placeholder_avatar_url());
        assert!(a.starts_with("data:image/svg+xml;base64,"));

        let decoded = STANDARD
            .decode(a.trim_start_matches(DATA_URL_PREFIX))
            .expect("valid base64");
        assert_eq!(decoded, PLACEHOLDER_AVATAR_SVG.as_bytes());
        assert!(is_placeholder(&a));
        assert!(!is_placeholder("https://example.com/a.png"));
    }
}
