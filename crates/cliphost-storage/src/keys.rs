//! Shared key generation for storage backends.
//!
//! Keys carry 256 bits of randomness; no collision check is performed against
//! existing objects. The extension comes from a fixed media-type table and an
//! optional prefix (the aspect bucket for videos) becomes a path segment.

use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine as _;
use rand::RngCore;

use crate::traits::{StorageError, StorageResult};

const RANDOM_KEY_BYTES: usize = 32;

/// Canonical filename extension for a supported media type.
pub fn extension_for(media_type: &str) -> Option<&'static str> {
    match media_type {
        "image/jpeg" => Some("jpg"),
        "image/png" => Some("png"),
        "video/mp4" => Some("mp4"),
        _ => None,
    }
}

/// Generate a storage key for the given media type.
///
/// Produces `{random}.{ext}`, or `{prefix}/{random}.{ext}` when a prefix is
/// given (video uploads pass their aspect bucket). The random segment is 32
/// cryptographically random bytes, base64url encoded without padding.
pub fn generate_asset_key(media_type: &str, prefix: Option<&str>) -> StorageResult<String> {
    let ext = extension_for(media_type).ok_or_else(|| {
        StorageError::UnsupportedMediaType(format!(
            "no extension mapping for media type '{}'",
            media_type
        ))
    })?;

    let mut raw = [0u8; RANDOM_KEY_BYTES];
    rand::rng().fill_bytes(&mut raw);
    let segment = URL_SAFE_NO_PAD.encode(raw);

    Ok(match prefix {
        Some(prefix) => format!("{}/{}.{}", prefix, segment, ext),
        None => format!("{}.{}", segment, ext),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extension_matches_media_type() {
        assert_eq!(extension_for("image/jpeg"), Some("jpg"));
        assert_eq!(extension_for("image/png"), Some("png"));
        assert_eq!(extension_for("video/mp4"), Some("mp4"));
        assert_eq!(extension_for("image/gif"), None);
    }

    #[test]
    fn generated_keys_carry_the_canonical_extension() {
        for (media_type, ext) in [
            ("image/jpeg", ".jpg"),
            ("image/png", ".png"),
            ("video/mp4", ".mp4"),
        ] {
            let key = generate_asset_key(media_type, None).unwrap();
            assert!(key.ends_with(ext), "{} -> {}", media_type, key);
        }
    }

    #[test]
    fn prefix_becomes_a_path_segment() {
        let key = generate_asset_key("video/mp4", Some("landscape")).unwrap();
        assert!(key.starts_with("landscape/"));
        assert!(key.ends_with(".mp4"));
        assert_eq!(key.matches('/').count(), 1);
    }

    #[test]
    fn random_segment_is_url_safe_and_unpadded() {
        let key = generate_asset_key("image/png", None).unwrap();
        let segment = key.strip_suffix(".png").unwrap();
        // 32 bytes -> 43 base64 characters without padding
        assert_eq!(segment.len(), 43);
        assert!(segment
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_'));
    }

    #[test]
    fn keys_do_not_repeat() {
        let a = generate_asset_key("video/mp4", None).unwrap();
        let b = generate_asset_key("video/mp4", None).unwrap();
        assert_ne!(a, b);
    }

    #[test]
    fn unknown_media_type_is_rejected() {
        assert!(matches!(
            generate_asset_key("application/pdf", None),
            Err(StorageError::UnsupportedMediaType(_))
        ));
    }
}
