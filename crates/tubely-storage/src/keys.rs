//! Asset key generation shared by every storage backend.
//!
//! Key format: `[<orientation>/]<random>.<ext>`. The random part is 32 bytes from the
//! thread-local CSPRNG, so keys are never checked for collisions.

use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine as _};
use rand::RngCore;
use std::fmt::{Display, Formatter, Result as FmtResult};
use tubely_core::models::Orientation;

/// Number of random bytes in every key
pub const KEY_RANDOM_BYTES: usize = 32;

/// A storage key for one published asset
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct AssetKey(String);

impl AssetKey {
    /// Build a key from caller-supplied randomness. Deterministic for a given input.
    pub fn from_random(
        random: &[u8; KEY_RANDOM_BYTES],
        extension: &str,
        orientation: Option<Orientation>,
    ) -> Self {
        let prefix = orientation.map(|o| o.key_prefix()).unwrap_or("");
        AssetKey(format!(
            "{}{}.{}",
            prefix,
            URL_SAFE_NO_PAD.encode(random),
            extension
        ))
    }

    /// Build a key from fresh CSPRNG bytes
    pub fn generate(extension: &str, orientation: Option<Orientation>) -> Self {
        let mut random = [0u8; KEY_RANDOM_BYTES];
        rand::rng().fill_bytes(&mut random);
        Self::from_random(&random, extension, orientation)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Display for AssetKey {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for AssetKey {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// File extension for a validated content type: the subtype with parameters stripped.
///
/// `image/png` → `png`, `image/jpg` → `jpg`, `video/mp4; codecs=avc1` → `mp4`.
/// Returns `None` when the subtype is empty or contains characters unsafe in a key.
pub fn extension_for_content_type(content_type: &str) -> Option<String> {
    let essence = content_type.split(';').next()?.trim();
    let (_, subtype) = essence.split_once('/')?;
    let subtype = subtype.trim().to_lowercase();
    if subtype.is_empty()
        || !subtype
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '.' || c == '+')
    {
        return None;
    }
    Some(subtype)
}

/// Join a base URL and a key with exactly one slash between them
pub fn join_url(base: &str, key: &str) -> String {
    format!(
        "{}/{}",
        base.trim_end_matches('/'),
        key.trim_start_matches('/')
    )
}
