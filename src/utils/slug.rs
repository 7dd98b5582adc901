//! Slug generation for short links.
//!
//! Slugs are derived from a nanosecond wall-clock timestamp encoded in
//! base62 and truncated to 7 characters. A single process observes each
//! nanosecond tick at most once, so consecutive slugs are unique in
//! practice; there is no cross-process guarantee. The `urls.slug` unique
//! constraint is the authoritative uniqueness check — callers retry
//! generation when the insert conflicts.

use std::time::{SystemTime, UNIX_EPOCH};

/// 62-character alphabet: lowercase, uppercase, digits.
const ALPHABET: &[u8; 62] = b"abcdefghijklmnopqrstuvwxyzABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789";

/// Maximum slug length produced by the generator. The storage column holds
/// 10 characters, leaving headroom for user-chosen slugs.
pub const SLUG_LENGTH: usize = 7;

/// Generates a slug from the current wall-clock time.
pub fn generate() -> String {
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_nanos())
        .unwrap_or_default();

    from_nanos(nanos)
}

/// Encodes a nanosecond timestamp as a base62 slug.
///
/// Digits come out least-significant first; the accumulated string is
/// truncated to the first [`SLUG_LENGTH`] characters, which keeps the low
/// (fastest-moving) digits of the timestamp.
pub fn from_nanos(mut value: u128) -> String {
    let mut slug = String::new();

    while value > 0 {
        slug.push(ALPHABET[(value % 62) as usize] as char);
        value /= 62;

        if slug.len() == SLUG_LENGTH {
            break;
        }
    }

    slug
}

/// Returns true when `slug` is non-empty and entirely ASCII alphanumeric.
///
/// Used both on the public resolution path (malformed slugs short-circuit
/// to a miss without a store query) and to validate owner-chosen slugs.
pub fn is_well_formed(slug: &str) -> bool {
    !slug.is_empty() && slug.chars().all(|c| c.is_ascii_alphanumeric())
}
