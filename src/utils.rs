/// Utility functions and helpers

const FNV_OFFSET_BASIS: u64 = 0xcbf2_9ce4_8422_2325;
const FNV_PRIME: u64 = 0x0000_0100_0000_01b3;

/// FNV-1a 64-bit hash of a string.
///
/// Used wherever the scraper needs a stable numeric id derived from a
/// string (offline user ids, synthetic profile ids). FNV-1a is fixed and
/// language-independent, so identical inputs hash identically across
/// builds and platforms.
pub fn fnv1a_64(input: &str) -> u64 {
    let mut hash = FNV_OFFSET_BASIS;
    for byte in input.as_bytes() {
        hash ^= u64::from(*byte);
        hash = hash.wrapping_mul(FNV_PRIME);
    }
    hash
}

/// Get current UTC timestamp in compact form for output filenames
pub fn current_timestamp_slug() -> String {
    chrono::Utc::now().format("%Y%m%dT%H%M%SZ").to_string()
}

/// Sanitize filename for filesystem
pub fn sanitize_filename(filename: &str) -> String {
    let invalid_chars = ['<', '>', ':', '"', '|', '?', '*', '/', '\\'];
    let mut sanitized = filename.to_string();

    for &ch in &invalid_chars {
        sanitized = sanitized.replace(ch, "_");
    }

    if sanitized.len() > 255 {
        sanitized.truncate(255);
    }

    sanitized
}
