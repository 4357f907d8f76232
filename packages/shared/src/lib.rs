// Shared helpers for the identity contracts on CosmWasm

/// Default page size for list queries
pub const DEFAULT_LIMIT: u32 = 10;
/// Upper bound on page size for list queries
pub const MAX_LIMIT: u32 = 30;

/// Check whether something expiring at `expires_at` is still live at `height`.
/// Expiry is exclusive: at `height == expires_at` it is already expired.
pub fn is_live(height: u64, expires_at: u64) -> bool {
    height < expires_at
}

/// Check that `value` is ASCII text no longer than `max_len` bytes.
/// Tab, newline and carriage return are the only control bytes allowed.
pub fn is_bounded_ascii(value: &str, max_len: u32) -> bool {
    value.len() <= max_len as usize
        && value
            .bytes()
            .all(|b| b.is_ascii() && (!b.is_ascii_control() || matches!(b, b'\t' | b'\n' | b'\r')))
}

/// Resolve an optional page size against the default and the cap
pub fn clamp_limit(limit: Option<u32>) -> usize {
    limit.unwrap_or(DEFAULT_LIMIT).min(MAX_LIMIT) as usize
}
