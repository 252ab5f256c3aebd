//! Address string helpers.

/// Shorten a hash or address for display.
///
/// Keeps the first 6 characters and, unless `short` is set, the last 4:
/// `0x1234567890` becomes `0x1234...7890` (or `0x1234...` when short).
/// Returns `None` for empty input or strings too short to abbreviate.
pub fn shorten(hash: &str, short: bool) -> Option<String> {
    let is_word = |c: char| c.is_ascii_alphanumeric() || c == '_';
    if hash.len() < 10 || !hash.chars().all(is_word) {
        return None;
    }

    let head = &hash[..6];
    if short {
        Some(format!("{head}..."))
    } else {
        Some(format!("{head}...{}", &hash[hash.len() - 4..]))
    }
}

/// Symbol used in prize pool URLs, e.g. `DAI-0xebfb47`.
pub fn prize_pool_symbol(token_symbol: &str, address: &str) -> String {
    let prefix: String = address.chars().take(8).collect();
    format!("{}-{prefix}", token_symbol.to_uppercase())
}

/// Case-insensitive address comparison.
#[inline]
pub fn same_address(a: &str, b: &str) -> bool {
    a.eq_ignore_ascii_case(b)
}
