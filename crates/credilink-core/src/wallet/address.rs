//! Address display helpers.

/// Shortens an address to `0x1234...abcd`.
///
/// Strings too short to shorten are returned unchanged.
pub fn truncate_address(address: &str) -> String {
    let chars: Vec<char> = address.chars().collect();
    if chars.len() <= 10 {
        return address.to_string();
    }
    let head: String = chars[..6].iter().collect();
    let tail: String = chars[chars.len() - 4..].iter().collect();
    format!("{}...{}", head, tail)
}

/// Display form of an address, preferring its resolved name.
pub fn format_address(address: &str, ens_name: Option<&str>) -> String {
    match ens_name {
        Some(name) if !name.is_empty() => name.to_string(),
        _ => truncate_address(address),
    }
}
