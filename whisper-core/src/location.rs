//! Escaping of free-text locations for the request path.
//!
//! Only spaces and commas are escaped; the provider resolves everything else
//! (e.g. `"Conway,,, Arkansas"` becomes `"Conway, AR, United States"`).

/// Escape spaces and commas; every other character passes through.
pub fn encode_location(location: &str) -> String {
    let mut out = String::with_capacity(location.len());
    for ch in location.chars() {
        match ch {
            ' ' => out.push_str("%20"),
            ',' => out.push_str("%2C"),
            other => out.push(other),
        }
    }
    out
}

/// Reverse [`encode_location`].
///
/// Lossy for input that already contained a literal `%20` or `%2C`: those
/// decode to a space or comma too, e.g. `"Apt 100%20, Main St"` comes back as
/// `"Apt 100 , Main St"`.
pub fn decode_location(encoded: &str) -> String {
    encoded.replace("%20", " ").replace("%2C", ",")
}
