use serde::Serialize;

/// Symbols used for random site-name suffixes.
pub const HEX_ALPHABET: &[u8; 16] = b"0123456789abcdef";

/// Candidate hostname and the result of its availability probe.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SiteNameCandidate {
    /// Candidate site name.
    pub value: String,
    /// Whether the control plane reported the name as free.
    pub available: bool,
}

/// Appends one hex symbol per random byte to `base`.
///
/// 256 is a multiple of 16, so taking the low nibble keeps the draw uniform.
#[must_use]
pub fn compose_site_name(base: &str, random_bytes: &[u8]) -> String {
    let mut name = String::with_capacity(base.len() + random_bytes.len());
    name.push_str(base);
    for byte in random_bytes {
        name.push(char::from(HEX_ALPHABET[usize::from(byte & 0x0f)]));
    }

    name
}
