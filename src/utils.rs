use base64::{engine::general_purpose, Engine as _};
use rand::Rng;

pub fn random_id() -> String {
    hex::encode(rand::rng().random::<[u8; 8]>())
}

/// Meeting code in the form the backend mints: 4 random bytes, upper-case hex.
pub fn meeting_code() -> String {
    hex::encode_upper(rand::rng().random::<[u8; 4]>())
}

/// First two characters of an identity, upper-cased, for the tile placeholder.
pub fn initials(identity: &str) -> String {
    identity.chars().take(2).collect::<String>().to_uppercase()
}

// Codes are case-insensitive for people typing them in.
pub fn normalize_code(code: &str) -> String {
    code.trim().to_uppercase()
}

/// Inline `data:` URL, as a browser file reader would produce it.
pub fn data_url(mime: &str, bytes: &[u8]) -> String {
    let mime = if mime.is_empty() {
        "application/octet-stream"
    } else {
        mime
    };
    format!("data:{};base64,{}", mime, general_purpose::STANDARD.encode(bytes))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn initials_handle_short_and_wide_names() {
        assert_eq!(initials("alice"), "AL");
        assert_eq!(initials("q"), "Q");
        assert_eq!(initials("éva"), "ÉV");
        assert_eq!(initials(""), "");
    }

    #[test]
    fn codes_are_eight_upper_hex_digits() {
        let code = meeting_code();
        assert_eq!(code.len(), 8);
        assert!(code.chars().all(|c| c.is_ascii_digit() || ('A'..='F').contains(&c)));
        assert_eq!(normalize_code("  ab12cd34 "), "AB12CD34");
    }

    #[test]
    fn data_url_defaults_mime() {
        assert_eq!(data_url("text/plain", b"hi"), "data:text/plain;base64,aGk=");
        assert_eq!(data_url("", b""), "data:application/octet-stream;base64,");
    }
}
