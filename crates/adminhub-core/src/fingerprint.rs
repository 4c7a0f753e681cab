//! Fixed-width token fingerprinting.
//!
//! Cache and blacklist entries are keyed by a 16-hex-char MD5 fingerprint
//! of the raw token text. MD5 is chosen for the fixed key length and cheap
//! equality, not for secrecy; tokens are already unguessable by signature.

/// Returns the middle 16 hex characters of the MD5 digest of `input`.
pub fn md5_16(input: &str) -> String {
    let digest = format!("{:x}", md5::compute(input.as_bytes()));
    digest[8..24].to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_digest() {
        // md5("") = d41d8cd98f00b204e9800998ecf8427e
        assert_eq!(md5_16(""), "8f00b204e9800998");
    }

    #[test]
    fn fixed_width_hex() {
        let fp = md5_16("eyJhbGciOiJIUzI1NiJ9.some.token");
        assert_eq!(fp.len(), 16);
        assert!(fp.chars().all(|c| c.is_ascii_hexdigit()));
    }

    #[test]
    fn stable_and_distinct() {
        assert_eq!(md5_16("token-a"), md5_16("token-a"));
        assert_ne!(md5_16("token-a"), md5_16("token-b"));
    }

    #[test]
    fn numeric_ids_fingerprint() {
        // user ids are fingerprinted through their decimal representation
        assert_eq!(md5_16(&1001i64.to_string()), md5_16("1001"));
    }
}
