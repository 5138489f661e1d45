//! Password hashing utilities.

use sha2::{Digest, Sha224};

/// Compute SHA224 hash and return as lowercase hex string.
///
/// Roster entries store this digest in `password_hash`.
///
/// # Example
/// ```
/// use recauth_auth::sha224_hex;
///
/// let hash = sha224_hex("password123");
/// assert_eq!(hash.len(), 56); // SHA224 = 224 bits = 28 bytes = 56 hex chars
/// ```
#[inline]
pub fn sha224_hex(input: &str) -> String {
    let mut hasher = Sha224::new();
    hasher.update(input.as_bytes());
    hex::encode(hasher.finalize())
}

/// Verify if a hash matches a plaintext password.
#[inline]
pub fn verify_password(password: &str, hash: &str) -> bool {
    sha224_hex(password).eq_ignore_ascii_case(hash)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sha224_hex() {
        // RFC 3874 test vector
        assert_eq!(
            sha224_hex("abc"),
            "23097d223405d8228642a477bda255b32aadbce4bda0b3f7e36c9da7"
        );
    }

    #[test]
    fn test_verify_password() {
        let hash = sha224_hex("test123");
        assert!(verify_password("test123", &hash));
        assert!(verify_password("test123", &hash.to_uppercase()));
        assert!(!verify_password("wrong", &hash));
    }
}
