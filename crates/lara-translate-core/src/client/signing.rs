//! Request signing for the Lara API.
//!
//! Every authenticated request carries an `Authorization` header of the form:
//!
//! ```text
//! Lara <AccessKeyId>:<Signature>
//! ```
//!
//! Where `Signature = Base64(HMAC-SHA256(AccessKeySecret, Challenge))` and:
//!
//! ```text
//! Challenge = METHOD + "\n" +
//!             PATH + "\n" +
//!             Content-MD5 + "\n" +
//!             Content-Type + "\n" +
//!             Date
//! ```
//!
//! `Content-MD5` is the hex MD5 digest of the serialized request body, or the
//! empty string when there is no body.

use base64::Engine;
use base64::engine::general_purpose::STANDARD as BASE64;
use chrono::Utc;
use hmac::{Hmac, Mac};
use sha2::Sha256;

type HmacSha256 = Hmac<Sha256>;

/// Current time as an RFC 7231 HTTP-date, e.g. `Wed, 01 Jan 2025 00:00:00 GMT`.
pub fn http_date() -> String {
    Utc::now().format("%a, %d %b %Y %H:%M:%S GMT").to_string()
}

/// Hex MD5 digest of a byte slice.
pub fn md5_hex(data: &[u8]) -> String {
    format!("{:x}", md5::compute(data))
}

/// Assemble the canonical challenge string for signing.
pub fn build_challenge(
    method: &str,
    path: &str,
    content_md5: &str,
    content_type: &str,
    date: &str,
) -> String {
    format!("{method}\n{path}\n{content_md5}\n{content_type}\n{date}")
}

/// Compute the base64 HMAC-SHA256 signature of a challenge.
#[allow(clippy::expect_used)]
pub fn sign(access_key_secret: &str, challenge: &str) -> String {
    // HMAC accepts keys of any length, so this cannot fail
    let mut mac = HmacSha256::new_from_slice(access_key_secret.as_bytes())
        .expect("HMAC accepts keys of any length");
    mac.update(challenge.as_bytes());
    BASE64.encode(mac.finalize().into_bytes())
}

/// Build the `Authorization` header value.
pub fn authorization(access_key_id: &str, signature: &str) -> String {
    format!("Lara {access_key_id}:{signature}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sign_is_deterministic() {
        let challenge = build_challenge("POST", "/translate", "abc", "application/json", "date");
        assert_eq!(sign("secret", &challenge), sign("secret", &challenge));
    }

    #[test]
    fn test_sign_differs_by_secret() {
        let challenge = build_challenge("POST", "/translate", "abc", "application/json", "date");
        assert_ne!(sign("secret-a", &challenge), sign("secret-b", &challenge));
    }

    #[test]
    fn test_sign_differs_by_challenge() {
        assert_ne!(
            sign("secret", "GET\n/a\n\napplication/json\nd"),
            sign("secret", "GET\n/b\n\napplication/json\nd")
        );
    }

    #[test]
    fn test_signature_is_valid_base64() {
        let sig = sign("secret", "challenge");
        // SHA-256 output is 32 bytes, base64 encodes to 44 chars with padding
        assert_eq!(sig.len(), 44);
        assert!(BASE64.decode(&sig).is_ok());
    }

    #[test]
    fn test_challenge_layout() {
        let challenge = build_challenge(
            "GET",
            "/documents/123",
            "",
            "application/json",
            "Wed, 01 Jan 2025 00:00:00 GMT",
        );
        assert_eq!(
            challenge,
            "GET\n/documents/123\n\napplication/json\nWed, 01 Jan 2025 00:00:00 GMT"
        );
    }

    #[test]
    fn test_md5_hex_known_values() {
        assert_eq!(md5_hex(b""), "d41d8cd98f00b204e9800998ecf8427e");
        assert_eq!(md5_hex(b"hello"), "5d41402abc4b2a76b9719d911017c592");
    }

    #[test]
    fn test_http_date_format() {
        let date = http_date();
        // "Wed, 01 Jan 2025 00:00:00 GMT"
        assert!(date.ends_with(" GMT"));
        assert_eq!(date.len(), 29);
        assert_eq!(&date[3..5], ", ");
    }

    #[test]
    fn test_authorization_format() {
        assert_eq!(authorization("AKID", "c2ln"), "Lara AKID:c2ln");
    }
}
