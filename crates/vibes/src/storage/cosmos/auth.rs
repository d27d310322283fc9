//! Master-key request signing for the Cosmos DB REST API.

use base64::{engine::general_purpose::STANDARD, Engine};
use chrono::{DateTime, Utc};
use hmac::{digest::InvalidLength, Hmac, Mac};
use sha2::Sha256;

/// Keyed HMAC-SHA256 state, cloned for every signature.
pub type Signer = Hmac<Sha256>;

/// Decodes a base64 account key.
pub fn decode_key(key: &str) -> Result<Vec<u8>, base64::DecodeError> {
    STANDARD.decode(key.trim())
}

/// Builds the request signer for a decoded account key.
pub fn signer(key: &[u8]) -> Result<Signer, InvalidLength> {
    Signer::new_from_slice(key)
}

/// Formats an instant as an RFC 1123 date, the form `x-ms-date` expects.
pub fn format_request_date(at: DateTime<Utc>) -> String {
    at.format("%a, %d %b %Y %H:%M:%S GMT").to_string()
}

/// Computes the base64 HMAC-SHA256 signature of a request.
///
/// The signed payload is the lowercase verb, lowercase resource type,
/// resource link, and lowercase date, each followed by a newline, plus a
/// trailing empty line.
pub fn signature(
    signer: &Signer,
    verb: &str,
    resource_type: &str,
    resource_link: &str,
    date: &str,
) -> String {
    let payload = format!(
        "{}\n{}\n{}\n{}\n\n",
        verb.to_lowercase(),
        resource_type.to_lowercase(),
        resource_link,
        date.to_lowercase()
    );
    let mut mac = signer.clone();
    mac.update(payload.as_bytes());
    STANDARD.encode(mac.finalize().into_bytes())
}

/// Builds the url-encoded `authorization` header value.
pub fn authorization_token(
    signer: &Signer,
    verb: &str,
    resource_type: &str,
    resource_link: &str,
    date: &str,
) -> String {
    let sig = signature(signer, verb, resource_type, resource_link, date);
    urlencoding::encode(&format!("type=master&ver=1.0&sig={}", sig)).into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    const KEY: &str = "dsZQi3KtZmCv1ljt3VNWNm7sQUF1y5rJfC6kv5JiwvW0EndXdDku/dkKBp8/ufDToSxL";
    const DATE: &str = "Thu, 27 Apr 2017 00:51:12 GMT";

    #[test]
    fn test_format_request_date() {
        let at = Utc.with_ymd_and_hms(2017, 4, 27, 0, 51, 12).unwrap();
        assert_eq!(format_request_date(at), DATE);
    }

    #[test]
    fn test_signature_matches_known_vector() {
        let key = signer(&decode_key(KEY).unwrap()).unwrap();
        assert_eq!(
            signature(&key, "GET", "dbs", "dbs/ToDoList", DATE),
            "KvBM8vONofkv3yKm/8zD9MEGlbu6jjHDJBp4E9c2ZZI="
        );
    }

    #[test]
    fn test_signature_is_case_insensitive_in_verb_type_and_date() {
        let key = signer(&decode_key(KEY).unwrap()).unwrap();
        assert_eq!(
            signature(&key, "POST", "DOCS", "dbs/vibes/colls/items", DATE),
            signature(
                &key,
                "post",
                "docs",
                "dbs/vibes/colls/items",
                &DATE.to_lowercase()
            )
        );
        assert_eq!(
            signature(&key, "post", "docs", "dbs/vibes/colls/items", DATE),
            "BJ6IKIW9Z3lILz0qPPpJUXhkHEaZVHsCN+Tl+yuJseg="
        );
    }

    #[test]
    fn test_authorization_token_is_url_encoded() {
        let key = signer(&decode_key(KEY).unwrap()).unwrap();
        assert_eq!(
            authorization_token(&key, "GET", "dbs", "dbs/ToDoList", DATE),
            "type%3Dmaster%26ver%3D1.0%26sig%3DKvBM8vONofkv3yKm%2F8zD9MEGlbu6jjHDJBp4E9c2ZZI%3D"
        );
    }

    #[test]
    fn test_signer_is_reusable_across_requests() {
        let key = signer(&decode_key(KEY).unwrap()).unwrap();
        let first = signature(&key, "GET", "dbs", "dbs/ToDoList", DATE);
        let second = signature(&key, "GET", "dbs", "dbs/ToDoList", DATE);
        assert_eq!(first, second);
        assert_eq!(first, "KvBM8vONofkv3yKm/8zD9MEGlbu6jjHDJBp4E9c2ZZI=");
    }

    #[test]
    fn test_signer_accepts_any_key_length() {
        assert!(signer(&[]).is_ok());
        assert!(signer(&[7u8; 200]).is_ok());
    }

    #[test]
    fn test_decode_key_rejects_garbage() {
        assert!(decode_key("not base64!!").is_err());
    }
}
