use hmac::{Hmac, Mac};
use sha2::Sha256;
use subtle::ConstantTimeEq;
use thiserror::Error;

type HmacSha256 = Hmac<Sha256>;

pub const SIGNATURE_HEADER: &str = "stripe-signature";

/// Maximum age of a signed timestamp, in seconds.
pub const TIMESTAMP_TOLERANCE_SECS: i64 = 300;

const FUTURE_SKEW_SECS: i64 = 60;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum SignatureError {
    #[error("missing signature header")]
    Missing,

    #[error("invalid signature header format")]
    InvalidFormat,

    #[error("invalid timestamp in signature header")]
    InvalidTimestamp,

    #[error("signature timestamp outside tolerance (age {age}s)")]
    Stale { age: i64 },

    #[error("no matching signature")]
    Mismatch,

    #[error("webhook secret cannot be used as an HMAC key")]
    InvalidSecret,
}

/// Verify a `t=<unix>,v1=<hex>` header against the raw request body.
///
/// The MAC is computed over `"<t>." || payload` exactly as received. Any of the
/// `v1` entries may match, which covers secret rotation on the provider side.
pub fn verify_signature(
    payload: &[u8],
    header: &str,
    secret: &str,
    now: i64,
) -> Result<(), SignatureError> {
    let mut timestamp = None;
    let mut candidates = Vec::new();

    for part in header.split(',') {
        let part = part.trim();
        if let Some(t) = part.strip_prefix("t=") {
            timestamp = Some(t);
        } else if let Some(s) = part.strip_prefix("v1=") {
            candidates.push(s);
        }
    }

    let timestamp_str = timestamp.ok_or(SignatureError::InvalidFormat)?;
    if candidates.is_empty() {
        return Err(SignatureError::InvalidFormat);
    }

    let timestamp: i64 = timestamp_str
        .parse()
        .map_err(|_| SignatureError::InvalidTimestamp)?;

    let age = now
        .checked_sub(timestamp)
        .ok_or(SignatureError::InvalidTimestamp)?;
    if age > TIMESTAMP_TOLERANCE_SECS || age < -FUTURE_SKEW_SECS {
        return Err(SignatureError::Stale { age });
    }

    let expected = compute(payload, timestamp_str, secret)?;
    let expected = expected.as_bytes();

    let matched = candidates.iter().any(|candidate| {
        let candidate = candidate.as_bytes();
        // Length is public: always 64 hex chars for SHA-256.
        candidate.len() == expected.len() && bool::from(candidate.ct_eq(expected))
    });

    if matched {
        Ok(())
    } else {
        Err(SignatureError::Mismatch)
    }
}

/// Build a header value the way the provider does. Used by tests and local tooling.
pub fn sign_payload(
    payload: &[u8],
    secret: &str,
    timestamp: i64,
) -> Result<String, SignatureError> {
    let timestamp = timestamp.to_string();
    let signature = compute(payload, &timestamp, secret)?;
    Ok(format!("t={timestamp},v1={signature}"))
}

fn compute(payload: &[u8], timestamp: &str, secret: &str) -> Result<String, SignatureError> {
    let mut mac = HmacSha256::new_from_slice(secret.as_bytes())
        .map_err(|_| SignatureError::InvalidSecret)?;
    mac.update(timestamp.as_bytes());
    mac.update(b".");
    mac.update(payload);
    Ok(hex::encode(mac.finalize().into_bytes()))
}

#[cfg(test)]
mod tests {
    use super::*;

    const SECRET: &str = "whsec_test_secret";
    const NOW: i64 = 1_700_000_000;

    #[test]
    fn accepts_valid_signature() {
        let payload = br#"{"type":"checkout.session.completed"}"#;
        let header = sign_payload(payload, SECRET, NOW).unwrap();
        assert_eq!(verify_signature(payload, &header, SECRET, NOW), Ok(()));
    }

    #[test]
    fn rejects_wrong_secret() {
        let payload = br#"{"type":"checkout.session.completed"}"#;
        let header = sign_payload(payload, "wrong_secret", NOW).unwrap();
        assert_eq!(
            verify_signature(payload, &header, SECRET, NOW),
            Err(SignatureError::Mismatch)
        );
    }

    #[test]
    fn rejects_reserialized_payload() {
        let original = br#"{"type": "checkout.session.completed"}"#;
        let compacted = br#"{"type":"checkout.session.completed"}"#;
        let header = sign_payload(original, SECRET, NOW).unwrap();
        assert_eq!(
            verify_signature(compacted, &header, SECRET, NOW),
            Err(SignatureError::Mismatch)
        );
    }

    #[test]
    fn signs_non_utf8_bytes_verbatim() {
        let payload = [0xff, 0xfe, b'{', b'}'];
        let header = sign_payload(&payload, SECRET, NOW).unwrap();
        assert_eq!(verify_signature(&payload, &header, SECRET, NOW), Ok(()));
    }

    #[test]
    fn any_v1_entry_may_match() {
        let payload = b"{}";
        let good = sign_payload(payload, SECRET, NOW).unwrap();
        let good_sig = good.split("v1=").nth(1).unwrap();
        let header = format!("t={NOW},v1={},v1={good_sig}", "0".repeat(64));
        assert_eq!(verify_signature(payload, &header, SECRET, NOW), Ok(()));
    }

    #[test]
    fn rejects_stale_and_future_timestamps() {
        let payload = b"{}";
        let old = sign_payload(payload, SECRET, NOW - 600).unwrap();
        assert_eq!(
            verify_signature(payload, &old, SECRET, NOW),
            Err(SignatureError::Stale { age: 600 })
        );

        let future = sign_payload(payload, SECRET, NOW + 120).unwrap();
        assert_eq!(
            verify_signature(payload, &future, SECRET, NOW),
            Err(SignatureError::Stale { age: -120 })
        );
    }

    #[test]
    fn rejects_malformed_headers() {
        let payload = b"{}";
        assert_eq!(
            verify_signature(payload, "garbage", SECRET, NOW),
            Err(SignatureError::InvalidFormat)
        );
        assert_eq!(
            verify_signature(payload, &format!("t={NOW}"), SECRET, NOW),
            Err(SignatureError::InvalidFormat)
        );
        assert_eq!(
            verify_signature(payload, "t=abc,v1=deadbeef", SECRET, NOW),
            Err(SignatureError::InvalidTimestamp)
        );
    }

    #[test]
    fn extreme_timestamps_do_not_overflow() {
        let payload = b"{}";
        let zeros = "0".repeat(64);

        let header = format!("t={},v1={zeros}", i64::MIN);
        assert_eq!(
            verify_signature(payload, &header, SECRET, NOW),
            Err(SignatureError::InvalidTimestamp)
        );

        let header = format!("t={},v1={zeros}", i64::MAX);
        assert!(matches!(
            verify_signature(payload, &header, SECRET, NOW),
            Err(SignatureError::Stale { .. })
        ));

        let header = format!("t={NOW},v1={zeros}");
        assert_eq!(
            verify_signature(payload, &header, SECRET, i64::MIN),
            Err(SignatureError::InvalidTimestamp)
        );
    }
}
