use serde_json::json;
use super::*;

const NOW_TS: i64 = 1_700_000_000;

fn now() -> OffsetDateTime {
    OffsetDateTime::from_unix_timestamp(NOW_TS).expect("valid timestamp")
}

fn make_token(payload: &serde_json::Value) -> String {
    let header = URL_SAFE_NO_PAD.encode(br#"{"alg":"HS256","typ":"JWT"}"#);
    let payload = URL_SAFE_NO_PAD.encode(payload.to_string());
    format!("{header}.{payload}.fake-signature")
}

#[test]
fn decode_claims_reads_exp() {
    let token = make_token(&json!({"exp": 1234, "user_id": 7}));
    let claims = decode_claims(&token).expect("decoding failed");
    assert_eq!(claims.exp, Some(1234.0));
}

#[test]
fn decode_claims_without_signature_segment() {
    let token = make_token(&json!({"exp": 1234}));
    let token = token.rsplit_once('.').expect("has segments").0;
    let claims = decode_claims(token).expect("decoding failed");
    assert_eq!(claims.exp, Some(1234.0));
}

#[test]
fn decode_claims_no_payload_segment() {
    let err = decode_claims("just-one-segment").expect_err("should fail");
    assert!(
        matches!(err, AccessTokenDecodeError::PayloadMissing),
        "wrong error type: {err:#?}",
    );
}

#[test]
fn decode_claims_payload_not_base64() {
    let err = decode_claims("header.???.signature").expect_err("should fail");
    assert!(
        matches!(err, AccessTokenDecodeError::Base64(_)),
        "wrong error type: {err:#?}",
    );
}

#[test]
fn decode_claims_payload_not_json() {
    let payload = URL_SAFE_NO_PAD.encode(b"not json at all");
    let err = decode_claims(&format!("header.{payload}.signature"))
        .expect_err("should fail");
    assert!(
        matches!(err, AccessTokenDecodeError::PayloadParse(_)),
        "wrong error type: {err:#?}",
    );
}

#[test]
fn token_expiring_within_leeway_is_expired() {
    let token = make_token(&json!({"exp": NOW_TS + 59}));
    assert!(is_expired_at(&token, now()));
}

#[test]
fn token_expiring_exactly_at_leeway_is_expired() {
    let token = make_token(&json!({"exp": NOW_TS + 60}));
    assert!(is_expired_at(&token, now()));
}

#[test]
fn token_expiring_past_leeway_is_valid() {
    let token = make_token(&json!({"exp": NOW_TS + 61}));
    assert!(!is_expired_at(&token, now()));
}

#[test]
fn long_lived_token_is_valid() {
    let token = make_token(&json!({"exp": NOW_TS + 3600}));
    assert!(!is_expired_at(&token, now()));
}

#[test]
fn token_expired_in_the_past() {
    let token = make_token(&json!({"exp": NOW_TS - 1}));
    assert!(is_expired_at(&token, now()));
}

#[test]
fn token_without_exp_is_expired() {
    let token = make_token(&json!({"user_id": 7}));
    assert!(is_expired_at(&token, now()));
}

#[test]
fn undecodable_token_is_expired() {
    assert!(is_expired_at("garbage", now()));
    assert!(is_expired_at("", now()));
    assert!(is_expired_at("a.b.c", now()));
}

#[test]
fn is_expired_uses_the_wall_clock() {
    let future = OffsetDateTime::now_utc().unix_timestamp() + 3600;
    assert!(!is_expired(&make_token(&json!({"exp": future}))));
    assert!(is_expired(&make_token(&json!({"exp": 1000}))));
}
