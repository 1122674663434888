//! Signing and verification with the fixture key.

use base64ct::{Base64, Encoding};
use hex_literal::hex;
use rsa::Pkcs1v15Sign;
use sha2::{Digest, Sha256};
use workitem_signer::{
    pkcs1v15::utf16le_bytes, Error, RsaKeyMaterial, SigningError, VerificationError,
};

const KEY: &str = include_str!("examples/rsa2048-key.json");
const PUBLIC_KEY: &str = include_str!("examples/rsa2048-pub.json");
const PADDED_KEY: &str = include_str!("examples/rsa2048-key-padded.json");

const SIGNATURES: &[(&str, &str)] = &[
    (
        "test",
        "ekslefTzUqZPasLBrKDS5ymWHYOb+iljYHd1Jf28cMX1M21/K5ZbaxJXLbv9MGRLYUW6qgZEKNAPTOasTBldKuLi0lDvP+EYv1DcBK7XRu1w6zWISz1omxn9xIw8wWKpWhKuzc2bH8ovO6pa26esGdcghtnek1zGRlH0422iRSAMa+yFeIoolQx72NB/66mrU/Wv0oVRKSbgxnaoztGjvUUVQ0HKHxh+8vgk5ia13u4548cSOf7yJ0Ey9z4q0G/zxEYEisgCMYNjBopTSM7KFPpPoiWPJME1MuBfzX7m9wYvpDeko8F6w++ieM/FEUy/dcRqmICm0bv0rG2WvYpXEQ==",
    ),
    (
        "MyNickname.MyActivity+prod",
        "Wck9bO39BgNRIGM9+gbGrT2cjME3pcSb2HHEBxKnCRWncKd42kzoYQVvHLkDVlgNSGmMHlwUwQmbN3gJiNzl9tpg40Z0duERNuDWfBofRHWtMeRZ36cXKxFZvoEWyaYpcVmiM6hDgy81/LZxPF3sr+7V6RE28+10bJruybpJdWl0yS3ShFbeN62P1pXUFE2FOUOfSwnTM3tLj3z+z1jDk3bUCNy7vajEyKcwU5mHoANGKOUDvnfhx1jSl8/hK/3JAPzvCDtjCRLe+5HmD1rFa7mfyPHpZUD0wRAzXhxHYrJwEQbEvb1mB/P4s1SqHT3tVRV4hr8kd0GDeXzJaZWTCA==",
    ),
    (
        "héllo wörld ✓",
        "pXEeN0jDa3hgBCU57QtPxxz+BThuvK7//yTjlf3mqtjwix063CmK0oUvjBIgZgNG5oqMw88fJdVK7T8jqYhXMJhJqRMiJz0K6oYo3TFL/lbXQptMzByumoG2IaLZd/YK36ZlCXJCcDQDdTBXR2kS8l9IJYdwQlDzFg0BcS9VILm37clEMw2FDYALCwOUYsJPIbt3FUgQUUh9VCbdNy6mU79l5zj2yXbXLo8LOgH3q3jVTwiDNnP9dZf4OtAmKuyUv8EHCnoRDm3EqFocNqoAIGQcmLsMffbnYqNCI9ATGb9KXRrrILJE7/GKAhfngQTJFGPjlRrXNhDbV08FKZqTNQ==",
    ),
];

fn key() -> RsaKeyMaterial {
    RsaKeyMaterial::from_key_file_json(KEY).unwrap()
}

#[test]
fn known_answer_signatures() {
    let key = key();
    for (message, expected) in SIGNATURES {
        assert_eq!(&key.sign(message).unwrap(), expected, "message {message:?}");
    }
}

#[test]
fn signing_is_deterministic() {
    let key = key();
    let first = key.sign("MyNickname.MyActivity+prod").unwrap();
    let second = key.sign("MyNickname.MyActivity+prod").unwrap();

    assert_eq!(first, second);
    assert!(key.verify("MyNickname.MyActivity+prod", &first).is_ok());
    assert!(key.verify("MyNickname.MyActivity+prod", &second).is_ok());
}

#[test]
fn padded_fields_sign_the_same() {
    let padded = RsaKeyMaterial::from_key_file_json(PADDED_KEY).unwrap();
    assert_eq!(padded.sign("test").unwrap(), SIGNATURES[0].1);
}

#[test]
fn signature_is_padded_standard_base64() {
    let signature = key().sign("test").unwrap();

    assert_eq!(signature.len(), 344);
    assert!(signature.ends_with('='));
    assert_eq!(Base64::decode_vec(&signature).unwrap().len(), 256);
}

#[test]
fn public_key_verifies_but_cannot_sign() {
    let public = RsaKeyMaterial::from_key_file_json(PUBLIC_KEY).unwrap();

    for (message, signature) in SIGNATURES {
        assert!(public.verify(message, signature).is_ok());
    }
    assert!(matches!(
        public.sign("test"),
        Err(Error::Signing(SigningError::MissingPrivateKey))
    ));
}

#[test]
fn tampered_message_fails_verification() {
    let public = RsaKeyMaterial::from_key_file_json(PUBLIC_KEY).unwrap();
    let (_, signature) = SIGNATURES[0];

    assert!(matches!(
        public.verify("Test", signature),
        Err(Error::Verification(VerificationError::Mismatch(_)))
    ));
    assert!(matches!(
        public.verify("test", "not base64!"),
        Err(Error::Verification(VerificationError::Base64))
    ));
    assert!(matches!(
        public.verify("test", "AQID"),
        Err(Error::Verification(_))
    ));
}

#[test]
fn hashes_utf16le_text() {
    let bytes = utf16le_bytes("test");
    assert_eq!(bytes, hex!("7400 6500 7300 7400"));

    let digest = Sha256::digest(&bytes);
    assert_eq!(
        digest[..],
        hex!("fe520676b1a1d93dabab2319eea03674f3632eaeeb163d1e88244f5eb1de10eb")
    );

    let key = key();
    let prehashed = key
        .to_rsa_private_key()
        .unwrap()
        .sign(Pkcs1v15Sign::new::<Sha256>(), &digest)
        .unwrap();
    assert_eq!(Base64::encode_string(&prehashed), key.sign("test").unwrap());
}

#[test]
fn mismatched_crt_parameters_are_rejected() {
    let dq = key().private_parameters().unwrap().dq().to_vec();
    let params = workitem_signer::encoding::RsaParameters::from_json(KEY).unwrap();
    let params = workitem_signer::encoding::RsaParameters {
        dp: Some(Base64::encode_string(&dq)),
        ..params
    };
    let key = RsaKeyMaterial::try_from(&params).unwrap();

    assert!(matches!(
        key.sign("test"),
        Err(Error::Signing(SigningError::CrtMismatch("DP")))
    ));
}
