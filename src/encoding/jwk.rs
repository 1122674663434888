use base64ct::{Base64UrlUnpadded, Encoding};
use serde::{Deserialize, Serialize};

use super::{decode_field, RawFields};
use crate::errors::{Error, KeyFileError, Result};
use crate::RsaKeyMaterial;

const KEY_TYPE: &str = "RSA";

/// RSA members of a JSON Web Key ([RFC 7518 § 6.3]), base64url without
/// padding. Other JWK members are ignored on input and never written.
///
/// [RFC 7518 § 6.3]: https://datatracker.ietf.org/doc/html/rfc7518#section-6.3
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Jwk {
    /// Key type, always `"RSA"`.
    pub kty: String,
    /// Modulus.
    pub n: String,
    /// Public exponent.
    pub e: String,
    /// Private exponent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub d: Option<String>,
    /// First prime factor.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub p: Option<String>,
    /// Second prime factor.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub q: Option<String>,
    /// D mod (P-1).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dp: Option<String>,
    /// D mod (Q-1).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dq: Option<String>,
    /// Q^-1 mod P.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub qi: Option<String>,
}

impl Jwk {
    /// Encodes `key`, omitting the private members when `public_only` is set.
    pub fn from_key(key: &RsaKeyMaterial, public_only: bool) -> Result<Self> {
        let public = key.public_parameters();
        let mut jwk = Self {
            kty: KEY_TYPE.into(),
            n: Base64UrlUnpadded::encode_string(public.modulus()),
            e: Base64UrlUnpadded::encode_string(public.exponent()),
            d: None,
            p: None,
            q: None,
            dp: None,
            dq: None,
            qi: None,
        };
        if public_only {
            return Ok(jwk);
        }

        let private = key.private_parameters().ok_or(Error::IncompleteKey)?;
        jwk.d = Some(Base64UrlUnpadded::encode_string(private.d()));
        jwk.p = Some(Base64UrlUnpadded::encode_string(private.p()));
        jwk.q = Some(Base64UrlUnpadded::encode_string(private.q()));
        jwk.dp = Some(Base64UrlUnpadded::encode_string(private.dp()));
        jwk.dq = Some(Base64UrlUnpadded::encode_string(private.dq()));
        jwk.qi = Some(Base64UrlUnpadded::encode_string(private.inverse_q()));
        Ok(jwk)
    }

    /// Parses JWK JSON text.
    pub fn from_json(json: &str) -> core::result::Result<Self, KeyFileError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Serializes as JSON indented by two spaces.
    pub fn to_json(&self) -> core::result::Result<String, KeyFileError> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

impl TryFrom<&Jwk> for RsaKeyMaterial {
    type Error = KeyFileError;

    fn try_from(jwk: &Jwk) -> core::result::Result<Self, KeyFileError> {
        const ENCODING: &str = "base64url";

        if jwk.kty != KEY_TYPE {
            return Err(KeyFileError::KeyType(jwk.kty.clone()));
        }

        RawFields {
            modulus: decode_field::<Base64UrlUnpadded>("n", ENCODING, Some(jwk.n.as_str()))?,
            exponent: decode_field::<Base64UrlUnpadded>("e", ENCODING, Some(jwk.e.as_str()))?,
            d: decode_field::<Base64UrlUnpadded>("d", ENCODING, jwk.d.as_deref())?,
            p: decode_field::<Base64UrlUnpadded>("p", ENCODING, jwk.p.as_deref())?,
            q: decode_field::<Base64UrlUnpadded>("q", ENCODING, jwk.q.as_deref())?,
            dp: decode_field::<Base64UrlUnpadded>("dp", ENCODING, jwk.dp.as_deref())?,
            dq: decode_field::<Base64UrlUnpadded>("dq", ENCODING, jwk.dq.as_deref())?,
            inverse_q: decode_field::<Base64UrlUnpadded>("qi", ENCODING, jwk.qi.as_deref())?,
        }
        .into_key()
    }
}
