use base64ct::{Base64, Encoding};
use serde::{Deserialize, Serialize};

use super::{decode_field, RawFields};
use crate::errors::{Error, KeyFileError, Result};
use crate::RsaKeyMaterial;

/// The key-file document: PascalCase field names, standard padded base64.
///
/// Field declaration order is the serialization order. A public-only
/// document serializes as `Exponent`, `Modulus`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RsaParameters {
    /// Private exponent.
    #[serde(rename = "D", default, skip_serializing_if = "Option::is_none")]
    pub d: Option<String>,

    /// D mod (P-1).
    #[serde(rename = "DP", default, skip_serializing_if = "Option::is_none")]
    pub dp: Option<String>,

    /// D mod (Q-1).
    #[serde(rename = "DQ", default, skip_serializing_if = "Option::is_none")]
    pub dq: Option<String>,

    /// Public exponent.
    #[serde(rename = "Exponent", default, skip_serializing_if = "Option::is_none")]
    pub exponent: Option<String>,

    /// Q^-1 mod P.
    #[serde(rename = "InverseQ", default, skip_serializing_if = "Option::is_none")]
    pub inverse_q: Option<String>,

    /// Modulus.
    #[serde(rename = "Modulus", default, skip_serializing_if = "Option::is_none")]
    pub modulus: Option<String>,

    /// First prime factor.
    #[serde(rename = "P", default, skip_serializing_if = "Option::is_none")]
    pub p: Option<String>,

    /// Second prime factor.
    #[serde(rename = "Q", default, skip_serializing_if = "Option::is_none")]
    pub q: Option<String>,
}

impl RsaParameters {
    /// Encodes `key`. With `public_only` only `Exponent` and `Modulus` are
    /// filled in; otherwise the key must carry its private parameters.
    pub fn from_key(key: &RsaKeyMaterial, public_only: bool) -> Result<Self> {
        let public = key.public_parameters();
        let mut params = Self {
            exponent: Some(Base64::encode_string(public.exponent())),
            modulus: Some(Base64::encode_string(public.modulus())),
            ..Self::default()
        };
        if public_only {
            return Ok(params);
        }

        let private = key.private_parameters().ok_or(Error::IncompleteKey)?;
        params.d = Some(Base64::encode_string(private.d()));
        params.dp = Some(Base64::encode_string(private.dp()));
        params.dq = Some(Base64::encode_string(private.dq()));
        params.inverse_q = Some(Base64::encode_string(private.inverse_q()));
        params.p = Some(Base64::encode_string(private.p()));
        params.q = Some(Base64::encode_string(private.q()));
        Ok(params)
    }

    /// Parses the JSON text of a key file.
    pub fn from_json(json: &str) -> core::result::Result<Self, KeyFileError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Serializes as JSON indented by two spaces, without a trailing newline.
    pub fn to_json(&self) -> core::result::Result<String, KeyFileError> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

impl TryFrom<&RsaParameters> for RsaKeyMaterial {
    type Error = KeyFileError;

    fn try_from(params: &RsaParameters) -> core::result::Result<Self, KeyFileError> {
        const ENCODING: &str = "base64";

        RawFields {
            modulus: decode_field::<Base64>("Modulus", ENCODING, params.modulus.as_deref())?,
            exponent: decode_field::<Base64>("Exponent", ENCODING, params.exponent.as_deref())?,
            d: decode_field::<Base64>("D", ENCODING, params.d.as_deref())?,
            p: decode_field::<Base64>("P", ENCODING, params.p.as_deref())?,
            q: decode_field::<Base64>("Q", ENCODING, params.q.as_deref())?,
            dp: decode_field::<Base64>("DP", ENCODING, params.dp.as_deref())?,
            dq: decode_field::<Base64>("DQ", ENCODING, params.dq.as_deref())?,
            inverse_q: decode_field::<Base64>("InverseQ", ENCODING, params.inverse_q.as_deref())?,
        }
        .into_key()
    }
}
