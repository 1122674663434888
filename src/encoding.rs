//! Key document formats.
//!
//! Two JSON shapes carry the same key material:
//!
//! - [`RsaParameters`]: PascalCase field names (`Modulus`, `Exponent`, `D`,
//!   `DP`, `DQ`, `InverseQ`, `P`, `Q`) with standard padded base64 values.
//!   This is the key-file format read and written on disk.
//! - [`Jwk`]: JOSE field names (`n`, `e`, `d`, `dp`, `dq`, `qi`, `p`, `q`)
//!   with unpadded base64url values.
//!
//! Both convert losslessly to and from [`RsaKeyMaterial`]: the bytes under
//! each field are carried over untouched, only the alphabet and padding
//! differ.

mod jwk;
mod rsa_parameters;

pub use self::{jwk::Jwk, rsa_parameters::RsaParameters};

use base64ct::Encoding;

use crate::errors::KeyFileError;
use crate::keyparts::{PrivateParameters, PublicParameters};
use crate::RsaKeyMaterial;

/// Decoded fields of either document shape, before the completeness checks.
///
/// Each slot holds the document's field name alongside the value.
struct RawFields {
    modulus: (&'static str, Option<Vec<u8>>),
    exponent: (&'static str, Option<Vec<u8>>),
    d: (&'static str, Option<Vec<u8>>),
    p: (&'static str, Option<Vec<u8>>),
    q: (&'static str, Option<Vec<u8>>),
    dp: (&'static str, Option<Vec<u8>>),
    dq: (&'static str, Option<Vec<u8>>),
    inverse_q: (&'static str, Option<Vec<u8>>),
}

impl RawFields {
    fn into_key(self) -> Result<RsaKeyMaterial, KeyFileError> {
        let modulus = required(self.modulus)?;
        let exponent = required(self.exponent)?;
        let public = PublicParameters::new(modulus, exponent);

        let private = [
            &self.d,
            &self.p,
            &self.q,
            &self.dp,
            &self.dq,
            &self.inverse_q,
        ];
        if private.iter().all(|(_, value)| value.is_none()) {
            return Ok(RsaKeyMaterial::from_parts(public, None));
        }
        if let Some((name, _)) = private.iter().find(|(_, value)| value.is_none()) {
            return Err(KeyFileError::PartialPrivateKey(*name));
        }

        let private = PrivateParameters::new(
            required(self.d)?,
            required(self.p)?,
            required(self.q)?,
            required(self.dp)?,
            required(self.dq)?,
            required(self.inverse_q)?,
        );
        Ok(RsaKeyMaterial::from_parts(public, Some(private)))
    }
}

fn required((name, value): (&'static str, Option<Vec<u8>>)) -> Result<Vec<u8>, KeyFileError> {
    match value {
        None => Err(KeyFileError::MissingField(name)),
        Some(bytes) if bytes.is_empty() => Err(KeyFileError::EmptyField(name)),
        Some(bytes) => Ok(bytes),
    }
}

/// Decodes an optional field with the alphabet `E`.
fn decode_field<E: Encoding>(
    name: &'static str,
    encoding: &'static str,
    value: Option<&str>,
) -> Result<(&'static str, Option<Vec<u8>>), KeyFileError> {
    let bytes = value
        .map(|value| {
            E::decode_vec(value).map_err(|_| KeyFileError::Base64 {
                field: name,
                encoding,
            })
        })
        .transpose()?;
    Ok((name, bytes))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fields(modulus: Option<Vec<u8>>, d: Option<Vec<u8>>) -> RawFields {
        RawFields {
            modulus: ("Modulus", modulus),
            exponent: ("Exponent", Some(vec![1, 0, 1])),
            d: ("D", d),
            p: ("P", None),
            q: ("Q", None),
            dp: ("DP", None),
            dq: ("DQ", None),
            inverse_q: ("InverseQ", None),
        }
    }

    #[test]
    fn public_only_fields_build_a_public_key() {
        let key = fields(Some(vec![0xc5]), None).into_key().unwrap();
        assert!(!key.has_private());
    }

    #[test]
    fn names_the_missing_public_field() {
        assert!(matches!(
            fields(None, None).into_key(),
            Err(KeyFileError::MissingField("Modulus"))
        ));
        assert!(matches!(
            fields(Some(vec![]), None).into_key(),
            Err(KeyFileError::EmptyField("Modulus"))
        ));
    }

    #[test]
    fn names_the_first_missing_private_field() {
        assert!(matches!(
            fields(Some(vec![0xc5]), Some(vec![3])).into_key(),
            Err(KeyFileError::PartialPrivateKey("P"))
        ));
    }
}
