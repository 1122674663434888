//! PKCS#1 v1.5 signatures over text, as described in [RFC8017 § 8.2].
//!
//! The text is hashed as UTF-16 little-endian code units with no byte order
//! mark, the wide-character encoding of the verifier these signatures are
//! exchanged with. Hashing the UTF-8 bytes instead would produce signatures
//! it rejects.
//!
//! Signatures are RSASSA-PKCS1-v1_5 with SHA-256, returned as standard
//! padded base64.
//!
//! [RFC8017 § 8.2]: https://datatracker.ietf.org/doc/html/rfc8017#section-8.2

use base64ct::{Base64, Encoding};
use log::debug;
use rsa::pkcs1v15::{Signature, SigningKey, VerifyingKey};
use sha2::Sha256;
use signature::{SignatureEncoding, Signer, Verifier};

use crate::errors::{Result, SigningError, VerificationError};
use crate::RsaKeyMaterial;

/// Encodes `message` as UTF-16LE without a byte order mark.
pub fn utf16le_bytes(message: &str) -> Vec<u8> {
    message.encode_utf16().flat_map(u16::to_le_bytes).collect()
}

/// Signs `message` with the private parameters of `key`.
pub fn sign(key: &RsaKeyMaterial, message: &str) -> Result<String> {
    let private_key = key.to_rsa_private_key()?;
    let signing_key = SigningKey::<Sha256>::new(private_key);

    let signature = signing_key
        .try_sign(&utf16le_bytes(message))
        .map_err(SigningError::Signature)?;
    debug!(
        "signed {} UTF-16 code units with a {}-byte key",
        message.encode_utf16().count(),
        key.public_parameters().size()
    );

    Ok(Base64::encode_string(&signature.to_bytes()))
}

/// Checks a base64 `signature` of `message` against the public parameters
/// of `key`.
pub fn verify(key: &RsaKeyMaterial, message: &str, signature: &str) -> Result<()> {
    let signature = Base64::decode_vec(signature).map_err(|_| VerificationError::Base64)?;
    let signature =
        Signature::try_from(signature.as_slice()).map_err(VerificationError::Mismatch)?;

    let public_key = key.to_rsa_public_key().map_err(VerificationError::Rejected)?;
    let verifying_key = VerifyingKey::<Sha256>::new(public_key);
    verifying_key
        .verify(&utf16le_bytes(message), &signature)
        .map_err(VerificationError::Mismatch)?;

    Ok(())
}
