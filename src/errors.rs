//! Error types.

use std::io;
use std::path::PathBuf;

/// Alias for [`core::result::Result`] with the `workitem-signer` crate [`Error`] type.
pub type Result<T> = core::result::Result<T, Error>;

/// Error types
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum Error {
    /// Reading, parsing or writing a key file failed.
    #[error("key file error")]
    KeyFile(#[from] KeyFileError),

    /// A full private export was requested for a public-only key.
    #[error("key has no private parameters to export")]
    IncompleteKey,

    /// The key cannot produce a signature.
    #[error("signing error")]
    Signing(#[from] SigningError),

    /// Generating a fresh key pair failed.
    #[error("key generation error")]
    KeyGeneration(#[from] KeyGenerationError),

    /// A signature did not verify against the public key.
    #[error("verification error")]
    Verification(#[from] VerificationError),
}

/// Failures while reading or writing the key-file format.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum KeyFileError {
    /// The file could not be read.
    #[error("failed to read {}", path.display())]
    Read {
        /// Path of the key file.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: io::Error,
    },

    /// The file could not be written.
    #[error("failed to write {}", path.display())]
    Write {
        /// Path of the key file.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: io::Error,
    },

    /// The document is not valid JSON or has the wrong shape.
    #[error("malformed key document")]
    Json(#[from] serde_json::Error),

    /// A field value is not valid base64 for its encoding.
    #[error("field `{field}` is not valid {encoding}")]
    Base64 {
        /// Name of the field as it appears in the document.
        field: &'static str,
        /// `"base64"` or `"base64url"`.
        encoding: &'static str,
    },

    /// A required field is absent.
    #[error("missing required field `{0}`")]
    MissingField(&'static str),

    /// A field decoded to zero bytes.
    #[error("field `{0}` is empty")]
    EmptyField(&'static str),

    /// Some but not all private fields are present.
    #[error("incomplete private key: field `{0}` is missing")]
    PartialPrivateKey(&'static str),

    /// A form B document declares a key type other than RSA.
    #[error("unsupported key type `{0}`")]
    KeyType(String),
}

/// Failures generating a key pair.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum KeyGenerationError {
    /// The secure random source could not be read.
    #[error("secure random source unavailable")]
    RandomSource(#[source] rand_core::Error),

    /// The primitive failed to produce a key.
    #[error("primitive failed to produce a key")]
    Primitive(#[source] rsa::Error),
}

/// Failures producing a signature.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum SigningError {
    /// The key has only public parameters.
    #[error("key has no private parameters")]
    MissingPrivateKey,

    /// The primitive rejected the key material.
    #[error("key rejected")]
    Rejected(#[from] rsa::Error),

    /// A stored CRT parameter disagrees with the value derived from D, P and Q.
    #[error("CRT parameter `{0}` is inconsistent with D, P and Q")]
    CrtMismatch(&'static str),

    /// The signature operation itself failed.
    #[error("signature operation failed")]
    Signature(#[source] signature::Error),
}

/// Failures checking a signature.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum VerificationError {
    /// The signature text is not valid padded base64.
    #[error("signature is not valid base64")]
    Base64,

    /// The public parameters are not a usable RSA public key.
    #[error("public key rejected")]
    Rejected(#[from] rsa::Error),

    /// The signature does not match the message.
    #[error("signature mismatch")]
    Mismatch(#[source] signature::Error),
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error as _;

    fn chain(err: &Error) -> String {
        let mut out = err.to_string();
        let mut source = err.source();
        while let Some(cause) = source {
            out.push_str(": ");
            out.push_str(&cause.to_string());
            source = cause.source();
        }
        out
    }

    #[test]
    fn source_chain_names_each_cause_once() {
        let err = Error::from(KeyFileError::Read {
            path: PathBuf::from("/keys/mykey.json"),
            source: io::Error::new(io::ErrorKind::NotFound, "not found"),
        });
        assert_eq!(
            chain(&err),
            "key file error: failed to read /keys/mykey.json: not found"
        );
    }

    #[test]
    fn primitive_errors_appear_once() {
        let err = Error::from(SigningError::Rejected(rsa::Error::InvalidPrime));
        let text = chain(&err);
        assert!(text.starts_with("signing error: key rejected: "));
        assert_eq!(text.matches(&rsa::Error::InvalidPrime.to_string()).count(), 1);
    }

    #[test]
    fn field_errors_carry_their_own_message() {
        let err = Error::from(KeyFileError::PartialPrivateKey("DP"));
        assert_eq!(
            chain(&err),
            "key file error: incomplete private key: field `DP` is missing"
        );
    }
}
