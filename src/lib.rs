#![cfg_attr(docsrs, feature(doc_auto_cfg))]
#![doc = include_str!("../README.md")]
#![warn(missing_docs)]

//! # Key formats
//!
//! [`RsaKeyMaterial`] is the in-memory key: [`PublicParameters`] plus
//! optional [`PrivateParameters`], each component held as the exact
//! big-endian bytes it was read from. The two document shapes in
//! [`encoding`] are pure conversions over it:
//!
//! ```
//! use workitem_signer::{encoding::Jwk, RsaKeyMaterial};
//!
//! let key = RsaKeyMaterial::from_key_file_json(r#"{
//!   "Exponent": "AQAB",
//!   "Modulus": "APv/vw=="
//! }"#)?;
//!
//! let jwk = Jwk::from_key(&key, true)?;
//! assert_eq!(jwk.n, "APv_vw");
//! assert_eq!(RsaKeyMaterial::try_from(&jwk)?, key);
//! # Ok::<(), workitem_signer::Error>(())
//! ```
//!
//! # Signing
//!
//! [`RsaKeyMaterial::sign`] hashes the UTF-16LE form of the text; see
//! [`pkcs1v15`]. Public keys cannot sign:
//!
//! ```
//! use workitem_signer::{Error, RsaKeyMaterial};
//!
//! let key = RsaKeyMaterial::from_key_file_json(r#"{"Exponent": "AQAB", "Modulus": "xQ=="}"#)?;
//! assert!(matches!(key.sign("test"), Err(Error::Signing(_))));
//! # Ok::<(), workitem_signer::Error>(())
//! ```

pub mod encoding;
pub mod errors;
pub mod keyfile;
pub mod pkcs1v15;

mod key;
mod keyparts;

pub use rsa;

pub use crate::{
    errors::{Error, KeyFileError, KeyGenerationError, Result, SigningError, VerificationError},
    key::RsaKeyMaterial,
    keyparts::{PrivateParameters, PublicParameters},
};

/// Modulus size of generated keys, in bits.
pub const KEY_BITS: usize = 2048;

/// Public exponent of generated keys.
pub const PUBLIC_EXPONENT: u32 = 65537;
