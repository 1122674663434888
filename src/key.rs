use std::path::Path;

use log::debug;
use num_bigint::BigUint;
use rand_core::{CryptoRngCore, OsRng, RngCore};
use rsa::traits::{PrivateKeyParts, PublicKeyParts};
use rsa::{RsaPrivateKey, RsaPublicKey};

use crate::encoding::{Jwk, RsaParameters};
use crate::errors::{KeyGenerationError, Result, SigningError};
use crate::keyparts::{PrivateParameters, PublicParameters};
use crate::{keyfile, pkcs1v15, KEY_BITS, PUBLIC_EXPONENT};

/// An RSA key pair, or a public key on its own.
///
/// The private parameters are either all present or all absent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RsaKeyMaterial {
    public: PublicParameters,
    private: Option<PrivateParameters>,
}

impl RsaKeyMaterial {
    pub(crate) fn from_parts(public: PublicParameters, private: Option<PrivateParameters>) -> Self {
        Self { public, private }
    }

    /// Generate a new 2048-bit key pair from the operating system's random
    /// source.
    pub fn generate() -> Result<Self> {
        // OsRng panics on failure once handed to the primitive, so probe it first.
        let mut probe = [0u8; 32];
        OsRng
            .try_fill_bytes(&mut probe)
            .map_err(KeyGenerationError::RandomSource)?;

        Self::generate_with_rng(&mut OsRng)
    }

    /// Generate a new 2048-bit key pair using `rng`.
    pub fn generate_with_rng<R: CryptoRngCore + ?Sized>(rng: &mut R) -> Result<Self> {
        let exp = BigUint::from(PUBLIC_EXPONENT);
        let private_key = RsaPrivateKey::new_with_exp(rng, KEY_BITS, &exp)
            .map_err(KeyGenerationError::Primitive)?;
        let key = Self::try_from(&private_key).map_err(KeyGenerationError::Primitive)?;
        debug!("generated {}-bit RSA key pair", KEY_BITS);
        Ok(key)
    }

    /// Returns the public parameters.
    pub fn public_parameters(&self) -> &PublicParameters {
        &self.public
    }

    /// Returns the private parameters, if this is a key pair.
    pub fn private_parameters(&self) -> Option<&PrivateParameters> {
        self.private.as_ref()
    }

    /// Returns `true` if the private parameters are present.
    pub fn has_private(&self) -> bool {
        self.private.is_some()
    }

    /// Returns a copy of this key without its private parameters.
    pub fn public_key(&self) -> Self {
        Self {
            public: self.public.clone(),
            private: None,
        }
    }

    /// Converts the public parameters into the primitive's public key.
    pub fn to_rsa_public_key(&self) -> rsa::Result<RsaPublicKey> {
        RsaPublicKey::new(
            BigUint::from_bytes_be(self.public.modulus()),
            BigUint::from_bytes_be(self.public.exponent()),
        )
    }

    /// Converts the key pair into the primitive's private key.
    ///
    /// The stored CRT parameters must agree with D, P and Q, and the key
    /// must pass the primitive's consistency checks.
    pub fn to_rsa_private_key(&self) -> core::result::Result<RsaPrivateKey, SigningError> {
        let private = self
            .private
            .as_ref()
            .ok_or(SigningError::MissingPrivateKey)?;
        private.check_crt()?;

        let key = RsaPrivateKey::from_components(
            BigUint::from_bytes_be(self.public.modulus()),
            BigUint::from_bytes_be(self.public.exponent()),
            BigUint::from_bytes_be(private.d()),
            vec![
                BigUint::from_bytes_be(private.p()),
                BigUint::from_bytes_be(private.q()),
            ],
        )?;
        key.validate()?;

        Ok(key)
    }
}

/// Key documents, key files and signatures.
impl RsaKeyMaterial {
    /// Reads a key file in the [`RsaParameters`] format.
    pub fn read_key_file(path: impl AsRef<Path>) -> Result<Self> {
        keyfile::read_key_file(path)
    }

    /// Atomically writes this key to `path` in the [`RsaParameters`] format.
    pub fn write_key_file(&self, path: impl AsRef<Path>, public_only: bool) -> Result<()> {
        keyfile::write_key_file(self, path, public_only)
    }

    /// Atomically writes this key to `path` as a [`Jwk`].
    pub fn write_jwk_file(&self, path: impl AsRef<Path>, public_only: bool) -> Result<()> {
        keyfile::write_jwk_file(self, path, public_only)
    }

    /// Parses [`RsaParameters`] JSON text.
    pub fn from_key_file_json(json: &str) -> Result<Self> {
        let params = RsaParameters::from_json(json)?;
        Ok(Self::try_from(&params)?)
    }

    /// Serializes as [`RsaParameters`] JSON text.
    ///
    /// Fails with [`Error::IncompleteKey`](crate::Error::IncompleteKey) if
    /// `public_only` is false and this is a public key.
    pub fn to_key_file_json(&self, public_only: bool) -> Result<String> {
        Ok(RsaParameters::from_key(self, public_only)?.to_json()?)
    }

    /// Parses [`Jwk`] JSON text.
    pub fn from_jwk_json(json: &str) -> Result<Self> {
        let jwk = Jwk::from_json(json)?;
        Ok(Self::try_from(&jwk)?)
    }

    /// Serializes as [`Jwk`] JSON text.
    pub fn to_jwk_json(&self, public_only: bool) -> Result<String> {
        Ok(Jwk::from_key(self, public_only)?.to_json()?)
    }

    /// Signs `message`. See [`pkcs1v15::sign`].
    pub fn sign(&self, message: &str) -> Result<String> {
        pkcs1v15::sign(self, message)
    }

    /// Verifies a signature made by [`RsaKeyMaterial::sign`]. See
    /// [`pkcs1v15::verify`].
    pub fn verify(&self, message: &str, signature: &str) -> Result<()> {
        pkcs1v15::verify(self, message, signature)
    }
}

impl TryFrom<&RsaPrivateKey> for RsaKeyMaterial {
    type Error = rsa::Error;

    fn try_from(key: &RsaPrivateKey) -> rsa::Result<Self> {
        let primes = key.primes();
        if primes.len() != 2 {
            return Err(rsa::Error::NprimesTooSmall);
        }
        let private = PrivateParameters::from_primes(key.d(), &primes[0], &primes[1])?;

        Ok(Self {
            public: PublicParameters::new(key.n().to_bytes_be(), key.e().to_bytes_be()),
            private: Some(private),
        })
    }
}

impl From<&RsaPublicKey> for RsaKeyMaterial {
    fn from(key: &RsaPublicKey) -> Self {
        Self {
            public: PublicParameters::new(key.n().to_bytes_be(), key.e().to_bytes_be()),
            private: None,
        }
    }
}
