//! Raw RSA key components.
//!
//! Every component is an unsigned big-endian integer kept as the exact byte
//! string it was decoded from. Leading zero bytes are never added or
//! stripped, so a key read from disk is written back byte for byte.

use core::fmt;

use num_bigint::traits::ModInverse;
use num_bigint::BigUint;
use num_traits::One;
use zeroize::{Zeroize, ZeroizeOnDrop};

use crate::errors::SigningError;

/// Public half of an RSA key: modulus and public exponent.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PublicParameters {
    modulus: Vec<u8>,
    exponent: Vec<u8>,
}

impl PublicParameters {
    pub(crate) fn new(modulus: Vec<u8>, exponent: Vec<u8>) -> Self {
        Self { modulus, exponent }
    }

    /// Returns the modulus (`n`).
    pub fn modulus(&self) -> &[u8] {
        &self.modulus
    }

    /// Returns the public exponent (`e`).
    pub fn exponent(&self) -> &[u8] {
        &self.exponent
    }

    /// Returns the modulus size in bytes, ignoring leading zero bytes.
    /// Signatures made by this key have the same size.
    pub fn size(&self) -> usize {
        let leading = self.modulus.iter().take_while(|b| **b == 0).count();
        self.modulus.len() - leading
    }
}

/// Private half of an RSA key: private exponent, prime factors and the CRT
/// parameters derived from them.
///
/// Zeroized on drop.
#[derive(Clone, PartialEq, Eq)]
pub struct PrivateParameters {
    d: Vec<u8>,
    p: Vec<u8>,
    q: Vec<u8>,
    dp: Vec<u8>,
    dq: Vec<u8>,
    inverse_q: Vec<u8>,
}

impl PrivateParameters {
    pub(crate) fn new(
        d: Vec<u8>,
        p: Vec<u8>,
        q: Vec<u8>,
        dp: Vec<u8>,
        dq: Vec<u8>,
        inverse_q: Vec<u8>,
    ) -> Self {
        Self {
            d,
            p,
            q,
            dp,
            dq,
            inverse_q,
        }
    }

    /// Builds the private parameters from `d`, `p` and `q`, deriving the
    /// CRT values.
    pub(crate) fn from_primes(d: &BigUint, p: &BigUint, q: &BigUint) -> rsa::Result<Self> {
        let crt = CrtParameters::derive(d, p, q)?;
        Ok(Self::new(
            d.to_bytes_be(),
            p.to_bytes_be(),
            q.to_bytes_be(),
            crt.dp.to_bytes_be(),
            crt.dq.to_bytes_be(),
            crt.qinv.to_bytes_be(),
        ))
    }

    /// Returns the private exponent (`d`).
    pub fn d(&self) -> &[u8] {
        &self.d
    }

    /// Returns the first prime factor (`p`).
    pub fn p(&self) -> &[u8] {
        &self.p
    }

    /// Returns the second prime factor (`q`).
    pub fn q(&self) -> &[u8] {
        &self.q
    }

    /// Returns D mod (P-1).
    pub fn dp(&self) -> &[u8] {
        &self.dp
    }

    /// Returns D mod (Q-1).
    pub fn dq(&self) -> &[u8] {
        &self.dq
    }

    /// Returns Q^-1 mod P.
    pub fn inverse_q(&self) -> &[u8] {
        &self.inverse_q
    }

    /// Checks the stored CRT parameters against the values derived from
    /// `d`, `p` and `q`.
    pub(crate) fn check_crt(&self) -> Result<(), SigningError> {
        let mut d = BigUint::from_bytes_be(&self.d);
        let mut p = BigUint::from_bytes_be(&self.p);
        let mut q = BigUint::from_bytes_be(&self.q);
        let derived = CrtParameters::derive(&d, &p, &q);
        d.zeroize();
        p.zeroize();
        q.zeroize();

        let derived = derived?;
        if !same_value(&derived.dp, &self.dp) {
            return Err(SigningError::CrtMismatch("DP"));
        }
        if !same_value(&derived.dq, &self.dq) {
            return Err(SigningError::CrtMismatch("DQ"));
        }
        if !same_value(&derived.qinv, &self.inverse_q) {
            return Err(SigningError::CrtMismatch("InverseQ"));
        }
        Ok(())
    }
}

impl fmt::Debug for PrivateParameters {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PrivateParameters").finish_non_exhaustive()
    }
}

impl Zeroize for PrivateParameters {
    fn zeroize(&mut self) {
        self.d.zeroize();
        self.p.zeroize();
        self.q.zeroize();
        self.dp.zeroize();
        self.dq.zeroize();
        self.inverse_q.zeroize();
    }
}

impl Drop for PrivateParameters {
    fn drop(&mut self) {
        self.zeroize();
    }
}

impl ZeroizeOnDrop for PrivateParameters {}

/// CRT values for a two-prime key.
struct CrtParameters {
    /// D mod (P-1)
    dp: BigUint,
    /// D mod (Q-1)
    dq: BigUint,
    /// Q^-1 mod P
    qinv: BigUint,
}

impl CrtParameters {
    /// Fails with [`rsa::Error::InvalidPrime`] when `p` or `q` is not greater
    /// than one, and [`rsa::Error::InvalidCoefficient`] when `q` has no
    /// inverse modulo `p`.
    fn derive(d: &BigUint, p: &BigUint, q: &BigUint) -> rsa::Result<Self> {
        let one = BigUint::one();
        if *p <= one || *q <= one {
            return Err(rsa::Error::InvalidPrime);
        }

        let dp = d % (p - &one);
        let dq = d % (q - &one);
        let qinv = q
            .clone()
            .mod_inverse(p)
            .and_then(|qinv| qinv.to_biguint())
            .ok_or(rsa::Error::InvalidCoefficient)?;

        Ok(Self { dp, dq, qinv })
    }
}

/// Compares by integer value, so stored leading zero bytes do not matter.
fn same_value(derived: &BigUint, stored: &[u8]) -> bool {
    *derived == BigUint::from_bytes_be(stored)
}

impl Zeroize for CrtParameters {
    fn zeroize(&mut self) {
        self.dp.zeroize();
        self.dq.zeroize();
        self.qinv.zeroize();
    }
}

impl Drop for CrtParameters {
    fn drop(&mut self) {
        self.zeroize();
    }
}
