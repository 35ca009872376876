//! Key pairs for the Paillier cryptosystem

use crate::paillier::PaillierParameters;
use crate::{Error, Result};
use he_math::zn::{lcm, mod_inverse, mod_pow, primes::generate_prime};
use log::debug;
use num_bigint::{BigUint, RandBigInt};
use num_traits::{One, Zero};
use rand::{CryptoRng, RngCore};
use serde::Serialize;
use std::fmt::{self, Debug};

/// Number of extra random bits drawn when sampling the encryption nonce, so
/// that the reduction modulo n - 1 is close to uniform.
const NONCE_EXTRA_BITS: u64 = 64;

/// Public part of a Paillier key pair.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PublicKey {
    /// The modulus n = p * q.
    #[serde(with = "crate::serialize::decimal")]
    pub n: BigUint,
    /// The generator g = n + 1.
    #[serde(with = "crate::serialize::decimal")]
    pub g: BigUint,
}

/// A Paillier key pair.
///
/// A key pair is immutable: key rotation replaces it as a whole.
#[derive(PartialEq, Eq)]
pub struct PaillierKeyPair {
    n: BigUint,
    n_squared: BigUint,
    g: BigUint,
    lambda: BigUint,
    mu: BigUint,
}

impl Debug for PaillierKeyPair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PaillierKeyPair")
            .field("n", &self.n)
            .field("g", &self.g)
            .finish_non_exhaustive()
    }
}

impl PaillierKeyPair {
    /// Generate a random [`PaillierKeyPair`] whose modulus has the size
    /// specified by the parameters.
    pub fn generate<R: RngCore + CryptoRng>(
        par: &PaillierParameters,
        rng: &mut R,
    ) -> Result<Self> {
        let p = generate_prime(par.prime_size(), rng)
            .map_err(|e| Error::KeyGeneration(e.to_string()))?;
        let q = generate_prime(par.prime_size(), rng)
            .map_err(|e| Error::KeyGeneration(e.to_string()))?;
        Self::from_primes(&p, &q)
    }

    /// Create a [`PaillierKeyPair`] from two distinct primes.
    ///
    /// The primality of `p` and `q` is not checked; if they are not primes,
    /// decryption will not be correct.
    pub fn from_primes(p: &BigUint, q: &BigUint) -> Result<Self> {
        if p == q {
            return Err(Error::KeyGeneration(
                "the two primes must be distinct".to_string(),
            ));
        }
        if p < &BigUint::from(2u32) || q < &BigUint::from(2u32) {
            return Err(Error::KeyGeneration(
                "the primes must be larger than 1".to_string(),
            ));
        }

        let n = p * q;
        let n_squared = &n * &n;
        let g = &n + 1u32;
        let lambda = lcm(&(p - 1u32), &(q - 1u32));
        let g_lambda = mod_pow(&g, &lambda, &n_squared);
        let mu = mod_inverse(&l_function(&g_lambda, &n), &n)
            .map_err(|e| Error::KeyGeneration(e.to_string()))?;

        debug!("Generated a Paillier key pair with a {}-bit modulus", n.bits());
        Ok(Self {
            n,
            n_squared,
            g,
            lambda,
            mu,
        })
    }

    /// Returns the modulus n.
    #[must_use]
    pub fn n(&self) -> &BigUint {
        &self.n
    }

    /// Returns n².
    #[must_use]
    pub fn n_squared(&self) -> &BigUint {
        &self.n_squared
    }

    /// Returns the generator g.
    #[must_use]
    pub fn g(&self) -> &BigUint {
        &self.g
    }

    /// Returns λ = lcm(p - 1, q - 1).
    #[must_use]
    pub fn lambda(&self) -> &BigUint {
        &self.lambda
    }

    /// Returns μ = L(g^λ mod n²)^-1 mod n.
    #[must_use]
    pub fn mu(&self) -> &BigUint {
        &self.mu
    }

    /// Returns the public part of the key pair.
    #[must_use]
    pub fn public_key(&self) -> PublicKey {
        PublicKey {
            n: self.n.clone(),
            g: self.g.clone(),
        }
    }

    /// Encrypts `m` as c = g^m * r^n mod n², with r uniform in [1, n - 1].
    pub fn encrypt<R: RngCore + CryptoRng>(&self, m: &BigUint, rng: &mut R) -> Result<BigUint> {
        if m >= &self.n {
            return Err(Error::Encryption(format!(
                "plaintext must be smaller than the {}-bit modulus",
                self.n.bits()
            )));
        }
        let r = self.sample_nonce(rng);
        Ok(self.encrypt_with_nonce(m, &r))
    }

    pub(crate) fn encrypt_with_nonce(&self, m: &BigUint, r: &BigUint) -> BigUint {
        let gm = mod_pow(&self.g, m, &self.n_squared);
        let rn = mod_pow(r, &self.n, &self.n_squared);
        gm * rn % &self.n_squared
    }

    /// Decrypts `c` as m = L(c^λ mod n²) * μ mod n.
    pub fn decrypt(&self, c: &BigUint) -> Result<BigUint> {
        if c >= &self.n_squared {
            return Err(Error::Decryption(
                "ciphertext is not smaller than n²".to_string(),
            ));
        }
        let c_lambda = mod_pow(c, &self.lambda, &self.n_squared);
        Ok(l_function(&c_lambda, &self.n) * &self.mu % &self.n)
    }

    /// Homomorphic addition: c1 * c2 mod n².
    #[must_use]
    pub fn add(&self, c1: &BigUint, c2: &BigUint) -> BigUint {
        c1 * c2 % &self.n_squared
    }

    /// Homomorphic scalar multiplication: c^k mod n².
    #[must_use]
    pub fn mul_scalar(&self, c: &BigUint, k: &BigUint) -> BigUint {
        mod_pow(c, k, &self.n_squared)
    }

    /// Samples r in [1, n - 1] by drawing an oversized random integer and
    /// reducing it modulo n - 1.
    fn sample_nonce<R: RngCore + CryptoRng>(&self, rng: &mut R) -> BigUint {
        let max = &self.n - 1u32;
        rng.gen_biguint(self.n.bits() + NONCE_EXTRA_BITS) % max + 1u32
    }
}

/// The L function of the Paillier cryptosystem, L(x) = (x - 1) / n, where the
/// division is the integer division. L(0) is 0.
pub(crate) fn l_function(x: &BigUint, n: &BigUint) -> BigUint {
    if x.is_zero() {
        return BigUint::zero();
    }
    (x - BigUint::one()) / n
}
