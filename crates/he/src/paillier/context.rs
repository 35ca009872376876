//! The Paillier engine and its active key pair

use crate::paillier::{EncryptedValue, PaillierKeyPair, PaillierParameters, PublicKey};
use crate::{Error, Result};
use he_traits::{HeDecrypter, HeEncrypter, HeEvaluator, HeMultiplier};
use log::{debug, error, info};
use num_bigint::BigUint;
use rand::{thread_rng, CryptoRng, RngCore};
use rayon::prelude::{IntoParallelRefIterator, ParallelIterator};
use std::sync::{Arc, PoisonError, RwLock};

/// The Paillier engine.
///
/// The engine starts without keys and becomes usable once a key pair has been
/// generated. The active key pair is an immutable `Arc` swapped as a whole on
/// rotation: every operation works on a snapshot of the key pair taken when
/// it starts, so a concurrent rotation is never observed halfway.
#[derive(Debug)]
pub struct PaillierContext {
    par: Arc<PaillierParameters>,
    keys: RwLock<Option<Arc<PaillierKeyPair>>>,
}

impl PaillierContext {
    /// Creates an engine without keys.
    #[must_use]
    pub fn new(par: &Arc<PaillierParameters>) -> Self {
        Self {
            par: par.clone(),
            keys: RwLock::new(None),
        }
    }

    /// Creates an engine and generates its first key pair.
    pub fn with_keys<R: RngCore + CryptoRng>(
        par: &Arc<PaillierParameters>,
        rng: &mut R,
    ) -> Result<Self> {
        let ctx = Self::new(par);
        ctx.generate_keys(rng)?;
        Ok(ctx)
    }

    /// Returns the parameters of the engine.
    #[must_use]
    pub fn parameters(&self) -> &Arc<PaillierParameters> {
        &self.par
    }

    /// Generates a new key pair and makes it the active one.
    pub fn generate_keys<R: RngCore + CryptoRng>(&self, rng: &mut R) -> Result<()> {
        let kp = PaillierKeyPair::generate(&self.par, rng).map_err(|e| {
            error!("Failed to generate homomorphic encryption keys: {e}");
            e
        })?;
        self.install(kp);
        info!(
            "Homomorphic encryption keys initialized ({}-bit modulus)",
            self.par.modulus_size()
        );
        Ok(())
    }

    /// Replaces the active key pair by a freshly generated one. Ciphertexts
    /// produced under the previous key pair can no longer be decrypted.
    ///
    /// Returns the key pair installed by this call.
    pub fn regenerate_keys(&self) -> Result<Arc<PaillierKeyPair>> {
        let kp = PaillierKeyPair::generate(&self.par, &mut thread_rng()).map_err(|e| {
            error!("Failed to regenerate homomorphic encryption keys: {e}");
            e
        })?;
        let kp = self.install(kp);
        info!("Homomorphic encryption keys regenerated");
        Ok(kp)
    }

    /// Makes `kp` the active key pair and returns it.
    pub fn install(&self, kp: PaillierKeyPair) -> Arc<PaillierKeyPair> {
        let kp = Arc::new(kp);
        let mut slot = self.keys.write().unwrap_or_else(PoisonError::into_inner);
        *slot = Some(kp.clone());
        kp
    }

    /// Returns whether a key pair is available.
    #[must_use]
    pub fn is_initialized(&self) -> bool {
        self.keys
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .is_some()
    }

    /// Returns a snapshot of the active key pair.
    pub fn key_pair(&self) -> Result<Arc<PaillierKeyPair>> {
        self.keys
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
            .ok_or(Error::NotInitialized)
    }

    /// Returns the public part of the active key pair.
    pub fn public_key(&self) -> Result<PublicKey> {
        Ok(self.key_pair()?.public_key())
    }

    /// Encrypts `m` with the provided random number generator.
    pub fn encrypt_with_rng<R: RngCore + CryptoRng>(
        &self,
        m: &BigUint,
        rng: &mut R,
    ) -> Result<EncryptedValue> {
        let kp = self.key_pair()?;
        encrypt_under(&kp, m, rng)
    }

    /// Encrypts each value independently, in parallel, preserving the order.
    ///
    /// The whole batch is encrypted under the same key pair, and fails if any
    /// of the values cannot be encrypted.
    pub fn batch_encrypt<S: AsRef<str> + Sync>(&self, values: &[S]) -> Result<Vec<EncryptedValue>> {
        let kp = self.key_pair()?;
        let encrypted = values
            .par_iter()
            .map(|v| encrypt_under(&kp, &parse_plaintext(v.as_ref())?, &mut thread_rng()))
            .collect::<Result<Vec<_>>>();
        debug!(
            "Batch encryption of {} values: {}",
            values.len(),
            if encrypted.is_ok() { "ok" } else { "failed" }
        );
        encrypted
    }

    /// Checks a ciphertext by decrypting it, encrypting the plaintext again and
    /// comparing both ciphertexts.
    ///
    /// Since the encryption is randomized, two encryptions of the same value
    /// almost never coincide: this check only passes in degenerate cases.
    pub fn validate_encrypted_data(&self, ct: &EncryptedValue) -> bool {
        let revalidate = || -> Result<bool> {
            let m: BigUint = self.try_decrypt(ct)?;
            let again = self.try_encrypt(&m)?;
            Ok(again.ciphertext == ct.ciphertext)
        };
        revalidate().unwrap_or_else(|e| {
            error!("Encrypted data validation failed: {e}");
            false
        })
    }
}

/// Parses a plaintext given as a decimal string.
fn parse_plaintext(value: &str) -> Result<BigUint> {
    value
        .trim()
        .parse::<BigUint>()
        .map_err(|_| Error::Encryption(format!("invalid plaintext {value:?}")))
}

fn encrypt_under<R: RngCore + CryptoRng>(
    kp: &PaillierKeyPair,
    m: &BigUint,
    rng: &mut R,
) -> Result<EncryptedValue> {
    let c = kp.encrypt(m, rng)?;
    Ok(EncryptedValue::new(&c, kp.n(), kp.g()))
}

impl HeEncrypter<BigUint, EncryptedValue> for PaillierContext {
    type Error = Error;

    fn try_encrypt(&self, m: &BigUint) -> Result<EncryptedValue> {
        self.encrypt_with_rng(m, &mut thread_rng())
    }
}

impl HeEncrypter<str, EncryptedValue> for PaillierContext {
    type Error = Error;

    fn try_encrypt(&self, value: &str) -> Result<EncryptedValue> {
        // A missing key pair is reported before a malformed plaintext.
        let kp = self.key_pair()?;
        encrypt_under(&kp, &parse_plaintext(value)?, &mut thread_rng())
    }
}

impl HeDecrypter<EncryptedValue, BigUint> for PaillierContext {
    type Error = Error;

    fn try_decrypt(&self, ct: &EncryptedValue) -> Result<BigUint> {
        let kp = self.key_pair()?;
        let c = ct.value_or(Error::Decryption)?;
        kp.decrypt(&c)
    }
}

impl HeEvaluator<EncryptedValue> for PaillierContext {
    type Error = Error;

    /// Homomorphic addition. Both operands are assumed to be encrypted under
    /// the active key pair; this is not checked.
    fn try_add(&self, lhs: &EncryptedValue, rhs: &EncryptedValue) -> Result<EncryptedValue> {
        let kp = self.key_pair()?;
        let c1 = lhs.value_or(Error::Evaluation)?;
        let c2 = rhs.value_or(Error::Evaluation)?;
        Ok(EncryptedValue::new(&kp.add(&c1, &c2), kp.n(), kp.g()))
    }
}

impl HeMultiplier<EncryptedValue, BigUint> for PaillierContext {
    type Error = Error;

    /// Homomorphic multiplication by a non-negative scalar.
    fn try_mul(&self, lhs: &EncryptedValue, k: &BigUint) -> Result<EncryptedValue> {
        let kp = self.key_pair()?;
        let c = lhs.value_or(Error::Evaluation)?;
        Ok(EncryptedValue::new(&kp.mul_scalar(&c, k), kp.n(), kp.g()))
    }
}
