#![crate_name = "he_traits"]
#![crate_type = "lib"]
#![warn(missing_docs, unused_imports)]

//! Traits for the homomorphic encryption schemes of he.rs

/// The homomorphic encryption parameters.
pub trait HeParameters {}

/// A ciphertext, produced under some parameters.
pub trait HeCiphertext
where
    Self: Sized,
{
    /// The type of the HE parameters.
    type Parameters: HeParameters;

    /// The parameters recorded in the ciphertext when it was produced.
    fn parameters(&self) -> &Self::Parameters;
}

/// Encrypt a value into a ciphertext.
pub trait HeEncrypter<V: ?Sized, C: HeCiphertext> {
    /// The type of error returned.
    type Error;

    /// Try to encrypt a value into an [`HeCiphertext`].
    fn try_encrypt(&self, value: &V) -> Result<C, Self::Error>;
}

/// Decrypt a ciphertext into a value.
pub trait HeDecrypter<C: HeCiphertext, V> {
    /// The type of error returned.
    type Error;

    /// Try to decrypt an [`HeCiphertext`].
    fn try_decrypt(&self, ct: &C) -> Result<V, Self::Error>;
}

/// Homomorphic addition of two ciphertexts.
pub trait HeEvaluator<C: HeCiphertext> {
    /// The type of error returned.
    type Error;

    /// Try to add two ciphertexts without decrypting them.
    fn try_add(&self, lhs: &C, rhs: &C) -> Result<C, Self::Error>;
}

/// Homomorphic multiplication of a ciphertext by a right-hand side, which is
/// either another ciphertext or a plaintext scalar depending on the scheme.
pub trait HeMultiplier<C: HeCiphertext, Rhs: ?Sized = C> {
    /// The type of error returned.
    type Error;

    /// Try to multiply a ciphertext without decrypting it.
    fn try_mul(&self, lhs: &C, rhs: &Rhs) -> Result<C, Self::Error>;
}
