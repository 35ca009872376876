#![warn(missing_docs, unused_imports)]

//! The Paillier additively homomorphic cryptosystem.

mod ciphertext;
mod context;
mod keys;
mod parameters;

pub use ciphertext::{EncryptedValue, EncryptionParameters};
pub use context::PaillierContext;
pub use keys::{PaillierKeyPair, PublicKey};
pub use parameters::{
    PaillierParameters, PaillierParametersBuilder, DEFAULT_MODULUS_SIZE, MAX_MODULUS_SIZE,
    MIN_MODULUS_SIZE,
};
