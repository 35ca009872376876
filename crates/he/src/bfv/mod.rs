#![warn(missing_docs, unused_imports)]

//! A simplified Brakerski-Fan-Vercauteren scheme for exact arithmetic on small
//! integers. The "encryption" is a fixed scalar transform and provides no
//! security.

mod ciphertext;
mod context;
mod encoding;
mod parameters;

pub use ciphertext::BfvEncryptedData;
pub use context::BfvContext;
pub use encoding::{pack, unpack, SLOT_BITS, SLOT_COUNT};
pub use parameters::{
    BfvParameters, BfvParametersBuilder, DEFAULT_DEGREE, DEFAULT_MODULI, DEFAULT_PLAINTEXT_MODULUS,
};
