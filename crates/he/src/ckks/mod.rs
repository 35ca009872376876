#![warn(missing_docs, unused_imports)]

//! A simplified Cheon-Kim-Kim-Song scheme for approximate arithmetic on
//! floats. The "encryption" is a fixed scalar transform and provides no
//! security.

mod ciphertext;
mod context;
mod encoding;
mod parameters;

pub use ciphertext::CkksEncryptedData;
pub use context::CkksContext;
pub(crate) use encoding::{decode, encode};
pub use parameters::{
    CkksParameters, CkksParametersBuilder, DEFAULT_DEGREE, DEFAULT_MODULI,
    DEFAULT_PLAINTEXT_MODULUS, DEFAULT_SCALING_FACTOR,
};
