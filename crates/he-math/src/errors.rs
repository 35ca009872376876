use num_bigint::BigUint;
use thiserror::Error;

/// The Result type for this library.
pub type Result<T> = std::result::Result<T, Error>;

/// Enum encapsulating all the possible errors from this library.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum Error {
    /// Indicates that an element is not invertible modulo the modulus.
    #[error("Modular inverse does not exist")]
    NoInverse,

    /// Indicates an invalid modulus.
    #[error("Invalid modulus: modulus {0} should be at least 2.")]
    InvalidModulus(BigUint),

    /// Indicates that the requested prime size is not supported.
    #[error("Invalid prime size: {0} bits, expected between {1} and {2}.")]
    InvalidPrimeSize(usize, usize, usize),
}
