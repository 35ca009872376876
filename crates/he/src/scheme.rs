//! Scheme and operation tags carried by requests and payloads.

use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fmt::{self, Display};
use std::str::FromStr;

/// The homomorphic encryption schemes supported by this library.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Scheme {
    /// The Paillier additively homomorphic cryptosystem.
    #[default]
    Paillier,
    /// Simplified CKKS, for approximate arithmetic on floats.
    Ckks,
    /// Simplified BFV, for exact arithmetic on small integers.
    Bfv,
}

impl Scheme {
    /// All the supported schemes, in the order they are advertised.
    pub const ALL: [Scheme; 3] = [Scheme::Paillier, Scheme::Ckks, Scheme::Bfv];

    /// Returns the wire name of the scheme.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Scheme::Paillier => "paillier",
            Scheme::Ckks => "ckks",
            Scheme::Bfv => "bfv",
        }
    }

    /// Returns the error reporting that `self` was found where `expected` was
    /// required.
    pub(crate) fn mismatch(self, expected: Scheme) -> Error {
        Error::SchemeMismatch(self.as_str().to_string(), expected.as_str().to_string())
    }
}

impl Display for Scheme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Scheme {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Scheme::ALL
            .into_iter()
            .find(|scheme| scheme.as_str() == s)
            .ok_or_else(|| Error::UnsupportedScheme(s.to_string()))
    }
}

/// The homomorphic operations reported in computation results.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Operation {
    /// Addition of two ciphertexts.
    #[serde(rename = "homomorphic_addition")]
    Addition,
    /// Multiplication of a ciphertext by a plaintext scalar.
    #[serde(rename = "homomorphic_scalar_multiplication")]
    ScalarMultiplication,
    /// Multiplication of two ciphertexts.
    #[serde(rename = "homomorphic_multiplication")]
    Multiplication,
}

impl Operation {
    /// Returns the wire name of the operation.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Operation::Addition => "homomorphic_addition",
            Operation::ScalarMultiplication => "homomorphic_scalar_multiplication",
            Operation::Multiplication => "homomorphic_multiplication",
        }
    }
}

impl Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
