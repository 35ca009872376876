//! Paillier ciphertexts as exchanged on the wire

use crate::{Error, Result};
use chrono::{DateTime, Utc};
use he_traits::{HeCiphertext, HeParameters};
use num_bigint::BigUint;
use serde::{Deserialize, Serialize};

/// The public parameters recorded in a Paillier ciphertext when it is
/// produced.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EncryptionParameters {
    /// The modulus n, as a decimal string.
    pub n: String,
    /// The generator g, as a decimal string.
    pub g: String,
    /// When the ciphertext was produced.
    pub timestamp: DateTime<Utc>,
}

impl HeParameters for EncryptionParameters {}

/// A Paillier ciphertext.
///
/// The ciphertext is kept as a decimal string, the way it crosses the service
/// boundary; it is parsed by each operation that consumes it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EncryptedValue {
    /// The ciphertext c, 0 <= c < n², as a decimal string.
    pub ciphertext: String,
    /// The parameters used at encryption time.
    pub parameters: EncryptionParameters,
}

impl HeCiphertext for EncryptedValue {
    type Parameters = EncryptionParameters;

    fn parameters(&self) -> &EncryptionParameters {
        &self.parameters
    }
}

impl EncryptedValue {
    pub(crate) fn new(c: &BigUint, n: &BigUint, g: &BigUint) -> Self {
        Self {
            ciphertext: c.to_str_radix(10),
            parameters: EncryptionParameters {
                n: n.to_str_radix(10),
                g: g.to_str_radix(10),
                timestamp: Utc::now(),
            },
        }
    }

    /// Parses the ciphertext; `error` builds the error to return when it is not
    /// a non-negative decimal integer.
    pub(crate) fn value_or<F>(&self, error: F) -> Result<BigUint>
    where
        F: FnOnce(String) -> Error,
    {
        self.ciphertext
            .trim()
            .parse::<BigUint>()
            .map_err(|_| error(format!("malformed ciphertext {:?}", self.ciphertext)))
    }
}
