//! Ciphertexts of the simplified BFV scheme

use crate::bfv::BfvParameters;
use crate::{Error, Result};
use he_traits::HeCiphertext;
use num_bigint::BigUint;
use serde::{Deserialize, Serialize};

/// A BFV ciphertext: the transformed packed integer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BfvEncryptedData {
    /// The ciphertext, as a decimal string.
    pub ciphertext: String,
    /// The parameters used at encryption time.
    pub parameters: BfvParameters,
}

impl HeCiphertext for BfvEncryptedData {
    type Parameters = BfvParameters;

    fn parameters(&self) -> &BfvParameters {
        &self.parameters
    }
}

impl BfvEncryptedData {
    pub(crate) fn new(c: &BigUint, parameters: BfvParameters) -> Self {
        Self {
            ciphertext: c.to_str_radix(10),
            parameters,
        }
    }

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
