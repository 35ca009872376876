//! Ciphertexts of the simplified CKKS scheme

use crate::ckks::CkksParameters;
use crate::{Error, Result};
use he_traits::HeCiphertext;
use num_bigint::BigUint;
use serde::{Deserialize, Serialize};

/// A CKKS ciphertext: one transformed coefficient per polynomial coefficient.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CkksEncryptedData {
    /// The transformed coefficients, as decimal strings.
    pub ciphertext: Vec<String>,
    /// The parameters used at encryption time.
    pub parameters: CkksParameters,
    /// The number of meaningful slots.
    pub slot_count: usize,
}

impl HeCiphertext for CkksEncryptedData {
    type Parameters = CkksParameters;

    fn parameters(&self) -> &CkksParameters {
        &self.parameters
    }
}

impl CkksEncryptedData {
    pub(crate) fn new(coefficients: &[BigUint], parameters: CkksParameters, slot_count: usize) -> Self {
        Self {
            ciphertext: coefficients.iter().map(|c| c.to_str_radix(10)).collect(),
            parameters,
            slot_count,
        }
    }

    /// Parses the coefficients; `error` builds the error to return when one of
    /// them is not a non-negative decimal integer.
    pub(crate) fn coefficients_or<F>(&self, error: F) -> Result<Vec<BigUint>>
    where
        F: Fn(String) -> Error,
    {
        self.ciphertext
            .iter()
            .enumerate()
            .map(|(i, c)| {
                c.trim()
                    .parse::<BigUint>()
                    .map_err(|_| error(format!("malformed coefficient {c:?} at index {i}")))
            })
            .collect()
    }
}
