//! Create parameters for the simplified BFV scheme

use crate::{ParametersError, Result};
use he_math::zn::Modulus;
use he_traits::HeParameters;
use num_bigint::BigUint;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Default polynomial degree.
pub const DEFAULT_DEGREE: usize = 4096;

/// Default plaintext modulus.
pub const DEFAULT_PLAINTEXT_MODULUS: u64 = 65537;

/// Default coefficient moduli. The first one is used by the homomorphic
/// operations.
pub const DEFAULT_MODULI: [u64; 3] = [0x7fff00001, 0x7fff80001, 0x7fff00001];

/// Parameters for the simplified BFV scheme.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BfvParameters {
    polynomial_degree: usize,
    #[serde(with = "crate::serialize::decimal")]
    plaintext_modulus: BigUint,
    #[serde(with = "crate::serialize::decimal::vec")]
    coefficient_modulus: Vec<BigUint>,
}

impl HeParameters for BfvParameters {}

impl Default for BfvParameters {
    fn default() -> Self {
        Self {
            polynomial_degree: DEFAULT_DEGREE,
            plaintext_modulus: BigUint::from(DEFAULT_PLAINTEXT_MODULUS),
            coefficient_modulus: DEFAULT_MODULI.iter().map(|q| BigUint::from(*q)).collect(),
        }
    }
}

impl BfvParameters {
    /// Returns the polynomial degree.
    #[must_use]
    pub const fn degree(&self) -> usize {
        self.polynomial_degree
    }

    /// Returns the plaintext modulus.
    #[must_use]
    pub fn plaintext(&self) -> &BigUint {
        &self.plaintext_modulus
    }

    /// Returns the coefficient moduli.
    #[must_use]
    pub fn moduli(&self) -> &[BigUint] {
        &self.coefficient_modulus
    }

    /// Returns default parameters inside an `Arc`.
    #[must_use]
    pub fn default_arc() -> Arc<Self> {
        Arc::new(Self::default())
    }
}

/// Builder for parameters for the simplified BFV scheme.
#[derive(Debug)]
pub struct BfvParametersBuilder {
    degree: usize,
    plaintext: u64,
    moduli: Vec<u64>,
}

impl Default for BfvParametersBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl BfvParametersBuilder {
    /// Creates a new instance of the builder, with the default parameters.
    #[must_use]
    pub fn new() -> Self {
        Self {
            degree: DEFAULT_DEGREE,
            plaintext: DEFAULT_PLAINTEXT_MODULUS,
            moduli: DEFAULT_MODULI.to_vec(),
        }
    }

    /// Sets the polynomial degree. Returns an error if the degree is not
    /// a power of two larger or equal to 8.
    pub fn set_degree(&mut self, degree: usize) -> &mut Self {
        self.degree = degree;
        self
    }

    /// Sets the plaintext modulus.
    pub fn set_plaintext_modulus(&mut self, plaintext: u64) -> &mut Self {
        self.plaintext = plaintext;
        self
    }

    /// Sets the coefficient moduli.
    pub fn set_moduli(&mut self, moduli: &[u64]) -> &mut Self {
        moduli.clone_into(&mut self.moduli);
        self
    }

    /// Build a new `BfvParameters` inside an `Arc`.
    pub fn build_arc(&self) -> Result<Arc<BfvParameters>> {
        self.build().map(Arc::new)
    }

    /// Build a new `BfvParameters`.
    pub fn build(&self) -> Result<BfvParameters> {
        if self.degree < 8 || !self.degree.is_power_of_two() {
            return Err(ParametersError::InvalidDegree(self.degree).into());
        }
        if self.moduli.is_empty() {
            return Err(ParametersError::NoModulus.into());
        }
        let plaintext_modulus = (*Modulus::new(BigUint::from(self.plaintext))?).clone();
        let coefficient_modulus = self
            .moduli
            .iter()
            .map(|q| Modulus::new(BigUint::from(*q)).map(|q| (*q).clone()))
            .collect::<he_math::Result<Vec<_>>>()?;

        Ok(BfvParameters {
            polynomial_degree: self.degree,
            plaintext_modulus,
            coefficient_modulus,
        })
    }
}
