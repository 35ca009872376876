//! Create parameters for the simplified CKKS scheme

use crate::{ParametersError, Result};
use he_math::zn::Modulus;
use he_traits::HeParameters;
use num_bigint::BigUint;
use num_traits::Zero;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Default polynomial degree.
pub const DEFAULT_DEGREE: usize = 4096;

/// Default coefficient moduli.
pub const DEFAULT_MODULI: [u64; 3] = [0x1ffffffff00001, 0x7fff00001, 0x3fffffff00001];

/// Default plaintext modulus, 2^48.
pub const DEFAULT_PLAINTEXT_MODULUS: u64 = 0x1000000000000;

/// Default scaling factor, 2^60.
pub const DEFAULT_SCALING_FACTOR: u64 = 0x1000000000000000;

/// Parameters for the simplified CKKS scheme.
///
/// The parameters are recorded by value in every ciphertext.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CkksParameters {
    polynomial_degree: usize,
    #[serde(with = "crate::serialize::decimal::vec")]
    coefficient_modulus: Vec<BigUint>,
    #[serde(with = "crate::serialize::decimal")]
    plaintext_modulus: BigUint,
    #[serde(with = "crate::serialize::decimal")]
    scaling_factor: BigUint,
}

impl HeParameters for CkksParameters {}

impl Default for CkksParameters {
    fn default() -> Self {
        Self {
            polynomial_degree: DEFAULT_DEGREE,
            coefficient_modulus: DEFAULT_MODULI.iter().map(|q| BigUint::from(*q)).collect(),
            plaintext_modulus: BigUint::from(DEFAULT_PLAINTEXT_MODULUS),
            scaling_factor: BigUint::from(DEFAULT_SCALING_FACTOR),
        }
    }
}

impl CkksParameters {
    /// Returns the polynomial degree.
    #[must_use]
    pub const fn degree(&self) -> usize {
        self.polynomial_degree
    }

    /// Returns the maximum number of slots, half the degree.
    #[must_use]
    pub const fn max_slots(&self) -> usize {
        self.polynomial_degree / 2
    }

    /// Returns the coefficient moduli.
    #[must_use]
    pub fn moduli(&self) -> &[BigUint] {
        &self.coefficient_modulus
    }

    /// Returns the plaintext modulus.
    #[must_use]
    pub fn plaintext(&self) -> &BigUint {
        &self.plaintext_modulus
    }

    /// Returns the scaling factor.
    #[must_use]
    pub fn scaling_factor(&self) -> &BigUint {
        &self.scaling_factor
    }

    /// Returns default parameters inside an `Arc`.
    #[must_use]
    pub fn default_arc() -> Arc<Self> {
        Arc::new(Self::default())
    }
}

/// Builder for parameters for the simplified CKKS scheme.
#[derive(Debug)]
pub struct CkksParametersBuilder {
    degree: usize,
    moduli: Vec<u64>,
    plaintext: u64,
    scaling_factor: u64,
}

impl Default for CkksParametersBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl CkksParametersBuilder {
    /// Creates a new instance of the builder, with the default parameters.
    #[must_use]
    pub fn new() -> Self {
        Self {
            degree: DEFAULT_DEGREE,
            moduli: DEFAULT_MODULI.to_vec(),
            plaintext: DEFAULT_PLAINTEXT_MODULUS,
            scaling_factor: DEFAULT_SCALING_FACTOR,
        }
    }

    /// Sets the polynomial degree. Returns an error if the degree is not
    /// a power of two larger or equal to 8.
    pub fn set_degree(&mut self, degree: usize) -> &mut Self {
        self.degree = degree;
        self
    }

    /// Sets the coefficient moduli.
    pub fn set_moduli(&mut self, moduli: &[u64]) -> &mut Self {
        moduli.clone_into(&mut self.moduli);
        self
    }

    /// Sets the plaintext modulus.
    pub fn set_plaintext_modulus(&mut self, plaintext: u64) -> &mut Self {
        self.plaintext = plaintext;
        self
    }

    /// Sets the scaling factor applied to the floats before rounding.
    pub fn set_scaling_factor(&mut self, scaling_factor: u64) -> &mut Self {
        self.scaling_factor = scaling_factor;
        self
    }

    /// Build a new `CkksParameters` inside an `Arc`.
    pub fn build_arc(&self) -> Result<Arc<CkksParameters>> {
        self.build().map(Arc::new)
    }

    /// Build a new `CkksParameters`.
    pub fn build(&self) -> Result<CkksParameters> {
        if self.degree < 8 || !self.degree.is_power_of_two() {
            return Err(ParametersError::InvalidDegree(self.degree).into());
        }
        if self.moduli.is_empty() {
            return Err(ParametersError::NoModulus.into());
        }
        let coefficient_modulus = self
            .moduli
            .iter()
            .map(|q| Modulus::new(BigUint::from(*q)).map(|q| (*q).clone()))
            .collect::<he_math::Result<Vec<_>>>()?;
        let plaintext_modulus = (*Modulus::new(BigUint::from(self.plaintext))?).clone();

        let scaling_factor = BigUint::from(self.scaling_factor);
        if scaling_factor.is_zero() {
            return Err(
                ParametersError::InvalidScalingFactor(self.scaling_factor.to_string()).into(),
            );
        }

        Ok(CkksParameters {
            polynomial_degree: self.degree,
            coefficient_modulus,
            plaintext_modulus,
            scaling_factor,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::{CkksParameters, CkksParametersBuilder};
    use crate::{Error, ParametersError};
    use num_bigint::BigUint;
    use std::error::Error as StdError;

    #[test]
    fn default() -> Result<(), Box<dyn StdError>> {
        let par = CkksParameters::default_arc();
        assert_eq!(par.degree(), 4096);
        assert_eq!(par.max_slots(), 2048);
        assert_eq!(
            par.moduli(),
            &[
                BigUint::from(0x1ffffffff00001u64),
                BigUint::from(0x7fff00001u64),
                BigUint::from(0x3fffffff00001u64)
            ]
        );
        assert_eq!(par.plaintext(), &BigUint::from(1u64 << 48));
        assert_eq!(par.scaling_factor(), &BigUint::from(1u64 << 60));
        assert_eq!(CkksParametersBuilder::new().build()?, *par);
        Ok(())
    }

    #[test]
    fn builder_errors() {
        for degree in [0, 4, 12, 1000] {
            assert_eq!(
                CkksParametersBuilder::new().set_degree(degree).build(),
                Err(Error::ParametersError(ParametersError::InvalidDegree(degree)))
            );
        }
        assert_eq!(
            CkksParametersBuilder::new().set_moduli(&[]).build(),
            Err(Error::ParametersError(ParametersError::NoModulus))
        );
        assert_eq!(
            CkksParametersBuilder::new().set_moduli(&[17, 1]).build(),
            Err(Error::MathError(he_math::Error::InvalidModulus(
                BigUint::from(1u32)
            )))
        );
        assert_eq!(
            CkksParametersBuilder::new().set_scaling_factor(0).build(),
            Err(Error::ParametersError(
                ParametersError::InvalidScalingFactor("0".to_string())
            ))
        );
    }

    #[test]
    fn json() -> Result<(), Box<dyn StdError>> {
        let par = CkksParametersBuilder::new()
            .set_degree(16)
            .set_moduli(&[97, 101])
            .set_plaintext_modulus(256)
            .set_scaling_factor(1024)
            .build()?;
        let json = serde_json::to_string(&par)?;
        assert_eq!(
            json,
            r#"{"polynomialDegree":16,"coefficientModulus":["97","101"],"plaintextModulus":"256","scalingFactor":"1024"}"#
        );
        assert_eq!(serde_json::from_str::<CkksParameters>(&json)?, par);
        Ok(())
    }
}
