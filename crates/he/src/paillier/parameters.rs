//! Create parameters for the Paillier cryptosystem

use crate::{ParametersError, Result};
use he_traits::HeParameters;
use std::sync::Arc;

/// Default size of the modulus n, in bits.
pub const DEFAULT_MODULUS_SIZE: usize = 2048;

/// Smallest supported size of the modulus n, in bits.
pub const MIN_MODULUS_SIZE: usize = 32;

/// Largest supported size of the modulus n, in bits.
pub const MAX_MODULUS_SIZE: usize = 8192;

/// Parameters for the Paillier cryptosystem.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaillierParameters {
    /// Number of bits of the modulus n = p * q.
    modulus_size: usize,
}

impl HeParameters for PaillierParameters {}

impl Default for PaillierParameters {
    fn default() -> Self {
        Self {
            modulus_size: DEFAULT_MODULUS_SIZE,
        }
    }
}

impl PaillierParameters {
    /// Returns the size of the modulus n, in bits.
    #[must_use]
    pub const fn modulus_size(&self) -> usize {
        self.modulus_size
    }

    /// Returns the size of each of the two primes p and q, in bits.
    #[must_use]
    pub const fn prime_size(&self) -> usize {
        self.modulus_size / 2
    }

    /// Returns default parameters inside an `Arc`.
    #[must_use]
    pub fn default_arc() -> Arc<Self> {
        Arc::new(Self::default())
    }
}

/// Builder for parameters for the Paillier cryptosystem.
#[derive(Debug)]
pub struct PaillierParametersBuilder {
    modulus_size: usize,
}

impl Default for PaillierParametersBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl PaillierParametersBuilder {
    /// Creates a new instance of the builder, with the default modulus size.
    #[must_use]
    pub fn new() -> Self {
        Self {
            modulus_size: DEFAULT_MODULUS_SIZE,
        }
    }

    /// Sets the size of the modulus n, in bits. The size must be even and
    /// within `MIN_MODULUS_SIZE..=MAX_MODULUS_SIZE`, which is checked by
    /// [`Self::build`].
    pub fn set_modulus_size(&mut self, modulus_size: usize) -> &mut Self {
        self.modulus_size = modulus_size;
        self
    }

    /// Build a new `PaillierParameters` inside an `Arc`.
    pub fn build_arc(&self) -> Result<Arc<PaillierParameters>> {
        self.build().map(Arc::new)
    }

    /// Build a new `PaillierParameters`.
    pub fn build(&self) -> Result<PaillierParameters> {
        if self.modulus_size % 2 != 0
            || !(MIN_MODULUS_SIZE..=MAX_MODULUS_SIZE).contains(&self.modulus_size)
        {
            return Err(ParametersError::InvalidModulusSize(
                self.modulus_size,
                MIN_MODULUS_SIZE,
                MAX_MODULUS_SIZE,
            )
            .into());
        }

        Ok(PaillierParameters {
            modulus_size: self.modulus_size,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::{PaillierParameters, PaillierParametersBuilder, DEFAULT_MODULUS_SIZE};
    use crate::{Error, ParametersError};
    use std::error::Error as StdError;

    #[test]
    fn default() {
        let par = PaillierParameters::default_arc();
        assert_eq!(par.modulus_size(), DEFAULT_MODULUS_SIZE);
        assert_eq!(par.prime_size(), 1024);
        assert_eq!(
            PaillierParametersBuilder::new().build(),
            Ok(PaillierParameters::default())
        );
    }

    #[test]
    fn modulus_size() -> Result<(), Box<dyn StdError>> {
        let par = PaillierParametersBuilder::new()
            .set_modulus_size(512)
            .build()?;
        assert_eq!(par.modulus_size(), 512);
        assert_eq!(par.prime_size(), 256);

        for size in [0, 30, 33, 511, 8194] {
            assert_eq!(
                PaillierParametersBuilder::new()
                    .set_modulus_size(size)
                    .build(),
                Err(Error::ParametersError(ParametersError::InvalidModulusSize(
                    size, 32, 8192
                )))
            );
        }
        Ok(())
    }
}
