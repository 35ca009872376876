//! The fixed scalar transform standing in for encryption in the toy schemes.

use crate::Result;
use he_math::zn::Modulus;
use num_bigint::BigUint;
use num_traits::One;

/// Bit size of the transform modulus.
const TOY_MODULUS_BITS: usize = 192;

/// Generator of the transform.
const TOY_GENERATOR: u32 = 2;

/// A multiply-mod transform m -> m * g mod p, with its inverse
/// c -> c * g^-1 mod p.
///
/// The transform carries no secret: it only hides values behind a fixed
/// bijection of Z/pZ.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct ScalarTransform {
    modulus: Modulus,
    generator: BigUint,
    generator_inv: BigUint,
}

impl ScalarTransform {
    /// Creates a transform; fails when `generator` is not invertible modulo
    /// `modulus`.
    pub fn new(modulus: Modulus, generator: BigUint) -> Result<Self> {
        let generator = modulus.reduce(&generator);
        let generator_inv = modulus.inv(&generator)?;
        Ok(Self {
            modulus,
            generator,
            generator_inv,
        })
    }

    /// The transform shared by the toy schemes: p = 2^192 - 2^64 - 1, g = 2.
    pub fn toy() -> Result<Self> {
        let p = (BigUint::one() << TOY_MODULUS_BITS) - (BigUint::one() << 64usize) - 1u32;
        Self::new(Modulus::new(p)?, BigUint::from(TOY_GENERATOR))
    }

    pub fn modulus(&self) -> &Modulus {
        &self.modulus
    }

    pub fn forward(&self, m: &BigUint) -> BigUint {
        self.modulus.mul(m, &self.generator)
    }

    pub fn inverse(&self, c: &BigUint) -> BigUint {
        self.modulus.mul(c, &self.generator_inv)
    }
}
