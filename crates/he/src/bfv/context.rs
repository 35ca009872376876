//! The simplified BFV engine

use crate::bfv::{pack, unpack, BfvEncryptedData, BfvParameters};
use crate::transform::ScalarTransform;
use crate::{Error, ParametersError, Result};
use he_math::zn::Modulus;
use he_traits::{HeDecrypter, HeEncrypter, HeEvaluator, HeMultiplier};
use num_bigint::BigUint;
use std::sync::Arc;

/// The simplified BFV engine.
///
/// Integers are packed into 16-bit slots of a single integer, which is hidden
/// behind a fixed scalar transform. Additions and multiplications act on the
/// packed integers modulo the first coefficient modulus; carries between slots
/// are not handled.
#[derive(Debug, Clone)]
pub struct BfvContext {
    par: Arc<BfvParameters>,
    q0: Modulus,
    transform: ScalarTransform,
}

impl BfvContext {
    /// Creates an engine for the given parameters.
    pub fn new(par: &Arc<BfvParameters>) -> Result<Self> {
        let q0 = par
            .moduli()
            .first()
            .cloned()
            .ok_or(ParametersError::NoModulus)?;
        Ok(Self {
            par: par.clone(),
            q0: Modulus::new(q0)?,
            transform: ScalarTransform::toy()?,
        })
    }

    /// Returns the parameters of the engine.
    #[must_use]
    pub fn parameters(&self) -> &Arc<BfvParameters> {
        &self.par
    }

    /// Multiplies `ct` by the scalar `k`, by encrypting `k` and multiplying
    /// both ciphertexts.
    pub fn multiply_scalar(&self, ct: &BfvEncryptedData, k: &BigUint) -> Result<BfvEncryptedData> {
        let scalar = self.try_encrypt(std::slice::from_ref(k))?;
        self.try_mul(ct, &scalar)
    }

    fn operands(&self, lhs: &BfvEncryptedData, rhs: &BfvEncryptedData) -> Result<(BigUint, BigUint)> {
        Ok((
            lhs.value_or(Error::Evaluation)?,
            rhs.value_or(Error::Evaluation)?,
        ))
    }
}

impl HeEncrypter<[BigUint], BfvEncryptedData> for BfvContext {
    type Error = Error;

    fn try_encrypt(&self, values: &[BigUint]) -> Result<BfvEncryptedData> {
        let packed = self.transform.modulus().reduce(&pack(values));
        Ok(BfvEncryptedData::new(
            &self.transform.forward(&packed),
            self.par.as_ref().clone(),
        ))
    }
}

impl HeDecrypter<BfvEncryptedData, Vec<BigUint>> for BfvContext {
    type Error = Error;

    fn try_decrypt(&self, ct: &BfvEncryptedData) -> Result<Vec<BigUint>> {
        let c = ct.value_or(Error::Decryption)?;
        Ok(unpack(&self.transform.inverse(&c)))
    }
}

impl HeEvaluator<BfvEncryptedData> for BfvContext {
    type Error = Error;

    fn try_add(&self, lhs: &BfvEncryptedData, rhs: &BfvEncryptedData) -> Result<BfvEncryptedData> {
        let (a, b) = self.operands(lhs, rhs)?;
        Ok(BfvEncryptedData::new(
            &self.q0.add(&a, &b),
            lhs.parameters.clone(),
        ))
    }
}

impl HeMultiplier<BfvEncryptedData> for BfvContext {
    type Error = Error;

    fn try_mul(&self, lhs: &BfvEncryptedData, rhs: &BfvEncryptedData) -> Result<BfvEncryptedData> {
        let (a, b) = self.operands(lhs, rhs)?;
        Ok(BfvEncryptedData::new(
            &self.q0.mul(&a, &b),
            lhs.parameters.clone(),
        ))
    }
}
