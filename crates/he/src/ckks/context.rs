//! The simplified CKKS engine

use crate::ckks::{decode, encode, CkksEncryptedData, CkksParameters};
use crate::transform::ScalarTransform;
use crate::{Error, ParametersError, Result};
use he_math::zn::Modulus;
use he_traits::{HeDecrypter, HeEncrypter, HeEvaluator, HeMultiplier};
use itertools::izip;
use log::debug;
use num_bigint::BigUint;
use num_traits::ToPrimitive;
use std::sync::Arc;

/// The simplified CKKS engine.
///
/// Floats are scaled into fixed-point integers, and the integers are hidden
/// behind a fixed scalar transform: there is no key and no security. Additions
/// and multiplications act slot by slot, modulo the coefficient moduli taken
/// in turn.
#[derive(Debug, Clone)]
pub struct CkksContext {
    par: Arc<CkksParameters>,
    moduli: Vec<Modulus>,
    scale: f64,
    transform: ScalarTransform,
}

impl CkksContext {
    /// Creates an engine for the given parameters.
    pub fn new(par: &Arc<CkksParameters>) -> Result<Self> {
        let moduli = par
            .moduli()
            .iter()
            .map(|q| Modulus::new(q.clone()))
            .collect::<he_math::Result<Vec<_>>>()?;
        let scale = par
            .scaling_factor()
            .to_f64()
            .filter(|s| s.is_finite() && *s > 0.0)
            .ok_or_else(|| {
                ParametersError::InvalidScalingFactor(par.scaling_factor().to_string())
            })?;
        Ok(Self {
            par: par.clone(),
            moduli,
            scale,
            transform: ScalarTransform::toy()?,
        })
    }

    /// Returns the parameters of the engine.
    #[must_use]
    pub fn parameters(&self) -> &Arc<CkksParameters> {
        &self.par
    }

    /// Multiplies every slot of `ct` by the scalar `k`, by encrypting `k` in
    /// as many slots and multiplying both ciphertexts.
    pub fn multiply_scalar(&self, ct: &CkksEncryptedData, k: f64) -> Result<CkksEncryptedData> {
        if ct.slot_count > ct.ciphertext.len().min(self.par.max_slots()) {
            return Err(Error::Evaluation(format!(
                "{} slots announced for {} coefficients",
                ct.slot_count,
                ct.ciphertext.len()
            )));
        }
        let scalar = self.try_encrypt(vec![k; ct.slot_count].as_slice())?;
        self.try_mul(ct, &scalar)
    }

    fn slotwise<F>(
        &self,
        lhs: &CkksEncryptedData,
        rhs: &CkksEncryptedData,
        op: F,
    ) -> Result<CkksEncryptedData>
    where
        F: Fn(&Modulus, &BigUint, &BigUint) -> BigUint,
    {
        let a = lhs.coefficients_or(Error::Evaluation)?;
        let b = rhs.coefficients_or(Error::Evaluation)?;
        if a.len() != b.len() {
            return Err(Error::Evaluation(format!(
                "ciphertexts have {} and {} coefficients",
                a.len(),
                b.len()
            )));
        }
        let result = izip!(&a, &b, self.moduli.iter().cycle())
            .map(|(ai, bi, qi)| op(qi, ai, bi))
            .collect::<Vec<_>>();
        Ok(CkksEncryptedData::new(
            &result,
            lhs.parameters.clone(),
            lhs.slot_count,
        ))
    }
}

impl HeEncrypter<[f64], CkksEncryptedData> for CkksContext {
    type Error = Error;

    fn try_encrypt(&self, values: &[f64]) -> Result<CkksEncryptedData> {
        let slot_count = values.len().min(self.par.max_slots());
        if slot_count < values.len() {
            debug!(
                "Only the first {slot_count} of {} values are encoded",
                values.len()
            );
        }
        let mut coefficients = encode(
            values,
            slot_count,
            self.par.degree(),
            self.scale,
            self.transform.modulus(),
        )?;
        coefficients
            .iter_mut()
            .for_each(|c| *c = self.transform.forward(c));
        Ok(CkksEncryptedData::new(
            &coefficients,
            self.par.as_ref().clone(),
            slot_count,
        ))
    }
}

impl HeDecrypter<CkksEncryptedData, Vec<f64>> for CkksContext {
    type Error = Error;

    fn try_decrypt(&self, ct: &CkksEncryptedData) -> Result<Vec<f64>> {
        if ct.slot_count > ct.ciphertext.len() {
            return Err(Error::Decryption(format!(
                "{} slots announced for {} coefficients",
                ct.slot_count,
                ct.ciphertext.len()
            )));
        }
        let coefficients = ct
            .coefficients_or(Error::Decryption)?
            .iter()
            .take(ct.slot_count)
            .map(|c| self.transform.inverse(c))
            .collect::<Vec<_>>();
        decode(
            &coefficients,
            ct.slot_count,
            self.scale,
            self.transform.modulus(),
        )
    }
}

impl HeEvaluator<CkksEncryptedData> for CkksContext {
    type Error = Error;

    fn try_add(&self, lhs: &CkksEncryptedData, rhs: &CkksEncryptedData) -> Result<CkksEncryptedData> {
        self.slotwise(lhs, rhs, |q, a, b| q.add(a, b))
    }
}

impl HeMultiplier<CkksEncryptedData> for CkksContext {
    type Error = Error;

    /// Slot by slot product; there is no relinearization.
    fn try_mul(&self, lhs: &CkksEncryptedData, rhs: &CkksEncryptedData) -> Result<CkksEncryptedData> {
        self.slotwise(lhs, rhs, |q, a, b| q.mul(a, b))
    }
}
