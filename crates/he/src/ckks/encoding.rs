//! Fixed-point encoding of floats into coefficient vectors.

use crate::{Error, Result};
use he_math::zn::Modulus;
use num_bigint::{BigInt, BigUint};
use num_traits::{FromPrimitive, ToPrimitive};

/// Encodes the first `slot_count` values into a zero-padded vector of `degree`
/// coefficients: each value is multiplied by `scale`, rounded to the nearest
/// integer and reduced modulo `modulus`.
///
/// Values whose scaled magnitude exceeds half the modulus wrap around.
pub(crate) fn encode(
    values: &[f64],
    slot_count: usize,
    degree: usize,
    scale: f64,
    modulus: &Modulus,
) -> Result<Vec<BigUint>> {
    let mut coefficients = vec![BigUint::default(); degree];
    for (c, v) in coefficients.iter_mut().zip(values.iter().take(slot_count)) {
        let scaled = BigInt::from_f64((v * scale).round())
            .ok_or_else(|| Error::Encryption(format!("cannot encode {v}")))?;
        *c = modulus.reduce_signed(&scaled);
    }
    Ok(coefficients)
}

/// Decodes the first `slot_count` coefficients back into floats.
pub(crate) fn decode(
    coefficients: &[BigUint],
    slot_count: usize,
    scale: f64,
    modulus: &Modulus,
) -> Result<Vec<f64>> {
    coefficients
        .iter()
        .take(slot_count)
        .map(|c| {
            modulus
                .center(&modulus.reduce(c))
                .to_f64()
                .map(|x| x / scale)
                .ok_or_else(|| Error::Decryption(format!("cannot decode {c}")))
        })
        .collect()
}
