//! Plaintexts and ciphertexts as they cross the service boundary.

use crate::bfv::BfvEncryptedData;
use crate::ckks::CkksEncryptedData;
use crate::paillier::EncryptedValue;
use crate::{Error, Operation, Result, Scheme};
use chrono::{DateTime, Utc};
use num_bigint::BigUint;
use num_traits::{FromPrimitive, ToPrimitive};
use serde::{Deserialize, Serialize};

/// A ciphertext of any of the schemes, tagged with its scheme.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "scheme", rename_all = "lowercase")]
pub enum EncryptedData {
    /// A Paillier ciphertext.
    Paillier(EncryptedValue),
    /// A CKKS ciphertext.
    Ckks(CkksEncryptedData),
    /// A BFV ciphertext.
    Bfv(BfvEncryptedData),
}

impl EncryptedData {
    /// Returns the scheme of the ciphertext.
    #[must_use]
    pub const fn scheme(&self) -> Scheme {
        match self {
            EncryptedData::Paillier(_) => Scheme::Paillier,
            EncryptedData::Ckks(_) => Scheme::Ckks,
            EncryptedData::Bfv(_) => Scheme::Bfv,
        }
    }
}

impl From<EncryptedValue> for EncryptedData {
    fn from(ct: EncryptedValue) -> Self {
        EncryptedData::Paillier(ct)
    }
}

impl From<CkksEncryptedData> for EncryptedData {
    fn from(ct: CkksEncryptedData) -> Self {
        EncryptedData::Ckks(ct)
    }
}

impl From<BfvEncryptedData> for EncryptedData {
    fn from(ct: BfvEncryptedData) -> Self {
        EncryptedData::Bfv(ct)
    }
}

/// A plaintext: a single decimal integer for Paillier, decimal integers for
/// BFV and floats for CKKS.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Plaintext {
    /// A single decimal integer.
    Integer(String),
    /// A sequence of decimal integers.
    Integers(Vec<String>),
    /// A sequence of floats.
    Floats(Vec<f64>),
}

impl Plaintext {
    /// Returns the single decimal integer of a Paillier plaintext.
    pub(crate) fn integer(&self) -> Result<&str> {
        match self {
            Plaintext::Integer(s) => Ok(s),
            Plaintext::Integers(v) if v.len() == 1 => Ok(&v[0]),
            _ => Err(Error::Encryption(
                "expected a single decimal integer".to_string(),
            )),
        }
    }

    /// Returns the non-negative integers of a BFV plaintext.
    pub(crate) fn integers(&self) -> Result<Vec<BigUint>> {
        match self {
            Plaintext::Integer(s) => parse_integers(std::slice::from_ref(s)),
            Plaintext::Integers(v) => parse_integers(v),
            Plaintext::Floats(_) => Err(Error::Encryption(
                "expected decimal integers".to_string(),
            )),
        }
    }

    /// Returns the floats of a CKKS plaintext.
    pub(crate) fn floats(&self) -> Result<Vec<f64>> {
        match self {
            Plaintext::Integer(s) => parse_floats(std::slice::from_ref(s)),
            Plaintext::Integers(v) => parse_floats(v),
            Plaintext::Floats(v) => Ok(v.clone()),
        }
    }
}

/// Parses non-negative decimal integers.
pub(crate) fn parse_integers<S: AsRef<str>>(values: &[S]) -> Result<Vec<BigUint>> {
    values
        .iter()
        .map(|v| {
            let v = v.as_ref();
            v.trim()
                .parse::<BigUint>()
                .map_err(|_| Error::Encryption(format!("invalid integer {v:?}")))
        })
        .collect()
}

/// Parses floats given as decimal strings.
pub(crate) fn parse_floats<S: AsRef<str>>(values: &[S]) -> Result<Vec<f64>> {
    values
        .iter()
        .map(|v| {
            let v = v.as_ref();
            v.trim()
                .parse::<f64>()
                .map_err(|_| Error::Encryption(format!("invalid number {v:?}")))
        })
        .collect()
}

/// The scalar of a homomorphic scalar multiplication.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Scalar {
    /// A non-negative integer.
    Integer(u64),
    /// A float.
    Float(f64),
    /// An integer or a float, as a decimal string.
    Decimal(String),
}

impl Scalar {
    /// Returns the scalar as a non-negative integer.
    pub(crate) fn to_biguint(&self) -> Result<BigUint> {
        let invalid = || Error::Evaluation(format!("invalid scalar {self}"));
        match self {
            Scalar::Integer(k) => Ok(BigUint::from(*k)),
            Scalar::Float(x) if x.fract() == 0.0 => BigUint::from_f64(*x).ok_or_else(invalid),
            Scalar::Float(_) => Err(invalid()),
            Scalar::Decimal(s) => s.trim().parse::<BigUint>().map_err(|_| invalid()),
        }
    }

    /// Returns the scalar as a float.
    pub(crate) fn to_f64(&self) -> Result<f64> {
        match self {
            Scalar::Integer(k) => k
                .to_f64()
                .ok_or_else(|| Error::Evaluation(format!("invalid scalar {self}"))),
            Scalar::Float(x) => Ok(*x),
            Scalar::Decimal(s) => s
                .trim()
                .parse::<f64>()
                .map_err(|_| Error::Evaluation(format!("invalid scalar {self}"))),
        }
    }
}

impl std::fmt::Display for Scalar {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Scalar::Integer(k) => write!(f, "{k}"),
            Scalar::Float(x) => write!(f, "{x}"),
            Scalar::Decimal(s) => write!(f, "{s:?}"),
        }
    }
}

/// The result of a homomorphic operation.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ComputationResult {
    /// The encrypted result.
    pub encrypted_result: EncryptedData,
    /// The operation performed.
    pub operation: Operation,
    /// When the operation was performed.
    pub timestamp: DateTime<Utc>,
}

impl ComputationResult {
    pub(crate) fn new(encrypted_result: EncryptedData, operation: Operation) -> Self {
        Self {
            encrypted_result,
            operation,
            timestamp: Utc::now(),
        }
    }
}
