//! Service status and the self-test behind it.

use crate::service::HeService;
use crate::{Result, Scheme};
use chrono::{DateTime, Utc};
use he_traits::{HeDecrypter, HeEncrypter, HeEvaluator, HeMultiplier};
use log::{error, info};
use num_bigint::BigUint;
use num_traits::ToPrimitive;
use serde::Serialize;

/// Test vectors for the CKKS self-test, with the expected results of the
/// plaintext operations.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CkksTestVector {
    /// Values to encrypt.
    pub test_data: Vec<f64>,
    /// The values added to themselves.
    pub expected_add: Vec<f64>,
    /// The values multiplied by themselves.
    pub expected_mul: Vec<f64>,
}

/// Test vectors for the BFV self-test, with the expected results of the
/// plaintext operations.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BfvTestVector {
    /// Values to encrypt.
    pub test_data: Vec<u64>,
    /// The values added to themselves.
    pub expected_add: Vec<u64>,
    /// The values multiplied by themselves.
    pub expected_mul: Vec<u64>,
}

/// Test vectors for the Paillier self-test.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PaillierTestVector {
    /// Values to encrypt.
    pub test_data: Vec<u64>,
    /// The sum of the values.
    pub expected_add: u64,
    /// Scalar by which each value is multiplied.
    pub scalar: u64,
    /// The values multiplied by the scalar.
    pub expected_mul: Vec<u64>,
}

/// The fixed vectors exercised by the self-test.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TestVectors {
    /// Paillier vectors.
    pub paillier: PaillierTestVector,
    /// CKKS vectors.
    pub ckks: CkksTestVector,
    /// BFV vectors.
    pub bfv: BfvTestVector,
}

impl Default for TestVectors {
    fn default() -> Self {
        Self {
            paillier: PaillierTestVector {
                test_data: vec![10, 5],
                expected_add: 15,
                scalar: 3,
                expected_mul: vec![30, 15],
            },
            ckks: CkksTestVector {
                test_data: vec![1.5, 2.3, 3.7, 4.1],
                expected_add: vec![3.0, 4.6, 7.4, 8.2],
                expected_mul: vec![2.25, 5.29, 13.69, 16.81],
            },
            bfv: BfvTestVector {
                test_data: vec![5, 7, 11],
                expected_add: vec![10, 14, 22],
                expected_mul: vec![25, 49, 121],
            },
        }
    }
}

/// Whether the service is usable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum StatusKind {
    /// Keys are available.
    Operational,
    /// The service cannot serve requests.
    Error,
}

/// Status of the service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ServiceStatus {
    /// Whether the service is usable.
    pub status: StatusKind,
    /// The supported schemes.
    pub schemes: Vec<Scheme>,
    /// Whether every self-test round trip succeeded.
    pub validation: bool,
    /// Why the service is not usable.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    /// When the status was computed.
    pub timestamp: DateTime<Utc>,
}

impl HeService {
    /// Returns the status of the service. The self-test runs only when the
    /// Paillier keys are available; `validation` is true when every round
    /// trip of the self-test succeeds.
    pub fn status(&self) -> ServiceStatus {
        let timestamp = Utc::now();
        if let Err(e) = self.paillier.key_pair() {
            error!("Status check failed: {e}");
            return ServiceStatus {
                status: StatusKind::Error,
                schemes: Scheme::ALL.to_vec(),
                validation: false,
                error: Some(e.to_string()),
                timestamp,
            };
        }
        let validation = self.self_test(&TestVectors::default()).unwrap_or_else(|e| {
            error!("Encryption validation failed: {e}");
            false
        });
        info!("Self-test {}", if validation { "passed" } else { "failed" });
        ServiceStatus {
            status: StatusKind::Operational,
            schemes: Scheme::ALL.to_vec(),
            validation,
            error: None,
            timestamp,
        }
    }

    /// Runs the round trips of every scheme on `vectors`.
    pub fn self_test(&self, vectors: &TestVectors) -> Result<bool> {
        Ok(self.paillier_self_test(&vectors.paillier)?
            && self.ckks_self_test(&vectors.ckks)?
            && self.bfv_self_test(&vectors.bfv)?)
    }

    fn paillier_self_test(&self, v: &PaillierTestVector) -> Result<bool> {
        let data = v.test_data.iter().map(|x| BigUint::from(*x)).collect::<Vec<_>>();
        let mut encrypted = Vec::with_capacity(data.len());
        for m in &data {
            let ct = self.paillier.try_encrypt(m)?;
            let decrypted: BigUint = self.paillier.try_decrypt(&ct)?;
            if &decrypted != m {
                return Ok(false);
            }
            encrypted.push(ct);
        }

        if let Some((first, rest)) = encrypted.split_first() {
            let mut sum = first.clone();
            for ct in rest {
                sum = self.paillier.try_add(&sum, ct)?;
            }
            if self.paillier.try_decrypt(&sum)? != BigUint::from(v.expected_add) {
                return Ok(false);
            }
        }

        let k = BigUint::from(v.scalar);
        for (ct, expected) in encrypted.iter().zip(&v.expected_mul) {
            let product = self.paillier.try_mul(ct, &k)?;
            if self.paillier.try_decrypt(&product)? != BigUint::from(*expected) {
                return Ok(false);
            }
        }
        Ok(true)
    }

    fn ckks_self_test(&self, v: &CkksTestVector) -> Result<bool> {
        let ct = self.ckks.try_encrypt(v.test_data.as_slice())?;
        let decrypted = self.ckks.try_decrypt(&ct)?;
        let tolerance = self
            .ckks
            .parameters()
            .scaling_factor()
            .to_f64()
            .map_or(0.0, f64::recip);
        Ok(decrypted.len() == v.test_data.len()
            && decrypted
                .iter()
                .zip(&v.test_data)
                .all(|(x, y)| (x - y).abs() <= tolerance))
    }

    fn bfv_self_test(&self, v: &BfvTestVector) -> Result<bool> {
        let data = v.test_data.iter().map(|x| BigUint::from(*x)).collect::<Vec<_>>();
        let ct = self.bfv.try_encrypt(data.as_slice())?;
        let decrypted = self.bfv.try_decrypt(&ct)?;
        Ok(decrypted.len() >= data.len()
            && decrypted[..data.len()] == data[..]
            && decrypted[data.len()..].iter().all(|x| x == &BigUint::default()))
    }
}
