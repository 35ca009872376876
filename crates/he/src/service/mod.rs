#![warn(missing_docs, unused_imports)]

//! A request/response façade over the three schemes.
//!
//! The façade owns one engine per scheme and dispatches each operation on the
//! scheme carried by the payload, or on the scheme requested explicitly.

mod payload;
mod request;
mod response;
mod status;

pub use payload::{ComputationResult, EncryptedData, Plaintext, Scalar};
pub use request::{
    BatchEncryptRequest, BfvDecryptRequest, BfvEncryptRequest, BinaryRequest, CkksDecryptRequest,
    CkksEncryptRequest, DecryptRequest, EncryptRequest, MultiplyRequest, Request,
};
pub use response::Response;
pub use status::{
    BfvTestVector, CkksTestVector, PaillierTestVector, ServiceStatus, StatusKind, TestVectors,
};

use crate::bfv::{BfvContext, BfvEncryptedData, BfvParameters};
use crate::ckks::{CkksContext, CkksEncryptedData, CkksParameters};
use crate::paillier::{PaillierContext, PaillierParameters, PublicKey};
use crate::{Error, Operation, Result, Scheme};
use chrono::Utc;
use he_traits::{HeDecrypter, HeEncrypter, HeEvaluator, HeMultiplier};
use log::{debug, error};
use num_bigint::BigUint;
use payload::{parse_floats, parse_integers};
use rand::{thread_rng, CryptoRng, RngCore};
use rayon::prelude::{IntoParallelRefIterator, ParallelIterator};
use std::sync::Arc;

/// The homomorphic encryption service.
#[derive(Debug)]
pub struct HeService {
    paillier: PaillierContext,
    ckks: CkksContext,
    bfv: BfvContext,
}

/// Builder for a [`HeService`].
#[derive(Debug)]
pub struct HeServiceBuilder {
    paillier: Arc<PaillierParameters>,
    ckks: Arc<CkksParameters>,
    bfv: Arc<BfvParameters>,
    generate_keys: bool,
}

impl Default for HeServiceBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl HeServiceBuilder {
    /// Creates a new instance of the builder, with the default parameters of
    /// every scheme. By default, the Paillier keys are generated when the
    /// service is built.
    #[must_use]
    pub fn new() -> Self {
        Self {
            paillier: PaillierParameters::default_arc(),
            ckks: CkksParameters::default_arc(),
            bfv: BfvParameters::default_arc(),
            generate_keys: true,
        }
    }

    /// Sets the Paillier parameters.
    pub fn set_paillier_parameters(&mut self, par: &Arc<PaillierParameters>) -> &mut Self {
        self.paillier = par.clone();
        self
    }

    /// Sets the CKKS parameters.
    pub fn set_ckks_parameters(&mut self, par: &Arc<CkksParameters>) -> &mut Self {
        self.ckks = par.clone();
        self
    }

    /// Sets the BFV parameters.
    pub fn set_bfv_parameters(&mut self, par: &Arc<BfvParameters>) -> &mut Self {
        self.bfv = par.clone();
        self
    }

    /// Sets whether the Paillier keys are generated when the service is built.
    /// Without keys, the Paillier operations fail until
    /// [`HeService::regenerate_keys`] is called.
    pub fn set_generate_keys(&mut self, generate_keys: bool) -> &mut Self {
        self.generate_keys = generate_keys;
        self
    }

    /// Build a new `HeService`.
    pub fn build(&self) -> Result<HeService> {
        self.build_with_rng(&mut thread_rng())
    }

    /// Build a new `HeService`, generating the keys with `rng`.
    pub fn build_with_rng<R: RngCore + CryptoRng>(&self, rng: &mut R) -> Result<HeService> {
        let paillier = if self.generate_keys {
            PaillierContext::with_keys(&self.paillier, rng)?
        } else {
            PaillierContext::new(&self.paillier)
        };
        Ok(HeService {
            paillier,
            ckks: CkksContext::new(&self.ckks)?,
            bfv: BfvContext::new(&self.bfv)?,
        })
    }
}

impl HeService {
    /// Returns the Paillier engine.
    #[must_use]
    pub fn paillier(&self) -> &PaillierContext {
        &self.paillier
    }

    /// Returns the CKKS engine.
    #[must_use]
    pub fn ckks(&self) -> &CkksContext {
        &self.ckks
    }

    /// Returns the BFV engine.
    #[must_use]
    pub fn bfv(&self) -> &BfvContext {
        &self.bfv
    }

    /// Encrypts `data` with `scheme`.
    pub fn encrypt(&self, data: &Plaintext, scheme: Scheme) -> Result<EncryptedData> {
        Ok(match scheme {
            Scheme::Paillier => self.paillier.try_encrypt(data.integer()?)?.into(),
            Scheme::Ckks => self.ckks.try_encrypt(data.floats()?.as_slice())?.into(),
            Scheme::Bfv => self.bfv.try_encrypt(data.integers()?.as_slice())?.into(),
        })
    }

    /// Decrypts `data` with the engine of its scheme.
    pub fn decrypt(&self, data: &EncryptedData) -> Result<Plaintext> {
        Ok(match data {
            EncryptedData::Paillier(ct) => {
                let m: BigUint = self.paillier.try_decrypt(ct)?;
                Plaintext::Integer(m.to_str_radix(10))
            }
            EncryptedData::Ckks(ct) => Plaintext::Floats(self.ckks.try_decrypt(ct)?),
            EncryptedData::Bfv(ct) => Plaintext::Integers(
                self.bfv
                    .try_decrypt(ct)?
                    .iter()
                    .map(|v| v.to_str_radix(10))
                    .collect(),
            ),
        })
    }

    /// Adds two ciphertexts of the same scheme.
    pub fn add(&self, a: &EncryptedData, b: &EncryptedData) -> Result<ComputationResult> {
        let encrypted_result: EncryptedData = match (a, b) {
            (EncryptedData::Paillier(a), EncryptedData::Paillier(b)) => {
                self.paillier.try_add(a, b)?.into()
            }
            (EncryptedData::Ckks(a), EncryptedData::Ckks(b)) => self.ckks.try_add(a, b)?.into(),
            (EncryptedData::Bfv(a), EncryptedData::Bfv(b)) => self.bfv.try_add(a, b)?.into(),
            _ => return Err(b.scheme().mismatch(a.scheme())),
        };
        Ok(ComputationResult::new(encrypted_result, Operation::Addition))
    }

    /// Multiplies a ciphertext by a scalar. CKKS and BFV encrypt the scalar
    /// and multiply both ciphertexts.
    pub fn multiply(&self, data: &EncryptedData, scalar: &Scalar) -> Result<ComputationResult> {
        let encrypted_result: EncryptedData = match data {
            EncryptedData::Paillier(ct) => self.paillier.try_mul(ct, &scalar.to_biguint()?)?.into(),
            EncryptedData::Ckks(ct) => self.ckks.multiply_scalar(ct, scalar.to_f64()?)?.into(),
            EncryptedData::Bfv(ct) => self.bfv.multiply_scalar(ct, &scalar.to_biguint()?)?.into(),
        };
        Ok(ComputationResult::new(
            encrypted_result,
            Operation::ScalarMultiplication,
        ))
    }

    /// Multiplies two CKKS or two BFV ciphertexts. Paillier ciphertexts can
    /// only be multiplied by a scalar.
    pub fn multiply_ciphertexts(
        &self,
        a: &EncryptedData,
        b: &EncryptedData,
    ) -> Result<ComputationResult> {
        let encrypted_result: EncryptedData = match (a, b) {
            (EncryptedData::Paillier(_), EncryptedData::Paillier(_)) => {
                return Err(Error::Evaluation(
                    "the paillier scheme only supports scalar multiplication".to_string(),
                ))
            }
            (EncryptedData::Ckks(a), EncryptedData::Ckks(b)) => self.ckks.try_mul(a, b)?.into(),
            (EncryptedData::Bfv(a), EncryptedData::Bfv(b)) => self.bfv.try_mul(a, b)?.into(),
            _ => return Err(b.scheme().mismatch(a.scheme())),
        };
        Ok(ComputationResult::new(
            encrypted_result,
            Operation::Multiplication,
        ))
    }

    /// Encrypts each value independently with `scheme`, preserving the order.
    /// The batch fails as a whole if any value cannot be encrypted.
    pub fn batch_encrypt<S: AsRef<str> + Sync>(
        &self,
        data: &[S],
        scheme: Scheme,
    ) -> Result<Vec<EncryptedData>> {
        match scheme {
            Scheme::Paillier => Ok(self
                .paillier
                .batch_encrypt(data)?
                .into_iter()
                .map(EncryptedData::from)
                .collect()),
            Scheme::Ckks => parse_floats(data)?
                .par_iter()
                .map(|v| {
                    self.ckks
                        .try_encrypt(std::slice::from_ref(v))
                        .map(EncryptedData::from)
                })
                .collect(),
            Scheme::Bfv => parse_integers(data)?
                .par_iter()
                .map(|v| {
                    self.bfv
                        .try_encrypt(std::slice::from_ref(v))
                        .map(EncryptedData::from)
                })
                .collect(),
        }
    }

    /// Encrypts floats with CKKS.
    pub fn ckks_encrypt(&self, data: &[f64]) -> Result<CkksEncryptedData> {
        self.ckks.try_encrypt(data)
    }

    /// Decrypts a CKKS ciphertext.
    pub fn ckks_decrypt(&self, data: &CkksEncryptedData) -> Result<Vec<f64>> {
        self.ckks.try_decrypt(data)
    }

    /// Encrypts non-negative decimal integers with BFV.
    pub fn bfv_encrypt<S: AsRef<str>>(&self, data: &[S]) -> Result<BfvEncryptedData> {
        self.bfv.try_encrypt(parse_integers(data)?.as_slice())
    }

    /// Decrypts a BFV ciphertext into decimal integers.
    pub fn bfv_decrypt(&self, data: &BfvEncryptedData) -> Result<Vec<String>> {
        Ok(self
            .bfv
            .try_decrypt(data)?
            .iter()
            .map(|v| v.to_str_radix(10))
            .collect())
    }

    /// Replaces the Paillier key pair and returns the new public key.
    pub fn regenerate_keys(&self) -> Result<PublicKey> {
        Ok(self.paillier.regenerate_keys()?.public_key())
    }

    /// Handles a request. Errors are reported as [`Response::Failure`].
    pub fn handle(&self, request: &Request) -> Response {
        debug!("Handling {} request", request.name());
        self.dispatch(request).unwrap_or_else(|e| {
            error!("{} request failed: {e}", request.name());
            e.into()
        })
    }

    /// Handles a JSON request and returns the JSON response.
    pub fn handle_json(&self, request: &str) -> String {
        let response = match serde_json::from_str::<Request>(request) {
            Ok(request) => self.handle(&request),
            Err(e) => {
                error!("Rejected malformed request: {e}");
                Error::SerializationError(e.to_string()).into()
            }
        };
        serde_json::to_string(&response).unwrap_or_else(|e| {
            serde_json::json!({
                "error": Error::SerializationError(e.to_string()).to_string(),
                "timestamp": Utc::now(),
            })
            .to_string()
        })
    }

    fn dispatch(&self, request: &Request) -> Result<Response> {
        let timestamp = Utc::now();
        Ok(match request {
            Request::Encrypt(r) => {
                let scheme = r.scheme.unwrap_or_default();
                Response::Encrypted {
                    encrypted_data: self.encrypt(&r.data, scheme)?,
                    scheme,
                    timestamp,
                }
            }
            Request::Decrypt(r) => Response::Decrypted {
                decrypted_data: self.decrypt(&r.encrypted_data)?,
                timestamp,
            },
            Request::Add(r) => {
                let result = self.add(&r.encrypted_a, &r.encrypted_b)?;
                Response::Computed {
                    operation: result.operation,
                    result,
                    timestamp,
                }
            }
            Request::Multiply(r) => {
                let result = self.multiply(&r.encrypted_data, &r.scalar)?;
                Response::Computed {
                    operation: result.operation,
                    result,
                    timestamp,
                }
            }
            Request::MultiplyCiphertexts(r) => {
                let result = self.multiply_ciphertexts(&r.encrypted_a, &r.encrypted_b)?;
                Response::Computed {
                    operation: result.operation,
                    result,
                    timestamp,
                }
            }
            Request::CkksEncrypt(r) => {
                let ct = self.ckks_encrypt(&r.data)?;
                Response::CkksEncrypted {
                    slot_count: ct.slot_count,
                    encrypted_data: ct.into(),
                    timestamp,
                }
            }
            Request::CkksDecrypt(r) => Response::Decrypted {
                decrypted_data: Plaintext::Floats(self.ckks_decrypt(&r.encrypted_data)?),
                timestamp,
            },
            Request::BfvEncrypt(r) => Response::BfvEncrypted {
                encrypted_data: self.bfv_encrypt(&r.data)?.into(),
                timestamp,
            },
            Request::BfvDecrypt(r) => Response::Decrypted {
                decrypted_data: Plaintext::Integers(self.bfv_decrypt(&r.encrypted_data)?),
                timestamp,
            },
            Request::Status => Response::Status(self.status()),
            Request::BatchEncrypt(r) => {
                let encrypted_data = self.batch_encrypt(&r.data, r.scheme.unwrap_or_default())?;
                Response::BatchEncrypted {
                    count: encrypted_data.len(),
                    encrypted_data,
                    timestamp,
                }
            }
            Request::RotateKeys => Response::KeysRotated {
                public_key: self.regenerate_keys()?,
                timestamp,
            },
        })
    }
}
