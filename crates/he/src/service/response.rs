//! Responses returned by the service.

use crate::paillier::PublicKey;
use crate::service::{ComputationResult, EncryptedData, Plaintext, ServiceStatus};
use crate::{Error, Operation, Scheme};
use chrono::{DateTime, Utc};
use serde::Serialize;

/// A response; each variant serializes as a flat JSON object.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Response {
    /// Answer to `encrypt`.
    #[serde(rename_all = "camelCase")]
    Encrypted {
        /// The ciphertext.
        encrypted_data: EncryptedData,
        /// The scheme used.
        scheme: Scheme,
        /// When the response was produced.
        timestamp: DateTime<Utc>,
    },
    /// Answer to `decrypt`, `ckks-decrypt` and `bfv-decrypt`.
    #[serde(rename_all = "camelCase")]
    Decrypted {
        /// The plaintext.
        decrypted_data: Plaintext,
        /// When the response was produced.
        timestamp: DateTime<Utc>,
    },
    /// Answer to `add`, `multiply` and `multiply-ciphertexts`.
    #[serde(rename_all = "camelCase")]
    Computed {
        /// The result of the operation.
        result: ComputationResult,
        /// The operation performed.
        operation: Operation,
        /// When the response was produced.
        timestamp: DateTime<Utc>,
    },
    /// Answer to `ckks-encrypt`.
    #[serde(rename_all = "camelCase")]
    CkksEncrypted {
        /// The ciphertext.
        encrypted_data: EncryptedData,
        /// The number of meaningful slots.
        slot_count: usize,
        /// When the response was produced.
        timestamp: DateTime<Utc>,
    },
    /// Answer to `bfv-encrypt`.
    #[serde(rename_all = "camelCase")]
    BfvEncrypted {
        /// The ciphertext.
        encrypted_data: EncryptedData,
        /// When the response was produced.
        timestamp: DateTime<Utc>,
    },
    /// Answer to `status`.
    Status(ServiceStatus),
    /// Answer to `batch-encrypt`.
    #[serde(rename_all = "camelCase")]
    BatchEncrypted {
        /// The ciphertexts, in the order of the values.
        encrypted_data: Vec<EncryptedData>,
        /// The number of ciphertexts.
        count: usize,
        /// When the response was produced.
        timestamp: DateTime<Utc>,
    },
    /// Answer to `rotate-keys`.
    #[serde(rename_all = "camelCase")]
    KeysRotated {
        /// The new public key.
        public_key: PublicKey,
        /// When the response was produced.
        timestamp: DateTime<Utc>,
    },
    /// Any request that failed.
    #[serde(rename_all = "camelCase")]
    Failure {
        /// The error message.
        error: String,
        /// When the response was produced.
        timestamp: DateTime<Utc>,
    },
}

impl Response {
    /// Returns whether the response reports a failure.
    #[must_use]
    pub const fn is_failure(&self) -> bool {
        matches!(self, Response::Failure { .. })
    }
}

impl From<Error> for Response {
    fn from(e: Error) -> Self {
        Response::Failure {
            error: e.to_string(),
            timestamp: Utc::now(),
        }
    }
}
