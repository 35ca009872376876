//! Requests accepted by the service.

use crate::bfv::BfvEncryptedData;
use crate::ckks::CkksEncryptedData;
use crate::service::{EncryptedData, Plaintext, Scalar};
use crate::Scheme;
use serde::Deserialize;

/// A request, tagged by its operation name.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "op", rename_all = "kebab-case")]
pub enum Request {
    /// Encrypt a plaintext.
    Encrypt(EncryptRequest),
    /// Decrypt a ciphertext of any scheme.
    Decrypt(DecryptRequest),
    /// Add two ciphertexts.
    Add(BinaryRequest),
    /// Multiply a ciphertext by a scalar.
    Multiply(MultiplyRequest),
    /// Multiply two CKKS or BFV ciphertexts.
    MultiplyCiphertexts(BinaryRequest),
    /// Encrypt floats with CKKS.
    CkksEncrypt(CkksEncryptRequest),
    /// Decrypt a CKKS ciphertext.
    CkksDecrypt(CkksDecryptRequest),
    /// Encrypt decimal integers with BFV.
    BfvEncrypt(BfvEncryptRequest),
    /// Decrypt a BFV ciphertext.
    BfvDecrypt(BfvDecryptRequest),
    /// Report the status of the service.
    Status,
    /// Encrypt several values independently.
    BatchEncrypt(BatchEncryptRequest),
    /// Replace the Paillier key pair.
    RotateKeys,
}

impl Request {
    /// Returns the operation name, as it appears on the wire.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Request::Encrypt(_) => "encrypt",
            Request::Decrypt(_) => "decrypt",
            Request::Add(_) => "add",
            Request::Multiply(_) => "multiply",
            Request::MultiplyCiphertexts(_) => "multiply-ciphertexts",
            Request::CkksEncrypt(_) => "ckks-encrypt",
            Request::CkksDecrypt(_) => "ckks-decrypt",
            Request::BfvEncrypt(_) => "bfv-encrypt",
            Request::BfvDecrypt(_) => "bfv-decrypt",
            Request::Status => "status",
            Request::BatchEncrypt(_) => "batch-encrypt",
            Request::RotateKeys => "rotate-keys",
        }
    }
}

/// `encrypt {data, scheme?}`; the scheme defaults to Paillier.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EncryptRequest {
    /// The plaintext.
    pub data: Plaintext,
    /// The scheme to encrypt with.
    #[serde(default)]
    pub scheme: Option<Scheme>,
}

/// `decrypt {encryptedData}`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DecryptRequest {
    /// The ciphertext.
    pub encrypted_data: EncryptedData,
}

/// `add {encryptedA, encryptedB}` and `multiply-ciphertexts {encryptedA,
/// encryptedB}`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BinaryRequest {
    /// The left operand.
    pub encrypted_a: EncryptedData,
    /// The right operand.
    pub encrypted_b: EncryptedData,
}

/// `multiply {encryptedData, scalar}`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MultiplyRequest {
    /// The ciphertext.
    pub encrypted_data: EncryptedData,
    /// The scalar.
    pub scalar: Scalar,
}

/// `ckks-encrypt {data}`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CkksEncryptRequest {
    /// The floats to encrypt.
    pub data: Vec<f64>,
}

/// `ckks-decrypt {encryptedData}`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CkksDecryptRequest {
    /// The CKKS ciphertext.
    pub encrypted_data: CkksEncryptedData,
}

/// `bfv-encrypt {data}`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BfvEncryptRequest {
    /// The non-negative integers to encrypt, as decimal strings.
    pub data: Vec<String>,
}

/// `bfv-decrypt {encryptedData}`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BfvDecryptRequest {
    /// The BFV ciphertext.
    pub encrypted_data: BfvEncryptedData,
}

/// `batch-encrypt {data, scheme?}`; the scheme defaults to Paillier.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BatchEncryptRequest {
    /// The values to encrypt, as decimal strings.
    pub data: Vec<String>,
    /// The scheme to encrypt with.
    #[serde(default)]
    pub scheme: Option<Scheme>,
}

#[cfg(test)]
mod tests {
    use super::{BatchEncryptRequest, EncryptRequest, Request};
    use crate::service::{Plaintext, Scalar};
    use crate::Scheme;
    use std::error::Error as StdError;

    #[test]
    fn parse() -> Result<(), Box<dyn StdError>> {
        assert_eq!(
            serde_json::from_str::<Request>(r#"{"op":"encrypt","data":"42"}"#)?,
            Request::Encrypt(EncryptRequest {
                data: Plaintext::Integer("42".to_string()),
                scheme: None,
            })
        );
        assert_eq!(
            serde_json::from_str::<Request>(r#"{"op":"encrypt","data":[1.5],"scheme":"ckks"}"#)?,
            Request::Encrypt(EncryptRequest {
                data: Plaintext::Floats(vec![1.5]),
                scheme: Some(Scheme::Ckks),
            })
        );
        assert_eq!(
            serde_json::from_str::<Request>(r#"{"op":"batch-encrypt","data":["1","2"]}"#)?,
            Request::BatchEncrypt(BatchEncryptRequest {
                data: vec!["1".to_string(), "2".to_string()],
                scheme: None,
            })
        );
        assert_eq!(serde_json::from_str::<Request>(r#"{"op":"status"}"#)?, Request::Status);
        assert_eq!(
            serde_json::from_str::<Request>(r#"{"op":"rotate-keys"}"#)?,
            Request::RotateKeys
        );
        Ok(())
    }

    #[test]
    fn multiply() -> Result<(), Box<dyn StdError>> {
        let json = r#"{"op":"multiply","scalar":3,"encryptedData":{"scheme":"bfv","ciphertext":"6","parameters":{"polynomialDegree":4096,"plaintextModulus":"65537","coefficientModulus":["34358689793"]}}}"#;
        match serde_json::from_str::<Request>(json)? {
            Request::Multiply(m) => {
                assert_eq!(m.scalar, Scalar::Integer(3));
                assert_eq!(m.encrypted_data.scheme(), Scheme::Bfv);
            }
            other => panic!("unexpected request {other:?}"),
        }
        Ok(())
    }

    #[test]
    fn rejects_invalid_requests() {
        for json in [
            r#"{"op":"unknown"}"#,
            r#"{"data":"42"}"#,
            r#"{"op":"encrypt"}"#,
            r#"{"op":"encrypt","data":"42","scheme":"rsa"}"#,
            r#"{"op":"ckks-encrypt","data":["a"]}"#,
        ] {
            assert!(serde_json::from_str::<Request>(json).is_err(), "{json}");
        }
    }

    #[test]
    fn names() -> Result<(), Box<dyn StdError>> {
        for name in ["status", "rotate-keys"] {
            let request: Request = serde_json::from_str(&format!(r#"{{"op":"{name}"}}"#))?;
            assert_eq!(request.name(), name);
        }
        Ok(())
    }
}
