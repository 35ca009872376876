use thiserror::Error;

/// The Result type for this library.
pub type Result<T> = std::result::Result<T, Error>;

/// Enum encapsulating all the possible errors from this library.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum Error {
    /// Indicates that no key material is available yet.
    #[error("Homomorphic encryption keys not initialized")]
    NotInitialized,

    /// Indicates that a key pair could not be generated.
    #[error("Key generation failed: {0}")]
    KeyGeneration(String),

    /// Indicates that a value could not be encrypted.
    #[error("Encryption failed: {0}")]
    Encryption(String),

    /// Indicates that a ciphertext could not be decrypted.
    #[error("Decryption failed: {0}")]
    Decryption(String),

    /// Indicates that a homomorphic operation could not be evaluated.
    #[error("Homomorphic evaluation failed: {0}")]
    Evaluation(String),

    /// Indicates a mismatch between the schemes of the operands.
    #[error("Scheme mismatch: found {0}, expected {1}")]
    SchemeMismatch(String, String),

    /// Indicates that the scheme is not supported.
    #[error("Does not support {0} scheme")]
    UnsupportedScheme(String),

    /// Indicates that an error from the underlying mathematical library was
    /// encountered.
    #[error("{0}")]
    MathError(he_math::Error),

    /// Indicates a parameter error.
    #[error("{0}")]
    ParametersError(ParametersError),

    /// Indicates a serialization error.
    #[error("Serialization error: {0}")]
    SerializationError(String),
}

impl From<he_math::Error> for Error {
    fn from(e: he_math::Error) -> Self {
        Error::MathError(e)
    }
}

impl From<ParametersError> for Error {
    fn from(e: ParametersError) -> Self {
        Error::ParametersError(e)
    }
}

/// Separate enum to indicate parameters-related errors.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ParametersError {
    /// Indicates that the modulus size is invalid.
    #[error("Invalid modulus size: {0}, expected an even integer between {1} and {2}")]
    InvalidModulusSize(usize, usize, usize),

    /// Indicates that the degree is invalid.
    #[error("Invalid degree: {0} is not a power of 2 larger than 8")]
    InvalidDegree(usize),

    /// Indicates that no ciphertext modulus was specified.
    #[error("At least one coefficient modulus is required")]
    NoModulus,

    /// Indicates that the scaling factor is invalid.
    #[error("Invalid scaling factor: {0}")]
    InvalidScalingFactor(String),
}
