#![crate_name = "he"]
#![crate_type = "lib"]
#![warn(missing_docs, unused_imports)]

//! Homomorphic encryption for request/response services.
//!
//! The crate provides the Paillier additively homomorphic cryptosystem,
//! together with simplified CKKS and BFV engines whose "encryption" is a fixed
//! scalar transform. The toy engines carry no security guarantee and only
//! preserve the arithmetic behavior expected by existing clients.
//!
//! All the engines are reachable through [`service::HeService`], which
//! dispatches on the [`Scheme`] tag of requests and payloads.

mod errors;
mod scheme;
mod serialize;
mod transform;

pub mod bfv;
pub mod ckks;
pub mod paillier;
pub mod service;

pub use errors::{Error, ParametersError, Result};
pub use scheme::{Operation, Scheme};

#[cfg(test)]
#[macro_use]
extern crate proptest;
