#![crate_name = "he_math"]
#![crate_type = "lib"]
#![warn(missing_docs, unused_imports)]

//! Mathematical utilities for the he.rs library.

mod errors;

pub mod zn;

pub use errors::{Error, Result};

#[cfg(test)]
#[macro_use]
extern crate proptest;
