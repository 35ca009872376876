//! Random prime generation for RSA-like moduli.

use crate::errors::{Error, Result};
use num_bigint::{BigUint, RandBigInt};
use num_bigint_dig::prime::probably_prime;
use num_traits::One;
use rand::{CryptoRng, RngCore};

/// Smallest supported prime size, in bits.
pub const MIN_PRIME_BITS: usize = 8;

/// Largest supported prime size, in bits.
pub const MAX_PRIME_BITS: usize = 4096;

/// Number of Miller-Rabin rounds performed on top of the Baillie-PSW test.
const MILLER_RABIN_ROUNDS: usize = 20;

/// Returns whether `p` is (probably) prime.
pub fn is_prime(p: &BigUint) -> bool {
    let p = num_bigint_dig::BigUint::from_bytes_le(&p.to_bytes_le());
    probably_prime(&p, MILLER_RABIN_ROUNDS)
}

/// Generate a random `num_bits`-bit prime.
///
/// The two most significant bits of the candidates are set, so that the
/// product of two such primes has exactly `2 * num_bits` bits. Note that
/// `num_bits` must belong to `MIN_PRIME_BITS..=MAX_PRIME_BITS`.
pub fn generate_prime<R: RngCore + CryptoRng>(num_bits: usize, rng: &mut R) -> Result<BigUint> {
    if !(MIN_PRIME_BITS..=MAX_PRIME_BITS).contains(&num_bits) {
        return Err(Error::InvalidPrimeSize(
            num_bits,
            MIN_PRIME_BITS,
            MAX_PRIME_BITS,
        ));
    }

    let top_bits = BigUint::from(3u32) << (num_bits - 2);
    loop {
        let mut candidate = rng.gen_biguint(num_bits as u64);
        candidate |= &top_bits;
        candidate |= BigUint::one();
        if is_prime(&candidate) {
            return Ok(candidate);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{generate_prime, is_prime, MAX_PRIME_BITS, MIN_PRIME_BITS};
    use crate::Error;
    use num_bigint::BigUint;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;
    use std::error::Error as StdError;

    #[test]
    fn small_primes() {
        let primes = [2u64, 3, 5, 7, 11, 13, 65537, 4611686018326724609];
        for p in primes {
            assert!(is_prime(&BigUint::from(p)));
        }
        let composites = [0u64, 1, 4, 9, 15, 65535, 13835058054980173827];
        for c in composites {
            assert!(!is_prime(&BigUint::from(c)));
        }
    }

    #[test]
    fn mersenne() {
        let m127 = (BigUint::from(1u32) << 127usize) - 1u32;
        assert!(is_prime(&m127));
        let m128 = (BigUint::from(1u32) << 128usize) - 1u32;
        assert!(!is_prime(&m128));
    }

    #[test]
    fn generated_primes() -> Result<(), Box<dyn StdError>> {
        let mut rng = ChaCha8Rng::seed_from_u64(0);
        for num_bits in [8usize, 17, 64, 128, 256] {
            let p = generate_prime(num_bits, &mut rng)?;
            assert_eq!(p.bits(), num_bits as u64);
            assert!(p >= BigUint::from(3u32) << (num_bits - 2));
            assert!(is_prime(&p));
        }
        Ok(())
    }

    #[test]
    fn invalid_sizes() {
        let mut rng = ChaCha8Rng::seed_from_u64(0);
        assert_eq!(
            generate_prime(MIN_PRIME_BITS - 1, &mut rng),
            Err(Error::InvalidPrimeSize(
                MIN_PRIME_BITS - 1,
                MIN_PRIME_BITS,
                MAX_PRIME_BITS
            ))
        );
        assert!(generate_prime(MAX_PRIME_BITS + 1, &mut rng).is_err());
    }
}
