#![warn(missing_docs, unused_imports)]

//! Modular arithmetic over arbitrary-precision integers.

pub mod primes;

use std::ops::Deref;

use crate::errors::{Error, Result};
use num_bigint::{BigInt, BigUint, Sign};
use num_traits::{One, Zero};

/// Computes `base^exponent mod modulus` by right-to-left binary
/// exponentiation. Returns 0 when the modulus is 1 and 1 when the exponent is
/// 0 (and the modulus is larger than 1).
///
/// # Panics
///
/// Panics if `modulus` is zero.
pub fn mod_pow(base: &BigUint, exponent: &BigUint, modulus: &BigUint) -> BigUint {
    assert!(!modulus.is_zero(), "modulus must be non-zero");
    if modulus.is_one() {
        return BigUint::zero();
    }

    let mut result = BigUint::one();
    let mut base = base % modulus;
    let nbits = exponent.bits();
    let mut processed = 0u64;
    for digit in exponent.iter_u64_digits() {
        for i in 0..64 {
            if processed == nbits {
                break;
            }
            if (digit >> i) & 1 == 1 {
                result = result * &base % modulus;
            }
            base = &base * &base % modulus;
            processed += 1;
        }
    }
    result
}

/// Greatest common divisor, computed with the iterative Euclidean algorithm.
pub fn gcd(a: &BigUint, b: &BigUint) -> BigUint {
    let mut a = a.clone();
    let mut b = b.clone();
    while !b.is_zero() {
        let r = &a % &b;
        a = b;
        b = r;
    }
    a
}

/// Bézout coefficients and gcd returned by [`extended_gcd`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtendedGcd {
    /// Coefficient of `a`.
    pub x: BigInt,
    /// Coefficient of `b`.
    pub y: BigInt,
    /// The greatest common divisor of `a` and `b`.
    pub gcd: BigUint,
}

/// Extended Euclidean algorithm: returns `x`, `y` and `g = gcd(a, b)` such
/// that `a * x + b * y = g`.
pub fn extended_gcd(a: &BigUint, b: &BigUint) -> ExtendedGcd {
    let (x, y, g) = extended_gcd_signed(
        &BigInt::from_biguint(Sign::Plus, a.clone()),
        &BigInt::from_biguint(Sign::Plus, b.clone()),
    );
    ExtendedGcd {
        x,
        y,
        gcd: g.magnitude().clone(),
    }
}

fn extended_gcd_signed(a: &BigInt, b: &BigInt) -> (BigInt, BigInt, BigInt) {
    if a.is_zero() {
        return (BigInt::zero(), BigInt::one(), b.clone());
    }
    let (x1, y1, g) = extended_gcd_signed(&(b % a), a);
    let x = y1 - (b / a) * &x1;
    (x, x1, g)
}

/// Computes the modular multiplicative inverse of `a` modulo `m`.
///
/// Returns [`Error::NoInverse`] when `gcd(a, m) != 1` or when `m` is zero.
pub fn mod_inverse(a: &BigUint, m: &BigUint) -> Result<BigUint> {
    if m.is_zero() || !gcd(a, m).is_one() {
        return Err(Error::NoInverse);
    }
    let m_signed = BigInt::from_biguint(Sign::Plus, m.clone());
    let x = extended_gcd(a, m).x;
    let reduced = ((x % &m_signed) + &m_signed) % &m_signed;
    // The value is non-negative by construction.
    reduced.to_biguint().ok_or(Error::NoInverse)
}

/// Least common multiple; `lcm(a, 0) = lcm(0, b) = 0`.
pub fn lcm(a: &BigUint, b: &BigUint) -> BigUint {
    if a.is_zero() || b.is_zero() {
        return BigUint::zero();
    }
    (a * b) / gcd(a, b)
}

/// Structure encapsulating an arbitrary-precision integer modulus.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Modulus {
    p: BigUint,
}

// Override the dereference to return the underlying modulus.
impl Deref for Modulus {
    type Target = BigUint;

    fn deref(&self) -> &Self::Target {
        &self.p
    }
}

impl Modulus {
    /// Create a modulus from an integer larger or equal to 2.
    pub fn new(p: BigUint) -> Result<Self> {
        if p < BigUint::from(2u32) {
            Err(Error::InvalidModulus(p))
        } else {
            Ok(Self { p })
        }
    }

    /// Reduces `a` modulo p.
    #[must_use]
    pub fn reduce(&self, a: &BigUint) -> BigUint {
        a % &self.p
    }

    /// Reduces a signed integer into `[0, p)`.
    #[must_use]
    pub fn reduce_signed(&self, a: &BigInt) -> BigUint {
        let p = BigInt::from_biguint(Sign::Plus, self.p.clone());
        let r = ((a % &p) + &p) % &p;
        r.magnitude().clone()
    }

    /// Returns the representative of `a` in `(-p/2, p/2]`.
    /// Aborts if a >= p in debug mode.
    #[must_use]
    pub fn center(&self, a: &BigUint) -> BigInt {
        debug_assert!(a < &self.p);
        let half = &self.p >> 1;
        if a > &half {
            BigInt::from_biguint(Sign::Minus, &self.p - a)
        } else {
            BigInt::from_biguint(Sign::Plus, a.clone())
        }
    }

    /// Modular addition of a and b.
    #[must_use]
    pub fn add(&self, a: &BigUint, b: &BigUint) -> BigUint {
        (a + b) % &self.p
    }

    /// Modular multiplication of a and b.
    #[must_use]
    pub fn mul(&self, a: &BigUint, b: &BigUint) -> BigUint {
        (a * b) % &self.p
    }

    /// Modular inverse of a.
    pub fn inv(&self, a: &BigUint) -> Result<BigUint> {
        mod_inverse(a, &self.p)
    }
}

#[cfg(test)]
mod tests {
    use super::{extended_gcd, gcd, lcm, mod_inverse, mod_pow, Modulus};
    use crate::Error;
    use num_bigint::{BigInt, BigUint};
    use num_traits::{One, Zero};
    use std::error::Error as StdError;

    fn big(v: u64) -> BigUint {
        BigUint::from(v)
    }

    #[test]
    fn mod_pow_edge_cases() {
        assert_eq!(mod_pow(&big(12345), &big(678), &big(1)), BigUint::zero());
        assert_eq!(mod_pow(&big(12345), &big(0), &big(97)), BigUint::one());
        assert_eq!(mod_pow(&big(0), &big(0), &big(97)), BigUint::one());
        assert_eq!(mod_pow(&big(0), &big(5), &big(97)), BigUint::zero());
        assert_eq!(mod_pow(&big(4), &big(13), &big(497)), big(445));
    }

    #[test]
    fn mod_pow_multi_digit_exponent() {
        let modulus = (BigUint::one() << 127usize) - 1u32;
        let exponent = (BigUint::one() << 100usize) + 12345u32;
        let base = big(0xdead_beef);
        assert_eq!(
            mod_pow(&base, &exponent, &modulus),
            base.modpow(&exponent, &modulus)
        );
    }

    #[test]
    fn extended_gcd_small() {
        let e = extended_gcd(&big(240), &big(46));
        assert_eq!(e.gcd, big(2));
        assert_eq!(
            BigInt::from(240) * &e.x + BigInt::from(46) * &e.y,
            BigInt::from(2)
        );

        let e = extended_gcd(&big(0), &big(7));
        assert_eq!(e.gcd, big(7));
        assert_eq!(e.x, BigInt::zero());
        assert_eq!(e.y, BigInt::one());
    }

    #[test]
    fn mod_inverse_errors() {
        assert_eq!(mod_inverse(&big(2), &big(4)), Err(Error::NoInverse));
        assert_eq!(mod_inverse(&big(0), &big(7)), Err(Error::NoInverse));
        assert_eq!(mod_inverse(&big(3), &big(0)), Err(Error::NoInverse));
        assert_eq!(mod_inverse(&big(3), &big(1)), Ok(BigUint::zero()));
    }

    #[test]
    fn mod_inverse_small() -> Result<(), Box<dyn StdError>> {
        assert_eq!(mod_inverse(&big(3), &big(11))?, big(4));
        assert_eq!(mod_inverse(&big(10), &big(17))?, big(12));
        Ok(())
    }

    #[test]
    fn lcm_small() {
        assert_eq!(lcm(&big(4), &big(6)), big(12));
        assert_eq!(lcm(&big(0), &big(6)), BigUint::zero());
        assert_eq!(lcm(&big(7), &big(13)), big(91));
    }

    #[test]
    fn modulus() -> Result<(), Box<dyn StdError>> {
        assert_eq!(
            Modulus::new(big(1)),
            Err(Error::InvalidModulus(BigUint::one()))
        );
        assert!(Modulus::new(big(0)).is_err());

        let q = Modulus::new(big(17))?;
        assert_eq!(*q, big(17));
        assert_eq!(q.add(&big(9), &big(10)), big(2));
        assert_eq!(q.mul(&big(9), &big(10)), big(5));
        assert_eq!(q.inv(&big(2))?, big(9));
        assert_eq!(q.reduce_signed(&BigInt::from(-3)), big(14));
        assert_eq!(q.center(&big(14)), BigInt::from(-3));
        assert_eq!(q.center(&big(8)), BigInt::from(8));
        Ok(())
    }

    proptest! {
        #[test]
        fn mod_pow_matches_library(base: u64, exponent: u64, modulus in 1u64..) {
            let (b, e, m) = (big(base), big(exponent), big(modulus));
            prop_assert_eq!(mod_pow(&b, &e, &m), b.modpow(&e, &m));
        }

        #[test]
        fn gcd_divides(a: u64, b: u64) {
            let g = gcd(&big(a), &big(b));
            prop_assume!(!g.is_zero());
            prop_assert!((big(a) % &g).is_zero());
            prop_assert!((big(b) % &g).is_zero());
        }

        #[test]
        fn bezout_identity(a: u64, b: u64) {
            let e = extended_gcd(&big(a), &big(b));
            prop_assert_eq!(&e.gcd, &gcd(&big(a), &big(b)));
            prop_assert_eq!(
                BigInt::from(a) * &e.x + BigInt::from(b) * &e.y,
                BigInt::from(e.gcd.clone())
            );
        }

        #[test]
        fn inverse(a: u64, m in 2u64..) {
            let (a, m) = (big(a), big(m));
            match mod_inverse(&a, &m) {
                Ok(inv) => {
                    prop_assert!(inv < m);
                    prop_assert!((&a * &inv % &m).is_one());
                }
                Err(e) => {
                    prop_assert_eq!(e, Error::NoInverse);
                    prop_assert!(!gcd(&a, &m).is_one());
                }
            }
        }

        #[test]
        fn lcm_gcd_product(a in 1u64.., b in 1u64..) {
            prop_assert_eq!(lcm(&big(a), &big(b)) * gcd(&big(a), &big(b)), big(a) * big(b));
        }
    }
}
