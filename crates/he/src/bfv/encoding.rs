//! Packing of small integers into a single integer.

use log::warn;
use num_bigint::BigUint;
use num_traits::Zero;

/// Width of a slot, in bits.
pub const SLOT_BITS: usize = 16;

/// Number of slots recovered by [`unpack`].
pub const SLOT_COUNT: usize = 10;

/// Packs the values as the sum of `values[i] << (SLOT_BITS * i)`.
///
/// A value wider than a slot spills into the next slots, and the values past
/// the last slot are out of reach of [`unpack`]: both are truncated when
/// unpacking.
pub fn pack(values: &[BigUint]) -> BigUint {
    if values.len() > SLOT_COUNT || values.iter().any(|v| v.bits() > SLOT_BITS as u64) {
        warn!(
            "Packing {} values into {SLOT_COUNT} slots of {SLOT_BITS} bits: the values will be truncated",
            values.len()
        );
    }
    values
        .iter()
        .enumerate()
        .fold(BigUint::zero(), |acc, (i, v)| acc + (v << (SLOT_BITS * i)))
}

/// Unpacks the first [`SLOT_COUNT`] slots, including the trailing empty ones.
pub fn unpack(packed: &BigUint) -> Vec<BigUint> {
    let mask = (BigUint::from(1u32) << SLOT_BITS) - 1u32;
    (0..SLOT_COUNT)
        .map(|i| (packed >> (SLOT_BITS * i)) & &mask)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::{pack, unpack, SLOT_COUNT};
    use num_bigint::BigUint;

    fn big(values: &[u64]) -> Vec<BigUint> {
        values.iter().map(|v| BigUint::from(*v)).collect()
    }

    #[test]
    fn pack_unpack() {
        let packed = pack(&big(&[42, 100, 255]));
        assert_eq!(packed, BigUint::from(42u64 + (100 << 16) + (255 << 32)));
        assert_eq!(unpack(&packed), big(&[42, 100, 255, 0, 0, 0, 0, 0, 0, 0]));
        assert_eq!(unpack(&pack(&[])), vec![BigUint::from(0u32); SLOT_COUNT]);
    }

    #[test]
    fn full_slots() {
        let values = big(&[0xffff; SLOT_COUNT]);
        assert_eq!(unpack(&pack(&values)), values);
    }

    #[test]
    fn wide_values_spill() {
        // 0x12345 does not fit in 16 bits: its top bit lands in the next slot.
        let packed = pack(&big(&[0x12345, 7]));
        assert_eq!(unpack(&packed)[..3], big(&[0x2345, 8, 0])[..]);
    }

    #[test]
    fn extra_values_are_dropped() {
        let values = big(&[1, 2, 3, 4, 5, 6, 7, 8, 9, 10, 11, 12]);
        assert_eq!(unpack(&pack(&values)), values[..SLOT_COUNT].to_vec());
    }
}
