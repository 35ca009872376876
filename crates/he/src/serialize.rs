//! Decimal string encoding of arbitrary-precision integers on the wire.

/// (De)serialize a [`num_bigint::BigUint`] as a decimal string.
pub(crate) mod decimal {
    use num_bigint::BigUint;
    use serde::{de, Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(value: &BigUint, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&value.to_str_radix(10))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<BigUint, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(de::Error::custom)
    }

    /// (De)serialize a vector of [`BigUint`] as decimal strings.
    pub mod vec {
        use num_bigint::BigUint;
        use serde::{de, Deserialize, Deserializer, Serializer};

        pub fn serialize<S: Serializer>(
            values: &[BigUint],
            serializer: S,
        ) -> Result<S::Ok, S::Error> {
            serializer.collect_seq(values.iter().map(|v| v.to_str_radix(10)))
        }

        pub fn deserialize<'de, D: Deserializer<'de>>(
            deserializer: D,
        ) -> Result<Vec<BigUint>, D::Error> {
            Vec::<String>::deserialize(deserializer)?
                .iter()
                .map(|s| s.parse().map_err(de::Error::custom))
                .collect()
        }
    }
}
