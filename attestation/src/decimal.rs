//! Serde helpers encoding u128 amounts as decimal strings, so JSON consumers
//! without 128-bit integers read them losslessly.

use serde::de::Error as _;
use serde::{Deserialize, Deserializer};

pub(crate) fn parse_u128(s: &str) -> Option<u128> {
    if s.is_empty() || !s.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    s.parse().ok()
}

fn de_u128<'de, D: Deserializer<'de>>(deserializer: D) -> Result<u128, D::Error> {
    let s = String::deserialize(deserializer)?;
    parse_u128(&s).ok_or_else(|| D::Error::custom(format!("not a decimal integer: {s:?}")))
}

pub(crate) mod bloom {
    use bloom_types::BloomAmount;
    use serde::{Deserializer, Serializer};

    pub fn serialize<S: Serializer>(v: &BloomAmount, s: S) -> Result<S::Ok, S::Error> {
        s.serialize_str(&v.raw().to_string())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<BloomAmount, D::Error> {
        super::de_u128(d).map(BloomAmount::new)
    }
}

pub(crate) mod sats {
    use bloom_types::SatAmount;
    use serde::{Deserializer, Serializer};

    pub fn serialize<S: Serializer>(v: &SatAmount, s: S) -> Result<S::Ok, S::Error> {
        s.serialize_str(&v.raw().to_string())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<SatAmount, D::Error> {
        super::de_u128(d).map(SatAmount::new)
    }
}
