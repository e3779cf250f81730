//! Various serde utilities

/// serde functions for [`U256`](crate::U256) as a JSON-RPC hex quantity.
///
/// Serializes minimal lowercase hex with a `0x` prefix (`"0x0"` for zero). Deserializes a hex
/// string with or without the prefix, and also accepts a plain JSON number.
pub mod quantity {
    use crate::U256;
    use serde::{de, Deserialize, Deserializer, Serializer};

    #[derive(Deserialize)]
    #[serde(untagged)]
    enum StringOrNumber {
        String(String),
        Number(u64),
    }

    pub(crate) fn parse(value: &str) -> Result<U256, String> {
        let digits = value.strip_prefix("0x").or_else(|| value.strip_prefix("0X")).unwrap_or(value);
        if digits.is_empty() {
            return Ok(U256::zero())
        }
        U256::from_str_radix(digits, 16).map_err(|err| format!("invalid quantity {value:?}: {err}"))
    }

    /// Deserializes a [`U256`] quantity.
    pub fn deserialize<'de, D>(deserializer: D) -> Result<U256, D::Error>
    where
        D: Deserializer<'de>,
    {
        match StringOrNumber::deserialize(deserializer)? {
            StringOrNumber::String(s) => parse(&s).map_err(de::Error::custom),
            StringOrNumber::Number(n) => Ok(U256::from(n)),
        }
    }

    /// Serializes a [`U256`] as a hex quantity.
    pub fn serialize<S: Serializer>(value: &U256, s: S) -> Result<S::Ok, S::Error> {
        s.serialize_str(&format!("0x{value:x}"))
    }

    /// Same as the parent module, for optional fields.
    pub mod opt {
        use crate::U256;
        use serde::{Deserialize, Deserializer, Serializer};

        /// Deserializes an optional [`U256`] quantity, `null` maps to `None`.
        pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<U256>, D::Error>
        where
            D: Deserializer<'de>,
        {
            #[derive(Deserialize)]
            struct Wrapper(#[serde(with = "crate::serde_helper::quantity")] U256);

            Ok(Option::<Wrapper>::deserialize(deserializer)?.map(|Wrapper(value)| value))
        }

        /// Serializes an optional [`U256`], `None` as `null`.
        pub fn serialize<S: Serializer>(value: &Option<U256>, s: S) -> Result<S::Ok, S::Error> {
            match value {
                Some(value) => super::serialize(value, s),
                None => s.serialize_none(),
            }
        }
    }
}
