//! Serde helpers for byte values stored as `0x` prefixed hex strings.

pub mod hex_bytes32 {
    use chia_protocol::Bytes32;
    use hex::FromHex;
    use serde::{de, Deserialize, Deserializer, Serializer};

    pub fn serialize<S>(value: &Bytes32, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&format!("0x{}", hex::encode(value)))
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Bytes32, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        let bytes = <[u8; 32]>::from_hex(s.trim_start_matches("0x")).map_err(de::Error::custom)?;
        Ok(Bytes32::new(bytes))
    }
}
