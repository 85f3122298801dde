use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::common::{decode, error::Error, hash::blake2b256};

/// Signature scheme flag prepended to the public key before hashing.
pub const ED25519_FLAG: u8 = 0x00;

/// 32-byte Sui account address. Object ids share the same representation.
#[derive(Clone, Copy, Default, Hash, Eq, PartialEq)]
pub struct SuiAddress(pub [u8; 32]);

pub type ObjectId = SuiAddress;

impl SuiAddress {
    /// address = blake2b256(flag || pubkey)
    pub fn from_ed25519(public_key: &[u8; 32]) -> Self {
        let mut buffer = Vec::with_capacity(1 + public_key.len());
        buffer.push(ED25519_FLAG);
        buffer.extend_from_slice(public_key);
        Self(blake2b256(&buffer))
    }
}

impl std::fmt::Display for SuiAddress {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "0x{}", hex::encode(self.0))
    }
}

impl std::fmt::Debug for SuiAddress {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "SuiAddress(0x{})", hex::encode(self.0))
    }
}

impl From<[u8; 32]> for SuiAddress {
    fn from(value: [u8; 32]) -> Self {
        Self(value)
    }
}

impl TryFrom<&[u8]> for SuiAddress {
    type Error = Error;

    fn try_from(value: &[u8]) -> Result<Self, Self::Error> {
        let bytes: [u8; 32] = value.try_into().map_err(|_| Error::InvalidAddress)?;
        Ok(SuiAddress(bytes))
    }
}

impl TryFrom<&str> for SuiAddress {
    type Error = Error;

    /// Accepts `0x`-prefixed hex of up to 64 digits; short forms are
    /// left-padded with zeroes (`0x2` is the framework address).
    fn try_from(value: &str) -> Result<Self, Self::Error> {
        let hex = value.strip_prefix("0x").ok_or(Error::InvalidAddress)?;
        if hex.is_empty() || hex.len() > 64 {
            return Err(Error::InvalidAddress);
        }
        let padded = format!("{hex:0>64}");
        let mut bytes = [0u8; 32];
        hex::decode_to_slice(padded, &mut bytes).map_err(|_| Error::InvalidAddress)?;
        Ok(SuiAddress(bytes))
    }
}

impl std::str::FromStr for SuiAddress {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::try_from(s)
    }
}

impl Serialize for SuiAddress {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for SuiAddress {
    fn deserialize<D>(deserializer: D) -> Result<SuiAddress, D::Error>
    where
        D: Deserializer<'de>,
    {
        use serde::de::Error as _;

        let hex: String = Deserialize::deserialize(deserializer)?;
        SuiAddress::try_from(hex.as_str()).map_err(|_| {
            D::Error::invalid_value(serde::de::Unexpected::Str(&hex), &"0x-prefixed hex address")
        })
    }
}

pub const fn addr(s: &str) -> SuiAddress {
    SuiAddress(decode(s))
}
