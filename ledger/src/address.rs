// ledger/src/address.rs
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

use crate::LedgerError;

/// Prefix hashed together with an application id to derive its escrow account.
const APP_ADDRESS_PREFIX: &[u8] = b"appID";

/// A 32-byte account address on the host ledger.
///
/// Rendered as 64 lowercase hex characters.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Address([u8; 32]);

impl Address {
    pub const ZERO: Address = Address([0u8; 32]);

    pub fn from_bytes(bytes: [u8; 32]) -> Self {
        Self(bytes)
    }

    /// Escrow account controlled by the application `app_id`.
    pub fn for_application(app_id: u64) -> Self {
        let mut hasher = blake3::Hasher::new();
        hasher.update(APP_ADDRESS_PREFIX);
        hasher.update(&app_id.to_be_bytes());
        Self(*hasher.finalize().as_bytes())
    }

    /// Deterministic address derived from a seed phrase. Handy for tests and demos.
    pub fn from_seed(seed: &str) -> Self {
        Self(*blake3::hash(seed.as_bytes()).as_bytes())
    }

    pub fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }

    pub fn is_zero(&self) -> bool {
        self.0 == [0u8; 32]
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&hex::encode(self.0))
    }
}

impl fmt::Debug for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Address({})", self)
    }
}

impl FromStr for Address {
    type Err = LedgerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut bytes = [0u8; 32];
        hex::decode_to_slice(s, &mut bytes)
            .map_err(|_| LedgerError::InvalidAddress(s.to_string()))?;
        Ok(Self(bytes))
    }
}

impl Serialize for Address {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Address {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_roundtrips_through_from_str() {
        let addr = Address::from_seed("issuer");
        let parsed: Address = addr.to_string().parse().unwrap();
        assert_eq!(addr, parsed);
        assert_eq!(addr.to_string().len(), 64);
    }

    #[test]
    fn test_application_addresses_are_distinct() {
        assert_ne!(Address::for_application(1), Address::for_application(2));
        assert_eq!(Address::for_application(7), Address::for_application(7));
        assert!(!Address::for_application(1).is_zero());
    }

    #[test]
    fn test_rejects_malformed_hex() {
        assert!("abc".parse::<Address>().is_err());
        assert!("zz".repeat(32).parse::<Address>().is_err());
        assert!("ab".repeat(33).parse::<Address>().is_err());
        assert_eq!("00".repeat(32).parse::<Address>().unwrap(), Address::ZERO);
    }
}
