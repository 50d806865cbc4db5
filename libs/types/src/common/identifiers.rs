//! Typed 32-byte keys
//!
//! Accounts and pools are both addressed by 32-byte keys on the ledger.
//! Wrapping them in distinct types keeps a pool id from being passed where a
//! signer is expected (and the reverse) at compile time.
//!
//! ```rust
//! use types::{AccountKey, PoolId};
//!
//! let owner = AccountKey::new([7u8; 32]);
//! let pool: PoolId = "0101010101010101010101010101010101010101010101010101010101010101"
//!     .parse()
//!     .unwrap();
//!
//! fn close(_pool: PoolId, _signer: AccountKey) {}
//! close(pool, owner); // ✅
//! // close(owner, pool); // ❌ Compile error!
//! ```

use std::str::FromStr;

/// Macro for generating typed wrappers around 32-byte keys
///
/// Keys render and parse as lowercase hex, and serialize as hex strings so
/// snapshot files stay human-readable.
macro_rules! define_typed_key {
    (
        $(#[$meta:meta])*
        $name:ident
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
        #[repr(transparent)]
        pub struct $name(pub [u8; 32]);

        impl $name {
            #[inline(always)]
            pub const fn new(inner: [u8; 32]) -> Self {
                Self(inner)
            }

            #[inline(always)]
            pub const fn inner(&self) -> &[u8; 32] {
                &self.0
            }

            #[inline(always)]
            pub const fn into_inner(self) -> [u8; 32] {
                self.0
            }

            /// Lowercase hex form without prefix
            pub fn to_hex(&self) -> String {
                hex::encode(self.0)
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(&self.to_hex())
            }
        }

        impl FromStr for $name {
            type Err = KeyParseError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                let trimmed = s.trim().trim_start_matches("0x");
                let bytes = hex::decode(trimmed).map_err(|e| KeyParseError::InvalidHex {
                    input: s.to_string(),
                    reason: e.to_string(),
                })?;
                let array: [u8; 32] = bytes
                    .try_into()
                    .map_err(|v: Vec<u8>| KeyParseError::InvalidLength(v.len()))?;
                Ok(Self(array))
            }
        }

        impl From<[u8; 32]> for $name {
            #[inline(always)]
            fn from(inner: [u8; 32]) -> Self {
                Self(inner)
            }
        }

        impl From<$name> for [u8; 32] {
            #[inline(always)]
            fn from(wrapper: $name) -> [u8; 32] {
                wrapper.0
            }
        }

        impl AsRef<[u8; 32]> for $name {
            #[inline(always)]
            fn as_ref(&self) -> &[u8; 32] {
                &self.0
            }
        }

        impl serde::Serialize for $name {
            fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
            where
                S: serde::Serializer,
            {
                serializer.serialize_str(&self.to_hex())
            }
        }

        impl<'de> serde::Deserialize<'de> for $name {
            fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
            where
                D: serde::Deserializer<'de>,
            {
                let s = String::deserialize(deserializer)?;
                s.parse().map_err(serde::de::Error::custom)
            }
        }
    };
}

/// Failure parsing a hex key
#[derive(Debug, thiserror::Error, Clone, PartialEq, Eq)]
pub enum KeyParseError {
    #[error("invalid hex key '{input}': {reason}")]
    InvalidHex { input: String, reason: String },

    #[error("key must be 32 bytes, got {0}")]
    InvalidLength(usize),
}

define_typed_key!(
    /// Ledger account key (pool owner, trade signer)
    AccountKey
);

define_typed_key!(
    /// Address of one pool account
    ///
    /// Always passed explicitly; nothing in the workspace remembers a
    /// "current" pool.
    PoolId
);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hex_roundtrip_display() {
        let key = AccountKey::new([0xab; 32]);
        let text = key.to_string();
        assert_eq!(text.len(), 64);
        assert!(text.starts_with("abab"));
        assert_eq!(text.parse::<AccountKey>().unwrap(), key);
    }

    #[test]
    fn test_accepts_0x_prefix() {
        let id: PoolId = format!("0x{}", "01".repeat(32)).parse().unwrap();
        assert_eq!(id, PoolId::new([1u8; 32]));
    }

    #[test]
    fn test_rejects_wrong_length() {
        let err = "abcd".parse::<PoolId>().unwrap_err();
        assert_eq!(err, KeyParseError::InvalidLength(2));
    }

    #[test]
    fn test_rejects_bad_hex() {
        let err = "zz".repeat(32).parse::<PoolId>().unwrap_err();
        assert!(matches!(err, KeyParseError::InvalidHex { .. }));
    }

    #[test]
    fn test_serde_as_hex_string() {
        let key = AccountKey::new([2u8; 32]);
        let json = serde_json::to_string(&key).unwrap();
        assert_eq!(json, format!("\"{}\"", "02".repeat(32)));
        let back: AccountKey = serde_json::from_str(&json).unwrap();
        assert_eq!(back, key);
    }
}
