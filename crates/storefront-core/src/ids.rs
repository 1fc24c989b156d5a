//! Newtype identifiers.
//!
//! Identifiers are assigned by the backend as positive integers. Wrapping
//! them keeps an `ItemId` from being passed where a `CategoryId` belongs.

use crate::error::CommerceError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

macro_rules! define_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(
            Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
        )]
        #[serde(transparent)]
        pub struct $name(u64);

        impl $name {
            /// Wrap a raw identifier.
            pub const fn new(id: u64) -> Self {
                Self(id)
            }

            /// The raw identifier.
            pub const fn get(self) -> u64 {
                self.0
            }

            /// The identifier following this one.
            pub fn next(self) -> Self {
                Self(self.0.saturating_add(1))
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl From<u64> for $name {
            fn from(id: u64) -> Self {
                Self(id)
            }
        }

        impl FromStr for $name {
            type Err = CommerceError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                s.trim()
                    .parse::<u64>()
                    .map(Self)
                    .map_err(|_| CommerceError::InvalidId(s.to_string()))
            }
        }
    };
}

define_id!(
    /// Server-assigned item identifier. Also keys cart entries.
    ItemId
);
define_id!(
    /// Category identifier.
    CategoryId
);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_id_parse() {
        let id: ItemId = " 42 ".parse().unwrap();
        assert_eq!(id, ItemId::new(42));
        assert!("abc".parse::<ItemId>().is_err());
        assert!("-1".parse::<ItemId>().is_err());
    }

    #[test]
    fn test_id_display() {
        assert_eq!(CategoryId::new(11).to_string(), "11");
    }

    #[test]
    fn test_id_serializes_as_number() {
        let json = serde_json::to_string(&ItemId::new(7)).unwrap();
        assert_eq!(json, "7");
        let back: ItemId = serde_json::from_str("7").unwrap();
        assert_eq!(back.get(), 7);
    }

    #[test]
    fn test_id_next() {
        assert_eq!(ItemId::new(9).next(), ItemId::new(10));
        assert_eq!(ItemId::new(u64::MAX).next(), ItemId::new(u64::MAX));
    }
}
