//! Strongly-typed ID wrappers for records coming from the hosted store
//!
//! The store keys every row with a UUID. Wrapping them per entity keeps a
//! bill id from being passed where a transaction id is expected.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

macro_rules! define_id {
    ($name:ident, $display_prefix:literal) => {
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(Uuid);

        impl $name {
            /// Create a new random ID
            pub fn new() -> Self {
                Self(Uuid::new_v4())
            }

            /// Get the underlying UUID
            pub fn as_uuid(&self) -> &Uuid {
                &self.0
            }

            /// Parse an ID from a full UUID string
            pub fn parse(s: &str) -> Result<Self, uuid::Error> {
                Ok(Self(Uuid::parse_str(s)?))
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self::new()
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}{}", $display_prefix, &self.0.to_string()[..8])
            }
        }

        impl From<Uuid> for $name {
            fn from(uuid: Uuid) -> Self {
                Self(uuid)
            }
        }

        impl FromStr for $name {
            type Err = uuid::Error;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                let s = s.strip_prefix($display_prefix).unwrap_or(s);
                Self::parse(s)
            }
        }
    };
}

define_id!(TransactionId, "txn-");
define_id!(BillId, "bill-");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_id_display() {
        let id = BillId::new();
        let display = id.to_string();
        assert!(display.starts_with("bill-"));
        assert_eq!(display.len(), 13);
    }

    #[test]
    fn test_id_serialization_is_bare_uuid() {
        let uuid_str = "550e8400-e29b-41d4-a716-446655440000";
        let id = TransactionId::parse(uuid_str).unwrap();
        let json = serde_json::to_string(&id).unwrap();
        assert_eq!(json, format!("\"{}\"", uuid_str));

        let back: TransactionId = serde_json::from_str(&json).unwrap();
        assert_eq!(id, back);
    }

    #[test]
    fn test_from_str_accepts_prefix() {
        let id: TransactionId = "txn-550e8400-e29b-41d4-a716-446655440000".parse().unwrap();
        assert_eq!(
            id.as_uuid().to_string(),
            "550e8400-e29b-41d4-a716-446655440000"
        );
        assert!("txn-nope".parse::<TransactionId>().is_err());
    }
}
