//! Strongly-typed identifiers for domain entities.
//!
//! The remote API issues ids as opaque strings, so these are thin string
//! newtypes rather than parsed UUIDs.

use serde::{Deserialize, Serialize};
use std::fmt;

macro_rules! define_id {
    ($name:ident) => {
        #[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            pub fn new(id: impl Into<String>) -> Self {
                Self(id.into())
            }

            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl From<&str> for $name {
            fn from(s: &str) -> Self {
                Self(s.to_string())
            }
        }

        impl From<String> for $name {
            fn from(s: String) -> Self {
                Self(s)
            }
        }
    };
}

define_id!(PhotoId);
define_id!(AlbumId);
define_id!(ImageId);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_photo_id_display() {
        let id = PhotoId::new("abc");
        assert_eq!(id.to_string(), "abc");
        assert_eq!(id.as_str(), "abc");
    }

    #[test]
    fn test_photo_id_serde_transparent() {
        let id = PhotoId::new("abc");
        let json = serde_json::to_string(&id).unwrap();
        assert_eq!(json, "\"abc\"");
        let back: PhotoId = serde_json::from_str(&json).unwrap();
        assert_eq!(back, id);
    }

    #[test]
    fn test_ids_convert_from_strings() {
        assert_eq!(PhotoId::from("abc"), PhotoId::new("abc"));
        assert_eq!(AlbumId::from("a1".to_string()).as_str(), "a1");
    }
}
