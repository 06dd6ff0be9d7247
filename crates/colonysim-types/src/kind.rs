//! Open-vocabulary identifiers for items, resources, crops, and skills.
//!
//! Unlike terrain or zone kinds, these are not a fixed closed set: new item
//! types, crop types, and skills are introduced purely by adding a
//! configuration section (`entities.items.<kind>`, `entities.crops.<kind>`),
//! with no corresponding code change. A closed Rust `enum` would fight that
//! contract, so each is a thin newtype over an interned `String` instead.

use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

/// An interned, cheaply-cloneable name drawn from an open, config-defined
/// vocabulary (item kind, resource kind, crop kind, or skill kind).
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Kind(Arc<str>);

impl Kind {
    /// Construct a kind from any string-like value.
    pub fn new(name: impl Into<Arc<str>>) -> Self {
        Self(name.into())
    }

    /// Borrow the underlying name.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Kind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for Kind {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl From<String> for Kind {
    fn from(value: String) -> Self {
        Self::new(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kinds_compare_by_name() {
        let a = Kind::from("log");
        let b = Kind::from("log");
        let c = Kind::from("stone");
        assert_eq!(a, b);
        assert_ne!(a, c);
    }

    #[test]
    fn kind_displays_its_name() {
        assert_eq!(Kind::from("food_wheat").to_string(), "food_wheat");
    }
}
