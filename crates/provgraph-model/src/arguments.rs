//! Typed tool arguments
//!
//! The collecting tool records the arguments it was invoked with as three
//! parallel string arrays (names, values, declared types). The decoder
//! zips them back into one [`ArgumentSet`] per agent; this module holds
//! the typed representation.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// A single argument value, typed per the tool's declared type.
///
/// Declared types outside the supported set decode as [`ArgValue::Text`]
/// with the value text passed through unmodified.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ArgValue {
    /// Declared type `logical`
    Bool(bool),
    /// Declared type `integer`
    Int(i64),
    /// Declared type `numeric` or `double`
    Real(f64),
    /// Any other declared type, passed through as text
    Text(String),
}

impl ArgValue {
    /// The boolean value, when this is a [`ArgValue::Bool`].
    #[must_use]
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Bool(b) => Some(*b),
            _ => None,
        }
    }

    /// The integer value, when this is an [`ArgValue::Int`].
    #[must_use]
    pub fn as_int(&self) -> Option<i64> {
        match self {
            Self::Int(i) => Some(*i),
            _ => None,
        }
    }

    /// The real value, when this is an [`ArgValue::Real`].
    #[must_use]
    pub fn as_real(&self) -> Option<f64> {
        match self {
            Self::Real(r) => Some(*r),
            _ => None,
        }
    }

    /// The text value, when this is an [`ArgValue::Text`].
    #[must_use]
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(s) => Some(s.as_str()),
            _ => None,
        }
    }
}

/// Ordered argument name → typed value mapping for one agent.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ArgumentSet {
    args: IndexMap<String, ArgValue>,
}

impl ArgumentSet {
    /// Build from already-zipped pairs, preserving their order.
    #[must_use]
    pub fn from_pairs(args: IndexMap<String, ArgValue>) -> Self {
        Self { args }
    }

    /// Look up an argument by name.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&ArgValue> {
        self.args.get(name)
    }

    /// Iterate arguments in declaration order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &ArgValue)> {
        self.args.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Number of arguments in the set.
    #[must_use]
    pub fn len(&self) -> usize {
        self.args.len()
    }

    /// True when the set holds no arguments.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.args.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn typed_accessors() {
        let mut args = IndexMap::new();
        args.insert("snapshot.size".to_string(), ArgValue::Real(10.0));
        args.insert("overwrite".to_string(), ArgValue::Bool(true));
        let set = ArgumentSet::from_pairs(args);

        assert_eq!(set.get("overwrite").and_then(ArgValue::as_bool), Some(true));
        assert_eq!(set.get("snapshot.size").and_then(ArgValue::as_real), Some(10.0));
        assert_eq!(set.get("overwrite").and_then(ArgValue::as_int), None);
        assert_eq!(set.len(), 2);
    }
}
