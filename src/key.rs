//! Map keys: strings or integers, normalized to a canonical string form.
//!
//! The map stores and compares only the canonical form; the original key
//! type is not retained. Integer keys normalize to their decimal
//! representation, so `Key::from(10)` and `Key::from("10")` address the
//! same entry.

use core::fmt;

/// A key accepted at the map boundary.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Key {
    /// String key, stored as-is.
    Str(String),
    /// Integer key, normalized to its decimal string form.
    Int(i64),
}

impl Key {
    /// Consumes the key and returns its canonical string projection.
    pub fn normalized(self) -> String {
        match self {
            Key::Str(s) => s,
            Key::Int(i) => i.to_string(),
        }
    }
}

impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Key::Str(s) => f.write_str(s),
            Key::Int(i) => write!(f, "{}", i),
        }
    }
}

impl From<String> for Key {
    fn from(s: String) -> Self {
        Key::Str(s)
    }
}

impl From<&str> for Key {
    fn from(s: &str) -> Self {
        Key::Str(s.to_string())
    }
}

impl From<&String> for Key {
    fn from(s: &String) -> Self {
        Key::Str(s.clone())
    }
}

impl From<i64> for Key {
    fn from(i: i64) -> Self {
        Key::Int(i)
    }
}

impl From<i32> for Key {
    fn from(i: i32) -> Self {
        Key::Int(i64::from(i))
    }
}

impl From<u32> for Key {
    fn from(i: u32) -> Self {
        Key::Int(i64::from(i))
    }
}

impl From<usize> for Key {
    fn from(i: usize) -> Self {
        Key::Int(i as i64)
    }
}
