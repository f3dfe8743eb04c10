//! Scalar values carried by condition predicates
//!
//! A predicate's expected value may be a string, number, or boolean. The
//! variant is preserved; comparison against stored mode values goes
//! through the canonical text representation.

use std::fmt;

use serde::{Deserialize, Serialize};

/// A tagged scalar: string | number | boolean.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Scalar {
    Bool(bool),
    Number(serde_json::Number),
    Text(String),
}

impl Scalar {
    /// Canonical text form used for comparison with stored values.
    ///
    /// Integral floats render without a fractional part, so `3.0` and `3`
    /// both compare equal to a stored `"3"`.
    pub fn as_text(&self) -> String {
        match self {
            Scalar::Bool(b) => b.to_string(),
            Scalar::Text(s) => s.clone(),
            Scalar::Number(n) => {
                if n.is_f64() {
                    if let Some(f) = n.as_f64() {
                        if f.is_finite() && f.fract() == 0.0 && f.abs() < 1e15 {
                            return format!("{}", f as i64);
                        }
                    }
                }
                n.to_string()
            }
        }
    }

    /// Text comparison against a stored value.
    pub fn matches_text(&self, stored: &str) -> bool {
        self.as_text() == stored
    }
}

impl fmt::Display for Scalar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.as_text())
    }
}

impl From<&str> for Scalar {
    fn from(s: &str) -> Self {
        Scalar::Text(s.to_string())
    }
}

impl From<String> for Scalar {
    fn from(s: String) -> Self {
        Scalar::Text(s)
    }
}

impl From<bool> for Scalar {
    fn from(b: bool) -> Self {
        Scalar::Bool(b)
    }
}

impl From<i64> for Scalar {
    fn from(n: i64) -> Self {
        Scalar::Number(n.into())
    }
}
