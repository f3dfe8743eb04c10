//! The four cause kinds

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::errors::CausalityError;

/// Ordering follows declaration order, so summaries list kinds as
/// material, formal, efficient, final.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CauseKind {
    /// What a thing is made of
    Material,
    /// The form or pattern it follows
    Formal,
    /// What brought it about
    Efficient,
    /// What it is for
    Final,
}

impl CauseKind {
    pub const ALL: [CauseKind; 4] = [
        CauseKind::Material,
        CauseKind::Formal,
        CauseKind::Efficient,
        CauseKind::Final,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            CauseKind::Material => "material",
            CauseKind::Formal => "formal",
            CauseKind::Efficient => "efficient",
            CauseKind::Final => "final",
        }
    }
}

impl fmt::Display for CauseKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CauseKind {
    type Err = CausalityError;

    /// Exact, case-sensitive match.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        CauseKind::ALL
            .into_iter()
            .find(|kind| kind.as_str() == s)
            .ok_or_else(|| CausalityError::InvalidCauseKind(s.to_string()))
    }
}
