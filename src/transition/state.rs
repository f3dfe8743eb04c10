//! Potentiality lifecycle
//!
//! ```text
//! Created ──(readiness met, Actualize)──> Realized
//!    │                                       │
//!    └─(readiness unmet: stays Created)      └─(Repeatable only: Actualize again)
//! ```
//!
//! State is derived, never stored: a potentiality is `Realized` once at
//! least one actuality references it.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PotentialityState {
    Created,
    Realized,
}

impl PotentialityState {
    /// State implied by the number of actualities recorded for a potentiality.
    pub fn from_actuality_count(count: usize) -> Self {
        if count == 0 {
            PotentialityState::Created
        } else {
            PotentialityState::Realized
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            PotentialityState::Created => "created",
            PotentialityState::Realized => "realized",
        }
    }

    pub fn is_realized(&self) -> bool {
        matches!(self, PotentialityState::Realized)
    }
}

impl fmt::Display for PotentialityState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// How many times one potentiality may be actualized.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ActualizationPolicy {
    /// At most once; later attempts fail with `AlreadyActualized`
    #[default]
    Once,
    /// Every satisfied attempt records a new actuality
    Repeatable,
}

impl ActualizationPolicy {
    /// Whether a potentiality in `state` may be actualized under this policy.
    pub fn permits(&self, state: PotentialityState) -> bool {
        match self {
            ActualizationPolicy::Once => !state.is_realized(),
            ActualizationPolicy::Repeatable => true,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ActualizationPolicy::Once => "once",
            ActualizationPolicy::Repeatable => "repeatable",
        }
    }
}

impl fmt::Display for ActualizationPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ActualizationPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "once" => Ok(ActualizationPolicy::Once),
            "repeatable" => Ok(ActualizationPolicy::Repeatable),
            other => Err(format!(
                "invalid actualization policy: {}. Must be one of: once, repeatable",
                other
            )),
        }
    }
}
