//! Record types for the ontology store
//!
//! Every record carries its own identifier and creation instant. Records
//! are plain data: existence checks and uniqueness are enforced by the
//! catalog and transition engine before a record reaches the store.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::new_id;

/// An independently existing entity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Substance {
    pub id: String,
    pub name: String,
    /// Name of the kind this substance belongs to
    pub kind: String,
    pub essence: String,
    pub created_at: DateTime<Utc>,
}

impl Substance {
    pub fn new(
        name: impl Into<String>,
        kind: impl Into<String>,
        essence: impl Into<String>,
    ) -> Self {
        Self {
            id: new_id(),
            name: name.into(),
            kind: kind.into(),
            essence: essence.into(),
            created_at: Utc::now(),
        }
    }
}

/// A natural classification (oak, human, ...).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Kind {
    pub id: String,
    pub name: String,
    pub description: String,
    pub created_at: DateTime<Utc>,
}

impl Kind {
    pub fn new(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            id: new_id(),
            name: name.into(),
            description: description.into(),
            created_at: Utc::now(),
        }
    }
}

/// Declared data type of an attribute.
///
/// Values are stored as text regardless of the declared type; the tag is
/// descriptive and lets comparisons become type-aware later.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DataType {
    String,
    Number,
    Boolean,
}

impl DataType {
    pub fn as_str(&self) -> &'static str {
        match self {
            DataType::String => "string",
            DataType::Number => "number",
            DataType::Boolean => "boolean",
        }
    }
}

impl fmt::Display for DataType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DataType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "string" => Ok(DataType::String),
            "number" => Ok(DataType::Number),
            "boolean" => Ok(DataType::Boolean),
            other => Err(format!(
                "invalid data type: {}. Must be one of: string, number, boolean",
                other
            )),
        }
    }
}

/// A general property definition (color, weight, ...). Names are unique.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Attribute {
    pub id: String,
    pub name: String,
    pub description: String,
    pub data_type: DataType,
    pub created_at: DateTime<Utc>,
}

impl Attribute {
    pub fn new(
        name: impl Into<String>,
        description: impl Into<String>,
        data_type: DataType,
    ) -> Self {
        Self {
            id: new_id(),
            name: name.into(),
            description: description.into(),
            data_type,
            created_at: Utc::now(),
        }
    }
}

/// The particular way one substance instantiates one attribute.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Mode {
    pub id: String,
    /// Stored as text; compared as text
    pub value: String,
    pub substance_id: String,
    pub attribute_id: String,
    pub created_at: DateTime<Utc>,
}

impl Mode {
    pub fn new(
        value: impl Into<String>,
        substance_id: impl Into<String>,
        attribute_id: impl Into<String>,
    ) -> Self {
        Self {
            id: new_id(),
            value: value.into(),
            substance_id: substance_id.into(),
            attribute_id: attribute_id.into(),
            created_at: Utc::now(),
        }
    }
}

/// What a substance can become.
///
/// `conditions` holds the condition specification text exactly as
/// submitted; it was parsed once at creation and is parsed again on every
/// readiness check.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Potentiality {
    pub id: String,
    pub name: String,
    pub description: String,
    pub conditions: String,
    pub substance_id: String,
    pub created_at: DateTime<Utc>,
}

impl Potentiality {
    pub fn new(
        name: impl Into<String>,
        description: impl Into<String>,
        conditions: impl Into<String>,
        substance_id: impl Into<String>,
    ) -> Self {
        Self {
            id: new_id(),
            name: name.into(),
            description: description.into(),
            conditions: conditions.into(),
            substance_id: substance_id.into(),
            created_at: Utc::now(),
        }
    }
}

/// A realized potentiality. Never mutated or deleted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Actuality {
    pub id: String,
    pub description: String,
    pub actualized_at: DateTime<Utc>,
    pub substance_id: String,
    pub potentiality_id: String,
}

impl Actuality {
    pub fn new(
        description: impl Into<String>,
        substance_id: impl Into<String>,
        potentiality_id: impl Into<String>,
    ) -> Self {
        Self {
            id: new_id(),
            description: description.into(),
            actualized_at: Utc::now(),
            substance_id: substance_id.into(),
            potentiality_id: potentiality_id.into(),
        }
    }
}

/// A directed, kind-tagged edge between two opaque identifiers.
///
/// `cause_type` is validated by the causal graph before a relation is
/// stored; either endpoint may name a substance or an external token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CausalRelation {
    pub id: String,
    pub cause_type: String,
    pub from_entity: String,
    pub to_entity: String,
    pub created_at: DateTime<Utc>,
}

impl CausalRelation {
    pub fn new(
        cause_type: impl Into<String>,
        from_entity: impl Into<String>,
        to_entity: impl Into<String>,
    ) -> Self {
        Self {
            id: new_id(),
            cause_type: cause_type.into(),
            from_entity: from_entity.into(),
            to_entity: to_entity.into(),
            created_at: Utc::now(),
        }
    }

    /// Whether `entity_id` is either endpoint of this relation.
    pub fn touches(&self, entity_id: &str) -> bool {
        self.from_entity == entity_id || self.to_entity == entity_id
    }
}
