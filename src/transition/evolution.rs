//! Evolution view: everything a substance could become and has become

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::model::{Actuality, Potentiality};

#[derive(Debug, Clone, Serialize)]
pub struct SubstanceEvolution {
    pub substance_id: String,
    pub potentialities: Vec<Potentiality>,
    pub actualities: Vec<Actuality>,
    /// When the view was assembled
    pub timestamp: DateTime<Utc>,
}

impl SubstanceEvolution {
    pub fn new(
        substance_id: impl Into<String>,
        potentialities: Vec<Potentiality>,
        actualities: Vec<Actuality>,
    ) -> Self {
        Self {
            substance_id: substance_id.into(),
            potentialities,
            actualities,
            timestamp: Utc::now(),
        }
    }

    /// Potentialities with no actuality yet.
    pub fn pending(&self) -> impl Iterator<Item = &Potentiality> {
        self.potentialities.iter().filter(move |p| {
            !self.actualities.iter().any(|a| a.potentiality_id == p.id)
        })
    }
}
