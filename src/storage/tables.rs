//! In-memory tables rebuilt from the record log
//!
//! Tables hold every live record in commit order. They are the single
//! source for reads; the log only exists to rebuild them on open.

use std::collections::HashMap;

use super::errors::StorageResult;
use super::record::Record;
use super::store::{FactStore, StoreView};
use crate::model::{Actuality, Attribute, CausalRelation, Kind, Mode, Potentiality, Substance};

/// Record counts per table.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, serde::Serialize)]
pub struct StoreStats {
    pub substances: usize,
    pub kinds: usize,
    pub attributes: usize,
    pub modes: usize,
    pub potentialities: usize,
    pub actualities: usize,
    pub causal_relations: usize,
}

/// Committed state of the store.
#[derive(Debug, Default, Clone)]
pub struct Tables {
    substances: Vec<Substance>,
    kinds: Vec<Kind>,
    attributes: Vec<Attribute>,
    /// attribute name -> attribute id
    attribute_names: HashMap<String, String>,
    modes: Vec<Mode>,
    potentialities: Vec<Potentiality>,
    potentiality_index: HashMap<String, usize>,
    actualities: Vec<Actuality>,
    causal_relations: Vec<CausalRelation>,
}

impl Tables {
    pub fn new() -> Self {
        Self::default()
    }

    /// Apply one committed record.
    ///
    /// Updates and deletes of unknown substances are ignored; callers
    /// check existence before staging them.
    pub fn apply(&mut self, record: Record) {
        match record {
            Record::Substance(s) => self.substances.push(s),
            Record::SubstanceUpdated(updated) => {
                if let Some(existing) = self.substances.iter_mut().find(|s| s.id == updated.id) {
                    existing.name = updated.name;
                    existing.kind = updated.kind;
                    existing.essence = updated.essence;
                }
            }
            Record::SubstanceDeleted { id } => self.substances.retain(|s| s.id != id),
            Record::Kind(k) => self.kinds.push(k),
            Record::Attribute(a) => {
                self.attribute_names.insert(a.name.clone(), a.id.clone());
                self.attributes.push(a);
            }
            Record::Mode(m) => self.modes.push(m),
            Record::Potentiality(p) => {
                self.potentiality_index
                    .insert(p.id.clone(), self.potentialities.len());
                self.potentialities.push(p);
            }
            Record::Actuality(a) => self.actualities.push(a),
            Record::CausalRelation(r) => self.causal_relations.push(r),
        }
    }

    pub fn stats(&self) -> StoreStats {
        StoreStats {
            substances: self.substances.len(),
            kinds: self.kinds.len(),
            attributes: self.attributes.len(),
            modes: self.modes.len(),
            potentialities: self.potentialities.len(),
            actualities: self.actualities.len(),
            causal_relations: self.causal_relations.len(),
        }
    }

    /// Modes of `substance_id` for the attribute named `attribute_name`,
    /// newest first.
    fn modes_named<'a>(
        &'a self,
        substance_id: &'a str,
        attribute_name: &str,
    ) -> impl Iterator<Item = &'a Mode> + 'a {
        let attribute_id = self.attribute_names.get(attribute_name).cloned();
        self.modes.iter().rev().filter(move |m| {
            m.substance_id == substance_id && Some(&m.attribute_id) == attribute_id.as_ref()
        })
    }
}

impl FactStore for Tables {
    fn find_mode(&self, substance_id: &str, attribute_name: &str) -> StorageResult<Option<Mode>> {
        Ok(self.modes_named(substance_id, attribute_name).next().cloned())
    }

    fn mode_exists(
        &self,
        substance_id: &str,
        attribute_name: &str,
        value: &str,
    ) -> StorageResult<bool> {
        Ok(self
            .modes_named(substance_id, attribute_name)
            .any(|m| m.value == value))
    }
}

impl StoreView for Tables {
    fn substance(&self, id: &str) -> StorageResult<Option<Substance>> {
        Ok(self.substances.iter().find(|s| s.id == id).cloned())
    }

    fn substances(&self) -> StorageResult<Vec<Substance>> {
        Ok(self.substances.clone())
    }

    fn kind_by_name(&self, name: &str) -> StorageResult<Option<Kind>> {
        Ok(self.kinds.iter().find(|k| k.name == name).cloned())
    }

    fn kinds(&self) -> StorageResult<Vec<Kind>> {
        Ok(self.kinds.clone())
    }

    fn attribute(&self, id: &str) -> StorageResult<Option<Attribute>> {
        Ok(self.attributes.iter().find(|a| a.id == id).cloned())
    }

    fn attribute_by_name(&self, name: &str) -> StorageResult<Option<Attribute>> {
        match self.attribute_names.get(name) {
            Some(id) => self.attribute(id),
            None => Ok(None),
        }
    }

    fn attributes(&self) -> StorageResult<Vec<Attribute>> {
        Ok(self.attributes.clone())
    }

    fn modes(&self) -> StorageResult<Vec<Mode>> {
        Ok(self.modes.clone())
    }

    fn potentiality(&self, id: &str) -> StorageResult<Option<Potentiality>> {
        Ok(self
            .potentiality_index
            .get(id)
            .and_then(|&idx| self.potentialities.get(idx))
            .cloned())
    }

    fn potentialities(&self) -> StorageResult<Vec<Potentiality>> {
        Ok(self.potentialities.clone())
    }

    fn potentialities_for(&self, substance_id: &str) -> StorageResult<Vec<Potentiality>> {
        Ok(self
            .potentialities
            .iter()
            .filter(|p| p.substance_id == substance_id)
            .cloned()
            .collect())
    }

    fn actualities_for(&self, substance_id: &str) -> StorageResult<Vec<Actuality>> {
        Ok(self
            .actualities
            .iter()
            .filter(|a| a.substance_id == substance_id)
            .cloned()
            .collect())
    }

    fn actualities_of(&self, potentiality_id: &str) -> StorageResult<Vec<Actuality>> {
        Ok(self
            .actualities
            .iter()
            .filter(|a| a.potentiality_id == potentiality_id)
            .cloned()
            .collect())
    }

    fn relations_touching(&self, entity_id: &str) -> StorageResult<Vec<CausalRelation>> {
        Ok(self
            .causal_relations
            .iter()
            .filter(|r| r.touches(entity_id))
            .cloned()
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::DataType;

    fn tree_with_color(values: &[&str]) -> (Tables, Substance) {
        let mut tables = Tables::new();
        let tree = Substance::new("Tree-001", "Oak", "Living organism");
        let color = Attribute::new("color", "Visual property", DataType::String);
        tables.apply(Record::Substance(tree.clone()));
        tables.apply(Record::Attribute(color.clone()));
        for value in values {
            tables.apply(Record::Mode(Mode::new(*value, &tree.id, &color.id)));
        }
        (tables, tree)
    }

    #[test]
    fn test_find_mode_returns_most_recent() {
        let (tables, tree) = tree_with_color(&["red", "green"]);
        let mode = tables.find_mode(&tree.id, "color").unwrap().unwrap();
        assert_eq!(mode.value, "green");
    }

    #[test]
    fn test_mode_exists_sees_older_assignments() {
        let (tables, tree) = tree_with_color(&["red", "green"]);
        assert!(tables.mode_exists(&tree.id, "color", "red").unwrap());
        assert!(!tables.mode_exists(&tree.id, "color", "blue").unwrap());
    }

    #[test]
    fn test_unknown_attribute_has_no_modes() {
        let (tables, tree) = tree_with_color(&["green"]);
        assert!(tables.find_mode(&tree.id, "height").unwrap().is_none());
        assert!(!tables.mode_exists(&tree.id, "height", "green").unwrap());
    }

    #[test]
    fn test_substance_update_and_delete() {
        let (mut tables, tree) = tree_with_color(&[]);

        let mut renamed = tree.clone();
        renamed.name = "Tree-002".into();
        tables.apply(Record::SubstanceUpdated(renamed));
        assert_eq!(tables.substance(&tree.id).unwrap().unwrap().name, "Tree-002");

        tables.apply(Record::SubstanceDeleted { id: tree.id.clone() });
        assert!(tables.substance(&tree.id).unwrap().is_none());
        assert_eq!(tables.stats().substances, 0);
    }
}
