//! Write side of the fact store: substances, kinds, attributes, modes
//!
//! Every create validates references and uniqueness inside the same
//! exclusive update that stages the record.

use std::sync::Arc;

use super::errors::{CatalogError, CatalogResult};
use crate::model::{require_field, Attribute, DataType, Kind, Mode, Substance};
use crate::observability::MetricsRegistry;
use crate::storage::{Record, Store, StoreUpdate};

/// Partial update of a substance's descriptive fields.
#[derive(Debug, Clone, Default)]
pub struct SubstancePatch {
    pub name: Option<String>,
    pub kind: Option<String>,
    pub essence: Option<String>,
}

pub struct Catalog<S: Store> {
    store: Arc<S>,
    metrics: Arc<MetricsRegistry>,
}

impl<S: Store> Catalog<S> {
    pub fn new(store: Arc<S>, metrics: Arc<MetricsRegistry>) -> Self {
        Self { store, metrics }
    }

    // ---- substances ----

    pub fn create_substance(&self, name: &str, kind: &str, essence: &str) -> CatalogResult<Substance> {
        require_field("name", name)?;
        require_field("kind", kind)?;
        require_field("essence", essence)?;

        self.commit(|txn| {
            let substance = Substance::new(name, kind, essence);
            txn.stage(Record::Substance(substance.clone()));
            Ok(substance)
        })
    }

    /// Replaces the fields present in `patch`. Identity never changes.
    pub fn update_substance(&self, id: &str, patch: SubstancePatch) -> CatalogResult<Substance> {
        self.commit(|txn| {
            let mut substance = txn
                .view()
                .substance(id)?
                .ok_or_else(|| CatalogError::not_found("substance", id))?;

            if let Some(name) = patch.name {
                substance.name = name;
            }
            if let Some(kind) = patch.kind {
                substance.kind = kind;
            }
            if let Some(essence) = patch.essence {
                substance.essence = essence;
            }

            txn.stage(Record::SubstanceUpdated(substance.clone()));
            Ok(substance)
        })
    }

    /// Removes a substance. Modes, potentialities and actualities that
    /// reference it are left in place.
    pub fn delete_substance(&self, id: &str) -> CatalogResult<()> {
        self.commit(|txn| {
            if txn.view().substance(id)?.is_none() {
                return Err(CatalogError::not_found("substance", id));
            }
            txn.stage(Record::SubstanceDeleted { id: id.to_string() });
            Ok(())
        })
    }

    pub fn get_substance(&self, id: &str) -> CatalogResult<Substance> {
        self.store.view(|view| {
            view.substance(id)?
                .ok_or_else(|| CatalogError::not_found("substance", id))
        })
    }

    pub fn list_substances(&self) -> CatalogResult<Vec<Substance>> {
        self.store.view(|view| Ok(view.substances()?))
    }

    // ---- kinds ----

    pub fn create_kind(&self, name: &str, description: &str) -> CatalogResult<Kind> {
        require_field("name", name)?;

        self.commit(|txn| {
            if txn.view().kind_by_name(name)?.is_some() {
                return Err(CatalogError::conflict("kind", name));
            }
            let kind = Kind::new(name, description);
            txn.stage(Record::Kind(kind.clone()));
            Ok(kind)
        })
    }

    pub fn list_kinds(&self) -> CatalogResult<Vec<Kind>> {
        self.store.view(|view| Ok(view.kinds()?))
    }

    // ---- attributes ----

    pub fn create_attribute(
        &self,
        name: &str,
        description: &str,
        data_type: &str,
    ) -> CatalogResult<Attribute> {
        require_field("name", name)?;
        let data_type: DataType = data_type.parse()?;

        self.commit(|txn| {
            if txn.view().attribute_by_name(name)?.is_some() {
                return Err(CatalogError::conflict("attribute", name));
            }
            let attribute = Attribute::new(name, description, data_type);
            txn.stage(Record::Attribute(attribute.clone()));
            Ok(attribute)
        })
    }

    pub fn list_attributes(&self) -> CatalogResult<Vec<Attribute>> {
        self.store.view(|view| Ok(view.attributes()?))
    }

    // ---- modes ----

    /// Records that a substance has an attribute at a value. Earlier modes
    /// for the same pair are kept; the newest one is current.
    pub fn create_mode(&self, value: &str, substance_id: &str, attribute_id: &str) -> CatalogResult<Mode> {
        require_field("value", value)?;

        self.commit(|txn| {
            let view = txn.view();
            if view.substance(substance_id)?.is_none() {
                return Err(CatalogError::not_found("substance", substance_id));
            }
            if view.attribute(attribute_id)?.is_none() {
                return Err(CatalogError::not_found("attribute", attribute_id));
            }
            let mode = Mode::new(value, substance_id, attribute_id);
            txn.stage(Record::Mode(mode.clone()));
            Ok(mode)
        })
    }

    pub fn list_modes(&self) -> CatalogResult<Vec<Mode>> {
        self.store.view(|view| Ok(view.modes()?))
    }

    /// Runs a single-record update and counts it once committed.
    fn commit<T>(
        &self,
        f: impl FnOnce(&mut dyn StoreUpdate) -> CatalogResult<T>,
    ) -> CatalogResult<T> {
        let value = self.store.update(f)?;
        self.metrics.add_records_written(1);
        Ok(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::RecordStore;

    fn catalog() -> Catalog<RecordStore> {
        Catalog::new(
            Arc::new(RecordStore::in_memory()),
            Arc::new(MetricsRegistry::new()),
        )
    }

    #[test]
    fn test_substance_lifecycle() {
        let c = catalog();
        let tree = c.create_substance("Tree-001", "Oak", "Living organism").unwrap();
        assert_eq!(c.list_substances().unwrap().len(), 1);

        let updated = c
            .update_substance(
                &tree.id,
                SubstancePatch {
                    essence: Some("Old oak".into()),
                    ..Default::default()
                },
            )
            .unwrap();
        assert_eq!(updated.id, tree.id);
        assert_eq!(updated.name, "Tree-001");
        assert_eq!(c.get_substance(&tree.id).unwrap().essence, "Old oak");

        c.delete_substance(&tree.id).unwrap();
        assert!(matches!(
            c.get_substance(&tree.id).unwrap_err(),
            CatalogError::NotFound { .. }
        ));
    }

    #[test]
    fn test_substance_requires_fields() {
        let c = catalog();
        assert!(matches!(
            c.create_substance("", "Oak", "x").unwrap_err(),
            CatalogError::Validation(_)
        ));
        assert!(c.create_substance("Tree", "  ", "x").is_err());
        assert!(c.list_substances().unwrap().is_empty());
    }

    #[test]
    fn test_update_and_delete_unknown_substance() {
        let c = catalog();
        assert!(matches!(
            c.update_substance("ghost", SubstancePatch::default()).unwrap_err(),
            CatalogError::NotFound { .. }
        ));
        assert!(matches!(
            c.delete_substance("ghost").unwrap_err(),
            CatalogError::NotFound { .. }
        ));
    }

    #[test]
    fn test_kind_and_attribute_names_unique() {
        let c = catalog();
        c.create_kind("Oak", "").unwrap();
        assert!(matches!(c.create_kind("Oak", "again").unwrap_err(), CatalogError::Conflict { .. }));

        c.create_attribute("color", "", "string").unwrap();
        assert!(matches!(
            c.create_attribute("color", "", "number").unwrap_err(),
            CatalogError::Conflict { .. }
        ));
        assert_eq!(c.list_kinds().unwrap().len(), 1);
        assert_eq!(c.list_attributes().unwrap().len(), 1);
    }

    #[test]
    fn test_attribute_data_type_validated() {
        let c = catalog();
        assert!(matches!(
            c.create_attribute("height", "", "decimal").unwrap_err(),
            CatalogError::Validation(_)
        ));
    }

    #[test]
    fn test_mode_requires_existing_references() {
        let c = catalog();
        let tree = c.create_substance("Tree-001", "Oak", "Living organism").unwrap();
        let color = c.create_attribute("color", "", "string").unwrap();

        assert!(matches!(
            c.create_mode("green", "ghost", &color.id).unwrap_err(),
            CatalogError::NotFound { entity: "substance", .. }
        ));
        assert!(matches!(
            c.create_mode("green", &tree.id, "ghost").unwrap_err(),
            CatalogError::NotFound { entity: "attribute", .. }
        ));

        c.create_mode("green", &tree.id, &color.id).unwrap();
        assert_eq!(c.list_modes().unwrap().len(), 1);
    }
}
