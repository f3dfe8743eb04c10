//! Causal graph over opaque identifiers
//!
//! Edges are never deduplicated. The summary view collapses every kind to
//! its most recently recorded edge; `relations_by_kind` keeps them all.

use std::collections::BTreeMap;
use std::sync::Arc;

use super::errors::{CausalityError, CausalityResult};
use super::kind::CauseKind;
use crate::model::CausalRelation;
use crate::observability::{log_event_with_fields, Event, MetricsRegistry};
use crate::storage::{Record, Store};

pub struct CausalGraph<S: Store> {
    store: Arc<S>,
    metrics: Arc<MetricsRegistry>,
}

impl<S: Store> CausalGraph<S> {
    pub fn new(store: Arc<S>, metrics: Arc<MetricsRegistry>) -> Self {
        Self { store, metrics }
    }

    /// Records a directed edge. Endpoints are not checked for existence.
    pub fn add_causal_relation(
        &self,
        from_entity: &str,
        to_entity: &str,
        cause_type: &str,
    ) -> CausalityResult<CausalRelation> {
        let kind: CauseKind = cause_type.parse()?;

        let relation = self.store.update(|txn| {
            let relation = CausalRelation::new(kind.as_str(), from_entity, to_entity);
            txn.stage(Record::CausalRelation(relation.clone()));
            Ok::<_, CausalityError>(relation)
        })?;

        self.metrics.increment_causal_relations_added();
        self.metrics.add_records_written(1);
        log_event_with_fields(
            Event::CausalRelationAdded,
            &[
                ("cause_type", kind.as_str()),
                ("from_entity", from_entity),
                ("to_entity", to_entity),
            ],
        );
        Ok(relation)
    }

    /// Cause kind → `to_entity` of the latest edge of that kind touching
    /// `entity_id` at either end.
    pub fn causes_summary(&self, entity_id: &str) -> CausalityResult<BTreeMap<CauseKind, String>> {
        let mut summary = BTreeMap::new();
        for (kind, relation) in self.touching(entity_id)? {
            summary.insert(kind, relation.to_entity);
        }
        Ok(summary)
    }

    /// Every edge touching `entity_id`, grouped by kind in creation order.
    pub fn relations_by_kind(
        &self,
        entity_id: &str,
    ) -> CausalityResult<BTreeMap<CauseKind, Vec<CausalRelation>>> {
        let mut grouped: BTreeMap<CauseKind, Vec<CausalRelation>> = BTreeMap::new();
        for (kind, relation) in self.touching(entity_id)? {
            grouped.entry(kind).or_default().push(relation);
        }
        Ok(grouped)
    }

    fn touching(&self, entity_id: &str) -> CausalityResult<Vec<(CauseKind, CausalRelation)>> {
        let relations = self
            .store
            .view(|view| Ok::<_, CausalityError>(view.relations_touching(entity_id)?))?;

        // Stored kinds were validated on the way in; skip anything foreign.
        Ok(relations
            .into_iter()
            .filter_map(|r| r.cause_type.parse().ok().map(|kind| (kind, r)))
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::RecordStore;

    fn graph() -> CausalGraph<RecordStore> {
        CausalGraph::new(
            Arc::new(RecordStore::in_memory()),
            Arc::new(MetricsRegistry::new()),
        )
    }

    #[test]
    fn test_summary_last_write_wins() {
        let g = graph();
        g.add_causal_relation("X", "Y", "material").unwrap();
        g.add_causal_relation("X", "Z", "material").unwrap();

        let summary = g.causes_summary("X").unwrap();
        assert_eq!(summary.len(), 1);
        assert_eq!(summary[&CauseKind::Material], "Z");
    }

    #[test]
    fn test_summary_includes_incoming_edges() {
        let g = graph();
        g.add_causal_relation("Seed", "Tree", "efficient").unwrap();

        let summary = g.causes_summary("Tree").unwrap();
        assert_eq!(summary[&CauseKind::Efficient], "Tree");
    }

    #[test]
    fn test_invalid_kind_persists_nothing() {
        let g = graph();
        let err = g.add_causal_relation("X", "Y", "invalid-kind").unwrap_err();
        assert!(matches!(err, CausalityError::InvalidCauseKind(_)));
        assert!(g.causes_summary("X").unwrap().is_empty());
    }

    #[test]
    fn test_relations_by_kind_keeps_duplicates() {
        let g = graph();
        g.add_causal_relation("X", "Y", "final").unwrap();
        g.add_causal_relation("X", "Y", "final").unwrap();
        g.add_causal_relation("X", "W", "formal").unwrap();

        let grouped = g.relations_by_kind("X").unwrap();
        assert_eq!(grouped[&CauseKind::Final].len(), 2);
        assert_eq!(grouped[&CauseKind::Formal].len(), 1);
    }

    #[test]
    fn test_unknown_entity_has_empty_summary() {
        assert!(graph().causes_summary("nobody").unwrap().is_empty());
    }
}
