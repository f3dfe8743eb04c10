//! Potentiality lifecycle tests
//!
//! Covers:
//! - Creation rejects unknown substances and malformed conditions
//! - Actualize only commits when every condition holds
//! - Readiness checks are side-effect free and repeatable
//! - At-most-once actualization under concurrent callers

use std::sync::Arc;
use std::thread;

use oaas::catalog::Catalog;
use oaas::model::{Attribute, Substance};
use oaas::observability::MetricsRegistry;
use oaas::storage::RecordStore;
use oaas::transition::{
    ActualizationPolicy, PotentialityState, TransitionEngine, TransitionError,
};

// =============================================================================
// Test Utilities
// =============================================================================

struct World {
    catalog: Catalog<RecordStore>,
    engine: TransitionEngine<RecordStore>,
    tree: Substance,
    color: Attribute,
}

fn world(policy: ActualizationPolicy) -> World {
    let store = Arc::new(RecordStore::in_memory());
    let metrics = Arc::new(MetricsRegistry::new());
    let catalog = Catalog::new(store.clone(), metrics.clone());
    let engine = TransitionEngine::new(store, metrics).with_policy(policy);

    let tree = catalog
        .create_substance("Tree-001", "Oak", "Living organism")
        .unwrap();
    let color = catalog.create_attribute("color", "Leaf color", "string").unwrap();

    World {
        catalog,
        engine,
        tree,
        color,
    }
}

const GREEN_MODE: &str = r#"[{"type":"mode","name":"color","value":"green"}]"#;

// =============================================================================
// Scenario A: conditions hold
// =============================================================================

#[test]
fn test_scenario_a_ready_and_actualized() {
    let w = world(ActualizationPolicy::Once);
    w.catalog.create_mode("green", &w.tree.id, &w.color.id).unwrap();
    let bloom = w
        .engine
        .create_potentiality(&w.tree.id, "Bloom", "Flowers open", GREEN_MODE)
        .unwrap();

    let verdict = w.engine.check_readiness(&bloom.id).unwrap();
    assert!(verdict.satisfied);
    assert!(verdict.unmet.is_empty());

    let actuality = w.engine.actualize(&bloom.id, "Bloomed in spring").unwrap();
    assert_eq!(actuality.potentiality_id, bloom.id);
    assert_eq!(actuality.substance_id, w.tree.id);
    assert_eq!(actuality.description, "Bloomed in spring");
    assert_eq!(w.engine.state_of(&bloom.id).unwrap(), PotentialityState::Realized);
}

// =============================================================================
// Scenario B: conditions do not hold
// =============================================================================

#[test]
fn test_scenario_b_unmet_and_rejected() {
    let w = world(ActualizationPolicy::Once);
    w.catalog.create_mode("red", &w.tree.id, &w.color.id).unwrap();
    let bloom = w
        .engine
        .create_potentiality(&w.tree.id, "Bloom", "", GREEN_MODE)
        .unwrap();

    let verdict = w.engine.check_readiness(&bloom.id).unwrap();
    assert!(!verdict.satisfied);
    assert_eq!(verdict.unmet, vec!["mode condition not met: color = green"]);

    match w.engine.actualize(&bloom.id, "Bloomed").unwrap_err() {
        TransitionError::ConditionsUnmet(reasons) => {
            assert_eq!(reasons, vec!["mode condition not met: color = green"]);
        }
        other => panic!("expected ConditionsUnmet, got {:?}", other),
    }
    assert!(w.engine.actualities_for(&w.tree.id).unwrap().is_empty());
    assert_eq!(w.engine.state_of(&bloom.id).unwrap(), PotentialityState::Created);
}

#[test]
fn test_becomes_ready_once_fact_recorded() {
    let w = world(ActualizationPolicy::Once);
    let bloom = w
        .engine
        .create_potentiality(&w.tree.id, "Bloom", "", GREEN_MODE)
        .unwrap();

    assert!(w.engine.actualize(&bloom.id, "Bloomed").is_err());
    w.catalog.create_mode("green", &w.tree.id, &w.color.id).unwrap();
    assert!(w.engine.actualize(&bloom.id, "Bloomed").is_ok());
}

// =============================================================================
// Scenario E: unknown substance
// =============================================================================

#[test]
fn test_scenario_e_unknown_substance_persists_nothing() {
    let w = world(ActualizationPolicy::Once);
    let err = w
        .engine
        .create_potentiality("no-such-substance", "Bloom", "", "")
        .unwrap_err();

    assert!(matches!(err, TransitionError::NotFound { .. }));
    assert!(w.engine.list_potentialities().unwrap().is_empty());
}

#[test]
fn test_malformed_conditions_persist_nothing() {
    let w = world(ActualizationPolicy::Once);
    for bad in ["not json", r#"{"type":"mode"}"#, r#"[{"type":"mode","name":"color"}]"#] {
        let err = w
            .engine
            .create_potentiality(&w.tree.id, "Bloom", "", bad)
            .unwrap_err();
        assert!(matches!(err, TransitionError::InvalidConditionFormat(_)), "{}", bad);
    }
    assert!(w.engine.list_potentialities().unwrap().is_empty());
}

// =============================================================================
// Readiness
// =============================================================================

#[test]
fn test_empty_conditions_always_ready() {
    let w = world(ActualizationPolicy::Once);
    for text in ["", "[]"] {
        let p = w.engine.create_potentiality(&w.tree.id, "Exist", "", text).unwrap();
        assert!(w.engine.check_readiness(&p.id).unwrap().satisfied);
    }
}

#[test]
fn test_readiness_check_is_idempotent() {
    let w = world(ActualizationPolicy::Once);
    w.catalog.create_mode("red", &w.tree.id, &w.color.id).unwrap();
    let p = w
        .engine
        .create_potentiality(
            &w.tree.id,
            "Fruit",
            "",
            r#"[{"type":"attribute","name":"color","value":"green"},
                {"type":"attribute","name":"season","value":"autumn"},
                {"type":"external","name":"rain","value":true}]"#,
        )
        .unwrap();

    let first = w.engine.check_readiness(&p.id).unwrap();
    let second = w.engine.check_readiness(&p.id).unwrap();
    assert_eq!(first, second);
    assert_eq!(first.unmet.len(), 2);
    assert!(w.engine.actualities_for(&w.tree.id).unwrap().is_empty());
}

#[test]
fn test_actualize_agrees_with_prior_readiness() {
    let w = world(ActualizationPolicy::Repeatable);
    w.catalog.create_mode("red", &w.tree.id, &w.color.id).unwrap();
    let specs = [
        GREEN_MODE,
        r#"[{"type":"mode","name":"color","value":"red"}]"#,
        r#"[{"type":"unknown","name":"x","value":"y"}]"#,
        r#"[{"type":"external","name":"x","value":1}]"#,
    ];

    for spec in specs {
        let p = w.engine.create_potentiality(&w.tree.id, "P", "", spec).unwrap();
        let ready = w.engine.check_readiness(&p.id).unwrap().satisfied;
        assert_eq!(w.engine.actualize(&p.id, "done").is_ok(), ready, "{}", spec);
    }
}

// =============================================================================
// Actualization policy
// =============================================================================

#[test]
fn test_once_policy_second_attempt_conflicts() {
    let w = world(ActualizationPolicy::Once);
    let p = w.engine.create_potentiality(&w.tree.id, "Grow", "", "").unwrap();

    w.engine.actualize(&p.id, "Grew").unwrap();
    assert!(matches!(
        w.engine.actualize(&p.id, "Grew").unwrap_err(),
        TransitionError::AlreadyActualized(_)
    ));
}

#[test]
fn test_concurrent_actualize_commits_once() {
    let w = Arc::new(world(ActualizationPolicy::Once));
    let p = w.engine.create_potentiality(&w.tree.id, "Grow", "", "").unwrap();

    let handles: Vec<_> = (0..8)
        .map(|i| {
            let w = Arc::clone(&w);
            let id = p.id.clone();
            thread::spawn(move || w.engine.actualize(&id, &format!("attempt {}", i)).is_ok())
        })
        .collect();

    let committed = handles
        .into_iter()
        .map(|h| h.join().unwrap())
        .filter(|ok| *ok)
        .count();

    assert_eq!(committed, 1);
    assert_eq!(w.engine.actualities_for(&w.tree.id).unwrap().len(), 1);
}

// =============================================================================
// Evolution
// =============================================================================

#[test]
fn test_evolution_lists_both_sides() {
    let w = world(ActualizationPolicy::Once);
    let grow = w.engine.create_potentiality(&w.tree.id, "Grow", "", "").unwrap();
    w.engine
        .create_potentiality(&w.tree.id, "Bloom", "", GREEN_MODE)
        .unwrap();
    w.engine.actualize(&grow.id, "Grew").unwrap();

    let evolution = w.engine.evolution(&w.tree.id).unwrap();
    assert_eq!(evolution.substance_id, w.tree.id);
    assert_eq!(evolution.potentialities.len(), 2);
    assert_eq!(evolution.actualities.len(), 1);
    assert_eq!(evolution.pending().count(), 1);
}
