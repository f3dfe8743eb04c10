//! Condition evaluation against a live store
//!
//! Covers:
//! - attribute and mode predicates both pass on a recorded fact
//! - attribute follows the newest mode, mode matches any mode
//! - evaluation is repeatable on unchanged facts

use oaas::condition::{evaluate, ConditionSpec};
use oaas::model::{Attribute, DataType, Mode, Substance};
use oaas::storage::{Record, RecordStore, Store, StorageError};

fn seed(store: &RecordStore, records: Vec<Record>) {
    store
        .update(|txn| {
            for record in records {
                txn.stage(record);
            }
            Ok::<_, StorageError>(())
        })
        .unwrap();
}

fn verdict(store: &RecordStore, substance_id: &str, text: &str) -> oaas::condition::Verdict {
    let spec = ConditionSpec::parse(text).unwrap();
    store
        .view(|view| evaluate(view, substance_id, &spec))
        .unwrap()
}

#[test]
fn test_recorded_fact_satisfies_attribute_and_mode() {
    let store = RecordStore::in_memory();
    let tree = Substance::new("Tree-001", "Oak", "Living organism");
    let attrs = [
        Attribute::new("color", "", DataType::String),
        Attribute::new("height", "", DataType::Number),
        Attribute::new("alive", "", DataType::Boolean),
    ];
    let values = ["green", "12", "true"];

    let mut records = vec![Record::Substance(tree.clone())];
    for (attr, value) in attrs.iter().zip(values) {
        records.push(Record::Attribute(attr.clone()));
        records.push(Record::Mode(Mode::new(value, &tree.id, &attr.id)));
    }
    seed(&store, records);

    let spec = r#"[
        {"type":"attribute","name":"color","value":"green"},
        {"type":"mode","name":"color","value":"green"},
        {"type":"attribute","name":"height","value":12},
        {"type":"mode","name":"height","value":12},
        {"type":"attribute","name":"alive","value":true},
        {"type":"mode","name":"alive","value":true}
    ]"#;
    let v = verdict(&store, &tree.id, spec);
    assert!(v.satisfied, "{:?}", v.unmet);
}

#[test]
fn test_duplicate_assignments_diverge() {
    let store = RecordStore::in_memory();
    let tree = Substance::new("Tree-001", "Oak", "Living organism");
    let color = Attribute::new("color", "", DataType::String);
    seed(
        &store,
        vec![
            Record::Substance(tree.clone()),
            Record::Attribute(color.clone()),
            Record::Mode(Mode::new("green", &tree.id, &color.id)),
            Record::Mode(Mode::new("red", &tree.id, &color.id)),
        ],
    );

    let attribute = verdict(&store, &tree.id, r#"[{"type":"attribute","name":"color","value":"green"}]"#);
    let mode = verdict(&store, &tree.id, r#"[{"type":"mode","name":"color","value":"green"}]"#);

    assert_eq!(
        attribute.unmet,
        vec!["attribute 'color' has value 'red', expected 'green'"]
    );
    assert!(mode.satisfied);
}

#[test]
fn test_facts_of_other_substances_ignored() {
    let store = RecordStore::in_memory();
    let tree = Substance::new("Tree-001", "Oak", "");
    let other = Substance::new("Tree-002", "Oak", "");
    let color = Attribute::new("color", "", DataType::String);
    seed(
        &store,
        vec![
            Record::Substance(tree.clone()),
            Record::Substance(other.clone()),
            Record::Attribute(color.clone()),
            Record::Mode(Mode::new("green", &other.id, &color.id)),
        ],
    );

    let v = verdict(&store, &tree.id, r#"[{"type":"attribute","name":"color","value":"green"}]"#);
    assert_eq!(v.unmet, vec!["attribute 'color' not found for substance"]);
}

#[test]
fn test_evaluation_repeatable() {
    let store = RecordStore::in_memory();
    let spec = r#"[{"type":"mode","name":"a","value":"1"},{"type":"weird","name":"b","value":"2"}]"#;
    let first = verdict(&store, "anything", spec);
    let second = verdict(&store, "anything", spec);
    assert_eq!(first, second);
    assert_eq!(first.unmet.len(), 2);
}
