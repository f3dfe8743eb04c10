//! Transition engine: potentiality → actuality
//!
//! The engine is written against the `Store` trait. Every write runs in
//! one `Store::update` scope, so for `actualize` the readiness check and
//! the commit of the actuality see the same facts and no concurrent
//! update interleaves between them.

use std::sync::Arc;

use super::errors::{TransitionError, TransitionResult};
use super::evolution::SubstanceEvolution;
use super::state::{ActualizationPolicy, PotentialityState};
use crate::condition::{evaluate, ConditionSpec, Verdict};
use crate::model::{Actuality, Potentiality};
use crate::observability::{log_event_at, log_event_with_fields, Event, MetricsRegistry, Severity};
use crate::storage::{Record, Store, StoreView};

pub struct TransitionEngine<S: Store> {
    store: Arc<S>,
    policy: ActualizationPolicy,
    metrics: Arc<MetricsRegistry>,
}

impl<S: Store> TransitionEngine<S> {
    pub fn new(store: Arc<S>, metrics: Arc<MetricsRegistry>) -> Self {
        Self {
            store,
            policy: ActualizationPolicy::default(),
            metrics,
        }
    }

    pub fn with_policy(mut self, policy: ActualizationPolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn policy(&self) -> ActualizationPolicy {
        self.policy
    }

    /// Declares a possible future state of a substance.
    ///
    /// Conditions are parsed but not evaluated; they may name facts that do
    /// not hold yet. Nothing is persisted on rejection.
    pub fn create_potentiality(
        &self,
        substance_id: &str,
        name: &str,
        description: &str,
        conditions: &str,
    ) -> TransitionResult<Potentiality> {
        let (potentiality, predicates) = self.store.update(|txn| {
            if txn.view().substance(substance_id)?.is_none() {
                return Err(TransitionError::substance_not_found(substance_id));
            }
            let spec = ConditionSpec::parse(conditions)?;

            let potentiality = Potentiality::new(name, description, conditions, substance_id);
            txn.stage(Record::Potentiality(potentiality.clone()));
            Ok((potentiality, spec.len()))
        })?;

        self.metrics.increment_potentialities_created();
        self.metrics.add_records_written(1);
        log_event_with_fields(
            Event::PotentialityCreated,
            &[
                ("conditions", &predicates.to_string()),
                ("potentiality_id", &potentiality.id),
                ("substance_id", substance_id),
            ],
        );
        Ok(potentiality)
    }

    /// Evaluates a potentiality's conditions against current facts.
    ///
    /// Side-effect free apart from logging and counters.
    pub fn check_readiness(&self, potentiality_id: &str) -> TransitionResult<Verdict> {
        let verdict = self.store.view(|view| {
            let potentiality = load_potentiality(view, potentiality_id)?;
            verdict_for(view, &potentiality)
        })?;

        self.metrics.increment_readiness_checks();
        let unmet = verdict.unmet.len().to_string();
        log_event_at(
            Severity::Trace,
            Event::ReadinessChecked,
            &[
                ("potentiality_id", potentiality_id),
                ("ready", if verdict.satisfied { "true" } else { "false" }),
                ("unmet", &unmet),
            ],
        );
        Ok(verdict)
    }

    /// Re-checks readiness and, only when every condition holds, records
    /// an actuality for the potentiality.
    pub fn actualize(&self, potentiality_id: &str, description: &str) -> TransitionResult<Actuality> {
        let outcome = self.store.update(|txn| {
            let view = txn.view();
            let potentiality = load_potentiality(view, potentiality_id)?;

            let state =
                PotentialityState::from_actuality_count(view.actualities_of(potentiality_id)?.len());
            if !self.policy.permits(state) {
                return Err(TransitionError::AlreadyActualized(potentiality_id.to_string()));
            }

            let verdict = verdict_for(view, &potentiality)?;
            if !verdict.satisfied {
                return Err(TransitionError::ConditionsUnmet(verdict.unmet));
            }

            let actuality = Actuality::new(description, &potentiality.substance_id, &potentiality.id);
            txn.stage(Record::Actuality(actuality.clone()));
            Ok(actuality)
        });

        match &outcome {
            Ok(actuality) => {
                self.metrics.increment_actualizations_committed();
                self.metrics.add_records_written(1);
                log_event_with_fields(
                    Event::ActualizationCommitted,
                    &[
                        ("actuality_id", &actuality.id),
                        ("potentiality_id", potentiality_id),
                        ("substance_id", &actuality.substance_id),
                    ],
                );
            }
            Err(err @ (TransitionError::ConditionsUnmet(_) | TransitionError::AlreadyActualized(_))) => {
                self.metrics.increment_actualizations_rejected();
                let reason = err.to_string();
                log_event_at(
                    Severity::Warn,
                    Event::ActualizationRejected,
                    &[("potentiality_id", potentiality_id), ("reason", &reason)],
                );
            }
            Err(_) => {}
        }

        outcome
    }

    pub fn state_of(&self, potentiality_id: &str) -> TransitionResult<PotentialityState> {
        self.store.view(|view| {
            load_potentiality(view, potentiality_id)?;
            let count = view.actualities_of(potentiality_id)?.len();
            Ok(PotentialityState::from_actuality_count(count))
        })
    }

    pub fn list_potentialities(&self) -> TransitionResult<Vec<Potentiality>> {
        self.store.view(|view| Ok(view.potentialities()?))
    }

    pub fn potentialities_for(&self, substance_id: &str) -> TransitionResult<Vec<Potentiality>> {
        self.store.view(|view| Ok(view.potentialities_for(substance_id)?))
    }

    pub fn actualities_for(&self, substance_id: &str) -> TransitionResult<Vec<Actuality>> {
        self.store.view(|view| Ok(view.actualities_for(substance_id)?))
    }

    /// Potentialities and actualities of one substance, read from a single
    /// snapshot.
    pub fn evolution(&self, substance_id: &str) -> TransitionResult<SubstanceEvolution> {
        self.store.view(|view| {
            if view.substance(substance_id)?.is_none() {
                return Err(TransitionError::substance_not_found(substance_id));
            }
            Ok(SubstanceEvolution::new(
                substance_id,
                view.potentialities_for(substance_id)?,
                view.actualities_for(substance_id)?,
            ))
        })
    }
}

fn load_potentiality(view: &dyn StoreView, id: &str) -> TransitionResult<Potentiality> {
    view.potentiality(id)?
        .ok_or_else(|| TransitionError::potentiality_not_found(id))
}

fn verdict_for(view: &dyn StoreView, potentiality: &Potentiality) -> TransitionResult<Verdict> {
    let spec = ConditionSpec::parse(&potentiality.conditions)?;
    Ok(evaluate(view, &potentiality.substance_id, &spec)?)
}
