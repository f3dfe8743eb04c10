//! oaas - substances, their properties, and the actualization of
//! condition-gated potential states
//!
//! Subsystems:
//! - `model`: record types
//! - `storage`: fact store traits and the record store
//! - `condition`: condition specifications and their evaluation
//! - `transition`: the potentiality → actuality engine
//! - `causality`: kind-tagged causal relations
//! - `catalog`: create/read/update/delete for the fact records
//! - `observability`: structured logs and counters
//! - `http_server`: REST surface
//! - `cli`: command-line entry points

pub mod catalog;
pub mod causality;
pub mod cli;
pub mod condition;
pub mod http_server;
pub mod model;
pub mod observability;
pub mod storage;
pub mod transition;
