//! Shared test utilities for the deconf workspace.
//!
//! This crate provides standardised fixtures so crate test suites do not
//! each redeclare the same configurable types. It is a dev-dependency only
//! and never published.
//!
//! # Modules
//!
//! - [`person`]: the [`Person`](person::Person) configurable used by the
//!   scenario tests
//! - [`logging`]: tracing subscriber setup for tests

pub mod logging;
pub mod person;

pub use logging::init_tracing;
pub use person::{Person, format_name, person_declarations};
