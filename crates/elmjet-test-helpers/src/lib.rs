//! Test utilities for elmjet.
//!
//! [`build`] constructs arena ASTs the way the upstream compiler would have
//! emitted them; [`js_executor`] interprets the subset of JavaScript this
//! optimizer consumes and produces, so tests can evaluate a unit before and
//! after transformation and compare results.

pub mod build;
pub mod js_executor;
