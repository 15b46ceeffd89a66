//! Test harness for the vector GIS core.
//!
//! Provides programmatic tools for scripting multi-step editing scenarios,
//! verifying layer invariants at every step, and generating diagnostic
//! output when a step fails.
//!
//! # Key Components
//!
//! - [`helpers`] — geometry constructors and the [`LayerBuilder`]
//! - [`assertions`] — invariant checks returning pass/fail verdicts
//! - [`report`] — structured text layer descriptions

pub mod assertions;
pub mod helpers;
pub mod report;

pub use helpers::{HarnessError, LayerBuilder};
pub use report::layer_report;
