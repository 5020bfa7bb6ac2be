//! Test harness for bearing generation scenarios.
//!
//! # Key Components
//!
//! - [`helpers`]: error type, host wrappers, run helpers
//! - [`assertions`]: checks on a finished document with diagnostic output

pub mod assertions;
pub mod helpers;

pub use helpers::{HarnessError, ProfileOrder, ReorderingHost};
