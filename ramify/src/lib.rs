#![cfg_attr(docsrs, feature(doc_cfg))]
#![warn(missing_debug_implementations, rust_2018_idioms)]
#![deny(unreachable_pub)]

//! ramify
//!
//! Lowers Datalog rules into the nested loops of a relational algebra machine (RAM) program.
//! The [`ram::ValueIndex`] records where every variable, compound term and aggregate of a rule
//! becomes available in the loop nest, and the lowering in [`logic`] queries it to resolve each
//! argument to a concrete `(level, column)` access.

pub(crate) mod interner;

pub mod error;
pub mod id;
pub mod io;
pub mod location;
pub mod logic;
pub mod pretty;
pub mod ram;
pub mod value;

pub use location::Location;
pub use logic::{lower_rule_to_ram, lower_to_ram, LoweringOptions, ProgramBuilder, RuleBuilder};
pub use ram::ValueIndex;

/// Test utilities.
#[cfg(any(test, feature = "test_utils"))]
#[cfg_attr(docsrs, doc(cfg(feature = "test_utils")))]
pub mod test_utils;
