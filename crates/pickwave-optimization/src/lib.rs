//! Exact solvers for 0/1 selection problems.
//!
//! A selection problem picks a subset of candidates minimizing total cost
//! subject to a minimum number of picks and an optional minimum coverage.
//! Both solvers here are exact: they return a globally optimal subset or
//! report that none exists.

pub mod algorithms;
pub mod common;

/// Re-export common types
pub use common::*;
