//! # Integration Scenarios
//!
//! Whole-network runs exercising the join, split, merge and relocation
//! machinery together, the way a simulation driver would.

pub mod attack;
pub mod churn;
pub mod determinism;
