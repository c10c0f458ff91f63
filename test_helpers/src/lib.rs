//! Test helpers shared across crates.
//!
//! This crate provides sample translation stores, `figment::Jail` wrappers,
//! and text helpers for behavioural test suites.

pub mod figment;
pub mod fixtures;
pub mod text;
