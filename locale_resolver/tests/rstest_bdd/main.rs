//! Behavioural tests for `locale_resolver` using `rstest-bdd`.
//!
//! Step implementations live under [`steps`], while [`scenarios`] binds the
//! `.feature` files in `tests/features` to the shared fixtures.

mod fixtures;
mod scenarios;
mod steps;
