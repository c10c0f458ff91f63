//! Step definitions for the behavioural suite.

mod resolution_steps;
mod settings_steps;
