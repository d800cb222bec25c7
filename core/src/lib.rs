//! feeops-core — fee computation and compliance evaluation for the
//! back-office clearing rails.
//!
//! RULES:
//!   - fee, compliance, variance, and validator are pure functions:
//!     no I/O, no clock, no platform RNG. Same input, same output.
//!   - Only store.rs talks to the database. Identity (uuid) and
//!     timestamps (chrono) are assigned at the persistence boundary,
//!     never inside the evaluator.
//!   - All tunable constants live in EvaluatorConfig; nothing in the
//!     evaluation path reads a hardcoded business threshold.

pub mod compliance;
pub mod config;
pub mod error;
pub mod evaluator;
pub mod fee;
pub mod scenario;
pub mod store;
pub mod types;
pub mod validator;
pub mod variance;
