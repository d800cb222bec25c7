//! Shared primitive types used across the evaluator.

/// A monetary amount in integer minor-currency units (cents).
/// All fee arithmetic stays integer; floats appear only in rates.
pub type Cents = i64;

/// A stable, unique identifier for a persisted evaluation.
pub type EvaluationId = String;
