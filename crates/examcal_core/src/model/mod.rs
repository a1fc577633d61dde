//! Session domain model for exam schedule projections.
//!
//! # Responsibility
//! - Define the exam, marker and selection records shared by core services.
//! - Keep provider wire shapes separate from validated in-memory records.
//!
//! # Invariants
//! - Exam dates are day-granular; no time-of-day is ever attached.
//! - Records are created once per session load and never mutated.

pub mod exam;
pub mod marker;
pub mod selection;
