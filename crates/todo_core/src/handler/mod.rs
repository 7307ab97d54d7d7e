//! Command handlers.
//!
//! # Responsibility
//! - Execute one command type against a `TaskRepository`.
//! - Turn repository errors into `CommandResult::Failure` and log them.
//!
//! # Invariants
//! - Handlers never retry, never propagate repository errors, never panic.
//! - Handlers hold no state between `execute` calls.

pub mod get_category;
pub mod register_task;
