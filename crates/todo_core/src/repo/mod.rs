//! Repository contracts and their storage implementations.
//!
//! # Responsibility
//! - Define the `TaskRepository` capability handlers depend on.
//! - Keep SQL and locking details out of command handling.
//!
//! # Invariants
//! - Write paths validate every task before touching storage.
//! - A batch insert is all-or-nothing.
//! - Absence is `Ok(None)`, never an error.

pub mod memory_repo;
pub mod task_repo;
