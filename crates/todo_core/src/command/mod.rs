//! Commands and their typed outcome.
//!
//! # Responsibility
//! - Describe intended state changes as immutable values.
//! - Carry handler outcomes back to callers without raising errors.
//!
//! # Invariants
//! - A command is consumed by exactly one handler type.
//! - Every handler invocation yields exactly one `CommandResult`.

mod get_category;
mod register_task;
mod result;

pub use get_category::GetCategoryById;
pub use register_task::RegisterTask;
pub use result::{CommandFailure, CommandResult};
