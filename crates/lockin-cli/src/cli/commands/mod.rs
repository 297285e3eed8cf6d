//! CLI command handlers, one per action.

mod block;
mod list;
mod unblock;

pub use block::run_block;
pub use list::run_list;
pub use unblock::run_unblock;
