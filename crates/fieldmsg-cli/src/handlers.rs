//! Command handlers for CLI subcommands
//!
//! This module contains the implementation logic for each CLI subcommand.

mod completions;
mod messages;
mod transform;
mod utils;

pub use completions::handle_completions;
pub use messages::handle_messages;
pub use transform::handle_transform;
