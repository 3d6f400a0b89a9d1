//! Small shared helpers.
//!
//! - **Text**: Unicode-aware width and truncation for list rendering, and
//!   control-character stripping for server-supplied text
//! - **Tasks**: panic capture for spawned background requests

mod task;
mod text;

pub use task::catch_task_panic;
pub use text::{display_width, strip_control_chars, truncate_to_width};
