//! Small GPU helpers shared by drawables.

mod buffer;
mod scope;

pub use buffer::create_buffer_init;
pub use scope::{capture_errors, ALLOCATION, VALIDATION};
