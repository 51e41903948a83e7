mod input;
mod vehicle;

pub use input::{CommandMode, Input};
pub use vehicle::State;
