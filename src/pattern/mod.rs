pub mod types;
pub mod verify;

pub use types::{Pattern, Shape};
pub use verify::{verify, Verdict};
