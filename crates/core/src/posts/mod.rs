#![forbid(unsafe_code)]

mod payload;
mod query;
mod types;
mod wire;

pub use payload::*;
pub use query::*;
pub use types::*;
pub use wire::*;
