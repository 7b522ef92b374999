//! Common types shared by requests and responses.

mod amount;
mod common;

pub use amount::*;
pub use common::*;
