//! Built-in content: the hand/rank value tables and the joker catalog,
//! embedded as JSON and validated into core types at load time.

mod load;

pub use load::*;
