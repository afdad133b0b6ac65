//! Scoring engine. Keep this crate pure: no IO, no platform concerns, no
//! state between calls.

pub mod cards;
pub mod config;
pub mod content;
pub mod effects;
pub mod format;
pub mod hand;
pub mod rules;
pub mod scoring;

pub use cards::*;
pub use config::*;
pub use content::*;
pub use effects::*;
pub use format::*;
pub use hand::*;
pub use rules::*;
pub use scoring::*;
