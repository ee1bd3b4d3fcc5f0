//! Trait Space
//!
//! 127 named personality variables (0-100) grouped by one-letter category prefix.

pub mod catalog;
pub mod describe;
pub mod vector;

pub use catalog::{display_name, keys_in, TraitCategory, TRAIT_KEYS};
pub use describe::{communication_style, contradiction_descriptions, flaw_descriptions};
pub use vector::{TraitVector, TRAIT_MAX, TRAIT_MIN};
