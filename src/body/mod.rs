//! Body parts
//!
//! Anatomy used for clothing coverage, encumbrance and the layering tabs.

pub mod part;

pub use part::{BodyPart, PartFilter};
