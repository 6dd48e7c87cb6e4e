// src/analyze/mod.rs
//! Matching and ranking: raw listings → keyword/region matches → priority tiers.

pub mod matcher;
pub mod priority;

pub use matcher::Matcher;
pub use priority::prioritize;
