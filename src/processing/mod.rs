//! Deterministic resume scoring engine

pub mod alignment;
pub mod analyzer;
pub mod breakdown;
pub mod formatting;
pub mod keywords;
pub mod roles;
pub mod sections;
pub mod skills;
pub mod structure;
