//! CLI command implementations.

pub mod builder;
pub mod common;
pub mod glossary;
pub mod health;
pub mod quiz;
pub mod simulate;
pub mod version;
