//! fiflag — fixed-income transaction validator.
//!
//! Hexagonal architecture: validation rules and the pipeline live in [`domain`],
//! port traits in [`ports`], concrete CSV/INI implementations in [`adapters`].

pub mod domain;
pub mod ports;
pub mod adapters;
pub mod cli;
