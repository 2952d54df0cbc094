//! Core domain types and validation logic.

pub mod asset_class;
pub mod record_table;
pub mod predicate;
pub mod negotiation_rule;
pub mod partition;
pub mod pipeline;
pub mod summary;
pub mod run_config;
pub mod config_validation;
pub mod error;
