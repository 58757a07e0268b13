//! Linkage Reducer - deduplicate linkage checker filter baselines
//!
//! This library reduces a concatenated baseline of `LinkageCheckerFilter`
//! blocks, each introduced by a comment naming the module that produced it,
//! into one filter document. Structurally identical filter records collapse
//! into a single entry whose comment lists every originating module.

pub mod cli;
pub mod config;
pub mod error;
pub mod events;
pub mod machine;
pub mod pipeline;
pub mod record;
pub mod serializer;
pub mod store;
pub mod symbol;
pub mod tag;
