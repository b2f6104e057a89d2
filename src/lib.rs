#![forbid(unsafe_code)]
//! Treegrate: plan-driven bulk directory migration.
//!
//! A migration is described as a plan: one entry per filesystem node, each
//! annotated with an action (`Ignore`, `Copy`, `Move`, `Delete`) and, for
//! copies and moves, a target path. The pipeline is:
//!
//! - validate the whole plan up front and abort on any structural defect,
//! - resolve each entry against live filesystem state (directory merges
//!   expand into per-child operations),
//! - apply the resolved operations in `Live` or `DryRun` mode under a strict
//!   no-overwrite rule, recording every operation's fate in an
//!   [`types::ExecutionReport`].
//!
//! Failed operations never abort the run; the report always covers the full
//! plan. All filesystem access goes through the [`fs::Filesystem`] capability
//! trait so the executor can be driven against an in-memory tree in tests.

pub mod adapters;
pub mod api;
pub mod constants;
pub mod fs;
pub mod logging;
pub mod normalize;
pub mod policy;
pub mod resolve;
pub mod survey;
pub mod types;
pub mod validate;

pub use api::*;
