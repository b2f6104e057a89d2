//! Collaborator seams.
//!
//! The core neither parses workbooks nor shells out to a tree-listing tool;
//! those live behind these traits. A host wires in a spreadsheet-backed
//! `PlanSource`, a `ReportSink` for display or logging, and a
//! `DirectoryLister` for the plan-creation flow.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::constants::DEFAULT_SHEET_NAME;
use crate::types::errors::Result;
use crate::types::{ExecutionReport, Plan};

/// Node kind in a directory listing.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ListingKind {
    File,
    Dir,
}

/// One node of the normalized hierarchical listing the plan-creation flow
/// consumes. Produced by a [`DirectoryLister`] from whatever JSON-capable
/// tree-listing mechanism the host uses; the core never sees the raw format.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListingNode {
    pub path: PathBuf,
    pub kind: ListingKind,
    #[serde(default)]
    pub children: Vec<ListingNode>,
}

/// Row skeleton handed to the sheet writer: path and kind filled in, action
/// and target left for the operator. `depth` drives row indentation.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct SheetRow {
    pub path: PathBuf,
    pub kind: ListingKind,
    pub depth: usize,
    pub action: String,
    pub target: String,
}

/// Resolves the worksheet selector: the caller's choice, or
/// [`DEFAULT_SHEET_NAME`] when none was given. Sheet-backed [`PlanSource`]
/// implementations route their selector through this so every host agrees on
/// the default.
#[must_use]
pub fn sheet_or_default(sheet: Option<&str>) -> &str {
    sheet.unwrap_or(DEFAULT_SHEET_NAME)
}

/// Supplies the annotated plan, optionally from a named sheet. The selector
/// is an explicit parameter resolved via [`sheet_or_default`]; the core reads
/// no environment or files itself.
pub trait PlanSource {
    fn load(&self, sheet: Option<&str>) -> Result<Plan>;
}

/// Receives the execution report. In dry-run this is the sole observable
/// output of a run.
pub trait ReportSink {
    fn publish(&self, report: &ExecutionReport) -> Result<()>;
}

/// Supplies the normalized hierarchical listing for a root directory.
pub trait DirectoryLister {
    fn list(&self, root: &Path) -> Result<ListingNode>;
}
