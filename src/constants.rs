//! Crate-wide constants.

/// UUIDv5 namespace tag for deterministic plan/operation IDs.
pub const NS_TAG: &str = "treegrate:v1";

/// Subsystem name stamped on every emitted fact.
pub const SUBSYSTEM: &str = "treegrate";

/// Worksheet name used when the caller does not select a named sheet: the
/// plan-creation flow writes row skeletons to it and [`PlanSource`] hosts
/// read the plan back from it via [`sheet_or_default`].
///
/// [`PlanSource`]: crate::adapters::PlanSource
/// [`sheet_or_default`]: crate::adapters::sheet_or_default
pub const DEFAULT_SHEET_NAME: &str = "Files+Folders";
