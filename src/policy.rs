//! Run policy: optional behaviors the executor can be opted into.

/// Policy governs pre-execution plan shaping and degraded move handling.
///
/// Defaults are the strict semantics: entries execute in plan iteration
/// order, nested entries are not folded, and a move that cannot be done with
/// a single rename fails rather than degrading.
#[derive(Clone, Copy, Debug, Default)]
pub struct Policy {
    /// Fold entries that are encapsulated by an actioned ancestor: same
    /// action collapses into the ancestor's whole-tree operation, `Ignore`
    /// under `Copy` excludes the subtree from the copy, `Ignore` under `Move`
    /// becomes a `Delete` of the left-behind subtree.
    pub fold_encapsulated: bool,
    /// Order entries deepest-first so child operations run before an
    /// ancestor's whole-tree operation.
    pub order_by_depth: bool,
    /// When a rename fails (cross-device moves, typically), fall back to
    /// copy-then-remove. The copy and cleanup phases surface their failures
    /// distinctly in the report.
    pub degraded_move_fallback: bool,
}

impl Policy {
    /// Preset matching sheet-driven bulk migrations: folding, deepest-first
    /// ordering, and degraded move fallback all enabled.
    #[must_use]
    pub fn bulk_preset() -> Self {
        Self {
            fold_encapsulated: true,
            order_by_depth: true,
            degraded_move_fallback: true,
        }
    }
}
