//! Plan-creation half: flatten a directory listing into row skeletons for
//! the sheet writer, one row per node, depth-first, action and target blank.

use crate::adapters::{ListingNode, SheetRow};

/// Flatten the listing into sheet rows in depth-first order, recording each
/// node's depth for indentation.
#[must_use]
pub fn rows_from_listing(root: &ListingNode) -> Vec<SheetRow> {
    let mut rows = Vec::new();
    push_rows(root, 0, &mut rows);
    rows
}

fn push_rows(node: &ListingNode, depth: usize, rows: &mut Vec<SheetRow>) {
    rows.push(SheetRow {
        path: node.path.clone(),
        kind: node.kind,
        depth,
        action: String::new(),
        target: String::new(),
    });
    for child in &node.children {
        push_rows(child, depth + 1, rows);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::ListingKind;
    use std::path::PathBuf;

    fn node(path: &str, kind: ListingKind, children: Vec<ListingNode>) -> ListingNode {
        ListingNode {
            path: PathBuf::from(path),
            kind,
            children,
        }
    }

    #[test]
    fn rows_are_depth_first_with_blank_annotations() {
        let tree = node(
            "root",
            ListingKind::Dir,
            vec![
                node(
                    "root/a",
                    ListingKind::Dir,
                    vec![node("root/a/f.txt", ListingKind::File, vec![])],
                ),
                node("root/b.txt", ListingKind::File, vec![]),
            ],
        );
        let rows = rows_from_listing(&tree);
        let paths: Vec<_> = rows.iter().map(|r| r.path.clone()).collect();
        assert_eq!(
            paths,
            vec![
                PathBuf::from("root"),
                PathBuf::from("root/a"),
                PathBuf::from("root/a/f.txt"),
                PathBuf::from("root/b.txt"),
            ]
        );
        assert_eq!(rows[2].depth, 2);
        assert!(rows.iter().all(|r| r.action.is_empty() && r.target.is_empty()));
    }
}
