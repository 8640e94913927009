//! Node tracking across successive rewrites
//!
//! Red nodes are only valid for the tree version they came from. A
//! [`TrackedTree`] hands out [`Marker`]s instead: each marker is stored as a
//! child-index path from the root, and the marker index is rebuilt after
//! every replacement so that [`TrackedTree::current`] always yields the
//! node's version in the latest tree.
//!
//! After replacing the node at path `P` with `k` elements:
//! - the marker of `P` follows the first node of the replacement (and is
//!   dropped when the replacement holds no node),
//! - markers below `P` are dropped,
//! - markers of later siblings of `P`, and their descendants, shift by `k - 1`,
//! - every other marker is unchanged.

use std::collections::HashMap;

use rowan::{GreenNode, GreenNodeData, NodeOrToken};

use super::green::to_owned_element;
use super::{GreenElement, SyntaxElement, SyntaxNode};
use crate::error::KemptError;
use crate::result::Result;

/// Stable handle on a node across tree versions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Marker(u32);

#[derive(Debug, Clone)]
pub struct TrackedTree {
    root: GreenNode,
    paths: HashMap<Marker, Vec<usize>>,
    next_marker: u32,
}

impl TrackedTree {
    pub fn new(root: GreenNode) -> Self {
        Self {
            root,
            paths: HashMap::new(),
            next_marker: 0,
        }
    }

    /// Red view of the current tree version
    pub fn root(&self) -> SyntaxNode {
        SyntaxNode::new_root(self.root.clone())
    }

    pub fn green(&self) -> &GreenNode {
        &self.root
    }

    pub fn into_green(self) -> GreenNode {
        self.root
    }

    /// Tag a node of the current tree version
    pub fn track(&mut self, node: &SyntaxNode) -> Marker {
        let mut path = Vec::new();
        let mut current = node.clone();
        while let Some(parent) = current.parent() {
            path.push(current.index());
            current = parent;
        }
        path.reverse();

        let marker = Marker(self.next_marker);
        self.next_marker += 1;
        self.paths.insert(marker, path);
        marker
    }

    pub fn is_tracked(&self, marker: Marker) -> bool {
        self.paths.contains_key(&marker)
    }

    /// Current version of a tracked node, `None` once it has been removed
    pub fn current(&self, marker: Marker) -> Option<SyntaxNode> {
        let path = self.paths.get(&marker)?;
        resolve(&self.root(), path)?.into_node()
    }

    /// Replace a tracked node with `replacement` and return the inserted
    /// elements as they appear in the new tree
    pub fn replace(
        &mut self,
        marker: Marker,
        replacement: Vec<GreenElement>,
    ) -> Result<Vec<SyntaxElement>> {
        let path = self
            .paths
            .get(&marker)
            .cloned()
            .ok_or_else(|| KemptError::invalid_edit("marker is no longer tracked"))?;
        let Some((&index, parent_path)) = path.split_last() else {
            return Err(KemptError::invalid_edit("the root node cannot be replaced"));
        };

        let first_node = replacement
            .iter()
            .position(|element| matches!(element, NodeOrToken::Node(_)));
        let count = replacement.len();

        self.root = splice(&self.root, &path, replacement)
            .ok_or_else(|| KemptError::invalid_edit("tracked path does not exist"))?;
        self.rebuild_index(&path, count, first_node);

        let Some(parent) = resolve(&self.root(), parent_path).and_then(|e| e.into_node()) else {
            return Err(KemptError::internal_error("parent of a replaced node vanished"));
        };
        Ok(parent
            .children_with_tokens()
            .skip(index)
            .take(count)
            .collect())
    }

    fn rebuild_index(&mut self, replaced: &[usize], count: usize, first_node: Option<usize>) {
        let depth = replaced.len() - 1;
        let index = replaced[depth];
        let shift = count as isize - 1;

        self.paths.retain(|_, path| {
            if path.as_slice() == replaced {
                return match first_node {
                    Some(offset) => {
                        path[depth] = index + offset;
                        true
                    }
                    None => false,
                };
            }
            if path.starts_with(replaced) {
                return false;
            }
            if path.len() > depth && path[..depth] == replaced[..depth] && path[depth] > index {
                path[depth] = (path[depth] as isize + shift) as usize;
            }
            true
        });
    }
}

fn resolve(root: &SyntaxNode, path: &[usize]) -> Option<SyntaxElement> {
    let mut current = NodeOrToken::Node(root.clone());
    for &index in path {
        current = current.into_node()?.children_with_tokens().nth(index)?;
    }
    Some(current)
}

/// Rebuild `node` with the element at `path` replaced
fn splice(node: &GreenNodeData, path: &[usize], replacement: Vec<GreenElement>) -> Option<GreenNode> {
    let (&index, rest) = path.split_first()?;
    let mut children: Vec<GreenElement> = node.children().map(to_owned_element).collect();
    if index >= children.len() {
        return None;
    }
    if rest.is_empty() {
        children.splice(index..=index, replacement);
    } else {
        let NodeOrToken::Node(child) = &children[index] else {
            return None;
        };
        let rebuilt = splice(child, rest, replacement)?;
        children[index] = NodeOrToken::Node(rebuilt);
    }
    Some(GreenNode::new(node.kind(), children))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::syntax::green::{node, token};
    use crate::syntax::{SyntaxKind, parse};

    fn tree(source: &str) -> TrackedTree {
        TrackedTree::new(parse(source).green)
    }

    fn statements(tree: &TrackedTree) -> Vec<SyntaxNode> {
        tree.root().children().collect()
    }

    fn empty_statement() -> GreenElement {
        NodeOrToken::Node(node(SyntaxKind::EmptyStmt, vec![token(SyntaxKind::Semicolon, ";")]))
    }

    #[test]
    fn test_marker_survives_edit_elsewhere() {
        let mut tree = tree("a;\nb;\nc;\n");
        let nodes = statements(&tree);
        let first = tree.track(&nodes[0]);
        let last = tree.track(&nodes[2]);

        tree.replace(first, vec![empty_statement(), empty_statement()]).unwrap();

        assert_eq!(tree.root().text().to_string(), ";;b;\nc;\n");
        assert_eq!(tree.current(last).unwrap().text().to_string(), "c;\n");
        assert_eq!(tree.current(first).unwrap().text().to_string(), ";");
    }

    #[test]
    fn test_descendant_markers_are_dropped() {
        let mut tree = tree("x = (a);\n");
        let root = tree.root();
        let statement = root.first_child().unwrap();
        let paren = root
            .descendants()
            .find(|n| n.kind() == SyntaxKind::ParenExpr)
            .unwrap();
        let outer = tree.track(&statement);
        let inner = tree.track(&paren);

        let inserted = tree.replace(outer, vec![empty_statement()]).unwrap();

        assert_eq!(inserted.len(), 1);
        assert_eq!(inserted[0].kind(), SyntaxKind::EmptyStmt);
        assert!(tree.current(inner).is_none());
        assert!(!tree.is_tracked(inner));
    }

    #[test]
    fn test_removal_shifts_later_siblings_back() {
        let mut tree = tree("a;\nb;\nc;\n");
        let nodes = statements(&tree);
        let middle = tree.track(&nodes[1]);
        let last = tree.track(&nodes[2]);

        let inserted = tree.replace(middle, Vec::new()).unwrap();

        assert!(inserted.is_empty());
        assert!(tree.current(middle).is_none());
        assert_eq!(tree.current(last).unwrap().text().to_string(), "c;\n");
    }

    #[test]
    fn test_root_cannot_be_replaced() {
        let mut tree = tree("a;\n");
        let root = tree.root();
        let marker = tree.track(&root);
        assert!(tree.replace(marker, vec![empty_statement()]).is_err());
    }
}
