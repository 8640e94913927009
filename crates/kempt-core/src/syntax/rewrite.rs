//! Single-traversal tree rewriting
//!
//! A [`TreeRewriter`] holds a substitution map from elements of one tree
//! version to the green elements replacing them. [`TreeRewriter::rewrite`]
//! walks the tree once: a mapped element is swapped for its replacement,
//! a subtree containing a mapped element is rebuilt, and every other subtree
//! is reused without copying.

use std::collections::HashMap;

use rowan::{GreenNode, NodeOrToken, TextRange};

use super::{GreenElement, SyntaxElement, SyntaxNode};

#[derive(Debug, Default, Clone)]
pub struct TreeRewriter {
    replacements: HashMap<SyntaxElement, Vec<GreenElement>>,
    ranges: Vec<TextRange>,
}

impl TreeRewriter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Map `target` to `replacement` (zero or more elements)
    ///
    /// Returns the previous replacement when the target was already mapped.
    pub fn replace(
        &mut self,
        target: SyntaxElement,
        replacement: Vec<GreenElement>,
    ) -> Option<Vec<GreenElement>> {
        let range = target.text_range();
        let previous = self.replacements.insert(target, replacement);
        if previous.is_none() {
            self.ranges.push(range);
        }
        previous
    }

    pub fn contains(&self, element: &SyntaxElement) -> bool {
        self.replacements.contains_key(element)
    }

    pub fn len(&self) -> usize {
        self.replacements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.replacements.is_empty()
    }

    /// Apply every substitution to the tree rooted at `root`
    ///
    /// Targets nested inside another target are never reached: the outer
    /// replacement wins. The root itself can only be replaced by exactly one
    /// node; any other root mapping is ignored.
    pub fn rewrite(&self, root: &SyntaxNode) -> GreenNode {
        let root_element = NodeOrToken::Node(root.clone());
        if let Some([NodeOrToken::Node(replacement)]) =
            self.replacements.get(&root_element).map(Vec::as_slice)
        {
            return replacement.clone();
        }
        self.rewrite_node(root)
    }

    fn rewrite_node(&self, node: &SyntaxNode) -> GreenNode {
        let mut children: Vec<GreenElement> = Vec::new();
        for child in node.children_with_tokens() {
            if let Some(replacement) = self.replacements.get(&child) {
                children.extend(replacement.iter().cloned());
                continue;
            }
            match child {
                NodeOrToken::Token(token) => {
                    children.push(NodeOrToken::Token(token.green().to_owned()));
                }
                NodeOrToken::Node(child) => {
                    let green = if self.touches(&child) {
                        self.rewrite_node(&child)
                    } else {
                        child.green().into_owned()
                    };
                    children.push(NodeOrToken::Node(green));
                }
            }
        }
        GreenNode::new(node.kind().into(), children)
    }

    /// Some target may lie inside `node`
    fn touches(&self, node: &SyntaxNode) -> bool {
        let range = node.text_range();
        self.ranges.iter().any(|target| range.contains_range(*target))
    }
}
