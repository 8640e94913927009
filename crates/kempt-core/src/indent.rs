//! Indentation model
//!
//! The expected indentation of a line is `depth × unit`, where the depth is
//! the number of enclosing indentation scopes and the unit is a tab or a
//! fixed number of spaces.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::syntax::{SyntaxElement, SyntaxKind, SyntaxNode, SyntaxToken};

/// Indentation style
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase", default)]
pub struct IndentationSettings {
    /// Indent with tabs instead of spaces
    pub use_tabs: bool,
    /// Number of spaces per indentation level
    pub indentation_size: usize,
    /// Display width of a tab character
    pub tab_size: usize,
}

impl Default for IndentationSettings {
    fn default() -> Self {
        Self {
            use_tabs: false,
            indentation_size: 4,
            tab_size: 4,
        }
    }
}

impl IndentationSettings {
    pub fn spaces(indentation_size: usize) -> Self {
        Self {
            indentation_size,
            ..Self::default()
        }
    }

    pub fn tabs() -> Self {
        Self {
            use_tabs: true,
            ..Self::default()
        }
    }

    /// Text of one indentation level
    pub fn unit(&self) -> String {
        if self.use_tabs {
            "\t".to_string()
        } else {
            " ".repeat(self.indentation_size)
        }
    }

    /// Indentation text for a nesting depth
    pub fn indentation_string(&self, depth: usize) -> String {
        self.unit().repeat(depth)
    }

    /// Display width of leading whitespace, tabs advancing to the next stop
    pub fn column_width(&self, whitespace: &str) -> usize {
        let tab_size = self.tab_size.max(1);
        whitespace.chars().fold(0, |column, ch| match ch {
            '\t' => column + tab_size - column % tab_size,
            _ => column + 1,
        })
    }

    /// Whole indentation levels contained in `whitespace`
    pub fn indentation_steps(&self, whitespace: &str) -> usize {
        let step = if self.use_tabs {
            self.tab_size
        } else {
            self.indentation_size
        };
        self.column_width(whitespace) / step.max(1)
    }
}

/// Which nodes open an indentation scope
///
/// Children of a scope node are indented one level deeper than the node,
/// except for the scope's delimiters (braces, labels, the head of an `if`),
/// which stay at the node's own level.
pub trait IndentScopes {
    fn introduces_scope(&self, kind: SyntaxKind) -> bool;

    /// `child` belongs to `scope` but is not indented by it
    fn is_scope_delimiter(&self, scope: &SyntaxNode, child: &SyntaxElement) -> bool;
}

/// Brace scopes, switch sections and unbraced `if`/`else`/`while` bodies
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultIndentScopes;

impl IndentScopes for DefaultIndentScopes {
    fn introduces_scope(&self, kind: SyntaxKind) -> bool {
        matches!(
            kind,
            SyntaxKind::Block
                | SyntaxKind::TypeBody
                | SyntaxKind::NamespaceBody
                | SyntaxKind::EnumBody
                | SyntaxKind::SwitchBody
                | SyntaxKind::SwitchSection
                | SyntaxKind::IfStmt
                | SyntaxKind::ElseClause
                | SyntaxKind::WhileStmt
        )
    }

    fn is_scope_delimiter(&self, scope: &SyntaxNode, child: &SyntaxElement) -> bool {
        let child_kind = child.kind();
        match scope.kind() {
            SyntaxKind::SwitchSection => child_kind == SyntaxKind::SwitchLabel,
            SyntaxKind::IfStmt | SyntaxKind::WhileStmt => {
                !(child_kind.is_statement() && child_kind != SyntaxKind::Block)
            }
            SyntaxKind::ElseClause => {
                !(child_kind.is_statement()
                    && child_kind != SyntaxKind::Block
                    && child_kind != SyntaxKind::IfStmt)
            }
            _ => matches!(child_kind, SyntaxKind::LBrace | SyntaxKind::RBrace),
        }
    }
}

/// Number of scopes that indent `token`
pub fn nesting_depth(token: &SyntaxToken, scopes: &impl IndentScopes) -> usize {
    let mut depth = 0;
    let mut child = SyntaxElement::Token(token.clone());
    for ancestor in token.parent_ancestors() {
        if scopes.introduces_scope(ancestor.kind()) && !scopes.is_scope_delimiter(&ancestor, &child)
        {
            depth += 1;
        }
        child = SyntaxElement::Node(ancestor);
    }
    depth
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::syntax::{SyntaxNode, parse};

    fn depth_of(source: &str, text: &str, nth: usize) -> usize {
        let root = SyntaxNode::new_root(parse(source).green);
        let token = root
            .descendants_with_tokens()
            .filter_map(|e| e.into_token())
            .filter(|t| t.text() == text)
            .nth(nth)
            .unwrap();
        nesting_depth(&token, &DefaultIndentScopes)
    }

    #[test]
    fn test_indentation_strings() {
        let spaces = IndentationSettings::spaces(2);
        assert_eq!(spaces.unit(), "  ");
        assert_eq!(spaces.indentation_string(3), "      ");
        assert_eq!(IndentationSettings::tabs().indentation_string(2), "\t\t");
        assert_eq!(IndentationSettings::default().indentation_string(0), "");
    }

    #[test]
    fn test_column_width_and_steps() {
        let settings = IndentationSettings::default();
        assert_eq!(settings.column_width("\t"), 4);
        assert_eq!(settings.column_width("  \t"), 4);
        assert_eq!(settings.column_width("  \t "), 5);
        assert_eq!(settings.indentation_steps("        "), 2);
        assert_eq!(settings.indentation_steps("\t\t "), 2);
    }

    #[test]
    fn test_braces_sit_at_the_scope_owner_level() {
        let source = "class C\n{\n    void M()\n    {\n        x();\n    }\n}\n";
        assert_eq!(depth_of(source, "{", 0), 0);
        assert_eq!(depth_of(source, "void", 0), 1);
        assert_eq!(depth_of(source, "{", 1), 1);
        assert_eq!(depth_of(source, "x", 0), 2);
        assert_eq!(depth_of(source, "}", 0), 1);
        assert_eq!(depth_of(source, "}", 1), 0);
    }

    #[test]
    fn test_unbraced_bodies_are_indented() {
        let source = "if (a)\n    b();\nelse if (c)\n    d();\nelse\n    e();\n";
        assert_eq!(depth_of(source, "b", 0), 1);
        assert_eq!(depth_of(source, "else", 0), 0);
        assert_eq!(depth_of(source, "if", 1), 0);
        assert_eq!(depth_of(source, "d", 0), 1);
        assert_eq!(depth_of(source, "e", 0), 1);
    }

    #[test]
    fn test_switch_sections() {
        let source = "switch (x)\n{\n    case 1:\n        y();\n        break;\n}\n";
        assert_eq!(depth_of(source, "case", 0), 1);
        assert_eq!(depth_of(source, "y", 0), 2);
        assert_eq!(depth_of(source, "break", 0), 2);
    }
}
