//! Typed AST layer over the CST
//!
//! Thin, type-safe wrappers over the raw nodes that rules and fix providers
//! inspect. Each wrapper implements [`AstNode::cast`] to safely convert from
//! a [`SyntaxNode`].

use super::nodes::direct_token;
use super::{SyntaxKind, SyntaxNode, SyntaxToken};

/// Helper trait for casting CST nodes to typed wrappers
pub trait AstNode: Sized {
    fn can_cast(kind: SyntaxKind) -> bool;
    fn cast(node: SyntaxNode) -> Option<Self>;
    fn syntax(&self) -> &SyntaxNode;
}

macro_rules! ast_node {
    ($(#[$meta:meta])* $name:ident, $kind:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash)]
        pub struct $name {
            syntax: SyntaxNode,
        }

        impl AstNode for $name {
            fn can_cast(kind: SyntaxKind) -> bool {
                kind == SyntaxKind::$kind
            }

            fn cast(node: SyntaxNode) -> Option<Self> {
                if Self::can_cast(node.kind()) {
                    Some(Self { syntax: node })
                } else {
                    None
                }
            }

            fn syntax(&self) -> &SyntaxNode {
                &self.syntax
            }
        }
    };
}

/// Significant direct child tokens of a node
fn significant_tokens(node: &SyntaxNode) -> impl Iterator<Item = SyntaxToken> + '_ {
    node.children_with_tokens()
        .filter_map(|element| element.into_token())
        .filter(|token| !token.kind().is_trivia())
}

// ============================================================================
// Expressions
// ============================================================================

ast_node!(
    /// `( expression )`
    ParenExpr,
    ParenExpr
);

/// Expressions that never need parentheses around them
pub fn is_primary_expression(kind: SyntaxKind) -> bool {
    matches!(
        kind,
        SyntaxKind::NameExpr
            | SyntaxKind::LiteralExpr
            | SyntaxKind::ThisExpr
            | SyntaxKind::CallExpr
            | SyntaxKind::MemberExpr
            | SyntaxKind::ParenExpr
            | SyntaxKind::NewExpr
    )
}

impl ParenExpr {
    pub fn l_paren(&self) -> Option<SyntaxToken> {
        direct_token(&self.syntax, SyntaxKind::LParen)
    }

    pub fn r_paren(&self) -> Option<SyntaxToken> {
        direct_token(&self.syntax, SyntaxKind::RParen)
    }

    pub fn expression(&self) -> Option<SyntaxNode> {
        self.syntax.children().find(|child| child.kind().is_expression())
    }

    /// Both parentheses and the inner expression are present
    pub fn is_complete(&self) -> bool {
        self.l_paren().is_some() && self.r_paren().is_some() && self.expression().is_some()
    }

    /// The expression sits where any expression is accepted without
    /// parentheses: a statement, an initializer, an argument, a condition or
    /// the right side of an assignment
    pub fn in_full_expression_position(&self) -> bool {
        let Some(parent) = self.syntax.parent() else {
            return false;
        };
        match parent.kind() {
            SyntaxKind::ExprStmt
            | SyntaxKind::ReturnStmt
            | SyntaxKind::LocalDecl
            | SyntaxKind::FieldDecl
            | SyntaxKind::EnumMember
            | SyntaxKind::ArgList
            | SyntaxKind::ParenExpr
            | SyntaxKind::IfStmt
            | SyntaxKind::WhileStmt
            | SyntaxKind::SwitchStmt
            | SyntaxKind::SwitchLabel => true,
            SyntaxKind::AssignExpr => parent.first_child().as_ref() != Some(&self.syntax),
            _ => false,
        }
    }

    /// The parentheses can be removed when this expression replaces `outer`
    pub fn is_redundant_in_place_of(&self, outer: &ParenExpr) -> bool {
        self.is_complete()
            && self.expression().is_some_and(|inner| {
                is_primary_expression(inner.kind()) || outer.in_full_expression_position()
            })
    }

    /// The parentheses can be removed where they stand
    pub fn is_redundant(&self) -> bool {
        self.is_redundant_in_place_of(self)
    }
}

// ============================================================================
// Declarations
// ============================================================================

ast_node!(
    /// `[Attr, Attr(args)]`
    AttributeList,
    AttributeList
);

impl AttributeList {
    pub fn l_bracket(&self) -> Option<SyntaxToken> {
        direct_token(&self.syntax, SyntaxKind::LBracket)
    }

    pub fn r_bracket(&self) -> Option<SyntaxToken> {
        direct_token(&self.syntax, SyntaxKind::RBracket)
    }

    pub fn attributes(&self) -> impl Iterator<Item = SyntaxNode> + '_ {
        self.syntax
            .children()
            .filter(|child| child.kind() == SyntaxKind::Attribute)
    }

    pub fn commas(&self) -> impl Iterator<Item = SyntaxToken> + '_ {
        significant_tokens(&self.syntax).filter(|token| token.kind() == SyntaxKind::Comma)
    }
}

ast_node!(
    /// Declaration modifiers such as `public static`
    ModifierList,
    ModifierList
);

/// Canonical position of a modifier: access, then `static`, then the rest
pub fn modifier_rank(kind: SyntaxKind) -> u8 {
    match kind {
        SyntaxKind::PublicKw
        | SyntaxKind::ProtectedKw
        | SyntaxKind::InternalKw
        | SyntaxKind::PrivateKw => 0,
        SyntaxKind::StaticKw => 1,
        _ => 2,
    }
}

impl ModifierList {
    pub fn modifiers(&self) -> impl Iterator<Item = SyntaxToken> + '_ {
        significant_tokens(&self.syntax)
    }

    /// Modifiers already follow the canonical order
    pub fn is_ordered(&self) -> bool {
        let ranks: Vec<u8> = self.modifiers().map(|token| modifier_rank(token.kind())).collect();
        ranks.windows(2).all(|pair| pair[0] <= pair[1])
    }
}

ast_node!(
    /// A type in a declaration: `int`, `Name`, `System.String`
    TypeRef,
    TypeRef
);

/// Framework type names and the keyword aliases that replace them
const BUILTIN_ALIASES: [(&str, SyntaxKind); 11] = [
    ("Boolean", SyntaxKind::BoolKw),
    ("Byte", SyntaxKind::ByteKw),
    ("Char", SyntaxKind::CharKw),
    ("Int16", SyntaxKind::ShortKw),
    ("Int32", SyntaxKind::IntKw),
    ("Int64", SyntaxKind::LongKw),
    ("Single", SyntaxKind::FloatKw),
    ("Double", SyntaxKind::DoubleKw),
    ("Decimal", SyntaxKind::DecimalKw),
    ("Object", SyntaxKind::ObjectKw),
    ("String", SyntaxKind::StringKw),
];

impl TypeRef {
    pub fn tokens(&self) -> impl Iterator<Item = SyntaxToken> + '_ {
        significant_tokens(&self.syntax)
    }

    /// Keyword alias for `Int32` or `System.Int32`, if this type has one
    pub fn builtin_alias(&self) -> Option<SyntaxKind> {
        let texts: Vec<String> = self.tokens().map(|token| token.text().to_string()).collect();
        let name = match texts.as_slice() {
            [name] => name,
            [system, dot, name] if system.as_str() == "System" && dot.as_str() == "." => name,
            _ => return None,
        };
        BUILTIN_ALIASES
            .iter()
            .find(|(framework, _)| *framework == name.as_str())
            .map(|(_, keyword)| *keyword)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::syntax::parse;

    fn find<N: AstNode>(source: &str) -> Vec<N> {
        SyntaxNode::new_root(parse(source).green)
            .descendants()
            .filter_map(N::cast)
            .collect()
    }

    #[test]
    fn test_paren_redundancy() {
        let parens = find::<ParenExpr>("x = (a + b) * (c);\n");
        assert_eq!(parens.len(), 2);
        assert!(!parens[0].is_redundant());
        assert!(parens[1].is_redundant());

        let parens = find::<ParenExpr>("return (a + b);\n");
        assert!(parens[0].is_redundant());
    }

    #[test]
    fn test_nested_parens_redundant_in_outer_position() {
        let parens = find::<ParenExpr>("y = x * ((a + b));\n");
        let (outer, inner) = (&parens[0], &parens[1]);
        assert!(outer.is_redundant());
        assert!(!inner.is_redundant_in_place_of(outer));

        let parens = find::<ParenExpr>("return ((a + b));\n");
        assert!(parens[1].is_redundant_in_place_of(&parens[0]));
    }

    #[test]
    fn test_incomplete_parens_are_not_redundant() {
        let parens = find::<ParenExpr>("x = (a;\n");
        assert!(!parens[0].is_complete());
        assert!(!parens[0].is_redundant());
    }

    #[test]
    fn test_attribute_list_parts() {
        let lists = find::<AttributeList>("[A, B(1), C] class C { }");
        let list = &lists[0];
        assert_eq!(list.attributes().count(), 3);
        assert_eq!(list.commas().count(), 2);
        assert!(list.l_bracket().is_some() && list.r_bracket().is_some());
    }

    #[test]
    fn test_modifier_order() {
        let lists = find::<ModifierList>("class C { static public int x; public static int y; }");
        assert!(!lists[0].is_ordered());
        assert!(lists[1].is_ordered());
    }

    #[test]
    fn test_builtin_alias_lookup() {
        let types = find::<TypeRef>("class C { Int32 a; System.String b; Foo.String c; int d; }");
        let aliases: Vec<Option<SyntaxKind>> = types.iter().map(TypeRef::builtin_alias).collect();
        assert_eq!(
            aliases,
            vec![Some(SyntaxKind::IntKw), Some(SyntaxKind::StringKw), None, None]
        );
    }
}
