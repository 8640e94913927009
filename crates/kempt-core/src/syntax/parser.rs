//! Hierarchical parser
//!
//! Builds a lossless green tree from the lexer's token stream. Each
//! significant token is emitted together with its trivia: the leading trivia
//! first, then the token, then its trailing trivia, all as siblings inside the
//! node that is open when the token is consumed. Trailing trivia runs up to
//! and including the first line break after the token (see
//! [`trailing_trivia_len`](crate::trivia::trailing_trivia_len)).
//!
//! The parser never fails. Unexpected input is wrapped in
//! [`SyntaxKind::Error`] nodes and reported as a [`ParseError`].

use rowan::{Checkpoint, GreenNode, GreenNodeBuilder, TextRange, TextSize};

use super::SyntaxKind;
use super::lexer::{RawToken, lex_with_trivia};
use crate::trivia::trailing_trivia_len;

/// A syntax error found while parsing
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseError {
    pub message: String,
    pub range: TextRange,
}

/// Result of parsing a source text
#[derive(Debug, Clone)]
pub struct Parse {
    pub green: GreenNode,
    pub errors: Vec<ParseError>,
}

/// Parse source text into a green tree
///
/// # Example
///
/// ```rust
/// use kempt_core::syntax::parse;
///
/// let source = "class C\n{\n    int x;\n}\n";
/// let parse = parse(source);
/// assert!(parse.errors.is_empty());
/// ```
pub fn parse(source: &str) -> Parse {
    let (tokens, lex_errors) = lex_with_trivia(source);
    let mut parser = Parser::new(&tokens);
    parser.parse_source_file();

    let mut errors: Vec<ParseError> = lex_errors
        .into_iter()
        .map(|err| ParseError {
            message: err.message,
            range: TextRange::new(offset(err.span.start), offset(err.span.end)),
        })
        .collect();
    errors.extend(parser.errors);
    errors.sort_by_key(|err| err.range.start());

    Parse {
        green: parser.builder.finish(),
        errors,
    }
}

fn offset(value: usize) -> TextSize {
    TextSize::from(value as u32)
}

/// Position of a significant token in the raw stream, with the raw index
/// ranges of the trivia it owns
#[derive(Debug, Clone)]
struct Significant {
    index: usize,
    leading_start: usize,
    trailing_end: usize,
}

/// Group raw tokens into significant tokens that own their trivia
fn attach_trivia(tokens: &[RawToken]) -> Vec<Significant> {
    let positions: Vec<usize> = tokens
        .iter()
        .enumerate()
        .filter(|(_, token)| !token.kind.is_trivia())
        .map(|(index, _)| index)
        .collect();

    let mut significant: Vec<Significant> = Vec::with_capacity(positions.len());
    for (n, &index) in positions.iter().enumerate() {
        let leading_start = match n.checked_sub(1) {
            None => 0,
            Some(prev) => {
                let gap_start = positions[prev] + 1;
                let gap = &tokens[gap_start..index];
                let split = gap_start + trailing_trivia_len(gap, |t| t.kind == SyntaxKind::Newline);
                if let Some(previous) = significant.last_mut() {
                    previous.trailing_end = split;
                }
                split
            }
        };
        significant.push(Significant {
            index,
            leading_start,
            trailing_end: index + 1,
        });
    }
    significant
}

/// Binding power of infix operators, higher binds tighter
fn infix_precedence(kind: SyntaxKind) -> Option<u8> {
    use SyntaxKind::*;
    let precedence = match kind {
        PipePipe => 1,
        AmpAmp => 2,
        EqEq | BangEq => 3,
        Lt | Gt | LtEq | GtEq => 4,
        Plus | Minus => 5,
        Star | Slash | Percent => 6,
        _ => return None,
    };
    Some(precedence)
}

/// Token stream parser
struct Parser<'a> {
    tokens: &'a [RawToken],
    significant: Vec<Significant>,
    pos: usize,
    builder: GreenNodeBuilder<'static>,
    errors: Vec<ParseError>,
}

impl<'a> Parser<'a> {
    fn new(tokens: &'a [RawToken]) -> Self {
        Self {
            tokens,
            significant: attach_trivia(tokens),
            pos: 0,
            builder: GreenNodeBuilder::new(),
            errors: Vec::new(),
        }
    }

    // ==================
    // Declarations
    // ==================

    fn parse_source_file(&mut self) {
        self.start_node(SyntaxKind::SourceFile);
        while !self.at(SyntaxKind::Eof) {
            self.parse_item(false);
        }
        self.bump();
        self.finish_node();
    }

    /// Parse one item at file or namespace level
    fn parse_item(&mut self, in_namespace: bool) {
        match self.current() {
            SyntaxKind::UsingKw => self.parse_using_directive(),
            SyntaxKind::NamespaceKw => self.parse_namespace(),
            SyntaxKind::RBrace if !in_namespace => {
                self.error_and_bump("unexpected '}'");
            }
            _ if in_namespace || self.at_declaration_start() => self.parse_declaration(),
            _ => self.parse_statement(),
        }
    }

    fn at_declaration_start(&self) -> bool {
        matches!(
            self.current(),
            SyntaxKind::LBracket
                | SyntaxKind::ClassKw
                | SyntaxKind::StructKw
                | SyntaxKind::InterfaceKw
                | SyntaxKind::EnumKw
        ) || self.current().is_modifier()
    }

    fn parse_using_directive(&mut self) {
        self.start_node(SyntaxKind::UsingDirective);
        self.bump();
        self.parse_dotted_name();
        self.expect(SyntaxKind::Semicolon);
        self.finish_node();
    }

    fn parse_namespace(&mut self) {
        self.start_node(SyntaxKind::NamespaceDecl);
        self.bump();
        self.parse_dotted_name();

        self.start_node(SyntaxKind::NamespaceBody);
        if self.expect(SyntaxKind::LBrace) {
            while !self.at(SyntaxKind::RBrace) && !self.at(SyntaxKind::Eof) {
                self.parse_item(true);
            }
            self.expect(SyntaxKind::RBrace);
        }
        self.finish_node();

        self.finish_node();
    }

    /// `Ident (. Ident)*`, emitted into the currently open node
    fn parse_dotted_name(&mut self) {
        if !self.expect(SyntaxKind::Ident) {
            return;
        }
        while self.at(SyntaxKind::Dot) && self.nth(1) == SyntaxKind::Ident {
            self.bump();
            self.bump();
        }
    }

    /// Type or member declaration with optional attributes and modifiers
    fn parse_declaration(&mut self) {
        let checkpoint = self.checkpoint();
        let start = self.pos;

        while self.at(SyntaxKind::LBracket) {
            self.parse_attribute_list();
        }
        if self.current().is_modifier() {
            self.start_node(SyntaxKind::ModifierList);
            while self.current().is_modifier() {
                self.bump();
            }
            self.finish_node();
        }

        match self.current() {
            SyntaxKind::ClassKw | SyntaxKind::StructKw | SyntaxKind::InterfaceKw => {
                self.start_node_at(checkpoint, SyntaxKind::ClassDecl);
                self.bump();
                self.expect(SyntaxKind::Ident);
                self.parse_type_body();
                self.finish_node();
            }
            SyntaxKind::EnumKw => {
                self.start_node_at(checkpoint, SyntaxKind::EnumDecl);
                self.bump();
                self.expect(SyntaxKind::Ident);
                self.parse_enum_body();
                self.finish_node();
            }
            SyntaxKind::Ident if self.nth(1) == SyntaxKind::LParen => {
                // Constructor
                self.start_node_at(checkpoint, SyntaxKind::MethodDecl);
                self.bump();
                self.parse_method_rest();
                self.finish_node();
            }
            kind if kind == SyntaxKind::Ident || kind.is_predefined_type() => {
                self.parse_type_ref();
                if self.at(SyntaxKind::Ident) && self.nth(1) == SyntaxKind::LParen {
                    self.start_node_at(checkpoint, SyntaxKind::MethodDecl);
                    self.bump();
                    self.parse_method_rest();
                } else {
                    self.start_node_at(checkpoint, SyntaxKind::FieldDecl);
                    self.expect(SyntaxKind::Ident);
                    if self.eat(SyntaxKind::Eq) {
                        self.parse_expression();
                    }
                    self.expect(SyntaxKind::Semicolon);
                }
                self.finish_node();
            }
            _ => {
                self.start_node_at(checkpoint, SyntaxKind::Error);
                self.error("expected declaration");
                if self.pos == start && !self.at(SyntaxKind::Eof) && !self.at(SyntaxKind::RBrace) {
                    self.bump();
                }
                self.finish_node();
            }
        }
    }

    /// Parameter list and body of a method whose name was just consumed
    fn parse_method_rest(&mut self) {
        self.parse_param_list();
        if self.at(SyntaxKind::LBrace) {
            self.parse_block();
        } else {
            self.expect(SyntaxKind::Semicolon);
        }
    }

    fn parse_attribute_list(&mut self) {
        self.start_node(SyntaxKind::AttributeList);
        self.bump();
        loop {
            self.start_node(SyntaxKind::Attribute);
            self.parse_dotted_name();
            if self.at(SyntaxKind::LParen) {
                self.parse_arg_list();
            }
            self.finish_node();
            if !self.eat(SyntaxKind::Comma) {
                break;
            }
        }
        self.expect(SyntaxKind::RBracket);
        self.finish_node();
    }

    fn parse_type_body(&mut self) {
        self.start_node(SyntaxKind::TypeBody);
        if self.expect(SyntaxKind::LBrace) {
            while !self.at(SyntaxKind::RBrace) && !self.at(SyntaxKind::Eof) {
                self.parse_declaration();
            }
            self.expect(SyntaxKind::RBrace);
        }
        self.finish_node();
    }

    fn parse_enum_body(&mut self) {
        self.start_node(SyntaxKind::EnumBody);
        if self.expect(SyntaxKind::LBrace) {
            while self.at(SyntaxKind::Ident) {
                self.start_node(SyntaxKind::EnumMember);
                self.bump();
                if self.eat(SyntaxKind::Eq) {
                    self.parse_expression();
                }
                self.finish_node();
                if !self.eat(SyntaxKind::Comma) {
                    break;
                }
            }
            while !self.at(SyntaxKind::RBrace) && !self.at(SyntaxKind::Eof) {
                self.error_and_bump("expected enum member");
            }
            self.expect(SyntaxKind::RBrace);
        }
        self.finish_node();
    }

    fn parse_param_list(&mut self) {
        self.start_node(SyntaxKind::ParamList);
        self.expect(SyntaxKind::LParen);
        if !self.at(SyntaxKind::RParen) {
            loop {
                self.start_node(SyntaxKind::Param);
                self.parse_type_ref();
                self.expect(SyntaxKind::Ident);
                self.finish_node();
                if !self.eat(SyntaxKind::Comma) {
                    break;
                }
            }
        }
        self.expect(SyntaxKind::RParen);
        self.finish_node();
    }

    fn parse_type_ref(&mut self) {
        self.start_node(SyntaxKind::TypeRef);
        if self.current().is_predefined_type() {
            self.bump();
        } else {
            self.parse_dotted_name();
        }
        self.finish_node();
    }

    // ==================
    // Statements
    // ==================

    fn parse_statement(&mut self) {
        match self.current() {
            SyntaxKind::LBrace => self.parse_block(),
            SyntaxKind::Semicolon => {
                self.start_node(SyntaxKind::EmptyStmt);
                self.bump();
                self.finish_node();
            }
            SyntaxKind::IfKw => self.parse_if(),
            SyntaxKind::WhileKw => {
                self.start_node(SyntaxKind::WhileStmt);
                self.bump();
                self.parse_condition();
                self.parse_embedded_statement();
                self.finish_node();
            }
            SyntaxKind::ReturnKw => {
                self.start_node(SyntaxKind::ReturnStmt);
                self.bump();
                if !self.at(SyntaxKind::Semicolon) {
                    self.parse_expression();
                }
                self.expect(SyntaxKind::Semicolon);
                self.finish_node();
            }
            SyntaxKind::BreakKw | SyntaxKind::ContinueKw => {
                let kind = if self.at(SyntaxKind::BreakKw) {
                    SyntaxKind::BreakStmt
                } else {
                    SyntaxKind::ContinueStmt
                };
                self.start_node(kind);
                self.bump();
                self.expect(SyntaxKind::Semicolon);
                self.finish_node();
            }
            SyntaxKind::SwitchKw => self.parse_switch(),
            _ if self.at_local_declaration() => {
                self.start_node(SyntaxKind::LocalDecl);
                self.parse_type_ref();
                self.expect(SyntaxKind::Ident);
                if self.eat(SyntaxKind::Eq) {
                    self.parse_expression();
                }
                self.expect(SyntaxKind::Semicolon);
                self.finish_node();
            }
            _ if self.at_expression_start() => {
                self.start_node(SyntaxKind::ExprStmt);
                self.parse_expression();
                self.expect(SyntaxKind::Semicolon);
                self.finish_node();
            }
            _ => self.error_and_bump("expected statement"),
        }
    }

    /// `Type name` lookahead: a predefined type or dotted name followed by an
    /// identifier
    fn at_local_declaration(&self) -> bool {
        if self.current().is_predefined_type() {
            return self.nth(1) == SyntaxKind::Ident;
        }
        if !self.at(SyntaxKind::Ident) {
            return false;
        }
        let mut n = 1;
        while self.nth(n) == SyntaxKind::Dot && self.nth(n + 1) == SyntaxKind::Ident {
            n += 2;
        }
        self.nth(n) == SyntaxKind::Ident
    }

    fn parse_block(&mut self) {
        self.start_node(SyntaxKind::Block);
        self.expect(SyntaxKind::LBrace);
        while !self.at(SyntaxKind::RBrace) && !self.at(SyntaxKind::Eof) {
            self.parse_statement();
        }
        self.expect(SyntaxKind::RBrace);
        self.finish_node();
    }

    fn parse_if(&mut self) {
        self.start_node(SyntaxKind::IfStmt);
        self.bump();
        self.parse_condition();
        self.parse_embedded_statement();
        if self.at(SyntaxKind::ElseKw) {
            self.start_node(SyntaxKind::ElseClause);
            self.bump();
            self.parse_embedded_statement();
            self.finish_node();
        }
        self.finish_node();
    }

    /// `( expr )` of `if`, `while` and `switch`
    fn parse_condition(&mut self) {
        self.expect(SyntaxKind::LParen);
        self.parse_expression();
        self.expect(SyntaxKind::RParen);
    }

    fn parse_embedded_statement(&mut self) {
        if self.at(SyntaxKind::RBrace) || self.at(SyntaxKind::Eof) {
            self.error("expected statement");
        } else {
            self.parse_statement();
        }
    }

    fn parse_switch(&mut self) {
        self.start_node(SyntaxKind::SwitchStmt);
        self.bump();
        self.parse_condition();

        self.start_node(SyntaxKind::SwitchBody);
        if self.expect(SyntaxKind::LBrace) {
            while !self.at(SyntaxKind::RBrace) && !self.at(SyntaxKind::Eof) {
                if self.at_switch_label() {
                    self.parse_switch_section();
                } else {
                    self.error_and_bump("expected 'case' or 'default'");
                }
            }
            self.expect(SyntaxKind::RBrace);
        }
        self.finish_node();

        self.finish_node();
    }

    fn at_switch_label(&self) -> bool {
        self.at(SyntaxKind::CaseKw) || self.at(SyntaxKind::DefaultKw)
    }

    fn parse_switch_section(&mut self) {
        self.start_node(SyntaxKind::SwitchSection);
        while self.at_switch_label() {
            self.start_node(SyntaxKind::SwitchLabel);
            if self.at(SyntaxKind::CaseKw) {
                self.bump();
                self.parse_expression();
            } else {
                self.bump();
            }
            self.expect(SyntaxKind::Colon);
            self.finish_node();
        }
        while !self.at_switch_label() && !self.at(SyntaxKind::RBrace) && !self.at(SyntaxKind::Eof) {
            self.parse_statement();
        }
        self.finish_node();
    }

    // ==================
    // Expressions
    // ==================

    fn at_expression_start(&self) -> bool {
        let kind = self.current();
        kind.is_literal()
            || kind.is_predefined_type()
            || matches!(
                kind,
                SyntaxKind::Ident
                    | SyntaxKind::ThisKw
                    | SyntaxKind::NewKw
                    | SyntaxKind::LParen
                    | SyntaxKind::Bang
                    | SyntaxKind::Minus
            )
    }

    fn parse_expression(&mut self) {
        let checkpoint = self.checkpoint();
        self.parse_binary(0);
        if matches!(
            self.current(),
            SyntaxKind::Eq | SyntaxKind::PlusEq | SyntaxKind::MinusEq
        ) {
            self.start_node_at(checkpoint, SyntaxKind::AssignExpr);
            self.bump();
            self.parse_expression();
            self.finish_node();
        }
    }

    fn parse_binary(&mut self, min_precedence: u8) {
        let checkpoint = self.checkpoint();
        self.parse_unary();
        while let Some(precedence) = infix_precedence(self.current()) {
            if precedence < min_precedence {
                break;
            }
            self.start_node_at(checkpoint, SyntaxKind::BinaryExpr);
            self.bump();
            self.parse_binary(precedence + 1);
            self.finish_node();
        }
    }

    fn parse_unary(&mut self) {
        if self.at(SyntaxKind::Bang) || self.at(SyntaxKind::Minus) {
            self.start_node(SyntaxKind::PrefixExpr);
            self.bump();
            self.parse_unary();
            self.finish_node();
        } else {
            self.parse_postfix();
        }
    }

    fn parse_postfix(&mut self) {
        let checkpoint = self.checkpoint();
        if !self.parse_primary() {
            return;
        }
        loop {
            if self.at(SyntaxKind::LParen) {
                self.start_node_at(checkpoint, SyntaxKind::CallExpr);
                self.parse_arg_list();
                self.finish_node();
            } else if self.at(SyntaxKind::Dot) {
                self.start_node_at(checkpoint, SyntaxKind::MemberExpr);
                self.bump();
                self.expect(SyntaxKind::Ident);
                self.finish_node();
            } else {
                break;
            }
        }
    }

    /// Returns false when no expression could be started
    fn parse_primary(&mut self) -> bool {
        let kind = self.current();
        match kind {
            _ if kind.is_literal() => self.wrap_token(SyntaxKind::LiteralExpr),
            SyntaxKind::Ident => self.wrap_token(SyntaxKind::NameExpr),
            _ if kind.is_predefined_type() => self.wrap_token(SyntaxKind::NameExpr),
            SyntaxKind::ThisKw => self.wrap_token(SyntaxKind::ThisExpr),
            SyntaxKind::LParen => {
                self.start_node(SyntaxKind::ParenExpr);
                self.bump();
                self.parse_expression();
                self.expect(SyntaxKind::RParen);
                self.finish_node();
            }
            SyntaxKind::NewKw => {
                self.start_node(SyntaxKind::NewExpr);
                self.bump();
                self.parse_type_ref();
                if self.at(SyntaxKind::LParen) {
                    self.parse_arg_list();
                } else {
                    self.error("expected '('");
                }
                self.finish_node();
            }
            SyntaxKind::Semicolon
            | SyntaxKind::RParen
            | SyntaxKind::RBrace
            | SyntaxKind::RBracket
            | SyntaxKind::Comma
            | SyntaxKind::Eof => {
                self.error("expected expression");
                return false;
            }
            _ => {
                self.error_and_bump("expected expression");
                return false;
            }
        }
        true
    }

    fn wrap_token(&mut self, kind: SyntaxKind) {
        self.start_node(kind);
        self.bump();
        self.finish_node();
    }

    fn parse_arg_list(&mut self) {
        self.start_node(SyntaxKind::ArgList);
        self.bump();
        if !self.at(SyntaxKind::RParen) {
            loop {
                self.parse_expression();
                if !self.eat(SyntaxKind::Comma) {
                    break;
                }
            }
        }
        self.expect(SyntaxKind::RParen);
        self.finish_node();
    }

    // ==================
    // Token plumbing
    // ==================

    fn raw(&self, n: usize) -> Option<&RawToken> {
        self.significant
            .get(self.pos + n)
            .map(|sig| &self.tokens[sig.index])
    }

    fn current(&self) -> SyntaxKind {
        self.nth(0)
    }

    fn nth(&self, n: usize) -> SyntaxKind {
        self.raw(n).map_or(SyntaxKind::Eof, |token| token.kind)
    }

    fn at(&self, kind: SyntaxKind) -> bool {
        self.current() == kind
    }

    /// Emit the current significant token with its leading and trailing
    /// trivia into the open node
    fn bump(&mut self) {
        let Some(sig) = self.significant.get(self.pos).cloned() else {
            return;
        };
        for token in &self.tokens[sig.leading_start..sig.trailing_end] {
            self.builder.token(token.kind.into(), &token.text);
        }
        self.pos += 1;
    }

    fn eat(&mut self, kind: SyntaxKind) -> bool {
        if self.at(kind) {
            self.bump();
            true
        } else {
            false
        }
    }

    /// Consume `kind` or record an error without consuming anything
    fn expect(&mut self, kind: SyntaxKind) -> bool {
        if self.eat(kind) {
            return true;
        }
        let expected = kind.keyword_text().map_or_else(|| format!("{kind:?}"), str::to_string);
        self.error(format!("expected {expected}"));
        false
    }

    fn error(&mut self, message: impl Into<String>) {
        let range = self
            .raw(0)
            .map(|token| {
                TextRange::new(offset(token.span.start), offset(token.span.end))
            })
            .unwrap_or_default();
        self.errors.push(ParseError {
            message: message.into(),
            range,
        });
    }

    /// Record an error and wrap the current token in an error node
    fn error_and_bump(&mut self, message: &str) {
        self.error(message);
        if self.at(SyntaxKind::Eof) {
            return;
        }
        self.start_node(SyntaxKind::Error);
        self.bump();
        self.finish_node();
    }

    fn start_node(&mut self, kind: SyntaxKind) {
        self.builder.start_node(kind.into());
    }

    fn start_node_at(&mut self, checkpoint: Checkpoint, kind: SyntaxKind) {
        self.builder.start_node_at(checkpoint, kind.into());
    }

    fn finish_node(&mut self) {
        self.builder.finish_node();
    }

    fn checkpoint(&self) -> Checkpoint {
        self.builder.checkpoint()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::syntax::SyntaxNode;

    fn tree(source: &str) -> SyntaxNode {
        let parse = parse(source);
        assert!(parse.errors.is_empty(), "unexpected errors: {:?}", parse.errors);
        SyntaxNode::new_root(parse.green)
    }

    fn child_kinds(node: &SyntaxNode) -> Vec<SyntaxKind> {
        node.children().map(|child| child.kind()).collect()
    }

    #[test]
    fn test_round_trip_preserves_every_byte() {
        let sources = [
            "",
            "\n\n",
            "// only a comment",
            "using System.Text;\nnamespace A.B\n{\n    [Serializable, Obsolete(\"x\")]\n    public static class C\n    {\n        private int x = 1; // trailing\n\n        void M(int a, String b)\n        {\n            if (a > 1) { return; } else b = (a + 1) * 2;\n        }\n    }\n}\n",
            "switch (x)\r\n{\r\n    case 1:\r\n        break;\r\n    default:\r\n        ;\r\n}\r\n",
            "class { ) garbage ( \"unterminated\n",
        ];
        for source in sources {
            let node = SyntaxNode::new_root(parse(source).green);
            assert_eq!(node.text().to_string(), source);
        }
    }

    #[test]
    fn test_declaration_structure() {
        let root = tree("[A] public class C\n{\n    int x;\n    void M() { }\n}\n");
        assert_eq!(child_kinds(&root), vec![SyntaxKind::ClassDecl]);

        let class = root.first_child().unwrap();
        assert_eq!(
            child_kinds(&class),
            vec![SyntaxKind::AttributeList, SyntaxKind::ModifierList, SyntaxKind::TypeBody]
        );
        let body = class.children().last().unwrap();
        assert_eq!(child_kinds(&body), vec![SyntaxKind::FieldDecl, SyntaxKind::MethodDecl]);
    }

    #[test]
    fn test_top_level_statements() {
        let root = tree("if (x)\n  {\n  }\nint y = 2;\nfoo();\n;\n");
        assert_eq!(
            child_kinds(&root),
            vec![
                SyntaxKind::IfStmt,
                SyntaxKind::LocalDecl,
                SyntaxKind::ExprStmt,
                SyntaxKind::EmptyStmt
            ]
        );
    }

    #[test]
    fn test_trailing_trivia_stays_with_token_line() {
        let root = tree("a;  // c\n    b;\n");
        let first = root.first_child().unwrap();
        // `a;` statement owns its comment and line break
        assert_eq!(first.text().to_string(), "a;  // c\n");
        let second = first.next_sibling().unwrap();
        assert_eq!(second.text().to_string(), "    b;\n");
    }

    #[test]
    fn test_final_trivia_belongs_to_eof() {
        let root = tree("x;\n\n// end\n");
        let eof = root.last_token().unwrap();
        assert_eq!(eof.kind(), SyntaxKind::Eof);
        let before: Vec<SyntaxKind> = std::iter::successors(eof.prev_token(), |t| t.prev_token())
            .take_while(|t| t.kind().is_trivia())
            .map(|t| t.kind())
            .collect();
        assert_eq!(
            before,
            vec![SyntaxKind::Newline, SyntaxKind::LineComment, SyntaxKind::Newline]
        );
    }

    #[test]
    fn test_expression_precedence() {
        let root = tree("x = a + b * c;\n");
        let assign = root.first_child().unwrap().first_child().unwrap();
        assert_eq!(assign.kind(), SyntaxKind::AssignExpr);
        let sum = assign.children().nth(1).unwrap();
        assert_eq!(sum.kind(), SyntaxKind::BinaryExpr);
        assert_eq!(sum.children().nth(1).unwrap().kind(), SyntaxKind::BinaryExpr);
    }

    #[test]
    fn test_switch_structure() {
        let root = tree("switch (x)\n{\n    case 1:\n    case 2:\n        y();\n        break;\n    default:\n        break;\n}\n");
        let switch = root.first_child().unwrap();
        let body = switch.children().last().unwrap();
        assert_eq!(body.kind(), SyntaxKind::SwitchBody);
        let sections: Vec<SyntaxNode> = body.children().collect();
        assert_eq!(sections.len(), 2);
        assert_eq!(
            child_kinds(&sections[0]),
            vec![
                SyntaxKind::SwitchLabel,
                SyntaxKind::SwitchLabel,
                SyntaxKind::ExprStmt,
                SyntaxKind::BreakStmt
            ]
        );
    }

    #[test]
    fn test_errors_are_collected_not_fatal() {
        let parse = parse("int x = ;\nclass\n");
        assert!(!parse.errors.is_empty());
        let root = SyntaxNode::new_root(parse.green);
        assert_eq!(root.text().to_string(), "int x = ;\nclass\n");
    }

    #[test]
    fn test_missing_close_paren_is_an_error() {
        let parse = parse("x = (a + b;\n");
        assert_eq!(parse.errors.len(), 1);
        assert_eq!(parse.errors[0].message, "expected RParen");
    }
}
