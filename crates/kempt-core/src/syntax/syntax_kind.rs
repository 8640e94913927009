//! Syntax kind enumeration for the kempt CST
//!
//! This module defines all possible node and token types in the syntax tree.
//! Discriminants are contiguous so that a raw rowan kind maps back through
//! [`SyntaxKind::ALL`].

use std::fmt;

/// Syntax kind for language elements
///
/// This enum represents all possible types of nodes and tokens in the CST.
/// It includes:
/// - Trivia (whitespace, line breaks, comments, directives)
/// - Punctuation and operators
/// - Literals and identifiers
/// - Keywords
/// - Structural nodes (declarations, statements, expressions)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(u16)]
pub enum SyntaxKind {
    // ==================
    // Trivia
    // ==================
    /// Whitespace (spaces, tabs), never contains a line break
    Whitespace,
    /// `\n`, `\r\n` or a lone `\r`
    Newline,
    /// Line comment starting with //
    LineComment,
    /// Block comment /* ... */
    BlockComment,
    /// Preprocessor-style directive, `#region` up to the end of the line
    Directive,

    // ==================
    // Punctuation and operators
    // ==================
    LBrace,
    RBrace,
    LParen,
    RParen,
    LBracket,
    RBracket,
    Semicolon,
    Comma,
    Dot,
    Colon,
    Question,
    Eq,
    EqEq,
    BangEq,
    Lt,
    Gt,
    LtEq,
    GtEq,
    Plus,
    Minus,
    Star,
    Slash,
    Percent,
    Bang,
    AmpAmp,
    PipePipe,
    PlusEq,
    MinusEq,

    // ==================
    // Literals and identifiers
    // ==================
    Ident,
    NumberLiteral,
    StringLiteral,
    CharLiteral,

    // ==================
    // Keywords
    // ==================

    // Declaration keywords
    UsingKw,
    NamespaceKw,
    ClassKw,
    StructKw,
    InterfaceKw,
    EnumKw,

    // Modifiers
    PublicKw,
    PrivateKw,
    ProtectedKw,
    InternalKw,
    StaticKw,
    ReadonlyKw,
    ConstKw,
    AbstractKw,
    SealedKw,
    VirtualKw,
    OverrideKw,

    // Statement keywords
    IfKw,
    ElseKw,
    WhileKw,
    ReturnKw,
    SwitchKw,
    CaseKw,
    DefaultKw,
    BreakKw,
    ContinueKw,

    // Expression keywords
    NewKw,
    ThisKw,
    TrueKw,
    FalseKw,
    NullKw,

    // Predefined types
    VoidKw,
    BoolKw,
    ByteKw,
    CharKw,
    ShortKw,
    IntKw,
    LongKw,
    FloatKw,
    DoubleKw,
    DecimalKw,
    ObjectKw,
    StringKw,

    // ==================
    // Special tokens
    // ==================
    /// Character the lexer could not classify
    ErrorToken,
    /// Zero-width end of file marker, owns the final leading trivia
    Eof,

    // ==================
    // Nodes
    // ==================
    SourceFile,
    UsingDirective,
    NamespaceDecl,
    NamespaceBody,
    /// `class`, `struct` and `interface` declarations
    ClassDecl,
    TypeBody,
    EnumDecl,
    EnumBody,
    EnumMember,
    AttributeList,
    Attribute,
    ModifierList,
    FieldDecl,
    /// Methods and constructors
    MethodDecl,
    ParamList,
    Param,
    TypeRef,

    Block,
    LocalDecl,
    ExprStmt,
    EmptyStmt,
    IfStmt,
    ElseClause,
    WhileStmt,
    ReturnStmt,
    BreakStmt,
    ContinueStmt,
    SwitchStmt,
    SwitchBody,
    SwitchSection,
    SwitchLabel,

    ParenExpr,
    BinaryExpr,
    PrefixExpr,
    AssignExpr,
    CallExpr,
    ArgList,
    MemberExpr,
    NameExpr,
    LiteralExpr,
    ThisExpr,
    NewExpr,

    /// Node wrapping tokens the parser could not place
    Error,
}

impl SyntaxKind {
    /// Every kind, indexed by discriminant
    pub const ALL: [SyntaxKind; 125] = {
        use SyntaxKind::*;
        [
            Whitespace, Newline, LineComment, BlockComment, Directive, LBrace, RBrace, LParen,
            RParen, LBracket, RBracket, Semicolon, Comma, Dot, Colon, Question, Eq, EqEq, BangEq,
            Lt, Gt, LtEq, GtEq, Plus, Minus, Star, Slash, Percent, Bang, AmpAmp, PipePipe, PlusEq,
            MinusEq, Ident, NumberLiteral, StringLiteral, CharLiteral, UsingKw, NamespaceKw,
            ClassKw, StructKw, InterfaceKw, EnumKw, PublicKw, PrivateKw, ProtectedKw, InternalKw,
            StaticKw, ReadonlyKw, ConstKw, AbstractKw, SealedKw, VirtualKw, OverrideKw, IfKw,
            ElseKw, WhileKw, ReturnKw, SwitchKw, CaseKw, DefaultKw, BreakKw, ContinueKw, NewKw,
            ThisKw, TrueKw, FalseKw, NullKw, VoidKw, BoolKw, ByteKw, CharKw, ShortKw, IntKw,
            LongKw, FloatKw, DoubleKw, DecimalKw, ObjectKw, StringKw, ErrorToken, Eof,
            SourceFile, UsingDirective, NamespaceDecl, NamespaceBody, ClassDecl, TypeBody,
            EnumDecl, EnumBody, EnumMember, AttributeList, Attribute, ModifierList, FieldDecl,
            MethodDecl, ParamList, Param, TypeRef, Block, LocalDecl, ExprStmt, EmptyStmt, IfStmt,
            ElseClause, WhileStmt, ReturnStmt, BreakStmt, ContinueStmt, SwitchStmt, SwitchBody,
            SwitchSection, SwitchLabel, ParenExpr, BinaryExpr, PrefixExpr, AssignExpr, CallExpr,
            ArgList, MemberExpr, NameExpr, LiteralExpr, ThisExpr, NewExpr, Error,
        ]
    };

    /// Map a raw rowan kind back to a [`SyntaxKind`]
    pub fn from_raw(raw: u16) -> Option<Self> {
        Self::ALL.get(raw as usize).copied()
    }

    /// Check if this is a trivia kind (whitespace, line breaks, comments, directives)
    pub const fn is_trivia(self) -> bool {
        matches!(
            self,
            Self::Whitespace
                | Self::Newline
                | Self::LineComment
                | Self::BlockComment
                | Self::Directive
        )
    }

    /// Check if this is a keyword
    pub const fn is_keyword(self) -> bool {
        (self as u16) >= (Self::UsingKw as u16) && (self as u16) <= (Self::StringKw as u16)
    }

    /// Check if this is a declaration modifier
    pub const fn is_modifier(self) -> bool {
        (self as u16) >= (Self::PublicKw as u16) && (self as u16) <= (Self::OverrideKw as u16)
    }

    /// Check if this is a predefined type keyword (`int`, `string`, ...)
    pub const fn is_predefined_type(self) -> bool {
        (self as u16) >= (Self::VoidKw as u16) && (self as u16) <= (Self::StringKw as u16)
    }

    /// Check if this is a literal
    pub const fn is_literal(self) -> bool {
        matches!(
            self,
            Self::NumberLiteral
                | Self::StringLiteral
                | Self::CharLiteral
                | Self::TrueKw
                | Self::FalseKw
                | Self::NullKw
        )
    }

    /// Check if this is a structural node
    pub const fn is_node(self) -> bool {
        (self as u16) >= (Self::SourceFile as u16)
    }

    /// Check if this node kind is a statement
    pub const fn is_statement(self) -> bool {
        matches!(
            self,
            Self::Block
                | Self::LocalDecl
                | Self::ExprStmt
                | Self::EmptyStmt
                | Self::IfStmt
                | Self::WhileStmt
                | Self::ReturnStmt
                | Self::BreakStmt
                | Self::ContinueStmt
                | Self::SwitchStmt
        )
    }

    /// Check if this node kind is a declaration that can carry attributes
    pub const fn is_declaration(self) -> bool {
        matches!(
            self,
            Self::NamespaceDecl
                | Self::ClassDecl
                | Self::EnumDecl
                | Self::FieldDecl
                | Self::MethodDecl
                | Self::UsingDirective
        )
    }

    /// Check if this node kind is an expression
    pub const fn is_expression(self) -> bool {
        (self as u16) >= (Self::ParenExpr as u16) && (self as u16) <= (Self::NewExpr as u16)
            && !matches!(self, Self::ArgList)
    }

    /// Get the text representation of keyword tokens
    pub const fn keyword_text(self) -> Option<&'static str> {
        match self {
            Self::UsingKw => Some("using"),
            Self::NamespaceKw => Some("namespace"),
            Self::ClassKw => Some("class"),
            Self::StructKw => Some("struct"),
            Self::InterfaceKw => Some("interface"),
            Self::EnumKw => Some("enum"),
            Self::PublicKw => Some("public"),
            Self::PrivateKw => Some("private"),
            Self::ProtectedKw => Some("protected"),
            Self::InternalKw => Some("internal"),
            Self::StaticKw => Some("static"),
            Self::ReadonlyKw => Some("readonly"),
            Self::ConstKw => Some("const"),
            Self::AbstractKw => Some("abstract"),
            Self::SealedKw => Some("sealed"),
            Self::VirtualKw => Some("virtual"),
            Self::OverrideKw => Some("override"),
            Self::IfKw => Some("if"),
            Self::ElseKw => Some("else"),
            Self::WhileKw => Some("while"),
            Self::ReturnKw => Some("return"),
            Self::SwitchKw => Some("switch"),
            Self::CaseKw => Some("case"),
            Self::DefaultKw => Some("default"),
            Self::BreakKw => Some("break"),
            Self::ContinueKw => Some("continue"),
            Self::NewKw => Some("new"),
            Self::ThisKw => Some("this"),
            Self::TrueKw => Some("true"),
            Self::FalseKw => Some("false"),
            Self::NullKw => Some("null"),
            Self::VoidKw => Some("void"),
            Self::BoolKw => Some("bool"),
            Self::ByteKw => Some("byte"),
            Self::CharKw => Some("char"),
            Self::ShortKw => Some("short"),
            Self::IntKw => Some("int"),
            Self::LongKw => Some("long"),
            Self::FloatKw => Some("float"),
            Self::DoubleKw => Some("double"),
            Self::DecimalKw => Some("decimal"),
            Self::ObjectKw => Some("object"),
            Self::StringKw => Some("string"),
            _ => None,
        }
    }

    /// Look up the keyword kind for an identifier-shaped word
    pub fn from_keyword(text: &str) -> Option<Self> {
        Self::ALL[Self::UsingKw as usize..=Self::StringKw as usize]
            .iter()
            .copied()
            .find(|kind| kind.keyword_text() == Some(text))
    }
}

impl fmt::Display for SyntaxKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{self:?}")
    }
}

impl From<SyntaxKind> for rowan::SyntaxKind {
    fn from(kind: SyntaxKind) -> Self {
        Self(kind as u16)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_all_is_indexed_by_discriminant() {
        for (index, kind) in SyntaxKind::ALL.iter().enumerate() {
            assert_eq!(*kind as usize, index, "{kind:?} is out of place");
        }
        assert_eq!(SyntaxKind::from_raw(SyntaxKind::Error as u16), Some(SyntaxKind::Error));
        assert_eq!(SyntaxKind::from_raw(SyntaxKind::ALL.len() as u16), None);
    }

    #[test]
    fn test_trivia_classification() {
        assert!(SyntaxKind::Whitespace.is_trivia());
        assert!(SyntaxKind::LineComment.is_trivia());
        assert!(SyntaxKind::Directive.is_trivia());
        assert!(!SyntaxKind::Eof.is_trivia());
        assert!(!SyntaxKind::Ident.is_trivia());
    }

    #[test]
    fn test_keyword_classification() {
        assert!(SyntaxKind::ClassKw.is_keyword());
        assert!(SyntaxKind::StringKw.is_keyword());
        assert!(!SyntaxKind::Ident.is_keyword());
        assert!(SyntaxKind::StaticKw.is_modifier());
        assert!(!SyntaxKind::ClassKw.is_modifier());
        assert!(SyntaxKind::IntKw.is_predefined_type());
    }

    #[test]
    fn test_keyword_lookup() {
        assert_eq!(SyntaxKind::from_keyword("while"), Some(SyntaxKind::WhileKw));
        assert_eq!(SyntaxKind::from_keyword("string"), Some(SyntaxKind::StringKw));
        assert_eq!(SyntaxKind::from_keyword("String"), None);
        assert_eq!(SyntaxKind::IfKw.keyword_text(), Some("if"));
        assert_eq!(SyntaxKind::Ident.keyword_text(), None);
    }

    #[test]
    fn test_node_classification() {
        assert!(SyntaxKind::SourceFile.is_node());
        assert!(SyntaxKind::Error.is_node());
        assert!(!SyntaxKind::Eof.is_node());
        assert!(SyntaxKind::IfStmt.is_statement());
        assert!(SyntaxKind::ParenExpr.is_expression());
        assert!(!SyntaxKind::ArgList.is_expression());
    }
}
