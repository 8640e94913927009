//! Trivia-preserving lexer
//!
//! Every byte of the input ends up in exactly one token: whitespace, line
//! breaks, comments and directives are emitted as trivia tokens so that the
//! parser can build a lossless tree. `tokens.concat() == input` always holds.

use std::ops::Range;

use super::SyntaxKind;

/// Simple span representing a byte range in the source
pub type LexSpan = Range<usize>;

/// A lexer error
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LexerError {
    pub message: String,
    pub span: LexSpan,
}

impl LexerError {
    pub fn new(message: impl Into<String>, span: LexSpan) -> Self {
        Self {
            message: message.into(),
            span,
        }
    }
}

/// A token with its syntax kind and span
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawToken {
    pub kind: SyntaxKind,
    pub text: String,
    pub span: LexSpan,
}

impl RawToken {
    pub fn new(kind: SyntaxKind, text: impl Into<String>, span: LexSpan) -> Self {
        Self {
            kind,
            text: text.into(),
            span,
        }
    }
}

/// Result returned by the lexer
pub type LexResult = (Vec<RawToken>, Vec<LexerError>);

/// Lex input preserving all trivia
///
/// The returned stream always ends with a zero-width [`SyntaxKind::Eof`]
/// token so that trailing trivia of the file has an owner.
pub fn lex_with_trivia(input: &str) -> LexResult {
    let mut tokens = Vec::new();
    let mut errors = Vec::new();

    let len = input.len();
    let mut i = 0usize;
    // Only whitespace seen since the last line break (or start of input)
    let mut at_line_start = true;

    while let Some((current, size)) = next_char(input, i) {
        let start = i;

        let kind = match current {
            '\n' => {
                i += size;
                SyntaxKind::Newline
            }
            '\r' => {
                i += size;
                if let Some(('\n', nl_size)) = next_char(input, i) {
                    i += nl_size;
                }
                SyntaxKind::Newline
            }
            c if c.is_whitespace() => {
                i = scan_while(input, i, |c| c.is_whitespace() && c != '\n' && c != '\r');
                SyntaxKind::Whitespace
            }
            '/' if input[i + size..].starts_with('/') => {
                i = scan_to_line_end(input, i);
                SyntaxKind::LineComment
            }
            '/' if input[i + size..].starts_with('*') => match input[i + 2..].find("*/") {
                Some(rel) => {
                    i = i + 2 + rel + 2;
                    SyntaxKind::BlockComment
                }
                None => {
                    errors.push(LexerError::new("unterminated block comment", start..len));
                    i = len;
                    SyntaxKind::BlockComment
                }
            },
            '#' if at_line_start => {
                i = scan_to_line_end(input, i);
                SyntaxKind::Directive
            }
            '"' => {
                let (end, terminated) = scan_quoted(input, i, '"');
                if !terminated {
                    errors.push(LexerError::new("unterminated string literal", start..end));
                }
                i = end;
                SyntaxKind::StringLiteral
            }
            '\'' => {
                let (end, terminated) = scan_quoted(input, i, '\'');
                if !terminated {
                    errors.push(LexerError::new("unterminated character literal", start..end));
                }
                i = end;
                SyntaxKind::CharLiteral
            }
            c if c.is_ascii_digit() => {
                i = scan_while(input, i, |c| c.is_ascii_digit());
                if input[i..].starts_with('.')
                    && input[i + 1..].starts_with(|c: char| c.is_ascii_digit())
                {
                    i = scan_while(input, i + 1, |c| c.is_ascii_digit());
                }
                SyntaxKind::NumberLiteral
            }
            c if c.is_alphabetic() || c == '_' => {
                i = scan_while(input, i, |c| c.is_alphanumeric() || c == '_');
                SyntaxKind::from_keyword(&input[start..i]).unwrap_or(SyntaxKind::Ident)
            }
            _ => {
                let (kind, width) = punctuation(&input[i..], current, size);
                if kind == SyntaxKind::ErrorToken {
                    errors.push(LexerError::new(
                        format!("unexpected character '{current}'"),
                        start..start + width,
                    ));
                }
                i += width;
                kind
            }
        };

        at_line_start = match kind {
            SyntaxKind::Newline => true,
            SyntaxKind::Whitespace => at_line_start,
            _ => false,
        };
        tokens.push(RawToken::new(kind, &input[start..i], start..i));
    }

    tokens.push(RawToken::new(SyntaxKind::Eof, "", len..len));
    (tokens, errors)
}

fn next_char(input: &str, index: usize) -> Option<(char, usize)> {
    input[index..].chars().next().map(|c| (c, c.len_utf8()))
}

fn scan_while(input: &str, mut index: usize, predicate: impl Fn(char) -> bool) -> usize {
    while let Some((c, size)) = next_char(input, index) {
        if !predicate(c) {
            break;
        }
        index += size;
    }
    index
}

/// End of the current line, excluding the line break
/// End of a comment or directive: the rest of the line, without the
/// whitespace ending it (that whitespace is lexed as its own trivia)
fn scan_to_line_end(input: &str, index: usize) -> usize {
    let end = scan_while(input, index, |c| c != '\n' && c != '\r');
    index + input[index..end].trim_end().len()
}

/// Scan a quoted literal with backslash escapes; stops at the line end when
/// unterminated
fn scan_quoted(input: &str, start: usize, quote: char) -> (usize, bool) {
    let mut index = start + quote.len_utf8();
    while let Some((c, size)) = next_char(input, index) {
        match c {
            '\\' => {
                index += size;
                if let Some((escaped, escaped_size)) = next_char(input, index)
                    && escaped != '\n'
                    && escaped != '\r'
                {
                    index += escaped_size;
                }
            }
            '\n' | '\r' => return (index, false),
            c if c == quote => return (index + size, true),
            _ => index += size,
        }
    }
    (index, false)
}

fn punctuation(rest: &str, current: char, size: usize) -> (SyntaxKind, usize) {
    const TWO_CHAR: [(&str, SyntaxKind); 8] = [
        ("==", SyntaxKind::EqEq),
        ("!=", SyntaxKind::BangEq),
        ("<=", SyntaxKind::LtEq),
        (">=", SyntaxKind::GtEq),
        ("&&", SyntaxKind::AmpAmp),
        ("||", SyntaxKind::PipePipe),
        ("+=", SyntaxKind::PlusEq),
        ("-=", SyntaxKind::MinusEq),
    ];
    if let Some((op, kind)) = TWO_CHAR.iter().find(|(op, _)| rest.starts_with(op)) {
        return (*kind, op.len());
    }

    let kind = match current {
        '{' => SyntaxKind::LBrace,
        '}' => SyntaxKind::RBrace,
        '(' => SyntaxKind::LParen,
        ')' => SyntaxKind::RParen,
        '[' => SyntaxKind::LBracket,
        ']' => SyntaxKind::RBracket,
        ';' => SyntaxKind::Semicolon,
        ',' => SyntaxKind::Comma,
        '.' => SyntaxKind::Dot,
        ':' => SyntaxKind::Colon,
        '?' => SyntaxKind::Question,
        '=' => SyntaxKind::Eq,
        '<' => SyntaxKind::Lt,
        '>' => SyntaxKind::Gt,
        '+' => SyntaxKind::Plus,
        '-' => SyntaxKind::Minus,
        '*' => SyntaxKind::Star,
        '/' => SyntaxKind::Slash,
        '%' => SyntaxKind::Percent,
        '!' => SyntaxKind::Bang,
        _ => SyntaxKind::ErrorToken,
    };
    (kind, size)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kinds(input: &str) -> Vec<SyntaxKind> {
        lex_with_trivia(input).0.into_iter().map(|t| t.kind).collect()
    }

    #[test]
    fn test_lossless_concatenation() {
        let input = "class C\r\n{\n\t// note\n  int x = 1; /* a\n b */ #x\n}\n";
        let (tokens, errors) = lex_with_trivia(input);
        assert!(errors.is_empty());
        let joined: String = tokens.iter().map(|t| t.text.as_str()).collect();
        assert_eq!(joined, input);
    }

    #[test]
    fn test_trivia_kinds() {
        use SyntaxKind::*;
        assert_eq!(
            kinds("a  // c\r\n/* b */"),
            vec![Ident, Whitespace, LineComment, Newline, BlockComment, Eof]
        );
    }

    #[test]
    fn test_whitespace_after_line_comment_is_separate() {
        use SyntaxKind::*;
        assert_eq!(kinds("// c  \n"), vec![LineComment, Whitespace, Newline, Eof]);
    }

    #[test]
    fn test_directive_only_at_line_start() {
        use SyntaxKind::*;
        assert_eq!(kinds("  #region x\n"), vec![Whitespace, Directive, Newline, Eof]);
        assert_eq!(kinds("a #b"), vec![Ident, Whitespace, ErrorToken, Ident, Eof]);
    }

    #[test]
    fn test_keywords_and_operators() {
        use SyntaxKind::*;
        assert_eq!(
            kinds("if(x>=1&&y!=2)"),
            vec![IfKw, LParen, Ident, GtEq, NumberLiteral, AmpAmp, Ident, BangEq, NumberLiteral, RParen, Eof]
        );
        assert_eq!(kinds("Int32 int"), vec![Ident, Whitespace, IntKw, Eof]);
    }

    #[test]
    fn test_literals() {
        use SyntaxKind::*;
        assert_eq!(
            kinds(r#""a\"b" 'c' 1.5"#),
            vec![StringLiteral, Whitespace, CharLiteral, Whitespace, NumberLiteral, Eof]
        );
    }

    #[test]
    fn test_unterminated_literals_report_errors() {
        let (tokens, errors) = lex_with_trivia("\"abc\nx /* open");
        assert_eq!(errors.len(), 2);
        assert_eq!(tokens[0].text, "\"abc");
        assert_eq!(tokens.last().map(|t| t.kind), Some(SyntaxKind::Eof));
    }
}
