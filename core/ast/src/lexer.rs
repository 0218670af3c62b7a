//! Lexer for SDL schema sources, built on `logos`.
//!
//! Produces [`Token`]s carrying their kind, literal text and location. The
//! stream always ends with a single [`TokenKind::Eof`]; unrecognized input
//! becomes a [`TokenKind::Invalid`] token and is rejected by the parser.

use logos::Logos;

use crate::nodes::Location;

/// Raw token from logos, before locations are attached.
#[derive(Logos, Debug, Clone, Copy, PartialEq)]
#[logos(skip r"[ \t\r\n\f]+")]
enum RawToken {
    #[regex(r"//[^\n]*")]
    LineComment,

    #[token("package")]
    Package,
    #[token("use")]
    Use,
    #[token("class")]
    Class,
    #[token("struct")]
    Struct,
    #[token("enum")]
    Enum,

    #[regex(r"[A-Za-z_][A-Za-z0-9_]*(\.[A-Za-z_][A-Za-z0-9_]*)*")]
    Identifier,
    #[regex(r#""[^"\n]*""#)]
    String,
    #[regex(r"[0-9]+")]
    Integer,
    #[regex(r"[0-9]+\.[0-9]+([eE][+-]?[0-9]+)?")]
    Float,

    #[token("{")]
    LBrace,
    #[token("}")]
    RBrace,
    #[token("[")]
    LBracket,
    #[token("]")]
    RBracket,
    #[token("<")]
    LAngle,
    #[token(">")]
    RAngle,
    #[token("(")]
    LParen,
    #[token(")")]
    RParen,
    #[token(":")]
    Colon,
    #[token(",")]
    Comma,
    #[token("@")]
    At,
    #[token("+")]
    Plus,
    #[token("-")]
    Minus,
    #[token("*")]
    Star,
    #[token("/")]
    Slash,
    #[token("^")]
    Caret,
}

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum TokenKind {
    Package,
    Use,
    Class,
    Struct,
    Enum,
    Identifier,
    String,
    Integer,
    Float,
    LBrace,
    RBrace,
    LBracket,
    RBracket,
    LAngle,
    RAngle,
    LParen,
    RParen,
    Colon,
    Comma,
    At,
    Plus,
    Minus,
    Star,
    Slash,
    Caret,
    Eof,
    Invalid,
}

#[derive(Clone, PartialEq, Eq, Debug)]
pub struct Token {
    pub kind: TokenKind,
    pub literal: String,
    pub location: Location,
}

impl Token {
    #[must_use]
    pub fn is(&self, kind: TokenKind) -> bool {
        self.kind == kind
    }
}

impl From<RawToken> for TokenKind {
    fn from(raw: RawToken) -> Self {
        match raw {
            RawToken::LineComment => unreachable!("comments are filtered before conversion"),
            RawToken::Package => TokenKind::Package,
            RawToken::Use => TokenKind::Use,
            RawToken::Class => TokenKind::Class,
            RawToken::Struct => TokenKind::Struct,
            RawToken::Enum => TokenKind::Enum,
            RawToken::Identifier => TokenKind::Identifier,
            RawToken::String => TokenKind::String,
            RawToken::Integer => TokenKind::Integer,
            RawToken::Float => TokenKind::Float,
            RawToken::LBrace => TokenKind::LBrace,
            RawToken::RBrace => TokenKind::RBrace,
            RawToken::LBracket => TokenKind::LBracket,
            RawToken::RBracket => TokenKind::RBracket,
            RawToken::LAngle => TokenKind::LAngle,
            RawToken::RAngle => TokenKind::RAngle,
            RawToken::LParen => TokenKind::LParen,
            RawToken::RParen => TokenKind::RParen,
            RawToken::Colon => TokenKind::Colon,
            RawToken::Comma => TokenKind::Comma,
            RawToken::At => TokenKind::At,
            RawToken::Plus => TokenKind::Plus,
            RawToken::Minus => TokenKind::Minus,
            RawToken::Star => TokenKind::Star,
            RawToken::Slash => TokenKind::Slash,
            RawToken::Caret => TokenKind::Caret,
        }
    }
}

pub struct Lexer<'a> {
    inner: logos::Lexer<'a, RawToken>,
    source_name: String,
    line_starts: Vec<usize>,
    finished: bool,
}

impl<'a> Lexer<'a> {
    /// Creates a lexer over `source`. `source_name` ends up in every token's
    /// location and is usually the file path.
    #[must_use]
    pub fn new(source: &'a str, source_name: &str) -> Self {
        let line_starts = std::iter::once(0)
            .chain(source.match_indices('\n').map(|(i, _)| i + 1))
            .collect();
        Self {
            inner: RawToken::lexer(source),
            source_name: source_name.to_string(),
            line_starts,
            finished: false,
        }
    }

    /// Returns the next token. Once the input is exhausted every call
    /// returns an `Eof` token.
    pub fn scan(&mut self) -> Token {
        loop {
            match self.inner.next() {
                Some(Ok(RawToken::LineComment)) => {}
                Some(Ok(raw)) => {
                    return self.token(raw.into(), self.inner.span().start);
                }
                Some(Err(())) => {
                    return self.token(TokenKind::Invalid, self.inner.span().start);
                }
                None => {
                    self.finished = true;
                    let end = self.inner.source().len();
                    return Token {
                        kind: TokenKind::Eof,
                        literal: String::new(),
                        location: self.location(end),
                    };
                }
            }
        }
    }

    /// Collects the whole stream, including the trailing `Eof`.
    #[must_use]
    pub fn tokenize(mut self) -> Vec<Token> {
        let mut tokens = Vec::new();
        while !self.finished {
            tokens.push(self.scan());
        }
        tokens
    }

    fn token(&self, kind: TokenKind, start: usize) -> Token {
        Token {
            kind,
            literal: self.inner.slice().to_string(),
            location: self.location(start),
        }
    }

    #[allow(clippy::cast_possible_truncation)]
    fn location(&self, offset: usize) -> Location {
        let line = match self.line_starts.binary_search(&offset) {
            Ok(line) => line,
            Err(next_line) => next_line - 1,
        };
        let column = offset - self.line_starts[line];
        Location::new(
            offset as u32,
            line as u32 + 1,
            column as u32 + 1,
            self.source_name.clone(),
        )
    }
}
