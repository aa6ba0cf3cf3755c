//! Lexer (tokenizer) for minic source code
//!
//! Converts raw source text into classified [`Token`]s, one per call to
//! [`Lexer::next_token`]. Lexing is total: malformed input never stops the
//! scanner, it becomes an error token and scanning resumes after it. Comments
//! are returned as tokens so the token report can show them; the parser
//! drops them.

use super::ast::{LogicalOp, SourceLocation, Type};
use std::fmt;
use thiserror::Error;

/// Reserved words (matched case-insensitively)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Keyword {
    If,
    Else,
    Do,
    While,
    Switch,
    Case,
    Double,
    Int,
    Integer,
    Float,
    Char,
    String,
    Boolean,
    Main,
    Cin,
    Cout,
}

impl Keyword {
    pub fn lookup(word: &str) -> Option<Keyword> {
        let keyword = match word.to_ascii_lowercase().as_str() {
            "if" => Keyword::If,
            "else" => Keyword::Else,
            "do" => Keyword::Do,
            "while" => Keyword::While,
            "switch" => Keyword::Switch,
            "case" => Keyword::Case,
            "double" => Keyword::Double,
            "int" => Keyword::Int,
            "integer" => Keyword::Integer,
            "float" => Keyword::Float,
            "char" => Keyword::Char,
            "string" => Keyword::String,
            "boolean" => Keyword::Boolean,
            "main" => Keyword::Main,
            "cin" => Keyword::Cin,
            "cout" => Keyword::Cout,
            _ => return None,
        };
        Some(keyword)
    }

    /// The declared type for type-name keywords (`integer` is an alias of `int`)
    pub fn as_type(&self) -> Option<Type> {
        match self {
            Keyword::Int | Keyword::Integer => Some(Type::Int),
            Keyword::Float => Some(Type::Float),
            Keyword::Double => Some(Type::Double),
            Keyword::Char => Some(Type::Char),
            Keyword::String => Some(Type::String),
            Keyword::Boolean => Some(Type::Boolean),
            _ => None,
        }
    }
}

/// Arithmetic operator characters, including `++` and `--`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArithOp {
    Plus,
    Minus,
    Star,
    Slash,
    Percent,
    Caret,
    PlusPlus,
    MinusMinus,
}

/// Relational operators other than `==`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RelOp {
    Lt,
    Le,
    Gt,
    Ge,
    NotEq,
}

/// Punctuation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Symbol {
    LParen,
    RParen,
    LBrace,
    RBrace,
    LBracket,
    RBracket,
    Comma,
    Semicolon,
    Colon,
}

impl Symbol {
    fn from_char(ch: char) -> Option<Symbol> {
        let symbol = match ch {
            '(' => Symbol::LParen,
            ')' => Symbol::RParen,
            '{' => Symbol::LBrace,
            '}' => Symbol::RBrace,
            '[' => Symbol::LBracket,
            ']' => Symbol::RBracket,
            ',' => Symbol::Comma,
            ';' => Symbol::Semicolon,
            ':' => Symbol::Colon,
            _ => return None,
        };
        Some(symbol)
    }
}

/// Why a span of input became an error token
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LexErrorKind {
    /// A `.` with no digit after it, or an out-of-range literal
    MalformedNumber,
    /// A digit run running straight into letters, e.g. `3abc`
    InvalidIdentifier,
    UnterminatedComment,
    /// `!` not followed by `=`
    StrayBang,
    InvalidCharacter,
}

impl fmt::Display for LexErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            LexErrorKind::MalformedNumber => "malformed numeric literal",
            LexErrorKind::InvalidIdentifier => "invalid identifier",
            LexErrorKind::UnterminatedComment => "unterminated block comment",
            LexErrorKind::StrayBang => "'!' must be followed by '='",
            LexErrorKind::InvalidCharacter => "invalid character",
        };
        f.write_str(text)
    }
}

/// Token classification
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TokenKind {
    Keyword(Keyword),
    Ident,
    IntLiteral(i64),
    FloatLiteral(f64),
    ArithOp(ArithOp),
    RelOp(RelOp),
    LogicalOp(LogicalOp),
    Assign,
    Equality,
    Symbol(Symbol),
    Comment,
    Error(LexErrorKind),
    Eof,
}

impl TokenKind {
    /// Category name used in the token report
    pub fn category(&self) -> &'static str {
        match self {
            TokenKind::Keyword(_) => "RESERVED_WORD",
            TokenKind::Ident => "IDENTIFIER",
            TokenKind::IntLiteral(_) => "INTEGER",
            TokenKind::FloatLiteral(_) => "FLOAT",
            TokenKind::ArithOp(_) => "ARITHMETIC_OPERATOR",
            TokenKind::RelOp(_) => "RELATIONAL_OPERATOR",
            TokenKind::LogicalOp(_) => "LOGICAL_OPERATOR",
            TokenKind::Assign => "ASSIGNMENT",
            TokenKind::Equality => "EQUALITY",
            TokenKind::Symbol(_) => "SYMBOL",
            TokenKind::Comment => "COMMENT",
            TokenKind::Error(_) => "ERROR",
            TokenKind::Eof => "EOF",
        }
    }

    /// Whether a token of this kind can be the last token of an operand.
    /// A sign right after such a token is an operator, not part of a literal.
    fn ends_operand(&self) -> bool {
        matches!(
            self,
            TokenKind::Ident
                | TokenKind::IntLiteral(_)
                | TokenKind::FloatLiteral(_)
                | TokenKind::Symbol(Symbol::RParen)
        )
    }
}

/// A classified lexeme with the position of its first character
#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    pub kind: TokenKind,
    pub lexeme: String,
    pub location: SourceLocation,
}

impl Token {
    pub fn new(kind: TokenKind, lexeme: impl Into<String>, location: SourceLocation) -> Self {
        Self {
            kind,
            lexeme: lexeme.into(),
            location,
        }
    }

    pub fn is_error(&self) -> bool {
        matches!(self.kind, TokenKind::Error(_))
    }

    /// The lexical diagnostic carried by an error token
    pub fn as_error(&self) -> Option<LexError> {
        match self.kind {
            TokenKind::Error(kind) => Some(LexError {
                kind,
                lexeme: self.lexeme.clone(),
                location: self.location,
            }),
            _ => None,
        }
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind {
            TokenKind::Ident => write!(f, "identifier '{}'", self.lexeme),
            TokenKind::IntLiteral(_) | TokenKind::FloatLiteral(_) => {
                write!(f, "number {}", self.lexeme)
            }
            TokenKind::Comment => write!(f, "comment"),
            TokenKind::Error(_) => write!(f, "invalid token '{}'", self.lexeme),
            TokenKind::Eof => write!(f, "end of file"),
            _ => write!(f, "'{}'", self.lexeme),
        }
    }
}

/// Lexical diagnostic extracted from an error token
#[derive(Debug, Clone, PartialEq, Error)]
#[error("Lexical error at line {}, column {}: {kind} '{lexeme}'", .location.line, .location.column)]
pub struct LexError {
    pub kind: LexErrorKind,
    pub lexeme: String,
    pub location: SourceLocation,
}

/// Lexer for minic source code
pub struct Lexer {
    input: Vec<char>,
    position: usize,
    line: usize,
    column: usize,
    /// Set when the last significant token could end an operand
    after_operand: bool,
    finished: bool,
}

impl Lexer {
    /// Create a new lexer for the given source string.
    pub fn new(input: &str) -> Self {
        Self {
            input: input.chars().collect(),
            position: 0,
            line: 1,
            column: 1,
            after_operand: false,
            finished: false,
        }
    }

    /// Tokenize the entire input, end-of-input token included
    pub fn tokenize(&mut self) -> Vec<Token> {
        self.by_ref().collect()
    }

    /// Scan the next token. Once input is exhausted every call returns `Eof`.
    pub fn next_token(&mut self) -> Token {
        self.skip_whitespace();

        let location = self.current_location();
        let start = self.position;

        let Some(ch) = self.peek() else {
            return Token::new(TokenKind::Eof, "", location);
        };

        let kind = match ch {
            '0'..='9' => self.number_literal(),
            '+' | '-' if self.starts_signed_literal() => self.number_literal(),
            c if c.is_alphabetic() || c == '_' => self.identifier_or_keyword(),
            '/' => self.slash_or_comment(),
            '+' | '-' | '*' | '%' | '^' => self.arithmetic_operator(ch),
            '<' | '>' | '!' | '=' => self.relational_or_assignment(ch),
            _ => {
                self.advance();
                match Symbol::from_char(ch) {
                    Some(symbol) => TokenKind::Symbol(symbol),
                    None => TokenKind::Error(LexErrorKind::InvalidCharacter),
                }
            }
        };

        let lexeme: String = self.input[start..self.position].iter().collect();
        if kind != TokenKind::Comment {
            self.after_operand = kind.ends_operand();
        }

        Token::new(kind, lexeme, location)
    }

    fn starts_signed_literal(&self) -> bool {
        !self.after_operand && self.peek_ahead(1).is_some_and(|c| c.is_ascii_digit())
    }

    /// Digits with at most one `.`, optionally preceded by a sign
    fn number_literal(&mut self) -> TokenKind {
        let mut text = String::new();
        if let Some(sign @ ('+' | '-')) = self.peek() {
            text.push(sign);
            self.advance();
        }

        let mut seen_dot = false;
        while let Some(ch) = self.peek() {
            if ch.is_ascii_digit() {
                text.push(ch);
            } else if ch == '.' && !seen_dot {
                seen_dot = true;
                text.push(ch);
            } else {
                break;
            }
            self.advance();
        }

        if text.ends_with('.') {
            return TokenKind::Error(LexErrorKind::MalformedNumber);
        }

        if self.peek().is_some_and(|c| c.is_alphabetic() || c == '_') {
            while self.peek().is_some_and(|c| c.is_alphanumeric() || c == '_') {
                self.advance();
            }
            return TokenKind::Error(LexErrorKind::InvalidIdentifier);
        }

        let parsed = if seen_dot {
            text.parse::<f64>().ok().map(TokenKind::FloatLiteral)
        } else {
            text.parse::<i64>().ok().map(TokenKind::IntLiteral)
        };
        parsed.unwrap_or(TokenKind::Error(LexErrorKind::MalformedNumber))
    }

    /// Parse identifier, reserved word or `and`/`or`
    fn identifier_or_keyword(&mut self) -> TokenKind {
        let mut ident = String::new();
        while let Some(ch) = self.peek() {
            if ch.is_alphanumeric() || ch == '_' {
                ident.push(ch);
                self.advance();
            } else {
                break;
            }
        }

        if let Some(keyword) = Keyword::lookup(&ident) {
            return TokenKind::Keyword(keyword);
        }

        match ident.to_ascii_lowercase().as_str() {
            "and" => TokenKind::LogicalOp(LogicalOp::And),
            "or" => TokenKind::LogicalOp(LogicalOp::Or),
            _ => TokenKind::Ident,
        }
    }

    /// `//` line comment, `/* */` block comment, or the division operator
    fn slash_or_comment(&mut self) -> TokenKind {
        self.advance(); // consume '/'

        match self.peek() {
            Some('/') => {
                while let Some(ch) = self.peek() {
                    if ch == '\n' {
                        break;
                    }
                    self.advance();
                }
                TokenKind::Comment
            }
            Some('*') => {
                self.advance();
                loop {
                    match self.peek() {
                        None => return TokenKind::Error(LexErrorKind::UnterminatedComment),
                        Some('*') if self.peek_ahead(1) == Some('/') => {
                            self.advance();
                            self.advance();
                            return TokenKind::Comment;
                        }
                        Some(_) => {
                            self.advance();
                        }
                    }
                }
            }
            _ => TokenKind::ArithOp(ArithOp::Slash),
        }
    }

    fn arithmetic_operator(&mut self, ch: char) -> TokenKind {
        self.advance();
        let op = match ch {
            '+' if self.peek() == Some('+') => {
                self.advance();
                ArithOp::PlusPlus
            }
            '-' if self.peek() == Some('-') => {
                self.advance();
                ArithOp::MinusMinus
            }
            '+' => ArithOp::Plus,
            '-' => ArithOp::Minus,
            '*' => ArithOp::Star,
            '%' => ArithOp::Percent,
            _ => ArithOp::Caret,
        };
        TokenKind::ArithOp(op)
    }

    fn relational_or_assignment(&mut self, ch: char) -> TokenKind {
        self.advance();
        if self.peek() == Some('=') {
            self.advance();
            return match ch {
                '<' => TokenKind::RelOp(RelOp::Le),
                '>' => TokenKind::RelOp(RelOp::Ge),
                '!' => TokenKind::RelOp(RelOp::NotEq),
                _ => TokenKind::Equality,
            };
        }
        match ch {
            '<' => TokenKind::RelOp(RelOp::Lt),
            '>' => TokenKind::RelOp(RelOp::Gt),
            '!' => TokenKind::Error(LexErrorKind::StrayBang),
            _ => TokenKind::Assign,
        }
    }

    fn skip_whitespace(&mut self) {
        while self.peek().is_some_and(char::is_whitespace) {
            self.advance();
        }
    }

    /// Peek at current character without consuming
    fn peek(&self) -> Option<char> {
        self.input.get(self.position).copied()
    }

    /// Peek ahead n characters
    fn peek_ahead(&self, n: usize) -> Option<char> {
        self.input.get(self.position + n).copied()
    }

    /// Advance to next character
    fn advance(&mut self) -> Option<char> {
        let ch = self.peek()?;
        self.position += 1;

        if ch == '\n' {
            self.line += 1;
            self.column = 1;
        } else {
            self.column += 1;
        }

        Some(ch)
    }

    fn current_location(&self) -> SourceLocation {
        SourceLocation::new(self.line, self.column)
    }
}

/// Yields every token up to and including the end-of-input token.
impl Iterator for Lexer {
    type Item = Token;

    fn next(&mut self) -> Option<Token> {
        if self.finished {
            return None;
        }
        let token = self.next_token();
        if token.kind == TokenKind::Eof {
            self.finished = true;
        }
        Some(token)
    }
}
