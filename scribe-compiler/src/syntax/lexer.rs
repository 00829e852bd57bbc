//! Tokenizer for C# source text.
//!
//! Produces just enough structure for the declaration parser: identifiers,
//! reserved keywords, literals and punctuation. Trivia (whitespace, comments
//! and preprocessor lines) is dropped.

use cscribe_core::is_keyword;

use super::text::SourceText;
use crate::diagnostic::{Diagnostic, codes};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenKind {
    Identifier,
    Keyword,
    Number,
    String,
    /// String with `{...}` holes; its text keeps the holes.
    InterpolatedString,
    Char,
    Punct,
    Eof,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Span {
    pub start: usize,
    pub end: usize,
}

impl Span {
    pub fn len(&self) -> usize {
        self.end - self.start
    }

    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub kind: TokenKind,
    /// Identifier names are stored without a verbatim `@` prefix.
    pub text: String,
    pub span: Span,
}

impl Token {
    pub fn is_punct(&self, p: &str) -> bool {
        self.kind == TokenKind::Punct && self.text == p
    }

    pub fn is_keyword(&self, k: &str) -> bool {
        self.kind == TokenKind::Keyword && self.text == k
    }

    /// Identifier with the given text, including contextual keywords.
    pub fn is_word(&self, w: &str) -> bool {
        self.kind == TokenKind::Identifier && self.text == w
    }
}

const TWO_CHAR_PUNCT: &[&str] = &["=>", "::"];
const PUNCT: &str = "{}()[];,.:=<>?!+-*/%&|^~";

pub fn tokenize(source: &SourceText) -> (Vec<Token>, Vec<Diagnostic>) {
    let mut lexer = Lexer {
        source,
        src: source.as_str(),
        pos: 0,
        at_line_start: true,
        tokens: Vec::new(),
        diagnostics: Vec::new(),
    };
    lexer.run();
    (lexer.tokens, lexer.diagnostics)
}

struct Lexer<'a> {
    source: &'a SourceText,
    src: &'a str,
    pos: usize,
    at_line_start: bool,
    tokens: Vec<Token>,
    diagnostics: Vec<Diagnostic>,
}

impl Lexer<'_> {
    fn run(&mut self) {
        while let Some(c) = self.peek() {
            let start = self.pos;

            if c == '\n' {
                self.bump();
                self.at_line_start = true;
                continue;
            }
            if c.is_whitespace() {
                self.bump();
                continue;
            }
            if c == '#' && self.at_line_start {
                self.skip_line();
                continue;
            }
            self.at_line_start = false;

            if self.rest().starts_with("//") {
                self.skip_line();
            } else if self.rest().starts_with("/*") {
                self.block_comment(start);
            } else if self.rest().starts_with("\"\"\"") {
                self.raw_string(start, 0);
            } else if c == '"' {
                self.bump();
                self.regular_string(start, false);
            } else if c == '@' {
                self.at_prefixed(start);
            } else if c == '$' {
                self.dollar_prefixed(start);
            } else if c == '\'' {
                self.char_literal(start);
            } else if c.is_ascii_digit() || (c == '.' && self.peek_at(1).is_some_and(|n| n.is_ascii_digit())) {
                self.number(start);
            } else if c.is_alphabetic() || c == '_' {
                self.identifier(start, start);
            } else if let Some(p) = TWO_CHAR_PUNCT.iter().find(|p| self.rest().starts_with(*p)) {
                self.pos += p.len();
                self.push(TokenKind::Punct, p.to_string(), start);
            } else if PUNCT.contains(c) {
                self.bump();
                self.push(TokenKind::Punct, c.to_string(), start);
            } else {
                self.bump();
                self.error(
                    codes::UNEXPECTED_CHARACTER,
                    format!("Unexpected character '{c}'"),
                    start,
                );
            }
        }
        self.tokens.push(Token {
            kind: TokenKind::Eof,
            text: String::new(),
            span: Span {
                start: self.src.len(),
                end: self.src.len(),
            },
        });
    }

    fn rest(&self) -> &str {
        &self.src[self.pos..]
    }

    fn peek(&self) -> Option<char> {
        self.rest().chars().next()
    }

    fn peek_at(&self, n: usize) -> Option<char> {
        self.rest().chars().nth(n)
    }

    fn bump(&mut self) -> Option<char> {
        let c = self.peek()?;
        self.pos += c.len_utf8();
        Some(c)
    }

    fn push(&mut self, kind: TokenKind, text: String, start: usize) {
        self.tokens.push(Token {
            kind,
            text,
            span: Span {
                start,
                end: self.pos,
            },
        });
    }

    fn error(&mut self, id: &'static str, message: impl Into<String>, start: usize) {
        let location = self.source.location(start, self.pos.saturating_sub(start));
        self.diagnostics
            .push(Diagnostic::error(id, message).at(location));
    }

    fn skip_line(&mut self) {
        while let Some(c) = self.peek() {
            if c == '\n' {
                break;
            }
            self.bump();
        }
    }

    fn block_comment(&mut self, start: usize) {
        self.pos += 2;
        match self.rest().find("*/") {
            Some(end) => self.pos += end + 2,
            None => {
                self.pos = self.src.len();
                self.error(
                    codes::END_OF_FILE_IN_COMMENT,
                    "End-of-file found, '*/' expected",
                    start,
                );
            }
        }
    }

    fn identifier(&mut self, start: usize, name_start: usize) {
        while self
            .peek()
            .is_some_and(|c| c.is_alphanumeric() || c == '_')
        {
            self.bump();
        }
        let text = self.src[name_start..self.pos].to_string();
        let kind = if start == name_start && is_keyword(&text) {
            TokenKind::Keyword
        } else {
            TokenKind::Identifier
        };
        self.push(kind, text, start);
    }

    fn number(&mut self, start: usize) {
        while let Some(c) = self.peek() {
            let fraction = c == '.' && self.peek_at(1).is_some_and(|n| n.is_ascii_digit());
            if c.is_alphanumeric() || c == '_' || fraction {
                self.bump();
            } else {
                break;
            }
        }
        let text = self.src[start..self.pos].to_string();
        self.push(TokenKind::Number, text, start);
    }

    /// `@identifier`, `@"verbatim"` or `@$"interpolated verbatim"`.
    fn at_prefixed(&mut self, start: usize) {
        self.bump();
        match self.peek() {
            Some('"') => {
                self.bump();
                self.verbatim_string(start, false);
            }
            Some('$') if self.peek_at(1) == Some('"') => {
                self.pos += 2;
                self.verbatim_string(start, true);
            }
            Some(c) if c.is_alphabetic() || c == '_' => self.identifier(start, self.pos),
            _ => self.error(codes::UNEXPECTED_CHARACTER, "Unexpected character '@'", start),
        }
    }

    /// `$"..."`, `$@"..."` or `$"""..."""` (any number of `$`).
    fn dollar_prefixed(&mut self, start: usize) {
        let dollars = self.rest().chars().take_while(|&c| c == '$').count();
        self.pos += dollars;
        if self.rest().starts_with("\"\"\"") {
            self.raw_string(start, dollars);
        } else if self.rest().starts_with("@\"") {
            self.pos += 2;
            self.verbatim_string(start, true);
        } else if self.rest().starts_with('"') {
            self.bump();
            self.regular_string(start, true);
        } else {
            self.error(codes::UNEXPECTED_CHARACTER, "Unexpected character '$'", start);
        }
    }

    fn string_kind(interpolated: bool) -> TokenKind {
        if interpolated {
            TokenKind::InterpolatedString
        } else {
            TokenKind::String
        }
    }

    /// Body of a `"..."` literal; the opening quote is already consumed.
    fn regular_string(&mut self, start: usize, interpolated: bool) {
        let mut holes = 0usize;
        loop {
            match self.peek() {
                None | Some('\n') => {
                    self.error(codes::NEWLINE_IN_CONSTANT, "Newline in constant", start);
                    break;
                }
                Some('\\') => {
                    self.bump();
                    if self.peek().is_some_and(|c| c != '\n') {
                        self.bump();
                    }
                }
                Some('"') if holes > 0 => {
                    self.bump();
                    self.skip_nested_string();
                }
                Some('"') => {
                    self.bump();
                    break;
                }
                Some('{') if interpolated => {
                    self.bump();
                    if holes == 0 && self.peek() == Some('{') {
                        self.bump();
                    } else {
                        holes += 1;
                    }
                }
                Some('}') if interpolated && holes > 0 => {
                    self.bump();
                    holes -= 1;
                }
                Some(_) => {
                    self.bump();
                }
            }
        }
        let text = self.src[start..self.pos].to_string();
        self.push(Self::string_kind(interpolated), text, start);
    }

    /// A plain string literal inside an interpolation hole.
    fn skip_nested_string(&mut self) {
        while let Some(c) = self.peek() {
            match c {
                '\n' => return,
                '\\' => {
                    self.bump();
                    self.bump();
                }
                '"' => {
                    self.bump();
                    return;
                }
                _ => {
                    self.bump();
                }
            }
        }
    }

    /// Body of a `@"..."` literal; the prefix and opening quote are consumed.
    fn verbatim_string(&mut self, start: usize, interpolated: bool) {
        loop {
            match self.peek() {
                None => {
                    self.error(codes::UNTERMINATED_STRING, "Unterminated string literal", start);
                    break;
                }
                Some('"') if self.peek_at(1) == Some('"') => self.pos += 2,
                Some('"') => {
                    self.bump();
                    break;
                }
                Some(_) => {
                    self.bump();
                }
            }
        }
        let text = self.src[start..self.pos].to_string();
        self.push(Self::string_kind(interpolated), text, start);
    }

    /// `"""..."""` with at least three quotes; closed by the same count.
    fn raw_string(&mut self, start: usize, dollars: usize) {
        let quotes = self.rest().chars().take_while(|&c| c == '"').count();
        self.pos += quotes;
        let delimiter = "\"".repeat(quotes);
        match self.rest().find(&delimiter) {
            Some(end) => self.pos += end + quotes,
            None => {
                self.pos = self.src.len();
                self.error(codes::UNTERMINATED_STRING, "Unterminated raw string literal", start);
            }
        }
        let text = self.src[start..self.pos].to_string();
        self.push(Self::string_kind(dollars > 0), text, start);
    }

    fn char_literal(&mut self, start: usize) {
        self.bump();
        match self.peek() {
            Some('\\') => {
                self.bump();
                self.bump();
            }
            Some('\n') | None => {}
            Some(_) => {
                self.bump();
            }
        }
        if self.peek() == Some('\'') {
            self.bump();
        } else {
            while let Some(c) = self.peek() {
                if c == '\n' {
                    break;
                }
                self.bump();
                if c == '\'' {
                    self.error(
                        codes::TOO_MANY_CHARACTERS,
                        "Too many characters in character literal",
                        start,
                    );
                    let text = self.src[start..self.pos].to_string();
                    self.push(TokenKind::Char, text, start);
                    return;
                }
            }
            self.error(codes::NEWLINE_IN_CONSTANT, "Newline in constant", start);
        }
        let text = self.src[start..self.pos].to_string();
        self.push(TokenKind::Char, text, start);
    }
}
