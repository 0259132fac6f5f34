//! Minimal Go tokenizer.
//!
//! Produces just enough structure to find top-level declarations: brackets,
//! commas, `=`, literals, identifiers and semicolons (explicit or inserted at
//! line ends following Go's automatic semicolon rule). Comments and whitespace
//! are skipped; every token keeps its byte span so rewrites stay lossless.

use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenKind {
    Ident,
    Number,
    String,
    RawString,
    Char,
    Operator,
    LParen,
    RParen,
    LBrace,
    RBrace,
    LBracket,
    RBracket,
    Comma,
    Assign,
    Semicolon,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Token {
    pub kind: TokenKind,
    pub start: usize,
    pub end: usize,
}

impl Token {
    pub fn text<'a>(&self, src: &'a str) -> &'a str {
        &src[self.start..self.end]
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScanError {
    pub offset: usize,
    pub message: String,
}

impl fmt::Display for ScanError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} at byte {}", self.message, self.offset)
    }
}

const KEYWORDS: &[&str] = &[
    "break",
    "case",
    "chan",
    "const",
    "continue",
    "default",
    "defer",
    "else",
    "fallthrough",
    "for",
    "func",
    "go",
    "goto",
    "if",
    "import",
    "interface",
    "map",
    "package",
    "range",
    "return",
    "select",
    "struct",
    "switch",
    "type",
    "var",
];

const THREE_CHAR_OPS: &[&str] = &["<<=", ">>=", "&^=", "..."];

const TWO_CHAR_OPS: &[&str] = &[
    "==", "!=", "<=", ">=", ":=", "++", "--", "&&", "||", "<-", "<<", ">>", "+=", "-=", "*=",
    "/=", "%=", "&=", "|=", "^=", "&^",
];

pub fn tokenize(src: &str) -> Result<Vec<Token>, ScanError> {
    let mut scanner = Scanner {
        src,
        pos: 0,
        tokens: Vec::new(),
        semicolon_pending: false,
    };
    scanner.run()?;
    Ok(scanner.tokens)
}

struct Scanner<'a> {
    src: &'a str,
    pos: usize,
    tokens: Vec<Token>,
    /// The last token allows a semicolon to be inserted at the next line end.
    semicolon_pending: bool,
}

impl<'a> Scanner<'a> {
    fn peek(&self) -> Option<char> {
        self.src[self.pos..].chars().next()
    }

    fn peek_at(&self, offset: usize) -> Option<char> {
        self.src.get(self.pos + offset..)?.chars().next()
    }

    fn error(&self, offset: usize, message: &str) -> ScanError {
        ScanError {
            offset,
            message: message.to_string(),
        }
    }

    fn run(&mut self) -> Result<(), ScanError> {
        while let Some(c) = self.peek() {
            match c {
                '\n' => {
                    self.line_end(self.pos);
                    self.pos += 1;
                }
                c if c.is_whitespace() => self.pos += c.len_utf8(),
                '/' if self.peek_at(1) == Some('/') => self.line_comment(),
                '/' if self.peek_at(1) == Some('*') => self.block_comment()?,
                '"' => self.quoted('"', TokenKind::String)?,
                '\'' => self.quoted('\'', TokenKind::Char)?,
                '`' => self.raw_string()?,
                c if is_letter(c) => self.ident(),
                c if c.is_ascii_digit() => self.number(),
                '.' if self.peek_at(1).is_some_and(|d| d.is_ascii_digit()) => self.number(),
                c => self.punct(c),
            }
        }
        self.line_end(self.pos);
        Ok(())
    }

    fn push(&mut self, kind: TokenKind, start: usize, end: usize) {
        self.tokens.push(Token { kind, start, end });
        let text = &self.src[start..end];
        self.semicolon_pending = match kind {
            TokenKind::Ident => {
                !KEYWORDS.contains(&text)
                    || matches!(text, "break" | "continue" | "fallthrough" | "return")
            }
            TokenKind::Number
            | TokenKind::String
            | TokenKind::RawString
            | TokenKind::Char
            | TokenKind::RParen
            | TokenKind::RBracket
            | TokenKind::RBrace => true,
            TokenKind::Operator => matches!(text, "++" | "--"),
            _ => false,
        };
    }

    fn line_end(&mut self, offset: usize) {
        if self.semicolon_pending {
            self.tokens.push(Token {
                kind: TokenKind::Semicolon,
                start: offset,
                end: offset,
            });
            self.semicolon_pending = false;
        }
    }

    fn line_comment(&mut self) {
        // The newline itself is left for `run`, which handles semicolon insertion.
        match self.src[self.pos..].find('\n') {
            Some(n) => self.pos += n,
            None => self.pos = self.src.len(),
        }
    }

    fn block_comment(&mut self) -> Result<(), ScanError> {
        let start = self.pos;
        let body_start = start + 2;
        let close = self.src[body_start..]
            .find("*/")
            .ok_or_else(|| self.error(start, "comment not terminated"))?;
        if self.src[body_start..body_start + close].contains('\n') {
            self.line_end(start);
        }
        self.pos = body_start + close + 2;
        Ok(())
    }

    fn quoted(&mut self, quote: char, kind: TokenKind) -> Result<(), ScanError> {
        let start = self.pos;
        let message = if kind == TokenKind::Char {
            "rune literal not terminated"
        } else {
            "string literal not terminated"
        };
        self.pos += 1;
        loop {
            let c = self.peek().ok_or_else(|| self.error(start, message))?;
            match c {
                '\n' => return Err(self.error(start, message)),
                '\\' => {
                    self.pos += 1;
                    let escaped = self.peek().ok_or_else(|| self.error(start, message))?;
                    self.pos += escaped.len_utf8();
                }
                c if c == quote => {
                    self.pos += 1;
                    break;
                }
                c => self.pos += c.len_utf8(),
            }
        }
        self.push(kind, start, self.pos);
        Ok(())
    }

    fn raw_string(&mut self) -> Result<(), ScanError> {
        let start = self.pos;
        let close = self.src[start + 1..]
            .find('`')
            .ok_or_else(|| self.error(start, "raw string literal not terminated"))?;
        self.pos = start + 1 + close + 1;
        self.push(TokenKind::RawString, start, self.pos);
        Ok(())
    }

    fn ident(&mut self) {
        let start = self.pos;
        while let Some(c) = self.peek() {
            if is_letter(c) || c.is_numeric() {
                self.pos += c.len_utf8();
            } else {
                break;
            }
        }
        self.push(TokenKind::Ident, start, self.pos);
    }

    fn number(&mut self) {
        let start = self.pos;
        let hex = self.src[start..].starts_with("0x") || self.src[start..].starts_with("0X");
        let mut prev = '\0';
        while let Some(c) = self.peek() {
            let exponent_sign = matches!(c, '+' | '-')
                && if hex {
                    matches!(prev, 'p' | 'P')
                } else {
                    matches!(prev, 'e' | 'E' | 'p' | 'P')
                };
            if c.is_ascii_alphanumeric() || c == '_' || c == '.' || exponent_sign {
                self.pos += 1;
                prev = c;
            } else {
                break;
            }
        }
        self.push(TokenKind::Number, start, self.pos);
    }

    fn punct(&mut self, c: char) {
        let start = self.pos;
        let rest = &self.src[start..];
        if let Some(op) = THREE_CHAR_OPS.iter().find(|op| rest.starts_with(**op)) {
            self.pos += op.len();
            self.push(TokenKind::Operator, start, self.pos);
            return;
        }
        if let Some(op) = TWO_CHAR_OPS.iter().find(|op| rest.starts_with(**op)) {
            self.pos += op.len();
            self.push(TokenKind::Operator, start, self.pos);
            return;
        }

        let kind = match c {
            '(' => TokenKind::LParen,
            ')' => TokenKind::RParen,
            '{' => TokenKind::LBrace,
            '}' => TokenKind::RBrace,
            '[' => TokenKind::LBracket,
            ']' => TokenKind::RBracket,
            ',' => TokenKind::Comma,
            ';' => TokenKind::Semicolon,
            '=' => TokenKind::Assign,
            _ => TokenKind::Operator,
        };
        self.pos += c.len_utf8();
        self.push(kind, start, self.pos);
    }
}

fn is_letter(c: char) -> bool {
    c == '_' || c.is_alphabetic()
}
