//! Go source files as compilation units.
//!
//! Only top-level `var` and `const` declarations are exposed. Rendering
//! splices new literals into the original text, so comments and layout are
//! kept byte for byte.

use std::fmt::Write as _;
use std::fs;
use std::ops::Range;
use std::path::{Path, PathBuf};

use crate::error::{BumpError, Result};
use crate::source::scanner::{self, Token, TokenKind};
use crate::source::{CompilationUnit, Declaration, Initializer, Location};

/// A parsed Go source file
#[derive(Debug, Clone)]
pub struct GoFile {
    path: PathBuf,
    source: String,
    specs: Vec<ValueSpec>,
}

/// One `names [type] [= values]` line of a declaration
#[derive(Debug, Clone)]
struct ValueSpec {
    declarations: Vec<GoDeclaration>,
    has_values: bool,
    /// Where ` = ...` goes when the spec has no values yet.
    insert_at: usize,
}

#[derive(Debug, Clone)]
pub struct GoDeclaration {
    name: String,
    location: Location,
    init: GoInitializer,
    assigned: Option<String>,
}

#[derive(Debug, Clone)]
enum GoInitializer {
    Absent,
    Expression {
        span: Range<usize>,
        location: Location,
        literal: Option<GoLiteral>,
    },
}

#[derive(Debug, Clone)]
struct GoLiteral {
    raw: String,
    value: Option<String>,
}

impl GoFile {
    /// Parse Go source text. `path` is used for error positions and writing back.
    pub fn parse(path: impl Into<PathBuf>, source: impl Into<String>) -> Result<Self> {
        let path = path.into();
        let source = source.into();
        let lines = LineIndex::new(&source);
        let file = path.display().to_string();

        let tokens = scanner::tokenize(&source)
            .map_err(|e| BumpError::source(e.message).at(lines.location(&file, e.offset)))?;

        let specs = DeclParser {
            src: &source,
            tokens: &tokens,
            pos: 0,
            lines: &lines,
            file: &file,
        }
        .parse_file()?;

        Ok(GoFile {
            path,
            source,
            specs,
        })
    }

    /// Read and parse a Go file from disk
    pub fn read(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let source = fs::read_to_string(path).map_err(|e| {
            BumpError::source(format!("cannot read {}: {}", path.display(), e))
        })?;
        Self::parse(path, source)
    }

    /// The original, unmodified text
    pub fn source(&self) -> &str {
        &self.source
    }

    /// Names of all top-level declarations, in source order
    pub fn names(&self) -> Vec<&str> {
        self.specs
            .iter()
            .flat_map(|s| s.declarations.iter())
            .map(|d| d.name.as_str())
            .collect()
    }
}

impl CompilationUnit for GoFile {
    fn path(&self) -> &Path {
        &self.path
    }

    fn declarations_mut(&mut self) -> Vec<&mut dyn Declaration> {
        self.specs
            .iter_mut()
            .flat_map(|s| s.declarations.iter_mut())
            .map(|d| d as &mut dyn Declaration)
            .collect()
    }

    fn render(&self) -> String {
        let mut edits: Vec<(Range<usize>, String)> = Vec::new();

        for spec in &self.specs {
            if spec.has_values {
                for decl in &spec.declarations {
                    if let (Some(value), GoInitializer::Expression { span, .. }) =
                        (&decl.assigned, &decl.init)
                    {
                        edits.push((span.clone(), quote(value)));
                    }
                }
            } else if spec.declarations.iter().any(|d| d.assigned.is_some()) {
                // Go needs a value for every name once one is given.
                let values: Vec<String> = spec
                    .declarations
                    .iter()
                    .map(|d| d.assigned.as_deref().map(quote).unwrap_or_else(|| quote("")))
                    .collect();
                edits.push((
                    spec.insert_at..spec.insert_at,
                    format!(" = {}", values.join(", ")),
                ));
            }
        }

        edits.sort_by_key(|(span, _)| span.start);

        let mut out = String::with_capacity(self.source.len() + 16);
        let mut cursor = 0;
        for (span, text) in edits {
            if span.start < cursor {
                continue;
            }
            out.push_str(&self.source[cursor..span.start]);
            out.push_str(&text);
            cursor = span.end;
        }
        out.push_str(&self.source[cursor..]);
        out
    }
}

impl Declaration for GoDeclaration {
    fn name(&self) -> &str {
        &self.name
    }

    fn location(&self) -> &Location {
        &self.location
    }

    fn initializer(&self) -> Initializer<'_> {
        match &self.init {
            GoInitializer::Absent => Initializer::Absent,
            GoInitializer::Expression {
                location,
                literal: Some(literal),
                ..
            } => Initializer::StringLiteral {
                raw: &literal.raw,
                value: literal.value.clone(),
                location,
            },
            GoInitializer::Expression { location, .. } => Initializer::Other { location },
        }
    }

    fn assign(&mut self, value: &str) {
        self.assigned = Some(value.to_string());
    }
}

struct DeclParser<'a> {
    src: &'a str,
    tokens: &'a [Token],
    pos: usize,
    lines: &'a LineIndex,
    file: &'a str,
}

impl<'a> DeclParser<'a> {
    fn error_at(&self, offset: usize, msg: &str) -> BumpError {
        BumpError::source(msg).at(self.lines.location(self.file, offset))
    }

    fn kind_at(&self, pos: usize) -> Option<TokenKind> {
        self.tokens.get(pos).map(|t| t.kind)
    }

    fn parse_file(mut self) -> Result<Vec<ValueSpec>> {
        let mut specs = Vec::new();
        let mut depth = 0usize;

        while let Some(token) = self.tokens.get(self.pos).copied() {
            match token.kind {
                TokenKind::LParen | TokenKind::LBrace | TokenKind::LBracket => depth += 1,
                TokenKind::RParen | TokenKind::RBrace | TokenKind::RBracket => {
                    depth = depth
                        .checked_sub(1)
                        .ok_or_else(|| self.error_at(token.start, "unbalanced closing bracket"))?;
                }
                TokenKind::Ident if depth == 0 && matches!(token.text(self.src), "var" | "const") => {
                    self.pos += 1;
                    self.parse_decl(&mut specs)?;
                    continue;
                }
                _ => {}
            }
            self.pos += 1;
        }

        Ok(specs)
    }

    fn parse_decl(&mut self, specs: &mut Vec<ValueSpec>) -> Result<()> {
        if self.kind_at(self.pos) != Some(TokenKind::LParen) {
            specs.push(self.parse_spec(false)?);
            return Ok(());
        }

        let open = self.tokens[self.pos].start;
        self.pos += 1;
        loop {
            match self.kind_at(self.pos) {
                None => return Err(self.error_at(open, "declaration group not closed")),
                Some(TokenKind::RParen) => {
                    self.pos += 1;
                    return Ok(());
                }
                Some(TokenKind::Semicolon) => self.pos += 1,
                Some(_) => specs.push(self.parse_spec(true)?),
            }
        }
    }

    /// Parse one spec, leaving `pos` on its terminator.
    fn parse_spec(&mut self, grouped: bool) -> Result<ValueSpec> {
        let start = self.pos;
        let mut depth = 0usize;
        let mut end = start;
        while let Some(token) = self.tokens.get(end) {
            match token.kind {
                TokenKind::Semicolon if depth == 0 => break,
                TokenKind::RParen | TokenKind::RBrace | TokenKind::RBracket if depth == 0 => {
                    if grouped && token.kind == TokenKind::RParen {
                        break;
                    }
                    return Err(self.error_at(token.start, "unexpected closing bracket"));
                }
                TokenKind::LParen | TokenKind::LBrace | TokenKind::LBracket => depth += 1,
                TokenKind::RParen | TokenKind::RBrace | TokenKind::RBracket => depth -= 1,
                _ => {}
            }
            end += 1;
        }
        self.pos = end;

        let spec = &self.tokens[start..end];
        self.build_spec(spec)
    }

    fn build_spec(&self, spec: &[Token]) -> Result<ValueSpec> {
        let mut names: Vec<Token> = Vec::new();
        let mut i = 0;
        loop {
            match spec.get(i) {
                Some(t) if t.kind == TokenKind::Ident => names.push(*t),
                Some(t) => return Err(self.error_at(t.start, "expected identifier")),
                None => {
                    let offset = spec.last().map_or(self.src.len(), |t| t.end);
                    return Err(self.error_at(offset, "expected identifier"));
                }
            }
            i += 1;
            if spec.get(i).map(|t| t.kind) == Some(TokenKind::Comma) {
                i += 1;
            } else {
                break;
            }
        }

        let rest = &spec[i..];
        let assign = find_at_depth_zero(rest, TokenKind::Assign);
        let head = &rest[..assign.unwrap_or(rest.len())];
        let head_end = head.last().or(names.last()).map_or(0, |t| t.end);

        let values: Vec<&[Token]> = match assign {
            Some(idx) => {
                let exprs = split_at_depth_zero(&rest[idx + 1..]);
                if let Some(empty) = exprs.iter().position(|e| e.is_empty()) {
                    let offset = exprs[..empty]
                        .iter()
                        .rev()
                        .find_map(|e| e.last())
                        .map_or(rest[idx].end, |t| t.end);
                    return Err(self.error_at(offset, "missing expression"));
                }
                exprs
            }
            None => Vec::new(),
        };

        let declarations = names
            .iter()
            .enumerate()
            .map(|(n, name)| {
                let init = if values.is_empty() {
                    GoInitializer::Absent
                } else if values.len() == names.len() {
                    self.expression(values[n])
                } else {
                    // `a, b = f()`: no name owns a value of its own.
                    let first = values[0][0];
                    let last = values[values.len() - 1];
                    GoInitializer::Expression {
                        span: first.start..last[last.len() - 1].end,
                        location: self.lines.location(self.file, first.start),
                        literal: None,
                    }
                };
                GoDeclaration {
                    name: name.text(self.src).to_string(),
                    location: self.lines.location(self.file, name.start),
                    init,
                    assigned: None,
                }
            })
            .collect();

        Ok(ValueSpec {
            declarations,
            has_values: !values.is_empty(),
            insert_at: head_end,
        })
    }

    fn expression(&self, tokens: &[Token]) -> GoInitializer {
        let first = tokens[0];
        let last = tokens[tokens.len() - 1];
        let literal = match tokens {
            [only] if matches!(only.kind, TokenKind::String | TokenKind::RawString) => {
                let raw = only.text(self.src);
                Some(GoLiteral {
                    raw: raw.to_string(),
                    value: unquote(raw),
                })
            }
            _ => None,
        };
        GoInitializer::Expression {
            span: first.start..last.end,
            location: self.lines.location(self.file, first.start),
            literal,
        }
    }
}

fn find_at_depth_zero(tokens: &[Token], kind: TokenKind) -> Option<usize> {
    let mut depth = 0usize;
    for (i, token) in tokens.iter().enumerate() {
        match token.kind {
            TokenKind::LParen | TokenKind::LBrace | TokenKind::LBracket => depth += 1,
            TokenKind::RParen | TokenKind::RBrace | TokenKind::RBracket => {
                depth = depth.saturating_sub(1)
            }
            k if k == kind && depth == 0 => return Some(i),
            _ => {}
        }
    }
    None
}

fn split_at_depth_zero(tokens: &[Token]) -> Vec<&[Token]> {
    let mut parts = Vec::new();
    let mut depth = 0usize;
    let mut start = 0;
    for (i, token) in tokens.iter().enumerate() {
        match token.kind {
            TokenKind::LParen | TokenKind::LBrace | TokenKind::LBracket => depth += 1,
            TokenKind::RParen | TokenKind::RBrace | TokenKind::RBracket => {
                depth = depth.saturating_sub(1)
            }
            TokenKind::Comma if depth == 0 => {
                parts.push(&tokens[start..i]);
                start = i + 1;
            }
            _ => {}
        }
    }
    parts.push(&tokens[start..]);
    parts
}

/// Byte offset to line/column conversion
struct LineIndex {
    starts: Vec<usize>,
}

impl LineIndex {
    fn new(src: &str) -> Self {
        let starts = std::iter::once(0)
            .chain(src.match_indices('\n').map(|(i, _)| i + 1))
            .collect();
        LineIndex { starts }
    }

    fn location(&self, file: &str, offset: usize) -> Location {
        let line = self.starts.partition_point(|&s| s <= offset);
        let column = offset - self.starts[line - 1] + 1;
        Location::new(file, line, column)
    }
}

/// Decode a Go string literal (interpreted or raw).
///
/// Returns `None` for anything Go itself would refuse to unquote, and for
/// byte escapes that do not form valid UTF-8.
pub fn unquote(raw: &str) -> Option<String> {
    if raw.len() >= 2 && raw.starts_with('`') && raw.ends_with('`') {
        let body = &raw[1..raw.len() - 1];
        if body.contains('`') {
            return None;
        }
        return Some(body.replace('\r', ""));
    }

    if raw.len() < 2 || !raw.starts_with('"') || !raw.ends_with('"') {
        return None;
    }
    let body = &raw[1..raw.len() - 1];

    let mut bytes = Vec::with_capacity(body.len());
    let mut chars = body.chars();
    while let Some(c) = chars.next() {
        match c {
            '"' | '\n' => return None,
            '\\' => match chars.next()? {
                'a' => bytes.push(0x07),
                'b' => bytes.push(0x08),
                'f' => bytes.push(0x0c),
                'n' => bytes.push(b'\n'),
                'r' => bytes.push(b'\r'),
                't' => bytes.push(b'\t'),
                'v' => bytes.push(0x0b),
                '\\' => bytes.push(b'\\'),
                '"' => bytes.push(b'"'),
                'x' => bytes.push(u8::try_from(hex_digits(&mut chars, 2)?).ok()?),
                d @ '0'..='7' => {
                    let mut code = d.to_digit(8)?;
                    for _ in 0..2 {
                        code = code * 8 + chars.next()?.to_digit(8)?;
                    }
                    bytes.push(u8::try_from(code).ok()?);
                }
                'u' => push_char(&mut bytes, hex_digits(&mut chars, 4)?)?,
                'U' => push_char(&mut bytes, hex_digits(&mut chars, 8)?)?,
                _ => return None,
            },
            c => {
                let mut buf = [0u8; 4];
                bytes.extend_from_slice(c.encode_utf8(&mut buf).as_bytes());
            }
        }
    }

    String::from_utf8(bytes).ok()
}

fn hex_digits(chars: &mut std::str::Chars<'_>, count: usize) -> Option<u32> {
    let mut code = 0u32;
    for _ in 0..count {
        code = code * 16 + chars.next()?.to_digit(16)?;
    }
    Some(code)
}

fn push_char(bytes: &mut Vec<u8>, code: u32) -> Option<()> {
    let c = char::from_u32(code)?;
    let mut buf = [0u8; 4];
    bytes.extend_from_slice(c.encode_utf8(&mut buf).as_bytes());
    Some(())
}

/// Quote a value as a Go interpreted string literal
pub fn quote(value: &str) -> String {
    let mut out = String::with_capacity(value.len() + 2);
    out.push('"');
    for c in value.chars() {
        match c {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            c if c.is_control() => {
                let _ = write!(out, "\\u{:04x}", c as u32);
            }
            c => out.push(c),
        }
    }
    out.push('"');
    out
}
