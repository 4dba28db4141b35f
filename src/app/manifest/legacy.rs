//! Reader for legacy harness spec files
//!
//! Legacy spec files declare one record per assignment:
//!
//! ```text
//! from options import *
//!
//! # comment
//! pl_test1 = { INPUT : 'pl_test1.i',
//!              EXODIFF : ['pl_test1_out.e'] }
//! ```
//!
//! Records may span several lines. Comments and import lines are ignored.
//! Only the `INPUT` and `EXODIFF` keys are understood.

use std::iter::Peekable;
use std::str::Chars;

use tracing::{debug, trace};

use crate::app::manifest::registry::TestManifest;
use crate::app::models::TestCase;
use crate::constants::legacy::{EXODIFF_KEY, INPUT_KEY};
use crate::errors::{ManifestError, ManifestResult};

/// Parse a legacy spec file into a validated manifest
pub fn parse_legacy_manifest(content: &str) -> ManifestResult<TestManifest> {
    TestManifest::new(parse_legacy_cases(content)?)
}

/// Parse a legacy spec file into records, in declaration order
///
/// Records are not checked for name uniqueness here; that happens when the
/// records are assembled into a [`TestManifest`].
pub fn parse_legacy_cases(content: &str) -> ManifestResult<Vec<TestCase>> {
    let mut cases = Vec::new();
    let mut statement = String::new();
    let mut statement_line = 0;
    let mut depth: i32 = 0;

    for (index, raw_line) in content.lines().enumerate() {
        let line_number = index + 1;
        let line = strip_comment(raw_line).trim();

        if statement.is_empty() {
            if line.is_empty() || is_import(line) {
                continue;
            }
            statement_line = line_number;
        }

        statement.push_str(line);
        statement.push('\n');
        depth += bracket_delta(line);

        if depth < 0 {
            return Err(ManifestError::Parse {
                line: line_number,
                reason: "unbalanced closing bracket".to_string(),
            });
        }

        if depth == 0 && !statement.trim().is_empty() {
            trace!("Parsing legacy record starting at line {}", statement_line);
            cases.push(parse_record(&statement, statement_line)?);
            statement.clear();
        }
    }

    if !statement.trim().is_empty() {
        return Err(ManifestError::Parse {
            line: statement_line,
            reason: "record is not closed before end of file".to_string(),
        });
    }

    debug!("Parsed {} legacy records", cases.len());
    Ok(cases)
}

fn is_import(line: &str) -> bool {
    line.starts_with("from ") || line.starts_with("import ")
}

/// Whether a name can stand on the left of a legacy record assignment
pub fn is_identifier(name: &str) -> bool {
    !name.is_empty()
        && !name.starts_with(|c: char| c.is_ascii_digit())
        && name.chars().all(|c| c.is_ascii_alphanumeric() || c == '_')
}

/// Quote a value as a legacy string literal, escaping as needed
pub fn quote_string(value: &str) -> String {
    let mut quoted = String::with_capacity(value.len() + 2);
    quoted.push('\'');
    for c in value.chars() {
        match c {
            '\\' => quoted.push_str("\\\\"),
            '\'' => quoted.push_str("\\'"),
            '\n' => quoted.push_str("\\n"),
            '\t' => quoted.push_str("\\t"),
            _ => quoted.push(c),
        }
    }
    quoted.push('\'');
    quoted
}

/// Tracks whether a scan position is inside a string literal
#[derive(Default)]
struct QuoteState {
    open: Option<char>,
    escaped: bool,
}

impl QuoteState {
    /// Feed one character; returns true if it is outside any string
    fn outside(&mut self, c: char) -> bool {
        match self.open {
            None => {
                if c == '\'' || c == '"' {
                    self.open = Some(c);
                    false
                } else {
                    true
                }
            }
            Some(open) => {
                if self.escaped {
                    self.escaped = false;
                } else if c == '\\' {
                    self.escaped = true;
                } else if c == open {
                    self.open = None;
                }
                false
            }
        }
    }
}

/// Drop a trailing `#` comment that is not inside a string literal
fn strip_comment(line: &str) -> &str {
    let mut state = QuoteState::default();
    for (offset, c) in line.char_indices() {
        if state.outside(c) && c == '#' {
            return &line[..offset];
        }
    }
    line
}

/// Net change in bracket nesting over a line, ignoring string contents
fn bracket_delta(line: &str) -> i32 {
    let mut state = QuoteState::default();
    let mut delta = 0;
    for c in line.chars() {
        if state.outside(c) {
            match c {
                '{' | '[' => delta += 1,
                '}' | ']' => delta -= 1,
                _ => {}
            }
        }
    }
    delta
}

/// Character cursor over one record statement
struct RecordParser<'a> {
    chars: Peekable<Chars<'a>>,
    line: usize,
}

impl<'a> RecordParser<'a> {
    fn new(text: &'a str, line: usize) -> Self {
        Self {
            chars: text.chars().peekable(),
            line,
        }
    }

    fn error(&self, reason: impl Into<String>) -> ManifestError {
        ManifestError::Parse {
            line: self.line,
            reason: reason.into(),
        }
    }

    fn skip_whitespace(&mut self) {
        while let Some(c) = self.chars.peek() {
            if !c.is_whitespace() {
                break;
            }
            if *c == '\n' {
                self.line += 1;
            }
            self.chars.next();
        }
    }

    fn peek(&mut self) -> Option<char> {
        self.skip_whitespace();
        self.chars.peek().copied()
    }

    fn expect(&mut self, expected: char) -> ManifestResult<()> {
        match self.peek() {
            Some(c) if c == expected => {
                self.chars.next();
                Ok(())
            }
            Some(c) => Err(self.error(format!("expected '{}', found '{}'", expected, c))),
            None => Err(self.error(format!("expected '{}', found end of record", expected))),
        }
    }

    fn identifier(&mut self) -> ManifestResult<String> {
        self.skip_whitespace();
        let mut ident = String::new();
        while let Some(&c) = self.chars.peek() {
            if c.is_ascii_alphanumeric() || c == '_' {
                ident.push(c);
                self.chars.next();
            } else {
                break;
            }
        }

        if !is_identifier(&ident) {
            return Err(self.error("expected an identifier"));
        }
        Ok(ident)
    }

    fn string(&mut self) -> ManifestResult<String> {
        let quote = match self.peek() {
            Some(c @ ('\'' | '"')) => c,
            _ => return Err(self.error("expected a quoted string")),
        };
        self.chars.next();

        let mut value = String::new();
        loop {
            match self.chars.next() {
                Some(c) if c == quote => return Ok(value),
                Some('\\') => match self.chars.next() {
                    Some('n') => value.push('\n'),
                    Some('t') => value.push('\t'),
                    Some('\n') | None => return Err(self.error("unterminated string")),
                    Some(c) => value.push(c),
                },
                Some('\n') | None => return Err(self.error("unterminated string")),
                Some(c) => value.push(c),
            }
        }
    }

    fn string_list(&mut self) -> ManifestResult<Vec<String>> {
        self.expect('[')?;
        let mut items = Vec::new();
        loop {
            if self.peek() == Some(']') {
                self.chars.next();
                return Ok(items);
            }
            items.push(self.string()?);
            match self.peek() {
                Some(',') => {
                    self.chars.next();
                }
                Some(']') => {}
                _ => return Err(self.error("expected ',' or ']' in list")),
            }
        }
    }

    fn finish(&mut self) -> ManifestResult<()> {
        match self.peek() {
            None => Ok(()),
            Some(c) => Err(self.error(format!("unexpected '{}' after record", c))),
        }
    }
}

fn parse_record(statement: &str, line: usize) -> ManifestResult<TestCase> {
    let mut parser = RecordParser::new(statement, line);

    let name = parser.identifier()?;
    parser.expect('=')?;
    parser.expect('{')?;

    let mut input: Option<String> = None;
    let mut exodiff: Option<Vec<String>> = None;

    loop {
        if parser.peek() == Some('}') {
            parser.chars.next();
            break;
        }

        let key = parser.identifier()?;
        parser.expect(':')?;
        match key.as_str() {
            INPUT_KEY if input.is_none() => input = Some(parser.string()?),
            EXODIFF_KEY if exodiff.is_none() => exodiff = Some(parser.string_list()?),
            INPUT_KEY | EXODIFF_KEY => {
                return Err(parser.error(format!("key {} repeated in '{}'", key, name)))
            }
            other => return Err(parser.error(format!("unknown key {} in '{}'", other, name))),
        }

        match parser.peek() {
            Some(',') => {
                parser.chars.next();
            }
            Some('}') => {}
            _ => return Err(parser.error("expected ',' or '}' after value")),
        }
    }
    parser.finish()?;

    let input = input.ok_or_else(|| ManifestError::malformed(&name, "missing INPUT"))?;
    let case = TestCase::new(name, input, exodiff.unwrap_or_default());
    case.validate()?;
    Ok(case)
}
