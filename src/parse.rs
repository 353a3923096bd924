//! Route-expression parsing.
//!
//! Expressions are boolean combinations of matcher function calls:
//!
//! ```text
//! expr   := call ( "&&" call )*
//! call   := IDENT "(" STRING ( "," STRING )? ")"
//! STRING := double-quoted, backslash-escaped
//! ```
//!
//! `&&` is the only operator. Identifiers outside a call position, string
//! literals outside an argument position, numbers, nested calls and any
//! other token are rejected.

use crate::error::RouteError;
use crate::matcher::{self, MatchRef, Matcher};

/// Returns true when `expr` is a well-formed route expression.
pub fn is_valid(expr: &str) -> bool {
    parse(expr, &matcher::new_match(())).is_ok()
}

/// Parses a route expression into a top-level matcher whose leaves all
/// share `result`.
pub(crate) fn parse<P>(expr: &str, result: &MatchRef<P>) -> Result<Matcher<P>, RouteError> {
    Parser {
        tokens: tokenize(expr)?,
        pos: 0,
    }
    .parse(result)
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Token {
    Ident(String),
    Str(String),
    LParen,
    RParen,
    Comma,
    And,
}

fn describe(tok: &Token) -> String {
    match tok {
        Token::Ident(name) => format!("identifier '{}'", name),
        Token::Str(s) => format!("string literal \"{}\"", s),
        Token::LParen => "'('".to_owned(),
        Token::RParen => "')'".to_owned(),
        Token::Comma => "','".to_owned(),
        Token::And => "'&&'".to_owned(),
    }
}

fn unexpected(wanted: &str, got: Option<Token>) -> RouteError {
    match got {
        Some(tok) => RouteError::ExpressionSyntax(format!(
            "expected {}, got {}",
            wanted,
            describe(&tok)
        )),
        None => RouteError::ExpressionSyntax(format!("expected {}, got end of expression", wanted)),
    }
}

fn tokenize(input: &str) -> Result<Vec<Token>, RouteError> {
    let bytes = input.as_bytes();
    let mut tokens = Vec::new();
    let mut i = 0;
    while i < bytes.len() {
        match bytes[i] {
            b' ' | b'\t' | b'\r' | b'\n' => i += 1,
            b'(' => {
                tokens.push(Token::LParen);
                i += 1;
            }
            b')' => {
                tokens.push(Token::RParen);
                i += 1;
            }
            b',' => {
                tokens.push(Token::Comma);
                i += 1;
            }
            b'&' => {
                if bytes.get(i + 1) == Some(&b'&') {
                    tokens.push(Token::And);
                    i += 2;
                } else {
                    return Err(RouteError::ExpressionSyntax(
                        "unsupported operator: &".to_owned(),
                    ));
                }
            }
            b'"' => {
                let (s, next) = scan_string(input, i)?;
                tokens.push(Token::Str(s));
                i = next;
            }
            c if c.is_ascii_alphabetic() || c == b'_' => {
                let start = i;
                while i < bytes.len() && (bytes[i].is_ascii_alphanumeric() || bytes[i] == b'_') {
                    i += 1;
                }
                tokens.push(Token::Ident(input[start..i].to_owned()));
            }
            c => {
                return Err(RouteError::ExpressionSyntax(format!(
                    "unexpected character '{}'",
                    char::from(c)
                )));
            }
        }
    }
    Ok(tokens)
}

/// Scans the string literal opening at `start`. Recognized escapes are
/// `\"`, `\\`, `\n`, `\t` and `\r`; any other escape keeps its backslash,
/// so regex arguments survive either backslash style.
fn scan_string(input: &str, start: usize) -> Result<(String, usize), RouteError> {
    let mut out = String::new();
    let mut chars = input[start + 1..].char_indices();
    while let Some((off, c)) = chars.next() {
        match c {
            '"' => return Ok((out, start + 1 + off + 1)),
            '\\' => match chars.next() {
                Some((_, '"')) => out.push('"'),
                Some((_, '\\')) => out.push('\\'),
                Some((_, 'n')) => out.push('\n'),
                Some((_, 't')) => out.push('\t'),
                Some((_, 'r')) => out.push('\r'),
                Some((_, other)) => {
                    out.push('\\');
                    out.push(other);
                }
                None => break,
            },
            c => out.push(c),
        }
    }
    Err(RouteError::ExpressionSyntax(
        "unterminated string literal".to_owned(),
    ))
}

struct Parser {
    tokens: Vec<Token>,
    pos: usize,
}

impl Parser {
    fn parse<P>(mut self, result: &MatchRef<P>) -> Result<Matcher<P>, RouteError> {
        let mut m = self.call(result)?;
        while self.eat(&Token::And) {
            let rhs = self.call(result)?;
            m = Matcher::and(m, rhs)?;
        }
        if let Some(tok) = self.next() {
            return Err(unexpected("'&&'", Some(tok)));
        }
        Ok(m)
    }

    fn call<P>(&mut self, result: &MatchRef<P>) -> Result<Matcher<P>, RouteError> {
        let name = match self.next() {
            Some(Token::Ident(name)) => name,
            other => return Err(unexpected("a matcher function", other)),
        };
        if !self.eat(&Token::LParen) {
            return Err(RouteError::ExpressionSyntax(format!(
                "expected '(' after '{}'",
                name
            )));
        }
        let first = self.string_arg()?;
        let second = if self.eat(&Token::Comma) {
            Some(self.string_arg()?)
        } else {
            None
        };
        if !self.eat(&Token::RParen) {
            return Err(unexpected("')'", self.next()));
        }
        build_matcher(&name, &first, second.as_deref(), result)
    }

    fn string_arg(&mut self) -> Result<String, RouteError> {
        match self.next() {
            Some(Token::Str(s)) => Ok(s),
            other => Err(unexpected("a string literal", other)),
        }
    }

    fn next(&mut self) -> Option<Token> {
        let tok = self.tokens.get(self.pos).cloned();
        if tok.is_some() {
            self.pos += 1;
        }
        tok
    }

    fn eat(&mut self, tok: &Token) -> bool {
        if self.tokens.get(self.pos) == Some(tok) {
            self.pos += 1;
            true
        } else {
            false
        }
    }
}

fn build_matcher<P>(
    name: &str,
    first: &str,
    second: Option<&str>,
    result: &MatchRef<P>,
) -> Result<Matcher<P>, RouteError> {
    match (name, second) {
        ("Host", None) => matcher::host_trie(first, result.clone()),
        ("HostRegexp", None) => matcher::host_regexp(first, result.clone()),
        ("Method", None) => matcher::method_trie(first, result.clone()),
        ("MethodRegexp", None) => matcher::method_regexp(first, result.clone()),
        ("Path", None) => matcher::path_trie(first, result.clone()),
        ("PathRegexp", None) => matcher::path_regexp(first, result.clone()),
        ("Header", Some(value)) => matcher::header_trie(first, value, result.clone()),
        ("HeaderRegexp", Some(value)) => matcher::header_regexp(first, value, result.clone()),
        ("Host" | "HostRegexp" | "Method" | "MethodRegexp" | "Path" | "PathRegexp", Some(_)) => {
            Err(RouteError::ExpressionSyntax(format!(
                "{} expects a single argument",
                name
            )))
        }
        ("Header" | "HeaderRegexp", None) => Err(RouteError::ExpressionSyntax(format!(
            "{} expects a header name and a value",
            name
        ))),
        (other, _) => Err(RouteError::ExpressionSyntax(format!(
            "unsupported function: {}",
            other
        ))),
    }
}
