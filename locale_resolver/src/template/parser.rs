//! Recursive-descent parser for ICU MessageFormat templates.

use std::mem;

use thiserror::Error;

use super::ast::{Branch, Element, ParsedTemplate, PluralKind, Selector};

const PLURAL_CATEGORIES: [&str; 6] = ["zero", "one", "two", "few", "many", "other"];

/// Deepest nesting of branch and tag bodies the parser accepts.
pub const MAX_NESTING: usize = 64;

/// Syntax error with the character offset where it was detected.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{kind} at offset {offset}")]
pub struct ParseError {
    kind: ParseErrorKind,
    offset: usize,
}

impl ParseError {
    /// Creates an error of `kind` at character `offset`.
    #[must_use]
    pub const fn new(kind: ParseErrorKind, offset: usize) -> Self {
        Self { kind, offset }
    }

    /// What went wrong.
    #[must_use]
    pub const fn kind(&self) -> &ParseErrorKind {
        &self.kind
    }

    /// Character offset into the template text.
    #[must_use]
    pub const fn offset(&self) -> usize {
        self.offset
    }
}

/// Classification of a [`ParseError`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[non_exhaustive]
pub enum ParseErrorKind {
    /// A `}` with no matching `{`.
    #[error("unexpected '}}'")]
    UnmatchedCloseBrace,
    /// An argument was still open at the end of the text.
    #[error("unterminated argument")]
    UnterminatedArgument,
    /// `{}` or `{ , number}`.
    #[error("empty argument name")]
    EmptyArgumentName,
    /// `{name, }`.
    #[error("missing argument type")]
    MissingArgumentType,
    /// `{name, currency}`.
    #[error("unknown argument type '{0}'")]
    UnknownArgumentType(String),
    /// A specific character was required here.
    #[error("expected '{0}'")]
    Expected(char),
    /// `{n, number, }`.
    #[error("empty style")]
    EmptyStyle,
    /// `offset:` not followed by a number.
    #[error("invalid plural offset")]
    InvalidOffset,
    /// `=` not followed by a number, or an empty selector.
    #[error("invalid selector '{0}'")]
    InvalidSelector(String),
    /// A plural selector that is not a CLDR category.
    #[error("invalid plural selector '{0}'")]
    InvalidPluralSelector(String),
    /// The same selector appears twice in one argument.
    #[error("duplicate selector '{0}'")]
    DuplicateSelector(String),
    /// Plural and select arguments must provide `other`.
    #[error("missing 'other' clause")]
    MissingOtherClause,
    /// `</name>` with no open tag.
    #[error("unexpected closing tag")]
    UnexpectedClosingTag,
    /// `<name>` never closed.
    #[error("unclosed tag <{0}>")]
    UnclosedTag(String),
    /// `<a></b>`.
    #[error("closing tag </{found}> does not match <{expected}>")]
    MismatchedTag {
        /// Name of the open tag.
        expected: String,
        /// Name found in the closing tag.
        found: String,
    },
    /// Branch and tag bodies nest deeper than [`MAX_NESTING`].
    #[error("nesting deeper than {} levels", MAX_NESTING)]
    NestingTooDeep,
}

/// Parses template text into a [`ParsedTemplate`].
///
/// # Errors
///
/// Returns a [`ParseError`] describing the first syntax error.
///
/// # Examples
///
/// ```rust
/// use locale_resolver::template::{parse, Element};
///
/// let parsed = parse("Hello {name}!").expect("valid template");
/// assert_eq!(
///     parsed.elements(),
///     &[
///         Element::Literal("Hello ".into()),
///         Element::Argument { name: "name".into() },
///         Element::Literal("!".into()),
///     ]
/// );
/// ```
pub fn parse(source: &str) -> Result<ParsedTemplate, ParseError> {
    let mut parser = Parser {
        chars: source.chars().collect(),
        pos: 0,
        depth: 0,
    };
    let elements = parser.parse_message(Scope::default())?;
    Ok(ParsedTemplate::new(elements))
}

/// Where the parser currently is, which decides how special characters read.
#[derive(Clone, Copy, Debug, Default)]
struct Scope {
    in_plural: bool,
    in_branch: bool,
    in_tag: bool,
}

struct Parser {
    chars: Vec<char>,
    pos: usize,
    /// Message bodies currently open, the top level included.
    depth: usize,
}

impl Parser {
    fn peek(&self) -> Option<char> {
        self.chars.get(self.pos).copied()
    }

    fn peek_at(&self, ahead: usize) -> Option<char> {
        self.chars.get(self.pos + ahead).copied()
    }

    fn bump(&mut self) -> Option<char> {
        let ch = self.peek();
        if ch.is_some() {
            self.pos += 1;
        }
        ch
    }

    const fn error(&self, kind: ParseErrorKind) -> ParseError {
        ParseError::new(kind, self.pos)
    }

    fn skip_whitespace(&mut self) {
        while self.peek().is_some_and(char::is_whitespace) {
            self.pos += 1;
        }
    }

    fn starts_closing_tag(&self) -> bool {
        self.peek() == Some('<') && self.peek_at(1) == Some('/')
    }

    fn parse_message(&mut self, scope: Scope) -> Result<Vec<Element>, ParseError> {
        if self.depth > MAX_NESTING {
            return Err(self.error(ParseErrorKind::NestingTooDeep));
        }
        self.depth += 1;
        let elements = self.parse_elements(scope);
        self.depth -= 1;
        elements
    }

    fn parse_elements(&mut self, scope: Scope) -> Result<Vec<Element>, ParseError> {
        let mut elements = Vec::new();
        let mut text = String::new();
        loop {
            match self.peek() {
                None => break,
                Some('{') => {
                    flush(&mut text, &mut elements);
                    let element = self.parse_argument()?;
                    elements.push(element);
                }
                Some('}') => {
                    if scope.in_branch {
                        break;
                    }
                    return Err(self.error(ParseErrorKind::UnmatchedCloseBrace));
                }
                Some('#') if scope.in_plural => {
                    flush(&mut text, &mut elements);
                    self.pos += 1;
                    elements.push(Element::Pound);
                }
                Some('<') if self.peek_at(1) == Some('/') => {
                    if scope.in_tag {
                        break;
                    }
                    return Err(self.error(ParseErrorKind::UnexpectedClosingTag));
                }
                Some('<') if self.peek_at(1).is_some_and(|c| c.is_ascii_alphabetic()) => {
                    flush(&mut text, &mut elements);
                    let element = self.parse_tag(scope)?;
                    elements.push(element);
                }
                Some('\'') => self.parse_apostrophe(scope, &mut text),
                Some(ch) => {
                    text.push(ch);
                    self.pos += 1;
                }
            }
        }
        flush(&mut text, &mut elements);
        Ok(elements)
    }

    /// `''` is a literal apostrophe; an apostrophe before a syntax character
    /// opens a quoted section that runs to the next unpaired apostrophe.
    fn parse_apostrophe(&mut self, scope: Scope, text: &mut String) {
        self.pos += 1;
        match self.peek() {
            Some('\'') => {
                text.push('\'');
                self.pos += 1;
            }
            Some(ch) if opens_quote(ch, scope) => {
                while let Some(c) = self.bump() {
                    if c != '\'' {
                        text.push(c);
                    } else if self.peek() == Some('\'') {
                        text.push('\'');
                        self.pos += 1;
                    } else {
                        return;
                    }
                }
            }
            _ => text.push('\''),
        }
    }

    fn read_identifier(&mut self) -> String {
        let mut ident = String::new();
        while let Some(ch) = self.peek() {
            if ch.is_whitespace() || matches!(ch, '{' | '}' | ',' | '<' | '>' | '\'' | '#') {
                break;
            }
            ident.push(ch);
            self.pos += 1;
        }
        ident
    }

    fn read_keyword(&mut self) -> String {
        let mut keyword = String::new();
        while let Some(ch) = self.peek().filter(char::is_ascii_alphabetic) {
            keyword.push(ch);
            self.pos += 1;
        }
        keyword
    }

    fn read_number(&mut self) -> Option<f64> {
        let mut digits = String::new();
        if self.peek() == Some('-') {
            digits.push('-');
            self.pos += 1;
        }
        while let Some(ch) = self.peek().filter(|c| c.is_ascii_digit() || *c == '.') {
            digits.push(ch);
            self.pos += 1;
        }
        digits.parse().ok()
    }

    fn consume_literal(&mut self, expected: &str) -> bool {
        let matches = expected
            .chars()
            .enumerate()
            .all(|(i, ch)| self.peek_at(i) == Some(ch));
        if matches {
            self.pos += expected.chars().count();
        }
        matches
    }

    fn expect_comma(&mut self, start: usize) -> Result<(), ParseError> {
        self.skip_whitespace();
        match self.bump() {
            Some(',') => Ok(()),
            None => Err(ParseError::new(ParseErrorKind::UnterminatedArgument, start)),
            Some(_) => Err(ParseError::new(ParseErrorKind::Expected(','), self.pos - 1)),
        }
    }

    fn parse_argument(&mut self) -> Result<Element, ParseError> {
        let start = self.pos;
        self.pos += 1;
        self.skip_whitespace();
        let name = self.read_identifier();
        if name.is_empty() {
            return Err(match self.peek() {
                None => ParseError::new(ParseErrorKind::UnterminatedArgument, start),
                Some(_) => self.error(ParseErrorKind::EmptyArgumentName),
            });
        }
        self.skip_whitespace();
        match self.bump() {
            Some('}') => Ok(Element::Argument { name }),
            Some(',') => self.parse_formatted_argument(name, start),
            None => Err(ParseError::new(ParseErrorKind::UnterminatedArgument, start)),
            Some(_) => Err(ParseError::new(ParseErrorKind::Expected('}'), self.pos - 1)),
        }
    }

    fn parse_formatted_argument(
        &mut self,
        name: String,
        start: usize,
    ) -> Result<Element, ParseError> {
        self.skip_whitespace();
        let keyword = self.read_keyword();
        self.skip_whitespace();
        match keyword.as_str() {
            "number" => Ok(Element::Number {
                name,
                style: self.parse_style(start)?,
            }),
            "date" => Ok(Element::Date {
                name,
                style: self.parse_style(start)?,
            }),
            "time" => Ok(Element::Time {
                name,
                style: self.parse_style(start)?,
            }),
            "plural" => {
                self.expect_comma(start)?;
                self.parse_plural(name, PluralKind::Cardinal, start)
            }
            "selectordinal" => {
                self.expect_comma(start)?;
                self.parse_plural(name, PluralKind::Ordinal, start)
            }
            "select" => {
                self.expect_comma(start)?;
                let branch_scope = Scope {
                    in_plural: false,
                    in_branch: true,
                    in_tag: false,
                };
                let branches = self.parse_branches(start, branch_scope, false)?;
                Ok(Element::Select { name, branches })
            }
            "" => Err(self.error(ParseErrorKind::MissingArgumentType)),
            other => Err(ParseError::new(
                ParseErrorKind::UnknownArgumentType(other.to_owned()),
                start,
            )),
        }
    }

    fn parse_style(&mut self, start: usize) -> Result<Option<String>, ParseError> {
        match self.bump() {
            Some('}') => Ok(None),
            Some(',') => {
                let mut style = String::new();
                loop {
                    match self.bump() {
                        Some('}') => break,
                        Some('{') => {
                            return Err(ParseError::new(
                                ParseErrorKind::Expected('}'),
                                self.pos - 1,
                            ));
                        }
                        Some(ch) => style.push(ch),
                        None => {
                            return Err(ParseError::new(
                                ParseErrorKind::UnterminatedArgument,
                                start,
                            ));
                        }
                    }
                }
                let trimmed = style.trim();
                if trimmed.is_empty() {
                    Err(ParseError::new(ParseErrorKind::EmptyStyle, start))
                } else {
                    Ok(Some(trimmed.to_owned()))
                }
            }
            None => Err(ParseError::new(ParseErrorKind::UnterminatedArgument, start)),
            Some(_) => Err(ParseError::new(ParseErrorKind::Expected('}'), self.pos - 1)),
        }
    }

    fn parse_plural(
        &mut self,
        name: String,
        kind: PluralKind,
        start: usize,
    ) -> Result<Element, ParseError> {
        self.skip_whitespace();
        let offset = if self.consume_literal("offset:") {
            self.skip_whitespace();
            self.read_number()
                .ok_or_else(|| self.error(ParseErrorKind::InvalidOffset))?
        } else {
            0.0
        };
        let branch_scope = Scope {
            in_plural: true,
            in_branch: true,
            in_tag: false,
        };
        let branches = self.parse_branches(start, branch_scope, true)?;
        Ok(Element::Plural {
            name,
            kind,
            offset,
            branches,
        })
    }

    fn parse_branches(
        &mut self,
        start: usize,
        scope: Scope,
        plural: bool,
    ) -> Result<Vec<Branch>, ParseError> {
        let mut branches: Vec<Branch> = Vec::new();
        loop {
            self.skip_whitespace();
            match self.peek() {
                None => return Err(ParseError::new(ParseErrorKind::UnterminatedArgument, start)),
                Some('}') => {
                    self.pos += 1;
                    break;
                }
                Some(_) => {}
            }

            let selector_at = self.pos;
            let selector = self.parse_selector(plural)?;
            if branches.iter().any(|branch| branch.selector == selector) {
                return Err(ParseError::new(
                    ParseErrorKind::DuplicateSelector(selector_label(&selector)),
                    selector_at,
                ));
            }

            self.skip_whitespace();
            if self.peek() != Some('{') {
                return Err(self.error(ParseErrorKind::Expected('{')));
            }
            self.pos += 1;
            let body = self.parse_message(scope)?;
            if self.peek() != Some('}') {
                return Err(ParseError::new(ParseErrorKind::UnterminatedArgument, start));
            }
            self.pos += 1;
            branches.push(Branch { selector, body });
        }

        if branches.iter().any(|branch| branch.selector.is_other()) {
            Ok(branches)
        } else {
            Err(ParseError::new(ParseErrorKind::MissingOtherClause, start))
        }
    }

    fn parse_selector(&mut self, plural: bool) -> Result<Selector, ParseError> {
        let at = self.pos;
        if plural && self.peek() == Some('=') {
            self.pos += 1;
            return self.read_number().map(Selector::Exact).ok_or_else(|| {
                ParseError::new(ParseErrorKind::InvalidSelector("=".to_owned()), at)
            });
        }
        let keyword = self.read_identifier();
        if keyword.is_empty() {
            return Err(ParseError::new(
                ParseErrorKind::InvalidSelector(String::new()),
                at,
            ));
        }
        if plural && !PLURAL_CATEGORIES.contains(&keyword.as_str()) {
            return Err(ParseError::new(
                ParseErrorKind::InvalidPluralSelector(keyword),
                at,
            ));
        }
        Ok(Selector::Keyword(keyword))
    }

    fn read_tag_name(&mut self) -> String {
        let mut name = String::new();
        while let Some(ch) = self
            .peek()
            .filter(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.'))
        {
            name.push(ch);
            self.pos += 1;
        }
        name
    }

    fn parse_tag(&mut self, scope: Scope) -> Result<Element, ParseError> {
        let start = self.pos;
        self.pos += 1;
        let name = self.read_tag_name();
        self.skip_whitespace();
        if self.consume_literal("/>") {
            return Ok(Element::Literal(format!("<{name}/>")));
        }
        if self.peek() != Some('>') {
            return Err(self.error(ParseErrorKind::Expected('>')));
        }
        self.pos += 1;

        let children = self.parse_message(Scope {
            in_tag: true,
            ..scope
        })?;
        if !self.starts_closing_tag() {
            return Err(ParseError::new(ParseErrorKind::UnclosedTag(name), start));
        }
        let close_at = self.pos;
        self.pos += 2;
        let closing = self.read_tag_name();
        if closing != name {
            return Err(ParseError::new(
                ParseErrorKind::MismatchedTag {
                    expected: name,
                    found: closing,
                },
                close_at,
            ));
        }
        self.skip_whitespace();
        if self.peek() != Some('>') {
            return Err(self.error(ParseErrorKind::Expected('>')));
        }
        self.pos += 1;
        Ok(Element::Tag { name, children })
    }
}

fn opens_quote(ch: char, scope: Scope) -> bool {
    matches!(ch, '{' | '}' | '<' | '>') || (ch == '#' && scope.in_plural)
}

fn flush(text: &mut String, elements: &mut Vec<Element>) {
    if !text.is_empty() {
        elements.push(Element::Literal(mem::take(text)));
    }
}

fn selector_label(selector: &Selector) -> String {
    match selector {
        Selector::Exact(value) => format!("={value}"),
        Selector::Keyword(keyword) => keyword.clone(),
    }
}
