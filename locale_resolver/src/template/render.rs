//! Renders parsed templates against an interpolation context.

use std::cmp::Ordering;

use thiserror::Error;
use unic_langid::LanguageIdentifier;

use super::ast::{Branch, Element, ParsedTemplate, PluralKind, Selector};
use super::format::{self, FormatOptions, NumberStyle};
use super::plural;
use super::value::{Context, Fragment, Message, Value};

/// Failure while rendering a parsed template.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[non_exhaustive]
pub enum RenderError {
    /// The context has no value for a placeholder the template uses.
    #[error("no value supplied for '{name}'")]
    MissingValue {
        /// Placeholder name.
        name: String,
    },
    /// The value has the wrong type for how the template uses it.
    #[error("value for '{name}' must be a {expected}")]
    InvalidValue {
        /// Placeholder name.
        name: String,
        /// Description of the accepted type.
        expected: &'static str,
    },
    /// No branch matched and there was no `other` to fall back to.
    #[error("no branch of '{name}' matches '{selector}'")]
    NoMatchingBranch {
        /// Placeholder name.
        name: String,
        /// The value that was matched.
        selector: String,
    },
    /// A date or time pattern chrono cannot format.
    #[error("invalid date/time style '{style}'")]
    InvalidStyle {
        /// The offending pattern.
        style: String,
    },
}

/// Renders `template` for `locale`.
///
/// # Errors
///
/// Returns a [`RenderError`] when `context` lacks a value the template needs,
/// a value has the wrong type, or a style cannot be applied.
///
/// # Examples
///
/// ```rust
/// use locale_resolver::template::{parse, render, Context, FormatOptions};
/// use unic_langid::langid;
///
/// let parsed = parse("{n, plural, one{# book} other{# books}}").expect("valid template");
/// let context = Context::new().with("n", 1200);
/// let message = render(&parsed, &langid!("en"), Some(&context), &FormatOptions::default())
///     .expect("renders");
/// assert_eq!(message, "1,200 books");
/// ```
pub fn render(
    template: &ParsedTemplate,
    locale: &LanguageIdentifier,
    context: Option<&Context>,
    formats: &FormatOptions,
) -> Result<Message, RenderError> {
    let renderer = Renderer {
        locale,
        context,
        formats,
    };
    let mut out = Output::default();
    renderer.render_elements(template.elements(), None, &mut out)?;
    Ok(out.into_message())
}

/// Accumulates fragments, merging adjacent text.
#[derive(Default)]
struct Output {
    fragments: Vec<Fragment>,
}

impl Output {
    fn push_text(&mut self, text: &str) {
        if text.is_empty() {
            return;
        }
        if let Some(Fragment::Text(last)) = self.fragments.last_mut() {
            last.push_str(text);
        } else {
            self.fragments.push(Fragment::Text(text.to_owned()));
        }
    }

    fn push_fragment(&mut self, fragment: Fragment) {
        match fragment {
            Fragment::Text(text) => self.push_text(&text),
            node @ Fragment::Node { .. } => self.fragments.push(node),
        }
    }

    fn into_message(self) -> Message {
        let all_text = self
            .fragments
            .iter()
            .all(|fragment| matches!(fragment, Fragment::Text(_)));
        if all_text {
            Message::Fragments(self.fragments).into_plain_text().into()
        } else {
            Message::Fragments(self.fragments)
        }
    }
}

struct Renderer<'a> {
    locale: &'a LanguageIdentifier,
    context: Option<&'a Context>,
    formats: &'a FormatOptions,
}

impl Renderer<'_> {
    fn render_elements(
        &self,
        elements: &[Element],
        pound: Option<f64>,
        out: &mut Output,
    ) -> Result<(), RenderError> {
        for element in elements {
            self.render_element(element, pound, out)?;
        }
        Ok(())
    }

    fn render_element(
        &self,
        element: &Element,
        pound: Option<f64>,
        out: &mut Output,
    ) -> Result<(), RenderError> {
        match element {
            Element::Literal(text) => out.push_text(text),
            Element::Argument { name } => out.push_text(&self.plain_argument(name)?),
            Element::Number { name, style } => {
                let number = self.number(name)?;
                let number_style = self.formats.number_style(style.as_deref());
                out.push_text(&format::format_number(number, number_style, self.locale));
            }
            Element::Date { name, style } => {
                let pattern = self.formats.date_pattern(style.as_deref());
                out.push_text(&self.date(name, pattern)?);
            }
            Element::Time { name, style } => {
                let pattern = self.formats.time_pattern(style.as_deref());
                out.push_text(&self.date(name, pattern)?);
            }
            Element::Plural {
                name,
                kind,
                offset,
                branches,
            } => self.render_plural(name, *kind, *offset, branches, out)?,
            Element::Select { name, branches } => {
                self.render_select(name, branches, pound, out)?;
            }
            Element::Pound => match pound {
                Some(number) => out.push_text(&format::format_number(
                    number,
                    NumberStyle::default(),
                    self.locale,
                )),
                None => out.push_text("#"),
            },
            Element::Tag { name, children } => self.render_tag(name, children, pound, out)?,
        }
        Ok(())
    }

    fn value(&self, name: &str) -> Result<&Value, RenderError> {
        self.context
            .and_then(|context| context.get(name))
            .ok_or_else(|| RenderError::MissingValue {
                name: name.to_owned(),
            })
    }

    fn number(&self, name: &str) -> Result<f64, RenderError> {
        match self.value(name)? {
            Value::Number(number) => Ok(*number),
            _ => Err(RenderError::InvalidValue {
                name: name.to_owned(),
                expected: "number",
            }),
        }
    }

    fn date(&self, name: &str, pattern: &str) -> Result<String, RenderError> {
        let Value::Date(date) = self.value(name)? else {
            return Err(RenderError::InvalidValue {
                name: name.to_owned(),
                expected: "date",
            });
        };
        format::format_date(date, pattern).ok_or_else(|| RenderError::InvalidStyle {
            style: pattern.to_owned(),
        })
    }

    fn plain_argument(&self, name: &str) -> Result<String, RenderError> {
        match self.value(name)? {
            Value::String(text) => Ok(text.clone()),
            Value::Number(number) => Ok(format::format_plain_number(*number)),
            Value::Bool(flag) => Ok(flag.to_string()),
            Value::Date(_) => self.date(name, self.formats.date_pattern(None)),
            Value::Tag(_) => Err(RenderError::InvalidValue {
                name: name.to_owned(),
                expected: "plain value, not a tag function",
            }),
        }
    }

    #[expect(
        clippy::float_arithmetic,
        reason = "plural offsets are subtracted before category selection"
    )]
    fn render_plural(
        &self,
        name: &str,
        kind: PluralKind,
        offset: f64,
        branches: &[Branch],
        out: &mut Output,
    ) -> Result<(), RenderError> {
        let number = self.number(name)?;
        let adjusted = number - offset;
        let branch = branches
            .iter()
            .find(|branch| match branch.selector {
                Selector::Exact(exact) => exact.partial_cmp(&number) == Some(Ordering::Equal),
                Selector::Keyword(_) => false,
            })
            .or_else(|| find_keyword(branches, plural::category(self.locale, kind, adjusted)))
            .or_else(|| find_keyword(branches, "other"))
            .ok_or_else(|| RenderError::NoMatchingBranch {
                name: name.to_owned(),
                selector: format::format_plain_number(number),
            })?;
        self.render_elements(&branch.body, Some(adjusted), out)
    }

    fn render_select(
        &self,
        name: &str,
        branches: &[Branch],
        pound: Option<f64>,
        out: &mut Output,
    ) -> Result<(), RenderError> {
        let key = match self.value(name)? {
            Value::String(text) => text.clone(),
            Value::Number(number) => format::format_plain_number(*number),
            Value::Bool(flag) => flag.to_string(),
            Value::Date(_) | Value::Tag(_) => {
                return Err(RenderError::InvalidValue {
                    name: name.to_owned(),
                    expected: "string, number, or boolean",
                });
            }
        };
        let branch = find_keyword(branches, &key)
            .or_else(|| find_keyword(branches, "other"))
            .ok_or_else(|| RenderError::NoMatchingBranch {
                name: name.to_owned(),
                selector: key.clone(),
            })?;
        self.render_elements(&branch.body, pound, out)
    }

    fn render_tag(
        &self,
        name: &str,
        children: &[Element],
        pound: Option<f64>,
        out: &mut Output,
    ) -> Result<(), RenderError> {
        let Value::Tag(handler) = self.value(name)? else {
            return Err(RenderError::InvalidValue {
                name: name.to_owned(),
                expected: "tag function",
            });
        };
        let mut inner = Output::default();
        self.render_elements(children, pound, &mut inner)?;
        for fragment in handler(inner.fragments) {
            out.push_fragment(fragment);
        }
        Ok(())
    }
}

fn find_keyword<'b>(branches: &'b [Branch], keyword: &str) -> Option<&'b Branch> {
    branches
        .iter()
        .find(|branch| matches!(&branch.selector, Selector::Keyword(k) if k == keyword))
}
