//! Interpolation values and rendered messages.

use std::collections::BTreeMap;
use std::collections::btree_map;
use std::fmt;
use std::sync::Arc;

use chrono::{DateTime, Utc};

/// Handler for a `<tag>` element: receives the rendered children and returns
/// the fragments that replace the tag.
pub type TagFn = Arc<dyn Fn(Vec<Fragment>) -> Vec<Fragment> + Send + Sync>;

/// A value supplied for a template placeholder.
#[derive(Clone)]
pub enum Value {
    /// Text, inserted verbatim.
    String(String),
    /// Any number. Integers are carried as `f64`.
    Number(f64),
    /// `true` or `false`.
    Bool(bool),
    /// A point in time, rendered in UTC.
    Date(DateTime<Utc>),
    /// Rich-text handler for a `<tag>` element.
    Tag(TagFn),
}

impl Value {
    /// Wraps a closure as a [`Value::Tag`].
    pub fn tag<F>(handler: F) -> Self
    where
        F: Fn(Vec<Fragment>) -> Vec<Fragment> + Send + Sync + 'static,
    {
        Self::Tag(Arc::new(handler))
    }

    /// Truthiness used by placeholder validation.
    ///
    /// The empty string, zero, `NaN`, and `false` are falsy. Dates and tag
    /// handlers are always truthy.
    #[must_use]
    pub fn is_truthy(&self) -> bool {
        match self {
            Self::String(text) => !text.is_empty(),
            Self::Number(number) => *number != 0.0 && !number.is_nan(),
            Self::Bool(flag) => *flag,
            Self::Date(_) | Self::Tag(_) => true,
        }
    }
}

impl fmt::Debug for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::String(text) => f.debug_tuple("String").field(text).finish(),
            Self::Number(number) => f.debug_tuple("Number").field(number).finish(),
            Self::Bool(flag) => f.debug_tuple("Bool").field(flag).finish(),
            Self::Date(date) => f.debug_tuple("Date").field(date).finish(),
            Self::Tag(_) => f.write_str("Tag(..)"),
        }
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Self::String(value.to_owned())
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Self::String(value)
    }
}

impl From<f64> for Value {
    fn from(value: f64) -> Self {
        Self::Number(value)
    }
}

impl From<i32> for Value {
    fn from(value: i32) -> Self {
        Self::Number(f64::from(value))
    }
}

impl From<u32> for Value {
    fn from(value: u32) -> Self {
        Self::Number(f64::from(value))
    }
}

impl From<i64> for Value {
    #[expect(
        clippy::cast_precision_loss,
        reason = "placeholder numbers are formatted as f64"
    )]
    fn from(value: i64) -> Self {
        Self::Number(value as f64)
    }
}

impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<DateTime<Utc>> for Value {
    fn from(value: DateTime<Utc>) -> Self {
        Self::Date(value)
    }
}

/// Named interpolation values for one resolution call.
#[derive(Clone, Debug, Default)]
pub struct Context {
    values: BTreeMap<String, Value>,
}

impl Context {
    /// Creates an empty context.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            values: BTreeMap::new(),
        }
    }

    /// Adds a value and returns the context, for chaining.
    #[must_use]
    pub fn with(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.insert(name, value);
        self
    }

    /// Adds or replaces a value.
    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<Value>) {
        self.values.insert(name.into(), value.into());
    }

    /// Looks up a value by placeholder name.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.values.get(name)
    }

    /// Returns `true` when `name` has a value, truthy or not.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.values.contains_key(name)
    }

    /// Number of values.
    #[must_use]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Returns `true` when no values are present.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Iterates values in name order.
    pub fn iter(&self) -> btree_map::Iter<'_, String, Value> {
        self.values.iter()
    }
}

impl<K, V> FromIterator<(K, V)> for Context
where
    K: Into<String>,
    V: Into<Value>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut context = Self::new();
        for (name, value) in iter {
            context.insert(name, value);
        }
        context
    }
}

impl<'a> IntoIterator for &'a Context {
    type Item = (&'a String, &'a Value);
    type IntoIter = btree_map::Iter<'a, String, Value>;

    fn into_iter(self) -> Self::IntoIter {
        self.values.iter()
    }
}

/// A piece of rich-text output.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Fragment {
    /// Plain text.
    Text(String),
    /// A node produced by a tag handler.
    Node {
        /// Node name chosen by the handler.
        tag: String,
        /// Nested fragments.
        children: Vec<Fragment>,
    },
}

impl Fragment {
    fn write_plain(&self, out: &mut String) {
        match self {
            Self::Text(text) => out.push_str(text),
            Self::Node { children, .. } => {
                for child in children {
                    child.write_plain(out);
                }
            }
        }
    }
}

/// The result of a resolution.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Message {
    /// Plain text; produced whenever no tag handler emitted a node.
    Text(String),
    /// Rich text; produced when tag handlers contributed fragments.
    Fragments(Vec<Fragment>),
}

impl Message {
    /// The empty message returned by suppressed failures.
    #[must_use]
    pub const fn empty() -> Self {
        Self::Text(String::new())
    }

    /// Borrows the text of a plain message.
    #[must_use]
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(text) => Some(text),
            Self::Fragments(_) => None,
        }
    }

    /// Flattens the message to text, dropping node boundaries.
    #[must_use]
    pub fn to_plain_text(&self) -> String {
        match self {
            Self::Text(text) => text.clone(),
            Self::Fragments(fragments) => {
                let mut out = String::new();
                for fragment in fragments {
                    fragment.write_plain(&mut out);
                }
                out
            }
        }
    }

    /// Consuming form of [`Message::to_plain_text`].
    #[must_use]
    pub fn into_plain_text(self) -> String {
        match self {
            Self::Text(text) => text,
            fragments @ Self::Fragments(_) => fragments.to_plain_text(),
        }
    }
}

impl fmt::Display for Message {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Text(text) => f.write_str(text),
            Self::Fragments(_) => f.write_str(&self.to_plain_text()),
        }
    }
}

impl From<String> for Message {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<&str> for Message {
    fn from(value: &str) -> Self {
        Self::Text(value.to_owned())
    }
}

impl PartialEq<str> for Message {
    fn eq(&self, other: &str) -> bool {
        self.as_text() == Some(other)
    }
}

impl PartialEq<&str> for Message {
    fn eq(&self, other: &&str) -> bool {
        self.as_text() == Some(*other)
    }
}
