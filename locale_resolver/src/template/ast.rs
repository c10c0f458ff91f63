//! Syntax tree produced by the template parser.

/// Parsed form of a template: a sequence of top-level elements.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ParsedTemplate {
    elements: Vec<Element>,
}

impl ParsedTemplate {
    /// Wraps a list of top-level elements.
    #[must_use]
    pub const fn new(elements: Vec<Element>) -> Self {
        Self { elements }
    }

    /// Returns the top-level elements.
    #[must_use]
    pub fn elements(&self) -> &[Element] {
        &self.elements
    }

    /// Names of plain `{name}` arguments that appear at the top level.
    ///
    /// Arguments nested inside plural, select, or tag bodies are not listed.
    pub fn top_level_arguments(&self) -> impl Iterator<Item = &str> {
        self.elements.iter().filter_map(|element| match element {
            Element::Argument { name } => Some(name.as_str()),
            _ => None,
        })
    }

    /// Returns `true` when the template has no elements.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }
}

/// A node of the template tree.
#[derive(Clone, Debug, PartialEq)]
pub enum Element {
    /// Literal text, with escapes already applied.
    Literal(String),
    /// `{name}`
    Argument {
        /// Placeholder name.
        name: String,
    },
    /// `{name, number[, style]}`
    Number {
        /// Placeholder name.
        name: String,
        /// Optional style name.
        style: Option<String>,
    },
    /// `{name, date[, style]}`
    Date {
        /// Placeholder name.
        name: String,
        /// Optional style name.
        style: Option<String>,
    },
    /// `{name, time[, style]}`
    Time {
        /// Placeholder name.
        name: String,
        /// Optional style name.
        style: Option<String>,
    },
    /// `{name, plural|selectordinal, ...}`
    Plural {
        /// Placeholder name.
        name: String,
        /// Cardinal or ordinal rules.
        kind: PluralKind,
        /// Value subtracted before category selection and `#` rendering.
        offset: f64,
        /// Branches in source order.
        branches: Vec<Branch>,
    },
    /// `{name, select, ...}`
    Select {
        /// Placeholder name.
        name: String,
        /// Branches in source order.
        branches: Vec<Branch>,
    },
    /// `#` inside a plural branch.
    Pound,
    /// `<name>children</name>`
    Tag {
        /// Tag name, also the context key of its handler.
        name: String,
        /// Enclosed elements.
        children: Vec<Element>,
    },
}

/// Which CLDR rule set a plural argument uses.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PluralKind {
    /// `plural`
    Cardinal,
    /// `selectordinal`
    Ordinal,
}

/// One `selector{body}` arm of a plural or select argument.
#[derive(Clone, Debug, PartialEq)]
pub struct Branch {
    /// Arm selector.
    pub selector: Selector,
    /// Arm body.
    pub body: Vec<Element>,
}

/// Selector of a [`Branch`].
#[derive(Clone, Debug, PartialEq)]
pub enum Selector {
    /// `=N`, matched against the raw value.
    Exact(f64),
    /// A plural category or select keyword.
    Keyword(String),
}

impl Selector {
    /// Returns `true` when this is the keyword `other`.
    #[must_use]
    pub fn is_other(&self) -> bool {
        matches!(self, Self::Keyword(keyword) if keyword == "other")
    }
}
