//! Number, date, and time formatting for the bundled engine.

use std::collections::BTreeMap;
use std::fmt::Write as _;

use chrono::{DateTime, Utc};
use unic_langid::LanguageIdentifier;

const NBSP: char = '\u{a0}';

const DOT_GROUPING: &[&str] = &[
    "da", "de", "el", "es", "hr", "id", "it", "nl", "pt", "ro", "sl", "sr", "tr", "vi",
];
const SPACE_GROUPING: &[&str] = &[
    "bg", "cs", "et", "fi", "fr", "hu", "lt", "lv", "nb", "nn", "no", "pl", "ru", "sk", "sv", "uk",
];

/// How a number argument is written.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct NumberStyle {
    /// Fraction digits always written, padding with zeros.
    pub minimum_fraction_digits: u8,
    /// Fraction digits kept after rounding.
    pub maximum_fraction_digits: u8,
    /// Whether to insert grouping separators in the integer part.
    pub grouping: bool,
    /// Multiply by 100 and append `%`.
    pub percent: bool,
}

impl Default for NumberStyle {
    fn default() -> Self {
        Self {
            minimum_fraction_digits: 0,
            maximum_fraction_digits: 3,
            grouping: true,
            percent: false,
        }
    }
}

impl NumberStyle {
    /// Whole numbers with grouping.
    #[must_use]
    pub const fn integer() -> Self {
        Self {
            minimum_fraction_digits: 0,
            maximum_fraction_digits: 0,
            grouping: true,
            percent: false,
        }
    }

    /// Whole percentages, `0.25` → `25%`.
    #[must_use]
    pub const fn percent() -> Self {
        Self {
            minimum_fraction_digits: 0,
            maximum_fraction_digits: 0,
            grouping: true,
            percent: true,
        }
    }
}

/// Named styles available to `number`, `date`, and `time` arguments.
///
/// Entries here take precedence over the built-in names. Date and time
/// styles are chrono `strftime` patterns evaluated in UTC.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct FormatOptions {
    number: BTreeMap<String, NumberStyle>,
    date: BTreeMap<String, String>,
    time: BTreeMap<String, String>,
}

impl FormatOptions {
    /// Adds or replaces a named number style.
    #[must_use]
    pub fn with_number_style(mut self, name: impl Into<String>, style: NumberStyle) -> Self {
        self.number.insert(name.into(), style);
        self
    }

    /// Adds or replaces a named date pattern.
    #[must_use]
    pub fn with_date_style(mut self, name: impl Into<String>, pattern: impl Into<String>) -> Self {
        self.date.insert(name.into(), pattern.into());
        self
    }

    /// Adds or replaces a named time pattern.
    #[must_use]
    pub fn with_time_style(mut self, name: impl Into<String>, pattern: impl Into<String>) -> Self {
        self.time.insert(name.into(), pattern.into());
        self
    }

    pub(crate) fn number_style(&self, name: Option<&str>) -> NumberStyle {
        let Some(requested) = name else {
            return NumberStyle::default();
        };
        if let Some(style) = self.number.get(requested) {
            return *style;
        }
        match requested {
            "integer" => NumberStyle::integer(),
            "percent" => NumberStyle::percent(),
            _ => NumberStyle::default(),
        }
    }

    pub(crate) fn date_pattern<'a>(&'a self, name: Option<&'a str>) -> &'a str {
        let requested = name.unwrap_or("medium");
        if let Some(pattern) = self.date.get(requested) {
            return pattern;
        }
        match requested {
            "short" => "%-m/%-d/%y",
            "long" => "%B %-d, %Y",
            "full" => "%A, %B %-d, %Y",
            custom if custom.contains('%') => custom,
            _ => "%b %-d, %Y",
        }
    }

    pub(crate) fn time_pattern<'a>(&'a self, name: Option<&'a str>) -> &'a str {
        let requested = name.unwrap_or("medium");
        if let Some(pattern) = self.time.get(requested) {
            return pattern;
        }
        match requested {
            "short" => "%-I:%M %p",
            "long" | "full" => "%-I:%M:%S %p UTC",
            custom if custom.contains('%') => custom,
            _ => "%-I:%M:%S %p",
        }
    }
}

/// Writes `date` with a chrono pattern.
///
/// Returns `None` when the pattern contains an invalid specifier.
pub(crate) fn format_date(date: &DateTime<Utc>, pattern: &str) -> Option<String> {
    let mut out = String::new();
    write!(&mut out, "{}", date.format(pattern)).ok()?;
    Some(out)
}

/// Shortest decimal form used for plain `{name}` arguments.
pub(crate) fn format_plain_number(value: f64) -> String {
    if value.is_infinite() {
        return if value.is_sign_negative() { "-∞" } else { "∞" }.to_owned();
    }
    value.to_string()
}

/// Formats `value` with `style` using the separators of `locale`.
#[expect(
    clippy::float_arithmetic,
    reason = "percent scaling is a single multiplication"
)]
pub(crate) fn format_number(value: f64, style: NumberStyle, locale: &LanguageIdentifier) -> String {
    if value.is_nan() {
        return "NaN".to_owned();
    }
    let scaled = if style.percent { value * 100.0 } else { value };
    let suffix = if style.percent { "%" } else { "" };
    if scaled.is_infinite() {
        let sign = if scaled.is_sign_negative() { "-" } else { "" };
        return format!("{sign}∞{suffix}");
    }

    let (group_separator, decimal_separator) = separators(locale);
    let max = usize::from(style.maximum_fraction_digits.max(style.minimum_fraction_digits));
    let min = usize::from(style.minimum_fraction_digits);
    let fixed = format!("{:.max$}", scaled.abs());
    let (integer, fraction) = fixed.split_once('.').unwrap_or((fixed.as_str(), ""));

    let mut fraction_digits: Vec<char> = fraction.chars().collect();
    while fraction_digits.len() > min && fraction_digits.last() == Some(&'0') {
        fraction_digits.pop();
    }

    let mut out = String::new();
    let is_zero = integer.chars().all(|c| c == '0') && fraction_digits.iter().all(|c| *c == '0');
    if scaled.is_sign_negative() && !is_zero {
        out.push('-');
    }
    if style.grouping {
        push_grouped(&mut out, integer, group_separator);
    } else {
        out.push_str(integer);
    }
    if !fraction_digits.is_empty() {
        out.push(decimal_separator);
        out.extend(fraction_digits);
    }
    out.push_str(suffix);
    out
}

fn push_grouped(out: &mut String, digits: &str, separator: char) {
    let reversed: Vec<char> = digits.chars().rev().collect();
    let groups: Vec<String> = reversed
        .chunks(3)
        .rev()
        .map(|chunk| chunk.iter().rev().collect())
        .collect();
    out.push_str(&groups.join(&separator.to_string()));
}

fn separators(locale: &LanguageIdentifier) -> (char, char) {
    let language = locale.language.as_str();
    if DOT_GROUPING.contains(&language) {
        ('.', ',')
    } else if SPACE_GROUPING.contains(&language) {
        (NBSP, ',')
    } else {
        (',', '.')
    }
}
