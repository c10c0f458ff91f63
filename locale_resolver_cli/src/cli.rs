//! Command line surface of `locale-resolve`.
//!
//! Flags form the highest-precedence settings layer; anything left unset
//! falls through to the settings file and `LOCALE_RESOLVER_*` environment
//! variables.
use camino::Utf8PathBuf;
use chrono::{DateTime, Utc};
use clap::{ArgAction, Parser};
use locale_resolver::policy::{PolicyLayer, PolicyProvenance};
use locale_resolver::{CallOptions, Context, ResolveError, ResolverSettings, Value};

use crate::error::{ArgumentError, Result};

/// Resolve one translation key and print the rendered message.
#[derive(Debug, Parser)]
#[command(
    name = "locale-resolve",
    bin_name = "locale-resolve",
    about = "Resolve an ICU MessageFormat translation from a JSON store",
    version
)]
pub struct CommandLine {
    /// Settings file in TOML.
    #[arg(long = "config", short = 'c', value_name = "PATH")]
    pub config_path: Option<Utf8PathBuf>,
    /// JSON translation store.
    #[arg(long, short = 's', value_name = "PATH")]
    pub store: Option<Utf8PathBuf>,
    /// Locale the resolver is bound to.
    #[arg(long, short = 'l', value_name = "CODE")]
    pub locale: Option<String>,
    /// Suppress failures and enable fallbacks.
    #[arg(long, action = ArgAction::SetTrue, conflicts_with = "strict")]
    pub lenient: bool,
    /// Report every failure, overriding a lenient settings file.
    #[arg(long, action = ArgAction::SetTrue)]
    pub strict: bool,
    /// Language consulted when the bound locale has no template.
    #[arg(long = "fallback", value_name = "CODE")]
    pub fallback_language: Option<String>,
    /// Text used when no template can be found.
    #[arg(long, value_name = "TEXT")]
    pub missing_message: Option<String>,
    /// Per-call policy overrides as a JSON object.
    #[arg(long = "call-settings", value_name = "JSON")]
    pub call_settings: Option<String>,
    /// Message key to resolve.
    #[arg(value_name = "KEY")]
    pub key: String,
    /// Interpolation values as `name=value`.
    ///
    /// `true` and `false` become booleans, finite numbers become numbers,
    /// RFC 3339 timestamps become dates, and anything else stays text.
    #[arg(value_name = "NAME=VALUE")]
    pub values: Vec<String>,
}

impl CommandLine {
    /// Settings supplied by flags; unset flags stay `None`.
    #[must_use]
    pub fn settings_overrides(&self) -> ResolverSettings {
        let strict = if self.strict {
            Some(true)
        } else if self.lenient {
            Some(false)
        } else {
            None
        };
        ResolverSettings {
            store: self.store.clone(),
            locale: self.locale.clone(),
            strict,
            fallback_language: self.fallback_language.clone(),
            missing_message: self.missing_message.clone(),
        }
    }

    /// Builds the interpolation context from the positional values.
    ///
    /// # Errors
    ///
    /// Returns an [`ArgumentError`] for values without `=` or with an empty
    /// name.
    pub fn context(&self) -> std::result::Result<Context, ArgumentError> {
        let mut context = Context::new();
        for raw in &self.values {
            let (name, value) = parse_assignment(raw)?;
            context.insert(name, value);
        }
        Ok(context)
    }

    /// Per-call options built from `--call-settings`.
    ///
    /// # Errors
    ///
    /// Returns [`ArgumentError::CallSettings`] when the flag is not JSON and
    /// [`ResolveError::InvalidPolicy`] when the JSON is not a valid policy
    /// object.
    pub fn call_options(&self) -> Result<Option<CallOptions>> {
        let Some(raw) = self.call_settings.as_deref() else {
            return Ok(None);
        };
        let value = serde_json::from_str(raw)
            .map_err(|err| ArgumentError::CallSettings(err.to_string()))?;
        let layer =
            PolicyLayer::from_json(PolicyProvenance::Call, value).map_err(ResolveError::from)?;
        Ok(Some(CallOptions::with_settings(layer)))
    }
}

/// Splits `name=value` and types the value.
///
/// # Errors
///
/// Returns an [`ArgumentError`] when `=` is missing or the name is blank.
pub fn parse_assignment(raw: &str) -> std::result::Result<(&str, Value), ArgumentError> {
    let (name, text) = raw
        .split_once('=')
        .ok_or_else(|| ArgumentError::MissingEquals(raw.to_owned()))?;
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return Err(ArgumentError::EmptyName(raw.to_owned()));
    }
    Ok((trimmed, typed_value(text)))
}

fn typed_value(text: &str) -> Value {
    match text {
        "true" => return Value::Bool(true),
        "false" => return Value::Bool(false),
        _ => {}
    }
    if let Ok(number) = text.parse::<f64>()
        && number.is_finite()
    {
        return Value::Number(number);
    }
    if let Ok(date) = DateTime::parse_from_rfc3339(text) {
        return Value::Date(date.with_timezone(&Utc));
    }
    Value::String(text.to_owned())
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;
    use crate::error::CliError;

    fn parse(args: &[&str]) -> CommandLine {
        let argv = std::iter::once("locale-resolve").chain(args.iter().copied());
        CommandLine::try_parse_from(argv).expect("arguments parse")
    }

    #[rstest]
    #[case("n=3", "n", "Number(3.0)")]
    #[case("flag=true", "flag", "Bool(true)")]
    #[case("name=Ada", "name", "String(\"Ada\")")]
    #[case("odd=inf", "odd", "String(\"inf\")")]
    #[case("when=2024-03-05T14:07:09Z", "when", "Date(2024-03-05T14:07:09Z)")]
    #[case(" spaced =a=b", "spaced", "String(\"a=b\")")]
    fn assignments_are_typed(#[case] raw: &str, #[case] name: &str, #[case] debug: &str) {
        let (parsed_name, value) = parse_assignment(raw).expect("valid assignment");
        assert_eq!(parsed_name, name);
        assert_eq!(format!("{value:?}"), debug);
    }

    #[rstest]
    #[case("novalue", ArgumentError::MissingEquals("novalue".into()))]
    #[case("=x", ArgumentError::EmptyName("=x".into()))]
    fn malformed_assignments_are_rejected(#[case] raw: &str, #[case] expected: ArgumentError) {
        assert_eq!(parse_assignment(raw).expect_err("rejected"), expected);
    }

    #[test]
    fn unset_flags_leave_settings_unset() {
        let overrides = parse(&["greetings"]).settings_overrides();
        assert_eq!(overrides, ResolverSettings::default());
    }

    #[rstest]
    #[case(&["--lenient", "k"], Some(false))]
    #[case(&["--strict", "k"], Some(true))]
    #[case(&["k"], None)]
    fn strictness_flags_map_to_settings(#[case] args: &[&str], #[case] strict: Option<bool>) {
        assert_eq!(parse(args).settings_overrides().strict, strict);
    }

    #[test]
    fn lenient_and_strict_conflict() {
        let argv = ["locale-resolve", "--lenient", "--strict", "k"];
        assert!(CommandLine::try_parse_from(argv).is_err());
    }

    #[test]
    fn call_settings_become_a_call_layer() {
        let cli = parse(&["--call-settings", r#"{"strict": false}"#, "k"]);
        let options = cli.call_options().expect("valid").expect("present");
        assert_eq!(options.settings, PolicyLayer::new().strict(false));
    }

    #[rstest]
    #[case("not json")]
    #[case(r#"{"strict": false"#)]
    fn unparseable_call_settings_are_argument_errors(#[case] raw: &str) {
        let cli = parse(&["--call-settings", raw, "k"]);
        let err = cli.call_options().expect_err("rejected");
        assert!(matches!(
            err,
            CliError::Argument(ArgumentError::CallSettings(_))
        ));
    }

    #[rstest]
    #[case(r#"{"colour": "blue"}"#)]
    #[case("[]")]
    fn bad_call_settings_are_invalid_policies(#[case] raw: &str) {
        let cli = parse(&["--call-settings", raw, "k"]);
        let err = cli.call_options().expect_err("rejected");
        assert!(matches!(err, CliError::Resolve(ResolveError::InvalidPolicy(_))));
    }
}
