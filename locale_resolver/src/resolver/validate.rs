//! Shallow placeholder completeness check.

use crate::ResolveError;
use crate::template::{Context, ParsedTemplate, Value};

/// In strict mode, requires a truthy value for every top-level `{name}`.
///
/// Placeholders nested in plural, select, or tag bodies are left to the
/// renderer.
pub(super) fn check_placeholders(
    template: &ParsedTemplate,
    context: Option<&Context>,
    strict: bool,
) -> Result<(), ResolveError> {
    if !strict {
        return Ok(());
    }
    for name in template.top_level_arguments() {
        let supplied = context
            .and_then(|context| context.get(name))
            .is_some_and(Value::is_truthy);
        if !supplied {
            return Err(ResolveError::MissingInterpolationValue {
                name: name.to_owned(),
            });
        }
    }
    Ok(())
}
