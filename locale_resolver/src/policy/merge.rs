//! Layer overlay mechanics for policy merging.

use std::borrow::Cow;

use serde_json::{Map, Value};

use super::{PolicyLayer, PolicySource, ResolutionPolicy};
use crate::PolicyError;

/// Merges the three standard layers into a fully-populated policy.
///
/// A field from a later layer wins only when that layer sets it explicitly.
///
/// # Errors
///
/// Returns [`PolicyError::Merge`] when the overlaid fields do not form a
/// valid policy.
///
/// # Examples
///
/// ```rust
/// use locale_resolver::policy::{merge, PolicyLayer, ResolutionPolicy};
///
/// let defaults = ResolutionPolicy::default().to_layer();
/// let construction = PolicyLayer::new().strict(false);
/// let call = PolicyLayer::new().missing_message("NOT TRANSLATED YET!");
///
/// let policy = merge(&defaults, &construction, &call)?;
/// assert!(!policy.strict);
/// assert_eq!(policy.missing_message.as_deref(), Some("NOT TRANSLATED YET!"));
/// # Ok::<_, locale_resolver::PolicyError>(())
/// ```
pub fn merge(
    defaults: &PolicyLayer,
    construction: &PolicyLayer,
    call: &PolicyLayer,
) -> Result<ResolutionPolicy, PolicyError> {
    merge_layers([
        PolicySource::defaults(Cow::Borrowed(defaults)),
        PolicySource::construction(Cow::Borrowed(construction)),
        PolicySource::call(Cow::Borrowed(call)),
    ])
}

/// Overlays `sources` in iteration order and deserialises the result.
///
/// Fields that no layer sets fall back to [`ResolutionPolicy::default`].
///
/// # Errors
///
/// Returns [`PolicyError::Merge`] when the overlaid fields do not form a
/// valid policy.
pub fn merge_layers<'a, I>(sources: I) -> Result<ResolutionPolicy, PolicyError>
where
    I: IntoIterator<Item = PolicySource<'a>>,
{
    let mut acc = Value::Object(Map::new());
    for source in sources {
        tracing::trace!(provenance = %source.provenance(), "overlaying policy layer");
        merge_value(&mut acc, source.into_value());
    }
    serde_json::from_value(acc).map_err(|e| PolicyError::Merge {
        message: e.to_string(),
    })
}

/// Overlay `layer` onto `target`, updating `target` in place.
///
/// Objects merge key by key; any other value replaces `target` wholesale.
///
/// ```rust
/// use locale_resolver::policy::merge_value;
/// use serde_json::json;
///
/// let mut acc = json!({"strict": true, "missing_message": "-"});
/// merge_value(&mut acc, json!({"missing_message": null}));
/// assert_eq!(acc, json!({"strict": true, "missing_message": null}));
/// ```
pub fn merge_value(target: &mut Value, layer: Value) {
    match layer {
        Value::Object(map) => merge_object(target, map),
        _ => *target = layer,
    }
}

fn merge_object(target: &mut Value, map: Map<String, Value>) {
    if !target.is_object() {
        *target = Value::Object(Map::new());
    }

    let Some(target_map) = target.as_object_mut() else {
        return;
    };

    for (key, value) in map {
        match target_map.get_mut(&key) {
            Some(existing) => merge_value(existing, value),
            None => {
                target_map.insert(key, value);
            }
        }
    }
}
