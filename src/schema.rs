//! Schema nodes: the declarative description of one form field.
//!
//! DESIGN
//! ======
//! A schema node is an open JSON object (type, title, placeholder, format,
//! display hints, nested `*Props` configuration, a `$id` path token, a
//! `hidden` flag, constraints such as `max`). The core reads it and never
//! mutates it in place: visibility changes go through the path-scoped schema
//! setter keyed by `$id`.

use serde::{Deserialize, Serialize};
use serde_json::Value;

// =============================================================================
// TYPES
// =============================================================================

/// Flat string-keyed JSON mapping. Alias to reduce noise in signatures.
///
/// `serde_json::Map` keeps keys sorted, so serializing the same logical
/// mapping always yields the same string. The change gate relies on this.
pub type PropMap = serde_json::Map<String, Value>;

/// `$id` of the root schema node. The root never skips a re-render.
pub const ROOT_ID: &str = "#";

/// One form field's metadata. Wraps an open JSON object; unknown keys are
/// carried verbatim and surface through [`SchemaNode::get`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SchemaNode(PropMap);

// =============================================================================
// ACCESSORS
// =============================================================================

impl SchemaNode {
    #[must_use]
    pub fn new(fields: PropMap) -> Self {
        Self(fields)
    }

    /// Build from any JSON value. Non-objects become the empty node, keeping
    /// malformed input on the "key not present" degradation path.
    #[must_use]
    pub fn from_value(value: Value) -> Self {
        match value {
            Value::Object(map) => Self(map),
            _ => Self::default(),
        }
    }

    #[must_use]
    pub fn fields(&self) -> &PropMap {
        &self.0
    }

    #[must_use]
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    /// The identifying path token, e.g. `"#/user/name"`.
    #[must_use]
    pub fn id(&self) -> Option<&str> {
        self.get("$id").and_then(Value::as_str)
    }

    #[must_use]
    pub fn ty(&self) -> Option<&str> {
        self.get("type").and_then(Value::as_str)
    }

    #[must_use]
    pub fn format(&self) -> Option<&str> {
        self.get("format").and_then(Value::as_str)
    }

    #[must_use]
    pub fn hidden(&self) -> bool {
        self.get("hidden").is_some_and(is_truthy)
    }

    /// Explicit widget name: `widget` first, `ui:widget` as the fallback.
    #[must_use]
    pub fn declared_widget(&self) -> Option<&str> {
        self.get("widget")
            .or_else(|| self.get("ui:widget"))
            .and_then(Value::as_str)
    }

    /// Widget name to substitute when the field renders read-only.
    #[must_use]
    pub fn read_only_widget(&self) -> Option<&str> {
        self.get("readOnlyWidget").and_then(Value::as_str)
    }

    /// The `props` sub-object declared directly on the schema, if any.
    #[must_use]
    pub fn props(&self) -> Option<&PropMap> {
        self.get("props").and_then(Value::as_object)
    }

    /// Object-type container (renders children under a structural widget).
    #[must_use]
    pub fn is_obj_type(&self) -> bool {
        self.ty() == Some("object")
    }

    /// List-type container.
    #[must_use]
    pub fn is_list_type(&self) -> bool {
        self.ty() == Some("array")
    }
}

// =============================================================================
// VALUE PREDICATES
// =============================================================================

/// True for JSON objects only (not arrays, not null).
#[must_use]
pub fn is_object(value: &Value) -> bool {
    value.is_object()
}

/// JS-style truthiness used by the prop-copy rules: `null`, `false`, `0`,
/// and `""` are falsy, everything else is truthy.
#[must_use]
pub fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64() != Some(0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

/// Stable serialized form used for equality checks and the diagnostic view.
/// Map keys are sorted (see [`PropMap`]), so equal mappings serialize equally.
pub fn stable_json<T: Serialize>(value: &T) -> String {
    serde_json::to_string(value).unwrap_or_default()
}

// =============================================================================
// TESTS
// =============================================================================
