//! Change gate: decide whether a candidate re-render can be skipped.
//!
//! DESIGN
//! ======
//! The gate runs before anything else on every candidate re-invocation. A
//! skip decision must prevent widget instantiation entirely, so the render
//! shell consults it first and only then resolves and merges. Equality is
//! checked on stable serialized forms (sorted map keys), which is O(size)
//! per comparison but fine for the small per-field subtrees involved.

use serde_json::Value;
use tracing::debug;

use crate::schema::{ROOT_ID, SchemaNode, stable_json};
use crate::tools::{GetValue, OnChange, noop_get_value, noop_on_change};

// =============================================================================
// RENDER INPUTS
// =============================================================================

/// Everything one field render consumes. Immutable per invocation.
#[derive(Clone)]
pub struct RenderInputs {
    pub schema: Option<SchemaNode>,
    pub value: Value,
    /// Child views already produced by the surrounding framework.
    pub children: Value,
    /// Values of the fields this one depends on.
    pub depend_values: Vec<Value>,
    pub read_only: bool,
    pub disabled: bool,
    pub data_path: String,
    pub data_index: Vec<usize>,
    pub on_change: OnChange,
    pub get_value: GetValue,
}

impl RenderInputs {
    #[must_use]
    pub fn new(schema: SchemaNode, value: Value) -> Self {
        Self {
            schema: Some(schema),
            value,
            children: Value::Null,
            depend_values: Vec::new(),
            read_only: false,
            disabled: false,
            data_path: String::new(),
            data_index: Vec::new(),
            on_change: noop_on_change(),
            get_value: noop_get_value(),
        }
    }

    #[must_use]
    pub fn with_read_only(mut self, read_only: bool) -> Self {
        self.read_only = read_only;
        self
    }

    #[must_use]
    pub fn with_disabled(mut self, disabled: bool) -> Self {
        self.disabled = disabled;
        self
    }

    #[must_use]
    pub fn with_depend_values(mut self, depend_values: Vec<Value>) -> Self {
        self.depend_values = depend_values;
        self
    }

    #[must_use]
    pub fn with_data_path(mut self, data_path: impl Into<String>) -> Self {
        self.data_path = data_path.into();
        self
    }

    #[must_use]
    pub fn with_data_index(mut self, data_index: Vec<usize>) -> Self {
        self.data_index = data_index;
        self
    }

    #[must_use]
    pub fn with_children(mut self, children: Value) -> Self {
        self.children = children;
        self
    }

    #[must_use]
    pub fn with_on_change(mut self, on_change: OnChange) -> Self {
        self.on_change = on_change;
        self
    }

    #[must_use]
    pub fn with_get_value(mut self, get_value: GetValue) -> Self {
        self.get_value = get_value;
        self
    }
}

// =============================================================================
// GATE
// =============================================================================

/// True when the previous render output can be reused as-is.
///
/// Decision order:
/// 1. the root node (next `$id` is `"#"`) never skips,
/// 2. both sides hidden always skips,
/// 3. a changed `read_only` or `disabled` flag never skips,
/// 4. changed dependency values never skip,
/// 5. object-type containers never skip (children change independently),
/// 6. otherwise skip only when serialized value and schema are both unchanged.
#[must_use]
pub fn should_skip_update(prev: &RenderInputs, next: &RenderInputs) -> bool {
    let skip = decide(prev, next);
    debug!(
        skip,
        id = next.schema.as_ref().and_then(SchemaNode::id).unwrap_or(""),
        "change gate"
    );
    skip
}

fn decide(prev: &RenderInputs, next: &RenderInputs) -> bool {
    if let (Some(prev_schema), Some(next_schema)) = (&prev.schema, &next.schema) {
        if next_schema.id() == Some(ROOT_ID) {
            return false;
        }
        if prev_schema.hidden() && next_schema.hidden() {
            return true;
        }
    }
    if prev.read_only != next.read_only {
        return false;
    }
    if prev.disabled != next.disabled {
        return false;
    }
    if stable_json(&prev.depend_values) != stable_json(&next.depend_values) {
        return false;
    }
    if prev.schema.as_ref().is_some_and(SchemaNode::is_obj_type)
        && next.schema.as_ref().is_some_and(SchemaNode::is_obj_type)
    {
        return false;
    }
    stable_json(&prev.value) == stable_json(&next.value)
        && stable_json(&prev.schema) == stable_json(&next.schema)
}

#[cfg(test)]
#[path = "gate_test.rs"]
mod tests;
