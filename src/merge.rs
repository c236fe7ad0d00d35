//! Prop merging: fold overlapping configuration sources into one prop set.
//!
//! DESIGN
//! ======
//! Merge precedence, later wins on key collision:
//! 1. schema fields unioned with the widget's extra-schema fragment, placed
//!    under the `"schema"` key (the fragment wins inside the union),
//! 2. core value props: `value`, `children`, `disabled`, `readOnly`,
//! 3. the schema's own `props` sub-object,
//! 4. store-level global props.
//! After the bulk merges come the field-specific rules: the string `max`
//! to `maxLength` copy, the forced-presence copies, the `*props*` wildcard
//! copy, addon instantiation, the addons bundle, and the final transform
//! hook. The merge itself has no side effects; the `hide_self` callback it
//! hands out mutates external state only when a widget later invokes it.

use std::fmt;
use std::sync::Arc;

use serde_json::Value;
use tracing::warn;

use crate::gate::RenderInputs;
use crate::schema::{PropMap, SchemaNode, is_object, is_truthy};
use crate::tools::{Addons, OnChange, Store, Tools};

// =============================================================================
// TYPES
// =============================================================================

/// The merged configuration handed to the chosen widget. Built fresh per
/// invocation, never persisted.
pub struct ResolvedProps {
    /// JSON-expressible configuration, key collisions resolved by merge order.
    pub fields: PropMap,
    /// Change notification for the field's value.
    pub on_change: OnChange,
    /// Ambient tooling bundle.
    pub addons: Addons,
}

impl fmt::Debug for ResolvedProps {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ResolvedProps")
            .field("fields", &self.fields)
            .field("addons", &self.addons)
            .finish_non_exhaustive()
    }
}

/// Schema fields guaranteed to survive the generic merges whenever the
/// schema declares them (with a truthy value).
const FORCED_KEYS: [&str; 4] = ["title", "placeholder", "disabled", "format"];

/// Keys containing this substring (case-insensitive) and longer than it are
/// copied verbatim, so schema authors can attach widget-specific nested
/// configuration such as `datePickerProps` without resolver support.
const WILDCARD_NEEDLE: &str = "props";

// =============================================================================
// MERGE
// =============================================================================

/// Merge every configuration source for one field into a single prop set.
#[must_use]
pub fn merge(
    schema: &SchemaNode,
    widget_name: &str,
    inputs: &RenderInputs,
    tools: &Tools,
    store: &Store,
) -> ResolvedProps {
    let mut fields = PropMap::new();

    // 1. Schema fields plus the widget's extra fragment, fragment wins.
    let mut schema_entry = schema.fields().clone();
    if let Some(extra) = tools.extra_schemas.get(widget_name) {
        for (key, value) in extra {
            schema_entry.insert(key.clone(), value.clone());
        }
    }
    fields.insert("schema".into(), Value::Object(schema_entry));

    // 2. Core value props. `onChange` rides as the typed member below.
    fields.insert("value".into(), inputs.value.clone());
    fields.insert("children".into(), inputs.children.clone());
    fields.insert("disabled".into(), Value::Bool(inputs.disabled));
    fields.insert("readOnly".into(), Value::Bool(inputs.read_only));

    // 3. Schema-declared `props` sub-object.
    if let Some(props) = schema.props() {
        for (key, value) in props {
            fields.insert(key.clone(), value.clone());
        }
    }

    // 4. Global props win over everything merged so far.
    for (key, value) in &store.global_props {
        fields.insert(key.clone(), value.clone());
    }

    // 5. String fields with a numeric max get a length limit.
    if schema.ty() == Some("string") {
        if let Some(max) = schema.get("max").filter(|v| v.is_number()) {
            fields.insert("maxLength".into(), max.clone());
        }
    }

    // 6. Forced-presence copies: never silently dropped by the bulk merges.
    for key in FORCED_KEYS {
        if let Some(value) = schema.get(key).filter(|v| is_truthy(v)) {
            fields.insert(key.into(), value.clone());
        }
    }

    // 7. Wildcard copy of `*props*` keys longer than the literal needle.
    for (key, value) in schema.fields() {
        if key.len() > WILDCARD_NEEDLE.len() && key.to_lowercase().contains(WILDCARD_NEEDLE) {
            fields.insert(key.clone(), value.clone());
        }
    }

    let addons = build_addons(schema, inputs, tools);

    // 8. `addonAfter` may itself name a widget; instantiate it eagerly from
    //    the outer schema's own fields via a direct registry lookup.
    instantiate_addon_after(&mut fields, schema, inputs, tools, &addons);

    let props = ResolvedProps { fields, on_change: inputs.on_change.clone(), addons };

    // 10. Final pluggable adjustment.
    match &store.transform_props {
        Some(transform) => transform(props),
        None => props,
    }
}

// =============================================================================
// ADDONS
// =============================================================================

/// 9. The `addons` bundle: ambient tooling, accessors, dependency values,
/// path context, and the `hide_self` callback keyed by the schema's `$id`.
fn build_addons(schema: &SchemaNode, inputs: &RenderInputs, tools: &Tools) -> Addons {
    let hide_self = {
        let set_schema = tools.set_schema_by_path.clone();
        let id = schema.id().map(ToOwned::to_owned);
        Arc::new(move |hidden: bool| {
            let Some(id) = id.as_deref() else {
                warn!("hide_self on a schema without $id, ignoring");
                return;
            };
            let mut patch = PropMap::new();
            patch.insert("hidden".into(), Value::Bool(hidden));
            set_schema(id, patch);
        })
    };

    Addons {
        widgets: tools.widgets.clone(),
        mapping: tools.mapping.clone(),
        get_value: inputs.get_value.clone(),
        set_value: tools.set_value_by_path.clone(),
        set_schema: tools.set_schema_by_path.clone(),
        depend_values: inputs.depend_values.clone(),
        data_path: inputs.data_path.clone(),
        data_index: inputs.data_index.clone(),
        hide_self,
    }
}

fn instantiate_addon_after(
    fields: &mut PropMap,
    schema: &SchemaNode,
    inputs: &RenderInputs,
    tools: &Tools,
    addons: &Addons,
) {
    let addon_widget = fields
        .get("addonAfter")
        .filter(|value| is_object(value))
        .and_then(|value| value.get("widget"))
        .and_then(Value::as_str)
        .map(ToOwned::to_owned);
    let Some(name) = addon_widget else {
        return;
    };

    match tools.widgets.ready(&name) {
        Some(widget) => {
            let addon_props = ResolvedProps {
                fields: schema.fields().clone(),
                on_change: inputs.on_change.clone(),
                addons: addons.clone(),
            };
            let view = widget.render(&addon_props);
            fields.insert("addonAfter".into(), view);
        }
        // Missing or still loading: leave the raw object in place.
        None => warn!(widget = %name, "addonAfter widget not ready"),
    }
}

#[cfg(test)]
#[path = "merge_test.rs"]
mod tests;
