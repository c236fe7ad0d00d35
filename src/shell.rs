//! Render shell: gate, resolve, merge, and mount one field.
//!
//! DESIGN
//! ======
//! The shell is the only place the three pure stages meet. The change gate
//! runs first and, on a skip, nothing downstream executes: no resolution,
//! no merge, no widget instantiation. Every failure mode degrades to a
//! diagnostic view carrying the serialized schema; the shell never panics
//! and never returns an error to the caller.

use serde_json::Value;
use tracing::{debug, warn};

use crate::gate::{RenderInputs, should_skip_update};
use crate::merge::merge;
use crate::registry::WidgetSlot;
use crate::resolve::{Resolution, resolve};
use crate::schema::{SchemaNode, stable_json};
use crate::tools::{Store, Tools};

// =============================================================================
// TYPES
// =============================================================================

/// Container class every mounted field is wrapped in.
pub const ITEM_WRAPPER_CLASS: &str = "ff-item-wrapper";

/// Internal failure taxonomy. Converted to [`FieldView::Diagnostic`] at the
/// shell boundary, never propagated.
#[derive(Debug, thiserror::Error)]
enum MountError {
    #[error("schema did not match a widget")]
    Unresolved,
    #[error("widget not registered: {0}")]
    UnknownWidget(String),
}

/// What one field render produced.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldView {
    /// The resolved widget's view inside the container wrapper.
    Mounted {
        wrapper_class: &'static str,
        widget: String,
        view: Value,
    },
    /// The widget slot is still loading; an empty stand-in mounts instead.
    Placeholder,
    /// No widget could be resolved; exposes the raw schema for debugging.
    Diagnostic { message: String, schema_json: String },
}

/// Result of a candidate re-invocation.
#[derive(Debug, Clone, PartialEq)]
pub enum RenderOutcome {
    /// The previous output is still valid; nothing was instantiated.
    Skipped,
    Rendered(FieldView),
}

// =============================================================================
// PIPELINE
// =============================================================================

/// Run the full per-field pipeline for a candidate re-invocation.
///
/// With a previous input set the change gate is consulted first; a skip
/// short-circuits the whole pipeline. Without one (first render) the field
/// always mounts.
#[must_use]
pub fn render_field(
    prev: Option<&RenderInputs>,
    next: &RenderInputs,
    tools: &Tools,
    store: &Store,
) -> RenderOutcome {
    if let Some(prev) = prev {
        if should_skip_update(prev, next) {
            return RenderOutcome::Skipped;
        }
    }
    RenderOutcome::Rendered(mount(next, tools, store))
}

/// Resolve, merge, and instantiate one field, gate-free.
#[must_use]
pub fn mount(inputs: &RenderInputs, tools: &Tools, store: &Store) -> FieldView {
    let schema = inputs.schema.clone().unwrap_or_default();
    match mount_inner(&schema, inputs, tools, store) {
        Ok(view) => view,
        Err(err) => {
            warn!(error = %err, id = schema.id().unwrap_or(""), "rendering diagnostic view");
            FieldView::Diagnostic {
                message: err.to_string(),
                schema_json: stable_json(&schema),
            }
        }
    }
}

fn mount_inner(
    schema: &SchemaNode,
    inputs: &RenderInputs,
    tools: &Tools,
    store: &Store,
) -> Result<FieldView, MountError> {
    let name = match resolve(schema, &tools.widgets, &tools.mapping, inputs.read_only) {
        Resolution::Widget(name) => name,
        Resolution::NotFound => return Err(MountError::Unresolved),
    };

    let slot = tools
        .widgets
        .slot(&name)
        .ok_or_else(|| MountError::UnknownWidget(name.clone()))?;

    match slot {
        WidgetSlot::Pending => {
            debug!(widget = %name, "widget still loading, mounting placeholder");
            Ok(FieldView::Placeholder)
        }
        WidgetSlot::Ready(widget) => {
            let props = merge(schema, &name, inputs, tools, store);
            let view = widget.render(&props);
            Ok(FieldView::Mounted { wrapper_class: ITEM_WRAPPER_CLASS, widget: name, view })
        }
    }
}

#[cfg(test)]
#[path = "shell_test.rs"]
mod tests;
