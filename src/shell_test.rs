//! Tests for the render shell pipeline.

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use serde_json::{Value, json};

use super::{FieldView, ITEM_WRAPPER_CLASS, RenderOutcome, mount, render_field};
use crate::gate::RenderInputs;
use crate::merge::ResolvedProps;
use crate::schema::{SchemaNode, stable_json};
use crate::tools::test_helpers::{test_tools, test_tools_with_pending};
use crate::tools::Store;

fn inputs(schema: Value, value: Value) -> RenderInputs {
    RenderInputs::new(SchemaNode::from_value(schema), value)
}

// =============================================================================
// MOUNT
// =============================================================================

#[test]
fn mount_wraps_the_resolved_widget() {
    let view = mount(&inputs(json!({"type": "string"}), json!("ada")), &test_tools(), &Store::new());
    let FieldView::Mounted { wrapper_class, widget, view } = view else {
        panic!("expected mounted field, got {view:?}");
    };
    assert_eq!(wrapper_class, ITEM_WRAPPER_CLASS);
    assert_eq!(widget, "input");
    assert_eq!(view.pointer("/fields/value"), Some(&json!("ada")));
}

#[test]
fn unresolved_schema_mounts_a_diagnostic() {
    let schema = json!({"type": "mystery", "title": "What"});
    let view = mount(&inputs(schema.clone(), json!(null)), &test_tools(), &Store::new());
    let FieldView::Diagnostic { schema_json, .. } = view else {
        panic!("expected diagnostic, got {view:?}");
    };
    // The diagnostic exposes the exact serialized schema.
    assert_eq!(schema_json, stable_json(&SchemaNode::from_value(schema)));
}

#[test]
fn resolved_but_unregistered_name_mounts_a_diagnostic() {
    // Read-only forces the "html" fallback; a registry without it must
    // degrade instead of panicking.
    let mut tools = test_tools();
    tools.widgets = crate::registry::WidgetRegistry::new();
    tools.widgets.register("input", |_: &ResolvedProps| json!("input"));

    let next = inputs(json!({"type": "string"}), json!(null)).with_read_only(true);
    let view = mount(&next, &tools, &Store::new());
    assert!(matches!(view, FieldView::Diagnostic { .. }), "got {view:?}");
}

#[test]
fn missing_schema_mounts_a_diagnostic() {
    let mut next = inputs(json!({}), json!(null));
    next.schema = None;
    let view = mount(&next, &test_tools(), &Store::new());
    let FieldView::Diagnostic { schema_json, .. } = view else {
        panic!("expected diagnostic, got {view:?}");
    };
    assert_eq!(schema_json, "{}");
}

#[test]
fn pending_slot_mounts_a_placeholder() {
    let tools = test_tools_with_pending("chart");
    let next = inputs(json!({"type": "string", "widget": "chart"}), json!(null));
    assert_eq!(mount(&next, &tools, &Store::new()), FieldView::Placeholder);
}

#[test]
fn read_only_field_mounts_the_presentation_widget() {
    let next = inputs(json!({"type": "string"}), json!("ada")).with_read_only(true);
    let view = mount(&next, &test_tools(), &Store::new());
    let FieldView::Mounted { widget, .. } = view else {
        panic!("expected mounted field, got {view:?}");
    };
    assert_eq!(widget, "html");
}

// =============================================================================
// GATED PIPELINE
// =============================================================================

/// Registry whose only widget counts its instantiations.
fn counting_tools(counter: Arc<AtomicUsize>) -> crate::tools::Tools {
    let mut tools = test_tools();
    tools.widgets.register("input", move |_: &ResolvedProps| {
        counter.fetch_add(1, Ordering::SeqCst);
        json!("counted")
    });
    tools
}

#[test]
fn first_render_always_mounts() {
    let next = inputs(json!({"$id": "#/a", "type": "string"}), json!("x"));
    let outcome = render_field(None, &next, &test_tools(), &Store::new());
    assert!(matches!(outcome, RenderOutcome::Rendered(FieldView::Mounted { .. })));
}

#[test]
fn skip_prevents_widget_instantiation() {
    let counter = Arc::new(AtomicUsize::new(0));
    let tools = counting_tools(counter.clone());

    let prev = inputs(json!({"$id": "#/a", "type": "string"}), json!("x"));
    let next = prev.clone();
    let outcome = render_field(Some(&prev), &next, &tools, &Store::new());
    assert_eq!(outcome, RenderOutcome::Skipped);
    assert_eq!(counter.load(Ordering::SeqCst), 0);
}

#[test]
fn changed_value_renders_through_the_gate() {
    let counter = Arc::new(AtomicUsize::new(0));
    let tools = counting_tools(counter.clone());

    let prev = inputs(json!({"$id": "#/a", "type": "string"}), json!("x"));
    let next = inputs(json!({"$id": "#/a", "type": "string"}), json!("y"));
    let outcome = render_field(Some(&prev), &next, &tools, &Store::new());
    assert!(matches!(outcome, RenderOutcome::Rendered(_)));
    assert_eq!(counter.load(Ordering::SeqCst), 1);
}

#[test]
fn root_field_renders_even_when_nothing_changed() {
    let prev = inputs(json!({"$id": "#", "type": "string"}), json!("x"));
    let next = prev.clone();
    let outcome = render_field(Some(&prev), &next, &test_tools(), &Store::new());
    assert!(matches!(outcome, RenderOutcome::Rendered(_)));
}

#[test]
fn hidden_field_skips_even_when_value_changed() {
    let prev = inputs(json!({"$id": "#/a", "type": "string", "hidden": true}), json!("x"));
    let next = inputs(json!({"$id": "#/a", "type": "string", "hidden": true}), json!("y"));
    let outcome = render_field(Some(&prev), &next, &test_tools(), &Store::new());
    assert_eq!(outcome, RenderOutcome::Skipped);
}
