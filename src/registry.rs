//! Widget registry: name to widget capability, with explicit load state.
//!
//! DESIGN
//! ======
//! Widgets are dispatched by string name through an explicit mapping, never
//! by reflection. A widget that loads asynchronously registers as `Pending`
//! and flips to `Ready` once its implementation arrives; the render shell
//! mounts a placeholder for pending slots instead of suspending.

use std::collections::HashMap;
use std::sync::Arc;

use serde_json::Value;

use crate::merge::ResolvedProps;
use crate::schema::{PropMap, SchemaNode};

// =============================================================================
// WIDGET CAPABILITY
// =============================================================================

/// A renderable unit for one schema node. Receives the fully merged prop set
/// and produces a JSON view-tree description.
pub trait Widget: Send + Sync {
    fn render(&self, props: &ResolvedProps) -> Value;
}

impl<F> Widget for F
where
    F: Fn(&ResolvedProps) -> Value + Send + Sync,
{
    fn render(&self, props: &ResolvedProps) -> Value {
        self(props)
    }
}

// =============================================================================
// REGISTRY
// =============================================================================

/// Load state of one registry slot.
#[derive(Clone)]
pub enum WidgetSlot {
    /// Declared but still loading. Mounts as a placeholder.
    Pending,
    Ready(Arc<dyn Widget>),
}

/// Shared name-to-widget mapping. Read-only from the core's perspective.
#[derive(Clone, Default)]
pub struct WidgetRegistry {
    slots: HashMap<String, WidgetSlot>,
}

impl WidgetRegistry {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&mut self, name: impl Into<String>, widget: impl Widget + 'static) {
        self.slots.insert(name.into(), WidgetSlot::Ready(Arc::new(widget)));
    }

    /// Declare a widget whose implementation has not arrived yet.
    pub fn register_pending(&mut self, name: impl Into<String>) {
        self.slots.insert(name.into(), WidgetSlot::Pending);
    }

    /// A pending or ready slot both count as "exists" for resolution.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.slots.contains_key(name)
    }

    #[must_use]
    pub fn slot(&self, name: &str) -> Option<&WidgetSlot> {
        self.slots.get(name)
    }

    /// The widget implementation, only if its slot is ready.
    #[must_use]
    pub fn ready(&self, name: &str) -> Option<Arc<dyn Widget>> {
        match self.slots.get(name) {
            Some(WidgetSlot::Ready(widget)) => Some(widget.clone()),
            _ => None,
        }
    }
}

// =============================================================================
// TYPE MAPPING
// =============================================================================

/// Type-based default resolution: schema type (and format) to widget name.
///
/// Lookup order for a schema: `"{type}:{format}"`, then `"{type}"`, then the
/// catch-all `"*"` entry.
#[derive(Clone, Default)]
pub struct WidgetMapping {
    entries: HashMap<String, String>,
}

impl WidgetMapping {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, key: impl Into<String>, widget: impl Into<String>) {
        self.entries.insert(key.into(), widget.into());
    }

    /// The default widget name for a schema, if the mapping knows its type.
    #[must_use]
    pub fn widget_name(&self, schema: &SchemaNode) -> Option<&str> {
        if let (Some(ty), Some(format)) = (schema.ty(), schema.format()) {
            if let Some(name) = self.entries.get(&format!("{ty}:{format}")) {
                return Some(name);
            }
        }
        if let Some(ty) = schema.ty() {
            if let Some(name) = self.entries.get(ty) {
                return Some(name);
            }
        }
        self.entries.get("*").map(String::as_str)
    }
}

/// Supplemental schema fragment per widget name, merged in before user
/// overrides.
pub type ExtraSchemaTable = HashMap<String, PropMap>;

// =============================================================================
// TESTS
// =============================================================================
