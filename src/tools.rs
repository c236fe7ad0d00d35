//! Ambient tooling threaded through every field render.
//!
//! DESIGN
//! ======
//! The core never reaches into ambient state. Everything a field render
//! needs arrives explicitly: the [`Tools`] bundle carries the widget
//! registry, the type mapping, and the two path-scoped store mutators; the
//! [`Store`] carries store-level prop defaults and the final transform hook.
//! Both mutators are fire-and-forget: the core requests the write and never
//! awaits or verifies it.

use std::fmt;
use std::sync::Arc;

use serde_json::Value;

use crate::merge::ResolvedProps;
use crate::registry::{ExtraSchemaTable, WidgetMapping, WidgetRegistry};
use crate::schema::PropMap;

// =============================================================================
// CALLBACK ALIASES
// =============================================================================

/// Write a value at a data path.
pub type SetValueByPath = Arc<dyn Fn(&str, Value) + Send + Sync>;

/// Patch the schema node identified by its `$id`.
pub type SetSchemaByPath = Arc<dyn Fn(&str, PropMap) + Send + Sync>;

/// Read the value at a data path.
pub type GetValue = Arc<dyn Fn(&str) -> Option<Value> + Send + Sync>;

/// Change notification for the field's own value.
pub type OnChange = Arc<dyn Fn(Value) + Send + Sync>;

/// Pluggable final adjustment of a merged prop set.
pub type TransformProps = Arc<dyn Fn(ResolvedProps) -> ResolvedProps + Send + Sync>;

#[must_use]
pub fn noop_on_change() -> OnChange {
    Arc::new(|_| {})
}

#[must_use]
pub fn noop_get_value() -> GetValue {
    Arc::new(|_| None)
}

// =============================================================================
// TOOLS
// =============================================================================

/// Capability bundle shared by every field of one form.
#[derive(Clone)]
pub struct Tools {
    pub widgets: WidgetRegistry,
    pub mapping: WidgetMapping,
    pub extra_schemas: ExtraSchemaTable,
    pub set_value_by_path: SetValueByPath,
    pub set_schema_by_path: SetSchemaByPath,
}

impl Tools {
    /// Bundle with no-op mutators. Swap in real ones with the builders.
    #[must_use]
    pub fn new(widgets: WidgetRegistry, mapping: WidgetMapping) -> Self {
        Self {
            widgets,
            mapping,
            extra_schemas: ExtraSchemaTable::new(),
            set_value_by_path: Arc::new(|_, _| {}),
            set_schema_by_path: Arc::new(|_, _| {}),
        }
    }

    #[must_use]
    pub fn with_extra_schemas(mut self, extra_schemas: ExtraSchemaTable) -> Self {
        self.extra_schemas = extra_schemas;
        self
    }

    #[must_use]
    pub fn with_set_value_by_path(mut self, f: SetValueByPath) -> Self {
        self.set_value_by_path = f;
        self
    }

    #[must_use]
    pub fn with_set_schema_by_path(mut self, f: SetSchemaByPath) -> Self {
        self.set_schema_by_path = f;
        self
    }
}

// =============================================================================
// STORE
// =============================================================================

/// Store-level ambient configuration.
#[derive(Clone, Default)]
pub struct Store {
    /// Applied to every widget; wins over schema-declared `props`.
    pub global_props: PropMap,
    /// Applied last, after the whole merge.
    pub transform_props: Option<TransformProps>,
}

impl Store {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_global_props(mut self, global_props: PropMap) -> Self {
        self.global_props = global_props;
        self
    }

    #[must_use]
    pub fn with_transform_props(mut self, f: TransformProps) -> Self {
        self.transform_props = Some(f);
        self
    }
}

// =============================================================================
// ADDONS
// =============================================================================

/// Auxiliary capability bundle handed to widgets under `addons`.
///
/// Carries the whole ambient tooling set plus per-field context so widgets
/// can read and write form state, or reach the registry and type mapping,
/// without receiving props they do not declare.
#[derive(Clone)]
pub struct Addons {
    pub widgets: WidgetRegistry,
    pub mapping: WidgetMapping,
    pub get_value: GetValue,
    pub set_value: SetValueByPath,
    pub set_schema: SetSchemaByPath,
    pub depend_values: Vec<Value>,
    pub data_path: String,
    pub data_index: Vec<usize>,
    /// Path-scoped visibility update for the field's own schema node.
    pub hide_self: Arc<dyn Fn(bool) + Send + Sync>,
}

impl fmt::Debug for Addons {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Addons")
            .field("depend_values", &self.depend_values)
            .field("data_path", &self.data_path)
            .field("data_index", &self.data_index)
            .finish_non_exhaustive()
    }
}

// =============================================================================
// TEST HELPERS
// =============================================================================


// =============================================================================
// TESTS
// =============================================================================
