//! Widget resolution: pick the widget name for one schema node.

use tracing::debug;

use crate::registry::{WidgetMapping, WidgetRegistry};
use crate::schema::SchemaNode;

/// Read-only presentation widget used when the schema declares none.
pub const READ_ONLY_FALLBACK: &str = "html";

/// Outcome of resolution. `NotFound` renders a diagnostic view; it is never
/// substituted with a placeholder name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    Widget(String),
    NotFound,
}

/// Resolve the widget name for a schema node.
///
/// Precedence:
/// 1. type-based default from the mapping,
/// 2. schema-declared `widget`/`ui:widget`, if registered,
/// 3. read-only substitution for non-container fields.
///
/// Containers (object and list types) keep their structural widget under
/// `read_only` so their children can still render.
#[must_use]
pub fn resolve(
    schema: &SchemaNode,
    registry: &WidgetRegistry,
    mapping: &WidgetMapping,
    read_only: bool,
) -> Resolution {
    let mut name: Option<String> = mapping.widget_name(schema).map(ToOwned::to_owned);

    if let Some(custom) = schema.declared_widget() {
        if registry.contains(custom) {
            name = Some(custom.to_owned());
        }
    }

    if read_only && !schema.is_obj_type() && !schema.is_list_type() {
        name = Some(
            schema
                .read_only_widget()
                .unwrap_or(READ_ONLY_FALLBACK)
                .to_owned(),
        );
    }

    match name {
        Some(name) => {
            debug!(widget = %name, id = schema.id().unwrap_or(""), "resolved widget");
            Resolution::Widget(name)
        }
        None => {
            debug!(id = schema.id().unwrap_or(""), "no widget matched schema");
            Resolution::NotFound
        }
    }
}

// =============================================================================
// TESTS
// =============================================================================
