//! Form-field widget resolution, prop merging, and render gating.
//!
//! ARCHITECTURE
//! ============
//! One schema node flows through three pure stages. [`resolve::resolve`]
//! picks the widget name from the type mapping, the schema's declared
//! widget, and the read-only substitution rules. [`merge::merge`] folds the
//! overlapping configuration sources (schema, extra fragments, callbacks,
//! global props) into one prop set. [`shell::render_field`] wraps the result
//! in a mount point, after [`gate::should_skip_update`] has had the chance
//! to short-circuit the whole pipeline.
//!
//! The surrounding framework, the widget implementations, and the
//! schema-path mutation store are external collaborators reached through
//! [`tools::Tools`] and [`tools::Store`]. The core holds no state across
//! invocations and never panics: unresolvable schemas degrade to a
//! diagnostic view carrying their serialized form.

pub mod gate;
pub mod merge;
pub mod registry;
pub mod resolve;
pub mod schema;
pub mod shell;
pub mod tools;

pub use gate::{RenderInputs, should_skip_update};
pub use merge::{ResolvedProps, merge};
pub use registry::{ExtraSchemaTable, Widget, WidgetMapping, WidgetRegistry, WidgetSlot};
pub use resolve::{READ_ONLY_FALLBACK, Resolution, resolve};
pub use schema::{PropMap, ROOT_ID, SchemaNode, is_object, is_truthy};
pub use shell::{FieldView, ITEM_WRAPPER_CLASS, RenderOutcome, mount, render_field};
pub use tools::{Addons, Store, Tools};
