//! Canonical record templates (PICK and LOCATION).

mod catalog;
mod types;

pub use catalog::{template_for, LOCATION, PICK};
pub use types::{FieldType, SchemaKind, Template, TemplateField};
