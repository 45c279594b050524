//! Core type definitions for the canonical record templates.

use serde::{Deserialize, Serialize};

/// The two canonical record schemas a workbook can be imported into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SchemaKind {
    /// Pick-list rows: one article to pick, with quantity and location.
    Pick,
    /// Warehouse location rows: one physical slot and its layout.
    Location,
}

impl SchemaKind {
    /// All schema kinds, in tie-break order (PICK wins ties).
    pub const ALL: [SchemaKind; 2] = [SchemaKind::Pick, SchemaKind::Location];

    pub fn as_str(&self) -> &'static str {
        match self {
            SchemaKind::Pick => "pick",
            SchemaKind::Location => "location",
        }
    }
}

impl std::fmt::Display for SchemaKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Scalar type of a canonical field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldType {
    /// Free text; nulls coerce to the empty string.
    Text,
    /// Floating-point number; coercion policy applies on parse failure.
    Number,
}

/// One required field of a canonical template.
#[derive(Debug, Clone, Copy)]
pub struct TemplateField {
    /// Canonical field name.
    pub name: &'static str,
    /// Declared scalar type.
    pub field_type: FieldType,
    /// Accepted client-column synonyms (matched after normalization).
    pub synonyms: &'static [&'static str],
}

/// A fixed, ordered set of required fields.
#[derive(Debug, Clone, Copy)]
pub struct Template {
    /// Which schema this template describes.
    pub kind: SchemaKind,
    /// Required fields, in declaration order. Declaration order is part of
    /// the mapping contract: earlier fields claim headers first.
    pub fields: &'static [TemplateField],
}

impl Template {
    /// Look up a field by canonical name.
    pub fn field(&self, name: &str) -> Option<&TemplateField> {
        self.fields.iter().find(|f| f.name == name)
    }

    /// True if `name` is one of this template's canonical field names.
    pub fn is_canonical_field(&self, name: &str) -> bool {
        self.field(name).is_some()
    }

    /// Number of required fields.
    pub fn required_count(&self) -> usize {
        self.fields.len()
    }
}
