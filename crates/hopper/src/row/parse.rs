//! Applying a resolved mapping to one raw row.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::coerce::{classify_extra, coerce_number, coerce_text, DimensionType, NumberPolicy};
use crate::input::{CellValue, RawRow};
use crate::mapping::ColumnMapping;
use crate::template::{template_for, SchemaKind, Template};

/// A preserved, typed, unmapped column value for one row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExtraDimension {
    /// Client column name.
    pub name: String,
    /// Original value rendering.
    pub value: String,
    /// Inferred type tag.
    pub data_type: DimensionType,
}

/// One canonical pick-list record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PickRow {
    pub order_number: String,
    pub article_number: String,
    pub description: String,
    pub quantity: f64,
    pub unit: String,
    pub location: String,
    pub pick_date: String,
    /// Unmapped, non-empty client columns preserved for this row.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub extra_dimensions: Vec<ExtraDimension>,
}

/// One canonical warehouse-location record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LocationRow {
    pub location_code: String,
    pub description: String,
    pub zone: String,
    pub aisle: String,
    pub bay: String,
    pub level: String,
    /// Fractional slot layout, e.g. "0.25-0.25-0.25-0.25". Preserved
    /// verbatim; layout semantics are the downstream grouper's concern.
    pub capacity_layout: String,
    pub max_weight: f64,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub extra_dimensions: Vec<ExtraDimension>,
}

/// A type-coerced canonical record of either schema.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "schema", rename_all = "snake_case")]
pub enum ParsedRow {
    Pick(PickRow),
    Location(LocationRow),
}

impl ParsedRow {
    /// Which canonical schema this row belongs to.
    pub fn schema_kind(&self) -> SchemaKind {
        match self {
            ParsedRow::Pick(_) => SchemaKind::Pick,
            ParsedRow::Location(_) => SchemaKind::Location,
        }
    }

    /// The row's preserved extra dimensions.
    pub fn extra_dimensions(&self) -> &[ExtraDimension] {
        match self {
            ParsedRow::Pick(row) => &row.extra_dimensions,
            ParsedRow::Location(row) => &row.extra_dimensions,
        }
    }
}

/// Row-level parse failure. Under [`NumberPolicy::DefaultZero`] this never
/// occurs; under the stricter policies the orchestrator decides whether it
/// skips the row or aborts the run.
#[derive(Debug, Clone, Error)]
#[error("column '{column}' has non-numeric value '{value}'")]
pub struct RowError {
    pub column: String,
    pub value: String,
}

/// Applies a resolved column mapping to raw rows.
pub struct RowParser<'a> {
    mapping: &'a ColumnMapping,
    template: &'static Template,
    policy: NumberPolicy,
}

impl<'a> RowParser<'a> {
    pub fn new(kind: SchemaKind, mapping: &'a ColumnMapping, policy: NumberPolicy) -> Self {
        Self {
            mapping,
            template: template_for(kind),
            policy,
        }
    }

    /// Convert one raw row into a canonical record plus extra dimensions.
    pub fn parse(&self, row: &RawRow) -> Result<ParsedRow, RowError> {
        // Pull mapped values under their canonical keys first.
        let mut canonical: IndexMap<&str, &CellValue> = IndexMap::new();
        for (client_column, field_name) in self.mapping {
            if let Some(value) = row.get(client_column) {
                canonical.insert(field_name.as_str(), value);
            }
        }

        // Everything the mapping did not consume, and that is not itself a
        // canonical field name, survives as an extra dimension.
        let mut extra_dimensions = Vec::new();
        for (column, value) in row {
            if self.mapping.contains_key(column) || self.template.is_canonical_field(column) {
                continue;
            }
            if let Some((value, data_type)) = classify_extra(value) {
                extra_dimensions.push(ExtraDimension {
                    name: column.clone(),
                    value,
                    data_type,
                });
            }
        }

        let text = |field: &str| coerce_text(canonical.get(field).copied());
        let number = |field: &str| -> Result<f64, RowError> {
            match coerce_number(canonical.get(field).copied()) {
                Ok(n) => Ok(n),
                Err(_) if self.policy == NumberPolicy::DefaultZero => Ok(0.0),
                Err(value) => Err(RowError {
                    column: field.to_string(),
                    value,
                }),
            }
        };

        let parsed = match self.template.kind {
            SchemaKind::Pick => ParsedRow::Pick(PickRow {
                order_number: text("order_number"),
                article_number: text("article_number"),
                description: text("description"),
                quantity: number("quantity")?,
                unit: text("unit"),
                location: text("location"),
                pick_date: text("pick_date"),
                extra_dimensions,
            }),
            SchemaKind::Location => ParsedRow::Location(LocationRow {
                location_code: text("location_code"),
                description: text("description"),
                zone: text("zone"),
                aisle: text("aisle"),
                bay: text("bay"),
                level: text("level"),
                capacity_layout: text("capacity_layout"),
                max_weight: number("max_weight")?,
                extra_dimensions,
            }),
        };

        Ok(parsed)
    }
}
