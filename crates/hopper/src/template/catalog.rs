//! The two canonical templates and their synonym dictionaries.
//!
//! Synonyms cover the column names seen in real client files, English and
//! Dutch. They are matched after normalization, so spacing, casing, and
//! separator variants ("Order Number", "order_number", "ORDER-NUMBER") all
//! resolve to the same entry.

use super::types::{FieldType, SchemaKind, Template, TemplateField};

/// Pick-list template: 7 required fields.
pub static PICK: Template = Template {
    kind: SchemaKind::Pick,
    fields: &[
        TemplateField {
            name: "order_number",
            field_type: FieldType::Text,
            synonyms: &[
                "order number",
                "ordernumber",
                "order",
                "order nr",
                "ordernr",
                "ordernummer",
                "bestelnummer",
                "po number",
            ],
        },
        TemplateField {
            name: "article_number",
            field_type: FieldType::Text,
            synonyms: &[
                "article number",
                "article",
                "article nr",
                "sku",
                "item number",
                "item",
                "product code",
                "artikelnummer",
                "artikel",
                "artikelnr",
            ],
        },
        TemplateField {
            name: "description",
            field_type: FieldType::Text,
            synonyms: &[
                "description",
                "product description",
                "item description",
                "product name",
                "omschrijving",
                "beschrijving",
                "artikelomschrijving",
            ],
        },
        TemplateField {
            name: "quantity",
            field_type: FieldType::Number,
            synonyms: &[
                "quantity",
                "qty",
                "amount",
                "aantal",
                "hoeveelheid",
                "stuks",
                "qty ordered",
            ],
        },
        TemplateField {
            name: "unit",
            field_type: FieldType::Text,
            synonyms: &["unit", "uom", "unit of measure", "eenheid", "unit code"],
        },
        TemplateField {
            name: "location",
            field_type: FieldType::Text,
            synonyms: &[
                "location",
                "pick location",
                "locatie",
                "piklocatie",
                "magazijnlocatie",
                "bin",
            ],
        },
        TemplateField {
            name: "pick_date",
            field_type: FieldType::Text,
            synonyms: &[
                "pick date",
                "date",
                "datum",
                "pickdatum",
                "leverdatum",
                "delivery date",
                "ship date",
            ],
        },
    ],
};

/// Warehouse-location template: 8 required fields.
pub static LOCATION: Template = Template {
    kind: SchemaKind::Location,
    fields: &[
        TemplateField {
            name: "location_code",
            field_type: FieldType::Text,
            synonyms: &[
                "location code",
                "location",
                "locatiecode",
                "locatie",
                "location id",
                "loc code",
            ],
        },
        TemplateField {
            name: "description",
            field_type: FieldType::Text,
            synonyms: &["description", "omschrijving", "name", "naam", "label"],
        },
        TemplateField {
            name: "zone",
            field_type: FieldType::Text,
            synonyms: &["zone", "area", "zone code", "gebied"],
        },
        TemplateField {
            name: "aisle",
            field_type: FieldType::Text,
            synonyms: &["aisle", "gang", "corridor", "row", "rij"],
        },
        TemplateField {
            name: "bay",
            field_type: FieldType::Text,
            synonyms: &["bay", "vak", "section", "sectie", "bay number"],
        },
        TemplateField {
            name: "level",
            field_type: FieldType::Text,
            synonyms: &["level", "niveau", "tier", "shelf", "plank"],
        },
        TemplateField {
            name: "capacity_layout",
            field_type: FieldType::Text,
            synonyms: &[
                "capacity layout",
                "capacity",
                "layout",
                "capaciteit",
                "indeling",
                "capaciteitsindeling",
                "slot layout",
            ],
        },
        TemplateField {
            name: "max_weight",
            field_type: FieldType::Number,
            synonyms: &[
                "max weight",
                "maximum weight",
                "weight limit",
                "max gewicht",
                "gewicht",
                "draagvermogen",
                "weight capacity",
            ],
        },
    ],
};

/// The template for a schema kind.
pub fn template_for(kind: SchemaKind) -> &'static Template {
    match kind {
        SchemaKind::Pick => &PICK,
        SchemaKind::Location => &LOCATION,
    }
}
