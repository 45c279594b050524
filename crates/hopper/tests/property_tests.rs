//! Property-based tests for Hopper.
//!
//! These tests use proptest to generate random inputs and verify that the
//! mapper and orchestrator maintain their invariants under all conditions:
//!
//! 1. **No panics**: arbitrary headers and cell data never crash a run
//! 2. **Determinism**: same input always produces the same output
//! 3. **Invariants**: counter arithmetic and confidence bounds always hold

use proptest::prelude::*;

use hopper::{
    mapping::{detect, detect_for, normalize, similarity, DEFAULT_SIMILARITY_THRESHOLD},
    ImportOptions, Importer, SchemaKind,
};

// =============================================================================
// Test Strategies
// =============================================================================

/// Arbitrary header-ish strings (separators, casing, punctuation).
fn header_like() -> impl Strategy<Value = String> {
    "[a-zA-Z0-9 _\\-\\.]{0,30}"
}

/// Cell values that exercise every classification branch.
fn cell_like() -> impl Strategy<Value = String> {
    prop_oneof![
        // Numeric, with optional thousands separator
        "[0-9]{1,3}(,[0-9]{3})?(\\.[0-9]{1,2})?",
        // Date-ish
        "[12][0-9]{3}-[01][0-9]-[0-3][0-9]",
        // Boolean-ish
        "(true|false|yes|no|True|FALSE)",
        // Free text (no delimiter or quote characters)
        "[a-zA-Z ]{0,20}",
    ]
}

/// A small CSV buffer with a known-good first column and random extras.
fn csv_buffer() -> impl Strategy<Value = Vec<u8>> {
    (
        prop::collection::vec(cell_like(), 1..40),
        prop::collection::vec(cell_like(), 1..40),
    )
        .prop_map(|(col_a, col_b)| {
            let mut out = String::from("Artikelnummer,opmerking\n");
            for (a, b) in col_a.iter().zip(col_b.iter()) {
                out.push_str(&format!("{a},{b}\n"));
            }
            out.into_bytes()
        })
}

// =============================================================================
// Normalization Properties
// =============================================================================

proptest! {
    /// Normalization is idempotent.
    #[test]
    fn prop_normalize_idempotent(input in header_like()) {
        let once = normalize(&input);
        let twice = normalize(&once);
        prop_assert_eq!(once, twice);
    }

    /// Normalized names contain only lowercase alphanumerics.
    #[test]
    fn prop_normalize_alphanumeric(input in header_like()) {
        let normalized = normalize(&input);
        prop_assert!(normalized
            .chars()
            .all(|c| c.is_alphanumeric() && !c.is_uppercase()));
    }

    /// Similarity is bounded, symmetric, and exact on equal inputs.
    #[test]
    fn prop_similarity_bounds(a in header_like(), b in header_like()) {
        let na = normalize(&a);
        let nb = normalize(&b);
        let forward = similarity(&na, &nb);
        let backward = similarity(&nb, &na);

        prop_assert!((0.0..=1.0).contains(&forward));
        prop_assert_eq!(forward, backward);
        prop_assert_eq!(similarity(&na, &na), 1.0);
    }
}

// =============================================================================
// Mapper Properties
// =============================================================================

proptest! {
    /// Detection never panics, never proposes below-threshold matches, and
    /// claims each header at most once. Headers are generated unique so the
    /// claimed-set check can compare by name.
    #[test]
    fn prop_detection_invariants(
        header_set in prop::collection::hash_set(header_like(), 0..12),
    ) {
        let headers: Vec<String> = header_set.into_iter().collect();
        for kind in SchemaKind::ALL {
            let report = detect_for(kind, &headers, DEFAULT_SIMILARITY_THRESHOLD);

            for mapping in &report.mappings {
                prop_assert!(mapping.confidence >= DEFAULT_SIMILARITY_THRESHOLD);
                prop_assert!(mapping.confidence <= 1.0);
            }

            // Each client column claimed at most once.
            let mut claimed: Vec<&str> =
                report.mappings.iter().map(|m| m.client_column.as_str()).collect();
            claimed.sort_unstable();
            claimed.dedup();
            prop_assert_eq!(claimed.len(), report.mappings.len());

            // Mapped + missing covers every required field exactly once.
            let template = hopper::template::template_for(kind);
            prop_assert_eq!(
                report.mappings.len() + report.missing_columns.len(),
                template.required_count()
            );

            prop_assert!((0.0..=1.0).contains(&report.confidence));
        }
    }

    /// Auto-pick is deterministic over repeated runs.
    #[test]
    fn prop_detection_deterministic(headers in prop::collection::vec(header_like(), 0..12)) {
        let first = detect(&headers, DEFAULT_SIMILARITY_THRESHOLD);
        let second = detect(&headers, DEFAULT_SIMILARITY_THRESHOLD);

        prop_assert_eq!(first.schema_kind, second.schema_kind);
        prop_assert_eq!(first.confidence, second.confidence);
        prop_assert_eq!(first.mappings.len(), second.mappings.len());
    }
}

// =============================================================================
// Orchestrator Properties
// =============================================================================

proptest! {
    /// For all inputs: total == processed + skipped, and the data vector
    /// holds exactly the processed rows.
    #[test]
    fn prop_counter_invariant(bytes in csv_buffer(), chunk_size in 1usize..20) {
        let options = ImportOptions {
            schema_kind: Some(SchemaKind::Pick),
            chunk_size,
            ..Default::default()
        };
        let report = Importer::with_options(options)
            .import(&bytes)
            .expect("import should not fail on well-formed CSV");

        prop_assert_eq!(
            report.total_rows,
            report.processed_rows + report.skipped_rows
        );
        prop_assert_eq!(report.data.len(), report.processed_rows);
    }

    /// max_rows caps the attempted row count exactly.
    #[test]
    fn prop_max_rows_cap(bytes in csv_buffer(), max_rows in 1usize..50) {
        let uncapped = Importer::with_options(ImportOptions {
            schema_kind: Some(SchemaKind::Pick),
            ..Default::default()
        })
        .import(&bytes)
        .unwrap();

        let capped = Importer::with_options(ImportOptions {
            schema_kind: Some(SchemaKind::Pick),
            max_rows,
            ..Default::default()
        })
        .import(&bytes)
        .unwrap();

        prop_assert_eq!(capped.total_rows, uncapped.total_rows.min(max_rows));
    }

    /// Repeated imports of the same buffer produce identical data.
    #[test]
    fn prop_import_deterministic(bytes in csv_buffer()) {
        let importer = Importer::new();
        let first = importer.import(&bytes).unwrap();
        let second = importer.import(&bytes).unwrap();
        prop_assert_eq!(first.data, second.data);
    }
}
