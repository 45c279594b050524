//! Column auto-detection against the canonical templates.
//!
//! Detection is advisory: a low-confidence or incomplete result is still a
//! result. Accepting, prompting, or rejecting it is the caller's decision.

use serde::{Deserialize, Serialize};

use super::normalize::{normalize, similarity};
use super::ColumnMapping;
use crate::template::{template_for, SchemaKind, Template};

/// Default minimum similarity for a fuzzy match.
pub const DEFAULT_SIMILARITY_THRESHOLD: f64 = 0.7;

/// One proposed client-column → canonical-field mapping.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DetectedMapping {
    /// Column name as it appears in the client file.
    pub client_column: String,
    /// Canonical field the column maps to.
    pub template_field: String,
    /// Certainty of the match, `1.0` exactly for exact synonym matches.
    pub confidence: f64,
    /// Why the match was proposed.
    pub reason: String,
}

/// Outcome of detecting one template against a header list.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MappingReport {
    /// Template the detection ran against.
    pub schema_kind: SchemaKind,
    /// Proposed mappings, in field declaration order.
    pub mappings: Vec<DetectedMapping>,
    /// Headers no canonical field claimed.
    pub unmapped_columns: Vec<String>,
    /// Canonical fields no header matched.
    pub missing_columns: Vec<String>,
    /// `(avg(individual confidences) + completeness) / 2`, where
    /// completeness is the mapped share of required fields.
    pub confidence: f64,
}

impl MappingReport {
    /// The proposed mappings as a client-column → field map.
    pub fn column_mapping(&self) -> ColumnMapping {
        self.mappings
            .iter()
            .map(|m| (m.client_column.clone(), m.template_field.clone()))
            .collect()
    }
}

/// Detect a mapping for one specific template.
///
/// Fields claim headers first-come in declaration order: an exact
/// normalized synonym match wins outright (confidence 1.0); otherwise the
/// highest-scoring unclaimed header at or above `threshold` is taken. A
/// claimed header is never reassigned to a later field, even if the later
/// field would match it better.
pub fn detect_for(kind: SchemaKind, headers: &[String], threshold: f64) -> MappingReport {
    let template = template_for(kind);
    run_detection(template, headers, threshold)
}

/// Detect against both templates and return the higher-confidence result.
/// Ties resolve to PICK.
pub fn detect(headers: &[String], threshold: f64) -> MappingReport {
    let mut best: Option<MappingReport> = None;
    for kind in SchemaKind::ALL {
        let report = detect_for(kind, headers, threshold);
        let better = match &best {
            Some(current) => report.confidence > current.confidence,
            None => true,
        };
        if better {
            best = Some(report);
        }
    }
    best.expect("at least one template")
}

fn run_detection(template: &Template, headers: &[String], threshold: f64) -> MappingReport {
    let normalized: Vec<(usize, String)> = headers
        .iter()
        .enumerate()
        .map(|(idx, h)| (idx, normalize(h)))
        .collect();

    let mut claimed = vec![false; headers.len()];
    let mut mappings = Vec::new();
    let mut missing_columns = Vec::new();

    for field in template.fields {
        let synonyms: Vec<String> = field.synonyms.iter().map(|s| normalize(s)).collect();

        // Exact normalized match first.
        let exact = normalized
            .iter()
            .find(|(idx, header)| !claimed[*idx] && synonyms.iter().any(|s| s == header));

        if let Some((idx, _)) = exact {
            claimed[*idx] = true;
            mappings.push(DetectedMapping {
                client_column: headers[*idx].clone(),
                template_field: field.name.to_string(),
                confidence: 1.0,
                reason: "exact match".to_string(),
            });
            continue;
        }

        // Otherwise the single best unclaimed header, if good enough.
        let mut best: Option<(usize, f64, &str)> = None;
        for (idx, header) in &normalized {
            if claimed[*idx] {
                continue;
            }
            for (synonym, raw) in synonyms.iter().zip(field.synonyms.iter()) {
                let score = similarity(header, synonym);
                if best.map_or(true, |(_, best_score, _)| score > best_score) {
                    best = Some((*idx, score, *raw));
                }
            }
        }

        match best {
            Some((idx, score, synonym)) if score >= threshold => {
                claimed[idx] = true;
                mappings.push(DetectedMapping {
                    client_column: headers[idx].clone(),
                    template_field: field.name.to_string(),
                    confidence: score,
                    reason: format!("similar to '{synonym}'"),
                });
            }
            _ => missing_columns.push(field.name.to_string()),
        }
    }

    let unmapped_columns: Vec<String> = headers
        .iter()
        .enumerate()
        .filter(|(idx, _)| !claimed[*idx])
        .map(|(_, h)| h.clone())
        .collect();

    let confidence = overall_confidence(&mappings, template.required_count());

    MappingReport {
        schema_kind: template.kind,
        mappings,
        unmapped_columns,
        missing_columns,
        confidence,
    }
}

fn overall_confidence(mappings: &[DetectedMapping], required: usize) -> f64 {
    if required == 0 {
        return 0.0;
    }
    let avg = if mappings.is_empty() {
        0.0
    } else {
        mappings.iter().map(|m| m.confidence).sum::<f64>() / mappings.len() as f64
    };
    let completeness = mappings.len() as f64 / required as f64;
    (avg + completeness) / 2.0
}

#[cfg(test)]
mod tests {
    use super::*;

    fn headers(names: &[&str]) -> Vec<String> {
        names.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_dutch_pick_headers_exact() {
        let report = detect_for(
            SchemaKind::Pick,
            &headers(&["Artikelnummer", "Omschrijving", "Aantal"]),
            DEFAULT_SIMILARITY_THRESHOLD,
        );

        assert_eq!(report.mappings.len(), 3);
        assert!(report.mappings.iter().all(|m| m.confidence == 1.0));
        assert!(report
            .mappings
            .iter()
            .all(|m| m.reason == "exact match"));
        assert_eq!(report.missing_columns.len(), 4);
        assert!(report.unmapped_columns.is_empty());

        let mapping = report.column_mapping();
        assert_eq!(mapping.get("Artikelnummer").unwrap(), "article_number");
        assert_eq!(mapping.get("Omschrijving").unwrap(), "description");
        assert_eq!(mapping.get("Aantal").unwrap(), "quantity");
    }

    #[test]
    fn test_auto_pick_favors_higher_confidence() {
        let report = detect(
            &headers(&["Artikelnummer", "Omschrijving", "Aantal"]),
            DEFAULT_SIMILARITY_THRESHOLD,
        );
        assert_eq!(report.schema_kind, SchemaKind::Pick);
    }

    #[test]
    fn test_location_headers_with_fuzzy_match() {
        let report = detect_for(
            SchemaKind::Location,
            &headers(&[
                "Locatie Code",
                "Omschrijving",
                "Zone",
                "Gang",
                "Vak",
                "Niveau",
                "Capaciteits-indeling",
                "Max. Gewicht (kg)",
            ]),
            DEFAULT_SIMILARITY_THRESHOLD,
        );

        assert!(report.missing_columns.is_empty());
        assert!(report.unmapped_columns.is_empty());

        let weight = report
            .mappings
            .iter()
            .find(|m| m.template_field == "max_weight")
            .unwrap();
        assert!(weight.confidence < 1.0);
        assert!(weight.confidence >= DEFAULT_SIMILARITY_THRESHOLD);
    }

    #[test]
    fn test_no_mapping_below_threshold() {
        let report = detect_for(
            SchemaKind::Pick,
            &headers(&["zzz", "qqq", "xxx"]),
            DEFAULT_SIMILARITY_THRESHOLD,
        );
        assert!(report.mappings.is_empty());
        assert_eq!(report.missing_columns.len(), 7);
        assert_eq!(report.unmapped_columns.len(), 3);
        assert_eq!(report.confidence, 0.0);
    }

    #[test]
    fn test_first_come_claiming_is_order_dependent() {
        // "Location" is an exact synonym for location_code, the first
        // declared LOCATION field; a later field cannot reclaim it.
        let report = detect_for(
            SchemaKind::Location,
            &headers(&["Location"]),
            DEFAULT_SIMILARITY_THRESHOLD,
        );
        assert_eq!(report.mappings.len(), 1);
        assert_eq!(report.mappings[0].template_field, "location_code");
    }

    #[test]
    fn test_overall_confidence_formula() {
        let report = detect_for(
            SchemaKind::Pick,
            &headers(&["Artikelnummer", "Omschrijving", "Aantal"]),
            DEFAULT_SIMILARITY_THRESHOLD,
        );
        // avg = 1.0, completeness = 3/7.
        let expected = (1.0 + 3.0 / 7.0) / 2.0;
        assert!((report.confidence - expected).abs() < 1e-9);
    }

    #[test]
    fn test_detection_is_deterministic() {
        let hs = headers(&["Order Number", "SKU", "Qty", "Notes", "Unit"]);
        let a = detect(&hs, DEFAULT_SIMILARITY_THRESHOLD);
        let b = detect(&hs, DEFAULT_SIMILARITY_THRESHOLD);
        assert_eq!(
            serde_json::to_string(&a).unwrap(),
            serde_json::to_string(&b).unwrap()
        );
    }
}
