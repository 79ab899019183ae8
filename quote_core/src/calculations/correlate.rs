//! # Correlation
//!
//! Cross-references geometry records against bill-of-materials rows and
//! decides, per physical item, which source supplies the quantity and
//! which supplies the specification.
//!
//! ## Prevalence Rule
//!
//! Whenever geometry is available its quantities are authoritative. A
//! matching specification row only contributes material, finish and
//! thickness. Matching strategies, tried in order:
//!
//! | Strategy | Confidence |
//! |----------|------------|
//! | layer name equals a row reference | 0.9 |
//! | row reference inside profile id, or the reverse | 0.8 |
//! | material hint inside a row description | 0.6 |
//! | no match | 0.0 |
//!
//! Without geometry every row becomes its own linkage (0.5). With neither,
//! estimated linkages are synthesized from constraints, material mentions
//! and dimension strings, and as a last resort a single placeholder.
//!
//! ## Example
//!
//! ```rust
//! use quote_core::calculations::correlate::{correlate, MatchMethod, QuantitySource};
//! use quote_core::inputs::{DocumentPayload, GeometryPayload, GeometryRecord, SpecificationRecord};
//!
//! let geometry = GeometryPayload::with_profiles(vec![GeometryRecord {
//!     profile_id: "P1".into(),
//!     layer: "J-01".into(),
//!     quantity: 4.0,
//!     ..Default::default()
//! }]);
//! let document = DocumentPayload::with_rows(vec![SpecificationRecord::new("J-01", "Window frame", 10.0)]);
//!
//! let correlation = correlate(&geometry, &document);
//! let link = &correlation.linkages[0];
//! assert_eq!(link.method, MatchMethod::LayerToReference);
//! assert_eq!(link.quantity_source, QuantitySource::Geometry);
//! ```

use std::collections::HashSet;

use indexmap::IndexMap;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::inputs::{
    AggregateSource, BlockAggregate, ConstraintType, DocumentPayload, FieldValue, GeometryPayload, GeometryRecord,
    Importance, SpecificationRecord, TechnicalConstraint,
};

pub const LAYER_MATCH_CONFIDENCE: f64 = 0.9;
pub const PROFILE_ID_MATCH_CONFIDENCE: f64 = 0.8;
pub const MATERIAL_HINT_CONFIDENCE: f64 = 0.6;
pub const BLOCK_MATCHED_CONFIDENCE: f64 = 0.7;
pub const BLOCK_UNMATCHED_CONFIDENCE: f64 = 0.5;
pub const SPECIFICATION_ONLY_CONFIDENCE: f64 = 0.5;
pub const CONSTRAINT_CONFIDENCE: f64 = 0.3;
pub const DIMENSION_CONFIDENCE: f64 = 0.25;
pub const MENTION_CONFIDENCE: f64 = 0.2;
pub const PLACEHOLDER_CONFIDENCE: f64 = 0.1;

const MAX_MATERIAL_ITEMS: usize = 10;
const MAX_TREATMENT_ITEMS: usize = 5;
const MAX_MENTION_ITEMS: usize = 5;
const MAX_DIMENSION_SCAN: usize = 20;
/// Dimension values at or below this are bolt sizes, tolerances and the like
const MIN_DIMENSION_MM: f64 = 50.0;
const CONTEXT_CHARS: usize = 100;

static NUMBER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\d+(?:[.,]\d+)?").expect("number pattern is a valid regular expression"));

/// Which source supplied a linkage's quantity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QuantitySource {
    Geometry,
    Specification,
    Estimated,
}

/// Strategy that produced a linkage
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchMethod {
    LayerToReference,
    ProfileIdMatch,
    MaterialHint,
    None,
    BlockCount,
    SpecificationOnly,
    ConstraintExtraction,
    MaterialMention,
    DimensionExtraction,
    Placeholder,
}

/// High-importance constraint carried as an advisory note
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConstraintNote {
    #[serde(rename = "type")]
    pub constraint_type: ConstraintType,
    pub value: String,
    pub context: String,
}

/// Specification assembled from the matched row and document constraints
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct MergedSpecification {
    pub material: Option<String>,
    pub finish: Option<String>,
    pub thickness_mm: Option<f64>,
    pub certifications: Vec<String>,
    pub constraints: Vec<ConstraintNote>,
}

/// One physical item after correlation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LinkageRecord {
    pub geometry: Option<GeometryRecord>,
    pub block: Option<BlockAggregate>,
    pub specification: Option<SpecificationRecord>,
    pub quantity_source: QuantitySource,
    pub method: MatchMethod,
    pub confidence: f64,
    pub merged: MergedSpecification,
}

impl LinkageRecord {
    fn estimated(row: SpecificationRecord, method: MatchMethod, confidence: f64, merged: MergedSpecification) -> Self {
        LinkageRecord {
            geometry: None,
            block: None,
            specification: Some(row),
            quantity_source: QuantitySource::Estimated,
            method,
            confidence,
            merged,
        }
    }

    /// True when the quantity comes from the drawing
    pub fn has_geometry(&self) -> bool {
        self.geometry.is_some() || self.block.is_some()
    }
}

/// One entry in the correlation audit log
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum AuditEvent {
    /// Geometry quantities are authoritative for this run
    UsingGeometryAsPrimary {
        profiles: usize,
        block_aggregates: usize,
    },
    /// No geometry; specification rows supply quantities
    UsingSpecificationAsFallback { rows: usize },
    /// Nothing structured; items are synthesized from raw signal
    CreatingEstimatedItems {
        constraints: usize,
        dimensions: usize,
        material_mentions: usize,
    },
    /// A specification field was present but unparseable
    MalformedField { reference: String, field: String },
    /// A linkage was emitted
    Linked {
        reference: String,
        method: MatchMethod,
        confidence: f64,
    },
    /// No item could be synthesized; a single placeholder was emitted
    PlaceholderEmitted { constraints: usize, dimensions: usize },
}

/// Correlator output: linkages in emission order and the decisions taken
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Correlation {
    pub linkages: Vec<LinkageRecord>,
    pub log: Vec<AuditEvent>,
}

impl Correlation {
    fn push(&mut self, reference: &str, linkage: LinkageRecord) {
        tracing::debug!(
            reference,
            method = ?linkage.method,
            confidence = linkage.confidence,
            "linkage"
        );
        self.log.push(AuditEvent::Linked {
            reference: reference.to_string(),
            method: linkage.method,
            confidence: linkage.confidence,
        });
        self.linkages.push(linkage);
    }
}

/// Correlate geometry with a document in one call
pub fn correlate(geometry: &GeometryPayload, document: &DocumentPayload) -> Correlation {
    Correlator::new(document).correlate(geometry)
}

/// Lookup structures built once per document.
pub struct Correlator<'a> {
    document: &'a DocumentPayload,
    /// Uppercased reference (and its separator-free form) -> row index
    reference_index: IndexMap<String, usize>,
    /// Constraint type -> constraint indices, types in first-seen order
    constraint_groups: IndexMap<&'static str, Vec<usize>>,
}

impl<'a> Correlator<'a> {
    pub fn new(document: &'a DocumentPayload) -> Self {
        let mut reference_index = IndexMap::new();
        for (idx, row) in document.bom_items.iter().enumerate() {
            let reference = row.reference.trim().to_uppercase();
            if reference.is_empty() {
                continue;
            }
            let compact: String = reference
                .chars()
                .filter(|c| *c != '-' && *c != '_' && !c.is_whitespace())
                .collect();
            reference_index.insert(reference, idx);
            if !compact.is_empty() {
                reference_index.insert(compact, idx);
            }
        }

        let mut constraint_groups: IndexMap<&'static str, Vec<usize>> = IndexMap::new();
        for (idx, c) in document.constraints.iter().enumerate() {
            constraint_groups.entry(c.constraint_type.as_str()).or_default().push(idx);
        }

        Correlator {
            document,
            reference_index,
            constraint_groups,
        }
    }

    /// Produce linkages for every physical item.
    pub fn correlate(&self, geometry: &GeometryPayload) -> Correlation {
        let mut out = Correlation::default();

        for row in &self.document.bom_items {
            for field in row.malformed_fields() {
                tracing::warn!(reference = %row.reference, field, "malformed specification field");
                out.log.push(AuditEvent::MalformedField {
                    reference: row.reference.clone(),
                    field: field.to_string(),
                });
            }
        }

        if geometry.has_profiles() {
            tracing::info!(
                profiles = geometry.profiles.len(),
                block_aggregates = geometry.material_quantities.len(),
                "geometry quantities are authoritative"
            );
            out.log.push(AuditEvent::UsingGeometryAsPrimary {
                profiles: geometry.profiles.len(),
                block_aggregates: geometry.material_quantities.len(),
            });

            for record in &geometry.profiles {
                let linkage = self.link_geometry(record);
                let reference = if record.layer.is_empty() { &record.profile_id } else { &record.layer };
                out.push(reference, linkage);
            }
            for block in geometry
                .material_quantities
                .iter()
                .filter(|b| b.source == AggregateSource::BlockCount)
            {
                out.push(&block.profile_reference, self.link_block(block));
            }
        } else if self.document.has_rows() {
            tracing::info!(
                rows = self.document.bom_items.len(),
                "no geometry, using specification quantities"
            );
            out.log.push(AuditEvent::UsingSpecificationAsFallback {
                rows: self.document.bom_items.len(),
            });

            for row in &self.document.bom_items {
                let linkage = LinkageRecord {
                    geometry: None,
                    block: None,
                    specification: Some(row.clone()),
                    quantity_source: QuantitySource::Specification,
                    method: MatchMethod::SpecificationOnly,
                    confidence: SPECIFICATION_ONLY_CONFIDENCE,
                    merged: self.merge_specification(Some(row)),
                };
                out.push(&row.reference, linkage);
            }
        }

        if out.linkages.is_empty() {
            self.synthesize(&mut out);
        }
        out
    }

    fn link_geometry(&self, record: &GeometryRecord) -> LinkageRecord {
        let (row, method, confidence) = self
            .match_layer(record)
            .map(|idx| (Some(idx), MatchMethod::LayerToReference, LAYER_MATCH_CONFIDENCE))
            .or_else(|| {
                self.match_profile_id(record)
                    .map(|idx| (Some(idx), MatchMethod::ProfileIdMatch, PROFILE_ID_MATCH_CONFIDENCE))
            })
            .or_else(|| {
                self.match_material_hint(record)
                    .map(|idx| (Some(idx), MatchMethod::MaterialHint, MATERIAL_HINT_CONFIDENCE))
            })
            .unwrap_or((None, MatchMethod::None, 0.0));

        let row = row.and_then(|idx| self.document.bom_items.get(idx));
        LinkageRecord {
            geometry: Some(record.clone()),
            block: None,
            specification: row.cloned(),
            quantity_source: QuantitySource::Geometry,
            method,
            confidence,
            merged: self.merge_specification(row),
        }
    }

    fn match_layer(&self, record: &GeometryRecord) -> Option<usize> {
        let layer = record.layer.to_uppercase();
        if layer.is_empty() {
            return None;
        }
        self.reference_index.get(&layer).copied()
    }

    fn match_profile_id(&self, record: &GeometryRecord) -> Option<usize> {
        let profile_id = record.profile_id.to_uppercase();
        if profile_id.is_empty() {
            return None;
        }
        self.reference_index
            .iter()
            .find(|(key, _)| profile_id.contains(key.as_str()) || key.contains(profile_id.as_str()))
            .map(|(_, &idx)| idx)
    }

    fn match_material_hint(&self, record: &GeometryRecord) -> Option<usize> {
        let hint = record.material_hint.as_deref()?.trim().to_lowercase();
        if hint.is_empty() {
            return None;
        }
        self.document
            .bom_items
            .iter()
            .position(|row| row.description.to_lowercase().contains(&hint))
    }

    fn link_block(&self, block: &BlockAggregate) -> LinkageRecord {
        let reference = block.profile_reference.trim().to_uppercase();
        let row = if reference.is_empty() {
            None
        } else {
            self.reference_index
                .get(&reference)
                .and_then(|&idx| self.document.bom_items.get(idx))
        };
        let confidence = if row.is_some() {
            BLOCK_MATCHED_CONFIDENCE
        } else {
            BLOCK_UNMATCHED_CONFIDENCE
        };

        LinkageRecord {
            geometry: None,
            block: Some(block.clone()),
            specification: row.cloned(),
            quantity_source: QuantitySource::Geometry,
            method: MatchMethod::BlockCount,
            confidence,
            merged: self.merge_specification(row),
        }
    }

    fn constraints_of(&self, kind: ConstraintType) -> impl Iterator<Item = &TechnicalConstraint> + '_ {
        self.constraint_groups
            .get(kind.as_str())
            .into_iter()
            .flatten()
            .filter_map(move |&idx| self.document.constraints.get(idx))
    }

    /// Highest-importance constraint of a type; the earliest wins a tie
    fn strongest(&self, kind: ConstraintType) -> Option<&TechnicalConstraint> {
        self.constraints_of(kind)
            .filter(|c| !c.value.trim().is_empty())
            .reduce(|best, c| {
                if c.importance.rank() > best.importance.rank() {
                    c
                } else {
                    best
                }
            })
    }

    fn merge_specification(&self, row: Option<&SpecificationRecord>) -> MergedSpecification {
        let non_empty = |v: &Option<String>| v.as_ref().filter(|s| !s.trim().is_empty()).cloned();

        let material = row
            .and_then(|r| non_empty(&r.material))
            .or_else(|| self.strongest(ConstraintType::MaterialGrade).map(|c| c.value.clone()));
        let finish = row
            .and_then(|r| non_empty(&r.finish))
            .or_else(|| self.strongest(ConstraintType::SurfaceTreatment).map(|c| c.value.clone()));
        let thickness_mm = row.and_then(|r| r.thickness_mm.value());

        let certifications = self
            .constraints_of(ConstraintType::Certification)
            .map(|c| c.value.clone())
            .collect();

        let constraints = self
            .constraint_groups
            .iter()
            .flat_map(|(_, indices)| indices.iter())
            .filter_map(|&idx| self.document.constraints.get(idx))
            .filter(|c| c.importance == Importance::High)
            .map(|c| ConstraintNote {
                constraint_type: c.constraint_type,
                value: c.value.clone(),
                context: truncate(&c.context, CONTEXT_CHARS),
            })
            .collect();

        MergedSpecification {
            material,
            finish,
            thickness_mm,
            certifications,
            constraints,
        }
    }

    /// Estimated items for documents with no structured rows
    fn synthesize(&self, out: &mut Correlation) {
        let doc = self.document;
        tracing::info!(
            constraints = doc.constraints.len(),
            dimensions = doc.dimension_specs.len(),
            "no structured data, synthesizing estimated items"
        );
        out.log.push(AuditEvent::CreatingEstimatedItems {
            constraints: doc.constraints.len(),
            dimensions: doc.dimension_specs.len(),
            material_mentions: doc.material_specs.len(),
        });

        let materials: Vec<_> = self
            .constraints_of(ConstraintType::MaterialGrade)
            .take(MAX_MATERIAL_ITEMS)
            .collect();
        for (i, c) in materials.iter().enumerate() {
            let value = or_default(&c.value, "Aluminium");
            let mut row = SpecificationRecord::new(format!("MAT-{:02}", i + 1), format!("Material: {value}"), 1.0);
            row.notes = truncate(&c.context, CONTEXT_CHARS);
            let merged = MergedSpecification {
                material: Some(value.to_string()),
                ..MergedSpecification::default()
            };
            let reference = row.reference.clone();
            out.push(
                &reference,
                LinkageRecord::estimated(row, MatchMethod::ConstraintExtraction, CONSTRAINT_CONFIDENCE, merged),
            );
        }

        let treatments: Vec<_> = self
            .constraints_of(ConstraintType::SurfaceTreatment)
            .take(MAX_TREATMENT_ITEMS)
            .collect();
        for (i, c) in treatments.iter().enumerate() {
            let value = or_default(&c.value, "Powder coating");
            let mut row = SpecificationRecord::new(format!("TRT-{:02}", i + 1), format!("Treatment: {value}"), 1.0);
            row.notes = truncate(&c.context, CONTEXT_CHARS);
            let merged = MergedSpecification {
                finish: Some(value.to_string()),
                ..MergedSpecification::default()
            };
            let reference = row.reference.clone();
            out.push(
                &reference,
                LinkageRecord::estimated(row, MatchMethod::ConstraintExtraction, CONSTRAINT_CONFIDENCE, merged),
            );
        }

        // Table mentions are weaker than prose constraints; used only without them
        if out.linkages.is_empty() {
            let mut seen = HashSet::new();
            let mentions: Vec<_> = doc
                .material_specs
                .iter()
                .filter(|m| !m.value.trim().is_empty())
                .filter(|m| seen.insert(m.value.trim().to_lowercase()))
                .take(MAX_MENTION_ITEMS)
                .collect();
            for (i, m) in mentions.iter().enumerate() {
                let value = m.value.trim();
                let label = if m.key.trim().is_empty() { "Material" } else { m.key.trim() };
                let row = SpecificationRecord::new(format!("MNT-{:02}", i + 1), format!("{label}: {value}"), 1.0);
                let merged = MergedSpecification {
                    material: Some(value.to_string()),
                    ..MergedSpecification::default()
                };
                let reference = row.reference.clone();
                out.push(
                    &reference,
                    LinkageRecord::estimated(row, MatchMethod::MaterialMention, MENTION_CONFIDENCE, merged),
                );
            }
        }

        let mut seen = HashSet::new();
        for dim in doc.dimension_specs.iter().take(MAX_DIMENSION_SCAN) {
            let raw = dim.text();
            if raw.is_empty() || !seen.insert(raw) {
                continue;
            }
            let Some(length) = parse_dimension(raw).filter(|&v| v > MIN_DIMENSION_MM) else {
                continue;
            };
            let mut row = SpecificationRecord::new(
                format!("DIM-{:02}", out.linkages.len() + 1),
                format!("Element {raw}"),
                1.0,
            );
            row.length_mm = FieldValue::Present(length);
            let reference = row.reference.clone();
            out.push(
                &reference,
                LinkageRecord::estimated(
                    row,
                    MatchMethod::DimensionExtraction,
                    DIMENSION_CONFIDENCE,
                    MergedSpecification::default(),
                ),
            );
        }

        if out.linkages.is_empty() {
            let constraints = doc.constraints.len();
            let dimensions = doc.dimension_specs.len();
            tracing::warn!(constraints, dimensions, "nothing extractable, emitting placeholder");
            out.log.push(AuditEvent::PlaceholderEmitted { constraints, dimensions });

            let mut row = SpecificationRecord::new(
                "PROJ-01",
                format!("Project (automatic analysis: {constraints} specs, {dimensions} dimensions)"),
                1.0,
            );
            row.notes = "Data extracted from technical drawings. Manual review recommended.".to_string();
            out.push(
                "PROJ-01",
                LinkageRecord::estimated(
                    row,
                    MatchMethod::Placeholder,
                    PLACEHOLDER_CONFIDENCE,
                    MergedSpecification::default(),
                ),
            );
        }
    }
}

/// Largest number in a dimension string; `,` is accepted as decimal mark
pub fn parse_dimension(text: &str) -> Option<f64> {
    NUMBER
        .find_iter(text)
        .filter_map(|m| m.as_str().replace(',', ".").parse::<f64>().ok())
        .reduce(f64::max)
}

fn truncate(text: &str, max_chars: usize) -> String {
    text.chars().take(max_chars).collect()
}

fn or_default<'s>(value: &'s str, fallback: &'s str) -> &'s str {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        fallback
    } else {
        trimmed
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::inputs::{DimensionSpec, MaterialMention};
    use pretty_assertions::assert_eq;

    fn geometry(profile_id: &str, layer: &str) -> GeometryRecord {
        GeometryRecord {
            profile_id: profile_id.to_string(),
            layer: layer.to_string(),
            ..Default::default()
        }
    }

    fn row(reference: &str, description: &str) -> SpecificationRecord {
        SpecificationRecord::new(reference, description, 1.0)
    }

    #[test]
    fn test_layer_match_beats_profile_id() {
        let doc = DocumentPayload::with_rows(vec![row("P-100", "first"), row("FRAME", "second")]);
        let geo = GeometryPayload::with_profiles(vec![geometry("P-100", "frame")]);

        let link = &correlate(&geo, &doc).linkages[0];
        assert_eq!(link.method, MatchMethod::LayerToReference);
        assert_eq!(link.confidence, 0.9);
        assert_eq!(link.specification.as_ref().unwrap().description, "second");
    }

    #[test]
    fn test_profile_id_containment_both_ways() {
        let doc = DocumentPayload::with_rows(vec![row("J 01", "window")]);

        // Separator-free key "J01" is inside the profile id
        let geo = GeometryPayload::with_profiles(vec![geometry("poly_j01_a", "0")]);
        let link = &correlate(&geo, &doc).linkages[0];
        assert_eq!(link.method, MatchMethod::ProfileIdMatch);
        assert_eq!(link.confidence, 0.8);

        // Profile id inside a key
        let geo = GeometryPayload::with_profiles(vec![geometry("J0", "0")]);
        assert_eq!(correlate(&geo, &doc).linkages[0].method, MatchMethod::ProfileIdMatch);
    }

    #[test]
    fn test_material_hint_match() {
        let doc = DocumentPayload::with_rows(vec![row("X1", "Steel door"), row("X2", "Aluminium 6063 frame")]);
        let mut record = geometry("", "");
        record.material_hint = Some("ALUMINIUM".to_string());
        let geo = GeometryPayload::with_profiles(vec![record]);

        let link = &correlate(&geo, &doc).linkages[0];
        assert_eq!(link.method, MatchMethod::MaterialHint);
        assert_eq!(link.specification.as_ref().unwrap().reference, "X2");
    }

    #[test]
    fn test_empty_identifiers_never_match() {
        let doc = DocumentPayload::with_rows(vec![row("A1", "anything")]);
        let mut record = geometry("", "");
        record.material_hint = Some("  ".to_string());
        let geo = GeometryPayload::with_profiles(vec![record]);

        let link = &correlate(&geo, &doc).linkages[0];
        assert_eq!(link.method, MatchMethod::None);
        assert_eq!(link.confidence, 0.0);
        assert!(link.specification.is_none());
        assert_eq!(link.quantity_source, QuantitySource::Geometry);
    }

    #[test]
    fn test_block_aggregates() {
        let doc = DocumentPayload::with_rows(vec![row("BLK-1", "bracket")]);
        let mut geo = GeometryPayload::with_profiles(vec![geometry("P1", "0")]);
        geo.material_quantities = vec![
            BlockAggregate {
                profile_reference: "blk-1".into(),
                source: AggregateSource::BlockCount,
                ..Default::default()
            },
            BlockAggregate {
                profile_reference: "OTHER".into(),
                source: AggregateSource::BlockCount,
                ..Default::default()
            },
            BlockAggregate {
                profile_reference: "BLK-1".into(),
                source: AggregateSource::LayerAnalysis,
                ..Default::default()
            },
        ];

        let c = correlate(&geo, &doc);
        assert_eq!(c.linkages.len(), 3);
        assert_eq!(c.linkages[1].method, MatchMethod::BlockCount);
        assert_eq!(c.linkages[1].confidence, 0.7);
        assert_eq!(c.linkages[2].confidence, 0.5);
        assert!(c.linkages.iter().all(|l| l.quantity_source == QuantitySource::Geometry));
    }

    #[test]
    fn test_merge_prefers_row_then_strongest_constraint() {
        let mut doc = DocumentPayload::with_rows(vec![row("A1", "frame")]);
        doc.bom_items[0].finish = Some("RAL 9016".into());
        doc.constraints = vec![
            TechnicalConstraint::new(ConstraintType::MaterialGrade, "6060", Importance::Medium),
            TechnicalConstraint::new(ConstraintType::MaterialGrade, "6063 T5", Importance::High),
            TechnicalConstraint::new(ConstraintType::MaterialGrade, "6082", Importance::High),
            TechnicalConstraint::new(ConstraintType::SurfaceTreatment, "Anodized", Importance::High),
            TechnicalConstraint::new(ConstraintType::Certification, "CE", Importance::Low),
            TechnicalConstraint::new(ConstraintType::Certification, "Qualicoat", Importance::Medium),
        ];
        let geo = GeometryPayload::with_profiles(vec![geometry("X", "A1")]);

        let merged = &correlate(&geo, &doc).linkages[0].merged;
        assert_eq!(merged.material.as_deref(), Some("6063 T5"));
        assert_eq!(merged.finish.as_deref(), Some("RAL 9016"));
        assert_eq!(merged.certifications, vec!["CE".to_string(), "Qualicoat".to_string()]);
        let high: Vec<_> = merged.constraints.iter().map(|c| c.value.as_str()).collect();
        assert_eq!(high, vec!["6063 T5", "6082", "Anodized"]);
    }

    #[test]
    fn test_high_constraints_grouped_by_first_seen_type() {
        let mut doc = DocumentPayload::with_rows(vec![row("A1", "frame")]);
        doc.constraints = vec![
            TechnicalConstraint::new(ConstraintType::FireRating, "EI30", Importance::High),
            TechnicalConstraint::new(ConstraintType::MaterialGrade, "S355", Importance::High),
            TechnicalConstraint::new(ConstraintType::FireRating, "R60", Importance::High),
            TechnicalConstraint::new(ConstraintType::Tolerance, "EN 1090", Importance::High),
            TechnicalConstraint::new(ConstraintType::MaterialGrade, "S275", Importance::High),
        ];

        let merged = &correlate(&GeometryPayload::default(), &doc).linkages[0].merged;
        let high: Vec<_> = merged.constraints.iter().map(|c| c.value.as_str()).collect();
        assert_eq!(high, vec!["EI30", "R60", "S355", "S275", "EN 1090"]);
    }

    #[test]
    fn test_first_reference_wins_on_profile_id_containment() {
        let doc = DocumentPayload::with_rows(vec![row("B2", "second bay"), row("B", "any bay")]);
        let geo = GeometryPayload::with_profiles(vec![geometry("frame_b2", "0")]);

        let link = &correlate(&geo, &doc).linkages[0];
        assert_eq!(link.method, MatchMethod::ProfileIdMatch);
        assert_eq!(link.specification.as_ref().unwrap().reference, "B2");
    }

    #[test]
    fn test_constraint_context_truncated() {
        let mut doc = DocumentPayload::with_rows(vec![row("A1", "frame")]);
        let mut c = TechnicalConstraint::new(ConstraintType::FireRating, "EI30", Importance::High);
        c.context = "x".repeat(250);
        doc.constraints = vec![c];

        let merged = &correlate(&GeometryPayload::default(), &doc).linkages[0].merged;
        assert_eq!(merged.constraints[0].context.len(), 100);
    }

    #[test]
    fn test_specification_only_path() {
        let doc = DocumentPayload::with_rows(vec![row("A", "a"), row("B", "b")]);
        let c = correlate(&GeometryPayload::default(), &doc);
        assert_eq!(c.linkages.len(), 2);
        for link in &c.linkages {
            assert_eq!(link.method, MatchMethod::SpecificationOnly);
            assert_eq!(link.quantity_source, QuantitySource::Specification);
            assert_eq!(link.confidence, 0.5);
        }
        assert!(matches!(
            c.log[0],
            AuditEvent::UsingSpecificationAsFallback { rows: 2 }
        ));
    }

    #[test]
    fn test_fallback_from_constraints_and_dimensions() {
        let mut doc = DocumentPayload {
            success: true,
            ..Default::default()
        };
        doc.constraints = vec![
            TechnicalConstraint::new(ConstraintType::MaterialGrade, "6063", Importance::High),
            TechnicalConstraint::new(ConstraintType::SurfaceTreatment, "Qualicoat", Importance::Medium),
        ];
        doc.dimension_specs = vec![
            DimensionSpec::new("2400 x 1200"),
            DimensionSpec::new("2400 x 1200"),
            DimensionSpec::new("M8 x 20"),
            DimensionSpec::new("1850,5 mm"),
        ];

        let c = correlate(&GeometryPayload::default(), &doc);
        let refs: Vec<_> = c
            .linkages
            .iter()
            .map(|l| l.specification.as_ref().unwrap().reference.as_str())
            .collect();
        assert_eq!(refs, vec!["MAT-01", "TRT-01", "DIM-03", "DIM-04"]);

        assert_eq!(c.linkages[0].merged.material.as_deref(), Some("6063"));
        assert_eq!(c.linkages[1].merged.finish.as_deref(), Some("Qualicoat"));
        let dim = c.linkages[3].specification.as_ref().unwrap();
        assert_eq!(dim.length_mm.value(), Some(1850.5));
        assert_eq!(c.linkages[3].confidence, 0.25);
        assert!(c.linkages.iter().all(|l| l.quantity_source == QuantitySource::Estimated));
    }

    #[test]
    fn test_fallback_from_material_mentions() {
        let doc = DocumentPayload {
            success: true,
            material_specs: vec![
                MaterialMention {
                    key: "liga".into(),
                    value: "6060 T66".into(),
                    page: Some(2),
                },
                MaterialMention {
                    key: "liga".into(),
                    value: "6060 t66".into(),
                    page: Some(3),
                },
            ],
            ..Default::default()
        };
        let c = correlate(&GeometryPayload::default(), &doc);
        assert_eq!(c.linkages.len(), 1);
        assert_eq!(c.linkages[0].method, MatchMethod::MaterialMention);
        assert_eq!(c.linkages[0].confidence, 0.2);
        assert_eq!(
            c.linkages[0].specification.as_ref().unwrap().description,
            "liga: 6060 T66"
        );
    }

    #[test]
    fn test_single_placeholder_when_nothing_extractable() {
        let c = correlate(&GeometryPayload::default(), &DocumentPayload::default());
        assert_eq!(c.linkages.len(), 1);
        let link = &c.linkages[0];
        assert_eq!(link.method, MatchMethod::Placeholder);
        assert_eq!(link.confidence, 0.1);
        let spec = link.specification.as_ref().unwrap();
        assert_eq!(spec.reference, "PROJ-01");
        assert!(spec.description.contains("0 specs, 0 dimensions"));
    }

    #[test]
    fn test_malformed_fields_logged() {
        let mut r = row("A1", "frame");
        r.length_mm = FieldValue::Malformed { raw: "2,4 m aprox".into() };
        let doc = DocumentPayload::with_rows(vec![r]);
        let c = correlate(&GeometryPayload::default(), &doc);
        assert_eq!(
            c.log[0],
            AuditEvent::MalformedField {
                reference: "A1".into(),
                field: "length_mm".into()
            }
        );
        assert_eq!(c.linkages.len(), 1);
    }

    #[test]
    fn test_parse_dimension() {
        assert_eq!(parse_dimension("1200 x 2400 mm"), Some(2400.0));
        assert_eq!(parse_dimension("12,5"), Some(12.5));
        assert_eq!(parse_dimension("no digits"), None);
    }

    #[test]
    fn test_number_pattern_compiles() {
        assert!(NUMBER.is_match("88.9"));
        assert!(!NUMBER.is_match("mm"));
    }
}
