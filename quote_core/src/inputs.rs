//! # Extractor Payloads
//!
//! Records produced by the two upstream extractors. The geometry extractor
//! reads CAD vector data and reports one [`GeometryRecord`] per closed or
//! open profile, plus [`BlockAggregate`]s for counted blocks. The document
//! extractor reads technical documents and reports bill-of-materials rows
//! ([`SpecificationRecord`]), [`TechnicalConstraint`]s found in prose, and
//! raw dimension and material mentions.
//!
//! Every field is optional on the wire. A payload with no `success` flag is
//! treated as unsuccessful.
//!
//! ## JSON Example
//!
//! ```rust
//! use quote_core::inputs::GeometryPayload;
//!
//! let payload: GeometryPayload = serde_json::from_str(r#"{
//!     "success": true,
//!     "profiles": [
//!         { "profile_id": "P1", "layer": "FRAME", "perimeter_mm": 400.0, "length_mm": 1000.0 }
//!     ]
//! }"#).unwrap();
//!
//! assert!(payload.has_profiles());
//! assert_eq!(payload.profiles[0].quantity, 1.0);
//! assert_eq!(payload.profiles[0].complexity_score, 1.0);
//! ```

use std::fmt;
use std::str::FromStr;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

// ============================================================================
// Field Values
// ============================================================================

/// A field as delivered by an extractor.
///
/// Extractors emit free text, so a numeric field may be missing, present,
/// or present but unparseable. `Malformed` keeps the raw text so the audit
/// log can report it.
///
/// ```rust
/// use quote_core::inputs::FieldValue;
///
/// let v: FieldValue<f64> = serde_json::from_str("\"12,5\"").unwrap();
/// assert_eq!(v.value(), Some(12.5));
///
/// let bad: FieldValue<f64> = serde_json::from_str("\"approx. 3 m\"").unwrap();
/// assert!(bad.is_malformed());
/// assert_eq!(bad.value(), None);
/// ```
#[derive(Debug, Clone, PartialEq, Default)]
pub enum FieldValue<T> {
    Present(T),
    #[default]
    Absent,
    Malformed { raw: String },
}

impl<T: Copy> FieldValue<T> {
    /// The value, if present and well-formed
    pub fn value(&self) -> Option<T> {
        match self {
            FieldValue::Present(v) => Some(*v),
            _ => None,
        }
    }
}

impl<T> FieldValue<T> {
    pub fn is_malformed(&self) -> bool {
        matches!(self, FieldValue::Malformed { .. })
    }

    pub fn is_present(&self) -> bool {
        matches!(self, FieldValue::Present(_))
    }
}

impl<T> From<T> for FieldValue<T> {
    fn from(value: T) -> Self {
        FieldValue::Present(value)
    }
}

impl<T: FromStr + DeserializeOwned> FieldValue<T> {
    fn from_json(raw: serde_json::Value) -> Self {
        match raw {
            serde_json::Value::Null => FieldValue::Absent,
            serde_json::Value::String(text) => {
                let trimmed = text.trim();
                if trimmed.is_empty() {
                    return FieldValue::Absent;
                }
                trimmed
                    .parse::<T>()
                    .or_else(|_| trimmed.replace(',', ".").parse::<T>())
                    .map(FieldValue::Present)
                    .unwrap_or(FieldValue::Malformed { raw: text })
            }
            other => match serde_json::from_value::<T>(other.clone()) {
                Ok(v) => FieldValue::Present(v),
                Err(_) => FieldValue::Malformed {
                    raw: other.to_string(),
                },
            },
        }
    }
}

impl<T: Serialize> Serialize for FieldValue<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            FieldValue::Present(v) => v.serialize(serializer),
            FieldValue::Absent => serializer.serialize_none(),
            FieldValue::Malformed { raw } => serializer.serialize_str(raw),
        }
    }
}

impl<'de, T: FromStr + DeserializeOwned> Deserialize<'de> for FieldValue<T> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = serde_json::Value::deserialize(deserializer)?;
        Ok(FieldValue::from_json(raw))
    }
}

// ============================================================================
// Geometry Extractor
// ============================================================================

fn default_one() -> f64 {
    1.0
}

/// Axis-aligned extent of a profile in the drawing plane (mm)
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct BoundingBox {
    #[serde(default)]
    pub width: f64,
    #[serde(default)]
    pub height: f64,
}

/// A machining feature detected near a profile (hole, notch, slot)
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct GeometryFeature {
    #[serde(default)]
    pub feature_type: String,
}

/// One physical piece described by CAD vector data.
///
/// Measures are in millimetres. `quantity` defaults to 1 and
/// `complexity_score` to 1.0 when the extractor omits them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GeometryRecord {
    pub profile_id: String,
    pub layer: String,
    pub is_closed: bool,
    pub perimeter_mm: f64,
    pub area_mm2: f64,
    pub length_mm: f64,
    pub bounding_box: Option<BoundingBox>,
    pub weight_kg: f64,
    pub complexity_score: f64,
    pub holes_count: u32,
    pub features: Vec<GeometryFeature>,
    pub entity_type: String,
    pub material_hint: Option<String>,
    #[serde(alias = "thickness_hint")]
    pub thickness_hint_mm: Option<f64>,
    pub quantity: f64,
}

impl Default for GeometryRecord {
    fn default() -> Self {
        GeometryRecord {
            profile_id: String::new(),
            layer: String::new(),
            is_closed: false,
            perimeter_mm: 0.0,
            area_mm2: 0.0,
            length_mm: 0.0,
            bounding_box: None,
            weight_kg: 0.0,
            complexity_score: 1.0,
            holes_count: 0,
            features: Vec::new(),
            entity_type: String::new(),
            material_hint: None,
            thickness_hint_mm: None,
            quantity: 1.0,
        }
    }
}

impl GeometryRecord {
    /// Hole count: the explicit count, else the number of hole features
    pub fn holes(&self) -> u32 {
        if self.holes_count > 0 {
            return self.holes_count;
        }
        self.features
            .iter()
            .filter(|f| f.feature_type == "hole")
            .count() as u32
    }

    /// Bounding length: `length_mm`, else the larger bounding-box side
    pub fn effective_length_mm(&self) -> f64 {
        if self.length_mm > 0.0 {
            return self.length_mm;
        }
        self.bounding_box
            .map(|bb| bb.width.max(bb.height))
            .unwrap_or(0.0)
    }
}

/// How the geometry extractor arrived at a block aggregate
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AggregateSource {
    /// Counted block insertions; authoritative quantities
    BlockCount,
    /// Inferred from layer contents; informational only
    LayerAnalysis,
    #[default]
    #[serde(other)]
    Unknown,
}

/// Quantity aggregate from counted CAD blocks
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BlockAggregate {
    pub material_type: String,
    pub profile_reference: String,
    pub description: String,
    pub quantity: f64,
    pub unit_length_mm: f64,
    pub unit_area_mm2: f64,
    pub layer: String,
    pub source: AggregateSource,
}

impl Default for BlockAggregate {
    fn default() -> Self {
        BlockAggregate {
            material_type: String::new(),
            profile_reference: String::new(),
            description: String::new(),
            quantity: 1.0,
            unit_length_mm: 0.0,
            unit_area_mm2: 0.0,
            layer: String::new(),
            source: AggregateSource::Unknown,
        }
    }
}

/// Geometry extractor output
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct GeometryPayload {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub profiles: Vec<GeometryRecord>,
    #[serde(default)]
    pub material_quantities: Vec<BlockAggregate>,
}

impl GeometryPayload {
    /// Successful payload carrying the given profiles
    pub fn with_profiles(profiles: Vec<GeometryRecord>) -> Self {
        GeometryPayload {
            success: true,
            profiles,
            material_quantities: Vec::new(),
        }
    }

    /// True when geometry quantities are available for the run
    pub fn has_profiles(&self) -> bool {
        self.success && !self.profiles.is_empty()
    }

    /// Combine payloads from several drawings of one project.
    ///
    /// The result is successful when any part is; records keep file order.
    pub fn merge<I: IntoIterator<Item = GeometryPayload>>(parts: I) -> Self {
        parts.into_iter().fold(GeometryPayload::default(), |mut acc, part| {
            acc.success |= part.success;
            acc.profiles.extend(part.profiles);
            acc.material_quantities.extend(part.material_quantities);
            acc
        })
    }
}

// ============================================================================
// Document Extractor
// ============================================================================

/// One bill-of-materials row read from a technical document
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpecificationRecord {
    #[serde(default)]
    pub reference: String,
    #[serde(default)]
    pub description: String,
    #[serde(default = "default_quantity")]
    pub quantity: FieldValue<f64>,
    #[serde(default)]
    pub unit: String,
    #[serde(default)]
    pub length_mm: FieldValue<f64>,
    #[serde(default)]
    pub width_mm: FieldValue<f64>,
    #[serde(default)]
    pub height_mm: FieldValue<f64>,
    #[serde(default)]
    pub thickness_mm: FieldValue<f64>,
    #[serde(default)]
    pub material: Option<String>,
    #[serde(default)]
    pub finish: Option<String>,
    #[serde(default)]
    pub notes: String,
    #[serde(default)]
    pub confidence: f64,
    #[serde(default)]
    pub source_page: Option<u32>,
}

fn default_quantity() -> FieldValue<f64> {
    FieldValue::Present(1.0)
}

impl SpecificationRecord {
    /// Row with a reference, description and quantity; other fields empty
    pub fn new(reference: impl Into<String>, description: impl Into<String>, quantity: f64) -> Self {
        SpecificationRecord {
            reference: reference.into(),
            description: description.into(),
            quantity: FieldValue::Present(quantity),
            unit: String::new(),
            length_mm: FieldValue::Absent,
            width_mm: FieldValue::Absent,
            height_mm: FieldValue::Absent,
            thickness_mm: FieldValue::Absent,
            material: None,
            finish: None,
            notes: String::new(),
            confidence: 0.0,
            source_page: None,
        }
    }

    /// Names of the fields that were present but unparseable
    pub fn malformed_fields(&self) -> Vec<&'static str> {
        [
            ("quantity", &self.quantity),
            ("length_mm", &self.length_mm),
            ("width_mm", &self.width_mm),
            ("height_mm", &self.height_mm),
            ("thickness_mm", &self.thickness_mm),
        ]
        .into_iter()
        .filter(|(_, v)| v.is_malformed())
        .map(|(name, _)| name)
        .collect()
    }
}

/// Category of a technical constraint found in document prose
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConstraintType {
    SurfaceTreatment,
    MaterialGrade,
    Certification,
    Tolerance,
    ThermalPerformance,
    AcousticPerformance,
    FireRating,
    WaterTightness,
    DimensionSpec,
    GlassSpec,
    Hardware,
    SealGasket,
    #[default]
    #[serde(other)]
    Other,
}

impl ConstraintType {
    /// Wire name of the type
    pub fn as_str(&self) -> &'static str {
        match self {
            ConstraintType::SurfaceTreatment => "surface_treatment",
            ConstraintType::MaterialGrade => "material_grade",
            ConstraintType::Certification => "certification",
            ConstraintType::Tolerance => "tolerance",
            ConstraintType::ThermalPerformance => "thermal_performance",
            ConstraintType::AcousticPerformance => "acoustic_performance",
            ConstraintType::FireRating => "fire_rating",
            ConstraintType::WaterTightness => "water_tightness",
            ConstraintType::DimensionSpec => "dimension_spec",
            ConstraintType::GlassSpec => "glass_spec",
            ConstraintType::Hardware => "hardware",
            ConstraintType::SealGasket => "seal_gasket",
            ConstraintType::Other => "other",
        }
    }
}

impl fmt::Display for ConstraintType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Importance tier of a constraint
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Importance {
    High,
    #[default]
    Medium,
    Low,
}

impl Importance {
    /// Higher rank wins when filling specification gaps
    pub fn rank(&self) -> u8 {
        match self {
            Importance::High => 3,
            Importance::Medium => 2,
            Importance::Low => 1,
        }
    }
}

/// A (type, value, context, importance) tuple extracted from prose
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct TechnicalConstraint {
    pub constraint_type: ConstraintType,
    pub value: String,
    pub context: String,
    pub importance: Importance,
    pub source_page: Option<u32>,
}

impl TechnicalConstraint {
    pub fn new(constraint_type: ConstraintType, value: impl Into<String>, importance: Importance) -> Self {
        TechnicalConstraint {
            constraint_type,
            value: value.into(),
            importance,
            ..TechnicalConstraint::default()
        }
    }
}

/// A raw dimension mention ("2500 x 1200 mm")
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct DimensionSpec {
    pub raw: String,
    pub dimensions: String,
    pub page: Option<u32>,
}

impl DimensionSpec {
    pub fn new(raw: impl Into<String>) -> Self {
        DimensionSpec {
            raw: raw.into(),
            ..DimensionSpec::default()
        }
    }

    /// The dimension text, whichever field carries it
    pub fn text(&self) -> &str {
        if self.raw.is_empty() {
            &self.dimensions
        } else {
            &self.raw
        }
    }
}

/// A raw material or finish mention from a document table
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct MaterialMention {
    pub key: String,
    pub value: String,
    pub page: Option<u32>,
}

/// Document extractor output
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct DocumentPayload {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub bom_items: Vec<SpecificationRecord>,
    #[serde(default)]
    pub constraints: Vec<TechnicalConstraint>,
    #[serde(default)]
    pub dimension_specs: Vec<DimensionSpec>,
    #[serde(default)]
    pub material_specs: Vec<MaterialMention>,
}

impl DocumentPayload {
    /// Successful payload carrying the given rows
    pub fn with_rows(bom_items: Vec<SpecificationRecord>) -> Self {
        DocumentPayload {
            success: true,
            bom_items,
            ..DocumentPayload::default()
        }
    }

    /// True when structured specification rows are available
    pub fn has_rows(&self) -> bool {
        self.success && !self.bom_items.is_empty()
    }

    /// Combine payloads from several documents of one project
    pub fn merge<I: IntoIterator<Item = DocumentPayload>>(parts: I) -> Self {
        parts.into_iter().fold(DocumentPayload::default(), |mut acc, part| {
            acc.success |= part.success;
            acc.bom_items.extend(part.bom_items);
            acc.constraints.extend(part.constraints);
            acc.dimension_specs.extend(part.dimension_specs);
            acc.material_specs.extend(part.material_specs);
            acc
        })
    }
}
