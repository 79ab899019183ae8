//! # Line Pricing
//!
//! Converts one [`LinkageRecord`] into a priced quote line with five cost
//! components: raw material, transformation, surface treatment, labor and
//! accessories.
//!
//! ## Pricing Paths
//!
//! 1. **Catalog**: the line's description, reference or profile id names a
//!    structural designation found in the [`CostCatalog`]. Weight and every
//!    component come from catalog rates scaled by length and quantity.
//!    A specification row with no structural designation whose description
//!    names a cladding or accessory item ("Painel fachada PIR 50mm", "Cume")
//!    is priced per catalog unit instead, one unit per piece.
//! 2. **Formula**: no catalog hit. Weight is estimated from the geometry
//!    (aluminium, 2700 kg/m³) and each component comes from the pricing
//!    parameters. Complexity scales transformation and labor.
//!
//! The catalog path never applies the complexity multiplier; catalog rates
//! are taken as final.
//!
//! Pricing never fails. Missing measures fall through to cheaper estimates.
//!
//! ## Example
//!
//! ```rust
//! use quote_core::calculations::correlate::correlate;
//! use quote_core::calculations::line_pricer::{price, PricingPath};
//! use quote_core::catalog::CostCatalog;
//! use quote_core::inputs::{DocumentPayload, GeometryPayload, SpecificationRecord};
//! use quote_core::params::{PricingParameters, SurfaceTreatment};
//!
//! let document = DocumentPayload::with_rows(vec![SpecificationRecord::new("V1", "Viga IPE 300", 2.0)]);
//! let correlation = correlate(&GeometryPayload::default(), &document);
//!
//! let line = price(
//!     1,
//!     &correlation.linkages[0],
//!     SurfaceTreatment::PowderCoatingStandard,
//!     &PricingParameters::default(),
//!     &CostCatalog::standard(),
//! );
//! assert_eq!(line.pricing, PricingPath::Catalog);
//! assert_eq!(line.quantity, 2);
//! ```

use serde::{Deserialize, Serialize};

use super::correlate::{LinkageRecord, MatchMethod, QuantitySource};
use crate::catalog::designation::match_profile_designation;
use crate::catalog::{CatalogCost, CostCatalog, SteelProfile, UnitItem};
use crate::params::{PricingParameters, SurfaceTreatment};
use crate::units::{Meters, Millimeters};

/// Aluminium density (kg/m³)
pub const DENSITY_KG_M3: f64 = 2700.0;
/// Wall thickness assumed when neither row nor geometry gives one (mm)
pub const DEFAULT_THICKNESS_MM: f64 = 2.0;
/// Linear mass assumed when only a length is known (kg/m)
const LINEAR_MASS_KG_M: f64 = 0.5;
const LENGTH_TO_PERIMETER: f64 = 0.1;
const STAND_IN_WEIGHT_KG: f64 = 0.5;
const STAND_IN_LENGTH_MM: f64 = 1000.0;
const STAND_IN_PERIMETER_MM: f64 = 100.0;
/// Shorter pieces are still treated over a full metre
const MIN_TREATED_LENGTH_MM: f64 = 1000.0;

/// Which source supplied a line's specification
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SpecificationSource {
    Geometry,
    Specification,
    Both,
}

/// How the line was costed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PricingPath {
    Catalog,
    Formula,
}

/// Geometric measures used for pricing
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeometrySnapshot {
    pub perimeter_mm: f64,
    pub area_mm2: f64,
    pub length_mm: f64,
    pub weight_kg: f64,
    pub complexity_score: f64,
    pub holes_count: u32,
    pub entity_type: String,
}

impl Default for GeometrySnapshot {
    fn default() -> Self {
        GeometrySnapshot {
            perimeter_mm: 0.0,
            area_mm2: 0.0,
            length_mm: 0.0,
            weight_kg: 0.0,
            complexity_score: 1.0,
            holes_count: 0,
            entity_type: String::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct SpecificationSnapshot {
    pub material: Option<String>,
    pub finish: Option<String>,
    pub thickness_mm: Option<f64>,
}

/// The five cost components of a line (EUR, for the whole quantity)
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct CostBreakdown {
    pub raw_material: f64,
    pub transformation: f64,
    pub surface_treatment: f64,
    pub labor: f64,
    pub accessories: f64,
}

impl CostBreakdown {
    pub fn total(&self) -> f64 {
        self.raw_material + self.transformation + self.surface_treatment + self.labor + self.accessories
    }
}

/// One priced quote line.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PricedLine {
    pub line_id: usize,
    pub reference: String,
    pub description: String,
    /// Whole pieces, never below 1
    pub quantity: u32,
    pub quantity_source: QuantitySource,
    pub specification_source: SpecificationSource,
    pub profile_id: Option<String>,
    pub geometry: GeometrySnapshot,
    pub specification: SpecificationSnapshot,
    pub costs: CostBreakdown,
    pub unit_cost: f64,
    pub total_cost: f64,
    pub confidence: f64,
    pub method: MatchMethod,
    pub pricing: PricingPath,
    pub note: String,
}

/// Pieces from a raw extractor quantity: fractions floored, at least 1
pub fn floor_quantity(raw: f64) -> u32 {
    if raw.is_finite() && raw >= 1.0 {
        // `as` saturates at u32::MAX
        raw.floor() as u32
    } else {
        1
    }
}

fn measure(value: f64) -> f64 {
    if value.is_finite() && value > 0.0 {
        value
    } else {
        0.0
    }
}

/// Price one linkage.
pub fn price(
    line_id: usize,
    linkage: &LinkageRecord,
    treatment: SurfaceTreatment,
    params: &PricingParameters,
    catalog: &CostCatalog,
) -> PricedLine {
    let mut line = resolve_identity(line_id, linkage, treatment);

    let designation = match_profile_designation([
        line.description.as_str(),
        line.reference.as_str(),
        line.profile_id.as_deref().unwrap_or(""),
    ]);
    let profile = designation.as_ref().and_then(|d| catalog.find_profile(&d.text));
    // Unit items carry no geometry, so only specification rows use them
    let unit_item = match profile {
        None if !linkage.has_geometry() => catalog.match_unit_item(&line.description),
        _ => None,
    };

    if let Some(profile) = profile {
        apply_catalog_rates(&mut line, profile);
    } else if let Some(item) = unit_item {
        apply_unit_item_rates(&mut line, item);
    } else {
        let thickness = line
            .specification
            .thickness_mm
            .or_else(|| linkage.geometry.as_ref().and_then(|g| g.thickness_hint_mm))
            .map(measure)
            .filter(|&t| t > 0.0)
            .unwrap_or(DEFAULT_THICKNESS_MM);
        apply_formula(&mut line, thickness, treatment, params);
    }

    tracing::trace!(
        line_id,
        reference = %line.reference,
        pricing = ?line.pricing,
        family = designation.as_ref().map(|d| d.family),
        total_cost = line.total_cost,
        "line priced"
    );
    line
}

/// Identity, quantity and snapshots with the geometry > block > row precedence
fn resolve_identity(line_id: usize, linkage: &LinkageRecord, treatment: SurfaceTreatment) -> PricedLine {
    let spec = linkage.specification.as_ref();

    let (reference, description, raw_quantity) = if let Some(g) = &linkage.geometry {
        let reference = if g.layer.is_empty() { g.profile_id.clone() } else { g.layer.clone() };
        let entity = if g.entity_type.is_empty() { "Profile" } else { g.entity_type.as_str() };
        (reference, format!("{entity} - {}", g.layer), g.quantity)
    } else if let Some(b) = &linkage.block {
        let description = if b.description.is_empty() { "CAD block".to_string() } else { b.description.clone() };
        (b.profile_reference.clone(), description, b.quantity)
    } else if let Some(s) = spec {
        (s.reference.clone(), s.description.clone(), s.quantity.value().unwrap_or(1.0))
    } else {
        (String::new(), "Unidentified item".to_string(), 1.0)
    };

    let mut geometry = if let Some(g) = &linkage.geometry {
        GeometrySnapshot {
            perimeter_mm: measure(g.perimeter_mm),
            area_mm2: measure(g.area_mm2),
            length_mm: measure(g.effective_length_mm()),
            weight_kg: measure(g.weight_kg),
            complexity_score: g.complexity_score.max(1.0),
            holes_count: g.holes(),
            entity_type: g.entity_type.clone(),
        }
    } else if let Some(b) = &linkage.block {
        GeometrySnapshot {
            perimeter_mm: measure(b.unit_length_mm),
            area_mm2: measure(b.unit_area_mm2),
            length_mm: measure(b.unit_length_mm),
            ..GeometrySnapshot::default()
        }
    } else {
        GeometrySnapshot::default()
    };
    if geometry.length_mm == 0.0 {
        geometry.length_mm = spec
            .and_then(|s| s.length_mm.value())
            .map(measure)
            .unwrap_or(0.0);
    }

    let merged = &linkage.merged;
    let specification = SpecificationSnapshot {
        material: merged.material.clone(),
        finish: merged
            .finish
            .clone()
            .or_else(|| Some(treatment.display_name().to_string())),
        thickness_mm: merged.thickness_mm,
    };

    let specification_source = match (linkage.has_geometry(), spec.is_some()) {
        (true, true) => SpecificationSource::Both,
        (true, false) => SpecificationSource::Geometry,
        (false, _) => SpecificationSource::Specification,
    };

    let profile_id = linkage
        .geometry
        .as_ref()
        .map(|g| g.profile_id.clone())
        .filter(|id| !id.is_empty());

    PricedLine {
        line_id,
        reference,
        description,
        quantity: floor_quantity(raw_quantity),
        quantity_source: linkage.quantity_source,
        specification_source,
        profile_id,
        geometry,
        specification,
        costs: CostBreakdown::default(),
        unit_cost: 0.0,
        total_cost: 0.0,
        confidence: linkage.confidence,
        method: linkage.method,
        pricing: PricingPath::Formula,
        note: spec.map(|s| s.notes.clone()).unwrap_or_default(),
    }
}

fn apply_catalog_rates(line: &mut PricedLine, profile: &SteelProfile) {
    let length = if line.geometry.length_mm > 0.0 {
        Meters::from(Millimeters(line.geometry.length_mm))
    } else {
        Meters(1.0)
    };
    let cost = profile.calculate_cost(length);
    line.geometry.weight_kg = cost.weight_kg;
    apply_catalog_cost(line, &cost);
    line.note = format!("Catalog rates: {}", profile.designation);
}

fn apply_unit_item_rates(line: &mut PricedLine, item: &UnitItem) {
    apply_catalog_cost(line, &item.calculate_cost(1.0));
    line.note = format!("Catalog rates: {} per {}", item.designation, item.unit);
}

/// Spread a per-piece catalog cost over the line quantity
fn apply_catalog_cost(line: &mut PricedLine, cost: &CatalogCost) {
    let q = f64::from(line.quantity);
    let b = &cost.breakdown;

    line.costs = CostBreakdown {
        raw_material: b.material * q,
        transformation: b.fabrication * q,
        surface_treatment: b.painting * q,
        labor: (b.assembly + b.lifting) * q,
        accessories: (b.consumables + b.transport) * q,
    };
    line.unit_cost = cost.total_cost;
    line.total_cost = line.unit_cost * q;
    line.pricing = PricingPath::Catalog;
}

/// Weight estimate, filling stand-in measures where the estimate needs them
fn estimate_weight(g: &mut GeometrySnapshot, thickness_mm: f64) {
    if g.weight_kg > 0.0 {
        return;
    }
    if g.area_mm2 > 0.0 {
        let volume_mm3 = g.perimeter_mm * thickness_mm * g.length_mm.max(MIN_TREATED_LENGTH_MM);
        g.weight_kg = volume_mm3 / 1e9 * DENSITY_KG_M3;
    } else if g.perimeter_mm > 0.0 {
        let volume_mm3 = g.perimeter_mm * thickness_mm * thickness_mm;
        g.weight_kg = volume_mm3 / 1e9 * DENSITY_KG_M3;
    } else if g.length_mm > 0.0 {
        g.weight_kg = g.length_mm / 1000.0 * LINEAR_MASS_KG_M;
        g.perimeter_mm = g.length_mm * LENGTH_TO_PERIMETER;
    } else {
        g.weight_kg = STAND_IN_WEIGHT_KG;
        g.length_mm = STAND_IN_LENGTH_MM;
        g.perimeter_mm = STAND_IN_PERIMETER_MM;
    }
}

fn apply_formula(line: &mut PricedLine, thickness_mm: f64, treatment: SurfaceTreatment, params: &PricingParameters) {
    estimate_weight(&mut line.geometry, thickness_mm);

    let g = &line.geometry;
    let q = f64::from(line.quantity);
    let complexity = g.complexity_score;

    let raw_material = g.weight_kg * params.effective_metal_price_eur_kg() * q;
    let transformation = g.weight_kg * params.extrusion_rate_eur_kg * complexity * q;

    let treated_area_m2 = g.perimeter_mm * g.length_mm.max(MIN_TREATED_LENGTH_MM) / 1e6;
    let surface_treatment = treated_area_m2 * treatment.rate(params) * q;

    let minutes_per_piece = params.cutting_time_min
        + f64::from(g.holes_count) * params.hole_machining_time_min
        + (complexity - 1.0) * params.complexity_time_min
        + params.assembly_time_min;
    let labor = minutes_per_piece * q / 60.0 * params.labor_rate_eur_hr;

    let accessories = raw_material * params.accessories_pct / 100.0;

    line.costs = CostBreakdown {
        raw_material,
        transformation,
        surface_treatment,
        labor,
        accessories,
    };
    line.unit_cost = line.costs.total() / q;
    line.total_cost = line.unit_cost * q;
    line.pricing = PricingPath::Formula;
}

/// Price every linkage, optionally on scoped worker threads.
///
/// Line ids are 1-based in linkage order, and results are returned in that
/// order whatever the thread count.
pub fn price_lines(
    linkages: &[LinkageRecord],
    treatment: SurfaceTreatment,
    params: &PricingParameters,
    catalog: &CostCatalog,
    workers: usize,
) -> Vec<PricedLine> {
    let price_at = |(i, linkage): (usize, &LinkageRecord)| price(i + 1, linkage, treatment, params, catalog);

    if workers <= 1 || linkages.len() < 2 {
        return linkages.iter().enumerate().map(price_at).collect();
    }

    let chunk_size = linkages.len().div_ceil(workers);
    std::thread::scope(|scope| {
        let handles: Vec<_> = linkages
            .chunks(chunk_size)
            .enumerate()
            .map(|(chunk_idx, chunk)| {
                let offset = chunk_idx * chunk_size;
                scope.spawn(move || {
                    chunk
                        .iter()
                        .enumerate()
                        .map(|(i, linkage)| price_at((offset + i, linkage)))
                        .collect::<Vec<_>>()
                })
            })
            .collect();

        let mut lines = Vec::with_capacity(linkages.len());
        for handle in handles {
            match handle.join() {
                Ok(chunk) => lines.extend(chunk),
                Err(panic) => std::panic::resume_unwind(panic),
            }
        }
        lines
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calculations::correlate::{correlate, MergedSpecification};
    use crate::inputs::{BlockAggregate, DocumentPayload, GeometryPayload, GeometryRecord, SpecificationRecord};

    fn linkage_for(record: GeometryRecord) -> LinkageRecord {
        let geo = GeometryPayload::with_profiles(vec![record]);
        correlate(&geo, &DocumentPayload::default()).linkages.remove(0)
    }

    fn price_default(linkage: &LinkageRecord) -> PricedLine {
        price(
            1,
            linkage,
            SurfaceTreatment::PowderCoatingStandard,
            &PricingParameters::default(),
            &CostCatalog::standard(),
        )
    }

    #[test]
    fn test_floor_quantity() {
        assert_eq!(floor_quantity(0.0), 1);
        assert_eq!(floor_quantity(0.4), 1);
        assert_eq!(floor_quantity(-3.0), 1);
        assert_eq!(floor_quantity(f64::NAN), 1);
        assert_eq!(floor_quantity(2.9), 2);
        assert_eq!(floor_quantity(7.0), 7);
    }

    #[test]
    fn test_perimeter_only_profile() {
        let line = price_default(&linkage_for(GeometryRecord {
            profile_id: "P1".into(),
            layer: "0".into(),
            perimeter_mm: 400.0,
            length_mm: 1000.0,
            holes_count: 2,
            ..Default::default()
        }));

        assert!((line.geometry.weight_kg - 0.00432).abs() < 1e-12);
        assert_eq!(line.quantity, 1);
        assert_eq!(line.quantity_source, QuantitySource::Geometry);
        assert_eq!(line.method, MatchMethod::None);
        assert_eq!(line.pricing, PricingPath::Formula);

        // (2 cut + 2 x 5 holes + 8 assembly) minutes at 35 EUR/h
        assert!((line.costs.labor - 20.0 / 60.0 * 35.0).abs() < 1e-9);
        // 0.4 m² at 15 EUR/m²
        assert!((line.costs.surface_treatment - 6.0).abs() < 1e-9);
        assert!((line.costs.accessories - line.costs.raw_material * 0.08).abs() < 1e-12);
        assert_eq!(line.specification.finish.as_deref(), Some("Standard powder coating"));
    }

    #[test]
    fn test_area_branch_uses_full_metre() {
        let line = price_default(&linkage_for(GeometryRecord {
            perimeter_mm: 200.0,
            area_mm2: 500.0,
            length_mm: 300.0,
            ..Default::default()
        }));
        // 200 x 2 x max(300, 1000) mm³ of aluminium
        assert!((line.geometry.weight_kg - 200.0 * 2.0 * 1000.0 / 1e9 * 2700.0).abs() < 1e-12);
    }

    #[test]
    fn test_length_only_and_stand_in() {
        let line = price_default(&linkage_for(GeometryRecord {
            length_mm: 3000.0,
            ..Default::default()
        }));
        assert!((line.geometry.weight_kg - 1.5).abs() < 1e-12);
        assert!((line.geometry.perimeter_mm - 300.0).abs() < 1e-12);

        let line = price_default(&linkage_for(GeometryRecord::default()));
        assert_eq!(line.geometry.weight_kg, 0.5);
        assert_eq!(line.geometry.length_mm, 1000.0);
        assert_eq!(line.geometry.perimeter_mm, 100.0);
    }

    #[test]
    fn test_complexity_scales_formula_costs() {
        let simple = price_default(&linkage_for(GeometryRecord {
            perimeter_mm: 400.0,
            weight_kg: 2.0,
            ..Default::default()
        }));
        let complex = price_default(&linkage_for(GeometryRecord {
            perimeter_mm: 400.0,
            weight_kg: 2.0,
            complexity_score: 2.0,
            ..Default::default()
        }));
        assert!((complex.costs.transformation - 2.0 * simple.costs.transformation).abs() < 1e-9);
        // One extra complexity unit adds 5 minutes
        assert!((complex.costs.labor - simple.costs.labor - 5.0 / 60.0 * 35.0).abs() < 1e-9);
    }

    #[test]
    fn test_catalog_path_ignores_complexity() {
        let record = GeometryRecord {
            layer: "IPE 300".into(),
            entity_type: "LINE".into(),
            length_mm: 6000.0,
            complexity_score: 3.0,
            quantity: 2.0,
            ..Default::default()
        };
        let line = price_default(&linkage_for(record));

        assert_eq!(line.pricing, PricingPath::Catalog);
        let weight = 42.2 * 6.0;
        assert!((line.geometry.weight_kg - weight).abs() < 1e-9);
        assert!((line.costs.raw_material - weight * 0.85 * 2.0).abs() < 1e-9);
        assert!((line.costs.transformation - weight * 0.25 * 2.0).abs() < 1e-9);
        assert!((line.costs.surface_treatment - 1.16 * 6.0 * 13.0 * 2.0).abs() < 1e-9);
        assert!((line.costs.labor - weight * 0.25 * 2.0).abs() < 1e-9);
        assert!((line.costs.accessories - weight * 0.07 * 2.0).abs() < 1e-9);
        assert!((line.total_cost - line.unit_cost * 2.0).abs() < 1e-9);
        assert_eq!(line.note, "Catalog rates: IPE 300");
    }

    #[test]
    fn test_catalog_unknown_length_prices_one_metre() {
        let linkage = correlate(
            &GeometryPayload::default(),
            &DocumentPayload::with_rows(vec![SpecificationRecord::new("B-7", "Pilar HEB200", 1.0)]),
        )
        .linkages
        .remove(0);
        let line = price_default(&linkage);
        assert_eq!(line.pricing, PricingPath::Catalog);
        assert!((line.geometry.weight_kg - 61.3).abs() < 1e-9);
    }

    #[test]
    fn test_cladding_row_priced_per_catalog_unit() {
        let linkage = correlate(
            &GeometryPayload::default(),
            &DocumentPayload::with_rows(vec![SpecificationRecord::new("F-1", "Painel fachada PIR 50 mm", 120.0)]),
        )
        .linkages
        .remove(0);
        let line = price_default(&linkage);

        assert_eq!(line.pricing, PricingPath::Catalog);
        assert_eq!(line.quantity, 120);
        assert!((line.costs.raw_material - 22.0 * 120.0).abs() < 1e-9);
        assert!((line.costs.labor - (5.0 + 1.3) * 120.0).abs() < 1e-9);
        assert_eq!(line.costs.surface_treatment, 0.0);
        assert!((line.unit_cost - 28.3).abs() < 1e-9);
        assert!((line.total_cost - 28.3 * 120.0).abs() < 1e-9);
        assert_eq!(line.note, "Catalog rates: PAINEL FACHADA PIR 50MM per m²");
    }

    #[test]
    fn test_geometry_lines_never_use_unit_items() {
        let line = price_default(&linkage_for(GeometryRecord {
            layer: "CUME".into(),
            perimeter_mm: 400.0,
            ..Default::default()
        }));
        assert_eq!(line.pricing, PricingPath::Formula);
    }

    #[test]
    fn test_designation_missing_from_catalog_uses_formula() {
        let linkage = correlate(
            &GeometryPayload::default(),
            &DocumentPayload::with_rows(vec![SpecificationRecord::new("B-8", "Viga IPE 750", 1.0)]),
        )
        .linkages
        .remove(0);
        assert_eq!(price_default(&linkage).pricing, PricingPath::Formula);
    }

    #[test]
    fn test_specification_length_and_thickness() {
        let mut row = SpecificationRecord::new("J-2", "Caixilho", 3.7);
        row.length_mm = 2500.0.into();
        row.thickness_mm = 1.5.into();
        let linkage = correlate(&GeometryPayload::default(), &DocumentPayload::with_rows(vec![row]))
            .linkages
            .remove(0);
        let line = price_default(&linkage);

        assert_eq!(line.quantity, 3);
        assert_eq!(line.specification_source, SpecificationSource::Specification);
        assert_eq!(line.specification.thickness_mm, Some(1.5));
        // Length only: 2.5 m at 0.5 kg/m
        assert!((line.geometry.weight_kg - 1.25).abs() < 1e-12);
    }

    #[test]
    fn test_block_aggregate_identity() {
        let linkage = LinkageRecord {
            geometry: None,
            block: Some(BlockAggregate {
                profile_reference: "BLK-9".into(),
                quantity: 12.0,
                unit_length_mm: 800.0,
                ..Default::default()
            }),
            specification: None,
            quantity_source: QuantitySource::Geometry,
            method: MatchMethod::BlockCount,
            confidence: 0.5,
            merged: MergedSpecification::default(),
        };
        let line = price_default(&linkage);
        assert_eq!(line.reference, "BLK-9");
        assert_eq!(line.description, "CAD block");
        assert_eq!(line.quantity, 12);
        assert_eq!(line.specification_source, SpecificationSource::Geometry);
        assert_eq!(line.geometry.length_mm, 800.0);
    }

    #[test]
    fn test_no_treatment_costs_nothing() {
        let linkage = linkage_for(GeometryRecord {
            perimeter_mm: 400.0,
            ..Default::default()
        });
        let line = price(
            1,
            &linkage,
            SurfaceTreatment::None,
            &PricingParameters::default(),
            &CostCatalog::standard(),
        );
        assert_eq!(line.costs.surface_treatment, 0.0);
        assert_eq!(line.specification.finish.as_deref(), Some("No finish"));
    }

    #[test]
    fn test_parallel_pricing_keeps_order() {
        let records: Vec<_> = (0..9)
            .map(|i| GeometryRecord {
                profile_id: format!("P{i}"),
                perimeter_mm: 100.0 + i as f64,
                ..Default::default()
            })
            .collect();
        let linkages = correlate(&GeometryPayload::with_profiles(records), &DocumentPayload::default()).linkages;
        let params = PricingParameters::default();
        let catalog = CostCatalog::standard();

        let serial = price_lines(&linkages, SurfaceTreatment::default(), &params, &catalog, 1);
        let parallel = price_lines(&linkages, SurfaceTreatment::default(), &params, &catalog, 4);
        assert_eq!(serial, parallel);
        let ids: Vec<_> = parallel.iter().map(|l| l.line_id).collect();
        assert_eq!(ids, (1..=9).collect::<Vec<_>>());
    }
}
