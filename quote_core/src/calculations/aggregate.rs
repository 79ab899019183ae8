//! # Budget Aggregation
//!
//! Rolls priced lines up into the quote summary:
//!
//! ```text
//! waste %   = clamp(base + (avg complexity - 1) x complexity waste, 0, 20)
//! waste     = raw material x waste %
//! direct    = raw + transformation + surface + labor + accessories + waste
//! overhead  = direct x overhead %
//! subtotal  = direct + overhead
//! margin    = subtotal x margin %
//! total     = subtotal + margin
//! hours     = labor / labor rate
//! ```

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::line_pricer::PricedLine;
use crate::params::PricingParameters;

/// Ceiling of the applied waste allowance (%), whatever the parameters say
pub const MAX_WASTE_PCT: f64 = 20.0;

/// Totals, cost layers and metrics for one calculation run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BudgetSummary {
    pub project_name: String,
    pub created_at: DateTime<Utc>,

    // Sources
    pub has_geometry: bool,
    pub has_specification: bool,

    // Quantities
    pub total_profiles: usize,
    pub total_quantity: u64,
    /// Σ weight × quantity (kg)
    pub total_weight_kg: f64,
    /// Σ length × quantity (mm)
    pub total_length_mm: f64,

    // Cost breakdown (EUR)
    pub raw_material_total: f64,
    pub transformation_total: f64,
    pub surface_treatment_total: f64,
    pub labor_total: f64,
    pub accessories_total: f64,
    pub waste_cost: f64,
    pub overhead_cost: f64,
    pub subtotal: f64,
    pub profit_margin: f64,
    pub total_quote: f64,

    // Metrics
    pub waste_percentage_applied: f64,
    pub average_complexity: f64,
    pub estimated_production_hours: f64,
}

impl BudgetSummary {
    /// Sum of the five component totals
    pub fn component_total(&self) -> f64 {
        self.raw_material_total
            + self.transformation_total
            + self.surface_treatment_total
            + self.labor_total
            + self.accessories_total
    }

    /// Labor cost per piece
    pub fn labor_per_unit(&self) -> f64 {
        self.labor_total / self.total_quantity.max(1) as f64
    }
}

/// Aggregate priced lines into a summary.
///
/// The summary is stamped with the current time; project name and source
/// flags are left for the caller to fill.
///
/// # Example
///
/// ```rust
/// use quote_core::calculations::aggregate::aggregate;
/// use quote_core::params::PricingParameters;
///
/// let summary = aggregate(&[], &PricingParameters::default());
/// assert_eq!(summary.total_quote, 0.0);
/// assert_eq!(summary.average_complexity, 0.0);
/// ```
pub fn aggregate(lines: &[PricedLine], params: &PricingParameters) -> BudgetSummary {
    let sum = |f: fn(&PricedLine) -> f64| lines.iter().map(f).sum::<f64>();

    let raw_material_total = sum(|l| l.costs.raw_material);
    let transformation_total = sum(|l| l.costs.transformation);
    let surface_treatment_total = sum(|l| l.costs.surface_treatment);
    let labor_total = sum(|l| l.costs.labor);
    let accessories_total = sum(|l| l.costs.accessories);

    let average_complexity = if lines.is_empty() {
        0.0
    } else {
        sum(|l| l.geometry.complexity_score) / lines.len() as f64
    };

    let waste_pct = (params.base_waste_pct + (average_complexity - 1.0) * params.complexity_waste_pct)
        .min(MAX_WASTE_PCT)
        .max(0.0);
    let waste_cost = raw_material_total * waste_pct / 100.0;

    let direct = raw_material_total
        + transformation_total
        + surface_treatment_total
        + labor_total
        + accessories_total
        + waste_cost;
    let overhead_cost = direct * params.overhead_pct / 100.0;
    let subtotal = direct + overhead_cost;
    let profit_margin = subtotal * params.margin_pct / 100.0;

    let summary = BudgetSummary {
        project_name: String::new(),
        created_at: Utc::now(),
        has_geometry: false,
        has_specification: false,
        total_profiles: lines.len(),
        total_quantity: lines.iter().map(|l| u64::from(l.quantity)).sum(),
        total_weight_kg: sum(|l| l.geometry.weight_kg * f64::from(l.quantity)),
        total_length_mm: sum(|l| l.geometry.length_mm * f64::from(l.quantity)),
        raw_material_total,
        transformation_total,
        surface_treatment_total,
        labor_total,
        accessories_total,
        waste_cost,
        overhead_cost,
        subtotal,
        profit_margin,
        total_quote: subtotal + profit_margin,
        waste_percentage_applied: waste_pct,
        average_complexity,
        estimated_production_hours: labor_total / params.labor_rate_eur_hr,
    };

    tracing::debug!(
        lines = summary.total_profiles,
        waste_pct,
        total_quote = summary.total_quote,
        "budget aggregated"
    );
    summary
}
