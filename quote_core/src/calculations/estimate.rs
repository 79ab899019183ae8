//! # Quick Estimates
//!
//! Rough figures that need no geometry: a per-kg estimate from total
//! weight, and a re-run of the margin layer on an existing summary.
//!
//! ## Example
//!
//! ```rust
//! use quote_core::calculations::estimate::{quick_estimate, ComplexityLevel};
//!
//! let estimate = quick_estimate(120.0, ComplexityLevel::parse("high"));
//! assert_eq!(estimate.price_per_kg, 20.0);
//! assert_eq!(estimate.estimated_total, 2400.0);
//! ```

use serde::{Deserialize, Serialize};

use super::aggregate::BudgetSummary;
use crate::errors::{QuoteError, QuoteResult};

/// Base fabrication rate for quick estimates (EUR/kg)
pub const QUICK_BASE_RATE_EUR_KG: f64 = 10.0;

/// Coarse complexity level for quick estimates
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ComplexityLevel {
    Low,
    #[default]
    Medium,
    High,
}

impl ComplexityLevel {
    pub const ALL: [ComplexityLevel; 3] = [ComplexityLevel::Low, ComplexityLevel::Medium, ComplexityLevel::High];

    pub fn factor(&self) -> f64 {
        match self {
            ComplexityLevel::Low => 1.0,
            ComplexityLevel::Medium => 1.5,
            ComplexityLevel::High => 2.0,
        }
    }

    /// Parse a level name; anything unrecognized is medium
    pub fn parse(text: &str) -> ComplexityLevel {
        match text.trim().to_lowercase().as_str() {
            "low" => ComplexityLevel::Low,
            "high" => ComplexityLevel::High,
            _ => ComplexityLevel::Medium,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct QuickEstimate {
    pub estimated_total: f64,
    pub price_per_kg: f64,
    pub complexity_factor: f64,
}

/// Estimate from total weight alone
pub fn quick_estimate(weight_kg: f64, complexity: ComplexityLevel) -> QuickEstimate {
    let factor = complexity.factor();
    let price_per_kg = QUICK_BASE_RATE_EUR_KG * factor;
    QuickEstimate {
        estimated_total: weight_kg * price_per_kg,
        price_per_kg,
        complexity_factor: factor,
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MarginSimulation {
    pub target_margin_pct: f64,
    pub original_total: f64,
    pub new_margin: f64,
    pub new_total: f64,
}

/// Re-apply the margin layer to a summary's subtotal at another rate
pub fn simulate_margin(summary: &BudgetSummary, target_margin_pct: f64) -> QuoteResult<MarginSimulation> {
    if !target_margin_pct.is_finite() || target_margin_pct < 0.0 {
        return Err(QuoteError::invalid_input(
            "target_margin_pct",
            target_margin_pct.to_string(),
            "Margin must be a non-negative percentage",
        ));
    }
    let new_margin = summary.subtotal * target_margin_pct / 100.0;
    Ok(MarginSimulation {
        target_margin_pct,
        original_total: summary.total_quote,
        new_margin,
        new_total: summary.subtotal + new_margin,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calculations::aggregate::aggregate;
    use crate::params::PricingParameters;

    #[test]
    fn test_unknown_level_is_medium() {
        assert_eq!(ComplexityLevel::parse("extreme"), ComplexityLevel::Medium);
        let e = quick_estimate(100.0, ComplexityLevel::parse("LOW"));
        assert_eq!(e.estimated_total, 1000.0);
        assert_eq!(e.complexity_factor, 1.0);
    }

    #[test]
    fn test_simulate_margin() {
        let mut summary = aggregate(&[], &PricingParameters::default());
        summary.subtotal = 1000.0;
        summary.total_quote = 1200.0;

        let sim = simulate_margin(&summary, 25.0).unwrap();
        assert_eq!(sim.new_margin, 250.0);
        assert_eq!(sim.new_total, 1250.0);
        assert_eq!(sim.original_total, 1200.0);

        assert!(simulate_margin(&summary, -5.0).is_err());
    }
}
