//! # Recommendations
//!
//! Advisory notes derived from threshold checks on a finished quote.

use serde::{Deserialize, Serialize};

use super::aggregate::BudgetSummary;
use super::line_pricer::PricedLine;
use crate::params::PricingParameters;

/// Waste allowance above which cutting optimization is suggested (%)
pub const HIGH_WASTE_PCT: f64 = 12.0;
/// Labor cost per piece above which automation is suggested (EUR)
pub const HIGH_LABOR_PER_UNIT_EUR: f64 = 15.0;
/// Total weight qualifying for supplier volume pricing (kg)
pub const VOLUME_DISCOUNT_KG: f64 = 1000.0;
/// Lines below this correlation confidence need manual review
pub const LOW_CONFIDENCE: f64 = 0.5;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RecommendationCategory {
    MaterialOptimization,
    LaborEfficiency,
    PriceProtection,
    VolumeDiscount,
    DataQuality,
}

impl RecommendationCategory {
    pub fn display_name(&self) -> &'static str {
        match self {
            RecommendationCategory::MaterialOptimization => "Material Optimization",
            RecommendationCategory::LaborEfficiency => "Labor Efficiency",
            RecommendationCategory::PriceProtection => "Price Protection",
            RecommendationCategory::VolumeDiscount => "Volume Discount",
            RecommendationCategory::DataQuality => "Data Quality",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Priority {
    High,
    Medium,
    Low,
}

/// One advisory note
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Recommendation {
    pub category: RecommendationCategory,
    pub priority: Priority,
    pub suggestion: String,
    /// Estimated savings in EUR; `None` when not quantifiable
    pub potential_savings: Option<f64>,
}

/// Derive recommendations for a priced quote.
///
/// A price-protection reminder is always included.
pub fn recommend(summary: &BudgetSummary, lines: &[PricedLine], params: &PricingParameters) -> Vec<Recommendation> {
    let mut out = Vec::new();

    if summary.waste_percentage_applied > HIGH_WASTE_PCT {
        out.push(Recommendation {
            category: RecommendationCategory::MaterialOptimization,
            priority: Priority::High,
            suggestion: format!(
                "High waste allowance ({:.1}%) from complex profiles. Consider cut optimization or alternative patterns.",
                summary.waste_percentage_applied
            ),
            potential_savings: Some(summary.waste_cost * 0.3),
        });
    }

    if summary.labor_per_unit() > HIGH_LABOR_PER_UNIT_EUR {
        out.push(Recommendation {
            category: RecommendationCategory::LaborEfficiency,
            priority: Priority::Medium,
            suggestion: "High labor cost per piece. Consider CNC automation for repetitive operations.".to_string(),
            potential_savings: Some(summary.labor_total * 0.2),
        });
    }

    out.push(Recommendation {
        category: RecommendationCategory::PriceProtection,
        priority: Priority::Low,
        suggestion: format!(
            "Current metal hedging buffer is {}%. Consider forward contracts if the project runs longer than 3 months.",
            params.hedging_buffer_pct
        ),
        potential_savings: None,
    });

    if summary.total_weight_kg > VOLUME_DISCOUNT_KG {
        out.push(Recommendation {
            category: RecommendationCategory::VolumeDiscount,
            priority: Priority::Medium,
            suggestion: format!(
                "Order volume ({:.0} kg) qualifies for volume pricing. Negotiate a 5-8% supplier discount.",
                summary.total_weight_kg
            ),
            potential_savings: Some(summary.raw_material_total * 0.06),
        });
    }

    let low_confidence = lines.iter().filter(|l| l.confidence < LOW_CONFIDENCE).count();
    if low_confidence > 0 {
        out.push(Recommendation {
            category: RecommendationCategory::DataQuality,
            priority: Priority::High,
            suggestion: format!(
                "{low_confidence} items have low correlation confidence. Review references manually for better accuracy."
            ),
            potential_savings: None,
        });
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calculations::aggregate::aggregate;

    #[test]
    fn test_always_price_protection() {
        let params = PricingParameters::default();
        let summary = aggregate(&[], &params);
        let recs = recommend(&summary, &[], &params);
        assert_eq!(recs.len(), 1);
        assert_eq!(recs[0].category, RecommendationCategory::PriceProtection);
        assert!(recs[0].suggestion.contains("5%"));
        assert_eq!(recs[0].potential_savings, None);
    }

    #[test]
    fn test_thresholds() {
        let params = PricingParameters::default();
        let mut summary = aggregate(&[], &params);
        summary.waste_percentage_applied = 16.0;
        summary.waste_cost = 100.0;
        summary.labor_total = 200.0;
        summary.total_quantity = 10;
        summary.total_weight_kg = 1500.0;
        summary.raw_material_total = 1000.0;

        let recs = recommend(&summary, &[], &params);
        let categories: Vec<_> = recs.iter().map(|r| r.category).collect();
        assert_eq!(
            categories,
            vec![
                RecommendationCategory::MaterialOptimization,
                RecommendationCategory::LaborEfficiency,
                RecommendationCategory::PriceProtection,
                RecommendationCategory::VolumeDiscount,
            ]
        );
        assert!((recs[0].potential_savings.unwrap() - 30.0).abs() < 1e-9);
        assert!((recs[1].potential_savings.unwrap() - 40.0).abs() < 1e-9);
        assert!((recs[3].potential_savings.unwrap() - 60.0).abs() < 1e-9);
    }
}
