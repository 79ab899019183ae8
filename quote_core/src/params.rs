//! # Pricing Parameters
//!
//! The configuration record supplied to every calculation run: metal
//! pricing, surface-treatment rates, labor time constants and the
//! waste/overhead/margin layers. Every field has a documented default and
//! can be replaced independently, either by deserializing a partial TOML or
//! JSON document or by applying [`PricingOverrides`].
//!
//! ## Example
//!
//! ```rust
//! use quote_core::params::{PricingOverrides, PricingParameters, SurfaceTreatment};
//!
//! let params = PricingParameters::from_toml_str("labor_rate_eur_hr = 42.0").unwrap();
//! assert_eq!(params.labor_rate_eur_hr, 42.0);
//! assert_eq!(params.margin_pct, 20.0); // untouched fields keep defaults
//!
//! let tuned = PricingOverrides { margin_pct: Some(12.5), ..Default::default() }.apply(&params);
//! assert_eq!(tuned.margin_pct, 12.5);
//!
//! assert_eq!(SurfaceTreatment::AnodizingColored.rate(&tuned), 18.0);
//! ```

use serde::{Deserialize, Serialize};

use crate::errors::{QuoteError, QuoteResult};

/// Pricing configuration for one calculation run.
///
/// Prices in USD are converted with `eur_to_usd`; everything else is in EUR.
/// Percentages are whole percents (15.0 = 15%).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PricingParameters {
    /// Metal spot price (USD/kg)
    pub metal_price_usd_kg: f64,
    /// Buffer added to the spot price against price movement (%)
    pub hedging_buffer_pct: f64,
    /// Billet premium over spot (USD/kg)
    pub billet_premium_usd_kg: f64,

    /// Alloy premiums (%)
    pub alloy_6063_premium_pct: f64,
    pub alloy_6060_premium_pct: f64,
    pub alloy_6082_premium_pct: f64,

    /// Surface treatment rates (EUR/m²)
    pub anodizing_natural_eur_m2: f64,
    pub anodizing_colored_eur_m2: f64,
    pub powder_coating_standard_eur_m2: f64,
    pub powder_coating_qualicoat_eur_m2: f64,
    pub powder_coating_seaside_eur_m2: f64,

    /// Shop labor rate (EUR/h)
    pub labor_rate_eur_hr: f64,
    /// Cutting time per piece (min)
    pub cutting_time_min: f64,
    /// Machining time per hole (min)
    pub hole_machining_time_min: f64,
    /// Assembly time per component (min)
    pub assembly_time_min: f64,
    /// Extra minutes per unit of complexity above 1.0
    pub complexity_time_min: f64,

    /// Extrusion/transformation base rate (EUR/kg), scaled by complexity
    pub extrusion_rate_eur_kg: f64,
    /// Accessories as a share of raw material cost (%)
    pub accessories_pct: f64,

    /// Waste allowance for simple profiles (%)
    pub base_waste_pct: f64,
    /// Extra waste per unit of average complexity above 1.0 (%)
    pub complexity_waste_pct: f64,
    pub overhead_pct: f64,
    pub margin_pct: f64,

    /// USD per EUR
    pub eur_to_usd: f64,
}

impl Default for PricingParameters {
    fn default() -> Self {
        PricingParameters {
            metal_price_usd_kg: 2.35,
            hedging_buffer_pct: 5.0,
            billet_premium_usd_kg: 0.45,
            alloy_6063_premium_pct: 0.0,
            alloy_6060_premium_pct: 2.0,
            alloy_6082_premium_pct: 8.0,
            anodizing_natural_eur_m2: 12.0,
            anodizing_colored_eur_m2: 18.0,
            powder_coating_standard_eur_m2: 15.0,
            powder_coating_qualicoat_eur_m2: 22.0,
            powder_coating_seaside_eur_m2: 35.0,
            labor_rate_eur_hr: 35.0,
            cutting_time_min: 2.0,
            hole_machining_time_min: 5.0,
            assembly_time_min: 8.0,
            complexity_time_min: 5.0,
            extrusion_rate_eur_kg: 1.50,
            accessories_pct: 8.0,
            base_waste_pct: 8.0,
            complexity_waste_pct: 4.0,
            overhead_pct: 15.0,
            margin_pct: 20.0,
            eur_to_usd: 1.08,
        }
    }
}

impl PricingParameters {
    /// Metal price in EUR/kg after hedging buffer and billet premium
    pub fn effective_metal_price_eur_kg(&self) -> f64 {
        let hedged = self.metal_price_usd_kg * (1.0 + self.hedging_buffer_pct / 100.0);
        (hedged + self.billet_premium_usd_kg) / self.eur_to_usd
    }

    /// Validate parameters before a run.
    ///
    /// Rates, prices and percentages must be finite and non-negative; the
    /// labor rate and currency factor must be positive.
    pub fn validate(&self) -> QuoteResult<()> {
        let non_negative = [
            ("metal_price_usd_kg", self.metal_price_usd_kg),
            ("hedging_buffer_pct", self.hedging_buffer_pct),
            ("billet_premium_usd_kg", self.billet_premium_usd_kg),
            ("alloy_6063_premium_pct", self.alloy_6063_premium_pct),
            ("alloy_6060_premium_pct", self.alloy_6060_premium_pct),
            ("alloy_6082_premium_pct", self.alloy_6082_premium_pct),
            ("anodizing_natural_eur_m2", self.anodizing_natural_eur_m2),
            ("anodizing_colored_eur_m2", self.anodizing_colored_eur_m2),
            ("powder_coating_standard_eur_m2", self.powder_coating_standard_eur_m2),
            ("powder_coating_qualicoat_eur_m2", self.powder_coating_qualicoat_eur_m2),
            ("powder_coating_seaside_eur_m2", self.powder_coating_seaside_eur_m2),
            ("cutting_time_min", self.cutting_time_min),
            ("hole_machining_time_min", self.hole_machining_time_min),
            ("assembly_time_min", self.assembly_time_min),
            ("complexity_time_min", self.complexity_time_min),
            ("extrusion_rate_eur_kg", self.extrusion_rate_eur_kg),
            ("accessories_pct", self.accessories_pct),
            ("base_waste_pct", self.base_waste_pct),
            ("complexity_waste_pct", self.complexity_waste_pct),
            ("overhead_pct", self.overhead_pct),
            ("margin_pct", self.margin_pct),
        ];
        for (field, value) in non_negative {
            if !value.is_finite() || value < 0.0 {
                return Err(QuoteError::invalid_input(
                    field,
                    value.to_string(),
                    "Must be a non-negative number",
                ));
            }
        }

        for (field, value) in [
            ("labor_rate_eur_hr", self.labor_rate_eur_hr),
            ("eur_to_usd", self.eur_to_usd),
        ] {
            if !value.is_finite() || value <= 0.0 {
                return Err(QuoteError::invalid_input(
                    field,
                    value.to_string(),
                    "Must be positive",
                ));
            }
        }
        Ok(())
    }

    /// Parse and validate a (possibly partial) TOML parameter document
    pub fn from_toml_str(text: &str) -> QuoteResult<Self> {
        let params: PricingParameters =
            toml::from_str(text).map_err(|e| QuoteError::config("TOML parameters", e.to_string()))?;
        params.validate()?;
        Ok(params)
    }

    /// Parse and validate a (possibly partial) JSON parameter document
    pub fn from_json_str(text: &str) -> QuoteResult<Self> {
        let params: PricingParameters =
            serde_json::from_str(text).map_err(|e| QuoteError::config("JSON parameters", e.to_string()))?;
        params.validate()?;
        Ok(params)
    }
}

// ============================================================================
// Surface Treatments
// ============================================================================

/// Finish applied to priced profiles
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SurfaceTreatment {
    None,
    AnodizingNatural,
    AnodizingColored,
    #[default]
    PowderCoatingStandard,
    PowderCoatingQualicoat,
    PowderCoatingSeaside,
}

impl SurfaceTreatment {
    /// All treatments for UI/CLI listings
    pub const ALL: [SurfaceTreatment; 6] = [
        SurfaceTreatment::None,
        SurfaceTreatment::AnodizingNatural,
        SurfaceTreatment::AnodizingColored,
        SurfaceTreatment::PowderCoatingStandard,
        SurfaceTreatment::PowderCoatingQualicoat,
        SurfaceTreatment::PowderCoatingSeaside,
    ];

    /// Wire code
    pub fn code(&self) -> &'static str {
        match self {
            SurfaceTreatment::None => "none",
            SurfaceTreatment::AnodizingNatural => "anodizing_natural",
            SurfaceTreatment::AnodizingColored => "anodizing_colored",
            SurfaceTreatment::PowderCoatingStandard => "powder_coating_standard",
            SurfaceTreatment::PowderCoatingQualicoat => "powder_coating_qualicoat",
            SurfaceTreatment::PowderCoatingSeaside => "powder_coating_seaside",
        }
    }

    /// Get display name
    pub fn display_name(&self) -> &'static str {
        match self {
            SurfaceTreatment::None => "No finish",
            SurfaceTreatment::AnodizingNatural => "Natural anodizing",
            SurfaceTreatment::AnodizingColored => "Colored anodizing",
            SurfaceTreatment::PowderCoatingStandard => "Standard powder coating",
            SurfaceTreatment::PowderCoatingQualicoat => "Qualicoat powder coating",
            SurfaceTreatment::PowderCoatingSeaside => "Seaside powder coating",
        }
    }

    /// Area rate (EUR/m²) under the given parameters
    pub fn rate(&self, params: &PricingParameters) -> f64 {
        match self {
            SurfaceTreatment::None => 0.0,
            SurfaceTreatment::AnodizingNatural => params.anodizing_natural_eur_m2,
            SurfaceTreatment::AnodizingColored => params.anodizing_colored_eur_m2,
            SurfaceTreatment::PowderCoatingStandard => params.powder_coating_standard_eur_m2,
            SurfaceTreatment::PowderCoatingQualicoat => params.powder_coating_qualicoat_eur_m2,
            SurfaceTreatment::PowderCoatingSeaside => params.powder_coating_seaside_eur_m2,
        }
    }

    /// Look up a treatment by wire code
    pub fn from_code(code: &str) -> Option<SurfaceTreatment> {
        let code = code.trim().to_lowercase();
        Self::ALL.into_iter().find(|t| t.code() == code)
    }

    /// Look up a treatment by wire code; unknown codes get standard powder coating
    pub fn parse_or_default(code: &str) -> SurfaceTreatment {
        Self::from_code(code).unwrap_or_else(|| {
            tracing::warn!(code, "unknown surface treatment, using standard powder coating");
            SurfaceTreatment::default()
        })
    }
}

impl std::fmt::Display for SurfaceTreatment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

// ============================================================================
// Per-call Overrides
// ============================================================================

/// Per-call replacements for individual pricing parameters.
///
/// `None` keeps the base value.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct PricingOverrides {
    pub metal_price_usd_kg: Option<f64>,
    pub hedging_buffer_pct: Option<f64>,
    pub billet_premium_usd_kg: Option<f64>,
    pub anodizing_natural_eur_m2: Option<f64>,
    pub anodizing_colored_eur_m2: Option<f64>,
    pub powder_coating_standard_eur_m2: Option<f64>,
    pub powder_coating_qualicoat_eur_m2: Option<f64>,
    pub powder_coating_seaside_eur_m2: Option<f64>,
    pub labor_rate_eur_hr: Option<f64>,
    pub cutting_time_min: Option<f64>,
    pub hole_machining_time_min: Option<f64>,
    pub assembly_time_min: Option<f64>,
    pub complexity_time_min: Option<f64>,
    pub extrusion_rate_eur_kg: Option<f64>,
    pub accessories_pct: Option<f64>,
    pub base_waste_pct: Option<f64>,
    pub complexity_waste_pct: Option<f64>,
    pub overhead_pct: Option<f64>,
    pub margin_pct: Option<f64>,
    pub eur_to_usd: Option<f64>,
}

macro_rules! overlay {
    ($overrides:expr, $params:expr; $($field:ident),+ $(,)?) => {
        $(
            if let Some(value) = $overrides.$field {
                $params.$field = value;
            }
        )+
    };
}

impl PricingOverrides {
    /// Copy of `base` with every set override applied
    pub fn apply(&self, base: &PricingParameters) -> PricingParameters {
        let mut params = base.clone();
        overlay!(self, params;
            metal_price_usd_kg,
            hedging_buffer_pct,
            billet_premium_usd_kg,
            anodizing_natural_eur_m2,
            anodizing_colored_eur_m2,
            powder_coating_standard_eur_m2,
            powder_coating_qualicoat_eur_m2,
            powder_coating_seaside_eur_m2,
            labor_rate_eur_hr,
            cutting_time_min,
            hole_machining_time_min,
            assembly_time_min,
            complexity_time_min,
            extrusion_rate_eur_kg,
            accessories_pct,
            base_waste_pct,
            complexity_waste_pct,
            overhead_pct,
            margin_pct,
            eur_to_usd,
        );
        params
    }

    /// True when no override is set
    pub fn is_empty(&self) -> bool {
        *self == PricingOverrides::default()
    }
}
