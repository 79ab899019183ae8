//! # Quote
//!
//! One calculation run: correlate the extractor payloads, price every
//! linkage, aggregate, and attach recommendations.
//!
//! ## Structure
//!
//! ```text
//! Quote
//! ├── id, schema_version, project_name, created_at
//! ├── line_items: Vec<PricedLine>
//! ├── summary: BudgetSummary
//! ├── parameters: PricingParameters (as used, overrides applied)
//! ├── correlation_log: Vec<AuditEvent>
//! ├── data_sources: DataSources
//! └── recommendations: Vec<Recommendation>
//! ```
//!
//! ## Example
//!
//! ```rust
//! use quote_core::catalog::CostCatalog;
//! use quote_core::inputs::{DocumentPayload, GeometryPayload, SpecificationRecord};
//! use quote_core::quote::{calculate_quote, QuoteRequest};
//!
//! let catalog = CostCatalog::standard();
//! let document = DocumentPayload::with_rows(vec![
//!     SpecificationRecord::new("J-01", "Casement window", 2.0),
//!     SpecificationRecord::new("J-02", "Fixed light", 1.0),
//! ]);
//!
//! let quote = calculate_quote(&GeometryPayload::default(), &document, &QuoteRequest::new("Office"), &catalog).unwrap();
//! assert_eq!(quote.line_items.len(), 2);
//! assert_eq!(quote.summary.total_quantity, 3);
//! ```

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::calculations::aggregate::{aggregate, BudgetSummary};
use crate::calculations::correlate::{AuditEvent, Correlator, QuantitySource};
use crate::calculations::line_pricer::{price_lines, PricedLine};
use crate::calculations::recommend::{recommend, Recommendation};
use crate::catalog::CostCatalog;
use crate::errors::{QuoteError, QuoteResult};
use crate::inputs::{DocumentPayload, GeometryPayload};
use crate::params::{PricingOverrides, PricingParameters, SurfaceTreatment};

/// Current quote output schema version
pub const SCHEMA_VERSION: &str = "0.1.0";

/// Per-call settings for a calculation run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct QuoteRequest {
    pub project_name: String,
    pub surface_treatment: SurfaceTreatment,
    pub parameters: PricingParameters,
    pub overrides: PricingOverrides,
    /// Pricing threads; 0 or 1 prices on the calling thread
    pub workers: usize,
}

impl Default for QuoteRequest {
    fn default() -> Self {
        QuoteRequest {
            project_name: "New Quote".to_string(),
            surface_treatment: SurfaceTreatment::default(),
            parameters: PricingParameters::default(),
            overrides: PricingOverrides::default(),
            workers: 1,
        }
    }
}

impl QuoteRequest {
    pub fn new(project_name: impl Into<String>) -> Self {
        QuoteRequest {
            project_name: project_name.into(),
            ..QuoteRequest::default()
        }
    }
}

/// Which sources were authoritative for a run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DataSources {
    pub geometry_used: bool,
    pub specification_used: bool,
    pub quantity_source: QuantitySource,
}

/// A priced quote
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Quote {
    pub id: Uuid,
    pub schema_version: String,
    pub project_name: String,
    pub created_at: DateTime<Utc>,
    pub surface_treatment: SurfaceTreatment,
    pub line_items: Vec<PricedLine>,
    pub summary: BudgetSummary,
    pub parameters: PricingParameters,
    pub correlation_log: Vec<AuditEvent>,
    pub data_sources: DataSources,
    pub recommendations: Vec<Recommendation>,
}

/// Run one calculation.
///
/// # Errors
///
/// - `InvalidInput` when the parameters (after overrides) fail validation
/// - `NoInputData` when neither payload reports success
///
/// Nothing else fails: weak or missing data lowers confidence instead.
pub fn calculate_quote(
    geometry: &GeometryPayload,
    document: &DocumentPayload,
    request: &QuoteRequest,
    catalog: &CostCatalog,
) -> QuoteResult<Quote> {
    let _span = tracing::info_span!("quote", project = %request.project_name).entered();

    let params = request.overrides.apply(&request.parameters);
    params.validate()?;

    if !geometry.success && !document.success {
        tracing::warn!("rejecting run: no extractor produced data");
        return Err(QuoteError::no_input_data(
            "neither the geometry nor the document extractor reported success",
        ));
    }

    let correlation = Correlator::new(document).correlate(geometry);
    let line_items = price_lines(
        &correlation.linkages,
        request.surface_treatment,
        &params,
        catalog,
        request.workers,
    );

    let has_geometry = geometry.has_profiles();
    let summary = BudgetSummary {
        project_name: request.project_name.clone(),
        has_geometry,
        has_specification: document.success,
        ..aggregate(&line_items, &params)
    };
    let recommendations = recommend(&summary, &line_items, &params);

    let quantity_source = if has_geometry {
        QuantitySource::Geometry
    } else if document.has_rows() {
        QuantitySource::Specification
    } else {
        QuantitySource::Estimated
    };

    tracing::info!(
        lines = line_items.len(),
        ?quantity_source,
        total_quote = summary.total_quote,
        "quote calculated"
    );

    Ok(Quote {
        id: Uuid::new_v4(),
        schema_version: SCHEMA_VERSION.to_string(),
        project_name: request.project_name.clone(),
        created_at: summary.created_at,
        surface_treatment: request.surface_treatment,
        line_items,
        summary,
        parameters: params,
        correlation_log: correlation.log,
        data_sources: DataSources {
            geometry_used: has_geometry,
            specification_used: document.success,
            quantity_source,
        },
        recommendations,
    })
}
