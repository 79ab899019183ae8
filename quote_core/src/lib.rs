//! # quote_core - Fabrication Quote Engine
//!
//! `quote_core` turns the output of two extractors into a priced quote for
//! aluminium and steel fabrication work. A geometry extractor reports
//! profiles measured from CAD drawings; a document extractor reports bill
//! of materials rows and technical constraints read from specifications.
//! All inputs and outputs are JSON-serializable.
//!
//! ## Design Philosophy
//!
//! - **Stateless**: every stage is a pure function of its inputs
//! - **Geometry first**: measured quantities win over text quantities
//! - **Never empty**: a run with any successful input yields at least one line
//! - **Rich Errors**: structured error types, not just strings
//!
//! ## Quick Start
//!
//! ```rust
//! use quote_core::catalog::CostCatalog;
//! use quote_core::inputs::{DocumentPayload, GeometryPayload, GeometryRecord};
//! use quote_core::quote::{calculate_quote, QuoteRequest};
//!
//! let geometry = GeometryPayload::with_profiles(vec![GeometryRecord {
//!     layer: "PERFIL_A".into(),
//!     perimeter_mm: 400.0,
//!     area_mm2: 2000.0,
//!     ..Default::default()
//! }]);
//!
//! let quote = calculate_quote(
//!     &geometry,
//!     &DocumentPayload::default(),
//!     &QuoteRequest::new("Facade lot 2"),
//!     &CostCatalog::standard(),
//! )
//! .unwrap();
//!
//! assert_eq!(quote.line_items.len(), 1);
//! assert!(quote.summary.total_quote > 0.0);
//! ```
//!
//! ## Modules
//!
//! - [`inputs`] - Extractor payloads and tolerant field parsing
//! - [`params`] - Pricing parameters, overrides and surface treatments
//! - [`catalog`] - Steel profile and unit item cost catalog
//! - [`calculations`] - Correlation, line pricing, aggregation, recommendations
//! - [`quote`] - One end-to-end calculation run
//! - [`units`] - Type-safe unit wrappers
//! - [`errors`] - Structured error types
//! - [`logging`] - Tracing subscriber setup

pub mod calculations;
pub mod catalog;
pub mod errors;
pub mod inputs;
pub mod logging;
pub mod params;
pub mod quote;
pub mod units;

// Re-export commonly used types at crate root for convenience
pub use catalog::CostCatalog;
pub use errors::{QuoteError, QuoteResult};
pub use inputs::{DocumentPayload, GeometryPayload};
pub use params::{PricingOverrides, PricingParameters, SurfaceTreatment};
pub use quote::{calculate_quote, Quote, QuoteRequest};
