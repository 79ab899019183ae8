//! # Quote Calculations
//!
//! The stages of a calculation run, leaf-first:
//!
//! - [`correlate`] - match geometry to specification rows, pick quantity sources
//! - [`line_pricer`] - price each linkage (catalog rates or formulas)
//! - [`aggregate`] - roll lines up into the budget summary
//! - [`recommend`] - advisory notes from threshold checks
//! - [`estimate`] - quick per-kg estimates and margin simulation
//!
//! Every stage is a pure function of its inputs. The [`crate::quote`]
//! module chains them into one run.

pub mod aggregate;
pub mod correlate;
pub mod estimate;
pub mod line_pricer;
pub mod recommend;

// Re-export commonly used types
pub use aggregate::{aggregate, BudgetSummary};
pub use correlate::{correlate, Correlation, LinkageRecord, MatchMethod, QuantitySource};
pub use line_pricer::{price, PricedLine};
pub use recommend::{recommend, Recommendation};
