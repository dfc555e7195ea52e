//! Rental Evaluation - investment metrics for short-term-rental properties
//!
//! This library provides:
//! - Ten-year rent, debt service and operating cost projections
//! - Fixed-rate mortgage amortization and sale proceeds at the horizon
//! - Net Present Value and Internal Rate of Return of the hold
//! - Derived headline figures (break-even occupancy, monthly net income)
//!
//! Every evaluation is a pure function of an [`Assumptions`] record.

pub mod assumptions;
pub mod error;
pub mod insights;
pub mod projection;
pub mod valuation;

// Re-export commonly used types
pub use assumptions::Assumptions;
pub use error::{ConfigError, EvaluationError};
pub use insights::KeyInsights;
pub use projection::{evaluate, CashflowRow, Evaluation, EvaluationEngine, ResultBundle};
pub use valuation::{DiscountCurve, IrrConfig};
