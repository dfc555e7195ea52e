//! Discounting and rate-of-return calculations

mod discount;
mod irr;

pub use discount::{npv_at_rate, DiscountCurve};
pub use irr::{calculate_irr, IrrConfig};
