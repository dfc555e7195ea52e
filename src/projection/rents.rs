//! Annual rent projection

use super::{AnnualSeries, HORIZON_YEARS};

/// Nights in a rental year
pub const NIGHTS_PER_YEAR: f64 = 365.0;

/// Project gross rent for each year of the holding period.
///
/// Year 1 is `daily_rate * 365 * occupancy_rate`; each later year compounds the
/// prior one by `1 + growth_rate`. Inputs are taken as given, range checks
/// belong to [`Assumptions::validate`](crate::Assumptions::validate).
pub fn project_rents(daily_rate: f64, occupancy_rate: f64, growth_rate: f64) -> AnnualSeries {
    let mut rents = [0.0; HORIZON_YEARS];
    rents[0] = daily_rate * NIGHTS_PER_YEAR * occupancy_rate;
    for year in 1..HORIZON_YEARS {
        rents[year] = rents[year - 1] * (1.0 + growth_rate);
    }
    rents
}
