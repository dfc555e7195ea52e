//! Annual discounting of cashflow streams

/// Single-rate annual discount curve
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DiscountCurve {
    /// Required annual rate of return
    pub annual_rate: f64,
}

impl DiscountCurve {
    pub fn single_rate(annual_rate: f64) -> Self {
        Self { annual_rate }
    }

    /// Discount factor to the end of `year`
    pub fn discount_factor(&self, year: u32) -> f64 {
        (1.0 + self.annual_rate).powi(-(year as i32))
    }

    /// Present value of end-of-year cashflows: `cashflows[0]` is year 1
    pub fn present_value(&self, cashflows: &[f64]) -> f64 {
        cashflows
            .iter()
            .enumerate()
            .map(|(i, &cf)| cf * self.discount_factor(i as u32 + 1))
            .sum()
    }

    /// NPV of a stream whose first entry falls at time zero (undiscounted)
    pub fn npv(&self, cashflows: &[f64]) -> f64 {
        npv_at_rate(cashflows, self.annual_rate)
    }
}

/// NPV at `rate` with the first cashflow at t = 0
pub fn npv_at_rate(cashflows: &[f64], rate: f64) -> f64 {
    cashflows
        .iter()
        .enumerate()
        .map(|(t, &cf)| cf / (1.0 + rate).powi(t as i32))
        .sum()
}
