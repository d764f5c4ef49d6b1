use serde::Serialize;

/// Multiple of annual expenses needed to retire (4% withdrawal rate).
pub const FI_TARGET_MULTIPLE: f64 = 25.0;

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SimulationInputs {
    pub current_net_worth: f64,
    pub annual_income: f64,
    pub savings_rate: f64,
    pub current_annual_expenses: f64,
    pub investment_return: f64,
    pub inflation_rate: f64,
    pub expense_growth: f64,
    pub years: u32,
}

impl SimulationInputs {
    /// Fixed end-of-year contribution. Income does not grow over the horizon.
    pub fn annual_savings(&self) -> f64 {
        self.annual_income * self.savings_rate
    }

    /// Inflation and lifestyle creep are summed and compounded once, not
    /// applied as two sequential multiplications.
    pub fn expense_growth_factor(&self) -> f64 {
        1.0 + self.inflation_rate + self.expense_growth
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct YearSnapshot {
    pub year: u32,
    pub net_worth: f64,
    pub annual_expenses: f64,
    pub fi_target: f64,
}

impl YearSnapshot {
    /// Reaching the target exactly counts.
    pub fn is_independent(&self) -> bool {
        self.net_worth >= self.fi_target
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectionResult {
    pub snapshots: Vec<YearSnapshot>,
    pub fi_year: Option<u32>,
}

impl ProjectionResult {
    /// False is a normal outcome: the target was not crossed within the horizon.
    pub fn reached(&self) -> bool {
        self.fi_year.is_some()
    }

    /// Snapshot for `fi_year`. Years are 1-based, so year N sits at index N - 1.
    pub fn crossing_snapshot(&self) -> Option<&YearSnapshot> {
        let year = self.fi_year?;
        self.snapshots.get(year as usize - 1)
    }
}
