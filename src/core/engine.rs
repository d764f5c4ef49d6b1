use tracing::debug;

use super::error::{ProjectionError, ProjectionOutcome};
use super::types::{FI_TARGET_MULTIPLE, ProjectionResult, SimulationInputs, YearSnapshot};

/// Runs the year-by-year projection and locates the first year in which net
/// worth covers the FI target.
///
/// Only `years == 0` and non-finite values are rejected. Negative amounts and
/// rates outside any UI range are computed as given.
pub fn project(inputs: &SimulationInputs) -> ProjectionOutcome<ProjectionResult> {
    validate_inputs(inputs)?;

    let snapshots = project_snapshots(inputs);
    let fi_year = find_fi_year(&snapshots);
    debug!(years = inputs.years, ?fi_year, "projection complete");

    Ok(ProjectionResult { snapshots, fi_year })
}

fn project_snapshots(inputs: &SimulationInputs) -> Vec<YearSnapshot> {
    let annual_savings = inputs.annual_savings();
    let expense_factor = inputs.expense_growth_factor();

    let mut net_worth = inputs.current_net_worth;
    let mut expenses = inputs.current_annual_expenses;
    let mut snapshots = Vec::with_capacity(inputs.years as usize);

    for year in 1..=inputs.years {
        // Growth on the prior balance first, contribution at year end.
        net_worth = net_worth * (1.0 + inputs.investment_return) + annual_savings;
        expenses *= expense_factor;

        snapshots.push(YearSnapshot {
            year,
            net_worth,
            annual_expenses: expenses,
            fi_target: expenses * FI_TARGET_MULTIPLE,
        });
    }

    snapshots
}

fn find_fi_year(snapshots: &[YearSnapshot]) -> Option<u32> {
    snapshots
        .iter()
        .find(|snapshot| snapshot.is_independent())
        .map(|snapshot| snapshot.year)
}

fn validate_inputs(inputs: &SimulationInputs) -> ProjectionOutcome<()> {
    if inputs.years == 0 {
        return Err(ProjectionError::InvalidInput("years must be >= 1".to_string()));
    }

    for (name, value) in [
        ("current_net_worth", inputs.current_net_worth),
        ("annual_income", inputs.annual_income),
        ("savings_rate", inputs.savings_rate),
        ("current_annual_expenses", inputs.current_annual_expenses),
        ("investment_return", inputs.investment_return),
        ("inflation_rate", inputs.inflation_rate),
        ("expense_growth", inputs.expense_growth),
    ] {
        if !value.is_finite() {
            return Err(ProjectionError::InvalidInput(format!("{name} must be finite")));
        }
    }

    Ok(())
}
