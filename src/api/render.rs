use crate::core::{ProjectionResult, SimulationInputs, YearSnapshot};

pub const NOT_REACHED_MESSAGE: &str =
    "Financial freedom not reached within the simulated timeframe.";

const TABLE_HEADERS: [&str; 4] = ["Year", "Net Worth", "Annual Expenses", "FI Target"];

/// Whole-unit dollar amount with thousands separators, e.g. `$100,000`.
pub fn format_currency(amount: f64) -> String {
    if !amount.is_finite() {
        return format!("${amount}");
    }

    let digits = format!("{:.0}", amount.abs());
    let sign = if amount < 0.0 && digits != "0" { "-" } else { "" };
    format!("{sign}${}", group_thousands(&digits))
}

fn group_thousands(digits: &str) -> String {
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (idx, ch) in digits.chars().enumerate() {
        if idx > 0 && (digits.len() - idx) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    grouped
}

pub fn outcome_message(result: &ProjectionResult) -> String {
    match result.fi_year {
        Some(year) => format!("You reach financial freedom in Year {year}"),
        None => NOT_REACHED_MESSAGE.to_string(),
    }
}

pub fn render_table(snapshots: &[YearSnapshot]) -> String {
    let rows = snapshots
        .iter()
        .map(|s| {
            [
                s.year.to_string(),
                format_currency(s.net_worth),
                format_currency(s.annual_expenses),
                format_currency(s.fi_target),
            ]
        })
        .collect::<Vec<_>>();

    let mut widths = TABLE_HEADERS.map(str::len);
    for row in &rows {
        for (width, cell) in widths.iter_mut().zip(row) {
            *width = (*width).max(cell.len());
        }
    }

    let mut out = String::new();
    write_row(&mut out, &TABLE_HEADERS.map(str::to_string), &widths);
    let rule = widths.map(|w| "-".repeat(w));
    write_row(&mut out, &rule, &widths);
    for row in &rows {
        write_row(&mut out, row, &widths);
    }
    out
}

fn write_row(out: &mut String, cells: &[String; 4], widths: &[usize; 4]) {
    let line = cells
        .iter()
        .zip(widths)
        .map(|(cell, &width)| format!("{cell:>width$}"))
        .collect::<Vec<_>>()
        .join("  ");
    out.push_str(&line);
    out.push('\n');
}

pub fn render_report(
    inputs: &SimulationInputs,
    result: &ProjectionResult,
    include_table: bool,
) -> String {
    let mut out = format!(
        "Annual savings: {} over {} years\n",
        format_currency(inputs.annual_savings()),
        inputs.years
    );
    match result.crossing_snapshot() {
        Some(snapshot) => {
            out.push_str(&format!(
                "{}\nNet worth {} vs FI target {}\n",
                outcome_message(result),
                format_currency(snapshot.net_worth),
                format_currency(snapshot.fi_target)
            ));
        }
        None => out.push_str(&format!("Warning: {}\n", outcome_message(result))),
    }

    if include_table {
        out.push('\n');
        out.push_str(&render_table(&result.snapshots));
    }
    out
}
