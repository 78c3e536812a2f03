use std::fmt::Write;

use deed_core::{ValuationResult, ValuationWarning};

use crate::utils::format_rupees;

const LABEL_WIDTH: usize = 26;
const VALUE_WIDTH: usize = 20;

fn row(
    out: &mut String,
    label: &str,
    value: &str,
) {
    let _ = writeln!(out, "{label:<LABEL_WIDTH$}{value:>VALUE_WIDTH$}");
}

fn rule(out: &mut String) {
    let _ = writeln!(out, "{}", "-".repeat(LABEL_WIDTH + VALUE_WIDTH));
}

/// Plain-text breakdown of a valuation, one figure per line.
pub fn render_valuation(result: &ValuationResult) -> String {
    let mut out = String::new();

    row(&mut out, "Plot area", &format!("{} m²", result.total_plot_area_sq_meters));
    row(&mut out, "Built-up area", &format!("{} m²", result.total_buildup_area_sq_meters));
    rule(&mut out);
    row(&mut out, "Land value", &format_rupees(result.base_circle_rate_value));
    row(&mut out, "Built-up value", &format_rupees(result.buildup_value));
    row(&mut out, "Additions", &format_rupees(result.addition_charges));
    row(&mut out, "Circle-rate value", &format_rupees(result.final_circle_rate_value));
    row(&mut out, "Value for duty", &format_rupees(result.final_value));
    rule(&mut out);
    row(&mut out, "Stamp duty (7%)", &format_rupees(result.gross_stamp_duty));
    if !result.deduction_amount.is_zero() {
        row(&mut out, "Concession", &format!("-{}", format_rupees(result.deduction_amount)));
    }
    row(&mut out, "Stamp duty payable", &format_rupees(result.stamp_duty));
    row(&mut out, "Registration (1%)", &format_rupees(result.registration_charge));
    rule(&mut out);
    row(&mut out, "Total payable", &format_rupees(result.final_payable_amount));

    for warning in &result.warnings {
        match warning {
            ValuationWarning::BuildupExceedsPlot {
                buildup_sq_meters,
                plot_sq_meters,
            } => {
                let _ = writeln!(
                    out,
                    "note: built-up area {buildup_sq_meters} m² exceeds plot area {plot_sq_meters} m²"
                );
            }
        }
    }

    out
}
