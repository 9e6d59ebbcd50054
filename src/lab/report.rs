use anyhow::Result;

use crate::lab::calc::CalculationResult;

pub const HEADERS: [&str; 8] = [
    "Case",
    "Heat Input Q (W)",
    "Average Inner Temp Ti (°C)",
    "Average Outer Temp To (°C)",
    "ΔT (°C)",
    "Thermal Resistance R (°C/W)",
    "Thermal Conductivity k (W/m.K)",
    "Heat Flux q (W/m²)",
];

/// Two decimal places for display. Non-finite values are spelled out and
/// negative zero prints as `0.00`. A value exactly halfway between two
/// candidates rounds away from zero, so 80.125 prints as `80.13`.
pub fn format_quantity(value: f64) -> String {
    if value.is_nan() {
        "NaN".to_string()
    } else if value.is_infinite() {
        if value > 0.0 { "Infinity" } else { "-Infinity" }.to_string()
    } else if value == 0.0 {
        "0.00".to_string()
    } else if is_exact_tie(value) {
        // magnitude * 100 is exact here: an integer plus one half.
        let cents = (value.abs() * 100.0).ceil() as u64;
        let sign = if value < 0.0 { "-" } else { "" };
        format!("{sign}{}.{:02}", cents / 100, cents % 100)
    } else {
        format!("{value:.2}")
    }
}

/// Whether `value` sits exactly on a half-cent. In binary that only happens
/// for odd multiples of 1/8 (x.125, x.375, x.625, x.875).
fn is_exact_tie(value: f64) -> bool {
    let magnitude = value.abs();
    if magnitude >= 1e13 {
        return false;
    }
    let eighths = magnitude * 8.0;
    eighths.fract() == 0.0 && eighths % 2.0 == 1.0
}

/// One table row as display strings, case number first.
pub fn row_cells(result: &CalculationResult) -> [String; 8] {
    let q = result.quantities();
    [
        result.case.to_string(),
        format_quantity(q[0]),
        format_quantity(q[1]),
        format_quantity(q[2]),
        format_quantity(q[3]),
        format_quantity(q[4]),
        format_quantity(q[5]),
        format_quantity(q[6]),
    ]
}

pub fn render_text(results: &[CalculationResult]) -> String {
    let rows: Vec<[String; 8]> = results.iter().map(row_cells).collect();

    let mut widths: [usize; 8] = HEADERS.map(|h| h.chars().count());
    for row in &rows {
        for (w, cell) in widths.iter_mut().zip(row.iter()) {
            *w = (*w).max(cell.chars().count());
        }
    }

    let mut out = String::new();
    let header: Vec<String> = HEADERS
        .iter()
        .zip(widths.iter())
        .map(|(h, w)| pad_left(h, *w))
        .collect();
    out.push_str(header.join("  ").trim_end());
    out.push('\n');
    let rule: Vec<String> = widths.iter().map(|w| "-".repeat(*w)).collect();
    out.push_str(&rule.join("  "));
    out.push('\n');
    for row in &rows {
        let cells: Vec<String> = row
            .iter()
            .zip(widths.iter())
            .map(|(c, w)| pad_left(c, *w))
            .collect();
        out.push_str(&cells.join("  "));
        out.push('\n');
    }
    out
}

fn pad_left(text: &str, width: usize) -> String {
    let len = text.chars().count();
    format!("{}{}", " ".repeat(width.saturating_sub(len)), text)
}

pub fn render_csv(results: &[CalculationResult]) -> String {
    let mut out = HEADERS.join(",");
    out.push('\n');
    for result in results {
        out.push_str(&row_cells(result).join(","));
        out.push('\n');
    }
    out
}

/// Full-precision JSON. Non-finite values serialize as null.
pub fn render_json(results: &[CalculationResult]) -> Result<String> {
    Ok(serde_json::to_string_pretty(results)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lab::calc::{TestCaseInputs, compute};

    fn reference() -> CalculationResult {
        compute(&TestCaseInputs::from_readings(
            1,
            [20.0, 1.0, 80.0, 78.0, 82.0, 80.0, 30.0, 32.0, 28.0, 30.0],
        ))
    }

    #[test]
    fn reference_row_formats_to_two_decimals() {
        assert_eq!(
            row_cells(&reference()),
            ["1", "11.40", "80.00", "30.00", "50.00", "4.39", "0.21", "285.00"]
        );
    }

    #[test]
    fn special_values_are_spelled_out() {
        assert_eq!(format_quantity(f64::NAN), "NaN");
        assert_eq!(format_quantity(f64::INFINITY), "Infinity");
        assert_eq!(format_quantity(f64::NEG_INFINITY), "-Infinity");
        assert_eq!(format_quantity(-0.0), "0.00");
        assert_eq!(format_quantity(-1.5), "-1.50");
    }

    #[test]
    fn exact_halves_round_away_from_zero() {
        assert_eq!(format_quantity(0.125), "0.13");
        assert_eq!(format_quantity(0.625), "0.63");
        assert_eq!(format_quantity(0.375), "0.38");
        assert_eq!(format_quantity(80.125), "80.13");
        assert_eq!(format_quantity(-0.125), "-0.13");
        assert_eq!(format_quantity(0.25), "0.25");
        // Not exact halves once stored as binary.
        assert_eq!(format_quantity(1.005), "1.00");
        assert_eq!(format_quantity(2.675), "2.67");
    }

    #[test]
    fn averaged_eighths_round_up_in_rows() {
        let r = compute(&TestCaseInputs::from_readings(
            1,
            [1.0, 1.0, 0.125, 0.125, 0.125, 0.125, 0.0, 0.0, 0.0, 0.0],
        ));
        let cells = row_cells(&r);
        assert_eq!(cells[1], "0.57");
        assert_eq!(cells[2], "0.13");
        assert_eq!(cells[3], "0.00");
        assert_eq!(cells[4], "0.13");

        let r = compute(&TestCaseInputs::from_readings(
            1,
            [20.0, 1.0, 80.5, 80.0, 80.0, 80.0, 30.0, 30.0, 30.0, 30.0],
        ));
        assert_eq!(row_cells(&r)[2], "80.13");
    }

    #[test]
    fn csv_has_fixed_header_and_one_line_per_row() {
        let csv = render_csv(&[reference(), reference()]);
        let lines: Vec<&str> = csv.lines().collect();
        assert_eq!(lines.len(), 3);
        assert!(lines[0].starts_with("Case,Heat Input Q (W),"));
        assert!(lines[0].ends_with("Heat Flux q (W/m²)"));
        assert_eq!(lines[1], "1,11.40,80.00,30.00,50.00,4.39,0.21,285.00");
    }

    #[test]
    fn text_table_aligns_columns() {
        let text = render_text(&[reference()]);
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 3);
        assert!(lines[0].contains("Thermal Conductivity k (W/m.K)"));
        assert_eq!(lines[1].chars().count(), lines[2].chars().count());
        assert!(lines[2].trim_end().ends_with("285.00"));
    }

    #[test]
    fn json_keeps_full_precision() {
        let json = render_json(&[reference()]).unwrap();
        let parsed: Vec<CalculationResult> = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed[0].case, 1);
        assert!((parsed[0].resistance - 50.0 / 11.4).abs() < 1e-12);
    }
}
