use serde::{Deserialize, Serialize};

use crate::lab::LabError;
use crate::lab::constants::{FIELDS_PER_CASE, SLAB_AREA, SLAB_THICKNESS, SYSTEM_EFFICIENCY};
use crate::lab::form::{FieldId, InputForm};
use crate::lab::numeric::leading_float;

/// How field text is turned into numbers.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum NumberPolicy {
    /// Unparseable or non-finite text is reported as `LabError::InvalidNumber`.
    #[default]
    Strict,
    /// The leading number of the text is used ("20V" reads as 20); text
    /// with no numeric prefix becomes NaN and flows through the formulas.
    Lenient,
}

impl NumberPolicy {
    pub fn from_strict(strict: bool) -> Self {
        if strict {
            NumberPolicy::Strict
        } else {
            NumberPolicy::Lenient
        }
    }
}

/// Numeric readings for one test case.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TestCaseInputs {
    pub case: usize,
    pub voltage: f64,
    pub current: f64,
    pub inner: [f64; 4],
    pub outer: [f64; 4],
}

impl TestCaseInputs {
    /// Build from the ten readings in entry order (V, I, T1..T4, T5..T8).
    pub fn from_readings(case: usize, r: [f64; FIELDS_PER_CASE]) -> Self {
        Self {
            case,
            voltage: r[0],
            current: r[1],
            inner: [r[2], r[3], r[4], r[5]],
            outer: [r[6], r[7], r[8], r[9]],
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct CalculationResult {
    pub case: usize,
    /// Heat input Q (W).
    pub heat_input: f64,
    /// Average inner surface temperature Ti (°C).
    pub avg_inner: f64,
    /// Average outer surface temperature To (°C).
    pub avg_outer: f64,
    /// ΔT = Ti - To (°C).
    pub delta_t: f64,
    /// Thermal resistance R (°C/W).
    pub resistance: f64,
    /// Thermal conductivity k (W/m·K).
    pub conductivity: f64,
    /// Heat flux q (W/m²).
    pub heat_flux: f64,
}

impl CalculationResult {
    /// The seven quantities in table column order.
    pub fn quantities(&self) -> [f64; 7] {
        [
            self.heat_input,
            self.avg_inner,
            self.avg_outer,
            self.delta_t,
            self.resistance,
            self.conductivity,
            self.heat_flux,
        ]
    }
}

pub fn compute(inputs: &TestCaseInputs) -> CalculationResult {
    let heat_input = inputs.voltage * inputs.current * SYSTEM_EFFICIENCY;

    let avg_inner = inputs.inner.iter().sum::<f64>() / 4.0;
    let avg_outer = inputs.outer.iter().sum::<f64>() / 4.0;
    let delta_t = avg_inner - avg_outer;

    // Zero heat input or zero resistance yields 0 rather than a division error.
    let resistance = if heat_input != 0.0 {
        delta_t / heat_input
    } else {
        0.0
    };
    let conductivity = if resistance != 0.0 {
        SLAB_THICKNESS / (resistance * SLAB_AREA)
    } else {
        0.0
    };
    let heat_flux = heat_input / SLAB_AREA;

    CalculationResult {
        case: inputs.case,
        heat_input,
        avg_inner,
        avg_outer,
        delta_t,
        resistance,
        conductivity,
        heat_flux,
    }
}

fn parse_reading(
    form: &InputForm,
    id: FieldId,
    policy: NumberPolicy,
) -> Result<f64, LabError> {
    let field = form.field(id).ok_or(LabError::MissingInput {
        case: id.case,
        position: id.position,
    })?;
    let text = field.value.trim();
    match policy {
        NumberPolicy::Lenient => Ok(leading_float(text)),
        NumberPolicy::Strict => match text.parse::<f64>() {
            Ok(v) if v.is_finite() => Ok(v),
            _ => Err(LabError::InvalidNumber {
                case: id.case,
                position: id.position,
                label: field.label.clone(),
                value: field.value.clone(),
            }),
        },
    }
}

/// Check that every field of cases 1..=requested exists and is non-empty.
pub fn check_complete(requested: usize, form: &InputForm) -> Result<(), LabError> {
    for case in 1..=requested {
        for position in 1..=FIELDS_PER_CASE {
            let filled = FieldId::new(case, position)
                .and_then(|id| form.field(id))
                .is_some_and(|f| f.is_filled());
            if !filled {
                return Err(LabError::MissingInput { case, position });
            }
        }
    }
    Ok(())
}

/// Validate and compute one row per requested case, in case order.
pub fn calculate_results(
    requested: usize,
    form: &InputForm,
    policy: NumberPolicy,
) -> Result<Vec<CalculationResult>, LabError> {
    check_complete(requested, form)?;

    let mut results = Vec::with_capacity(requested);
    for case in 1..=requested {
        let mut readings = [0.0; FIELDS_PER_CASE];
        for (i, slot) in readings.iter_mut().enumerate() {
            let id = FieldId::new(case, i + 1).ok_or(LabError::MissingInput {
                case,
                position: i + 1,
            })?;
            *slot = parse_reading(form, id, policy)?;
        }
        results.push(compute(&TestCaseInputs::from_readings(case, readings)));
    }
    Ok(results)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lab::form::generate_inputs;

    const SAMPLE: [&str; 10] = ["20", "1", "80", "78", "82", "80", "30", "32", "28", "30"];

    fn filled_form(cases: usize) -> InputForm {
        let mut form = generate_inputs(&cases.to_string()).unwrap();
        for case in 1..=cases {
            for (i, value) in SAMPLE.iter().enumerate() {
                let id = FieldId::new(case, i + 1).unwrap();
                assert!(form.set_value(id, value));
            }
        }
        form
    }

    fn approx(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn reference_case_matches_hand_calculation() {
        let form = filled_form(1);
        let rows = calculate_results(1, &form, NumberPolicy::Strict).unwrap();
        let r = rows[0];
        assert_eq!(r.case, 1);
        assert!(approx(r.heat_input, 11.4));
        assert!(approx(r.avg_inner, 80.0));
        assert!(approx(r.avg_outer, 30.0));
        assert!(approx(r.delta_t, 50.0));
        assert!(approx(r.resistance, 50.0 / 11.4));
        assert!(approx(r.conductivity, 0.037 / ((50.0 / 11.4) * 0.04)));
        assert!(approx(r.heat_flux, 285.0));
    }

    #[test]
    fn zero_current_defines_resistance_and_conductivity_as_zero() {
        let mut form = filled_form(1);
        form.set_named("input2", "0");
        let r = calculate_results(1, &form, NumberPolicy::Strict).unwrap()[0];
        assert_eq!(r.heat_input, 0.0);
        assert_eq!(r.resistance, 0.0);
        assert_eq!(r.conductivity, 0.0);
        assert_eq!(r.heat_flux, 0.0);
    }

    #[test]
    fn equal_temperatures_give_zero_conductivity() {
        let inputs = TestCaseInputs::from_readings(
            1,
            [10.0, 2.0, 40.0, 40.0, 40.0, 40.0, 40.0, 40.0, 40.0, 40.0],
        );
        let r = compute(&inputs);
        assert_eq!(r.delta_t, 0.0);
        assert_eq!(r.resistance, 0.0);
        assert_eq!(r.conductivity, 0.0);
        assert!(approx(r.heat_flux, 10.0 * 2.0 * 0.57 / 0.04));
    }

    #[test]
    fn one_row_per_case_in_order() {
        let form = filled_form(7);
        let rows = calculate_results(7, &form, NumberPolicy::Strict).unwrap();
        let cases: Vec<usize> = rows.iter().map(|r| r.case).collect();
        assert_eq!(cases, (1..=7).collect::<Vec<_>>());
    }

    #[test]
    fn empty_field_reports_first_missing_position() {
        let mut form = filled_form(3);
        form.set_named("input25", "");
        form.set_named("input29", "");
        let err = calculate_results(3, &form, NumberPolicy::Strict).unwrap_err();
        assert_eq!(err, LabError::MissingInput { case: 3, position: 5 });
    }

    #[test]
    fn requested_count_beyond_form_is_missing_input() {
        let form = filled_form(2);
        let err = calculate_results(3, &form, NumberPolicy::Strict).unwrap_err();
        assert_eq!(err, LabError::MissingInput { case: 3, position: 1 });
    }

    #[test]
    fn requested_count_below_form_uses_leading_cases() {
        let form = filled_form(4);
        let rows = calculate_results(2, &form, NumberPolicy::Strict).unwrap();
        assert_eq!(rows.len(), 2);
    }

    #[test]
    fn strict_policy_rejects_garbage_and_infinity() {
        for bad in ["abc", "12abc", "inf", "NaN"] {
            let mut form = filled_form(1);
            form.set_named("input4", bad);
            let err = calculate_results(1, &form, NumberPolicy::Strict).unwrap_err();
            match err {
                LabError::InvalidNumber {
                    case,
                    position,
                    label,
                    value,
                } => {
                    assert_eq!((case, position), (1, 4));
                    assert_eq!(label, "Inner Surface Temperature T2 for case 1");
                    assert_eq!(value, bad);
                }
                other => panic!("unexpected error: {other:?}"),
            }
        }
    }

    #[test]
    fn lenient_policy_propagates_nan() {
        let mut form = filled_form(1);
        form.set_named("input1", "abc");
        let r = calculate_results(1, &form, NumberPolicy::Lenient).unwrap()[0];
        assert!(r.heat_input.is_nan());
        assert!(r.resistance.is_nan());
        assert!(r.conductivity.is_nan());
        assert!(r.heat_flux.is_nan());
        assert!(approx(r.delta_t, 50.0));
    }

    #[test]
    fn lenient_policy_reads_past_unit_suffixes() {
        let mut form = filled_form(1);
        form.set_named("input1", "20V");
        form.set_named("input2", "1 A");
        form.set_named("input3", "80.0e");
        let r = calculate_results(1, &form, NumberPolicy::Lenient).unwrap()[0];
        assert!(approx(r.heat_input, 11.4));
        assert!(approx(r.avg_inner, 80.0));

        let err = calculate_results(1, &form, NumberPolicy::Strict).unwrap_err();
        assert!(matches!(err, LabError::InvalidNumber { position: 1, .. }));
    }

    #[test]
    fn lenient_policy_only_knows_the_infinity_spelling() {
        let mut form = filled_form(1);
        form.set_named("input1", "inf");
        let r = calculate_results(1, &form, NumberPolicy::Lenient).unwrap()[0];
        assert!(r.heat_input.is_nan());

        form.set_named("input1", "Infinity");
        let r = calculate_results(1, &form, NumberPolicy::Lenient).unwrap()[0];
        assert_eq!(r.heat_input, f64::INFINITY);
    }

    #[test]
    fn whitespace_around_numbers_is_accepted() {
        let mut form = filled_form(1);
        form.set_named("input1", " 20 ");
        let r = calculate_results(1, &form, NumberPolicy::Strict).unwrap()[0];
        assert!(approx(r.heat_input, 11.4));
    }

    #[test]
    fn whitespace_only_is_filled_but_not_numeric() {
        let mut form = filled_form(1);
        form.set_named("input1", "  ");
        assert!(check_complete(1, &form).is_ok());
        assert!(matches!(
            calculate_results(1, &form, NumberPolicy::Strict),
            Err(LabError::InvalidNumber { .. })
        ));
    }
}
