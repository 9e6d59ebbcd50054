/// Focusable controls in document order.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Focus {
    CaseCount,
    GenerateButton,
    /// Index into the generated fields.
    Field(usize),
    CalculateButton,
}

/// What the host should do in response to Enter.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NavAction {
    Generate,
    Calculate,
    FocusField(usize),
    Stay,
}

/// Decide the effect of the confirmation key for the focused control.
pub fn handle_enter(focus: Focus, field_count: usize) -> NavAction {
    match focus {
        Focus::CaseCount | Focus::GenerateButton => NavAction::Generate,
        Focus::CalculateButton => NavAction::Calculate,
        Focus::Field(i) if i + 1 == field_count => NavAction::Calculate,
        Focus::Field(i) if i + 1 < field_count => NavAction::FocusField(i + 1),
        Focus::Field(_) => NavAction::Stay,
    }
}

/// Next control in document order for Tab / Down. Wraps around.
pub fn next_focus(focus: Focus, field_count: usize) -> Focus {
    match focus {
        Focus::CaseCount => Focus::GenerateButton,
        Focus::GenerateButton if field_count > 0 => Focus::Field(0),
        Focus::GenerateButton => Focus::CaseCount,
        Focus::Field(i) if i + 1 < field_count => Focus::Field(i + 1),
        Focus::Field(_) => Focus::CalculateButton,
        Focus::CalculateButton => Focus::CaseCount,
    }
}

/// Previous control in document order for BackTab / Up. Wraps around.
pub fn prev_focus(focus: Focus, field_count: usize) -> Focus {
    match focus {
        Focus::CaseCount if field_count > 0 => Focus::CalculateButton,
        Focus::CaseCount => Focus::GenerateButton,
        Focus::GenerateButton => Focus::CaseCount,
        Focus::Field(0) => Focus::GenerateButton,
        Focus::Field(i) => Focus::Field((i - 1).min(field_count.saturating_sub(1))),
        Focus::CalculateButton if field_count > 0 => Focus::Field(field_count - 1),
        Focus::CalculateButton => Focus::GenerateButton,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn enter_on_count_field_generates() {
        assert_eq!(handle_enter(Focus::CaseCount, 0), NavAction::Generate);
        assert_eq!(handle_enter(Focus::CaseCount, 30), NavAction::Generate);
        assert_eq!(handle_enter(Focus::GenerateButton, 10), NavAction::Generate);
    }

    #[test]
    fn enter_on_calculate_button_calculates() {
        assert_eq!(handle_enter(Focus::CalculateButton, 10), NavAction::Calculate);
    }

    #[test]
    fn enter_advances_to_next_field() {
        assert_eq!(handle_enter(Focus::Field(0), 20), NavAction::FocusField(1));
        assert_eq!(handle_enter(Focus::Field(9), 20), NavAction::FocusField(10));
        assert_eq!(handle_enter(Focus::Field(18), 20), NavAction::FocusField(19));
    }

    #[test]
    fn enter_on_last_field_calculates() {
        assert_eq!(handle_enter(Focus::Field(19), 20), NavAction::Calculate);
        assert_eq!(handle_enter(Focus::Field(9), 10), NavAction::Calculate);
    }

    #[test]
    fn stale_field_focus_is_a_noop() {
        assert_eq!(handle_enter(Focus::Field(40), 20), NavAction::Stay);
        assert_eq!(handle_enter(Focus::Field(0), 0), NavAction::Stay);
    }

    #[test]
    fn tab_cycles_through_document_order() {
        let mut focus = Focus::CaseCount;
        let mut seen = vec![focus];
        for _ in 0..4 {
            focus = next_focus(focus, 2);
            seen.push(focus);
        }
        assert_eq!(
            seen,
            vec![
                Focus::CaseCount,
                Focus::GenerateButton,
                Focus::Field(0),
                Focus::Field(1),
                Focus::CalculateButton,
            ]
        );
        assert_eq!(next_focus(Focus::CalculateButton, 2), Focus::CaseCount);
    }

    #[test]
    fn backtab_is_inverse_of_tab() {
        let n = 10;
        let mut focus = Focus::CaseCount;
        for _ in 0..15 {
            let next = next_focus(focus, n);
            assert_eq!(prev_focus(next, n), focus);
            focus = next;
        }
    }

    #[test]
    fn without_fields_tab_skips_inputs() {
        assert_eq!(next_focus(Focus::GenerateButton, 0), Focus::CaseCount);
        assert_eq!(prev_focus(Focus::CaseCount, 0), Focus::GenerateButton);
    }
}
