use crate::config::Config;
use crate::lab::LabError;
use crate::lab::calc::{self, CalculationResult, NumberPolicy};
use crate::lab::constants::FIELDS_PER_CASE;
use crate::lab::form::{self, FieldId, InputForm};
use crate::lab::nav::{self, Focus, NavAction};
use crate::ui::line_input::{InputResult, LineInput};
use crate::ui::theme::Theme;

use crossterm::event::KeyEvent;

/// Blocking notification. While one is open, the next key only dismisses it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Alert {
    pub title: String,
    pub message: String,
}

impl From<&LabError> for Alert {
    fn from(err: &LabError) -> Self {
        Self {
            title: err.title().to_string(),
            message: err.to_string(),
        }
    }
}

pub struct App {
    pub theme: &'static Theme,
    pub policy: NumberPolicy,
    pub count_input: LineInput,
    /// None until the first successful generate; the input container is
    /// hidden while None.
    pub form: Option<InputForm>,
    /// One editor per generated field, same order as the form.
    pub editors: Vec<LineInput>,
    /// None while the results container is hidden.
    pub results: Option<Vec<CalculationResult>>,
    pub focus: Focus,
    pub alert: Option<Alert>,
    pub should_quit: bool,
}

impl App {
    pub fn new(config: &Config, theme: &'static Theme, policy: NumberPolicy) -> Self {
        Self {
            theme,
            policy,
            count_input: LineInput::new(&config.case_count_text()),
            form: None,
            editors: Vec::new(),
            results: None,
            focus: Focus::CaseCount,
            alert: None,
            should_quit: false,
        }
    }

    pub fn field_count(&self) -> usize {
        self.form.as_ref().map_or(0, InputForm::field_count)
    }

    fn raise(&mut self, err: &LabError) {
        tracing::warn!(error = ?err, "validation failed");
        self.alert = Some(Alert::from(err));
    }

    pub fn dismiss_alert(&mut self) {
        self.alert = None;
    }

    /// Replace the input container with fresh fields for the typed count.
    /// On an invalid count the existing fields are left untouched.
    pub fn generate_inputs(&mut self) {
        match form::generate_inputs(self.count_input.value()) {
            Ok(form) => {
                tracing::info!(cases = form.case_count(), fields = form.field_count(), "generated inputs");
                self.editors = vec![LineInput::default(); form.field_count()];
                self.form = Some(form);
                self.focus = Focus::Field(0);
            }
            Err(err) => self.raise(&err),
        }
    }

    /// Validate every field for the typed count and rebuild the results table.
    /// The previous table is cleared first, so a failure leaves none shown.
    pub fn calculate_results(&mut self) {
        self.results = None;

        let requested = match form::parse_case_count(self.count_input.value()) {
            Ok(n) => n,
            Err(err) => return self.raise(&err),
        };
        let empty = InputForm::default();
        let form = self.form.as_ref().unwrap_or(&empty);

        match calc::calculate_results(requested, form, self.policy) {
            Ok(rows) => {
                tracing::info!(rows = rows.len(), policy = ?self.policy, "calculated results");
                self.results = Some(rows);
            }
            Err(err) => self.raise(&err),
        }
    }

    pub fn handle_enter(&mut self) {
        let action = nav::handle_enter(self.focus, self.field_count());
        tracing::debug!(focus = ?self.focus, ?action, "enter");
        match action {
            NavAction::Generate => self.generate_inputs(),
            NavAction::Calculate => self.calculate_results(),
            NavAction::FocusField(i) => self.focus = Focus::Field(i),
            NavAction::Stay => {}
        }
    }

    pub fn focus_next(&mut self) {
        self.focus = nav::next_focus(self.focus, self.field_count());
    }

    pub fn focus_prev(&mut self) {
        self.focus = nav::prev_focus(self.focus, self.field_count());
    }

    /// Jump a whole case forward or back, staying inside the field list.
    pub fn focus_case_step(&mut self, forward: bool) {
        let count = self.field_count();
        if let Focus::Field(i) = self.focus {
            if count == 0 {
                return;
            }
            let target = if forward {
                (i + FIELDS_PER_CASE).min(count - 1)
            } else {
                i.saturating_sub(FIELDS_PER_CASE)
            };
            self.focus = Focus::Field(target);
        }
    }

    /// Route an editing key to the focused text control.
    pub fn edit(&mut self, key: KeyEvent) -> InputResult {
        match self.focus {
            Focus::CaseCount => self.count_input.handle(key),
            Focus::Field(i) => {
                let Some(editor) = self.editors.get_mut(i) else {
                    return InputResult::Ignored;
                };
                let result = editor.handle(key);
                if result == InputResult::Edited {
                    self.sync_field(i);
                }
                result
            }
            Focus::GenerateButton | Focus::CalculateButton => InputResult::Ignored,
        }
    }

    pub fn paste(&mut self, text: &str) {
        match self.focus {
            Focus::CaseCount => self.count_input.insert_str(text),
            Focus::Field(i) => {
                if let Some(editor) = self.editors.get_mut(i) {
                    editor.insert_str(text);
                    self.sync_field(i);
                }
            }
            Focus::GenerateButton | Focus::CalculateButton => {}
        }
    }

    fn sync_field(&mut self, index: usize) {
        let (Some(form), Some(editor)) = (self.form.as_mut(), self.editors.get(index)) else {
            return;
        };
        if let Some(id) = FieldId::from_sequence(index + 1) {
            form.set_value(id, editor.value());
            if let Some(field) = form.field(id) {
                tracing::trace!(field = %field.name(), filled = field.is_filled(), "edited");
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::{KeyCode, KeyModifiers};

    fn app_with_count(count: &str) -> App {
        let theme: &'static Theme = Box::leak(Box::new(Theme::default()));
        let mut config = Config::default();
        config.default_case_count = 0;
        let mut app = App::new(&config, theme, NumberPolicy::Strict);
        app.count_input = LineInput::new(count);
        app
    }

    fn type_text(app: &mut App, text: &str) {
        for ch in text.chars() {
            app.edit(KeyEvent::new(KeyCode::Char(ch), KeyModifiers::NONE));
        }
    }

    fn fill_case(app: &mut App, values: [&str; 10]) {
        for value in values {
            type_text(app, value);
            app.handle_enter();
        }
    }

    const SAMPLE: [&str; 10] = ["20", "1", "80", "78", "82", "80", "30", "32", "28", "30"];

    #[test]
    fn enter_on_count_generates_and_focuses_first_field() {
        let mut app = app_with_count("2");
        app.handle_enter();
        assert!(app.alert.is_none());
        assert_eq!(app.field_count(), 20);
        assert_eq!(app.editors.len(), 20);
        assert_eq!(app.focus, Focus::Field(0));
    }

    #[test]
    fn invalid_count_alerts_and_keeps_existing_fields() {
        let mut app = app_with_count("1");
        app.generate_inputs();
        type_text(&mut app, "42");

        app.count_input = LineInput::new("11");
        app.focus = Focus::CaseCount;
        app.handle_enter();

        let alert = app.alert.clone().unwrap();
        assert_eq!(alert.message, "Please enter a valid number of test cases (1-10).");
        assert_eq!(app.field_count(), 10);
        assert_eq!(app.form.as_ref().unwrap().fields()[0].value, "42");
    }

    #[test]
    fn regenerate_discards_previous_values() {
        let mut app = app_with_count("1");
        app.generate_inputs();
        type_text(&mut app, "9");
        app.count_input = LineInput::new("3");
        app.generate_inputs();
        assert_eq!(app.field_count(), 30);
        assert!(app.form.as_ref().unwrap().fields().iter().all(|f| f.value.is_empty()));
    }

    #[test]
    fn typing_then_enter_walks_fields_and_last_enter_calculates() {
        let mut app = app_with_count("1");
        app.handle_enter();
        fill_case(&mut app, SAMPLE);

        assert!(app.alert.is_none());
        let rows = app.results.as_ref().unwrap();
        assert_eq!(rows.len(), 1);
        assert!((rows[0].heat_flux - 285.0).abs() < 1e-9);
        // focus stays on the last field after calculating
        assert_eq!(app.focus, Focus::Field(9));
    }

    #[test]
    fn calculate_with_empty_field_alerts_and_clears_table() {
        let mut app = app_with_count("2");
        app.handle_enter();
        fill_case(&mut app, SAMPLE);
        app.focus = Focus::CalculateButton;
        app.handle_enter();

        assert!(app.results.is_none());
        assert_eq!(
            app.alert.unwrap().message,
            "Please fill in all input fields before calculating."
        );
    }

    #[test]
    fn failed_calculation_hides_previous_results() {
        let mut app = app_with_count("1");
        app.handle_enter();
        fill_case(&mut app, SAMPLE);
        assert!(app.results.is_some());

        app.focus = Focus::Field(0);
        app.edit(KeyEvent::new(KeyCode::Char('u'), KeyModifiers::CONTROL));
        app.calculate_results();
        assert!(app.results.is_none());
        assert!(app.alert.is_some());
    }

    #[test]
    fn count_cleared_before_calculate_alerts_invalid_count() {
        let mut app = app_with_count("1");
        app.handle_enter();
        fill_case(&mut app, SAMPLE);
        assert!(app.results.is_some());

        app.count_input = LineInput::new("");
        app.calculate_results();
        assert!(app.results.is_none());
        assert_eq!(app.alert.unwrap().title, "Invalid count");
    }

    #[test]
    fn count_with_trailing_text_generates_leading_number() {
        let mut app = app_with_count("2 cases");
        app.handle_enter();
        assert!(app.alert.is_none());
        assert_eq!(app.field_count(), 20);
    }

    #[test]
    fn calculate_before_generate_reports_missing_input() {
        let mut app = app_with_count("1");
        app.focus = Focus::CalculateButton;
        app.handle_enter();
        assert_eq!(app.alert.unwrap().title, "Missing input");
    }

    #[test]
    fn strict_policy_reports_bad_number() {
        let mut app = app_with_count("1");
        app.handle_enter();
        let mut values = SAMPLE;
        values[3] = "7o";
        fill_case(&mut app, values);
        assert!(app.results.is_none());
        assert_eq!(app.alert.unwrap().title, "Invalid number");
    }

    #[test]
    fn buttons_ignore_editing_keys() {
        let mut app = app_with_count("1");
        app.focus = Focus::GenerateButton;
        let result = app.edit(KeyEvent::new(KeyCode::Char('5'), KeyModifiers::NONE));
        assert_eq!(result, InputResult::Ignored);
        assert_eq!(app.count_input.value(), "1");
    }

    #[test]
    fn paste_updates_form_value() {
        let mut app = app_with_count("1");
        app.generate_inputs();
        app.paste("12.5\n");
        assert_eq!(app.form.as_ref().unwrap().fields()[0].value, "12.5");
    }

    #[test]
    fn case_step_clamps_to_field_range() {
        let mut app = app_with_count("2");
        app.generate_inputs();
        app.focus = Focus::Field(3);
        app.focus_case_step(true);
        assert_eq!(app.focus, Focus::Field(13));
        app.focus_case_step(true);
        assert_eq!(app.focus, Focus::Field(19));
        app.focus_case_step(false);
        assert_eq!(app.focus, Focus::Field(9));
        app.focus_case_step(false);
        assert_eq!(app.focus, Focus::Field(0));
    }
}
