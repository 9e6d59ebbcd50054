use crate::lab::LabError;
use crate::lab::constants::{FIELDS_PER_CASE, MAX_CASES, MIN_CASES};
use crate::lab::numeric::leading_int;

/// The ten readings of a test case, in entry order.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FieldKind {
    Voltage,
    Current,
    /// Inner surface temperature T1..T4.
    Inner(u8),
    /// Outer surface temperature T5..T8.
    Outer(u8),
}

impl FieldKind {
    pub const ALL: [FieldKind; FIELDS_PER_CASE] = [
        FieldKind::Voltage,
        FieldKind::Current,
        FieldKind::Inner(1),
        FieldKind::Inner(2),
        FieldKind::Inner(3),
        FieldKind::Inner(4),
        FieldKind::Outer(5),
        FieldKind::Outer(6),
        FieldKind::Outer(7),
        FieldKind::Outer(8),
    ];

    pub fn symbol(self) -> String {
        match self {
            FieldKind::Voltage => "V".to_string(),
            FieldKind::Current => "I".to_string(),
            FieldKind::Inner(n) | FieldKind::Outer(n) => format!("T{n}"),
        }
    }

    pub fn label(self, case: usize) -> String {
        match self {
            FieldKind::Voltage => format!("Voltmeter Reading (V) for case {case}"),
            FieldKind::Current => format!("Ammeter Reading (I) for case {case}"),
            FieldKind::Inner(n) => format!("Inner Surface Temperature T{n} for case {case}"),
            FieldKind::Outer(n) => format!("Outer Surface Temperature T{n} for case {case}"),
        }
    }
}

/// Structured address of one reading: 1-based case and 1-based position.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct FieldId {
    pub case: usize,
    pub position: usize,
}

impl FieldId {
    pub fn new(case: usize, position: usize) -> Option<Self> {
        let case_ok = (MIN_CASES..=MAX_CASES).contains(&case);
        let position_ok = (1..=FIELDS_PER_CASE).contains(&position);
        (case_ok && position_ok).then_some(Self { case, position })
    }

    /// 1-based sequence number, `(case - 1) * 10 + position`.
    pub fn sequence(self) -> usize {
        (self.case - 1) * FIELDS_PER_CASE + self.position
    }

    /// Index into the form's field list (document order).
    pub fn index(self) -> usize {
        self.sequence() - 1
    }

    /// Sequential field name, e.g. `input13` for case 2, position 3.
    pub fn name(self) -> String {
        format!("input{}", self.sequence())
    }

    pub fn from_sequence(sequence: usize) -> Option<Self> {
        let index = sequence.checked_sub(1)?;
        Self::new(
            index / FIELDS_PER_CASE + 1,
            index % FIELDS_PER_CASE + 1,
        )
    }

    pub fn from_name(name: &str) -> Option<Self> {
        let digits = name.strip_prefix("input")?;
        if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
            return None;
        }
        Self::from_sequence(digits.parse().ok()?)
    }

    pub fn kind(self) -> FieldKind {
        // Positions are range-checked on construction.
        FieldKind::ALL[self.position - 1]
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct InputField {
    pub id: FieldId,
    pub label: String,
    pub value: String,
}

impl InputField {
    fn new(id: FieldId) -> Self {
        Self {
            id,
            label: id.kind().label(id.case),
            value: String::new(),
        }
    }

    pub fn name(&self) -> String {
        self.id.name()
    }

    pub fn is_filled(&self) -> bool {
        !self.value.is_empty()
    }
}

/// Generated input fields for `case_count` test cases, in document order.
/// The default form has no cases and stands for "nothing generated yet".
#[derive(Clone, Debug, Default, PartialEq)]
pub struct InputForm {
    case_count: usize,
    fields: Vec<InputField>,
}

impl InputForm {
    fn with_cases(case_count: usize) -> Self {
        let fields = (1..=case_count)
            .flat_map(|case| {
                (1..=FIELDS_PER_CASE).filter_map(move |position| FieldId::new(case, position))
            })
            .map(InputField::new)
            .collect();
        Self { case_count, fields }
    }

    pub fn case_count(&self) -> usize {
        self.case_count
    }

    pub fn fields(&self) -> &[InputField] {
        &self.fields
    }

    /// Always ten per case.
    pub fn field_count(&self) -> usize {
        self.fields.len()
    }

    pub fn field(&self, id: FieldId) -> Option<&InputField> {
        self.fields.get(id.index()).filter(|f| f.id == id)
    }

    /// Set a field's text. Returns false if the field does not exist.
    pub fn set_value(&mut self, id: FieldId, value: &str) -> bool {
        match self.fields.get_mut(id.index()) {
            Some(field) if field.id == id => {
                field.value = value.to_string();
                true
            }
            _ => false,
        }
    }

    pub fn set_named(&mut self, name: &str, value: &str) -> bool {
        FieldId::from_name(name).is_some_and(|id| self.set_value(id, value))
    }

    /// Fields belonging to one case, or an empty slice if the case is absent.
    pub fn case_fields(&self, case: usize) -> &[InputField] {
        if case == 0 || case > self.case_count {
            return &[];
        }
        let start = (case - 1) * FIELDS_PER_CASE;
        &self.fields[start..start + FIELDS_PER_CASE]
    }
}

/// Parse the requested number of test cases from the leading integer of
/// `input`, so `"3.7"` and `"3 cases"` both mean 3. Rejected when there is no
/// leading integer or it falls outside 1..=10.
pub fn parse_case_count(input: &str) -> Result<usize, LabError> {
    leading_int(input)
        .and_then(|n| usize::try_from(n).ok())
        .filter(|n| (MIN_CASES..=MAX_CASES).contains(n))
        .ok_or_else(|| LabError::InvalidCount {
            input: input.to_string(),
        })
}

/// Build a fresh, empty form for the requested number of test cases.
pub fn generate_inputs(requested: &str) -> Result<InputForm, LabError> {
    let count = parse_case_count(requested)?;
    Ok(InputForm::with_cases(count))
}
