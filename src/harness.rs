//! Headless driver: runs the form builder and calculator from a document of
//! named field values instead of the terminal UI.
//!
//! The document is a flat JSON or TOML table keyed by the same names the UI
//! uses: `numTestCases` plus `input1` … `input{10N}`.

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use anyhow::{Context, Result, bail};
use clap::ValueEnum;
use serde::Deserialize;

use crate::lab::LabError;
use crate::lab::calc::{CalculationResult, NumberPolicy, calculate_results};
use crate::lab::form::generate_inputs;
use crate::lab::report;

pub const COUNT_KEY: &str = "numTestCases";

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    #[default]
    Table,
    Csv,
    Json,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DocumentFormat {
    Json,
    Toml,
}

impl DocumentFormat {
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|e| e.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("toml") => DocumentFormat::Toml,
            _ => DocumentFormat::Json,
        }
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum Scalar {
    Text(String),
    Int(i64),
    Float(f64),
}

impl Scalar {
    fn into_text(self) -> String {
        match self {
            Scalar::Text(s) => s,
            Scalar::Int(i) => i.to_string(),
            Scalar::Float(f) => f.to_string(),
        }
    }
}

/// Raw text for the count field and every named input.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct NamedValues {
    pub count: String,
    pub values: BTreeMap<String, String>,
}

impl NamedValues {
    pub fn parse(text: &str, format: DocumentFormat) -> Result<Self> {
        let raw: BTreeMap<String, Option<Scalar>> = match format {
            DocumentFormat::Json => serde_json::from_str(text).context("invalid JSON document")?,
            DocumentFormat::Toml => toml::from_str(text).context("invalid TOML document")?,
        };

        let mut named = NamedValues::default();
        for (key, value) in raw {
            let text = value.map(Scalar::into_text).unwrap_or_default();
            if key == COUNT_KEY {
                named.count = text;
            } else {
                named.values.insert(key, text);
            }
        }
        Ok(named)
    }

    pub fn load(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display()))?;
        Self::parse(&text, DocumentFormat::from_path(path))
            .with_context(|| format!("failed to parse {}", path.display()))
    }
}

/// Build the form, fill it by name, and calculate.
///
/// Names that do not address a generated field are ignored.
pub fn run(named: &NamedValues, policy: NumberPolicy) -> Result<Vec<CalculationResult>, LabError> {
    let mut form = generate_inputs(&named.count)?;
    for (name, value) in &named.values {
        if !form.set_named(name, value) {
            tracing::warn!(name = %name, "ignoring value for unknown field");
        }
    }
    calculate_results(form.case_count(), &form, policy)
}

pub fn render(results: &[CalculationResult], format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Table => Ok(report::render_text(results)),
        OutputFormat::Csv => Ok(report::render_csv(results)),
        OutputFormat::Json => report::render_json(results),
    }
}

/// Load, run and render in one step; validation failures become errors.
pub fn run_file(path: &Path, policy: NumberPolicy, format: OutputFormat) -> Result<String> {
    let named = NamedValues::load(path)?;
    let results = match run(&named, policy) {
        Ok(results) => results,
        Err(err) => {
            tracing::warn!(error = ?err, "harness input rejected");
            bail!("{}: {err}", path.display());
        }
    };
    tracing::info!(cases = results.len(), "harness calculation complete");
    render(&results, format)
}
