//! Core data structures for survey simulation
//!
//! This module contains the trait catalog, persona samples, response rows and
//! the run metadata shared across the loader, the sampler and the responder.

use serde::ser::{SerializeMap, SerializeTuple};
use serde::{Serialize, Serializer};
use serde_json::{Number, Value};
use std::fmt;
use std::path::PathBuf;

/// Cell value recorded when a question could not be answered.
pub const ERROR_SENTINEL: &str = "ERROR";

/// Opaque trait token as it appears in the catalog file.
#[derive(Debug, Clone, PartialEq)]
pub enum TraitValue {
    Text(String),
    Number(Number),
    Bool(bool),
}

impl TraitValue {
    /// Convert a JSON scalar; arrays, objects and null are not trait values.
    pub fn from_json(value: &Value) -> Option<Self> {
        match value {
            Value::String(s) => Some(TraitValue::Text(s.clone())),
            Value::Number(n) => Some(TraitValue::Number(n.clone())),
            Value::Bool(b) => Some(TraitValue::Bool(*b)),
            _ => None,
        }
    }

    pub fn to_json(&self) -> Value {
        match self {
            TraitValue::Text(s) => Value::String(s.clone()),
            TraitValue::Number(n) => Value::Number(n.clone()),
            TraitValue::Bool(b) => Value::Bool(*b),
        }
    }
}

impl fmt::Display for TraitValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TraitValue::Text(s) => write!(f, "{}", s),
            TraitValue::Number(n) => write!(f, "{}", n),
            TraitValue::Bool(true) => write!(f, "True"),
            TraitValue::Bool(false) => write!(f, "False"),
        }
    }
}

impl Serialize for TraitValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.to_json().serialize(serializer)
    }
}

/// One selectable option of a trait category.
#[derive(Debug, Clone, PartialEq)]
pub struct TraitOption {
    pub value: TraitValue,
    pub description: String,
}

impl TraitOption {
    pub fn new(value: TraitValue, description: impl Into<String>) -> Self {
        Self {
            value,
            description: description.into(),
        }
    }
}

// Written back as `[value, description]`, the same shape the catalog file uses.
impl Serialize for TraitOption {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut tuple = serializer.serialize_tuple(2)?;
        tuple.serialize_element(&self.value)?;
        tuple.serialize_element(&self.description)?;
        tuple.end()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct TraitCategory {
    pub name: String,
    pub options: Vec<TraitOption>,
}

/// Category name to options, in the order the categories were declared.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TraitCatalog {
    categories: Vec<TraitCategory>,
}

impl TraitCatalog {
    pub fn new(categories: Vec<TraitCategory>) -> Self {
        Self { categories }
    }

    pub fn categories(&self) -> &[TraitCategory] {
        &self.categories
    }

    pub fn category_names(&self) -> Vec<String> {
        self.categories.iter().map(|c| c.name.clone()).collect()
    }

    pub fn len(&self) -> usize {
        self.categories.len()
    }

    pub fn is_empty(&self) -> bool {
        self.categories.is_empty()
    }
}

impl Serialize for TraitCatalog {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.categories.len()))?;
        for category in &self.categories {
            map.serialize_entry(&category.name, &category.options)?;
        }
        map.end()
    }
}

/// The traits drawn for one simulated respondent.
#[derive(Debug, Clone, PartialEq)]
pub struct PersonaSample {
    /// Category name and selected value, in catalog order.
    pub traits: Vec<(String, TraitValue)>,
    /// Selected descriptions, parallel to `traits`.
    pub descriptions: Vec<String>,
}

impl PersonaSample {
    pub fn trait_value(&self, category: &str) -> Option<&TraitValue> {
        self.traits
            .iter()
            .find(|(name, _)| name == category)
            .map(|(_, value)| value)
    }
}

/// Outcome of asking one question to one persona.
#[derive(Debug, Clone, PartialEq)]
pub struct ResponseRecord {
    pub question: String,
    pub response: String,
    pub prompt: String,
    pub persona_traits: Vec<(String, TraitValue)>,
    pub persona_descriptions: Vec<String>,
    pub error: Option<String>,
}

impl ResponseRecord {
    pub fn is_error(&self) -> bool {
        self.error.is_some()
    }
}

/// One simulated respondent's full record.
#[derive(Debug, Clone, PartialEq)]
pub struct ResponseRow {
    pub resid: String,
    pub model: String,
    pub traits: Vec<String>,
    pub answers: Vec<String>,
}

impl ResponseRow {
    pub fn cells(&self) -> Vec<&str> {
        let mut cells = Vec::with_capacity(2 + self.traits.len() + self.answers.len());
        cells.push(self.resid.as_str());
        cells.push(self.model.as_str());
        cells.extend(self.traits.iter().map(String::as_str));
        cells.extend(self.answers.iter().map(String::as_str));
        cells
    }
}

/// Header for a survey table: `resid, model, <categories>, Q1..Qn`.
pub fn header_columns(catalog: &TraitCatalog, num_questions: usize) -> Vec<String> {
    let mut columns = vec!["resid".to_string(), "model".to_string()];
    columns.extend(catalog.category_names());
    columns.extend((1..=num_questions).map(|i| format!("Q{}", i)));
    columns
}

/// Rows collected during a run plus every warning raised while collecting them.
#[derive(Debug, Clone, Default)]
pub struct SurveyTable {
    columns: Vec<String>,
    rows: Vec<ResponseRow>,
    warnings: Vec<String>,
}

impl SurveyTable {
    pub fn new(columns: Vec<String>) -> Self {
        Self {
            columns,
            rows: Vec::new(),
            warnings: Vec::new(),
        }
    }

    pub fn push_row(&mut self, row: ResponseRow) {
        self.rows.push(row);
    }

    pub fn push_warning(&mut self, warning: String) {
        self.warnings.push(warning);
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn rows(&self) -> &[ResponseRow] {
        &self.rows
    }

    pub fn warnings(&self) -> &[String] {
        &self.warnings
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Every value of the named column, top to bottom.
    pub fn column(&self, name: &str) -> Option<Vec<&str>> {
        let index = self.columns.iter().position(|c| c == name)?;
        Some(
            self.rows
                .iter()
                .filter_map(|row| row.cells().get(index).copied())
                .collect(),
        )
    }

    pub fn error_cells(&self) -> usize {
        self.rows
            .iter()
            .flat_map(|row| row.answers.iter())
            .filter(|answer| answer.as_str() == ERROR_SENTINEL)
            .count()
    }
}

/// Snapshot of the effective responder configuration.
#[derive(Debug, Clone, Serialize)]
pub struct ResponderSettings {
    pub questions_path: PathBuf,
    pub persona_path: PathBuf,
    pub model_name: String,
    pub base_url: String,
    pub num_responses: usize,
    pub temperature: f64,
    pub response_options: Vec<String>,
    pub num_questions: usize,
    pub persona_traits: Vec<String>,
}

/// Metadata written next to a persisted run for reproducibility.
#[derive(Debug, Clone, Serialize)]
pub struct RunParameters {
    pub questions_path: PathBuf,
    pub persona_path: PathBuf,
    pub model_name: String,
    pub base_url: String,
    pub num_responses: usize,
    pub temperature: f64,
    pub response_options: Vec<String>,
    pub run_date: String,
    pub num_questions: usize,
    pub questions: Vec<String>,
    pub persona_dictionary: TraitCatalog,
    pub computer_memory: Value,
    pub computer_os: String,
    pub computer_runtime: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn catalog() -> TraitCatalog {
        TraitCatalog::new(vec![
            TraitCategory {
                name: "age".to_string(),
                options: vec![
                    TraitOption::new(TraitValue::Number(Number::from(25u64)), "is 25"),
                    TraitOption::new(TraitValue::Number(Number::from(35u64)), "is 35"),
                ],
            },
            TraitCategory {
                name: "occupation".to_string(),
                options: vec![TraitOption::new(
                    TraitValue::Text("engineer".to_string()),
                    "works as an engineer",
                )],
            },
        ])
    }

    #[test]
    fn test_trait_value_display() {
        assert_eq!(TraitValue::Number(Number::from(25u64)).to_string(), "25");
        assert_eq!(TraitValue::Text("engineer".into()).to_string(), "engineer");
        assert_eq!(TraitValue::Bool(true).to_string(), "True");
        assert_eq!(TraitValue::from_json(&Value::Null), None);
    }

    #[test]
    fn test_catalog_serializes_in_file_shape() {
        let json = serde_json::to_string(&catalog()).unwrap();
        assert_eq!(
            json,
            r#"{"age":[[25,"is 25"],[35,"is 35"]],"occupation":[["engineer","works as an engineer"]]}"#
        );
    }

    #[test]
    fn test_header_columns_order() {
        assert_eq!(
            header_columns(&catalog(), 2),
            vec!["resid", "model", "age", "occupation", "Q1", "Q2"]
        );
    }

    #[test]
    fn test_table_column_lookup_and_error_count() {
        let mut table = SurveyTable::new(header_columns(&catalog(), 2));
        table.push_row(ResponseRow {
            resid: "r1".to_string(),
            model: "m".to_string(),
            traits: vec!["25".to_string(), "engineer".to_string()],
            answers: vec!["agree".to_string(), ERROR_SENTINEL.to_string()],
        });

        assert_eq!(table.len(), 1);
        assert_eq!(table.column("Q1"), Some(vec!["agree"]));
        assert_eq!(table.column("age"), Some(vec!["25"]));
        assert_eq!(table.column("Q9"), None);
        assert_eq!(table.error_cells(), 1);
    }
}
