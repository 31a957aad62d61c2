//! Input loading for question files and trait catalogs.

use crate::core::data::{TraitCatalog, TraitCategory, TraitOption, TraitValue};
use crate::utils::error::{AppError, AppResult};
use serde_json::Value;
use std::path::Path;

/// Load questions from a text file, one per line.
///
/// Lines are trimmed and blank lines are skipped; order is preserved.
pub fn load_questions(path: &Path) -> AppResult<Vec<String>> {
    let content = std::fs::read_to_string(path).map_err(|e| AppError::from_io(path, e))?;
    Ok(parse_questions(&content))
}

pub fn parse_questions(content: &str) -> Vec<String> {
    content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(String::from)
        .collect()
}

/// Load a trait catalog from a JSON document of the form
/// `{"category": [[value, "description"], ...], ...}`.
pub fn load_trait_catalog(path: &Path) -> AppResult<TraitCatalog> {
    let content = std::fs::read_to_string(path).map_err(|e| AppError::from_io(path, e))?;
    parse_trait_catalog(&content)
        .map_err(|e| match e {
            AppError::Parse(msg) => AppError::Parse(format!("{}: {}", path.display(), msg)),
            other => other,
        })
}

pub fn parse_trait_catalog(content: &str) -> AppResult<TraitCatalog> {
    let document: Value = serde_json::from_str(content)
        .map_err(|e| AppError::Parse(format!("invalid JSON: {}", e)))?;

    let object = document
        .as_object()
        .ok_or_else(|| AppError::Parse("trait catalog must be a JSON object".to_string()))?;

    let mut categories = Vec::with_capacity(object.len());
    for (name, options) in object {
        let options = parse_options(name, options)?;
        if options.is_empty() {
            return Err(AppError::Configuration(format!(
                "trait category '{}' has no options",
                name
            )));
        }
        categories.push(TraitCategory {
            name: name.clone(),
            options,
        });
    }

    Ok(TraitCatalog::new(categories))
}

fn parse_options(category: &str, options: &Value) -> AppResult<Vec<TraitOption>> {
    let items = options.as_array().ok_or_else(|| {
        AppError::Parse(format!("options for '{}' must be an array", category))
    })?;

    items
        .iter()
        .enumerate()
        .map(|(index, item)| parse_option(category, index, item))
        .collect()
}

fn parse_option(category: &str, index: usize, item: &Value) -> AppResult<TraitOption> {
    let pair = match item.as_array() {
        Some(pair) if pair.len() == 2 => pair,
        _ => {
            return Err(AppError::Parse(format!(
                "option {} of '{}' must be a [value, description] pair",
                index, category
            )));
        }
    };

    let value = TraitValue::from_json(&pair[0]).ok_or_else(|| {
        AppError::Parse(format!(
            "option {} of '{}' has a value that is not a string, number or boolean",
            index, category
        ))
    })?;

    let description = pair[1].as_str().ok_or_else(|| {
        AppError::Parse(format!(
            "option {} of '{}' has a description that is not a string",
            index, category
        ))
    })?;

    Ok(TraitOption::new(value, description))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn write_temp(content: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_load_questions_trims_and_skips_blank_lines() {
        let file = write_temp(
            "Question 1: How often do you exercise?\n\n   \n  Question 2: Do you enjoy reading?  \nQuestion 3: How well do you handle stress?\n",
        );
        let questions = load_questions(file.path()).unwrap();

        assert_eq!(questions.len(), 3);
        assert_eq!(questions[0], "Question 1: How often do you exercise?");
        assert_eq!(questions[1], "Question 2: Do you enjoy reading?");
        assert!(questions[2].starts_with("Question 3"));
    }

    #[test]
    fn test_load_questions_missing_file() {
        let err = load_questions(Path::new("nonexistent_questions.txt")).unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));
    }

    #[test]
    fn test_load_trait_catalog_preserves_order() {
        let file = write_temp(
            r#"{
                "occupation": [["engineer", "works as an engineer"], ["teacher", "works as a teacher"]],
                "age": [[25, "is 25 years old"], [35, "is 35 years old"]],
                "education": [["bachelor", "has a bachelor's degree"]]
            }"#,
        );
        let catalog = load_trait_catalog(file.path()).unwrap();

        assert_eq!(catalog.category_names(), vec!["occupation", "age", "education"]);
        let age = &catalog.categories()[1];
        assert_eq!(age.options.len(), 2);
        assert_eq!(age.options[0].value.to_string(), "25");
        assert_eq!(age.options[1].description, "is 35 years old");
    }

    #[test]
    fn test_load_trait_catalog_missing_file() {
        let err = load_trait_catalog(Path::new("nonexistent_persona.json")).unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));
    }

    #[test]
    fn test_parse_trait_catalog_rejects_malformed_documents() {
        assert!(matches!(parse_trait_catalog("{not json"), Err(AppError::Parse(_))));
        assert!(matches!(parse_trait_catalog("[1, 2]"), Err(AppError::Parse(_))));
        assert!(matches!(
            parse_trait_catalog(r#"{"age": "young"}"#),
            Err(AppError::Parse(_))
        ));
        assert!(matches!(
            parse_trait_catalog(r#"{"age": [[25, "is 25", "extra"]]}"#),
            Err(AppError::Parse(_))
        ));
        assert!(matches!(
            parse_trait_catalog(r#"{"age": [[25, 26]]}"#),
            Err(AppError::Parse(_))
        ));
        assert!(matches!(
            parse_trait_catalog(r#"{"age": [[null, "unknown"]]}"#),
            Err(AppError::Parse(_))
        ));
    }

    #[test]
    fn test_parse_trait_catalog_rejects_empty_category() {
        let err = parse_trait_catalog(r#"{"age": []}"#).unwrap_err();
        assert!(matches!(err, AppError::Configuration(_)));
    }
}
