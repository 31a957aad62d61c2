//! The respondent simulator.
//!
//! A [`SurveyResponder`] owns the questions, the trait catalog and the response
//! options for its whole lifetime and walks respondents and questions strictly
//! one at a time.

use crate::config::Config;
use crate::core::data::{
    ERROR_SENTINEL, PersonaSample, ResponderSettings, ResponseRecord, ResponseRow, RunParameters,
    SurveyTable, TraitCatalog, header_columns,
};
use crate::inference::{GenerateRequest, InferenceClient};
use crate::loader::{load_questions, load_trait_catalog};
use crate::persona::{describe_persona, sample_persona};
use crate::prompt::build_prompt;
use crate::storage;
use crate::utils::error::{AppError, AppResult};
use crate::utils::format::format_run_date;
use crate::utils::host;
use rand::Rng;
use std::fmt;
use std::path::{Path, PathBuf};

const PLACEHOLDER_QUESTION: &str = "This is a placeholder question since no questions were loaded.";

/// Result of [`SurveyResponder::run_and_persist`].
#[derive(Debug)]
pub struct PersistedRun {
    pub table: SurveyTable,
    pub output_path: PathBuf,
    pub params_path: PathBuf,
}

pub struct SurveyResponder<C: InferenceClient> {
    config: Config,
    questions: Vec<String>,
    catalog: TraitCatalog,
    client: C,
}

impl<C: InferenceClient> SurveyResponder<C> {
    /// Load the question file and trait catalog named in `config`.
    pub fn new(config: Config, client: C) -> AppResult<Self> {
        config.validate()?;
        let questions = load_questions(&config.general.questions_path)?;
        let catalog = load_trait_catalog(&config.general.persona_path)?;

        tracing::info!(
            questions = questions.len(),
            traits = catalog.len(),
            model = %config.model.name,
            "Survey responder ready"
        );

        Ok(Self {
            config,
            questions,
            catalog,
            client,
        })
    }

    pub fn catalog(&self) -> &TraitCatalog {
        &self.catalog
    }

    pub fn response_options(&self) -> &[String] {
        &self.config.survey.response_options
    }

    pub fn len(&self) -> usize {
        self.questions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.questions.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, String> {
        self.questions.iter()
    }

    pub fn settings(&self) -> ResponderSettings {
        ResponderSettings {
            questions_path: self.config.general.questions_path.clone(),
            persona_path: self.config.general.persona_path.clone(),
            model_name: self.config.model.name.clone(),
            base_url: self.config.model.base_url.clone(),
            num_responses: self.config.general.num_responses,
            temperature: self.config.model.temperature,
            response_options: self.config.survey.response_options.clone(),
            num_questions: self.questions.len(),
            persona_traits: self.catalog.category_names(),
        }
    }

    /// Preview the prompt for a random persona. Falls back to the first loaded
    /// question, then to a placeholder.
    pub fn example_prompt<R: Rng + ?Sized>(&self, question: Option<&str>, rng: &mut R) -> AppResult<String> {
        let persona = sample_persona(&self.catalog, rng)?;
        let question = question
            .or_else(|| self.questions.first().map(String::as_str))
            .unwrap_or(PLACEHOLDER_QUESTION);
        Ok(build_prompt(question, &persona.descriptions, self.response_options()))
    }

    /// Preview `count` persona preamble sentences.
    pub fn example_personas<R: Rng + ?Sized>(&self, count: usize, rng: &mut R) -> AppResult<Vec<String>> {
        (0..count)
            .map(|_| sample_persona(&self.catalog, rng).map(|p| describe_persona(&p.descriptions)))
            .collect()
    }

    /// Send one prompt to the endpoint and return the trimmed reply.
    pub async fn get_response(&self, prompt: &str) -> AppResult<String> {
        let request = GenerateRequest::new(&self.config.model.name, prompt, self.config.model.temperature);
        let text = self.client.generate(&request).await?;
        Ok(text.trim().to_string())
    }

    /// Ask one question. Never fails: errors are logged as warnings and become
    /// an `ERROR` answer with the detail kept in `error`.
    pub async fn answer_question(&self, question: &str, persona: &PersonaSample) -> ResponseRecord {
        let prompt = build_prompt(question, &persona.descriptions, self.response_options());

        let (response, error) = match self.get_response(&prompt).await {
            Ok(text) if text.is_empty() => (
                ERROR_SENTINEL.to_string(),
                Some("model returned an empty response".to_string()),
            ),
            Ok(text) => (text, None),
            Err(e) => (ERROR_SENTINEL.to_string(), Some(e.to_string())),
        };

        if let Some(error) = &error {
            tracing::warn!("Error processing question '{}': {}", question, error);
        }

        ResponseRecord {
            question: question.to_string(),
            response,
            prompt,
            persona_traits: persona.traits.clone(),
            persona_descriptions: persona.descriptions.clone(),
            error,
        }
    }

    fn new_respondent_id<R: Rng + ?Sized>(rng: &mut R) -> String {
        let mut bytes = [0u8; 16];
        rng.fill(&mut bytes);
        uuid::Builder::from_random_bytes(bytes).into_uuid().to_string()
    }

    /// Build one respondent's row. Question-level failures are recorded in
    /// `table`'s warnings and as `ERROR` cells.
    async fn respond<R: Rng + ?Sized>(&self, rng: &mut R, table: &mut SurveyTable) -> AppResult<ResponseRow> {
        let resid = Self::new_respondent_id(rng);
        let persona = sample_persona(&self.catalog, rng)?;

        let traits = self
            .catalog
            .categories()
            .iter()
            .map(|category| {
                persona
                    .trait_value(&category.name)
                    .map(|value| value.to_string())
                    .unwrap_or_default()
            })
            .collect();

        let mut answers = Vec::with_capacity(self.questions.len());
        for question in &self.questions {
            let record = self.answer_question(question, &persona).await;
            if record.is_error() {
                table.push_warning(format!(
                    "Error processing question '{}' for respondent {}: {}",
                    question,
                    resid,
                    record.error.as_deref().unwrap_or_default()
                ));
            }
            answers.push(record.response);
        }

        Ok(ResponseRow {
            resid,
            model: self.config.model.name.clone(),
            traits,
            answers,
        })
    }

    fn drop_respondent(table: &mut SurveyTable, index: usize, err: &AppError) {
        let warning = format!("Error generating response {}: {}", index + 1, err);
        tracing::warn!("{}", warning);
        table.push_warning(warning);
    }

    /// Simulate `num_respondents` respondents and collect their rows.
    pub async fn run<R: Rng + ?Sized>(&self, num_respondents: usize, rng: &mut R) -> SurveyTable {
        let mut table = SurveyTable::new(header_columns(&self.catalog, self.questions.len()));
        tracing::info!(respondents = num_respondents, "Generating responses");

        for n in 0..num_respondents {
            match self.respond(rng, &mut table).await {
                Ok(row) => table.push_row(row),
                Err(e) => Self::drop_respondent(&mut table, n, &e),
            }
            tracing::info!("Respondent {}/{} done", n + 1, num_respondents);
        }

        table
    }

    /// Like [`run`](Self::run), but writes the header, a `_params.json`
    /// sibling, and every row as soon as it is complete. Never overwrites an
    /// existing file. A row that cannot be appended stays in the returned
    /// table and is reported as a warning.
    pub async fn run_and_persist<R: Rng + ?Sized>(
        &self,
        num_respondents: usize,
        output_path: &Path,
        rng: &mut R,
    ) -> AppResult<PersistedRun> {
        // A taken params sibling also rules a candidate out.
        let output_path = storage::next_available_path(output_path, |p| {
            p.exists() || storage::params_path_for(p).exists()
        });
        let params_path = storage::params_path_for(&output_path);

        let mut table = SurveyTable::new(header_columns(&self.catalog, self.questions.len()));
        storage::write_header(&output_path, table.columns())?;
        storage::write_params(&params_path, &self.run_parameters(num_respondents))?;

        tracing::info!(
            output = %output_path.display(),
            params = %params_path.display(),
            respondents = num_respondents,
            "Generating responses"
        );

        for n in 0..num_respondents {
            match self.respond(rng, &mut table).await {
                Ok(row) => {
                    if let Err(e) = storage::append_row(&output_path, &row) {
                        let warning = format!("Error writing response {}: {}", n + 1, e);
                        tracing::warn!("{}", warning);
                        table.push_warning(warning);
                    }
                    table.push_row(row);
                }
                Err(e) => Self::drop_respondent(&mut table, n, &e),
            }
            tracing::info!("Respondent {}/{} done", n + 1, num_respondents);
        }

        Ok(PersistedRun {
            table,
            output_path,
            params_path,
        })
    }

    pub fn run_parameters(&self, num_respondents: usize) -> RunParameters {
        RunParameters {
            questions_path: self.config.general.questions_path.clone(),
            persona_path: self.config.general.persona_path.clone(),
            model_name: self.config.model.name.clone(),
            base_url: self.config.model.base_url.clone(),
            num_responses: num_respondents,
            temperature: self.config.model.temperature,
            response_options: self.config.survey.response_options.clone(),
            run_date: format_run_date(&chrono::Local::now()),
            num_questions: self.questions.len(),
            questions: self.questions.clone(),
            persona_dictionary: self.catalog.clone(),
            computer_memory: host::total_memory(),
            computer_os: host::operating_system(),
            computer_runtime: host::runtime_version(),
        }
    }
}

impl<C: InferenceClient> fmt::Display for SurveyResponder<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "SurveyResponder(model={}, {} questions from {}, personas at {})",
            self.config.model.name,
            self.questions.len(),
            self.config.general.questions_path.display(),
            self.config.general.persona_path.display()
        )
    }
}

impl<C: InferenceClient> std::ops::Index<usize> for SurveyResponder<C> {
    type Output = String;

    fn index(&self, index: usize) -> &String {
        &self.questions[index]
    }
}

impl<'a, C: InferenceClient> IntoIterator for &'a SurveyResponder<C> {
    type Item = &'a String;
    type IntoIter = std::slice::Iter<'a, String>;

    fn into_iter(self) -> Self::IntoIter {
        self.questions.iter()
    }
}
