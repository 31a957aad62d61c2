use colored::*;
use crate::core::data::{ResponderSettings, SurveyTable};

pub struct OutputStyle;

impl OutputStyle {
    pub fn title(text: &str) -> ColoredString {
        text.bright_blue().bold()
    }

    pub fn label(text: &str) -> ColoredString {
        text.cyan()
    }

    pub fn content(text: &str) -> ColoredString {
        text.clear()
    }

    pub fn value(text: &str) -> ColoredString {
        text.bright_green()
    }

    pub fn success(text: &str) -> ColoredString {
        text.green()
    }

    pub fn error(text: &str) -> ColoredString {
        text.red()
    }

    pub fn warning(text: &str) -> ColoredString {
        text.yellow()
    }

    pub fn muted(text: &str) -> ColoredString {
        text.dimmed()
    }

    pub fn header_separator() -> String {
        "═".repeat(50)
    }

    pub fn print_header(title: &str) {
        println!("{}", Self::title(title));
        println!("{}", Self::header_separator());
    }

    pub fn print_field_colored(label: &str, value: &str, color_fn: impl Fn(&str) -> ColoredString) {
        println!("{:>18}: {}", Self::label(label), color_fn(value));
    }

    pub fn print_settings(settings: &ResponderSettings) {
        Self::print_header("📋 Survey Responder Settings");
        Self::print_field_colored("Questions file", &settings.questions_path.display().to_string(), Self::content);
        Self::print_field_colored("Persona file", &settings.persona_path.display().to_string(), Self::content);
        Self::print_field_colored("Model", &settings.model_name, Self::value);
        Self::print_field_colored("Endpoint", &settings.base_url, Self::content);
        Self::print_field_colored("Responses", &settings.num_responses.to_string(), Self::value);
        Self::print_field_colored("Temperature", &settings.temperature.to_string(), Self::value);
        Self::print_field_colored("Response options", &settings.response_options.join(", "), Self::content);
        Self::print_field_colored("Questions", &settings.num_questions.to_string(), Self::value);
        Self::print_field_colored("Persona traits", &settings.persona_traits.join(", "), Self::content);
    }

    /// Summary of a finished run, written to stderr so stdout can carry CSV.
    pub fn print_run_summary(table: &SurveyTable) {
        eprintln!("{}", Self::title("📊 Run complete"));
        eprintln!("{:>18}: {}", Self::label("Rows"), Self::value(&table.len().to_string()));
        eprintln!("{:>18}: {}", Self::label("Columns"), Self::value(&table.columns().len().to_string()));
        let error_cells = table.error_cells();
        if error_cells > 0 {
            eprintln!("{:>18}: {}", Self::label("Error cells"), Self::warning(&error_cells.to_string()));
        }
        if !table.warnings().is_empty() {
            eprintln!("{:>18}: {}", Self::label("Warnings"), Self::warning(&table.warnings().len().to_string()));
        }
    }
}

pub fn print_warning(message: &str) {
    eprintln!("⚠️  {}", OutputStyle::warning(message));
}

pub fn print_success(message: &str) {
    eprintln!("✅ {}", OutputStyle::success(message));
}

pub fn print_muted(message: &str) {
    println!("{}", OutputStyle::muted(message));
}
