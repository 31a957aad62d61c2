use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;
use anyhow::Result;
use crate::config::Config;
use crate::commands::{configure, preview, run, settings};
use crate::utils::format::split_comma_list;

#[derive(Parser)]
#[command(name = "survey-responder")]
#[command(about = "Generate synthetic survey responses with a local LLM")]
#[command(version)]
pub struct Cli {
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    #[arg(short, long)]
    pub debug: bool,

    #[arg(long, value_name = "FILE", help = "Questions file, one question per line")]
    pub questions: Option<PathBuf>,

    #[arg(long, value_name = "FILE", help = "Persona trait catalog (JSON)")]
    pub persona: Option<PathBuf>,

    #[arg(short, long, help = "Model name passed to the endpoint")]
    pub model: Option<String>,

    #[arg(long, help = "Inference endpoint URL")]
    pub base_url: Option<String>,

    #[arg(short, long, help = "Sampling temperature")]
    pub temperature: Option<f64>,

    #[arg(long, help = "Comma separated response options, first to last")]
    pub options: Option<String>,

    #[arg(long, value_name = "SECS", help = "Request timeout in seconds")]
    pub timeout: Option<u64>,

    #[command(subcommand)]
    pub command: Commands,
}

impl Cli {
    /// Apply command-line overrides on top of the loaded configuration.
    pub fn apply_overrides(&self, config: &mut Config) {
        if let Some(path) = &self.questions {
            config.general.questions_path = path.clone();
        }
        if let Some(path) = &self.persona {
            config.general.persona_path = path.clone();
        }
        if let Some(model) = &self.model {
            config.model.name = model.clone();
        }
        if let Some(url) = &self.base_url {
            config.model.base_url = url.clone();
        }
        if let Some(temperature) = self.temperature {
            config.model.temperature = temperature;
        }
        if let Some(options) = &self.options {
            config.survey.response_options = split_comma_list(options);
        }
        if let Some(secs) = self.timeout {
            config.model.timeout_secs = Some(secs);
        }
    }
}

impl Commands {
    pub async fn execute(self, config: Config) -> Result<()> {
        match self {
            Commands::Run(args) => {
                run::handle_run_command(config, &args).await?;
            }
            Commands::Prompt(args) => {
                preview::handle_prompt_command(config, &args)?;
            }
            Commands::Persona(args) => {
                preview::handle_persona_command(config, &args)?;
            }
            Commands::Settings(args) => {
                settings::handle_settings_command(config, &args)?;
            }
            Commands::Config(args) => {
                configure::handle_config_command(config, args.command)?;
            }
        }
        Ok(())
    }
}

#[derive(Subcommand)]
pub enum Commands {
    /// Generate synthetic responses
    Run(RunArgs),

    /// Show an example prompt for a random persona
    Prompt(PromptArgs),

    /// Show example personas
    Persona(PersonaArgs),

    /// Show the effective responder settings
    Settings(SettingsArgs),

    /// Configuration management
    Config(ConfigArgs),
}

#[derive(Args)]
pub struct RunArgs {
    #[arg(short, long, value_name = "FILE", help = "CSV file to append rows to as they are generated")]
    pub output: Option<PathBuf>,

    #[arg(short = 'n', long, help = "Number of respondents (overrides config)")]
    pub num_responses: Option<usize>,

    #[arg(long, help = "Seed for persona sampling and respondent ids")]
    pub seed: Option<u64>,
}

#[derive(Args)]
pub struct PromptArgs {
    #[arg(short, long, help = "Question to use instead of the first loaded one")]
    pub question: Option<String>,

    #[arg(long)]
    pub seed: Option<u64>,
}

#[derive(Args)]
pub struct PersonaArgs {
    #[arg(short = 'n', long, default_value_t = 1)]
    pub count: usize,

    #[arg(long)]
    pub seed: Option<u64>,
}

#[derive(Args)]
pub struct SettingsArgs {
    #[arg(long, help = "Print settings as JSON")]
    pub json: bool,

    #[arg(long, help = "Also list every loaded question")]
    pub list_questions: bool,
}

#[derive(Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: Option<ConfigCommands>,
}

#[derive(Subcommand, Clone)]
pub enum ConfigCommands {
    /// Show current configuration
    Show,

    /// Print the configuration file location
    Path,

    /// Reset configuration to defaults
    Reset {
        #[arg(short, long)]
        force: bool,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_run_args_parse() {
        let cli = Cli::try_parse_from([
            "survey-responder",
            "--model",
            "mistral",
            "run",
            "-o",
            "out.csv",
            "-n",
            "5",
            "--seed",
            "42",
        ])
        .unwrap();

        assert_eq!(cli.model.as_deref(), Some("mistral"));
        match cli.command {
            Commands::Run(args) => {
                assert_eq!(args.output, Some(PathBuf::from("out.csv")));
                assert_eq!(args.num_responses, Some(5));
                assert_eq!(args.seed, Some(42));
            }
            _ => panic!("expected run command"),
        }
    }

    #[test]
    fn test_overrides_apply_to_config() {
        let cli = Cli::try_parse_from([
            "survey-responder",
            "--questions",
            "q.txt",
            "--temperature",
            "0.4",
            "--options",
            "Never, Sometimes, Always",
            "--timeout",
            "30",
            "persona",
        ])
        .unwrap();

        let mut config = Config::default();
        cli.apply_overrides(&mut config);

        assert_eq!(config.general.questions_path, PathBuf::from("q.txt"));
        assert_eq!(config.general.persona_path, PathBuf::from("persona.json"));
        assert_eq!(config.model.temperature, 0.4);
        assert_eq!(config.survey.response_options, vec!["Never", "Sometimes", "Always"]);
        assert_eq!(config.model.timeout_secs, Some(30));
    }

    #[test]
    fn test_persona_count_default() {
        let cli = Cli::try_parse_from(["survey-responder", "persona"]).unwrap();
        match cli.command {
            Commands::Persona(args) => assert_eq!(args.count, 1),
            _ => panic!("expected persona command"),
        }
    }
}
