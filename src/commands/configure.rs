use crate::cli::ConfigCommands;
use crate::config::Config;
use crate::utils::{OutputStyle, print_muted, print_success, print_warning};
use anyhow::Result;

pub fn handle_config_command(config: Config, command: Option<ConfigCommands>) -> Result<()> {
    match command {
        Some(ConfigCommands::Show) => handle_show_command(&config),
        Some(ConfigCommands::Path) => {
            println!("{}", Config::config_file_path().display());
            Ok(())
        }
        Some(ConfigCommands::Reset { force }) => handle_reset_command(force),
        None => handle_config_help(),
    }
}

fn handle_show_command(config: &Config) -> Result<()> {
    OutputStyle::print_header("⚙️  Survey Responder Configuration");

    println!("General:");
    println!("  Questions file: {}", config.general.questions_path.display());
    println!("  Persona file: {}", config.general.persona_path.display());
    println!("  Responses per run: {}", config.general.num_responses);

    println!("Model:");
    println!("  Name: {}", config.model.name);
    println!("  Endpoint: {}", config.model.base_url);
    println!("  Temperature: {}", config.model.temperature);
    if let Some(secs) = config.model.timeout_secs {
        println!("  Timeout: {}s", secs);
    }

    println!("Survey:");
    println!("  Response options: {}", config.survey.response_options.join(", "));

    Ok(())
}

fn handle_config_help() -> Result<()> {
    OutputStyle::print_header("⚙️  Configuration Management");
    println!("Available configuration commands:");
    println!("  survey-responder config show           - Show current configuration");
    println!("  survey-responder config path           - Print the configuration file location");
    println!("  survey-responder config reset --force  - Reset configuration to defaults");
    println!();
    print_muted(&format!("Configuration file location: {}", Config::config_file_path().display()));
    Ok(())
}

fn handle_reset_command(force: bool) -> Result<()> {
    if !force {
        print_warning("This overwrites your current settings. Re-run with --force to reset.");
        return Ok(());
    }

    Config::default().save()?;
    print_success("Configuration reset to defaults!");
    Ok(())
}
