use crate::cli::SettingsArgs;
use crate::config::Config;
use crate::utils::OutputStyle;
use super::build_responder;
use anyhow::Result;

pub fn handle_settings_command(config: Config, args: &SettingsArgs) -> Result<()> {
    let responder = build_responder(config)?;
    let settings = responder.settings();

    if args.json {
        println!("{}", serde_json::to_string_pretty(&settings)?);
        return Ok(());
    }

    OutputStyle::print_settings(&settings);

    if args.list_questions {
        println!();
        OutputStyle::print_header("❓ Questions");
        for (i, question) in responder.iter().enumerate() {
            println!("{:>5}: {}", OutputStyle::label(&format!("Q{}", i + 1)), OutputStyle::content(question));
        }
    }
    Ok(())
}
