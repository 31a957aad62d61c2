use crate::cli::{PersonaArgs, PromptArgs};
use crate::config::Config;
use crate::utils::OutputStyle;
use super::{build_responder, make_rng};
use anyhow::Result;

pub fn handle_prompt_command(config: Config, args: &PromptArgs) -> Result<()> {
    let responder = build_responder(config)?;
    let mut rng = make_rng(args.seed);

    let prompt = responder.example_prompt(args.question.as_deref(), &mut rng)?;
    OutputStyle::print_header("📝 Example Prompt");
    println!("{}", OutputStyle::content(&prompt));
    Ok(())
}

pub fn handle_persona_command(config: Config, args: &PersonaArgs) -> Result<()> {
    let responder = build_responder(config)?;
    let mut rng = make_rng(args.seed);

    let personas = responder.example_personas(args.count, &mut rng)?;
    OutputStyle::print_header("🧑 Example Personas");
    for (i, persona) in personas.iter().enumerate() {
        println!("{:>3}. {}", OutputStyle::label(&(i + 1).to_string()), OutputStyle::content(persona));
    }
    Ok(())
}
