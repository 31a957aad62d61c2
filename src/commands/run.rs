use crate::cli::RunArgs;
use crate::config::Config;
use crate::storage::write_table;
use crate::utils::{OutputStyle, print_success, print_warning};
use super::{build_responder, make_rng};
use anyhow::{Context, Result};

pub async fn handle_run_command(config: Config, args: &RunArgs) -> Result<()> {
    let num_responses = args.num_responses.unwrap_or(config.general.num_responses);
    let responder = build_responder(config)?;
    let mut rng = make_rng(args.seed);

    eprintln!("{}", OutputStyle::muted(&responder.to_string()));

    let table = match &args.output {
        Some(output) => {
            let run = responder.run_and_persist(num_responses, output, &mut rng).await?;
            print_success(&format!("Responses written to {}", run.output_path.display()));
            print_success(&format!("Run parameters written to {}", run.params_path.display()));
            run.table
        }
        None => {
            let table = responder.run(num_responses, &mut rng).await;
            write_table(std::io::stdout().lock(), &table)
                .context("Failed to write responses to stdout")?;
            table
        }
    };

    if table.len() < num_responses {
        print_warning(&format!(
            "{} of {} respondents were dropped",
            num_responses - table.len(),
            num_responses
        ));
    }
    OutputStyle::print_run_summary(&table);

    Ok(())
}
