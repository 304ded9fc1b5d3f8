use anyhow::Result;
use clap::Parser;

use ideate_cli::cli::commands::{analyze, configure, generate, history, models, providers};
use ideate_cli::cli::{Args, Command, HistoryCommand};
use ideate_cli::{logging, ui};

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();
    logging::init(args.verbose);

    let result = match args.command {
        Command::Generate {
            problem,
            problem_file,
            budget,
            complexity,
            innovation,
            technologies,
            count,
            request,
        } => {
            let options = generate::GenerateOptions {
                problem,
                problem_file,
                budget,
                complexity,
                innovation,
                technologies,
                count,
                request,
            };
            generate::run_generate(options).await
        }
        Command::Analyze {
            idea,
            run,
            card,
            request,
        } => {
            let options = analyze::AnalyzeOptions {
                idea,
                run,
                card,
                request,
            };
            analyze::run_analyze(options).await
        }
        Command::Models { provider } => models::print_models(provider.as_deref()).await,
        Command::Providers { provider } => providers::print_providers(provider.as_deref()),
        Command::Configure => configure::run_configure().await,
        Command::History { limit, command } => match command {
            Some(HistoryCommand::Show { id, thinking }) => history::show_run(id, thinking),
            None => history::print_history(limit),
        },
    };

    ui::handle_prompt_cancellation(result)
}
