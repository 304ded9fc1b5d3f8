use clap::{Args as ClapArgs, Parser, Subcommand};
use std::path::PathBuf;

use crate::ideation::Complexity;

#[derive(Parser, Debug)]
#[command(name = "ideate")]
#[command(about = "AI-powered project ideation CLI tool")]
#[command(version)]
pub struct Args {
    /// Increase log verbosity (-v info, -vv debug)
    #[arg(short = 'v', long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Command,
}

/// Options shared by every command that talks to a model.
#[derive(ClapArgs, Debug, Clone, Default)]
pub struct RequestArgs {
    /// Provider name from the config file
    #[arg(long)]
    pub provider: Option<String>,

    /// Model name
    #[arg(short = 'm', long)]
    pub model: Option<String>,

    /// Do not request reasoning from self-hosted models
    #[arg(long)]
    pub no_think: bool,

    /// Print the model's reasoning to stderr as it streams
    #[arg(long)]
    pub show_thinking: bool,

    /// Sampling temperature
    #[arg(long)]
    pub temperature: Option<f64>,

    /// Maximum tokens in the response
    #[arg(long)]
    pub max_tokens: Option<u32>,

    /// Also write the generated Markdown to this file
    #[arg(short = 'o', long)]
    pub output: Option<PathBuf>,

    /// Do not record this run in history
    #[arg(long)]
    pub no_history: bool,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Generate project ideas from your constraints
    Generate {
        /// Problem statement to solve
        #[arg(short = 'p', long, conflicts_with = "problem_file")]
        problem: Option<String>,

        /// Read the problem statement from a file ('-' for stdin)
        #[arg(long)]
        problem_file: Option<String>,

        /// Budget in dollars (e.g. 500, "1k-5k")
        #[arg(short = 'b', long, default_value = "1000")]
        budget: String,

        /// Project complexity
        #[arg(short = 'c', long, value_enum, default_value_t = Complexity::Intermediate)]
        complexity: Complexity,

        /// Innovation level, 1 (safe/proven) to 10 (cutting-edge/risky)
        #[arg(short = 'i', long, default_value_t = 5, value_parser = clap::value_parser!(u8).range(1..=10))]
        innovation: u8,

        /// Preferred technology (repeatable or comma separated)
        #[arg(short = 't', long = "tech", value_delimiter = ',')]
        technologies: Vec<String>,

        /// Number of ideas to generate
        #[arg(short = 'n', long, default_value_t = 3, value_parser = clap::value_parser!(u8).range(1..=8))]
        count: u8,

        #[command(flatten)]
        request: RequestArgs,
    },
    /// Run a market analysis for one idea
    Analyze {
        /// Idea text to analyse
        #[arg(long, conflicts_with_all = ["run", "card"])]
        idea: Option<String>,

        /// History id of an ideas run
        #[arg(long, required_unless_present = "idea")]
        run: Option<i64>,

        /// Card number within the run (prompts when omitted)
        #[arg(long, requires = "run")]
        card: Option<usize>,

        #[command(flatten)]
        request: RequestArgs,
    },
    /// List models available on a provider
    Models {
        /// Provider name (defaults to the configured provider)
        #[arg(long)]
        provider: Option<String>,
    },
    /// List configured providers
    Providers {
        /// Show details for a specific provider
        provider: Option<String>,
    },
    /// Interactively choose the default provider and model
    Configure,
    /// Show past runs
    History {
        /// Number of runs to list
        #[arg(short = 'l', long, default_value_t = 20)]
        limit: usize,

        #[command(subcommand)]
        command: Option<HistoryCommand>,
    },
}

#[derive(Subcommand, Debug)]
pub enum HistoryCommand {
    /// Print a recorded run
    Show {
        /// Run id
        id: i64,

        /// Also print the recorded reasoning
        #[arg(long)]
        thinking: bool,
    },
}
