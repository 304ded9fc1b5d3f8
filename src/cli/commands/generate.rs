use anyhow::Result;

use super::session;
use crate::cli::args::RequestArgs;
use crate::history::RunKind;
use crate::ideation::{Complexity, IdeaParams, build_idea_prompt, split_cards};
use crate::input::InputReader;
use crate::ui::{self, Style};

pub struct GenerateOptions {
    pub problem: Option<String>,
    pub problem_file: Option<String>,
    pub budget: String,
    pub complexity: Complexity,
    pub innovation: u8,
    pub technologies: Vec<String>,
    pub count: u8,
    pub request: RequestArgs,
}

pub async fn run_generate(options: GenerateOptions) -> Result<()> {
    let resolved = session::resolve(&options.request)?;

    let problem = match (options.problem, options.problem_file) {
        (Some(problem), _) => Some(problem),
        (None, Some(path)) => Some(InputReader::read(&path)?),
        (None, None) => ui::prompt_problem()?,
    }
    .map(|p| p.trim().to_string())
    .filter(|p| !p.is_empty());

    let params = IdeaParams {
        budget: options.budget,
        complexity: options.complexity,
        innovation: options.innovation,
        technologies: options
            .technologies
            .into_iter()
            .map(|t| t.trim().to_string())
            .filter(|t| !t.is_empty())
            .collect(),
        problem,
        count: options.count,
    };
    let prompt = build_idea_prompt(&params, resolved.prompts.ideas.as_deref());

    let completion =
        session::stream_completion(&resolved, &prompt, &options.request, "Generating ideas...")
            .await?;

    let cards = split_cards(&completion.content_text());
    if cards.len() != usize::from(params.count) {
        tracing::warn!(
            requested = params.count,
            received = cards.len(),
            "model returned a different number of ideas"
        );
    }

    let run_id = session::save_run(
        &resolved,
        &options.request,
        RunKind::Ideas,
        &prompt,
        &completion,
        None,
    )?;

    if let Some(id) = run_id
        && !cards.is_empty()
    {
        eprintln!();
        eprintln!(
            "{}",
            Style::hint(format!(
                "Saved as run #{id}. Analyse an idea with: ideate analyze --run {id}"
            ))
        );
    }

    Ok(())
}
