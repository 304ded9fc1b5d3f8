use anyhow::{Result, bail};

use super::session;
use crate::cli::args::RequestArgs;
use crate::history::{HistoryStore, RunKind};
use crate::ideation::{IdeaCard, build_market_prompt, split_cards};
use crate::ui;

pub struct AnalyzeOptions {
    pub idea: Option<String>,
    pub run: Option<i64>,
    /// 1-based card number.
    pub card: Option<usize>,
    pub request: RequestArgs,
}

pub async fn run_analyze(options: AnalyzeOptions) -> Result<()> {
    let (idea, parent_id) = match (options.idea, options.run) {
        (Some(idea), _) => (idea, None),
        (None, Some(run_id)) => (idea_from_run(run_id, options.card)?, Some(run_id)),
        (None, None) => bail!("Pass --idea <TEXT> or --run <ID>"),
    };

    if idea.trim().is_empty() {
        bail!("Error: Idea is empty");
    }

    let resolved = session::resolve(&options.request)?;
    let prompt = build_market_prompt(&idea, resolved.prompts.market.as_deref());

    let completion =
        session::stream_completion(&resolved, &prompt, &options.request, "Analysing market...")
            .await?;

    session::save_run(
        &resolved,
        &options.request,
        RunKind::Market,
        &prompt,
        &completion,
        parent_id,
    )?;

    Ok(())
}

fn idea_from_run(run_id: i64, card: Option<usize>) -> Result<String> {
    let store = HistoryStore::new()?;
    let Some(run) = store.get(run_id)? else {
        bail!("Run #{run_id} not found\n\nList recorded runs with: ideate history");
    };
    if run.kind != RunKind::Ideas {
        bail!("Run #{run_id} is a {} run, not an ideas run", run.kind);
    }

    let cards = split_cards(&run.content);
    let index = match card {
        Some(n) => n.checked_sub(1).unwrap_or(usize::MAX),
        None if cards.len() == 1 => 0,
        None => ui::select_card(&cards)?,
    };

    pick(cards, index, run_id)
}

fn pick(cards: Vec<IdeaCard>, index: usize, run_id: i64) -> Result<String> {
    let count = cards.len();
    match cards.into_iter().nth(index) {
        Some(card) => Ok(card.body),
        None if count == 0 => bail!("Run #{run_id} contains no ideas"),
        None => bail!("Run #{run_id} has {count} ideas; --card must be between 1 and {count}"),
    }
}
