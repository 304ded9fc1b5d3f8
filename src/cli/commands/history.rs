use anyhow::{Result, bail};

use crate::history::HistoryStore;
use crate::ui::Style;

pub fn print_history(limit: usize) -> Result<()> {
    let store = HistoryStore::new()?;
    let runs = store.list(limit)?;

    if runs.is_empty() {
        println!("No runs recorded yet.");
        return Ok(());
    }

    for run in runs {
        println!(
            "{}  {:<6}  {}  {}  {}",
            Style::id(format!("#{:<4}", run.id)),
            run.kind,
            Style::secondary(&run.created_at),
            Style::value(&run.model),
            run.preview
        );
    }

    Ok(())
}

/// Reprints a recorded run. Content goes to stdout, metadata to stderr.
pub fn show_run(id: i64, show_thinking: bool) -> Result<()> {
    let store = HistoryStore::new()?;
    let Some(run) = store.get(id)? else {
        bail!("Run #{id} not found");
    };

    eprintln!(
        "{} {} {} {}",
        Style::header(format!("Run #{}", run.id)),
        Style::label(run.kind),
        Style::value(format!("{}/{}", run.provider, run.model)),
        Style::secondary(&run.created_at)
    );
    if let Some(parent) = run.parent_id {
        eprintln!("{}", Style::hint(format!("analysis of run #{parent}")));
    }

    if show_thinking && !run.thinking.is_empty() {
        eprintln!("{}", Style::thinking(&run.thinking));
    }
    eprintln!();

    println!("{}", run.content);
    Ok(())
}
