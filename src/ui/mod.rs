use anyhow::{Result, bail};
use inquire::{InquireError, Select, Text};
use std::io::IsTerminal;

use crate::ideation::IdeaCard;

mod spinner;
mod style;

pub use spinner::Spinner;
pub use style::Style;

/// Check if the inquire error is a user cancellation/interruption.
const fn is_prompt_cancelled(err: &InquireError) -> bool {
    matches!(
        err,
        InquireError::OperationCanceled | InquireError::OperationInterrupted
    )
}

/// Turns a cancelled interactive prompt into a clean exit.
///
/// If the user cancelled a prompt (Ctrl+C or Escape), prints a newline to clean
/// up the terminal and returns `Ok(())`. Every other error is returned unchanged.
pub fn handle_prompt_cancellation(result: Result<()>) -> Result<()> {
    match result {
        Ok(()) => Ok(()),
        Err(e)
            if e.downcast_ref::<InquireError>()
                .is_some_and(is_prompt_cancelled) =>
        {
            println!();
            Ok(())
        }
        Err(e) => Err(e),
    }
}

/// Asks for a problem statement when running on a terminal.
///
/// Returns `None` when stdin is not a terminal or the answer is blank.
pub fn prompt_problem() -> Result<Option<String>> {
    if !std::io::stdin().is_terminal() {
        return Ok(None);
    }

    let answer = Text::new("What problem should the projects solve?")
        .with_help_message("Leave empty for open-ended ideas")
        .prompt()?;

    let answer = answer.trim();
    Ok((!answer.is_empty()).then(|| answer.to_string()))
}

/// Lets the user pick one card; returns its index.
pub fn select_card(cards: &[IdeaCard]) -> Result<usize> {
    if cards.is_empty() {
        bail!("The run contains no ideas to choose from");
    }
    if !std::io::stdin().is_terminal() {
        bail!("Multiple ideas found. Pass --card <N> to choose one.");
    }

    let options = card_options(cards);
    let selection = Select::new("Which idea should be analysed?", options.clone()).prompt()?;

    Ok(options
        .iter()
        .position(|o| *o == selection)
        .unwrap_or_default())
}

fn card_options(cards: &[IdeaCard]) -> Vec<String> {
    cards
        .iter()
        .enumerate()
        .map(|(i, card)| format!("{}. {}", i + 1, card.title))
        .collect()
}
