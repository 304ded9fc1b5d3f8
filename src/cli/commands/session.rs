//! Request flow shared by `generate` and `analyze`: resolve, stream, save.

use anyhow::{Context, Result, bail};
use std::io::{self, Write};

use crate::cli::args::RequestArgs;
use crate::config::{ConfigManager, ResolveOptions, ResolvedConfig, resolve_config};
use crate::fs::atomic_write;
use crate::history::{HistoryStore, NewRun, RunKind};
use crate::ideation::{Accumulator, IdeationClient, StreamSink};
use crate::ui::{Spinner, Style};

/// Resolves config for a model request from CLI flags and the config file.
pub fn resolve(request: &RequestArgs) -> Result<ResolvedConfig> {
    let manager = ConfigManager::new()?;
    let config_file = manager.load_or_default()?;

    let options = ResolveOptions {
        provider: request.provider.clone(),
        model: request.model.clone(),
        think: request.no_think.then_some(false),
        temperature: request.temperature,
        max_tokens: request.max_tokens,
    };

    resolve_config(&options, &config_file)
}

/// Renders streamed output: content to `out`, optional reasoning to `err`.
///
/// The spinner is cleared on the first visible output. Write failures are held
/// until [`TerminalSink::finish`] since sink callbacks cannot fail.
pub struct TerminalSink<O: Write, E: Write> {
    out: O,
    err: E,
    spinner: Option<Spinner>,
    show_thinking: bool,
    in_thinking: bool,
    printed: bool,
    io_error: Option<io::Error>,
    accumulator: Accumulator,
}

impl<O: Write, E: Write> TerminalSink<O, E> {
    pub fn new(out: O, err: E, spinner: Option<Spinner>, show_thinking: bool) -> Self {
        Self {
            out,
            err,
            spinner,
            show_thinking,
            in_thinking: false,
            printed: false,
            io_error: None,
            accumulator: Accumulator::default(),
        }
    }

    /// Returns everything received, or the first write error.
    pub fn finish(mut self) -> Result<Accumulator> {
        self.clear_spinner();
        if let Some(e) = self.io_error.take() {
            return Err(e).context("Failed to write output");
        }
        Ok(std::mem::take(&mut self.accumulator))
    }

    fn clear_spinner(&mut self) {
        if let Some(spinner) = self.spinner.take() {
            spinner.stop();
        }
    }

    fn end_thinking(&mut self) {
        if self.in_thinking {
            self.in_thinking = false;
            let result = writeln!(self.err);
            self.record(result);
        }
    }

    fn record(&mut self, result: io::Result<()>) {
        if let Err(e) = result
            && self.io_error.is_none()
        {
            self.io_error = Some(e);
        }
    }
}

impl<O: Write, E: Write> StreamSink for TerminalSink<O, E> {
    fn on_content(&mut self, delta: &str) {
        self.accumulator.on_content(delta);
        if delta.is_empty() {
            return;
        }

        self.clear_spinner();
        self.end_thinking();

        let result = write!(self.out, "{delta}").and_then(|()| self.out.flush());
        self.record(result);
        self.printed = true;
    }

    fn on_thinking(&mut self, delta: &str) {
        self.accumulator.on_thinking(delta);

        if delta.is_empty() {
            return;
        }
        if !self.show_thinking {
            if let Some(spinner) = &self.spinner {
                spinner.set_message("Thinking...");
            }
            return;
        }

        self.clear_spinner();
        self.in_thinking = true;
        let result = write!(self.err, "{}", Style::thinking(delta)).and_then(|()| self.err.flush());
        self.record(result);
    }

    fn on_done(&mut self) {
        self.clear_spinner();
        self.end_thinking();

        if self.printed {
            let result = writeln!(self.out);
            self.record(result);
        }
        self.accumulator.on_done();
    }
}

/// Streams one completion to the terminal and returns what was received.
pub async fn stream_completion(
    resolved: &ResolvedConfig,
    prompt: &str,
    request: &RequestArgs,
    status: &'static str,
) -> Result<Accumulator> {
    let client = IdeationClient::new(resolved.provider.clone());
    let spinner = Spinner::new(status);
    let mut sink = TerminalSink::new(
        io::stdout(),
        io::stderr(),
        Some(spinner),
        request.show_thinking,
    );

    client
        .stream(&resolved.model, prompt, resolved.think, &mut sink)
        .await
        .with_context(|| {
            format!(
                "Request to provider '{}' ({}) failed",
                resolved.provider_name, resolved.model
            )
        })?;

    let completion = sink.finish()?;
    if completion.content_text().trim().is_empty() {
        bail!(
            "The model returned no content\n\n\
             Try a larger --max-tokens, or --no-think if the model spent its budget reasoning."
        );
    }

    Ok(completion)
}

/// Writes `--output` and records history for a finished run.
///
/// Returns the history id when the run was recorded.
pub fn save_run(
    resolved: &ResolvedConfig,
    request: &RequestArgs,
    kind: RunKind,
    prompt: &str,
    completion: &Accumulator,
    parent_id: Option<i64>,
) -> Result<Option<i64>> {
    let content = completion.content_text();

    if let Some(path) = &request.output {
        atomic_write(path, &content)?;
        eprintln!(
            "{} Saved to {}",
            Style::success("✓"),
            Style::secondary(path.display())
        );
    }

    if request.no_history {
        return Ok(None);
    }

    let store = HistoryStore::new()?;
    let id = store.record(&NewRun {
        kind,
        provider: &resolved.provider_name,
        model: &resolved.model,
        prompt,
        content: &content,
        thinking: &completion.thinking_text(),
        parent_id,
    })?;
    tracing::info!(id, %kind, "recorded run");

    Ok(Some(id))
}
