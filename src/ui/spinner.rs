use indicatif::{ProgressBar, ProgressDrawTarget, ProgressStyle};
use std::borrow::Cow;
use std::time::Duration;

/// Progress indicator shown on stderr until the first streamed delta arrives.
///
/// Clears itself when dropped, so an error path never leaves it on screen.
pub struct Spinner {
    progress_bar: ProgressBar,
}

impl Spinner {
    #[allow(clippy::unwrap_used)]
    pub fn new(message: impl Into<Cow<'static, str>>) -> Self {
        let progress_bar = ProgressBar::with_draw_target(None, ProgressDrawTarget::stderr());
        // unwrap is safe: template string is a compile-time constant
        progress_bar.set_style(
            ProgressStyle::default_spinner()
                .tick_strings(&["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏", " "])
                .template("{spinner} {msg} {elapsed:.dim}")
                .unwrap(),
        );
        progress_bar.set_message(message);
        progress_bar.enable_steady_tick(Duration::from_millis(80));

        Self { progress_bar }
    }

    pub fn set_message(&self, message: impl Into<Cow<'static, str>>) {
        self.progress_bar.set_message(message);
    }

    /// Clears the spinner. Safe to call more than once.
    pub fn stop(&self) {
        if !self.progress_bar.is_finished() {
            self.progress_bar.finish_and_clear();
        }
    }

    #[cfg(test)]
    fn is_stopped(&self) -> bool {
        self.progress_bar.is_finished()
    }
}

impl Drop for Spinner {
    fn drop(&mut self) {
        self.stop();
    }
}
