//! Spinner for the pending verification call.

use std::time::Duration;

use indicatif::{ProgressBar, ProgressStyle};

use super::context::UiContext;

/// A spinner for indeterminate progress. Silent outside pretty terminals.
pub struct Spinner {
    bar: Option<ProgressBar>,
}

impl Spinner {
    pub fn new(ctx: &UiContext, message: &str) -> Self {
        let bar = ctx.allows_animation().then(|| {
            let pb = ProgressBar::new_spinner();
            let ticks: &[&str] = if ctx.unicode {
                &["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏", ""]
            } else {
                &["|", "/", "-", "\\", ""]
            };
            let template = if ctx.color { "{spinner:.cyan} {msg}" } else { "{spinner} {msg}" };
            let style = ProgressStyle::default_spinner()
                .template(template)
                .unwrap_or_else(|_| ProgressStyle::default_spinner())
                .tick_strings(ticks);
            pb.set_style(style);
            pb.set_message(message.to_string());
            pb
        });
        Self { bar }
    }

    pub fn start(&self) {
        if let Some(bar) = &self.bar {
            bar.enable_steady_tick(Duration::from_millis(80));
        }
    }

    /// Remove the spinner line without printing anything.
    pub fn clear(&self) {
        if let Some(bar) = &self.bar {
            bar.finish_and_clear();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ui::mode::OutputMode;

    #[test]
    fn test_no_bar_without_animation() {
        let ctx = UiContext {
            is_tty: false,
            color: false,
            unicode: false,
            width: 80,
            mode: OutputMode::Plain,
        };
        let spinner = Spinner::new(&ctx, "Verifying");
        assert!(spinner.bar.is_none());
        spinner.start();
        spinner.clear();
    }
}
