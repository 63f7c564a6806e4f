//! CLI presenter for output formatting

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use colored::*;
use indicatif::{ProgressBar, ProgressStyle};

use crate::domain::analysis::AnalysisResult;
use crate::domain::recording::MAX_RECORDING_SECS;

/// Presenter for CLI output formatting
pub struct Presenter {
    spinner: Option<ProgressBar>,
    is_spinner_active: Arc<AtomicBool>,
}

impl Presenter {
    /// Create a new presenter
    pub fn new() -> Self {
        Self {
            spinner: None,
            is_spinner_active: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Start a spinner with message
    pub fn start_spinner(&mut self, message: &str) {
        let spinner = ProgressBar::new_spinner();
        spinner.set_style(
            ProgressStyle::default_spinner()
                .tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏")
                .template("{spinner:.magenta} {msg}")
                .unwrap(),
        );
        spinner.set_message(message.to_string());
        spinner.enable_steady_tick(std::time::Duration::from_millis(80));
        self.spinner = Some(spinner);
        self.is_spinner_active.store(true, Ordering::SeqCst);
    }

    /// Update spinner message
    pub fn update_spinner(&self, message: &str) {
        if let Some(ref spinner) = self.spinner {
            spinner.set_message(message.to_string());
        }
    }

    /// Mark spinner as success and finish
    pub fn spinner_success(&mut self, message: &str) {
        if let Some(spinner) = self.spinner.take() {
            spinner.finish_with_message(format!("{} {}", "✓".green(), message));
        }
        self.is_spinner_active.store(false, Ordering::SeqCst);
    }

    /// Mark spinner as failed and finish
    pub fn spinner_fail(&mut self, message: &str) {
        if let Some(spinner) = self.spinner.take() {
            spinner.finish_with_message(format!("{} {}", "✗".red(), message));
        }
        self.is_spinner_active.store(false, Ordering::SeqCst);
    }

    /// Stop spinner without status
    pub fn stop_spinner(&mut self) {
        if let Some(spinner) = self.spinner.take() {
            spinner.finish_and_clear();
        }
        self.is_spinner_active.store(false, Ordering::SeqCst);
    }

    /// Print info message to stderr
    pub fn info(&self, message: &str) {
        eprintln!("{} {}", "ℹ".cyan(), message);
    }

    /// Print success message to stderr
    pub fn success(&self, message: &str) {
        eprintln!("{} {}", "✓".green(), message);
    }

    /// Print warning message to stderr
    pub fn warn(&self, message: &str) {
        eprintln!("{} {}", "⚠".yellow(), message);
    }

    /// Print error message to stderr
    pub fn error(&self, message: &str) {
        eprintln!("{} {}", "✗".red(), message);
    }

    /// Output text to stdout (the actual result output)
    pub fn output(&self, text: &str) {
        println!("{}", text);
    }

    /// Print a key-value pair (for config list)
    pub fn key_value(&self, key: &str, value: &str) {
        println!("{}: {}", key.cyan(), value);
    }

    /// Format recording progress against the duration cap
    pub fn format_recording_progress(&self, elapsed_secs: u64) -> String {
        let total = MAX_RECORDING_SECS;
        let percent = (elapsed_secs as f64 / total as f64 * 100.0).min(100.0);

        let bar_width = 20;
        let filled = ((percent / 100.0) * bar_width as f64) as usize;
        let empty = bar_width - filled;

        format!(
            "[{}{}] {:>2}s / {}s",
            "█".repeat(filled).red(),
            "░".repeat(empty),
            elapsed_secs,
            total
        )
    }

    /// Render a full analysis report to stdout
    pub fn render_analysis(&self, result: &AnalysisResult) {
        println!();
        println!("{}", "Style breakdown".bold());
        for style in &result.styles {
            let width = (style.percentage.clamp(0, 100) as usize) / 5;
            println!(
                "  {:>3}% {} {}",
                style.percentage,
                format!("{:<20}", "▰".repeat(width)).magenta(),
                style.name.bold()
            );
            if !style.description.is_empty() {
                println!("       {}", style.description.dimmed());
            }
        }

        println!();
        println!("{} {} BPM", "Tempo".bold(), result.bpm.to_string().cyan());

        println!();
        println!("{}", "Core elements".bold());
        for element in &result.elements {
            println!(
                "  {} {} - {}",
                "•".magenta(),
                format!("{} ({})", element.name, element.icon_key().as_str()).bold(),
                element.description
            );
        }

        println!();
        println!("{}", "Tags".bold());
        let tags: Vec<String> = result.tags.iter().map(|t| format!("#{}", t)).collect();
        println!("  {}", tags.join("  ").cyan());

        if !result.search_keywords.is_empty() {
            println!();
            println!("{} {}", "Search".bold(), result.search_keywords);
        }

        if !result.summary.is_empty() {
            println!();
            println!("{}", "Producer notes".bold());
            println!("  {}", result.summary);
        }
        println!();
    }
}

impl Default for Presenter {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn format_progress_at_start() {
        let presenter = Presenter::new();
        let progress = presenter.format_recording_progress(0);
        assert!(progress.contains("0s / 30s"));
    }

    #[test]
    fn format_progress_at_half() {
        let presenter = Presenter::new();
        let progress = presenter.format_recording_progress(15);
        assert!(progress.contains("15s / 30s"));
    }

    #[test]
    fn format_progress_at_cap() {
        let presenter = Presenter::new();
        let progress = presenter.format_recording_progress(30);
        assert!(progress.contains("30s / 30s"));
    }
}
