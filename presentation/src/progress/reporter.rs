//! Progress reporting for agent runs

use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};
use std::sync::Mutex;
use std::time::Duration;
use toolkit_application::AgentProgressNotifier;
use toolkit_domain::{AgentOutcome, ErrorCategory};

/// Reports progress with a spinner per turn
pub struct ProgressReporter {
    turn_bar: Mutex<Option<ProgressBar>>,
}

impl ProgressReporter {
    pub fn new() -> Self {
        Self {
            turn_bar: Mutex::new(None),
        }
    }

    fn spinner_style() -> ProgressStyle {
        ProgressStyle::default_spinner()
            .template("{spinner:.green} {prefix:.bold.cyan} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner())
    }

    fn with_bar(&self, f: impl FnOnce(&ProgressBar)) {
        if let Ok(guard) = self.turn_bar.lock()
            && let Some(pb) = guard.as_ref()
        {
            f(pb);
        }
    }

    fn println(&self, line: String) {
        let mut printed = false;
        self.with_bar(|pb| {
            pb.println(&line);
            printed = true;
        });
        if !printed {
            println!("{}", line);
        }
    }

    fn finish_turn(&self) {
        if let Ok(mut guard) = self.turn_bar.lock()
            && let Some(pb) = guard.take()
        {
            pb.finish_and_clear();
        }
    }
}

impl Default for ProgressReporter {
    fn default() -> Self {
        Self::new()
    }
}

impl AgentProgressNotifier for ProgressReporter {
    fn on_run_start(&self, model: &str, max_turns: usize) {
        println!(
            "{} {} (up to {} turns)",
            "->".cyan(),
            model.bold(),
            max_turns
        );
    }

    fn on_turn_start(&self, turn: usize, max_turns: usize) {
        self.finish_turn();

        let pb = ProgressBar::new_spinner();
        pb.set_style(Self::spinner_style());
        pb.set_prefix(format!("Turn {}/{}", turn, max_turns));
        pb.set_message("Waiting for model...");
        pb.enable_steady_tick(Duration::from_millis(100));

        if let Ok(mut guard) = self.turn_bar.lock() {
            *guard = Some(pb);
        }
    }

    fn on_model_response(&self, _turn: usize, tool_calls: usize) {
        let message = if tool_calls == 0 {
            "Writing answer".to_string()
        } else {
            format!("Running {} tool call(s)", tool_calls)
        };
        self.with_bar(|pb| pb.set_message(message));
    }

    fn on_tool_call(&self, tool_name: &str, args_preview: &str) {
        self.with_bar(|pb| pb.set_message(format!("{} {}", tool_name, args_preview.dimmed())));
    }

    fn on_tool_result(&self, tool_name: &str, duration_ms: u64) {
        self.println(format!(
            "  {} {} {}",
            "v".green(),
            tool_name,
            format!("({}ms)", duration_ms).dimmed()
        ));
    }

    fn on_tool_error(&self, tool_name: &str, category: ErrorCategory, message: &str) {
        self.println(format!(
            "  {} {} [{}] {}",
            "x".red(),
            tool_name,
            category,
            message
        ));
    }

    fn on_tool_not_found(&self, tool_name: &str, available_tools: &[&str]) {
        self.println(format!(
            "  {} unknown tool {} (available: {})",
            "x".red(),
            tool_name.bold(),
            available_tools.join(", ")
        ));
    }

    fn on_run_complete(&self, outcome: &AgentOutcome, turns: usize) {
        self.finish_turn();
        if outcome.is_completed() {
            println!("{} Done after {} turn(s)", "v".green().bold(), turns);
        } else {
            println!(
                "{} Stopped after {} turn(s) without a final answer",
                "!".yellow().bold(),
                turns
            );
        }
    }
}

/// Simple text-based progress (no fancy UI)
pub struct SimpleProgress;

impl AgentProgressNotifier for SimpleProgress {
    fn on_run_start(&self, model: &str, max_turns: usize) {
        println!("{} {} (up to {} turns)", "->".cyan(), model.bold(), max_turns);
    }

    fn on_turn_start(&self, turn: usize, max_turns: usize) {
        println!("{} Turn {}/{}", "->".cyan(), turn, max_turns);
    }

    fn on_tool_call(&self, tool_name: &str, args_preview: &str) {
        println!("  {} {}", tool_name, args_preview.dimmed());
    }

    fn on_tool_error(&self, tool_name: &str, category: ErrorCategory, message: &str) {
        println!("  {} {} [{}] {}", "x".red(), tool_name, category, message);
    }

    fn on_tool_not_found(&self, tool_name: &str, _available_tools: &[&str]) {
        println!("  {} unknown tool {}", "x".red(), tool_name);
    }

    fn on_run_complete(&self, outcome: &AgentOutcome, turns: usize) {
        let status = if outcome.is_completed() {
            "completed".green()
        } else {
            "incomplete".yellow()
        };
        println!("{} {} after {} turn(s)", "->".cyan(), status, turns);
        println!();
    }
}
