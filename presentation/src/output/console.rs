//! Console output formatter for company reports

use colored::Colorize;
use serde_json::json;
use toolkit_application::CompanyReport;
use toolkit_domain::AgentOutcome;

/// Formats [`CompanyReport`]s for console display
pub struct ConsoleFormatter;

impl ConsoleFormatter {
    /// Full report with header and footer
    pub fn format(report: &CompanyReport) -> String {
        let mut output = String::new();

        output.push_str(&Self::header(&format!("Company Report: {}", report.company)));
        output.push_str("\n\n");

        if let AgentOutcome::Incomplete { reason, .. } = &report.outcome {
            output.push_str(&format!(
                "{} {}\n\n",
                "Incomplete:".yellow().bold(),
                reason
            ));
        }

        output.push_str(report.report());
        output.push('\n');

        output.push_str(&format!(
            "\n{} {}  {} {}\n",
            "Turns:".dimmed(),
            report.turns,
            "Tokens:".dimmed(),
            report.usage.total_tokens
        ));
        output.push_str(&Self::footer());

        output
    }

    /// Format as JSON: `{company, outcome, turns, usage, report}`
    pub fn format_json(report: &CompanyReport) -> String {
        let mut value = serde_json::to_value(report).unwrap_or_else(|_| json!({}));
        if let Some(map) = value.as_object_mut() {
            map.insert("report".to_string(), json!(report.report()));
        }
        serde_json::to_string_pretty(&value).unwrap_or_else(|_| "{}".to_string())
    }

    fn header(title: &str) -> String {
        let line = "=".repeat(60);
        format!("{}\n{:^60}\n{}", line.cyan(), title.bold(), line.cyan())
    }

    fn footer() -> String {
        format!("{}\n", "=".repeat(60).cyan())
    }
}
