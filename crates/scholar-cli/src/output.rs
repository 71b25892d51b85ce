//! Output formatting for the CLI.

use crate::client::ReputationResponse;
use crate::config::OutputFormat;
use crate::error::Result;
use colored::*;
use scholar_domain::Category;
use tabled::{
    builder::Builder,
    settings::{object::Columns, object::Rows, Alignment, Modify, Style},
};

const NOT_MODELED: &str = "not modeled";

/// Output formatter.
pub struct Formatter {
    format: OutputFormat,
    color_enabled: bool,
}

impl Formatter {
    /// Create a new formatter.
    pub fn new(format: OutputFormat, color_enabled: bool) -> Self {
        Self {
            format,
            color_enabled,
        }
    }

    /// Format a reputation for `subject` (e.g. "user 0192...").
    pub fn format_reputation(&self, subject: &str, reputation: &ReputationResponse) -> Result<String> {
        match self.format {
            OutputFormat::Json => Ok(serde_json::to_string_pretty(reputation)?),
            OutputFormat::Table => Ok(self.format_reputation_table(subject, reputation)),
            OutputFormat::Quiet => Ok(reputation.score.to_string()),
        }
    }

    fn format_reputation_table(&self, subject: &str, reputation: &ReputationResponse) -> String {
        let mut builder = Builder::default();
        builder.push_record(["Category", "Weight", "Points"]);

        for category in Category::ALL {
            let points = if category.is_modeled() {
                reputation.breakdown.get(category).to_string()
            } else {
                NOT_MODELED.to_string()
            };
            builder.push_record([
                category.name().to_string(),
                category.weight().to_string(),
                points,
            ]);
        }

        let mut table = builder.build();
        table
            .with(Style::rounded())
            .with(Modify::new(Rows::first()).with(Alignment::center()))
            .with(Modify::new(Columns::new(1..)).with(Alignment::right()));

        let trend_color = match reputation.trend.as_str() {
            "up" => "green",
            "down" => "red",
            _ => "blue",
        };

        format!(
            "{}\n{}\nScore:      {}\nPercentile: {}\nTrend:      {}",
            self.colorize(&format!("Reputation of {}", subject), "cyan"),
            table,
            self.colorize(&reputation.score.to_string(), "green"),
            reputation.percentile,
            self.colorize(&reputation.trend, trend_color),
        )
    }

    /// Format a success message.
    pub fn success(&self, message: &str) -> String {
        self.colorize(&format!("✓ {}", message), "green")
    }

    /// Format an info message.
    pub fn info(&self, message: &str) -> String {
        self.colorize(&format!("ℹ {}", message), "blue")
    }

    /// Format a warning message.
    pub fn warning(&self, message: &str) -> String {
        self.colorize(&format!("⚠ {}", message), "yellow")
    }

    fn colorize(&self, text: &str, color: &str) -> String {
        if !self.color_enabled {
            return text.to_string();
        }

        match color {
            "red" => text.red().to_string(),
            "green" => text.green().to_string(),
            "blue" => text.blue().to_string(),
            "yellow" => text.yellow().to_string(),
            "cyan" => text.cyan().to_string(),
            _ => text.to_string(),
        }
    }
}
