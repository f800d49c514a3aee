//! Rendering of proportions.

use std::fmt::Write;

use clap::ValueEnum;

use crate::proportions::Proportions;

/// Output format options
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    /// `<id>: <percent>%`, two decimals
    #[default]
    Percent,
    /// `"<id>": <fraction>`, four decimals
    Fraction,
    /// JSON object of fractions
    Json,
    /// polars table
    Table,
}

/// Renders `proportions` in portfolio order. Line formats end every line with a newline.
pub fn render(proportions: &Proportions, format: OutputFormat) -> anyhow::Result<String> {
    let mut out = String::new();
    match format {
        OutputFormat::Percent => {
            for (id, proportion) in proportions.iter() {
                writeln!(out, "{}: {:.2}%", id, proportion * 100.0)?;
            }
        }
        OutputFormat::Fraction => {
            for (id, proportion) in proportions.iter() {
                writeln!(out, "\"{}\": {:.4}", id, proportion)?;
            }
        }
        OutputFormat::Json => {
            out = serde_json::to_string_pretty(proportions)?;
            out.push('\n');
        }
        OutputFormat::Table => {
            writeln!(out, "{}", proportions.to_dataframe()?)?;
        }
    }
    Ok(out)
}
