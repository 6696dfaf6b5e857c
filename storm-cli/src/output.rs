//! Printing and saving ranked views.

use anyhow::{Context, Result};
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use storm_core::{TidyRow, View};

use crate::config::OutputFormat;

/// File a view is saved to inside `dir`
pub fn view_path(dir: &Path, view: View, format: OutputFormat) -> PathBuf {
    dir.join(format!("{}.{}", view.name(), format.extension()))
}

/// Save one view's tidy rows in base units
pub fn write_view(path: &Path, rows: &[TidyRow], format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Table | OutputFormat::Csv => {
            let mut wtr = csv::Writer::from_path(path)
                .with_context(|| format!("create {}", path.display()))?;
            for row in rows {
                wtr.serialize(row)?;
            }
            wtr.flush().with_context(|| format!("write {}", path.display()))?;
        }
        OutputFormat::Json => {
            let json = serde_json::to_string_pretty(rows)?;
            fs::write(path, json).with_context(|| format!("write {}", path.display()))?;
        }
    }
    Ok(())
}

/// Print one view to `out`
pub fn print_view(
    out: &mut impl Write,
    view: View,
    rows: &[TidyRow],
    format: OutputFormat,
    economic_scale: f64,
) -> Result<()> {
    match format {
        OutputFormat::Table => print_table(out, view, rows, economic_scale)?,
        OutputFormat::Csv => {
            let mut wtr = csv::Writer::from_writer(&mut *out);
            for row in rows {
                wtr.serialize(row)?;
            }
            wtr.flush()?;
        }
        OutputFormat::Json => {
            writeln!(out, "{}", serde_json::to_string_pretty(rows)?)?;
        }
    }
    Ok(())
}

fn print_table(out: &mut impl Write, view: View, rows: &[TidyRow], economic_scale: f64) -> Result<()> {
    let scale = match view {
        View::Economic if economic_scale > 0.0 => economic_scale,
        _ => 1.0,
    };

    if scale == 1.0 {
        writeln!(out, "## {}\n", view)?;
    } else {
        writeln!(out, "## {} (values / {:e})\n", view, scale)?;
    }

    let width = rows.iter().map(|r| r.category.len()).max().unwrap_or(8).max(8);
    writeln!(out, "{:<width$}  {:<10}  {:>16}  {:>4}", "category", "metric", "value", "rank")?;
    for r in rows {
        writeln!(
            out,
            "{:<width$}  {:<10}  {:>16.3}  {:>4}",
            r.category,
            r.metric.name(),
            r.value / scale,
            r.display_rank
        )?;
    }
    writeln!(out)?;
    Ok(())
}
