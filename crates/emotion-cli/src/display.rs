//! Terminal output for rendered screens.
//!
//! Tables go through Arrow's pretty printer; charts become horizontal bars.

use std::io::{self, Write};

use arrow::util::pretty::pretty_format_batches;

use crate::app::Page;
use crate::render::{BarChart, Block, Screen};

const MAX_BAR_WIDTH: usize = 40;
const MAX_LABEL_WIDTH: usize = 30;

// ── Public API ──

/// Write every block of a screen, top to bottom.
pub fn write_screen(out: &mut impl Write, screen: &Screen) -> io::Result<()> {
    for block in &screen.blocks {
        write_block(out, block)?;
    }
    writeln!(out)?;
    out.flush()
}

// ── Block rendering ──

fn write_block(out: &mut impl Write, block: &Block) -> io::Result<()> {
    match block {
        Block::Title(title) => {
            writeln!(out, "=== {title} ===")?;
        }
        Block::Menu { selected } => {
            let items: Vec<String> = Page::MENU
                .iter()
                .map(|page| {
                    if page == selected {
                        format!("[{page}]")
                    } else {
                        page.to_string()
                    }
                })
                .collect();
            writeln!(out, "Menu: {}", items.join("  "))?;
            writeln!(out)?;
        }
        Block::Subheader(text) => {
            writeln!(out, "{text}")?;
            writeln!(out, "{}", "-".repeat(text.chars().count()))?;
        }
        Block::Section(text) => writeln!(out, "▾ {text}")?,
        Block::Success(text) => writeln!(out, "✔ {text}")?,
        Block::Text(text) => writeln!(out, "  {text}")?,
        Block::Error(text) => writeln!(out, "✖ {text}")?,
        Block::Table(batch) => match pretty_format_batches(std::slice::from_ref(batch)) {
            Ok(table) => writeln!(out, "{table}")?,
            Err(err) => writeln!(out, "✖ could not format table: {err}")?,
        },
        Block::Chart(chart) => {
            for line in chart_lines(chart) {
                writeln!(out, "{line}")?;
            }
        }
    }
    Ok(())
}

// ── Charts ──

/// Horizontal bar chart, one line per bar, scaled to the largest value.
pub fn chart_lines(chart: &BarChart) -> Vec<String> {
    let mut lines = vec![format!("  {} by {}", chart.y_label, chart.x_label)];
    if chart.bars.is_empty() {
        lines.push("  (no data)".to_string());
        return lines;
    }

    let labels: Vec<String> = chart.bars.iter().map(|(l, _)| shorten(l)).collect();
    let width = labels
        .iter()
        .map(|l| l.chars().count())
        .max()
        .unwrap_or(0);
    let max = chart
        .bars
        .iter()
        .map(|(_, v)| *v)
        .fold(0.0f64, f64::max);

    for (label, (_, value)) in labels.iter().zip(&chart.bars) {
        let len = if max > 0.0 {
            ((value / max) * MAX_BAR_WIDTH as f64).round() as usize
        } else {
            0
        };
        let pad = width - label.chars().count();
        lines.push(format!(
            "  {label}{} │{} {}",
            " ".repeat(pad),
            "█".repeat(len),
            format_value(*value)
        ));
    }
    lines
}

fn shorten(label: &str) -> String {
    if label.chars().count() > MAX_LABEL_WIDTH {
        let head: String = label.chars().take(MAX_LABEL_WIDTH - 3).collect();
        format!("{head}...")
    } else {
        label.to_string()
    }
}

fn format_value(value: f64) -> String {
    if value.fract() == 0.0 {
        format!("{value:.0}")
    } else {
        format!("{value:.4}")
    }
}
