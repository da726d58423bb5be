//! Chart rendering seam.
//!
//! A renderer turns report data into an owned [`ChartHandle`]. Whoever holds the
//! handle owns the drawn chart and must [`ChartHandle::destroy`] it before drawing a
//! replacement in the same slot.

use crate::{
    config::DashboardConfig,
    core::report::{CategoryTotals, MonthlyTotals, format_bar, format_currency},
    errors::Result,
};
use std::fmt::Write;
use tracing::trace;

/// A drawn chart.
pub trait ChartHandle: Send {
    /// Releases whatever the chart holds.
    fn destroy(self);
}

/// Draws the dashboard's two charts.
pub trait ChartRenderer: Send + Sync {
    /// Handle type owned by the dashboard
    type Handle: ChartHandle;

    /// Expenses by category.
    fn render_pie(&self, data: &CategoryTotals) -> Result<Self::Handle>;

    /// Income vs. expenses per month.
    fn render_bar(&self, data: &MonthlyTotals) -> Result<Self::Handle>;
}

/// A chart drawn as monospaced text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextChart {
    /// Chart heading
    pub title: String,
    /// Rendered rows, newline separated
    pub body: String,
}

impl ChartHandle for TextChart {
    fn destroy(self) {
        trace!("Destroying chart '{}'", self.title);
    }
}

/// Draws charts with block characters, one row per category or month.
#[derive(Debug, Clone)]
pub struct TextChartRenderer {
    currency_symbol: String,
    bar_width: usize,
}

impl TextChartRenderer {
    /// Creates a renderer using the dashboard's currency and bar width.
    #[must_use]
    pub fn new(config: &DashboardConfig) -> Self {
        Self {
            currency_symbol: config.currency_symbol.clone(),
            bar_width: config.bar_width,
        }
    }
}

fn label_width<'a>(labels: impl Iterator<Item = &'a str>) -> usize {
    labels.map(|l| l.chars().count()).max().unwrap_or(0)
}

impl ChartRenderer for TextChartRenderer {
    type Handle = TextChart;

    fn render_pie(&self, data: &CategoryTotals) -> Result<TextChart> {
        let grand_total = data.grand_total();
        let max = data.totals.iter().copied().fold(0.0, f64::max);
        let width = label_width(data.labels.iter().map(String::as_str));

        let mut body = String::new();
        for (label, total) in data.labels.iter().zip(&data.totals) {
            let share = if grand_total > 0.0 {
                total / grand_total * 100.0
            } else {
                0.0
            };
            writeln!(
                body,
                "{label:<width$}  {}  {} ({share:.1}%)",
                format_bar(*total, max, self.bar_width),
                format_currency(&self.currency_symbol, *total),
            )?;
        }

        Ok(TextChart {
            title: "Despesas por Categoria".to_string(),
            body,
        })
    }

    fn render_bar(&self, data: &MonthlyTotals) -> Result<TextChart> {
        let max = data
            .income
            .iter()
            .chain(&data.expense)
            .copied()
            .fold(0.0, f64::max);
        let width = label_width(data.labels.iter().map(String::as_str));

        let mut body = String::new();
        for ((label, income), expense) in data.labels.iter().zip(&data.income).zip(&data.expense) {
            writeln!(
                body,
                "{label:<width$}  Receitas  {}  {}",
                format_bar(*income, max, self.bar_width),
                format_currency(&self.currency_symbol, *income),
            )?;
            writeln!(
                body,
                "{:<width$}  Despesas  {}  {}",
                "",
                format_bar(*expense, max, self.bar_width),
                format_currency(&self.currency_symbol, *expense),
            )?;
        }

        Ok(TextChart {
            title: "Receitas x Despesas".to_string(),
            body,
        })
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;

    fn renderer() -> TextChartRenderer {
        TextChartRenderer::new(&DashboardConfig {
            bar_width: 4,
            ..DashboardConfig::default()
        })
    }

    #[test]
    fn test_render_pie_rows() {
        let data = CategoryTotals {
            labels: vec!["Food".to_string(), "Rent".to_string()],
            totals: vec![20.0, 80.0],
        };

        let chart = renderer().render_pie(&data).unwrap();

        assert_eq!(chart.title, "Despesas por Categoria");
        let rows: Vec<&str> = chart.body.lines().collect();
        assert_eq!(rows[0], "Food  █░░░  R$ 20.00 (20.0%)");
        assert_eq!(rows[1], "Rent  ████  R$ 80.00 (80.0%)");
    }

    #[test]
    fn test_render_bar_rows() {
        let data = MonthlyTotals {
            labels: vec!["9/2026".to_string(), "10/2026".to_string()],
            income: vec![0.0, 100.0],
            expense: vec![50.0, 0.0],
        };

        let chart = renderer().render_bar(&data).unwrap();
        let rows: Vec<&str> = chart.body.lines().collect();

        assert_eq!(rows.len(), 4);
        assert_eq!(rows[0], "9/2026   Receitas  ░░░░  R$ 0.00");
        assert_eq!(rows[1], "         Despesas  ██░░  R$ 50.00");
        assert_eq!(rows[2], "10/2026  Receitas  ████  R$ 100.00");
    }
}
