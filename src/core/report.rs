//! Report generation business logic.
//!
//! This module reshapes an in-memory list of entries into the data the dashboard
//! charts consume: expense totals per category and income/expense totals per month
//! over a trailing window. Everything here is pure and synchronous; fetching the
//! entries is the caller's job.

use crate::{
    config::DashboardConfig,
    models::{EntryKind, FinancialEntry},
};
use chrono::{Datelike, NaiveDate};
use std::collections::HashMap;

/// Expense totals per category, as parallel arrays in first-seen order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CategoryTotals {
    /// Category labels
    pub labels: Vec<String>,
    /// Sum of expense amounts for the label at the same index
    pub totals: Vec<f64>,
}

impl CategoryTotals {
    /// True when no expense was seen.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    /// Sum over every bucket.
    #[must_use]
    pub fn grand_total(&self) -> f64 {
        self.totals.iter().sum()
    }

    /// Total for one label, if it has a bucket.
    #[must_use]
    pub fn total_for(&self, label: &str) -> Option<f64> {
        self.labels
            .iter()
            .position(|l| l == label)
            .map(|i| self.totals[i])
    }
}

/// Income and expense totals per month, oldest month first.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MonthlyTotals {
    /// Month labels formatted as `"M/YYYY"`
    pub labels: Vec<String>,
    /// Income sum for the month at the same index
    pub income: Vec<f64>,
    /// Expense sum for the month at the same index
    pub expense: Vec<f64>,
}

/// Everything the dashboard needs to draw both charts.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DashboardReport {
    /// Pie chart data
    pub categories: CategoryTotals,
    /// Bar chart data
    pub monthly: MonthlyTotals,
    /// At least one expense exists
    pub has_expense_data: bool,
    /// At least one entry falls inside the monthly window
    pub has_monthly_data: bool,
}

impl DashboardReport {
    /// Aggregates `entries` as of `today`.
    #[must_use]
    pub fn build(entries: &[FinancialEntry], today: NaiveDate, config: &DashboardConfig) -> Self {
        let categories = category_totals(entries, &config.uncategorized_label);
        let (monthly, has_monthly_data) = monthly_totals(entries, today, config.window_months);

        Self {
            has_expense_data: !categories.is_empty(),
            categories,
            monthly,
            has_monthly_data,
        }
    }
}

/// Groups expense amounts by category.
///
/// Income is ignored. Expenses without a category, or with a blank one, fall
/// into the `uncategorized_label` bucket. Buckets appear in the order their
/// first entry appears in `entries`.
#[must_use]
pub fn category_totals(entries: &[FinancialEntry], uncategorized_label: &str) -> CategoryTotals {
    let mut totals = CategoryTotals::default();
    let mut index: HashMap<String, usize> = HashMap::new();

    for entry in entries.iter().filter(|e| e.kind == EntryKind::Expense) {
        let label = entry
            .category
            .as_deref()
            .map(str::trim)
            .filter(|c| !c.is_empty())
            .unwrap_or(uncategorized_label);

        if let Some(&i) = index.get(label) {
            totals.totals[i] += entry.amount;
        } else {
            index.insert(label.to_string(), totals.labels.len());
            totals.labels.push(label.to_string());
            totals.totals.push(entry.amount);
        }
    }

    totals
}

/// The `window_months` calendar months ending with the month of `today`, oldest first.
#[must_use]
pub fn month_window(today: NaiveDate, window_months: u32) -> Vec<(i32, u32)> {
    let current = i64::from(today.year()) * 12 + i64::from(today.month0());

    (0..i64::from(window_months))
        .rev()
        .map(|back| {
            let index = current - back;
            // Cast safety: index / 12 stays within the year range of `today`.
            #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
            let (year, month) = (index.div_euclid(12) as i32, index.rem_euclid(12) as u32 + 1);
            (year, month)
        })
        .collect()
}

/// Formats a month key the way the bar chart labels it.
#[must_use]
pub fn month_label(year: i32, month: u32) -> String {
    format!("{month}/{year}")
}

/// Sums income and expenses per month over the trailing window.
///
/// Entries dated outside the window contribute nothing. The second value is
/// true when at least one entry fell inside the window.
#[must_use]
pub fn monthly_totals(
    entries: &[FinancialEntry],
    today: NaiveDate,
    window_months: u32,
) -> (MonthlyTotals, bool) {
    let window = month_window(today, window_months);
    let mut totals = MonthlyTotals {
        labels: window.iter().map(|&(y, m)| month_label(y, m)).collect(),
        income: vec![0.0; window.len()],
        expense: vec![0.0; window.len()],
    };
    let mut found = false;

    for entry in entries {
        let key = (entry.date.year(), entry.date.month());
        let Some(i) = window.iter().position(|&k| k == key) else {
            continue;
        };
        found = true;
        match entry.kind {
            EntryKind::Income => totals.income[i] += entry.amount,
            EntryKind::Expense => totals.expense[i] += entry.amount,
        }
    }

    (totals, found)
}

/// Formats an amount with the currency prefix, e.g. `"R$ 80.00"`.
#[must_use]
pub fn format_currency(symbol: &str, amount: f64) -> String {
    format!("{symbol} {amount:.2}")
}

/// Draws a horizontal bar proportional to `value / max`.
///
/// Creates bars like `████████░░`. A zero `max` yields an empty bar.
#[must_use]
pub fn format_bar(value: f64, max: f64, width: usize) -> String {
    let ratio = if max > 0.0 {
        (value / max).clamp(0.0, 1.0)
    } else {
        0.0
    };

    // Cast safety: ratio ∈ [0, 1] and width is small, so the product fits in usize.
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss, clippy::cast_precision_loss)]
    let filled = (ratio * width as f64).round() as usize;
    let empty = width.saturating_sub(filled);

    format!("{}{}", "█".repeat(filled), "░".repeat(empty))
}
