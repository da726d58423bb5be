//! Dashboard component - expenses by category and income vs. expenses per month.
//!
//! The dashboard owns both chart handles. Every render destroys the chart it
//! replaces, and [`Dashboard::clear`] destroys both, so repeated visits never leak
//! charts. View state sits behind a short-lived lock that is never held across the
//! store round-trip.

use crate::{
    config::DashboardConfig,
    core::{entry, report::DashboardReport},
    errors::Result,
    models::FinancialEntry,
    ui::chart::{ChartHandle, ChartRenderer},
};
use chrono::NaiveDate;
use sea_orm::DatabaseConnection;
use std::sync::{Mutex, MutexGuard, PoisonError};
use tracing::{debug, error};

/// Banner shown when entries could not be loaded.
pub const LOAD_ERROR_MESSAGE: &str =
    "Erro ao carregar dados do dashboard. Tente novamente mais tarde.";
/// Banner shown when a chart could not be drawn.
pub const RENDER_ERROR_MESSAGE: &str = "Erro ao desenhar os gráficos do dashboard.";
/// Placeholder for the category chart when there are no expenses.
pub const NO_EXPENSE_DATA_MESSAGE: &str = "Nenhuma despesa registrada.";
/// Placeholder for the monthly chart when the window is empty.
pub const NO_MONTHLY_DATA_MESSAGE: &str = "Nenhuma movimentação no período.";

/// What the dashboard currently shows.
#[derive(Debug)]
pub struct DashboardView<H> {
    /// Category chart, when drawn
    pub pie: Option<H>,
    /// Monthly chart, when drawn
    pub bar: Option<H>,
    /// Show the "no expenses" placeholder
    pub pie_no_data: bool,
    /// Show the "no movement" placeholder
    pub bar_no_data: bool,
    /// Error banner
    pub error_message: Option<String>,
    /// Report behind the current charts
    pub report: Option<DashboardReport>,
    generation: u64,
}

impl<H> Default for DashboardView<H> {
    fn default() -> Self {
        Self {
            pie: None,
            bar: None,
            pie_no_data: false,
            bar_no_data: false,
            error_message: None,
            report: None,
            generation: 0,
        }
    }
}

impl<H: ChartHandle> DashboardView<H> {
    fn destroy_charts(&mut self) {
        if let Some(pie) = self.pie.take() {
            pie.destroy();
        }
        if let Some(bar) = self.bar.take() {
            bar.destroy();
        }
    }

    fn reset(&mut self) {
        self.destroy_charts();
        self.pie_no_data = false;
        self.bar_no_data = false;
        self.error_message = None;
        self.report = None;
    }
}

/// How a [`Dashboard::load`] call ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadOutcome {
    /// Charts (or placeholders) now reflect the fetched entries
    Rendered,
    /// The store failed; the error banner is showing
    Failed,
    /// A newer load or a sign-out superseded this one; nothing changed
    Discarded,
}

/// Generation a load started under.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct LoadTicket(u64);

/// The dashboard component.
pub struct Dashboard<R: ChartRenderer> {
    database: DatabaseConnection,
    renderer: R,
    config: DashboardConfig,
    view: Mutex<DashboardView<R::Handle>>,
}

impl<R: ChartRenderer> Dashboard<R> {
    /// Creates an empty dashboard.
    #[must_use]
    pub fn new(database: DatabaseConnection, renderer: R, config: DashboardConfig) -> Self {
        Self {
            database,
            renderer,
            config,
            view: Mutex::new(DashboardView::default()),
        }
    }

    fn view(&self) -> MutexGuard<'_, DashboardView<R::Handle>> {
        self.view.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Reads the current view state.
    pub fn with_view<T>(&self, f: impl FnOnce(&DashboardView<R::Handle>) -> T) -> T {
        f(&self.view())
    }

    /// Fetches `owner_id`'s entries and redraws both charts as of `today`.
    pub async fn load(&self, owner_id: &str, today: NaiveDate) -> LoadOutcome {
        let ticket = self.begin_load();
        let fetched = entry::list_entries_for_owner(&self.database, owner_id).await;
        self.finish_load(ticket, owner_id, fetched, today)
    }

    /// Starts a load: hides stale banners and returns the ticket that must still be
    /// current when the fetched entries arrive.
    pub(crate) fn begin_load(&self) -> LoadTicket {
        let mut view = self.view();
        view.generation += 1;
        view.error_message = None;
        view.pie_no_data = false;
        view.bar_no_data = false;
        LoadTicket(view.generation)
    }

    /// Applies fetched entries, unless a newer load or [`Dashboard::clear`] ran since
    /// `ticket` was taken.
    pub(crate) fn finish_load(
        &self,
        ticket: LoadTicket,
        owner_id: &str,
        fetched: Result<Vec<FinancialEntry>>,
        today: NaiveDate,
    ) -> LoadOutcome {
        let mut view = self.view();
        if view.generation != ticket.0 {
            debug!("Discarding superseded dashboard load for {}", owner_id);
            return LoadOutcome::Discarded;
        }

        match fetched {
            Ok(entries) => {
                debug!("Dashboard: {} entries fetched for {}", entries.len(), owner_id);
                let report = DashboardReport::build(&entries, today, &self.config);
                self.render(&mut view, report);
                LoadOutcome::Rendered
            }
            Err(e) => {
                error!("Error loading dashboard data: {}", e);
                view.destroy_charts();
                view.report = None;
                view.error_message = Some(LOAD_ERROR_MESSAGE.to_string());
                LoadOutcome::Failed
            }
        }
    }

    fn render(&self, view: &mut DashboardView<R::Handle>, report: DashboardReport) {
        view.destroy_charts();

        if report.has_expense_data {
            match self.renderer.render_pie(&report.categories) {
                Ok(handle) => view.pie = Some(handle),
                Err(e) => {
                    error!("Error rendering category chart: {}", e);
                    view.error_message = Some(RENDER_ERROR_MESSAGE.to_string());
                }
            }
        } else {
            view.pie_no_data = true;
        }

        if report.has_monthly_data {
            match self.renderer.render_bar(&report.monthly) {
                Ok(handle) => view.bar = Some(handle),
                Err(e) => {
                    error!("Error rendering monthly chart: {}", e);
                    view.error_message = Some(RENDER_ERROR_MESSAGE.to_string());
                }
            }
        } else {
            view.bar_no_data = true;
        }

        view.report = Some(report);
    }

    /// Destroys both charts and forgets any in-flight load.
    pub fn clear(&self) {
        let mut view = self.view();
        view.generation += 1;
        view.reset();
    }
}
