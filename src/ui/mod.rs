//! Headless UI components.
//!
//! Components keep their display state in memory and expose it through snapshots;
//! the bot layer renders that state into Discord messages.

/// Chart rendering seam and the block-character renderer
pub mod chart;
/// Expense charts for the signed-in user
pub mod dashboard;
/// Entry form with inline validation
pub mod form;
/// Per-user session and view state machine
pub mod session;

pub use chart::{ChartHandle, ChartRenderer, TextChart, TextChartRenderer};
pub use dashboard::{Dashboard, DashboardView, LoadOutcome};
pub use form::{EntryForm, FormFields, SubmitOutcome};
pub use session::{ActiveView, ClientSession};
