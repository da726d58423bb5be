//! Dashboard Discord command and its message layout.

use crate::{
    errors::Result,
    ui::{
        DashboardView, TextChart,
        dashboard::{NO_EXPENSE_DATA_MESSAGE, NO_MONTHLY_DATA_MESSAGE},
    },
};
use std::fmt::Write;

/// Discord rejects messages longer than this
const DISCORD_MESSAGE_LIMIT: usize = 2000;

fn chart_section(
    out: &mut String,
    chart: Option<&TextChart>,
    no_data: bool,
    title: &str,
    empty: &str,
) -> Result<()> {
    match chart {
        Some(chart) => write!(out, "\n**{}**\n```\n{}```", chart.title, chart.body)?,
        None if no_data => write!(out, "\n**{title}**\n{empty}")?,
        None => {}
    }
    Ok(())
}

fn dashboard_body(
    out: &mut String,
    user_label: &str,
    view: &DashboardView<TextChart>,
) -> Result<()> {
    write!(out, "📊 **Dashboard de {user_label}**")?;
    if let Some(error) = &view.error_message {
        write!(out, "\n❌ {error}")?;
    }
    chart_section(
        out,
        view.pie.as_ref(),
        view.pie_no_data,
        "Despesas por Categoria",
        NO_EXPENSE_DATA_MESSAGE,
    )?;
    chart_section(
        out,
        view.bar.as_ref(),
        view.bar_no_data,
        "Receitas x Despesas",
        NO_MONTHLY_DATA_MESSAGE,
    )
}

/// Lays the dashboard view out as a single Discord message.
pub fn dashboard_message(user_label: &str, view: &DashboardView<TextChart>) -> Result<String> {
    let mut out = String::new();
    dashboard_body(&mut out, user_label, view)?;
    Ok(fit_message(out))
}

/// Sign-in greeting followed by the dashboard, fitted as one Discord message.
pub fn login_message(user_label: &str, view: &DashboardView<TextChart>) -> Result<String> {
    let mut out = format!("✅ Logado como: {user_label}\n\n");
    dashboard_body(&mut out, user_label, view)?;
    Ok(fit_message(out))
}

/// Cuts `message` on a line boundary so it fits in one Discord message.
#[must_use]
pub fn fit_message(message: String) -> String {
    if message.chars().count() <= DISCORD_MESSAGE_LIMIT {
        return message;
    }

    let suffix = "\n… (truncado)";
    let budget = DISCORD_MESSAGE_LIMIT - suffix.chars().count() - 4;
    let mut out = String::new();
    for line in message.lines() {
        if out.chars().count() + line.chars().count() + 1 > budget {
            break;
        }
        out.push_str(line);
        out.push('\n');
    }
    // Close a code block left open by the cut
    if out.matches("```").count() % 2 == 1 {
        out.push_str("```");
    }
    out.push_str(suffix);
    out
}

// Inner module to suppress missing_docs warnings for poise macro-generated code
mod inner {
    #![allow(missing_docs)]

    use super::dashboard_message;
    use crate::{
        bot::{BotData, today},
        errors::{Error, Result},
    };
    use tracing::info;

    /// Shows your expenses by category and income vs. expenses per month.
    #[poise::command(slash_command, prefix_command)]
    pub async fn dashboard(ctx: poise::Context<'_, BotData, Error>) -> Result<()> {
        let author_id = ctx.author().id.to_string();
        let session = ctx.data().session_for(&author_id, today()).await;

        let outcome = match session.show_dashboard(today()).await {
            Ok(outcome) => outcome,
            Err(Error::LoginRequired { message }) => {
                ctx.say(format!("🔒 {message} Use `/login`.")).await?;
                return Ok(());
            }
            Err(e) => return Err(e),
        };
        info!("Dashboard for {}: {:?}", author_id, outcome);

        let label = session
            .current_user()
            .map(|user| user.label().to_string())
            .unwrap_or_default();
        let message = session
            .dashboard()
            .with_view(|view| dashboard_message(&label, view))?;

        ctx.say(message).await?;
        Ok(())
    }
}

pub use inner::*;
