//! Entry Discord command - `lancamento`.
//!
//! The command fills the author's entry form with its parameters and submits it,
//! so Discord input goes through the same validation as any other client.

use crate::ui::{
    FormFields, SubmitOutcome,
    form::{NOT_AUTHENTICATED_MESSAGE, SAVE_FAILED_MESSAGE},
};
use chrono::NaiveDate;

/// Builds the raw form inputs from the command parameters.
#[must_use]
pub fn fields_from_args(
    descricao: String,
    valor: String,
    tipo: String,
    pagamento: String,
    data: Option<String>,
    categoria: Option<String>,
    today: NaiveDate,
) -> FormFields {
    FormFields {
        description: descricao,
        amount: valor,
        date: data.unwrap_or_else(|| today.format("%Y-%m-%d").to_string()),
        kind: tipo,
        payment_method: pagamento,
        category: categoria.unwrap_or_default(),
    }
}

/// Reply text for a submit outcome.
#[must_use]
pub fn outcome_message(outcome: &SubmitOutcome) -> String {
    match outcome {
        SubmitOutcome::NotAuthenticated => format!("🔒 {NOT_AUTHENTICATED_MESSAGE}"),
        SubmitOutcome::Invalid(errors) => {
            let lines: Vec<String> = errors.iter().map(|e| format!("• {e}")).collect();
            format!("❌ Verifique os campos:\n{}", lines.join("\n"))
        }
        SubmitOutcome::Saved { message, .. } => format!("✅ {message}"),
        SubmitOutcome::Failed => format!("❌ {SAVE_FAILED_MESSAGE}"),
        SubmitOutcome::Busy => "⏳ Um lançamento ainda está sendo salvo.".to_string(),
    }
}

// Inner module to suppress missing_docs warnings for poise macro-generated code
mod inner {
    #![allow(missing_docs)]

    use super::{fields_from_args, outcome_message};
    use crate::{
        bot::{BotData, handlers::autocomplete, today},
        errors::{Error, Result},
    };

    /// Records an income or expense entry ("lançamento").
    ///
    /// The amount accepts a comma as decimal separator. The date defaults to today and
    /// accepts `AAAA-MM-DD` or `DD/MM/AAAA`. The category only applies to expenses.
    #[poise::command(slash_command, prefix_command)]
    pub async fn lancamento(
        ctx: poise::Context<'_, BotData, Error>,
        #[description = "Descrição do lançamento"] descricao: String,
        #[description = "Valor (ex: 12,50)"] valor: String,
        #[description = "despesa ou receita"]
        #[autocomplete = "autocomplete::autocomplete_entry_kind"]
        tipo: String,
        #[description = "Tipo de pagamento"]
        #[autocomplete = "autocomplete::autocomplete_payment_method"]
        pagamento: String,
        #[description = "Data (AAAA-MM-DD ou DD/MM/AAAA), padrão hoje"] data: Option<String>,
        #[description = "Categoria (apenas despesas)"]
        #[autocomplete = "autocomplete::autocomplete_category"]
        categoria: Option<String>,
    ) -> Result<()> {
        let author_id = ctx.author().id.to_string();
        let today = today();
        let session = ctx.data().session_for(&author_id, today).await;

        if let Err(e) = session.show_entry_form() {
            ctx.say(format!("🔒 {e} Use `/login`.")).await?;
            return Ok(());
        }

        let fields = fields_from_args(descricao, valor, tipo, pagamento, data, categoria, today);
        let outcome = session.submit_entry(fields, today).await;

        ctx.say(outcome_message(&outcome)).await?;
        Ok(())
    }
}

pub use inner::*;
