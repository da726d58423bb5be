//! Entry form component.
//!
//! The form holds raw text exactly as typed. [`FormFields::validate`] turns it into a
//! [`ValidatedEntry`] or a list of per-field errors; only a validated form reaches the
//! store. The form is usable only while a user is signed in.

use crate::{
    core::entry,
    models::{AuthenticatedUser, EntryKind, NewEntry, PaymentMethod, normalize_category},
};
use chrono::NaiveDate;
use sea_orm::DatabaseConnection;
use std::{
    fmt,
    sync::{Mutex, MutexGuard, PoisonError},
};
use tracing::{error, info};

/// Shown when a signed-out user submits.
pub const NOT_AUTHENTICATED_MESSAGE: &str =
    "Usuário não autenticado. Faça login para continuar.";
/// Shown when the store rejects the entry.
pub const SAVE_FAILED_MESSAGE: &str = "Erro ao salvar lançamento. Tente novamente.";
/// Status line while signed out.
pub const SIGNED_OUT_STATUS: &str = "Você precisa estar logado para adicionar lançamentos.";

const DATE_FORMATS: [&str; 2] = ["%Y-%m-%d", "%d/%m/%Y"];

/// Builds the confirmation shown after a successful save.
#[must_use]
pub fn saved_message(description: &str, id: &str) -> String {
    format!("Lançamento \"{description}\" salvo com sucesso (ID: {id})!")
}

/// One input of the form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FormField {
    /// "Descrição"
    Description,
    /// "Valor"
    Amount,
    /// "Data"
    Date,
    /// "Tipo"
    Kind,
    /// "Tipo de pagamento"
    PaymentMethod,
    /// "Categoria"
    Category,
}

/// A validation failure attached to a field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldError {
    /// Offending field
    pub field: FormField,
    /// Message shown next to it
    pub message: &'static str,
}

impl fmt::Display for FieldError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.message)
    }
}

/// Raw form inputs.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormFields {
    /// Free text
    pub description: String,
    /// Accepts `.` or `,` as decimal separator
    pub amount: String,
    /// `YYYY-MM-DD` or `DD/MM/YYYY`
    pub date: String,
    /// Entry kind code or name
    pub kind: String,
    /// Payment method label
    pub payment_method: String,
    /// Free text, only kept for expenses
    pub category: String,
}

/// A form that passed validation.
#[derive(Debug, Clone, PartialEq)]
#[allow(missing_docs)]
pub struct ValidatedEntry {
    pub description: String,
    pub amount: f64,
    pub date: NaiveDate,
    pub kind: EntryKind,
    pub payment_method: PaymentMethod,
    pub category: Option<String>,
}

impl ValidatedEntry {
    /// Attaches the owner to produce a storable entry.
    #[must_use]
    pub fn into_new_entry(self, owner: &AuthenticatedUser) -> NewEntry {
        NewEntry {
            description: self.description,
            amount: self.amount,
            date: self.date,
            kind: self.kind,
            payment_method: self.payment_method,
            owner_id: owner.id.clone(),
            owner_name: owner.denormalized_name(),
            category: self.category,
        }
    }
}

fn parse_amount(raw: &str) -> std::result::Result<f64, &'static str> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Err("Valor é obrigatório.");
    }
    let amount: f64 = raw
        .replace(',', ".")
        .parse()
        .map_err(|_| "Valor inválido.")?;
    if !amount.is_finite() {
        return Err("Valor inválido.");
    }
    if amount <= 0.0 {
        return Err("Valor deve ser positivo.");
    }
    Ok(amount)
}

fn parse_date(raw: &str) -> std::result::Result<NaiveDate, &'static str> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Err("Data é obrigatória.");
    }
    DATE_FORMATS
        .iter()
        .find_map(|format| NaiveDate::parse_from_str(raw, format).ok())
        .ok_or("Data inválida.")
}

fn check<T>(
    errors: &mut Vec<FieldError>,
    field: FormField,
    outcome: std::result::Result<T, &'static str>,
) -> Option<T> {
    match outcome {
        Ok(value) => Some(value),
        Err(message) => {
            errors.push(FieldError { field, message });
            None
        }
    }
}

fn parse_required<T: std::str::FromStr>(
    raw: &str,
    missing: &'static str,
    invalid: &'static str,
) -> std::result::Result<T, &'static str> {
    if raw.trim().is_empty() {
        return Err(missing);
    }
    raw.parse().map_err(|_| invalid)
}

impl FormFields {
    /// Empty form with kind = expense and date = `today`.
    #[must_use]
    pub fn defaults(today: NaiveDate) -> Self {
        Self {
            kind: EntryKind::Expense.code().to_string(),
            date: today.format("%Y-%m-%d").to_string(),
            ..Self::default()
        }
    }

    /// Checks every field, collecting all failures rather than stopping at the first.
    pub fn validate(&self) -> std::result::Result<ValidatedEntry, Vec<FieldError>> {
        let mut errors = Vec::new();

        let description = check(
            &mut errors,
            FormField::Description,
            Some(self.description.trim())
                .filter(|d| !d.is_empty())
                .map(ToString::to_string)
                .ok_or("Descrição é obrigatória."),
        );
        let amount = check(&mut errors, FormField::Amount, parse_amount(&self.amount));
        let date = check(&mut errors, FormField::Date, parse_date(&self.date));
        let kind = check(
            &mut errors,
            FormField::Kind,
            parse_required::<EntryKind>(&self.kind, "Tipo é obrigatório.", "Tipo inválido."),
        );
        let payment_method = check(
            &mut errors,
            FormField::PaymentMethod,
            parse_required::<PaymentMethod>(
                &self.payment_method,
                "Tipo de pagamento é obrigatório.",
                "Tipo de pagamento inválido.",
            ),
        );

        match (description, amount, date, kind, payment_method) {
            (Some(description), Some(amount), Some(date), Some(kind), Some(payment_method)) => {
                let category = match kind {
                    EntryKind::Expense => normalize_category(Some(&self.category)),
                    EntryKind::Income => None,
                };
                Ok(ValidatedEntry {
                    description,
                    amount,
                    date,
                    kind,
                    payment_method,
                    category,
                })
            }
            _ => Err(errors),
        }
    }

    /// The category input only applies to expenses.
    #[must_use]
    pub fn category_visible(&self) -> bool {
        self.kind.parse::<EntryKind>().ok() == Some(EntryKind::Expense)
    }
}

/// Everything the form displays.
#[derive(Debug, Clone, Default)]
pub struct FormState {
    /// Signed-in user, `None` disables the form
    pub user: Option<AuthenticatedUser>,
    /// Current inputs
    pub fields: FormFields,
    /// Errors from the last submit attempt
    pub errors: Vec<FieldError>,
    /// Confirmation after a save
    pub success_message: Option<String>,
    /// Banner after a refused or failed save
    pub error_message: Option<String>,
    /// A save is in flight
    pub submitting: bool,
}

/// Result of [`EntryForm::submit`].
#[derive(Debug, Clone, PartialEq)]
pub enum SubmitOutcome {
    /// Nobody is signed in
    NotAuthenticated,
    /// Validation failed; nothing was written
    Invalid(Vec<FieldError>),
    /// The entry was stored and the form reset
    Saved {
        /// Identifier assigned by the store
        id: String,
        /// Confirmation text
        message: String,
    },
    /// The store failed; inputs are kept
    Failed,
    /// Another submit is still running
    Busy,
}

/// The entry form component.
pub struct EntryForm {
    database: DatabaseConnection,
    state: Mutex<FormState>,
}

impl EntryForm {
    /// Creates a disabled form prefilled for `today`.
    #[must_use]
    pub fn new(database: DatabaseConnection, today: NaiveDate) -> Self {
        Self {
            database,
            state: Mutex::new(FormState {
                fields: FormFields::defaults(today),
                ..FormState::default()
            }),
        }
    }

    fn state(&self) -> MutexGuard<'_, FormState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Session callback: enables the form for `user`, disables it on `None`.
    pub fn on_auth_changed(&self, user: &Option<AuthenticatedUser>) {
        let mut state = self.state();
        state.user.clone_from(user);
        if user.is_none() {
            state.success_message = None;
            state.error_message = None;
            state.errors.clear();
        }
    }

    /// True while someone is signed in.
    #[must_use]
    pub fn is_enabled(&self) -> bool {
        self.state().user.is_some()
    }

    /// "Logado como: …" or the sign-in prompt.
    #[must_use]
    pub fn status_line(&self) -> String {
        match &self.state().user {
            Some(user) => format!("Logado como: {}", user.label()),
            None => SIGNED_OUT_STATUS.to_string(),
        }
    }

    /// Replaces the raw inputs.
    pub fn set_fields(&self, fields: FormFields) {
        self.state().fields = fields;
    }

    /// Current raw inputs.
    #[must_use]
    pub fn fields(&self) -> FormFields {
        self.state().fields.clone()
    }

    /// Snapshot of the whole form.
    #[must_use]
    pub fn snapshot(&self) -> FormState {
        self.state().clone()
    }

    /// Whether the category input should show for the current kind.
    #[must_use]
    pub fn category_visible(&self) -> bool {
        self.state().fields.category_visible()
    }

    /// Restores defaults and clears errors.
    pub fn reset(&self, today: NaiveDate) {
        let mut state = self.state();
        state.fields = FormFields::defaults(today);
        state.errors.clear();
    }

    /// Validates and stores the current inputs as the signed-in user's entry.
    pub async fn submit(&self, today: NaiveDate) -> SubmitOutcome {
        let (validated, owner) = {
            let mut state = self.state();
            if state.submitting {
                return SubmitOutcome::Busy;
            }
            state.success_message = None;
            state.error_message = None;

            let Some(owner) = state.user.clone() else {
                state.error_message = Some(NOT_AUTHENTICATED_MESSAGE.to_string());
                return SubmitOutcome::NotAuthenticated;
            };

            match state.fields.validate() {
                Ok(validated) => {
                    state.errors.clear();
                    state.submitting = true;
                    (validated, owner)
                }
                Err(errors) => {
                    state.errors.clone_from(&errors);
                    return SubmitOutcome::Invalid(errors);
                }
            }
        };

        let description = validated.description.clone();
        let result = entry::create_entry(&self.database, validated.into_new_entry(&owner)).await;

        let mut state = self.state();
        state.submitting = false;
        match result {
            Ok(id) => {
                info!("Form saved entry {} for {}", id, owner.id);
                let message = saved_message(&description, &id);
                state.success_message = Some(message.clone());
                state.fields = FormFields::defaults(today);
                SubmitOutcome::Saved { id, message }
            }
            Err(e) => {
                error!("Error adding entry: {}", e);
                state.error_message = Some(SAVE_FAILED_MESSAGE.to_string());
                SubmitOutcome::Failed
            }
        }
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    #![allow(clippy::float_cmp)]
    use super::*;
    use crate::errors::Result;
    use crate::test_utils::*;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 10, 16).unwrap()
    }

    fn filled(amount: &str, kind: &str) -> FormFields {
        FormFields {
            description: "Mercado".to_string(),
            amount: amount.to_string(),
            date: "2026-10-10".to_string(),
            kind: kind.to_string(),
            payment_method: "PIX".to_string(),
            category: "Alimentação".to_string(),
        }
    }

    fn messages(errors: &[FieldError]) -> Vec<&'static str> {
        errors.iter().map(|e| e.message).collect()
    }

    #[test]
    fn test_defaults() {
        let fields = FormFields::defaults(today());
        assert_eq!(fields.kind, "despesa");
        assert_eq!(fields.date, "2026-10-16");
        assert!(fields.description.is_empty());
        assert!(fields.category_visible());
    }

    #[test]
    fn test_validate_collects_every_error() {
        let errors = FormFields::default().validate().unwrap_err();
        assert_eq!(
            messages(&errors),
            vec![
                "Descrição é obrigatória.",
                "Valor é obrigatório.",
                "Data é obrigatória.",
                "Tipo é obrigatório.",
                "Tipo de pagamento é obrigatório.",
            ]
        );
    }

    #[test]
    fn test_validate_amount_rules() {
        let zero = filled("0", "despesa").validate().unwrap_err();
        assert_eq!(messages(&zero), vec!["Valor deve ser positivo."]);
        assert_eq!(zero[0].field, FormField::Amount);

        let negative = filled("-5", "despesa").validate().unwrap_err();
        assert_eq!(messages(&negative), vec!["Valor deve ser positivo."]);

        let garbage = filled("abc", "despesa").validate().unwrap_err();
        assert_eq!(messages(&garbage), vec!["Valor inválido."]);

        assert_eq!(filled("0.01", "despesa").validate().unwrap().amount, 0.01);
        assert_eq!(filled("12,50", "despesa").validate().unwrap().amount, 12.5);
    }

    #[test]
    fn test_validate_invalid_choices_and_date() {
        let mut fields = filled("10", "loan");
        fields.payment_method = "Cheque".to_string();
        fields.date = "31/02/2026".to_string();

        let errors = fields.validate().unwrap_err();

        assert_eq!(
            messages(&errors),
            vec!["Data inválida.", "Tipo inválido.", "Tipo de pagamento inválido."]
        );
    }

    #[test]
    fn test_validate_accepts_brazilian_date() {
        let mut fields = filled("10", "despesa");
        fields.date = "05/10/2026".to_string();
        assert_eq!(
            fields.validate().unwrap().date,
            NaiveDate::from_ymd_opt(2026, 10, 5).unwrap()
        );
    }

    #[test]
    fn test_income_ignores_category() {
        let fields = filled("1000", "receita");
        assert!(!fields.category_visible());
        assert_eq!(fields.validate().unwrap().category, None);
    }

    #[tokio::test]
    async fn test_submit_requires_user() -> Result<()> {
        let db = setup_test_db().await?;
        let form = EntryForm::new(db.clone(), today());
        form.set_fields(filled("10", "despesa"));

        assert_eq!(form.submit(today()).await, SubmitOutcome::NotAuthenticated);
        assert_eq!(
            form.snapshot().error_message.as_deref(),
            Some(NOT_AUTHENTICATED_MESSAGE)
        );
        assert!(entry::list_entries(&db).await?.is_empty());
        Ok(())
    }

    #[tokio::test]
    async fn test_submit_saves_and_resets() -> Result<()> {
        let db = setup_test_db().await?;
        let form = EntryForm::new(db.clone(), today());
        form.on_auth_changed(&Some(test_user("u1", Some("Ana"))));
        form.set_fields(filled("12,50", "despesa"));

        let SubmitOutcome::Saved { id, message } = form.submit(today()).await else {
            panic!("expected the entry to be saved");
        };

        assert_eq!(message, format!("Lançamento \"Mercado\" salvo com sucesso (ID: {id})!"));
        assert_eq!(form.fields(), FormFields::defaults(today()));

        let stored = entry::get_entry(&db, &id).await?.unwrap();
        assert_eq!(stored.owner_id, "u1");
        assert_eq!(stored.owner_name.as_deref(), Some("Ana"));
        assert_eq!(stored.amount, 12.5);
        assert_eq!(stored.category.as_deref(), Some("Alimentação"));
        Ok(())
    }

    #[tokio::test]
    async fn test_submit_invalid_writes_nothing() -> Result<()> {
        let db = setup_test_db().await?;
        let form = EntryForm::new(db.clone(), today());
        form.on_auth_changed(&Some(test_user("u1", Some("Ana"))));
        form.set_fields(filled("-1", "despesa"));

        let outcome = form.submit(today()).await;

        assert!(matches!(outcome, SubmitOutcome::Invalid(ref e) if e.len() == 1));
        assert_eq!(form.snapshot().errors.len(), 1);
        assert!(entry::list_entries(&db).await?.is_empty());
        Ok(())
    }

    #[tokio::test]
    async fn test_submit_store_failure_keeps_values() -> Result<()> {
        let db = setup_broken_db().await?;
        let form = EntryForm::new(db, today());
        form.on_auth_changed(&Some(test_user("u1", Some("Ana"))));
        form.set_fields(filled("10", "despesa"));

        assert_eq!(form.submit(today()).await, SubmitOutcome::Failed);

        let state = form.snapshot();
        assert_eq!(state.error_message.as_deref(), Some(SAVE_FAILED_MESSAGE));
        assert_eq!(state.fields, filled("10", "despesa"));
        assert!(!state.submitting);
        Ok(())
    }

    #[test]
    fn test_status_line() {
        let db = sea_orm::DatabaseConnection::Disconnected;
        let form = EntryForm::new(db, today());
        assert_eq!(form.status_line(), SIGNED_OUT_STATUS);
        assert!(!form.is_enabled());

        form.on_auth_changed(&Some(test_user("u1", Some("Ana"))));
        assert_eq!(form.status_line(), "Logado como: Ana");
        assert!(form.is_enabled());
    }
}
