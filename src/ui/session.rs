//! One user's client session: the auth bridge, both components and the active view.
//!
//! The session subscribes the form, the dashboard and the view to the bridge, so a
//! sign-in or sign-out reaches every component without the components knowing about
//! each other.

use crate::{
    auth::{AuthBridge, IdentityProvider, Subscription},
    config::DashboardConfig,
    errors::{Error, Result},
    models::AuthenticatedUser,
    ui::{
        chart::ChartRenderer,
        dashboard::{Dashboard, LoadOutcome},
        form::{EntryForm, FormFields, SubmitOutcome},
    },
};
use chrono::NaiveDate;
use sea_orm::DatabaseConnection;
use std::sync::{Arc, Mutex, PoisonError};
use tracing::{debug, info};

/// Prompt when the dashboard is opened while signed out.
pub const DASHBOARD_LOGIN_REQUIRED: &str = "Você precisa estar logado para ver o dashboard.";
/// Prompt when the entry form is opened while signed out.
pub const FORM_LOGIN_REQUIRED: &str = "Você precisa estar logado para adicionar lançamentos.";

/// Which view is showing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ActiveView {
    /// Sign-in prompt
    #[default]
    Auth,
    /// The entry form
    EntryForm,
    /// The dashboard
    Dashboard,
}

/// A signed-in (or not yet signed-in) client.
pub struct ClientSession<R: ChartRenderer> {
    bridge: Arc<AuthBridge>,
    form: Arc<EntryForm>,
    dashboard: Arc<Dashboard<R>>,
    view: Arc<Mutex<ActiveView>>,
    _subscriptions: Vec<Subscription>,
}

impl<R> ClientSession<R>
where
    R: ChartRenderer + 'static,
{
    /// Builds the components and wires them to a fresh signed-out bridge.
    pub fn new(
        database: DatabaseConnection,
        renderer: R,
        config: DashboardConfig,
        today: NaiveDate,
    ) -> Self {
        let bridge = Arc::new(AuthBridge::new(database.clone()));
        let form = Arc::new(EntryForm::new(database.clone(), today));
        let dashboard = Arc::new(Dashboard::new(database, renderer, config));
        let view = Arc::new(Mutex::new(ActiveView::Auth));

        let form_sub = {
            let form = Arc::clone(&form);
            bridge.subscribe(move |user| form.on_auth_changed(user))
        };
        let dashboard_sub = {
            let dashboard = Arc::clone(&dashboard);
            bridge.subscribe(move |user| {
                if user.is_none() {
                    dashboard.clear();
                }
            })
        };
        let view_sub = {
            let view = Arc::clone(&view);
            bridge.subscribe(move |user| {
                let mut view = view.lock().unwrap_or_else(PoisonError::into_inner);
                *view = match (user, *view) {
                    (None, _) => ActiveView::Auth,
                    (Some(_), ActiveView::Auth) => ActiveView::Dashboard,
                    (Some(_), current) => current,
                };
            })
        };

        Self {
            bridge,
            form,
            dashboard,
            view,
            _subscriptions: vec![form_sub, dashboard_sub, view_sub],
        }
    }

    /// The session's auth bridge.
    #[must_use]
    pub fn bridge(&self) -> &AuthBridge {
        &self.bridge
    }

    /// The entry form component.
    #[must_use]
    pub fn form(&self) -> &EntryForm {
        &self.form
    }

    /// The dashboard component.
    #[must_use]
    pub fn dashboard(&self) -> &Dashboard<R> {
        &self.dashboard
    }

    /// Which view is showing.
    #[must_use]
    pub fn active_view(&self) -> ActiveView {
        *self.view.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// The signed-in user, if any.
    #[must_use]
    pub fn current_user(&self) -> Option<AuthenticatedUser> {
        self.bridge.current_user()
    }

    fn set_view(&self, next: ActiveView) {
        *self.view.lock().unwrap_or_else(PoisonError::into_inner) = next;
    }

    fn require_user(&self, prompt: &str) -> Result<AuthenticatedUser> {
        self.current_user().ok_or_else(|| Error::LoginRequired {
            message: prompt.to_string(),
        })
    }

    /// Signs in, then shows and loads the dashboard.
    pub async fn sign_in<P>(&self, provider: &P, today: NaiveDate) -> Result<AuthenticatedUser>
    where
        P: IdentityProvider,
    {
        let user = self.bridge.sign_in(provider).await?;
        self.set_view(ActiveView::Dashboard);
        self.dashboard.load(&user.id, today).await;
        Ok(user)
    }

    /// Signs out; the subscriptions clear the charts and return to the auth view.
    pub async fn sign_out<P>(&self, provider: &P) -> Result<()>
    where
        P: IdentityProvider,
    {
        self.bridge.sign_out(provider).await?;
        info!("Session returned to the sign-in view");
        Ok(())
    }

    /// Switches to the dashboard and reloads it.
    pub async fn show_dashboard(&self, today: NaiveDate) -> Result<LoadOutcome> {
        let user = self.require_user(DASHBOARD_LOGIN_REQUIRED)?;
        self.set_view(ActiveView::Dashboard);
        Ok(self.dashboard.load(&user.id, today).await)
    }

    /// Switches to the entry form.
    pub fn show_entry_form(&self) -> Result<()> {
        self.require_user(FORM_LOGIN_REQUIRED)?;
        self.set_view(ActiveView::EntryForm);
        Ok(())
    }

    /// Fills the form with `fields` and submits it.
    pub async fn submit_entry(&self, fields: FormFields, today: NaiveDate) -> SubmitOutcome {
        debug!("Submitting entry form");
        self.form.set_fields(fields);
        self.form.submit(today).await
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;
    use crate::test_utils::*;
    use crate::ui::dashboard::LOAD_ERROR_MESSAGE;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 10, 16).unwrap()
    }

    fn fields() -> FormFields {
        FormFields {
            description: "Aluguel".to_string(),
            amount: "1500".to_string(),
            date: "2026-10-05".to_string(),
            kind: "despesa".to_string(),
            payment_method: "Boleto".to_string(),
            category: "Moradia".to_string(),
        }
    }

    async fn session(renderer: &RecordingRenderer) -> Result<ClientSession<RecordingRenderer>> {
        let db = setup_test_db().await?;
        Ok(ClientSession::new(
            db,
            renderer.clone(),
            DashboardConfig::default(),
            today(),
        ))
    }

    #[tokio::test]
    async fn test_starts_on_auth_view() -> Result<()> {
        let session = session(&RecordingRenderer::default()).await?;
        assert_eq!(session.active_view(), ActiveView::Auth);
        assert!(!session.form().is_enabled());
        Ok(())
    }

    #[tokio::test]
    async fn test_sign_in_enables_form_and_loads_dashboard() -> Result<()> {
        let renderer = RecordingRenderer::default();
        let session = session(&renderer).await?;

        session
            .sign_in(&ScriptedIdentity::signed_in("u1", "Ana"), today())
            .await?;

        assert_eq!(session.active_view(), ActiveView::Dashboard);
        assert!(session.form().is_enabled());
        session.dashboard().with_view(|view| {
            assert!(view.pie_no_data);
            assert!(view.bar_no_data);
        });
        Ok(())
    }

    #[tokio::test]
    async fn test_sign_out_clears_charts_and_returns_to_auth() -> Result<()> {
        let renderer = RecordingRenderer::default();
        let session = session(&renderer).await?;
        let provider = ScriptedIdentity::signed_in("u1", "Ana");
        session.sign_in(&provider, today()).await?;
        let outcome = session.submit_entry(fields(), today()).await;
        assert!(matches!(outcome, SubmitOutcome::Saved { .. }));
        session.show_dashboard(today()).await?;
        assert_eq!(renderer.live(), 2);

        session.sign_out(&provider).await?;

        assert_eq!(session.active_view(), ActiveView::Auth);
        assert_eq!(renderer.live(), 0);
        assert!(!session.form().is_enabled());
        Ok(())
    }

    #[tokio::test]
    async fn test_failed_sign_out_keeps_dashboard() -> Result<()> {
        let renderer = RecordingRenderer::default();
        let session = session(&renderer).await?;
        session
            .sign_in(&ScriptedIdentity::signed_in("u1", "Ana"), today())
            .await?;
        let outcome = session.submit_entry(fields(), today()).await;
        assert!(matches!(outcome, SubmitOutcome::Saved { .. }));
        session.show_dashboard(today()).await?;

        let result = session.sign_out(&ScriptedIdentity::failing()).await;

        assert!(matches!(result, Err(Error::Auth { .. })));
        assert_eq!(session.active_view(), ActiveView::Dashboard);
        assert_eq!(renderer.live(), 2);
        assert!(session.form().is_enabled());
        assert!(session.current_user().is_some());
        Ok(())
    }

    #[tokio::test]
    async fn test_navigation_requires_sign_in() -> Result<()> {
        let session = session(&RecordingRenderer::default()).await?;

        let err = session.show_dashboard(today()).await.unwrap_err();
        assert_eq!(err.to_string(), DASHBOARD_LOGIN_REQUIRED);

        let err = session.show_entry_form().unwrap_err();
        assert_eq!(err.to_string(), FORM_LOGIN_REQUIRED);
        assert_eq!(session.active_view(), ActiveView::Auth);
        Ok(())
    }

    #[tokio::test]
    async fn test_failed_sign_in_stays_on_auth() -> Result<()> {
        let session = session(&RecordingRenderer::default()).await?;

        let result = session.sign_in(&ScriptedIdentity::cancelled(), today()).await;

        assert!(matches!(result, Err(Error::SignInCancelled)));
        assert_eq!(session.active_view(), ActiveView::Auth);
        Ok(())
    }

    #[tokio::test]
    async fn test_dashboard_failure_banner() -> Result<()> {
        let db = setup_broken_db().await?;
        let session = ClientSession::new(
            db,
            RecordingRenderer::default(),
            DashboardConfig::default(),
            today(),
        );
        session
            .bridge()
            .handle_session_change(Some(provider_user("u1", Some("Ana"), None)))
            .await;

        let outcome = session.show_dashboard(today()).await?;

        assert_eq!(outcome, LoadOutcome::Failed);
        session.dashboard().with_view(|view| {
            assert_eq!(view.error_message.as_deref(), Some(LOAD_ERROR_MESSAGE));
        });
        Ok(())
    }

    #[tokio::test]
    async fn test_entry_form_view() -> Result<()> {
        let session = session(&RecordingRenderer::default()).await?;
        session
            .sign_in(&ScriptedIdentity::signed_in("u1", "Ana"), today())
            .await?;

        session.show_entry_form()?;

        assert_eq!(session.active_view(), ActiveView::EntryForm);
        assert_eq!(session.form().status_line(), "Logado como: Ana");
        Ok(())
    }
}
