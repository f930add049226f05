//! Registration form session.
//!
//! A [`FormSession`] owns the one draft of one mounted form. Every keystroke
//! replaces the draft and the report is recomputed from it on demand, so the
//! report can never go stale.
//!
//! Submission is the only async step. It runs the guard, then races the
//! registrar call against the form being unmounted. On success the draft is
//! discarded; on a service failure the draft is kept and the message is held
//! as a dismissible notice; on unmount the draft is discarded and nothing
//! else is cleaned up.

use std::ops::{Deref, DerefMut};

use serde::Serialize;
use tokio::sync::watch;
use tracing::{info, warn};

use crate::draft::{DraftField, RegistrationDraft};
use crate::error::SubmitError;
use crate::guard;
use crate::registrar::{Registrar, RegistrationOutcome, RegistrationRequest};
use crate::strength::StrengthScore;
use crate::validation::{self, ValidationReport};
use crate::view::{self, RegistrationView, ViewFlags};

/// Where the form is in its lifecycle.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum SessionStatus {
    Editing,
    Submitting,
    AwaitingVerification { email: String },
}

/// Handle held by whoever mounted the form. Calling [`UnmountHandle::unmount`]
/// abandons any in-flight submit.
#[derive(Debug)]
pub struct UnmountHandle(watch::Sender<bool>);

impl UnmountHandle {
    pub fn unmount(&self) {
        self.0.send_replace(true);
    }
}

/// State of one mounted registration form.
#[derive(Debug)]
pub struct FormSession {
    draft: RegistrationDraft,
    flags: ViewFlags,
    status: SessionStatus,
    notice: Option<String>,
    unmounted: watch::Receiver<bool>,
}

impl FormSession {
    /// Mount an empty form.
    #[must_use]
    pub fn mount() -> (Self, UnmountHandle) {
        let (tx, rx) = watch::channel(false);
        (Self::with_receiver(RegistrationDraft::new(), rx), UnmountHandle(tx))
    }

    /// A session over an existing draft that can never be unmounted, for
    /// callers that receive the whole draft at once.
    #[must_use]
    pub fn detached(draft: RegistrationDraft) -> Self {
        let (_tx, rx) = watch::channel(false);
        Self::with_receiver(draft, rx)
    }

    fn with_receiver(draft: RegistrationDraft, unmounted: watch::Receiver<bool>) -> Self {
        Self {
            draft,
            flags: ViewFlags::default(),
            status: SessionStatus::Editing,
            notice: None,
            unmounted,
        }
    }

    #[must_use]
    pub fn draft(&self) -> &RegistrationDraft {
        &self.draft
    }

    #[must_use]
    pub fn status(&self) -> &SessionStatus {
        &self.status
    }

    /// Service failure message awaiting dismissal.
    #[must_use]
    pub fn notice(&self) -> Option<&str> {
        self.notice.as_deref()
    }

    #[must_use]
    pub fn report(&self) -> ValidationReport {
        validation::validate(&self.draft)
    }

    #[must_use]
    pub fn strength(&self) -> StrengthScore {
        StrengthScore::from_report(&self.report().password)
    }

    #[must_use]
    pub fn view(&self) -> RegistrationView {
        view::render(&self.draft, &self.report(), self.flags)
    }

    /// Apply one keystroke and return the recomputed report.
    ///
    /// A non-empty password opens the password help; clearing it closes it.
    pub fn update(&mut self, field: DraftField, value: impl Into<String>) -> ValidationReport {
        self.draft = self.draft.with(field, value);
        if field == DraftField::Password {
            self.flags.password_help_open = !self.draft.password.is_empty();
        }
        self.report()
    }

    pub fn focus_password(&mut self) {
        self.flags.password_help_open = true;
    }

    pub fn toggle_password_visibility(&mut self) {
        self.flags.password_visible = !self.flags.password_visible;
    }

    pub fn dismiss_notice(&mut self) {
        self.notice = None;
    }

    /// Discard the draft and all UI flags.
    pub fn reset(&mut self) {
        self.draft = RegistrationDraft::new();
        self.flags = ViewFlags::default();
        self.status = SessionStatus::Editing;
        self.notice = None;
    }

    /// Guard the draft and hand it to the registrar.
    ///
    /// # Errors
    ///
    /// - [`SubmitError::Rejected`] if the guard refuses the draft. The
    ///   registrar is not called.
    /// - [`SubmitError::Service`] if the registrar refuses or fails.
    /// - [`SubmitError::Cancelled`] if the form was unmounted before or
    ///   during the call.
    pub async fn submit(
        &mut self,
        registrar: &dyn Registrar,
    ) -> Result<RegistrationOutcome, SubmitError> {
        if *self.unmounted.borrow() {
            self.discard();
            return Err(SubmitError::Cancelled);
        }

        guard::check(&self.draft, &self.report())?;

        let request = RegistrationRequest::from(&self.draft);
        let mut unmounted = self.unmounted.clone();
        let cancelled = async move {
            let sender_gone = unmounted.wait_for(|gone| *gone).await.is_err();
            if sender_gone {
                std::future::pending::<()>().await;
            }
        };

        let mut session = InFlight::enter(self);
        let result = tokio::select! {
            result = registrar.register(request) => Some(result),
            () = cancelled => None,
        };

        match result {
            None => {
                info!("registration abandoned, form unmounted");
                session.discard();
                Err(SubmitError::Cancelled)
            }
            Some(Ok(outcome)) => {
                let RegistrationOutcome::VerifyEmail { email } = &outcome;
                info!(email = %email, "registration accepted, awaiting email verification");
                session.draft = RegistrationDraft::new();
                session.flags = ViewFlags::default();
                session.status = SessionStatus::AwaitingVerification {
                    email: email.clone(),
                };
                Ok(outcome)
            }
            Some(Err(err)) => {
                warn!(error = %err, "registration refused by authentication service");
                session.status = SessionStatus::Editing;
                session.notice = Some(err.message.clone());
                Err(SubmitError::Service(err.message))
            }
        }
    }

    fn discard(&mut self) {
        self.draft = RegistrationDraft::new();
        self.flags = ViewFlags::default();
        self.status = SessionStatus::Editing;
    }
}

/// Marks a session as submitting for as long as it lives. Dropping it while
/// still submitting, including when the `submit` future itself is dropped,
/// returns the session to editing with the draft intact.
struct InFlight<'a>(&'a mut FormSession);

impl<'a> InFlight<'a> {
    fn enter(session: &'a mut FormSession) -> Self {
        session.notice = None;
        session.status = SessionStatus::Submitting;
        session.flags.submitting = true;
        Self(session)
    }
}

impl Deref for InFlight<'_> {
    type Target = FormSession;

    fn deref(&self) -> &FormSession {
        self.0
    }
}

impl DerefMut for InFlight<'_> {
    fn deref_mut(&mut self) -> &mut FormSession {
        self.0
    }
}

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        self.0.flags.submitting = false;
        if self.0.status == SessionStatus::Submitting {
            self.0.status = SessionStatus::Editing;
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};

    use async_trait::async_trait;

    use super::*;
    use crate::error::{Identity, RegistrationError};
    use crate::registrar::RegistrarError;

    #[derive(Default)]
    struct Recording {
        calls: AtomicUsize,
        refuse_with: Option<&'static str>,
    }

    #[async_trait]
    impl Registrar for Recording {
        async fn register(
            &self,
            request: RegistrationRequest,
        ) -> Result<RegistrationOutcome, RegistrarError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            match self.refuse_with {
                Some(msg) => Err(RegistrarError::new(msg)),
                None => Ok(RegistrationOutcome::VerifyEmail {
                    email: request.email,
                }),
            }
        }
    }

    struct Hanging;

    #[async_trait]
    impl Registrar for Hanging {
        async fn register(
            &self,
            _request: RegistrationRequest,
        ) -> Result<RegistrationOutcome, RegistrarError> {
            std::future::pending().await
        }
    }

    fn fill(session: &mut FormSession, password: &str) {
        session.update(DraftField::FirstName, "Jo");
        session.update(DraftField::LastName, "Do");
        session.update(DraftField::Email, "jo@do.com");
        session.update(DraftField::Password, password);
        session.update(DraftField::ConfirmPassword, password);
    }

    #[test]
    fn password_help_follows_password_input() {
        let (mut session, _handle) = FormSession::mount();
        assert!(!session.view().password_help.open);
        session.update(DraftField::Password, "a");
        assert!(session.view().password_help.open);
        session.update(DraftField::Password, "");
        assert!(!session.view().password_help.open);
        session.focus_password();
        assert!(session.view().password_help.open);
    }

    #[test]
    fn visibility_toggles() {
        let (mut session, _handle) = FormSession::mount();
        session.toggle_password_visibility();
        assert!(session.view().password_visible);
        session.toggle_password_visibility();
        assert!(!session.view().password_visible);
    }

    #[test]
    fn report_reflects_latest_keystroke() {
        let (mut session, _handle) = FormSession::mount();
        let report = session.update(DraftField::Password, "abcdefgh");
        assert_eq!(session.strength().value(), 40);
        assert_eq!(report, session.report());
        session.update(DraftField::Password, "Abcdef1!");
        assert_eq!(session.strength().value(), 100);
    }

    #[tokio::test]
    async fn accepted_submit_resets_draft() {
        let (mut session, _handle) = FormSession::mount();
        fill(&mut session, "Passw0rd!");
        let registrar = Recording::default();

        let outcome = session.submit(&registrar).await.unwrap();
        assert_eq!(
            outcome,
            RegistrationOutcome::VerifyEmail {
                email: "jo@do.com".into()
            }
        );
        assert!(session.draft().is_blank());
        assert_eq!(
            session.status(),
            &SessionStatus::AwaitingVerification {
                email: "jo@do.com".into()
            }
        );
        assert_eq!(registrar.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn guard_rejection_skips_registrar() {
        let (mut session, _handle) = FormSession::mount();
        fill(&mut session, "Jo1!@do.com");
        session.update(DraftField::Email, "jo1!@DO.com");
        let registrar = Recording::default();

        let err = session.submit(&registrar).await.unwrap_err();
        assert_eq!(
            err,
            SubmitError::Rejected(RegistrationError::PasswordEqualsIdentity {
                identity: Identity::Email
            })
        );
        assert_eq!(registrar.calls.load(Ordering::SeqCst), 0);
        assert_eq!(session.draft().email, "jo1!@DO.com");
    }

    #[tokio::test]
    async fn service_failure_keeps_draft_and_sets_notice() {
        let (mut session, _handle) = FormSession::mount();
        fill(&mut session, "Passw0rd!");
        let registrar = Recording {
            refuse_with: Some("The email has already been taken."),
            ..Recording::default()
        };

        let err = session.submit(&registrar).await.unwrap_err();
        assert_eq!(
            err,
            SubmitError::Service("The email has already been taken.".into())
        );
        assert_eq!(session.notice(), Some("The email has already been taken."));
        assert_eq!(session.status(), &SessionStatus::Editing);
        assert!(session.view().submit_enabled);

        session.dismiss_notice();
        assert!(session.notice().is_none());
    }

    #[tokio::test]
    async fn unmount_during_submit_discards_draft() {
        let (mut session, handle) = FormSession::mount();
        fill(&mut session, "Passw0rd!");

        let (result, ()) = tokio::join!(session.submit(&Hanging), async {
            tokio::task::yield_now().await;
            handle.unmount();
        });

        assert_eq!(result, Err(SubmitError::Cancelled));
        assert!(session.draft().is_blank());
        assert_eq!(session.status(), &SessionStatus::Editing);
    }

    #[tokio::test]
    async fn dropped_submit_returns_to_editing() {
        let (mut session, _handle) = FormSession::mount();
        fill(&mut session, "Passw0rd!");

        let timed_out = tokio::time::timeout(
            std::time::Duration::from_millis(10),
            session.submit(&Hanging),
        )
        .await;
        assert!(timed_out.is_err());

        assert_eq!(session.status(), &SessionStatus::Editing);
        let view = session.view();
        assert!(view.submit_enabled);
        assert_eq!(view.submit_label, "Register");
        assert_eq!(session.draft().email, "jo@do.com");
    }

    #[tokio::test]
    async fn submit_after_unmount_is_cancelled_immediately() {
        let (mut session, handle) = FormSession::mount();
        fill(&mut session, "Passw0rd!");
        handle.unmount();
        let registrar = Recording::default();

        assert_eq!(session.submit(&registrar).await, Err(SubmitError::Cancelled));
        assert_eq!(registrar.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn detached_session_submits_whole_draft() {
        let draft = RegistrationDraft {
            first_name: "Jo".into(),
            last_name: "Do".into(),
            email: "jo@do.com".into(),
            password: "Passw0rd!".into(),
            confirm_password: "Passw0rd!".into(),
        };
        let mut session = FormSession::detached(draft);
        assert!(session.submit(&Recording::default()).await.is_ok());
    }
}
