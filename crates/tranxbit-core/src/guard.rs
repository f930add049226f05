//! Submission guard.
//!
//! Final accept/reject decision before a draft is handed to the
//! authentication service. Checks run in a fixed order and the first failure
//! wins, so the same draft always yields the same reason.
//!
//! Name validity measures the raw input while the identity checks below trim
//! before comparing. Both behaviours are kept as shipped.

use serde::Serialize;
use tracing::debug;

use crate::draft::RegistrationDraft;
use crate::error::{Identity, NameField, PasswordRequirement, RegistrationError};
use crate::validation::{self, ValidationReport};

/// Outcome of the guard.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "decision", content = "reason", rename_all = "lowercase")]
pub enum Decision {
    Accept,
    Reject(String),
}

impl Decision {
    #[must_use]
    pub const fn is_accept(&self) -> bool {
        matches!(self, Self::Accept)
    }
}

impl From<&Result<(), RegistrationError>> for Decision {
    fn from(result: &Result<(), RegistrationError>) -> Self {
        match result {
            Ok(()) => Self::Accept,
            Err(err) => Self::Reject(err.reason()),
        }
    }
}

/// Whether the password repeats the email, ignoring case and surrounding
/// whitespace. Empty values never match.
#[must_use]
pub fn password_matches_email(draft: &RegistrationDraft) -> bool {
    let password = draft.password.trim();
    let email = draft.email.trim();
    if password.is_empty() || email.is_empty() {
        return false;
    }
    password.to_lowercase() == email.to_lowercase()
}

/// Whether the password repeats the first or last name, ignoring case and
/// surrounding whitespace. Empty names are skipped.
#[must_use]
pub fn password_matches_name(draft: &RegistrationDraft) -> bool {
    let password = draft.password.trim();
    if password.is_empty() {
        return false;
    }
    let password = password.to_lowercase();
    [draft.first_name.trim(), draft.last_name.trim()]
        .into_iter()
        .filter(|name| !name.is_empty())
        .any(|name| name.to_lowercase() == password)
}

/// The identity a password repeats, email taking precedence over name.
#[must_use]
pub fn forbidden_identity(draft: &RegistrationDraft) -> Option<Identity> {
    if password_matches_email(draft) {
        Some(Identity::Email)
    } else if password_matches_name(draft) {
        Some(Identity::Name)
    } else {
        None
    }
}

/// Run the guard against a draft and its report.
///
/// # Errors
///
/// Returns the first failing check as a [`RegistrationError`]:
/// name length, email format, password requirements, password equal to the
/// email, password equal to a name.
pub fn check(draft: &RegistrationDraft, report: &ValidationReport) -> Result<(), RegistrationError> {
    let result = run_checks(draft, report);
    if let Err(ref err) = result {
        debug!(reason = %err, "registration draft rejected");
    }
    result
}

/// Validate the draft and run the guard in one step.
///
/// # Errors
///
/// Same as [`check`].
pub fn check_draft(draft: &RegistrationDraft) -> Result<(), RegistrationError> {
    check(draft, &validation::validate(draft))
}

/// Guard result as a [`Decision`].
#[must_use]
pub fn decide(draft: &RegistrationDraft, report: &ValidationReport) -> Decision {
    Decision::from(&check(draft, report))
}

fn run_checks(draft: &RegistrationDraft, report: &ValidationReport) -> Result<(), RegistrationError> {
    if !report.first_name_valid {
        return Err(RegistrationError::FieldTooShort {
            field: NameField::FirstName,
        });
    }
    if !report.last_name_valid {
        return Err(RegistrationError::FieldTooShort {
            field: NameField::LastName,
        });
    }
    if !report.email_valid {
        return Err(RegistrationError::InvalidEmailFormat);
    }

    let unmet: Vec<PasswordRequirement> = report.password.unmet();
    if !unmet.is_empty() {
        return Err(RegistrationError::PasswordRequirementUnmet { unmet });
    }

    if let Some(identity) = forbidden_identity(draft) {
        return Err(RegistrationError::PasswordEqualsIdentity { identity });
    }
    Ok(())
}
