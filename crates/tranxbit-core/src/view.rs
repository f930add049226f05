//! Registration view-model.
//!
//! A pure projection of the draft, its report and the session flags into
//! what a front end needs to draw: inline hints, the password popover,
//! the forbidden-password notice and the submit button. Nothing here feeds
//! back into validation.

use serde::Serialize;

use crate::draft::RegistrationDraft;
use crate::error::{Identity, PasswordRequirement};
use crate::guard;
use crate::strength::{StrengthBand, StrengthScore};
use crate::validation::ValidationReport;

const NAME_HINT: &str = "At least 2 characters";
const EMAIL_HINT: &str = "Valid email address";
const CONFIRM_HINT: &str = "Passwords match";
const SUBMIT_IDLE: &str = "Register";
const SUBMIT_BUSY: &str = "Creating Account...";

/// Popover checklist order.
const CHECKLIST: [PasswordRequirement; 5] = [
    PasswordRequirement::MinLength,
    PasswordRequirement::Number,
    PasswordRequirement::UpperCase,
    PasswordRequirement::LowerCase,
    PasswordRequirement::SpecialChar,
];

/// Session state that affects rendering but not validation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ViewFlags {
    pub submitting: bool,
    pub password_help_open: bool,
    pub password_visible: bool,
}

/// Inline pass/fail hint under an input.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldHint {
    pub text: &'static str,
    pub valid: bool,
}

/// One line of the password requirements checklist.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChecklistItem {
    pub requirement: PasswordRequirement,
    pub text: String,
    pub met: bool,
}

/// Everything the password popover shows.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PasswordHelp {
    pub open: bool,
    pub strength: StrengthScore,
    pub band: StrengthBand,
    pub checklist: Vec<ChecklistItem>,
}

/// Render-ready registration form state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RegistrationView {
    pub first_name_hint: Option<FieldHint>,
    pub last_name_hint: Option<FieldHint>,
    pub email_hint: Option<FieldHint>,
    pub confirm_password_hint: Option<FieldHint>,
    pub password_help: PasswordHelp,
    pub forbidden_password: Option<&'static str>,
    pub password_visible: bool,
    pub submit_enabled: bool,
    pub submit_label: &'static str,
}

fn hint_for(value: &str, text: &'static str, valid: bool) -> Option<FieldHint> {
    (!value.is_empty()).then_some(FieldHint { text, valid })
}

fn requirement_met(report: &ValidationReport, requirement: PasswordRequirement) -> bool {
    let p = &report.password;
    match requirement {
        PasswordRequirement::MinLength => p.has_min_length,
        PasswordRequirement::UpperCase => p.has_upper_case,
        PasswordRequirement::LowerCase => p.has_lower_case,
        PasswordRequirement::Number => p.has_number,
        PasswordRequirement::SpecialChar => p.has_special_char,
        PasswordRequirement::PasswordsMatch => p.passwords_match,
    }
}

/// Notice shown under the password input when it repeats an identity.
#[must_use]
pub const fn forbidden_notice(identity: Identity) -> &'static str {
    match identity {
        Identity::Email => "Password cannot be the same as your email.",
        Identity::Name => "Password cannot be your name.",
    }
}

/// Build the view-model.
#[must_use]
pub fn render(
    draft: &RegistrationDraft,
    report: &ValidationReport,
    flags: ViewFlags,
) -> RegistrationView {
    let strength = StrengthScore::from_report(&report.password);
    let checklist = CHECKLIST
        .iter()
        .map(|req| ChecklistItem {
            requirement: *req,
            text: req.to_string(),
            met: requirement_met(report, *req),
        })
        .collect();

    let forbidden = guard::forbidden_identity(draft);

    RegistrationView {
        first_name_hint: hint_for(&draft.first_name, NAME_HINT, report.first_name_valid),
        last_name_hint: hint_for(&draft.last_name, NAME_HINT, report.last_name_valid),
        email_hint: hint_for(&draft.email, EMAIL_HINT, report.email_valid),
        confirm_password_hint: hint_for(
            &draft.confirm_password,
            CONFIRM_HINT,
            report.password.passwords_match,
        ),
        password_help: PasswordHelp {
            open: flags.password_help_open,
            strength,
            band: strength.band(),
            checklist,
        },
        forbidden_password: forbidden.map(forbidden_notice),
        password_visible: flags.password_visible,
        submit_enabled: !flags.submitting && report.is_valid() && forbidden.is_none(),
        submit_label: if flags.submitting { SUBMIT_BUSY } else { SUBMIT_IDLE },
    }
}
