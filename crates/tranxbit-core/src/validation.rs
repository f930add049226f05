//! Field validation for the registration form.
//!
//! [`validate`] is a pure function of the draft and is recomputed on every
//! keystroke. Lengths are counted in characters, not bytes.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;

use crate::draft::RegistrationDraft;
use crate::error::PasswordRequirement;

/// Minimum length of first and last name, measured on the raw input.
pub const MIN_NAME_LENGTH: usize = 2;

/// Minimum password length.
pub const MIN_PASSWORD_LENGTH: usize = 8;

/// Characters that satisfy the special-character requirement.
pub const SPECIAL_CHARS: &str = "!@#$%^&*(),.?\":{}|<>";

static EMAIL_REGEX: Lazy<Regex> = Lazy::new(|| {
    #[allow(clippy::expect_used)]
    Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email pattern is valid")
});

/// Password checks. The five character-class checks feed the strength
/// score; `passwords_match` only gates submission.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct PasswordReport {
    pub has_min_length: bool,
    pub has_upper_case: bool,
    pub has_lower_case: bool,
    pub has_number: bool,
    pub has_special_char: bool,
    pub passwords_match: bool,
}

impl PasswordReport {
    /// Evaluate a password and its confirmation.
    #[must_use]
    pub fn evaluate(password: &str, confirm: &str) -> Self {
        Self {
            has_min_length: password.chars().count() >= MIN_PASSWORD_LENGTH,
            has_upper_case: password.chars().any(|c| c.is_ascii_uppercase()),
            has_lower_case: password.chars().any(|c| c.is_ascii_lowercase()),
            has_number: password.chars().any(|c| c.is_ascii_digit()),
            has_special_char: password.chars().any(|c| SPECIAL_CHARS.contains(c)),
            passwords_match: !password.is_empty() && password == confirm,
        }
    }

    /// The five character-class predicates, in scoring order.
    #[must_use]
    pub const fn character_classes(&self) -> [bool; 5] {
        [
            self.has_min_length,
            self.has_upper_case,
            self.has_lower_case,
            self.has_number,
            self.has_special_char,
        ]
    }

    /// Number of character-class predicates that hold.
    #[must_use]
    pub fn satisfied_classes(&self) -> usize {
        self.character_classes().iter().filter(|ok| **ok).count()
    }

    /// Whether every check, including the match, holds.
    #[must_use]
    pub fn all_met(&self) -> bool {
        self.unmet().is_empty()
    }

    /// Failed checks, in the order the form lists them.
    #[must_use]
    pub fn unmet(&self) -> Vec<PasswordRequirement> {
        [
            (self.has_min_length, PasswordRequirement::MinLength),
            (self.has_upper_case, PasswordRequirement::UpperCase),
            (self.has_lower_case, PasswordRequirement::LowerCase),
            (self.has_number, PasswordRequirement::Number),
            (self.has_special_char, PasswordRequirement::SpecialChar),
            (self.passwords_match, PasswordRequirement::PasswordsMatch),
        ]
        .into_iter()
        .filter_map(|(ok, req)| (!ok).then_some(req))
        .collect()
    }
}

/// Derived pass/fail state of every field.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ValidationReport {
    pub first_name_valid: bool,
    pub last_name_valid: bool,
    pub email_valid: bool,
    pub password: PasswordReport,
}

impl ValidationReport {
    /// Whether every field and every password check holds.
    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.first_name_valid && self.last_name_valid && self.email_valid && self.password.all_met()
    }
}

/// Validate a name. The raw string is measured, so `" a"` passes.
///
/// Length counts Unicode scalar values: `"😀"` is one character and fails,
/// even though it spans two UTF-16 units.
#[must_use]
pub fn name_valid(name: &str) -> bool {
    name.chars().count() >= MIN_NAME_LENGTH
}

/// Validate an email address against `local@domain.tld` with no whitespace.
#[must_use]
pub fn email_valid(email: &str) -> bool {
    EMAIL_REGEX.is_match(email)
}

/// Compute the validation report for a draft.
#[must_use]
pub fn validate(draft: &RegistrationDraft) -> ValidationReport {
    ValidationReport {
        first_name_valid: name_valid(&draft.first_name),
        last_name_valid: name_valid(&draft.last_name),
        email_valid: email_valid(&draft.email),
        password: PasswordReport::evaluate(&draft.password, &draft.confirm_password),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::draft::DraftField;

    #[test]
    fn name_length_threshold() {
        assert!(!name_valid(""));
        assert!(!name_valid("J"));
        assert!(name_valid("Jo"));
        assert!(name_valid("Johnathan"));
        assert!(name_valid("Łu"));
    }

    #[test]
    fn name_is_measured_untrimmed() {
        assert!(name_valid(" J"));
        assert!(name_valid("  "));
    }

    #[test]
    fn name_length_counts_scalar_values() {
        assert!(!name_valid("😀"));
        assert!(name_valid("😀😀"));
        // combining mark is its own scalar value
        assert!(name_valid("e\u{301}"));
    }

    #[test]
    fn email_shapes() {
        assert!(email_valid("a@b.co"));
        assert!(email_valid("first.last+tag@sub.example.org"));
        assert!(!email_valid("a@b"));
        assert!(!email_valid("a b@c.com"));
        assert!(!email_valid("@b.co"));
        assert!(!email_valid("a@@b.co"));
        assert!(!email_valid(""));
    }

    #[test]
    fn strong_password_meets_every_class() {
        let report = PasswordReport::evaluate("Abcdef1!", "");
        assert_eq!(report.character_classes(), [true; 5]);
        assert!(!report.passwords_match);
    }

    #[test]
    fn lowercase_only_password() {
        let report = PasswordReport::evaluate("abcdefgh", "abcdefgh");
        assert!(report.has_min_length);
        assert!(report.has_lower_case);
        assert!(!report.has_upper_case);
        assert!(!report.has_number);
        assert!(!report.has_special_char);
        assert_eq!(report.satisfied_classes(), 2);
    }

    #[test]
    fn special_char_set_is_exact() {
        for c in SPECIAL_CHARS.chars() {
            assert!(PasswordReport::evaluate(&c.to_string(), "").has_special_char);
        }
        assert!(!PasswordReport::evaluate("-_=+~`'[];/\\", "").has_special_char);
    }

    #[test]
    fn non_ascii_letters_do_not_count_as_case() {
        let report = PasswordReport::evaluate("ÄÖÜäöü", "");
        assert!(!report.has_upper_case);
        assert!(!report.has_lower_case);
    }

    #[test]
    fn passwords_match_requires_non_empty() {
        assert!(PasswordReport::evaluate("X1!aaaaa", "X1!aaaaa").passwords_match);
        assert!(!PasswordReport::evaluate("X1!aaaaa", "").passwords_match);
        assert!(!PasswordReport::evaluate("", "").passwords_match);
    }

    #[test]
    fn unmet_lists_failures_in_form_order() {
        let report = PasswordReport::evaluate("abc", "abd");
        assert_eq!(
            report.unmet(),
            vec![
                PasswordRequirement::MinLength,
                PasswordRequirement::UpperCase,
                PasswordRequirement::Number,
                PasswordRequirement::SpecialChar,
                PasswordRequirement::PasswordsMatch,
            ]
        );
    }

    #[test]
    fn report_tracks_each_draft_update() {
        let draft = RegistrationDraft::new().with(DraftField::FirstName, "J");
        assert!(!validate(&draft).first_name_valid);
        let draft = draft.with(DraftField::FirstName, "Jo");
        assert!(validate(&draft).first_name_valid);
        assert_eq!(validate(&draft), validate(&draft.clone()));
    }

    #[test]
    fn complete_draft_is_valid() {
        let draft = RegistrationDraft {
            first_name: "Jo".into(),
            last_name: "Do".into(),
            email: "jo@do.com".into(),
            password: "Passw0rd!".into(),
            confirm_password: "Passw0rd!".into(),
        };
        assert!(validate(&draft).is_valid());
    }
}
