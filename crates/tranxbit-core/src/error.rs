//! Error types for `tranxbit-core`.
//!
//! Registration errors are all locally recoverable: the user edits the
//! offending field and the report updates. Variants never carry the password
//! itself, only which requirement failed.

use std::fmt;

use serde::Serialize;

/// A name field on the registration form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum NameField {
    FirstName,
    LastName,
}

impl fmt::Display for NameField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::FirstName => write!(f, "first name"),
            Self::LastName => write!(f, "last name"),
        }
    }
}

/// One of the six checks that make up the password report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PasswordRequirement {
    MinLength,
    UpperCase,
    LowerCase,
    Number,
    SpecialChar,
    PasswordsMatch,
}

impl fmt::Display for PasswordRequirement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MinLength => write!(f, "at least 8 characters"),
            Self::UpperCase => write!(f, "at least 1 uppercase letter"),
            Self::LowerCase => write!(f, "at least 1 lowercase letter"),
            Self::Number => write!(f, "at least 1 number"),
            Self::SpecialChar => write!(f, "at least 1 special character"),
            Self::PasswordsMatch => write!(f, "passwords match"),
        }
    }
}

/// Identity value a password must not repeat.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Identity {
    Email,
    Name,
}

impl fmt::Display for Identity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Email => write!(f, "email"),
            Self::Name => write!(f, "name"),
        }
    }
}

/// Reasons the submission guard rejects a draft.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RegistrationError {
    /// First or last name is shorter than two characters.
    #[error("name too short")]
    FieldTooShort { field: NameField },

    /// Email does not look like `local@domain.tld`.
    #[error("invalid email")]
    InvalidEmailFormat,

    /// One or more password checks failed.
    #[error("password requirements not met")]
    PasswordRequirementUnmet { unmet: Vec<PasswordRequirement> },

    /// Password repeats the email or a name.
    #[error("password same as {identity}")]
    PasswordEqualsIdentity { identity: Identity },
}

impl RegistrationError {
    /// Short machine-stable reason, identical to the `Display` output.
    #[must_use]
    pub fn reason(&self) -> String {
        self.to_string()
    }

    /// Sentence shown to the user next to the submit button.
    #[must_use]
    pub const fn user_message(&self) -> &'static str {
        match self {
            Self::FieldTooShort { .. } => "First and last name must be at least 2 characters",
            Self::InvalidEmailFormat => "Please enter a valid email address",
            Self::PasswordRequirementUnmet { .. } => {
                "Please ensure your password meets all requirements"
            }
            Self::PasswordEqualsIdentity {
                identity: Identity::Email,
            } => "Password cannot be the same as your email",
            Self::PasswordEqualsIdentity {
                identity: Identity::Name,
            } => "Password cannot be your name",
        }
    }
}

/// Errors from a submit attempt.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SubmitError {
    /// The guard rejected the draft; the registrar was never called.
    #[error("{0}")]
    Rejected(#[from] RegistrationError),

    /// The authentication service refused or failed. Message is shown verbatim.
    #[error("{0}")]
    Service(String),

    /// The form was unmounted while the request was in flight.
    #[error("submission cancelled")]
    Cancelled,
}

/// Errors from the buy-card selection widget.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CatalogError {
    /// No brand with this slug is offered.
    #[error("unknown brand: {slug}")]
    UnknownBrand { slug: String },

    /// The amount is not one of the offered denominations.
    #[error("unsupported amount: ${amount}")]
    UnknownDenomination { amount: u32 },
}

/// Errors from landing content lookups.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ContentError {
    /// FAQ index is out of range.
    #[error("no FAQ entry at index {index} (have {len})")]
    UnknownFaq { index: usize, len: usize },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reasons_match_guard_wording() {
        let cases = [
            (
                RegistrationError::FieldTooShort {
                    field: NameField::LastName,
                },
                "name too short",
            ),
            (RegistrationError::InvalidEmailFormat, "invalid email"),
            (
                RegistrationError::PasswordRequirementUnmet {
                    unmet: vec![PasswordRequirement::Number],
                },
                "password requirements not met",
            ),
            (
                RegistrationError::PasswordEqualsIdentity {
                    identity: Identity::Email,
                },
                "password same as email",
            ),
            (
                RegistrationError::PasswordEqualsIdentity {
                    identity: Identity::Name,
                },
                "password same as name",
            ),
        ];
        for (err, reason) in cases {
            assert_eq!(err.reason(), reason);
        }
    }

    #[test]
    fn rejected_submit_displays_guard_reason() {
        let err = SubmitError::from(RegistrationError::InvalidEmailFormat);
        assert_eq!(err.to_string(), "invalid email");
    }
}
