//! Registration draft: the five text fields of the sign-up form.
//!
//! A draft is a plain value. Updates never mutate in place; [`RegistrationDraft::with`]
//! returns the next draft, so every report derived from a draft is derived
//! from a value nobody else can change underneath it.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// In-progress sign-up data before submission.
#[derive(Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RegistrationDraft {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub password: String,
    pub confirm_password: String,
}

/// Addressable field of a [`RegistrationDraft`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum DraftField {
    FirstName,
    LastName,
    Email,
    Password,
    ConfirmPassword,
}

impl DraftField {
    /// All fields in form order.
    pub const ALL: [Self; 5] = [
        Self::FirstName,
        Self::LastName,
        Self::Email,
        Self::Password,
        Self::ConfirmPassword,
    ];

    /// Whether the field holds a secret that must not be logged.
    #[must_use]
    pub const fn is_secret(self) -> bool {
        matches!(self, Self::Password | Self::ConfirmPassword)
    }
}

impl fmt::Display for DraftField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::FirstName => "firstName",
            Self::LastName => "lastName",
            Self::Email => "email",
            Self::Password => "password",
            Self::ConfirmPassword => "confirmPassword",
        };
        f.write_str(name)
    }
}

impl FromStr for DraftField {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "firstName" | "first_name" => Ok(Self::FirstName),
            "lastName" | "last_name" => Ok(Self::LastName),
            "email" => Ok(Self::Email),
            "password" => Ok(Self::Password),
            "confirmPassword" | "confirm_password" => Ok(Self::ConfirmPassword),
            other => Err(format!("unknown form field: {other}")),
        }
    }
}

impl RegistrationDraft {
    /// An empty draft, as created when the form mounts.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Return the draft with one field replaced.
    #[must_use]
    pub fn with(&self, field: DraftField, value: impl Into<String>) -> Self {
        let mut next = self.clone();
        *next.slot_mut(field) = value.into();
        next
    }

    /// Current value of a field.
    #[must_use]
    pub fn get(&self, field: DraftField) -> &str {
        match field {
            DraftField::FirstName => &self.first_name,
            DraftField::LastName => &self.last_name,
            DraftField::Email => &self.email,
            DraftField::Password => &self.password,
            DraftField::ConfirmPassword => &self.confirm_password,
        }
    }

    /// Whether every field is still empty.
    #[must_use]
    pub fn is_blank(&self) -> bool {
        DraftField::ALL.iter().all(|f| self.get(*f).is_empty())
    }

    fn slot_mut(&mut self, field: DraftField) -> &mut String {
        match field {
            DraftField::FirstName => &mut self.first_name,
            DraftField::LastName => &mut self.last_name,
            DraftField::Email => &mut self.email,
            DraftField::Password => &mut self.password,
            DraftField::ConfirmPassword => &mut self.confirm_password,
        }
    }
}

// Secret fields stay out of logs and panic messages.
impl fmt::Debug for RegistrationDraft {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut out = f.debug_struct("RegistrationDraft");
        for field in DraftField::ALL {
            let name = field.to_string();
            if field.is_secret() {
                out.field(&name, &"[redacted]");
            } else {
                out.field(&name, &self.get(field));
            }
        }
        out.finish()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn with_leaves_original_untouched() {
        let empty = RegistrationDraft::new();
        let next = empty.with(DraftField::Email, "jo@do.com");
        assert!(empty.is_blank());
        assert_eq!(next.get(DraftField::Email), "jo@do.com");
        assert_eq!(next.get(DraftField::Password), "");
    }

    #[test]
    fn debug_redacts_passwords() {
        let draft = RegistrationDraft::new()
            .with(DraftField::Password, "hunter2!")
            .with(DraftField::ConfirmPassword, "hunter2!");
        let out = format!("{draft:?}");
        assert!(!out.contains("hunter2"));
        assert!(out.contains("[redacted]"));
    }

    #[test]
    fn debug_shows_only_public_fields() {
        let draft = RegistrationDraft {
            first_name: "Jo".into(),
            last_name: "Do".into(),
            email: "jo@do.com".into(),
            password: "Passw0rd!".into(),
            confirm_password: "Passw0rd?".into(),
        };
        let out = format!("{draft:?}");
        for field in DraftField::ALL {
            let value = draft.get(field);
            assert_eq!(out.contains(value), !field.is_secret(), "{field}: {out}");
        }
        assert_eq!(out.matches("[redacted]").count(), 2);
    }

    #[test]
    fn field_names_parse_both_cases() {
        assert_eq!("firstName".parse::<DraftField>(), Ok(DraftField::FirstName));
        assert_eq!(
            "confirm_password".parse::<DraftField>(),
            Ok(DraftField::ConfirmPassword)
        );
        assert!("nickname".parse::<DraftField>().is_err());
    }

    #[test]
    fn deserializes_camel_case_with_missing_fields() {
        let draft: RegistrationDraft =
            serde_json::from_str(r#"{"firstName":"Jo","email":"jo@do.com"}"#).unwrap();
        assert_eq!(draft.first_name, "Jo");
        assert_eq!(draft.email, "jo@do.com");
        assert!(draft.password.is_empty());
    }
}
