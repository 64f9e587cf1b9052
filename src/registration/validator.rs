//! Field rules for the registration draft.
//!
//! Each rule yields at most one error per field. Only `confirmPassword`
//! looks at another field.

use std::collections::BTreeMap;

use once_cell::sync::Lazy;
use regex::Regex;
use thiserror::Error;

use super::{Field, RegistrationDraft};

/// Minimum password length, in characters
pub const MIN_PASSWORD_LENGTH: usize = 6;

const EMAIL_REGEX: &str = r"^[a-zA-Z0-9.!#$%&'*+/=?^_`{|}~-]+@[a-zA-Z0-9](?:[a-zA-Z0-9-]{0,61}[a-zA-Z0-9])?(?:\.[a-zA-Z0-9](?:[a-zA-Z0-9-]{0,61}[a-zA-Z0-9])?)*$";

/// `None` only if the pattern fails to compile; every email is then invalid
static EMAIL_PATTERN: Lazy<Option<Regex>> = Lazy::new(|| match Regex::new(EMAIL_REGEX) {
    Ok(re) => Some(re),
    Err(e) => {
        tracing::error!(error = %e, "Failed to compile email pattern");
        None
    }
});

fn is_valid_email(value: &str) -> bool {
    EMAIL_PATTERN
        .as_ref()
        .is_some_and(|re| re.is_match(value))
}

/// A failed field rule. `Display` is the message shown under the field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum FieldError {
    #[error("Campo obligatorio")]
    Required,

    #[error("Email inválido")]
    InvalidEmail,

    #[error("La contraseña debe tener al menos {min} caracteres")]
    TooShort { min: usize },

    #[error("Las contraseñas no coinciden")]
    Mismatch,
}

/// Per-field errors, ordered by field
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationErrors(BTreeMap<Field, FieldError>);

impl ValidationErrors {
    pub fn get(&self, field: Field) -> Option<FieldError> {
        self.0.get(&field).copied()
    }

    pub fn contains(&self, field: Field) -> bool {
        self.0.contains_key(&field)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (Field, FieldError)> + '_ {
        self.0.iter().map(|(f, e)| (*f, *e))
    }

    /// First failing field in form order
    pub fn first_field(&self) -> Option<Field> {
        self.0.keys().next().copied()
    }

    /// Errors keyed by field key with their messages, for reports
    pub fn messages(&self) -> BTreeMap<&'static str, String> {
        self.iter().map(|(f, e)| (f.key(), e.to_string())).collect()
    }
}

/// Validate one field against the current draft
pub fn validate_field(draft: &RegistrationDraft, field: Field) -> Option<FieldError> {
    let value = draft.get(field);
    if value.is_empty() {
        return Some(FieldError::Required);
    }

    match field {
        Field::FirstName | Field::LastName => None,
        Field::Email => (!is_valid_email(value)).then_some(FieldError::InvalidEmail),
        Field::Password => (value.chars().count() < MIN_PASSWORD_LENGTH).then_some(
            FieldError::TooShort {
                min: MIN_PASSWORD_LENGTH,
            },
        ),
        Field::ConfirmPassword => (value != draft.password).then_some(FieldError::Mismatch),
    }
}

/// Validate a subset of fields, e.g. the ones shown on one step
pub fn validate_fields(draft: &RegistrationDraft, fields: &[Field]) -> ValidationErrors {
    ValidationErrors(
        fields
            .iter()
            .filter_map(|f| validate_field(draft, *f).map(|e| (*f, e)))
            .collect(),
    )
}

/// Validate the whole draft
pub fn validate(draft: &RegistrationDraft) -> ValidationErrors {
    validate_fields(draft, Field::all())
}
