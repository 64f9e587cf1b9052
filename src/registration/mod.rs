//! Registration draft and its field catalogue

use std::fmt;
use std::path::Path;

use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};

pub mod validator;

pub use validator::{
    validate, validate_field, validate_fields, FieldError, ValidationErrors, MIN_PASSWORD_LENGTH,
};

/// How a field is entered and displayed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    /// Free text
    Text,
    /// Email address
    Email,
    /// Masked input, never echoed outside its own step
    Secret,
}

/// One input of the registration form
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Field {
    FirstName,
    LastName,
    Email,
    Password,
    ConfirmPassword,
}

impl Field {
    /// All fields in form order
    pub fn all() -> &'static [Field] {
        &[
            Field::FirstName,
            Field::LastName,
            Field::Email,
            Field::Password,
            Field::ConfirmPassword,
        ]
    }

    /// Key used in draft files and error reports
    pub fn key(&self) -> &'static str {
        match self {
            Field::FirstName => "firstName",
            Field::LastName => "lastName",
            Field::Email => "email",
            Field::Password => "password",
            Field::ConfirmPassword => "confirmPassword",
        }
    }

    /// Label shown next to the input
    pub fn label(&self) -> &'static str {
        match self {
            Field::FirstName => "Nombre:",
            Field::LastName => "Apellido:",
            Field::Email => "Email:",
            Field::Password => "Contraseña:",
            Field::ConfirmPassword => "Confirmar contraseña:",
        }
    }

    pub fn kind(&self) -> FieldKind {
        match self {
            Field::FirstName | Field::LastName => FieldKind::Text,
            Field::Email => FieldKind::Email,
            Field::Password | Field::ConfirmPassword => FieldKind::Secret,
        }
    }

    pub fn is_secret(&self) -> bool {
        self.kind() == FieldKind::Secret
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// The in-progress set of values a user enters across the wizard.
///
/// All fields start empty. `Debug` redacts both password fields so drafts can
/// be logged safely.
#[derive(Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RegistrationDraft {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub password: String,
    pub confirm_password: String,
}

impl RegistrationDraft {
    pub fn get(&self, field: Field) -> &str {
        match field {
            Field::FirstName => &self.first_name,
            Field::LastName => &self.last_name,
            Field::Email => &self.email,
            Field::Password => &self.password,
            Field::ConfirmPassword => &self.confirm_password,
        }
    }

    pub fn set(&mut self, field: Field, value: impl Into<String>) {
        let slot = match field {
            Field::FirstName => &mut self.first_name,
            Field::LastName => &mut self.last_name,
            Field::Email => &mut self.email,
            Field::Password => &mut self.password,
            Field::ConfirmPassword => &mut self.confirm_password,
        };
        *slot = value.into();
    }

    /// Whether every field still holds its default
    pub fn is_blank(&self) -> bool {
        Field::all().iter().all(|f| self.get(*f).is_empty())
    }

    /// Read a draft from a JSON, TOML or YAML file, chosen by extension.
    /// Missing keys stay empty.
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read draft file {}", path.display()))?;

        let extension = path
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_ascii_lowercase);

        let draft: Self = match extension.as_deref() {
            Some("json") => serde_json::from_str(&content)
                .with_context(|| format!("Invalid JSON draft in {}", path.display()))?,
            Some("toml") => toml::from_str(&content)
                .with_context(|| format!("Invalid TOML draft in {}", path.display()))?,
            Some("yaml") | Some("yml") => serde_yaml::from_str(&content)
                .with_context(|| format!("Invalid YAML draft in {}", path.display()))?,
            _ => bail!(
                "Unsupported draft file {}: expected .json, .toml or .yaml",
                path.display()
            ),
        };
        Ok(draft)
    }
}

impl fmt::Debug for RegistrationDraft {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RegistrationDraft")
            .field("first_name", &self.first_name)
            .field("last_name", &self.last_name)
            .field("email", &self.email)
            .field("password", &"<redacted>")
            .field("confirm_password", &"<redacted>")
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn draft_file(suffix: &str, content: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::Builder::new().suffix(suffix).tempfile().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_from_file_by_extension() {
        let json = draft_file(".json", r#"{"firstName":"Ana","confirmPassword":"secret1"}"#);
        let draft = RegistrationDraft::from_file(json.path()).unwrap();
        assert_eq!(draft.first_name, "Ana");
        assert_eq!(draft.confirm_password, "secret1");

        let toml = draft_file(".toml", "lastName = \"Diaz\"\nemail = \"ana@x.com\"\n");
        let draft = RegistrationDraft::from_file(toml.path()).unwrap();
        assert_eq!(draft.last_name, "Diaz");
        assert_eq!(draft.email, "ana@x.com");

        let yaml = draft_file(".yml", "password: secret1\n");
        let draft = RegistrationDraft::from_file(yaml.path()).unwrap();
        assert_eq!(draft.password, "secret1");
    }

    #[test]
    fn test_from_file_rejects_unknown_extension() {
        let txt = draft_file(".txt", "firstName=Ana");
        let err = RegistrationDraft::from_file(txt.path()).unwrap_err();
        assert!(err.to_string().contains("Unsupported draft file"));
    }

    #[test]
    fn test_default_draft_is_blank() {
        let draft = RegistrationDraft::default();
        assert!(draft.is_blank());
        for field in Field::all() {
            assert_eq!(draft.get(*field), "");
        }
    }

    #[test]
    fn test_set_and_get_roundtrip_per_field() {
        let mut draft = RegistrationDraft::default();
        draft.set(Field::LastName, "Diaz");
        assert_eq!(draft.last_name, "Diaz");
        assert_eq!(draft.get(Field::LastName), "Diaz");
        assert!(!draft.is_blank());
    }

    #[test]
    fn test_field_keys_match_serde_names() {
        let json = serde_json::to_value(RegistrationDraft::default()).unwrap();
        for field in Field::all() {
            assert!(json.get(field.key()).is_some(), "missing {}", field.key());
        }
    }

    #[test]
    fn test_debug_redacts_passwords() {
        let draft = RegistrationDraft {
            first_name: "Ana".to_string(),
            password: "hunter22".to_string(),
            confirm_password: "hunter22".to_string(),
            ..Default::default()
        };
        let rendered = format!("{draft:?}");
        assert!(rendered.contains("Ana"));
        assert!(!rendered.contains("hunter22"));
    }

    #[test]
    fn test_draft_reads_camel_case_json() {
        let json = r#"{"firstName":"Ana","lastName":"Diaz","email":"ana@x.com"}"#;
        let draft: RegistrationDraft = serde_json::from_str(json).unwrap();
        assert_eq!(draft.first_name, "Ana");
        assert_eq!(draft.email, "ana@x.com");
        assert_eq!(draft.password, "");
    }

    #[test]
    fn test_only_password_fields_are_secret() {
        let secret: Vec<Field> = Field::all()
            .iter()
            .copied()
            .filter(Field::is_secret)
            .collect();
        assert_eq!(secret, vec![Field::Password, Field::ConfirmPassword]);
    }
}
