//! Sign-up and sign-in form validation

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::{Credentials, SignUpRequest};

/// Form inputs that can carry a validation message
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Field {
    Name,
    Email,
    Password,
    ConfirmPassword,
}

impl Field {
    pub fn as_str(&self) -> &'static str {
        match self {
            Field::Name => "name",
            Field::Email => "email",
            Field::Password => "password",
            Field::ConfirmPassword => "confirmPassword",
        }
    }
}

/// Validation message attached to one field
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct FieldError {
    pub field: Field,
    pub message: &'static str,
}

impl FieldError {
    fn new(field: Field, message: &'static str) -> Self {
        Self { field, message }
    }
}

/// Raw sign-up inputs as typed by the user
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SignUpForm {
    pub name: String,
    pub email: String,
    pub password: String,
    pub confirm_password: String,
}

impl SignUpForm {
    /// Check every field; name and e-mail come back trimmed
    pub fn validate(&self) -> Result<SignUpRequest, Vec<FieldError>> {
        let mut errors = Vec::new();

        let name = self.name.trim();
        if name.is_empty() {
            errors.push(FieldError::new(Field::Name, "Name is required"));
        }
        let email = self.email.trim();
        if !is_valid_email(email) {
            errors.push(FieldError::new(Field::Email, "Invalid email address"));
        }
        if self.password.is_empty() {
            errors.push(FieldError::new(Field::Password, "Password is required"));
        }
        if self.confirm_password.is_empty() {
            errors.push(FieldError::new(
                Field::ConfirmPassword,
                "Confirm password is required",
            ));
        }

        // Mismatch is only checked once the field-level rules pass
        if errors.is_empty() && self.password != self.confirm_password {
            errors.push(FieldError::new(
                Field::ConfirmPassword,
                "Passwords do not match",
            ));
        }

        if !errors.is_empty() {
            return Err(errors);
        }
        Ok(SignUpRequest {
            name: name.to_string(),
            email: email.to_string(),
            password: self.password.clone(),
        })
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SignInForm {
    pub email: String,
    pub password: String,
}

impl SignInForm {
    pub fn validate(&self) -> Result<Credentials, Vec<FieldError>> {
        let mut errors = Vec::new();

        let email = self.email.trim();
        if !is_valid_email(email) {
            errors.push(FieldError::new(Field::Email, "Invalid email address"));
        }
        if self.password.is_empty() {
            errors.push(FieldError::new(Field::Password, "Password is required"));
        }

        if !errors.is_empty() {
            return Err(errors);
        }
        Ok(Credentials {
            email: email.to_string(),
            password: self.password.clone(),
        })
    }
}

/// Pragmatic address check: `local@label.label...tld`
///
/// Local part: letters, digits and `_ ' + - .`, no leading dot, no `..`,
/// ending on a letter, digit, `_`, `+` or `-`. Domain labels start with a
/// letter or digit and contain only those and `-`; the last label is at
/// least two letters.
pub fn is_valid_email(email: &str) -> bool {
    let Some((local, domain)) = email.split_once('@') else {
        return false;
    };
    if domain.contains('@') {
        return false;
    }

    let local_ok = !local.is_empty()
        && !local.starts_with('.')
        && !local.contains("..")
        && local
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || "_'+-.".contains(c))
        && local
            .chars()
            .last()
            .is_some_and(|c| c.is_ascii_alphanumeric() || "_+-".contains(c));
    if !local_ok {
        return false;
    }

    let labels: Vec<&str> = domain.split('.').collect();
    if labels.len() < 2 {
        return false;
    }
    let (hosts, tld) = labels.split_at(labels.len() - 1);
    let hosts_ok = hosts.iter().all(|label| {
        label
            .chars()
            .next()
            .is_some_and(|c| c.is_ascii_alphanumeric())
            && label.chars().all(|c| c.is_ascii_alphanumeric() || c == '-')
    });
    hosts_ok && tld[0].len() >= 2 && tld[0].chars().all(|c| c.is_ascii_alphabetic())
}
