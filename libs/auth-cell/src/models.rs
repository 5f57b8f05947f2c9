use std::collections::BTreeMap;
use std::fmt;
use std::sync::OnceLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

pub const MIN_PASSWORD_LENGTH: usize = 8;

fn email_regex() -> &'static Regex {
    static EMAIL: OnceLock<Regex> = OnceLock::new();
    EMAIL.get_or_init(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("valid email regex"))
}

/// Sign-up form as typed by the user, confirmation included.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SignUpForm {
    pub first_name: String,
    pub last_name: String,
    pub username: String,
    pub phone_number: String,
    pub email: String,
    pub password: String,
    pub confirm_password: String,
    pub is_doctor: bool,
}

/// Body of `POST /register`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RegisterRequest {
    pub first_name: String,
    pub last_name: String,
    pub username: String,
    pub phone_number: String,
    pub email: String,
    pub password: String,
    pub is_doctor: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum SignUpField {
    Form,
    FirstName,
    LastName,
    Username,
    PhoneNumber,
    Email,
    Password,
    ConfirmPassword,
}

impl SignUpField {
    pub fn as_str(&self) -> &'static str {
        match self {
            SignUpField::Form => "form",
            SignUpField::FirstName => "first_name",
            SignUpField::LastName => "last_name",
            SignUpField::Username => "username",
            SignUpField::PhoneNumber => "phone_number",
            SignUpField::Email => "email",
            SignUpField::Password => "password",
            SignUpField::ConfirmPassword => "confirm_password",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldError {
    Required,
    InvalidEmail,
    PasswordTooShort,
    PasswordMismatch,
}

impl fmt::Display for FieldError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldError::Required => write!(f, "is required"),
            FieldError::InvalidEmail => write!(f, "is not a valid email address"),
            FieldError::PasswordTooShort => write!(
                f,
                "password must contain at least {} characters",
                MIN_PASSWORD_LENGTH
            ),
            FieldError::PasswordMismatch => write!(f, "passwords do not match"),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormErrors(BTreeMap<SignUpField, FieldError>);

impl FormErrors {
    pub fn get(&self, field: SignUpField) -> Option<FieldError> {
        self.0.get(&field).copied()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    fn insert(&mut self, field: SignUpField, error: FieldError) {
        self.0.insert(field, error);
    }
}

impl fmt::Display for FormErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let parts: Vec<String> = self
            .0
            .iter()
            .map(|(field, error)| match field {
                SignUpField::Form => error.to_string(),
                _ => format!("{} {}", field.as_str(), error),
            })
            .collect();
        write!(f, "{}", parts.join("; "))
    }
}

impl SignUpForm {
    /// Checks the form and returns the request body to send.
    ///
    /// A short password is reported on its own, before any field is looked at.
    pub fn validate(&self) -> Result<RegisterRequest, FormErrors> {
        let mut errors = FormErrors::default();

        if self.password.chars().count() < MIN_PASSWORD_LENGTH {
            errors.insert(SignUpField::Form, FieldError::PasswordTooShort);
            return Err(errors);
        }

        let required = [
            (SignUpField::FirstName, &self.first_name),
            (SignUpField::LastName, &self.last_name),
            (SignUpField::Username, &self.username),
            (SignUpField::PhoneNumber, &self.phone_number),
        ];
        for (field, value) in required {
            if value.trim().is_empty() {
                errors.insert(field, FieldError::Required);
            }
        }

        if self.email.trim().is_empty() {
            errors.insert(SignUpField::Email, FieldError::Required);
        } else if !email_regex().is_match(&self.email) {
            errors.insert(SignUpField::Email, FieldError::InvalidEmail);
        }

        if self.password != self.confirm_password {
            errors.insert(SignUpField::ConfirmPassword, FieldError::PasswordMismatch);
        }

        if !errors.is_empty() {
            return Err(errors);
        }

        Ok(RegisterRequest {
            first_name: self.first_name.clone(),
            last_name: self.last_name.clone(),
            username: self.username.clone(),
            phone_number: self.phone_number.clone(),
            email: self.email.clone(),
            password: self.password.clone(),
            is_doctor: self.is_doctor,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_form() -> SignUpForm {
        SignUpForm {
            first_name: "John".to_string(),
            last_name: "Doe".to_string(),
            username: "testuser".to_string(),
            phone_number: "1234567890".to_string(),
            email: "john.doe@example.com".to_string(),
            password: "password123".to_string(),
            confirm_password: "password123".to_string(),
            is_doctor: false,
        }
    }

    #[test]
    fn test_valid_form_drops_confirmation() {
        let request = valid_form().validate().unwrap();
        let body = serde_json::to_value(&request).unwrap();

        assert_eq!(body["username"], "testuser");
        assert_eq!(body["is_doctor"], false);
        assert!(body.get("confirm_password").is_none());
    }

    #[test]
    fn test_short_password_short_circuits() {
        let form = SignUpForm {
            password: "short".to_string(),
            first_name: String::new(),
            ..valid_form()
        };

        let errors = form.validate().unwrap_err();
        assert_eq!(errors.len(), 1);
        assert_eq!(errors.get(SignUpField::Form), Some(FieldError::PasswordTooShort));
        assert_eq!(errors.get(SignUpField::FirstName), None);
    }

    #[test]
    fn test_required_fields() {
        let form = SignUpForm {
            first_name: "  ".to_string(),
            last_name: String::new(),
            username: String::new(),
            phone_number: String::new(),
            email: String::new(),
            ..valid_form()
        };

        let errors = form.validate().unwrap_err();
        for field in [
            SignUpField::FirstName,
            SignUpField::LastName,
            SignUpField::Username,
            SignUpField::PhoneNumber,
            SignUpField::Email,
        ] {
            assert_eq!(errors.get(field), Some(FieldError::Required), "{:?}", field);
        }
    }

    #[test]
    fn test_invalid_email() {
        for email in ["john", "john@", "john@example", "jo hn@example.com"] {
            let form = SignUpForm {
                email: email.to_string(),
                ..valid_form()
            };
            let errors = form.validate().unwrap_err();
            assert_eq!(errors.get(SignUpField::Email), Some(FieldError::InvalidEmail), "{}", email);
        }
    }

    #[test]
    fn test_password_mismatch() {
        let form = SignUpForm {
            confirm_password: "password124".to_string(),
            ..valid_form()
        };
        let errors = form.validate().unwrap_err();
        assert_eq!(errors.get(SignUpField::ConfirmPassword), Some(FieldError::PasswordMismatch));
        assert_eq!(errors.to_string(), "confirm_password passwords do not match");
    }
}
