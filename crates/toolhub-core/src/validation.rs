//! Form validation reporting the first failing field

use crate::ToolDraft;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::OnceLock;
use thiserror::Error;

pub const MIN_PASSWORD_LEN: usize = 6;
pub const MIN_NAME_LEN: usize = 2;

#[derive(Error, Debug, Clone, PartialEq, Eq, Serialize)]
#[error("{message}")]
pub struct ValidationError {
    pub field: &'static str,
    pub message: &'static str,
}

impl ValidationError {
    fn new(field: &'static str, message: &'static str) -> Self {
        Self { field, message }
    }
}

fn email_regex() -> &'static Regex {
    static EMAIL: OnceLock<Regex> = OnceLock::new();
    // local@domain.tld, no whitespace; same strictness as common form libraries
    EMAIL.get_or_init(|| {
        Regex::new(r"^[A-Za-z0-9._%+'-]+@[A-Za-z0-9-]+(\.[A-Za-z0-9-]+)*\.[A-Za-z]{2,}$")
            .unwrap_or_else(|e| panic!("email pattern is a valid regex: {e}"))
    })
}

fn check_email(email: &str) -> Result<(), ValidationError> {
    if email_regex().is_match(email.trim()) {
        Ok(())
    } else {
        Err(ValidationError::new("email", "Invalid email address"))
    }
}

fn check_password(field: &'static str, password: &str) -> Result<(), ValidationError> {
    if password.chars().count() >= MIN_PASSWORD_LEN {
        Ok(())
    } else {
        Err(ValidationError::new(
            field,
            "Password must be at least 6 characters",
        ))
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SignUpForm {
    pub email: String,
    pub password: String,
    #[serde(alias = "fullName")]
    pub full_name: String,
}

impl SignUpForm {
    pub fn validate(&self) -> Result<(), ValidationError> {
        check_email(&self.email)?;
        check_password("password", &self.password)?;
        if self.full_name.trim().chars().count() < MIN_NAME_LEN {
            return Err(ValidationError::new(
                "full_name",
                "Name must be at least 2 characters",
            ));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SignInForm {
    pub email: String,
    pub password: String,
}

impl SignInForm {
    pub fn validate(&self) -> Result<(), ValidationError> {
        check_email(&self.email)?;
        check_password("password", &self.password)
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PasswordResetForm {
    pub email: String,
}

impl PasswordResetForm {
    pub fn validate(&self) -> Result<(), ValidationError> {
        check_email(&self.email)
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PasswordUpdateForm {
    pub password: String,
    #[serde(alias = "confirmPassword")]
    pub confirm_password: String,
}

impl PasswordUpdateForm {
    pub fn validate(&self) -> Result<(), ValidationError> {
        check_password("password", &self.password)?;
        if self.password != self.confirm_password {
            return Err(ValidationError::new(
                "confirm_password",
                "Passwords don't match",
            ));
        }
        Ok(())
    }
}

impl ToolDraft {
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.name.trim().is_empty() {
            return Err(ValidationError::new("name", "Name is required"));
        }
        if self.category.trim().is_empty() {
            return Err(ValidationError::new("category", "Category is required"));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sign_up_reports_first_failing_field() {
        let form = SignUpForm {
            email: "not-an-email".to_string(),
            password: "123".to_string(),
            full_name: "A".to_string(),
        };
        assert_eq!(form.validate().unwrap_err().field, "email");

        let form = SignUpForm {
            email: "ada@example.com".to_string(),
            ..form
        };
        let err = form.validate().unwrap_err();
        assert_eq!(err.field, "password");
        assert_eq!(err.to_string(), "Password must be at least 6 characters");

        let form = SignUpForm {
            password: "hunter22".to_string(),
            ..form
        };
        assert_eq!(
            form.validate().unwrap_err().message,
            "Name must be at least 2 characters"
        );

        let form = SignUpForm {
            full_name: "Ada Lovelace".to_string(),
            ..form
        };
        assert!(form.validate().is_ok());
    }

    #[test]
    fn test_email_shapes() {
        for ok in ["a@b.co", "first.last+tag@sub.example.org"] {
            assert!(check_email(ok).is_ok(), "{ok}");
        }
        for bad in ["", "a@b", "@b.com", "a b@c.com", "a@b.c"] {
            assert!(check_email(bad).is_err(), "{bad}");
        }
    }

    #[test]
    fn test_password_update_mismatch() {
        let form = PasswordUpdateForm {
            password: "secret1".to_string(),
            confirm_password: "secret2".to_string(),
        };
        let err = form.validate().unwrap_err();
        assert_eq!(err.field, "confirm_password");
        assert_eq!(err.message, "Passwords don't match");
    }

    #[test]
    fn test_sign_up_accepts_camel_case_name() {
        let form: SignUpForm = serde_json::from_str(
            r#"{"email":"a@b.co","password":"secret1","fullName":"Ada"}"#,
        )
        .unwrap();
        assert!(form.validate().is_ok());
    }

    #[test]
    fn test_tool_draft_requires_name_then_category() {
        let mut draft = ToolDraft::default();
        assert_eq!(draft.validate().unwrap_err().field, "name");
        draft.name = "Claude".to_string();
        assert_eq!(draft.validate().unwrap_err().field, "category");
        draft.category = "Language Models".to_string();
        assert!(draft.validate().is_ok());
    }
}
