//! Structural validation of request payloads, applied at the boundary
//! before anything reaches the use cases. Produces a tagged success/failure
//! result with field-level issues instead of bailing on the first problem.

use crate::model::{NewUser, UserPatch};
use serde::Serialize;
use serde_json::Value;

/// One rejected field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Issue {
    /// Field the problem was found on (`"body"` for whole-payload rules).
    pub field: &'static str,
    /// What was wrong with it.
    pub message: &'static str,
}

impl Issue {
    fn new(field: &'static str, message: &'static str) -> Self {
        Self { field, message }
    }
}

/// Validate a create payload: both fields required, email well-formed,
/// name non-empty after trimming.
pub fn new_user(body: &Value) -> Result<NewUser, Vec<Issue>> {
    let mut issues = Vec::new();

    let email = required_str(body, "email", &mut issues);
    let name = required_str(body, "name", &mut issues);

    if let Some(email) = &email {
        check_email(email, "email", &mut issues);
    }
    if let Some(name) = &name {
        check_name(name, "name", &mut issues);
    }

    match (email, name) {
        (Some(email), Some(name)) if issues.is_empty() => Ok(NewUser { email, name }),
        _ => Err(issues),
    }
}

/// Validate a patch payload: both fields optional, but at least one must be
/// present, and any present field obeys the same rules as on create.
pub fn user_patch(body: &Value) -> Result<UserPatch, Vec<Issue>> {
    let mut issues = Vec::new();

    let email = optional_str(body, "email", &mut issues);
    let name = optional_str(body, "name", &mut issues);

    if let Some(Some(email)) = &email {
        check_email(email, "email", &mut issues);
    }
    if let Some(Some(name)) = &name {
        check_name(name, "name", &mut issues);
    }

    if matches!((&email, &name), (Some(None), Some(None))) {
        issues.push(Issue::new("body", "at least one field must be provided"));
    }

    match (email, name) {
        (Some(email), Some(name)) if issues.is_empty() => Ok(UserPatch { email, name }),
        _ => Err(issues),
    }
}

/// Validate a bare email value, as used by the `/by-email/{email}` route.
pub fn email_param(value: &str) -> Result<(), Vec<Issue>> {
    let mut issues = Vec::new();
    check_email(value, "email", &mut issues);
    if issues.is_empty() {
        Ok(())
    } else {
        Err(issues)
    }
}

// Structural email shape: exactly one '@' with non-empty sides and a dotted
// domain. Full RFC 5322 parsing is deliberately out of reach here.
fn check_email(value: &str, field: &'static str, issues: &mut Vec<Issue>) {
    let trimmed = value.trim();
    let well_formed = match trimmed.split_once('@') {
        Some((local, domain)) => {
            !local.is_empty()
                && !domain.is_empty()
                && !domain.contains('@')
                && domain.contains('.')
                && !trimmed.chars().any(char::is_whitespace)
        }
        None => false,
    };
    if !well_formed {
        issues.push(Issue::new(field, "must be a valid email address"));
    }
}

fn check_name(value: &str, field: &'static str, issues: &mut Vec<Issue>) {
    if value.trim().is_empty() {
        issues.push(Issue::new(field, "must not be empty"));
    }
}

fn required_str(body: &Value, field: &'static str, issues: &mut Vec<Issue>) -> Option<String> {
    match body.get(field) {
        Some(Value::String(s)) => Some(s.clone()),
        Some(_) => {
            issues.push(Issue::new(field, "must be a string"));
            None
        }
        None => {
            issues.push(Issue::new(field, "is required"));
            None
        }
    }
}

// Outer None = invalid type (issue already recorded); Some(None) = absent.
fn optional_str(
    body: &Value,
    field: &'static str,
    issues: &mut Vec<Issue>,
) -> Option<Option<String>> {
    match body.get(field) {
        Some(Value::String(s)) => Some(Some(s.clone())),
        Some(_) => {
            issues.push(Issue::new(field, "must be a string"));
            None
        }
        None => Some(None),
    }
}
