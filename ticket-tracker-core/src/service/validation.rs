//!
//! Normalization and validation of user provided text fields.
//!
//! Every function trims the input and returns the value
//! that should be stored.
//!

use crate::error::Error;
use regex::Regex;
use std::sync::LazyLock;

pub const DEFAULT_DEPARTMENT: &str = "IT Support";

static EMAIL_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email regex must compile")
});

fn char_count_between(value: &str, min: usize, max: usize) -> bool {
    let count = value.chars().count();
    count >= min && count <= max
}

pub fn name(name: &str) -> Result<String, Error> {
    let name = name.trim();
    match char_count_between(name, 2, 50) {
        true => Ok(name.to_string()),
        false => Err(Error::Validation("name must be between 2 and 50 characters")),
    }
}

///
/// Emails are compared case-insensitively so they are stored lowercased
///
pub fn email(email: &str) -> Result<String, Error> {
    let email = email.trim().to_lowercase();
    match EMAIL_REGEX.is_match(&email) {
        true => Ok(email),
        false => Err(Error::Validation("please provide a valid email")),
    }
}

pub fn password(password: &str) -> Result<(), Error> {
    match password.chars().count() >= 6 {
        true => Ok(()),
        false => Err(Error::Validation("password must be at least 6 characters")),
    }
}

pub fn department(department: Option<&str>) -> String {
    match department.map(str::trim) {
        Some(department) if !department.is_empty() => department.to_string(),
        _ => DEFAULT_DEPARTMENT.to_string(),
    }
}

pub fn title(title: &str) -> Result<String, Error> {
    let title = title.trim();
    match char_count_between(title, 3, 100) {
        true => Ok(title.to_string()),
        false => Err(Error::Validation("title must be between 3 and 100 characters")),
    }
}

pub fn customer(customer: &str) -> Result<String, Error> {
    let customer = customer.trim();
    match customer.is_empty() {
        true => Err(Error::Validation("customer is required")),
        false => Ok(customer.to_string()),
    }
}

pub fn description(description: &str) -> Result<String, Error> {
    let description = description.trim();
    match description.chars().count() >= 5 {
        true => Ok(description.to_string()),
        false => Err(Error::Validation("description must be at least 5 characters")),
    }
}

pub fn task_text(text: &str) -> Result<String, Error> {
    let text = text.trim();
    match text.is_empty() {
        true => Err(Error::Validation("task text is required")),
        false => Ok(text.to_string()),
    }
}

pub fn comment_text(text: &str) -> Result<String, Error> {
    let text = text.trim();
    match text.is_empty() {
        true => Err(Error::Validation("comment text is required")),
        false => Ok(text.to_string()),
    }
}
