//! Client-side checks run before a form is submitted.

pub const MIN_PASSWORD_LENGTH: usize = 8;

pub fn validate_email(value: &str) -> Result<(), String> {
    let value = value.trim();
    if value.is_empty() {
        Err("Email is required".to_string())
    } else if !value.contains('@') {
        Err("Please enter a valid email".to_string())
    } else {
        Ok(())
    }
}

pub fn validate_required(label: &str, value: &str) -> Result<(), String> {
    if value.trim().is_empty() {
        Err(format!("{} is required", label))
    } else {
        Ok(())
    }
}

/// Login only needs a non-empty password; the server decides the rest.
pub fn validate_login_password(value: &str) -> Result<(), String> {
    validate_required("Password", value)
}

pub fn validate_new_password(value: &str) -> Result<(), String> {
    validate_required("Password", value)?;
    if value.chars().count() < MIN_PASSWORD_LENGTH {
        return Err(format!(
            "Password must be at least {} characters",
            MIN_PASSWORD_LENGTH
        ));
    }
    Ok(())
}

pub fn validate_confirmation(password: &str, confirmation: &str) -> Result<(), String> {
    if confirmation.is_empty() {
        Err("Please confirm your password".to_string())
    } else if password != confirmation {
        Err("Passwords do not match".to_string())
    } else {
        Ok(())
    }
}
