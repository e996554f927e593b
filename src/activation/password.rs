//! Password form and strength policy.

use std::fmt;

use crate::dispatch::{DispatchResult, OperationError};

pub const NEW_PASSWORD_FIELD: &str = "new_password";
pub const CONFIRM_PASSWORD_FIELD: &str = "confirm_password";

/// Minimum-strength rule applied to new passwords.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PasswordPolicy {
    pub min_length: usize,
}

impl Default for PasswordPolicy {
    fn default() -> Self {
        Self { min_length: 8 }
    }
}

impl PasswordPolicy {
    pub fn new(min_length: usize) -> Self {
        Self { min_length }
    }

    /// Check a new password. Length is counted in characters.
    pub fn check(&self, password: &str) -> DispatchResult<()> {
        if password.is_empty() {
            return Err(OperationError::validation("Password is required").on_field(NEW_PASSWORD_FIELD));
        }
        if password.chars().count() < self.min_length {
            return Err(OperationError::validation(format!(
                "Password must be at least {} characters",
                self.min_length
            ))
            .on_field(NEW_PASSWORD_FIELD));
        }
        Ok(())
    }
}

/// The two password inputs. Values never appear in `Debug` output.
#[derive(Clone, Default, PartialEq, Eq)]
pub struct PasswordForm {
    new_password: String,
    confirm_password: String,
}

impl PasswordForm {
    pub fn new(new_password: impl Into<String>, confirm_password: impl Into<String>) -> Self {
        Self {
            new_password: new_password.into(),
            confirm_password: confirm_password.into(),
        }
    }

    pub fn set_new_password(&mut self, value: impl Into<String>) {
        self.new_password = value.into();
    }

    pub fn set_confirm_password(&mut self, value: impl Into<String>) {
        self.confirm_password = value.into();
    }

    pub fn new_password(&self) -> &str {
        &self.new_password
    }

    pub fn confirm_password(&self) -> &str {
        &self.confirm_password
    }

    pub fn is_empty(&self) -> bool {
        self.new_password.is_empty() && self.confirm_password.is_empty()
    }

    /// Drop both values, releasing their buffers.
    pub fn clear(&mut self) {
        self.new_password = String::new();
        self.confirm_password = String::new();
    }

    /// Apply the policy to the new password, then require an exact,
    /// case-sensitive match from the confirmation.
    pub fn validate(&self, policy: &PasswordPolicy) -> DispatchResult<()> {
        policy.check(&self.new_password)?;

        if self.confirm_password.is_empty() {
            return Err(OperationError::validation("Password confirmation is required")
                .on_field(CONFIRM_PASSWORD_FIELD));
        }
        if self.confirm_password != self.new_password {
            return Err(OperationError::validation("The passwords do not match")
                .on_field(CONFIRM_PASSWORD_FIELD));
        }
        Ok(())
    }
}

impl fmt::Debug for PasswordForm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PasswordForm")
            .field("new_password_set", &!self.new_password.is_empty())
            .field("confirm_password_set", &!self.confirm_password.is_empty())
            .finish()
    }
}
