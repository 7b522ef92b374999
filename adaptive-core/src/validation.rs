//! Pre-flight checks run before anything is sent.
//!
//! Credential checks accumulate every empty field so a misconfiguration can be
//! fixed in one pass. Payload checks stop at the first missing parameter.

use crate::{
    credential::{Credential, CredentialField},
    errors::{Error, Result},
    request::Operation,
};

/// Outcome of [`validate`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationResult {
    Valid,
    MissingCredentials,
    InvalidCredentials(Vec<CredentialField>),
    MissingParameter(&'static str),
}

impl ValidationResult {
    pub fn is_valid(&self) -> bool {
        matches!(self, ValidationResult::Valid)
    }

    pub fn into_result(self) -> Result<()> {
        match self {
            ValidationResult::Valid => Ok(()),
            ValidationResult::MissingCredentials => Err(Error::MissingCredentials),
            ValidationResult::InvalidCredentials(missing) => {
                Err(Error::InvalidCredentials { missing })
            }
            ValidationResult::MissingParameter(name) => Err(Error::MissingParameter(name)),
        }
    }
}

/// Checks the credential, then the operation's required parameters.
pub fn validate<O: Operation>(credential: Option<&Credential>, operation: &O) -> ValidationResult {
    let Some(credential) = credential else {
        return ValidationResult::MissingCredentials;
    };

    let missing = credential.missing_fields();
    if !missing.is_empty() {
        return ValidationResult::InvalidCredentials(missing);
    }

    match operation.missing_parameter() {
        Some(name) => ValidationResult::MissingParameter(name),
        None => ValidationResult::Valid,
    }
}
