use models::errors::ModelError;
use thiserror::Error;

/// Business errors for account workflows
#[derive(Debug, Error)]
pub enum AccountsError {
    #[error("{0}")]
    Validation(String),
    #[error("{0}")]
    Conflict(String),
    #[error("{resource} not found with the given input data {field} : '{value}'")]
    NotFound {
        resource: &'static str,
        field: &'static str,
        value: String,
    },
    #[error("repository error: {0}")]
    Repository(String),
}

impl AccountsError {
    pub fn not_found(resource: &'static str, field: &'static str, value: impl ToString) -> Self {
        Self::NotFound { resource, field, value: value.to_string() }
    }

    /// Short label used for metrics and log fields.
    pub fn kind(&self) -> &'static str {
        match self {
            AccountsError::Validation(_) => "validation",
            AccountsError::Conflict(_) => "conflict",
            AccountsError::NotFound { .. } => "not_found",
            AccountsError::Repository(_) => "repository",
        }
    }
}

impl From<ModelError> for AccountsError {
    fn from(e: ModelError) -> Self {
        match e {
            ModelError::Validation(msg) => AccountsError::Validation(msg),
            ModelError::Conflict(msg) => AccountsError::Conflict(msg),
            ModelError::NotFound { entity, key, value } => AccountsError::NotFound { resource: entity, field: key, value },
            ModelError::Db(msg) => AccountsError::Repository(msg),
        }
    }
}
