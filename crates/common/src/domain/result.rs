use thiserror::Error;

pub type DomainResult<T> = Result<T, DomainError>;

#[derive(Error, Debug)]
pub enum DomainError {
    #[error("Space not found: {0}")]
    SpaceNotFound(String),

    #[error("Workspace not found: {0}")]
    WorkspaceNotFound(String),

    #[error("Tier not found: {0}")]
    TierNotFound(String),

    #[error("User is not approved yet: {0}")]
    NotApproved(String),

    #[error("Permission denied: {0}")]
    PermissionDenied(String),

    #[error("Update conflict: {0}")]
    Conflict(String),

    #[error("Validation error: {0}")]
    ValidationError(String),

    #[error("Store error: {0}")]
    StoreError(#[from] anyhow::Error),
}
