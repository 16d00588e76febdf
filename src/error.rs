use thiserror::Error;

pub type Result<T> = std::result::Result<T, ServiceError>;

/// Failure taxonomy for the service.
///
/// Only `Validation` and `Gateway` ever reach the caller of a checkout;
/// `Notification` and `Storage` are caught at their call sites and logged.
#[derive(Error, Debug)]
pub enum ServiceError {
    #[error("validation failed: {0}")]
    Validation(String),
    #[error("payment gateway error: {0}")]
    Gateway(String),
    #[error("notification error: {0}")]
    Notification(String),
    #[error("storage error: {0}")]
    Storage(String),
}

impl ServiceError {
    /// The bare failure reason, without the variant prefix.
    pub fn reason(&self) -> &str {
        match self {
            ServiceError::Validation(reason)
            | ServiceError::Gateway(reason)
            | ServiceError::Notification(reason)
            | ServiceError::Storage(reason) => reason,
        }
    }
}

impl From<reqwest::Error> for ServiceError {
    fn from(err: reqwest::Error) -> Self {
        ServiceError::Gateway(err.to_string())
    }
}

impl From<lettre::transport::smtp::Error> for ServiceError {
    fn from(err: lettre::transport::smtp::Error) -> Self {
        ServiceError::Notification(err.to_string())
    }
}

impl From<lettre::error::Error> for ServiceError {
    fn from(err: lettre::error::Error) -> Self {
        ServiceError::Notification(err.to_string())
    }
}

impl From<lettre::address::AddressError> for ServiceError {
    fn from(err: lettre::address::AddressError) -> Self {
        ServiceError::Notification(format!("invalid address: {err}"))
    }
}

impl From<serde_json::Error> for ServiceError {
    fn from(err: serde_json::Error) -> Self {
        ServiceError::Storage(format!("encoding error: {err}"))
    }
}

#[cfg(feature = "storage-rocksdb")]
impl From<rocksdb::Error> for ServiceError {
    fn from(err: rocksdb::Error) -> Self {
        ServiceError::Storage(err.to_string())
    }
}
