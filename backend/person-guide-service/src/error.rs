use thiserror::Error;
use tonic::Status as GrpcStatus;

pub type Result<T> = std::result::Result<T, ServiceError>;

#[derive(Debug, Error)]
pub enum ServiceError {
    /// No person matched, or the matching person has no phone numbers.
    /// Both cases are reported the same way.
    #[error("Not found: {0}")]
    NotFound(String),

    /// A read or send on an open stream failed. Only the current session is affected.
    #[error("Stream I/O failure: {0}")]
    StreamIo(GrpcStatus),

    /// Invalid or unreadable configuration; fatal at startup.
    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<config::ConfigError> for ServiceError {
    fn from(err: config::ConfigError) -> Self {
        ServiceError::Configuration(err.to_string())
    }
}

// Convert to gRPC Status for gRPC handlers
impl From<ServiceError> for GrpcStatus {
    fn from(err: ServiceError) -> Self {
        match err {
            ServiceError::NotFound(msg) => GrpcStatus::not_found(msg),
            ServiceError::StreamIo(status) => status,
            ServiceError::Configuration(_) | ServiceError::Internal(_) => {
                GrpcStatus::internal(err.to_string())
            }
        }
    }
}

// Convert from gRPC Status for client calls
impl From<GrpcStatus> for ServiceError {
    fn from(status: GrpcStatus) -> Self {
        match status.code() {
            tonic::Code::NotFound => ServiceError::NotFound(status.message().to_string()),
            _ => ServiceError::StreamIo(status),
        }
    }
}
