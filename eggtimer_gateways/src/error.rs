use thiserror::Error;

#[derive(Debug, Error)]
pub enum GatewayError {
    #[error("notification permission denied")]
    PermissionDenied,
    #[error("alert worker disconnected")]
    Disconnected,
    #[error("io: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, GatewayError>;
