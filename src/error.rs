use thiserror::Error;

#[derive(Error, Debug)]
pub enum ShambaError {
    #[error("HTTP request error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON parsing error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Provider unavailable: {0}")]
    ProviderUnavailable(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Authentication required")]
    AuthRequired,

    #[error("Invalid username or password")]
    InvalidCredentials,

    #[error("User already exists: {0}")]
    UserAlreadyExists(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Password hashing error: {0}")]
    Hash(#[from] bcrypt::BcryptError),
}

pub type Result<T> = std::result::Result<T, ShambaError>;
