use thiserror::Error;

#[derive(Debug, Error)]
pub enum MemberError {
    #[error("failed to encode or decode member data: {0}")]
    Serialization(#[from] bincode::Error),

    #[error("failed to load configuration: {0}")]
    Config(#[from] config::ConfigError),

    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}
