use thiserror::Error;

#[derive(Debug, Error)]
pub enum ModelError {
    /// One or more configuration problems, reported together.
    #[error("invalid configuration: {}", .0.join("; "))]
    InvalidConfig(Vec<String>),
}

pub type Result<T> = std::result::Result<T, ModelError>;
