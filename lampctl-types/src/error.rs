pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    #[error("Invalid device address: {0}")]
    InvalidAddress(String),
    
    #[error("Parse error: {0}")]
    Parse(String),
}
