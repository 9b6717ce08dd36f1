use thiserror::Error;

#[derive(Debug, Error)]
pub enum CoreError {
    #[error("unknown record field: {0}")]
    UnknownField(String),
}
