use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseUvModeError {
    #[error("unknown uv mode `{0}`")]
    Unknown(String),
}
