use thiserror::Error;

#[derive(Error, Debug)]
pub enum FileTimeError {
    #[error("no such attribute: {0}")]
    AttributeNotFound(String),
    #[error("field name is not valid ASCII")]
    FieldNameEncoding,
    #[error("IO error")]
    IoError(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, FileTimeError>;
