use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ModelError {
    #[error("duplicate record for country '{country}' in year {year}")]
    DuplicateKey { country: String, year: i32 },
}

pub type Result<T> = std::result::Result<T, ModelError>;
