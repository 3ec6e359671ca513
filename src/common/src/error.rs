use std::result;

use thiserror::Error;

pub type Result<T> = result::Result<T, CommonError>;

#[derive(Error, Debug)]
pub enum CommonError {
    #[error("catalog name is empty: enter the name of an existing catalog")]
    EmptyCatalog,
    #[error("new schema name is empty: enter a schema name")]
    EmptyNewSchema,
    #[error("existing schema name is empty: enter the name of an existing schema")]
    EmptyExistingSchema,
    #[error("invalid {kind} name {name:?}: use letters, digits, '_' and '-' only")]
    InvalidName { kind: &'static str, name: String },
}
