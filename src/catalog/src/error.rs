use std::result;

use arrow::error::ArrowError;
use parquet::errors::ParquetError;
use thiserror::Error;

pub type Result<T> = result::Result<T, CatalogError>;

#[derive(Error, Debug)]
pub enum CatalogError {
    #[error("catalog not found: {0}")]
    CatalogNotFound(String),
    #[error("schema not found: {0}")]
    SchemaNotFound(String),
    #[error("table not found: {0}")]
    TableNotFound(String),
    #[error("column not found: {table}.{column}")]
    ColumnNotFound { table: String, column: String },
    #[error("function not found: {0}")]
    FunctionNotFound(String),
    #[error("constraint already exists: {0}")]
    ConstraintAlreadyExists(String),
    #[error("invalid constraint {0}: {1}")]
    InvalidConstraint(String, String),
    #[error("invalid name: {0:?}")]
    InvalidName(String),
    #[error("io {0:?}")]
    Io(#[from] std::io::Error),
    #[error("arrow {0:?}")]
    Arrow(#[from] ArrowError),
    #[error("parquet {0:?}")]
    Parquet(#[from] ParquetError),
    #[error("serde {0:?}")]
    Serde(#[from] serde_json::Error),
}
