use std::result;

use arrow::error::ArrowError;
use catalog::CatalogError;
use common::error::CommonError;
use thiserror::Error;

pub type Result<T> = result::Result<T, DemoGenError>;

#[derive(Error, Debug)]
pub enum DemoGenError {
    #[error("Internal: {0:?}")]
    Internal(String),
    #[error("{0}")]
    Common(#[from] CommonError),
    #[error("ArrowError: {0:?}")]
    ArrowError(#[from] ArrowError),
    #[error("CatalogError: {0}")]
    CatalogError(#[from] CatalogError),
    #[error("DecimalError: {0:?}")]
    DecimalError(#[from] rust_decimal::Error),
    #[error("unknown user {0}")]
    UnknownUser(i64),
    #[error("unknown product {0}")]
    UnknownProduct(i64),
}
