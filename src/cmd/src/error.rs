use std::result;

use catalog::CatalogError;
use common::error::CommonError;
use demo_gen::error::DemoGenError;
use thiserror::Error;
use tracing::subscriber::SetGlobalDefaultError;

pub type Result<T> = result::Result<T, Error>;

#[derive(Error, Debug)]
pub enum Error {
    #[error("BadRequest: {0}")]
    BadRequest(String),
    #[error("{0}")]
    Common(#[from] CommonError),
    #[error("{0}")]
    Catalog(#[from] CatalogError),
    #[error("{0}")]
    DemoGen(#[from] DemoGenError),
    #[error("Config: {0}")]
    Config(#[from] config::ConfigError),
    #[error("Arrow: {0}")]
    Arrow(#[from] arrow::error::ArrowError),
    #[error("ProgressTemplate: {0}")]
    ProgressTemplate(#[from] indicatif::style::TemplateError),
    #[error("SetGlobalDefaultError: {0:?}")]
    SetGlobalDefaultError(#[from] SetGlobalDefaultError),
    #[error("StdIO: {0:?}")]
    StdIO(#[from] std::io::Error),
}
